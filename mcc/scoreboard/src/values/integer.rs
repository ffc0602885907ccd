use mcc_commands::{ExecuteComponent, MinecraftCommand, MinecraftRange, ScoreboardOperation};
use mcc_error::LowerResult;

use super::{decimal, ScoreboardValue};
use crate::{
    lowering::{operation_command, set_command},
    typedef::scale,
    Lowering, Operation, Typedef,
};

/// Integers and times are single registers, so every operation maps to one command
pub(super) fn operation(
    this: &ScoreboardValue,
    operation: Operation,
    other: &ScoreboardValue,
) -> Vec<String> {
    vec![operation_command(
        this.player(),
        operation.scoreboard_operation(),
        other.player(),
    )]
}

/// `integer <op>= decimal`, where the result is truncated toward zero
pub(super) fn operation_decimal(
    this: &ScoreboardValue,
    operation: Operation,
    other: &ScoreboardValue,
    precision: u8,
    lowering: &Lowering,
) -> LowerResult<Vec<String>> {
    let unit = scale(precision)?;
    let mut commands = Vec::new();

    match operation {
        Operation::Set => commands.push(operation_command(
            this.player(),
            ScoreboardOperation::Copy,
            other.player(),
        )),
        Operation::Swap => {
            commands.push(operation_command(
                this.player(),
                ScoreboardOperation::Swap,
                other.player(),
            ));
            commands.push(set_command(other.fraction_player(), 0));
        }
        Operation::Add | Operation::Sub | Operation::Mod => {
            let unit = lowering.constant(unit, &this.clarifier, &mut commands);
            let scaled = scaled_copy(this, &unit, lowering, &mut commands);
            let combined = decimal::combined(other, &unit, &this.clarifier, lowering, &mut commands);
            commands.push(operation_command(
                scaled.player(),
                operation.scoreboard_operation(),
                combined.player(),
            ));
            lowering.truncating_divide(
                &scaled.player(),
                &unit.player(),
                &this.clarifier,
                &mut commands,
            );
            commands.push(operation_command(
                this.player(),
                ScoreboardOperation::Copy,
                scaled.player(),
            ));
        }
        Operation::Mul => {
            let unit = lowering.constant(unit, &this.clarifier, &mut commands);
            let combined = decimal::combined(other, &unit, &this.clarifier, lowering, &mut commands);
            commands.push(operation_command(
                combined.player(),
                ScoreboardOperation::Times,
                this.player(),
            ));
            lowering.truncating_divide(
                &combined.player(),
                &unit.player(),
                &this.clarifier,
                &mut commands,
            );
            commands.push(operation_command(
                this.player(),
                ScoreboardOperation::Copy,
                combined.player(),
            ));
        }
        Operation::Div => {
            let unit = lowering.constant(unit, &this.clarifier, &mut commands);
            let scaled = scaled_copy(this, &unit, lowering, &mut commands);
            let combined = decimal::combined(other, &unit, &this.clarifier, lowering, &mut commands);
            lowering.truncating_divide(
                &scaled.player(),
                &combined.player(),
                &this.clarifier,
                &mut commands,
            );
            // Division by zero keeps the left side
            commands.push(
                MinecraftCommand::Execute {
                    parts: vec![ExecuteComponent::IfScoreMatches {
                        player: combined.player(),
                        range: MinecraftRange::exact(0).not(),
                    }],
                    and_then: Box::new(MinecraftCommand::ScoreboardOperation {
                        player1: this.player(),
                        operation: ScoreboardOperation::Copy,
                        player2: scaled.player(),
                    }),
                }
                .to_string(),
            );
        }
    }

    Ok(commands)
}

/// Copies `this * unit` into a new register
fn scaled_copy(
    this: &ScoreboardValue,
    unit: &ScoreboardValue,
    lowering: &Lowering,
    commands: &mut Vec<String>,
) -> crate::TempHandle {
    let scaled = lowering.temp(&Typedef::Integer, &this.clarifier);
    commands.push(operation_command(
        scaled.player(),
        ScoreboardOperation::Copy,
        this.player(),
    ));
    commands.push(operation_command(
        scaled.player(),
        ScoreboardOperation::Times,
        unit.player(),
    ));
    scaled
}
