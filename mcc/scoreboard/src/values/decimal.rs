//! Decimals are stored in two registers: the whole part and the fraction, scaled by `10^precision`.
//!
//! Every lowering leaves both registers with the same sign and `|fraction| < 10^precision`.
//! Digits that do not fit the result's precision are truncated toward zero.

use mcc_commands::{ScoreboardOperation, ScoreboardPlayer};
use mcc_error::{LangErrorKind, LowerResult};

use super::ScoreboardValue;
use crate::{
    lowering::{operation_command, set_command},
    typedef::scale,
    Clarifier, Lowering, Operation, TempHandle, Typedef,
};

/// The highest precision at which two decimals can be multiplied
///
/// Partial products of two fractions need `10^(2 * precision)` to fit into a register.
pub const MAX_MULTIPLY_PRECISION: u8 = 4;

/// Loads `whole * unit + fraction` into a new integer register
pub(super) fn combined(
    value: &ScoreboardValue,
    unit: &ScoreboardValue,
    clarifier: &Clarifier,
    lowering: &Lowering,
    commands: &mut Vec<String>,
) -> TempHandle {
    let temp = lowering.temp(&Typedef::Integer, clarifier);
    combine_into(&temp, value, unit, commands);
    temp
}

pub(super) fn combine_into(
    target: &ScoreboardValue,
    value: &ScoreboardValue,
    unit: &ScoreboardValue,
    commands: &mut Vec<String>,
) {
    commands.push(operation_command(
        target.player(),
        ScoreboardOperation::Copy,
        value.player(),
    ));
    commands.push(operation_command(
        target.player(),
        ScoreboardOperation::Times,
        unit.player(),
    ));
    commands.push(operation_command(
        target.player(),
        ScoreboardOperation::Plus,
        value.fraction_player(),
    ));
}

/// Moves whole units out of the fraction and fixes up the sign
fn normalize(
    this: &ScoreboardValue,
    unit: &ScoreboardValue,
    unit_value: i32,
    lowering: &Lowering,
    commands: &mut Vec<String>,
) {
    {
        let carry = lowering.temp(&Typedef::Integer, &this.clarifier);
        commands.push(operation_command(
            carry.player(),
            ScoreboardOperation::Copy,
            this.fraction_player(),
        ));
        commands.push(operation_command(
            carry.player(),
            ScoreboardOperation::Divide,
            unit.player(),
        ));
        commands.push(operation_command(
            this.player(),
            ScoreboardOperation::Plus,
            carry.player(),
        ));
        commands.push(operation_command(
            carry.player(),
            ScoreboardOperation::Times,
            unit.player(),
        ));
        commands.push(operation_command(
            this.fraction_player(),
            ScoreboardOperation::Minus,
            carry.player(),
        ));
    }

    // The floor division leaves a fraction in [0, unit), which needs a borrow for negative numbers
    commands.push(
        lowering
            .routines()
            .borrow_invocation(this, unit_value),
    );
}

/// Stores a combined number back into both registers of `this`
fn split_into(
    this: &ScoreboardValue,
    combined: &ScoreboardValue,
    unit: &ScoreboardValue,
    unit_value: i32,
    lowering: &Lowering,
    commands: &mut Vec<String>,
) {
    commands.push(set_command(this.player(), 0));
    commands.push(operation_command(
        this.fraction_player(),
        ScoreboardOperation::Copy,
        combined.player(),
    ));
    normalize(this, unit, unit_value, lowering, commands);
}

/// `decimal <op>= integer`
pub(super) fn operation_integer(
    this: &ScoreboardValue,
    precision: u8,
    operation: Operation,
    other: &ScoreboardValue,
    lowering: &Lowering,
) -> LowerResult<Vec<String>> {
    let unit_value = scale(precision)?;
    let mut commands = Vec::new();

    match operation {
        Operation::Set | Operation::Swap => {
            commands.push(operation_command(
                this.player(),
                operation.scoreboard_operation(),
                other.player(),
            ));
            commands.push(set_command(this.fraction_player(), 0));
        }
        Operation::Add | Operation::Sub => {
            commands.push(operation_command(
                this.player(),
                operation.scoreboard_operation(),
                other.player(),
            ));
            let unit = lowering.constant(unit_value, &this.clarifier, &mut commands);
            normalize(this, &unit, unit_value, lowering, &mut commands);
        }
        Operation::Mul => {
            commands.push(operation_command(
                this.player(),
                ScoreboardOperation::Times,
                other.player(),
            ));
            commands.push(operation_command(
                this.fraction_player(),
                ScoreboardOperation::Times,
                other.player(),
            ));
            let unit = lowering.constant(unit_value, &this.clarifier, &mut commands);
            normalize(this, &unit, unit_value, lowering, &mut commands);
        }
        Operation::Div => {
            let unit = lowering.constant(unit_value, &this.clarifier, &mut commands);
            let combined = combined(this, &unit, &this.clarifier, lowering, &mut commands);
            lowering.truncating_divide(
                &combined.player(),
                &other.player(),
                &this.clarifier,
                &mut commands,
            );
            split_into(this, &combined, &unit, unit_value, lowering, &mut commands);
        }
        Operation::Mod => {
            let unit = lowering.constant(unit_value, &this.clarifier, &mut commands);
            let combined = combined(this, &unit, &this.clarifier, lowering, &mut commands);
            let divisor = lowering.temp(&Typedef::Integer, &this.clarifier);
            commands.push(operation_command(
                divisor.player(),
                ScoreboardOperation::Copy,
                other.player(),
            ));
            commands.push(operation_command(
                divisor.player(),
                ScoreboardOperation::Times,
                unit.player(),
            ));
            commands.push(operation_command(
                combined.player(),
                ScoreboardOperation::Modulo,
                divisor.player(),
            ));
            split_into(this, &combined, &unit, unit_value, lowering, &mut commands);
        }
    }

    Ok(commands)
}

/// `decimal <op>= decimal`, where the right side is rescaled to the precision of the left
pub(super) fn operation_decimal(
    this: &ScoreboardValue,
    precision: u8,
    operation: Operation,
    other: &ScoreboardValue,
    other_precision: u8,
    lowering: &Lowering,
) -> LowerResult<Vec<String>> {
    let unit_value = scale(precision)?;
    let mut commands = Vec::new();

    match operation {
        Operation::Div | Operation::Mod | Operation::Mul
            if operation != Operation::Mul || precision > MAX_MULTIPLY_PRECISION =>
        {
            return Err(LangErrorKind::UnsupportedOperation {
                operation: operation.to_string(),
                lhs: this.typedef().to_string(),
                rhs: other.typedef().to_string(),
            }
            .into())
        }
        Operation::Swap => {
            swap(this, precision, other, other_precision, lowering, &mut commands)?;
            return Ok(commands);
        }
        Operation::Set | Operation::Add | Operation::Sub | Operation::Mul => {}
        Operation::Div | Operation::Mod => unreachable!("rejected above"),
    }

    let balanced;
    let operand = if precision == other_precision {
        other
    } else {
        balanced = balanced_copy(this, precision, other, other_precision, lowering, &mut commands)?;
        &*balanced
    };

    match operation {
        Operation::Set => {
            commands.push(operation_command(
                this.player(),
                ScoreboardOperation::Copy,
                operand.player(),
            ));
            commands.push(operation_command(
                this.fraction_player(),
                ScoreboardOperation::Copy,
                operand.fraction_player(),
            ));
        }
        Operation::Add | Operation::Sub => {
            commands.push(operation_command(
                this.player(),
                operation.scoreboard_operation(),
                operand.player(),
            ));
            commands.push(operation_command(
                this.fraction_player(),
                operation.scoreboard_operation(),
                operand.fraction_player(),
            ));
            let unit = lowering.constant(unit_value, &this.clarifier, &mut commands);
            normalize(this, &unit, unit_value, lowering, &mut commands);
        }
        Operation::Mul => {
            let unit = lowering.constant(unit_value, &this.clarifier, &mut commands);
            multiply(this, operand, &unit, lowering, &mut commands);
            normalize(this, &unit, unit_value, lowering, &mut commands);
        }
        Operation::Div | Operation::Mod | Operation::Swap => unreachable!("lowered above"),
    }

    Ok(commands)
}

/// Copies `other` into a new decimal register with the precision of `this`
///
/// Extra digits are truncated, which keeps the copy normalized.
fn balanced_copy(
    this: &ScoreboardValue,
    precision: u8,
    other: &ScoreboardValue,
    other_precision: u8,
    lowering: &Lowering,
    commands: &mut Vec<String>,
) -> LowerResult<TempHandle> {
    let balanced = lowering.temp(this.typedef(), &this.clarifier);
    commands.push(operation_command(
        balanced.player(),
        ScoreboardOperation::Copy,
        other.player(),
    ));
    commands.push(operation_command(
        balanced.fraction_player(),
        ScoreboardOperation::Copy,
        other.fraction_player(),
    ));

    let factor_value = scale(precision.abs_diff(other_precision))?;
    let factor = lowering.constant(factor_value, &this.clarifier, commands);
    if other_precision > precision {
        lowering.truncating_divide(
            &balanced.fraction_player(),
            &factor.player(),
            &this.clarifier,
            commands,
        );
    } else {
        commands.push(operation_command(
            balanced.fraction_player(),
            ScoreboardOperation::Times,
            factor.player(),
        ));
    }
    drop(factor);

    Ok(balanced)
}

/// Swaps both registers and rescales each fraction to its new owner's precision
fn swap(
    this: &ScoreboardValue,
    precision: u8,
    other: &ScoreboardValue,
    other_precision: u8,
    lowering: &Lowering,
    commands: &mut Vec<String>,
) -> LowerResult<()> {
    commands.push(operation_command(
        this.player(),
        ScoreboardOperation::Swap,
        other.player(),
    ));
    commands.push(operation_command(
        this.fraction_player(),
        ScoreboardOperation::Swap,
        other.fraction_player(),
    ));

    if precision != other_precision {
        let factor_value = scale(precision.abs_diff(other_precision))?;
        let factor = lowering.constant(factor_value, &this.clarifier, commands);
        let (grows, shrinks) = if precision > other_precision {
            (this, other)
        } else {
            (other, this)
        };
        commands.push(operation_command(
            grows.fraction_player(),
            ScoreboardOperation::Times,
            factor.player(),
        ));
        lowering.truncating_divide(
            &shrinks.fraction_player(),
            &factor.player(),
            &shrinks.clarifier,
            commands,
        );
    }

    Ok(())
}

/// `this *= other` for two decimals of the same precision, leaving `this` unnormalized
///
/// The product is assembled from partial products, so no register holds much more than
/// the result or `10^(2 * precision)`. Whole parts are split as `whole = q * unit + r`.
fn multiply(
    this: &ScoreboardValue,
    other: &ScoreboardValue,
    unit: &ScoreboardValue,
    lowering: &Lowering,
    commands: &mut Vec<String>,
) {
    let clarifier = &this.clarifier;
    let fraction = lowering.temp(&Typedef::Integer, clarifier);
    let whole = lowering.temp(&Typedef::Integer, clarifier);
    let part = lowering.temp(&Typedef::Integer, clarifier);

    // f1 * f2 / unit
    commands.push(operation_command(
        fraction.player(),
        ScoreboardOperation::Copy,
        this.fraction_player(),
    ));
    commands.push(operation_command(
        fraction.player(),
        ScoreboardOperation::Times,
        other.fraction_player(),
    ));
    lowering.truncating_divide(&fraction.player(), &unit.player(), clarifier, commands);

    let mut push = |lhs: ScoreboardPlayer, operation, rhs: ScoreboardPlayer| {
        commands.push(operation_command(lhs, operation, rhs));
    };

    // r2 * f1 + r1 * f2 belongs to the fraction
    for (split, factor) in [
        (other.player(), this.fraction_player()),
        (this.player(), other.fraction_player()),
    ] {
        push(part.player(), ScoreboardOperation::Copy, split);
        push(part.player(), ScoreboardOperation::Modulo, unit.player());
        push(part.player(), ScoreboardOperation::Times, factor);
        push(fraction.player(), ScoreboardOperation::Plus, part.player());
    }

    // q2 * f1 + q1 * f2 belongs to the whole part
    push(whole.player(), ScoreboardOperation::Copy, other.player());
    push(whole.player(), ScoreboardOperation::Divide, unit.player());
    push(whole.player(), ScoreboardOperation::Times, this.fraction_player());
    push(part.player(), ScoreboardOperation::Copy, this.player());
    push(part.player(), ScoreboardOperation::Divide, unit.player());
    push(part.player(), ScoreboardOperation::Times, other.fraction_player());
    push(whole.player(), ScoreboardOperation::Plus, part.player());

    push(this.player(), ScoreboardOperation::Times, other.player());
    push(this.player(), ScoreboardOperation::Plus, whole.player());
    push(this.fraction_player(), ScoreboardOperation::Copy, fraction.player());
}
