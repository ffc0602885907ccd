use std::fmt;

use mcc_commands::{
    ExecuteComponent, MinecraftCommand, MinecraftRange, ScoreboardOperation, ScoreboardPlayer,
};

use crate::{Clarifier, HelperRoutines, TempAllocator, TempHandle, Typedef};

/// A binary operation between two values, where the left side receives the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Swap,
}

impl Operation {
    pub fn scoreboard_operation(self) -> ScoreboardOperation {
        match self {
            Operation::Set => ScoreboardOperation::Copy,
            Operation::Add => ScoreboardOperation::Plus,
            Operation::Sub => ScoreboardOperation::Minus,
            Operation::Mul => ScoreboardOperation::Times,
            Operation::Div => ScoreboardOperation::Divide,
            Operation::Mod => ScoreboardOperation::Modulo,
            Operation::Swap => ScoreboardOperation::Swap,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scoreboard_operation().str_value())
    }
}

/// Everything that lowering an operation may need besides its operands
#[derive(Clone, Copy)]
pub struct Lowering<'a> {
    temps: &'a dyn TempAllocator,
    routines: &'a HelperRoutines,
}

impl<'a> Lowering<'a> {
    pub fn new(temps: &'a dyn TempAllocator, routines: &'a HelperRoutines) -> Self {
        Lowering { temps, routines }
    }

    pub fn temp(&self, typedef: &Typedef, clarifier: &Clarifier) -> TempHandle {
        self.temps.acquire(typedef, clarifier)
    }

    /// Acquires an integer register and loads `value` into it
    pub fn constant(
        &self,
        value: i32,
        clarifier: &Clarifier,
        commands: &mut Vec<String>,
    ) -> TempHandle {
        let temp = self.temp(&Typedef::Integer, clarifier);
        commands.push(set_command(temp.player(), value));
        temp
    }

    pub fn routines(&self) -> &'a HelperRoutines {
        self.routines
    }

    /// `target /= divisor`, rounded toward zero instead of down
    ///
    /// A zero divisor leaves `target` unchanged, like the native division.
    pub(crate) fn truncating_divide(
        &self,
        target: &ScoreboardPlayer,
        divisor: &ScoreboardPlayer,
        clarifier: &Clarifier,
        commands: &mut Vec<String>,
    ) {
        let remainder = self.temp(&Typedef::Integer, clarifier);
        commands.push(operation_command(
            remainder.player(),
            ScoreboardOperation::Copy,
            target.clone(),
        ));
        commands.push(operation_command(
            remainder.player(),
            ScoreboardOperation::Modulo,
            divisor.clone(),
        ));
        commands.push(operation_command(
            target.clone(),
            ScoreboardOperation::Divide,
            divisor.clone(),
        ));

        // The floored quotient of an inexact negative division is one too small
        let non_zero = MinecraftRange::exact(0).not();
        commands.push(
            MinecraftCommand::Execute {
                parts: vec![
                    ExecuteComponent::IfScoreMatches {
                        player: target.clone(),
                        range: MinecraftRange::at_most(-1),
                    },
                    ExecuteComponent::IfScoreMatches {
                        player: remainder.player(),
                        range: non_zero,
                    },
                    ExecuteComponent::IfScoreMatches {
                        player: divisor.clone(),
                        range: non_zero,
                    },
                ],
                and_then: Box::new(MinecraftCommand::ScoreboardAdd {
                    player: target.clone(),
                    value: 1,
                }),
            }
            .to_string(),
        );
    }
}

pub(crate) fn set_command(player: ScoreboardPlayer, value: i32) -> String {
    MinecraftCommand::ScoreboardSet { player, value }.to_string()
}

pub(crate) fn operation_command(
    lhs: ScoreboardPlayer,
    operation: ScoreboardOperation,
    rhs: ScoreboardPlayer,
) -> String {
    MinecraftCommand::ScoreboardOperation {
        player1: lhs,
        operation,
        player2: rhs,
    }
    .to_string()
}
