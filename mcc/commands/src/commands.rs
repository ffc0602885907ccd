use std::rc::Rc;

use crate::{MinecraftRange, ScoreboardOperation};

/// A score holder together with the objective that is addressed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardPlayer {
    /// The selector or fake player name
    pub player: Rc<str>,
    pub objective: Rc<str>,
}

impl ScoreboardPlayer {
    pub fn new(player: impl Into<Rc<str>>, objective: impl Into<Rc<str>>) -> Self {
        ScoreboardPlayer {
            player: player.into(),
            objective: objective.into(),
        }
    }
}

/// Enumerates all commands that the compiler emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinecraftCommand {
    /// Creates a new objective
    ObjectiveAdd {
        name: Rc<str>,
        criterion: ObjectiveCriterion,
    },
    /// Deletes an objective and every score on it
    ObjectiveRemove { name: Rc<str> },
    /// Sets the scoreboard value to a specific integer
    ScoreboardSet {
        player: ScoreboardPlayer,
        value: i32,
    },
    /// Adds a constant to a scoreboard value
    ScoreboardAdd {
        player: ScoreboardPlayer,
        value: i32,
    },
    /// Subtracts a constant from a scoreboard value
    ScoreboardRemove {
        player: ScoreboardPlayer,
        value: i32,
    },
    /// Operates on two scoreboard values and stores the result in the first one
    ScoreboardOperation {
        player1: ScoreboardPlayer,
        operation: ScoreboardOperation,
        player2: ScoreboardPlayer,
    },
    /// Runs `and_then` if every condition in `parts` holds
    Execute {
        parts: Vec<ExecuteComponent>,
        and_then: Box<MinecraftCommand>,
    },
    /// Calls another function
    Function { path: Rc<str> },
    RawCommand { command: Rc<str> },
}

/// A single subcommand of an execute command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteComponent {
    /// Changes the executing entity
    As { selector: Rc<str> },
    /// Checks whether a score lies in a range
    IfScoreMatches {
        player: ScoreboardPlayer,
        range: MinecraftRange,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveCriterion {
    Dummy,
}
