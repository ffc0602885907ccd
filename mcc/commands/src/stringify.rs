use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::{ExecuteComponent, MinecraftCommand, ObjectiveCriterion, ScoreboardPlayer};

impl Display for ScoreboardPlayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.player, self.objective)
    }
}

impl Display for ObjectiveCriterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectiveCriterion::Dummy => "dummy",
        })
    }
}

impl Display for ExecuteComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExecuteComponent::As { selector } => write!(f, "as {selector}"),
            ExecuteComponent::IfScoreMatches { player, range } => {
                write!(f, "if score {player} matches {range}")
            }
        }
    }
}

impl Display for MinecraftCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MinecraftCommand::ObjectiveAdd { name, criterion } => {
                write!(f, "scoreboard objectives add \"{name}\" {criterion}")
            }
            MinecraftCommand::ObjectiveRemove { name } => {
                write!(f, "scoreboard objectives remove \"{name}\"")
            }
            MinecraftCommand::ScoreboardSet { player, value } => {
                write!(f, "scoreboard players set {player} {value}")
            }
            MinecraftCommand::ScoreboardAdd { player, value } => {
                write!(f, "scoreboard players add {player} {value}")
            }
            MinecraftCommand::ScoreboardRemove { player, value } => {
                write!(f, "scoreboard players remove {player} {value}")
            }
            MinecraftCommand::ScoreboardOperation {
                player1,
                operation,
                player2,
            } => write!(
                f,
                "scoreboard players operation {player1} {} {player2}",
                operation.str_value()
            ),
            MinecraftCommand::Execute { parts, and_then } => {
                write!(f, "execute {} run {and_then}", parts.iter().join(" "))
            }
            MinecraftCommand::Function { path } => write!(f, "function {path}"),
            MinecraftCommand::RawCommand { command } => f.write_str(command),
        }
    }
}
