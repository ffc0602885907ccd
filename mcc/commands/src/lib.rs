//! Builders for the individual commands of the target machine
//!
//! Commands are constructed as [`MinecraftCommand`] values and only turned into text
//! through their [`std::fmt::Display`] implementation, so the exact wire format lives in one place.

mod commands;
mod range;
mod scoreboard;
mod stringify;

pub use commands::{ExecuteComponent, MinecraftCommand, ObjectiveCriterion, ScoreboardPlayer};
pub use range::{MinecraftRange, ParseRangeError};
pub use scoreboard::{ScoreboardComparison, ScoreboardOperation};
