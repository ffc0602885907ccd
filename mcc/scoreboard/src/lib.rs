//! Typed scoreboard values and the lowering of arithmetic on them into scoreboard commands
//!
//! Every value lives in one or more objectives. Integers, booleans and times use a single
//! register, decimals a whole and a fraction register, structs one value per field.
//! Lowering an operation may need temporary registers, which are handed out by a
//! [`TempAllocator`] and given back when their [`TempHandle`] goes out of scope.

mod clarifier;
mod head;
mod literal;
mod lowering;
mod manager;
pub mod naming;
mod routines;
pub mod temps;
mod typedef;
mod values;

pub use clarifier::Clarifier;
pub use head::ProgramHead;
pub use literal::{DecimalLiteral, Literal, ParseDecimalError};
pub use lowering::{Lowering, Operation};
pub use manager::ScoreboardManager;
pub use routines::{GeneratedRoutine, HelperRoutines};
pub use temps::{LegacyTemps, TempAllocator, TempHandle, TempManager, TempStateContract};
pub use typedef::{scale, StructDefinition, StructField, Typedef, MAX_PRECISION};
pub use values::{
    Attribute, LiteralComparison, ScoreboardValue, ScoresEntry, MAX_MULTIPLY_PRECISION,
};
