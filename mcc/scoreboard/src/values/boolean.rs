use mcc_error::LowerResult;

use super::{integer, ScoreboardValue};
use crate::Operation;

/// Booleans only support assignment and swapping, arithmetic on them is rejected
pub(super) fn operation(
    this: &ScoreboardValue,
    operation: Operation,
    other: &ScoreboardValue,
) -> LowerResult<Vec<String>> {
    match operation {
        Operation::Set | Operation::Swap => Ok(integer::operation(this, operation, other)),
        _ => Err(this.incompatible(operation, other).into()),
    }
}
