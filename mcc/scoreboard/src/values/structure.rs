use mcc_error::LowerResult;

use super::ScoreboardValue;
use crate::{Lowering, Operation};

/// Structs of the same definition are assigned and swapped field by field
pub(super) fn operation(
    this: &ScoreboardValue,
    operation: Operation,
    other: &ScoreboardValue,
    lowering: &Lowering,
) -> LowerResult<Vec<String>> {
    if !matches!(operation, Operation::Set | Operation::Swap) {
        return Err(this.incompatible(operation, other).into());
    }

    let mut commands = Vec::new();
    for (lhs, rhs) in this.fields().iter().zip(other.fields()) {
        commands.extend(lhs.commands_operation(operation, &rhs, lowering)?);
    }
    Ok(commands)
}
