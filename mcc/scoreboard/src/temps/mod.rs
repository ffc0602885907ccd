//! Temporary registers
//!
//! Every allocator hands out [`TempHandle`]s, which give the register back when they go out of scope.

mod legacy;
mod scoped;

use std::{cmp::Ordering, fmt, ops::Deref, rc::Rc};

use mcc_error::InternalError;

pub use legacy::LegacyTemps;
pub use scoped::{TempManager, TempSnapshot, TempStateContract};

use crate::{Clarifier, ScoreboardValue, Typedef};

/// Anything that can lend out temporary registers
pub trait TempAllocator {
    /// Acquires a register of type `typedef`, addressed the same way as `clarifier`
    fn acquire(&self, typedef: &Typedef, clarifier: &Clarifier) -> TempHandle;
}

/// Identifies one stack of temp registers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StackKey {
    pub global: bool,
    pub typedef: Typedef,
}

impl StackKey {
    pub fn new(global: bool, typedef: &Typedef) -> Self {
        StackKey {
            global,
            typedef: typedef.clone(),
        }
    }
}

impl fmt::Display for StackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = if self.global { "global" } else { "local" };
        write!(f, "{scope} {}", self.typedef)
    }
}

/// The part of an allocator a handle needs to give its register back
pub(crate) trait TempStack {
    fn depth(&self, key: &StackKey) -> usize;

    /// The ticket of the acquisition that currently holds position `index`
    fn ticket(&self, key: &StackKey, index: usize) -> Option<u64>;

    fn pop(&self, key: &StackKey) -> Result<(), InternalError>;
}

struct Slot {
    stack: Rc<dyn TempStack>,
    key: StackKey,
    index: usize,
    ticket: u64,
}

impl Slot {
    fn release(self, value: &ScoreboardValue) -> Result<(), InternalError> {
        // A restored temp state or a manual release already gave this position away
        if self.stack.ticket(&self.key, self.index) != Some(self.ticket) {
            tracing::trace!(name = %value.name(), "temp register was already discarded");
            return Ok(());
        }

        let depth = self.stack.depth(&self.key);
        match depth.cmp(&(self.index + 1)) {
            Ordering::Equal => self.stack.pop(&self.key),
            Ordering::Less => unreachable!("the ticket at {} is still held", self.index),
            Ordering::Greater => Err(InternalError::TempReleaseOrder {
                name: value.name().to_string(),
                depth,
                expected: self.index + 1,
            }),
        }
    }
}

/// A temporary register which is released when the handle is dropped
///
/// Handles must be released in the reverse order of their acquisition, which
/// lexical scoping guarantees as long as they are not moved around.
pub struct TempHandle {
    value: ScoreboardValue,
    slot: Option<Slot>,
}

impl TempHandle {
    pub(crate) fn new(
        value: ScoreboardValue,
        stack: Rc<dyn TempStack>,
        key: StackKey,
        index: usize,
        ticket: u64,
    ) -> Self {
        TempHandle {
            value,
            slot: Some(Slot {
                stack,
                key,
                index,
                ticket,
            }),
        }
    }

    pub fn value(&self) -> &ScoreboardValue {
        &self.value
    }

    /// Releases the register now and reports a wrong release order
    pub fn release(mut self) -> Result<(), InternalError> {
        match self.slot.take() {
            Some(slot) => slot.release(&self.value),
            None => Ok(()),
        }
    }

    /// Keeps the register reserved without a handle
    ///
    /// It stays reserved until its stack is released manually or a temp state is restored.
    pub fn detach(mut self) -> ScoreboardValue {
        self.slot = None;
        self.value.clone()
    }
}

impl Deref for TempHandle {
    type Target = ScoreboardValue;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Drop for TempHandle {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            if let Err(err) = slot.release(&self.value) {
                tracing::error!(%err, "dropped a temp register out of order");
            }
        }
    }
}

impl fmt::Debug for TempHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempHandle")
            .field("value", &self.value)
            .field("index", &self.slot.as_ref().map(|slot| slot.index))
            .finish()
    }
}
