use std::{cell::RefCell, rc::Rc};

use mcc_common::{Config, FxIndexMap, SmolStr};
use mcc_error::{InternalError, LowerResult};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{StackKey, TempAllocator, TempHandle, TempStack};
use crate::{Clarifier, Literal, ProgramHead, ScoreboardValue, Typedef};

#[derive(Debug)]
struct TempState {
    prefix: SmolStr,
    global_player: SmolStr,
    /// The tickets of the acquired registers, per stack
    stacks: FxHashMap<StackKey, Vec<u64>>,
    next_ticket: u64,
    /// Names handed out since the last restored snapshot
    defined: FxHashSet<SmolStr>,
    /// Every register that was ever created, never rolled back
    ever_defined: FxIndexMap<SmolStr, ScoreboardValue>,
    head: ProgramHead,
}

impl TempStack for RefCell<TempState> {
    fn depth(&self, key: &StackKey) -> usize {
        self.borrow().stacks.get(key).map_or(0, Vec::len)
    }

    fn ticket(&self, key: &StackKey, index: usize) -> Option<u64> {
        self.borrow()
            .stacks
            .get(key)
            .and_then(|stack| stack.get(index))
            .copied()
    }

    fn pop(&self, key: &StackKey) -> Result<(), InternalError> {
        let mut state = self.borrow_mut();
        let stack = state.stacks.get_mut(key);
        match stack.and_then(Vec::pop) {
            Some(_) => {
                if state.stacks.get(key).is_some_and(Vec::is_empty) {
                    state.stacks.remove(key);
                }
                Ok(())
            }
            None => Err(InternalError::TempUnderflow {
                stack: key.to_string(),
            }),
        }
    }
}

/// Allocates temp registers from one stack per scope and type
///
/// A register is named after its position in the stack, so nested expressions reuse the
/// same few objectives.
#[derive(Debug, Clone)]
pub struct TempManager {
    state: Rc<RefCell<TempState>>,
}

impl TempManager {
    pub fn new(config: &Config, head: ProgramHead) -> Self {
        TempManager {
            state: Rc::new(RefCell::new(TempState {
                prefix: SmolStr::from(config.temp_prefix.as_str()),
                global_player: SmolStr::from(config.global_player.as_str()),
                stacks: FxHashMap::default(),
                next_ticket: 0,
                defined: FxHashSet::default(),
                ever_defined: FxIndexMap::default(),
                head,
            })),
        }
    }

    fn request(&self, typedef: &Typedef, clarifier: Clarifier) -> TempHandle {
        let mut state = self.state.borrow_mut();
        let key = StackKey::new(clarifier.is_global(), typedef);
        let depth = state.stacks.get(&key).map_or(0, Vec::len);

        let scope = if clarifier.is_global() { 'G' } else { 'L' };
        let alias = format!("{}{scope}{}{depth}", state.prefix, typedef.shortcode());
        let value = ScoreboardValue::new(&alias, typedef.clone(), clarifier);

        if !state.ever_defined.contains_key(value.name()) {
            tracing::debug!(name = %value.name(), %typedef, "defining temp register");
            let mut commands = value.commands_define();
            commands.extend(value.commands_init(value.clarifier.current_string()));
            state.head.extend(commands);
            state.ever_defined.insert(value.name().clone(), value.clone());
        }
        state.defined.insert(value.name().clone());
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.stacks.entry(key.clone()).or_default().push(ticket);
        drop(state);

        TempHandle::new(value, self.state.clone(), key, depth, ticket)
    }

    fn global_clarifier(&self) -> Clarifier {
        Clarifier::global(&self.state.borrow().global_player)
    }

    pub fn request_local(&self, typedef: &Typedef) -> TempHandle {
        self.request(typedef, Clarifier::local())
    }

    pub fn request_global(&self, typedef: &Typedef) -> TempHandle {
        let clarifier = self.global_clarifier();
        self.request(typedef, clarifier)
    }

    /// Acquires a local register of the literal's type, without assigning it
    pub fn request_local_literal(&self, literal: &Literal) -> LowerResult<TempHandle> {
        Ok(self.request_local(&literal.typedef()?))
    }

    pub fn request_global_literal(&self, literal: &Literal) -> LowerResult<TempHandle> {
        Ok(self.request_global(&literal.typedef()?))
    }

    /// Acquires a register of the same type and scope as `value`
    ///
    /// `override_global` moves the register into the given scope instead.
    pub fn request_copy(
        &self,
        value: &ScoreboardValue,
        override_global: Option<bool>,
    ) -> TempHandle {
        let clarifier = match override_global {
            Some(global) if global != value.is_global() => {
                if global {
                    self.global_clarifier()
                } else {
                    Clarifier::local()
                }
            }
            _ => value.clarifier.clone(),
        };
        self.request(value.typedef(), clarifier)
    }

    fn release(&self, typedef: &Typedef, global: bool) -> Result<(), InternalError> {
        let key = StackKey::new(global, typedef);
        tracing::trace!(stack = %key, "releasing temp register");
        self.state.pop(&key)
    }

    /// Gives back the top register of the local stack for `typedef`
    ///
    /// Only needed for registers whose handle was detached.
    pub fn release_local(&self, typedef: &Typedef) -> Result<(), InternalError> {
        self.release(typedef, false)
    }

    pub fn release_global(&self, typedef: &Typedef) -> Result<(), InternalError> {
        self.release(typedef, true)
    }

    pub fn depth(&self, typedef: &Typedef, global: bool) -> usize {
        self.state.depth(&StackKey::new(global, typedef))
    }

    /// Whether a register with this name was handed out since the last restored snapshot
    pub fn is_defined(&self, name: &str) -> bool {
        self.state.borrow().defined.contains(name)
    }

    /// Every register ever created, in creation order
    pub fn ever_defined(&self) -> Vec<ScoreboardValue> {
        self.state.borrow().ever_defined.values().cloned().collect()
    }

    pub fn snapshot(&self) -> TempSnapshot {
        let state = self.state.borrow();
        TempSnapshot {
            stacks: state.stacks.clone(),
            defined: state.defined.clone(),
        }
    }

    /// Saves the current state, which is restored once the returned contract is disposed
    pub fn push_state(&self) -> TempStateContract {
        TempStateContract {
            state: self.state.clone(),
            snapshot: Some(self.snapshot()),
        }
    }

    pub fn commands_uninstall(&self) -> Vec<String> {
        self.state
            .borrow()
            .ever_defined
            .values()
            .flat_map(ScoreboardValue::commands_uninstall)
            .collect()
    }
}

impl TempAllocator for TempManager {
    fn acquire(&self, typedef: &Typedef, clarifier: &Clarifier) -> TempHandle {
        self.request(typedef, clarifier.clone())
    }
}

/// The acquired registers and defined names at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempSnapshot {
    stacks: FxHashMap<StackKey, Vec<u64>>,
    defined: FxHashSet<SmolStr>,
}

/// Restores the temp state it was created from when it is dropped
#[must_use = "the temp state is restored as soon as the contract is dropped"]
#[derive(Debug)]
pub struct TempStateContract {
    state: Rc<RefCell<TempState>>,
    snapshot: Option<TempSnapshot>,
}

impl TempStateContract {
    pub fn snapshot(&self) -> Option<&TempSnapshot> {
        self.snapshot.as_ref()
    }

    /// Restores the saved state
    pub fn dispose(self) {}
}

impl Drop for TempStateContract {
    fn drop(&mut self) {
        if let Some(TempSnapshot { stacks, defined }) = self.snapshot.take() {
            tracing::trace!("restoring temp state");
            let mut state = self.state.borrow_mut();
            state.stacks = stacks;
            state.defined = defined;
        }
    }
}
