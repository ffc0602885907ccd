use std::{cell::RefCell, rc::Rc};

use itertools::Itertools;

use mcc_common::{Config, FxIndexMap, SmolStr};
use mcc_error::{InternalError, LowerResult};
use rustc_hash::FxHashSet;

use super::{StackKey, TempAllocator, TempHandle, TempStack};
use crate::{Clarifier, Literal, ProgramHead, ScoreboardValue, Typedef};

#[derive(Debug)]
struct LegacyState {
    prefix: SmolStr,
    /// The tickets of the acquired registers, shared by every type
    slots: Vec<u64>,
    next_ticket: u64,
    saved: Vec<usize>,
    /// Name and name limit of every defined register
    defined: FxHashSet<(SmolStr, usize)>,
    ever_defined: FxIndexMap<SmolStr, ScoreboardValue>,
    head: ProgramHead,
}

impl LegacyState {
    fn issue_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }
}

impl TempStack for RefCell<LegacyState> {
    fn depth(&self, _key: &StackKey) -> usize {
        self.borrow().slots.len()
    }

    fn ticket(&self, _key: &StackKey, index: usize) -> Option<u64> {
        self.borrow().slots.get(index).copied()
    }

    fn pop(&self, _key: &StackKey) -> Result<(), InternalError> {
        match self.borrow_mut().slots.pop() {
            Some(_) => Ok(()),
            None => Err(InternalError::TempUnderflow {
                stack: "shared".to_string(),
            }),
        }
    }
}

/// The registry's own temp counter, which numbers registers of all types in one sequence
#[derive(Debug, Clone)]
pub struct LegacyTemps {
    state: Rc<RefCell<LegacyState>>,
}

impl LegacyTemps {
    pub fn new(config: &Config, head: ProgramHead) -> Self {
        LegacyTemps {
            state: Rc::new(RefCell::new(LegacyState {
                prefix: SmolStr::from(config.legacy_temp_prefix.as_str()),
                slots: Vec::new(),
                next_ticket: 0,
                saved: Vec::new(),
                defined: FxHashSet::default(),
                ever_defined: FxIndexMap::default(),
                head,
            })),
        }
    }

    fn request(&self, typedef: &Typedef, clarifier: Clarifier) -> TempHandle {
        let mut state = self.state.borrow_mut();
        let index = state.slots.len();
        let alias = format!("{}{index}", state.prefix);
        let value = ScoreboardValue::new(&alias, typedef.clone(), clarifier);

        let identity = (value.name().clone(), typedef.max_name_length());
        if state.defined.insert(identity) {
            tracing::debug!(name = %value.name(), %typedef, "defining temp register");
            let mut commands = value.commands_define();
            commands.extend(value.commands_init(value.clarifier.current_string()));
            state.head.extend(commands);
        }
        // A register can be reused with another type, so the latest layout wins
        state
            .ever_defined
            .insert(SmolStr::from(format!("{}:{}", value.name(), typedef.shortcode())), value.clone());
        let ticket = state.issue_ticket();
        state.slots.push(ticket);
        drop(state);

        TempHandle::new(
            value,
            self.state.clone(),
            StackKey::new(false, typedef),
            index,
            ticket,
        )
    }

    /// Acquires the next local integer register
    pub fn request_temp(&self) -> TempHandle {
        self.request(&Typedef::Integer, Clarifier::local())
    }

    /// Acquires a register with the type and scope of `value`
    pub fn request_temp_clone(&self, value: &ScoreboardValue) -> TempHandle {
        self.request(value.typedef(), value.clarifier.clone())
    }

    /// Acquires a local register of the literal's type, without assigning it
    pub fn request_temp_literal(&self, literal: &Literal) -> LowerResult<TempHandle> {
        Ok(self.request(&literal.typedef()?, Clarifier::local()))
    }

    /// Gives back the most recent register
    ///
    /// Releasing more than was acquired keeps the counter at zero.
    pub fn release_temp(&self) {
        if self.state.borrow_mut().slots.pop().is_none() {
            tracing::warn!("released a temp register, but none was acquired");
        }
    }

    pub fn push_temp_state(&self) {
        let mut state = self.state.borrow_mut();
        let index = state.slots.len();
        state.saved.push(index);
    }

    pub fn pop_temp_state(&self) -> Result<(), InternalError> {
        let mut state = self.state.borrow_mut();
        let index = state.saved.pop().ok_or(InternalError::EmptyTempStateStack)?;
        // Positions given back in between are reserved again, but belong to no handle
        while state.slots.len() < index {
            let ticket = state.issue_ticket();
            state.slots.push(ticket);
        }
        state.slots.truncate(index);
        Ok(())
    }

    pub fn index(&self) -> usize {
        self.state.borrow().slots.len()
    }

    pub fn commands_uninstall(&self) -> Vec<String> {
        self.state
            .borrow()
            .ever_defined
            .values()
            .flat_map(ScoreboardValue::commands_uninstall)
            .unique()
            .collect()
    }
}

impl TempAllocator for LegacyTemps {
    fn acquire(&self, typedef: &Typedef, clarifier: &Clarifier) -> TempHandle {
        self.request(typedef, clarifier.clone())
    }
}
