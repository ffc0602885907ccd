use std::{cell::RefCell, rc::Rc};

/// The commands that run once when the program is loaded
///
/// Shared between the registry and the temp allocators, which all add their definitions here.
#[derive(Debug, Clone, Default)]
pub struct ProgramHead {
    commands: Rc<RefCell<Vec<String>>>,
}

impl ProgramHead {
    pub fn push(&self, command: String) {
        self.commands.borrow_mut().push(command);
    }

    pub fn extend(&self, commands: impl IntoIterator<Item = String>) {
        self.commands.borrow_mut().extend(commands);
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }
}
