use std::fmt;

use mcc_common::SmolStr;

/// The score holder a value is addressed through
///
/// Local values belong to the executing entity, global values to a fake player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clarifier {
    global: bool,
    current: SmolStr,
}

impl Clarifier {
    pub const DEFAULT_SELECTOR: &'static str = "@s";

    pub fn local() -> Self {
        Clarifier {
            global: false,
            current: SmolStr::new_inline(Self::DEFAULT_SELECTOR),
        }
    }

    pub fn global(player: &str) -> Self {
        Clarifier {
            global: true,
            current: SmolStr::from(player),
        }
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    /// The selector or fake player which is written into commands
    pub fn current_string(&self) -> &str {
        &self.current
    }

    /// Retargets a local value, for example to address it via `@a[...]`
    ///
    /// Global values always stay on their fake player.
    pub fn set_selector(&mut self, selector: &str) {
        if !self.global {
            self.current = SmolStr::from(selector);
        }
    }

    /// The holder to use inside a function which is executed as the addressed entity
    pub fn routine_holder(&self) -> &str {
        if self.global {
            &self.current
        } else {
            Self::DEFAULT_SELECTOR
        }
    }
}

impl Default for Clarifier {
    fn default() -> Self {
        Clarifier::local()
    }
}

impl fmt::Display for Clarifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.current)
    }
}
