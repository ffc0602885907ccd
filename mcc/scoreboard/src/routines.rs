use std::{cell::RefCell, rc::Rc};

use mcc_commands::{ExecuteComponent, MinecraftCommand, MinecraftRange, ScoreboardPlayer};
use mcc_common::{FxIndexMap, SmolStr};

use crate::ScoreboardValue;

/// A function the compiler generates on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRoutine {
    pub path: Rc<str>,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RoutineKey {
    name: SmolStr,
    unit: i32,
    holder: SmolStr,
}

/// Helper routines, generated at most once per register layout
#[derive(Debug)]
pub struct HelperRoutines {
    namespace: SmolStr,
    routines: RefCell<FxIndexMap<RoutineKey, GeneratedRoutine>>,
}

impl HelperRoutines {
    pub fn new(namespace: &str) -> Self {
        HelperRoutines {
            namespace: SmolStr::from(namespace),
            routines: RefCell::default(),
        }
    }

    /// The routine which moves one unit from the whole part into the fraction of `value`
    ///
    /// It restores a matching sign after the floor division of the carry step left
    /// a negative whole part next to a positive fraction.
    pub(crate) fn borrow_routine(&self, value: &ScoreboardValue, unit: i32) -> Rc<str> {
        let holder = value.clarifier.routine_holder();
        let key = RoutineKey {
            name: value.name().clone(),
            unit,
            holder: SmolStr::from(holder),
        };

        let mut routines = self.routines.borrow_mut();
        if let Some(routine) = routines.get(&key) {
            return routine.path.clone();
        }

        let sanitized: String = value
            .name()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let variants = routines.keys().filter(|other| other.name == key.name).count();
        let path: Rc<str> = if variants == 0 {
            format!("{}/borrow/{sanitized}", self.namespace).into()
        } else {
            format!("{}/borrow/{sanitized}_{variants}", self.namespace).into()
        };
        tracing::debug!(%path, "generating borrow routine");

        let commands = vec![
            MinecraftCommand::ScoreboardAdd {
                player: ScoreboardPlayer::new(holder, value.name().as_str()),
                value: 1,
            }
            .to_string(),
            MinecraftCommand::ScoreboardRemove {
                player: ScoreboardPlayer::new(holder, value.fraction_name().as_str()),
                value: unit,
            }
            .to_string(),
        ];
        routines.insert(
            key,
            GeneratedRoutine {
                path: path.clone(),
                commands,
            },
        );
        path
    }

    /// The command which calls the borrow routine if `value` has a negative whole part and a
    /// positive fraction
    pub(crate) fn borrow_invocation(&self, value: &ScoreboardValue, unit: i32) -> String {
        let path = self.borrow_routine(value, unit);
        let holder = value.clarifier.routine_holder();

        let mut parts = Vec::with_capacity(3);
        if !value.is_global() {
            parts.push(ExecuteComponent::As {
                selector: value.clarifier.current_string().into(),
            });
        }
        parts.push(ExecuteComponent::IfScoreMatches {
            player: ScoreboardPlayer::new(holder, value.name().as_str()),
            range: MinecraftRange::at_most(-1),
        });
        parts.push(ExecuteComponent::IfScoreMatches {
            player: ScoreboardPlayer::new(holder, value.fraction_name().as_str()),
            range: MinecraftRange::at_least(1),
        });

        MinecraftCommand::Execute {
            parts,
            and_then: Box::new(MinecraftCommand::Function { path }),
        }
        .to_string()
    }

    pub fn routines(&self) -> Vec<GeneratedRoutine> {
        self.routines.borrow().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.routines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.borrow().is_empty()
    }
}
