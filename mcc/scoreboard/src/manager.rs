use std::rc::Rc;

use itertools::Itertools;
use mcc_common::{Config, FxIndexMap, SmolStr};
use mcc_error::{InternalError, LangErrorKind, LowerResult};

use crate::{
    Attribute, Clarifier, HelperRoutines, LegacyTemps, Literal, Lowering, ProgramHead,
    ScoreboardValue, StructDefinition, TempHandle, TempManager, Typedef,
};

/// The registry of every declared value and struct
///
/// Names are case-insensitive. The manager also owns both temp allocators, the shared program
/// head and the generated helper routines.
#[derive(Debug)]
pub struct ScoreboardManager {
    global_player: SmolStr,
    values: FxIndexMap<SmolStr, ScoreboardValue>,
    structs: FxIndexMap<SmolStr, Rc<StructDefinition>>,
    head: ProgramHead,
    pub temps: TempManager,
    legacy: LegacyTemps,
    routines: HelperRoutines,
}

fn key(name: &str) -> SmolStr {
    SmolStr::from(name.to_lowercase())
}

impl ScoreboardManager {
    pub fn new(config: &Config) -> Self {
        let head = ProgramHead::default();
        ScoreboardManager {
            global_player: SmolStr::from(config.global_player.as_str()),
            values: FxIndexMap::default(),
            structs: FxIndexMap::default(),
            temps: TempManager::new(config, head.clone()),
            legacy: LegacyTemps::new(config, head.clone()),
            routines: HelperRoutines::new(&config.routine_namespace),
            head,
        }
    }

    /// Lowering that takes its temp registers from the scoped allocator
    pub fn lowering(&self) -> Lowering<'_> {
        Lowering::new(&self.temps, &self.routines)
    }

    /// Lowering that takes its temp registers from the shared counter
    pub fn legacy_lowering(&self) -> Lowering<'_> {
        Lowering::new(&self.legacy, &self.routines)
    }

    pub fn clarifier(&self, global: bool) -> Clarifier {
        if global {
            Clarifier::global(&self.global_player)
        } else {
            Clarifier::local()
        }
    }

    /// Creates a value without registering it
    pub fn create(
        &self,
        alias: &str,
        typedef: Typedef,
        attributes: Vec<Attribute>,
    ) -> ScoreboardValue {
        let clarifier = self.clarifier(attributes.contains(&Attribute::Global));
        ScoreboardValue::new(alias, typedef, clarifier).with_attributes(attributes)
    }

    /// Creates a value with the type of `literal`
    ///
    /// The value is neither registered nor assigned.
    pub fn create_from_literal(
        &self,
        alias: &str,
        literal: &Literal,
        attributes: Vec<Attribute>,
    ) -> LowerResult<ScoreboardValue> {
        Ok(self.create(alias, literal.typedef()?, attributes))
    }

    /// Registers a value, returns `false` if a value with this alias already exists
    pub fn add(&mut self, value: ScoreboardValue) -> bool {
        let key = key(value.alias());
        if self.values.contains_key(&key) {
            return false;
        }
        tracing::debug!(alias = %value.alias(), name = %value.name(), "registering value");
        self.values.insert(key, value);
        true
    }

    /// Looks up a value by its alias or by its objective name
    pub fn get_by_name(&self, name: &str) -> Option<&ScoreboardValue> {
        self.values
            .get(&key(name))
            .or_else(|| self.values.values().find(|value| value.name() == name))
    }

    /// Resolves `value.field.field`
    pub fn get_by_accessor(&self, accessor: &str) -> LowerResult<ScoreboardValue> {
        if let Some(value) = self.get_by_name(accessor) {
            return Ok(value.clone());
        }

        let mut segments = accessor.split('.');
        let first = segments.next().unwrap_or_default();
        let mut value = self
            .get_by_name(first)
            .cloned()
            .ok_or_else(|| LangErrorKind::MissingValue {
                name: first.to_string(),
            })?;

        for segment in segments {
            value = match value.field(segment) {
                Some(field) => field,
                None => {
                    let (strukt, available) = match value.typedef() {
                        Typedef::Struct(definition) => (
                            definition.name.to_string(),
                            definition
                                .fields()
                                .iter()
                                .map(|field| field.name.to_string())
                                .collect(),
                        ),
                        other => (other.to_string(), Vec::new()),
                    };
                    return Err(LangErrorKind::MissingField {
                        field: segment.to_string(),
                        strukt,
                        available,
                    }
                    .into());
                }
            };
        }

        Ok(value)
    }

    pub fn values(&self) -> impl Iterator<Item = &ScoreboardValue> {
        self.values.values()
    }

    pub fn define_struct(
        &mut self,
        definition: StructDefinition,
    ) -> LowerResult<Rc<StructDefinition>> {
        let key = key(&definition.name);
        if self.structs.contains_key(&key) {
            return Err(LangErrorKind::StructRedefinition {
                name: definition.name.to_string(),
            }
            .into());
        }
        let definition = Rc::new(definition);
        self.structs.insert(key, definition.clone());
        Ok(definition)
    }

    pub fn get_struct(&self, name: &str) -> LowerResult<Rc<StructDefinition>> {
        self.try_get_struct(name).ok_or_else(|| {
            LangErrorKind::MissingStruct {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn try_get_struct(&self, name: &str) -> Option<Rc<StructDefinition>> {
        self.structs.get(&key(name)).cloned()
    }

    /// Acquires a local integer register from the shared counter
    pub fn request_temp(&self) -> TempHandle {
        self.legacy.request_temp()
    }

    pub fn request_temp_clone(&self, value: &ScoreboardValue) -> TempHandle {
        self.legacy.request_temp_clone(value)
    }

    pub fn request_temp_literal(&self, literal: &Literal) -> LowerResult<TempHandle> {
        self.legacy.request_temp_literal(literal)
    }

    pub fn release_temp(&self) {
        self.legacy.release_temp();
    }

    pub fn push_temp_state(&self) {
        self.legacy.push_temp_state();
    }

    pub fn pop_temp_state(&self) -> Result<(), InternalError> {
        self.legacy.pop_temp_state()
    }

    pub fn legacy_temps(&self) -> &LegacyTemps {
        &self.legacy
    }

    pub fn head(&self) -> &ProgramHead {
        &self.head
    }

    pub fn routines(&self) -> &HelperRoutines {
        &self.routines
    }

    /// Removes every objective the program ever created
    pub fn commands_uninstall(&self) -> Vec<String> {
        self.values
            .values()
            .flat_map(ScoreboardValue::commands_uninstall)
            .chain(self.temps.commands_uninstall())
            .chain(self.legacy.commands_uninstall())
            .unique()
            .collect()
    }
}
