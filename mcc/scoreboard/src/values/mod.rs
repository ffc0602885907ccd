//! Scoreboard values and the lowering of operations between them

mod boolean;
mod comparison;
mod decimal;
mod integer;
mod structure;

use std::fmt;

use mcc_commands::{MinecraftCommand, ObjectiveCriterion, ScoreboardPlayer};
use mcc_common::SmolStr;
use mcc_error::{InternalError, LangErrorKind, LowerError, LowerResult};

pub use comparison::{LiteralComparison, ScoresEntry};
pub use decimal::MAX_MULTIPLY_PRECISION;

use crate::{
    lowering::set_command,
    naming::{objective_name, FRACTION_SUFFIX},
    Clarifier, Literal, Lowering, Operation, Typedef,
};

/// Extra properties a value was declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// The value is stored on the global fake player instead of the executing entity
    Global,
}

/// A typed value which is stored in one or more scoreboard objectives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardValue {
    /// The objective name, which may be a hash of the alias
    name: SmolStr,
    /// The name the value was declared with
    alias: SmolStr,
    pub clarifier: Clarifier,
    typedef: Typedef,
    attributes: Vec<Attribute>,
}

impl ScoreboardValue {
    pub fn new(alias: &str, typedef: Typedef, clarifier: Clarifier) -> Self {
        ScoreboardValue {
            name: objective_name(alias, typedef.max_name_length()),
            alias: SmolStr::from(alias),
            clarifier,
            typedef,
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn alias(&self) -> &SmolStr {
        &self.alias
    }

    pub fn typedef(&self) -> &Typedef {
        &self.typedef
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn is_global(&self) -> bool {
        self.clarifier.is_global()
    }

    /// The main register
    pub fn player(&self) -> ScoreboardPlayer {
        ScoreboardPlayer::new(self.clarifier.current_string(), self.name.as_str())
    }

    /// The objective of the fraction register of a decimal
    pub fn fraction_name(&self) -> SmolStr {
        SmolStr::from(format!("{}{FRACTION_SUFFIX}", self.name))
    }

    pub(crate) fn fraction_player(&self) -> ScoreboardPlayer {
        ScoreboardPlayer::new(
            self.clarifier.current_string(),
            self.fraction_name().as_str(),
        )
    }

    /// The values that make up a struct, empty for every other type
    pub fn fields(&self) -> Vec<ScoreboardValue> {
        match &self.typedef {
            Typedef::Struct(definition) => definition
                .fields()
                .iter()
                .map(|field| self.field_value(&field.name, &field.typedef))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Looks up a field of a struct value, ignoring case
    pub fn field(&self, name: &str) -> Option<ScoreboardValue> {
        match &self.typedef {
            Typedef::Struct(definition) => definition
                .field(name)
                .map(|field| self.field_value(&field.name, &field.typedef)),
            _ => None,
        }
    }

    fn field_value(&self, field: &str, typedef: &Typedef) -> ScoreboardValue {
        ScoreboardValue::new(
            &format!("{}.{field}", self.alias),
            typedef.clone(),
            self.clarifier.clone(),
        )
        .with_attributes(self.attributes.clone())
    }

    /// Every objective this value occupies
    pub fn objective_names(&self) -> Vec<SmolStr> {
        match &self.typedef {
            Typedef::Integer | Typedef::Boolean | Typedef::Time => vec![self.name.clone()],
            Typedef::Decimal { .. } => vec![self.name.clone(), self.fraction_name()],
            Typedef::Struct(_) => self
                .fields()
                .iter()
                .flat_map(ScoreboardValue::objective_names)
                .collect(),
        }
    }

    /// Creates the objectives of this value
    pub fn commands_define(&self) -> Vec<String> {
        self.objective_names()
            .into_iter()
            .map(|name| {
                MinecraftCommand::ObjectiveAdd {
                    name: name.as_str().into(),
                    criterion: ObjectiveCriterion::Dummy,
                }
                .to_string()
            })
            .collect()
    }

    /// Sets every register of this value to zero for `selector`
    pub fn commands_init(&self, selector: &str) -> Vec<String> {
        self.objective_names()
            .into_iter()
            .map(|name| set_command(ScoreboardPlayer::new(selector, name.as_str()), 0))
            .collect()
    }

    /// Removes the objectives of this value
    pub fn commands_uninstall(&self) -> Vec<String> {
        self.objective_names()
            .into_iter()
            .map(|name| {
                MinecraftCommand::ObjectiveRemove {
                    name: name.as_str().into(),
                }
                .to_string()
            })
            .collect()
    }

    /// Assigns a literal
    ///
    /// `null` resets the value to zero.
    pub fn commands_set_literal(&self, literal: &Literal) -> LowerResult<Vec<String>> {
        if *literal == Literal::Null {
            return Ok(self.commands_init(self.clarifier.current_string()));
        }

        match (&self.typedef, literal) {
            (
                Typedef::Integer | Typedef::Time,
                Literal::Integer(value) | Literal::Time(value),
            ) => {
                Ok(vec![set_command(self.player(), *value)])
            }
            (Typedef::Integer, Literal::Decimal(decimal)) => {
                let whole = decimal
                    .truncate()
                    .ok_or_else(|| self.out_of_range(literal))?;
                Ok(vec![set_command(self.player(), whole)])
            }
            (Typedef::Boolean, Literal::Boolean(value)) => {
                Ok(vec![set_command(self.player(), i32::from(*value))])
            }
            (Typedef::Decimal { .. }, Literal::Integer(value)) => Ok(vec![
                set_command(self.player(), *value),
                set_command(self.fraction_player(), 0),
            ]),
            (Typedef::Decimal { precision }, Literal::Decimal(decimal)) => {
                let (whole, fraction) = decimal
                    .split(*precision)
                    .ok_or_else(|| self.out_of_range(literal))?;
                Ok(vec![
                    set_command(self.player(), whole),
                    set_command(self.fraction_player(), fraction),
                ])
            }
            _ => Err(self.incompatible_literal(literal).into()),
        }
    }

    /// Lowers `self <op>= other`
    pub fn commands_operation(
        &self,
        operation: Operation,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        match (&self.typedef, &other.typedef) {
            (Typedef::Integer | Typedef::Time, Typedef::Integer | Typedef::Time) => {
                Ok(integer::operation(self, operation, other))
            }
            (Typedef::Integer | Typedef::Time, Typedef::Decimal { precision }) => {
                integer::operation_decimal(self, operation, other, *precision, lowering)
            }
            (Typedef::Decimal { precision }, Typedef::Integer | Typedef::Time) => {
                decimal::operation_integer(self, *precision, operation, other, lowering)
            }
            (Typedef::Decimal { precision }, Typedef::Decimal { precision: other_precision }) => {
                decimal::operation_decimal(
                    self,
                    *precision,
                    operation,
                    other,
                    *other_precision,
                    lowering,
                )
            }
            (Typedef::Boolean, Typedef::Boolean) => boolean::operation(self, operation, other),
            (Typedef::Struct(lhs), Typedef::Struct(rhs)) if lhs == rhs => {
                structure::operation(self, operation, other, lowering)
            }
            _ => Err(self.incompatible(operation, other).into()),
        }
    }

    pub fn commands_set(
        &self,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        self.commands_operation(Operation::Set, other, lowering)
    }

    pub fn commands_add(
        &self,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        self.commands_operation(Operation::Add, other, lowering)
    }

    pub fn commands_sub(
        &self,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        self.commands_operation(Operation::Sub, other, lowering)
    }

    pub fn commands_mul(
        &self,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        self.commands_operation(Operation::Mul, other, lowering)
    }

    pub fn commands_div(
        &self,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        self.commands_operation(Operation::Div, other, lowering)
    }

    pub fn commands_mod(
        &self,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        self.commands_operation(Operation::Mod, other, lowering)
    }

    pub fn commands_swap(
        &self,
        other: &ScoreboardValue,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        self.commands_operation(Operation::Swap, other, lowering)
    }

    /// Lowers `self <op>= literal`
    ///
    /// Integer addition and subtraction use the constant forms directly, everything else
    /// goes through a temp register holding the literal.
    pub fn commands_operation_literal(
        &self,
        operation: Operation,
        literal: &Literal,
        lowering: &Lowering,
    ) -> LowerResult<Vec<String>> {
        if operation == Operation::Set {
            return self.commands_set_literal(literal);
        }
        if matches!(operation, Operation::Div | Operation::Mod) && literal.is_zero() {
            return Err(InternalError::DivideByZero {
                value: self.alias.to_string(),
            }
            .into());
        }

        match (&self.typedef, literal, operation) {
            (Typedef::Integer, Literal::Integer(value), Operation::Add)
            | (Typedef::Time, Literal::Integer(value) | Literal::Time(value), Operation::Add) => {
                Ok(vec![MinecraftCommand::ScoreboardAdd {
                    player: self.player(),
                    value: *value,
                }
                .to_string()])
            }
            (Typedef::Integer, Literal::Integer(value), Operation::Sub)
            | (Typedef::Time, Literal::Integer(value) | Literal::Time(value), Operation::Sub) => {
                Ok(vec![MinecraftCommand::ScoreboardRemove {
                    player: self.player(),
                    value: *value,
                }
                .to_string()])
            }
            (_, _, Operation::Swap) | (_, Literal::Null, _) => {
                Err(self.incompatible_literal(literal).into())
            }
            _ => {
                let temp = lowering.temp(&literal.typedef()?, &self.clarifier);
                let mut commands = temp.commands_set_literal(literal)?;
                commands.extend(self.commands_operation(operation, &temp, lowering)?);
                Ok(commands)
            }
        }
    }

    pub(crate) fn incompatible(&self, operation: Operation, other: &ScoreboardValue) -> LangErrorKind {
        LangErrorKind::IncompatibleOperands {
            operation: operation.to_string(),
            lhs: self.typedef.to_string(),
            rhs: other.typedef.to_string(),
        }
    }

    pub(crate) fn incompatible_literal(&self, literal: &Literal) -> LangErrorKind {
        LangErrorKind::IncompatibleLiteral {
            literal: literal.to_string(),
            typedef: self.typedef.to_string(),
        }
    }

    fn out_of_range(&self, literal: &Literal) -> LowerError {
        LangErrorKind::LiteralOutOfRange {
            literal: literal.to_string(),
            typedef: self.typedef.to_string(),
        }
        .into()
    }
}

impl fmt::Display for ScoreboardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.alias, self.typedef)
    }
}
