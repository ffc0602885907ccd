use std::{fmt, rc::Rc};

use mcc_common::SmolStr;
use mcc_error::{LangErrorKind, LangResult};

use crate::naming::{FRACTION_SUFFIX, MAX_NAME_LENGTH};

/// The largest supported decimal precision, since `10^9` is the largest power of ten in a register
pub const MAX_PRECISION: u8 = 9;

/// `10^precision`, the scale of a decimal fraction register
pub fn scale(precision: u8) -> LangResult<i32> {
    if precision > MAX_PRECISION {
        return Err(LangErrorKind::InvalidPrecision {
            precision,
            max: MAX_PRECISION,
        });
    }
    Ok(10_i32.pow(u32::from(precision)))
}

/// The type of a scoreboard value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Typedef {
    Integer,
    /// A fixed point number with `precision` fractional digits
    Decimal {
        precision: u8,
    },
    Boolean,
    /// A duration in ticks
    Time,
    Struct(Rc<StructDefinition>),
}

impl Typedef {
    /// Creates a decimal type and validates the precision
    pub fn decimal(precision: u8) -> LangResult<Typedef> {
        scale(precision)?;
        Ok(Typedef::Decimal { precision })
    }

    /// A short, name-safe code which identifies this type
    pub fn shortcode(&self) -> SmolStr {
        match self {
            Typedef::Integer => SmolStr::new_inline("i"),
            Typedef::Decimal { precision } => SmolStr::from(format!("d{precision}")),
            Typedef::Boolean => SmolStr::new_inline("b"),
            Typedef::Time => SmolStr::new_inline("t"),
            Typedef::Struct(definition) => SmolStr::from(format!("s{}", definition.name)),
        }
    }

    /// The longest objective name a value of this type may use for its main register
    pub fn max_name_length(&self) -> usize {
        match self {
            Typedef::Decimal { .. } => MAX_NAME_LENGTH - FRACTION_SUFFIX.len(),
            _ => MAX_NAME_LENGTH,
        }
    }

    pub fn precision(&self) -> Option<u8> {
        match self {
            Typedef::Decimal { precision } => Some(*precision),
            _ => None,
        }
    }

    /// Whether values of this type live in a single integer register
    pub fn is_integral(&self) -> bool {
        matches!(self, Typedef::Integer | Typedef::Time | Typedef::Boolean)
    }
}

impl fmt::Display for Typedef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typedef::Integer => f.write_str("int"),
            Typedef::Decimal { precision } => write!(f, "decimal {precision}"),
            Typedef::Boolean => f.write_str("bool"),
            Typedef::Time => f.write_str("time"),
            Typedef::Struct(definition) => write!(f, "struct {}", definition.name),
        }
    }
}

/// A user defined struct, which is a list of named, typed fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructDefinition {
    pub name: SmolStr,
    fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: SmolStr,
    pub typedef: Typedef,
}

impl StructDefinition {
    pub fn new(name: impl Into<SmolStr>, fields: Vec<StructField>) -> Self {
        StructDefinition {
            name: name.into(),
            fields,
        }
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    /// Looks up a field, ignoring case
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }
}

impl StructField {
    pub fn new(name: impl Into<SmolStr>, typedef: Typedef) -> Self {
        StructField {
            name: name.into(),
            typedef,
        }
    }
}
