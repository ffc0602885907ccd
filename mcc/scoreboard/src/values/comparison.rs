use std::fmt;

use itertools::Itertools;
use mcc_commands::{MinecraftRange, ScoreboardComparison};
use mcc_common::SmolStr;
use mcc_error::{LangErrorKind, LowerResult};

use super::{decimal, ScoreboardValue};
use crate::{typedef::scale, Literal, Lowering, TempHandle, Typedef};

/// One `objective=range` pair of a `scores={...}` selector filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoresEntry {
    pub objective: SmolStr,
    pub range: MinecraftRange,
}

impl fmt::Display for ScoresEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.objective, self.range)
    }
}

/// A comparison with a literal, as scores filter entries
///
/// The entries are only valid after `commands` ran and while the comparison is alive,
/// because they may refer to a temp register.
#[derive(Debug)]
pub struct LiteralComparison {
    pub entries: Vec<ScoresEntry>,
    pub commands: Vec<String>,
    temp: Option<TempHandle>,
}

impl LiteralComparison {
    /// Renders the entries as `scores={...}`
    pub fn selector_filter(&self) -> String {
        format!("scores={{{}}}", self.entries.iter().join(","))
    }

    /// The register which holds the compared number, if one was needed
    pub fn temp(&self) -> Option<&TempHandle> {
        self.temp.as_ref()
    }
}

/// The registers an exact rational number `numerator / denominator` satisfies under `comparison`
pub(crate) fn range_for(
    comparison: ScoreboardComparison,
    numerator: i128,
    denominator: i128,
) -> MinecraftRange {
    let floor = numerator.div_euclid(denominator);
    let ceil = -(-numerator).div_euclid(denominator);
    let min = i128::from(i32::MIN);
    let max = i128::from(i32::MAX);

    let at_most = |bound: i128| match i32::try_from(bound) {
        Ok(bound) => MinecraftRange::at_most(bound),
        Err(_) if bound < min => MinecraftRange::never(),
        Err(_) => MinecraftRange::always(),
    };
    let at_least = |bound: i128| match i32::try_from(bound) {
        Ok(bound) => MinecraftRange::at_least(bound),
        Err(_) if bound > max => MinecraftRange::never(),
        Err(_) => MinecraftRange::always(),
    };
    let equal = || match i32::try_from(floor) {
        Ok(value) if floor == ceil => MinecraftRange::exact(value),
        _ => MinecraftRange::never(),
    };

    match comparison {
        ScoreboardComparison::Equal => equal(),
        ScoreboardComparison::NotEqual => equal().not(),
        ScoreboardComparison::Less => at_most(ceil - 1),
        ScoreboardComparison::LessOrEqual => at_most(floor),
        ScoreboardComparison::Greater => at_least(floor + 1),
        ScoreboardComparison::GreaterOrEqual => at_least(ceil),
    }
}

impl ScoreboardValue {
    /// Lowers `self <comparison> literal` into scores filter entries
    ///
    /// Decimals are compared through a temp register, which the result keeps alive.
    pub fn compare_to_literal(
        &self,
        comparison: ScoreboardComparison,
        literal: &Literal,
        lowering: &Lowering,
    ) -> LowerResult<LiteralComparison> {
        let unsupported = || LangErrorKind::UnsupportedComparison {
            comparison: comparison.str_value().to_string(),
            typedef: self.typedef().to_string(),
        };

        match (self.typedef(), literal) {
            (Typedef::Boolean, Literal::Boolean(value)) => {
                if !comparison.is_equality() {
                    return Err(unsupported().into());
                }
                let range = range_for(comparison, i128::from(*value), 1);
                Ok(LiteralComparison {
                    entries: vec![ScoresEntry {
                        objective: self.name().clone(),
                        range,
                    }],
                    commands: Vec::new(),
                    temp: None,
                })
            }
            (Typedef::Boolean, _) if !comparison.is_equality() => Err(unsupported().into()),
            (Typedef::Integer | Typedef::Time, _) => {
                let (numerator, denominator) = self.rational(literal, 0)?;
                Ok(LiteralComparison {
                    entries: vec![ScoresEntry {
                        objective: self.name().clone(),
                        range: range_for(comparison, numerator, denominator),
                    }],
                    commands: Vec::new(),
                    temp: None,
                })
            }
            (Typedef::Decimal { precision }, _) => {
                let (numerator, denominator) = self.rational(literal, *precision)?;
                let mut commands = Vec::new();
                let temp = lowering.temp(&Typedef::Integer, &self.clarifier);
                {
                    let unit =
                        lowering.constant(scale(*precision)?, &self.clarifier, &mut commands);
                    decimal::combine_into(&temp, self, &unit, &mut commands);
                }

                Ok(LiteralComparison {
                    entries: vec![ScoresEntry {
                        objective: temp.name().clone(),
                        range: range_for(comparison, numerator, denominator),
                    }],
                    commands,
                    temp: Some(temp),
                })
            }
            _ => Err(self.incompatible_literal(literal).into()),
        }
    }

    /// The literal as an exact fraction in units of `10^-precision`
    fn rational(&self, literal: &Literal, precision: u8) -> LowerResult<(i128, i128)> {
        let factor = i128::from(scale(precision)?);
        match literal {
            Literal::Integer(value) => Ok((i128::from(*value) * factor, 1)),
            Literal::Time(value) if *self.typedef() == Typedef::Time => {
                Ok((i128::from(*value) * factor, 1))
            }
            Literal::Decimal(decimal) if *self.typedef() != Typedef::Time => {
                let denominator = decimal
                    .denominator()
                    .ok_or_else(|| self.incompatible_literal(literal))?;
                Ok((
                    i128::from(decimal.mantissa) * factor,
                    i128::from(denominator),
                ))
            }
            _ => Err(self.incompatible_literal(literal).into()),
        }
    }
}
