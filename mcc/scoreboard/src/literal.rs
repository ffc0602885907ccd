use std::{fmt, str::FromStr};

use mcc_error::{LangErrorKind, LangResult};

use crate::typedef::{Typedef, MAX_PRECISION};

/// A typed constant, as handed over by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i32),
    Decimal(DecimalLiteral),
    /// A duration in ticks
    Time(i32),
}

impl Literal {
    /// The type a value created from this literal gets
    pub fn typedef(&self) -> LangResult<Typedef> {
        match self {
            Literal::Null => Err(LangErrorKind::UnexpectedType {
                expected: vec![
                    "int".to_string(),
                    "decimal".to_string(),
                    "bool".to_string(),
                    "time".to_string(),
                ],
                got: "null".to_string(),
                declared: None,
            }),
            Literal::Boolean(_) => Ok(Typedef::Boolean),
            Literal::Integer(_) => Ok(Typedef::Integer),
            Literal::Decimal(decimal) => Typedef::decimal(decimal.precision),
            Literal::Time(_) => Ok(Typedef::Time),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Literal::Null | Literal::Boolean(false) | Literal::Integer(0) | Literal::Time(0) => {
                true
            }
            Literal::Decimal(decimal) => decimal.mantissa == 0,
            Literal::Boolean(true) | Literal::Integer(_) | Literal::Time(_) => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Boolean(value) => write!(f, "{value}"),
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Decimal(decimal) => write!(f, "{decimal}"),
            Literal::Time(ticks) => write!(f, "{ticks}t"),
        }
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<DecimalLiteral> for Literal {
    fn from(value: DecimalLiteral) -> Self {
        Literal::Decimal(value)
    }
}

/// An exact decimal number: `mantissa / 10^precision`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalLiteral {
    pub mantissa: i64,
    /// The amount of fractional digits
    pub precision: u8,
}

impl DecimalLiteral {
    pub fn new(mantissa: i64, precision: u8) -> Self {
        DecimalLiteral {
            mantissa,
            precision,
        }
    }

    /// `10^precision`, if it is representable
    pub(crate) fn denominator(&self) -> Option<i64> {
        10_i64.checked_pow(u32::from(self.precision))
    }

    /// Splits this number into a whole part and a fraction scaled by `10^precision`
    ///
    /// Excess digits are truncated towards zero, so both parts keep the sign of the number.
    /// Returns `None` if the whole part does not fit into a register.
    pub fn split(&self, precision: u8) -> Option<(i32, i32)> {
        let denominator = self.denominator()?;
        let whole = i32::try_from(self.mantissa / denominator).ok()?;
        let remainder = self.mantissa % denominator;

        let fraction = if precision >= self.precision {
            let factor = 10_i64.checked_pow(u32::from(precision - self.precision))?;
            remainder.checked_mul(factor)?
        } else {
            let factor = 10_i64.checked_pow(u32::from(self.precision - precision))?;
            remainder / factor
        };

        Some((whole, i32::try_from(fraction).ok()?))
    }

    /// The whole part, truncated towards zero
    pub fn truncate(&self) -> Option<i32> {
        self.split(0).map(|(whole, _)| whole)
    }
}

impl fmt::Display for DecimalLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let precision = usize::from(self.precision);
        let sign = if self.mantissa < 0 { "-" } else { "" };
        if precision == 0 {
            return write!(f, "{sign}{digits}");
        }

        let digits = format!("{digits:0>width$}", width = precision + 1);
        let (whole, fraction) = digits.split_at(digits.len() - precision);
        write!(f, "{sign}{whole}.{fraction}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError(String);

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid decimal literal: {}", self.0)
    }
}

impl std::error::Error for ParseDecimalError {}

impl FromStr for DecimalLiteral {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseDecimalError(s.to_string());
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && fraction.is_empty()
            || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(error());
        }

        let precision = u8::try_from(fraction.len()).map_err(|_| error())?;
        if precision > MAX_PRECISION * 2 {
            return Err(error());
        }
        let magnitude: i64 = format!("{whole}{fraction}").parse().map_err(|_| error())?;

        Ok(DecimalLiteral {
            mantissa: if negative { -magnitude } else { magnitude },
            precision,
        })
    }
}
