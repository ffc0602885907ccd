use std::{fmt, num::ParseIntError, str::FromStr};

/// An integer range as it is used by score filters, like `1..5` or `!3`
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinecraftRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
    /// Matches every value outside of the bounds instead
    pub inverted: bool,
}

impl MinecraftRange {
    pub fn exact(value: i32) -> Self {
        MinecraftRange::between(value, value)
    }

    pub fn between(min: i32, max: i32) -> Self {
        MinecraftRange {
            min: Some(min),
            max: Some(max),
            inverted: false,
        }
    }

    pub fn at_least(min: i32) -> Self {
        MinecraftRange {
            min: Some(min),
            max: None,
            inverted: false,
        }
    }

    pub fn at_most(max: i32) -> Self {
        MinecraftRange {
            min: None,
            max: Some(max),
            inverted: false,
        }
    }

    /// A range that matches every value
    pub fn always() -> Self {
        MinecraftRange::at_least(i32::MIN)
    }

    /// A range that matches no value
    pub fn never() -> Self {
        MinecraftRange::always().not()
    }

    /// Returns the range that matches exactly the values this range does not match
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        MinecraftRange {
            inverted: !self.inverted,
            ..self
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        let in_bounds = self.min.map_or(true, |min| value >= min)
            && self.max.map_or(true, |max| value <= max);
        in_bounds != self.inverted
    }
}

impl fmt::Display for MinecraftRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("!")?;
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "{min}"),
            (Some(min), Some(max)) => write!(f, "{min}..{max}"),
            (Some(min), None) => write!(f, "{min}.."),
            (None, Some(max)) => write!(f, "..{max}"),
            (None, None) => write!(f, "{}..", i32::MIN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRangeError(pub String);

impl fmt::Display for ParseRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid range: {}", self.0)
    }
}

impl std::error::Error for ParseRangeError {}

impl FromStr for MinecraftRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |_: ParseIntError| ParseRangeError(s.to_string());
        let (inverted, body) = match s.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let bound = |text: &str| -> Result<Option<i32>, ParseRangeError> {
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(error)
            }
        };

        let range = match body.split_once("..") {
            Some((min, max)) => MinecraftRange {
                min: bound(min)?,
                max: bound(max)?,
                inverted,
            },
            None => {
                let value = body.parse().map_err(error)?;
                MinecraftRange {
                    min: Some(value),
                    max: Some(value),
                    inverted,
                }
            }
        };

        if range.min.is_none() && range.max.is_none() {
            return Err(ParseRangeError(s.to_string()));
        }
        Ok(range)
    }
}
