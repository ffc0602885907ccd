/// Any operation that can be executed between two scoreboard values
///
/// The result is always stored into the left value.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ScoreboardOperation {
    Copy,
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    /// Exchanges both values
    Swap,
    Min,
    Max,
}

impl ScoreboardOperation {
    /// The operator as it is written in a `scoreboard players operation` command
    pub fn str_value(&self) -> &'static str {
        use ScoreboardOperation::*;

        match self {
            Copy => "=",
            Plus => "+=",
            Minus => "-=",
            Times => "*=",
            Divide => "/=",
            Modulo => "%=",
            Swap => "><",
            Min => "<",
            Max => ">",
        }
    }

    /// Computes the new value of the left operand
    ///
    /// For [`ScoreboardOperation::Swap`] the right operand receives the old left value.
    pub fn evaluate(&self, lhs: i32, rhs: i32) -> i32 {
        use ScoreboardOperation::*;
        match self {
            Copy | Swap => rhs,
            Min => i32::min(lhs, rhs),
            Max => i32::max(lhs, rhs),
            Plus => lhs.wrapping_add(rhs),
            Minus => lhs.wrapping_sub(rhs),
            Times => lhs.wrapping_mul(rhs),
            Divide => {
                // Minecraft does not modify the lhs value on division by zero
                if rhs == 0 {
                    lhs
                } else {
                    // Minecraft rounds towards -infinity, while rust rounds towards 0
                    let nat_div = lhs.wrapping_div(rhs);
                    let Some(prod) = rhs.checked_mul(nat_div) else {
                        return nat_div;
                    };
                    if lhs != prod && (lhs >= 0) != (rhs >= 0) {
                        nat_div - 1
                    } else {
                        nat_div
                    }
                }
            }
            Modulo => {
                if rhs == 0 {
                    lhs
                } else {
                    // The remainder takes the sign of the divisor
                    let rem = lhs.wrapping_rem(rhs);
                    if rem != 0 && (rem < 0) != (rhs < 0) {
                        rem + rhs
                    } else {
                        rem
                    }
                }
            }
        }
    }
}

/// Any comparison that can be executed on two scoreboard values
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ScoreboardComparison {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl ScoreboardComparison {
    /// Flips the comparison (converts OP such that `a OP b == b OP.flip_sides() a`)
    pub fn flip_sides(&self) -> ScoreboardComparison {
        use ScoreboardComparison::*;
        match self {
            Equal => Equal,
            NotEqual => NotEqual,
            Greater => Less,
            GreaterOrEqual => LessOrEqual,
            Less => Greater,
            LessOrEqual => GreaterOrEqual,
        }
    }

    /// Inverts the comparison, such that it is exactly and only then true
    /// when the original comparison is false
    pub fn invert(&self) -> ScoreboardComparison {
        use ScoreboardComparison::*;
        match self {
            Equal => NotEqual,
            NotEqual => Equal,
            Greater => LessOrEqual,
            GreaterOrEqual => Less,
            Less => GreaterOrEqual,
            LessOrEqual => Greater,
        }
    }

    /// Whether this comparison only tests for (in)equality
    pub fn is_equality(&self) -> bool {
        matches!(
            self,
            ScoreboardComparison::Equal | ScoreboardComparison::NotEqual
        )
    }

    pub fn evaluate(&self, lhs: i32, rhs: i32) -> bool {
        use ScoreboardComparison::*;
        match self {
            Equal => lhs == rhs,
            NotEqual => lhs != rhs,
            Greater => lhs > rhs,
            GreaterOrEqual => lhs >= rhs,
            Less => lhs < rhs,
            LessOrEqual => lhs <= rhs,
        }
    }

    pub fn str_value(&self) -> &'static str {
        match self {
            ScoreboardComparison::Equal => "==",
            ScoreboardComparison::NotEqual => "!=",
            ScoreboardComparison::Greater => ">",
            ScoreboardComparison::GreaterOrEqual => ">=",
            ScoreboardComparison::Less => "<",
            ScoreboardComparison::LessOrEqual => "<=",
        }
    }
}
