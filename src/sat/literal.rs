//! Signed-integer literal representation.
//!
//! A literal is a variable together with a polarity. The DIMACS convention
//! is used throughout: magnitude is the (1-indexed) variable id, sign is the
//! polarity, so `-3` asserts that variable 3 is false.

use core::fmt;
use core::ops::{Neg, Not};

/// A 1-indexed variable id.
pub type Variable = u32;

/// A signed literal. The inner value is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        let var = i32::try_from(var).expect("variable id overflowed i32");
        debug_assert!(var > 0, "variable ids are 1-indexed");

        if polarity { Self(var) } else { Self(-var) }
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        debug_assert!(value != 0, "0 is the DIMACS clause terminator, not a literal");
        Self(value)
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
