//! Clause representation.
//!
//! A clause is a disjunction of literals with a stable id assigned at load
//! time. Ids are 1-based and follow load order; they exist so conflicts can
//! be reported against a concrete clause. Literals are never mutated after
//! construction - only the assignment of the variables they mention changes.

use crate::sat::literal::Literal;
use core::fmt;
use core::ops::Index;
use smallvec::SmallVec;

/// Stable, 1-based clause id.
pub type ClauseId = usize;

/// Inline storage for the common short-clause case.
pub type LiteralVec = SmallVec<[Literal; 8]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub id: ClauseId,
    literals: LiteralVec,
}

impl Clause {
    #[must_use]
    pub fn new(id: ClauseId, literals: impl IntoIterator<Item = i32>) -> Self {
        Self {
            id,
            literals: literals.into_iter().map(Literal::from).collect(),
        }
    }

    #[must_use]
    pub fn from_literals(id: ClauseId, literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            id,
            literals: literals.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty clause is unsatisfiable by definition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{} | [", self.id)?;
        for (i, lit) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, "]")
    }
}
