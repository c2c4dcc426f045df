//! The clause database: an immutable-after-load CNF formula.

use crate::sat::assignment::Model;
use crate::sat::clause::Clause;
use core::fmt;
use core::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    pub num_vars: usize,
}

impl Cnf {
    /// Builds the database from raw DIMACS-style clauses, assigning 1-based
    /// ids in load order. `num_vars` grows to cover the largest variable
    /// actually referenced. Empty inner vectors are kept: an empty clause is
    /// part of the formula and makes it trivially unsatisfiable.
    #[must_use]
    pub fn new(raw: Vec<Vec<i32>>) -> Self {
        let clauses: Vec<Clause> = raw
            .into_iter()
            .enumerate()
            .map(|(i, lits)| Clause::new(i + 1, lits))
            .collect();

        let num_vars = clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|l| l.variable() as usize)
            .max()
            .unwrap_or(0);

        Self { clauses, num_vars }
    }

    #[must_use]
    pub fn with_num_vars(raw: Vec<Vec<i32>>, num_vars: usize) -> Self {
        let mut cnf = Self::new(raw);
        cnf.num_vars = cnf.num_vars.max(num_vars);
        cnf
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Independent model check: every clause must contain at least one
    /// literal that evaluates true under `model`.
    #[must_use]
    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        self.iter()
            .all(|clause| clause.iter().any(|lit| model.literal_value(lit) == Some(true)))
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.len())?;
        for clause in self.iter() {
            for lit in clause.iter() {
                write!(f, "{lit} ")?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
