//! Per-variable assignment state and the final model.
//!
//! `Assignment` keeps two parallel arrays indexed by variable id: the truth
//! value and the decision level the variable was assigned at. Index 0 is
//! unused so variable ids can be used directly. The invariant maintained
//! here and checked by the trail tests: `level == 0` exactly when the
//! variable is unassigned.

use crate::sat::literal::{Literal, Variable};
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<VarState>,
    levels: Vec<usize>,
}

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            values: vec![VarState::Unassigned; num_vars + 1],
            levels: vec![0; num_vars + 1],
        }
    }

    pub fn set(&mut self, var: Variable, value: bool, level: usize) {
        let i = var as usize;
        debug_assert!(self.values[i].is_unassigned(), "variable {var} already assigned");
        self.values[i] = VarState::Assigned(value);
        self.levels[i] = level;
    }

    pub fn unassign(&mut self, var: Variable) {
        let i = var as usize;
        self.values[i] = VarState::Unassigned;
        self.levels[i] = 0;
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self.values[var as usize] {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }

    /// Evaluates a literal: `Some(true)` if the assigned polarity matches
    /// the literal's sign, `Some(false)` if it opposes, `None` if the
    /// variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| if lit.polarity() { b } else { !b })
    }

    #[must_use]
    pub fn level(&self, var: Variable) -> usize {
        self.levels[var as usize]
    }

    #[must_use]
    pub fn is_unassigned(&self, var: Variable) -> bool {
        self.values[var as usize].is_unassigned()
    }

    /// Number of variables tracked (index 0 excluded).
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.values.len() - 1
    }

    #[must_use]
    pub fn model(&self) -> Model {
        Model(
            self.values[1..]
                .iter()
                .map(|s| match s {
                    VarState::Assigned(b) => Some(*b),
                    VarState::Unassigned => None,
                })
                .collect(),
        )
    }
}

/// A satisfying assignment. Variables the search never had to assign
/// (don't-cares) stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model(Vec<Option<bool>>);

impl Model {
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.0.get(var as usize - 1).copied().flatten()
    }

    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.variable())
            .map(|b| if lit.polarity() { b } else { !b })
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len()
    }

    /// `(variable, value)` pairs for every assigned variable.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|b| (i as Variable + 1, b)))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            let status = match value {
                Some(true) => "TRUE",
                Some(false) => "FALSE",
                None => "UNASSIGNED",
            };
            writeln!(f, "{} | {}", i + 1, status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_unassign() {
        let mut a = Assignment::new(3);
        assert!(a.is_unassigned(2));

        a.set(2, true, 1);
        assert_eq!(a.var_value(2), Some(true));
        assert_eq!(a.level(2), 1);

        a.unassign(2);
        assert!(a.is_unassigned(2));
        assert_eq!(a.level(2), 0);
    }

    #[test]
    fn test_literal_value() {
        let mut a = Assignment::new(2);
        a.set(1, false, 1);

        assert_eq!(a.literal_value(Literal::from(1)), Some(false));
        assert_eq!(a.literal_value(Literal::from(-1)), Some(true));
        assert_eq!(a.literal_value(Literal::from(2)), None);
    }

    #[test]
    fn test_model_skips_unassigned() {
        let mut a = Assignment::new(3);
        a.set(1, true, 1);
        a.set(3, false, 2);

        let model = a.model();
        assert_eq!(model.value(1), Some(true));
        assert_eq!(model.value(2), None);
        assert_eq!(model.value(3), Some(false));
        assert_eq!(model.iter().collect::<Vec<_>>(), vec![(1, true), (3, false)]);
    }

    #[test]
    fn test_model_display() {
        let mut a = Assignment::new(2);
        a.set(2, false, 1);
        assert_eq!(a.model().to_string(), "1 | UNASSIGNED\n2 | FALSE\n");
    }
}
