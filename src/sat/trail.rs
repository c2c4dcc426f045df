//! The chronological assignment trail and backtracking.
//!
//! Every assignment, whether a decision or a propagated unit, appends a
//! `(variable, decision level)` step. Steps are pushed in chronological
//! order, so the trail is sorted by non-decreasing level from bottom to top
//! and backtracking is a suffix pop.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;
use core::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub variable: Variable,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail(Vec<Step>);

impl Trail {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(Vec::with_capacity(num_vars))
    }

    pub fn push(&mut self, variable: Variable, level: usize) {
        debug_assert!(
            self.0.last().is_none_or(|top| top.level <= level),
            "trail must stay sorted by decision level"
        );
        self.0.push(Step { variable, level });
    }

    /// Level of the most recent step, or 0 on an empty trail.
    #[must_use]
    pub fn current_level(&self) -> usize {
        self.0.last().map_or(0, |step| step.level)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.0.iter()
    }

    #[must_use]
    pub fn contains(&self, variable: Variable) -> bool {
        self.0.iter().any(|step| step.variable == variable)
    }

    /// Pops every step whose level is `>= target_level`, resetting those
    /// variables to unassigned. Steps below the target are untouched, which
    /// makes repeated calls with the same target a no-op.
    pub fn undo_to(&mut self, assignment: &mut Assignment, target_level: usize) {
        while let Some(top) = self.0.last() {
            if top.level < target_level {
                break;
            }
            let step = self.0.pop().expect("last() was Some");
            assignment.unassign(step.variable);
        }
    }
}

impl Index<usize> for Trail {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
