//! The aggregate solver state.
//!
//! `SolverState` owns the clause database, the per-variable assignment
//! arrays and the trail for the duration of one `solve` call. The
//! propagator, the branching heuristic and the backtracking path all
//! receive it by mutable reference and never retain it.

use crate::sat::assignment::{Assignment, Model};
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::trail::Trail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverState {
    pub cnf: Cnf,
    pub assignment: Assignment,
    pub trail: Trail,
}

impl SolverState {
    #[must_use]
    pub fn new(cnf: Cnf) -> Self {
        let num_vars = cnf.num_vars;
        Self {
            cnf,
            assignment: Assignment::new(num_vars),
            trail: Trail::new(num_vars),
        }
    }

    /// Assigns `var` and records the step on the trail. The caller must not
    /// assign a variable twice without backtracking in between.
    pub fn assign(&mut self, var: Variable, value: bool, level: usize) {
        self.assignment.set(var, value, level);
        self.trail.push(var, level);
    }

    /// Undoes every assignment made at `target_level` or above.
    pub fn backtrack_to(&mut self, target_level: usize) {
        self.trail.undo_to(&mut self.assignment, target_level);
    }

    #[must_use]
    pub fn decision_level(&self) -> usize {
        self.trail.current_level()
    }

    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.assignment.literal_value(lit)
    }

    #[must_use]
    pub fn clause_is_satisfied(&self, clause: &Clause) -> bool {
        clause
            .iter()
            .any(|lit| self.assignment.literal_value(lit) == Some(true))
    }

    #[must_use]
    pub fn unassigned_count(&self, clause: &Clause) -> usize {
        clause
            .iter()
            .filter(|lit| self.assignment.is_unassigned(lit.variable()))
            .count()
    }

    /// The single unassigned literal of a unit clause, if any.
    #[must_use]
    pub fn unit_literal(&self, clause: &Clause) -> Option<Literal> {
        let mut found = None;
        for lit in clause.iter() {
            if self.assignment.is_unassigned(lit.variable()) {
                if found.is_some() {
                    return None;
                }
                found = Some(lit);
            }
        }
        found
    }

    #[must_use]
    pub fn all_clauses_satisfied(&self) -> bool {
        self.cnf.iter().all(|clause| self.clause_is_satisfied(clause))
    }

    #[must_use]
    pub fn model(&self) -> Model {
        self.assignment.model()
    }
}
