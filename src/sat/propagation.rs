//! Boolean Constraint Propagation.
//!
//! After a decision (or at level 0, before any), the propagator deduces
//! every forced assignment by repeatedly scanning the clause database until
//! a full pass makes no new assignment, and reports one of three outcomes.
//!
//! The scan is the naive fixpoint loop: each not-yet-satisfied clause is
//! classified as satisfied, conflicting, unit or undetermined. A unit
//! clause forces its one unassigned literal true at the current decision
//! level. Watched-literal indexing would avoid the re-scan but does not
//! change the outcomes.

use crate::sat::clause::ClauseId;
use crate::sat::state::SolverState;
use crate::sat::trace::{TraceEvent, TraceSink};

/// Outcome of a propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcpOutcome {
    /// Every clause has at least one true literal.
    Sat,
    /// The identified clause has every literal false.
    Conflict(ClauseId),
    /// Fixpoint reached: no conflict, but at least one clause is still
    /// undetermined.
    Continue,
}

#[derive(Debug, Clone, Default)]
pub struct Propagator {
    /// Unit assignments made across all runs.
    pub propagations: u64,
}

impl Propagator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Propagates to a fixpoint at `level`, recording unit and conflict
    /// events on `trace`.
    pub fn propagate<T: TraceSink>(
        &mut self,
        state: &mut SolverState,
        level: usize,
        trace: &mut T,
    ) -> BcpOutcome {
        loop {
            let mut progress = false;

            for idx in 0..state.cnf.len() {
                let clause = &state.cnf[idx];
                if state.clause_is_satisfied(clause) {
                    continue;
                }

                match state.unassigned_count(clause) {
                    0 => {
                        let id = clause.id;
                        trace.event(TraceEvent::Conflict { clause: id, level });
                        return BcpOutcome::Conflict(id);
                    }
                    1 => {
                        let lit = state
                            .unit_literal(clause)
                            .expect("clause with one unassigned literal is unit");
                        let id = clause.id;
                        state.assign(lit.variable(), lit.polarity(), level);
                        trace.event(TraceEvent::Unit { literal: lit, level, clause: id });
                        self.propagations += 1;
                        progress = true;
                    }
                    _ => {}
                }
            }

            if !progress {
                break;
            }
        }

        if state.all_clauses_satisfied() {
            BcpOutcome::Sat
        } else {
            BcpOutcome::Continue
        }
    }
}
