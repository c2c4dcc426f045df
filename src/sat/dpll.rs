//! The DPLL search engine.
//!
//! Composes propagation, branching and backtracking into the complete
//! decision procedure. The search is the classic recursive DPLL scheme,
//! but decision levels live on an explicit growable stack of frames rather
//! than the call stack, so recursion depth never tracks variable count.
//! Each frame records the literal decided at that level and whether the
//! opposite polarity has already been tried.
//!
//! One search step:
//! 1. propagate at the current level;
//! 2. on `Sat`, return the model;
//! 3. on `Conflict`, flip the most recent untried frame (undoing every
//!    assignment at or above its level first) and propagate again; if every
//!    frame is exhausted, the formula is unsatisfiable;
//! 4. on `Continue`, ask the heuristic for the next decision literal and
//!    open a new frame.

use crate::sat::branching::{Branching, Mom};
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::propagation::{BcpOutcome, Propagator};
use crate::sat::solver::{SolutionStats, SolveResult, Solver};
use crate::sat::state::SolverState;
use crate::sat::trace::{NoTrace, TraceEvent, TraceSink};

/// One decision level on the explicit search stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    literal: Literal,
    /// Set once the opposite polarity has been taken. A conflict under a
    /// flipped frame fails the whole level.
    flipped: bool,
}

#[derive(Debug, Clone)]
pub struct Dpll<B: Branching = Mom, T: TraceSink = NoTrace> {
    pub state: SolverState,
    selector: B,
    trace: T,
    propagator: Propagator,
    stats: SolutionStats,
}

impl Solver for Dpll {
    fn new(cnf: Cnf) -> Self {
        Self::with_parts(cnf, Mom, NoTrace)
    }

    fn solve(&mut self) -> SolveResult {
        self.run()
    }

    fn stats(&self) -> SolutionStats {
        self.stats()
    }
}

impl<B: Branching, T: TraceSink> Dpll<B, T> {
    pub fn with_parts(cnf: Cnf, selector: B, trace: T) -> Self {
        Self {
            state: SolverState::new(cnf),
            selector,
            trace,
            propagator: Propagator::new(),
            stats: SolutionStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> SolutionStats {
        let mut stats = self.stats;
        stats.propagations = self.propagator.propagations;
        stats
    }

    pub fn solve(&mut self) -> SolveResult {
        self.run()
    }

    fn run(&mut self) -> SolveResult {
        // Level 0: initial unit propagation. An empty clause or
        // contradictory units end the search before any decision.
        match self.propagator.propagate(&mut self.state, 0, &mut self.trace) {
            BcpOutcome::Sat => return SolveResult::Sat(self.state.model()),
            BcpOutcome::Conflict(_) => {
                self.stats.conflicts += 1;
                return SolveResult::Unsat;
            }
            BcpOutcome::Continue => {}
        }

        let mut frames: Vec<Frame> = Vec::new();

        loop {
            let Some(literal) = self.selector.pick(&self.state) else {
                // The heuristic found no unsatisfied clause. Propagation
                // reporting Continue here would be a contract violation
                // between the two, not a property of the input.
                debug_assert!(self.state.all_clauses_satisfied());
                return SolveResult::Sat(self.state.model());
            };

            self.decide(literal, &mut frames, false);

            'propagate: loop {
                let level = frames.len();
                match self.propagator.propagate(&mut self.state, level, &mut self.trace) {
                    BcpOutcome::Sat => return SolveResult::Sat(self.state.model()),
                    BcpOutcome::Continue => break 'propagate,
                    BcpOutcome::Conflict(_) => {
                        self.stats.conflicts += 1;
                        if !self.resolve_conflict(&mut frames) {
                            return SolveResult::Unsat;
                        }
                        // A flipped decision was pushed; propagate it.
                    }
                }
            }
        }
    }

    /// Unwinds to the most recent frame whose opposite polarity is untried,
    /// flips it and re-decides. Returns `false` when every frame is
    /// exhausted, which is the UNSAT verdict at level 0.
    fn resolve_conflict(&mut self, frames: &mut Vec<Frame>) -> bool {
        loop {
            let Some(frame) = frames.pop() else {
                return false;
            };
            let level = frames.len() + 1;

            self.state.backtrack_to(level);
            self.stats.backtracks += 1;
            self.trace.event(TraceEvent::Backtrack { from: level, to: level - 1 });

            if !frame.flipped {
                self.decide(frame.literal.negated(), frames, true);
                return true;
            }
        }
    }

    fn decide(&mut self, literal: Literal, frames: &mut Vec<Frame>, flipped: bool) {
        let level = frames.len() + 1;
        self.state.assign(literal.variable(), literal.polarity(), level);
        self.trace.event(TraceEvent::Decide { literal, level });
        self.stats.decisions += 1;
        self.stats.max_decision_level = self.stats.max_decision_level.max(level);
        frames.push(Frame { literal, flipped });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::trace::VecTrace;
    use itertools::Itertools;

    fn solve(clauses: Vec<Vec<i32>>) -> (SolveResult, Dpll) {
        let mut solver = Dpll::new(Cnf::new(clauses));
        let result = solver.solve();
        (result, solver)
    }

    /// Exhaustive check over all total assignments.
    fn brute_force_sat(cnf: &Cnf) -> bool {
        let n = cnf.num_vars;
        (0..1u32 << n).any(|bits| {
            cnf.iter().all(|clause| {
                clause.iter().any(|lit| {
                    let value = (bits >> (lit.variable() - 1)) & 1 == 1;
                    value == lit.polarity()
                })
            })
        })
    }

    #[test]
    fn test_single_binary_clause() {
        let cnf = Cnf::with_num_vars(vec![vec![1, 2]], 2);
        let mut solver: Dpll = Dpll::new(cnf.clone());
        let result = solver.solve();

        let model = result.model().expect("satisfiable");
        assert!(cnf.is_satisfied_by(model));
        assert!(model.value(1) == Some(true) || model.value(2) == Some(true));
    }

    #[test]
    fn test_mom_guided_search() {
        let clauses = vec![
            vec![1, 2],
            vec![-1, 3],
            vec![-2, -3],
            vec![2, 4],
            vec![-4, 5],
            vec![-3, -5],
        ];
        let cnf = Cnf::with_num_vars(clauses, 5);
        let mut trace = VecTrace::default();
        let mut solver = Dpll::with_parts(cnf.clone(), Mom, &mut trace);
        let result = solver.solve();
        let stats = solver.stats();

        assert!(cnf.is_satisfied_by(result.model().expect("satisfiable")));
        assert!(stats.max_decision_level <= 4);
        // MOM's first pick is literal 2, the only one in two minimum-size
        // clauses.
        assert_eq!(
            trace.0[0],
            TraceEvent::Decide { literal: Literal::from(2), level: 1 }
        );
    }

    #[test]
    fn test_exact_model_from_mom_trace() {
        let clauses = vec![vec![-1, -2, 3], vec![-1, 2, 4], vec![-3, -4]];
        let cnf = Cnf::with_num_vars(clauses, 4);
        let mut trace = VecTrace::default();
        let mut solver = Dpll::with_parts(cnf.clone(), Mom, &mut trace);
        let result = solver.solve();

        let model = result.model().expect("satisfiable");
        assert!(cnf.is_satisfied_by(model));
        // Decide -3, then -1; no conflicts on the way.
        assert_eq!(model.value(3), Some(false));
        assert_eq!(model.value(1), Some(false));
        assert_eq!(
            trace.0.iter().filter(|e| matches!(e, TraceEvent::Decide { .. })).count(),
            2
        );
        assert_eq!(
            trace.0[0],
            TraceEvent::Decide { literal: Literal::from(-3), level: 1 }
        );
    }

    #[test]
    fn test_empty_clause_is_unsat_without_decisions() {
        let (result, solver) = solve(vec![vec![]]);
        assert_eq!(result, SolveResult::Unsat);

        let stats = solver.stats();
        assert_eq!(stats.decisions, 0);
        assert_eq!(stats.conflicts, 1);
        assert_eq!(stats.max_decision_level, 0);
    }

    #[test]
    fn test_two_variable_unsat_exhausts_both_branches() {
        let (result, solver) = solve(vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);
        assert_eq!(result, SolveResult::Unsat);

        let stats = solver.stats();
        // Both polarities of the first decision fail.
        assert!(stats.conflicts >= 2);
        assert!(stats.backtracks >= 2);
    }

    #[test]
    fn test_dont_care_variables_stay_unassigned() {
        let cnf = Cnf::with_num_vars(vec![vec![1]], 3);
        let mut solver: Dpll = Dpll::new(cnf);
        let result = solver.solve();

        let model = result.model().expect("satisfiable");
        assert_eq!(model.value(1), Some(true));
        assert_eq!(model.value(2), None);
        assert_eq!(model.value(3), None);
    }

    #[test]
    fn test_trail_is_clean_after_unsat() {
        let (result, solver) = solve(vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);
        assert_eq!(result, SolveResult::Unsat);
        assert!(solver.state.trail.is_empty());
        for var in 1..=2 {
            assert!(solver.state.assignment.is_unassigned(var));
        }
    }

    #[test]
    fn test_verdict_matches_brute_force() {
        // Every 3-clause 3-variable formula over a fixed literal pool.
        let pool = [1i32, -1, 2, -2, 3, -3];
        for picks in (0..pool.len()).combinations(3) {
            for &a in &pool {
                let clauses = vec![
                    vec![pool[picks[0]], a],
                    vec![pool[picks[1]], -a],
                    vec![pool[picks[2]]],
                ];
                let cnf = Cnf::new(clauses);
                let expected = brute_force_sat(&cnf);

                let mut solver: Dpll = Dpll::new(cnf.clone());
                let result = solver.solve();
                assert_eq!(result.is_sat(), expected, "formula: {cnf}");

                if let Some(model) = result.model() {
                    assert!(cnf.is_satisfied_by(model), "bad model for: {cnf}");
                }
            }
        }
    }

    #[test]
    fn test_known_unsat_pigeonhole() {
        // Two pigeons, one hole: x1 and x2 both forced, but mutually
        // exclusive.
        let (result, _) = solve(vec![vec![1], vec![2], vec![-1, -2]]);
        assert_eq!(result, SolveResult::Unsat);
    }

    #[test]
    fn test_backtrack_trace_shape() {
        let clauses = vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]];
        let mut trace = VecTrace::default();
        let mut solver = Dpll::with_parts(Cnf::new(clauses), Mom, &mut trace);
        assert_eq!(solver.solve(), SolveResult::Unsat);

        // Every backtrack undoes exactly one level.
        for event in &trace.0 {
            if let TraceEvent::Backtrack { from, to } = event {
                assert_eq!(*from, to + 1);
            }
        }
        // The search ends having unwound to level 0.
        assert!(matches!(
            trace.0.last(),
            Some(TraceEvent::Backtrack { to: 0, .. })
        ));
    }
}
