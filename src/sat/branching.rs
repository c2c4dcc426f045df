//! Branching heuristics.
//!
//! When propagation reaches a fixpoint without deciding the formula, the
//! heuristic picks the next decision literal. `Mom` is the default:
//! Maximum Occurrences in clauses of Minimum size, with a fixed
//! deterministic tie-break. `FirstUnassigned` is the naive baseline.

use crate::sat::literal::{Literal, Variable};
use crate::sat::state::SolverState;
use rustc_hash::FxHashMap;

pub trait Branching {
    /// The next decision literal, or `None` when every clause is already
    /// satisfied (remaining variables are don't-cares).
    fn pick(&self, state: &SolverState) -> Option<Literal>;
}

impl<B: Branching + ?Sized> Branching for Box<B> {
    fn pick(&self, state: &SolverState) -> Option<Literal> {
        (**self).pick(state)
    }
}

/// Maximum Occurrences in clauses of Minimum size.
///
/// Among unsatisfied clauses with the fewest unassigned literals, the
/// literal occurring most often wins. Positive and negative occurrences of
/// a variable count separately. Ties break by smallest variable id, then by
/// the polarity with the higher individual count, positive on a dead tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mom;

impl Branching for Mom {
    fn pick(&self, state: &SolverState) -> Option<Literal> {
        let unsatisfied: Vec<_> = state
            .cnf
            .iter()
            .filter(|c| !state.clause_is_satisfied(c))
            .collect();

        if unsatisfied.is_empty() {
            return None;
        }

        let min_size = unsatisfied
            .iter()
            .map(|c| state.unassigned_count(c))
            .min()
            .expect("unsatisfied is non-empty");

        // An unsatisfied clause with zero unassigned literals is a conflict
        // BCP must have reported before branching.
        assert!(min_size > 0, "branching on a conflicting clause");

        let mut counts: FxHashMap<Literal, u32> = FxHashMap::default();
        for clause in unsatisfied
            .iter()
            .filter(|c| state.unassigned_count(c) == min_size)
        {
            for lit in clause.iter() {
                if state.assignment.is_unassigned(lit.variable()) {
                    *counts.entry(lit).or_insert(0) += 1;
                }
            }
        }

        let max_count = counts.values().copied().max()?;
        let variable: Variable = counts
            .iter()
            .filter(|&(_, &n)| n == max_count)
            .map(|(lit, _)| lit.variable())
            .min()
            .expect("some literal has the maximum count");

        let positive = counts.get(&Literal::new(variable, true)).copied().unwrap_or(0);
        let negative = counts.get(&Literal::new(variable, false)).copied().unwrap_or(0);

        Some(Literal::new(variable, positive >= negative))
    }
}

/// Smallest unassigned variable, positive polarity. No occurrence counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUnassigned;

impl Branching for FirstUnassigned {
    fn pick(&self, state: &SolverState) -> Option<Literal> {
        if state.all_clauses_satisfied() {
            return None;
        }

        (1..=state.cnf.num_vars as Variable)
            .find(|&v| state.assignment.is_unassigned(v))
            .map(|v| Literal::new(v, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cnf::Cnf;

    fn state(clauses: Vec<Vec<i32>>) -> SolverState {
        SolverState::new(Cnf::new(clauses))
    }

    #[test]
    fn test_mom_prefers_frequent_literal_in_min_clauses() {
        // All clauses are binary; literal 2 occurs twice, everything else
        // at most once (except -3, which loses the variable-id tie-break).
        let s = state(vec![
            vec![1, 2],
            vec![-1, 3],
            vec![-2, -3],
            vec![2, 4],
            vec![-4, 5],
            vec![-3, -5],
        ]);
        assert_eq!(Mom.pick(&s), Some(Literal::from(2)));
    }

    #[test]
    fn test_mom_restricts_to_minimum_size_clauses() {
        // The ternary clauses mention variable 1 heavily, but only the
        // binary clause counts: its literals are -3 and -4.
        let mut s = state(vec![vec![-1, -2, 3], vec![-1, 2, 4], vec![-3, -4]]);
        assert_eq!(Mom.pick(&s), Some(Literal::from(-3)));

        s.assign(3, false, 1);
        // C3 is now satisfied; C1 has two unassigned literals left.
        assert_eq!(Mom.pick(&s), Some(Literal::from(-1)));
    }

    #[test]
    fn test_mom_polarity_tie_break_is_positive() {
        let s = state(vec![vec![1, 2], vec![-1, 2]]);
        // 1 and -1 each occur once, 2 occurs twice: 2 wins outright.
        assert_eq!(Mom.pick(&s), Some(Literal::from(2)));

        let s = state(vec![vec![1, 3], vec![-1, 4]]);
        // 1, -1, 3, 4 all occur once; smallest variable is 1, polarities
        // tie, positive preferred.
        assert_eq!(Mom.pick(&s), Some(Literal::from(1)));
    }

    #[test]
    fn test_mom_negative_polarity_wins_on_higher_count() {
        let s = state(vec![vec![-1, 2], vec![-1, 3], vec![1, 4]]);
        assert_eq!(Mom.pick(&s), Some(Literal::from(-1)));
    }

    #[test]
    fn test_mom_none_when_all_satisfied() {
        let mut s = state(vec![vec![1, 2]]);
        s.assign(1, true, 1);
        assert_eq!(Mom.pick(&s), None);
    }

    #[test]
    fn test_mom_is_deterministic() {
        let s = state(vec![
            vec![1, -2, 3],
            vec![-1, 2],
            vec![2, -3],
            vec![-2, 3],
            vec![1, -3],
        ]);
        let first = Mom.pick(&s);
        for _ in 0..50 {
            assert_eq!(Mom.pick(&s), first);
        }
    }

    #[test]
    fn test_first_unassigned() {
        let mut s = state(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(FirstUnassigned.pick(&s), Some(Literal::from(1)));

        s.assign(1, true, 1);
        assert_eq!(FirstUnassigned.pick(&s), Some(Literal::from(3)));

        s.assign(3, true, 2);
        assert_eq!(FirstUnassigned.pick(&s), None);
    }
}
