#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A DPLL SAT solver.
//!
//! Decides satisfiability of CNF formulas with chronological backtracking
//! over an explicit trail, naive-fixpoint unit propagation and MOM
//! (Maximum Occurrences in clauses of Minimum size) branching. Satisfiable
//! formulas yield a model; every decision, propagation, conflict and
//! backtrack can be streamed to a caller-supplied trace sink.
//!
//! ```
//! use dpll_sat::sat::cnf::Cnf;
//! use dpll_sat::sat::dpll::Dpll;
//! use dpll_sat::sat::solver::Solver;
//!
//! let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 3], vec![-2, -3]]);
//! let mut solver = Dpll::new(cnf.clone());
//! let result = solver.solve();
//! assert!(cnf.is_satisfied_by(result.model().unwrap()));
//! ```

/// The `sat` module implements the DPLL solver core: clause database,
/// assignment trail, propagation, branching, search and the DIMACS loader.
pub mod sat;
