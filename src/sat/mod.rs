//! The solver core and its boundary collaborators.

pub mod assignment;
pub mod branching;
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod dpll;
pub mod literal;
pub mod propagation;
pub mod solver;
pub mod state;
pub mod trace;
pub mod trail;
