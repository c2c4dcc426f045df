//! The solver-facing contract: verdict, model and run statistics.

use crate::sat::assignment::Model;
use crate::sat::cnf::Cnf;
use core::fmt;

/// Final verdict of one `solve` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Sat(Model),
    Unsat,
}

impl SolveResult {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    #[must_use]
    pub const fn model(&self) -> Option<&Model> {
        match self {
            Self::Sat(model) => Some(model),
            Self::Unsat => None,
        }
    }
}

/// Counters accumulated over one `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub backtracks: u64,
    pub max_decision_level: usize,
}

impl fmt::Display for SolutionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "decisions:          {}", self.decisions)?;
        writeln!(f, "propagations:       {}", self.propagations)?;
        writeln!(f, "conflicts:          {}", self.conflicts)?;
        writeln!(f, "backtracks:         {}", self.backtracks)?;
        write!(f, "max decision level: {}", self.max_decision_level)
    }
}

pub trait Solver {
    fn new(cnf: Cnf) -> Self;
    fn solve(&mut self) -> SolveResult;
    fn stats(&self) -> SolutionStats;
}
