//! Execution-trace events and sinks.
//!
//! The search engine reports every decision, unit propagation, conflict and
//! backtrack to a caller-supplied sink. The core has no opinion on how the
//! events are persisted; the sinks here cover the common cases: discard,
//! collect in memory, or write the text trace format.

use crate::sat::clause::ClauseId;
use crate::sat::literal::Literal;
use core::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// A free choice made by the search engine.
    Decide { literal: Literal, level: usize },
    /// A forced assignment from a unit clause.
    Unit { literal: Literal, level: usize, clause: ClauseId },
    /// A clause with every literal false.
    Conflict { clause: ClauseId, level: usize },
    /// Undo of every assignment at `from` and above.
    Backtrack { from: usize, to: usize },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decide { literal, level } => {
                write!(f, "[DL{level}] DECIDE L={literal}")
            }
            Self::Unit { literal, level, clause } => {
                write!(f, "[DL{level}] UNIT L={literal} C{clause}")
            }
            Self::Conflict { clause, level } => {
                write!(f, "[DL{level}] CONFLICT C{clause}")
            }
            Self::Backtrack { from, to } => {
                write!(f, "[DL{from}] BACKTRACK -> DL{to}")
            }
        }
    }
}

pub trait TraceSink {
    fn event(&mut self, event: TraceEvent);
}

impl<T: TraceSink + ?Sized> TraceSink for Box<T> {
    fn event(&mut self, event: TraceEvent) {
        (**self).event(event);
    }
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn event(&mut self, event: TraceEvent) {
        (**self).event(event);
    }
}

/// Discards every event. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn event(&mut self, _event: TraceEvent) {}
}

/// Collects events in memory. Used by tests to assert on search behavior.
#[derive(Debug, Clone, Default)]
pub struct VecTrace(pub Vec<TraceEvent>);

impl TraceSink for VecTrace {
    fn event(&mut self, event: TraceEvent) {
        self.0.push(event);
    }
}

/// Writes one text line per event, in the master-trace format.
#[derive(Debug)]
pub struct WriterTrace<W: Write>(W);

impl<W: Write> WriterTrace<W> {
    pub fn new(writer: W) -> Self {
        Self(writer)
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn event(&mut self, event: TraceEvent) {
        // A broken trace writer must not abort the search.
        let _ = writeln!(self.0, "{event}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_formatting() {
        let decide = TraceEvent::Decide { literal: Literal::from(-3), level: 1 };
        assert_eq!(decide.to_string(), "[DL1] DECIDE L=-3");

        let unit = TraceEvent::Unit { literal: Literal::from(2), level: 1, clause: 4 };
        assert_eq!(unit.to_string(), "[DL1] UNIT L=2 C4");

        let conflict = TraceEvent::Conflict { clause: 4, level: 2 };
        assert_eq!(conflict.to_string(), "[DL2] CONFLICT C4");

        let backtrack = TraceEvent::Backtrack { from: 2, to: 1 };
        assert_eq!(backtrack.to_string(), "[DL2] BACKTRACK -> DL1");
    }

    #[test]
    fn test_writer_trace() {
        let mut buf = Vec::new();
        {
            let mut sink = WriterTrace::new(&mut buf);
            sink.event(TraceEvent::Decide { literal: Literal::from(1), level: 1 });
            sink.event(TraceEvent::Backtrack { from: 1, to: 0 });
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "[DL1] DECIDE L=1\n[DL1] BACKTRACK -> DL0\n");
    }
}
