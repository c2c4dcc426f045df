//! DIMACS CNF loader.
//!
//! The loader is the boundary collaborator that turns DIMACS text into a
//! validated [`Cnf`]; the core never re-parses text. Accepted input:
//!
//! - comment lines starting with `c`;
//! - one problem line `p cnf <num_vars> <num_clauses>`;
//! - clauses as whitespace-separated signed integers terminated by `0`,
//!   free to span lines;
//! - an optional `%` end-of-data marker.
//!
//! A lone `0` is an empty clause and is kept: it makes the formula
//! trivially unsatisfiable, which propagation reports as a conflict on its
//! first pass. Malformed input is a typed error, never a panic, so the
//! caller sees it before any solving starts.

use crate::sat::cnf::Cnf;
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("missing 'p cnf' problem line")]
    MissingHeader,

    #[error("malformed problem line: {0:?}")]
    BadHeader(String),

    #[error("expected a literal, found {0:?}")]
    BadLiteral(String),

    #[error("last clause is missing its terminating 0")]
    UnterminatedClause,
}

/// Parses DIMACS text from any buffered reader.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut num_vars: Option<usize> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    'lines: for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        if trimmed.starts_with('%') {
            break;
        }

        if trimmed.starts_with('p') {
            let fields = trimmed.split_whitespace().collect_vec();
            let parsed = match fields.as_slice() {
                ["p", "cnf", vars, _clauses] => vars.parse::<usize>().ok(),
                _ => None,
            };
            num_vars = Some(parsed.ok_or_else(|| DimacsError::BadHeader(trimmed.to_string()))?);
            continue;
        }

        if num_vars.is_none() {
            return Err(DimacsError::MissingHeader);
        }

        for token in trimmed.split_whitespace() {
            if token == "%" {
                break 'lines;
            }
            let value: i32 = token
                .parse()
                .map_err(|_| DimacsError::BadLiteral(token.to_string()))?;
            if value == 0 {
                clauses.push(std::mem::take(&mut current));
            } else {
                current.push(value);
            }
        }
    }

    if !current.is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }

    let num_vars = num_vars.ok_or(DimacsError::MissingHeader)?;
    Ok(Cnf::with_num_vars(clauses, num_vars))
}

/// Parses a DIMACS CNF file from disk.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Cnf, DimacsError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Parses CNF clauses given as plain text without a problem line, one or
/// more `0`-terminated clauses. Used by the CLI `text` subcommand.
pub fn parse_text(input: &str) -> Result<Cnf, DimacsError> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for token in input.split_whitespace() {
        let value: i32 = token
            .parse()
            .map_err(|_| DimacsError::BadLiteral(token.to_string()))?;
        if value == 0 {
            clauses.push(std::mem::take(&mut current));
        } else {
            current.push(value);
        }
    }

    // A trailing clause without its 0 is accepted here: text input is
    // interactive and the terminator is easy to forget.
    if !current.is_empty() {
        clauses.push(current);
    }

    Ok(Cnf::new(clauses))
}
