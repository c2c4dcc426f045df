//! Command-line front end for the DPLL solver.
//!
//! ```sh
//! dpllsat <path.cnf>                 # solve a DIMACS file
//! dpllsat file --path <path.cnf>
//! dpllsat text --input "1 -2 0 2 3 0"
//! dpllsat dir --path <directory>     # solve every .cnf underneath
//! ```
//!
//! Common options: `--verify` (check the model against the formula),
//! `--stats`, `--print-solution`, `--trace <path>` (write the execution
//! trace), `--branching <mom|first>`.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dpll_sat::sat::branching::{Branching, FirstUnassigned, Mom};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dimacs::{parse_file, parse_text};
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::solver::SolveResult;
use dpll_sat::sat::trace::{NoTrace, TraceSink, WriterTrace};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use walkdir::WalkDir;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "dpllsat", version, about = "A DPLL SAT solver with MOM branching")]
struct Cli {
    /// Path to a DIMACS .cnf file, when no subcommand is given.
    path: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    common: CommonOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        #[arg(short, long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve CNF clauses given as plain text, e.g. "1 -2 0 2 3 0".
    Text {
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file under a directory.
    Dir {
        #[arg(short, long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Check the model against the formula after solving.
    #[arg(long, default_value_t = true)]
    verify: bool,

    /// Print solving statistics.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Print the satisfying assignment.
    #[arg(long, default_value_t = false)]
    print_solution: bool,

    /// Write the execution trace (decisions, units, conflicts, backtracks)
    /// to this file.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Branching heuristic: "mom" or "first".
    #[arg(long, default_value_t = String::from("mom"))]
    branching: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::File { path, common }) => solve_path(&path, &common),
        Some(Commands::Text { input, common }) => {
            let start = Instant::now();
            let cnf = parse_text(&input).context("failed to parse CNF text")?;
            solve_and_report(cnf, &common, "<text>", start.elapsed())
        }
        Some(Commands::Dir { path, common }) => {
            let mut solved = 0usize;
            for entry in WalkDir::new(&path) {
                let entry = entry?;
                let is_cnf = entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|e| e == "cnf");
                if is_cnf {
                    solve_path(entry.path(), &common)?;
                    solved += 1;
                }
            }
            if solved == 0 {
                bail!("no .cnf files found under {}", path.display());
            }
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_path(&path, &cli.common),
            None => bail!("no input given; see --help"),
        },
    }
}

fn solve_path(path: &std::path::Path, common: &CommonOptions) -> Result<()> {
    let start = Instant::now();
    let cnf =
        parse_file(path).with_context(|| format!("failed to parse {}", path.display()))?;
    solve_and_report(cnf, common, &path.display().to_string(), start.elapsed())
}

fn selector(name: &str) -> Result<Box<dyn Branching>> {
    match name {
        "mom" => Ok(Box::new(Mom)),
        "first" => Ok(Box::new(FirstUnassigned)),
        other => bail!("unknown branching heuristic {other:?} (expected mom or first)"),
    }
}

fn trace_sink(path: Option<&PathBuf>) -> Result<Box<dyn TraceSink>> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create trace file {}", path.display()))?;
            Ok(Box::new(WriterTrace::new(BufWriter::new(file))))
        }
        None => Ok(Box::new(NoTrace)),
    }
}

fn solve_and_report(
    cnf: Cnf,
    common: &CommonOptions,
    label: &str,
    parse_time: std::time::Duration,
) -> Result<()> {
    println!(
        "c {label}: {} variables, {} clauses",
        cnf.num_vars,
        cnf.len()
    );

    let mut solver = Dpll::with_parts(
        cnf.clone(),
        selector(&common.branching)?,
        trace_sink(common.trace.as_ref())?,
    );

    let start = Instant::now();
    let result = solver.solve();
    let solve_time = start.elapsed();

    match &result {
        SolveResult::Sat(model) => {
            println!("s SATISFIABLE");

            if common.verify {
                if !cnf.is_satisfied_by(model) {
                    bail!("model failed verification for {label}");
                }
                println!("c model verified");
            }

            if common.print_solution {
                let values: Vec<String> = model
                    .iter()
                    .map(|(var, value)| {
                        if value { var.to_string() } else { format!("-{var}") }
                    })
                    .collect();
                println!("v {} 0", values.join(" "));
            }
        }
        SolveResult::Unsat => println!("s UNSATISFIABLE"),
    }

    if common.stats {
        println!("c parse time: {parse_time:?}");
        println!("c solve time: {solve_time:?}");
        for line in solver.stats().to_string().lines() {
            println!("c {line}");
        }
    }

    Ok(())
}
