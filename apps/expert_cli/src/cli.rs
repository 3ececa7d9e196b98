//! Command-line argument parsing and dispatch (§6).
//!
//! This module is the thinnest possible shell around [`crate::pipeline`]:
//! it reads a program from a file or stdin, hands it to the core, and
//! formats the result the way §6 documents. All reasoning happens in
//! `expert-proof`; nothing here touches a fact or a rule directly except
//! through the public graph API for the interactive REPL extension.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use expert_proof::WorldAssumption;

use crate::error::CliError;
use crate::interactive::run_interactive;
use crate::pipeline::{format_query_explanation, solve_program};

/// A backward-chaining propositional expert system.
#[derive(Parser)]
#[command(name = "expert-cli")]
#[command(about = "A backward-chaining propositional expert system", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Program source file to read (reads stdin if omitted)
    pub file: Option<PathBuf>,

    /// Also print the explanation trace: each query's compiled logical
    /// equivalence, its satisfying-assignment table, and the solver's
    /// OPERATIONS log
    #[arg(short, long)]
    pub explain: bool,

    /// Suppress the conclusion and print the inference graph as
    /// Graphviz DOT instead
    #[arg(short, long)]
    pub dot: bool,

    /// After answering the program's own queries, read further
    /// `?`-prefixed query lines from stdin until EOF or `:quit`
    #[arg(short, long)]
    pub interactive: bool,

    /// Use the Open World Assumption (default: Closed World Assumption)
    #[arg(long = "open-world-assumption", visible_alias = "owa")]
    pub open_world_assumption: bool,

    /// Launch the HTTP front-end instead of reading a program
    #[arg(short, long)]
    pub server: bool,

    /// Port to listen on when run with --server
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

/// Entry point for the CLI. Returns an error for anything that aborts
/// before a conclusion can be printed at all (missing input, a parse
/// error, or a graph-construction error); per-query errors are already
/// folded into the conclusion text by `solve_everything` and instead
/// drive the process exit code directly, matching §7's propagation
/// policy.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.server {
        return crate::server::run(cli.port);
    }

    let world = if cli.open_world_assumption {
        WorldAssumption::Open
    } else {
        WorldAssumption::Closed
    };

    let source = read_input(cli.file.as_deref())?;
    let mut solved = solve_program(&source, world, cli.explain)?;

    if cli.dot {
        print!("{}", solved.graph.to_dot());
    } else {
        print!("{}", solved.result);
        if cli.explain {
            for query in &solved.queries {
                print!("{}", format_query_explanation(&solved.graph, query.id));
            }
            println!("OPERATIONS");
            print!("{}", solved.result.explanation);
        }
    }

    if cli.interactive {
        run_interactive(&mut solved.graph, cli.explain)?;
    }

    if solved.result.has_error {
        process::exit(1);
    }

    Ok(())
}

fn read_input(file: Option<&std::path::Path>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Prints a usage summary; kept distinct from clap's generated `--help`
/// text so embedders (the server's `GET /` page) can reuse the same
/// wording without constructing a `Cli`.
pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "expert-cli — a backward-chaining propositional expert system")?;
    writeln!(out)?;
    writeln!(out, "USAGE: expert-cli [FLAGS] [FILE]")?;
    writeln!(out)?;
    writeln!(out, "  -h, --help                     print this message")?;
    writeln!(out, "  -e, --explain                   print the explanation trace")?;
    writeln!(out, "  -d, --dot                       print the inference graph as DOT")?;
    writeln!(out, "  -i, --interactive                enter a REPL after solving")?;
    writeln!(out, "      --open-world-assumption      use the Open World Assumption")?;
    writeln!(out, "  -s, --server                     launch the HTTP front-end")?;
    writeln!(out, "      --port <N>                   port for --server (default 8080)")?;
    Ok(())
}
