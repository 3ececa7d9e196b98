//! The `-i/--interactive` REPL extension.
//!
//! After the program's own queries are answered, the graph stays alive
//! and additional `?`-prefixed query lines are read from stdin, each
//! solved against whatever fact state the graph has accumulated so far,
//! until EOF or a `:quit` line.

use std::io::{self, BufRead, Write};

use expert_base::Span;
use expert_kernel::Query;
use expert_proof::{solve_everything, InferenceGraph};

use crate::error::CliError;
use crate::pipeline::format_query_explanation;

const PROMPT: &str = "> ";

pub fn run_interactive(graph: &mut InferenceGraph, explain: bool) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut next_line = 1_000_000;

    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            prompt()?;
            continue;
        }
        if trimmed == ":quit" {
            break;
        }

        let letters: Vec<char> = trimmed
            .strip_prefix('?')
            .unwrap_or(trimmed)
            .chars()
            .filter(|c| c.is_ascii_uppercase())
            .collect();
        if letters.is_empty() {
            prompt()?;
            continue;
        }

        let queries: Vec<Query> = letters
            .into_iter()
            .map(|letter| {
                let query = Query::new(letter, Span::new(next_line), None);
                graph.add_query(&query);
                query
            })
            .collect();
        next_line += 1;

        let result = solve_everything(graph, &queries);
        print!("{}", result);
        if explain {
            for query in &queries {
                print!("{}", format_query_explanation(graph, query.id));
            }
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("{}", PROMPT);
    io::stdout().flush()
}
