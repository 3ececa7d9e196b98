//! Wires the external collaborators (`expert-language`'s parser,
//! `expert-proof`'s graph and solver) into the single call the CLI and the
//! HTTP front-end both need: source text in, a solved graph and session
//! report out.

use crate::error::CliError;
use expert_kernel::Query;
use expert_language::parse_program;
use expert_proof::{build_graph, solve_everything, InferenceGraph, SessionResult, VarBoolMap, WorldAssumption};

/// A program that has been parsed, built into a graph, and solved.
pub struct Solved {
    pub graph: InferenceGraph,
    pub queries: Vec<Query>,
    pub result: SessionResult,
}

/// Parses `source`, builds the inference graph under `world`, and answers
/// every query in it (§4.2, §4.6). `explain` controls whether the graph
/// accumulates an explanation trace as it solves.
pub fn solve_program(source: &str, world: WorldAssumption, explain: bool) -> Result<Solved, CliError> {
    let (rules, facts, queries) = parse_program(source)?;
    let mut graph = build_graph(facts, rules, &queries, world, explain)?;
    let result = solve_everything(&mut graph, &queries);
    Ok(Solved {
        graph,
        queries,
        result,
    })
}

/// Renders the explanation text for one query (§6): the compiled
/// logical equivalence, followed by its satisfying-assignment table.
/// Does not touch the graph's own trace buffer — `graph.explanation()`
/// (the `OPERATIONS` section) is printed once, after every query.
pub fn format_query_explanation(graph: &InferenceGraph, letter: expert_kernel::Proposition) -> String {
    let expr = graph.compile_expr_for_fact(letter);
    let table = graph.bool_map_evaluate(&expr);
    let mut out = format!("{} \u{21d4} {}\n", letter, expr.formal_logic_string());
    out.push_str(&format_table(&table));
    out
}

fn format_table(table: &VarBoolMap) -> String {
    if table.is_empty() {
        return "  (no satisfying assignment)\n".to_string();
    }
    let letters: Vec<char> = table.keys().copied().collect();
    let rows = table.values().next().map(Vec::len).unwrap_or(0);

    let mut out = String::new();
    out.push_str("  ");
    for letter in &letters {
        out.push_str(&format!("{:>5}", letter));
    }
    out.push('\n');
    for row in 0..rows {
        out.push_str("  ");
        for letter in &letters {
            let value = table[letter][row];
            out.push_str(&format!("{:>5}", value));
        }
        out.push('\n');
    }
    out
}
