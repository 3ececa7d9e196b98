//! Shared helpers for the end-to-end test suite: parse a program, build its
//! graph, answer every query, and hand back the conclusion text exactly as
//! the CLI would print it (§6).

use expert_proof::{build_graph, solve_everything, WorldAssumption};

/// Runs `source` under the Closed World Assumption and returns the
/// conclusion text, one `"<letter> is <state>"` line per query.
pub fn run(source: &str) -> String {
    run_with_world(source, WorldAssumption::Closed)
}

/// Runs `source` under the Open World Assumption.
pub fn run_open(source: &str) -> String {
    run_with_world(source, WorldAssumption::Open)
}

pub fn run_with_world(source: &str, world: WorldAssumption) -> String {
    let (rules, facts, queries) = expert_language::parse_program(source).expect("valid program");
    let mut graph = build_graph(facts, rules, &queries, world, false).expect("valid graph");
    let result = solve_everything(&mut graph, &queries);
    result.to_string()
}

/// Splits a conclusion block's trailing-newline-joined lines into a `Vec`
/// for assertions that care about per-line order.
pub fn lines(conclusion: &str) -> Vec<&str> {
    conclusion.lines().collect()
}
