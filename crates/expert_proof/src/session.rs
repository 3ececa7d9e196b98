//! Running every query in a session and assembling the final report.
//!
//! Construction errors (`InvalidRule`, `DuplicateRule`, `ContradictingFacts`)
//! abort before a session ever starts, since they are raised while
//! building the graph itself. [`solve_everything`] only needs to guard
//! against solving-time errors — chiefly [`ProofError::Contradiction`] —
//! and it does so per query: one query failing does not stop the rest
//! from being answered.

use crate::error::ProofResult;
use crate::graph::InferenceGraph;
use expert_kernel::{Expr, Proposition, Query, TriState};
use std::fmt;

/// The outcome of solving one query: either a tri-state answer, or the
/// error that aborted solving for that letter.
pub struct QueryOutcome {
    pub letter: Proposition,
    pub result: ProofResult<TriState>,
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(state) => write!(f, "{} is {}", self.letter, state),
            Err(e) => write!(f, "{} Error: {}", self.letter, e),
        }
    }
}

/// The result of running every query in a session: one outcome per
/// query, the accumulated explanation trace (empty unless explanation was
/// requested), and whether any query ended in an error.
pub struct SessionResult {
    pub outcomes: Vec<QueryOutcome>,
    pub explanation: String,
    pub has_error: bool,
}

impl fmt::Display for SessionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

/// Solves every query against `graph` (§4.6).
///
/// Every query's cross-check expression is compiled up front, before any
/// query is solved, so that solving query *N* (which can mutate fact state
/// through the propagator) never changes what query *N+1*'s formula was
/// compiled against. Only then does each query run the backward-chaining
/// solver and reconcile its answer against its (already-compiled) table
/// (§4.5). A query whose solving raises a [`crate::error::ProofError`] is
/// recorded as an error outcome rather than aborting the remaining queries.
pub fn solve_everything(graph: &mut InferenceGraph, queries: &[Query]) -> SessionResult {
    let compiled: Vec<Expr> = queries
        .iter()
        .map(|q| graph.compile_expr_for_fact(q.id))
        .collect();

    let mut outcomes = Vec::with_capacity(queries.len());
    let mut has_error = false;

    for (query, expr) in queries.iter().zip(compiled.iter()) {
        let outcome = solve_one(graph, query.id, expr);
        if outcome.is_err() {
            has_error = true;
        }
        outcomes.push(QueryOutcome {
            letter: query.id,
            result: outcome,
        });
    }

    SessionResult {
        outcomes,
        explanation: graph.explanation().to_string(),
        has_error,
    }
}

fn solve_one(graph: &mut InferenceGraph, letter: Proposition, expr: &Expr) -> ProofResult<TriState> {
    let solver_result = graph.solve_for_fact(letter)?;
    graph.log(format!("{} \u{21d4} {}", letter, expr.formal_logic_string()));
    let table = graph.bool_map_evaluate(expr);
    Ok(graph.determine_final_state(solver_result, &table, letter))
}
