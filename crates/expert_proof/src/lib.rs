//! # expert-proof
//!
//! The inference graph, the backward-chaining solver, and the truth-table
//! cross-checker that together answer a query against a rule base.
//!
//! [`build_graph`] is the single entry point for turning parsed facts,
//! rules and queries into a ready-to-solve [`InferenceGraph`]; from there,
//! [`session::solve_everything`] answers every query in turn.

pub mod error;
pub mod graph;
pub mod session;
pub mod solver;
pub mod truth_table;
pub mod world;

pub use error::{ProofError, ProofResult};
pub use graph::InferenceGraph;
pub use session::{solve_everything, QueryOutcome, SessionResult};
pub use truth_table::VarBoolMap;
pub use world::WorldAssumption;

use expert_kernel::{Fact, Query, Rule};

/// Builds an [`InferenceGraph`] from a parsed program: base facts first,
/// then query letters (registered as undetermined so an unreferenced
/// query letter still falls under the world assumption rather than the
/// solver's "unknown to the graph" fallback), then rules, then the world
/// assumption is applied to whatever is left undetermined (§4.2).
pub fn build_graph(
    facts: Vec<Fact>,
    rules: Vec<Rule>,
    queries: &[Query],
    world: WorldAssumption,
    explain: bool,
) -> ProofResult<InferenceGraph> {
    let mut graph = InferenceGraph::new(world, explain);

    for fact in facts {
        graph.add_fact(fact)?;
    }
    for query in queries {
        graph.add_query(query);
    }
    for rule in rules {
        graph.add_rule(rule)?;
    }

    graph.apply_world_assumption();
    Ok(graph)
}
