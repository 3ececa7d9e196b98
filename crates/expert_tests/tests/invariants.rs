//! Universal invariants and idempotence properties from the reasoning
//! core's design document, exercised end to end through the parser and
//! the inference graph rather than unit-tested in isolation.

mod common;
use common::run;

use expert_base::Span;
use expert_kernel::{Expr, Fact, Rule, TriState};
use expert_proof::{build_graph, InferenceGraph, ProofError, WorldAssumption};

#[test]
fn empty_rule_base_under_closed_world_is_always_false() {
    assert_eq!(run("=A\n?Z"), "Z is False\n");
}

#[test]
fn empty_rule_base_under_open_world_is_always_undetermined() {
    let (rules, facts, queries) = expert_language::parse_program("=A\n?Z").unwrap();
    let mut graph = build_graph(facts, rules, &queries, WorldAssumption::Open, false).unwrap();
    let result = expert_proof::solve_everything(&mut graph, &queries);
    assert_eq!(result.to_string(), "Z is Undetermined\n");
}

#[test]
fn installing_the_same_rule_twice_is_rejected() {
    let err = expert_language::parse_program("A=>B\nA=>B\n=A\n?B")
        .map(|(rules, facts, queries)| build_graph(facts, rules, &queries, WorldAssumption::Closed, false))
        .unwrap()
        .unwrap_err();
    assert!(matches!(err, ProofError::DuplicateRule { .. }));
}

#[test]
fn an_iff_rule_installs_as_both_directional_implications() {
    let mut g = InferenceGraph::new(WorldAssumption::Open, false);
    g.add_rule(Rule::new(Expr::iff(Expr::var('A'), Expr::var('B')), Span::new(0), None))
        .unwrap();

    let mut h = InferenceGraph::new(WorldAssumption::Open, false);
    h.add_rule(Rule::new(Expr::imply(Expr::var('A'), Expr::var('B')), Span::new(0), None))
        .unwrap();
    h.add_rule(Rule::new(Expr::imply(Expr::var('B'), Expr::var('A')), Span::new(0), None))
        .unwrap();

    assert_eq!(
        g.rules.keys().collect::<std::collections::BTreeSet<_>>(),
        h.rules.keys().collect::<std::collections::BTreeSet<_>>()
    );
}

#[test]
fn every_letter_in_a_rule_has_a_matching_fact_entry_with_correct_side() {
    let mut g = InferenceGraph::new(WorldAssumption::Open, false);
    g.add_rule(Rule::new(
        Expr::imply(Expr::and(Expr::var('A'), Expr::var('B')), Expr::var('C')),
        Span::new(0),
        None,
    ))
    .unwrap();

    let rule_id = "((A+B)=>C)";
    assert!(g.facts[&'A'].antecedent_rules.contains(&rule_id.to_string()));
    assert!(g.facts[&'B'].antecedent_rules.contains(&rule_id.to_string()));
    assert!(g.facts[&'C'].consequent_rules.contains(&rule_id.to_string()));
    assert!(!g.facts[&'C'].antecedent_rules.contains(&rule_id.to_string()));
    assert!(!g.facts[&'A'].consequent_rules.contains(&rule_id.to_string()));
}

#[test]
fn merging_true_and_false_base_facts_is_a_contradiction() {
    let mut g = InferenceGraph::new(WorldAssumption::Open, false);
    g.add_fact(Fact::base('A', TriState::True, Span::new(0), None)).unwrap();
    let err = g
        .add_fact(Fact::base('A', TriState::False, Span::new(1), None))
        .unwrap_err();
    assert!(matches!(err, ProofError::ContradictingFacts { letter: 'A' }));
}

#[test]
fn canonical_string_is_injective_for_a_representative_sample() {
    let exprs = vec![
        Expr::and(Expr::var('A'), Expr::var('B')),
        Expr::or(Expr::var('A'), Expr::var('B')),
        Expr::xor(Expr::var('A'), Expr::var('B')),
        Expr::imply(Expr::var('A'), Expr::var('B')),
        Expr::iff(Expr::var('A'), Expr::var('B')),
        Expr::not(Expr::var('A')),
        Expr::imply(Expr::and(Expr::var('A'), Expr::var('B')), Expr::var('C')),
        Expr::imply(Expr::var('A'), Expr::or(Expr::var('B'), Expr::var('C'))),
    ];
    let mut seen = std::collections::HashSet::new();
    for e in &exprs {
        assert!(seen.insert(e.canonical_string()), "duplicate canonical string for {:?}", e);
    }
}
