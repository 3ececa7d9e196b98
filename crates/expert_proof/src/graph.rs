//! The inference graph: a bipartite index of facts and rules, built once
//! per session and then queried repeatedly by the solver.
//!
//! Building the graph (§4.2) never evaluates anything — it only wires up
//! `antecedent_rules`/`consequent_rules` on facts and `antecedent_facts`/
//! `consequent_facts` on rules, so the solver can walk from a queried
//! letter to the rules that might derive it without re-scanning the rule
//! base on every step.

use crate::error::{ProofError, ProofResult};
use crate::world::WorldAssumption;
use expert_kernel::{Expr, Fact, Proposition, Query, Rule, TriState};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

/// The bipartite fact/rule index plus the bookkeeping the solver needs:
/// which world assumption governs unproven facts, an explanation trace,
/// and the cycle-detection stack for the current query.
pub struct InferenceGraph {
    pub facts: BTreeMap<Proposition, Fact>,
    pub rules: HashMap<String, Rule>,
    pub world: WorldAssumption,
    pub explain: bool,
    pub(crate) solving_stack: HashSet<Proposition>,
    pub(crate) trace: String,
}

impl InferenceGraph {
    /// An empty graph under the given world assumption, with explanation
    /// logging enabled or disabled.
    pub fn new(world: WorldAssumption, explain: bool) -> InferenceGraph {
        InferenceGraph {
            facts: BTreeMap::new(),
            rules: HashMap::new(),
            world,
            explain,
            solving_stack: HashSet::new(),
            trace: String::new(),
        }
    }

    /// Appends a line to the explanation trace if explanation is enabled.
    pub(crate) fn log(&mut self, line: impl AsRef<str>) {
        if self.explain {
            let _ = writeln!(self.trace, "{}", line.as_ref());
        }
    }

    /// The accumulated explanation trace, empty if explanation is disabled.
    pub fn explanation(&self) -> &str {
        &self.trace
    }

    /// Inserts a fact, merging with any existing entry for the same letter.
    ///
    /// `Undetermined` merged with a determined state yields the determined
    /// state; two equal states are a no-op; `True` merged with `False` is
    /// a [`ProofError::ContradictingFacts`]. Provenance (rule links, span,
    /// comment) is unioned rather than overwritten.
    pub fn add_fact(&mut self, fact: Fact) -> ProofResult<()> {
        match self.facts.get_mut(&fact.id) {
            None => {
                self.facts.insert(fact.id, fact);
            }
            Some(existing) => {
                use TriState::*;
                match (existing.state, fact.state) {
                    (a, b) if a == b => {}
                    (True, False) | (False, True) => {
                        return Err(ProofError::ContradictingFacts { letter: fact.id });
                    }
                    (Undetermined, determined) => existing.state = determined,
                    (_determined, Undetermined) => {}
                    _ => unreachable!("TriState only has three values"),
                }
                if existing.span.is_none() {
                    existing.span = fact.span;
                }
                if existing.comment.is_none() {
                    existing.comment = fact.comment;
                }
                existing.antecedent_rules.extend(fact.antecedent_rules);
                existing.consequent_rules.extend(fact.consequent_rules);
            }
        }
        Ok(())
    }

    /// Registers a query's letter as an undetermined fact if the graph does
    /// not already know it, so that a letter queried but never mentioned by
    /// any rule still gets resolved by the world assumption (§4.3) rather
    /// than falling through the "truly unknown" path in the solver.
    pub fn add_query(&mut self, query: &Query) {
        self.facts
            .entry(query.id)
            .or_insert_with(|| Fact::unknown(query.id));
    }

    fn ensure_fact(&mut self, letter: Proposition) {
        self.facts
            .entry(letter)
            .or_insert_with(|| Fact::unknown(letter));
    }

    /// Installs a rule into the graph (§4.2).
    ///
    /// An `Iff` root is decomposed into its forward (`LHS=>RHS`) and
    /// backward (`RHS=>LHS`) implications, each carrying the same origin
    /// line and a comment suffix naming its direction, and each installed
    /// through this same path — so a backward half whose new RHS is not
    /// simple is rejected exactly as any other invalid rule would be.
    pub fn add_rule(&mut self, rule: Rule) -> ProofResult<()> {
        if self.rules.contains_key(&rule.id) {
            return Err(ProofError::DuplicateRule { id: rule.id });
        }
        if !rule.expr.is_valid_rule() {
            return Err(ProofError::InvalidRule { expr: rule.expr });
        }

        if let Expr::Iff(lhs, rhs) = rule.expr.clone() {
            let forward = Rule::new(
                Expr::imply((*lhs).clone(), (*rhs).clone()),
                rule.span,
                suffix_comment(&rule.comment, "forward"),
            );
            let backward = Rule::new(
                Expr::imply((*rhs).clone(), (*lhs).clone()),
                rule.span,
                suffix_comment(&rule.comment, "backward"),
            );
            self.add_rule(forward)?;
            self.add_rule(backward)?;
            return Ok(());
        }

        self.install_implication(rule)
    }

    fn install_implication(&mut self, mut rule: Rule) -> ProofResult<()> {
        let lhs = rule
            .expr
            .lhs()
            .expect("validated rule root is Imply, which always has an lhs")
            .clone();
        let rhs = rule
            .expr
            .rhs()
            .expect("validated rule root is Imply, which always has an rhs")
            .clone();

        for letter in rhs.all_variables() {
            self.ensure_fact(letter);
            self.facts
                .get_mut(&letter)
                .unwrap()
                .consequent_rules
                .push(rule.id.clone());
            rule.consequent_facts.push(letter);
        }
        for letter in lhs.all_variables() {
            self.ensure_fact(letter);
            self.facts
                .get_mut(&letter)
                .unwrap()
                .antecedent_rules
                .push(rule.id.clone());
            rule.antecedent_facts.push(letter);
        }

        self.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    /// Applies the graph's world assumption to every fact that is still
    /// `Undetermined` and has no rule that could ever derive it. Under
    /// [`WorldAssumption::Closed`] such facts become `False`; under `Open`
    /// they are left as-is (the solver already defaults to `Undetermined`).
    pub fn apply_world_assumption(&mut self) {
        if self.world != WorldAssumption::Closed {
            return;
        }
        for fact in self.facts.values_mut() {
            if fact.state == TriState::Undetermined && fact.consequent_rules.is_empty() {
                fact.state = TriState::False;
            }
        }
    }

    /// Renders the graph as a Graphviz DOT digraph: one node per fact
    /// (labelled with its letter and current state), one node per rule
    /// (labelled with its formula), and edges from antecedent facts into a
    /// rule and from a rule into its consequent facts.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph expert_system {\n");
        out.push_str("    rankdir=LR;\n");

        for fact in self.facts.values() {
            let _ = writeln!(
                out,
                "    \"fact_{}\" [shape=ellipse, label=\"{} = {}\"];",
                fact.id, fact.id, fact.state
            );
        }
        for rule in self.rules.values() {
            let _ = writeln!(
                out,
                "    \"rule_{}\" [shape=box, label=\"{}\"];",
                rule.id, rule.expr
            );
            for letter in &rule.antecedent_facts {
                let _ = writeln!(out, "    \"fact_{}\" -> \"rule_{}\";", letter, rule.id);
            }
            for letter in &rule.consequent_facts {
                let _ = writeln!(out, "    \"rule_{}\" -> \"fact_{}\";", rule.id, letter);
            }
        }

        out.push_str("}\n");
        out
    }
}

fn suffix_comment(comment: &Option<String>, direction: &str) -> Option<String> {
    match comment {
        Some(c) => Some(format!("{} ({})", c, direction)),
        None => Some(format!("({})", direction)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expert_base::Span;

    fn rule(expr: Expr) -> Rule {
        Rule::new(expr, Span::new(0), None)
    }

    #[test]
    fn add_rule_wires_antecedent_and_consequent_links() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();

        assert!(g.facts[&'A'].antecedent_rules.contains(&"(A=>B)".to_string()));
        assert!(g.facts[&'B'].consequent_rules.contains(&"(A=>B)".to_string()));
        assert_eq!(g.rules[&"(A=>B)".to_string()].antecedent_facts, vec!['A']);
        assert_eq!(g.rules[&"(A=>B)".to_string()].consequent_facts, vec!['B']);
    }

    #[test]
    fn add_rule_rejects_duplicates() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        let err = g
            .add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap_err();
        assert!(matches!(err, ProofError::DuplicateRule { .. }));
    }

    #[test]
    fn add_rule_decomposes_iff_into_both_directions() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        g.add_rule(rule(Expr::iff(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        assert!(g.rules.contains_key("(A=>B)"));
        assert!(g.rules.contains_key("(B=>A)"));
    }

    #[test]
    fn add_fact_detects_contradiction() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        let err = g
            .add_fact(Fact::base('A', TriState::False, Span::new(1), None))
            .unwrap_err();
        assert!(matches!(err, ProofError::ContradictingFacts { letter: 'A' }));
    }

    #[test]
    fn closed_world_defaults_unreachable_facts_to_false() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        let query = Query::new('F', Span::new(2), None);
        g.add_query(&query);
        g.apply_world_assumption();
        assert_eq!(g.facts[&'F'].state, TriState::False);
    }

    #[test]
    fn open_world_leaves_unreachable_facts_undetermined() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        let query = Query::new('F', Span::new(0), None);
        g.add_query(&query);
        g.apply_world_assumption();
        assert_eq!(g.facts[&'F'].state, TriState::Undetermined);
    }
}
