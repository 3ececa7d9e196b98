//! The truth-table cross-checker (§4.5).
//!
//! The backward-chaining solver is fast but, because it stops as soon as
//! one rule determines a fact, it can miss ambiguity a brute-force check
//! would catch. This module compiles the transitive closure of rules
//! reachable from a query letter into a single conjunction, enumerates
//! every assignment of its undetermined variables, and keeps only the
//! assignments that satisfy it — the resulting per-letter value lists are
//! then reconciled with the solver's own verdict.

use crate::graph::InferenceGraph;
use expert_kernel::{Expr, Proposition, TriState};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// For each letter appearing in a compiled expression, the list of values
/// it took across every satisfying assignment. A letter present with an
/// empty list, or entirely absent, means no assignment satisfied the
/// compiled expression at all (a contradiction in the rule set).
pub type VarBoolMap = BTreeMap<Proposition, Vec<bool>>;

impl InferenceGraph {
    /// Builds the conjunction of every rule reachable from `letter` by
    /// walking `consequent_rules` transitively through each rule's
    /// `antecedent_facts`. A letter already determined contributes a
    /// literal (`letter` or `!letter`) instead of its rules, so the
    /// compiled formula also encodes known facts. A letter with no rules
    /// and no determined state compiles to just itself.
    pub fn compile_expr_for_fact(&self, letter: Proposition) -> Expr {
        let mut seen_ids: BTreeSet<String> = BTreeSet::new();
        let mut conjuncts: Vec<Expr> = Vec::new();
        self.collect_reachable_rules(letter, &mut seen_ids, &mut conjuncts);

        let mut iter = conjuncts.into_iter();
        match iter.next() {
            None => Expr::var(letter),
            Some(first) => iter.fold(first, |acc, next| Expr::and(acc, next)),
        }
    }

    fn collect_reachable_rules(
        &self,
        letter: Proposition,
        seen_ids: &mut BTreeSet<String>,
        conjuncts: &mut Vec<Expr>,
    ) {
        let fact = match self.facts.get(&letter) {
            Some(f) => f,
            None => return,
        };

        if fact.state != TriState::Undetermined {
            let literal = if fact.state == TriState::True {
                Expr::var(letter)
            } else {
                Expr::not(Expr::var(letter))
            };
            let id = literal.canonical_string();
            if seen_ids.insert(id) {
                conjuncts.push(literal);
            }
            return;
        }

        for rule_id in &fact.consequent_rules {
            let rule = match self.rules.get(rule_id) {
                Some(r) => r,
                None => continue,
            };
            if !seen_ids.insert(rule.expr.canonical_string()) {
                continue;
            }
            conjuncts.push(rule.expr.clone());
            for antecedent_letter in rule.antecedent_facts.clone() {
                self.collect_reachable_rules(antecedent_letter, seen_ids, conjuncts);
            }
        }
    }

    /// Enumerates every assignment of `expr`'s undetermined variables,
    /// keeping the assignments that make it evaluate to `true`, and
    /// returns the per-letter value lists across those assignments. A
    /// letter already determined contributes its fixed value to every
    /// kept assignment rather than being enumerated.
    pub fn bool_map_evaluate(&self, expr: &Expr) -> VarBoolMap {
        let all_letters = expr.all_variables();

        let mut known: HashMap<Proposition, bool> = HashMap::new();
        let mut undetermined: Vec<Proposition> = Vec::new();
        for letter in &all_letters {
            match self.facts.get(letter).map(|f| f.state) {
                Some(TriState::True) => {
                    known.insert(*letter, true);
                }
                Some(TriState::False) => {
                    known.insert(*letter, false);
                }
                _ => undetermined.push(*letter),
            }
        }

        let mut results: VarBoolMap = BTreeMap::new();
        let n = undetermined.len();
        let total: u64 = 1u64.checked_shl(n as u32).unwrap_or(0);

        for mask in 0..total {
            let mut assignment = known.clone();
            for (i, letter) in undetermined.iter().enumerate() {
                let bit = (mask >> i) & 1;
                assignment.insert(*letter, bit == 1);
            }
            if expr.evaluate(&assignment) {
                for (letter, value) in &assignment {
                    results.entry(*letter).or_default().push(*value);
                }
            }
        }

        results
    }

    /// Reconciles the solver's verdict for `letter` with the truth-table's
    /// values for that letter (§4.5).
    ///
    /// If every satisfying assignment agrees (`all true` / `all false`),
    /// that is the table's verdict. If they disagree, and under the Closed
    /// World Assumption, and `letter` is not itself the consequent of an
    /// `Or`/`Xor` rule (so the ambiguity is not a deliberately open
    /// disjunctive conclusion like `A=>B|C`), the closed-world reading
    /// collapses the ambiguity to `False`: what the rule base cannot pin
    /// down to a single value is treated as unproven. The solver's own
    /// answer wins whenever it is determined; the table only fills in when
    /// the solver itself came back `Undetermined`.
    pub fn determine_final_state(
        &mut self,
        solver_result: TriState,
        bool_map: &VarBoolMap,
        letter: Proposition,
    ) -> TriState {
        let no_rule_derives_letter = self
            .facts
            .get(&letter)
            .map(|f| f.consequent_rules.is_empty())
            .unwrap_or(true);
        if no_rule_derives_letter {
            // No rule anywhere in the base concludes `letter`, so the compiled
            // expression is the degenerate `Var(letter)` fallback (§4.5 step 1)
            // rather than a real cross-check: treating "letter" as its own
            // sole constraint would make the table spuriously vote `True`
            // (the only assignment satisfying the bare variable). There is
            // nothing to cross-check here; trust the solver/world-assumption
            // answer outright.
            self.log(format!(
                "{}: no rule concludes this letter, skipping the truth-table cross-check",
                letter
            ));
            return solver_result;
        }

        let values = match bool_map.get(&letter) {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.log(format!(
                    "{}: truth table is empty, no assignment satisfies every reachable rule",
                    letter
                ));
                return solver_result;
            }
        };

        let all_true = values.iter().all(|v| *v);
        let all_false = values.iter().all(|v| !*v);
        let mut table_result = if all_true {
            TriState::True
        } else if all_false {
            TriState::False
        } else {
            TriState::Undetermined
        };

        if table_result == TriState::Undetermined
            && self.world == crate::world::WorldAssumption::Closed
            && !self.is_fact_in_ambiguous_conclusion(letter)
        {
            self.log(format!(
                "{}: closed-world reading — ambiguous but not a disjunctive conclusion, treating as False",
                letter
            ));
            table_result = TriState::False;
        }

        if solver_result == table_result {
            return solver_result;
        }
        if solver_result == TriState::Undetermined {
            self.log(format!("{}: deferring to the truth-table evaluation", letter));
            return table_result;
        }
        self.log(format!(
            "{}: solver and truth table disagree, keeping the solver's answer",
            letter
        ));
        solver_result
    }

    /// `true` iff `letter` is the consequent of a rule whose right-hand
    /// side (not the rule's own root, which is always `Imply` by the time
    /// it is installed) is `Or` or `Xor` — the two connectives where
    /// setting the whole expression `True` does not, by itself, pin down
    /// every variable inside it. This gates the closed-world downgrade in
    /// [`Self::determine_final_state`] to the cases the solver could not
    /// plausibly have left genuinely, deliberately ambiguous.
    fn is_fact_in_ambiguous_conclusion(&self, letter: Proposition) -> bool {
        let fact = match self.facts.get(&letter) {
            Some(f) => f,
            None => return false,
        };
        fact.consequent_rules.iter().any(|rule_id| {
            self.rules
                .get(rule_id)
                .and_then(|rule| rule.expr.rhs())
                .map(|rhs| matches!(rhs, Expr::Or(_, _) | Expr::Xor(_, _)))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldAssumption;
    use expert_base::Span;
    use expert_kernel::{Fact, Rule};

    fn rule(expr: Expr) -> Rule {
        Rule::new(expr, Span::new(0), None)
    }

    #[test]
    fn compile_expr_for_fact_is_var_when_no_rules_apply() {
        let g = InferenceGraph::new(WorldAssumption::Open, false);
        assert_eq!(g.compile_expr_for_fact('Z'), Expr::var('Z'));
    }

    #[test]
    fn bool_map_evaluate_keeps_only_satisfying_assignments() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        let expr = g.compile_expr_for_fact('B');
        let table = g.bool_map_evaluate(&expr);
        // (A=>B) is false only when A=true,B=false, so that assignment is dropped.
        let b_values = &table[&'B'];
        assert!(b_values.iter().any(|v| *v));
        assert!(b_values.iter().any(|v| !*v));
    }

    #[test]
    fn or_in_consequent_is_ambiguous_for_the_unconstrained_disjunct() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        g.add_rule(rule(Expr::imply(
            Expr::var('A'),
            Expr::or(Expr::var('B'), Expr::var('C')),
        )))
        .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        assert!(g.is_fact_in_ambiguous_conclusion('B'));
        assert!(g.is_fact_in_ambiguous_conclusion('C'));
    }
}
