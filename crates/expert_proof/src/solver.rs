//! The backward-chaining solver (§4.3, §4.4).
//!
//! Three mutually recursive operations drive proof search:
//!
//! - [`InferenceGraph::solve_for_fact`] — the entry point for a query
//!   letter: tries every rule that could derive it, then reports whatever
//!   state the fact ended up in.
//! - [`InferenceGraph::solve_rule`] — evaluates one rule's formula.
//! - [`InferenceGraph::evaluate_expression`] — a tri-state evaluator over
//!   the formula tree, recursing into `solve_for_fact` whenever it meets a
//!   variable that is still undetermined.
//!
//! A separate operation, [`InferenceGraph::propagate`], pushes a
//! newly-established truth value for a rule's consequent back down into
//! the variables of that consequent expression — this is how `A => B|C`
//! with `A` true and `B` false lets the solver conclude `C` is true
//! without ever re-deriving it from its own rules.

use crate::error::{ProofError, ProofResult};
use crate::graph::InferenceGraph;
use expert_kernel::{Expr, Proposition, TriState};

fn first_variable(expr: &Expr) -> Proposition {
    expr.all_variables()
        .into_iter()
        .next()
        .expect("an Expr always has at least one Var leaf")
}

impl InferenceGraph {
    /// Tries to determine `letter`'s truth value by running every rule
    /// that could derive it (§4.3).
    ///
    /// A letter the graph has never heard of defers to the world
    /// assumption. A letter already on the solving stack (a cycle) defers
    /// to `Undetermined` without error, on the theory that some other
    /// branch of the search may still pin it down. Otherwise every rule in
    /// `consequent_rules` is evaluated in insertion order; the final
    /// answer is whatever state the fact holds once they have all run.
    pub fn solve_for_fact(&mut self, letter: Proposition) -> ProofResult<TriState> {
        if !self.facts.contains_key(&letter) {
            self.log(format!(
                "{} has no entry in the graph; deferring to the {}",
                letter, self.world
            ));
            return Ok(match self.world {
                crate::world::WorldAssumption::Closed => TriState::False,
                crate::world::WorldAssumption::Open => TriState::Undetermined,
            });
        }

        if self.solving_stack.contains(&letter) {
            self.log(format!("cycle detected at {}, deferring to other rules", letter));
            return Ok(self.facts[&letter].state);
        }

        self.solving_stack.insert(letter);

        let rule_ids = self.facts[&letter].consequent_rules.clone();
        let mut outcome = Ok(());
        for rule_id in rule_ids {
            self.log(format!("solve_for_fact {}: trying rule {}", letter, rule_id));
            if let Err(e) = self.solve_rule(&rule_id) {
                outcome = Err(e);
                break;
            }
        }

        // Pop unconditionally, even on error: a contradiction aborts only the
        // current query (§7), and the next query must start with an empty
        // solving stack (§3's lifecycle invariant), not one still holding
        // this letter from the failed attempt.
        self.solving_stack.remove(&letter);
        outcome?;
        Ok(self.facts[&letter].state)
    }

    /// Evaluates a single rule's formula (its result is discarded by the
    /// caller; what matters is the fact-state mutation the evaluation
    /// performs through [`Self::propagate`]).
    pub(crate) fn solve_rule(&mut self, rule_id: &str) -> ProofResult<TriState> {
        let expr = self
            .rules
            .get(rule_id)
            .expect("rule_id is drawn from a fact's consequent_rules, which only names installed rules")
            .expr
            .clone();
        let result = self.evaluate_expression(&expr)?;
        self.log(format!("solve_rule {}: result {}", rule_id, result));
        Ok(result)
    }

    /// Tri-state evaluation of a formula, recursing into
    /// [`Self::solve_for_fact`] for any undetermined variable and into
    /// [`Self::propagate`] whenever an `Imply`/`Iff` node determines a new
    /// value for its other side.
    pub(crate) fn evaluate_expression(&mut self, expr: &Expr) -> ProofResult<TriState> {
        match expr {
            Expr::Var(v) => {
                let state = self
                    .facts
                    .get(v)
                    .map(|f| f.state)
                    .ok_or(ProofError::FactNotFound { letter: *v })?;
                if state == TriState::Undetermined {
                    self.solve_for_fact(*v)
                } else {
                    Ok(state)
                }
            }
            Expr::Not(c) => Ok(self.evaluate_expression(c)?.kleene_not()),
            Expr::And(l, r) => {
                let lv = self.evaluate_expression(l)?;
                let rv = self.evaluate_expression(r)?;
                Ok(lv.kleene_and(rv))
            }
            Expr::Or(l, r) => {
                let lv = self.evaluate_expression(l)?;
                let rv = self.evaluate_expression(r)?;
                Ok(lv.kleene_or(rv))
            }
            Expr::Xor(l, r) => {
                let lv = self.evaluate_expression(l)?;
                let rv = self.evaluate_expression(r)?;
                Ok(lv.kleene_xor(rv))
            }
            Expr::Imply(l, r) => {
                let lv = self.evaluate_expression(l)?;
                match lv {
                    TriState::True => {
                        self.log(format!("{} => {}: antecedent true, asserting consequent", l, r));
                        self.propagate(r, TriState::True)?;
                        Ok(TriState::True)
                    }
                    TriState::False => Ok(TriState::True),
                    TriState::Undetermined => Ok(TriState::Undetermined),
                }
            }
            Expr::Iff(l, r) => {
                let lv = self.evaluate_expression(l)?;
                let rv = self.evaluate_expression(r)?;
                match (lv, rv) {
                    (TriState::Undetermined, TriState::Undetermined) => Ok(TriState::Undetermined),
                    (a, b) if a == b => Ok(TriState::True),
                    (TriState::Undetermined, determined) => {
                        self.propagate(l, determined)?;
                        Ok(TriState::True)
                    }
                    (determined, TriState::Undetermined) => {
                        self.propagate(r, determined)?;
                        Ok(TriState::True)
                    }
                    (current, requested) => Err(ProofError::Contradiction {
                        letter: first_variable(l),
                        current,
                        requested,
                    }),
                }
            }
        }
    }

    /// Pushes a known truth value for `expr` down into its variables
    /// (§4.4). Never called on `Imply`/`Iff`, which are reduced away
    /// before a rule is installed — reaching one here is
    /// [`ProofError::Unsupported`].
    pub(crate) fn propagate(&mut self, expr: &Expr, state: TriState) -> ProofResult<()> {
        match expr {
            Expr::Var(v) => {
                let fact = self
                    .facts
                    .get_mut(v)
                    .ok_or(ProofError::FactNotFound { letter: *v })?;
                match fact.state {
                    TriState::Undetermined => {
                        fact.state = state;
                        Ok(())
                    }
                    current if current == state || state == TriState::Undetermined => Ok(()),
                    current => Err(ProofError::Contradiction {
                        letter: *v,
                        current,
                        requested: state,
                    }),
                }
            }
            Expr::Not(c) => self.propagate(c, state.kleene_not()),
            Expr::And(l, r) => match state {
                TriState::True => {
                    self.propagate(l, TriState::True)?;
                    self.propagate(r, TriState::True)
                }
                TriState::False => {
                    self.propagate(l, TriState::Undetermined)?;
                    self.propagate(r, TriState::Undetermined)
                }
                TriState::Undetermined => Ok(()),
            },
            Expr::Or(l, r) => match state {
                TriState::True => {
                    let lv = self.evaluate_expression(l)?;
                    let rv = self.evaluate_expression(r)?;
                    if lv == TriState::False {
                        self.propagate(r, TriState::True)
                    } else if rv == TriState::False {
                        self.propagate(l, TriState::True)
                    } else {
                        self.propagate(l, TriState::Undetermined)?;
                        self.propagate(r, TriState::Undetermined)
                    }
                }
                TriState::False => {
                    self.propagate(l, TriState::False)?;
                    self.propagate(r, TriState::False)
                }
                TriState::Undetermined => Ok(()),
            },
            Expr::Xor(l, r) => {
                if state == TriState::Undetermined {
                    return Ok(());
                }
                let lv = self.evaluate_expression(l)?;
                let rv = self.evaluate_expression(r)?;
                match state {
                    TriState::True => {
                        if lv == TriState::True {
                            self.propagate(r, TriState::False)
                        } else if rv == TriState::True {
                            self.propagate(l, TriState::False)
                        } else if lv == TriState::False {
                            self.propagate(r, TriState::True)
                        } else if rv == TriState::False {
                            self.propagate(l, TriState::True)
                        } else {
                            Ok(())
                        }
                    }
                    TriState::False => {
                        if lv == TriState::True {
                            self.propagate(r, TriState::True)
                        } else if rv == TriState::True {
                            self.propagate(l, TriState::True)
                        } else if lv == TriState::False {
                            self.propagate(r, TriState::False)
                        } else if rv == TriState::False {
                            self.propagate(l, TriState::False)
                        } else {
                            Ok(())
                        }
                    }
                    TriState::Undetermined => unreachable!("handled above"),
                }
            }
            Expr::Imply(_, _) | Expr::Iff(_, _) => {
                Err(ProofError::Unsupported { expr: expr.clone() })
            }
        }
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
    fn simple_implication_derives_consequent() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        assert_eq!(g.solve_for_fact('B').unwrap(), TriState::True);
    }

    #[test]
    fn or_in_antecedent_is_satisfied_by_either_disjunct() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(
            Expr::or(Expr::var('A'), Expr::var('B')),
            Expr::var('C'),
        )))
        .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        g.add_fact(Fact::base('B', TriState::False, Span::new(1), None))
            .unwrap();
        assert_eq!(g.solve_for_fact('C').unwrap(), TriState::True);
    }

    #[test]
    fn chained_and_requires_every_conjunct() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        g.add_rule(rule(Expr::imply(
            Expr::and(Expr::var('B'), Expr::var('C')),
            Expr::var('D'),
        )))
        .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        g.add_fact(Fact::base('C', TriState::True, Span::new(1), None))
            .unwrap();
        assert_eq!(g.solve_for_fact('D').unwrap(), TriState::True);
    }

    #[test]
    fn or_in_consequent_resolves_the_known_side() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(
            Expr::var('A'),
            Expr::or(Expr::var('B'), Expr::var('C')),
        )))
        .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        g.add_fact(Fact::base('B', TriState::False, Span::new(1), None))
            .unwrap();
        assert_eq!(g.solve_for_fact('C').unwrap(), TriState::True);
    }

    #[test]
    fn xor_in_consequent_resolves_when_one_side_known() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(
            Expr::var('A'),
            Expr::xor(Expr::var('B'), Expr::var('C')),
        )))
        .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        g.add_fact(Fact::base('B', TriState::True, Span::new(1), None))
            .unwrap();
        assert_eq!(g.solve_for_fact('C').unwrap(), TriState::False);
    }

    #[test]
    fn cycle_resolves_to_undetermined_without_error() {
        let mut g = InferenceGraph::new(WorldAssumption::Open, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        g.add_rule(rule(Expr::imply(Expr::var('B'), Expr::var('A'))))
            .unwrap();
        assert_eq!(g.solve_for_fact('A').unwrap(), TriState::Undetermined);
    }

    #[test]
    fn contradiction_between_base_fact_and_derivation_is_an_error() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        g.add_fact(Fact::base('B', TriState::False, Span::new(1), None))
            .unwrap();
        let err = g.solve_for_fact('B').unwrap_err();
        assert!(matches!(err, ProofError::Contradiction { letter: 'B', .. }));
    }

    #[test]
    fn solving_stack_is_empty_again_after_a_contradiction() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        g.add_fact(Fact::base('B', TriState::False, Span::new(1), None))
            .unwrap();
        g.solve_for_fact('B').unwrap_err();
        assert!(g.solving_stack.is_empty());

        // A second, independent query touching the same letter must not see
        // a stale cycle from the failed attempt above.
        let mut h = InferenceGraph::new(WorldAssumption::Closed, false);
        h.add_rule(rule(Expr::imply(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        h.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        assert_eq!(h.solve_for_fact('B').unwrap(), TriState::True);
    }

    #[test]
    fn iff_with_one_known_side_derives_the_other() {
        let mut g = InferenceGraph::new(WorldAssumption::Closed, false);
        g.add_rule(rule(Expr::iff(Expr::var('A'), Expr::var('B'))))
            .unwrap();
        g.add_fact(Fact::base('A', TriState::True, Span::new(0), None))
            .unwrap();
        assert_eq!(g.solve_for_fact('B').unwrap(), TriState::True);
    }
}
