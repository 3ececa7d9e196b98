//! Value objects bearing a formula or letter, together with their
//! provenance: [`TriState`], [`Rule`], [`Fact`] and [`Query`].

use crate::expr::{Expr, Proposition};
use expert_base::Span;
use std::fmt;

/// Kleene three-valued truth value.
///
/// `Undetermined` is the initial state for every proposition not stated as
/// a base fact. It is not a separate "unknown-yet-seen" marker: every
/// proposition the system may ever refer to has an entry in the inference
/// graph, with this as its default state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriState {
    True,
    False,
    Undetermined,
}

impl TriState {
    /// Lifts a Rust `bool` into a determined `TriState`.
    pub fn from_bool(b: bool) -> TriState {
        if b {
            TriState::True
        } else {
            TriState::False
        }
    }

    /// `true` iff this is `True` or `False`, i.e. not `Undetermined`.
    pub fn is_determined(&self) -> bool {
        !matches!(self, TriState::Undetermined)
    }

    /// Kleene negation: `Undetermined` stays `Undetermined`.
    pub fn kleene_not(self) -> TriState {
        match self {
            TriState::True => TriState::False,
            TriState::False => TriState::True,
            TriState::Undetermined => TriState::Undetermined,
        }
    }

    /// Kleene conjunction: `False` if either operand is `False`, else
    /// `Undetermined` unless both are `True`.
    pub fn kleene_and(self, other: TriState) -> TriState {
        use TriState::*;
        match (self, other) {
            (False, _) | (_, False) => False,
            (True, True) => True,
            _ => Undetermined,
        }
    }

    /// Kleene disjunction: `True` if either operand is `True`, else
    /// `Undetermined` unless both are `False`.
    pub fn kleene_or(self, other: TriState) -> TriState {
        use TriState::*;
        match (self, other) {
            (True, _) | (_, True) => True,
            (False, False) => False,
            _ => Undetermined,
        }
    }

    /// Kleene exclusive-or: `Undetermined` if either operand is
    /// `Undetermined`, otherwise boolean XOR.
    pub fn kleene_xor(self, other: TriState) -> TriState {
        use TriState::*;
        match (self, other) {
            (Undetermined, _) | (_, Undetermined) => Undetermined,
            (a, b) => TriState::from_bool(a != b),
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriState::True => "True",
            TriState::False => "False",
            TriState::Undetermined => "Undetermined",
        };
        write!(f, "{}", s)
    }
}

/// A propositional rule: an expression whose root must be `Imply` or `Iff`,
/// together with its origin line, an optional comment, and a stable
/// identifier derived from the canonical printed form of the expression.
///
/// The `antecedent_facts` / `consequent_facts` lists are filled in by the
/// inference graph at insertion time (§4.2); they hold the sorted letters
/// occurring on the rule's LHS and RHS respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub expr: Expr,
    pub span: Span,
    pub comment: Option<String>,
    pub antecedent_facts: Vec<Proposition>,
    pub consequent_facts: Vec<Proposition>,
}

impl Rule {
    /// Builds a rule from its expression. The identifier is derived from
    /// the expression's canonical string; antecedent/consequent letter
    /// lists start empty and are populated by the inference graph.
    pub fn new(expr: Expr, span: Span, comment: Option<String>) -> Rule {
        let id = expr.canonical_string();
        Rule {
            id,
            expr,
            span,
            comment,
            antecedent_facts: Vec::new(),
            consequent_facts: Vec::new(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

/// A proposition letter together with its tri-state value and provenance.
///
/// `antecedent_rules` lists rules whose LHS mentions this letter (how this
/// fact *drives* the system); `consequent_rules` lists rules whose RHS
/// mentions it (how this fact can be *derived*). Both are populated by the
/// inference graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub id: Proposition,
    pub state: TriState,
    pub span: Option<Span>,
    pub comment: Option<String>,
    pub antecedent_rules: Vec<String>,
    pub consequent_rules: Vec<String>,
}

impl Fact {
    /// Builds an undetermined fact with no provenance, as created when the
    /// graph first encounters a letter through a rule.
    pub fn unknown(id: Proposition) -> Fact {
        Fact {
            id,
            state: TriState::Undetermined,
            span: None,
            comment: None,
            antecedent_rules: Vec::new(),
            consequent_rules: Vec::new(),
        }
    }

    /// Builds a base fact as declared on the `=` line of the input.
    pub fn base(id: Proposition, state: TriState, span: Span, comment: Option<String>) -> Fact {
        Fact {
            id,
            state,
            span: Some(span),
            comment,
            antecedent_rules: Vec::new(),
            consequent_rules: Vec::new(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.id, self.state)
    }
}

/// A query: a proposition letter whose truth value the caller wants to
/// know, as declared on the `?` line of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: Proposition,
    pub span: Span,
    pub comment: Option<String>,
}

impl Query {
    pub fn new(id: Proposition, span: Span, comment: Option<String>) -> Query {
        Query { id, span, comment }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kleene_and_is_false_if_either_operand_false() {
        assert_eq!(TriState::False.kleene_and(TriState::Undetermined), TriState::False);
        assert_eq!(TriState::Undetermined.kleene_and(TriState::False), TriState::False);
    }

    #[test]
    fn kleene_or_is_true_if_either_operand_true() {
        assert_eq!(TriState::True.kleene_or(TriState::Undetermined), TriState::True);
    }

    #[test]
    fn kleene_xor_propagates_undetermined() {
        assert_eq!(TriState::True.kleene_xor(TriState::Undetermined), TriState::Undetermined);
        assert_eq!(TriState::True.kleene_xor(TriState::False), TriState::True);
        assert_eq!(TriState::True.kleene_xor(TriState::True), TriState::False);
    }

    #[test]
    fn rule_id_is_the_canonical_string() {
        let rule = Rule::new(
            Expr::imply(Expr::var('A'), Expr::var('B')),
            Span::new(0),
            None,
        );
        assert_eq!(rule.id, "(A=>B)");
    }
}
