//! The propositional expression algebra.
//!
//! An [`Expr`] is a finite tree over the single-letter propositions `A`..`Z`.
//! Sub-expressions are exclusively owned by their parent — there is no
//! sharing and no cycle, so a recursive enum of boxed children is enough;
//! an arena is not required here.
//!
//! # Operators
//!
//! | Variant | Symbol (canonical) | Symbol (formal logic) |
//! |---------|---------------------|------------------------|
//! | `Not`   | `!`                 | `¬`                    |
//! | `And`   | `+`                 | `∧`                    |
//! | `Or`    | `\|`                | `∨`                    |
//! | `Xor`   | `^`                 | `⊕`                    |
//! | `Imply` | `=>`                | `⇒`                    |
//! | `Iff`   | `<=>`               | `⇔`                    |
//!
//! # Example
//!
//! ```
//! use expert_kernel::Expr;
//! use std::collections::HashMap;
//!
//! let e = Expr::imply(Expr::var('A'), Expr::var('B'));
//! assert_eq!(e.canonical_string(), "(A=>B)");
//!
//! let mut env = HashMap::new();
//! env.insert('A', true);
//! env.insert('B', false);
//! assert_eq!(e.evaluate(&env), false);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A single-letter proposition identifier, `A`..`Z`.
pub type Proposition = char;

/// A propositional formula.
///
/// Leaves are [`Expr::Var`]; every other variant is an operator over one or
/// two owned sub-expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single proposition letter.
    Var(Proposition),
    /// Logical negation: `!x`.
    Not(Box<Expr>),
    /// Logical conjunction: `x + y`.
    And(Box<Expr>, Box<Expr>),
    /// Logical disjunction: `x | y`.
    Or(Box<Expr>, Box<Expr>),
    /// Exclusive or: `x ^ y`.
    Xor(Box<Expr>, Box<Expr>),
    /// Material implication: `x => y`.
    Imply(Box<Expr>, Box<Expr>),
    /// Biconditional: `x <=> y`.
    Iff(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Builds a variable leaf.
    pub fn var(letter: Proposition) -> Expr {
        Expr::Var(letter)
    }

    /// Builds a negation, boxing the child.
    pub fn not(child: Expr) -> Expr {
        Expr::Not(Box::new(child))
    }

    /// Builds a conjunction, boxing both children.
    pub fn and(lhs: Expr, rhs: Expr) -> Expr {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    /// Builds a disjunction, boxing both children.
    pub fn or(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Builds an exclusive-or, boxing both children.
    pub fn xor(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Xor(Box::new(lhs), Box::new(rhs))
    }

    /// Builds an implication, boxing both children.
    pub fn imply(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Imply(Box::new(lhs), Box::new(rhs))
    }

    /// Builds a biconditional, boxing both children.
    pub fn iff(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Iff(Box::new(lhs), Box::new(rhs))
    }

    /// Returns the left-hand / sole child of a binary / unary node, if any.
    pub fn lhs(&self) -> Option<&Expr> {
        match self {
            Expr::Var(_) => None,
            Expr::Not(c) => Some(c),
            Expr::And(l, _)
            | Expr::Or(l, _)
            | Expr::Xor(l, _)
            | Expr::Imply(l, _)
            | Expr::Iff(l, _) => Some(l),
        }
    }

    /// Returns the right-hand child of a binary node, if any.
    pub fn rhs(&self) -> Option<&Expr> {
        match self {
            Expr::And(_, r)
            | Expr::Or(_, r)
            | Expr::Xor(_, r)
            | Expr::Imply(_, r)
            | Expr::Iff(_, r) => Some(r),
            Expr::Var(_) | Expr::Not(_) => None,
        }
    }

    /// Collects every proposition letter occurring as a `Var` leaf.
    pub fn all_variables(&self) -> BTreeSet<Proposition> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<Proposition>) {
        match self {
            Expr::Var(v) => {
                out.insert(*v);
            }
            Expr::Not(c) => c.collect_variables(out),
            Expr::And(l, r)
            | Expr::Or(l, r)
            | Expr::Xor(l, r)
            | Expr::Imply(l, r)
            | Expr::Iff(l, r) => {
                l.collect_variables(out);
                r.collect_variables(out);
            }
        }
    }

    /// Returns `true` iff `letter` appears anywhere in this expression.
    pub fn contains(&self, letter: Proposition) -> bool {
        match self {
            Expr::Var(v) => *v == letter,
            Expr::Not(c) => c.contains(letter),
            Expr::And(l, r)
            | Expr::Or(l, r)
            | Expr::Xor(l, r)
            | Expr::Imply(l, r)
            | Expr::Iff(l, r) => l.contains(letter) || r.contains(letter),
        }
    }

    /// A "simple" expression is a bare variable, a negated variable, or a
    /// single `And`/`Or`/`Xor` of two variables. This is the shape a rule's
    /// right-hand side must have to be structurally valid.
    pub fn is_simple(&self) -> bool {
        match self {
            Expr::Var(_) => true,
            Expr::Not(c) => matches!(**c, Expr::Var(_)),
            Expr::And(l, r) | Expr::Or(l, r) | Expr::Xor(l, r) => {
                matches!(**l, Expr::Var(_)) && matches!(**r, Expr::Var(_))
            }
            Expr::Imply(_, _) | Expr::Iff(_, _) => false,
        }
    }

    /// A rule expression is structurally valid iff its root is `Imply` or
    /// `Iff` and its right-hand side [`is_simple`](Expr::is_simple).
    pub fn is_valid_rule(&self) -> bool {
        match self {
            Expr::Imply(_, rhs) | Expr::Iff(_, rhs) => rhs.is_simple(),
            _ => false,
        }
    }

    /// Parenthesized infix rendering used as a rule's stable identity.
    ///
    /// Two structurally equal expressions always yield byte-identical
    /// strings, and this is the only property relied upon: this is how rule
    /// identifiers are derived.
    pub fn canonical_string(&self) -> String {
        match self {
            Expr::Var(v) => v.to_string(),
            Expr::Not(c) => format!("!{}", c.canonical_string()),
            Expr::And(l, r) => format!("({}+{})", l.canonical_string(), r.canonical_string()),
            Expr::Or(l, r) => format!("({}|{})", l.canonical_string(), r.canonical_string()),
            Expr::Xor(l, r) => format!("({}^{})", l.canonical_string(), r.canonical_string()),
            Expr::Imply(l, r) => {
                format!("({}=>{})", l.canonical_string(), r.canonical_string())
            }
            Expr::Iff(l, r) => {
                format!("({}<=>{})", l.canonical_string(), r.canonical_string())
            }
        }
    }

    /// Parenthesized infix rendering using formal-logic symbols, used in the
    /// explanation channel (`<letter> ⇔ <formula>`).
    pub fn formal_logic_string(&self) -> String {
        match self {
            Expr::Var(v) => v.to_string(),
            Expr::Not(c) => format!("¬{}", c.formal_logic_string()),
            Expr::And(l, r) => {
                format!("({} ∧ {})", l.formal_logic_string(), r.formal_logic_string())
            }
            Expr::Or(l, r) => {
                format!("({} ∨ {})", l.formal_logic_string(), r.formal_logic_string())
            }
            Expr::Xor(l, r) => {
                format!("({} ⊕ {})", l.formal_logic_string(), r.formal_logic_string())
            }
            Expr::Imply(l, r) => {
                format!("({} ⇒ {})", l.formal_logic_string(), r.formal_logic_string())
            }
            Expr::Iff(l, r) => {
                format!("({} ⇔ {})", l.formal_logic_string(), r.formal_logic_string())
            }
        }
    }

    /// Pure boolean evaluation under a complete variable assignment.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` does not contain every variable occurring in
    /// `self`. Callers (the truth-table cross-checker) always build a
    /// complete assignment before calling this; it is a precondition, not a
    /// user-facing error path.
    pub fn evaluate(&self, assignment: &HashMap<Proposition, bool>) -> bool {
        match self {
            Expr::Var(v) => *assignment
                .get(v)
                .unwrap_or_else(|| panic!("incomplete assignment: missing value for '{}'", v)),
            Expr::Not(c) => !c.evaluate(assignment),
            Expr::And(l, r) => l.evaluate(assignment) && r.evaluate(assignment),
            Expr::Or(l, r) => l.evaluate(assignment) || r.evaluate(assignment),
            Expr::Xor(l, r) => l.evaluate(assignment) ^ r.evaluate(assignment),
            Expr::Imply(l, r) => !l.evaluate(assignment) || r.evaluate(assignment),
            Expr::Iff(l, r) => l.evaluate(assignment) == r.evaluate(assignment),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(char, bool)]) -> HashMap<char, bool> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn canonical_string_matches_source_symbols() {
        let e = Expr::iff(
            Expr::imply(Expr::var('A'), Expr::var('B')),
            Expr::and(Expr::var('C'), Expr::not(Expr::var('D'))),
        );
        assert_eq!(e.canonical_string(), "((A=>B)<=>(C+!D))");
    }

    #[test]
    fn canonical_string_is_injective_for_distinct_trees() {
        let a = Expr::and(Expr::var('A'), Expr::var('B'));
        let b = Expr::or(Expr::var('A'), Expr::var('B'));
        assert_ne!(a.canonical_string(), b.canonical_string());
    }

    #[test]
    fn all_variables_collects_every_leaf() {
        let e = Expr::imply(
            Expr::and(Expr::var('A'), Expr::var('B')),
            Expr::var('C'),
        );
        let vars: Vec<_> = e.all_variables().into_iter().collect();
        assert_eq!(vars, vec!['A', 'B', 'C']);
    }

    #[test]
    fn contains_finds_nested_variable() {
        let e = Expr::not(Expr::and(Expr::var('X'), Expr::var('Y')));
        assert!(e.contains('X'));
        assert!(!e.contains('Z'));
    }

    #[test]
    fn is_simple_accepts_var_negation_and_single_binary() {
        assert!(Expr::var('A').is_simple());
        assert!(Expr::not(Expr::var('A')).is_simple());
        assert!(Expr::and(Expr::var('A'), Expr::var('B')).is_simple());
        assert!(!Expr::imply(Expr::var('A'), Expr::var('B')).is_simple());
    }

    #[test]
    fn is_valid_rule_requires_imply_or_iff_root_with_simple_rhs() {
        assert!(Expr::imply(Expr::var('A'), Expr::var('B')).is_valid_rule());
        assert!(Expr::iff(Expr::var('A'), Expr::or(Expr::var('B'), Expr::var('C'))).is_valid_rule());
        assert!(!Expr::and(Expr::var('A'), Expr::var('B')).is_valid_rule());
        assert!(!Expr::imply(Expr::var('A'), Expr::and(Expr::var('B'), Expr::imply(Expr::var('C'), Expr::var('D')))).is_valid_rule());
    }

    #[test]
    fn evaluate_matches_truth_tables() {
        assert!(Expr::and(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', true), ('B', true)])));
        assert!(!Expr::and(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', true), ('B', false)])));
        assert!(Expr::or(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', false), ('B', true)])));
        assert!(Expr::xor(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', true), ('B', false)])));
        assert!(!Expr::xor(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', true), ('B', true)])));
        assert!(Expr::imply(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', false), ('B', false)])));
        assert!(!Expr::imply(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', true), ('B', false)])));
        assert!(Expr::iff(Expr::var('A'), Expr::var('B')).evaluate(&env(&[('A', true), ('B', true)])));
    }
}
