//! Error types for graph construction and proof search.
//!
//! This module defines [`ProofError`], which captures every failure mode of
//! the inference graph and the solver built on top of it.
//!
//! # Error Categories
//!
//! | Category | Variants | Recoverable? |
//! |----------|----------|--------------|
//! | Construction | `InvalidRule`, `DuplicateRule`, `ContradictingFacts` | fatal for the session |
//! | Internal invariant | `FactNotFound`, `Unsupported` | internal bug; fatal |
//! | Solving | `Contradiction` | fatal for the current query only |
//!
//! Construction and internal-invariant errors abort the whole session;
//! `Contradiction` is caught per-query by [`crate::session::solve_everything`]
//! and reported as a one-line error for that query only.

use expert_kernel::{Expr, Proposition, TriState};
use std::fmt;

/// Errors raised while building or solving an [`crate::graph::InferenceGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// A rule's root was not `Imply`/`Iff`, or its RHS was not a simple
    /// expression (§3: "structurally valid").
    InvalidRule { expr: Expr },

    /// A rule with this exact canonical expression was already installed.
    DuplicateRule { id: String },

    /// Merging two base facts for the same letter produced `True` and
    /// `False` at once.
    ContradictingFacts { letter: Proposition },

    /// A variable was referenced during evaluation that has no entry in the
    /// inference graph. This should never happen after `build_graph`, since
    /// every letter mentioned in any rule gets a fact; it indicates an
    /// internal bug if raised.
    FactNotFound { letter: Proposition },

    /// The propagator or the `Iff` evaluator found current fact state is
    /// inconsistent with a value it was asked to establish.
    Contradiction {
        letter: Proposition,
        current: TriState,
        requested: TriState,
    },

    /// The propagator was asked to push a value through a construct it does
    /// not handle (`Imply`/`Iff` are reduced away at rule-insertion time and
    /// should never reach `propagate`). Internal bug if raised.
    Unsupported { expr: Expr },
}

impl fmt::Display for ProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofError::InvalidRule { expr } => {
                write!(f, "invalid rule: '{}' (root must be => or <=>, with a simple RHS)", expr)
            }
            ProofError::DuplicateRule { id } => {
                write!(f, "duplicate rule: '{}' is already installed", id)
            }
            ProofError::ContradictingFacts { letter } => {
                write!(f, "contradicting facts: '{}' is stated as both True and False", letter)
            }
            ProofError::FactNotFound { letter } => {
                write!(f, "fact not found: '{}' has no entry in the inference graph", letter)
            }
            ProofError::Contradiction { letter, current, requested } => {
                write!(
                    f,
                    "Contradiction: can't set fact '{}' to {}, it's already {}",
                    letter, requested, current
                )
            }
            ProofError::Unsupported { expr } => {
                write!(f, "unsupported construct in propagate: '{}'", expr)
            }
        }
    }
}

impl std::error::Error for ProofError {}

/// Result type for graph and solver operations.
pub type ProofResult<T> = Result<T, ProofError>;
