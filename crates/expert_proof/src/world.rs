//! Open World vs. Closed World Assumption.
//!
//! - **Open World (OWA)**: absence of proof is not proof of absence — an
//!   unknown fact stays `Undetermined`.
//! - **Closed World (CWA)**: what cannot be proved is false — an unknown
//!   fact with no rule that could ever derive it becomes `False`.
//!
//! The CLI defaults to Closed World, matching the source tool's default.

use std::fmt;

/// Which world assumption governs facts the rule base cannot prove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldAssumption {
    Open,
    Closed,
}

impl Default for WorldAssumption {
    fn default() -> Self {
        WorldAssumption::Closed
    }
}

impl fmt::Display for WorldAssumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldAssumption::Open => write!(f, "Open World Assumption"),
            WorldAssumption::Closed => write!(f, "Closed World Assumption"),
        }
    }
}
