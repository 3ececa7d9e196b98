//! The CLI's own error type.
//!
//! A thin wrapper gluing together I/O failures and the two library error
//! types ([`expert_language::ParseError`], [`expert_proof::ProofError`])
//! the pipeline can surface outside of a per-query context. Per-query
//! errors (contradictions) never reach this type — `solve_everything`
//! already turns those into one-line entries in the conclusion text.

use std::fmt;

/// Everything that can abort the CLI before a query is ever answered:
/// reading the program, parsing it, or building the inference graph.
#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Parse(expert_language::ParseError),
    Proof(expert_proof::ProofError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{}", e),
            CliError::Parse(e) => write!(f, "{}", e),
            CliError::Proof(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<expert_language::ParseError> for CliError {
    fn from(e: expert_language::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<expert_proof::ProofError> for CliError {
    fn from(e: expert_proof::ProofError) -> Self {
        CliError::Proof(e)
    }
}
