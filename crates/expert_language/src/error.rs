//! Parse errors.
//!
//! The tokenizer and parser report every failure as an [`expert_base::SpannedError`]
//! pointing at the offending line — there is no separate error hierarchy here,
//! since every failure in this crate is, in the end, "the input text at this
//! line does not form a valid program."

pub use expert_base::{Result as ParseResult, SpannedError as ParseError};
