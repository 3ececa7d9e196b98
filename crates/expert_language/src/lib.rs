//! # expert-language
//!
//! Tokenizer and parser for the expert-system input grammar: a flat
//! propositional-rule language with a single facts line and a single
//! queries line.
//!
//! ## Quick Start
//!
//! ```rust
//! use expert_language::parse_program;
//!
//! let (rules, facts, queries) = parse_program("A=>B\n=A\n?B").unwrap();
//! assert_eq!(rules.len(), 1);
//! assert_eq!(facts.len(), 1);
//! assert_eq!(queries.len(), 1);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`lexer::tokenize`] turns source text into a flat [`token::Token`] stream.
//! 2. [`program::parse_program`] groups that stream by source line, routes
//!    the facts/queries lines, and hands every remaining line to
//!    [`parser::Parser`] to build a formula.
//!
//! This crate has no knowledge of the inference graph or the solver; it
//! only produces the `(rules, facts, queries)` triple `expert-proof`'s
//! `build_graph` consumes.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod token;

pub use error::{ParseError, ParseResult};
pub use lexer::tokenize;
pub use parser::Parser;
pub use program::parse_program;
pub use token::{Token, TokenKind};
