//! expert-cli
//!
//! Command-line interface and HTTP front-end for the expert-system
//! backward-chaining reasoning engine.
//!
//! This crate is plumbing (§1): it reads a program, hands it to
//! `expert-language` and `expert-proof`, and renders the result. All
//! reasoning lives in those two crates; nothing here solves anything on
//! its own.
//!
//! - [`cli`] — argument parsing and the batch/interactive CLI
//! - [`pipeline`] — the parse-build-solve pipeline shared by the CLI and
//!   the HTTP front-end
//! - [`interactive`] — the `-i/--interactive` REPL
//! - [`server`] — the `-s/--server` HTTP front-end
//! - [`error`] — the CLI's own error type

pub mod cli;
pub mod error;
pub mod interactive;
pub mod pipeline;
pub mod server;

pub use cli::run_cli;
