//! Integration test suite for the expert-system reasoning engine.
//!
//! This crate exists only to run the end-to-end scenarios under `tests/`
//! against the whole parse-build-solve pipeline. All test code lives in
//! `tests/*.rs`; this crate has no library surface of its own.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p expert-tests
//! ```
