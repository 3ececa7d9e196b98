//! # expert-base
//!
//! Pure structural atoms shared across the expert-system crates.
//!
//! This crate provides the foundational types used throughout the pipeline:
//!
//! - [`Span`] — source line tracking
//! - [`SpannedError`]/[`Result`] — errors annotated with the line they came from
//!
//! # Design Principles
//!
//! This crate has no knowledge of propositional logic or of the inference
//! engine built on top of it. It only provides generic, reusable
//! infrastructure that higher-level crates build upon.

pub mod error;
pub mod span;

pub use error::{Result, SpannedError};
pub use span::Span;
