//! expert-cli - Standalone binary
//!
//! This is the entry point for the `expert-cli` command-line tool.
//!
//! The binary is a thin wrapper around [`expert_cli::run_cli`], handling
//! error display and exit codes. All command logic is implemented in the
//! library crate for testability.
//!
//! # Exit Codes
//!
//! - `0` - success
//! - `1` - error (message printed to stderr), missing input, or a
//!   per-query contradiction (§7)

fn main() {
    if let Err(e) = expert_cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
