//! Behavioral evaluation harness for the flows.
//!
//! Runs a table of golden scenarios through the real invoker against a
//! deterministic fake provider (no network calls) and checks the outcome,
//! the number of provider calls and the rendered prompt.
//!
//! # Running evals
//!
//! ```bash
//! cargo test -p kisan-ai eval:: -- --nocapture
//! ```

mod harness;
mod scenarios;

pub use harness::*;
pub use scenarios::*;
