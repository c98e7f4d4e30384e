//! Tournament Runner
//!
//! Plays the search engines against each other:
//! - Arena configuration from TOML naming two engines and their settings
//! - Matches with colour alternation and a ply limit
//! - Per-move logging in SAN through `tracing`
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tournament -- --config arena.toml --games 20
//! RUST_LOG=debug cargo run -p tournament -- --config arena.toml
//! ```

mod config;
mod error;
mod match_runner;
mod result;

pub use config::*;
pub use error::TournamentError;
pub use match_runner::*;
pub use result::*;
