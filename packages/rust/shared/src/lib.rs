//! Shared types, error model, and configuration for the standings generator.
//!
//! This crate is the foundation depended on by all other workspace crates.
//! It provides:
//! - [`StandingsError`]: the unified error type
//! - Domain types ([`Division`], [`StandingRow`], [`MatchdayFile`], [`Standings`])
//! - Configuration ([`AppConfig`], [`PathsConfig`], [`SiteConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DivisionConfig, DivisionsConfig, PathsConfig, SiteConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, resolve_config,
};
pub use error::{Result, StandingsError};
pub use types::{Division, MatchdayFile, StandingRow, Standings};
