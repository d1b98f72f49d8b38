//! # forecast2github - migrate Forecast cards to GitHub issues
//!
//! A one-shot batch migration: cards are pulled from the Forecast API,
//! converted into GitHub issues with the original author named at the top
//! of every body, and pushed to a repository one request at a time.
//!
//! ## Quick Start
//!
//! ```bash
//! # Migrate every card of a sprint, with comments, into project board #2
//! forecast2github $FORECAST_API_KEY me $GITHUB_TOKEN acme widgets \
//!     --forecast-sprint 1234 --with-comments --github-project-number 2
//!
//! # Preview the converted issues without touching GitHub
//! forecast2github $FORECAST_API_KEY me $GITHUB_TOKEN acme widgets --dry-run
//! ```
//!
//! ## Modules
//!
//! - [`forecast`]: Forecast API client and card filtering
//! - [`convert`]: Card to issue conversion
//! - [`github`]: GitHub API client and the issue pusher
//! - [`cli`]: Command-line interface definitions and the migrate handler

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading.
///
/// Handles the optional `config.toml` with API hosts, throttle and label.
pub mod config;

/// Error types and result aliases.
///
/// Defines `MigrateError` enum and `Result<T>` type alias.
pub mod error;

/// Data models for cards, persons and issues.
pub mod model;

pub mod convert;
pub mod forecast;
pub mod github;
pub mod http;
pub mod logging;
pub mod throttle;
