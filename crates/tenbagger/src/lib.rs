//! Growth-potential scoring for equities.
//!
//! Raw indicators are scored against per-indicator rule tables, averaged per dimension
//! (industry, competitiveness, growth, timing) and weighted into a total with a potential
//! level. A second path scores a company profile directly.

pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod profile;
pub mod scoring;
pub mod telemetry;

pub use error::AppError;
pub use scoring::{ScoreResult, ScoringConfig, ScoringEngine, ScoringError};
