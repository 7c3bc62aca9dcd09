//! Asytic: emotion-aware supportive chat companion core.
//!
//! Each user message flows through a short synchronous pipeline:
//! classify → select reply → append to the session log.
//!
//! # Architecture
//!
//! - **Classifier**: pretrained ONNX emotion model behind a capability trait,
//!   loaded once at startup with a primary → fallback chain
//! - **Crisis detector**: substring scan for self-harm phrases, consulted
//!   before any emotion-based reply
//! - **Reply selector**: deterministic bucket × strength rule table
//! - **Session**: per-session context owning the profile and the append-only
//!   conversation log
//! - **Export / charts**: CSV serialization and chart-ready data for an
//!   external presentation layer

pub mod asytic_dirs;
pub mod charts;
pub mod classifier;
pub mod config;
pub mod crisis;
pub mod error;
pub mod export;
pub mod profile;
pub mod reply;
pub mod session;

pub use classifier::{EmotionClassifier, ScoreDistribution, ScoredLabel, load_classifier};
pub use config::AsyticConfig;
pub use crisis::needs_urgent_help;
pub use error::{AsyticError, Result};
pub use profile::Profile;
pub use reply::supportive_reply;
pub use session::{SessionContext, TurnOutcome};
