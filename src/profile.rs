//! Self-reported user profile for the current session.
//!
//! The profile is a flat record replaced wholesale on save; there are no
//! partial updates and no persistence across sessions. Reply templates only
//! consume the display name, but the remaining fields are carried so the
//! presentation layer can round-trip its profile form through one type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used in replies when the user has not provided one.
pub const DEFAULT_DISPLAY_NAME: &str = "Friend";

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    Sedentary,
    ModeratelyActive,
    Active,
}

impl fmt::Display for Lifestyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lifestyle::Sedentary => "Sedentary",
            Lifestyle::ModeratelyActive => "Moderately Active",
            Lifestyle::Active => "Active",
        };
        f.write_str(s)
    }
}

/// Flat self-reported profile, scoped to one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Full name. Blank or missing falls back to [`DEFAULT_DISPLAY_NAME`].
    pub name: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub occupation: Option<String>,
    pub lifestyle: Option<Lifestyle>,
    /// Average sleep per night, in hours.
    pub sleep_hours: Option<f32>,
    /// Exercise days per week (0–7).
    pub exercise_days: Option<u8>,
    /// Free-text major stressors, comma-separated.
    pub stressors: Option<String>,
    /// Optional health background.
    pub medical_history: Option<String>,
    pub medications: Option<String>,
    pub therapy_history: Option<String>,
}

impl Profile {
    /// Name to interpolate into replies.
    ///
    /// Returns the trimmed profile name, or [`DEFAULT_DISPLAY_NAME`] when the
    /// name is absent or whitespace-only.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_DISPLAY_NAME,
        }
    }
}
