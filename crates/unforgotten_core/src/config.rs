//! Coordinator configuration.
//!
//! # Responsibility
//! - Describe host layout and overlay behaviour knobs.
//! - Load them from host-provided JSON or process environment.
//!
//! # Invariants
//! - Every field has a default; partial JSON objects are accepted.
//! - `backdrop_opacity` is always within `0.0..=1.0` after loading.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable selecting the layout class (`regular|compact`).
pub const ENV_LAYOUT: &str = "UNFORGOTTEN_LAYOUT";
/// Environment variable toggling backdrop-tap dismissal (`true|false`).
pub const ENV_BACKDROP_DISMISS: &str = "UNFORGOTTEN_BACKDROP_DISMISS";

const DEFAULT_BACKDROP_OPACITY: f32 = 0.35;

/// Horizontal size class of the host window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutClass {
    /// Two-pane tablet layout with sidebar and side panels.
    #[default]
    Regular,
    /// Single-column phone layout; panels present as sheets.
    Compact,
}

impl LayoutClass {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "compact" => Ok(Self::Compact),
            other => Err(ConfigError::InvalidValue {
                key: ENV_LAYOUT,
                value: other.to_string(),
            }),
        }
    }
}

/// Runtime options for the panel coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub layout: LayoutClass,
    /// Tapping the dimmed backdrop runs dismiss-all.
    pub dismiss_on_backdrop_tap: bool,
    /// Mark transitions as animated for the host.
    pub animate_transitions: bool,
    pub backdrop_opacity: f32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutClass::Regular,
            dismiss_on_backdrop_tap: true,
            animate_transitions: true,
            backdrop_opacity: DEFAULT_BACKDROP_OPACITY,
        }
    }
}

impl CoordinatorConfig {
    /// Parses a JSON object; missing keys fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Json(err.to_string()))?;
        config.validated()
    }

    /// Builds config from defaults overlaid with environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = non_blank(lookup(ENV_LAYOUT)) {
            config.layout = LayoutClass::parse(&raw)?;
        }
        if let Some(raw) = non_blank(lookup(ENV_BACKDROP_DISMISS)) {
            config.dismiss_on_backdrop_tap = parse_bool(ENV_BACKDROP_DISMISS, &raw)?;
        }
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(ConfigError::InvalidValue {
                key: "backdrop_opacity",
                value: self.backdrop_opacity.to_string(),
            });
        }
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key,
            value: other.to_string(),
        }),
    }
}

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Json(String),
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(message) => write!(f, "invalid coordinator config json: {message}"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for `{key}`: `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}
