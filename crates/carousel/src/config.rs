//! Widget configuration.
//!
//! [`CarouselConfig`] is the raw, user-facing option set (camelCase keys, the
//! same shape whether it arrives as JSON or TOML). [`CarouselConfig::validate`]
//! turns it into [`CarouselSettings`], which is what an instance keeps.

use css::{SelectorError, SelectorList, parse_selector_list};
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    /// Matcher for the items to rotate, evaluated against the container's descendants.
    pub selector: Option<String>,
    /// Auto-advance interval in milliseconds; `0` disables the timer.
    pub auto_rotate_speed: u64,
    /// Fixed height in px applied to the rotation track.
    pub height: f32,
}

impl CarouselConfig {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    pub fn with_auto_rotate_speed(mut self, millis: u64) -> Self {
        self.auto_rotate_speed = millis;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<CarouselSettings, ConfigError> {
        let source = self
            .selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSelector)?;
        let selector = parse_selector_list(source).map_err(ConfigError::InvalidSelector)?;
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        Ok(CarouselSettings {
            selector,
            selector_source: source.to_string(),
            auto_rotate_speed: self.auto_rotate_speed,
            height: self.height,
        })
    }
}

/// Validated configuration held by an instance.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselSettings {
    pub selector: SelectorList,
    pub selector_source: String,
    pub auto_rotate_speed: u64,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingSelector,
    InvalidSelector(SelectorError),
    InvalidHeight(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingSelector => f.write_str("no selector specified"),
            ConfigError::InvalidSelector(err) => write!(f, "{err}"),
            ConfigError::InvalidHeight(h) => write!(f, "height must be a non-negative number, got {h}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidSelector(err) => Some(err),
            _ => None,
        }
    }
}
