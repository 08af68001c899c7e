//! Configuration overrides.
//!
//! The gesture thresholds and animation timings ship with compiled-in
//! defaults; a TOML file passed via `--config` overrides individual values.
//!
//! ```toml
//! [gesture]
//! hold_delay_ms = 260
//! select_threshold_px = 64.0
//!
//! [animation]
//! open_ms = 120
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, RfabError};
use crate::gesture::ArbiterConfig;
use crate::render::AnimationTimings;

/// Root of the configuration file. Every field is optional; absent values
/// keep their defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub gesture: GestureSection,
    pub animation: AnimationSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GestureSection {
    pub hold_delay_ms: Option<u64>,
    pub tap_max_duration_ms: Option<u64>,
    pub tap_max_displacement_px: Option<f32>,
    pub highlight_threshold_px: Option<f32>,
    pub select_threshold_px: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSection {
    pub open_ms: Option<u64>,
    pub close_ms: Option<u64>,
}

impl AppConfig {
    /// Parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            RfabError::config(format!("cannot read {}: {err}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|err| RfabError::config(format!("cannot parse {}: {err}", path.display())))
    }

    /// Arbiter thresholds with overrides applied.
    pub fn arbiter_config(&self) -> ArbiterConfig {
        let defaults = ArbiterConfig::default();
        ArbiterConfig {
            hold_delay: self
                .gesture
                .hold_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.hold_delay),
            tap_max_duration: self
                .gesture
                .tap_max_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tap_max_duration),
            tap_max_displacement_px: self
                .gesture
                .tap_max_displacement_px
                .unwrap_or(defaults.tap_max_displacement_px),
            highlight_threshold_px: self
                .gesture
                .highlight_threshold_px
                .unwrap_or(defaults.highlight_threshold_px),
            select_threshold_px: self
                .gesture
                .select_threshold_px
                .unwrap_or(defaults.select_threshold_px),
        }
    }

    /// Animation timings with overrides applied.
    pub fn animation_timings(&self) -> AnimationTimings {
        let defaults = AnimationTimings::default();
        AnimationTimings {
            open: self
                .animation
                .open_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.open),
            close: self
                .animation
                .close_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.close),
        }
    }
}
