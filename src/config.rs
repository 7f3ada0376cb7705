// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration management.
//!
//! Preferences are persisted as TOML through confy: the selected base map,
//! the active earthquake time window, overlay visibility, marker scaling and
//! the initial view. A Mapbox access token can be stored here, but the
//! `MAPBOX_ACCESS_TOKEN` environment variable takes precedence.

use log::info;
use quake_feed::{MarkerScale, TimeWindow};
use serde::{Deserialize, Serialize};

use crate::map::BaseMap;

const APP_NAME: &str = "quakemap-desktop";
const CONFIG_NAME: &str = "config";

/// Environment variable holding the Mapbox access token
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Initial map center (western North America)
pub const DEFAULT_CENTER: (f64, f64) = (47.047_947_1, -121.205_465_6);

/// Initial zoom level (continent scale)
pub const DEFAULT_ZOOM: f64 = 3.0;

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Base tile style shown on startup
    #[serde(default)]
    pub base_map: BaseMap,

    /// Active earthquake layer: "hour", "day", "week", "month" or "none"
    #[serde(default = "default_active_window")]
    pub active_window: String,

    /// Show tectonic plate boundaries
    #[serde(default = "default_true")]
    pub show_plates: bool,

    /// Show the magnitude legend
    #[serde(default = "default_true")]
    pub show_legend: bool,

    /// Marker radius unit: "pixels" or "meters"
    #[serde(default = "default_marker_scale")]
    pub marker_scale: String,

    /// Initial map center latitude
    #[serde(default = "default_center_lat")]
    pub center_latitude: f64,

    /// Initial map center longitude
    #[serde(default = "default_center_lon")]
    pub center_longitude: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Mapbox access token (optional, env var takes precedence)
    #[serde(default)]
    pub mapbox_access_token: Option<String>,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_active_window() -> String {
    TimeWindow::PastDay.as_str().to_string()
}

fn default_true() -> bool {
    true
}

fn default_marker_scale() -> String {
    MarkerScale::default().as_str().to_string()
}

fn default_center_lat() -> f64 {
    DEFAULT_CENTER.0
}

fn default_center_lon() -> f64 {
    DEFAULT_CENTER.1
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            base_map: BaseMap::default(),
            active_window: default_active_window(),
            show_plates: true,
            show_legend: true,
            marker_scale: default_marker_scale(),
            center_latitude: DEFAULT_CENTER.0,
            center_longitude: DEFAULT_CENTER.1,
            default_zoom: DEFAULT_ZOOM,
            mapbox_access_token: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating it with defaults if missing
    pub fn load() -> Result<Self, confy::ConfyError> {
        let config: AppConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        info!("Loaded configuration (version {})", config.config_version);
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Overwrite the stored configuration with defaults
    pub fn reset() -> Result<Self, confy::ConfyError> {
        let config = Self::default();
        config.save()?;
        info!("Configuration reset to defaults");
        Ok(config)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Active time window. "none" hides all earthquake layers; unknown
    /// values fall back to the past day.
    #[must_use]
    pub fn active_window(&self) -> Option<TimeWindow> {
        if self.active_window.eq_ignore_ascii_case("none") {
            return None;
        }
        Some(self.active_window.parse().unwrap_or(TimeWindow::PastDay))
    }

    pub fn set_active_window(&mut self, window: Option<TimeWindow>) {
        self.active_window = window.map_or("none", TimeWindow::as_str).to_string();
    }

    /// Marker scale, falling back to pixels for unknown values
    #[must_use]
    pub fn marker_scale(&self) -> MarkerScale {
        MarkerScale::parse(&self.marker_scale).unwrap_or_default()
    }

    pub fn set_marker_scale(&mut self, scale: MarkerScale) {
        self.marker_scale = scale.as_str().to_string();
    }

    /// Resolve the Mapbox token from the environment or this config
    #[must_use]
    pub fn mapbox_token(&self) -> Option<String> {
        resolve_mapbox_token(
            std::env::var(MAPBOX_TOKEN_ENV).ok(),
            self.mapbox_access_token.as_deref(),
        )
    }
}

/// Pick the environment token if set, else the configured one. Empty strings
/// count as unset.
#[must_use]
pub fn resolve_mapbox_token(env_value: Option<String>, config_value: Option<&str>) -> Option<String> {
    env_value
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config_value.map(str::to_string).filter(|key| !key.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_map, BaseMap::Dark);
        assert_eq!(config.active_window(), Some(TimeWindow::PastDay));
        assert_eq!(config.marker_scale(), MarkerScale::Pixels);
        assert!(config.show_plates);
        assert!((config.default_zoom - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_active_window_parsing() {
        let mut config = AppConfig::default();

        config.set_active_window(Some(TimeWindow::PastThirtyDays));
        assert_eq!(config.active_window, "month");
        assert_eq!(config.active_window(), Some(TimeWindow::PastThirtyDays));

        config.set_active_window(None);
        assert_eq!(config.active_window(), None);

        config.active_window = "fortnight".to_string();
        assert_eq!(config.active_window(), Some(TimeWindow::PastDay));
    }

    #[test]
    fn test_marker_scale_fallback() {
        let mut config = AppConfig::default();
        config.set_marker_scale(MarkerScale::Meters);
        assert_eq!(config.marker_scale(), MarkerScale::Meters);

        config.marker_scale = "furlongs".to_string();
        assert_eq!(config.marker_scale(), MarkerScale::Pixels);
    }

    #[test]
    fn test_token_resolution_prefers_env() {
        assert_eq!(
            resolve_mapbox_token(Some("env".to_string()), Some("cfg")).as_deref(),
            Some("env")
        );
        assert_eq!(
            resolve_mapbox_token(Some("  ".to_string()), Some("cfg")).as_deref(),
            Some("cfg")
        );
        assert_eq!(resolve_mapbox_token(None, Some("")), None);
        assert_eq!(resolve_mapbox_token(None, None), None);
    }
}
