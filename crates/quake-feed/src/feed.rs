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

//! Catalog of the remote feeds shown on the map.

use std::fmt;
use std::str::FromStr;

/// Tectonic plate boundaries (PB2002) converted to GeoJSON by @fraxen.
pub const PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

const USGS_SUMMARY_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// USGS summary feed time windows. Each one is a separate map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeWindow {
    PastHour,
    PastDay,
    PastSevenDays,
    PastThirtyDays,
}

impl TimeWindow {
    /// All windows, shortest first.
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::PastHour,
        TimeWindow::PastDay,
        TimeWindow::PastSevenDays,
        TimeWindow::PastThirtyDays,
    ];

    /// Feed URL for all magnitudes in this window
    #[must_use]
    pub fn url(self) -> String {
        let period = match self {
            TimeWindow::PastHour => "hour",
            TimeWindow::PastDay => "day",
            TimeWindow::PastSevenDays => "week",
            TimeWindow::PastThirtyDays => "month",
        };
        format!("{USGS_SUMMARY_BASE}/all_{period}.geojson")
    }

    /// Human-readable name for the layer control
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            TimeWindow::PastHour => "Past Hour",
            TimeWindow::PastDay => "Past Day",
            TimeWindow::PastSevenDays => "Past 7 Days",
            TimeWindow::PastThirtyDays => "Past 30 Days",
        }
    }

    /// Stable key used in the config file and on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::PastHour => "hour",
            TimeWindow::PastDay => "day",
            TimeWindow::PastSevenDays => "week",
            TimeWindow::PastThirtyDays => "month",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" | "1h" => Ok(TimeWindow::PastHour),
            "day" | "1d" => Ok(TimeWindow::PastDay),
            "week" | "7d" => Ok(TimeWindow::PastSevenDays),
            "month" | "30d" => Ok(TimeWindow::PastThirtyDays),
            _ => Err(format!("unknown time window '{s}' (expected hour, day, week or month)")),
        }
    }
}

/// One of the fetchable overlay layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Quakes(TimeWindow),
    Plates,
}

impl LayerId {
    /// Every fetchable layer: the four time windows, then the plates.
    #[must_use]
    pub fn all() -> Vec<LayerId> {
        TimeWindow::ALL
            .iter()
            .map(|w| LayerId::Quakes(*w))
            .chain(std::iter::once(LayerId::Plates))
            .collect()
    }

    #[must_use]
    pub fn url(self) -> String {
        match self {
            LayerId::Quakes(window) => window.url(),
            LayerId::Plates => PLATES_URL.to_string(),
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            LayerId::Quakes(window) => window.display_name(),
            LayerId::Plates => "Tectonic Plates",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_urls() {
        assert_eq!(
            TimeWindow::PastHour.url(),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson"
        );
        assert!(TimeWindow::PastSevenDays.url().ends_with("/all_week.geojson"));
        assert!(TimeWindow::PastThirtyDays.url().ends_with("/all_month.geojson"));
    }

    #[test]
    fn test_window_key_roundtrip() {
        for window in TimeWindow::ALL {
            assert_eq!(window.as_str().parse::<TimeWindow>(), Ok(window));
        }
        assert_eq!("7D".parse::<TimeWindow>(), Ok(TimeWindow::PastSevenDays));
        assert!("year".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_unknown_window_error_keeps_input() {
        let err = "YEAR".parse::<TimeWindow>().unwrap_err();
        assert!(err.contains("'YEAR'"));
    }

    #[test]
    fn test_layer_ids() {
        let layers = LayerId::all();
        assert_eq!(layers.len(), 5);
        assert_eq!(layers[0], LayerId::Quakes(TimeWindow::PastHour));
        assert_eq!(layers[4], LayerId::Plates);
        assert_eq!(LayerId::Plates.url(), PLATES_URL);
        assert_eq!(LayerId::Quakes(TimeWindow::PastDay).display_name(), "Past Day");
    }
}
