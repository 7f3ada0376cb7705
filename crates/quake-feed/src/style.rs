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

//! Magnitude styling rules shared by the map markers and the legend.

/// Plate boundary stroke color (orange).
pub const PLATE_STROKE_COLOR: (u8, u8, u8) = (255, 165, 0);

/// Plate boundary stroke width in pixels.
pub const PLATE_STROKE_WEIGHT: f32 = 1.0;

/// Marker fill opacity (0.0 - 1.0).
pub const MARKER_FILL_OPACITY: f32 = 0.8;

/// Marker outline width in pixels.
pub const MARKER_OUTLINE_WEIGHT: f32 = 1.0;

/// Unit in which marker radii are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerScale {
    /// Geographic circle, radius in meters. Grows with the map zoom.
    Meters,
    /// Screen-space circle, radius in pixels. Constant across zoom levels.
    #[default]
    Pixels,
}

impl MarkerScale {
    /// Multiplier applied to the magnitude.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            MarkerScale::Meters => 10_000.0,
            MarkerScale::Pixels => 2.0,
        }
    }

    /// Stable identifier used in the config file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerScale::Meters => "meters",
            MarkerScale::Pixels => "pixels",
        }
    }

    /// Parse the config identifier, case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "meters" => Some(MarkerScale::Meters),
            "pixels" => Some(MarkerScale::Pixels),
            _ => None,
        }
    }
}

/// Map a magnitude to its marker color.
///
/// Six fixed bins, lower bound inclusive, checked from the highest down.
/// Anything below 1 (including negative magnitudes and NaN) is green.
#[must_use]
pub fn magnitude_color(magnitude: f64) -> (u8, u8, u8) {
    if magnitude >= 5.0 {
        (255, 0, 0) // Red
    } else if magnitude >= 4.0 {
        (255, 69, 0) // Orange-red
    } else if magnitude >= 3.0 {
        (255, 165, 0) // Orange
    } else if magnitude >= 2.0 {
        (255, 210, 127) // Light orange
    } else if magnitude >= 1.0 {
        (255, 255, 0) // Yellow
    } else {
        (0, 255, 0) // Green
    }
}

/// Map a magnitude to a marker radius in the given scale.
///
/// Linear in the magnitude. Negative and NaN magnitudes have no radius.
#[must_use]
pub fn marker_radius(magnitude: f64, scale: MarkerScale) -> f64 {
    if magnitude.is_nan() || magnitude <= 0.0 {
        return 0.0;
    }
    magnitude * scale.factor()
}

/// One row of the magnitude legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeBin {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound, `None` for the open top bin.
    pub upper: Option<f64>,
    pub label: &'static str,
}

impl MagnitudeBin {
    /// Color for magnitudes in this bin.
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        magnitude_color(self.lower)
    }

    /// Whether the magnitude falls in this bin.
    #[must_use]
    pub fn contains(&self, magnitude: f64) -> bool {
        magnitude >= self.lower && self.upper.map_or(true, |upper| magnitude < upper)
    }
}

/// Legend bins in ascending order.
pub const LEGEND_BINS: [MagnitudeBin; 6] = [
    MagnitudeBin { lower: 0.0, upper: Some(1.0), label: "0-1" },
    MagnitudeBin { lower: 1.0, upper: Some(2.0), label: "1-2" },
    MagnitudeBin { lower: 2.0, upper: Some(3.0), label: "2-3" },
    MagnitudeBin { lower: 3.0, upper: Some(4.0), label: "3-4" },
    MagnitudeBin { lower: 4.0, upper: Some(5.0), label: "4-5" },
    MagnitudeBin { lower: 5.0, upper: None, label: "5+" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bins_are_lower_bound_inclusive() {
        assert_eq!(magnitude_color(5.0), (255, 0, 0));
        assert_eq!(magnitude_color(4.999), (255, 69, 0));
        assert_eq!(magnitude_color(4.0), (255, 69, 0));
        assert_eq!(magnitude_color(3.0), (255, 165, 0));
        assert_eq!(magnitude_color(2.0), (255, 210, 127));
        assert_eq!(magnitude_color(1.0), (255, 255, 0));
        assert_eq!(magnitude_color(0.99), (0, 255, 0));
    }

    #[test]
    fn test_color_out_of_range() {
        assert_eq!(magnitude_color(9.1), (255, 0, 0));
        assert_eq!(magnitude_color(-1.2), (0, 255, 0));
        assert_eq!(magnitude_color(f64::NAN), (0, 255, 0));
    }

    #[test]
    fn test_radius_scales_linearly() {
        assert!((marker_radius(3.5, MarkerScale::Pixels) - 7.0).abs() < f64::EPSILON);
        assert!((marker_radius(3.5, MarkerScale::Meters) - 35_000.0).abs() < f64::EPSILON);
        assert_eq!(marker_radius(0.0, MarkerScale::Pixels), 0.0);
    }

    #[test]
    fn test_radius_is_monotonic() {
        let mut previous = 0.0;
        for step in -20..100 {
            let radius = marker_radius(f64::from(step) / 10.0, MarkerScale::Pixels);
            assert!(radius >= previous);
            previous = radius;
        }
        assert_eq!(marker_radius(f64::NAN, MarkerScale::Meters), 0.0);
    }

    #[test]
    fn test_legend_bins_match_color_rule() {
        for bin in &LEGEND_BINS {
            let probe = bin.lower + 0.5;
            assert!(bin.contains(probe));
            assert_eq!(bin.color(), magnitude_color(probe));
        }
        assert_eq!(LEGEND_BINS.iter().filter(|b| b.contains(7.0)).count(), 1);
    }

    #[test]
    fn test_marker_scale_parse() {
        assert_eq!(MarkerScale::parse("Meters"), Some(MarkerScale::Meters));
        assert_eq!(MarkerScale::parse(MarkerScale::Pixels.as_str()), Some(MarkerScale::Pixels));
        assert_eq!(MarkerScale::parse("degrees"), None);
    }
}
