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

//! Conversion of GeoJSON features into earthquake events and plate boundaries.

use chrono::{DateTime, TimeZone, Utc};
use log::debug;

use crate::geojson::{lon_lat, Feature, FeatureCollection, Geometry};
use crate::style::{magnitude_color, marker_radius, MarkerScale};

/// A single earthquake event from the USGS feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    /// USGS event id (e.g. "ci40000001")
    pub id: String,

    /// Magnitude, absent for some preliminary events
    pub magnitude: Option<f64>,

    /// Magnitude type (ml, md, mb, mww, ...)
    pub magnitude_type: Option<String>,

    /// Textual location description
    pub place: String,

    /// Origin time
    pub time: Option<DateTime<Utc>>,

    pub longitude: f64,
    pub latitude: f64,

    /// Hypocenter depth in km
    pub depth_km: Option<f64>,

    /// USGS event page
    pub url: Option<String>,

    /// Whether a tsunami flag was raised for this event
    pub tsunami: bool,
}

impl Earthquake {
    /// Build an event from a Point feature.
    ///
    /// Returns `None` when the feature has no geometry, is not a Point, or the
    /// point has fewer than two coordinates.
    #[must_use]
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let Some(Geometry::Point { coordinates }) = &feature.geometry else {
            return None;
        };
        let (longitude, latitude) = lon_lat(coordinates)?;

        let time = feature
            .property("time")
            .and_then(serde_json::Value::as_i64)
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single());

        Some(Self {
            id: feature.id_string().unwrap_or_default(),
            magnitude: feature.f64_property("mag"),
            magnitude_type: feature.str_property("magType").map(str::to_owned),
            place: feature.str_property("place").unwrap_or("Unknown location").to_owned(),
            time,
            longitude,
            latitude,
            depth_km: coordinates.get(2).copied(),
            url: feature.str_property("url").map(str::to_owned),
            tsunami: feature.property("tsunami").and_then(serde_json::Value::as_i64).unwrap_or(0) != 0,
        })
    }

    /// Magnitude with unknown treated as zero
    #[must_use]
    pub fn magnitude_or_zero(&self) -> f64 {
        self.magnitude.unwrap_or(0.0)
    }

    /// Marker fill color
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        magnitude_color(self.magnitude_or_zero())
    }

    /// Marker radius in the given scale
    #[must_use]
    pub fn radius(&self, scale: MarkerScale) -> f64 {
        marker_radius(self.magnitude_or_zero(), scale)
    }

    /// Short "M4.2 (mb)" style label
    #[must_use]
    pub fn magnitude_label(&self) -> String {
        match (self.magnitude, self.magnitude_type.as_deref()) {
            (Some(mag), Some(kind)) => format!("M{mag:.1} ({kind})"),
            (Some(mag), None) => format!("M{mag:.1}"),
            (None, _) => "M?".to_string(),
        }
    }
}

/// Extract every convertible earthquake from a collection, preserving order.
#[must_use]
pub fn earthquakes(collection: &FeatureCollection) -> Vec<Earthquake> {
    let quakes: Vec<Earthquake> = collection.features.iter().filter_map(Earthquake::from_feature).collect();

    let skipped = collection.len() - quakes.len();
    if skipped > 0 {
        debug!("Skipped {} features without point geometry", skipped);
    }
    quakes
}

/// A tectonic plate boundary segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundary {
    /// Boundary name from the dataset (e.g. "AF-AN")
    pub name: Option<String>,

    /// Polylines of `(lon, lat)` pairs
    pub lines: Vec<Vec<(f64, f64)>>,
}

impl PlateBoundary {
    /// Build a boundary from any line-like feature. Returns `None` if it has
    /// no drawable line (fewer than two points).
    #[must_use]
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let lines: Vec<_> = feature
            .geometry
            .as_ref()?
            .polylines()
            .into_iter()
            .filter(|line| line.len() >= 2)
            .collect();

        if lines.is_empty() {
            return None;
        }

        Some(Self {
            name: feature.str_property("Name").map(str::to_owned),
            lines,
        })
    }
}

/// Extract drawable plate boundaries from a collection.
#[must_use]
pub fn plate_boundaries(collection: &FeatureCollection) -> Vec<PlateBoundary> {
    collection.features.iter().filter_map(PlateBoundary::from_feature).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::parse_collection;

    const QUAKES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "us6000abcd",
                "properties": {
                    "mag": 5.4, "magType": "mww", "place": "50 km S of Nikolski, Alaska",
                    "time": 1700000000000, "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us6000abcd",
                    "tsunami": 1
                },
                "geometry": {"type": "Point", "coordinates": [-168.9, 52.5, 35.0]}
            },
            {
                "type": "Feature",
                "id": "nc000001",
                "properties": {"mag": null, "place": null, "time": null},
                "geometry": {"type": "Point", "coordinates": [-122.8, 38.8]}
            },
            {
                "type": "Feature",
                "id": "bad",
                "properties": {"mag": 2.0},
                "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
            }
        ]
    }"#;

    #[test]
    fn test_earthquakes_from_collection() {
        let collection = parse_collection(QUAKES.as_bytes()).unwrap();
        let quakes = earthquakes(&collection);
        assert_eq!(quakes.len(), 2);

        let big = &quakes[0];
        assert_eq!(big.id, "us6000abcd");
        assert_eq!(big.magnitude, Some(5.4));
        assert_eq!(big.depth_km, Some(35.0));
        assert!(big.tsunami);
        assert_eq!(big.time.map(|t| t.timestamp()), Some(1_700_000_000));
        assert_eq!(big.color(), (255, 0, 0));
        assert!((big.radius(MarkerScale::Pixels) - 10.8).abs() < 1e-9);
        assert_eq!(big.magnitude_label(), "M5.4 (mww)");
    }

    #[test]
    fn test_missing_properties_use_defaults() {
        let collection = parse_collection(QUAKES.as_bytes()).unwrap();
        let quakes = earthquakes(&collection);
        let sparse = &quakes[1];
        assert_eq!(sparse.place, "Unknown location");
        assert!(sparse.time.is_none());
        assert!(sparse.depth_km.is_none());
        assert_eq!(sparse.color(), (0, 255, 0));
        assert_eq!(sparse.radius(MarkerScale::Meters), 0.0);
        assert_eq!(sparse.magnitude_label(), "M?");
    }

    #[test]
    fn test_plate_boundaries() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"Name": "AF-AN"},
                 "geometry": {"type": "LineString", "coordinates": [[-0.4, -54.8], [0.0, -54.9], [1.2, -54.6]]}},
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "LineString", "coordinates": [[3.0, 3.0]]}},
                {"type": "Feature", "properties": {"Name": "quake"},
                 "geometry": {"type": "Point", "coordinates": [3.0, 3.0]}}
            ]
        }"#;
        let collection = parse_collection(json.as_bytes()).unwrap();
        let plates = plate_boundaries(&collection);
        assert_eq!(plates.len(), 1);
        assert_eq!(plates[0].name.as_deref(), Some("AF-AN"));
        assert_eq!(plates[0].lines[0].len(), 3);
    }
}
