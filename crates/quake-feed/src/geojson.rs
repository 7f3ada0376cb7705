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

//! Serde model for GeoJSON FeatureCollections.
//!
//! Only the parts the map needs are modelled. Unknown members are ignored,
//! and feature properties are kept as raw JSON so each consumer can pick the
//! fields it understands.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::FeedError;

/// A GeoJSON position: `[longitude, latitude]` with optional extra members
/// (USGS puts the hypocenter depth in km third).
pub type Position = Vec<f64>;

/// GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Flatten line-like geometry into polylines of `(lon, lat)` pairs.
    ///
    /// Polygons contribute their rings. Points contribute nothing.
    #[must_use]
    pub fn polylines(&self) -> Vec<Vec<(f64, f64)>> {
        fn line(positions: &[Position]) -> Vec<(f64, f64)> {
            positions.iter().filter_map(|p| lon_lat(p)).collect()
        }

        match self {
            Geometry::Point { .. } | Geometry::MultiPoint { .. } => Vec::new(),
            Geometry::LineString { coordinates } => vec![line(coordinates)],
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                coordinates.iter().map(|l| line(l)).collect()
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|polygon| polygon.iter().map(|ring| line(ring)))
                .collect(),
            Geometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(Geometry::polylines).collect()
            }
        }
    }
}

/// Extract `(lon, lat)` from a position, `None` if it has fewer than two members.
#[must_use]
pub fn lon_lat(position: &[f64]) -> Option<(f64, f64)> {
    match position {
        [lon, lat, ..] => Some((*lon, *lat)),
        _ => None,
    }
}

/// One GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Get a property value by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(name).filter(|v| !v.is_null())
    }

    /// Get a string property
    #[must_use]
    pub fn str_property(&self, name: &str) -> Option<&str> {
        self.property(name).and_then(Value::as_str)
    }

    /// Get a numeric property
    #[must_use]
    pub fn f64_property(&self, name: &str) -> Option<f64> {
        self.property(name).and_then(Value::as_f64)
    }

    /// Feature id as a string, whether it was encoded as a string or a number
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// USGS feed metadata block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metadata {
    /// Generation time, epoch milliseconds
    #[serde(default)]
    pub generated: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub count: Option<u64>,
}

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureCollection {
    /// Required, so an arbitrary JSON object is not mistaken for an empty feed
    pub features: Vec<Feature>,

    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl FeatureCollection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Decode a FeatureCollection from raw JSON bytes.
pub fn parse_collection(bytes: &[u8]) -> Result<FeatureCollection, FeedError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USGS_SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1700000000000,
            "url": "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson",
            "title": "USGS All Earthquakes, Past Hour",
            "status": 200,
            "api": "1.10.3",
            "count": 2
        },
        "features": [
            {
                "type": "Feature",
                "properties": {"mag": 1.3, "place": "10km NE of Anza, CA", "time": 1699999000000},
                "geometry": {"type": "Point", "coordinates": [-116.6, 33.6, 12.4]},
                "id": "ci40000001"
            },
            {
                "type": "Feature",
                "properties": {"mag": null, "place": "somewhere"},
                "geometry": null,
                "id": "us7000xxxx"
            }
        ],
        "bbox": [-116.6, 33.6, 12.4, -116.6, 33.6, 12.4]
    }"#;

    #[test]
    fn test_parse_usgs_collection() {
        let collection = parse_collection(USGS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(collection.len(), 2);

        let metadata = collection.metadata.as_ref().unwrap();
        assert_eq!(metadata.count, Some(2));
        assert_eq!(metadata.generated, Some(1_700_000_000_000));

        let first = &collection.features[0];
        assert_eq!(first.id_string().as_deref(), Some("ci40000001"));
        assert_eq!(first.f64_property("mag"), Some(1.3));
        assert_eq!(first.str_property("place"), Some("10km NE of Anza, CA"));
        assert!(matches!(
            &first.geometry,
            Some(Geometry::Point { coordinates }) if coordinates.len() == 3
        ));

        let second = &collection.features[1];
        assert!(second.geometry.is_none());
        assert!(second.f64_property("mag").is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let result = parse_collection(b"{\"features\": [");
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_parse_requires_features() {
        assert!(matches!(parse_collection(b"{}"), Err(FeedError::Parse(_))));
        let error_body = br#"{"type": "Error", "message": "service unavailable"}"#;
        assert!(matches!(parse_collection(error_body), Err(FeedError::Parse(_))));

        let empty = parse_collection(br#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_polylines_from_line_geometries() {
        let json = r#"{"type": "MultiLineString", "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3], [4]]]}"#;
        let geometry: Geometry = serde_json::from_str(json).unwrap();
        let lines = geometry.polylines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![(0.0, 0.0), (1.0, 1.0)]);
        // The one-member position is dropped
        assert_eq!(lines[1].len(), 2);

        let point: Geometry = serde_json::from_str(r#"{"type": "Point", "coordinates": [5, 5]}"#).unwrap();
        assert!(point.polylines().is_empty());
    }

    #[test]
    fn test_numeric_feature_id() {
        let feature: Feature = serde_json::from_str(r#"{"type": "Feature", "id": 42, "properties": null, "geometry": null}"#).unwrap();
        assert_eq!(feature.id_string().as_deref(), Some("42"));
        assert!(feature.property("anything").is_none());
    }
}
