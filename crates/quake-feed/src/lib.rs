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

//! Earthquake feed library for fetching and styling USGS GeoJSON feeds.
//!
//! The crate is split into small layers that can be used independently:
//!
//! - **Feed catalog**: the four USGS summary time windows and the tectonic
//!   plate boundary dataset
//! - **GeoJSON model**: serde types for FeatureCollections
//! - **Event extraction**: turns features into [`Earthquake`] and
//!   [`PlateBoundary`] values
//! - **Styling**: magnitude to color and magnitude to radius rules
//! - **Client**: async HTTP fetching with [`FeedClient`]
//!
//! # Quick Start
//!
//! ```no_run
//! use quake_feed::{FeedClient, TimeWindow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quake_feed::FeedError> {
//!     let client = FeedClient::new()?;
//!     let quakes = client.fetch_earthquakes(TimeWindow::PastDay).await?;
//!     for quake in &quakes {
//!         println!("M{:.1} {}", quake.magnitude.unwrap_or(0.0), quake.place);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Styling Only
//!
//! ```
//! use quake_feed::style::{magnitude_color, marker_radius, MarkerScale};
//!
//! assert_eq!(magnitude_color(5.2), (255, 0, 0));
//! assert_eq!(marker_radius(3.0, MarkerScale::Pixels), 6.0);
//! ```

pub mod client;
pub mod feed;
pub mod geojson;
pub mod quake;
pub mod style;

use thiserror::Error;

pub use client::{ClientConfig, FeedClient};
pub use feed::{LayerId, TimeWindow, PLATES_URL};
pub use geojson::{parse_collection, Feature, FeatureCollection, Geometry};
pub use quake::{earthquakes, plate_boundaries, Earthquake, PlateBoundary};
pub use style::{magnitude_color, marker_radius, MagnitudeBin, MarkerScale, LEGEND_BINS};

/// Errors that can occur while fetching or decoding a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("invalid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
}
