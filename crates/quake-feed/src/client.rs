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

//! Async HTTP client for the GeoJSON feeds.
//!
//! Every request is a single attempt. A failed fetch is reported to the
//! caller and never retried.

use std::time::Duration;

use log::{debug, info};

use crate::feed::{TimeWindow, PLATES_URL};
use crate::geojson::{parse_collection, FeatureCollection};
use crate::quake::{earthquakes, plate_boundaries, Earthquake, PlateBoundary};
use crate::FeedError;

/// Configuration for [`FeedClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Total time allowed per request, including the body download.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: format!("quake-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches and decodes the remote feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { http })
    }

    /// GET a URL and decode the body as a FeatureCollection.
    pub async fn fetch_collection(&self, url: &str) -> Result<FeatureCollection, FeedError> {
        debug!("Fetching {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let collection = parse_collection(&bytes)?;
        info!("Fetched {} features ({} bytes) from {}", collection.len(), bytes.len(), url);
        Ok(collection)
    }

    /// Fetch the earthquakes for one time window.
    pub async fn fetch_earthquakes(&self, window: TimeWindow) -> Result<Vec<Earthquake>, FeedError> {
        let collection = self.fetch_collection(&window.url()).await?;
        Ok(earthquakes(&collection))
    }

    /// Fetch the tectonic plate boundaries.
    pub async fn fetch_plates(&self) -> Result<Vec<PlateBoundary>, FeedError> {
        let collection = self.fetch_collection(PLATES_URL).await?;
        Ok(plate_boundaries(&collection))
    }
}
