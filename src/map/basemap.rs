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

//! Base map tile sources.
//!
//! Each base map is served by Mapbox when an access token is available and
//! by a keyless provider (CARTO basemaps, Esri World Imagery) otherwise.

use std::collections::HashMap;
use std::path::PathBuf;

use eframe::egui;
use log::info;
use serde::{Deserialize, Serialize};
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId};

const MAPBOX_MAX_ZOOM: u8 = 18;

/// Selectable base map styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseMap {
    Light,
    #[default]
    Dark,
    Satellite,
}

impl BaseMap {
    pub const ALL: [BaseMap; 3] = [BaseMap::Light, BaseMap::Dark, BaseMap::Satellite];

    /// Human-readable name for the layer control
    pub fn display_name(self) -> &'static str {
        match self {
            BaseMap::Light => "Light Map",
            BaseMap::Dark => "Dark Map",
            BaseMap::Satellite => "Satellite",
        }
    }

    /// Mapbox style id
    pub fn mapbox_style(self) -> &'static str {
        match self {
            BaseMap::Light => "light-v10",
            BaseMap::Dark => "dark-v10",
            BaseMap::Satellite => "satellite-streets-v11",
        }
    }

    /// Stable key, used for cache directories and the command line
    pub fn as_str(self) -> &'static str {
        match self {
            BaseMap::Light => "light",
            BaseMap::Dark => "dark",
            BaseMap::Satellite => "satellite",
        }
    }

    /// Whether overlays should use light text and outlines on this map
    pub fn is_dark(self) -> bool {
        !matches!(self, BaseMap::Light)
    }
}

impl std::str::FromStr for BaseMap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseMap::ALL
            .into_iter()
            .find(|base| base.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown base map '{s}' (expected light, dark or satellite)"))
    }
}

/// Tile source for one base map
#[derive(Debug, Clone)]
pub struct BaseMapSource {
    base: BaseMap,
    mapbox_token: Option<String>,
}

impl BaseMapSource {
    pub fn new(base: BaseMap, mapbox_token: Option<String>) -> Self {
        Self { base, mapbox_token }
    }
}

impl TileSource for BaseMapSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        if let Some(token) = &self.mapbox_token {
            return format!(
                "https://api.mapbox.com/styles/v1/mapbox/{}/tiles/256/{}/{}/{}?access_token={}",
                self.base.mapbox_style(),
                tile_id.zoom,
                tile_id.x,
                tile_id.y,
                token
            );
        }

        match self.base {
            BaseMap::Light | BaseMap::Dark => {
                // Subdomain load balancing (a, b, c, d) based on tile coordinates
                let subdomain = ['a', 'b', 'c', 'd'][((tile_id.x + tile_id.y) % 4) as usize];
                let style = if self.base == BaseMap::Light { "light_all" } else { "dark_all" };
                format!(
                    "https://{}.basemaps.cartocdn.com/{}/{}/{}/{}.png",
                    subdomain, style, tile_id.zoom, tile_id.x, tile_id.y
                )
            }
            // Esri orders the path as z/y/x
            BaseMap::Satellite => format!(
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{}/{}/{}",
                tile_id.zoom, tile_id.y, tile_id.x
            ),
        }
    }

    fn attribution(&self) -> Attribution {
        if self.mapbox_token.is_some() {
            return Attribution {
                text: "Map data © OpenStreetMap contributors, CC-BY-SA, Imagery © Mapbox",
                url: "https://www.mapbox.com/about/maps/",
                logo_light: None,
                logo_dark: None,
            };
        }

        match self.base {
            BaseMap::Light | BaseMap::Dark => Attribution {
                text: "© OpenStreetMap contributors, © CARTO",
                url: "https://carto.com/attributions",
                logo_light: None,
                logo_dark: None,
            },
            BaseMap::Satellite => Attribution {
                text: "Tiles © Esri, Maxar, Earthstar Geographics",
                url: "https://www.esri.com/",
                logo_light: None,
                logo_dark: None,
            },
        }
    }

    fn max_zoom(&self) -> u8 {
        MAPBOX_MAX_ZOOM
    }
}

/// Lazily created tile fetchers, one per base map
pub struct BaseMaps {
    tiles: HashMap<BaseMap, HttpTiles>,
    mapbox_token: Option<String>,
}

impl std::fmt::Debug for BaseMaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseMaps")
            .field("loaded", &self.tiles.keys().collect::<Vec<_>>())
            .field("mapbox", &self.mapbox_token.is_some())
            .finish()
    }
}

impl BaseMaps {
    pub fn new(mapbox_token: Option<String>) -> Self {
        if mapbox_token.is_some() {
            info!("Using Mapbox base map tiles");
        } else {
            info!("No Mapbox token, using CARTO and Esri base map tiles");
        }

        Self {
            tiles: HashMap::new(),
            mapbox_token,
        }
    }

    /// Attribution for the given base map
    pub fn attribution(&self, base: BaseMap) -> Attribution {
        BaseMapSource::new(base, self.mapbox_token.clone()).attribution()
    }

    /// Get or create the tile fetcher for a base map
    pub fn get_or_create(&mut self, base: BaseMap, ctx: &egui::Context) -> &mut HttpTiles {
        let token = self.mapbox_token.clone();
        self.tiles.entry(base).or_insert_with(|| {
            let http_options = HttpOptions {
                cache: Some(cache_dir(base)),
                ..Default::default()
            };
            HttpTiles::with_options(BaseMapSource::new(base, token), http_options, ctx.clone())
        })
    }
}

fn cache_dir(base: BaseMap) -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("quakemap-desktop")
        .join("tiles")
        .join(base.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapbox_urls() {
        let source = BaseMapSource::new(BaseMap::Satellite, Some("pk.test".to_string()));
        assert_eq!(
            source.tile_url(TileId { x: 1, y: 2, zoom: 3 }),
            "https://api.mapbox.com/styles/v1/mapbox/satellite-streets-v11/tiles/256/3/1/2?access_token=pk.test"
        );
    }

    #[test]
    fn test_keyless_urls() {
        let dark = BaseMapSource::new(BaseMap::Dark, None);
        assert_eq!(
            dark.tile_url(TileId { x: 1, y: 2, zoom: 3 }),
            "https://d.basemaps.cartocdn.com/dark_all/3/1/2.png"
        );

        let light = BaseMapSource::new(BaseMap::Light, None);
        assert!(light.tile_url(TileId { x: 0, y: 0, zoom: 0 }).contains("/light_all/0/0/0.png"));

        let satellite = BaseMapSource::new(BaseMap::Satellite, None);
        assert!(satellite
            .tile_url(TileId { x: 5, y: 7, zoom: 4 })
            .ends_with("/World_Imagery/MapServer/tile/4/7/5"));
    }

    #[test]
    fn test_base_map_names() {
        assert_eq!(BaseMap::default(), BaseMap::Dark);
        assert_eq!("Satellite".parse::<BaseMap>(), Ok(BaseMap::Satellite));
        assert!("terrain".parse::<BaseMap>().is_err());
        let names: Vec<_> = BaseMap::ALL.iter().map(|b| b.display_name()).collect();
        assert_eq!(names, ["Light Map", "Dark Map", "Satellite"]);
    }
}
