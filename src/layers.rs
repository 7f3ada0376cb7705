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

//! Overlay layer store shared between the loader and the UI.
//!
//! Every layer starts out `Loading` and settles exactly once, to either
//! `Loaded` or `Failed`. Later updates for a settled layer are ignored.

use std::sync::{Arc, Mutex};

use log::warn;
use quake_feed::{Earthquake, LayerId, PlateBoundary, TimeWindow};

/// Load state of one overlay layer
#[derive(Debug, Clone, PartialEq)]
pub enum LayerState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LayerState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LayerState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LayerState::Failed(_))
    }

    /// Loaded data, if any
    pub fn data(&self) -> Option<&T> {
        match self {
            LayerState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Compact view of a layer for status display
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSummary {
    Loading,
    Loaded(usize),
    Failed(String),
}

impl<T> From<&LayerState<Arc<Vec<T>>>> for LayerSummary {
    fn from(state: &LayerState<Arc<Vec<T>>>) -> Self {
        match state {
            LayerState::Loading => LayerSummary::Loading,
            LayerState::Loaded(items) => LayerSummary::Loaded(items.len()),
            LayerState::Failed(reason) => LayerSummary::Failed(reason.clone()),
        }
    }
}

pub type QuakeLayer = LayerState<Arc<Vec<Earthquake>>>;
pub type PlateLayer = LayerState<Arc<Vec<PlateBoundary>>>;

/// All fetchable overlay layers
#[derive(Debug)]
pub struct LayerStore {
    /// Indexed by `TimeWindow` declaration order
    quakes: [QuakeLayer; 4],
    plates: PlateLayer,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    pub fn new() -> Self {
        Self {
            quakes: std::array::from_fn(|_| LayerState::Loading),
            plates: LayerState::Loading,
        }
    }

    /// Settle an earthquake layer. Returns false if it was already settled.
    pub fn set_quakes(&mut self, window: TimeWindow, result: Result<Vec<Earthquake>, String>) -> bool {
        let state = &mut self.quakes[window as usize];
        if !state.is_loading() {
            warn!("Ignoring second result for the {} layer", window.display_name());
            return false;
        }
        *state = match result {
            Ok(mut quakes) => {
                // Smallest first so large events are painted on top
                quakes.sort_by(|a, b| a.magnitude_or_zero().total_cmp(&b.magnitude_or_zero()));
                LayerState::Loaded(Arc::new(quakes))
            }
            Err(reason) => LayerState::Failed(reason),
        };
        true
    }

    /// Settle the plate boundary layer. Returns false if it was already settled.
    pub fn set_plates(&mut self, result: Result<Vec<PlateBoundary>, String>) -> bool {
        if !self.plates.is_loading() {
            warn!("Ignoring second result for the plate layer");
            return false;
        }
        self.plates = match result {
            Ok(plates) => LayerState::Loaded(Arc::new(plates)),
            Err(reason) => LayerState::Failed(reason),
        };
        true
    }

    pub fn quake_state(&self, window: TimeWindow) -> &QuakeLayer {
        &self.quakes[window as usize]
    }

    pub fn plate_state(&self) -> &PlateLayer {
        &self.plates
    }

    /// Loaded earthquakes for a window (cheap clone for rendering outside the lock)
    pub fn quakes(&self, window: TimeWindow) -> Option<Arc<Vec<Earthquake>>> {
        self.quake_state(window).data().cloned()
    }

    /// Loaded plate boundaries
    pub fn plates(&self) -> Option<Arc<Vec<PlateBoundary>>> {
        self.plates.data().cloned()
    }

    pub fn summary(&self, layer: LayerId) -> LayerSummary {
        match layer {
            LayerId::Quakes(window) => self.quake_state(window).into(),
            LayerId::Plates => (&self.plates).into(),
        }
    }

    /// Number of layers still waiting for their fetch
    pub fn pending_count(&self) -> usize {
        self.quakes.iter().filter(|s| s.is_loading()).count() + usize::from(self.plates.is_loading())
    }

    /// Number of layers whose fetch failed
    pub fn failed_count(&self) -> usize {
        self.quakes.iter().filter(|s| s.is_failed()).count() + usize::from(self.plates.is_failed())
    }
}

/// Thread-safe wrapper for LayerStore
pub type SharedLayerStore = Arc<Mutex<LayerStore>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn quake(id: &str, magnitude: f64) -> Earthquake {
        Earthquake {
            id: id.to_string(),
            magnitude: Some(magnitude),
            magnitude_type: None,
            place: "test".to_string(),
            time: None,
            longitude: 0.0,
            latitude: 0.0,
            depth_km: None,
            url: None,
            tsunami: false,
        }
    }

    #[test]
    fn test_all_layers_start_loading() {
        let store = LayerStore::new();
        assert_eq!(store.pending_count(), 5);
        assert_eq!(store.failed_count(), 0);
        for layer in LayerId::all() {
            assert_eq!(store.summary(layer), LayerSummary::Loading);
        }
        assert!(store.quakes(TimeWindow::PastHour).is_none());
    }

    #[test]
    fn test_layers_settle_once() {
        let mut store = LayerStore::new();
        assert!(store.set_quakes(TimeWindow::PastHour, Ok(vec![quake("a", 1.0)])));
        assert!(!store.set_quakes(TimeWindow::PastHour, Err("late".to_string())));
        assert_eq!(store.summary(LayerId::Quakes(TimeWindow::PastHour)), LayerSummary::Loaded(1));

        assert!(store.set_plates(Err("HTTP 404".to_string())));
        assert!(!store.set_plates(Ok(Vec::new())));
        assert_eq!(store.summary(LayerId::Plates), LayerSummary::Failed("HTTP 404".to_string()));

        assert_eq!(store.pending_count(), 3);
        assert_eq!(store.failed_count(), 1);
    }

    #[test]
    fn test_quakes_sorted_for_painting() {
        let mut store = LayerStore::new();
        store.set_quakes(
            TimeWindow::PastDay,
            Ok(vec![quake("big", 6.1), quake("small", 0.4), quake("mid", 3.2)]),
        );
        let quakes = store.quakes(TimeWindow::PastDay).unwrap();
        let ids: Vec<_> = quakes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["small", "mid", "big"]);
    }
}
