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

//! Main application window: the map plus floating panels.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use eframe::egui;
use log::{info, warn};
use quake_feed::{Earthquake, LayerId, PlateBoundary};
use walkers::{lon_lat, Map, MapMemory, Position};

use crate::config::AppConfig;
use crate::layers::{LayerStore, LayerSummary, SharedLayerStore};
use crate::loader;
use crate::map::{BaseMaps, PlateOverlay, QuakeOverlay};
use crate::status::{DiagnosticLevel, SharedSystemStatus, SystemStatus};
use crate::ui::{render_event_panel, render_legend, LayerControl, LayerSelection, StatusPane};

pub struct QuakeApp {
    config: AppConfig,
    selection: LayerSelection,
    store: SharedLayerStore,
    status: SharedSystemStatus,
    base_maps: BaseMaps,
    map_memory: MapMemory,
    home: Position,
    selected_event: Option<String>,
    layer_control: LayerControl,
    status_pane: StatusPane,
    _loader: Option<std::thread::JoinHandle<()>>,
}

impl std::fmt::Debug for QuakeApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuakeApp")
            .field("selection", &self.selection)
            .field("selected_event", &self.selected_event)
            .finish_non_exhaustive()
    }
}

impl QuakeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, offline: bool) -> Self {
        info!("Initializing QuakeMap app...");
        let store: SharedLayerStore = Arc::new(Mutex::new(LayerStore::new()));
        let status: SharedSystemStatus = Arc::new(Mutex::new(SystemStatus::new()));

        let loader = if offline {
            info!("Offline mode, skipping feed downloads");
            loader::mark_all_failed(&store, &status, "offline");
            None
        } else {
            Some(loader::spawn_initial_load(
                Arc::clone(&store),
                Arc::clone(&status),
                cc.egui_ctx.clone(),
            ))
        };

        let mut map_memory = MapMemory::default();
        if let Err(e) = map_memory.set_zoom(config.default_zoom) {
            warn!("Invalid zoom level {} in config: {:?}", config.default_zoom, e);
        }

        if let Ok(path) = AppConfig::get_config_path() {
            status
                .lock()
                .expect("System status mutex poisoned")
                .add_diagnostic(DiagnosticLevel::Info, format!("Config: {}", path.display()));
        }

        let selection = LayerSelection {
            base_map: config.base_map,
            active_window: config.active_window(),
            show_plates: config.show_plates,
            marker_scale: config.marker_scale(),
        };

        Self {
            base_maps: BaseMaps::new(config.mapbox_token()),
            home: lon_lat(config.center_longitude, config.center_latitude),
            config,
            selection,
            store,
            status,
            map_memory,
            selected_event: None,
            layer_control: LayerControl::new(),
            status_pane: StatusPane::new(),
            _loader: loader,
        }
    }

    /// Copy the current selection into the config and persist it
    fn save_selection(&mut self) {
        self.config.base_map = self.selection.base_map;
        self.config.set_active_window(self.selection.active_window);
        self.config.show_plates = self.selection.show_plates;
        self.config.set_marker_scale(self.selection.marker_scale);

        if let Err(e) = self.config.save() {
            warn!("Failed to save configuration: {}", e);
        }
    }

    fn draw_map(
        &mut self,
        ui: &mut egui::Ui,
        quakes: Option<&[Earthquake]>,
        plates: Option<&[PlateBoundary]>,
    ) {
        let ctx = ui.ctx().clone();
        let tiles = self.base_maps.get_or_create(self.selection.base_map, &ctx);
        let mut map = Map::new(Some(tiles), &mut self.map_memory, self.home);

        if self.selection.show_plates {
            if let Some(plates) = plates {
                map = map.with_plugin(PlateOverlay::new(plates));
            }
        }

        if let Some(quakes) = quakes {
            map = map.with_plugin(QuakeOverlay::new(
                quakes,
                self.selection.marker_scale,
                &mut self.selected_event,
            ));
        }

        let response = ui.add(map);
        let rect = response.rect;
        let painter = ui.painter_at(rect);
        let text_color = if self.selection.base_map.is_dark() {
            egui::Color32::from_white_alpha(200)
        } else {
            egui::Color32::from_black_alpha(200)
        };

        // Attribution (required by the tile providers)
        let attribution = self.base_maps.attribution(self.selection.base_map);
        painter.text(
            rect.right_bottom() + egui::vec2(-10.0, -8.0),
            egui::Align2::RIGHT_BOTTOM,
            format!("{} | Earthquakes: USGS | Plates: PB2002", attribution.text),
            egui::FontId::proportional(10.0),
            text_color,
        );

        painter.text(
            rect.center_bottom() + egui::vec2(0.0, -8.0),
            egui::Align2::CENTER_BOTTOM,
            "Drag to pan | Scroll to zoom | Click a marker for details",
            egui::FontId::proportional(10.0),
            text_color,
        );
    }
}

impl eframe::App for QuakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame_start = Instant::now();

        // Snapshot the layers so the lock isn't held while rendering
        let (summaries, quakes, plates, counts) = {
            let store = self.store.lock().expect("Layer store mutex poisoned");
            let summaries: Vec<(LayerId, LayerSummary)> =
                LayerId::all().into_iter().map(|layer| (layer, store.summary(layer))).collect();
            let quakes = self.selection.active_window.and_then(|window| store.quakes(window));
            let counts = (store.pending_count(), store.failed_count());
            (summaries, quakes, store.plates(), counts)
        };

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_map(ui, quakes.as_deref().map(Vec::as_slice), plates.as_deref().map(Vec::as_slice));
            });

        if self.layer_control.render(ctx, &mut self.selection, &summaries) {
            self.save_selection();
        }

        if self.config.show_legend {
            render_legend(ctx);
        }

        // Selection only lives while the event is in the visible layer
        let selected = self.selected_event.as_ref().and_then(|id| {
            quakes.as_ref().and_then(|quakes| quakes.iter().find(|quake| &quake.id == id))
        });
        match selected {
            Some(quake) => {
                if !render_event_panel(ctx, quake) {
                    self.selected_event = None;
                }
            }
            None => self.selected_event = None,
        }

        {
            let mut status = self.status.lock().expect("System status mutex poisoned");
            self.status_pane.render(ctx, &status, &summaries, counts);
            status.update_performance(frame_start.elapsed().as_secs_f64() * 1000.0);
        }

        // Keep animating while feeds are still arriving
        if counts.0 > 0 {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
