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

//! Layer control: base map choice, exclusive earthquake time window and
//! the plate boundary toggle.

use eframe::egui;
use quake_feed::{LayerId, MarkerScale, TimeWindow};

use crate::layers::LayerSummary;
use crate::map::BaseMap;

/// What the user has chosen to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSelection {
    pub base_map: BaseMap,
    /// At most one time window is shown at a time; `None` hides them all
    pub active_window: Option<TimeWindow>,
    pub show_plates: bool,
    pub marker_scale: MarkerScale,
}

#[derive(Debug)]
pub struct LayerControl {
    pub collapsed: bool,
}

impl Default for LayerControl {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerControl {
    pub fn new() -> Self {
        Self { collapsed: false }
    }

    /// Render the control in the top right corner. Returns true if the
    /// selection changed.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        selection: &mut LayerSelection,
        summaries: &[(LayerId, LayerSummary)],
    ) -> bool {
        let before = *selection;

        egui::Window::new("Layers")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
            .resizable(false)
            .collapsible(false)
            .title_bar(false)
            .frame(panel_frame(ctx))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("◈ LAYERS")
                        .color(egui::Color32::from_rgb(100, 180, 220))
                        .size(12.0)
                        .strong());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = if self.collapsed { "▼" } else { "▲" };
                        if ui.button(egui::RichText::new(icon).size(10.0))
                            .on_hover_text(if self.collapsed { "Expand" } else { "Collapse" })
                            .clicked() {
                            self.collapsed = !self.collapsed;
                        }
                    });
                });

                if self.collapsed {
                    return;
                }

                ui.separator();
                section_label(ui, "BASE MAP");
                for base in BaseMap::ALL {
                    ui.radio_value(&mut selection.base_map, base, base.display_name());
                }

                ui.add_space(6.0);
                section_label(ui, "FILTER EARTHQUAKES");
                for window in TimeWindow::ALL {
                    ui.horizontal(|ui| {
                        ui.radio_value(&mut selection.active_window, Some(window), window.display_name());
                        layer_badge(ui, summary_for(summaries, LayerId::Quakes(window)));
                    });
                }
                ui.radio_value(&mut selection.active_window, None, "None");

                ui.add_space(6.0);
                section_label(ui, "EXTRAS");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut selection.show_plates, LayerId::Plates.display_name());
                    layer_badge(ui, summary_for(summaries, LayerId::Plates));
                });

                ui.add_space(6.0);
                section_label(ui, "MARKER SIZE");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut selection.marker_scale, MarkerScale::Pixels, "Screen")
                        .on_hover_text("Constant size at every zoom level");
                    ui.radio_value(&mut selection.marker_scale, MarkerScale::Meters, "Ground")
                        .on_hover_text("Radius in meters, grows as you zoom in");
                });
            });

        *selection != before
    }
}

fn summary_for(summaries: &[(LayerId, LayerSummary)], layer: LayerId) -> Option<&LayerSummary> {
    summaries.iter().find(|(id, _)| *id == layer).map(|(_, summary)| summary)
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text)
        .color(egui::Color32::from_rgb(150, 150, 150))
        .size(9.0)
        .strong());
}

/// Small load state indicator next to an overlay toggle
fn layer_badge(ui: &mut egui::Ui, summary: Option<&LayerSummary>) {
    let (text, color, hover) = match summary {
        Some(LayerSummary::Loaded(count)) => (
            count.to_string(),
            egui::Color32::from_rgb(150, 150, 150),
            format!("{count} features"),
        ),
        Some(LayerSummary::Failed(reason)) => (
            "✕".to_string(),
            egui::Color32::from_rgb(255, 100, 100),
            format!("Failed to load: {reason}"),
        ),
        Some(LayerSummary::Loading) | None => (
            "◐".to_string(),
            egui::Color32::from_rgb(255, 200, 100),
            "Loading...".to_string(),
        ),
    };

    ui.label(egui::RichText::new(text).color(color).size(9.0).monospace())
        .on_hover_text(hover);
}

/// Translucent dark frame shared by the floating panels
pub fn panel_frame(ctx: &egui::Context) -> egui::Frame {
    egui::Frame::window(&ctx.style())
        .fill(egui::Color32::from_rgba_unmultiplied(25, 30, 35, 230))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 80, 100)))
        .corner_radius(6.0)
}
