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

//! Detail panel for the selected earthquake.

use eframe::egui;
use log::warn;
use quake_feed::Earthquake;

use super::layer_control::panel_frame;
use crate::map::overlay::hover_lines;

/// Render the selected event. Returns false when the user closed the panel.
pub fn render_event_panel(ctx: &egui::Context, quake: &Earthquake) -> bool {
    let mut keep_open = true;

    egui::Window::new("Selected Event")
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -30.0))
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(panel_frame(ctx))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (r, g, b) = quake.color();
                ui.label(egui::RichText::new("●")
                    .color(egui::Color32::from_rgb(r, g, b))
                    .size(14.0));
                ui.label(egui::RichText::new(quake.magnitude_label())
                    .color(egui::Color32::from_rgb(200, 220, 255))
                    .size(13.0)
                    .strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(egui::RichText::new("✕")
                        .size(12.0)
                        .color(egui::Color32::from_rgb(200, 100, 100)))
                        .on_hover_text("Clear selection")
                        .clicked() {
                        keep_open = false;
                    }
                });
            });

            ui.separator();

            let header = quake.magnitude_label();
            for line in hover_lines(quake).into_iter().filter(|line| *line != header) {
                ui.label(egui::RichText::new(line)
                    .color(egui::Color32::from_rgb(180, 180, 180))
                    .size(10.0));
            }
            ui.label(egui::RichText::new(format!("{:>8.3}° {:>9.3}°", quake.latitude, quake.longitude))
                .color(egui::Color32::from_rgb(120, 120, 120))
                .size(9.0)
                .monospace());
            ui.label(egui::RichText::new(&quake.id)
                .color(egui::Color32::from_rgb(100, 100, 100))
                .size(8.0)
                .monospace());

            if let Some(url) = &quake.url {
                ui.add_space(4.0);
                if ui.button("Open USGS event page").clicked() {
                    if let Err(e) = webbrowser::open(url) {
                        warn!("Failed to open {}: {}", url, e);
                    }
                }
            }
        });

    keep_open
}
