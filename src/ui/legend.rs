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

//! Magnitude legend.

use eframe::egui;
use quake_feed::LEGEND_BINS;

use super::layer_control::panel_frame;

const SWATCH_SIZE: f32 = 14.0;

/// Render the legend in the bottom left corner
pub fn render_legend(ctx: &egui::Context) {
    egui::Window::new("Magnitude")
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -30.0))
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(panel_frame(ctx))
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("MAGNITUDE")
                .color(egui::Color32::from_rgb(150, 150, 150))
                .size(9.0)
                .strong());
            ui.add_space(2.0);

            // Highest first, matching the order the color rule is applied
            for bin in LEGEND_BINS.iter().rev() {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(SWATCH_SIZE, SWATCH_SIZE),
                        egui::Sense::hover(),
                    );
                    let (r, g, b) = bin.color();
                    ui.painter().rect_filled(rect, 2.0, egui::Color32::from_rgb(r, g, b));

                    ui.label(egui::RichText::new(bin.label)
                        .color(egui::Color32::from_rgb(200, 200, 200))
                        .size(10.0)
                        .monospace());
                });
            }
        });
}
