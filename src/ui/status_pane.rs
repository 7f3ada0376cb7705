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

use eframe::egui;
use quake_feed::LayerId;

use super::layer_control::panel_frame;
use crate::layers::LayerSummary;
use crate::status::{DiagnosticLevel, SystemStatus};

#[derive(Debug)]
pub struct StatusPane {
    pub visible: bool,
    pub collapsed: bool,
}

impl Default for StatusPane {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPane {
    pub fn new() -> Self {
        Self {
            visible: true,
            collapsed: true,
        }
    }

    /// Render the status pane as a floating window
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        status: &SystemStatus,
        summaries: &[(LayerId, LayerSummary)],
        (pending, failed): (usize, usize),
    ) {
        if !self.visible {
            // Show a small button to re-open the status pane when hidden
            egui::Window::new("show_status")
                .title_bar(false)
                .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
                .resizable(false)
                .frame(panel_frame(ctx))
                .show(ctx, |ui| {
                    if ui.button(egui::RichText::new("📊 Status")
                        .color(egui::Color32::from_rgb(150, 200, 220))
                        .size(11.0))
                        .clicked() {
                        self.visible = true;
                    }
                });
            return;
        }

        egui::Window::new("Status")
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
            .default_width(280.0)
            .resizable(false)
            .collapsible(false)
            .title_bar(false)
            .frame(panel_frame(ctx))
            .show(ctx, |ui| {
                // Header with collapse and close buttons
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("◈ STATUS")
                        .color(egui::Color32::from_rgb(100, 180, 220))
                        .size(12.0)
                        .strong());

                    if pending > 0 {
                        ui.label(egui::RichText::new(format!("{pending} loading"))
                            .color(egui::Color32::from_rgb(255, 200, 100))
                            .size(9.0));
                    }
                    if failed > 0 {
                        ui.label(egui::RichText::new(format!("{failed} failed"))
                            .color(egui::Color32::from_rgb(255, 100, 100))
                            .size(9.0));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(egui::RichText::new("✕")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(200, 100, 100)))
                            .on_hover_text("Hide status pane")
                            .clicked() {
                            self.visible = false;
                        }

                        ui.add_space(4.0);

                        let collapse_icon = if self.collapsed { "▼" } else { "▲" };
                        if ui.button(egui::RichText::new(collapse_icon).size(10.0))
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
                Self::render_layers_section(ui, status, summaries);
                ui.add_space(6.0);
                Self::render_performance_section(ui, status);
                ui.add_space(6.0);
                Self::render_diagnostics_section(ui, status);
            });
    }

    fn render_layers_section(ui: &mut egui::Ui, status: &SystemStatus, summaries: &[(LayerId, LayerSummary)]) {
        ui.label(egui::RichText::new("FEEDS")
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(9.0)
            .strong());

        ui.add_space(2.0);

        for (layer, summary) in summaries {
            ui.horizontal(|ui| {
                let (icon, color, detail) = match summary {
                    LayerSummary::Loaded(count) => (
                        "●",
                        egui::Color32::from_rgb(100, 255, 100),
                        format!("{count} features"),
                    ),
                    LayerSummary::Loading => (
                        "◐",
                        egui::Color32::from_rgb(255, 200, 100),
                        "Loading...".to_string(),
                    ),
                    LayerSummary::Failed(_) => (
                        "✕",
                        egui::Color32::from_rgb(255, 100, 100),
                        "Failed".to_string(),
                    ),
                };

                ui.label(egui::RichText::new(icon).color(color).size(10.0));
                ui.label(egui::RichText::new(format!("{}:", layer.display_name()))
                    .color(egui::Color32::from_rgb(130, 130, 130))
                    .size(9.0));

                let label = ui.label(egui::RichText::new(detail)
                    .color(egui::Color32::from_rgb(200, 200, 200))
                    .size(8.0)
                    .monospace());
                if let LayerSummary::Failed(reason) = summary {
                    label.on_hover_text(reason);
                }

                if let Some(record) = status.fetches.get(layer) {
                    ui.label(egui::RichText::new(format!("{:.1}s", record.duration.as_secs_f64()))
                        .color(egui::Color32::from_rgb(100, 100, 100))
                        .size(8.0)
                        .monospace())
                        .on_hover_text(match record.features {
                            Some(count) => format!("{} features, finished at {}", count, record.finished_at.format("%H:%M:%S")),
                            None => format!("Failed at {}", record.finished_at.format("%H:%M:%S")),
                        });
                }
            });
        }
    }

    fn render_performance_section(ui: &mut egui::Ui, status: &SystemStatus) {
        ui.label(egui::RichText::new("PERFORMANCE")
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(9.0)
            .strong());

        ui.add_space(2.0);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Frame:")
                .color(egui::Color32::from_rgb(130, 130, 130))
                .size(9.0));

            let frame_color = if status.average_frame_duration_ms < 16.0 {
                egui::Color32::from_rgb(100, 255, 100)
            } else if status.average_frame_duration_ms < 33.0 {
                egui::Color32::from_rgb(255, 200, 100)
            } else {
                egui::Color32::from_rgb(255, 100, 100)
            };

            ui.label(egui::RichText::new(format!("{:.1}ms (last {:.1}ms)",
                status.average_frame_duration_ms,
                status.last_frame_duration_ms))
                .color(frame_color)
                .size(9.0)
                .monospace());
        });

        let uptime = (chrono::Utc::now() - status.started_at).num_seconds().max(0);
        ui.label(egui::RichText::new(format!("Up {}", format_duration(uptime.unsigned_abs())))
            .color(egui::Color32::from_rgb(130, 130, 130))
            .size(9.0));
    }

    fn render_diagnostics_section(ui: &mut egui::Ui, status: &SystemStatus) {
        ui.label(egui::RichText::new("DIAGNOSTICS")
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(9.0)
            .strong());

        ui.add_space(2.0);

        if status.diagnostics.is_empty() {
            ui.label(egui::RichText::new("No messages")
                .color(egui::Color32::from_rgb(100, 100, 100))
                .size(8.0)
                .italics());
            return;
        }

        egui::ScrollArea::vertical()
            .max_height(14.0 * 6.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                // Newest first
                for diagnostic in status.diagnostics.iter().rev() {
                    ui.horizontal(|ui| {
                        let (icon, color) = match diagnostic.level {
                            DiagnosticLevel::Info => ("ℹ", egui::Color32::from_rgb(100, 180, 255)),
                            DiagnosticLevel::Warning => ("⚠", egui::Color32::from_rgb(255, 200, 100)),
                            DiagnosticLevel::Error => ("✕", egui::Color32::from_rgb(255, 100, 100)),
                        };

                        ui.label(egui::RichText::new(icon).color(color).size(9.0));
                        ui.label(egui::RichText::new(diagnostic.timestamp.format("%H:%M:%S").to_string())
                            .color(egui::Color32::from_rgb(100, 100, 100))
                            .size(8.0)
                            .monospace());
                        ui.label(egui::RichText::new(&diagnostic.message)
                            .color(egui::Color32::from_rgb(180, 180, 180))
                            .size(8.0));
                    });
                }
            });
    }
}

fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5), "5s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3725), "1h 2m 5s");
    }
}
