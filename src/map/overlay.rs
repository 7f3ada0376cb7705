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

//! Map overlay plugins: plate boundaries and earthquake markers.

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke};
use quake_feed::style::{
    MARKER_FILL_OPACITY, MARKER_OUTLINE_WEIGHT, PLATE_STROKE_COLOR, PLATE_STROKE_WEIGHT,
};
use quake_feed::{Earthquake, MarkerScale, PlateBoundary};
use walkers::{lon_lat, MapMemory, Plugin, Projector};

/// Markers never shrink below this many pixels, so tiny events stay visible
const MIN_MARKER_RADIUS: f32 = 2.0;

/// Minimum pointer hit radius in pixels
const MIN_HIT_RADIUS: f32 = 6.0;

/// Split a polyline wherever it jumps across the antimeridian, so the
/// boundary isn't drawn as a line across the whole map.
pub fn split_at_antimeridian(line: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut parts = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for &point in line {
        if let Some(&(prev_lon, _)) = current.last() {
            if (point.0 - prev_lon).abs() > 180.0 {
                parts.push(std::mem::take(&mut current));
            }
        }
        current.push(point);
    }
    parts.push(current);

    parts.retain(|part| part.len() >= 2);
    parts
}

/// Draws tectonic plate boundaries as thin orange polylines
pub struct PlateOverlay<'a> {
    plates: &'a [PlateBoundary],
}

impl<'a> PlateOverlay<'a> {
    pub fn new(plates: &'a [PlateBoundary]) -> Self {
        Self { plates }
    }
}

impl std::fmt::Debug for PlateOverlay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlateOverlay").field("plates", &self.plates.len()).finish()
    }
}

impl Plugin for PlateOverlay<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let painter = ui.painter_at(response.rect);
        let (r, g, b) = PLATE_STROKE_COLOR;
        let stroke = Stroke::new(PLATE_STROKE_WEIGHT, Color32::from_rgb(r, g, b));

        for plate in self.plates {
            for line in &plate.lines {
                for part in split_at_antimeridian(line) {
                    let points: Vec<Pos2> = part
                        .iter()
                        .map(|&(lon, lat)| projector.project(lon_lat(lon, lat)).to_pos2())
                        .collect();
                    painter.add(egui::Shape::line(points, stroke));
                }
            }
        }
    }
}

/// Draws earthquake markers, handles hover cards and click selection
pub struct QuakeOverlay<'a> {
    quakes: &'a [Earthquake],
    scale: MarkerScale,
    selected: &'a mut Option<String>,
}

impl<'a> QuakeOverlay<'a> {
    /// `quakes` must be ordered smallest magnitude first so the largest
    /// events end up on top.
    pub fn new(quakes: &'a [Earthquake], scale: MarkerScale, selected: &'a mut Option<String>) -> Self {
        Self {
            quakes,
            scale,
            selected,
        }
    }
}

impl std::fmt::Debug for QuakeOverlay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuakeOverlay")
            .field("quakes", &self.quakes.len())
            .field("scale", &self.scale)
            .field("selected", &self.selected)
            .finish()
    }
}

impl Plugin for QuakeOverlay<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let Self { quakes, scale, selected } = *self;
        let rect = response.rect;
        let painter = ui.painter_at(rect);
        let pointer = response.hover_pos();
        let fill_alpha = (MARKER_FILL_OPACITY * 255.0).round() as u8;

        let mut hovered: Option<(&Earthquake, Pos2, f32)> = None;
        let mut selected_marker: Option<(Pos2, f32)> = None;

        for quake in quakes {
            let position = lon_lat(quake.longitude, quake.latitude);
            let center = projector.project(position).to_pos2();

            let radius = match scale {
                MarkerScale::Pixels => quake.radius(MarkerScale::Pixels) as f32,
                MarkerScale::Meters => {
                    quake.radius(MarkerScale::Meters) as f32 * projector.scale_pixel_per_meter(position)
                }
            }
            .max(MIN_MARKER_RADIUS);

            if !rect.expand(radius).contains(center) {
                continue;
            }

            let (r, g, b) = quake.color();
            painter.circle(
                center,
                radius,
                Color32::from_rgba_unmultiplied(r, g, b, fill_alpha),
                Stroke::new(MARKER_OUTLINE_WEIGHT, Color32::BLACK),
            );

            if selected.as_deref() == Some(quake.id.as_str()) {
                selected_marker = Some((center, radius));
            }

            // Later markers are painted on top, so the last hit wins
            if let Some(pointer) = pointer {
                if pointer.distance(center) <= radius.max(MIN_HIT_RADIUS) {
                    hovered = Some((quake, center, radius));
                }
            }
        }

        if let Some((center, radius)) = selected_marker {
            painter.circle_stroke(center, radius + 3.0, Stroke::new(2.0, Color32::WHITE));
        }

        if let Some((quake, center, radius)) = hovered {
            if response.clicked() {
                *selected = Some(quake.id.clone());
            }
            draw_hover_card(&painter, rect, center + egui::vec2(radius + 8.0, 0.0), quake);
        }
    }
}

/// Text lines shown when hovering a marker
pub fn hover_lines(quake: &Earthquake) -> Vec<String> {
    let mut lines = vec![quake.place.clone(), quake.magnitude_label()];

    if let Some(time) = quake.time {
        lines.push(time.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    }
    if let Some(depth) = quake.depth_km {
        lines.push(format!("Depth {depth:.1} km"));
    }
    if quake.tsunami {
        lines.push("Tsunami flag raised".to_string());
    }
    lines
}

fn draw_hover_card(painter: &egui::Painter, bounds: Rect, anchor: Pos2, quake: &Earthquake) {
    let text = hover_lines(quake).join("\n");
    let galley = painter.layout_no_wrap(text, egui::FontId::proportional(11.0), Color32::WHITE);

    // Draw background box, flipped left when it would leave the map
    let padding = egui::vec2(6.0, 4.0);
    let size = galley.size() + padding * 2.0;
    let mut min = anchor - egui::vec2(0.0, size.y / 2.0);
    if min.x + size.x > bounds.right() {
        min.x = anchor.x - size.x - 16.0;
    }
    min.y = min.y.clamp(bounds.top(), (bounds.bottom() - size.y).max(bounds.top()));

    let box_rect = Rect::from_min_size(min, size);
    painter.rect_filled(box_rect, 3.0, Color32::from_rgba_unmultiplied(0, 0, 0, 200));
    painter.galley(box_rect.min + padding, galley, Color32::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_split_at_antimeridian() {
        let line = [(178.0, -10.0), (179.5, -11.0), (-179.5, -12.0), (-178.0, -13.0)];
        let parts = split_at_antimeridian(&line);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], vec![(178.0, -10.0), (179.5, -11.0)]);
        assert_eq!(parts[1], vec![(-179.5, -12.0), (-178.0, -13.0)]);
    }

    #[test]
    fn test_split_drops_single_points() {
        let line = [(179.0, 0.0), (-179.0, 0.0), (-178.0, 1.0)];
        let parts = split_at_antimeridian(&line);
        assert_eq!(parts, vec![vec![(-179.0, 0.0), (-178.0, 1.0)]]);
        assert!(split_at_antimeridian(&[]).is_empty());
    }

    #[test]
    fn test_hover_lines() {
        let quake = Earthquake {
            id: "us1".to_string(),
            magnitude: Some(4.3),
            magnitude_type: Some("mb".to_string()),
            place: "100 km W of Somewhere".to_string(),
            time: Utc.timestamp_millis_opt(1_700_000_000_000).single(),
            longitude: 10.0,
            latitude: 20.0,
            depth_km: Some(10.0),
            url: None,
            tsunami: false,
        };
        assert_eq!(
            hover_lines(&quake),
            vec![
                "100 km W of Somewhere".to_string(),
                "M4.3 (mb)".to_string(),
                "2023-11-14 22:13:20 UTC".to_string(),
                "Depth 10.0 km".to_string(),
            ]
        );
    }
}
