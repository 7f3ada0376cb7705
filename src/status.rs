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

//! Load status and diagnostics shown in the status pane.

use chrono::{DateTime, Utc};
use quake_feed::LayerId;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const MAX_DIAGNOSTICS: usize = 50;

/// Diagnostic message with timestamp
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub timestamp: DateTime<Utc>,
    pub level: DiagnosticLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// Outcome of one layer fetch
#[derive(Debug, Clone)]
pub struct FetchRecord {
    pub finished_at: DateTime<Utc>,
    pub duration: Duration,
    /// Feature count on success
    pub features: Option<usize>,
}

/// System status tracking fetches and diagnostics
#[derive(Debug)]
pub struct SystemStatus {
    pub started_at: DateTime<Utc>,

    // Per-layer fetch results
    pub fetches: HashMap<LayerId, FetchRecord>,

    // Diagnostic messages (keep last 50)
    pub diagnostics: VecDeque<DiagnosticMessage>,
    max_diagnostics: usize,

    // Performance metrics
    pub last_frame_duration_ms: f64,
    pub average_frame_duration_ms: f64,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemStatus {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            fetches: HashMap::new(),
            diagnostics: VecDeque::with_capacity(MAX_DIAGNOSTICS),
            max_diagnostics: MAX_DIAGNOSTICS,
            last_frame_duration_ms: 0.0,
            average_frame_duration_ms: 0.0,
        }
    }

    /// Record a finished layer fetch and log a diagnostic for it
    pub fn record_fetch(&mut self, layer: LayerId, duration: Duration, result: Result<usize, &str>) {
        let features = result.ok();
        self.fetches.insert(
            layer,
            FetchRecord {
                finished_at: Utc::now(),
                duration,
                features,
            },
        );

        match result {
            Ok(count) => self.add_diagnostic(
                DiagnosticLevel::Info,
                format!("{}: {} features in {:.1}s", layer.display_name(), count, duration.as_secs_f64()),
            ),
            Err(error) => self.add_diagnostic(
                DiagnosticLevel::Error,
                format!("{} failed: {}", layer.display_name(), error),
            ),
        }
    }

    /// Add a diagnostic message
    pub fn add_diagnostic(&mut self, level: DiagnosticLevel, message: String) {
        let diagnostic = DiagnosticMessage {
            timestamp: Utc::now(),
            level,
            message,
        };

        self.diagnostics.push_back(diagnostic);

        // Keep only the last N messages
        while self.diagnostics.len() > self.max_diagnostics {
            self.diagnostics.pop_front();
        }
    }

    /// Update frame time metrics
    pub fn update_performance(&mut self, duration_ms: f64) {
        self.last_frame_duration_ms = duration_ms;

        // Simple moving average
        const ALPHA: f64 = 0.1; // Smoothing factor
        if self.average_frame_duration_ms == 0.0 {
            self.average_frame_duration_ms = duration_ms;
        } else {
            self.average_frame_duration_ms =
                ALPHA * duration_ms + (1.0 - ALPHA) * self.average_frame_duration_ms;
        }
    }
}

/// Thread-safe wrapper for SystemStatus
pub type SharedSystemStatus = Arc<Mutex<SystemStatus>>;

#[cfg(test)]
mod tests {
    use super::*;
    use quake_feed::TimeWindow;

    #[test]
    fn test_diagnostics_are_bounded() {
        let mut status = SystemStatus::new();
        for i in 0..(MAX_DIAGNOSTICS + 10) {
            status.add_diagnostic(DiagnosticLevel::Info, format!("message {i}"));
        }
        assert_eq!(status.diagnostics.len(), MAX_DIAGNOSTICS);
        assert_eq!(status.diagnostics.front().unwrap().message, "message 10");
    }

    #[test]
    fn test_record_fetch() {
        let mut status = SystemStatus::new();
        let layer = LayerId::Quakes(TimeWindow::PastHour);
        status.record_fetch(layer, Duration::from_millis(1500), Ok(12));
        status.record_fetch(LayerId::Plates, Duration::from_secs(2), Err("HTTP 503"));

        assert_eq!(status.fetches[&layer].features, Some(12));
        assert!(status.fetches[&LayerId::Plates].features.is_none());

        let last = status.diagnostics.back().unwrap();
        assert_eq!(last.level, DiagnosticLevel::Error);
        assert_eq!(last.message, "Tectonic Plates failed: HTTP 503");
    }

    #[test]
    fn test_frame_average() {
        let mut status = SystemStatus::new();
        status.update_performance(10.0);
        status.update_performance(20.0);
        assert!((status.average_frame_duration_ms - 11.0).abs() < 1e-9);
        assert!((status.last_frame_duration_ms - 20.0).abs() < 1e-9);
    }
}
