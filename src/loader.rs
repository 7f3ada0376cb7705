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

//! One-shot background load of every overlay layer.
//!
//! The five feeds are fetched concurrently on a dedicated tokio runtime,
//! once per launch. Each result settles its layer in the store as soon as it
//! arrives. Failures leave the layer empty and are not retried.

use std::time::Instant;

use eframe::egui;
use log::{error, info, warn};
use quake_feed::{Earthquake, FeedClient, FeedError, LayerId, PlateBoundary, TimeWindow};
use tokio::task::JoinSet;

use crate::layers::SharedLayerStore;
use crate::status::{DiagnosticLevel, SharedSystemStatus};

/// Result of fetching one layer
#[derive(Debug)]
pub enum LoadResult {
    Quakes(TimeWindow, Result<Vec<Earthquake>, FeedError>),
    Plates(Result<Vec<PlateBoundary>, FeedError>),
}

impl LoadResult {
    pub fn layer(&self) -> LayerId {
        match self {
            LoadResult::Quakes(window, _) => LayerId::Quakes(*window),
            LoadResult::Plates(_) => LayerId::Plates,
        }
    }
}

/// Spawn the background thread that fetches every layer once.
pub fn spawn_initial_load(
    store: SharedLayerStore,
    status: SharedSystemStatus,
    ctx: egui::Context,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to start fetch runtime: {}", e);
                mark_all_failed(&store, &status, &format!("runtime error: {e}"));
                ctx.request_repaint();
                return;
            }
        };
        rt.block_on(load_all(store, status, ctx));
    })
}

async fn load_all(store: SharedLayerStore, status: SharedSystemStatus, ctx: egui::Context) {
    let client = match FeedClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            mark_all_failed(&store, &status, &e.to_string());
            ctx.request_repaint();
            return;
        }
    };

    info!("Fetching {} layers", LayerId::all().len());
    let mut tasks = JoinSet::new();

    for window in TimeWindow::ALL {
        let client = client.clone();
        tasks.spawn(async move {
            let started = Instant::now();
            let result = client.fetch_earthquakes(window).await;
            (LoadResult::Quakes(window, result), started.elapsed())
        });
    }

    tasks.spawn(async move {
        let started = Instant::now();
        let result = client.fetch_plates().await;
        (LoadResult::Plates(result), started.elapsed())
    });

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((result, elapsed)) => {
                apply_result(&store, &status, result, elapsed);
                ctx.request_repaint();
            }
            Err(e) => error!("Layer fetch task failed: {}", e),
        }
    }

    info!("Initial layer load finished");
}

/// Settle a layer from a fetch result and record it in the status.
pub fn apply_result(
    store: &SharedLayerStore,
    status: &SharedSystemStatus,
    result: LoadResult,
    elapsed: std::time::Duration,
) {
    let layer = result.layer();

    let outcome: Result<usize, String> = {
        let mut store = store.lock().expect("Layer store mutex poisoned");
        match result {
            LoadResult::Quakes(window, Ok(quakes)) => {
                let count = quakes.len();
                store.set_quakes(window, Ok(quakes));
                Ok(count)
            }
            LoadResult::Quakes(window, Err(e)) => {
                let reason = e.to_string();
                store.set_quakes(window, Err(reason.clone()));
                Err(reason)
            }
            LoadResult::Plates(Ok(plates)) => {
                let count = plates.len();
                store.set_plates(Ok(plates));
                Ok(count)
            }
            LoadResult::Plates(Err(e)) => {
                let reason = e.to_string();
                store.set_plates(Err(reason.clone()));
                Err(reason)
            }
        }
    };

    match &outcome {
        Ok(count) => info!("Loaded {} ({} features)", layer.display_name(), count),
        Err(reason) => warn!("Failed to load {}: {}", layer.display_name(), reason),
    }

    status
        .lock()
        .expect("System status mutex poisoned")
        .record_fetch(layer, elapsed, outcome.as_ref().map(|c| *c).map_err(String::as_str));
}

/// Settle every still-loading layer as failed.
pub fn mark_all_failed(store: &SharedLayerStore, status: &SharedSystemStatus, reason: &str) {
    {
        let mut store = store.lock().expect("Layer store mutex poisoned");
        for window in TimeWindow::ALL {
            if store.quake_state(window).is_loading() {
                store.set_quakes(window, Err(reason.to_string()));
            }
        }
        if store.plate_state().is_loading() {
            store.set_plates(Err(reason.to_string()));
        }
    }

    status
        .lock()
        .expect("System status mutex poisoned")
        .add_diagnostic(DiagnosticLevel::Warning, format!("Layers not loaded: {reason}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{LayerStore, LayerSummary};
    use crate::status::SystemStatus;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn shared() -> (SharedLayerStore, SharedSystemStatus) {
        (
            Arc::new(Mutex::new(LayerStore::new())),
            Arc::new(Mutex::new(SystemStatus::new())),
        )
    }

    #[test]
    fn test_apply_success_and_failure() {
        let (store, status) = shared();

        apply_result(
            &store,
            &status,
            LoadResult::Quakes(TimeWindow::PastHour, Ok(Vec::new())),
            Duration::from_millis(200),
        );
        apply_result(
            &store,
            &status,
            LoadResult::Plates(Err(FeedError::Status {
                url: "https://example.invalid/plates.json".to_string(),
                status: 404,
            })),
            Duration::from_millis(300),
        );

        let store = store.lock().unwrap();
        assert_eq!(store.summary(LayerId::Quakes(TimeWindow::PastHour)), LayerSummary::Loaded(0));
        assert!(matches!(store.summary(LayerId::Plates), LayerSummary::Failed(reason) if reason.contains("404")));
        assert_eq!(store.pending_count(), 3);

        let status = status.lock().unwrap();
        assert_eq!(status.fetches.len(), 2);
        assert_eq!(status.diagnostics.back().unwrap().level, DiagnosticLevel::Error);
    }

    #[test]
    fn test_mark_all_failed_keeps_loaded_layers() {
        let (store, status) = shared();
        store
            .lock()
            .unwrap()
            .set_quakes(TimeWindow::PastDay, Ok(Vec::new()));

        mark_all_failed(&store, &status, "offline");

        let store = store.lock().unwrap();
        assert_eq!(store.pending_count(), 0);
        assert_eq!(store.failed_count(), 4);
        assert_eq!(store.summary(LayerId::Quakes(TimeWindow::PastDay)), LayerSummary::Loaded(0));
    }
}
