mod app;
mod config;
mod layers;
mod loader;
mod map;
mod status;
mod ui;

use clap::Parser;
use config::AppConfig;
use eframe::egui;
use log::{info, warn};
use map::BaseMap;
use quake_feed::TimeWindow;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Desktop map of recent earthquakes and tectonic plate boundaries
#[derive(Parser, Debug)]
#[command(name = "quakemap-desktop", version, about)]
struct Args {
    /// Base map to start with (light, dark, satellite)
    #[arg(long)]
    base_map: Option<BaseMap>,

    /// Earthquake time window to show (hour, day, week, month)
    #[arg(long)]
    window: Option<TimeWindow>,

    /// Start with the tectonic plate layer hidden
    #[arg(long)]
    no_plates: bool,

    /// Don't download any feeds
    #[arg(long)]
    offline: bool,

    /// Overwrite the saved configuration with defaults before starting
    #[arg(long)]
    reset_config: bool,
}

impl Args {
    /// Apply command line overrides on top of the loaded config
    fn apply(&self, config: &mut AppConfig) {
        if let Some(base_map) = self.base_map {
            config.base_map = base_map;
        }
        if let Some(window) = self.window {
            config.set_active_window(Some(window));
        }
        if self.no_plates {
            config.show_plates = false;
        }
    }
}

fn load_config(reset: bool) -> AppConfig {
    let loaded = if reset { AppConfig::reset() } else { AppConfig::load() };
    loaded.unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    })
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("Starting QuakeMap Desktop...");

    let mut config = load_config(args.reset_config);
    args.apply(&mut config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_title("QuakeMap Desktop"),
        ..Default::default()
    };

    let offline = args.offline;
    eframe::run_native(
        "QuakeMap Desktop",
        options,
        Box::new(move |cc| Ok(Box::new(app::QuakeApp::new(cc, config, offline)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from(["quakemap-desktop", "--base-map", "light", "--window", "week", "--no-plates"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.base_map, BaseMap::Light);
        assert_eq!(config.active_window(), Some(TimeWindow::PastSevenDays));
        assert!(!config.show_plates);
        assert!(!args.offline);
    }

    #[test]
    fn test_cli_defaults_keep_config() {
        let args = Args::parse_from(["quakemap-desktop"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_cli_rejects_unknown_window() {
        assert!(Args::try_parse_from(["quakemap-desktop", "--window", "year"]).is_err());
    }
}
