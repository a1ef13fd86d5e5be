mod app;
mod color;
mod data;
mod state;
mod symbols;
mod ui;

use std::path::PathBuf;

use app::BreweryAtlasApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Proportional-symbol map of US breweries by state and year.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Dataset to open at startup (.geojson, .json, .csv, .parquet).
    dataset: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::default();
    if let Some(path) = &cli.dataset {
        state.open_dataset(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Brewery Atlas – US Breweries by State",
        options,
        Box::new(|_cc| Ok(Box::new(BreweryAtlasApp::new(state)))),
    )
}
