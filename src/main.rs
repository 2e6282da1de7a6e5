//! Thermo Dashboard - City Temperature Analysis & Interactive Charts
//!
//! Loads a CSV of historical city temperatures, fills missing readings,
//! aggregates yearly and per-city means and shows them in an egui window.

mod charts;
mod dashboard;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use clap::Parser;
use dashboard::Dashboard;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;

const DEFAULT_DATA_PATH: &str = "data/GlobalLandTemperaturesByMajorCity.csv";

#[derive(Parser, Debug)]
#[command(
    name = "thermo_dashboard",
    version,
    about = "Interactive dashboard for historical city temperatures"
)]
struct Cli {
    /// CSV with dt, City, AverageTemperature and AverageTemperatureUncertainty columns
    #[arg(default_value = DEFAULT_DATA_PATH)]
    path: PathBuf,

    /// Trailing window of the moving average, in years
    #[arg(long, default_value_t = stats::DEFAULT_WINDOW as u64, value_parser = clap::value_parser!(u64).range(1..))]
    window: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // A dataset that cannot be loaded aborts before any window opens
    let dashboard = Dashboard::build(&cli.path, cli.window as usize)
        .with_context(|| format!("failed to build dashboard from {}", cli.path.display()))?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Global Land Temperature Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "Thermo Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
