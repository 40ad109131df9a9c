mod app;
mod io;
mod layout;
mod model;
mod panel;

use app::CompareApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Contingency Sheet Comparison",
        options,
        Box::new(|_cc| Box::new(CompareApp::default())),
    )
}
