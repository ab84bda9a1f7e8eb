//! Marknote - markdown note-taking application
//!
//! A Rust-based markdown editor with live preview, a slide-out document
//! list, and locally persisted documents.

mod app;
mod core;
mod ui;

use app::MarknoteApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Marknote...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Marknote"),
        ..Default::default()
    };

    eframe::run_native(
        "Marknote",
        native_options,
        Box::new(|cc| Ok(Box::new(MarknoteApp::new(cc)?))),
    )
}
