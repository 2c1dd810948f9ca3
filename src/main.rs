use std::sync::Arc;

use eframe::{egui, CreationContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod auth;
mod config;
mod dashboard;
mod error;
mod form;
mod list;
mod models;
mod session;
mod ui;
mod worker;

use api::HttpApi;
use app::WorkoutLogApp;
use config::Config;
use session::{FileTokenStore, SessionStore};
use worker::Worker;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    info!(api = %config.api_base_url, data_dir = %config.data_dir.display(), "Starting Workout Log");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Workout Log",
        options,
        Box::new(move |cc| Ok(Box::new(build_app(cc, config)))),
    )
}

fn build_app(cc: &CreationContext, config: Config) -> WorkoutLogApp {
    let mut style = (*cc.egui_ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(16.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(16.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(26.0, egui::FontFamily::Proportional),
    );
    cc.egui_ctx.set_style(style);

    let session = SessionStore::open(Box::new(FileTokenStore::in_dir(&config.data_dir)));
    let worker = Worker::new(
        Arc::new(HttpApi::new(config.api_base_url.clone())),
        Some(cc.egui_ctx.clone()),
    );
    WorkoutLogApp::new(session, worker, config.per_page)
}
