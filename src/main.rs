// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod alerts;
mod api;
mod app;
mod charts;
mod config;
mod error;
mod geo;
mod model;
mod monitor;
mod telemetry;
mod ui;

use api::ApiClient;
use app::NeuroGuardDesk;
use config::Config;
use monitor::{MonitorManager, MonitorUpdate};
use std::sync::mpsc;

fn main() -> iced::Result {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    };

    let client = match ApiClient::new(&config.api_base_url) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Could not build the API client: {}", e);
            std::process::exit(1);
        }
    };

    // Channel for readings flowing from the monitor thread to the UI thread
    let (update_sender, update_receiver) = mpsc::channel::<MonitorUpdate>();

    // Create the monitor manager
    let (manager, command_sender) = MonitorManager::new(client.clone(), update_sender);

    // Spawn a thread to run the polling lifecycle
    std::thread::spawn(move || {
        manager.run();
    });

    iced::application(
        "NeuroGuard: Patient & Caregiver Health Monitor",
        NeuroGuardDesk::update,
        NeuroGuardDesk::view,
    )
    .subscription(NeuroGuardDesk::subscription)
    .theme(NeuroGuardDesk::theme)
    .window_size((1200.0, 800.0))
    .run_with(move || NeuroGuardDesk::new(config, client, update_receiver, command_sender))
}
