pub mod channel;
pub mod classifier;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod platform;
pub mod rpc;
pub mod synthesizer;
#[cfg(test)]
mod test_utils;
pub mod tracker;
pub mod validation;

use crate::config::{Configuration, SharedConfig};
use crate::console::{Console, ConsoleExit};
use crate::constants::APPLICATION_NAME;
use crate::error::AppError;
use crate::platform::process::is_another_instance_running;
use crate::platform::NativePlatform;
use crate::rpc::DiscordTransport;
use crate::tracker::{TrackerService, UptimeClock};
use log::{error, info, warn};
use std::sync::{Arc, Mutex};

/// Lock a mutex, recovering from poisoning if necessary
pub(crate) fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> std::sync::MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{context} mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Start tracking in the background and serve the console until it quits.
pub fn run() -> Result<(), AppError> {
    if is_another_instance_running() {
        return Err(AppError::AlreadyRunning);
    }

    let config_path = Configuration::default_path()?;
    let config: SharedConfig = Arc::new(Mutex::new(Configuration::load_or_create(&config_path)));
    let clock = UptimeClock::new();

    let tracker = TrackerService::new(
        NativePlatform::new(),
        DiscordTransport,
        Arc::clone(&config),
        clock.clone(),
    );
    let tracker = tracker.start();
    info!("{APPLICATION_NAME} started");

    let mut console = Console::new(NativePlatform::new(), config, config_path, clock);
    if console.run(std::io::stdin().lock())? == ConsoleExit::InputClosed {
        // Only `quit` stops the companion; without a console it keeps tracking
        info!("Console input closed, tracking continues");
        if tracker.join().is_err() {
            error!("Tracker thread panicked");
        }
    }

    info!("{APPLICATION_NAME} stopped");
    Ok(())
}
