//! JSON-backed user preferences.
//!
//! The file keeps the section layout of earlier releases so existing
//! `configuration.json` files load unchanged.

use crate::constants::{
    DEFAULT_APPLICATION_IDS, DEFAULT_CHECK_DELAY_MS, DEFAULT_EXIT_DELAY_MS,
    DEFAULT_NOTIFICATION_COOLDOWN_MS,
};
use crate::error::AppError;
use crate::validation::{clamp_delay_ms, validate_application_id};
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CONFIGURATION_FILE_NAME: &str = "configuration.json";

/// Configuration shared between the tracker thread and the console.
pub type SharedConfig = Arc<Mutex<Configuration>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApplicationConfiguration {
    pub start_on_boot: bool,
    pub repeated_notification_cooldown: i64,
}

impl Default for ApplicationConfiguration {
    fn default() -> Self {
        Self {
            start_on_boot: false,
            repeated_notification_cooldown: i64::try_from(DEFAULT_NOTIFICATION_COOLDOWN_MS)
                .unwrap_or(5000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RichPresenceConfiguration {
    pub enable_for_discord: bool,
    pub include_project_titles: bool,
    pub application_ids: [String; 2],
}

impl Default for RichPresenceConfiguration {
    fn default() -> Self {
        Self {
            enable_for_discord: true,
            include_project_titles: true,
            application_ids: DEFAULT_APPLICATION_IDS.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrackingConfiguration {
    /// Milliseconds between process checks
    pub check_delay: i64,
    /// Milliseconds to keep the session alive after GameMaker exits
    pub exit_delay: i64,
}

impl Default for TrackingConfiguration {
    fn default() -> Self {
        Self {
            check_delay: i64::try_from(DEFAULT_CHECK_DELAY_MS).unwrap_or(5000),
            exit_delay: i64::try_from(DEFAULT_EXIT_DELAY_MS).unwrap_or(7000),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LauncherConfiguration {
    /// Path or launch protocol of the IDE, opened by the `launch` command
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Configuration {
    pub application: ApplicationConfiguration,
    pub rich_presence: RichPresenceConfiguration,
    pub tracking: TrackingConfiguration,
    pub launcher: LauncherConfiguration,
}

impl Configuration {
    /// Location of the configuration file, creating its directory if needed.
    pub fn default_path() -> Result<PathBuf, AppError> {
        let proj_dirs = ProjectDirs::from("com", "gamemaker-companion", "GameMakerCompanion")
            .ok_or(AppError::NoProjectDirs)?;
        let config_dir = proj_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(config_dir.join(CONFIGURATION_FILE_NAME))
    }

    /// Parse a configuration document, repairing invalid application ids.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let mut config: Self =
            serde_json::from_str(text).map_err(|e| AppError::MalformedConfiguration {
                reason: e.to_string(),
            })?;
        config.repair_application_ids();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Load the file at `path`, replacing it with defaults when missing or malformed.
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => warn!(
                    "Incorrect {} formatting ({e}). Replacing it with default configuration.",
                    path.display()
                ),
            }
        }

        let config = Self::default();
        if let Err(e) = config.save(path) {
            warn!("Failed writing configuration to {}: {e}", path.display());
        }
        config
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        fs::write(path, text)?;

        info!("Configuration saved at: {}", path.display());
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        clamp_delay_ms(self.tracking.check_delay)
    }

    pub fn exit_delay(&self) -> Duration {
        clamp_delay_ms(self.tracking.exit_delay)
    }

    pub fn notification_cooldown(&self) -> Duration {
        let ms = u64::try_from(self.application.repeated_notification_cooldown.max(1)).unwrap_or(1);
        Duration::from_millis(ms)
    }

    fn repair_application_ids(&mut self) {
        for (id, default) in self
            .rich_presence
            .application_ids
            .iter_mut()
            .zip(DEFAULT_APPLICATION_IDS)
        {
            if let Err(e) = validate_application_id(id) {
                warn!("{e}; using default application id {default}");
                *id = default.to_string();
            }
        }
    }
}
