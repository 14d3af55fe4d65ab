//! Line-oriented stand-in for the tray menu, run on the main thread.

use crate::config::SharedConfig;
use crate::constants::{label, WEB_LINKS};
use crate::error::AppError;
use crate::platform::{open_urls, Platform};
use crate::safe_lock;
use crate::tracker::{format_uptime, UptimeClock};
use crate::validation::validate_web_url;
use log::{debug, info, warn};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Uptime,
    ToggleProjectTitles,
    ToggleDiscord,
    ToggleAutostart,
    /// Link names as typed, validated when run
    Web(Vec<String>),
    /// Start the IDE from `Launcher.Path`
    Launch,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_ascii_lowercase();

    Some(match command.as_str() {
        "uptime" => ConsoleCommand::Uptime,
        "titles" => ConsoleCommand::ToggleProjectTitles,
        "discord" => ConsoleCommand::ToggleDiscord,
        "autostart" => ConsoleCommand::ToggleAutostart,
        "web" => ConsoleCommand::Web(words.map(str::to_string).collect()),
        "launch" => ConsoleCommand::Launch,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => ConsoleCommand::Unknown(command),
    })
}

/// URL registered for a link name such as `manual` or `forum`.
pub fn web_link(name: &str) -> Option<&'static str> {
    WEB_LINKS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, url)| *url)
}

/// Why [`Console::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    Quit,
    /// Input closed without `quit`, as when started at login without a terminal
    InputClosed,
}

pub struct Console<P: Platform> {
    platform: P,
    config: SharedConfig,
    config_path: PathBuf,
    clock: UptimeClock,
    last_notification: Option<Instant>,
}

impl<P: Platform> Console<P> {
    pub fn new(platform: P, config: SharedConfig, config_path: PathBuf, clock: UptimeClock) -> Self {
        Self {
            platform,
            config,
            config_path,
            clock,
            last_notification: None,
        }
    }

    /// Execute commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<ConsoleExit, AppError> {
        info!("Type 'help' for a list of commands");
        for line in input.lines() {
            let Some(command) = parse_command(&line?) else {
                continue;
            };
            if !self.execute(command) {
                return Ok(ConsoleExit::Quit);
            }
        }
        Ok(ConsoleExit::InputClosed)
    }

    /// Returns `false` once the console should stop.
    pub fn execute(&mut self, command: ConsoleCommand) -> bool {
        match command {
            ConsoleCommand::Uptime => self.notify_uptime(),
            ConsoleCommand::ToggleProjectTitles => {
                let enabled = self.toggle(|config| &mut config.rich_presence.include_project_titles);
                info!("Show project titles: {}", self.platform.state_symbol(enabled));
            }
            ConsoleCommand::ToggleDiscord => {
                let enabled = self.toggle(|config| &mut config.rich_presence.enable_for_discord);
                info!("Discord Rich Presence: {}", self.platform.state_symbol(enabled));
            }
            ConsoleCommand::ToggleAutostart => self.toggle_autostart(),
            ConsoleCommand::Web(names) => self.open_links(&names),
            ConsoleCommand::Launch => self.launch(),
            ConsoleCommand::Help => log_help(),
            ConsoleCommand::Quit => return false,
            ConsoleCommand::Unknown(command) => {
                warn!("Unknown command '{command}', type 'help' for a list of commands");
            }
        }
        true
    }

    fn notify_uptime(&mut self) {
        let cooldown = safe_lock(&self.config, "Configuration").notification_cooldown();
        if self
            .last_notification
            .is_some_and(|last| last.elapsed() < cooldown)
        {
            debug!("Uptime notification suppressed by cooldown");
            return;
        }

        let text = format!("{}{}", label::TRACKED_UPTIME, format_uptime(self.clock.elapsed()));
        info!("{text}");
        if let Err(e) = self.platform.show_notification(&text) {
            warn!("Failed to show notification: {e}");
        }
        self.last_notification = Some(Instant::now());
    }

    /// Flip one boolean setting, persist, and return the new value.
    fn toggle(&self, field: impl FnOnce(&mut crate::config::Configuration) -> &mut bool) -> bool {
        let mut config = safe_lock(&self.config, "Configuration");
        let value = field(&mut *config);
        *value = !*value;
        let enabled = *value;

        if let Err(e) = config.save(&self.config_path) {
            warn!("Failed to save configuration: {e}");
        }
        enabled
    }

    fn toggle_autostart(&self) {
        let mut config = safe_lock(&self.config, "Configuration");
        let enable = !config.application.start_on_boot;

        match self.platform.set_automatic_startup(enable) {
            Ok(()) => {
                config.application.start_on_boot = enable;
                if let Err(e) = config.save(&self.config_path) {
                    warn!("Failed to save configuration: {e}");
                }
                info!("Start on boot: {}", self.platform.state_symbol(enable));
            }
            Err(e) => warn!("Failed to change automatic startup: {e}"),
        }
    }

    /// Launcher paths may be files or protocols such as `steam://`, so they
    /// skip the web link validation.
    fn launch(&self) {
        let path = safe_lock(&self.config, "Configuration").launcher.path.clone();
        let Some(path) = path.filter(|path| !path.trim().is_empty()) else {
            warn!("No launcher configured, set Launcher.Path in the configuration file");
            return;
        };

        info!("Launching {path}");
        if let Err(e) = self.platform.open_url(&path) {
            warn!("Failed to launch GameMaker: {e}");
        }
    }

    fn open_links(&self, names: &[String]) {
        if names.is_empty() {
            warn!("Usage: web <link>... where link is one of: {}", link_names());
            return;
        }

        let mut urls = Vec::new();
        for name in names {
            match web_link(name).map(validate_web_url) {
                Some(Ok(url)) => urls.push(url),
                Some(Err(e)) => warn!("Refusing to open link '{name}': {e}"),
                None => warn!("Unknown link '{name}'"),
            }
        }

        let urls: Vec<&str> = urls.iter().map(url::Url::as_str).collect();
        if let Err(e) = open_urls(&self.platform, &urls) {
            warn!("Failed to open link: {e}");
        }
    }
}

fn log_help() {
    info!("Commands:");
    info!("  uptime           show total GameMaker uptime");
    info!("  titles           toggle project titles in Discord");
    info!("  discord          toggle Discord Rich Presence");
    info!("  autostart        toggle starting on login");
    info!("  web <link>...    open GameMaker links ({})", link_names());
    info!("  launch           start GameMaker from Launcher.Path");
    info!("  help             show this list");
    info!("  quit             exit");
}

fn link_names() -> String {
    WEB_LINKS
        .iter()
        .map(|(key, _)| *key)
        .collect::<Vec<_>>()
        .join(", ")
}
