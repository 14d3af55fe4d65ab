pub mod autostart;
pub mod process;
pub mod types;

pub use process::ProcessTable;
pub use types::{Platform, ProcessHandle};

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub use macos::MacOSPlatform as NativePlatform;

#[cfg(target_os = "linux")]
pub use linux::LinuxPlatform as NativePlatform;

#[cfg(target_os = "windows")]
pub use windows::WindowsPlatform as NativePlatform;

use crate::constants::URL_OPENING_DELAY_MS;
use crate::error::AppError;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

/// Run a short-lived helper program and wait for it to exit.
pub(crate) fn run_command(program: &'static str, args: &[&str]) -> Result<(), AppError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| AppError::CommandFailed {
            command: program,
            reason: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(AppError::CommandFailed {
            command: program,
            reason: status.to_string(),
        })
    }
}

/// Open several URLs, pausing between launches so the desktop does not drop any.
pub fn open_urls<P: Platform + ?Sized>(platform: &P, urls: &[&str]) -> Result<(), AppError> {
    for (i, url) in urls.iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(URL_OPENING_DELAY_MS));
        }
        platform.open_url(url)?;
    }
    Ok(())
}

// Process matching only on other platforms
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
pub struct NativePlatform {
    processes: ProcessTable,
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
impl Default for NativePlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
impl NativePlatform {
    pub fn new() -> Self {
        Self {
            processes: ProcessTable::new(),
        }
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
impl Platform for NativePlatform {
    fn refresh_processes(&mut self) {
        self.processes.refresh();
    }

    fn match_processes(&self, titles: &[&str]) -> Vec<ProcessHandle> {
        self.processes.matching(titles)
    }

    fn window_title(&self, _process: &ProcessHandle) -> String {
        String::new()
    }

    fn open_url(&self, _url: &str) -> Result<(), AppError> {
        Err(AppError::Unsupported { operation: "open_url" })
    }

    fn show_notification(&self, _text: &str) -> Result<(), AppError> {
        Err(AppError::Unsupported {
            operation: "show_notification",
        })
    }

    fn set_automatic_startup(&self, _enable: bool) -> Result<(), AppError> {
        Err(AppError::Unsupported {
            operation: "set_automatic_startup",
        })
    }

    fn state_symbol(&self, enabled: bool) -> char {
        if enabled {
            '+'
        } else {
            '-'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakePlatform;

    #[test]
    fn test_open_urls_opens_each_in_order() {
        let platform = FakePlatform::new();
        open_urls(&platform, &["https://a.example", "https://b.example"]).unwrap();
        assert_eq!(
            platform.opened_urls(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_spawn_missing_program_fails() {
        let result = run_command("definitely-not-a-real-program-4721", &[]);
        assert!(matches!(result, Err(AppError::CommandFailed { .. })));
    }
}
