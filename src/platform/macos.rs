use super::autostart;
use super::{run_command, Platform, ProcessHandle, ProcessTable};
use crate::classifier::sanitize_window_title;
use crate::constants::APPLICATION_NAME;
use crate::error::AppError;
use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::window::{self, kCGNullWindowID};
use directories::BaseDirs;

const LAUNCH_AGENT_LABEL: &str = "io.gamemaker.companion";

pub struct MacOSPlatform {
    processes: ProcessTable,
}

impl Default for MacOSPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MacOSPlatform {
    pub fn new() -> Self {
        Self {
            processes: ProcessTable::new(),
        }
    }
}

fn dict_i64(dict: &CFDictionary<CFString, CFType>, key: &CFString) -> Option<i64> {
    dict.find(key)
        .and_then(|value| value.downcast::<CFNumber>())
        .and_then(|value| value.to_i64())
}

fn dict_string(dict: &CFDictionary<CFString, CFType>, key: &CFString) -> Option<String> {
    dict.find(key)
        .and_then(|value| value.downcast::<CFString>())
        .map(|value| value.to_string())
}

/// Window names are only visible with the Screen Recording permission.
#[allow(
    unsafe_code,
    clippy::as_conversions,
    reason = "CoreGraphics window keys and dictionaries are raw CF refs"
)]
fn window_name_for_pid(pid: u32) -> Option<String> {
    let options = window::kCGWindowListOptionAll | window::kCGWindowListExcludeDesktopElements;
    let windows = window::copy_window_info(options, kCGNullWindowID)?;

    let key_window_pid = unsafe { CFString::wrap_under_get_rule(window::kCGWindowOwnerPID) };
    let key_window_name = unsafe { CFString::wrap_under_get_rule(window::kCGWindowName) };
    let pid = i64::from(pid);

    for item in windows.iter() {
        let dict_ref = *item as CFDictionaryRef;
        if dict_ref.is_null() {
            continue;
        }
        let dict: CFDictionary<CFString, CFType> =
            unsafe { CFDictionary::wrap_under_get_rule(dict_ref) };

        if dict_i64(&dict, &key_window_pid) != Some(pid) {
            continue;
        }

        if let Some(name) = dict_string(&dict, &key_window_name) {
            let name = sanitize_window_title(&name);
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    None
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Platform for MacOSPlatform {
    fn refresh_processes(&mut self) {
        self.processes.refresh();
    }

    fn match_processes(&self, titles: &[&str]) -> Vec<ProcessHandle> {
        self.processes.matching(titles)
    }

    fn window_title(&self, process: &ProcessHandle) -> String {
        window_name_for_pid(process.pid).unwrap_or_default()
    }

    fn open_url(&self, url: &str) -> Result<(), AppError> {
        run_command("open", &[url])
    }

    fn show_notification(&self, text: &str) -> Result<(), AppError> {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_applescript(text),
            escape_applescript(APPLICATION_NAME)
        );
        run_command("osascript", &["-e", &script])
    }

    fn set_automatic_startup(&self, enable: bool) -> Result<(), AppError> {
        let dirs = BaseDirs::new().ok_or(AppError::NoProjectDirs)?;
        let path = dirs
            .home_dir()
            .join("Library")
            .join("LaunchAgents")
            .join(format!("{LAUNCH_AGENT_LABEL}.plist"));
        let executable = std::env::current_exe()?;

        autostart::write_entry(
            &path,
            &autostart::launch_agent(LAUNCH_AGENT_LABEL, &executable),
            enable,
        )
    }

    fn state_symbol(&self, enabled: bool) -> char {
        if enabled {
            '✓'
        } else {
            '✗'
        }
    }
}
