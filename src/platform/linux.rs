use super::autostart;
use super::{run_command, Platform, ProcessHandle, ProcessTable};
use crate::classifier::sanitize_window_title;
use crate::constants::APPLICATION_NAME;
use crate::error::AppError;
use directories::BaseDirs;
use log::warn;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt, Window};

pub struct LinuxPlatform {
    processes: ProcessTable,
    conn: Option<x11rb::rust_connection::RustConnection>,
    root: Window,
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxPlatform {
    pub fn new() -> Self {
        let processes = ProcessTable::new();

        match x11rb::connect(None) {
            Ok((conn, screen_num)) => {
                let Some(root) = conn.setup().roots.get(screen_num).map(|s| s.root) else {
                    warn!(
                        "Invalid screen number {} ({} screens available). Window titles disabled.",
                        screen_num,
                        conn.setup().roots.len()
                    );
                    return Self { processes, conn: None, root: 0 };
                };
                Self {
                    processes,
                    conn: Some(conn),
                    root,
                }
            }
            Err(e) => {
                // Wayland-only or headless sessions still get process tracking
                warn!("Failed to connect to X server: {e}. Window titles disabled.");
                Self { processes, conn: None, root: 0 }
            }
        }
    }

    fn get_atom(&self, name: &str) -> Option<u32> {
        self.conn.as_ref()?
            .intern_atom(false, name.as_bytes())
            .ok()?
            .reply()
            .ok()
            .map(|r| r.atom)
    }

    fn get_window_property(&self, window: Window, atom: u32) -> Option<String> {
        let reply = self.conn.as_ref()?
            .get_property(false, window, atom, AtomEnum::ANY, 0, 1024)
            .ok()?
            .reply()
            .ok()?;

        if reply.value.is_empty() {
            return None;
        }

        String::from_utf8(reply.value).ok()
    }

    fn get_cardinals(&self, window: Window, atom: u32, max_len: u32) -> Option<Vec<u32>> {
        let reply = self.conn.as_ref()?
            .get_property(false, window, atom, AtomEnum::ANY, 0, max_len)
            .ok()?
            .reply()
            .ok()?;

        let values: Vec<u32> = reply.value32()?.collect();
        Some(values)
    }

    fn client_windows(&self) -> Vec<Window> {
        self.get_atom("_NET_CLIENT_LIST")
            .and_then(|atom| self.get_cardinals(self.root, atom, u32::MAX))
            .unwrap_or_default()
    }

    fn window_pid(&self, window: Window, pid_atom: u32) -> Option<u32> {
        self.get_cardinals(window, pid_atom, 1)?.first().copied()
    }

    fn window_name(&self, window: Window) -> Option<String> {
        self.get_atom("_NET_WM_NAME")
            .and_then(|atom| self.get_window_property(window, atom))
            .or_else(|| self.get_window_property(window, AtomEnum::WM_NAME.into()))
    }
}

impl Platform for LinuxPlatform {
    fn refresh_processes(&mut self) {
        self.processes.refresh();
    }

    fn match_processes(&self, titles: &[&str]) -> Vec<ProcessHandle> {
        self.processes.matching(titles)
    }

    fn window_title(&self, process: &ProcessHandle) -> String {
        let Some(pid_atom) = self.get_atom("_NET_WM_PID") else {
            return String::new();
        };

        self.client_windows()
            .into_iter()
            .filter(|window| self.window_pid(*window, pid_atom) == Some(process.pid))
            .filter_map(|window| self.window_name(window))
            .map(|name| sanitize_window_title(&name))
            .find(|name| !name.is_empty())
            .unwrap_or_default()
    }

    fn open_url(&self, url: &str) -> Result<(), AppError> {
        run_command("xdg-open", &[url])
    }

    fn show_notification(&self, text: &str) -> Result<(), AppError> {
        let app_name = format!("--app-name={APPLICATION_NAME}");
        run_command("notify-send", &[&app_name, text])
    }

    fn set_automatic_startup(&self, enable: bool) -> Result<(), AppError> {
        let dirs = BaseDirs::new().ok_or(AppError::NoProjectDirs)?;
        let path = dirs
            .config_dir()
            .join("autostart")
            .join("gamemaker-companion.desktop");
        let executable = std::env::current_exe()?;

        autostart::write_entry(&path, &autostart::desktop_entry(&executable), enable)
    }

    fn state_symbol(&self, enabled: bool) -> char {
        if enabled {
            '✅'
        } else {
            '❌'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires X11 display
    fn test_window_title_of_own_process_does_not_panic() {
        let mut platform = LinuxPlatform::new();
        platform.refresh_processes();
        let own = ProcessHandle {
            pid: std::process::id(),
            name: String::new(),
        };
        let _ = platform.window_title(&own);
    }

    #[test]
    fn test_state_symbols() {
        let platform = LinuxPlatform::new();
        assert_eq!(platform.state_symbol(true), '✅');
        assert_eq!(platform.state_symbol(false), '❌');
    }
}
