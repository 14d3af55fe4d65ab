use super::autostart;
use super::{run_command, Platform, ProcessHandle, ProcessTable};
use crate::classifier::sanitize_window_title;
use crate::error::AppError;
use std::ptr;
use windows_sys::Win32::Foundation::{BOOL, HWND, LPARAM};
use windows_sys::Win32::UI::Shell::ShellExecuteW;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextW, GetWindowThreadProcessId, IsWindowVisible, SW_SHOWNORMAL,
};

const TITLE_CAPACITY: usize = 512;

/// `ShellExecuteW` reports success with any value above this.
const SHELL_EXECUTE_MIN_SUCCESS: isize = 32;

pub struct WindowsPlatform {
    processes: ProcessTable,
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            processes: ProcessTable::new(),
        }
    }
}

/// NUL-terminated UTF-16 for the wide Win32 calls.
fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Shared with `find_title` through the `LPARAM` of `EnumWindows`.
struct TitleSearch {
    pid: u32,
    title: Option<String>,
}

/// Stops the enumeration at the first visible, titled window of `search.pid`.
#[allow(
    unsafe_code,
    clippy::as_conversions,
    reason = "EnumWindows hands the search state back as a raw LPARAM"
)]
unsafe extern "system" fn find_title(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = unsafe { &mut *(lparam as *mut TitleSearch) };

    let mut owner = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, &mut owner) };
    if owner != search.pid || unsafe { IsWindowVisible(hwnd) } == 0 {
        return 1;
    }

    let mut buffer = [0u16; TITLE_CAPACITY];
    let capacity = i32::try_from(buffer.len()).unwrap_or(i32::MAX);
    let copied = unsafe { GetWindowTextW(hwnd, buffer.as_mut_ptr(), capacity) };
    let title = usize::try_from(copied)
        .ok()
        .and_then(|len| buffer.get(..len))
        .map(String::from_utf16_lossy)
        .unwrap_or_default();

    if title.is_empty() {
        return 1;
    }
    search.title = Some(title);
    0
}

#[allow(
    unsafe_code,
    clippy::as_conversions,
    reason = "EnumWindows takes the search state as a raw LPARAM"
)]
fn window_title_for_pid(pid: u32) -> Option<String> {
    let mut search = TitleSearch { pid, title: None };
    // Returns 0 both on failure and when the callback stops early
    unsafe { EnumWindows(Some(find_title), ptr::addr_of_mut!(search) as LPARAM) };
    search.title
}

#[allow(
    unsafe_code,
    clippy::as_conversions,
    reason = "ShellExecuteW returns a pseudo HINSTANCE holding a status code"
)]
fn shell_open(target: &str) -> Result<(), AppError> {
    let verb = to_wide("open");
    let file = to_wide(target);
    let result = unsafe {
        ShellExecuteW(
            ptr::null_mut(),
            verb.as_ptr(),
            file.as_ptr(),
            ptr::null(),
            ptr::null(),
            SW_SHOWNORMAL,
        )
    };

    let code = result as isize;
    if code > SHELL_EXECUTE_MIN_SUCCESS {
        Ok(())
    } else {
        Err(AppError::CommandFailed {
            command: "ShellExecuteW",
            reason: format!("error code {code}"),
        })
    }
}

impl Platform for WindowsPlatform {
    fn refresh_processes(&mut self) {
        self.processes.refresh();
    }

    fn match_processes(&self, titles: &[&str]) -> Vec<ProcessHandle> {
        self.processes.matching(titles)
    }

    fn window_title(&self, process: &ProcessHandle) -> String {
        window_title_for_pid(process.pid)
            .map(|title| sanitize_window_title(&title))
            .unwrap_or_default()
    }

    fn open_url(&self, url: &str) -> Result<(), AppError> {
        shell_open(url)
    }

    // Toasts need a registered AppUserModelID; uptime is still logged
    fn show_notification(&self, _text: &str) -> Result<(), AppError> {
        Err(AppError::Unsupported {
            operation: "show_notification",
        })
    }

    fn set_automatic_startup(&self, enable: bool) -> Result<(), AppError> {
        let executable = std::env::current_exe()?;
        let args = autostart::registry_arguments(&executable, enable);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_command("reg", &args)
    }

    fn state_symbol(&self, enabled: bool) -> char {
        if enabled {
            '✔'
        } else {
            '✖'
        }
    }
}
