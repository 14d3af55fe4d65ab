use crate::error::AppError;

/// A running process matched against a family's executable titles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessHandle {
    pub pid: u32,
    pub name: String,
}

/// Everything the tracker and the console need from the host OS.
pub trait Platform: Send {
    /// Take a fresh snapshot of the process table.
    fn refresh_processes(&mut self);

    /// Processes in the last snapshot whose name matches any of `titles`.
    fn match_processes(&self, titles: &[&str]) -> Vec<ProcessHandle>;

    fn count_processes(&self, title: &str) -> usize {
        self.match_processes(&[title]).len()
    }

    /// Title of the process's main window, or an empty string on failure.
    fn window_title(&self, process: &ProcessHandle) -> String;

    fn open_url(&self, url: &str) -> Result<(), AppError>;

    fn show_notification(&self, text: &str) -> Result<(), AppError>;

    fn set_automatic_startup(&self, enable: bool) -> Result<(), AppError>;

    fn state_symbol(&self, enabled: bool) -> char;
}
