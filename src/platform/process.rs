//! Process table snapshot backed by `sysinfo`.
//!
//! Every platform shares this: only window titles and shell integration
//! differ between operating systems.

use super::ProcessHandle;
use crate::constants::PROCESS_NAME_LIMIT;
use log::trace;
use std::collections::HashSet;
use sysinfo::{Pid, Process, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

pub struct ProcessTable {
    system: System,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::new().with_processes(ProcessRefreshKind::new()),
            ),
        }
    }

    /// Refresh names and pids only; nothing else is needed for matching.
    pub fn refresh(&mut self) {
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, ProcessRefreshKind::new());
        trace!("Process table refreshed: {} entries", self.system.processes().len());
    }

    /// Processes only. On Linux the table also lists every thread, usually
    /// under the name of its process.
    fn processes(&self) -> impl Iterator<Item = (&Pid, &Process)> {
        self.system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
    }

    pub fn matching(&self, titles: &[&str]) -> Vec<ProcessHandle> {
        let entries = self
            .processes()
            .map(|(pid, process)| (pid.as_u32(), process.name().to_string_lossy().into_owned()));

        match_by_name(entries, titles)
    }
}

/// Whether another process runs under this executable's name.
pub fn is_another_instance_running() -> bool {
    let Ok(own_pid) = sysinfo::get_current_pid() else {
        return false;
    };

    let mut table = ProcessTable::new();
    table.refresh();
    let Some(own_name) = table.system.process(own_pid).map(|p| p.name().to_owned()) else {
        return false;
    };

    let running = table
        .processes()
        .any(|(pid, process)| *pid != own_pid && process.name() == own_name);
    running
}

/// Select the entries whose name equals one of `titles`.
///
/// When nothing matches exactly, every title is retried truncated to
/// [`PROCESS_NAME_LIMIT`] bytes, since some kernels clip process names.
pub fn match_by_name<I>(entries: I, titles: &[&str]) -> Vec<ProcessHandle>
where
    I: IntoIterator<Item = (u32, String)>,
{
    let entries: Vec<(u32, String)> = entries.into_iter().collect();

    let exact = collect_matches(&entries, titles.iter().copied());
    if !exact.is_empty() {
        return exact;
    }

    collect_matches(&entries, titles.iter().map(|title| truncate_name(title)))
}

fn collect_matches<'a>(
    entries: &[(u32, String)],
    titles: impl Iterator<Item = &'a str>,
) -> Vec<ProcessHandle> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for title in titles {
        for (pid, name) in entries {
            if name_matches(name, title) && seen.insert(*pid) {
                matches.push(ProcessHandle {
                    pid: *pid,
                    name: name.clone(),
                });
            }
        }
    }

    matches
}

fn name_matches(name: &str, title: &str) -> bool {
    name == title || name.strip_suffix(".exe") == Some(title)
}

/// Cut `name` to the process-name limit without splitting a character.
pub fn truncate_name(name: &str) -> &str {
    if name.len() <= PROCESS_NAME_LIMIT {
        return name;
    }

    let mut end = PROCESS_NAME_LIMIT;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name.get(..end).unwrap_or(name)
}
