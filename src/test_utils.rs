//! Shared test doubles for the tracker, channel and console tests.

#![cfg(test)]

use crate::error::AppError;
use crate::platform::process::match_by_name;
use crate::platform::{Platform, ProcessHandle};
use crate::rpc::{Activity, ClientCallbacks, PresenceClient, Transport};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FakeSystem {
    /// (pid, process name, window title)
    processes: Vec<(u32, String, String)>,
    opened_urls: Vec<String>,
    notifications: Vec<String>,
    autostart: Option<bool>,
    refreshes: usize,
}

/// Scripted process table. Clones share state so a test can change the
/// running processes while a tracker owns another clone.
#[derive(Debug, Clone, Default)]
pub struct FakePlatform {
    system: Arc<Mutex<FakeSystem>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self, pid: u32, name: &str, window_title: &str) {
        self.system
            .lock()
            .unwrap()
            .processes
            .push((pid, name.to_string(), window_title.to_string()));
    }

    pub fn kill_all(&self) {
        self.system.lock().unwrap().processes.clear();
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.system.lock().unwrap().opened_urls.clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.system.lock().unwrap().notifications.clone()
    }

    pub fn autostart(&self) -> Option<bool> {
        self.system.lock().unwrap().autostart
    }

    pub fn refreshes(&self) -> usize {
        self.system.lock().unwrap().refreshes
    }
}

impl Platform for FakePlatform {
    fn refresh_processes(&mut self) {
        self.system.lock().unwrap().refreshes += 1;
    }

    fn match_processes(&self, titles: &[&str]) -> Vec<ProcessHandle> {
        let entries: Vec<(u32, String)> = self
            .system
            .lock()
            .unwrap()
            .processes
            .iter()
            .map(|(pid, name, _)| (*pid, name.clone()))
            .collect();
        match_by_name(entries, titles)
    }

    fn window_title(&self, process: &ProcessHandle) -> String {
        self.system
            .lock()
            .unwrap()
            .processes
            .iter()
            .find(|(pid, _, _)| *pid == process.pid)
            .map(|(_, _, title)| title.clone())
            .unwrap_or_default()
    }

    fn open_url(&self, url: &str) -> Result<(), AppError> {
        self.system.lock().unwrap().opened_urls.push(url.to_string());
        Ok(())
    }

    fn show_notification(&self, text: &str) -> Result<(), AppError> {
        self.system.lock().unwrap().notifications.push(text.to_string());
        Ok(())
    }

    fn set_automatic_startup(&self, enable: bool) -> Result<(), AppError> {
        self.system.lock().unwrap().autostart = Some(enable);
        Ok(())
    }

    fn state_symbol(&self, enabled: bool) -> char {
        if enabled {
            'y'
        } else {
            'n'
        }
    }
}

/// Every call that reached the fake transport, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Connect(String),
    /// Application id, then the pushed details and state text
    Push(String, String, String),
    Disconnect(String),
}

#[derive(Debug, Default)]
struct TransportLog {
    events: Vec<TransportEvent>,
    failing_connects: usize,
    failing_pushes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    log: Arc<Mutex<TransportLog>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransportEvent> {
        self.log.lock().unwrap().events.clone()
    }

    pub fn fail_next_connects(&self, count: usize) {
        self.log.lock().unwrap().failing_connects = count;
    }

    pub fn fail_next_pushes(&self, count: usize) {
        self.log.lock().unwrap().failing_pushes = count;
    }
}

impl Transport for RecordingTransport {
    type Client = RecordingClient;

    fn connect(
        &mut self,
        application_id: &str,
        callbacks: ClientCallbacks,
    ) -> Result<RecordingClient, AppError> {
        let mut log = self.log.lock().unwrap();
        if log.failing_connects > 0 {
            log.failing_connects -= 1;
            return Err(AppError::EndpointNotFound);
        }
        log.events
            .push(TransportEvent::Connect(application_id.to_string()));
        drop(log);

        (callbacks.on_ready)("tester");
        Ok(RecordingClient {
            application_id: application_id.to_string(),
            log: Arc::clone(&self.log),
        })
    }
}

#[derive(Debug)]
pub struct RecordingClient {
    application_id: String,
    log: Arc<Mutex<TransportLog>>,
}

impl PresenceClient for RecordingClient {
    fn push(&mut self, activity: &Activity) -> Result<(), AppError> {
        let mut log = self.log.lock().unwrap();
        if log.failing_pushes > 0 {
            log.failing_pushes -= 1;
            return Err(AppError::Io(std::io::Error::from(
                std::io::ErrorKind::BrokenPipe,
            )));
        }
        log.events.push(TransportEvent::Push(
            self.application_id.clone(),
            activity.details.clone().unwrap_or_default(),
            activity.state.clone().unwrap_or_default(),
        ));
        Ok(())
    }

    fn disconnect(self) {
        self.log
            .lock()
            .unwrap()
            .events
            .push(TransportEvent::Disconnect(self.application_id));
    }
}
