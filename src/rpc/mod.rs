//! Discord Rich Presence over the local IPC socket.

pub mod client;
pub mod codec;
pub mod payload;
#[cfg_attr(
    not(windows),
    allow(dead_code, reason = "only Windows named pipes need polled reads")
)]
mod pipe;

pub use client::DiscordClient;
pub use payload::Activity;

use crate::error::AppError;

/// Hooks fired by a client as Discord acknowledges it.
pub struct ClientCallbacks {
    pub on_ready: Box<dyn Fn(&str) + Send>,
    pub on_presence_update: Box<dyn Fn() + Send>,
}

impl ClientCallbacks {
    pub fn silent() -> Self {
        Self {
            on_ready: Box::new(|_| {}),
            on_presence_update: Box::new(|| {}),
        }
    }
}

impl std::fmt::Debug for ClientCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCallbacks").finish_non_exhaustive()
    }
}

/// A connected presence handle bound to one application id.
pub trait PresenceClient: Send {
    fn push(&mut self, activity: &Activity) -> Result<(), AppError>;

    /// Clear the presence and release the connection. Never fails.
    fn disconnect(self)
    where
        Self: Sized;
}

/// Creates presence clients.
pub trait Transport: Send {
    type Client: PresenceClient;

    fn connect(
        &mut self,
        application_id: &str,
        callbacks: ClientCallbacks,
    ) -> Result<Self::Client, AppError>;
}

/// Connects to the locally running Discord desktop client.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscordTransport;

impl Transport for DiscordTransport {
    type Client = DiscordClient;

    fn connect(
        &mut self,
        application_id: &str,
        callbacks: ClientCallbacks,
    ) -> Result<DiscordClient, AppError> {
        DiscordClient::connect(application_id, callbacks)
    }
}
