use super::codec::{read_frame, write_frame, Opcode};
use super::payload::{Activity, Command, Handshake, Response, SetActivityArgs};
use super::{ClientCallbacks, PresenceClient};
use crate::error::{is_disconnect, AppError};
use log::{debug, warn};
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::time::Duration;

/// Give up on a silent Discord after this long
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

const IPC_VERSION: u32 = 1;

pub trait IpcStream: Read + Write + Send {}

impl<T: Read + Write + Send> IpcStream for T {}

/// A live connection to the Discord client for one application id.
pub struct DiscordClient {
    stream: Box<dyn IpcStream>,
    application_id: String,
    pid: u32,
    callbacks: ClientCallbacks,
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("application_id", &self.application_id)
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

impl DiscordClient {
    /// Open the first reachable IPC endpoint and perform the handshake.
    pub fn connect(application_id: &str, callbacks: ClientCallbacks) -> Result<Self, AppError> {
        let stream = open_endpoint()?;
        Self::handshake(stream, application_id, callbacks)
    }

    pub(crate) fn handshake(
        mut stream: Box<dyn IpcStream>,
        application_id: &str,
        callbacks: ClientCallbacks,
    ) -> Result<Self, AppError> {
        write_frame(
            &mut *stream,
            Opcode::Handshake,
            &Handshake {
                v: IPC_VERSION,
                client_id: application_id,
            },
        )?;

        let (opcode, payload) = read_frame(&mut *stream)?;
        match opcode {
            Opcode::Frame => {
                let response: Response = serde_json::from_value(payload)?;
                if !response.is_ready() {
                    return Err(AppError::HandshakeRejected {
                        reason: response.message(),
                    });
                }
                (callbacks.on_ready)(response.username().unwrap_or("unknown"));
            }
            Opcode::Close => {
                return Err(AppError::HandshakeRejected {
                    reason: close_reason(&payload),
                });
            }
            Opcode::Handshake | Opcode::Ping | Opcode::Pong => {
                return Err(AppError::protocol(format!(
                    "unexpected {opcode:?} during handshake"
                )));
            }
        }

        Ok(Self {
            stream,
            application_id: application_id.to_string(),
            pid: std::process::id(),
            callbacks,
        })
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Replace the shown activity, or clear it with `None`.
    pub fn set_activity(&mut self, activity: Option<&Activity>) -> Result<(), AppError> {
        let command = Command {
            cmd: "SET_ACTIVITY",
            args: SetActivityArgs {
                pid: self.pid,
                activity,
            },
            nonce: uuid::Uuid::new_v4().to_string(),
        };
        write_frame(&mut *self.stream, Opcode::Frame, &command)?;

        loop {
            let (opcode, payload) = read_frame(&mut *self.stream)?;
            match opcode {
                Opcode::Frame => {
                    let response: Response = serde_json::from_value(payload)?;
                    if response.is_error() {
                        return Err(AppError::protocol(response.message()));
                    }
                    if activity.is_some() {
                        (self.callbacks.on_presence_update)();
                    }
                    return Ok(());
                }
                Opcode::Ping => {
                    write_frame(&mut *self.stream, Opcode::Pong, &payload)?;
                }
                Opcode::Close => {
                    return Err(AppError::protocol(format!(
                        "connection closed by Discord: {}",
                        close_reason(&payload)
                    )));
                }
                Opcode::Handshake | Opcode::Pong => {
                    debug!("Ignoring {opcode:?} frame");
                }
            }
        }
    }
}

impl PresenceClient for DiscordClient {
    fn push(&mut self, activity: &Activity) -> Result<(), AppError> {
        self.set_activity(Some(activity))
    }

    fn disconnect(mut self) {
        if let Err(e) = self.set_activity(None) {
            if !is_disconnect(&e) {
                warn!("Failed to clear presence for {}: {e}", self.application_id);
            }
        }
        if let Err(e) = write_frame(&mut *self.stream, Opcode::Close, &json!({})) {
            debug!("Close frame not delivered: {e}");
        }
    }
}

fn close_reason(payload: &Value) -> String {
    payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("no reason given")
        .to_string()
}

#[cfg(unix)]
fn open_endpoint() -> Result<Box<dyn IpcStream>, AppError> {
    use std::os::unix::net::UnixStream;

    for path in candidate_paths() {
        if let Ok(stream) = UnixStream::connect(&path) {
            stream.set_read_timeout(Some(READ_TIMEOUT))?;
            debug!("Connected to Discord IPC at {}", path.display());
            return Ok(Box::new(stream));
        }
    }

    Err(AppError::EndpointNotFound)
}

#[cfg(windows)]
fn open_endpoint() -> Result<Box<dyn IpcStream>, AppError> {
    use super::pipe::BoundedRead;
    use std::fs::OpenOptions;

    for i in 0..10 {
        let path = format!(r"\\?\pipe\discord-ipc-{i}");
        if let Ok(pipe) = OpenOptions::new().read(true).write(true).open(&path) {
            debug!("Connected to Discord IPC at {path}");
            return Ok(Box::new(BoundedRead::new(pipe, READ_TIMEOUT)));
        }
    }

    Err(AppError::EndpointNotFound)
}

#[cfg(not(any(unix, windows)))]
fn open_endpoint() -> Result<Box<dyn IpcStream>, AppError> {
    Err(AppError::Unsupported {
        operation: "Discord IPC",
    })
}

/// Socket locations tried in order, including sandboxed Discord installs.
#[cfg(unix)]
pub fn candidate_paths() -> Vec<std::path::PathBuf> {
    use std::path::PathBuf;

    let mut roots: Vec<PathBuf> = ["XDG_RUNTIME_DIR", "TMPDIR", "TMP", "TEMP"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .map(PathBuf::from)
        .collect();
    roots.push(PathBuf::from("/tmp"));

    let mut paths = Vec::new();
    for root in roots {
        for dir in [
            root.clone(),
            root.join("app").join("com.discordapp.Discord"),
            root.join("snap.discord"),
        ] {
            for i in 0..10 {
                let path = dir.join(format!("discord-ipc-{i}"));
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        }
    }
    paths
}
