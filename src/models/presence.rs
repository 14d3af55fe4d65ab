use super::family::Channel;

/// Status synthesized from one snapshot of the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceDescriptor {
    pub details: String,
    pub state: String,
    /// Epoch seconds at which the current tracking session began
    pub started_at: i64,
    pub channel: Channel,
}

impl PresenceDescriptor {
    pub fn new(details: String, state: String, started_at: i64, channel: Channel) -> Self {
        Self {
            details,
            state,
            started_at,
            channel,
        }
    }
}
