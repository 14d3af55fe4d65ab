//! Ownership of the per-channel Discord connections.
//!
//! Only the dominant channel's slot is ever pushed to. When dominance moves,
//! the old slot is torn down before the new connection is opened.

use crate::models::{Channel, Families, PresenceDescriptor};
use crate::rpc::{Activity, ClientCallbacks, PresenceClient, Transport};
use log::{debug, info, warn};

pub struct ChannelClientManager<T: Transport> {
    transport: T,
    families: Families,
    clients: [Option<T::Client>; 2],
    previous: Option<Channel>,
}

impl<T: Transport> ChannelClientManager<T> {
    pub fn new(transport: T, families: Families) -> Self {
        Self {
            transport,
            families,
            clients: [None, None],
            previous: None,
        }
    }

    /// Channel that received the last publish, if any.
    pub fn previous_channel(&self) -> Option<Channel> {
        self.previous
    }

    pub fn is_connected(&self, channel: Channel) -> bool {
        self.clients
            .get(channel.index())
            .is_some_and(Option::is_some)
    }

    /// Route `presence` to the client of its dominant channel.
    pub fn publish(&mut self, presence: &PresenceDescriptor) {
        let channel = presence.channel;

        if let Some(previous) = self.previous.filter(|p| *p != channel) {
            info!("Dominant channel switched from {previous} to {channel}");
            self.dispose(previous);
            self.connect(channel);
        } else if !self.is_connected(channel) {
            self.connect(channel);
        }
        self.previous = Some(channel);

        let asset = &self.families.get(channel).asset;
        let activity = Activity::from_presence(presence, asset);

        let Some(client) = self.slot(channel).as_mut() else {
            return;
        };
        if let Err(e) = client.push(&activity) {
            warn!("Failed to update presence on {channel}: {e}");
            self.dispose(channel);
        }
    }

    /// Tear down every live client and forget the dominant channel.
    pub fn dispose_all(&mut self) {
        for channel in Channel::ALL {
            self.dispose(channel);
        }
        self.previous = None;
    }

    fn connect(&mut self, channel: Channel) {
        // Never leave a stale handle behind a fresh one
        self.dispose(channel);

        let application_id = self.families.get(channel).application_id.clone();
        match self
            .transport
            .connect(&application_id, logging_callbacks(channel))
        {
            Ok(client) => *self.slot(channel) = Some(client),
            Err(e) => warn!("Failed to connect to Discord for {channel}: {e}"),
        }
    }

    fn dispose(&mut self, channel: Channel) {
        if let Some(client) = self.slot(channel).take() {
            debug!("Disposing {channel} client");
            client.disconnect();
        }
    }

    fn slot(&mut self, channel: Channel) -> &mut Option<T::Client> {
        let [modern, legacy] = &mut self.clients;
        match channel {
            Channel::Modern => modern,
            Channel::Legacy => legacy,
        }
    }
}

fn logging_callbacks(channel: Channel) -> ClientCallbacks {
    ClientCallbacks {
        on_ready: Box::new(move |user| {
            info!("Connected to Discord as user: {user} ({channel})");
        }),
        on_presence_update: Box::new(move || debug!("Presence updated on {channel}")),
    }
}
