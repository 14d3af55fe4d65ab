//! Polling loop that follows GameMaker sessions.
//!
//! The tracker is Idle until a process of either family shows up, then runs
//! one Active tick per poll interval until every instance has exited.

pub mod uptime;

pub use uptime::{format_uptime, UptimeClock};

use crate::channel::ChannelClientManager;
use crate::classifier::sanitize_window_title;
use crate::config::SharedConfig;
use crate::constants::RUNNER_PROCESS;
use crate::models::{Channel, Families};
use crate::platform::Platform;
use crate::rpc::Transport;
use crate::safe_lock;
use crate::synthesizer::{synthesize, FamilySnapshot, SynthesisOptions};
use log::{debug, info};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// State of one continuous run of GameMaker.
struct TrackerSession<T: Transport> {
    /// Epoch seconds shown as the presence start time
    started_at: i64,
    began: Instant,
    channels: ChannelClientManager<T>,
}

pub struct TrackerService<P: Platform, T: Transport + Clone> {
    platform: P,
    transport: T,
    config: SharedConfig,
    families: Families,
    poll_interval: Duration,
    exit_delay: Duration,
    clock: UptimeClock,
    session: Option<TrackerSession<T>>,
}

impl<P: Platform, T: Transport + Clone> TrackerService<P, T> {
    /// Timing and application ids are read from `config` once, here.
    pub fn new(platform: P, transport: T, config: SharedConfig, clock: UptimeClock) -> Self {
        let (families, poll_interval, exit_delay) = {
            let config = safe_lock(&config, "Configuration");
            (
                Families::new(&config.rich_presence.application_ids),
                config.poll_interval(),
                config.exit_delay(),
            )
        };

        Self {
            platform,
            transport,
            config,
            families,
            poll_interval,
            exit_delay,
            clock,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Run the loop on a dedicated thread for the rest of the process.
    pub fn start(mut self) -> thread::JoinHandle<()>
    where
        P: 'static,
        T: 'static,
    {
        thread::spawn(move || {
            info!(
                "Tracker started, checking every {} ms",
                self.poll_interval.as_millis()
            );
            loop {
                self.tick();
                thread::sleep(self.poll_interval);
            }
        })
    }

    /// One complete check: snapshot, synthesize, publish.
    pub fn tick(&mut self) {
        self.platform.refresh_processes();
        let [modern, legacy] = Channel::ALL.map(|channel| self.snapshot(channel));
        let running = modern.process_count() + legacy.process_count() > 0;

        match (self.session.is_some(), running) {
            (false, false) => {}
            (false, true) => {
                self.begin_session();
                self.active_tick(&modern, &legacy);
            }
            (true, true) => self.active_tick(&modern, &legacy),
            (true, false) => self.end_session(),
        }
    }

    fn snapshot(&self, channel: Channel) -> FamilySnapshot {
        let family = self.families.get(channel);
        let titles = self
            .platform
            .match_processes(&family.title_refs())
            .iter()
            .map(|process| sanitize_window_title(&self.platform.window_title(process)))
            .collect();
        FamilySnapshot::new(channel, titles)
    }

    fn begin_session(&mut self) {
        info!("GameMaker detected, starting presence");
        self.clock.start();
        self.session = Some(TrackerSession {
            started_at: epoch_seconds(),
            began: Instant::now(),
            channels: ChannelClientManager::new(self.transport.clone(), self.families.clone()),
        });
    }

    fn active_tick(&mut self, modern: &FamilySnapshot, legacy: &FamilySnapshot) {
        let (include_titles, enabled) = {
            let config = safe_lock(&self.config, "Configuration");
            (
                config.rich_presence.include_project_titles,
                config.rich_presence.enable_for_discord,
            )
        };
        let runner_running = self.platform.count_processes(RUNNER_PROCESS) > 0;

        let Some(session) = self.session.as_mut() else {
            return;
        };

        let presence = synthesize(
            modern,
            legacy,
            SynthesisOptions {
                include_titles,
                runner_running,
                started_at: session.started_at,
            },
        );
        debug!(
            "Presence on {}: {:?} / {:?}",
            presence.channel, presence.details, presence.state
        );

        if enabled {
            session.channels.publish(&presence);
        } else {
            session.channels.dispose_all();
        }
    }

    fn end_session(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        info!(
            "GameMaker closed, removing presence after {} ms",
            self.exit_delay.as_millis()
        );
        session.channels.dispose_all();
        thread::sleep(self.exit_delay);
        self.clock.stop();

        info!(
            "Presence removed, session lasted {}",
            format_uptime(session.began.elapsed())
        );
    }
}

fn epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
