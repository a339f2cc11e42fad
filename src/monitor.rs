//! # Monitor Session Module
//!
//! Owns the live-polling lifecycle for simulated hardware ingestion.
//! Runs in a dedicated thread with its own Tokio runtime so polling never
//! blocks the UI thread; the UI talks to it over std mpsc channels.
//!
//! ## Lifecycle
//! A `Start` command spawns one poll loop guarded by a fresh atomic stop
//! flag. `Stop` raises the flag. A second `Start` without an intervening
//! `Stop` supersedes: the previous flag is raised before the new loop is
//! spawned, so at most one poller is live regardless of caller discipline.
//!
//! ## Error Policy
//! A failed poll tick is skipped silently (debug log only) and the next tick
//! proceeds; there is no backoff. Stopping never aborts
//! an in-flight request, but its result is discarded once the flag is up.

use crate::api::ApiClient;
use crate::model::VitalsReading;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub enum MonitorCommand {
    Start { interval: Duration },
    Stop,
}

#[derive(Debug, Clone)]
pub enum MonitorUpdate {
    Reading(VitalsReading),
    Stopped,
}

/// Manages the polling lifecycle for live vitals.
///
/// Runs in a dedicated thread with its own Tokio runtime to avoid blocking
/// the UI thread. Processes start/stop commands and manages stop flags for
/// clean session teardown.
pub struct MonitorManager {
    command_receiver: mpsc::Receiver<MonitorCommand>,
    update_sender: mpsc::Sender<MonitorUpdate>,
    client: ApiClient,
}

impl MonitorManager {
    /// Creates a new MonitorManager.
    ///
    /// Returns the manager and a sender for issuing commands from the UI thread.
    pub fn new(
        client: ApiClient,
        update_sender: mpsc::Sender<MonitorUpdate>,
    ) -> (Self, mpsc::Sender<MonitorCommand>) {
        let (command_sender, command_receiver) = mpsc::channel();

        let manager = MonitorManager {
            command_receiver,
            update_sender,
            client,
        };

        (manager, command_sender)
    }

    /// Runs the monitor management loop.
    ///
    /// This should be called in a spawned thread. It will block until the
    /// command channel is closed.
    pub fn run(self) {
        let rt = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to create monitor runtime: {}", e);
                return;
            }
        };

        let mut slot = PollerSlot::new();

        while let Ok(command) = self.command_receiver.recv() {
            match command {
                MonitorCommand::Start { interval } => {
                    log::info!("Monitor manager: starting poll loop ({:?})", interval);

                    let should_stop = slot.arm();

                    let client = self.client.clone();
                    let sender = self.update_sender.clone();

                    rt.spawn(poll_loop(client, interval, should_stop, sender));
                }
                MonitorCommand::Stop => {
                    log::info!("Monitor manager: stop requested");
                    slot.disarm();
                }
            }
        }

        log::info!("Monitor manager: command channel closed, shutting down");
    }
}

/// Stop flag of the currently live poller, if any. Arming supersedes: the
/// previous poller's flag is raised before the fresh flag is handed out, so
/// at most one poller is ever live.
struct PollerSlot {
    flag: Option<Arc<AtomicBool>>,
}

impl PollerSlot {
    fn new() -> Self {
        Self { flag: None }
    }

    fn arm(&mut self) -> Arc<AtomicBool> {
        if let Some(flag) = self.flag.take() {
            flag.store(true, Ordering::Relaxed);
        }
        let flag = Arc::new(AtomicBool::new(false));
        self.flag = Some(flag.clone());
        flag
    }

    fn disarm(&mut self) {
        if let Some(flag) = self.flag.take() {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

/// Polls the latest-reading endpoint until the stop flag is raised.
///
/// The flag is re-checked after every fetch so a response that arrives after
/// stop is discarded instead of forwarded.
async fn poll_loop(
    client: ApiClient,
    interval: Duration,
    should_stop: Arc<AtomicBool>,
    sender: mpsc::Sender<MonitorUpdate>,
) {
    loop {
        if should_stop.load(Ordering::Relaxed) {
            let _ = sender.send(MonitorUpdate::Stopped);
            return;
        }

        match client.monitor_latest().await {
            Ok(reading) => {
                if should_stop.load(Ordering::Relaxed) {
                    // Late result after stop; drop it.
                    let _ = sender.send(MonitorUpdate::Stopped);
                    return;
                }
                if sender.send(MonitorUpdate::Reading(reading)).is_err() {
                    // UI side is gone
                    return;
                }
            }
            Err(e) => {
                // Skip the tick; the next one retries with no backoff.
                log::debug!("monitor poll skipped: {}", e);
            }
        }

        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_manager_creation() {
        let client = ApiClient::new("http://localhost:3000").expect("client");
        let (update_sender, _update_receiver) = mpsc::channel();
        let (_manager, command_sender) = MonitorManager::new(client, update_sender);

        // Verify we can send commands
        assert!(command_sender.send(MonitorCommand::Stop).is_ok());
    }

    #[test]
    fn test_second_start_supersedes_first_poller() {
        let mut slot = PollerSlot::new();
        let first = slot.arm();
        let second = slot.arm();

        // the first poller was told to stop before the second went live
        assert!(first.load(Ordering::Relaxed));
        assert!(!second.load(Ordering::Relaxed));
    }

    #[test]
    fn test_start_after_stop_arms_a_fresh_poller() {
        let mut slot = PollerSlot::new();
        let first = slot.arm();
        slot.disarm();
        assert!(first.load(Ordering::Relaxed));

        let second = slot.arm();
        assert!(!second.load(Ordering::Relaxed));

        slot.disarm();
        assert!(second.load(Ordering::Relaxed));
    }

    #[test]
    fn test_poll_loop_exits_once_flag_is_raised() {
        // Flag raised before the first tick: the loop must report Stopped
        // without touching the network.
        let client = ApiClient::new("http://localhost:9").expect("client");
        let (sender, receiver) = mpsc::channel();
        let flag = Arc::new(AtomicBool::new(true));

        let rt = Runtime::new().expect("runtime");
        rt.block_on(poll_loop(client, Duration::from_millis(10), flag, sender));

        assert!(matches!(
            receiver.recv().expect("update"),
            MonitorUpdate::Stopped
        ));
    }
}
