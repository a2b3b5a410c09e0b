use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::connections::{errors::RasError, ras::RasApi};

/// How long one wait on the OS signal may block before the stop flag is re-checked.
const WAIT_SLICE: Duration = Duration::from_millis(200);

/// A connection transition reported by the OS, carrying the profile name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connected(String),
    Disconnected(String),
}

impl ConnectionEvent {
    pub fn profile(&self) -> &str {
        match self {
            ConnectionEvent::Connected(name) | ConnectionEvent::Disconnected(name) => name,
        }
    }
}

/// What the watcher hands to its callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatcherEvent {
    Transition(ConnectionEvent),
    /// Waiting on the OS signal failed. This is the last event; the thread has
    /// ended and no further transitions will be reported.
    Failed(String),
}

/// Listens for RAS connect/disconnect notifications on a background thread.
///
/// The OS only signals that *something* changed; the watcher keeps the last
/// set of active names and turns the difference into [`ConnectionEvent`]s.
/// Events are delivered on the watcher thread, so the callback must hand them
/// over to whoever owns UI state. If the OS signal fails the watcher reports
/// [`WatcherEvent::Failed`] and ends; it does not resubscribe.
pub struct ConnectionWatcher {
    api: Arc<dyn RasApi>,
    stop_flag: Arc<AtomicBool>,
    watcher_thread: Option<thread::JoinHandle<()>>,
}

impl ConnectionWatcher {
    /// Create (but not start) a watcher.
    pub fn new(api: Arc<dyn RasApi>) -> Self {
        Self {
            api,
            stop_flag: Arc::new(AtomicBool::new(false)),
            watcher_thread: None,
        }
    }

    /// Subscribe to OS notifications and start delivering events to `on_event`.
    ///
    /// Subscription happens on the calling thread so a failure is returned here
    /// rather than lost on the background thread.
    pub fn start(
        &mut self,
        mut on_event: impl FnMut(WatcherEvent) + Send + 'static,
    ) -> Result<(), RasError> {
        if self.is_running() {
            warn!("Connection watcher already running; start ignored.");
            return Ok(());
        }
        // Reap a thread that ended on its own before starting over.
        self.stop();

        let mut signal = self.api.watch()?;
        let mut known = match self.api.active_connections() {
            Ok(conns) => conns.into_iter().map(|c| c.name).collect::<Vec<_>>(),
            Err(e) => {
                warn!("Could not read initial connection set: {}", e);
                Vec::new()
            }
        };

        self.stop_flag.store(false, Ordering::SeqCst);
        let stop_clone = self.stop_flag.clone();
        let api = self.api.clone();

        let handle = thread::Builder::new()
            .name("ras-watcher".into())
            .spawn(move || {
                info!(
                    "Connection watcher started with {} active connection(s).",
                    known.len()
                );
                while !stop_clone.load(Ordering::SeqCst) {
                    match signal.wait(WAIT_SLICE) {
                        Ok(false) => continue,
                        Ok(true) => {}
                        Err(e) => {
                            error!("Waiting for RAS notifications failed: {}", e);
                            if !stop_clone.load(Ordering::SeqCst) {
                                on_event(WatcherEvent::Failed(e.to_string()));
                            }
                            break;
                        }
                    }

                    let current = match api.active_connections() {
                        Ok(conns) => conns.into_iter().map(|c| c.name).collect::<Vec<_>>(),
                        Err(e) => {
                            // Keep the old snapshot; a bogus empty set would fake disconnects.
                            warn!("Could not read connections after notification: {}", e);
                            continue;
                        }
                    };
                    for event in diff_snapshots(&known, &current) {
                        if stop_clone.load(Ordering::SeqCst) {
                            break;
                        }
                        debug!("RAS event: {:?}", event);
                        on_event(WatcherEvent::Transition(event));
                    }
                    known = current;
                }
                drop(signal);
                debug!("Connection watcher thread stopped.");
            })?;

        self.watcher_thread = Some(handle);
        Ok(())
    }

    /// Stop listening. When this returns no further callback will run.
    ///
    /// Calling it again, or on a watcher that never started, does nothing.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.watcher_thread.take() {
            if handle.join().is_err() {
                error!("Connection watcher thread panicked.");
            }
            info!("Connection watcher stopped.");
        }
    }

    /// True while the watcher thread is alive; false after `stop()` or a
    /// failed wait.
    pub fn is_running(&self) -> bool {
        self.watcher_thread
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ConnectionWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Events that turn `previous` into `current`: disconnects in `previous` order,
/// then connects in `current` order.
pub fn diff_snapshots(previous: &[String], current: &[String]) -> Vec<ConnectionEvent> {
    let gone = previous
        .iter()
        .filter(|name| !current.contains(name))
        .map(|name| ConnectionEvent::Disconnected(name.clone()));
    let new = current
        .iter()
        .filter(|name| !previous.contains(name))
        .map(|name| ConnectionEvent::Connected(name.clone()));
    gone.chain(new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unchanged_snapshot_yields_nothing() {
        let snapshot = names(&["Office", "Home"]);
        assert!(diff_snapshots(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn swap_reports_disconnect_before_connect() {
        let events = diff_snapshots(&names(&["Office"]), &names(&["Home"]));
        assert_eq!(
            events,
            vec![
                ConnectionEvent::Disconnected("Office".into()),
                ConnectionEvent::Connected("Home".into()),
            ]
        );
    }

    #[test]
    fn new_connections_follow_enumeration_order() {
        let events = diff_snapshots(&[], &names(&["B", "A"]));
        assert_eq!(
            events,
            vec![
                ConnectionEvent::Connected("B".into()),
                ConnectionEvent::Connected("A".into()),
            ]
        );
    }
}
