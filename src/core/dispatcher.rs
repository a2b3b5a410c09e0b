use std::sync::Arc;

use log::{error, info};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::connections::ras::RasApi;

/// Issues dial and hang-up requests without waiting for them.
///
/// The OS calls block for as long as the remote side takes, so they run on the
/// runtime's blocking pool. Their outcome is only logged; the tray learns about
/// it through the next watcher event.
#[derive(Clone)]
pub struct CommandDispatcher {
    api: Arc<dyn RasApi>,
    runtime: Handle,
}

impl CommandDispatcher {
    pub fn new(api: Arc<dyn RasApi>, runtime: Handle) -> Self {
        Self { api, runtime }
    }

    /// Dial `profile`. Dropping the returned handle detaches the request.
    pub fn connect(&self, profile: &str) -> JoinHandle<()> {
        let api = self.api.clone();
        let profile = profile.to_string();
        info!("Connect requested for '{}'", profile);
        self.runtime.spawn_blocking(move || match api.dial(&profile) {
            Ok(()) => info!("Dial of '{}' completed.", profile),
            Err(e) => error!("Dial of '{}' failed: {}", profile, e),
        })
    }

    /// Hang up `profile`. Dropping the returned handle detaches the request.
    pub fn disconnect(&self, profile: &str) -> JoinHandle<()> {
        let api = self.api.clone();
        let profile = profile.to_string();
        info!("Disconnect requested for '{}'", profile);
        self.runtime.spawn_blocking(move || match api.hang_up(&profile) {
            Ok(()) => info!("Hang-up of '{}' completed.", profile),
            Err(e) => error!("Hang-up of '{}' failed: {}", profile, e),
        })
    }
}
