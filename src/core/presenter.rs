use std::sync::Arc;

use log::{debug, warn};

use crate::connections::ras::{ActiveConnection, RasApi};
use crate::core::profiles::ProfileEnumerator;
use crate::core::tray_state::TrayState;
use crate::core::watcher::ConnectionEvent;

/// Turns current OS truth into a [`TrayState`].
///
/// Nothing is cached between calls: every refresh re-reads both the active
/// connections and the phonebook.
#[derive(Clone)]
pub struct TrayPresenter {
    api: Arc<dyn RasApi>,
    profiles: ProfileEnumerator,
}

impl TrayPresenter {
    pub fn new(api: Arc<dyn RasApi>) -> Self {
        Self {
            profiles: ProfileEnumerator::new(api.clone()),
            api,
        }
    }

    /// Active connections; an OS failure reads as "none connected".
    pub fn list_active_connections(&self) -> Vec<ActiveConnection> {
        self.api.active_connections().unwrap_or_else(|e| {
            warn!("Connection enumeration failed, showing none connected: {}", e);
            Vec::new()
        })
    }

    pub fn refresh(&self) -> TrayState {
        let active = self.list_active_connections();
        let profiles = self.profiles.list_profiles();
        let state = TrayState::build(&profiles, &active);
        debug!(
            "Tray rebuilt: {} profile(s), {} active, tooltip {:?}",
            profiles.len(),
            active.len(),
            state.tooltip
        );
        state
    }
}

/// Toast shown once when the watcher gives up.
pub const WATCHER_FAILED_TEXT: &str = "Connection monitoring stopped";

/// Toast text for a transition, e.g. `Connected to Office`.
pub fn notification_text(event: &ConnectionEvent) -> String {
    let verb = match event {
        ConnectionEvent::Connected(_) => "Connected to",
        ConnectionEvent::Disconnected(_) => "Disconnected from",
    };
    format!("{} {}", verb, event.profile())
}
