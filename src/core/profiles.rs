use std::sync::Arc;

use log::{debug, warn};

use crate::connections::{errors::RasError, ras::RasApi};

/// Reads the configured connection-profile names from the OS phonebook.
///
/// Stateless: every call goes back to the OS, so it is safe to call in the
/// middle of a tray rebuild.
#[derive(Clone)]
pub struct ProfileEnumerator {
    api: Arc<dyn RasApi>,
}

impl ProfileEnumerator {
    pub fn new(api: Arc<dyn RasApi>) -> Self {
        Self { api }
    }

    /// Profile names in phonebook order, or the OS error that prevented reading them.
    ///
    /// The first OS call only learns the entry count. When it reports zero
    /// entries no second call is made.
    pub fn try_list_profiles(&self) -> Result<Vec<String>, RasError> {
        let count = self.api.count_entries()?;
        if count == 0 {
            debug!("Phonebook has no entries");
            return Ok(Vec::new());
        }
        let names = self.api.read_entries(count)?;
        debug!("Phonebook lists {} entries", names.len());
        Ok(names)
    }

    /// Like [`try_list_profiles`](Self::try_list_profiles), but an OS failure
    /// reads as "no profiles".
    pub fn list_profiles(&self) -> Vec<String> {
        self.try_list_profiles().unwrap_or_else(|e| {
            warn!("Profile enumeration failed, showing no profiles: {}", e);
            Vec::new()
        })
    }
}
