use thiserror::Error;

/// A central error enum for remote-access (RAS) failures.
#[derive(Debug, Error)]
pub enum RasError {
    /// A rasapi32 call returned a non-zero result code.
    #[error("{call} failed with RAS error {code}")]
    Api { call: &'static str, code: u32 },

    /// Hang-up was requested for a profile that has no active connection.
    #[error("No active connection for '{0}'")]
    NotConnected(String),

    /// The entry name does not fit the OS limit; it is never truncated.
    #[error("Entry name '{name}' is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    #[error("Remote access is not available on this platform")]
    Unsupported,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RasError {
    pub(crate) fn api(call: &'static str, code: u32) -> Self {
        RasError::Api { call, code }
    }
}
