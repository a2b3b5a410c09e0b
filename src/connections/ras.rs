use std::time::Duration;

use super::errors::RasError;

/// Longest entry name the OS accepts (`RAS_MaxEntryName`), in UTF-16 units.
pub const MAX_ENTRY_NAME: usize = 256;

/// A profile that is currently connected.
///
/// Only the entry name is kept: the OS owns the session, and hang-up looks the
/// connection up again by name instead of holding on to a stale handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConnection {
    pub name: String,
}

impl ActiveConnection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The operating system's remote-access subsystem.
///
/// Every method is a blocking OS call. Implementations must be shareable across
/// the UI thread, the watcher thread and the dispatcher's blocking pool.
pub trait RasApi: Send + Sync + 'static {
    /// Number of configured phonebook entries, learned with a zero-sized buffer.
    fn count_entries(&self) -> Result<usize, RasError>;

    /// Reads up to `count` entry names, in phonebook order.
    fn read_entries(&self, count: usize) -> Result<Vec<String>, RasError>;

    /// Currently established connections, in enumeration order.
    fn active_connections(&self) -> Result<Vec<ActiveConnection>, RasError>;

    /// Dials `entry` with its stored parameters. Blocks until the OS finishes.
    fn dial(&self, entry: &str) -> Result<(), RasError>;

    /// Hangs up the active connection for `entry`.
    fn hang_up(&self, entry: &str) -> Result<(), RasError>;

    /// Registers for connect/disconnect notifications on every connection.
    fn watch(&self) -> Result<Box<dyn ChangeSignal>, RasError>;
}

/// A subscription to "some connection changed" notifications.
///
/// Dropping the signal unsubscribes.
pub trait ChangeSignal: Send {
    /// Waits up to `timeout`; `Ok(true)` when a change was signalled.
    fn wait(&mut self, timeout: Duration) -> Result<bool, RasError>;
}

/// Rejects names longer than the phonebook can hold.
pub fn validate_entry_name(name: &str) -> Result<(), RasError> {
    if name.encode_utf16().count() > MAX_ENTRY_NAME {
        return Err(RasError::NameTooLong {
            name: name.to_string(),
            max: MAX_ENTRY_NAME,
        });
    }
    Ok(())
}

/// Reads a NUL-terminated UTF-16 buffer; a buffer without NUL is read whole.
pub fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// Copies `value` plus a terminating NUL into a fixed UTF-16 buffer.
///
/// A value that does not fit is rejected, never truncated.
pub fn copy_wide(dst: &mut [u16], value: &str) -> Result<(), RasError> {
    let units: Vec<u16> = value.encode_utf16().collect();
    if units.len() >= dst.len() {
        return Err(RasError::NameTooLong {
            name: value.to_string(),
            max: dst.len().saturating_sub(1),
        });
    }
    dst[..units.len()].copy_from_slice(&units);
    dst[units.len()] = 0;
    Ok(())
}
