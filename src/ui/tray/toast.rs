use log::{debug, warn};
use notify_rust::{Notification, Timeout};

/// Shows a transient toast. Failures are logged, never surfaced.
pub fn show_toast(message: &str, timeout_ms: u32) {
    debug!("Toast: {}", message);
    let result = Notification::new()
        .summary(message)
        .timeout(Timeout::Milliseconds(timeout_ms))
        .show();
    if let Err(e) = result {
        warn!("Could not show notification '{}': {}", message, e);
    }
}
