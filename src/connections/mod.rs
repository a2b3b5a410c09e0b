pub mod errors;
pub mod ras;
#[cfg(windows)]
pub mod windows;

// Re-export the modules here for easy import elsewhere.
pub use errors::*;
pub use ras::*;

use std::sync::Arc;

/// The remote-access backend for the platform we were built for.
#[cfg(windows)]
pub fn platform_api() -> Result<Arc<dyn RasApi>, RasError> {
    Ok(Arc::new(windows::WindowsRas::new()))
}

#[cfg(not(windows))]
pub fn platform_api() -> Result<Arc<dyn RasApi>, RasError> {
    Err(RasError::Unsupported)
}
