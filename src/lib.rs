pub mod assets;
pub mod connections;
pub mod core;
pub mod ui;
pub mod utils;

// re‑export ergonomic entry points
pub use crate::connections::{platform_api, ActiveConnection, RasApi, RasError};
pub use crate::core::{ConnectionWatcher, ProfileEnumerator, TrayController, TrayPresenter, TrayState};
