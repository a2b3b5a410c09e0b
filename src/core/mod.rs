pub mod controller;
pub mod dispatcher;
pub mod presenter;
pub mod profiles;
pub mod settings;
pub mod tray_state;
pub mod watcher;

// Re-export the modules here for easy import elsewhere.
pub use controller::*;
pub use dispatcher::*;
pub use presenter::*;
pub use profiles::*;
pub use tray_state::*;
pub use watcher::*;
