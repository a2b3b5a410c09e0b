pub mod args;
pub mod view;
#[cfg(windows)]
pub mod tray;
