use std::path::PathBuf;

use clap::Parser;

use crate::core::settings::Settings;

/// Command-line arguments. All optional; the settings file fills the gaps.
#[derive(Parser, Debug)]
#[command(name = "vpn-tray", version, about = "Tray status and control for VPN/dial-up profiles")]
pub struct Args {
    /// Directory containing on.png, off.png and check.png
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Do not show connect/disconnect toasts
    #[arg(long)]
    pub no_notifications: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Loads the settings file and applies command-line overrides on top.
    pub fn resolve_settings(&self) -> Settings {
        let mut settings = match self.settings.clone().or_else(Settings::default_path) {
            Some(path) => Settings::load_or_default(&path),
            None => Settings::default(),
        };
        if let Some(dir) = &self.assets_dir {
            settings.assets_dir = Some(dir.clone());
        }
        if self.no_notifications {
            settings.notifications = false;
        }
        settings
    }
}
