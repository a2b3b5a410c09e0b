#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use clap::Parser;
use log::{error, info};

use vpn_tray::ui::args::Args;
use vpn_tray::utils::logging::{init_logging, level_from_verbosity};

fn main() {
    let args = Args::parse();
    if let Err(e) = init_logging(level_from_verbosity(args.verbose), args.log_file.as_deref()) {
        eprintln!("Could not open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
    info!("vpn-tray exited.");
}

#[cfg(windows)]
fn run(args: Args) -> anyhow::Result<()> {
    use anyhow::Context;

    let settings = args.resolve_settings();
    let api = vpn_tray::platform_api().context("remote access unavailable")?;
    // Blocking pool for dial/hang-up; kept alive for the whole process.
    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    vpn_tray::ui::tray::run(settings, api, runtime.handle().clone())
}

#[cfg(not(windows))]
fn run(_args: Args) -> anyhow::Result<()> {
    vpn_tray::platform_api()?;
    Ok(())
}
