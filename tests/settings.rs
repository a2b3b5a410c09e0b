use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::tempdir;
use vpn_tray::core::settings::{Settings, SettingsError, DEFAULT_NOTIFICATION_TIMEOUT_MS};
use vpn_tray::ui::args::Args;

#[test]
fn missing_file_gives_defaults() -> anyhow::Result<()> {
    let dir = tempdir()?;

    let settings = Settings::load_or_default(&dir.path().join("settings.json"));

    assert_eq!(settings, Settings::default());
    assert!(settings.notifications);
    assert_eq!(settings.notification_timeout_ms, DEFAULT_NOTIFICATION_TIMEOUT_MS);
    assert_eq!(settings.assets_dir(), PathBuf::from("."));
    Ok(())
}

#[test]
fn partial_file_keeps_defaults_for_the_rest() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "notifications": false }"#)?;

    let settings = Settings::from_file(&path)?;

    assert!(!settings.notifications);
    assert_eq!(settings.notification_timeout_ms, DEFAULT_NOTIFICATION_TIMEOUT_MS);
    assert_eq!(settings.assets_dir, None);
    Ok(())
}

#[test]
fn malformed_file_is_reported_strictly_and_ignored_leniently() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json")?;

    assert!(matches!(
        Settings::from_file(&path),
        Err(SettingsError::Parse { .. })
    ));
    assert_eq!(Settings::load_or_default(&path), Settings::default());
    Ok(())
}

#[test]
fn command_line_overrides_the_file() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "assets_dir": "from-file", "notifications": true, "notification_timeout_ms": 5000 }"#,
    )?;

    let args = Args::try_parse_from([
        "vpn-tray",
        "--settings",
        path.to_str().expect("utf-8 temp path"),
        "--assets-dir",
        "from-cli",
        "--no-notifications",
    ])?;
    let settings = args.resolve_settings();

    assert_eq!(settings.assets_dir(), PathBuf::from("from-cli"));
    assert!(!settings.notifications);
    assert_eq!(settings.notification_timeout_ms, 5000);
    Ok(())
}

#[test]
fn no_flags_is_valid() {
    let args = Args::try_parse_from(["vpn-tray"]).expect("every flag is optional");
    assert_eq!(args.verbose, 0);
    assert!(!args.no_notifications);
}
