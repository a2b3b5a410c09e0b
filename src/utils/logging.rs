use std::fs::File;
use std::io;
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize logging using env_logger.
///
/// `level` is the default filter; `RUST_LOG` still overrides it, e.g.
/// `RUST_LOG=vpn_tray=debug vpn-tray`. A tray process has no console, so
/// `log_file` (when given) receives the output instead of stderr.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}

/// Maps `-v` repetitions onto a level: info, debug, then trace.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
