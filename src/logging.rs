use std::io::Write;

use env_logger::WriteStyle;
use log::LevelFilter;

/// Install a stderr logger printing `[CARBALL | LEVEL] message` lines
///
/// `RUST_LOG` overrides the default `info` filter.
/// Fails if a logger was already installed.
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "[CARBALL | {}] {}", record.level(), record.args()))
        .write_style(WriteStyle::Auto)
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init()
}
