//! Logger initialization.
//!
//! Progress lines ("Downloading HTML to ...") go to stdout; everything logged
//! here goes to stderr through `env_logger`.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Dependencies that log every parsed page or request at debug level.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("cookie_store", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
];

/// Installs the global logger.
///
/// `level` applies to this crate and overrides `RUST_LOG`; the chattier
/// dependencies stay capped at [`QUIET_MODULES`] so `--log-level debug` shows
/// the form replay rather than the HTML tokenizer.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in QUIET_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module(env!("CARGO_PKG_NAME"), level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let (marker, level) = styled_level(record.level());
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    marker,
                    record.target().cyan(),
                    level,
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)
}

/// One JSON object per record, for log shippers.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn styled_level(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}
