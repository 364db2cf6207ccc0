//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_PAUSE_SECS, DEFAULT_MIN_PAUSE_SECS, DEFAULT_OUTPUT_DIR, DEFAULT_USER_AGENT,
    ISSUER_RESULT_URL, ISSUER_SEARCH_URL,
};
use crate::error_handling::InitializationError;
use crate::pacing::PacingPolicy;
use crate::session::SessionConfig;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the session waits between state-advancing requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PacingMode {
    /// Wait for the operator to press a key (X exits)
    Interactive,
    /// Sleep for a random number of seconds between the pause bounds
    Timed,
}

/// The two SEDI pages the session talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Issuer search page; fetched once, then used for every search submission
    pub search_url: String,
    /// Transactions view for the issuer selected by the last search
    pub results_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search_url: ISSUER_SEARCH_URL.to_string(),
            results_url: ISSUER_RESULT_URL.to_string(),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use insider_transactions::{Config, PacingMode};
///
/// let config = Config {
///     issuers: vec!["00012345".to_string()],
///     pacing: PacingMode::Timed,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Issuer numbers to look up, in order
    pub issuers: Vec<String>,

    /// Directory receiving `<issuer>.html` files
    pub output_dir: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Pause between requests: operator confirmation or random sleep
    pub pacing: PacingMode,

    /// Timed pause lower bound in seconds (inclusive)
    pub min_pause_secs: u64,

    /// Timed pause upper bound in seconds (exclusive)
    pub max_pause_secs: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Per-request timeout in seconds; `None` keeps the client default (no timeout)
    pub timeout_seconds: Option<u64>,

    /// Overwritten with every response body when set
    pub dump_file: Option<PathBuf>,

    /// Search and results URLs
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issuers: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            pacing: PacingMode::Interactive,
            min_pause_secs: DEFAULT_MIN_PAUSE_SECS,
            max_pause_secs: DEFAULT_MAX_PAUSE_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: None,
            dump_file: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Builds the pacing policy selected by `pacing`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidPauseBounds` in timed mode when
    /// `min_pause_secs >= max_pause_secs`.
    pub fn pacing_policy(&self) -> Result<PacingPolicy, InitializationError> {
        match self.pacing {
            PacingMode::Interactive => Ok(PacingPolicy::Interactive),
            PacingMode::Timed => PacingPolicy::timed(self.min_pause_secs, self.max_pause_secs),
        }
    }

    /// Extracts the settings the disclosure session needs.
    pub fn session_config(&self) -> Result<SessionConfig, InitializationError> {
        Ok(SessionConfig {
            endpoints: self.endpoints.clone(),
            pacing: self.pacing_policy()?,
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout_seconds,
            dump_file: self.dump_file.clone(),
        })
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "insider_transactions",
    version,
    about = "Canadian insider transactions: download SEDI transaction pages by issuer number"
)]
pub struct Cli {
    /// Issuer numbers to look up
    #[arg(value_name = "ISSUER_ID", required = true)]
    pub issuers: Vec<String>,

    /// Directory for the downloaded HTML files (created if missing)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Pause between requests
    #[arg(long, value_enum, default_value_t = PacingMode::Interactive)]
    pub pacing: PacingMode,

    /// Timed pause lower bound in seconds
    #[arg(long, default_value_t = DEFAULT_MIN_PAUSE_SECS)]
    pub min_pause: u64,

    /// Timed pause upper bound in seconds (exclusive)
    #[arg(long, default_value_t = DEFAULT_MAX_PAUSE_SECS)]
    pub max_pause: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Write every server response to this file (debugging)
    #[arg(long)]
    pub dump_file: Option<PathBuf>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            issuers: cli.issuers,
            output_dir: cli.output_dir,
            log_level: cli.log_level,
            log_format: cli.log_format,
            pacing: cli.pacing,
            min_pause_secs: cli.min_pause,
            max_pause_secs: cli.max_pause,
            user_agent: cli.user_agent,
            timeout_seconds: cli.timeout_seconds,
            dump_file: cli.dump_file,
            endpoints: Endpoints::default(),
        }
    }
}
