//! insider_transactions library: SEDI insider transaction downloads
//!
//! This library replays the SEDI (System for Electronic Disclosure by Insiders)
//! issuer search forms the way a browser would and saves each issuer's
//! transaction view as HTML.
//!
//! # Example
//!
//! ```no_run
//! use insider_transactions::{run_lookups, Config, PacingMode};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     issuers: vec!["00012345".to_string()],
//!     pacing: PacingMode::Timed,
//!     ..Default::default()
//! };
//!
//! let report = run_lookups(config).await?;
//! println!("Downloaded {} of {} issuers", report.downloaded, report.requested);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Requests are still made one at a
//! time: SEDI's rate limiting makes the pauses between them part of the
//! protocol.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
pub mod output;
pub mod pacing;
pub mod parse;
pub mod session;

// Re-export public API
pub use config::{Cli, Config, Endpoints, LogFormat, LogLevel, PacingMode};
pub use error_handling::{InitializationError, SessionError};
pub use pacing::{OperatorInput, PacingPolicy, PauseBounds};
pub use parse::{FormFields, PageKind};
pub use run::{run_lookups, run_lookups_with_operator, RunReport};
pub use session::{DisclosureSession, SessionConfig};

// Internal run module (contains the per-issuer loop)
mod run {
    use anyhow::{Context, Result};
    use log::{info, warn};
    use std::path::PathBuf;
    use std::time::Instant;

    use crate::config::Config;
    use crate::output::{ensure_output_dir, output_path, write_html};
    use crate::pacing::OperatorInput;
    use crate::session::DisclosureSession;

    /// Results of a lookup run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Number of issuers requested
        pub requested: usize,
        /// Issuers whose transaction page was saved
        pub downloaded: usize,
        /// Issuers SEDI reported no transactions for
        pub no_results: usize,
        /// Directory holding the saved pages
        pub output_dir: PathBuf,
        /// True if the operator stopped the run at a pause
        pub aborted: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl RunReport {
        fn new(config: &Config) -> Self {
            Self {
                requested: config.issuers.len(),
                downloaded: 0,
                no_results: 0,
                output_dir: config.output_dir.clone(),
                aborted: false,
                elapsed_seconds: 0.0,
            }
        }

        fn finish(mut self, start: Instant) -> Self {
            self.elapsed_seconds = start.elapsed().as_secs_f64();
            self
        }
    }

    /// Looks up every issuer in `config.issuers`, in order, over one session.
    ///
    /// Each found transaction page is written to `<output_dir>/<issuer>.html`
    /// in the encoding SEDI declared, with one progress line per issuer on
    /// stdout. An operator abort ends the run early and is reported through
    /// `RunReport::aborted`, not as an error.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The pause bounds are invalid
    /// - The output directory cannot be created or a page cannot be written
    /// - Any request to SEDI fails (the run stops at the first failure)
    pub async fn run_lookups(config: Config) -> Result<RunReport> {
        run(config, None).await
    }

    /// Like [`run_lookups`], but interactive pauses read the operator's
    /// replies from `operator` instead of stdin.
    ///
    /// # Errors
    ///
    /// Same as [`run_lookups`].
    pub async fn run_lookups_with_operator(
        config: Config,
        operator: OperatorInput,
    ) -> Result<RunReport> {
        run(config, Some(operator)).await
    }

    async fn run(config: Config, operator: Option<OperatorInput>) -> Result<RunReport> {
        let start = Instant::now();
        let mut report = RunReport::new(&config);

        let session_config = config
            .session_config()
            .context("Invalid pacing configuration")?;
        ensure_output_dir(&config.output_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create output directory {}",
                    config.output_dir.display()
                )
            })?;

        if config.issuers.is_empty() {
            warn!("No issuer numbers given; nothing to do");
            return Ok(report.finish(start));
        }

        let opened = match operator {
            Some(operator) => {
                DisclosureSession::open_with_operator(session_config, operator).await
            }
            None => DisclosureSession::open(session_config).await,
        };
        let mut session = match opened {
            Ok(session) => session,
            Err(e) if e.is_abort() => {
                report.aborted = true;
                return Ok(report.finish(start));
            }
            Err(e) => return Err(e).context("Failed to open SEDI session"),
        };

        for issuer in &config.issuers {
            match session.lookup(issuer).await {
                Ok(Some(html)) => {
                    let path = output_path(&config.output_dir, issuer);
                    println!("Downloading HTML to {}", path.display());
                    write_html(&html, session.encoding(), &path)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    report.downloaded += 1;
                }
                Ok(None) => {
                    println!("No transactions available for Issuer Number {issuer}");
                    report.no_results += 1;
                }
                Err(e) if e.is_abort() => {
                    report.aborted = true;
                    break;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Lookup failed for issuer {issuer}"))
                }
            }
        }
        session.close();

        info!(
            "Looked up {} issuer(s): {} downloaded, {} without transactions",
            report.downloaded + report.no_results,
            report.downloaded,
            report.no_results
        );
        Ok(report.finish(start))
    }
}
