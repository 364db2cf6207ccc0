//! Pauses between state-advancing requests.
//!
//! SEDI withholds results from clients that submit its forms too quickly, which
//! shows up as false "no transactions" pages. Every request that advances the
//! form flow is therefore preceded by a pause: either a random sleep or an
//! operator confirmation.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::error_handling::{InitializationError, SessionError};

/// Prompt shown in interactive mode.
pub const CONFIRM_PROMPT: &str = "Press any key to continue (X to exit): ";

/// Where interactive replies are read from.
pub type OperatorInput = Box<dyn AsyncBufRead + Send + Unpin>;

/// A non-empty `[min, max)` range of whole seconds.
///
/// Only [`PauseBounds::new`] builds one, so a timed pause always has a delay
/// to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseBounds {
    min: u64,
    max: u64,
}

impl PauseBounds {
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidPauseBounds` if `min >= max`.
    pub fn new(min: u64, max: u64) -> Result<Self, InitializationError> {
        if min >= max {
            return Err(InitializationError::InvalidPauseBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Inclusive lower bound in seconds.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Exclusive upper bound in seconds.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Draws a delay in seconds uniformly from the range.
    pub fn choose_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        rng.random_range(self.min..self.max)
    }
}

/// How to wait before the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// Block until the operator presses Enter; `x`/`X` aborts the run.
    Interactive,
    /// Sleep a whole number of seconds drawn from the bounds.
    Timed(PauseBounds),
}

impl PacingPolicy {
    /// Timed policy over `[min, max)`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidPauseBounds` if the range is empty.
    pub fn timed(min: u64, max: u64) -> Result<Self, InitializationError> {
        PauseBounds::new(min, max).map(PacingPolicy::Timed)
    }
}

/// True if the operator's reply asks to stop the run.
pub fn is_abort_reply(reply: &str) -> bool {
    reply
        .trim_end_matches(['\r', '\n'])
        .eq_ignore_ascii_case("x")
}

/// Prompts on stdout and reads one reply line from `input`.
///
/// End of input counts as an abort: nobody is there to confirm.
pub async fn confirm<R: AsyncBufRead + Unpin + ?Sized>(input: &mut R) -> Result<(), SessionError> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{CONFIRM_PROMPT}")?;
    stdout.flush()?;

    let mut reply = String::new();
    let read = input.read_line(&mut reply).await?;
    if read == 0 || is_abort_reply(&reply) {
        log::info!("Exiting");
        return Err(SessionError::Aborted);
    }
    Ok(())
}

/// Sleeps `secs` seconds, rewriting a countdown line on stdout each second.
async fn countdown(secs: u64) -> Result<(), SessionError> {
    let mut stdout = std::io::stdout();
    let mut remaining = secs;
    write!(stdout, "\rSleeping (t-{remaining} seconds)\t")?;
    stdout.flush()?;
    while remaining > 0 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        remaining -= 1;
        write!(stdout, "\rSleeping (t-{remaining} seconds)\t")?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Applies a [`PacingPolicy`], keeping one operator reader for the whole run
/// so piped replies are not lost between prompts.
pub struct Pacer {
    policy: PacingPolicy,
    operator: Option<OperatorInput>,
}

impl fmt::Debug for Pacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pacer")
            .field("policy", &self.policy)
            .field("operator", &self.operator.as_ref().map(|_| "<input>"))
            .finish()
    }
}

impl Pacer {
    /// Creates a pacer; stdin is only opened on the first interactive pause.
    pub fn new(policy: PacingPolicy) -> Self {
        Self {
            policy,
            operator: None,
        }
    }

    /// Creates a pacer that reads interactive replies from `operator`
    /// instead of stdin.
    pub fn with_operator(policy: PacingPolicy, operator: OperatorInput) -> Self {
        Self {
            policy,
            operator: Some(operator),
        }
    }

    /// The policy being applied.
    pub fn policy(&self) -> PacingPolicy {
        self.policy
    }

    /// Waits according to the policy.
    ///
    /// # Errors
    ///
    /// `SessionError::Aborted` when the operator declines to continue, or
    /// `SessionError::Io` if the terminal cannot be read or written.
    pub async fn pause(&mut self) -> Result<(), SessionError> {
        match self.policy {
            PacingPolicy::Timed(bounds) => {
                let secs = bounds.choose_delay(&mut rand::rng());
                log::debug!("Pausing {}s before next request", secs);
                countdown(secs).await
            }
            PacingPolicy::Interactive => {
                let operator = self
                    .operator
                    .get_or_insert_with(|| Box::new(BufReader::new(tokio::io::stdin())));
                confirm(operator).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_rejects_empty_range() {
        assert!(PauseBounds::new(5, 5).is_err());
        assert!(matches!(
            PacingPolicy::timed(450, 90),
            Err(InitializationError::InvalidPauseBounds { min: 450, max: 90 })
        ));
        assert!(PacingPolicy::timed(5, 5).is_err());
    }

    #[test]
    fn test_timed_accepts_default_bounds() {
        let policy = PacingPolicy::timed(90, 450).expect("valid bounds");
        let PacingPolicy::Timed(bounds) = policy else {
            panic!("expected a timed policy, got {policy:?}");
        };
        assert_eq!((bounds.min(), bounds.max()), (90, 450));
    }

    #[test]
    fn test_choose_delay_within_half_open_range() {
        let bounds = PauseBounds::new(90, 450).expect("valid bounds");
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let delay = bounds.choose_delay(&mut rng);
            assert!((90..450).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn test_choose_delay_single_value_range() {
        let bounds = PauseBounds::new(0, 1).expect("valid bounds");
        assert_eq!(bounds.choose_delay(&mut rand::rng()), 0);
    }

    #[test]
    fn test_is_abort_reply() {
        assert!(is_abort_reply("x\n"));
        assert!(is_abort_reply("X\r\n"));
        assert!(!is_abort_reply("\n"));
        assert!(!is_abort_reply("next\n"));
        assert!(!is_abort_reply(" x\n"));
    }

    #[tokio::test]
    async fn test_confirm_continues_on_enter() {
        let mut input: &[u8] = b"\n";
        assert!(confirm(&mut input).await.is_ok());
    }

    #[tokio::test]
    async fn test_confirm_aborts_on_x() {
        let mut input: &[u8] = b"X\n";
        let result = confirm(&mut input).await;
        assert!(matches!(result, Err(SessionError::Aborted)));
    }

    #[tokio::test]
    async fn test_confirm_aborts_on_end_of_input() {
        let mut input: &[u8] = b"";
        let result = confirm(&mut input).await;
        assert!(matches!(result, Err(SessionError::Aborted)));
    }

    #[tokio::test]
    async fn test_confirm_reads_one_line_at_a_time() {
        let mut input: &[u8] = b"\nx\n";
        assert!(confirm(&mut input).await.is_ok());
        assert!(matches!(
            confirm(&mut input).await,
            Err(SessionError::Aborted)
        ));
    }

    #[tokio::test]
    async fn test_pacer_zero_second_pause() {
        let policy = PacingPolicy::timed(0, 1).expect("valid bounds");
        let mut pacer = Pacer::new(policy);
        assert!(pacer.pause().await.is_ok());
        assert_eq!(pacer.policy(), policy);
    }

    #[tokio::test]
    async fn test_pacer_reads_injected_operator() {
        let mut pacer = Pacer::with_operator(PacingPolicy::Interactive, Box::new(&b"\nx\n"[..]));
        assert!(pacer.pause().await.is_ok());
        assert!(matches!(pacer.pause().await, Err(SessionError::Aborted)));
    }
}
