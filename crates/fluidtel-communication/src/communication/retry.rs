//! Bounded retry for controller commands
//!
//! Attempts are strictly sequential. Each attempt builds a fresh command,
//! sends it, and waits at most [`RetryPolicy::attempt_timeout`] for it to
//! complete. Cancellation aborts the whole operation immediately.

use super::command::{CommandExecutor, ControllerCommand};
use fluidtel_core::{CancelSignal, ControllerError};
use std::time::Duration;

/// Attempt cap and per-attempt timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, at least one
    pub max_attempts: u32,
    /// Time allowed for each attempt
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            attempt_timeout,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(10, Duration::from_millis(4000))
    }
}

enum AttemptOutcome {
    Cancelled,
    Failed(ControllerError),
    Finished,
}

/// Send a command until it completes successfully
///
/// `create` builds the command for each attempt and `on_attempt` is called
/// with the 1-based attempt number before it is sent. Returns the first
/// command that completed without error.
///
/// # Errors
/// - [`ControllerError::Interrupted`] when `cancel` fires, before or during
///   an attempt, or when the executor itself reports an interruption
/// - [`ControllerError::RetriesExhausted`] when no attempt succeeded
pub async fn send_and_wait_with_retry<C, E, F, P>(
    executor: &E,
    mut create: F,
    policy: &RetryPolicy,
    cancel: &CancelSignal,
    mut on_attempt: P,
) -> Result<C, ControllerError>
where
    C: ControllerCommand,
    E: CommandExecutor + ?Sized,
    F: FnMut() -> C,
    P: FnMut(u32),
{
    for attempt in 1..=policy.max_attempts {
        if cancel.is_cancelled() {
            return Err(ControllerError::Interrupted);
        }

        on_attempt(attempt);
        let mut command = create();
        tracing::debug!(
            "Sending {:?} (attempt {} of {})",
            command.command(),
            attempt,
            policy.max_attempts
        );

        let outcome = {
            let execution =
                tokio::time::timeout(policy.attempt_timeout, executor.execute(&mut command));
            tokio::select! {
                biased;
                _ = cancel.cancelled() => AttemptOutcome::Cancelled,
                result = execution => match result {
                    Err(_) => AttemptOutcome::Failed(ControllerError::Timeout {
                        timeout_ms: u64::try_from(policy.attempt_timeout.as_millis())
                            .unwrap_or(u64::MAX),
                    }),
                    Ok(Err(e)) => AttemptOutcome::Failed(e),
                    Ok(Ok(())) => AttemptOutcome::Finished,
                },
            }
        };

        match outcome {
            AttemptOutcome::Cancelled | AttemptOutcome::Failed(ControllerError::Interrupted) => {
                tracing::debug!("Retry loop interrupted on attempt {}", attempt);
                return Err(ControllerError::Interrupted);
            }
            AttemptOutcome::Failed(e) => {
                tracing::warn!("Attempt {} of {} failed: {}", attempt, policy.max_attempts, e);
            }
            AttemptOutcome::Finished if command.is_done() && command.is_ok() => {
                return Ok(command);
            }
            AttemptOutcome::Finished => {
                tracing::warn!(
                    "Attempt {} of {} completed with an error response",
                    attempt,
                    policy.max_attempts
                );
            }
        }
    }

    Err(ControllerError::RetriesExhausted {
        attempts: policy.max_attempts,
    })
}
