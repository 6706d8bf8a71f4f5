//! FluidNC status query protocol
//!
//! Fetches a fresh status report over an unreliable link, announcing each
//! attempt on the console.

use super::commands::GetStatusCommand;
use crate::communication::{send_and_wait_with_retry, CommandExecutor, RetryPolicy};
use fluidtel_core::{CancelSignal, ControllerError, MessageDispatcher, MessageLevel};

/// Text announcing a status query attempt
pub fn fetching_status_message(attempt: u32, max_attempts: u32) -> String {
    if attempt == 1 {
        "*** Fetching device status".to_string()
    } else {
        format!(
            "*** Fetching device status ({} of {})...",
            attempt, max_attempts
        )
    }
}

/// Query the controller for a status report
///
/// Sends `?` until a status report arrives, at most `policy.max_attempts`
/// times. Cancellation ends the query with [`ControllerError::Interrupted`].
pub async fn query_for_status_report<E>(
    executor: &E,
    messages: &MessageDispatcher,
    policy: &RetryPolicy,
    cancel: &CancelSignal,
) -> Result<GetStatusCommand, ControllerError>
where
    E: CommandExecutor + ?Sized,
{
    let max_attempts = policy.max_attempts;
    send_and_wait_with_retry(executor, GetStatusCommand::new, policy, cancel, |attempt| {
        messages.dispatch(
            MessageLevel::Info,
            fetching_status_message(attempt, max_attempts),
        );
    })
    .await
}
