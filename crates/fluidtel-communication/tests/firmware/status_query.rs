use async_trait::async_trait;
use fluidtel_communication::firmware::fluidnc::*;
use fluidtel_communication::{
    send_and_wait_with_retry, CommandExecutor, ControllerCommand, RetryPolicy,
};
use fluidtel_core::{
    CancelHandle, CancelSignal, ControllerError, ControllerState, MessageDispatcher, MessageLevel,
    Units,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// What the mock controller does with one command
#[derive(Debug, Clone)]
enum Reply {
    /// Feed these lines and return
    Lines(Vec<&'static str>),
    /// Never answer
    Silent,
    /// Fail the send
    Fail(ControllerError),
}

struct ScriptedExecutor {
    replies: Mutex<VecDeque<Reply>>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: &mut dyn ControllerCommand) -> Result<(), ControllerError> {
        self.sent.lock().unwrap().push(command.command().to_string());
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Silent);
        match reply {
            Reply::Lines(lines) => {
                for line in lines {
                    command.append_response(line);
                }
                Ok(())
            }
            Reply::Silent => {
                std::future::pending::<()>().await;
                Ok(())
            }
            Reply::Fail(e) => Err(e),
        }
    }
}

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(20))
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<fluidtel_core::Message>) -> Vec<String> {
    let mut texts = Vec::new();
    while let Ok(message) = rx.try_recv() {
        assert_eq!(message.level, MessageLevel::Info);
        texts.push(message.text);
    }
    texts
}

#[tokio::test]
async fn test_first_attempt_succeeds() {
    let executor = ScriptedExecutor::new(vec![Reply::Lines(vec![
        "<Idle|MPos:1.000,2.000,3.000|FS:0,0>",
    ])]);
    let messages = MessageDispatcher::default();
    let mut rx = messages.subscribe();

    let command =
        query_for_status_report(&executor, &messages, &fast_policy(10), &CancelSignal::never())
            .await
            .unwrap();

    let status = command.controller_status(None, Units::MM).unwrap();
    assert_eq!(status.state, ControllerState::Idle);
    assert_eq!(executor.sent(), vec!["?".to_string()]);
    assert_eq!(drain(&mut rx), vec!["*** Fetching device status".to_string()]);
}

#[tokio::test]
async fn test_retries_after_timeouts_and_errors() {
    let executor = ScriptedExecutor::new(vec![
        Reply::Silent,
        Reply::Lines(vec!["error:9"]),
        Reply::Fail(ControllerError::Timeout { timeout_ms: 5 }),
        Reply::Lines(vec!["[MSG:INFO: busy]", "<Run|WPos:0,0,0>"]),
    ]);
    let messages = MessageDispatcher::default();
    let mut rx = messages.subscribe();

    let command =
        query_for_status_report(&executor, &messages, &fast_policy(10), &CancelSignal::never())
            .await
            .unwrap();

    assert_eq!(command.status_report(), Some("<Run|WPos:0,0,0>"));
    assert_eq!(executor.sent().len(), 4);
    assert_eq!(
        drain(&mut rx),
        vec![
            "*** Fetching device status".to_string(),
            "*** Fetching device status (2 of 10)...".to_string(),
            "*** Fetching device status (3 of 10)...".to_string(),
            "*** Fetching device status (4 of 10)...".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_retries_exhausted() {
    let executor = ScriptedExecutor::new(vec![]);
    let result = query_for_status_report(
        &executor,
        &MessageDispatcher::default(),
        &fast_policy(3),
        &CancelSignal::never(),
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        ControllerError::RetriesExhausted { attempts: 3 }
    );
    assert_eq!(executor.sent().len(), 3);
}

#[tokio::test]
async fn test_cancel_before_first_attempt() {
    let executor = ScriptedExecutor::new(vec![Reply::Lines(vec!["<Idle>"])]);
    let (handle, signal) = CancelHandle::new();
    handle.cancel();

    let result =
        query_for_status_report(&executor, &MessageDispatcher::default(), &fast_policy(10), &signal)
            .await;

    assert_eq!(result.unwrap_err(), ControllerError::Interrupted);
    assert!(executor.sent().is_empty());
}

#[tokio::test]
async fn test_cancel_during_attempt_stops_retrying() {
    let executor = ScriptedExecutor::new(vec![]);
    let (handle, signal) = CancelHandle::new();
    let policy = RetryPolicy::new(10, Duration::from_secs(30));

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        query_for_status_report(&executor, &MessageDispatcher::default(), &policy, &signal),
    )
    .await
    .expect("cancellation should end the query promptly");

    canceller.await.unwrap();
    assert_eq!(result.unwrap_err(), ControllerError::Interrupted);
    assert_eq!(executor.sent().len(), 1);
}

#[tokio::test]
async fn test_executor_interruption_propagates() {
    let executor = ScriptedExecutor::new(vec![
        Reply::Fail(ControllerError::Interrupted),
        Reply::Lines(vec!["<Idle>"]),
    ]);

    let result = query_for_status_report(
        &executor,
        &MessageDispatcher::default(),
        &fast_policy(10),
        &CancelSignal::never(),
    )
    .await;

    assert_eq!(result.unwrap_err(), ControllerError::Interrupted);
    assert_eq!(executor.sent().len(), 1);
}

#[tokio::test]
async fn test_retry_combinator_reports_attempt_numbers() {
    let executor = ScriptedExecutor::new(vec![
        Reply::Silent,
        Reply::Silent,
        Reply::Lines(vec!["<Hold:0>"]),
    ]);
    let mut attempts = Vec::new();

    let command = send_and_wait_with_retry(
        &executor,
        GetStatusCommand::new,
        &fast_policy(5),
        &CancelSignal::never(),
        |attempt| attempts.push(attempt),
    )
    .await
    .unwrap();

    assert_eq!(attempts, vec![1, 2, 3]);
    assert!(command.is_ok());
}
