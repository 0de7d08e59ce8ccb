use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::api_client::StatusSource;
use crate::error::{Error, Result};
use crate::homework::{check_response, parse_status};
use crate::notifier::Notifier;

/// What a successful cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message went out and the cursor moved on.
    Notified,
    /// The latest status was already reported.
    Duplicate,
    /// No homework changed since the cursor.
    NoUpdates,
}

/// Polls the status API and relays changes to the chat.
pub struct Poller<S, N> {
    source: S,
    notifier: N,
    period: Duration,
    cursor: i64,
    last_message: String,
    last_error: String,
}

impl<S: StatusSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, cursor: i64, period: Duration) -> Self {
        Self {
            source,
            notifier,
            period,
            cursor,
            last_message: String::new(),
            last_error: String::new(),
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Polls forever. Only killing the process stops it.
    pub async fn run(mut self) {
        info!(
            "Polling every {}s starting from {}",
            self.period.as_secs(),
            self.cursor()
        );
        loop {
            self.tick().await;
            tokio::time::sleep(self.period).await;
        }
    }

    /// One cycle: poll, and report any failure to the chat once.
    pub async fn tick(&mut self) {
        match self.poll_once().await {
            Ok(outcome) => debug!("Cycle finished: {:?}", outcome),
            Err(e) => self.report_failure(&e).await,
        }
    }

    pub async fn poll_once(&mut self) -> Result<CycleOutcome> {
        let response = self.source.homework_statuses(self.cursor).await?;
        let homeworks = check_response(&response)?;
        debug!("API response matches the documentation");

        let Some(latest) = homeworks.first() else {
            debug!("No homework updates since {}", self.cursor);
            return Ok(CycleOutcome::NoUpdates);
        };

        let message = parse_status(latest)?;
        if message == self.last_message {
            debug!("No new homework status in the response");
            return Ok(CycleOutcome::Duplicate);
        }

        debug!("New homework status detected");
        self.notifier.send_message(&message).await?;
        self.last_message = message;

        match response.get("current_date").and_then(|date| date.as_i64()) {
            Some(date) => self.cursor = date,
            None => warn!(
                "Response has no usable current_date, keeping cursor at {}",
                self.cursor
            ),
        }

        Ok(CycleOutcome::Notified)
    }

    async fn report_failure(&mut self, failure: &Error) {
        let message = format!("Program failure: {failure}");
        error!("{}", message);

        if message == self.last_error {
            debug!("Failure already reported, not sending it again");
            return;
        }

        match self.notifier.send_message(&message).await {
            Ok(()) => self.last_error = message,
            Err(e) => error!("Could not report failure to the chat: {}", e),
        }
    }
}
