//! The poll loop: fetch, validate, translate, notify, sleep.
//!
//! The poller owns the cursor and the text of the last failure it reported.
//! The cursor moves forward only when a cycle translated and delivered every
//! homework record it received. Messages already delivered under the current
//! cursor are not sent again while it stays put. Identical consecutive failure
//! reports are sent once.
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::api::StatusApi;
use crate::config::App;
use crate::error::PollError;
use crate::notify::Notifier;
use crate::{response, status};

const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    /// Pause after a successful or idle cycle.
    pub normal: Duration,
    /// Pause after a failed or undelivered cycle.
    pub error: Duration,
}

impl From<&App> for Intervals {
    fn from(app: &App) -> Self {
        Self {
            normal: app.retry_period(),
            error: app.error_retry_period(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no new statuses.
    Idle,
    /// Every record was translated and delivered.
    Notified { delivered: usize },
    /// Translation succeeded but Telegram rejected some messages; the cursor was kept.
    Undelivered { delivered: usize, failed: usize },
    /// The cycle hit a [`PollError`].
    Failed,
}

/// Text sent to the chat when a cycle fails.
pub fn failure_message(err: &PollError) -> String {
    format!("{FAILURE_PREFIX}{err}")
}

pub struct Poller<'a> {
    api: &'a dyn StatusApi,
    notifier: &'a dyn Notifier,
    cursor: i64,
    last_failure: Option<String>,
    /// Messages delivered since the cursor last moved.
    sent_at_cursor: HashSet<String>,
    intervals: Intervals,
}

impl<'a> Poller<'a> {
    pub fn new(
        api: &'a dyn StatusApi,
        notifier: &'a dyn Notifier,
        cursor: i64,
        intervals: Intervals,
    ) -> Self {
        Self {
            api,
            notifier,
            cursor,
            last_failure: None,
            sent_at_cursor: HashSet::new(),
            intervals,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Run cycles forever, sleeping between them.
    pub async fn run(&mut self) {
        loop {
            let outcome = self.run_cycle().await;
            let pause = self.pause_after(&outcome);
            debug!(?outcome, pause_secs = pause.as_secs(), "cycle finished");
            tokio::time::sleep(pause).await;
        }
    }

    pub fn pause_after(&self, outcome: &CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::Idle | CycleOutcome::Notified { .. } => self.intervals.normal,
            CycleOutcome::Undelivered { .. } | CycleOutcome::Failed => self.intervals.error,
        }
    }

    /// One fetch/validate/process pass without the trailing sleep.
    #[instrument(skip_all, fields(cursor = self.cursor))]
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.report_failure(&err).await;
                CycleOutcome::Failed
            }
        }
    }

    async fn poll(&mut self) -> Result<CycleOutcome, PollError> {
        let body = self.api.fetch(self.cursor).await?;
        let homeworks = response::validate(&body)?;
        if homeworks.is_empty() {
            debug!("no new homework statuses");
        }

        let mut delivered = 0;
        let mut failed = 0;
        let mut first_error = None;
        for item in homeworks {
            match status::translate(item) {
                Ok(message) => {
                    if self.sent_at_cursor.contains(&message) {
                        debug!(%message, "already delivered at this cursor");
                    } else if self.notifier.deliver(&message).await {
                        delivered += 1;
                        self.sent_at_cursor.insert(message);
                    } else {
                        failed += 1;
                    }
                }
                Err(err) => {
                    warn!(%err, %item, "skipping homework record");
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        if failed > 0 {
            warn!(delivered, failed, "some notifications were not delivered; keeping cursor");
            return Ok(CycleOutcome::Undelivered { delivered, failed });
        }

        self.advance(response::next_cursor(&body));
        self.last_failure = None;
        if delivered == 0 {
            Ok(CycleOutcome::Idle)
        } else {
            info!(delivered, cursor = self.cursor, "homework statuses delivered");
            Ok(CycleOutcome::Notified { delivered })
        }
    }

    fn advance(&mut self, next: Option<i64>) {
        match next {
            Some(next) if next > self.cursor => {
                self.cursor = next;
                self.sent_at_cursor.clear();
            }
            Some(next) if next == self.cursor => {}
            Some(next) => warn!(next, cursor = self.cursor, "ignoring cursor that moves backwards"),
            None => debug!(cursor = self.cursor, "response has no cursor; keeping current"),
        }
    }

    async fn report_failure(&mut self, err: &PollError) {
        let message = failure_message(err);
        error!(%err, "poll cycle failed");
        if self.last_failure.as_deref() == Some(message.as_str()) {
            info!("same failure already reported; not sending again");
            return;
        }
        if self.notifier.deliver(&message).await {
            self.last_failure = Some(message);
        }
    }
}
