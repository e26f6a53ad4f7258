//! Scripted in-memory [`StackClient`] and log capture for tests

use crate::aws::client::{RawStack, StackClient, StackDetails, StackPage};
use crate::aws::error::ClientError;
use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

type Page = Result<Vec<Result<RawStack, ClientError>>, ClientError>;

/// Serves pre-recorded pages and stack details for one region
///
/// Pages are chained with `page-<n>` cursors. A stack without recorded details
/// answers with a validation error, as the real API does for unknown names.
#[derive(Debug, Default)]
pub struct FakeClient {
    region: String,
    pages: Vec<Page>,
    details: HashMap<String, Result<StackDetails, ClientError>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new(region: &str) -> Self {
        FakeClient {
            region: region.to_string(),
            ..Default::default()
        }
    }

    /// Append a page of stacks
    pub fn page(mut self, stacks: Vec<RawStack>) -> Self {
        self.pages.push(Ok(stacks.into_iter().map(Ok).collect()));
        self
    }

    /// Append a page whose records may fail to convert
    pub fn records(mut self, records: Vec<Result<RawStack, ClientError>>) -> Self {
        self.pages.push(Ok(records));
        self
    }

    /// Append a page which fails to load
    pub fn failing_page(mut self, error: ClientError) -> Self {
        self.pages.push(Err(error));
        self
    }

    /// Answer for the details of a stack
    pub fn details(mut self, name: &str, details: Result<StackDetails, ClientError>) -> Self {
        self.details.insert(name.to_string(), details);
        self
    }

    /// Sleep before answering every listing request
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, as `list:<cursor>` or `describe:<name>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl StackClient for FakeClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn list_stacks(&self, next_token: Option<String>) -> Result<StackPage, ClientError> {
        self.record(format!("list:{}", next_token.as_deref().unwrap_or("")));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let index = match next_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| ClientError::Validation {
                    message: format!("Invalid NextToken {token}"),
                })?,
        };

        let Some(page) = self.pages.get(index) else {
            return Ok(StackPage::default());
        };

        Ok(StackPage {
            stacks: page.clone()?,
            next_token: (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1)),
        })
    }

    async fn describe_stack(&self, name: &str) -> Result<StackDetails, ClientError> {
        self.record(format!("describe:{name}"));

        self.details
            .get(name)
            .cloned()
            .unwrap_or_else(|| {
                Err(ClientError::Validation {
                    message: format!("Stack with id {name} does not exist"),
                })
            })
    }
}

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

static CAPTURE: CaptureLogger = CaptureLogger;

/// Logger keeping records of the thread that emitted them
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

/// Start capturing log records emitted on the current thread
///
/// Installs the capturing logger on first use. `#[tokio::test]` runs on a
/// single thread, so tasks spawned by the test are captured as well.
pub fn capture_logs() -> LogCapture {
    if log::set_logger(&CAPTURE).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }

    RECORDS.with(|records| records.borrow_mut().clear());
    LogCapture
}

/// Records captured on the current thread since [`capture_logs`]
#[derive(Debug)]
pub struct LogCapture;

impl LogCapture {
    /// Drain all records captured so far
    pub fn take(&self) -> Vec<(Level, String)> {
        RECORDS.with(|records| records.borrow_mut().drain(..).collect())
    }

    /// Messages logged at exactly `level`
    pub fn at(&self, level: Level) -> Vec<String> {
        RECORDS.with(|records| {
            records
                .borrow()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }

    /// The most severe level captured, if anything was logged
    pub fn max_level(&self) -> Option<Level> {
        RECORDS.with(|records| records.borrow().iter().map(|(level, _)| *level).min())
    }
}
