//! Debounced remote lookup.
//!
//! Each keystroke re-arms a single timer; only when the query has been quiet
//! for the full period does the search fire, for the latest text. Firing
//! hands the request to its own task, so later keystrokes cancel timers but
//! never requests already on the wire.
//!
//! Completions come back over a channel tagged with the token of the lookup
//! that issued them. Anything but the newest token is dropped, which keeps a
//! slow early response from overwriting a fast later one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::api_client::JobBoardApi;
use crate::errors::ClientError;
use crate::models::company::Company;

/// Anything that can answer a text query with candidate matches.
#[async_trait]
pub trait LookupSource<T>: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Vec<T>, ClientError>;
}

/// Company search backed by the job-board API.
pub struct CompanyDirectory {
    api: Arc<dyn JobBoardApi>,
}

impl CompanyDirectory {
    pub fn new(api: Arc<dyn JobBoardApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl LookupSource<Company> for CompanyDirectory {
    async fn lookup(&self, query: &str) -> Result<Vec<Company>, ClientError> {
        self.api.search_companies(query).await
    }
}

struct Completion<T> {
    token: u64,
    query: String,
    result: Result<Vec<T>, ClientError>,
}

/// What an applied completion did to the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupUpdate {
    Results { query: String, count: usize },
    /// The request failed; the result list was cleared. Not retried.
    Failed { query: String, message: String },
}

pub struct DebouncedLookup<T> {
    source: Arc<dyn LookupSource<T>>,
    quiet_period: Duration,
    query: String,
    results: Vec<T>,
    timer: Option<JoinHandle<()>>,
    /// Token of the most recent query change; completions must match it.
    latest: u64,
    tx: UnboundedSender<Completion<T>>,
    rx: UnboundedReceiver<Completion<T>>,
}

impl<T: Send + 'static> DebouncedLookup<T> {
    pub fn new(source: Arc<dyn LookupSource<T>>, quiet_period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            quiet_period,
            query: String::new(),
            results: Vec::new(),
            timer: None,
            latest: 0,
            tx,
            rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// True while a timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Records a keystroke. Whitespace-only text clears the results at once
    /// and issues nothing; anything else re-arms the quiet-period timer.
    pub fn set_query(&mut self, query: &str) {
        self.invalidate();
        self.query = query.to_string();

        if query.trim().is_empty() {
            self.results.clear();
            return;
        }

        let token = self.latest;
        let deadline = Instant::now() + self.quiet_period;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let query = self.query.clone();

        self.timer = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            debug!("Lookup #{token} fired for '{query}'");
            tokio::spawn(async move {
                let result = source.lookup(&query).await;
                // The receiver is gone only if the lookup was dropped.
                let _ = tx.send(Completion {
                    token,
                    query,
                    result,
                });
            });
        }));
    }

    /// Replaces the text without searching (e.g. echoing a chosen entity's
    /// name back into the input). Clears the results and orphans any
    /// in-flight request.
    pub fn set_query_quietly(&mut self, query: &str) {
        self.invalidate();
        self.query = query.to_string();
        self.results.clear();
    }

    /// Waits for the next completion that belongs to the current query and
    /// applies it. Stale completions are discarded along the way.
    pub async fn next_update(&mut self) -> Option<LookupUpdate> {
        loop {
            let completion = self.rx.recv().await?;
            if let Some(update) = self.apply(completion) {
                return Some(update);
            }
        }
    }

    /// Applies whatever completions have already arrived, without waiting.
    pub fn drain(&mut self) -> Vec<LookupUpdate> {
        let mut updates = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            updates.extend(self.apply(completion));
        }
        updates
    }

    fn apply(&mut self, completion: Completion<T>) -> Option<LookupUpdate> {
        let Completion {
            token,
            query,
            result,
        } = completion;
        if token != self.latest {
            debug!("Discarding stale lookup #{token} for '{query}' (latest #{})", self.latest);
            return None;
        }
        match result {
            Ok(items) => {
                let count = items.len();
                self.results = items;
                debug!("Lookup #{token} for '{query}' returned {count} result(s)");
                Some(LookupUpdate::Results { query, count })
            }
            Err(e) => {
                warn!("Lookup for '{query}' failed: {e}");
                self.results.clear();
                Some(LookupUpdate::Failed {
                    query,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Cancels the pending timer and moves the token on.
    fn invalidate(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.latest += 1;
    }
}

impl<T> Drop for DebouncedLookup<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
