//! Once-per-session ticker dataset loading.
//!
//! The dataset is a static JSON array of [`TickerRecord`]. It is fetched the
//! first time it is needed and then reused. A failed fetch degrades to an
//! empty dataset; company search then simply finds nothing.

use std::sync::Arc;

use tokio::sync::{watch, OnceCell};

use crate::http_client::{HttpClient, HttpRequest};
use crate::TickerRecord;

/// Handle used to abort an in-flight dataset load.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.sender.send_replace(true);
    }
}

/// Signal side of an [`AbortHandle`].
#[derive(Debug, Clone)]
pub struct AbortSignal {
    receiver: watch::Receiver<bool>,
}

/// Create a linked abort handle and signal.
pub fn abort_channel() -> (AbortHandle, AbortSignal) {
    let (sender, receiver) = watch::channel(false);
    (
        AbortHandle {
            sender: Arc::new(sender),
        },
        AbortSignal { receiver },
    )
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        *self.receiver.borrow()
    }

    async fn aborted(mut self) {
        // A dropped handle can never abort, so wait forever in that case.
        if self.receiver.wait_for(|aborted| *aborted).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Arc<Vec<TickerRecord>>),
    Aborted,
}

/// Fetches and memoizes the ticker dataset.
pub struct TickerDatasetLoader {
    http_client: Arc<dyn HttpClient>,
    url: String,
    timeout_ms: u64,
    cell: OnceCell<Arc<Vec<TickerRecord>>>,
}

impl TickerDatasetLoader {
    pub fn new(http_client: Arc<dyn HttpClient>, url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            url: url.into(),
            timeout_ms,
            cell: OnceCell::new(),
        }
    }

    /// Dataset for this session. Never fails; problems yield an empty list.
    pub async fn load(&self) -> Arc<Vec<TickerRecord>> {
        Arc::clone(self.cell.get_or_init(|| self.fetch()).await)
    }

    /// Like [`load`](Self::load), but gives up when `signal` fires. An
    /// aborted load caches nothing.
    pub async fn load_with_abort(&self, signal: &AbortSignal) -> LoadOutcome {
        if let Some(dataset) = self.cell.get() {
            return LoadOutcome::Loaded(Arc::clone(dataset));
        }
        if signal.is_aborted() {
            return LoadOutcome::Aborted;
        }

        tokio::select! {
            dataset = self.load() => LoadOutcome::Loaded(dataset),
            () = signal.clone().aborted() => {
                tracing::debug!(url = %self.url, "ticker dataset load aborted");
                LoadOutcome::Aborted
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    async fn fetch(&self) -> Arc<Vec<TickerRecord>> {
        let request = HttpRequest::get(&self.url).with_timeout_ms(self.timeout_ms);

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(url = %self.url, %error, "ticker dataset unavailable");
                return Arc::new(Vec::new());
            }
        };

        if !response.is_success() {
            tracing::warn!(
                url = %self.url,
                status = response.status,
                "ticker dataset request failed"
            );
            return Arc::new(Vec::new());
        }

        match serde_json::from_slice::<Vec<TickerRecord>>(&response.body) {
            Ok(records) => {
                let records: Vec<TickerRecord> = records
                    .into_iter()
                    .filter(|record| !record.symbol.is_empty())
                    .collect();
                tracing::info!(count = records.len(), "ticker dataset loaded");
                Arc::new(records)
            }
            Err(error) => {
                tracing::warn!(url = %self.url, %error, "ticker dataset is malformed");
                Arc::new(Vec::new())
            }
        }
    }
}
