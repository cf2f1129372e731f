//! Concurrent fetch/store engine
//!
//! The identifier list is split with the static partitioning rule and each
//! slice is handed to its own worker task. Workers fetch and persist their
//! identifiers in list order, retrying failed attempts with a fixed delay.
//! The only state shared between workers is the [`FetchOutcome`] tally,
//! guarded by a single mutex.

use crate::article::ArticleSite;
use crate::crawler::fetcher::{FetchResult, PageFetcher, RetryPolicy};
use crate::crawler::partition::partition;
use crate::storage::Repository;
use crate::CorpusError;
use std::sync::{Arc, Mutex};

/// Aggregate result of the fetch phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Identifiers fetched and stored successfully
    pub stored: usize,

    /// Identifiers whose final attempt failed to download
    pub fetch_failures: Vec<String>,

    /// Identifiers whose final attempt failed to persist
    pub write_failures: Vec<String>,
}

/// How an identifier ended up after all attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemStatus {
    Stored,
    FetchFailed,
    WriteFailed,
}

/// Downloads a fixed identifier list with a pool of workers
pub struct FetchEngine<F: PageFetcher + 'static> {
    fetcher: Arc<F>,
    site: ArticleSite,
    repository: Repository,
    retry: RetryPolicy,
    workers: usize,
}

impl<F: PageFetcher + 'static> Clone for FetchEngine<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            site: self.site.clone(),
            repository: self.repository.clone(),
            retry: self.retry,
            workers: self.workers,
        }
    }
}

impl<F: PageFetcher + 'static> FetchEngine<F> {
    /// Creates an engine
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Shared page fetcher
    /// * `site` - Builds article URLs from identifiers
    /// * `repository` - Destination of stored documents
    /// * `retry` - Per-identifier retry policy
    /// * `workers` - Number of workers (at least one is used)
    pub fn new(
        fetcher: Arc<F>,
        site: ArticleSite,
        repository: Repository,
        retry: RetryPolicy,
        workers: usize,
    ) -> Self {
        Self {
            fetcher,
            site,
            repository,
            retry,
            workers: workers.max(1),
        }
    }

    /// Number of workers the identifier list is split across
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fetches and stores every identifier
    ///
    /// Returns only after every worker has finished its slice. Per-item
    /// failures are recorded in the outcome; an error is returned only if a
    /// worker task itself failed.
    pub async fn fetch_all(&self, identifiers: &[String]) -> Result<FetchOutcome, CorpusError> {
        let outcome = Arc::new(Mutex::new(FetchOutcome::default()));
        let mut handles = Vec::with_capacity(self.workers);

        for (worker, slice) in partition(identifiers, self.workers).into_iter().enumerate() {
            if slice.is_empty() {
                continue;
            }

            tracing::debug!("Worker {:3}: {} identifiers", worker, slice.len());

            let engine = self.clone();
            let outcome = Arc::clone(&outcome);
            let slice = slice.to_vec();

            handles.push(tokio::spawn(async move {
                engine.run_worker(worker, slice, &outcome).await;
            }));
        }

        // Join every worker before reporting, even if one of them panicked
        let mut first_error = None;
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Fetch worker failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        if let Some(e) = first_error {
            return Err(CorpusError::Join(e));
        }

        let outcome = match Arc::try_unwrap(outcome) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(|e| e.into_inner()),
            Err(shared) => lock(&shared).clone(),
        };

        Ok(outcome)
    }

    /// Processes one worker's slice in order
    async fn run_worker(&self, worker: usize, slice: Vec<String>, outcome: &Mutex<FetchOutcome>) {
        let mut stored = 0;

        for identifier in slice {
            let status = self.download(&identifier).await;

            let mut tally = lock(outcome);
            match status {
                ItemStatus::Stored => {
                    tally.stored += 1;
                    stored += 1;
                }
                ItemStatus::FetchFailed => tally.fetch_failures.push(identifier),
                ItemStatus::WriteFailed => tally.write_failures.push(identifier),
            }
        }

        tracing::debug!("Worker {:3} finished: {} stored", worker, stored);
    }

    /// Fetches and stores one identifier, retrying up to the policy ceiling
    ///
    /// The failure class of the last attempt decides which list the
    /// identifier lands in.
    async fn download(&self, identifier: &str) -> ItemStatus {
        let url = match self.site.article_url(identifier) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid identifier '{}': {}", identifier, e);
                return ItemStatus::FetchFailed;
            }
        };

        let attempts = self.retry.attempts();
        let mut status = ItemStatus::FetchFailed;

        for attempt in 1..=attempts {
            tracing::info!("Downloading '{}'", url);

            status = match self.fetcher.fetch(url.as_str()).await {
                FetchResult::Success { body, .. } => {
                    match self.repository.store(identifier, &body).await {
                        Ok(path) => {
                            tracing::debug!("Stored '{}' -> '{}'", url, path.display());
                            return ItemStatus::Stored;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Error writing '{}': {} [attempt {}/{}]",
                                identifier,
                                e,
                                attempt,
                                attempts
                            );
                            ItemStatus::WriteFailed
                        }
                    }
                }
                failure => {
                    tracing::warn!(
                        "Error downloading '{}': {} [attempt {}/{}]",
                        url,
                        failure.describe(),
                        attempt,
                        attempts
                    );
                    ItemStatus::FetchFailed
                }
            };

            if attempt < attempts {
                tokio::time::sleep(self.retry.delay).await;
            }
        }

        status
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
