//! Batch Dispatcher.
//!
//! Fans a batch of domains out over a bounded pool of workers and collects
//! the verdicts into one keyed map. Workers pull from a shared task queue
//! until it is exhausted and emit `(domain, status)` pairs into a results
//! channel; the dispatcher joins every worker before draining, so the map is
//! only ever touched by one owner.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::debug;

use super::resolver::Resolver;
use super::LookupStatus;

/// Upper bound on concurrent lookups per batch.
pub const DEFAULT_WORKER_CAP: usize = 10;

/// Runs the resolver over many domains with bounded concurrency.
pub struct BatchDispatcher {
    resolver: Resolver,
    worker_cap: usize,
}

impl BatchDispatcher {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            worker_cap: DEFAULT_WORKER_CAP,
        }
    }

    pub fn with_worker_cap(resolver: Resolver, worker_cap: usize) -> Self {
        Self {
            resolver,
            // a non-empty batch must always drain
            worker_cap: worker_cap.max(1),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve every domain in the batch. One entry per unique domain;
    /// duplicates collapse since resolution is deterministic within a batch.
    /// Completion is bounded by per-call timeouts, not batch size.
    pub async fn resolve_all(&self, domains: Vec<String>) -> HashMap<String, LookupStatus> {
        if domains.is_empty() {
            return HashMap::new();
        }

        let workers = worker_count(self.worker_cap, domains.len());
        debug!(workers, domains = domains.len(), "starting batch lookup");

        // Capacities equal the batch size, so no send below ever blocks.
        let (task_tx, task_rx) = mpsc::channel::<String>(domains.len());
        let task_rx = Arc::new(Mutex::new(task_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<(String, LookupStatus)>(domains.len());

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            let resolver = self.resolver.clone();
            let task_rx = Arc::clone(&task_rx);
            let result_tx = result_tx.clone();
            pool.spawn(async move {
                loop {
                    // Hold the lock only for the pull, not the lookup.
                    let domain = { task_rx.lock().await.recv().await };
                    let Some(domain) = domain else { break };
                    let status = resolver.resolve(&domain).await;
                    let _ = result_tx.send((domain, status)).await;
                }
            });
        }
        drop(result_tx);

        for domain in domains {
            // Fails only if every worker is gone, in which case there is
            // nothing left to feed.
            let _ = task_tx.send(domain).await;
        }
        drop(task_tx);

        // Join barrier: no result is read until every producer is done.
        while pool.join_next().await.is_some() {}

        let mut results = HashMap::new();
        while let Some((domain, status)) = result_rx.recv().await {
            results.insert(domain, status);
        }
        results
    }
}

/// Never more workers than there is work, never more than the cap.
fn worker_count(cap: usize, pending: usize) -> usize {
    cap.min(pending)
}
