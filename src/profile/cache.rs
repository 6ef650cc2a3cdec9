//! Shared statistics cache and concurrent column summarization
//!
//! Column statistics are pure functions of the table, so they can be computed
//! in parallel and memoized freely. The cache holds one exclusive lock around
//! its map and never computes while holding it.

use futures::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::stats::{ColumnSummary, summarize_column};
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::models::Table;

/// Memoized per-column summaries for one decoded table
#[derive(Debug)]
pub struct StatisticsCache {
    table: Arc<Table>,
    config: ClassifierConfig,
    entries: Mutex<HashMap<usize, Arc<ColumnSummary>>>,
}

impl StatisticsCache {
    pub fn new(table: Arc<Table>, config: ClassifierConfig) -> Self {
        Self {
            table,
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Summary for column `index`, computed on first request
    ///
    /// Concurrent first requests may both compute; the first stored result wins.
    pub fn get(&self, index: usize) -> Option<Arc<ColumnSummary>> {
        if let Some(hit) = self.lock().get(&index) {
            return Some(Arc::clone(hit));
        }

        let summary = Arc::new(summarize_column(&self.table, index, &self.config)?);
        let mut entries = self.lock();
        Some(Arc::clone(entries.entry(index).or_insert(summary)))
    }

    /// Summary for the column named `name`
    pub fn get_by_name(&self, name: &str) -> Option<Arc<ColumnSummary>> {
        self.get(self.table.schema.index_of(name)?)
    }

    pub fn cached_count(&self) -> usize {
        self.lock().len()
    }

    /// Drop every cached summary
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<usize, Arc<ColumnSummary>>> {
        // Entries are inserted whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Summarize every column sequentially, in schema order
pub fn summarize_table(table: &Table, config: &ClassifierConfig) -> Vec<ColumnSummary> {
    (0..table.column_count())
        .filter_map(|index| summarize_column(table, index, config))
        .collect()
}

/// Summarize the given columns concurrently on blocking workers
///
/// At most `workers` columns are processed at once. Results come back in the
/// order of `columns`; unknown indices are skipped.
pub async fn summarize_columns(
    table: Arc<Table>,
    columns: Vec<usize>,
    config: ClassifierConfig,
    workers: usize,
) -> Result<Vec<ColumnSummary>> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let config = Arc::new(config);

    debug!(
        "Summarizing {} columns with {} workers",
        columns.len(),
        workers.max(1)
    );

    let tasks = columns.into_iter().map(|index| {
        let table = Arc::clone(&table);
        let config = Arc::clone(&config);
        let semaphore = Arc::clone(&semaphore);
        async move {
            let _permit = semaphore.acquire_owned().await.ok();
            tokio::task::spawn_blocking(move || summarize_column(&table, index, &config)).await
        }
    });

    let mut summaries = Vec::new();
    for result in join_all(tasks).await {
        match result? {
            Some(summary) => summaries.push(summary),
            None => warn!("Skipping column outside the schema"),
        }
    }
    Ok(summaries)
}

/// Summarize every column concurrently using one worker per CPU
pub async fn summarize_all(table: Arc<Table>, config: ClassifierConfig) -> Result<Vec<ColumnSummary>> {
    let columns = (0..table.column_count()).collect();
    summarize_columns(table, columns, config, num_cpus::get()).await
}
