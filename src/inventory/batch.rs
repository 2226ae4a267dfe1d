use std::future::Future;

use anyhow::Result;
use futures::future::{join_all, BoxFuture};

use super::types::BatchReport;

/// A client-side grouping of labeled pending save operations, submitted
/// together for concurrent execution. Results are folded per item into a
/// [`BatchReport`].
pub struct SaveBatch<'a, T> {
    pending: Vec<(String, BoxFuture<'a, Result<T>>)>,
}

impl<'a, T> SaveBatch<'a, T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queue a save operation under a label used in failure reporting
    pub fn add<F>(&mut self, label: impl Into<String>, task: F)
    where
        F: Future<Output = Result<T>> + Send + 'a,
    {
        self.pending.push((label.into(), Box::pin(task)));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Submit every queued operation concurrently and collect the results
    pub async fn execute(self) -> BatchReport {
        let (labels, tasks): (Vec<_>, Vec<_>) = self.pending.into_iter().unzip();
        let results = join_all(tasks).await;

        let mut report = BatchReport::default();
        for (label, result) in labels.into_iter().zip(results) {
            match result {
                Ok(_) => report.saved += 1,
                Err(e) => report.failed.push((label, e.to_string())),
            }
        }
        report
    }
}

impl<T> Default for SaveBatch<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_yields_empty_report() {
        let batch: SaveBatch<'_, ()> = SaveBatch::new();
        assert!(batch.is_empty());
        let report = tokio_test::block_on(batch.execute());
        assert_eq!(report.saved, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn batch_accumulates_per_item_results() {
        let mut batch: SaveBatch<'_, i64> = SaveBatch::new();
        batch.add("sw01-ams01/Ethernet1", async { Ok(1) });
        batch.add("sw01-ams01/Ethernet2", async {
            Err(anyhow::anyhow!("duplicate name"))
        });
        batch.add("sw01-ams01/Ethernet3", async { Ok(3) });
        assert_eq!(batch.len(), 3);

        let report = tokio_test::block_on(batch.execute());
        assert_eq!(report.saved, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "sw01-ams01/Ethernet2");
        assert!(report.failed[0].1.contains("duplicate name"));
        assert!(!report.is_clean());
    }
}
