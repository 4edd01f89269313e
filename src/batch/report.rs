//! Batch result summary.

use crate::batch::execute::{Outcome, TransformResult};
use serde::{Deserialize, Serialize};

/// Per-file results of a finished batch plus summary counters.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchReport {
    /// One result per plan entry, in plan order.
    pub results: Vec<TransformResult>,
    /// Entries whose transformed file was written.
    pub succeeded: usize,
    /// Entries that produced no output.
    pub failed: usize,
    /// Entries whose original was also removed.
    pub deleted: usize,
}

impl BatchReport {
    /// Tally a result list into a report.
    pub fn from_results(results: Vec<TransformResult>) -> Self {
        let mut succeeded = 0;
        let mut failed = 0;
        let mut deleted = 0;

        for result in &results {
            match &result.outcome {
                Outcome::Transformed { deleted: removed, .. } => {
                    succeeded += 1;
                    if *removed {
                        deleted += 1;
                    }
                }
                Outcome::Failed { .. } => failed += 1,
            }
        }

        Self {
            results,
            succeeded,
            failed,
            deleted,
        }
    }

    /// True when every entry transformed successfully.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
