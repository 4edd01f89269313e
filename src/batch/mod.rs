//! Directory batch processing: planning, preview, execution, reporting.
//!
//! The workflow is a pipeline of plain values, callable without any
//! terminal attached: build a [`BatchPlan`], render its preview, then
//! execute it and tally the [`TransformResult`]s into a [`BatchReport`].

mod execute;
mod plan;
mod report;

pub use execute::{FailureKind, Outcome, TransformResult};
pub use plan::{BatchPlan, EntryStatus, FileEntry, Mode, PreviewEntry};
pub use report::BatchReport;
