//! Business logic services for the Surf Report service

pub mod refresh;
pub mod report;

pub use refresh::{RefreshOutcome, ReportService, SnapshotStatus};
pub use report::ReportFormatter;
