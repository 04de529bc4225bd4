//! Pre-built notification cards for common workflow events.
//!
//! Each factory is a fixed composition of [`CardBuilder`] calls
//! parameterized by business fields; wide parameter sets travel in
//! per-template args structs. Header colors follow the workflow status
//! mapping in [`crate::status`], with explicit colors where an event has a
//! dedicated hue (progress, collection, comparison).

use std::collections::BTreeMap;

use crate::blocks::ColumnWidth;
use crate::builder::{BuildError, CardBuilder};
use crate::card::Card;

/// Inputs for [`network_submission_start`].
pub struct NetworkStart<'a> {
    pub network_set_name: &'a str,
    pub network_type: &'a str,
    pub group: &'a str,
    pub prefix: &'a str,
    pub expected_count: Option<u64>,
    pub metadata: Option<&'a BTreeMap<String, String>>,
}

/// Network generation kicked off.
pub fn network_submission_start(args: &NetworkStart<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Network Submission Started", Some("running"), None, None)
        .metadata("Network Set", args.network_set_name)?
        .metadata("Network Type", args.network_type)?;
    if let Some(count) = args.expected_count {
        builder = builder.metadata("Expected Count", count)?;
    }
    if let Some(extra) = args.metadata {
        for (key, value) in extra {
            builder = builder.metadata(key, value)?;
        }
    }
    storage_columns(builder, args.group, args.prefix)?.build()
}

/// Inputs for [`network_submission_complete`].
pub struct NetworkComplete<'a> {
    pub network_set_name: &'a str,
    pub submitted_count: u64,
    pub group: &'a str,
    pub prefix: &'a str,
    pub duration: Option<&'a str>,
}

/// All networks submitted.
pub fn network_submission_complete(args: &NetworkComplete<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Network Submission Complete", Some("success"), None, None)
        .metadata("Network Set", args.network_set_name)?
        .metadata("Submitted Count", args.submitted_count)?;
    if let Some(duration) = args.duration {
        builder = builder.metadata("Duration", duration)?;
    }
    storage_columns(builder, args.group, args.prefix)?.build()
}

/// Inputs for [`network_submission_failure`].
pub struct NetworkFailure<'a> {
    pub network_set_name: &'a str,
    pub error_message: &'a str,
    pub submitted_count: Option<u64>,
    pub group: Option<&'a str>,
}

/// Network submission aborted with an error.
pub fn network_submission_failure(args: &NetworkFailure<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Network Submission Failed", Some("failed"), None, None)
        .metadata("Network Set", args.network_set_name)?;
    if let Some(count) = args.submitted_count {
        builder = builder.metadata("Submitted Before Failure", count)?;
    }
    if let Some(group) = args.group {
        builder = builder.metadata("Group", group)?;
    }
    builder
        .collapsible("Error Details", args.error_message, true)?
        .build()
}

/// Inputs for [`config_upload_complete`].
pub struct ConfigUpload<'a> {
    pub config_name: &'a str,
    pub file_count: usize,
    pub labels: &'a [String],
    pub desc: &'a str,
}

/// Configuration files uploaded.
pub fn config_upload_complete(args: &ConfigUpload<'_>) -> Result<Card, BuildError> {
    let listing: Vec<String> = args.labels.iter().map(|label| format!("- {label}")).collect();
    CardBuilder::new()
        .header("Configuration Uploaded", Some("success"), None, None)
        .metadata("Config Name", args.config_name)?
        .metadata("File Count", args.file_count)?
        .metadata("Description", args.desc)?
        .collapsible("Uploaded Files", &listing.join("\n"), false)?
        .build()
}

/// Inputs for [`job_submission_start`].
pub struct JobStart<'a> {
    pub job_title: &'a str,
    pub desc: &'a str,
    pub group: &'a str,
    pub prefix: &'a str,
    pub msg: Option<&'a str>,
    pub metadata: Option<&'a BTreeMap<String, String>>,
}

/// Task submission kicked off.
pub fn job_submission_start(args: &JobStart<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Task Submission Started", Some("running"), None, None)
        .metadata("Task Set", args.job_title)?
        .metadata("Description", args.desc)?;
    if let Some(extra) = args.metadata {
        builder = builder.metadata_block(extra.iter().map(|(key, value)| (key.as_str(), value)))?;
    }
    if let Some(msg) = args.msg {
        builder = builder.markdown(msg)?;
    }
    storage_columns(builder, args.group, args.prefix)?.build()
}

/// Inputs for [`job_submission_complete`].
pub struct JobSubmitted<'a> {
    pub job_title: &'a str,
    pub submitted_count: u64,
    pub desc: Option<&'a str>,
    pub group: &'a str,
    pub prefix: &'a str,
    pub duration: Option<&'a str>,
    pub msg: Option<&'a str>,
}

/// All tasks handed to the scheduler. Execution is still in progress, so the
/// header keeps the running hue.
pub fn job_submission_complete(args: &JobSubmitted<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Task Submission Complete", Some("running"), None, None)
        .metadata("Task Set", args.job_title)?
        .metadata("Submitted Count", args.submitted_count)?;
    if let Some(desc) = args.desc {
        builder = builder.metadata("Description", desc)?;
    }
    if let Some(duration) = args.duration {
        builder = builder.metadata("Duration", duration)?;
    }
    if let Some(msg) = args.msg {
        builder = builder.divider()?.markdown(msg)?;
    }
    storage_columns(builder, args.group, args.prefix)?.build()
}

/// Inputs for [`job_submission_failure`].
pub struct JobFailure<'a> {
    pub job_title: &'a str,
    pub error_message: &'a str,
    pub submitted_count: Option<u64>,
    pub group: &'a str,
}

/// Task submission aborted with an error.
pub fn job_submission_failure(args: &JobFailure<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Task Submission Failed", Some("failed"), None, None)
        .metadata("Task Set", args.job_title)?
        .metadata("Group", args.group)?;
    if let Some(count) = args.submitted_count {
        builder = builder.metadata("Submitted Before Failure", count)?;
    }
    builder
        .collapsible("Error Details", args.error_message, true)?
        .build()
}

/// Completion counters for one task set.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub complete: u64,
    pub total: u64,
}

impl Progress {
    fn percent(self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        self.complete * 100 / self.total
    }
}

/// Periodic progress digest across task sets.
pub fn task_set_progress(
    progress: &BTreeMap<String, Progress>,
    overall_status: &str,
) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Task Progress Update", None, Some("blue"), None)
        .metadata("Overall Status", overall_status)?
        .metadata("Task Sets", progress.len())?
        .divider()?;
    for (name, counters) in progress {
        builder = builder.metadata(
            name,
            format!(
                "{}/{} ({}%)",
                counters.complete,
                counters.total,
                counters.percent()
            ),
        )?;
    }
    builder.build()
}

/// Result collection kicked off across the given task sets.
pub fn result_collection_start(
    task_set_names: &[String],
    group: &str,
) -> Result<Card, BuildError> {
    let listing: Vec<String> = task_set_names
        .iter()
        .map(|name| format!("- {name}"))
        .collect();
    CardBuilder::new()
        .header("Result Collection Started", None, Some("purple"), None)
        .metadata("Task Sets", task_set_names.len())?
        .metadata("Group", group)?
        .markdown(listing.join("\n"))?
        .build()
}

/// Inputs for [`result_collection_complete`].
pub struct CollectionComplete<'a> {
    pub task_set_names: &'a [String],
    pub job_title: Option<&'a str>,
    pub group: &'a str,
    pub prefix: &'a str,
    pub msg: Option<&'a str>,
}

/// Results gathered into one dataset.
pub fn result_collection_complete(args: &CollectionComplete<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Result Collection Complete", None, Some("purple"), None)
        .metadata("Task Sets", args.task_set_names.len())?;
    if let Some(job_title) = args.job_title {
        builder = builder.metadata("Task Set Name", job_title)?;
    }
    if let Some(msg) = args.msg {
        builder = builder.markdown(msg)?;
    }
    storage_columns(builder, args.group, args.prefix)?.build()
}

/// Inputs for [`comparison_complete`].
pub struct ComparisonComplete<'a> {
    pub comparison_name: &'a str,
    pub task_set_count: usize,
    pub result_rows: u64,
    pub result_columns: u64,
    pub comparison_table: Option<&'a str>,
}

/// Cross-dataset comparison finished.
pub fn comparison_complete(args: &ComparisonComplete<'_>) -> Result<Card, BuildError> {
    let mut builder = CardBuilder::new()
        .header("Comparison Complete", None, Some("orange"), None)
        .metadata("Comparison", args.comparison_name)?
        .metadata("Task Sets Compared", args.task_set_count)?
        .metadata(
            "Result Shape",
            format!("{} rows x {} columns", args.result_rows, args.result_columns),
        )?;
    if let Some(table) = args.comparison_table {
        builder = builder.collapsible("Comparison Results", table, true)?;
    }
    builder.build()
}

/// Inputs for [`job_complete`].
pub struct JobComplete<'a> {
    pub job_title: &'a str,
    pub success: bool,
    pub status: i32,
    pub group: &'a str,
    pub prefix: &'a str,
    pub desc: Option<&'a str>,
    pub msg: Option<&'a str>,
    pub duration: Option<&'a str>,
}

/// Terminal job notification: green on success, red on failure.
pub fn job_complete(args: &JobComplete<'_>) -> Result<Card, BuildError> {
    let status = if args.success { "success" } else { "failed" };
    let mut builder = CardBuilder::new()
        .header("Job Complete", Some(status), None, None)
        .metadata("Job", args.job_title)?
        .metadata("Status Code", args.status)?;
    if let Some(desc) = args.desc {
        builder = builder.metadata("Description", desc)?;
    }
    if let Some(duration) = args.duration {
        builder = builder.metadata("Duration", duration)?;
    }
    if let Some(msg) = args.msg {
        builder = builder.divider()?.markdown(msg)?;
    }
    storage_columns(builder, args.group, args.prefix)?.build()
}

/// The group/prefix storage footer shared by most workflow cards.
fn storage_columns(
    builder: CardBuilder,
    group: &str,
    prefix: &str,
) -> Result<CardBuilder, BuildError> {
    builder
        .columns()?
        .column("Group", group, ColumnWidth::Auto)?
        .column("Prefix", prefix, ColumnWidth::Weighted(1))?
        .end_columns()
}
