//! Workbook transformation pipeline
//!
//! decode → remove columns → append tracking columns → style rows →
//! annotate → encode. Each run owns its Workbook from start to finish.

pub mod annotator;
pub mod columns;
pub mod options;
pub mod styling;

pub use columns::TrackingColumns;
pub use options::{RemovalSpec, TransformOptions};

use crate::error::FormatterResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::Workbook;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `M/D/YYYY` without zero padding
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// What one run changed, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSummary {
    /// Header names of the deleted columns, left to right
    pub removed_columns: Vec<String>,
    pub tracking: TrackingColumns,
    /// Column holding the end-date message, if one was written
    pub end_date_column: Option<u32>,
}

/// Applies the inventory layout to the first worksheet of a workbook
pub struct InventoryFormatter {
    options: TransformOptions,
}

impl InventoryFormatter {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Mutate `workbook` in place. Only the first sheet is reshaped; the
    /// others pass through untouched.
    pub fn format_workbook(
        &self,
        workbook: &mut Workbook,
        now: NaiveDateTime,
    ) -> FormatterResult<FormatSummary> {
        let spec = RemovalSpec::from_options(&self.options);
        let sheet = workbook.first_sheet_mut()?;

        let removed_columns = columns::remove_columns(sheet, &spec)?;
        let tracking = columns::append_tracking_columns(sheet)?;
        styling::style_sheet(sheet, tracking, now.date(), &self.options.initials)?;
        let end_date_column =
            annotator::annotate_end_date(sheet, self.options.end_date(), &self.options.initials)?;
        annotator::stamp_properties(workbook, now);

        Ok(FormatSummary {
            removed_columns,
            tracking,
            end_date_column,
        })
    }
}

/// Transform raw .xls/.xlsx bytes into formatted .xlsx bytes, dated today
pub fn transform(raw_bytes: &[u8], options: &TransformOptions) -> FormatterResult<Vec<u8>> {
    transform_at(raw_bytes, options, Local::now().naive_local())
}

/// Same as [`transform`] with an explicit processing time
pub fn transform_at(
    raw_bytes: &[u8],
    options: &TransformOptions,
    now: NaiveDateTime,
) -> FormatterResult<Vec<u8>> {
    transform_with_summary(raw_bytes, options, now).map(|(bytes, _)| bytes)
}

pub fn transform_with_summary(
    raw_bytes: &[u8],
    options: &TransformOptions,
    now: NaiveDateTime,
) -> FormatterResult<(Vec<u8>, FormatSummary)> {
    let mut workbook = ExcelImporter::new(raw_bytes).import()?;
    let summary = InventoryFormatter::new(options.clone()).format_workbook(&mut workbook, now)?;
    let bytes = ExcelExporter::new(&workbook).to_bytes()?;
    info!(
        removed = summary.removed_columns.len(),
        bytes = bytes.len(),
        "transformed workbook"
    );
    Ok((bytes, summary))
}

/// Result of [`process_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub summary: FormatSummary,
    /// `None` when no destination was chosen and nothing was written
    pub saved_to: Option<PathBuf>,
}

/// Read `input`, transform it and write the result to `destination`.
///
/// A missing destination (the save step was abandoned) still runs the
/// transform but writes nothing.
pub fn process_file(
    input: &Path,
    destination: Option<&Path>,
    options: &TransformOptions,
) -> FormatterResult<ProcessOutcome> {
    let raw_bytes = fs::read(input)?;
    let (bytes, summary) =
        transform_with_summary(&raw_bytes, options, Local::now().naive_local())?;

    let saved_to = match destination {
        Some(path) => {
            fs::write(path, &bytes)?;
            info!(path = %path.display(), "saved formatted workbook");
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(ProcessOutcome { summary, saved_to })
}
