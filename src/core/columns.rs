//! Column removal and tracking-column insertion

use super::options::RemovalSpec;
use crate::error::FormatterResult;
use crate::types::Worksheet;
use tracing::debug;

pub const INVENTORY_DATE_HEADER: &str = "Inventory Date";
pub const CHECKMARK: &str = "✓";
pub const INITIALS_HEADER: &str = "Initials";

/// Row holding the column headers before any rows are inserted
const HEADER_ROW: u32 = 1;

/// Positions of the three appended tracking columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingColumns {
    pub inventory_date: u32,
    pub checkmark: u32,
    pub initials: u32,
}

impl TrackingColumns {
    /// Three consecutive columns starting at `first`
    pub fn starting_at(first: u32) -> Self {
        Self {
            inventory_date: first,
            checkmark: first + 1,
            initials: first + 2,
        }
    }

    pub fn all(&self) -> [u32; 3] {
        [self.inventory_date, self.checkmark, self.initials]
    }
}

/// Indices of header cells whose text is in the removal spec, in scan order
/// (left to right). Every matching cell is reported, duplicates included.
pub fn matching_columns(sheet: &Worksheet, spec: &RemovalSpec) -> Vec<u32> {
    sheet
        .row_values(HEADER_ROW)
        .iter()
        .enumerate()
        .filter(|(_, value)| value.as_text().is_some_and(|text| spec.contains(text)))
        .map(|(idx, _)| idx as u32 + 1)
        .collect()
}

/// Delete the matching columns and return the header names that were
/// removed, in original left-to-right order.
///
/// Deletion runs from the highest index down so that indices still
/// pending are never shifted by an earlier delete.
pub fn remove_columns(sheet: &mut Worksheet, spec: &RemovalSpec) -> FormatterResult<Vec<String>> {
    let mut indices = matching_columns(sheet, spec);
    let removed: Vec<String> = indices
        .iter()
        .map(|&col| sheet.value(HEADER_ROW, col).display_text())
        .collect();

    indices.sort_unstable_by(|a, b| b.cmp(a));
    for col in indices {
        sheet.delete_column(col)?;
    }

    debug!(removed = ?removed, "removed columns");
    Ok(removed)
}

/// Write the three tracking headers right after the last existing column
pub fn append_tracking_columns(sheet: &mut Worksheet) -> FormatterResult<TrackingColumns> {
    let tracking = TrackingColumns::starting_at(sheet.column_count() + 1);

    sheet.set_cell(HEADER_ROW, tracking.inventory_date, INVENTORY_DATE_HEADER)?;
    sheet.set_cell(HEADER_ROW, tracking.checkmark, CHECKMARK)?;
    sheet.set_cell(HEADER_ROW, tracking.initials, INITIALS_HEADER)?;

    debug!(first = tracking.inventory_date, "appended tracking columns");
    Ok(tracking)
}
