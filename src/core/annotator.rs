//! End-date message and document properties

use super::columns::INITIALS_HEADER;
use super::styling::HEADER_ROW_AFTER_INSERT;
use crate::error::FormatterResult;
use crate::types::{Alignment, Workbook, Worksheet};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// Author recorded in every produced workbook
pub const CREATOR: &str = "Edwin Peraza";

/// Row that carries the end-date message
const MESSAGE_ROW: u32 = 1;

pub fn end_date_message(end_date: &str, initials: &str) -> String {
    format!("End date updated to {} - {}", end_date, initials)
}

/// Write the end-date message above the "Initials" column.
///
/// Returns the column written to, or `None` when there is no end date or the
/// header cannot be found. Neither case is an error.
pub fn annotate_end_date(
    sheet: &mut Worksheet,
    end_date: Option<&str>,
    initials: &str,
) -> FormatterResult<Option<u32>> {
    let Some(end_date) = end_date else {
        return Ok(None);
    };

    // Last match wins if the header is duplicated
    let Some(col) = sheet
        .row_values(HEADER_ROW_AFTER_INSERT)
        .iter()
        .rposition(|value| value.as_text() == Some(INITIALS_HEADER))
        .map(|idx| idx as u32 + 1)
    else {
        warn!(
            "no \"{}\" header in row {}; end date not written",
            INITIALS_HEADER, HEADER_ROW_AFTER_INSERT
        );
        return Ok(None);
    };

    let cell = sheet.set_cell(MESSAGE_ROW, col, end_date_message(end_date, initials))?;
    cell.alignment = Some(Alignment::right());

    debug!(col, "wrote end-date message");
    Ok(Some(col))
}

/// Creator plus created/modified timestamps, both set to `now`
pub fn stamp_properties(workbook: &mut Workbook, now: NaiveDateTime) {
    let props = &mut workbook.properties;
    props.creator = Some(CREATOR.to_string());
    props.created = Some(now);
    props.modified = Some(now);
}
