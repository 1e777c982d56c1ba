//! Row insertion, cell styling, column sizing and page setup

use super::columns::{TrackingColumns, CHECKMARK};
use super::short_date;
use crate::error::FormatterResult;
use crate::types::{Alignment, Border, Font, PageOrientation, Worksheet};
use chrono::NaiveDate;
use std::ops::RangeInclusive;
use tracing::debug;

pub const FONT_NAME: &str = "Arial";
pub const HEADER_FONT_SIZE: f64 = 11.0;
pub const BODY_FONT_SIZE: f64 = 10.0;

/// Row right below the header that receives today's sign-off
pub const FIRST_ENTRY_ROW: u32 = 2;
/// Rows (before insertion) whose tracking cells are left blank for hand entry
pub const MANUAL_ENTRY_ROWS: RangeInclusive<u32> = 3..=15;
/// Blank rows inserted above the header
pub const BLANK_ROWS: u32 = 2;
/// Header row once the blank rows are in place
pub const HEADER_ROW_AFTER_INSERT: u32 = BLANK_ROWS + 1;

pub const MIN_COLUMN_WIDTH: f64 = 5.0;
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;
pub const DEFAULT_COLUMN_WIDTH: f64 = 10.0;

pub fn header_font() -> Font {
    Font::new(FONT_NAME, HEADER_FONT_SIZE).bold()
}

pub fn body_font() -> Font {
    Font::new(FONT_NAME, BODY_FONT_SIZE)
}

/// Run every styling step in order
pub fn style_sheet(
    sheet: &mut Worksheet,
    tracking: TrackingColumns,
    today: NaiveDate,
    initials: &str,
) -> FormatterResult<()> {
    fill_tracking_cells(sheet, tracking, today, initials)?;
    insert_blank_rows(sheet)?;
    apply_wrap_defaults(sheet)?;
    apply_fonts_and_borders(sheet)?;
    autosize_columns(sheet)?;
    apply_page_setup(sheet);
    Ok(())
}

/// Today's sign-off goes in the first data row; the next rows get empty
/// bordered boxes for manual entry. The sign-off cells are bordered later,
/// like any other cell with a value.
pub fn fill_tracking_cells(
    sheet: &mut Worksheet,
    tracking: TrackingColumns,
    today: NaiveDate,
    initials: &str,
) -> FormatterResult<()> {
    let entries = [
        (tracking.inventory_date, short_date(today)),
        (tracking.checkmark, CHECKMARK.to_string()),
        (tracking.initials, initials.to_string()),
    ];
    for (col, value) in entries {
        let cell = sheet.set_cell(FIRST_ENTRY_ROW, col, value)?;
        cell.alignment = Some(Alignment::centered());
    }

    for row in MANUAL_ENTRY_ROWS {
        for col in tracking.all() {
            sheet.cell_mut(row, col)?.border = Some(Border::thin());
        }
    }

    debug!(
        rows = MANUAL_ENTRY_ROWS.end() - FIRST_ENTRY_ROW + 1,
        "filled tracking cells"
    );
    Ok(())
}

/// Push the header down so the top two rows are free for notes
pub fn insert_blank_rows(sheet: &mut Worksheet) -> FormatterResult<()> {
    for _ in 0..BLANK_ROWS {
        sheet.insert_row_at(1)?;
    }
    Ok(())
}

/// Wrap text in every column, except in the blank rows at the top
pub fn apply_wrap_defaults(sheet: &mut Worksheet) -> FormatterResult<()> {
    for col in 1..=sheet.column_count() {
        sheet.column_mut(col)?.alignment = Some(Alignment::wrap(true));
    }
    for row in 1..=BLANK_ROWS {
        sheet.row_mut(row)?.alignment = Some(Alignment::wrap(false));
    }
    Ok(())
}

/// Header rows bold; every existing cell gets its font, and cells with a
/// value get a thin border.
pub fn apply_fonts_and_borders(sheet: &mut Worksheet) -> FormatterResult<()> {
    for row in 1..=HEADER_ROW_AFTER_INSERT {
        sheet.row_mut(row)?.font = Some(header_font());
    }

    let header = header_font();
    let body = body_font();
    let mut bordered = 0usize;
    sheet.for_each_cell_mut(|row, _col, cell| {
        cell.font = Some(if row == HEADER_ROW_AFTER_INSERT {
            header.clone()
        } else {
            body.clone()
        });
        if !cell.value.is_empty() {
            cell.border = Some(Border::thin());
        }
        if cell.border.is_some() {
            bordered += 1;
        }
    });

    debug!(bordered, "applied fonts and borders");
    Ok(())
}

/// Width of each column = longest displayed value, never below the minimum
pub fn autosize_columns(sheet: &mut Worksheet) -> FormatterResult<()> {
    for col in 1..=sheet.column_count() {
        let longest = sheet
            .column_cells(col)
            .map(|cell| cell.value.display_text().chars().count())
            .max()
            .unwrap_or(0);
        sheet.column_mut(col)?.width = Some(MIN_COLUMN_WIDTH.max(longest as f64));
    }
    Ok(())
}

/// Landscape, no print header/footer, fixed default row height and width
pub fn apply_page_setup(sheet: &mut Worksheet) {
    sheet.header_footer.clear();
    sheet.orientation = PageOrientation::Landscape;
    sheet.default_row_height = Some(DEFAULT_ROW_HEIGHT);
    sheet.default_column_width = Some(DEFAULT_COLUMN_WIDTH);
}
