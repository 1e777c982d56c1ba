//! Excel exporter implementation - Workbook → .xlsx bytes

use crate::error::{FormatterError, FormatterResult};
use crate::types::{
    Alignment, Border, BorderStyle, Cell, CellValue, DocumentProperties, Font, HorizontalAlign,
    PageOrientation, VerticalAlign, Workbook, Worksheet,
};
use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook,
    Worksheet as XlsxWorksheet,
};
use tracing::{debug, warn};

/// Serializes a Workbook to the .xlsx container. Legacy .xls is never
/// written, whatever the input format was.
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Export the workbook to an in-memory .xlsx file
    pub fn to_bytes(&self) -> FormatterResult<Vec<u8>> {
        let mut workbook = XlsxWorkbook::new();

        if let Some(properties) = Self::build_properties(&self.workbook.properties)? {
            workbook.set_properties(&properties);
        }

        for sheet in &self.workbook.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(|e| {
                FormatterError::Encode(format!("invalid worksheet name '{}': {}", sheet.name, e))
            })?;
            self.export_sheet(worksheet, sheet)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| FormatterError::Encode(format!("failed to build .xlsx: {}", e)))
    }

    /// Creator and creation time. The .xlsx writer stamps the same time as
    /// the modified date.
    fn build_properties(props: &DocumentProperties) -> FormatterResult<Option<DocProperties>> {
        if props.creator.is_none() && props.created.is_none() {
            return Ok(None);
        }

        let mut properties = DocProperties::new();
        if let Some(creator) = &props.creator {
            properties = properties.set_author(creator);
        }
        if let Some(created) = props.created.or(props.modified) {
            properties = properties.set_creation_datetime(&excel_datetime(created)?);
        }
        Ok(Some(properties))
    }

    /// Write one worksheet: page setup, column and row defaults, then cells
    fn export_sheet(&self, worksheet: &mut XlsxWorksheet, sheet: &Worksheet) -> FormatterResult<()> {
        if let Some(height) = sheet.default_row_height {
            worksheet.set_default_row_height(height);
        }

        match sheet.orientation {
            PageOrientation::Landscape => {
                worksheet.set_landscape();
            }
            PageOrientation::Portrait => {
                worksheet.set_portrait();
            }
        }

        let hf = &sheet.header_footer;
        if !hf.odd_header.is_empty() {
            worksheet.set_header(&hf.odd_header);
        }
        if !hf.odd_footer.is_empty() {
            worksheet.set_footer(&hf.odd_footer);
        }
        if !hf.even_header.is_empty() || !hf.even_footer.is_empty() {
            warn!(sheet = %sheet.name, "even-page header/footer is not written to .xlsx");
        }

        let column_count = sheet.column_count();
        for col in 1..=column_count {
            let column = sheet.column(col);
            let width = column
                .and_then(|c| c.width)
                .or(sheet.default_column_width);
            if let Some(width) = width {
                worksheet
                    .set_column_width(excel_col(col), width)
                    .map_err(|e| {
                        FormatterError::Encode(format!("failed to set column {} width: {}", col, e))
                    })?;
            }
            if let Some(alignment) = column.and_then(|c| c.alignment) {
                let format = build_format(None, &alignment, None);
                worksheet
                    .set_column_format(excel_col(col), &format)
                    .map_err(|e| {
                        FormatterError::Encode(format!("failed to format column {}: {}", col, e))
                    })?;
            }
        }

        let mut written = 0usize;
        for row_idx in 1..=sheet.row_count() {
            let Some(row) = sheet.row(row_idx) else {
                continue;
            };
            let row_alignment = row.alignment.unwrap_or_default();

            if row.font.is_some() || row.alignment.is_some() {
                let format = build_format(row.font.as_ref(), &row_alignment, None);
                worksheet
                    .set_row_format(row_idx - 1, &format)
                    .map_err(|e| {
                        FormatterError::Encode(format!("failed to format row {}: {}", row_idx, e))
                    })?;
            }

            for col in 1..=row.width() {
                let Some(cell) = sheet.cell(row_idx, col) else {
                    continue;
                };
                let column_alignment = sheet
                    .column(col)
                    .and_then(|c| c.alignment)
                    .unwrap_or_default();
                let alignment = cell
                    .alignment
                    .unwrap_or_default()
                    .over(&row_alignment.over(&column_alignment));
                let font = cell.font.as_ref().or(row.font.as_ref());

                if write_cell(worksheet, row_idx - 1, excel_col(col), cell, font, &alignment)? {
                    written += 1;
                }
            }
        }

        debug!(sheet = %sheet.name, cells = written, "encoded worksheet");
        Ok(())
    }
}

/// Write a single cell; returns false for unstyled empty cells, which are
/// left out of the file.
fn write_cell(
    worksheet: &mut XlsxWorksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    font: Option<&Font>,
    alignment: &Alignment,
) -> FormatterResult<bool> {
    let styled = font.is_some() || *alignment != Alignment::default() || cell.border.is_some();
    let format = build_format(font, alignment, cell.border.as_ref());

    let result = match &cell.value {
        CellValue::Text(s) if !s.is_empty() => {
            worksheet.write_string_with_format(row, col, s, &format)
        }
        CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, &format),
        _ if styled => worksheet.write_blank(row, col, &format),
        _ => return Ok(false),
    };

    result.map_err(|e| {
        FormatterError::Encode(format!(
            "failed to write cell ({}, {}): {}",
            row + 1,
            col + 1,
            e
        ))
    })?;
    Ok(true)
}

/// Build an .xlsx Format from resolved cell attributes
fn build_format(font: Option<&Font>, alignment: &Alignment, border: Option<&Border>) -> Format {
    let mut format = Format::new();

    if let Some(font) = font {
        format = format.set_font_name(&font.name).set_font_size(font.size);
        if font.bold {
            format = format.set_bold();
        }
    }

    format = match alignment.horizontal {
        Some(HorizontalAlign::Left) => format.set_align(FormatAlign::Left),
        Some(HorizontalAlign::Center) => format.set_align(FormatAlign::Center),
        Some(HorizontalAlign::Right) => format.set_align(FormatAlign::Right),
        None => format,
    };

    format = match alignment.vertical {
        Some(VerticalAlign::Top) => format.set_align(FormatAlign::Top),
        Some(VerticalAlign::Middle) => format.set_align(FormatAlign::VerticalCenter),
        Some(VerticalAlign::Bottom) => format.set_align(FormatAlign::Bottom),
        None => format,
    };

    if alignment.wrap_text == Some(true) {
        format = format.set_text_wrap();
    }

    if let Some(border) = border {
        format = format
            .set_border_top(border_style_to_xlsx(border.top))
            .set_border_left(border_style_to_xlsx(border.left))
            .set_border_bottom(border_style_to_xlsx(border.bottom))
            .set_border_right(border_style_to_xlsx(border.right));
    }

    format
}

fn border_style_to_xlsx(style: BorderStyle) -> FormatBorder {
    match style {
        BorderStyle::None => FormatBorder::None,
        BorderStyle::Thin => FormatBorder::Thin,
    }
}

/// 1-based grid column → 0-based writer column
fn excel_col(col: u32) -> u16 {
    (col - 1) as u16
}

fn excel_datetime(value: NaiveDateTime) -> FormatterResult<ExcelDateTime> {
    let to_encode_error =
        |e: rust_xlsxwriter::XlsxError| FormatterError::Encode(format!("invalid timestamp: {}", e));
    ExcelDateTime::from_ymd(value.year() as u16, value.month() as u8, value.day() as u8)
        .and_then(|date| {
            date.and_hms(
                value.hour() as u16,
                value.minute() as u8,
                value.second() as u8,
            )
        })
        .map_err(to_encode_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InventoryFormatter, TransformOptions};
    use crate::excel::ExcelImporter;
    use crate::types::Worksheet;
    use chrono::NaiveDate;

    fn sample_workbook() -> Workbook {
        let sheet = Worksheet::from_rows(
            "Inventory",
            vec![
                vec![CellValue::from("Title"), CellValue::from("Copies")],
                vec![CellValue::from("Dune"), CellValue::Number(2.0)],
            ],
        )
        .unwrap();
        Workbook::new(vec![sheet])
    }

    #[test]
    fn test_to_bytes_is_a_zip_container() {
        let workbook = sample_workbook();
        let bytes = ExcelExporter::new(&workbook).to_bytes().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_round_trip_values() {
        let mut workbook = sample_workbook();
        workbook.properties.creator = Some("Edwin Peraza".to_string());
        workbook.properties.created = NaiveDate::from_ymd_opt(2025, 3, 4)
            .and_then(|d| d.and_hms_opt(9, 30, 0));

        let bytes = ExcelExporter::new(&workbook).to_bytes().unwrap();
        let decoded = ExcelImporter::new(&bytes).import().unwrap();

        let original = workbook.first_sheet().unwrap();
        let sheet = decoded.first_sheet().unwrap();
        assert_eq!(sheet.name, "Inventory");
        for row in 1..=2 {
            assert_eq!(sheet.row_values(row), original.row_values(row));
        }
    }

    /// Row values with trailing empties dropped; the reader pads every row
    /// to the used range.
    fn trimmed_row(sheet: &Worksheet, row: u32) -> Vec<CellValue> {
        let mut values = sheet.row_values(row);
        while values.last().is_some_and(CellValue::is_empty) {
            values.pop();
        }
        values
    }

    #[test]
    fn test_round_trip_formatted_sheet() {
        let sheet = Worksheet::from_rows(
            "Inventory",
            vec![
                vec![CellValue::from("Title"), CellValue::from("Author"), CellValue::from("Copies")],
                vec![CellValue::from("Dune"), CellValue::from("Herbert"), CellValue::Number(2.0)],
                vec![CellValue::from("Emma"), CellValue::from("Austen"), CellValue::Number(1.0)],
            ],
        )
        .unwrap();
        let mut workbook = Workbook::new(vec![sheet]);
        let now = NaiveDate::from_ymd_opt(2025, 12, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        InventoryFormatter::new(TransformOptions {
            remove_author: true,
            initials: "JP".to_string(),
            end_date: Some("12/31/2025".to_string()),
            ..Default::default()
        })
        .format_workbook(&mut workbook, now)
        .unwrap();

        let bytes = ExcelExporter::new(&workbook).to_bytes().unwrap();
        let decoded = ExcelImporter::new(&bytes).import().unwrap();

        let original = workbook.first_sheet().unwrap();
        let sheet = decoded.first_sheet().unwrap();
        assert_eq!(original.row_count(), 17);
        for row in 1..=original.row_count() {
            assert_eq!(
                trimmed_row(sheet, row),
                trimmed_row(original, row),
                "row {}",
                row
            );
        }
        assert_eq!(
            sheet.value(1, 5).as_text(),
            Some("End date updated to 12/31/2025 - JP")
        );
    }

    #[test]
    fn test_default_column_width_fills_unsized_columns() {
        let mut workbook = sample_workbook();
        let sheet = workbook.first_sheet_mut().unwrap();
        sheet.default_column_width = Some(10.0);
        sheet.column_mut(1).unwrap().width = Some(30.0);

        let bytes = ExcelExporter::new(&workbook).to_bytes().unwrap();
        let decoded = ExcelImporter::new(&bytes).import().unwrap();
        assert_eq!(
            decoded.first_sheet().unwrap().row_values(1),
            workbook.first_sheet().unwrap().row_values(1)
        );
    }

    #[test]
    fn test_bordered_empty_cell_is_written() {
        let mut workbook = sample_workbook();
        let sheet = workbook.first_sheet_mut().unwrap();
        sheet.cell_mut(3, 1).unwrap().border = Some(Border::thin());

        let bytes = ExcelExporter::new(&workbook).to_bytes().unwrap();
        let decoded = ExcelImporter::new(&bytes).import().unwrap();
        assert!(decoded.first_sheet().unwrap().value(3, 1).is_empty());
    }

    #[test]
    fn test_invalid_sheet_name_is_encode_error() {
        let workbook = Workbook::new(vec![Worksheet::new("bad[name]")]);
        let result = ExcelExporter::new(&workbook).to_bytes();
        assert!(matches!(result, Err(FormatterError::Encode(_))));
    }
}
