//! Excel importer implementation - .xls / .xlsx bytes → Workbook

use crate::core::short_date;
use crate::error::{FormatterError, FormatterResult};
use crate::types::{CellValue, Workbook, Worksheet};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::Timelike;
use std::io::Cursor;
use tracing::debug;

/// Decodes a spreadsheet held in memory. The container format (legacy
/// BIFF `.xls` or zip-based `.xlsx`) is sniffed from the bytes.
pub struct ExcelImporter<'a> {
    bytes: &'a [u8],
}

impl<'a> ExcelImporter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Import every worksheet into a Workbook
    pub fn import(&self) -> FormatterResult<Workbook> {
        let mut sheets = open_workbook_auto_from_rs(Cursor::new(self.bytes))
            .map_err(|e| FormatterError::Decode(e.to_string()))?;

        let sheet_names = sheets.sheet_names().to_vec();
        if sheet_names.is_empty() {
            return Err(FormatterError::Decode(
                "workbook contains no worksheets".to_string(),
            ));
        }

        let mut worksheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in &sheet_names {
            let range = sheets.worksheet_range(sheet_name).map_err(|e| {
                FormatterError::Decode(format!("failed to read sheet '{}': {}", sheet_name, e))
            })?;
            worksheets.push(self.process_sheet(sheet_name, &range)?);
        }

        Ok(Workbook::new(worksheets))
    }

    /// Copy the used range of one sheet into a Worksheet. Every position
    /// inside the range becomes an existing cell, even when it is empty.
    fn process_sheet(&self, sheet_name: &str, range: &Range<Data>) -> FormatterResult<Worksheet> {
        let mut sheet = Worksheet::new(sheet_name);
        let Some((start_row, start_col)) = range.start() else {
            debug!(sheet = sheet_name, "empty worksheet");
            return Ok(sheet);
        };

        for (r, row) in range.rows().enumerate() {
            for (c, data) in row.iter().enumerate() {
                sheet.set_cell(
                    start_row + r as u32 + 1,
                    start_col + c as u32 + 1,
                    convert_data(data),
                )?;
            }
        }

        let (height, width) = range.get_size();
        debug!(sheet = sheet_name, height, width, "decoded worksheet");
        Ok(sheet)
    }
}

/// Convert a calamine cell to a grid value
fn convert_data(data: &Data) -> CellValue {
    match data {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => {
            if dt.is_datetime() {
                match dt.as_datetime() {
                    Some(value) if value.time().num_seconds_from_midnight() == 0 => {
                        CellValue::Text(short_date(value.date()))
                    }
                    Some(value) => CellValue::Text(format!(
                        "{} {}:{:02}:{:02}",
                        short_date(value.date()),
                        value.hour(),
                        value.minute(),
                        value.second()
                    )),
                    None => CellValue::Number(dt.as_f64()),
                }
            } else {
                CellValue::Number(dt.as_f64())
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use rust_xlsxwriter::Workbook as XlsxWorkbook;

    fn xlsx_bytes(build: impl FnOnce(&mut XlsxWorkbook)) -> Vec<u8> {
        let mut workbook = XlsxWorkbook::new();
        build(&mut workbook);
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_convert_data_scalars() {
        assert_eq!(
            convert_data(&Data::String("Dune".to_string())),
            CellValue::from("Dune")
        );
        assert_eq!(convert_data(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(convert_data(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(convert_data(&Data::Bool(true)), CellValue::from("TRUE"));
        assert_eq!(convert_data(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_convert_data_error_cell() {
        assert_eq!(
            convert_data(&Data::Error(CellErrorType::NA)),
            CellValue::from("#N/A")
        );
    }

    #[test]
    fn test_import_garbage_is_decode_error() {
        let result = ExcelImporter::new(b"definitely not a spreadsheet").import();
        assert!(matches!(result, Err(FormatterError::Decode(_))));
    }

    #[test]
    fn test_import_truncated_xlsx_is_decode_error() {
        let bytes = xlsx_bytes(|wb| {
            wb.add_worksheet().write_string(0, 0, "Title").unwrap();
        });
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            ExcelImporter::new(truncated).import(),
            Err(FormatterError::Decode(_))
        ));
    }

    #[test]
    fn test_import_values_and_sheet_names() {
        let bytes = xlsx_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.set_name("Inventory").unwrap();
            ws.write_string(0, 0, "Title").unwrap();
            ws.write_string(0, 1, "Copies").unwrap();
            ws.write_string(1, 0, "Dune").unwrap();
            ws.write_number(1, 1, 3).unwrap();
            wb.add_worksheet().set_name("Notes").unwrap();
        });

        let workbook = ExcelImporter::new(&bytes).import().unwrap();
        assert_eq!(workbook.sheets.len(), 2);

        let sheet = workbook.first_sheet().unwrap();
        assert_eq!(sheet.name, "Inventory");
        assert_eq!(sheet.value(1, 1).as_text(), Some("Title"));
        assert_eq!(sheet.value(2, 2), &CellValue::Number(3.0));
        assert_eq!(workbook.sheets[1].name, "Notes");
    }

    #[test]
    fn test_import_keeps_offset_ranges_in_place() {
        let bytes = xlsx_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(2, 1, "Title").unwrap();
            ws.write_string(3, 2, "Dune").unwrap();
        });

        let workbook = ExcelImporter::new(&bytes).import().unwrap();
        let sheet = workbook.first_sheet().unwrap();
        assert_eq!(sheet.value(3, 2).as_text(), Some("Title"));
        assert_eq!(sheet.value(4, 3).as_text(), Some("Dune"));
        assert!(sheet.cell(1, 1).is_none());
        // Gaps inside the used range still exist as empty cells
        assert!(sheet.cell(3, 3).is_some());
        assert!(sheet.cell(3, 3).unwrap().value.is_empty());
    }
}
