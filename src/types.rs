use crate::error::{FormatterError, FormatterResult};
use chrono::NaiveDateTime;

/// Last addressable row of an .xlsx worksheet (1-based)
pub const MAX_ROWS: u32 = 1_048_576;
/// Last addressable column of an .xlsx worksheet (1-based)
pub const MAX_COLUMNS: u32 = 16_384;

//==============================================================================
// Cell values and styles
//==============================================================================

/// Value held by a cell
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

impl CellValue {
    /// Empty text counts as empty, same as a cell that was never written.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Stringified value as a spreadsheet would display it in General format
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            // f64 Display already drops a trailing ".0"
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub name: String,
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub fn new(name: &str, size: f64) -> Self {
        Self {
            name: name.to_string(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Alignment attributes. `None` fields inherit from the enclosing row/column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alignment {
    pub horizontal: Option<HorizontalAlign>,
    pub vertical: Option<VerticalAlign>,
    pub wrap_text: Option<bool>,
}

impl Alignment {
    pub fn centered() -> Self {
        Self {
            horizontal: Some(HorizontalAlign::Center),
            vertical: Some(VerticalAlign::Middle),
            wrap_text: None,
        }
    }

    pub fn right() -> Self {
        Self {
            horizontal: Some(HorizontalAlign::Right),
            ..Self::default()
        }
    }

    pub fn wrap(wrap_text: bool) -> Self {
        Self {
            wrap_text: Some(wrap_text),
            ..Self::default()
        }
    }

    /// Layer `self` on top of `base`: fields set here win.
    pub fn over(&self, base: &Alignment) -> Alignment {
        Alignment {
            horizontal: self.horizontal.or(base.horizontal),
            vertical: self.vertical.or(base.vertical),
            wrap_text: self.wrap_text.or(base.wrap_text),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Border {
    pub top: BorderStyle,
    pub left: BorderStyle,
    pub bottom: BorderStyle,
    pub right: BorderStyle,
}

impl Border {
    /// Thin line on all four sides
    pub fn thin() -> Self {
        Self {
            top: BorderStyle::Thin,
            left: BorderStyle::Thin,
            bottom: BorderStyle::Thin,
            right: BorderStyle::Thin,
        }
    }
}

/// A single grid cell. The border is independent of the value, so a cell
/// can be empty and still print as a box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub font: Option<Font>,
    pub alignment: Option<Alignment>,
    pub border: Option<Border>,
}

impl Cell {
    pub fn with_value(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

//==============================================================================
// Rows, columns and sheet-level settings
//==============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// `None` marks a cell that was never written
    cells: Vec<Option<Cell>>,
    pub font: Option<Font>,
    pub alignment: Option<Alignment>,
}

impl Row {
    /// Number of cell slots up to and including the last existing cell
    pub fn width(&self) -> u32 {
        self.cells.len() as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDef {
    pub width: Option<f64>,
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// Print header/footer strings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooter {
    pub odd_header: String,
    pub odd_footer: String,
    pub even_header: String,
    pub even_footer: String,
}

impl HeaderFooter {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.odd_header.is_empty()
            && self.odd_footer.is_empty()
            && self.even_header.is_empty()
            && self.even_footer.is_empty()
    }
}

//==============================================================================
// Worksheet
//==============================================================================

static EMPTY: CellValue = CellValue::Empty;

/// A named grid of cells addressed by 1-based (row, column).
///
/// Every mutation goes through `cell_mut`, `set_cell`, `delete_column` and
/// `insert_row_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    rows: Vec<Row>,
    columns: Vec<ColumnDef>,
    pub default_row_height: Option<f64>,
    pub default_column_width: Option<f64>,
    pub orientation: PageOrientation,
    pub header_footer: HeaderFooter,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            columns: Vec::new(),
            default_row_height: None,
            default_column_width: None,
            orientation: PageOrientation::default(),
            header_footer: HeaderFooter::default(),
        }
    }

    /// Build a sheet from rows of values, starting at A1
    pub fn from_rows<R, V>(name: impl Into<String>, rows: R) -> FormatterResult<Self>
    where
        R: IntoIterator<Item = Vec<V>>,
        V: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for (r, values) in rows.into_iter().enumerate() {
            for (c, value) in values.into_iter().enumerate() {
                sheet.set_cell(r as u32 + 1, c as u32 + 1, value)?;
            }
        }
        Ok(sheet)
    }

    /// Number of rows, including trailing rows with no cells
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Widest row of the grid
    pub fn column_count(&self) -> u32 {
        self.rows.iter().map(Row::width).max().unwrap_or(0)
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.cells.get(col as usize - 1))
            .and_then(Option::as_ref)
    }

    /// Value at (row, col); unset cells read as empty
    pub fn value(&self, row: u32, col: u32) -> &CellValue {
        self.cell(row, col).map_or(&EMPTY, |c| &c.value)
    }

    /// Cell at (row, col), created on first access
    pub fn cell_mut(&mut self, row: u32, col: u32) -> FormatterResult<&mut Cell> {
        check_address(row, col)?;
        let r = self.row_mut(row)?;
        let idx = col as usize - 1;
        if r.cells.len() <= idx {
            r.cells.resize(idx + 1, None);
        }
        Ok(r.cells[idx].get_or_insert_with(Cell::default))
    }

    pub fn set_cell(
        &mut self,
        row: u32,
        col: u32,
        value: impl Into<CellValue>,
    ) -> FormatterResult<&mut Cell> {
        let cell = self.cell_mut(row, col)?;
        cell.value = value.into();
        Ok(cell)
    }

    pub fn row(&self, row: u32) -> Option<&Row> {
        if row == 0 {
            return None;
        }
        self.rows.get(row as usize - 1)
    }

    /// Row definition at `row`, created (with any rows above it) on first access
    pub fn row_mut(&mut self, row: u32) -> FormatterResult<&mut Row> {
        check_address(row, 1)?;
        let idx = row as usize - 1;
        if self.rows.len() <= idx {
            self.rows.resize(idx + 1, Row::default());
        }
        Ok(&mut self.rows[idx])
    }

    pub fn column(&self, col: u32) -> Option<&ColumnDef> {
        if col == 0 {
            return None;
        }
        self.columns.get(col as usize - 1)
    }

    pub fn column_mut(&mut self, col: u32) -> FormatterResult<&mut ColumnDef> {
        check_address(1, col)?;
        let idx = col as usize - 1;
        if self.columns.len() <= idx {
            self.columns.resize(idx + 1, ColumnDef::default());
        }
        Ok(&mut self.columns[idx])
    }

    /// Remove column `col`; every column to its right shifts left by one.
    pub fn delete_column(&mut self, col: u32) -> FormatterResult<()> {
        if col == 0 || col > self.column_count().max(self.columns.len() as u32) {
            return Err(FormatterError::Transform(format!(
                "cannot delete column {}: sheet '{}' has {} columns",
                col,
                self.name,
                self.column_count()
            )));
        }
        let idx = col as usize - 1;
        for row in &mut self.rows {
            if idx < row.cells.len() {
                row.cells.remove(idx);
            }
            trim_trailing(&mut row.cells);
        }
        if idx < self.columns.len() {
            self.columns.remove(idx);
        }
        Ok(())
    }

    /// Insert an empty row so that it becomes row `row`; rows at and below
    /// it shift down by one.
    pub fn insert_row_at(&mut self, row: u32) -> FormatterResult<()> {
        if row == 0 || self.row_count() >= MAX_ROWS {
            return Err(FormatterError::Transform(format!(
                "cannot insert row {} into sheet '{}' with {} rows",
                row,
                self.name,
                self.row_count()
            )));
        }
        let idx = row as usize - 1;
        if idx > self.rows.len() {
            self.rows.resize(idx, Row::default());
        }
        self.rows.insert(idx, Row::default());
        Ok(())
    }

    /// Visit every existing cell in row-major order
    pub fn for_each_cell_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(u32, u32, &mut Cell),
    {
        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, slot) in row.cells.iter_mut().enumerate() {
                if let Some(cell) = slot {
                    f(r as u32 + 1, c as u32 + 1, cell);
                }
            }
        }
    }

    /// Existing cells of column `col`, top to bottom
    pub fn column_cells(&self, col: u32) -> impl Iterator<Item = &Cell> + '_ {
        let idx = (col as usize).wrapping_sub(1);
        self.rows
            .iter()
            .filter_map(move |row| row.cells.get(idx).and_then(Option::as_ref))
    }

    /// Values of row `row` from column 1 to the row's last cell
    pub fn row_values(&self, row: u32) -> Vec<CellValue> {
        self.row(row)
            .map(|r| {
                r.cells
                    .iter()
                    .map(|c| c.as_ref().map(|c| c.value.clone()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn check_address(row: u32, col: u32) -> FormatterResult<()> {
    if row == 0 || row > MAX_ROWS || col == 0 || col > MAX_COLUMNS {
        return Err(FormatterError::Transform(format!(
            "cell address ({}, {}) is outside the worksheet",
            row, col
        )));
    }
    Ok(())
}

fn trim_trailing(cells: &mut Vec<Option<Cell>>) {
    while matches!(cells.last(), Some(None)) {
        cells.pop();
    }
}

//==============================================================================
// Workbook
//==============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentProperties {
    pub creator: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
}

/// Ordered worksheets plus document metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
    pub properties: DocumentProperties,
}

impl Workbook {
    pub fn new(sheets: Vec<Worksheet>) -> Self {
        Self {
            sheets,
            properties: DocumentProperties::default(),
        }
    }

    pub fn first_sheet(&self) -> Option<&Worksheet> {
        self.sheets.first()
    }

    /// The worksheet every transformation operates on
    pub fn first_sheet_mut(&mut self) -> FormatterResult<&mut Worksheet> {
        self.sheets
            .first_mut()
            .ok_or_else(|| FormatterError::Transform("workbook has no worksheet".to_string()))
    }
}
