use thiserror::Error;

pub type FormatterResult<T> = Result<T, FormatterError>;

#[derive(Error, Debug)]
pub enum FormatterError {
    /// Input bytes are not a readable spreadsheet, or hold no worksheet.
    #[error("Failed to read spreadsheet: {0}")]
    Decode(String),

    /// The finished grid could not be written as .xlsx.
    #[error("Failed to write spreadsheet: {0}")]
    Encode(String),

    /// Anything that goes wrong while editing columns, rows or styles.
    #[error("Failed to process file: {0}")]
    Transform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_yaml::Error),
}
