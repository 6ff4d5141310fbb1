use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Table already exists: {0}")]
    AlreadyExists(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Cannot open file: {0} (also tried: {0}.odt)")]
    FileNotFound(String),

    #[error("No table selected")]
    NoSelection,

    #[error("Column not found: {0}")]
    UnknownColumn(String),

    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Number of values doesn't match number of columns: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid file format: {0}")]
    Format(String),

    #[error("incorrect syntax in row {row}")]
    RowShape { row: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
