#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid design document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate table id: {0}")]
    DuplicateTableId(String),
    #[error("Duplicate column id {column} in table {table}")]
    DuplicateColumnId { table: String, column: String },
    #[error("Unknown dialect: {0} (expected sql, nodejs, python or php)")]
    UnknownDialect(String),
    #[error("Unknown theme: {0} (expected light or dark)")]
    UnknownTheme(String),
    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),
    #[error("Unknown relation type: {0} (expected one-to-one, one-to-many or many-to-many)")]
    UnknownRelationType(String),
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
