//! JSON export of a design.

use crate::error::Result;
use crate::model::Schema;

/// Default download name for an exported design.
pub const EXPORT_FILE_NAME: &str = "database-design.json";

/// Pretty-printed `{ "tables": [...], "relations": [...] }` with two-space indent.
pub fn to_json(schema: &Schema) -> Result<String> {
    Ok(serde_json::to_string_pretty(schema)?)
}
