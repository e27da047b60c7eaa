//! Column and foreign-key clauses shared by every dialect.

use crate::model::{Column, Relation, Table};

/// `<name> <type>[ PRIMARY KEY][ AUTO_INCREMENT][ NOT NULL]`
pub fn column_definition(column: &Column) -> String {
    let mut def = format!("{} {}", column.name, column.typ);
    if column.is_primary {
        def.push_str(" PRIMARY KEY");
    }
    if column.is_auto_increment {
        def.push_str(" AUTO_INCREMENT");
    }
    if !column.is_null {
        def.push_str(" NOT NULL");
    }
    def
}

/// One clause per relation leaving `table`, in relation order.
///
/// The referencing and referenced columns are written as column ids, not
/// names. A missing target table yields an empty table name.
pub fn foreign_keys(table: &Table, tables: &[Table], relations: &[Relation]) -> Vec<String> {
    relations
        .iter()
        .filter(|r| r.from_table_id == table.id)
        .map(|r| {
            let target = tables
                .iter()
                .find(|t| t.id == r.to_table_id)
                .map(|t| t.name.as_str());
            if target.is_none() {
                tracing::warn!(
                    relation = %r.id,
                    to_table_id = %r.to_table_id,
                    "foreign key references a missing table"
                );
            }
            format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                r.from_column_id,
                target.unwrap_or_default(),
                r.to_column_id
            )
        })
        .collect()
}

/// Column definitions followed by foreign keys, all joined by `sep`.
pub fn table_body(table: &Table, tables: &[Table], relations: &[Relation], sep: &str) -> String {
    let mut body = table
        .columns
        .iter()
        .map(column_definition)
        .collect::<Vec<_>>()
        .join(sep);
    let fks = foreign_keys(table, tables, relations);
    if !fks.is_empty() {
        body.push_str(sep);
        body.push_str(&fks.join(sep));
    }
    body
}
