//! Line-tagged SQL preview for the code view.

use super::clause::{column_definition, foreign_keys};
use crate::model::{Relation, Table};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    Header,
    Column,
    ForeignKey,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub kind: LineKind,
    pub table_id: String,
    pub text: String,
}

/// Every line but the last item of a table block carries a trailing comma.
pub fn preview(tables: &[Table], relations: &[Relation]) -> Vec<PreviewLine> {
    let mut lines = Vec::new();
    for table in tables {
        let line = |kind, text: String| PreviewLine {
            kind,
            table_id: table.id.clone(),
            text,
        };
        lines.push(line(LineKind::Header, format!("CREATE TABLE {} (", table.name)));

        let items: Vec<(LineKind, String)> = table
            .columns
            .iter()
            .map(|c| (LineKind::Column, column_definition(c)))
            .chain(
                foreign_keys(table, tables, relations)
                    .into_iter()
                    .map(|fk| (LineKind::ForeignKey, fk)),
            )
            .collect();
        let last = items.len().saturating_sub(1);
        for (i, (kind, mut text)) in items.into_iter().enumerate() {
            if i != last {
                text.push(',');
            }
            lines.push(line(kind, text));
        }

        lines.push(line(LineKind::Footer, ");".to_string()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::template;

    #[test]
    fn test_preview_blocks() {
        let schema = template("user-product").unwrap().schema;
        let lines = preview(&schema.tables, &schema.relations);

        // 2 headers + 2 footers + 10 columns + 1 foreign key
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0].kind, LineKind::Header);
        assert_eq!(lines[0].text, "CREATE TABLE users (");
        assert_eq!(lines[5].text, "created_at DATETIME NOT NULL");
        assert_eq!(lines[6].kind, LineKind::Footer);

        let products: Vec<&PreviewLine> = lines.iter().filter(|l| l.table_id == "2").collect();
        assert_eq!(products[5].text, "user_id INT NOT NULL,");
        assert_eq!(products[6].kind, LineKind::ForeignKey);
        assert_eq!(products[6].text, "FOREIGN KEY (2-5) REFERENCES users(1-1)");
    }

    #[test]
    fn test_preview_empty_table() {
        let mut t = Table::new("1", "bare", crate::model::Position::default());
        t.columns.clear();
        let lines = preview(&[t], &[]);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["CREATE TABLE bare (", ");"]);
    }
}
