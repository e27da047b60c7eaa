//! Schema to SQL / connection-code generation.

mod clause;
mod nodejs;
mod php;
mod preview;
mod python;
mod sql;

pub use clause::{column_definition, foreign_keys};
pub use preview::{LineKind, PreviewLine, preview};

use crate::model::{Relation, Table};
use serde::Deserialize;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Plain MySQL DDL
    Sql,
    /// Node.js `mysql2/promise` pooled-connection script
    #[default]
    NodeJs,
    /// Python `mysql.connector` cursor script
    Python,
    /// PHP `mysqli` procedural script
    Php,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Self::Sql, Self::NodeJs, Self::Python, Self::Php];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sql" | "mysql" => Some(Self::Sql),
            "nodejs" | "node" | "js" | "javascript" => Some(Self::NodeJs),
            "python" | "py" => Some(Self::Python),
            "php" => Some(Self::Php),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sql => "MySQL",
            Self::NodeJs => "Node.js",
            Self::Python => "Python",
            Self::Php => "PHP",
        }
    }
}

/// Connection placeholders written into the script dialects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "root".to_string(),
            password: String::new(),
            database: "your_database".to_string(),
        }
    }
}

/// Generate `dialect` output for the given snapshot with default connection settings.
pub fn generate(dialect: Dialect, tables: &[Table], relations: &[Relation]) -> String {
    generate_with(dialect, tables, relations, &ConnectionSettings::default())
}

pub fn generate_with(
    dialect: Dialect,
    tables: &[Table],
    relations: &[Relation],
    settings: &ConnectionSettings,
) -> String {
    match dialect {
        Dialect::Sql => sql::generate(tables, relations),
        Dialect::NodeJs => nodejs::generate(tables, relations, settings),
        Dialect::Python => python::generate(tables, relations, settings),
        Dialect::Php => php::generate(tables, relations, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position, RelationType};

    #[test]
    fn test_dialect_from_str() {
        assert_eq!(Dialect::from_str("MySQL"), Some(Dialect::Sql));
        assert_eq!(Dialect::from_str("nodejs"), Some(Dialect::NodeJs));
        assert_eq!(Dialect::from_str("py"), Some(Dialect::Python));
        assert_eq!(Dialect::from_str("ruby"), None);
        assert_eq!(Dialect::default(), Dialect::NodeJs);
    }

    #[test]
    fn test_settings_partial_override() {
        let s: ConnectionSettings = serde_json::from_str(r#"{"database":"shop"}"#).unwrap();
        assert_eq!(s.database, "shop");
        assert_eq!(s.host, "localhost");
    }

    #[test]
    fn test_every_dialect_is_total_on_degenerate_input() {
        let mut empty = Table::new("1", "empty", Position::default());
        empty.columns.clear();
        let tables = vec![empty];
        let relations = vec![Relation {
            id: "self".into(),
            from_table_id: "1".into(),
            from_column_id: "a".into(),
            to_table_id: "1".into(),
            to_column_id: "b".into(),
            kind: RelationType::ManyToMany,
        }];
        for dialect in Dialect::ALL {
            let out = generate(dialect, &tables, &relations);
            assert!(out.contains("FOREIGN KEY (a) REFERENCES empty(b)"), "{dialect:?}");
            let nothing = generate(dialect, &[], &[]);
            assert!(!nothing.contains("CREATE TABLE"), "{dialect:?}");
        }
    }
}
