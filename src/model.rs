//! Schema model: tables, columns and relations.
//!
//! Every update operation takes `&self` and returns the next snapshot, so the
//! renderer and generator always see a consistent, immutable view.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to the non-negative quadrant.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    #[serde(rename = "INT")]
    Int,
    #[serde(rename = "VARCHAR")]
    Varchar,
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "BOOLEAN")]
    Boolean,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "DATETIME")]
    DateTime,
    #[serde(rename = "DECIMAL")]
    Decimal,
    #[serde(rename = "FLOAT")]
    Float,
    #[serde(rename = "BIGINT")]
    BigInt,
    #[serde(rename = "SMALLINT")]
    SmallInt,
    #[serde(rename = "LONGTEXT")]
    LongText,
    #[serde(rename = "JSON")]
    Json,
}

impl ColumnType {
    pub const ALL: [ColumnType; 12] = [
        Self::Int,
        Self::Varchar,
        Self::Text,
        Self::Boolean,
        Self::Date,
        Self::DateTime,
        Self::Decimal,
        Self::Float,
        Self::BigInt,
        Self::SmallInt,
        Self::LongText,
        Self::Json,
    ];

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Varchar => "VARCHAR",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Decimal => "DECIMAL",
            Self::Float => "FLOAT",
            Self::BigInt => "BIGINT",
            Self::SmallInt => "SMALLINT",
            Self::LongText => "LONGTEXT",
            Self::Json => "JSON",
        }
    }

    /// Parse a type tag, case-insensitively.
    pub fn from_tag(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|t| t.as_sql() == upper)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub typ: ColumnType,
    pub is_primary: bool,
    pub is_null: bool,
    pub is_auto_increment: bool,
}

impl Column {
    /// A plain nullable column, the add-column form's starting state.
    pub fn new(id: impl Into<String>, name: impl Into<String>, typ: ColumnType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            typ,
            is_primary: false,
            is_null: true,
            is_auto_increment: false,
        }
    }

    /// The `id INT PRIMARY KEY AUTO_INCREMENT NOT NULL` column every table starts with.
    pub fn primary_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "id".to_string(),
            typ: ColumnType::Int,
            is_primary: true,
            is_null: false,
            is_auto_increment: true,
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_null = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub columns: Vec<Column>,
}

impl Table {
    /// New table seeded with its primary `id` column.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        let id = id.into();
        let seed = Column::primary_id(format!("{id}-1"));
        Self {
            id,
            name: name.into(),
            position,
            columns: vec![seed],
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// First primary-key column, falling back to the first column.
    pub fn key_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.is_primary)
            .or_else(|| self.columns.first())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    OneToOne,
    #[default]
    OneToMany,
    ManyToMany,
}

impl RelationType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "one-to-one" | "1:1" => Some(Self::OneToOne),
            "one-to-many" | "1:N" => Some(Self::OneToMany),
            "many-to-many" | "N:N" => Some(Self::ManyToMany),
            _ => None,
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToMany => "1:N",
            Self::ManyToMany => "N:N",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: String,
    pub from_table_id: String,
    pub from_column_id: String,
    pub to_table_id: String,
    pub to_column_id: String,
    #[serde(rename = "type")]
    pub kind: RelationType,
}

/// Partial table update; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableUpdate {
    pub name: Option<String>,
    pub position: Option<Position>,
    pub columns: Option<Vec<Column>>,
}

impl TableUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub relations: Vec<Relation>,
}

impl Schema {
    pub fn new(tables: Vec<Table>, relations: Vec<Relation>) -> Self {
        Self { tables, relations }
    }

    /// Parse a `{ tables, relations }` document and check identity rules.
    pub fn from_json(input: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(input)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Table ids must be unique, and column ids unique within each table.
    /// Relation endpoints are not checked: dangling references are tolerated.
    pub fn validate(&self) -> Result<()> {
        let mut table_ids = HashSet::new();
        for table in &self.tables {
            if !table_ids.insert(table.id.as_str()) {
                return Err(Error::DuplicateTableId(table.id.clone()));
            }
            let mut column_ids = HashSet::new();
            for column in &table.columns {
                if !column_ids.insert(column.id.as_str()) {
                    return Err(Error::DuplicateColumnId {
                        table: table.id.clone(),
                        column: column.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn table_name(&self, table_id: &str) -> Option<&str> {
        self.table(table_id).map(|t| t.name.as_str())
    }

    /// Relations with the table on either end, in relation order.
    pub fn relations_of<'a>(&'a self, table_id: &'a str) -> impl Iterator<Item = &'a Relation> {
        self.relations
            .iter()
            .filter(move |r| r.from_table_id == table_id || r.to_table_id == table_id)
    }

    /// `"<from> → <to>"`, with missing tables shown as empty names.
    pub fn relation_label(&self, relation: &Relation) -> String {
        format!(
            "{} → {}",
            self.table_name(&relation.from_table_id).unwrap_or_default(),
            self.table_name(&relation.to_table_id).unwrap_or_default()
        )
    }

    pub fn add_table(&self, table: Table) -> Self {
        let mut next = self.clone();
        next.tables.push(table);
        next
    }

    pub fn add_tables(&self, tables: impl IntoIterator<Item = Table>) -> Self {
        let mut next = self.clone();
        next.tables.extend(tables);
        next
    }

    /// Remove a table and every relation that starts or ends at it.
    pub fn delete_table(&self, table_id: &str) -> Self {
        Self {
            tables: self
                .tables
                .iter()
                .filter(|t| t.id != table_id)
                .cloned()
                .collect(),
            relations: self
                .relations
                .iter()
                .filter(|r| r.from_table_id != table_id && r.to_table_id != table_id)
                .cloned()
                .collect(),
        }
    }

    pub fn add_column(&self, table_id: &str, column: Column) -> Self {
        self.map_table(table_id, |t| t.columns.push(column))
    }

    /// Remove a column. Relations pointing at it are left in place.
    pub fn delete_column(&self, table_id: &str, column_id: &str) -> Self {
        self.map_table(table_id, |t| t.columns.retain(|c| c.id != column_id))
    }

    pub fn update_table(&self, table_id: &str, update: TableUpdate) -> Self {
        self.map_table(table_id, |t| {
            if let Some(name) = update.name {
                t.name = name;
            }
            if let Some(position) = update.position {
                t.position = position.clamped();
            }
            if let Some(columns) = update.columns {
                t.columns = columns;
            }
        })
    }

    pub fn update_position(&self, table_id: &str, position: Position) -> Self {
        self.map_table(table_id, |t| t.position = position.clamped())
    }

    pub fn add_relation(&self, relation: Relation) -> Self {
        let mut next = self.clone();
        next.relations.push(relation);
        next
    }

    pub fn delete_relation(&self, relation_id: &str) -> Self {
        let mut next = self.clone();
        next.relations.retain(|r| r.id != relation_id);
        next
    }

    fn map_table(&self, table_id: &str, f: impl FnOnce(&mut Table)) -> Self {
        let mut next = self.clone();
        if let Some(table) = next.tables.iter_mut().find(|t| t.id == table_id) {
            f(table);
        }
        next
    }
}
