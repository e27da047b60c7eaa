//! Designer state container.
//!
//! [`reduce`] maps a snapshot and an [`Action`] to the next snapshot. The
//! [`Designer`] owns the current snapshot, the selection and the id source,
//! and is the only place that replaces state.

use crate::error::{Error, Result};
use crate::interaction::Effect;
use crate::model::{Column, Position, Relation, RelationType, Schema, Table, TableUpdate};
use crate::templates;

/// Supplies opaque identifiers for new tables, columns and relations.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids "1", "2", ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        self.next.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddTable(Table),
    AddTables(Vec<Table>),
    DeleteTable(String),
    AddColumn { table_id: String, column: Column },
    DeleteColumn { table_id: String, column_id: String },
    UpdateTable { table_id: String, update: TableUpdate },
    UpdatePosition { table_id: String, position: Position },
    AddRelation(Relation),
    DeleteRelation(String),
    LoadTemplate(Schema),
}

pub fn reduce(schema: &Schema, action: Action) -> Schema {
    match action {
        Action::AddTable(table) => schema.add_table(table),
        Action::AddTables(tables) => schema.add_tables(tables),
        Action::DeleteTable(id) => schema.delete_table(&id),
        Action::AddColumn { table_id, column } => schema.add_column(&table_id, column),
        Action::DeleteColumn { table_id, column_id } => schema.delete_column(&table_id, &column_id),
        Action::UpdateTable { table_id, update } => schema.update_table(&table_id, update),
        Action::UpdatePosition { table_id, position } => schema.update_position(&table_id, position),
        Action::AddRelation(relation) => schema.add_relation(relation),
        Action::DeleteRelation(id) => schema.delete_relation(&id),
        Action::LoadTemplate(next) => next,
    }
}

/// Placement for the `index`-th table created without an explicit position.
/// Cycles through a 3 x 4 grid inside the initially visible area.
pub fn default_position(index: usize) -> Position {
    Position::new(
        100.0 + (index % 3) as f64 * 240.0,
        100.0 + ((index / 3) % 4) as f64 * 120.0,
    )
}

pub struct Designer<I: IdSource = UuidIds> {
    schema: Schema,
    selected: Option<String>,
    ids: I,
}

impl Default for Designer<UuidIds> {
    fn default() -> Self {
        Self::with_ids(UuidIds)
    }
}

impl Designer<UuidIds> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: IdSource> Designer<I> {
    pub fn with_ids(ids: I) -> Self {
        Self {
            schema: Schema::default(),
            selected: None,
            ids,
        }
    }

    pub fn from_schema(schema: Schema, ids: I) -> Self {
        Self {
            schema,
            selected: None,
            ids,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, table_id: Option<String>) {
        self.selected = table_id;
    }

    pub fn dispatch(&mut self, action: Action) -> &Schema {
        tracing::debug!(?action, "dispatch");
        if let Action::DeleteTable(id) = &action {
            if self.selected.as_deref() == Some(id.as_str()) {
                self.selected = None;
            }
        }
        self.schema = reduce(&self.schema, action);
        &self.schema
    }

    /// Create a table at the next default slot and select it.
    pub fn add_table(&mut self, name: &str) -> String {
        let id = fresh_id(&mut self.ids, |id| self.schema.table(id).is_some());
        let table = Table::new(
            id.clone(),
            name,
            default_position(self.schema.tables.len()),
        );
        self.dispatch(Action::AddTable(table));
        self.selected = Some(id.clone());
        id
    }

    /// Bulk create: names are trimmed, blank ones skipped. Selects the first new table.
    pub fn add_tables<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let start = self.schema.tables.len();
        let mut tables: Vec<Table> = Vec::new();
        for name in names.iter().map(|n| n.as_ref().trim()).filter(|n| !n.is_empty()) {
            let id = fresh_id(&mut self.ids, |id| {
                self.schema.table(id).is_some() || tables.iter().any(|t| t.id == id)
            });
            let position = default_position(start + tables.len());
            tables.push(Table::new(id, name, position));
        }
        let ids: Vec<String> = tables.iter().map(|t| t.id.clone()).collect();
        if let Some(first) = ids.first() {
            self.selected = Some(first.clone());
        }
        self.dispatch(Action::AddTables(tables));
        ids
    }

    pub fn delete_table(&mut self, table_id: &str) {
        self.dispatch(Action::DeleteTable(table_id.to_string()));
    }

    pub fn rename_table(&mut self, table_id: &str, name: &str) {
        self.update_table(table_id, TableUpdate::rename(name));
    }

    pub fn update_table(&mut self, table_id: &str, update: TableUpdate) {
        if self.missing(table_id) {
            return;
        }
        self.dispatch(Action::UpdateTable {
            table_id: table_id.to_string(),
            update,
        });
    }

    pub fn update_position(&mut self, table_id: &str, position: Position) {
        if self.missing(table_id) {
            return;
        }
        self.dispatch(Action::UpdatePosition {
            table_id: table_id.to_string(),
            position,
        });
    }

    /// Append a column; its id is replaced with a freshly allocated one.
    pub fn add_column(&mut self, table_id: &str, mut column: Column) -> Option<String> {
        if self.missing(table_id) {
            return None;
        }
        column.id = fresh_id(&mut self.ids, |id| {
            self.schema.table(table_id).is_some_and(|t| t.column(id).is_some())
        });
        let id = column.id.clone();
        self.dispatch(Action::AddColumn {
            table_id: table_id.to_string(),
            column,
        });
        Some(id)
    }

    pub fn delete_column(&mut self, table_id: &str, column_id: &str) {
        self.dispatch(Action::DeleteColumn {
            table_id: table_id.to_string(),
            column_id: column_id.to_string(),
        });
    }

    /// Append a relation; its id is replaced with a freshly allocated one.
    pub fn add_relation(&mut self, mut relation: Relation) -> String {
        relation.id = fresh_id(&mut self.ids, |id| self.schema.relations.iter().any(|r| r.id == id));
        let id = relation.id.clone();
        self.dispatch(Action::AddRelation(relation));
        id
    }

    pub fn delete_relation(&mut self, relation_id: &str) {
        self.dispatch(Action::DeleteRelation(relation_id.to_string()));
    }

    /// Replace the design with a built-in template and select its first table.
    pub fn load_template(&mut self, key: &str) -> Result<()> {
        let template = templates::template(key).ok_or_else(|| Error::UnknownTemplate(key.to_string()))?;
        self.selected = template.schema.tables.first().map(|t| t.id.clone());
        self.dispatch(Action::LoadTemplate(template.schema));
        Ok(())
    }

    /// Apply a controller effect to the design.
    pub fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Select(table_id) => self.selected = Some(table_id),
            Effect::MoveTable { table_id, position } => self.update_position(&table_id, position),
            Effect::CreateRelation {
                from_table_id,
                from_column_id,
                to_table_id,
                to_column_id,
            } => {
                let from_column = self.resolve_column(&from_table_id, from_column_id);
                let to_column = self.resolve_column(&to_table_id, to_column_id);
                match (from_column, to_column) {
                    (Some(from_column_id), Some(to_column_id)) => {
                        self.add_relation(Relation {
                            id: String::new(),
                            from_table_id,
                            from_column_id,
                            to_table_id,
                            to_column_id,
                            kind: RelationType::OneToMany,
                        });
                    }
                    _ => tracing::debug!(
                        from = %from_table_id,
                        to = %to_table_id,
                        "relation dropped: no column to attach to"
                    ),
                }
            }
        }
    }

    /// Explicit column if it exists, otherwise the table's key column.
    fn resolve_column(&self, table_id: &str, column_id: Option<String>) -> Option<String> {
        let table = self.schema.table(table_id)?;
        match column_id {
            Some(id) if table.column(&id).is_some() => Some(id),
            _ => table.key_column().map(|c| c.id.clone()),
        }
    }

    fn missing(&self, table_id: &str) -> bool {
        let missing = self.schema.table(table_id).is_none();
        if missing {
            tracing::debug!(table_id, "ignoring update for unknown table");
        }
        missing
    }
}

/// Draw ids until one is not already `taken`. A loaded design may hold ids
/// the source has not issued yet.
fn fresh_id<I: IdSource>(ids: &mut I, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = ids.next_id();
        if !taken(&id) {
            return id;
        }
    }
}
