//! Built-in quick-start designs.

use crate::model::{Column, ColumnType, Position, Relation, RelationType, Schema, Table};

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Schema,
}

pub const TEMPLATE_KEYS: [&str; 2] = ["user-product", "blog"];

pub fn templates() -> Vec<Template> {
    TEMPLATE_KEYS.iter().filter_map(|k| template(k)).collect()
}

pub fn template(key: &str) -> Option<Template> {
    match key {
        "user-product" => Some(Template {
            key: "user-product",
            name: "User & Product",
            description: "E-commerce schema with users and products",
            schema: user_product(),
        }),
        "blog" => Some(Template {
            key: "blog",
            name: "Blog Platform",
            description: "Schema for a blogging system",
            schema: blog(),
        }),
        _ => None,
    }
}

fn table(id: &str, name: &str, x: f64, columns: &[(&str, ColumnType, bool)]) -> Table {
    let mut table = Table::new(id, name, Position::new(x, 100.0));
    // Seeded "<id>-1" primary key, then numbered required/nullable columns.
    for (i, (col_name, typ, nullable)) in columns.iter().enumerate() {
        let mut column = Column::new(format!("{id}-{}", i + 2), *col_name, *typ);
        column.is_null = *nullable;
        table.columns.push(column);
    }
    table
}

fn rel(id: &str, from: (&str, &str), to: (&str, &str)) -> Relation {
    Relation {
        id: id.to_string(),
        from_table_id: from.0.to_string(),
        from_column_id: from.1.to_string(),
        to_table_id: to.0.to_string(),
        to_column_id: to.1.to_string(),
        kind: RelationType::OneToMany,
    }
}

fn user_product() -> Schema {
    use ColumnType::*;
    Schema::new(
        vec![
            table(
                "1",
                "users",
                100.0,
                &[
                    ("email", Varchar, false),
                    ("username", Varchar, false),
                    ("password", Varchar, false),
                    ("created_at", DateTime, false),
                ],
            ),
            table(
                "2",
                "products",
                500.0,
                &[
                    ("name", Varchar, false),
                    ("description", Text, true),
                    ("price", Decimal, false),
                    ("user_id", Int, false),
                ],
            ),
        ],
        vec![rel("rel-1", ("2", "2-5"), ("1", "1-1"))],
    )
}

fn blog() -> Schema {
    use ColumnType::*;
    Schema::new(
        vec![
            table(
                "1",
                "authors",
                100.0,
                &[("name", Varchar, false), ("email", Varchar, false), ("bio", Text, true)],
            ),
            table(
                "2",
                "posts",
                500.0,
                &[
                    ("title", Varchar, false),
                    ("content", LongText, false),
                    ("author_id", Int, false),
                    ("created_at", DateTime, false),
                ],
            ),
            table(
                "3",
                "comments",
                900.0,
                &[
                    ("content", Text, false),
                    ("post_id", Int, false),
                    ("author_id", Int, false),
                    ("created_at", DateTime, false),
                ],
            ),
        ],
        vec![
            rel("rel-1", ("2", "2-4"), ("1", "1-1")),
            rel("rel-2", ("3", "3-3"), ("2", "2-1")),
            rel("rel-3", ("3", "3-4"), ("1", "1-1")),
        ],
    )
}
