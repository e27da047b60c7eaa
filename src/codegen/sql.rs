use super::clause::table_body;
use crate::model::{Relation, Table};

const SEP: &str = ",\n  ";

pub fn generate(tables: &[Table], relations: &[Relation]) -> String {
    let mut out = String::new();
    for table in tables {
        out.push_str(&format!(
            "CREATE TABLE {} (\n  {}\n);\n\n",
            table.name,
            table_body(table, tables, relations, SEP)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnType, Position, RelationType};
    use crate::templates::template;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_table() {
        let mut users = Table::new("1", "users", Position::default());
        users.columns[0].id = "1-1".into();
        assert_eq!(
            generate(&[users], &[]),
            "CREATE TABLE users (\n  id INT PRIMARY KEY AUTO_INCREMENT NOT NULL\n);\n\n"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(generate(&[], &[]), "");
    }

    #[test]
    fn test_columns_in_order() {
        let mut t = Table::new("1", "people", Position::default());
        t.columns.push(Column::new("1-2", "name", ColumnType::Varchar).not_null());
        t.columns.push(Column::new("1-3", "meta", ColumnType::Json));
        let out = generate(&[t], &[]);
        assert_eq!(
            out,
            "CREATE TABLE people (\n  id INT PRIMARY KEY AUTO_INCREMENT NOT NULL,\n  name VARCHAR NOT NULL,\n  meta JSON\n);\n\n"
        );
    }

    #[test]
    fn test_user_product_template() {
        let schema = template("user-product").unwrap().schema;
        let out = generate(&schema.tables, &schema.relations);
        assert_eq!(
            out,
            "CREATE TABLE users (\n  \
             id INT PRIMARY KEY AUTO_INCREMENT NOT NULL,\n  \
             email VARCHAR NOT NULL,\n  \
             username VARCHAR NOT NULL,\n  \
             password VARCHAR NOT NULL,\n  \
             created_at DATETIME NOT NULL\n);\n\n\
             CREATE TABLE products (\n  \
             id INT PRIMARY KEY AUTO_INCREMENT NOT NULL,\n  \
             name VARCHAR NOT NULL,\n  \
             description TEXT,\n  \
             price DECIMAL NOT NULL,\n  \
             user_id INT NOT NULL,\n  \
             FOREIGN KEY (2-5) REFERENCES users(1-1)\n);\n\n"
        );
    }

    #[test]
    fn test_forward_reference_keeps_table_order() {
        let a = Table::new("a", "child", Position::default());
        let b = Table::new("b", "parent", Position::default());
        let rel = Relation {
            id: "r".into(),
            from_table_id: "a".into(),
            from_column_id: "a-1".into(),
            to_table_id: "b".into(),
            to_column_id: "b-1".into(),
            kind: RelationType::OneToMany,
        };
        let out = generate(&[a, b], &[rel]);
        let child = out.find("CREATE TABLE child").unwrap();
        let parent = out.find("CREATE TABLE parent").unwrap();
        assert!(child < parent);
        assert!(out.contains("FOREIGN KEY (a-1) REFERENCES parent(b-1)"));
    }
}
