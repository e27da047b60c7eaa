use super::ConnectionSettings;
use super::clause::table_body;
use crate::model::{Relation, Table};

const SEP: &str = ",\n        ";

pub fn generate(tables: &[Table], relations: &[Relation], settings: &ConnectionSettings) -> String {
    let statements = tables
        .iter()
        .map(|table| statement(table, tables, relations))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "import mysql.connector
from mysql.connector import Error

def create_connection():
    try:
        connection = mysql.connector.connect(
            host='{host}',
            user='{user}',
            password='{password}',
            database='{database}'
        )
        return connection
    except Error as e:
        print(f\"Error: {{e}}\")
        return None

def create_tables():
    connection = create_connection()
    if not connection:
        return

    cursor = connection.cursor()
    
{statements}

    cursor.close()
    connection.close()

if __name__ == \"__main__\":
    create_tables()",
        host = settings.host,
        user = settings.user,
        password = settings.password,
        database = settings.database,
    )
}

fn statement(table: &Table, tables: &[Table], relations: &[Relation]) -> String {
    let name = &table.name;
    let body = table_body(table, tables, relations, SEP);
    format!(
        "    sql_{name} = \"\"\"
    CREATE TABLE IF NOT EXISTS {name} (
        {body}
    )
    \"\"\"
    try:
        cursor.execute(sql_{name})
        connection.commit()
        print(\"{name} table created\")
    except Error as e:
        print(f\"Error: {{e}}\")"
    )
}
