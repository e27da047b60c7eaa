use super::ConnectionSettings;
use super::clause::table_body;
use crate::model::{Relation, Table};

const SEP: &str = ",\n      ";

pub fn generate(tables: &[Table], relations: &[Relation], settings: &ConnectionSettings) -> String {
    let statements = tables
        .iter()
        .map(|table| statement(table, tables, relations))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "const mysql = require('mysql2/promise');

const pool = mysql.createPool({{
  host: '{host}',
  user: '{user}',
  password: '{password}',
  database: '{database}',
  waitForConnections: true,
  connectionLimit: 10,
  queueLimit: 0
}});

async function createTables() {{
  const connection = await pool.getConnection();
  
  try {{
{statements}
  }} catch (error) {{
    console.error('Error:', error);
  }} finally {{
    await connection.release();
  }}
}}

createTables();",
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
        "    const sql_{name} = `
      CREATE TABLE IF NOT EXISTS {name} (
        {body}
      )
    `;
    
    await connection.query(sql_{name});
    console.log('{name} table created');"
    )
}
