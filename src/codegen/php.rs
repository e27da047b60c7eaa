use super::ConnectionSettings;
use super::clause::table_body;
use crate::model::{Relation, Table};

const SEP: &str = ", ";

pub fn generate(tables: &[Table], relations: &[Relation], settings: &ConnectionSettings) -> String {
    let statements = tables
        .iter()
        .map(|table| {
            format!(
                "    \"CREATE TABLE IF NOT EXISTS {} ({})\"",
                table.name,
                table_body(table, tables, relations, SEP)
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "<?php
// Database Connection
$servername = \"{host}\";
$username = \"{user}\";
$password = \"{password}\";
$dbname = \"{database}\";

$conn = new mysqli($servername, $username, $password, $dbname);

if ($conn->connect_error) {{
    die(\"Connection failed: \" . $conn->connect_error);
}}

// Create Tables
$sql_statements = [
{statements}
];

foreach ($sql_statements as $sql) {{
    if ($conn->query($sql) === TRUE) {{
        echo \"Table created successfully<br>\";
    }} else {{
        echo \"Error: \" . $conn->error . \"<br>\";
    }}
}}

$conn->close();
?>",
        host = settings.host,
        user = settings.user,
        password = settings.password,
        database = settings.database,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::template;

    #[test]
    fn test_statements_array() {
        let schema = template("blog").unwrap().schema;
        let out = generate(&schema.tables, &schema.relations, &ConnectionSettings::default());
        assert!(out.contains(
            "$sql_statements = [\n    \"CREATE TABLE IF NOT EXISTS authors (id INT PRIMARY KEY AUTO_INCREMENT NOT NULL, name VARCHAR NOT NULL, email VARCHAR NOT NULL, bio TEXT)\",\n"
        ));
        assert!(out.contains(
            "created_at DATETIME NOT NULL, FOREIGN KEY (3-3) REFERENCES posts(2-1), FOREIGN KEY (3-4) REFERENCES authors(1-1))\"\n];"
        ));
        assert!(out.starts_with("<?php\n// Database Connection\n$servername = \"localhost\";"));
        assert!(out.ends_with("$conn->close();\n?>"));
    }
}
