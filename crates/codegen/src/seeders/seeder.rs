//! Per-table `<table>Seeder` classes.

use dbgen_core::CodeGenContext;
use dbgen_ir::{Row, TableMetadata, Value};

use super::{SEEDER_IMPORTS, SEEDER_NAMESPACE};
use crate::artifact::{ArtifactKey, GeneratedArtifact, seeder_class_name};
use crate::php;

/// Generate the seeder for `table`.
///
/// The seeder truncates the table, then inserts every row of `rows` as one
/// literal `insert` statement, in the given order. Null and empty-string
/// values become `null`; everything else is written as a quoted string.
pub fn emit_seeder(table: &TableMetadata, rows: &[Row]) -> GeneratedArtifact {
    let class = CodeGenContext::at_level(1);
    let body = class.indented();
    let table_literal = php::string_literal(&table.name);

    let mut content = String::with_capacity(512 + rows.len() * 128);
    content.push_str(php::open_tag());
    content.push_str(&format!("namespace {};\n\n", SEEDER_NAMESPACE));
    content.push_str(&php::use_block(SEEDER_IMPORTS));
    content.push_str(&format!(
        "class {} extends Seeder\n",
        seeder_class_name(&table.name)
    ));
    content.push_str("{\n");
    content.push_str(&class.line("public function run()"));
    content.push_str(&class.line("{"));
    content.push_str(&body.line(&format!("DB::table({})->truncate();", table_literal)));

    for row in rows {
        content.push_str(&body.line(&format!(
            "DB::table({})->insert([{}]);",
            table_literal,
            row_entries(row)
        )));
    }

    content.push_str(&class.line("}"));
    content.push_str("}\n");

    tracing::debug!(table = %table.name, rows = rows.len(), "rendered seeder");

    GeneratedArtifact::new(ArtifactKey::seeder(&table.name), content)
}

/// `'col' => 'value', 'other' => null`
fn row_entries(row: &Row) -> String {
    row.cells()
        .iter()
        .map(|(column, value)| format!("{} => {}", php::string_literal(column), value_literal(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Literal for a single value
fn value_literal(value: &Value) -> String {
    match value.as_text() {
        Some(text) => php::string_literal(&text),
        None => "null".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn users() -> TableMetadata {
        TableMetadata::new("users")
            .with_column("id", "int")
            .with_column("name", "varchar(255)")
            .with_column("deleted_at", "timestamp")
            .with_primary_key("id")
    }

    #[test]
    fn test_seeder_content() {
        let rows = vec![
            Row::new()
                .with("id", 1_i64)
                .with("name", "Ada")
                .with("deleted_at", Value::Null),
            Row::new()
                .with("id", 2_i64)
                .with("name", "O'Hara")
                .with("deleted_at", "2024-01-01 00:00:00"),
        ];

        let artifact = emit_seeder(&users(), &rows);

        let expected = "\
<?php

namespace Database\\Seeders;

use Illuminate\\Database\\Seeder;
use Illuminate\\Support\\Facades\\DB;

class usersSeeder extends Seeder
{
    public function run()
    {
        DB::table('users')->truncate();
        DB::table('users')->insert(['id' => '1', 'name' => 'Ada', 'deleted_at' => null]);
        DB::table('users')->insert(['id' => '2', 'name' => 'O\\'Hara', 'deleted_at' => '2024-01-01 00:00:00']);
    }
}
";
        assert_eq!(artifact.content, expected);
        assert_eq!(artifact.file_name, "usersSeeder.php");
    }

    #[test]
    fn test_empty_string_becomes_null() {
        let rows = vec![Row::new().with("id", "7").with("name", "")];
        let content = emit_seeder(&users(), &rows).content;
        assert!(content.contains("'name' => null"));
        assert!(!content.contains("''"));
    }

    #[test]
    fn test_zero_rows_only_truncates() {
        let content = emit_seeder(&users(), &[]).content;
        assert!(content.contains("DB::table('users')->truncate();"));
        assert!(!content.contains("->insert("));
    }

    #[test]
    fn test_rows_keep_fetch_order() {
        let rows: Vec<Row> = ["c", "a", "b"]
            .iter()
            .map(|n| Row::new().with("name", *n))
            .collect();
        let content = emit_seeder(&users(), &rows).content;
        let c = content.find("'name' => 'c'").unwrap();
        let a = content.find("'name' => 'a'").unwrap();
        let b = content.find("'name' => 'b'").unwrap();
        assert!(c < a && a < b);
    }

    #[test]
    fn test_numbers_are_quoted_strings() {
        let rows = vec![Row::new().with("id", 0_i64).with("name", false)];
        let content = emit_seeder(&users(), &rows).content;
        assert!(content.contains("['id' => '0', 'name' => '0']"));
    }
}
