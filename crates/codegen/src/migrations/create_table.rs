//! `create_<table>_table` migrations.

use dbgen_core::CodeGenContext;
use dbgen_ir::{ColumnMetadata, TableMetadata};

use super::{blueprint_block, migration_class};
use crate::artifact::{ArtifactKey, GeneratedArtifact};
use crate::clock::MigrationStamp;
use crate::php;

/// Generate the migration that creates `table`.
///
/// The primary key (if any) is declared first as an identity column. Every
/// other column that is not part of a foreign key follows in catalog order,
/// nullable regardless of its source constraint. Foreign key columns are
/// left to [`emit_foreign_keys`](super::emit_foreign_keys).
pub fn emit_create_table(table: &TableMetadata, stamp: &MigrationStamp) -> GeneratedArtifact {
    let mut statements = Vec::with_capacity(table.columns.len() + 1);

    if let Some(pk) = &table.primary_key {
        statements.push(format!("$table->id({});", php::string_literal(pk)));
    }
    statements.extend(table.plain_columns().map(column_definition));

    let up = blueprint_block("create", &table.name, &statements);
    let down = CodeGenContext::at_level(2).line(&format!(
        "Schema::dropIfExists({});",
        php::string_literal(&table.name)
    ));

    tracing::debug!(
        table = %table.name,
        columns = statements.len(),
        "rendered create-table migration"
    );

    GeneratedArtifact::migration(
        ArtifactKey::create_table(&table.name),
        stamp,
        migration_class(&up, &down),
    )
}

/// `$table-><type>('<column>')->nullable();`
fn column_definition(column: &ColumnMetadata) -> String {
    format!(
        "$table->{}({})->nullable();",
        column.portable_type().blueprint_method(),
        php::string_literal(&column.name)
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MigrationClock;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn stamp() -> MigrationStamp {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        MigrationClock::starting_at(base).next_stamp()
    }

    fn users() -> TableMetadata {
        TableMetadata::new("users")
            .with_column("id", "bigint(20) unsigned")
            .with_column("name", "varchar(255)")
            .with_column("email", "varchar(255)")
            .with_primary_key("id")
    }

    #[test]
    fn test_users_migration_content() {
        let artifact = emit_create_table(&users(), &stamp());

        let expected = "\
<?php

// Generated by dbgen

use Illuminate\\Database\\Migrations\\Migration;
use Illuminate\\Database\\Schema\\Blueprint;
use Illuminate\\Support\\Facades\\Schema;

return new class extends Migration
{
    public function up()
    {
        Schema::create('users', function (Blueprint $table) {
            $table->id('id');
            $table->string('name')->nullable();
            $table->string('email')->nullable();
        });
    }

    public function down()
    {
        Schema::dropIfExists('users');
    }
};
";
        assert_eq!(artifact.content, expected);
        assert_eq!(artifact.file_name, "2024_01_02_030405_create_users_table.php");
    }

    #[test]
    fn test_foreign_key_columns_are_deferred() {
        let orders = TableMetadata::new("orders")
            .with_column("id", "int(11)")
            .with_column("user_id", "int(11)")
            .with_column("total", "decimal(10,2)")
            .with_primary_key("id")
            .with_foreign_key("user_id", "users", "id");

        let content = emit_create_table(&orders, &stamp()).content;
        assert!(content.contains("$table->decimal('total')->nullable();"));
        assert!(!content.contains("user_id"));
    }

    #[test]
    fn test_table_without_primary_key() {
        let table = TableMetadata::new("settings")
            .with_column("key", "varchar(64)")
            .with_column("value", "longtext");

        let content = emit_create_table(&table, &stamp()).content;
        assert!(!content.contains("->id("));
        assert!(content.contains("$table->string('key')->nullable();"));
        assert!(content.contains("$table->text('value')->nullable();"));
    }

    #[test]
    fn test_unmapped_type_becomes_string() {
        let table = TableMetadata::new("docs").with_column("payload", "json");
        let content = emit_create_table(&table, &stamp()).content;
        assert!(content.contains("$table->string('payload')->nullable();"));
    }

    #[test]
    fn test_names_are_escaped() {
        let table = TableMetadata::new("odd'name").with_column("it's", "int");
        let content = emit_create_table(&table, &stamp()).content;
        assert!(content.contains(r"Schema::create('odd\'name'"));
        assert!(content.contains(r"$table->integer('it\'s')->nullable();"));
    }

    #[test]
    fn test_artifact_defaults_to_no_overwrite() {
        assert!(!emit_create_table(&users(), &stamp()).overwrite);
    }
}
