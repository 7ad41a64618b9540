//! `add_foreign_keys_to_<table>_table` migrations.
//!
//! These alter a table created by an earlier migration of the same run, so
//! the generator only calls in here after every create-table migration has
//! been issued.

use dbgen_ir::{ForeignKeyMetadata, TableMetadata};

use super::{blueprint_block, migration_class};
use crate::artifact::{ArtifactKey, GeneratedArtifact};
use crate::clock::MigrationStamp;
use crate::php;

/// How foreign key columns are declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForeignKeyStyle {
    /// Plain nullable `foreignId` columns without a database constraint
    #[default]
    Unconstrained,
    /// `foreignId(...)->constrained('<table>', '<column>')`
    Constrained,
}

/// Generate the migration that adds `foreign_keys` to `table`.
///
/// Returns `None` when there are no foreign keys.
pub fn emit_foreign_keys(
    table: &TableMetadata,
    foreign_keys: &[ForeignKeyMetadata],
    stamp: &MigrationStamp,
    style: ForeignKeyStyle,
) -> Option<GeneratedArtifact> {
    if foreign_keys.is_empty() {
        return None;
    }

    let add: Vec<String> = foreign_keys
        .iter()
        .map(|fk| add_statement(fk, style))
        .collect();

    let mut drop = Vec::with_capacity(foreign_keys.len() * 2);
    for fk in foreign_keys {
        if style == ForeignKeyStyle::Constrained {
            drop.push(format!(
                "$table->dropForeign([{}]);",
                php::string_literal(&fk.column)
            ));
        }
        drop.push(format!(
            "$table->dropColumn({});",
            php::string_literal(&fk.column)
        ));
    }

    let up = blueprint_block("table", &table.name, &add);
    let down = blueprint_block("table", &table.name, &drop);

    Some(GeneratedArtifact::migration(
        ArtifactKey::foreign_keys(&table.name),
        stamp,
        migration_class(&up, &down),
    ))
}

fn add_statement(fk: &ForeignKeyMetadata, style: ForeignKeyStyle) -> String {
    let column = php::string_literal(&fk.column);
    match style {
        ForeignKeyStyle::Unconstrained => format!("$table->foreignId({})->nullable();", column),
        ForeignKeyStyle::Constrained => format!(
            "$table->foreignId({})->nullable()->constrained({}, {});",
            column,
            php::string_literal(&fk.references_table),
            php::string_literal(&fk.references_column)
        ),
    }
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

    fn orders() -> TableMetadata {
        TableMetadata::new("orders")
            .with_column("id", "int(11)")
            .with_column("user_id", "int(11)")
            .with_column("coupon_id", "int(11)")
            .with_primary_key("id")
            .with_foreign_key("user_id", "users", "id")
            .with_foreign_key("coupon_id", "coupons", "code_id")
    }

    #[test]
    fn test_no_foreign_keys_yields_nothing() {
        let table = TableMetadata::new("users").with_column("id", "int");
        assert!(emit_foreign_keys(&table, &[], &stamp(), ForeignKeyStyle::default()).is_none());
    }

    #[test]
    fn test_unconstrained_content() {
        let table = orders();
        let artifact =
            emit_foreign_keys(&table, &table.foreign_keys, &stamp(), ForeignKeyStyle::Unconstrained)
                .unwrap();

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
        Schema::table('orders', function (Blueprint $table) {
            $table->foreignId('user_id')->nullable();
            $table->foreignId('coupon_id')->nullable();
        });
    }

    public function down()
    {
        Schema::table('orders', function (Blueprint $table) {
            $table->dropColumn('user_id');
            $table->dropColumn('coupon_id');
        });
    }
};
";
        assert_eq!(artifact.content, expected);
        assert_eq!(
            artifact.file_name,
            "2024_01_02_030405_add_foreign_keys_to_orders_table.php"
        );
    }

    #[test]
    fn test_constrained_style_references_target() {
        let table = orders();
        let content =
            emit_foreign_keys(&table, &table.foreign_keys, &stamp(), ForeignKeyStyle::Constrained)
                .unwrap()
                .content;

        assert!(content.contains(
            "$table->foreignId('user_id')->nullable()->constrained('users', 'id');"
        ));
        assert!(content.contains(
            "$table->foreignId('coupon_id')->nullable()->constrained('coupons', 'code_id');"
        ));

        let drop_fk = content.find("$table->dropForeign(['user_id']);").unwrap();
        let drop_col = content.find("$table->dropColumn('user_id');").unwrap();
        assert!(drop_fk < drop_col);
    }
}
