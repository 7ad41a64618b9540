//! # Migration Generation
//!
//! This module generates schema migrations from introspected table
//! metadata. Migrations are emitted in two passes so that no foreign key
//! ever points at a table that has not been created yet.
//!
//! ## Generated Files
//!
//! ```text
//! database/migrations/{stamp}_create_{table}_table.php
//! database/migrations/{stamp}_add_foreign_keys_to_{table}_table.php
//! ```
//!
//! ## Features
//!
//! - `Schema::create` with the primary key declared first as `id()`
//! - Every other non-foreign-key column mapped to its portable type and
//!   made nullable
//! - Foreign key columns added by a separate `Schema::table` migration,
//!   optionally constrained to the referenced table
//! - `down()` drops the table, or the foreign key columns

pub mod create_table;
pub mod foreign_keys;

pub use create_table::emit_create_table;
pub use foreign_keys::{ForeignKeyStyle, emit_foreign_keys};

use dbgen_core::CodeGenContext;

use crate::php;

const MIGRATION_IMPORTS: &[&str] = &[
    "Illuminate\\Database\\Migrations\\Migration",
    "Illuminate\\Database\\Schema\\Blueprint",
    "Illuminate\\Support\\Facades\\Schema",
];

/// Wrap `up` and `down` bodies (already indented at level 2) in an
/// anonymous migration class.
pub(crate) fn migration_class(up_body: &str, down_body: &str) -> String {
    let class = CodeGenContext::at_level(1);

    let mut content = String::with_capacity(512 + up_body.len() + down_body.len());
    content.push_str(php::open_tag());
    content.push_str(php::GENERATED_MARKER);
    content.push_str("\n\n");
    content.push_str(&php::use_block(MIGRATION_IMPORTS));
    content.push_str("return new class extends Migration\n");
    content.push_str("{\n");

    content.push_str(&class.line("public function up()"));
    content.push_str(&class.line("{"));
    content.push_str(up_body);
    content.push_str(&class.line("}"));
    content.push('\n');

    content.push_str(&class.line("public function down()"));
    content.push_str(&class.line("{"));
    content.push_str(down_body);
    content.push_str(&class.line("}"));

    content.push_str("};\n");
    content
}

/// A `Schema::<method>('<table>', function (Blueprint $table) { ... });`
/// block at level 2 around `statements` (each emitted at level 3).
pub(crate) fn blueprint_block(method: &str, table: &str, statements: &[String]) -> String {
    let outer = CodeGenContext::at_level(2);
    let inner = outer.indented();

    let mut block = outer.line(&format!(
        "Schema::{}({}, function (Blueprint $table) {{",
        method,
        php::string_literal(table)
    ));
    for statement in statements {
        block.push_str(&inner.line(statement));
    }
    block.push_str(&outer.line("});"));
    block
}
