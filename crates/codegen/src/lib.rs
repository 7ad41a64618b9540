//! # dbgen Codegen
//!
//! Generation engine for dbgen.
//!
//! This crate turns introspected table metadata and rows into Laravel
//! migrations, seeders and a seeder registry.
//!
//! ## Features
//!
//! - **Migration Generation**: one `create_<table>_table` migration per table
//! - **Foreign Key Generation**: `add_foreign_keys_to_<table>_table`
//!   migrations, stamped after every create migration of the run
//! - **Seeder Generation**: one `<table>Seeder` per table reproducing its rows
//! - **Registry Merge**: non-destructive update of `DatabaseSeeder`
//! - **Overwrite Safety**: existing artifacts are kept unless forced
//!

// ============================================================================
// Modules
// ============================================================================

pub mod artifact;
pub mod clock;
pub mod generator;
pub mod migrations;
pub mod php;
pub mod seeders;
pub mod store;

// ============================================================================
// Re-exports
// ============================================================================

pub use artifact::{
    ArtifactKey, ArtifactKind, GeneratedArtifact, MIGRATIONS_DIR, SEEDERS_DIR, seeder_class_name,
};
pub use clock::{MigrationClock, MigrationStamp};
pub use generator::{GenerationReport, GenerationSummary, Generator};
pub use migrations::{ForeignKeyStyle, emit_create_table, emit_foreign_keys};
pub use seeders::{DEFAULT_REGISTRY_CLASS, SeederRegistry, emit_seeder, registered_seeders};
pub use store::{ArtifactStore, DryRunStore, FsStore, MemoryStore, WriteOutcome, write_guarded};

use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Tables skipped unless configured otherwise: framework bookkeeping tables
pub const DEFAULT_EXCLUDED_TABLES: &[&str] = &[
    "failed_jobs",
    "jobs",
    "personal_access_tokens",
    "migrations",
];

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Output root; artifacts go under `database/` inside it
    pub output_dir: PathBuf,

    /// Tables never processed
    pub excluded_tables: BTreeSet<String>,

    /// Whether to overwrite existing migrations and seeders
    pub force: bool,

    /// How foreign key columns are declared
    pub foreign_key_style: ForeignKeyStyle,

    /// First migration stamp of the run; the current local time when unset
    pub base_timestamp: Option<NaiveDateTime>,

    /// Class name of the seeder registry
    pub registry_class: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            excluded_tables: DEFAULT_EXCLUDED_TABLES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            force: false,
            foreign_key_style: ForeignKeyStyle::default(),
            base_timestamp: None,
            registry_class: DEFAULT_REGISTRY_CLASS.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Exclude an additional table
    pub fn exclude(mut self, table: impl Into<String>) -> Self {
        self.excluded_tables.insert(table.into());
        self
    }

    /// Drop the default exclusions
    pub fn without_default_excludes(mut self) -> Self {
        for table in DEFAULT_EXCLUDED_TABLES {
            self.excluded_tables.remove(*table);
        }
        self
    }

    /// Set whether existing artifacts are overwritten
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set the foreign key style
    pub fn with_foreign_key_style(mut self, style: ForeignKeyStyle) -> Self {
        self.foreign_key_style = style;
        self
    }

    /// Fix the first migration stamp
    pub fn with_base_timestamp(mut self, base: NaiveDateTime) -> Self {
        self.base_timestamp = Some(base);
        self
    }

    /// Set the registry class name
    pub fn with_registry_class(mut self, class_name: impl Into<String>) -> Self {
        self.registry_class = class_name.into();
        self
    }

    /// Whether `table` is skipped
    pub fn is_excluded(&self, table: &str) -> bool {
        self.excluded_tables.contains(table)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(!config.force);
        assert_eq!(config.foreign_key_style, ForeignKeyStyle::Unconstrained);
        assert_eq!(config.registry_class, "DatabaseSeeder");
        for table in DEFAULT_EXCLUDED_TABLES {
            assert!(config.is_excluded(table));
        }
        assert!(!config.is_excluded("users"));
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_output_dir("/tmp/app")
            .without_default_excludes()
            .exclude("sessions")
            .with_force(true)
            .with_foreign_key_style(ForeignKeyStyle::Constrained)
            .with_registry_class("SnapshotSeeder");

        assert_eq!(config.output_dir, PathBuf::from("/tmp/app"));
        assert!(config.force);
        assert!(config.is_excluded("sessions"));
        assert!(!config.is_excluded("migrations"));
        assert_eq!(config.excluded_tables.len(), 1);
        assert_eq!(config.registry_class, "SnapshotSeeder");
    }

    #[test]
    fn test_exclusion_is_exact() {
        let config = GeneratorConfig::default();
        assert!(!config.is_excluded("jobs_archive"));
        assert!(!config.is_excluded("Migrations"));
    }
}
