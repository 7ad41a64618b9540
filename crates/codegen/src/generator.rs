//! # Generation Orchestrator
//!
//! The `Generator` is the top-level entry point. It reads the schema through
//! a [`SchemaReader`], emits every artifact, and hands them to an
//! [`ArtifactStore`], producing a [`GenerationReport`].
//!
//! ## Pipeline
//!
//! ```text
//! SchemaReader + GeneratorConfig
//!         │
//!         ▼
//!   list_tables() ── excluded? ──► skipped
//!         │
//!         ▼
//!   load_table() per table
//!         │
//!         ├──► pass 1: create-table migrations  (one stamp per table)
//!         ├──► pass 2: foreign key migrations   (stamps after pass 1)
//!         ├──► pass 3: seeders                  (rows fetched per table)
//!         │
//!         ▼
//!   registry merge ──► GenerationReport
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dbgen_codegen::{FsStore, Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::new().with_output_dir("./app");
//! let mut store = FsStore::new(&config.output_dir);
//!
//! let report = Generator::new(config).run(&reader, &mut store).await?;
//! println!("{}", report.summary());
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use dbgen_core::{GenError, GenResult};
use dbgen_ir::{SchemaReader, TableMetadata};

use crate::GeneratorConfig;
use crate::artifact::{ArtifactKey, ArtifactKind, GeneratedArtifact, seeder_class_name};
use crate::clock::MigrationClock;
use crate::migrations::{emit_create_table, emit_foreign_keys};
use crate::seeders::{SeederRegistry, emit_seeder};
use crate::store::{ArtifactStore, WriteOutcome, skip_message, write_guarded};

// ============================================================================
// Generator
// ============================================================================

/// Top-level generator that orchestrates the full pipeline.
///
/// The `Generator` is stateless aside from its configuration; every run
/// starts a fresh [`MigrationClock`].
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Tables the reader lists, split into (processed, excluded).
    pub async fn partition_tables<R>(&self, reader: &R) -> GenResult<(Vec<String>, Vec<String>)>
    where
        R: SchemaReader + ?Sized,
    {
        let (excluded, processed): (Vec<String>, Vec<String>) = reader
            .list_tables()
            .await?
            .into_iter()
            .partition(|name| self.config.is_excluded(name));
        Ok((processed, excluded))
    }

    /// Run the full pipeline.
    ///
    /// # Steps
    ///
    /// 1. **List** tables and drop the excluded ones. Tables whose seeder
    ///    class names would coincide abort the run before anything is read
    ///    or written.
    /// 2. **Load** each remaining table's metadata in one pass.
    /// 3. **Create-table migrations** for every table.
    /// 4. **Foreign key migrations** for every table that has foreign keys,
    ///    stamped after all of step 3.
    /// 5. **Seeders**, fetching each table's rows.
    /// 6. **Registry** merge, written once.
    ///
    /// Existing artifacts are kept (with a warning) unless the configuration
    /// forces overwriting. The registry is always rewritten.
    ///
    /// # Errors
    ///
    /// Any failed catalog or row query aborts the run. Files written before
    /// the failure are left in place.
    pub async fn run<R, S>(&self, reader: &R, store: &mut S) -> GenResult<GenerationReport>
    where
        R: SchemaReader + ?Sized,
        S: ArtifactStore + ?Sized,
    {
        let mut report = GenerationReport::default();

        // ── 1. List ──────────────────────────────────────────────────────
        let (names, excluded) = self.partition_tables(reader).await?;
        for name in &excluded {
            tracing::info!(table = %name, "Skipping table");
        }
        report.excluded = excluded;
        check_seeder_names(&names)?;

        // ── 2. Load ──────────────────────────────────────────────────────
        let mut tables = Vec::with_capacity(names.len());
        for name in &names {
            tracing::info!(table = %name, "Processing table");
            tables.push(reader.load_table(name).await?);
        }
        report.processed = names;

        let mut clock = match self.config.base_timestamp {
            Some(base) => MigrationClock::starting_at(base),
            None => MigrationClock::now(),
        };

        // ── 3. Create-table migrations ───────────────────────────────────
        for table in &tables {
            let artifact = emit_create_table(table, &clock.next_stamp());
            self.write(store, artifact, &mut report)?;
        }

        // ── 4. Foreign key migrations ────────────────────────────────────
        for table in tables.iter().filter(|t| t.has_foreign_keys()) {
            let stamp = clock.next_stamp();
            if let Some(artifact) = emit_foreign_keys(
                table,
                &table.foreign_keys,
                &stamp,
                self.config.foreign_key_style,
            ) {
                self.write(store, artifact, &mut report)?;
            }
        }

        // ── 5. Seeders ───────────────────────────────────────────────────
        for table in &tables {
            self.seed(reader, store, table, &mut report).await?;
            report.registered.push(seeder_class_name(&table.name));
        }

        // ── 6. Registry ──────────────────────────────────────────────────
        let registry = SeederRegistry::new(&self.config.registry_class);
        let existing = store.read(&registry.key())?;
        let artifact = registry.merge_artifact(existing.as_deref(), &report.registered);
        report.registry_entries = registry
            .merged_entries(existing.as_deref(), &report.registered)
            .len();
        self.write(store, artifact, &mut report)?;

        tracing::info!(
            processed = report.processed.len(),
            excluded = report.excluded.len(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            "generation complete",
        );

        Ok(report)
    }

    /// Emit one table's seeder. Rows are only fetched when the seeder will
    /// actually be written.
    async fn seed<R, S>(
        &self,
        reader: &R,
        store: &mut S,
        table: &TableMetadata,
        report: &mut GenerationReport,
    ) -> GenResult<()>
    where
        R: SchemaReader + ?Sized,
        S: ArtifactStore + ?Sized,
    {
        let key = ArtifactKey::seeder(&table.name);
        if !self.config.force && store.exists(&key)? {
            tracing::warn!(table = %table.name, kind = %key.kind, "{}", skip_message(&key));
            report.skip(key);
            return Ok(());
        }

        let rows = reader.rows(table).await?;
        self.write(store, emit_seeder(table, &rows), report)
    }

    fn write<S: ArtifactStore + ?Sized>(
        &self,
        store: &mut S,
        artifact: GeneratedArtifact,
        report: &mut GenerationReport,
    ) -> GenResult<()> {
        let overwrite = artifact.overwrite || self.config.force;
        let artifact = artifact.with_overwrite(overwrite);

        match write_guarded(store, &artifact)? {
            WriteOutcome::Written(path) => report.written.push((artifact.key, path)),
            WriteOutcome::Skipped => report.skip(artifact.key),
        }
        Ok(())
    }
}

/// Fail when two tables map to the same seeder class, since one seeder
/// would shadow the other.
fn check_seeder_names(tables: &[String]) -> GenResult<()> {
    let mut owners: HashMap<String, &str> = HashMap::with_capacity(tables.len());
    for table in tables {
        let class = seeder_class_name(table);
        if let Some(other) = owners.insert(class.clone(), table) {
            return Err(GenError::validation(format!(
                "tables '{}' and '{}' both map to seeder class {}; exclude one of them",
                other, table, class
            )));
        }
    }
    Ok(())
}

// ============================================================================
// GenerationReport
// ============================================================================

/// What a run did
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Tables processed, in listing order
    pub processed: Vec<String>,
    /// Tables skipped by the exclusion set
    pub excluded: Vec<String>,
    /// Artifacts written and where, in write order
    pub written: Vec<(ArtifactKey, PathBuf)>,
    /// Artifacts kept because they already existed
    pub skipped: Vec<ArtifactKey>,
    /// Seeders generated (or kept) this run
    pub registered: Vec<String>,
    /// Seeders the registry calls after the merge
    pub registry_entries: usize,
    /// One warning per skipped artifact
    pub warnings: Vec<String>,
}

impl GenerationReport {
    fn skip(&mut self, key: ArtifactKey) {
        self.warnings.push(skip_message(&key));
        self.skipped.push(key);
    }

    /// Number of artifacts of `kind` written
    pub fn written_of(&self, kind: ArtifactKind) -> usize {
        self.written.iter().filter(|(key, _)| key.kind == kind).count()
    }

    /// Human-readable summary
    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary::from_report(self)
    }
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Tables processed.
    pub tables: usize,
    /// Tables excluded.
    pub excluded: usize,
    /// Migration files written.
    pub migrations: usize,
    /// Seeder files written (registry excluded).
    pub seeders: usize,
    /// Artifacts skipped because they already existed.
    pub skipped: usize,
    /// Seeders the registry calls.
    pub registered: usize,
}

impl GenerationSummary {
    /// Build a summary from a report.
    pub fn from_report(report: &GenerationReport) -> Self {
        Self {
            tables: report.processed.len(),
            excluded: report.excluded.len(),
            migrations: report.written_of(ArtifactKind::CreateTable)
                + report.written_of(ArtifactKind::ForeignKeys),
            seeders: report.written_of(ArtifactKind::Seeder),
            skipped: report.skipped.len(),
            registered: report.registry_entries,
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Generation Complete                      ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Tables:      {:<35}║\n", self.tables));
        out.push_str(&format!("║    Excluded:  {:<35}║\n", self.excluded));
        out.push_str(&format!("║  Migrations:  {:<35}║\n", self.migrations));
        out.push_str(&format!("║  Seeders:     {:<35}║\n", self.seeders));
        out.push_str(&format!("║  Skipped:     {:<35}║\n", self.skipped));
        out.push_str(&format!("║  Registered:  {:<35}║\n", self.registered));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

// ============================================================================
// Tests
// ============================================================================
