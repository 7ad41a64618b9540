//! # Generated Artifacts
//!
//! Every file the generator produces is a [`GeneratedArtifact`]. Artifacts
//! are identified by an [`ArtifactKey`] (table + kind) rather than by file
//! name, because migration file names carry a per-run stamp and would never
//! collide with a previous run's output.

use std::path::PathBuf;

use crate::clock::MigrationStamp;

/// Directory (relative to the output root) holding migrations
pub const MIGRATIONS_DIR: &str = "database/migrations";

/// Directory (relative to the output root) holding seeders
pub const SEEDERS_DIR: &str = "database/seeders";

/// Extension of every generated script
pub const SCRIPT_EXTENSION: &str = "php";

// ============================================================================
// ArtifactKind
// ============================================================================

/// The kind of script an artifact holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    /// `create_<table>_table` migration
    CreateTable,
    /// `add_foreign_keys_to_<table>_table` migration
    ForeignKeys,
    /// `<table>Seeder` class
    Seeder,
    /// The aggregator that calls every seeder
    Registry,
}

impl ArtifactKind {
    /// Human-readable label used in logs and warnings
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::CreateTable => "Migration",
            ArtifactKind::ForeignKeys => "Foreign key migration",
            ArtifactKind::Seeder => "Seeder",
            ArtifactKind::Registry => "Seeder registry",
        }
    }

    /// Output directory for this kind
    pub fn directory(&self) -> &'static str {
        match self {
            ArtifactKind::CreateTable | ArtifactKind::ForeignKeys => MIGRATIONS_DIR,
            ArtifactKind::Seeder | ArtifactKind::Registry => SEEDERS_DIR,
        }
    }

    /// Whether file names of this kind carry a migration stamp
    pub fn is_migration(&self) -> bool {
        matches!(self, ArtifactKind::CreateTable | ArtifactKind::ForeignKeys)
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ArtifactKey
// ============================================================================

/// Identity of an artifact across runs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactKey {
    /// What the artifact is
    pub kind: ArtifactKind,
    /// Table it belongs to, or the registry class name for the registry
    pub subject: String,
}

impl ArtifactKey {
    /// Create a key
    pub fn new(kind: ArtifactKind, subject: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
        }
    }

    /// Key of a table's create migration
    pub fn create_table(table: &str) -> Self {
        Self::new(ArtifactKind::CreateTable, table)
    }

    /// Key of a table's foreign key migration
    pub fn foreign_keys(table: &str) -> Self {
        Self::new(ArtifactKind::ForeignKeys, table)
    }

    /// Key of a table's seeder
    pub fn seeder(table: &str) -> Self {
        Self::new(ArtifactKind::Seeder, table)
    }

    /// Key of the registry
    pub fn registry(class_name: &str) -> Self {
        Self::new(ArtifactKind::Registry, class_name)
    }

    /// Whether a file name found on disk carries this identity.
    ///
    /// Migrations match on their suffix after the leading stamp, so
    /// `2024_01_01_000000_create_users_table.php` and a later
    /// `2024_06_30_101010_create_users_table.php` share one identity.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let expected = self.stable_file_name();
        if self.kind.is_migration() {
            strip_stamp(file_name) == Some(expected.as_str())
        } else {
            file_name == expected
        }
    }

    /// File name without the migration stamp
    pub fn stable_file_name(&self) -> String {
        match self.kind {
            ArtifactKind::CreateTable => {
                format!("create_{}_table.{}", self.subject, SCRIPT_EXTENSION)
            }
            ArtifactKind::ForeignKeys => format!(
                "add_foreign_keys_to_{}_table.{}",
                self.subject, SCRIPT_EXTENSION
            ),
            ArtifactKind::Seeder => {
                format!("{}.{}", seeder_class_name(&self.subject), SCRIPT_EXTENSION)
            }
            ArtifactKind::Registry => format!("{}.{}", self.subject, SCRIPT_EXTENSION),
        }
    }
}

impl std::fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {}", self.kind.label(), self.subject)
    }
}

/// Strip a leading `YYYY_MM_DD_HHMMSS_` (or `YYYYMMDDHHMMSS_`) stamp.
///
/// Returns `None` when the name carries no stamp.
fn strip_stamp(file_name: &str) -> Option<&str> {
    let bytes = file_name.as_bytes();

    let laravel = bytes.len() > 18
        && bytes[..17].iter().enumerate().all(|(i, b)| match i {
            4 | 7 | 10 => *b == b'_',
            _ => b.is_ascii_digit(),
        })
        && bytes[17] == b'_';
    if laravel {
        return Some(&file_name[18..]);
    }

    let compact =
        bytes.len() > 15 && bytes[..14].iter().all(u8::is_ascii_digit) && bytes[14] == b'_';
    if compact {
        return Some(&file_name[15..]);
    }

    None
}

/// Seeder class name for a table: `<table>Seeder`.
///
/// Characters that cannot appear in a PHP class name are replaced by `_`.
pub fn seeder_class_name(table: &str) -> String {
    let sanitized: String = table
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{}Seeder", sanitized)
}

// ============================================================================
// GeneratedArtifact
// ============================================================================

/// A single generated script, immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Identity across runs
    pub key: ArtifactKey,

    /// File name inside the kind's directory
    pub file_name: String,

    /// Script body
    pub content: String,

    /// Whether an existing artifact with the same identity may be replaced
    pub overwrite: bool,
}

impl GeneratedArtifact {
    /// Create an artifact whose file name is the key's stable name
    pub fn new(key: ArtifactKey, content: impl Into<String>) -> Self {
        let file_name = key.stable_file_name();
        Self {
            key,
            file_name,
            content: content.into(),
            overwrite: false,
        }
    }

    /// Create a migration artifact named `<stamp>_<stable name>`
    pub fn migration(key: ArtifactKey, stamp: &MigrationStamp, content: impl Into<String>) -> Self {
        let file_name = format!("{}_{}", stamp, key.stable_file_name());
        Self {
            key,
            file_name,
            content: content.into(),
            overwrite: false,
        }
    }

    /// Set the overwrite flag
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Path relative to the output root
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.key.kind.directory()).join(&self.file_name)
    }

    /// Table (or registry class) the artifact belongs to
    pub fn subject(&self) -> &str {
        &self.key.subject
    }

    /// What the artifact is
    pub fn kind(&self) -> ArtifactKind {
        self.key.kind
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

    fn stamp() -> MigrationStamp {
        let base = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(8, 5, 0))
            .unwrap();
        MigrationClock::starting_at(base).next_stamp()
    }

    #[test]
    fn test_migration_file_name() {
        let artifact =
            GeneratedArtifact::migration(ArtifactKey::create_table("users"), &stamp(), "");
        assert_eq!(artifact.file_name, "2024_03_09_080500_create_users_table.php");
        assert_eq!(
            artifact.relative_path(),
            PathBuf::from("database/migrations/2024_03_09_080500_create_users_table.php")
        );
    }

    #[test]
    fn test_seeder_and_registry_file_names() {
        let seeder = GeneratedArtifact::new(ArtifactKey::seeder("users"), "");
        assert_eq!(
            seeder.relative_path(),
            PathBuf::from("database/seeders/usersSeeder.php")
        );
        let registry = GeneratedArtifact::new(ArtifactKey::registry("DatabaseSeeder"), "");
        assert_eq!(registry.file_name, "DatabaseSeeder.php");
    }

    #[test]
    fn test_migration_identity_ignores_stamp() {
        let key = ArtifactKey::create_table("users");
        assert!(key.matches_file_name("2024_01_01_000000_create_users_table.php"));
        assert!(key.matches_file_name("20240101000000_create_users_table.php"));
        assert!(!key.matches_file_name("create_users_table.php"));
        assert!(!key.matches_file_name("2024_01_01_000000_create_power_users_table.php"));
        assert!(!key.matches_file_name("2024_01_01_000000_add_foreign_keys_to_users_table.php"));
    }

    #[test]
    fn test_foreign_key_identity() {
        let key = ArtifactKey::foreign_keys("orders");
        assert!(key.matches_file_name("2024_01_01_000003_add_foreign_keys_to_orders_table.php"));
        assert!(!key.matches_file_name("2024_01_01_000003_create_orders_table.php"));
    }

    #[test]
    fn test_seeder_identity_is_exact() {
        let key = ArtifactKey::seeder("users");
        assert!(key.matches_file_name("usersSeeder.php"));
        assert!(!key.matches_file_name("power_usersSeeder.php"));
    }

    #[test]
    fn test_seeder_class_name_sanitizes() {
        assert_eq!(seeder_class_name("users"), "usersSeeder");
        assert_eq!(seeder_class_name("order-items"), "order_itemsSeeder");
    }

    #[test]
    fn test_kind_directories() {
        assert_eq!(ArtifactKind::ForeignKeys.directory(), MIGRATIONS_DIR);
        assert_eq!(ArtifactKind::Registry.directory(), SEEDERS_DIR);
        assert!(!ArtifactKind::Seeder.is_migration());
    }
}
