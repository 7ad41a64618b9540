//! The seeder registry (`DatabaseSeeder`).
//!
//! The registry outlives a single run: it may already exist, and may have
//! been edited by hand. Merging reads the seeders it already calls, appends
//! the ones generated now that are missing, and re-renders the whole class.
//! Nothing previously registered is ever dropped.

use std::collections::HashSet;
use std::sync::LazyLock;

use dbgen_core::CodeGenContext;
use regex::Regex;

use super::{SEEDER_NAMESPACE, SEEDER_IMPORTS};
use crate::artifact::{ArtifactKey, GeneratedArtifact};
use crate::php;

/// Default registry class name
pub const DEFAULT_REGISTRY_CLASS: &str = "DatabaseSeeder";

/// `$this->call(X::class);` or `$this->call([X::class, ...]);`, the list
/// possibly spanning several lines
static CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$this->call\(\s*(?:(\\?[A-Za-z_][\w\\]*)\s*::class|\[([^\]]*)\])\s*\)\s*;",
    )
    .expect("seeder call pattern is a valid regex")
});

static CLASS_CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\?[A-Za-z_][\w\\]*)\s*::class")
        .expect("class constant pattern is a valid regex")
});

/// Seeders called by an existing registry, in call order, deduplicated.
///
/// Both the single-class and the list form of `$this->call` are understood.
/// Content without recognizable calls yields an empty list.
pub fn registered_seeders(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut seeders = Vec::new();

    for caps in CALL_PATTERN.captures_iter(content) {
        let names: Vec<&str> = match (caps.get(1), caps.get(2)) {
            (Some(single), _) => vec![single.as_str()],
            (None, Some(list)) => CLASS_CONSTANT
                .captures_iter(list.as_str())
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect(),
            (None, None) => Vec::new(),
        };
        for name in names {
            let name = name.trim();
            if !name.is_empty() && seen.insert(name.to_string()) {
                seeders.push(name.to_string());
            }
        }
    }
    seeders
}

/// Renders and merges the registry class
#[derive(Debug, Clone)]
pub struct SeederRegistry {
    class_name: String,
}

impl SeederRegistry {
    /// Registry with the given class name
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    /// Registry class name
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Identity of the registry artifact
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::registry(&self.class_name)
    }

    /// Union of previously registered and new seeders: existing ones first
    /// in their original order, then new ones not yet present.
    pub fn merged_entries(&self, existing: Option<&str>, new_entries: &[String]) -> Vec<String> {
        let mut entries = existing.map(registered_seeders).unwrap_or_default();
        let mut seen: HashSet<String> = entries.iter().cloned().collect();

        for entry in new_entries {
            if seen.insert(entry.clone()) {
                entries.push(entry.clone());
            }
        }
        entries
    }

    /// Full replacement content for the registry.
    pub fn merge(&self, existing: Option<&str>, new_entries: &[String]) -> String {
        let entries = self.merged_entries(existing, new_entries);
        if let Some(content) = existing {
            if registered_seeders(content).is_empty() && !content.trim().is_empty() {
                tracing::warn!(
                    registry = %self.class_name,
                    "existing registry has no recognizable seeder calls, treating it as empty"
                );
            }
        }
        self.render(&entries)
    }

    /// Merge and wrap the result as an artifact that always overwrites
    pub fn merge_artifact(&self, existing: Option<&str>, new_entries: &[String]) -> GeneratedArtifact {
        GeneratedArtifact::new(self.key(), self.merge(existing, new_entries)).with_overwrite(true)
    }

    /// Render a registry calling exactly `entries`, in order.
    pub fn render(&self, entries: &[String]) -> String {
        let class = CodeGenContext::at_level(1);
        let body = class.indented();

        let mut content = String::with_capacity(256 + entries.len() * 96);
        content.push_str(php::open_tag());
        content.push_str(&format!("namespace {};\n\n", SEEDER_NAMESPACE));

        content.push_str(&format!("use {};\n", SEEDER_IMPORTS[0]));
        // Fully qualified entries are called as written and need no import.
        for entry in entries.iter().filter(|e| !e.contains('\\')) {
            content.push_str(&format!("use {}\\{};\n", SEEDER_NAMESPACE, entry));
        }
        content.push('\n');

        content.push_str(&format!("class {} extends Seeder\n", self.class_name));
        content.push_str("{\n");
        content.push_str(&class.line("public function run()"));
        content.push_str(&class.line("{"));
        for entry in entries {
            content.push_str(&body.line(&format!("$this->call({}::class);", entry)));
        }
        content.push_str(&class.line("}"));
        content.push_str("}\n");
        content
    }
}

impl Default for SeederRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_CLASS)
    }
}

// ============================================================================
// Tests
// ============================================================================
