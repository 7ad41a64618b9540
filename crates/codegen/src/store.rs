//! # Artifact Stores
//!
//! Where generated artifacts end up. The generator never touches the
//! filesystem directly; it asks an [`ArtifactStore`] whether an artifact with
//! a given identity already exists, reads the registry back, and writes.
//!
//! - [`FsStore`] writes under an output root (`database/migrations`,
//!   `database/seeders`). A forced write only removes earlier migrations
//!   that carry the generator marker; anything else is left in place.
//! - [`MemoryStore`] keeps everything in memory, for tests and previews.
//! - [`DryRunStore`] answers existence from a base store but records writes
//!   instead of performing them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dbgen_core::{GenError, GenResult};
use walkdir::WalkDir;

use crate::artifact::{ArtifactKey, GeneratedArtifact};
use crate::php;

// ============================================================================
// ArtifactStore
// ============================================================================

/// Storage for generated artifacts, addressed by identity
pub trait ArtifactStore {
    /// Whether an artifact with this identity is already stored
    fn exists(&self, key: &ArtifactKey) -> GenResult<bool>;

    /// Current content of the artifact with this identity, if any
    fn read(&self, key: &ArtifactKey) -> GenResult<Option<String>>;

    /// Store `artifact`, replacing anything with the same identity.
    ///
    /// Returns the location it was written to.
    fn write(&mut self, artifact: &GeneratedArtifact) -> GenResult<PathBuf>;

    /// Location `artifact` would be written to
    fn location(&self, artifact: &GeneratedArtifact) -> PathBuf {
        artifact.relative_path()
    }
}

/// Result of a guarded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Written to the given location
    Written(PathBuf),
    /// Left alone because an artifact with the same identity exists
    Skipped,
}

/// Warning reported when an existing artifact is kept
pub fn skip_message(key: &ArtifactKey) -> String {
    format!("{} already exists. Use --force to overwrite.", key)
}

/// Write `artifact` unless an artifact with the same identity exists and
/// the artifact does not allow overwriting.
pub fn write_guarded<S: ArtifactStore + ?Sized>(
    store: &mut S,
    artifact: &GeneratedArtifact,
) -> GenResult<WriteOutcome> {
    if !artifact.overwrite && store.exists(&artifact.key)? {
        tracing::warn!(
            table = %artifact.subject(),
            kind = %artifact.kind(),
            "{}",
            skip_message(&artifact.key)
        );
        return Ok(WriteOutcome::Skipped);
    }

    let path = store.write(artifact)?;
    tracing::info!(path = %path.display(), "{} written", artifact.key);
    Ok(WriteOutcome::Written(path))
}

// ============================================================================
// FsStore
// ============================================================================

/// Filesystem store rooted at an output directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Store writing under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files carrying `key`'s identity, sorted by name (oldest stamp first)
    fn find(&self, key: &ArtifactKey) -> GenResult<Vec<PathBuf>> {
        let dir = self.root.join(key.kind.directory());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| GenError::FileRead {
                path: dir.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if key.matches_file_name(&entry.file_name().to_string_lossy()) {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }
}

impl ArtifactStore for FsStore {
    fn exists(&self, key: &ArtifactKey) -> GenResult<bool> {
        Ok(!self.find(key)?.is_empty())
    }

    fn read(&self, key: &ArtifactKey) -> GenResult<Option<String>> {
        let Some(path) = self.find(key)?.pop() else {
            return Ok(None);
        };
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| GenError::FileRead {
                path,
                message: e.to_string(),
            })
    }

    fn write(&mut self, artifact: &GeneratedArtifact) -> GenResult<PathBuf> {
        let path = self.location(artifact);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GenError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        for stale in self.find(&artifact.key)? {
            if stale == path {
                continue;
            }
            let content = std::fs::read_to_string(&stale).map_err(|e| GenError::FileRead {
                path: stale.clone(),
                message: e.to_string(),
            })?;
            if !php::is_generated(&content) {
                tracing::warn!(
                    path = %stale.display(),
                    "keeping {} that was not generated by dbgen",
                    artifact.key
                );
                continue;
            }
            tracing::debug!(path = %stale.display(), "removing superseded artifact");
            std::fs::remove_file(&stale).map_err(|e| GenError::FileWrite {
                path: stale.clone(),
                message: e.to_string(),
            })?;
        }

        std::fs::write(&path, &artifact.content).map_err(|e| GenError::FileWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path)
    }

    fn location(&self, artifact: &GeneratedArtifact) -> PathBuf {
        self.root.join(artifact.relative_path())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    artifacts: BTreeMap<ArtifactKey, GeneratedArtifact>,
    writes: Vec<PathBuf>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with an artifact, as if written by an earlier run
    pub fn with_artifact(mut self, artifact: GeneratedArtifact) -> Self {
        self.artifacts.insert(artifact.key.clone(), artifact);
        self
    }

    /// Stored artifact with this identity
    pub fn get(&self, key: &ArtifactKey) -> Option<&GeneratedArtifact> {
        self.artifacts.get(key)
    }

    /// Every stored artifact, ordered by identity
    pub fn artifacts(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.values()
    }

    /// Locations written through [`ArtifactStore::write`], in write order
    pub fn writes(&self) -> &[PathBuf] {
        &self.writes
    }

    /// Number of stored artifacts
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn exists(&self, key: &ArtifactKey) -> GenResult<bool> {
        Ok(self.artifacts.contains_key(key))
    }

    fn read(&self, key: &ArtifactKey) -> GenResult<Option<String>> {
        Ok(self.artifacts.get(key).map(|a| a.content.clone()))
    }

    fn write(&mut self, artifact: &GeneratedArtifact) -> GenResult<PathBuf> {
        let path = self.location(artifact);
        self.artifacts.insert(artifact.key.clone(), artifact.clone());
        self.writes.push(path.clone());
        Ok(path)
    }
}

// ============================================================================
// DryRunStore
// ============================================================================

/// Reads through to a base store, keeps writes to itself
#[derive(Debug)]
pub struct DryRunStore<'a, S: ArtifactStore + ?Sized> {
    base: &'a S,
    pending: MemoryStore,
    planned: Vec<PathBuf>,
}

impl<'a, S: ArtifactStore + ?Sized> DryRunStore<'a, S> {
    /// Overlay on `base`
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            pending: MemoryStore::new(),
            planned: Vec::new(),
        }
    }

    /// Locations that would have been written, in order
    pub fn planned(&self) -> &[PathBuf] {
        &self.planned
    }

    /// Artifacts that would have been written
    pub fn pending(&self) -> &MemoryStore {
        &self.pending
    }
}

impl<S: ArtifactStore + ?Sized> ArtifactStore for DryRunStore<'_, S> {
    fn exists(&self, key: &ArtifactKey) -> GenResult<bool> {
        Ok(self.pending.exists(key)? || self.base.exists(key)?)
    }

    fn read(&self, key: &ArtifactKey) -> GenResult<Option<String>> {
        match self.pending.read(key)? {
            Some(content) => Ok(Some(content)),
            None => self.base.read(key),
        }
    }

    fn write(&mut self, artifact: &GeneratedArtifact) -> GenResult<PathBuf> {
        self.pending.write(artifact)?;
        let path = self.base.location(artifact);
        self.planned.push(path.clone());
        Ok(path)
    }

    fn location(&self, artifact: &GeneratedArtifact) -> PathBuf {
        self.base.location(artifact)
    }
}

// ============================================================================
// Tests
// ============================================================================
