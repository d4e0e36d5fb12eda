//! Version Catalog
//!
//! Scans a directory for children named `<prefix><semver>` and keeps them
//! sorted by version precedence, oldest first.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::fs::{escape_glob, FileSystem, OsFileSystem};
use crate::identifier::VersionIdentifier;
use crate::retention::RetentionSelector;

/// Sorted collection of the version directories found under one path
///
/// A catalog starts uninitialized and every query fails with
/// [`Error::NotInitialized`] until [`initialize`](Self::initialize) succeeds.
/// Each later `initialize` replaces the entries with a fresh scan.
#[derive(Debug)]
pub struct VersionCatalog<F = OsFileSystem> {
    /// Filesystem the scan reads from
    fs: F,
    /// Entries sorted ascending by precedence
    entries: Vec<VersionIdentifier>,
    /// Directory of the last successful scan
    path: PathBuf,
    /// Prefix of the last successful scan
    prefix: String,
    initialized: bool,
}

impl Default for VersionCatalog<OsFileSystem> {
    fn default() -> Self {
        Self::new(OsFileSystem::new())
    }
}

impl<F: FileSystem> VersionCatalog<F> {
    /// Create an uninitialized catalog bound to a filesystem
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            entries: Vec::new(),
            path: PathBuf::new(),
            prefix: String::new(),
            initialized: false,
        }
    }

    /// Scan `path` for child directories named `<prefix><semver>`
    ///
    /// On error the catalog is left exactly as it was before the call.
    pub fn initialize(&mut self, path: impl AsRef<Path>, prefix: &str) -> Result<()> {
        let path = path.as_ref();

        if !self.fs.dir_exists(path) {
            warn!(path = %path.display(), "version directory not found");
            return Err(Error::DirectoryNotFound(path.to_path_buf()));
        }

        let pattern = format!("{}*", escape_glob(prefix));
        let dirs = self.fs.list_dirs(path, &pattern)?;
        debug!(
            path = %path.display(),
            %pattern,
            matches = dirs.len(),
            "listed version directories"
        );

        let mut entries = dirs
            .into_iter()
            .map(|dir| VersionIdentifier::new(dir.to_string_lossy().into_owned(), prefix))
            .collect::<Result<Vec<_>>>()?;

        // Stable, so equal precedence keeps discovery order
        entries.sort();

        info!(
            path = %path.display(),
            prefix,
            versions = entries.len(),
            "version catalog initialized"
        );

        self.entries = entries;
        self.path = path.to_path_buf();
        self.prefix = prefix.to_string();
        self.initialized = true;
        Ok(())
    }

    /// Whether a scan has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of versions found by the last scan
    pub fn version_count(&self) -> usize {
        self.entries.len()
    }

    /// Directory of the last successful scan
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prefix of the last successful scan
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Result<&[VersionIdentifier]> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        Ok(&self.entries)
    }

    /// The highest-precedence version, `None` if there are no versions
    pub fn most_recent(&self) -> Result<Option<&VersionIdentifier>> {
        Ok(self.entries()?.last())
    }

    /// The lowest-precedence version, `None` if there are no versions
    pub fn oldest(&self) -> Result<Option<&VersionIdentifier>> {
        Ok(self.entries()?.first())
    }

    /// Up to `n` of the newest versions, newest first
    ///
    /// Returns `None` rather than an empty list when the catalog holds no versions.
    pub fn newest_n(&self, n: usize) -> Result<Option<Vec<&VersionIdentifier>>> {
        let entries = self.entries()?;
        if entries.is_empty() {
            return Ok(None);
        }

        let take = n.min(entries.len());
        Ok(Some(entries[entries.len() - take..].iter().rev().collect()))
    }

    /// Up to `n` of the oldest versions, oldest first
    ///
    /// Returns `None` rather than an empty list when the catalog holds no versions.
    pub fn oldest_n(&self, n: usize) -> Result<Option<Vec<&VersionIdentifier>>> {
        let entries = self.entries()?;
        if entries.is_empty() {
            return Ok(None);
        }

        let take = n.min(entries.len());
        Ok(Some(entries[..take].iter().collect()))
    }

    /// Retention policies over this catalog's entries
    pub fn retention(&self) -> RetentionSelector<'_, F> {
        RetentionSelector::new(self)
    }
}
