//! Filesystem access used by the version catalog
//!
//! The catalog only ever reads: it checks that a directory exists, lists the
//! immediate child directories matching a glob, and reads creation times.
//! Those three capabilities form the [`FileSystem`] trait so scans can run
//! against the real disk ([`OsFileSystem`]) or a deterministic in-memory tree
//! ([`MemoryFileSystem`]).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Read-only filesystem capabilities needed to scan version directories
pub trait FileSystem {
    /// Whether `path` exists and is a directory
    fn dir_exists(&self, path: &Path) -> bool;

    /// Immediate child directories of `path` whose name matches the glob `pattern`
    /// (see [`glob_to_regex`])
    fn list_dirs(&self, path: &Path, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Creation time of the entry at `path`
    fn created(&self, path: &Path) -> Result<DateTime<Utc>>;
}

/// Compile a filename glob into an anchored regex
///
/// `*` matches any run of characters and `?` a single one. A backslash makes
/// the next character literal.
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            '\\' => {
                let literal = chars.next().unwrap_or('\\');
                source.push_str(&regex::escape(&literal.to_string()));
            }
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    Ok(Regex::new(&source)?)
}

/// Escape `text` so [`glob_to_regex`] matches it literally
pub fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// The real operating system filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dirs(&self, path: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = glob_to_regex(pattern)?;
        let mut dirs = Vec::new();

        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;

            // Symlinks are not followed, so linked directories are skipped
            if !entry.file_type().is_dir() {
                continue;
            }

            if matcher.is_match(&entry.file_name().to_string_lossy()) {
                dirs.push(entry.into_path());
            }
        }

        Ok(dirs)
    }

    fn created(&self, path: &Path) -> Result<DateTime<Utc>> {
        let metadata = fs::metadata(path)?;
        let time = match metadata.created() {
            Ok(time) => time,
            Err(err) => {
                debug!(
                    path = %path.display(),
                    error = %err,
                    "creation time unavailable, using modification time"
                );
                metadata.modified()?
            }
        };
        Ok(DateTime::<Utc>::from(time))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    path: PathBuf,
    kind: EntryKind,
    created: DateTime<Utc>,
}

/// An in-memory directory tree with explicit creation times
///
/// Entries list in the order they were added. Adding an entry creates any
/// missing parent directories with the same creation time.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    entries: Vec<MemoryEntry>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and any missing parents)
    pub fn add_dir(&mut self, path: impl AsRef<Path>, created: DateTime<Utc>) -> &mut Self {
        self.insert(path.as_ref(), EntryKind::Dir, created);
        self
    }

    /// Add a file (and any missing parent directories)
    pub fn add_file(&mut self, path: impl AsRef<Path>, created: DateTime<Utc>) -> &mut Self {
        self.insert(path.as_ref(), EntryKind::File, created);
        self
    }

    /// Change the creation time of an existing entry
    pub fn set_created(&mut self, path: impl AsRef<Path>, created: DateTime<Utc>) -> Result<()> {
        let path = path.as_ref();
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.path == path)
            .ok_or_else(|| not_found(path))?;
        entry.created = created;
        Ok(())
    }

    fn insert(&mut self, path: &Path, kind: EntryKind, created: DateTime<Utc>) {
        let mut missing: Vec<&Path> = path
            .ancestors()
            .skip(1)
            .filter(|p| !p.as_os_str().is_empty())
            .take_while(|p| !self.contains(p))
            .collect();
        missing.reverse();

        for parent in missing {
            self.entries.push(MemoryEntry {
                path: parent.to_path_buf(),
                kind: EntryKind::Dir,
                created,
            });
        }

        if let Some(existing) = self.entries.iter_mut().find(|e| e.path == path) {
            existing.kind = kind;
            existing.created = created;
        } else {
            self.entries.push(MemoryEntry {
                path: path.to_path_buf(),
                kind,
                created,
            });
        }
    }

    fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == EntryKind::Dir && e.path == path)
    }

    fn list_dirs(&self, path: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = glob_to_regex(pattern)?;

        Ok(self
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::Dir)
            .filter(|e| e.path.parent() == Some(path))
            .filter(|e| {
                e.path
                    .file_name()
                    .map(|name| matcher.is_match(&name.to_string_lossy()))
                    .unwrap_or(false)
            })
            .map(|e| e.path.clone())
            .collect())
    }

    fn created(&self, path: &Path) -> Result<DateTime<Utc>> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.created)
            .ok_or_else(|| not_found(path))
    }
}

fn not_found(path: &Path) -> crate::error::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no entry at {}", path.display()),
    )
    .into()
}
