//! Serializable summaries of a catalog scan and its removal candidates

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::age::MinAge;
use crate::catalog::VersionCatalog;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::identifier::VersionIdentifier;

/// A single version directory in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Name as found on disk
    pub name: String,
    /// Canonical semantic version
    pub version: String,
}

impl From<&VersionIdentifier> for ReportEntry {
    fn from(id: &VersionIdentifier) -> Self {
        Self {
            name: id.raw_name().to_string(),
            version: id.to_string(),
        }
    }
}

/// What a retention policy would remove from a scanned directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionReport {
    pub path: PathBuf,
    pub prefix: String,
    pub version_count: usize,
    pub newest: Option<ReportEntry>,
    pub oldest: Option<ReportEntry>,
    /// Minimum number of newest versions kept
    pub keep: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<MinAge>,
    /// Versions eligible for removal, oldest first
    pub candidates: Vec<ReportEntry>,
}

impl RetentionReport {
    /// Evaluate a policy against an initialized catalog
    pub fn build<F: FileSystem>(
        catalog: &VersionCatalog<F>,
        keep: usize,
        min_age: Option<MinAge>,
    ) -> Result<Self> {
        let selector = catalog.retention();
        let candidates = match min_age {
            Some(age) => selector.keep_newest_or_younger_than(keep, age)?,
            None => selector.keep_newest(keep)?,
        };

        Ok(Self {
            path: catalog.path().to_path_buf(),
            prefix: catalog.prefix().to_string(),
            version_count: catalog.version_count(),
            newest: catalog.most_recent()?.map(ReportEntry::from),
            oldest: catalog.oldest()?.map(ReportEntry::from),
            keep,
            min_age,
            candidates: candidates.into_iter().map(ReportEntry::from).collect(),
        })
    }
}
