//! Retention policies
//!
//! Decide which cataloged versions may be removed. Nothing here touches the
//! filesystem beyond reading creation times; callers act on the returned lists.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::age::MinAge;
use crate::catalog::VersionCatalog;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::identifier::VersionIdentifier;

/// Selects removal candidates from a catalog, always oldest first
///
/// Unlike the catalog's `newest_n`/`oldest_n`, retention queries never return
/// "no result": an empty catalog simply yields an empty list.
#[derive(Debug)]
pub struct RetentionSelector<'a, F> {
    catalog: &'a VersionCatalog<F>,
}

impl<'a, F> Clone for RetentionSelector<'a, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, F> Copy for RetentionSelector<'a, F> {}

impl<'a, F: FileSystem> RetentionSelector<'a, F> {
    pub fn new(catalog: &'a VersionCatalog<F>) -> Self {
        Self { catalog }
    }

    /// Every version except the `keep` newest, oldest first
    pub fn keep_newest(&self, keep: usize) -> Result<Vec<&'a VersionIdentifier>> {
        let catalog: &'a VersionCatalog<F> = self.catalog;
        Ok(drop_newest(catalog.entries()?.iter().collect(), keep))
    }

    /// Removal candidates that are outside the `keep` newest and older than `min_age`
    pub fn keep_newest_or_younger_than(
        &self,
        keep: usize,
        min_age: MinAge,
    ) -> Result<Vec<&'a VersionIdentifier>> {
        self.keep_newest_or_younger_than_at(keep, min_age, Utc::now())
    }

    /// Same as [`keep_newest_or_younger_than`](Self::keep_newest_or_younger_than)
    /// measured against a fixed `now`
    pub fn keep_newest_or_younger_than_at(
        &self,
        keep: usize,
        min_age: MinAge,
        now: DateTime<Utc>,
    ) -> Result<Vec<&'a VersionIdentifier>> {
        let candidates = self.keep_newest(keep)?;
        // An age reaching past the earliest representable time protects everything
        let threshold = now
            .checked_sub_signed(min_age.as_duration())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let fs = self.catalog.file_system();

        let mut old_enough = Vec::with_capacity(candidates.len());
        let mut protected = 0usize;
        for id in candidates.into_iter().rev() {
            let created = fs.created(Path::new(id.raw_name()))?;
            if created > threshold {
                debug!(version = %id, %created, %threshold, "kept: younger than minimum age");
                protected += 1;
            } else {
                old_enough.push(id);
            }
        }
        old_enough.reverse();

        // Re-cut only when something was protected, and then one slot short
        // regardless of how many were.
        let removable = if protected > 0 {
            drop_newest(old_enough, keep.saturating_sub(1))
        } else {
            old_enough
        };
        debug!(
            protected,
            keep,
            removable = removable.len(),
            "applied age-based retention"
        );
        Ok(removable)
    }
}

/// Remove the `keep` highest entries from an ascending list
fn drop_newest<T>(mut sorted: Vec<T>, keep: usize) -> Vec<T> {
    let remaining = sorted.len().saturating_sub(keep);
    sorted.truncate(remaining);
    sorted
}
