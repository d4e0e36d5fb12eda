//! Catalog Tests
//!
//! Scans of version directories against in-memory and on-disk trees.

use std::fs;
use std::path::Path;

use chrono::{Duration, Utc};
use tempfile::tempdir;
use version_retention::{Error, MemoryFileSystem, OsFileSystem, VersionCatalog, VersionIdentifier};

const DEPLOY: &str = "/deploy";

const SCENARIO: &[&str] = &[
    "Ver0.0.4",
    "Ver1.2.5-alpha.14",
    "Ver1.2.5-alpha.a",
    "Ver1.2.5-beta.27",
    "Ver1.2.5-rc.2",
    "Ver1.2.5",
    "Ver1.2.6-fix.2",
    "Ver1.2.6-fix.3+somedata",
    "Ver1.2.6",
    "Ver1.2.15-beta.304",
    "Ver1.2.15",
    "Ver1.3.0",
    "Ver2.6.104",
    "Ver3.0.0+somedata",
    "Ver4.0.1",
];

/// Adds the scenario in reverse so discovery order differs from precedence order
fn scenario_fs() -> MemoryFileSystem {
    let now = Utc::now();
    let mut fs = MemoryFileSystem::new();
    fs.add_dir(DEPLOY, now - Duration::days(90));
    for (i, name) in SCENARIO.iter().rev().enumerate() {
        fs.add_dir(format!("{}/{}", DEPLOY, name), now - Duration::days(i as i64));
    }
    fs.add_file(format!("{}/Ver1.3.0/Ver.txt", DEPLOY), now);
    fs.add_file(format!("{}/Ver9.9.9", DEPLOY), now);
    fs.add_dir(format!("{}/logs", DEPLOY), now);
    fs
}

fn scenario_catalog() -> VersionCatalog<MemoryFileSystem> {
    let mut catalog = VersionCatalog::new(scenario_fs());
    catalog.initialize(DEPLOY, "Ver").unwrap();
    catalog
}

fn texts(ids: &[&VersionIdentifier]) -> Vec<String> {
    ids.iter().map(|id| id.version_text().to_string()).collect()
}

fn scenario_text(i: usize) -> &'static str {
    SCENARIO[i].strip_prefix("Ver").unwrap()
}

// =============================================================================
// Scenario Queries
// =============================================================================

#[test]
fn test_scenario_sorted_by_precedence() {
    let catalog = scenario_catalog();
    assert!(catalog.is_initialized());
    assert_eq!(catalog.version_count(), 15);

    let sorted: Vec<_> = catalog
        .entries()
        .unwrap()
        .iter()
        .map(|id| id.version_text())
        .collect();
    let expected: Vec<_> = (0..SCENARIO.len()).map(scenario_text).collect();
    assert_eq!(sorted, expected);
}

#[test]
fn test_most_recent_version() {
    let catalog = scenario_catalog();
    let newest = catalog.most_recent().unwrap().unwrap();
    assert_eq!(newest.version_text(), "4.0.1");
    assert_eq!(newest.raw_name(), "/deploy/Ver4.0.1");
}

#[test]
fn test_oldest_version() {
    let catalog = scenario_catalog();
    assert_eq!(catalog.oldest().unwrap().unwrap().version_text(), "0.0.4");
}

#[test]
fn test_newest_n_versions() {
    let catalog = scenario_catalog();

    for n in 1..=4 {
        let newest = catalog.newest_n(n).unwrap().unwrap();
        assert_eq!(newest.len(), n);

        let expected: Vec<_> = (0..n).map(|i| scenario_text(SCENARIO.len() - 1 - i)).collect();
        assert_eq!(texts(&newest), expected);
    }
}

#[test]
fn test_oldest_n_versions() {
    let catalog = scenario_catalog();

    for n in 0..=4 {
        let oldest = catalog.oldest_n(n).unwrap().unwrap();
        assert_eq!(oldest.len(), n);

        let expected: Vec<_> = (0..n).map(scenario_text).collect();
        assert_eq!(texts(&oldest), expected);
    }
}

#[test]
fn test_n_larger_than_count_returns_everything() {
    let catalog = scenario_catalog();
    assert_eq!(catalog.newest_n(25).unwrap().unwrap().len(), 15);
    assert_eq!(catalog.oldest_n(25).unwrap().unwrap().len(), 15);
}

#[test]
fn test_queries_are_idempotent() {
    let catalog = scenario_catalog();
    assert_eq!(
        texts(&catalog.newest_n(5).unwrap().unwrap()),
        texts(&catalog.newest_n(5).unwrap().unwrap())
    );
    assert_eq!(
        texts(&catalog.retention().keep_newest(4).unwrap()),
        texts(&catalog.retention().keep_newest(4).unwrap())
    );
    assert_eq!(catalog.most_recent().unwrap(), catalog.most_recent().unwrap());
}

// =============================================================================
// Empty and Uninitialized Catalogs
// =============================================================================

#[test]
fn test_no_versions_is_not_an_error() {
    let mut fs = MemoryFileSystem::new();
    fs.add_dir(DEPLOY, Utc::now());
    let mut catalog = VersionCatalog::new(fs);
    catalog.initialize(DEPLOY, "Ver").unwrap();

    assert!(catalog.is_initialized());
    assert_eq!(catalog.version_count(), 0);
    assert!(catalog.most_recent().unwrap().is_none());
    assert!(catalog.oldest().unwrap().is_none());
    assert!(catalog.newest_n(4).unwrap().is_none());
    assert!(catalog.oldest_n(5).unwrap().is_none());

    // Retention queries always return a list
    assert_eq!(catalog.retention().keep_newest(2).unwrap().len(), 0);
}

#[test]
fn test_uninitialized_queries_fail() {
    let catalog = VersionCatalog::new(scenario_fs());

    assert!(matches!(catalog.most_recent(), Err(Error::NotInitialized)));
    assert!(matches!(catalog.oldest(), Err(Error::NotInitialized)));
    assert!(matches!(catalog.newest_n(2), Err(Error::NotInitialized)));
    assert!(matches!(catalog.oldest_n(2), Err(Error::NotInitialized)));
    assert!(matches!(catalog.entries(), Err(Error::NotInitialized)));
    assert!(matches!(
        catalog.retention().keep_newest(2),
        Err(Error::NotInitialized)
    ));
    assert!(matches!(
        catalog
            .retention()
            .keep_newest_or_younger_than(2, "1d".parse().unwrap()),
        Err(Error::NotInitialized)
    ));
}

#[test]
fn test_invalid_path_fails() {
    let mut catalog = VersionCatalog::new(scenario_fs());

    let err = catalog.initialize("/deploy/dummyPath", "").unwrap_err();
    assert!(matches!(err, Error::DirectoryNotFound(ref p) if p == Path::new("/deploy/dummyPath")));
    assert!(!catalog.is_initialized());
}

// =============================================================================
// On-disk Scans
// =============================================================================

#[test]
fn test_os_scan() {
    let dir = tempdir().unwrap();
    for name in ["Ver1.0.0", "Ver1.0.0-rc.1", "Ver0.9.12", "archive"] {
        fs::create_dir(dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("Ver2.0.0"), "a file, not a version directory").unwrap();

    let mut catalog = VersionCatalog::new(OsFileSystem::new());
    catalog.initialize(dir.path(), "Ver").unwrap();

    assert_eq!(catalog.version_count(), 3);
    let newest = catalog.most_recent().unwrap().unwrap();
    assert_eq!(newest.version_text(), "1.0.0");
    assert_eq!(Path::new(newest.raw_name()), dir.path().join("Ver1.0.0"));
    assert_eq!(catalog.oldest().unwrap().unwrap().version_text(), "0.9.12");

    // Everything was created just now, so a day of protection keeps it all
    let removable = catalog
        .retention()
        .keep_newest_or_younger_than(1, "1d".parse().unwrap())
        .unwrap();
    assert!(removable.is_empty());
}

#[test]
fn test_os_missing_directory() {
    let dir = tempdir().unwrap();
    let mut catalog: VersionCatalog = VersionCatalog::default();
    let err = catalog.initialize(dir.path().join("missing"), "Ver").unwrap_err();
    assert!(matches!(err, Error::DirectoryNotFound(_)));
    assert!(!catalog.is_initialized());
}
