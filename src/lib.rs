//! Version Retention
//!
//! Finds directories whose names encode a semantic version, orders them by
//! semver precedence, and selects which ones a retention policy would remove.
//!
//! ## Features
//!
//! - **Semantic Versioning**: Names are parsed as semver2 and ordered by precedence
//! - **Prefixed Names**: `Ver1.2.3-alpha.1` with prefix `Ver` is version `1.2.3-alpha.1`
//! - **Count Retention**: Keep the N newest versions
//! - **Age Retention**: Also keep anything younger than a minimum age
//! - **Read Only**: Nothing is ever deleted; callers act on the returned lists
//!
//! ## Layout
//!
//! ```text
//! releases/
//! ├── Ver1.2.5-rc.2/
//! ├── Ver1.2.5/
//! ├── Ver1.3.0/
//! └── Ver2.0.0/        <- most_recent()
//! ```
//!
//! ```no_run
//! use version_retention::{MinAge, VersionCatalog};
//!
//! let mut catalog: VersionCatalog = VersionCatalog::default();
//! catalog.initialize("/srv/app/releases", "Ver")?;
//!
//! for old in catalog.retention().keep_newest_or_younger_than(3, MinAge::parse("2w")?)? {
//!     println!("{}", old.raw_name());
//! }
//! # Ok::<(), version_retention::Error>(())
//! ```

pub mod age;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fs;
pub mod identifier;
pub mod report;
pub mod retention;

pub use age::MinAge;
pub use catalog::VersionCatalog;
pub use config::RetentionConfig;
pub use error::{Error, Result};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use identifier::VersionIdentifier;
pub use report::{ReportEntry, RetentionReport};
pub use retention::RetentionSelector;
