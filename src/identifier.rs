//! Version identifiers parsed from directory names

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use semver::Version;

use crate::error::{Error, Result};

/// A directory or file name that encodes a semantic version
///
/// `Ver1.2.3-alpha.1` with prefix `Ver` yields version text `1.2.3-alpha.1`.
/// Identifiers order by semver2 precedence, so build metadata does not
/// participate in comparisons.
#[derive(Debug, Clone)]
pub struct VersionIdentifier {
    /// Name as found on disk (bare name or full path)
    raw_name: String,
    /// Literal prefix preceding the version in the final path segment
    prefix: String,
    /// Final path segment with the prefix removed
    version_text: String,
    /// Parsed semantic version
    version: Version,
}

impl VersionIdentifier {
    /// Create an identifier from a name whose final segment starts with `prefix`
    pub fn new(raw_name: impl Into<String>, prefix: impl Into<String>) -> Result<Self> {
        let raw_name = raw_name.into();
        let prefix = prefix.into();

        if raw_name.is_empty() {
            return Err(Error::EmptyName);
        }

        let segment = Path::new(&raw_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or(Error::EmptyName)?;

        let version_text = match segment.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.to_string(),
            None => {
                return Err(Error::PrefixMismatch {
                    name: raw_name,
                    prefix,
                })
            }
        };

        let version = Version::parse(&version_text).map_err(|source| Error::InvalidVersion {
            text: version_text.clone(),
            source,
        })?;

        Ok(Self {
            raw_name,
            prefix,
            version_text,
            version,
        })
    }

    /// Create an identifier from a name that is nothing but a version
    pub fn parse(raw_name: impl Into<String>) -> Result<Self> {
        Self::new(raw_name, "")
    }

    /// Name as found on disk
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Prefix stripped from the final segment
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Version portion of the name, exactly as written
    pub fn version_text(&self) -> &str {
        &self.version_text
    }

    /// Parsed semantic version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Semver2 precedence comparison; ignores build metadata
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        let a = &self.version;
        let b = &other.version;
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_precedence(other) == Ordering::Equal
    }
}

impl Eq for VersionIdentifier {}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_precedence(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_constructs() {
        let cases = [
            ("Ver1.0.0", "Ver", "1.0.0"),
            ("Ver1.2.3", "Ver", "1.2.3"),
            ("Ver1.2.3-alpha.1", "Ver", "1.2.3-alpha.1"),
            ("Ver1.2.3-alpha.5009", "Ver", "1.2.3-alpha.5009"),
            ("Ver2.3.4-beta.3456+data", "Ver", "2.3.4-beta.3456+data"),
            ("Ver2.3.4-rc.25", "Ver", "2.3.4-rc.25"),
            ("Ver2.3.4-fix.somefix.103", "Ver", "2.3.4-fix.somefix.103"),
        ];

        for (name, prefix, expected) in cases {
            let id = VersionIdentifier::new(name, prefix).unwrap();
            assert_eq!(id.raw_name(), name);
            assert_eq!(id.prefix(), prefix);
            assert_eq!(id.version_text(), expected);
            assert_eq!(id.to_string(), expected);
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = VersionIdentifier::new("", "pre").unwrap_err();
        assert!(matches!(err, Error::EmptyName));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_prefix_mismatch_rejected() {
        let err = VersionIdentifier::new("ABC1.2.3", "Ver").unwrap_err();
        match err {
            Error::PrefixMismatch { name, prefix } => {
                assert_eq!(name, "ABC1.2.3");
                assert_eq!(prefix, "Ver");
            }
            other => panic!("Expected PrefixMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_version_rejected() {
        let err = VersionIdentifier::new("Ver1.2", "Ver").unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
        assert!(err.is_invalid_argument());

        assert!(VersionIdentifier::parse("latest").is_err());
    }

    #[test]
    fn test_no_prefix_matches_number_only() {
        let id = VersionIdentifier::parse("1.2.3").unwrap();
        assert_eq!(id.version_text(), "1.2.3");
        assert_eq!(id.prefix(), "");
        assert_eq!(id.to_string(), "1.2.3");
    }

    #[test]
    fn test_directory_portion_ignored() {
        let id = VersionIdentifier::new("/srv/app/releases/Ver1.4.0-rc.1", "Ver").unwrap();
        assert_eq!(id.raw_name(), "/srv/app/releases/Ver1.4.0-rc.1");
        assert_eq!(id.version_text(), "1.4.0-rc.1");

        // Prefix must start the final segment, not the path
        assert!(VersionIdentifier::new("Ver/1.4.0", "Ver").is_err());
    }

    #[test]
    fn test_precedence_order() {
        let ordered = [
            "1.2.5-alpha.14",
            "1.2.5-alpha.a",
            "1.2.5-beta.27",
            "1.2.5-rc.2",
            "1.2.5",
            "1.2.6-fix.2",
            "1.2.15",
        ];
        let ids: Vec<_> = ordered
            .iter()
            .map(|v| VersionIdentifier::parse(*v).unwrap())
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_build_metadata_ignored_for_ordering() {
        let a = VersionIdentifier::parse("3.0.0+somedata").unwrap();
        let b = VersionIdentifier::parse("3.0.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "3.0.0+somedata");
    }

    #[test]
    fn test_canonical_rendering_reparses() {
        let id = VersionIdentifier::new("Ver2.3.4-beta.3456+data", "Ver").unwrap();
        let again = VersionIdentifier::parse(id.to_string()).unwrap();
        assert_eq!(id, again);
    }
}
