use serde::Serialize;

use crate::core::header::HeaderError;
use crate::utils::validation::{is_valid_reference_length, normalize_md5};

/// A reference sequence (@SQ line) against which reads are aligned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Position in the owning header's reference list, set on registration
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<usize>,

    /// Sequence name (SN tag)
    name: String,

    /// Sequence length (LN tag)
    length: u64,

    /// MD5 checksum of the sequence (M5 tag)
    /// Lowercase hex, 32 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    /// Assembly identifier (AS tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,

    /// URI where sequence can be retrieved (UR tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Species (SP tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,

    /// Alternative names (AN tag)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Reference {
    /// Create an unregistered reference.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::EmptyName` for an empty name and
    /// `HeaderError::InvalidReferenceLength` when `length` is zero or does not
    /// fit a BAM header.
    pub fn new(name: impl Into<String>, length: u64) -> Result<Self, HeaderError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HeaderError::EmptyName);
        }
        if !is_valid_reference_length(length) {
            return Err(HeaderError::InvalidReferenceLength { name, length });
        }
        Ok(Self {
            id: None,
            name,
            length,
            md5: None,
            assembly: None,
            uri: None,
            species: None,
            aliases: Vec::new(),
        })
    }

    /// Attach an MD5 checksum; invalid checksums are ignored.
    #[must_use]
    pub fn with_md5(mut self, md5: &str) -> Self {
        self.md5 = normalize_md5(md5);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<usize> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = Some(id);
    }

    /// Same sequence definition as `other`, ignoring ids
    pub(crate) fn same_definition(&self, other: &Reference) -> bool {
        self.name == other.name
            && self.length == other.length
            && self.md5 == other.md5
            && self.assembly == other.assembly
            && self.uri == other.uri
            && self.species == other.species
            && self.aliases == other.aliases
    }

    /// Whether `other` describes a different sequence under this name
    pub(crate) fn conflicts_with(&self, other: &Reference) -> bool {
        if self.name != other.name || self.length != other.length {
            return true;
        }
        if matches!((self.id, other.id), (Some(a), Some(b)) if a != b) {
            return true;
        }
        matches!((&self.md5, &other.md5), (Some(a), Some(b)) if a != b)
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@SQ\tSN:{}\tLN:{}", self.name, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_new() {
        let reference = Reference::new("chr1", 248_956_422).unwrap();
        assert_eq!(reference.name(), "chr1");
        assert_eq!(reference.length(), 248_956_422);
        assert_eq!(reference.id(), None);
    }

    #[test]
    fn test_reference_rejects_empty_name() {
        assert!(matches!(
            Reference::new("", 100),
            Err(HeaderError::EmptyName)
        ));
    }

    #[test]
    fn test_reference_rejects_bad_length() {
        assert!(matches!(
            Reference::new("chr1", 0),
            Err(HeaderError::InvalidReferenceLength { length: 0, .. })
        ));
        assert!(Reference::new("chr1", 1 << 31).is_err());
    }

    #[test]
    fn test_with_md5_normalizes() {
        let reference = Reference::new("chrM", 16569)
            .unwrap()
            .with_md5("C68F52674C9FB33AEF52DCF399755519");
        assert_eq!(
            reference.md5.as_deref(),
            Some("c68f52674c9fb33aef52dcf399755519")
        );

        let reference = Reference::new("chrM", 16569).unwrap().with_md5("nope");
        assert!(reference.md5.is_none());
    }

    #[test]
    fn test_display() {
        let reference = Reference::new("chr2", 242_193_529).unwrap();
        assert_eq!(reference.to_string(), "@SQ\tSN:chr2\tLN:242193529");
    }

    #[test]
    fn test_conflicts_with() {
        let a = Reference::new("chr1", 100).unwrap();
        let longer = Reference::new("chr1", 200).unwrap();
        assert!(a.conflicts_with(&longer));

        let enriched = Reference::new("chr1", 100)
            .unwrap()
            .with_md5("6aef897c3d6ff0c78aff06ac189178dd");
        assert!(!a.conflicts_with(&enriched));

        let other_md5 = Reference::new("chr1", 100)
            .unwrap()
            .with_md5("f98db672eb0993dcfdabafe2a882905c");
        assert!(enriched.conflicts_with(&other_md5));
    }
}
