use serde::Serialize;

use crate::core::header::HeaderError;

/// A read group (@RG line): the sequencing run and sample that produced a set of reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<usize>,

    /// Read group identifier (ID tag)
    name: String,

    /// Sequencing center (CN tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,

    /// Description (DS tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Run date (DT tag), kept verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Nucleotide flow order (FO tag)
    #[serde(skip_serializing_if = "Vec::is_empty", with = "bytes_as_text")]
    flow_order: Vec<u8>,

    /// Key sequence (KS tag)
    #[serde(skip_serializing_if = "Vec::is_empty", with = "bytes_as_text")]
    key_sequence: Vec<u8>,

    /// Library (LB tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,

    /// Programs used to process the group (PG tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programs: Option<String>,

    /// Predicted median insert size (PI tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_size: Option<u32>,

    /// Sequencing platform (PL tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Platform model (PM tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_model: Option<String>,

    /// Platform unit (PU tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_unit: Option<String>,

    /// Sample (SM tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

impl ReadGroup {
    /// Create an unregistered read group.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::EmptyName` if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HeaderError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HeaderError::EmptyName);
        }
        Ok(Self {
            id: None,
            name,
            center: None,
            description: None,
            date: None,
            flow_order: Vec::new(),
            key_sequence: Vec::new(),
            library: None,
            programs: None,
            insert_size: None,
            platform: None,
            platform_model: None,
            platform_unit: None,
            sample: None,
        })
    }

    #[must_use]
    pub fn with_flow_order(mut self, flow_order: impl Into<Vec<u8>>) -> Self {
        self.flow_order = flow_order.into();
        self
    }

    #[must_use]
    pub fn with_key_sequence(mut self, key_sequence: impl Into<Vec<u8>>) -> Self {
        self.key_sequence = key_sequence.into();
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
    pub fn flow_order(&self) -> &[u8] {
        &self.flow_order
    }

    pub fn flow_order_mut(&mut self) -> &mut Vec<u8> {
        &mut self.flow_order
    }

    #[must_use]
    pub fn key_sequence(&self) -> &[u8] {
        &self.key_sequence
    }

    pub fn key_sequence_mut(&mut self) -> &mut Vec<u8> {
        &mut self.key_sequence
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = Some(id);
    }
}

mod bytes_as_text {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_group_new() {
        let rg = ReadGroup::new("rg1").unwrap();
        assert_eq!(rg.name(), "rg1");
        assert_eq!(rg.id(), None);
        assert!(rg.flow_order().is_empty());
        assert!(rg.key_sequence().is_empty());
    }

    #[test]
    fn test_read_group_empty_name() {
        assert!(matches!(ReadGroup::new(""), Err(HeaderError::EmptyName)));
    }

    #[test]
    fn test_clone_does_not_alias_buffers() {
        let original = ReadGroup::new("rg1")
            .unwrap()
            .with_flow_order("TACG")
            .with_key_sequence("TCAG");
        let mut copy = original.clone();

        copy.flow_order_mut()[0] = b'N';
        copy.key_sequence_mut().push(b'A');

        assert_eq!(original.flow_order(), b"TACG");
        assert_eq!(original.key_sequence(), b"TCAG");
        assert_eq!(copy.flow_order(), b"NACG");
        assert_eq!(copy.key_sequence(), b"TCAGA");
    }

    #[test]
    fn test_serialize_buffers_as_text() {
        let rg = ReadGroup::new("rg1").unwrap().with_flow_order("TACG");
        let json = serde_json::to_value(&rg).unwrap();
        assert_eq!(json["flow_order"], "TACG");
        assert!(json.get("key_sequence").is_none());
    }
}
