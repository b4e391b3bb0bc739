use serde::Serialize;

use crate::core::header::HeaderError;

/// A program (@PG line) that processed the alignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<usize>,

    /// Program record identifier (ID tag)
    name: String,

    /// Program name (PN tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,

    /// Command line (CL tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,

    /// Previous program in the chain (PP tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    /// Description (DS tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Program version (VN tag)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Program {
    /// Create an unregistered program record.
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
            program_name: None,
            command_line: None,
            previous: None,
            description: None,
            version: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> Option<usize> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new("bwa").unwrap();
        assert_eq!(program.name(), "bwa");
        assert_eq!(program.id(), None);
        assert!(program.program_name.is_none());
        assert!(program.previous.is_none());
    }

    #[test]
    fn test_program_empty_name() {
        assert!(matches!(Program::new(""), Err(HeaderError::EmptyName)));
    }

    #[test]
    fn test_program_serializes_set_tags_only() {
        let mut program = Program::new("samtools").unwrap();
        program.version = Some("1.17".to_string());
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["name"], "samtools");
        assert_eq!(json["version"], "1.17");
        assert!(json.get("id").is_none());
        assert!(json.get("command_line").is_none());
    }
}
