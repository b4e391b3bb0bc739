use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::core::program::Program;
use crate::core::read_group::ReadGroup;
use crate::core::reference::Reference;
use crate::core::types::SortOrder;
use crate::parsing::sam::{apply_header_text, ParseError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("duplicate reference name with conflicting definition: {0}")]
    DuplicateReference(String),

    #[error("duplicate read group name: {0}")]
    DuplicateReadGroup(String),

    #[error("duplicate program name: {0}")]
    DuplicateProgram(String),

    #[error("reference already used: {0}")]
    ReferenceAlreadyUsed(String),

    #[error("read group already used: {0}")]
    ReadGroupAlreadyUsed(String),

    #[error("program already used: {0}")]
    ProgramAlreadyUsed(String),

    #[error("reference length out of range for {name}: {length}")]
    InvalidReferenceLength { name: String, length: u64 },

    #[error("name must not be empty")]
    EmptyName,
}

/// A SAM/BAM header: the registry of references, read groups and programs.
///
/// Each entity gets its id from its position in the owning list at insertion.
/// Names are unique per entity kind; the name lookup tables are private and
/// only updated by the guarded `add_*` methods.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    /// Format version (VN tag in @HD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Declared sort order (SO tag in @HD)
    pub sort_order: SortOrder,

    references: Vec<Reference>,
    read_groups: Vec<ReadGroup>,
    programs: Vec<Program>,
    comments: Vec<String>,

    #[serde(skip)]
    seen_references: HashMap<String, usize>,
    #[serde(skip)]
    seen_read_groups: HashMap<String, usize>,
    #[serde(skip)]
    seen_programs: HashMap<String, usize>,
}

impl Header {
    /// Build a header from an ordered reference list and optional header text.
    ///
    /// The references get ids `0..N` by position. Header text is then applied
    /// line by line through the guarded insertions.
    ///
    /// # Errors
    ///
    /// Returns the `ParseError` of the first line that fails to parse or register.
    pub fn new(text: Option<&str>, references: Vec<Reference>) -> Result<Self, ParseError> {
        let mut header = Self::default();
        for (i, mut reference) in references.into_iter().enumerate() {
            reference.set_id(i);
            header
                .seen_references
                .entry(reference.name().to_string())
                .or_insert(i);
            header.references.push(reference);
        }

        if let Some(text) = text {
            apply_header_text(&mut header, text)?;
        }

        Ok(header)
    }

    /// Register a reference, returning its id.
    ///
    /// Re-declaring an identical reference is a no-op. A same-named reference
    /// with the same identity but more metadata replaces the existing entry
    /// under the same id.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::DuplicateReference` if the name is registered with
    /// a different length, id or checksum, and `HeaderError::ReferenceAlreadyUsed`
    /// if the reference already belongs to a header.
    pub fn add_reference(&mut self, mut reference: Reference) -> Result<usize, HeaderError> {
        if let Some(&id) = self.seen_references.get(reference.name()) {
            let existing = &self.references[id];
            if existing.same_definition(&reference) && reference.id().map_or(true, |r| r == id) {
                return Ok(id);
            }
            if existing.conflicts_with(&reference) {
                return Err(HeaderError::DuplicateReference(reference.name().to_string()));
            }
            debug!(reference = %reference.name(), id, "Replacing reference definition");
            reference.set_id(id);
            self.references[id] = reference;
            return Ok(id);
        }

        if reference.id().is_some() {
            return Err(HeaderError::ReferenceAlreadyUsed(
                reference.name().to_string(),
            ));
        }

        let id = self.references.len();
        reference.set_id(id);
        debug!(reference = %reference.name(), id, "Registered reference");
        self.seen_references.insert(reference.name().to_string(), id);
        self.references.push(reference);
        Ok(id)
    }

    /// Register a read group, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::DuplicateReadGroup` if the name is taken and
    /// `HeaderError::ReadGroupAlreadyUsed` if the group already belongs to a header.
    pub fn add_read_group(&mut self, mut read_group: ReadGroup) -> Result<usize, HeaderError> {
        if self.seen_read_groups.contains_key(read_group.name()) {
            return Err(HeaderError::DuplicateReadGroup(
                read_group.name().to_string(),
            ));
        }
        if read_group.id().is_some() {
            return Err(HeaderError::ReadGroupAlreadyUsed(
                read_group.name().to_string(),
            ));
        }

        let id = self.read_groups.len();
        read_group.set_id(id);
        debug!(read_group = %read_group.name(), id, "Registered read group");
        self.seen_read_groups
            .insert(read_group.name().to_string(), id);
        self.read_groups.push(read_group);
        Ok(id)
    }

    /// Register a program, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError::DuplicateProgram` if the name is taken and
    /// `HeaderError::ProgramAlreadyUsed` if the program already belongs to a header.
    pub fn add_program(&mut self, mut program: Program) -> Result<usize, HeaderError> {
        if self.seen_programs.contains_key(program.name()) {
            return Err(HeaderError::DuplicateProgram(program.name().to_string()));
        }
        if program.id().is_some() {
            return Err(HeaderError::ProgramAlreadyUsed(program.name().to_string()));
        }

        let id = self.programs.len();
        program.set_id(id);
        debug!(program = %program.name(), id, "Registered program");
        self.seen_programs.insert(program.name().to_string(), id);
        self.programs.push(program);
        Ok(id)
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    #[must_use]
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    #[must_use]
    pub fn read_groups(&self) -> &[ReadGroup] {
        &self.read_groups
    }

    #[must_use]
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Id of the reference registered under `name`
    #[must_use]
    pub fn reference_id(&self, name: &str) -> Option<usize> {
        self.seen_references.get(name).copied()
    }

    /// Resolve a record's reference id. `-1` and out-of-range ids are unmapped.
    #[must_use]
    pub fn reference(&self, ref_id: i32) -> Option<&Reference> {
        usize::try_from(ref_id)
            .ok()
            .and_then(|id| self.references.get(id))
    }

    #[must_use]
    pub fn read_group(&self, name: &str) -> Option<&ReadGroup> {
        self.seen_read_groups
            .get(name)
            .map(|&id| &self.read_groups[id])
    }

    /// Mutable access to a read group's metadata and buffers. Its name and id
    /// stay fixed.
    pub fn read_group_mut(&mut self, name: &str) -> Option<&mut ReadGroup> {
        match self.seen_read_groups.get(name) {
            Some(&id) => self.read_groups.get_mut(id),
            None => None,
        }
    }

    #[must_use]
    pub fn program(&self, name: &str) -> Option<&Program> {
        self.seen_programs.get(name).map(|&id| &self.programs[id])
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let refs = self
            .references
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        match &self.version {
            Some(version) => {
                writeln!(f, "@HD\tVN:{version}\tSO:{}", self.sort_order)?;
                if refs.is_empty() {
                    Ok(())
                } else {
                    writeln!(f, "{refs}")
                }
            }
            None => write!(f, "{refs}"),
        }
    }
}
