//! CIGAR operations and the alignment algebra built on them.
//!
//! A [`Cigar`] describes how the bases of a read line up against a reference.
//! It answers three questions for record-level code: where the alignment ends
//! on the reference ([`Cigar::reference_end`]), how many stored bases it
//! implies ([`Cigar::query_length`]), and whether it is well formed for a
//! read of a given length ([`Cigar::is_valid`]).

use serde::Serialize;
use std::fmt::Write;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a single CIGAR operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CigarOpKind {
    /// Alignment match or mismatch (M)
    Match,
    /// Insertion to the reference (I)
    Insertion,
    /// Deletion from the reference (D)
    Deletion,
    /// Skipped reference region, e.g. an intron (N)
    Skip,
    /// Clipped bases still present in the stored sequence (S)
    SoftClip,
    /// Clipped bases absent from the stored sequence (H)
    HardClip,
    /// Silent deletion from a padded reference (P)
    Padding,
    /// Sequence match (=)
    SequenceMatch,
    /// Sequence mismatch (X)
    SequenceMismatch,
    /// Step back along the reference (B)
    Back,
}

impl CigarOpKind {
    /// Parse a SAM operation character
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(Self::Match),
            'I' => Some(Self::Insertion),
            'D' => Some(Self::Deletion),
            'N' => Some(Self::Skip),
            'S' => Some(Self::SoftClip),
            'H' => Some(Self::HardClip),
            'P' => Some(Self::Padding),
            '=' => Some(Self::SequenceMatch),
            'X' => Some(Self::SequenceMismatch),
            'B' => Some(Self::Back),
            _ => None,
        }
    }

    /// SAM character for this operation
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::Skip => 'N',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
            Self::Padding => 'P',
            Self::SequenceMatch => '=',
            Self::SequenceMismatch => 'X',
            Self::Back => 'B',
        }
    }

    /// Returns true if this operation consumes stored sequence bases
    #[must_use]
    pub const fn consumes_query(self) -> bool {
        matches!(
            self,
            Self::Match
                | Self::Insertion
                | Self::SoftClip
                | Self::SequenceMatch
                | Self::SequenceMismatch
        )
    }

    /// Returns true if this operation advances along the reference
    #[must_use]
    pub const fn consumes_reference(self) -> bool {
        matches!(
            self,
            Self::Match | Self::Deletion | Self::Skip | Self::SequenceMatch | Self::SequenceMismatch
        )
    }
}

/// A single (kind, length) CIGAR operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CigarOp {
    kind: CigarOpKind,
    len: u32,
}

impl CigarOp {
    #[must_use]
    pub const fn new(kind: CigarOpKind, len: u32) -> Self {
        Self { kind, len }
    }

    #[must_use]
    pub const fn kind(self) -> CigarOpKind {
        self.kind
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.len
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Signed movement along the reference caused by this operation
    fn reference_delta(self) -> i64 {
        match self.kind {
            CigarOpKind::Back => -i64::from(self.len),
            kind if kind.consumes_reference() => i64::from(self.len),
            _ => 0,
        }
    }

    fn query_len(self) -> usize {
        if self.kind.consumes_query() {
            self.len as usize
        } else {
            0
        }
    }
}

impl std::fmt::Display for CigarOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.len, self.kind.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CigarParseError {
    #[error("invalid CIGAR operation '{op}' at offset {offset}")]
    InvalidOperation { op: char, offset: usize },

    #[error("CIGAR operation '{op}' at offset {offset} has no length")]
    MissingLength { op: char, offset: usize },

    #[error("CIGAR operation length out of range at offset {offset}")]
    LengthOutOfRange { offset: usize },

    #[error("CIGAR ends with a length but no operation")]
    TrailingLength,
}

/// Why a CIGAR is not valid for a given stored sequence length
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CigarViolation {
    #[error("CIGAR consumes {expected} query bases but the sequence has {actual}")]
    QueryLengthMismatch { expected: usize, actual: usize },

    #[error("more than one hard clip at the same end (operation {index})")]
    MultipleHardClips { index: usize },

    #[error("hard clip is not the outermost clip (operation {index})")]
    HardClipNotOutermost { index: usize },

    #[error("clip between aligned operations (operation {index})")]
    ClipInsideAlignment { index: usize },

    #[error("query base used before the alignment start (operation {index})")]
    QueryBeforeStart { index: usize },
}

/// Where a scan is relative to the aligned core of a CIGAR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipRegion {
    BeforeCore,
    InCore,
    AfterCore,
}

/// An ordered, immutable sequence of CIGAR operations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Cigar(Vec<CigarOp>);

impl Cigar {
    #[must_use]
    pub fn new(ops: Vec<CigarOp>) -> Self {
        Self(ops)
    }

    #[must_use]
    pub fn ops(&self) -> &[CigarOp] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &CigarOp> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of reference bases spanned, floored at zero.
    ///
    /// Back operations step the reference cursor backwards, so the sum can
    /// go negative; the span never does.
    #[must_use]
    pub fn reference_length(&self) -> usize {
        let displacement: i64 = self.0.iter().map(|op| op.reference_delta()).sum();
        usize::try_from(displacement).unwrap_or(0)
    }

    /// Exclusive end of the alignment on the reference for a 0-based `start`.
    ///
    /// Saturates at `usize::MAX` rather than overflowing.
    ///
    /// # Examples
    ///
    /// ```
    /// use samcore::core::cigar::Cigar;
    ///
    /// let cigar: Cigar = "20M5B20M".parse().unwrap();
    /// assert_eq!(cigar.reference_end(0), 35);
    /// ```
    #[must_use]
    pub fn reference_end(&self, start: usize) -> usize {
        start.saturating_add(self.reference_length())
    }

    /// Number of stored sequence bases the CIGAR implies (M/I/S/=/X)
    #[must_use]
    pub fn query_length(&self) -> usize {
        self.0.iter().map(|op| op.query_len()).sum()
    }

    /// Whether the CIGAR is well formed for a stored sequence of `query_length` bases
    #[must_use]
    pub fn is_valid(&self, query_length: usize) -> bool {
        self.validate(query_length).is_ok()
    }

    /// Check the CIGAR against a stored sequence of `query_length` bases.
    ///
    /// A single pass tracks the clip region and a reference cursor relative
    /// to the alignment start. Clips may only sit at either end, with at most
    /// one hard clip per end and the hard clip outermost. A CIGAR made only of
    /// clips splits into a leading and a trailing run at the first clip the
    /// leading run cannot take. Back operations may follow the trailing clips.
    /// A query-consuming operation may not run while back operations hold the
    /// cursor before the start. The implied query length must equal
    /// `query_length` exactly.
    ///
    /// # Errors
    ///
    /// Returns the first [`CigarViolation`] found.
    pub fn validate(&self, query_length: usize) -> Result<(), CigarViolation> {
        let has_core = self.0.iter().any(|op| {
            !matches!(
                op.kind,
                CigarOpKind::HardClip | CigarOpKind::SoftClip | CigarOpKind::Back
            )
        });
        let mut region = ClipRegion::BeforeCore;
        let mut leading = (false, false); // (hard, soft)
        let mut trailing = (false, false);
        let mut cursor: i64 = 0;
        let mut consumed = 0usize;

        for (index, op) in self.0.iter().enumerate() {
            match (op.kind, region) {
                (CigarOpKind::HardClip, ClipRegion::BeforeCore)
                    if has_core || !(leading.0 || leading.1) =>
                {
                    if leading.0 {
                        return Err(CigarViolation::MultipleHardClips { index });
                    }
                    if leading.1 {
                        return Err(CigarViolation::HardClipNotOutermost { index });
                    }
                    leading.0 = true;
                }
                (CigarOpKind::SoftClip, ClipRegion::BeforeCore) => leading.1 = true,
                (CigarOpKind::HardClip, _) => {
                    if trailing.0 {
                        return Err(CigarViolation::MultipleHardClips { index });
                    }
                    trailing.0 = true;
                    region = ClipRegion::AfterCore;
                }
                (CigarOpKind::SoftClip, _) => {
                    if trailing.0 {
                        return Err(CigarViolation::HardClipNotOutermost { index });
                    }
                    trailing.1 = true;
                    region = ClipRegion::AfterCore;
                }
                (CigarOpKind::Back, ClipRegion::AfterCore) => {}
                (_, ClipRegion::AfterCore) => {
                    return Err(CigarViolation::ClipInsideAlignment { index });
                }
                _ => region = ClipRegion::InCore,
            }

            if cursor < 0 && op.kind.consumes_query() {
                return Err(CigarViolation::QueryBeforeStart { index });
            }
            cursor += op.reference_delta();
            consumed += op.query_len();
        }

        if consumed != query_length {
            return Err(CigarViolation::QueryLengthMismatch {
                expected: consumed,
                actual: query_length,
            });
        }

        Ok(())
    }
}

impl From<Vec<CigarOp>> for Cigar {
    fn from(ops: Vec<CigarOp>) -> Self {
        Self(ops)
    }
}

impl FromIterator<CigarOp> for Cigar {
    fn from_iter<I: IntoIterator<Item = CigarOp>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Cigar {
    type Item = &'a CigarOp;
    type IntoIter = std::slice::Iter<'a, CigarOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for Cigar {
    type Err = CigarParseError;

    /// Parse SAM CIGAR text such as `8M2I4M1D3M`. `*` and the empty string
    /// are the empty CIGAR.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "*" {
            return Ok(Self::default());
        }

        let mut ops = Vec::new();
        let mut len: Option<u32> = None;

        for (offset, c) in s.char_indices() {
            if let Some(digit) = c.to_digit(10) {
                let next = len
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or(CigarParseError::LengthOutOfRange { offset })?;
                len = Some(next);
                continue;
            }

            let kind = CigarOpKind::from_code(c)
                .ok_or(CigarParseError::InvalidOperation { op: c, offset })?;
            let len = len
                .take()
                .ok_or(CigarParseError::MissingLength { op: c, offset })?;
            ops.push(CigarOp::new(kind, len));
        }

        if len.is_some() {
            return Err(CigarParseError::TrailingLength);
        }

        Ok(Self(ops))
    }
}

impl std::fmt::Display for Cigar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_char('*');
        }
        for op in &self.0 {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}
