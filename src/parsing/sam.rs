use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::header::{Header, HeaderError};
use crate::core::program::Program;
use crate::core::read_group::ReadGroup;
use crate::core::reference::Reference;
use crate::core::types::SortOrder;
use crate::utils::validation::{exceeds_reference_limit, normalize_md5, MAX_REFERENCES};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SAM header format at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },

    #[error("Header registry error at line {line}: {source}")]
    Header {
        line: usize,
        #[source]
        source: HeaderError,
    },

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Too many references: {0} exceeds maximum allowed ({MAX_REFERENCES})")]
    TooManyReferences(usize),
}

/// Parse a SAM/BAM/CRAM file and extract the header
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// the container cannot be decoded, `ParseError::UnsupportedFormat` for unknown
/// extensions, or any error from [`parse_header_text`].
pub fn parse_file(path: &Path) -> Result<Header, ParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let header = match extension.as_deref() {
        Some("sam") | None => read_sam_header(path)?,
        Some("bam") => read_bam_header(path)?,
        Some("cram") => read_cram_header(path)?,
        Some(ext) => return Err(ParseError::UnsupportedFormat(ext.to_string())),
    };

    parse_header_text(&render_header(&header)?)
}

fn read_sam_header(path: &Path) -> Result<noodles::sam::Header, ParseError> {
    use noodles::sam;

    let mut reader = std::fs::File::open(path)
        .map(BufReader::new)
        .map(sam::io::Reader::new)?;

    reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))
}

fn read_bam_header(path: &Path) -> Result<noodles::sam::Header, ParseError> {
    use noodles::bam;

    let mut reader = std::fs::File::open(path).map(bam::io::Reader::new)?;

    reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))
}

fn read_cram_header(path: &Path) -> Result<noodles::sam::Header, ParseError> {
    use noodles::cram;

    let mut reader = std::fs::File::open(path).map(cram::io::Reader::new)?;

    reader
        .read_file_definition()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    reader
        .read_file_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))
}

/// Render a noodles header back to SAM text so it goes through the same
/// guarded registration as pasted text
fn render_header(header: &noodles::sam::Header) -> Result<String, ParseError> {
    let mut writer = noodles::sam::io::Writer::new(Vec::new());
    writer.write_header(header)?;
    String::from_utf8(writer.into_inner()).map_err(|e| ParseError::Noodles(e.to_string()))
}

/// Parse header from raw text (stdin or pasted)
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for malformed lines, `ParseError::Header`
/// when a line conflicts with an earlier one, or `ParseError::TooManyReferences`
/// if the limit is exceeded.
pub fn parse_header_text(text: &str) -> Result<Header, ParseError> {
    Header::new(Some(text), Vec::new())
}

/// Apply SAM header lines to `header` through its guarded insertions.
///
/// # Errors
///
/// See [`parse_header_text`]. On error `header` may hold the lines applied
/// before the failing one; [`Header::new`] discards it.
pub fn apply_header_text(header: &mut Header, text: &str) -> Result<(), ParseError> {
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let Some(rest) = line.strip_prefix('@') else {
            return Err(invalid(line_number, "header lines must start with '@'"));
        };
        let registry = |source: HeaderError| ParseError::Header {
            line: line_number,
            source,
        };

        match rest.split('\t').next().unwrap_or_default() {
            "HD" => parse_hd(header, line),
            "SQ" => {
                let reference = parse_sq(line, line_number)?;
                let count = header.references().len();
                if header.reference_id(reference.name()).is_none()
                    && exceeds_reference_limit(count)
                {
                    return Err(ParseError::TooManyReferences(count));
                }
                header.add_reference(reference).map_err(registry)?;
            }
            "RG" => {
                let read_group = parse_rg(line, line_number)?;
                header.add_read_group(read_group).map_err(registry)?;
            }
            "PG" => {
                let program = parse_pg(line, line_number)?;
                header.add_program(program).map_err(registry)?;
            }
            "CO" => {
                let comment = rest.strip_prefix("CO").unwrap_or_default();
                header.add_comment(comment.strip_prefix('\t').unwrap_or(comment));
            }
            other => {
                warn!(
                    line = line_number,
                    record_type = other,
                    "Unknown header record type, ignoring"
                );
            }
        }
    }

    Ok(())
}

fn invalid(line: usize, message: impl Into<String>) -> ParseError {
    ParseError::InvalidFormat {
        line,
        message: message.into(),
    }
}

/// Tag/value pairs of a header line, skipping the record type
fn fields(line: &str) -> impl Iterator<Item = (&str, &str)> {
    line.split('\t').skip(1).filter_map(|field| field.split_once(':'))
}

/// Value of the first `tag` field of a header line
fn required_tag<'a>(line: &'a str, tag: &str, line_number: usize) -> Result<&'a str, ParseError> {
    fields(line)
        .find(|(t, _)| *t == tag)
        .map(|(_, value)| value)
        .ok_or_else(|| invalid(line_number, format!("missing {tag} tag")))
}

fn parse_hd(header: &mut Header, line: &str) {
    for (tag, value) in fields(line) {
        match tag {
            "VN" => header.version = Some(value.to_string()),
            "SO" => header.sort_order = SortOrder::parse(value),
            _ => {}
        }
    }
}

fn parse_sq(line: &str, line_number: usize) -> Result<Reference, ParseError> {
    let name = required_tag(line, "SN", line_number)?;
    let raw_length = required_tag(line, "LN", line_number)?;
    let length: u64 = raw_length
        .parse()
        .map_err(|_| invalid(line_number, format!("invalid reference length: {raw_length}")))?;

    let mut reference = Reference::new(name, length).map_err(|source| ParseError::Header {
        line: line_number,
        source,
    })?;

    for (tag, value) in fields(line) {
        match tag {
            "M5" => {
                reference.md5 = normalize_md5(value);
                if reference.md5.is_none() {
                    warn!(
                        reference = %name,
                        md5 = %value,
                        "Invalid MD5 checksum format, ignoring"
                    );
                }
            }
            "AS" => reference.assembly = Some(value.to_string()),
            "UR" => reference.uri = Some(value.to_string()),
            "SP" => reference.species = Some(value.to_string()),
            "AN" => {
                // Alternate names (aliases), comma-separated
                reference.aliases = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            _ => {}
        }
    }

    Ok(reference)
}

fn parse_rg(line: &str, line_number: usize) -> Result<ReadGroup, ParseError> {
    let name = required_tag(line, "ID", line_number)?;
    let mut read_group = ReadGroup::new(name).map_err(|source| ParseError::Header {
        line: line_number,
        source,
    })?;

    for (tag, value) in fields(line) {
        match tag {
            "CN" => read_group.center = Some(value.to_string()),
            "DS" => read_group.description = Some(value.to_string()),
            "DT" => read_group.date = Some(value.to_string()),
            "FO" => *read_group.flow_order_mut() = value.as_bytes().to_vec(),
            "KS" => *read_group.key_sequence_mut() = value.as_bytes().to_vec(),
            "LB" => read_group.library = Some(value.to_string()),
            "PG" => read_group.programs = Some(value.to_string()),
            "PI" => {
                let insert_size = value.parse().map_err(|_| {
                    invalid(line_number, format!("invalid predicted insert size: {value}"))
                })?;
                read_group.insert_size = Some(insert_size);
            }
            "PL" => read_group.platform = Some(value.to_string()),
            "PM" => read_group.platform_model = Some(value.to_string()),
            "PU" => read_group.platform_unit = Some(value.to_string()),
            "SM" => read_group.sample = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(read_group)
}

fn parse_pg(line: &str, line_number: usize) -> Result<Program, ParseError> {
    let name = required_tag(line, "ID", line_number)?;
    let mut program = Program::new(name).map_err(|source| ParseError::Header {
        line: line_number,
        source,
    })?;

    for (tag, value) in fields(line) {
        match tag {
            "PN" => program.program_name = Some(value.to_string()),
            "CL" => program.command_line = Some(value.to_string()),
            "PP" => program.previous = Some(value.to_string()),
            "DS" => program.description = Some(value.to_string()),
            "VN" => program.version = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(program)
}
