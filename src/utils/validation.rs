//! Centralized validation and helper functions.

/// Maximum number of references accepted from a single header (DOS protection)
pub const MAX_REFERENCES: usize = 100_000;

/// Largest reference length representable in a BAM header (`l_ref` is an `int32_t`)
pub const MAX_REFERENCE_LENGTH: u64 = (1 << 31) - 1;

/// Validate that a string is a valid MD5 checksum (32 hex characters).
///
/// # Examples
///
/// ```
/// use samcore::utils::validation::is_valid_md5;
///
/// assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
/// assert!(!is_valid_md5("not-an-md5"));
/// assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178d")); // 31 chars
/// ```
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize an MD5 string to lowercase.
/// Returns None if the input is not a valid MD5.
#[must_use]
pub fn normalize_md5(s: &str) -> Option<String> {
    if is_valid_md5(s) {
        Some(s.to_lowercase())
    } else {
        None
    }
}

/// Check whether a reference length is within `1..=MAX_REFERENCE_LENGTH`.
#[must_use]
pub fn is_valid_reference_length(length: u64) -> bool {
    (1..=MAX_REFERENCE_LENGTH).contains(&length)
}

/// Check if adding another reference would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new reference.
#[must_use]
pub fn exceeds_reference_limit(count: usize) -> bool {
    count >= MAX_REFERENCES
}
