//! Identifier and tag grammar shared by every frontend entry point.

use once_cell::sync::Lazy;
use regex::Regex;
use crate::cache::errors::CacheError;

pub const PATTERN_ENTRY_IDENTIFIER: &str = r"^[a-zA-Z0-9_%\-&]+$";
pub const PATTERN_TAG: &str = r"^[a-zA-Z0-9_%\-&]+$";

static ENTRY_IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PATTERN_ENTRY_IDENTIFIER).expect("entry identifier pattern compiles"));
static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PATTERN_TAG).expect("tag pattern compiles"));

pub fn is_valid_entry_identifier(identifier: &str) -> bool {
    ENTRY_IDENTIFIER_REGEX.is_match(identifier)
}

pub fn is_valid_tag(tag: &str) -> bool {
    TAG_REGEX.is_match(tag)
}

pub fn validate_entry_identifier(identifier: &str) -> Result<(), CacheError> {
    if is_valid_entry_identifier(identifier) {
        return Ok(());
    }
    Err(CacheError::InvalidIdentifier(identifier.to_string()))
}

pub fn validate_tag(tag: &str) -> Result<(), CacheError> {
    if is_valid_tag(tag) {
        return Ok(());
    }
    Err(CacheError::InvalidTag(tag.to_string()))
}

pub fn validate_tags<S: AsRef<str>>(tags: &[S]) -> Result<(), CacheError> {
    tags.iter().try_for_each(|tag| validate_tag(tag.as_ref()))
}
