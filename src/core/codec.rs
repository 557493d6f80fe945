//! core::codec
//!
//! Encoding of [`DomainPath`] values into map keys and back.
//!
//! # Format
//!
//! A [`PathKey`] is the path's segments joined with `/`. Inside a segment,
//! `\` is written as `\\` and `/` as `\/`. The root path is the empty
//! string.
//!
//! Domain names are never empty, so every segment encodes to at least one
//! character and an empty segment can only come from a corrupted key.
//! Together with the escaping this makes the encoding injective: two
//! distinct paths never share a key.
//!
//! # Example
//!
//! ```
//! use domaintree::core::codec::{decode, encode};
//! use domaintree::core::types::DomainPath;
//!
//! let path = DomainPath::parse_segments(["Systems", "I/O"]).unwrap();
//! let key = encode(&path);
//! assert_eq!(key.as_str(), r"Systems/I\/O");
//! assert_eq!(decode(key.as_str()).unwrap(), path);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{DomainName, DomainPath};

const SEPARATOR: char = '/';
const ESCAPE: char = '\\';

/// Errors from decoding a path key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The key was not produced by [`encode`].
    #[error("malformed path key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },
}

impl CodecError {
    fn malformed(key: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Canonical string form of a [`DomainPath`], used as a map key.
///
/// A `PathKey` can only be built by [`encode`] or by parsing a string that
/// [`decode`] accepts, so every value in circulation is well-formed.
/// Deserialization goes through the same check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathKey(String);

impl PathKey {
    /// The key of the root path.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a key, validating that it decodes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::MalformedKey` if `key` was not produced by
    /// [`encode`].
    pub fn parse(key: impl Into<String>) -> Result<Self, CodecError> {
        let key = key.into();
        decode(&key)?;
        Ok(Self(key))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the key of the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode back into a path.
    ///
    /// Infallible in practice because construction already validated the
    /// key; the `Result` is kept so callers do not need to assume that.
    pub fn to_path(&self) -> Result<DomainPath, CodecError> {
        decode(&self.0)
    }
}

impl TryFrom<String> for PathKey {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PathKey> for String {
    fn from(key: PathKey) -> Self {
        key.0
    }
}

impl From<&DomainPath> for PathKey {
    fn from(path: &DomainPath) -> Self {
        encode(path)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode a path into its key.
///
/// Deterministic and total over all paths, including the root.
pub fn encode(path: &DomainPath) -> PathKey {
    let mut key = String::new();
    for (i, segment) in path.segments().iter().enumerate() {
        if i > 0 {
            key.push(SEPARATOR);
        }
        for c in segment.as_str().chars() {
            if c == SEPARATOR || c == ESCAPE {
                key.push(ESCAPE);
            }
            key.push(c);
        }
    }
    PathKey(key)
}

/// Decode a key back into a path.
///
/// # Errors
///
/// Returns `CodecError::MalformedKey` when:
/// - the key ends in a dangling `\`
/// - `\` escapes anything other than `\` or `/`
/// - a segment is empty (leading, trailing, or doubled `/`)
/// - a segment is not a valid [`DomainName`]
pub fn decode(key: &str) -> Result<DomainPath, CodecError> {
    if key.is_empty() {
        return Ok(DomainPath::root());
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = key.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(next @ (SEPARATOR | ESCAPE)) => current.push(next),
                Some(other) => {
                    return Err(CodecError::malformed(
                        key,
                        format!("invalid escape '\\{}'", other),
                    ))
                }
                None => return Err(CodecError::malformed(key, "dangling escape")),
            },
            SEPARATOR => {
                segments.push(finish_segment(key, std::mem::take(&mut current))?);
            }
            other => current.push(other),
        }
    }
    segments.push(finish_segment(key, current)?);

    Ok(DomainPath::new(segments))
}

/// Parse a path typed by a user.
///
/// Accepts the key syntax with surrounding whitespace and an optional
/// leading `/`. `""` and `"/"` both name the root.
pub fn parse_user_path(text: &str) -> Result<DomainPath, CodecError> {
    let trimmed = text.trim();
    let key = trimmed.strip_prefix(SEPARATOR).unwrap_or(trimmed);
    decode(key)
}

fn finish_segment(key: &str, segment: String) -> Result<DomainName, CodecError> {
    if segment.is_empty() {
        return Err(CodecError::malformed(key, "empty segment"));
    }
    DomainName::new(segment).map_err(|e| CodecError::malformed(key, e.to_string()))
}
