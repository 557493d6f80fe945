//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`DomainName`] - Validated name of a node in the taxonomy
//! - [`DomainPath`] - Ordered descent from the root, `[]` is the root itself
//! - [`Document`] - A named piece of content attached at a path
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use domaintree::core::types::{DomainName, DomainPath};
//!
//! let physics = DomainName::new("Physics").unwrap();
//! let path = DomainPath::root().child(physics);
//! assert_eq!(path.depth(), 1);
//!
//! assert!(DomainName::new("").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// A validated domain name.
///
/// Domain names must:
/// - Not be empty
/// - Not contain ASCII control characters
///
/// Any other character is allowed, including `/` and `\`. Those are
/// escaped by [`crate::core::codec`] when a path is turned into a key.
///
/// # Example
///
/// ```
/// use domaintree::core::types::DomainName;
///
/// let name = DomainName::new("Machine Learning").unwrap();
/// assert_eq!(name.as_str(), "Machine Learning");
///
/// let slashed = DomainName::new("I/O").unwrap();
/// assert_eq!(slashed.as_str(), "I/O");
///
/// assert!(DomainName::new("").is_err());
/// assert!(DomainName::new("tab\there").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Create a new validated domain name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDomainName` if the name is empty or
    /// contains control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidDomainName(
                "domain name cannot be empty".into(),
            ));
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidDomainName(
                "domain name cannot contain control characters".into(),
            ));
        }

        Ok(())
    }

    /// Get the domain name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DomainName> for String {
    fn from(name: DomainName) -> Self {
        name.0
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered descent from the root of the taxonomy.
///
/// The empty path is the root. A path of length `n` names a node `n`
/// levels below the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainPath(Vec<DomainName>);

impl DomainPath {
    /// The root path (`[]`).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from already-validated segments.
    pub fn new(segments: Vec<DomainName>) -> Self {
        Self(segments)
    }

    /// Build a path from raw strings, validating each segment.
    ///
    /// # Example
    ///
    /// ```
    /// use domaintree::core::types::DomainPath;
    ///
    /// let path = DomainPath::parse_segments(["A", "B"]).unwrap();
    /// assert_eq!(path.depth(), 2);
    /// assert!(DomainPath::parse_segments(["A", ""]).is_err());
    /// ```
    pub fn parse_segments<I, S>(segments: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments
            .into_iter()
            .map(DomainName::new)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments in descent order.
    pub fn segments(&self) -> &[DomainName] {
        &self.0
    }

    /// The last segment, or `None` at the root.
    pub fn last(&self) -> Option<&DomainName> {
        self.0.last()
    }

    /// A new path with `name` appended.
    pub fn child(&self, name: DomainName) -> Self {
        let mut segments = self.0.clone();
        segments.push(name);
        Self(segments)
    }

    /// The first `len` segments (clamped to the path length).
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    /// The parent path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            None
        } else {
            Some(self.prefix(self.0.len() - 1))
        }
    }
}

impl From<Vec<DomainName>> for DomainPath {
    fn from(segments: Vec<DomainName>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for DomainPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "/");
        }
        let joined = self
            .0
            .iter()
            .map(DomainName::as_str)
            .collect::<Vec<_>>()
            .join(" / ");
        write!(f, "{}", joined)
    }
}

/// A document attached to a path.
///
/// Content is stored verbatim. Names are unique per path; the store
/// enforces that, not this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Display name, usually the source file name.
    pub name: String,
    /// Full text content.
    pub content: String,
}

impl Document {
    /// Create a document.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDocument` if the name is empty.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TypeError::InvalidDocument(
                "document name cannot be empty".into(),
            ));
        }
        Ok(Self {
            name,
            content: content.into(),
        })
    }
}

/// A UTC timestamp.
///
/// Serialized as RFC3339.
///
/// # Example
///
/// ```
/// use domaintree::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
