//! Navigation path type for route matching.
//!
//! Invariants:
//! - Always starts with `/`
//! - Never ends with `/`, except the root `/` itself
//! - No empty segments (`//` collapses)

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized navigation path (`/`, `/blog`, `/blog/post-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NavPath(Arc<str>);

impl NavPath {
    /// The site root.
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    /// Normalize any slash path: `blog/`, `/blog`, `//blog//` all become `/blog`.
    ///
    /// Query strings and fragments are dropped.
    pub fn new(raw: &str) -> Self {
        let path = raw.split(['?', '#']).next().unwrap_or(raw);
        let segments: Vec<_> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Self::root();
        }
        Self(Arc::from(format!("/{}", segments.join("/"))))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.as_str() == "/"
    }

    /// Path segments, root yields none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments: `/` -> 0, `/blog` -> 1, `/blog/post` -> 2.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Path without the leading slash, empty for the root.
    ///
    /// Used to join against an output directory.
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }

    /// Whether `self` is a whole-segment prefix of `other`.
    ///
    /// `/blog` covers `/blog` and `/blog/post-1` but not `/blogging`;
    /// the root covers everything.
    pub fn covers(&self, other: &NavPath) -> bool {
        if self.is_root() || self == other {
            return true;
        }
        other
            .as_str()
            .strip_prefix(self.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl std::fmt::Display for NavPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for NavPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for NavPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NavPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NavPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for NavPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NavPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}
