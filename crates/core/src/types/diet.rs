//! Diet tags attached to dishes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A diet label such as `"vegan"` or `"Gluten-Free"`.
///
/// Tags keep the casing they were written with; filter comparisons go
/// through [`DietTag::matches`], which ignores case. Equality stays exact so
/// snapshots round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DietTag(String);

impl DietTag {
    /// Create a tag, trimming surrounding whitespace.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_owned())
    }

    /// The tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison for filters.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for DietTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DietTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for DietTag {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl AsRef<str> for DietTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
