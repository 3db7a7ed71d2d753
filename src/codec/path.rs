use serde::{Deserialize, Serialize};
use std::fmt;

/// Slash-separated schema path of a node or field, e.g. `HMxml/FBP/Backprojection/ROI/Xmin`.
///
/// Attributes are written with an `@` prefix on the last segment
/// (`HMxml/FBP/BeamlineUser/@done`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Path of the document level, above the root element.
    pub fn document() -> Self {
        Self(String::new())
    }

    /// Path of the `HMxml` root element.
    pub fn root() -> Self {
        Self(crate::codec::ROOT_ELEMENT.to_string())
    }

    /// Path of a child element.
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}/{}", self.0, name))
        }
    }

    /// Path of an attribute of this element.
    pub fn attribute(&self, name: &str) -> Self {
        self.child(&format!("@{}", name))
    }

    /// The path as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the document level.
    pub fn is_document(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}
