use serde::{Deserialize, Serialize};

/// Codec settings shared by parsing and serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Namespace of the schema elements; `None` for a no-namespace schema
    pub target_namespace: Option<String>,

    /// Reject elements and attributes outside the schema instead of preserving or dropping them
    pub strict: bool,

    /// Indentation width in spaces; `None` writes compact output
    pub indent: Option<usize>,

    /// Write an `<?xml ...?>` declaration
    pub xml_declaration: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            target_namespace: None,
            strict: false,
            indent: Some(2),
            xml_declaration: true,
        }
    }
}

impl CodecConfig {
    /// Config that rejects unknown content.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Set the target namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = Some(namespace.into());
        self
    }

    /// Whether a resolved namespace belongs to the schema.
    pub(crate) fn is_schema_namespace(&self, namespace: Option<&str>) -> bool {
        namespace == self.target_namespace.as_deref()
    }
}
