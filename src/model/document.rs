use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ModelError, ReconstructionParameters};
use crate::codec::{FieldPath, XmlNode};

/// One entry of the document's ordered mixed content.
///
/// Entries are kept opaque: the codec never interprets them, it only writes them
/// back at the same place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MixedEntry {
    /// Non-whitespace character data outside the root element
    Text(String),

    /// Comment body, without `<!--` and `-->`
    Comment(String),

    /// Processing instruction body (`target data`), without `<?` and `?>`
    ProcessingInstruction(String),

    /// Element outside the schema, kept byte-for-byte
    Element {
        /// Schema path of the node it was found in; `None` at document level
        parent: Option<String>,
        /// Qualified element name
        name: String,
        /// Source text from `<` to the closing `>`, plus any namespace declarations inherited from enclosing schema elements
        raw: String,
    },
}

impl MixedEntry {
    /// Parent path of a preserved element; `None` for document-level entries.
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Element { parent, .. } => parent.as_deref(),
            _ => None,
        }
    }
}

/// The XML document envelope around the `HMxml` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRoot {
    /// Comments, processing instructions and unknown elements in document order
    pub mixed: Vec<MixedEntry>,

    /// Number of document-level `mixed` entries that precede the `HMxml` element
    pub root_index: usize,

    /// Namespace declarations of the root element (`""` is the default namespace)
    pub xmlns_prefix_map: BTreeMap<String, String>,

    /// `xsi:schemaLocation` pairs (`""` holds `xsi:noNamespaceSchemaLocation`)
    pub xsi_schema_location: BTreeMap<String, String>,

    /// The parameter tree
    pub hm_xml: Option<ReconstructionParameters>,
}

impl DocumentRoot {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding `root`.
    pub fn with_root(root: ReconstructionParameters) -> Self {
        Self {
            hm_xml: Some(root),
            ..Self::default()
        }
    }

    /// Attach a parameter tree, returning the one it replaces.
    pub fn set_hm_xml(&mut self, root: ReconstructionParameters) -> Option<ReconstructionParameters> {
        self.hm_xml.replace(root)
    }

    /// Detach the parameter tree.
    pub fn take_hm_xml(&mut self) -> Option<ReconstructionParameters> {
        self.hm_xml.take()
    }

    /// Entries written outside the root element, in order.
    pub fn document_entries(&self) -> impl Iterator<Item = &MixedEntry> {
        self.mixed.iter().filter(|entry| entry.parent().is_none())
    }

    /// Elements outside the schema at any depth.
    pub fn unknown_elements(&self) -> impl Iterator<Item = &MixedEntry> {
        self.mixed
            .iter()
            .filter(|entry| matches!(entry, MixedEntry::Element { .. }))
    }

    /// Paths of all required attributes that are unset, in schema order.
    ///
    /// A missing root element is reported as `HMxml`.
    pub fn missing_required(&self) -> Vec<FieldPath> {
        let mut missing = Vec::new();
        match &self.hm_xml {
            Some(root) => root.collect_missing(&FieldPath::root(), &mut missing),
            None => missing.push(FieldPath::root()),
        }
        missing
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }
}
