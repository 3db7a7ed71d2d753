//! XML codec for HMxml documents.
//!
//! The codec maps the typed tree in [`crate::model`] to and from XML using
//! `quick-xml`. Parsing walks the event stream with a [`NodeReader`], dispatching
//! each element through the node's [`XmlNode`] mapping table; serialization walks
//! the tree with a [`NodeWriter`] in schema-declared field order.
//!
//! # Lenient and strict mode
//!
//! By default, elements outside the schema are preserved byte-for-byte in
//! [`DocumentRoot::mixed`](crate::model::DocumentRoot::mixed) and written back at
//! the same place; unknown attributes are dropped with a warning. With
//! [`CodecConfig::strict`] both are errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use hmxml::codec;
//! use hmxml::registry::Registry;
//!
//! let registry = Registry::default();
//! let xml = std::fs::read("settings.xml")?;
//! let document = codec::parse(&xml, &registry)?;
//! let output = codec::serialize(&document, &registry)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
pub mod mapping;
mod path;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

use log::debug;

pub use config::CodecConfig;
pub use error::ValidationError;
pub(crate) use mapping::xml_node;
pub use mapping::{
    AttributeUse, FieldDescriptor, FieldKind, Presence, RequiredCheck, Scalar, ScalarSlot, XmlNode,
};
pub use path::FieldPath;
pub use reader::{ElementStart, NodeReader, XmlAttribute};
pub use writer::NodeWriter;

use crate::factory::NodeFactory;
use crate::model::DocumentRoot;
use crate::registry::Registry;

/// Local name of the document element
pub const ROOT_ELEMENT: &str = "HMxml";

/// XML Schema instance namespace (`xsi:`)
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Parse an XML document into a new [`DocumentRoot`].
///
/// Nodes are created through the registry's factory; its config selects the
/// target namespace and strictness.
pub fn parse(input: &[u8], registry: &Registry) -> Result<DocumentRoot, ValidationError> {
    let factory = registry.factory();
    let document = NodeFactory::create_document_root(factory);
    let document = NodeReader::new(input, factory, registry.config()).read_document(document)?;
    debug!(
        "Parsed {} ({} bytes, {} mixed entries)",
        ROOT_ELEMENT,
        input.len(),
        document.mixed.len()
    );
    Ok(document)
}

/// Serialize a document to XML bytes.
///
/// Fails with [`ValidationError::UnsetRequiredField`] when the root or a required
/// attribute is missing.
pub fn serialize(document: &DocumentRoot, registry: &Registry) -> Result<Vec<u8>, ValidationError> {
    writer::write_document(document, registry.config())
}
