//! Schema-to-struct mapping table.
//!
//! Every node type implements [`XmlNode`], normally through the crate-internal
//! `xml_node!` macro, which turns a declaration such as
//!
//! ```text
//! xml_node! {
//!     Roi => "ROI_._type", create = create_roi {
//!         elements {
//!             node ty = "Type",
//!             scalar xmin = "Xmin",
//!         }
//!     }
//! }
//! ```
//!
//! into the `FIELDS` table plus the read, write and required-field hooks used by
//! [`NodeReader`] and [`NodeWriter`]. `node` fields hold `Option<Child>`, `scalar`
//! fields hold any [`ScalarSlot`].

use quick_xml::events::BytesStart;

use super::{ElementStart, FieldPath, NodeReader, NodeWriter, ValidationError};
use crate::factory::NodeFactory;
use crate::model::{Decimal, Unsettable};

/// Whether an attribute must be present when a document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeUse {
    /// `use="required"` in the schema
    Required,
    /// `use="optional"` in the schema
    Optional,
}

/// How a field is carried in XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Child element
    Element,
    /// Attribute of the node's own element
    Attribute(AttributeUse),
    /// Text content of a simple-content node
    Content,
}

/// One row of a node's mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name
    pub field: &'static str,
    /// XML local name (empty for text content)
    pub xml_name: &'static str,
    /// Element, attribute or text content
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Child element row.
    pub const fn element(field: &'static str, xml_name: &'static str) -> Self {
        Self {
            field,
            xml_name,
            kind: FieldKind::Element,
        }
    }

    /// Attribute row.
    pub const fn attribute(field: &'static str, xml_name: &'static str, usage: AttributeUse) -> Self {
        Self {
            field,
            xml_name,
            kind: FieldKind::Attribute(usage),
        }
    }

    /// Text content row.
    pub const fn content(field: &'static str) -> Self {
        Self {
            field,
            xml_name: "",
            kind: FieldKind::Content,
        }
    }

    /// Whether this is a required attribute.
    pub fn is_required(&self) -> bool {
        self.kind == FieldKind::Attribute(AttributeUse::Required)
    }
}

/// A typed node of the parameter document.
///
/// Fields appear in `FIELDS` in schema-declared order; the writer emits children in
/// exactly that order.
pub trait XmlNode: Sized {
    /// Name of the schema type this node maps to
    const TYPE_NAME: &'static str;

    /// Mapping table in schema-declared order
    const FIELDS: &'static [FieldDescriptor];

    /// Create an empty node through the factory.
    fn create(factory: &dyn NodeFactory) -> Self;

    /// Store a schema attribute. Returns `false` for names outside the schema.
    fn read_attribute(&mut self, _name: &str, _value: &str) -> bool {
        false
    }

    /// Read a child element into its slot. Returns `false` for names outside the schema.
    fn read_child(
        &mut self,
        _start: &ElementStart,
        _reader: &mut NodeReader<'_>,
        _path: &FieldPath,
    ) -> Result<bool, ValidationError> {
        Ok(false)
    }

    /// Store the text content of a simple-content node.
    fn read_content(&mut self, _text: &str, _path: &FieldPath) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Push set attributes onto the start tag; fails on an unset required attribute.
    fn write_attributes(
        &self,
        _start: &mut BytesStart<'_>,
        _path: &FieldPath,
    ) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Lexical form of the text content, if any.
    fn content_text(&self) -> Option<String> {
        None
    }

    /// Write the set child elements in schema order.
    fn write_children(
        &self,
        _writer: &mut NodeWriter<'_>,
        _path: &FieldPath,
    ) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Whether any child element slot is occupied.
    fn has_children(&self) -> bool {
        false
    }

    /// Append the paths of unset required attributes of this node.
    fn missing_attributes(&self, _path: &FieldPath, _missing: &mut Vec<FieldPath>) {}

    /// Walk the child nodes with `check`.
    fn visit_children(&self, _check: &mut RequiredCheck<'_>, _path: &FieldPath) {}

    /// Whether the node carries text content.
    fn has_content() -> bool {
        Self::FIELDS.iter().any(|f| f.kind == FieldKind::Content)
    }

    /// Paths of every unset required attribute in this subtree.
    fn collect_missing(&self, path: &FieldPath, missing: &mut Vec<FieldPath>) {
        self.missing_attributes(path, missing);
        self.visit_children(&mut RequiredCheck { missing }, path);
    }
}

/// Recursive required-attribute walk used by [`XmlNode::collect_missing`].
pub struct RequiredCheck<'a> {
    missing: &'a mut Vec<FieldPath>,
}

impl RequiredCheck<'_> {
    /// Descend into a child node.
    pub fn node<N: XmlNode>(&mut self, slot: &Option<N>, path: &FieldPath) {
        if let Some(node) = slot {
            node.collect_missing(path, self.missing);
        }
    }

    /// Scalars carry no attributes.
    pub fn scalar<S: ScalarSlot>(&mut self, _slot: &S, _path: &FieldPath) {}
}

/// Whether a slot holds a value.
pub trait Presence {
    /// `true` when the slot will be written.
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Unsettable<T> {
    fn is_present(&self) -> bool {
        self.is_set()
    }
}

/// An XSD simple type with a lexical form.
pub trait Scalar: Sized {
    /// XSD type name used in conversion errors
    const XSD_TYPE: &'static str;

    /// Parse the lexical form. `None` when the text is not a valid literal.
    fn parse_lexical(text: &str) -> Option<Self>;

    /// Lexical form written to XML.
    fn to_lexical(&self) -> String;
}

impl Scalar for String {
    const XSD_TYPE: &'static str = "xsd:string";

    fn parse_lexical(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn to_lexical(&self) -> String {
        self.clone()
    }
}

impl Scalar for i32 {
    const XSD_TYPE: &'static str = "xsd:int";

    fn parse_lexical(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_lexical(&self) -> String {
        self.to_string()
    }
}

impl Scalar for f64 {
    const XSD_TYPE: &'static str = "xsd:double";

    fn parse_lexical(text: &str) -> Option<Self> {
        match text.trim() {
            "INF" | "+INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            // Rust also accepts "inf", "infinity" and "nan" which XSD does not.
            t if t
                .bytes()
                .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') =>
            {
                None
            }
            t => t.parse().ok(),
        }
    }

    fn to_lexical(&self) -> String {
        if self.is_nan() {
            "NaN".to_string()
        } else if self.is_infinite() {
            if *self > 0.0 { "INF" } else { "-INF" }.to_string()
        } else {
            self.to_string()
        }
    }
}

impl Scalar for Decimal {
    const XSD_TYPE: &'static str = "xsd:decimal";

    fn parse_lexical(text: &str) -> Option<Self> {
        Decimal::parse(text).ok()
    }

    fn to_lexical(&self) -> String {
        self.as_str().to_string()
    }
}

/// A field slot holding at most one scalar value.
pub trait ScalarSlot: Presence {
    /// Scalar type stored in the slot
    type Value: Scalar;

    /// Current value, if present.
    fn stored(&self) -> Option<&Self::Value>;

    /// Replace the value.
    fn store(&mut self, value: Self::Value);

    /// Parse `text` and store it, reporting a [`ValidationError::TypeCoercion`] at `path`.
    fn store_text(&mut self, text: &str, path: &FieldPath) -> Result<(), ValidationError> {
        let value = <Self::Value as Scalar>::parse_lexical(text).ok_or_else(|| {
            ValidationError::TypeCoercion {
                path: path.clone(),
                value: text.to_string(),
                expected: <Self::Value as Scalar>::XSD_TYPE,
            }
        })?;
        self.store(value);
        Ok(())
    }

    /// Lexical form of the current value.
    fn lexical(&self) -> Option<String> {
        self.stored().map(Scalar::to_lexical)
    }
}

impl<T: Scalar> ScalarSlot for Option<T> {
    type Value = T;

    fn stored(&self) -> Option<&T> {
        self.as_ref()
    }

    fn store(&mut self, value: T) {
        *self = Some(value);
    }
}

impl<T: Scalar> ScalarSlot for Unsettable<T> {
    type Value = T;

    fn stored(&self) -> Option<&T> {
        self.as_option()
    }

    fn store(&mut self, value: T) {
        self.set(value);
    }
}

/// Push one attribute, or fail if it is required and unset.
pub fn write_attribute(
    start: &mut BytesStart<'_>,
    value: &Option<String>,
    xml_name: &str,
    usage: AttributeUse,
    path: &FieldPath,
) -> Result<(), ValidationError> {
    match (value, usage) {
        (Some(value), _) => start.push_attribute((xml_name, value.as_str())),
        (None, AttributeUse::Required) => {
            return Err(ValidationError::UnsetRequiredField {
                path: path.attribute(xml_name),
            })
        }
        (None, AttributeUse::Optional) => {}
    }
    Ok(())
}

/// Record `path/@xml_name` when a required attribute is unset.
pub fn check_attribute(
    value: &Option<String>,
    xml_name: &str,
    usage: AttributeUse,
    path: &FieldPath,
    missing: &mut Vec<FieldPath>,
) {
    if usage == AttributeUse::Required && value.is_none() {
        missing.push(path.attribute(xml_name));
    }
}

/// Implement [`XmlNode`] for a struct from its schema mapping.
///
/// Sections are optional but must appear in the order `attributes`, `content`,
/// `elements`. Attribute fields are `Option<String>`.
macro_rules! xml_node {
    (
        $ty:ident => $type_name:literal, create = $create:ident {
            $( attributes { $( $usage:ident $afield:ident = $axml:literal ),* $(,)? } )?
            $( content $cfield:ident ; )?
            $( elements { $( $kind:ident $field:ident = $xml:literal ),* $(,)? } )?
        }
    ) => {
        impl $crate::codec::XmlNode for $ty {
            const TYPE_NAME: &'static str = $type_name;

            const FIELDS: &'static [$crate::codec::FieldDescriptor] = &[
                $( $( $crate::codec::FieldDescriptor::attribute(
                    stringify!($afield),
                    $axml,
                    $crate::codec::AttributeUse::$usage,
                ), )* )?
                $( $crate::codec::FieldDescriptor::content(stringify!($cfield)), )?
                $( $( $crate::codec::FieldDescriptor::element(stringify!($field), $xml), )* )?
            ];

            fn create(factory: &dyn $crate::factory::NodeFactory) -> Self {
                $crate::factory::NodeFactory::$create(factory)
            }

            $(
                fn read_attribute(&mut self, name: &str, value: &str) -> bool {
                    match name {
                        $( $axml => self.$afield = Some(value.to_string()), )*
                        _ => return false,
                    }
                    true
                }

                fn write_attributes(
                    &self,
                    start: &mut ::quick_xml::events::BytesStart<'_>,
                    path: &$crate::codec::FieldPath,
                ) -> Result<(), $crate::codec::ValidationError> {
                    $( $crate::codec::mapping::write_attribute(
                        start,
                        &self.$afield,
                        $axml,
                        $crate::codec::AttributeUse::$usage,
                        path,
                    )?; )*
                    Ok(())
                }

                fn missing_attributes(
                    &self,
                    path: &$crate::codec::FieldPath,
                    missing: &mut Vec<$crate::codec::FieldPath>,
                ) {
                    $( $crate::codec::mapping::check_attribute(
                        &self.$afield,
                        $axml,
                        $crate::codec::AttributeUse::$usage,
                        path,
                        missing,
                    ); )*
                }
            )?

            $(
                fn read_content(
                    &mut self,
                    text: &str,
                    path: &$crate::codec::FieldPath,
                ) -> Result<(), $crate::codec::ValidationError> {
                    if text.is_empty() {
                        return Ok(());
                    }
                    $crate::codec::ScalarSlot::store_text(&mut self.$cfield, text, path)
                }

                fn content_text(&self) -> Option<String> {
                    $crate::codec::ScalarSlot::lexical(&self.$cfield)
                }
            )?

            $(
                fn read_child(
                    &mut self,
                    start: &$crate::codec::ElementStart,
                    reader: &mut $crate::codec::NodeReader<'_>,
                    path: &$crate::codec::FieldPath,
                ) -> Result<bool, $crate::codec::ValidationError> {
                    match start.local.as_str() {
                        $( $xml => reader.$kind(&mut self.$field, start, &path.child($xml))?, )*
                        _ => return Ok(false),
                    }
                    Ok(true)
                }

                fn write_children(
                    &self,
                    writer: &mut $crate::codec::NodeWriter<'_>,
                    path: &$crate::codec::FieldPath,
                ) -> Result<(), $crate::codec::ValidationError> {
                    $( writer.$kind(&self.$field, $xml, &path.child($xml))?; )*
                    Ok(())
                }

                fn has_children(&self) -> bool {
                    false $( || $crate::codec::Presence::is_present(&self.$field) )*
                }

                fn visit_children(
                    &self,
                    check: &mut $crate::codec::RequiredCheck<'_>,
                    path: &$crate::codec::FieldPath,
                ) {
                    $( check.$kind(&self.$field, &path.child($xml)); )*
                }
            )?
        }
    };
}

pub(crate) use xml_node;
