//! Serializer that emits the typed tree in schema order.

use log::{debug, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{CodecConfig, FieldPath, ScalarSlot, ValidationError, XmlNode, ROOT_ELEMENT, XSI_NAMESPACE};
use crate::model::{DocumentRoot, MixedEntry};

/// Writes nodes, scalars and preserved fragments to an in-memory buffer.
pub struct NodeWriter<'a> {
    writer: Writer<Vec<u8>>,
    /// Mixed entries of the document being written
    preserved: &'a [MixedEntry],
    /// Number of nested fragments written so far
    fragments: usize,
}

impl<'a> NodeWriter<'a> {
    pub(crate) fn new(config: &CodecConfig, preserved: &'a [MixedEntry]) -> Self {
        let writer = match config.indent {
            Some(width) if width > 0 => Writer::new_with_indent(Vec::new(), b' ', width),
            _ => Writer::new(Vec::new()),
        };
        Self {
            writer,
            preserved,
            fragments: 0,
        }
    }

    /// Write a child node if the slot is occupied.
    pub fn node<N: XmlNode>(
        &mut self,
        slot: &Option<N>,
        name: &str,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        match slot {
            Some(node) => self.element(node, name, path, &[]),
            None => Ok(()),
        }
    }

    /// Write `<name>value</name>` if the slot holds a value.
    pub fn scalar<S: ScalarSlot>(
        &mut self,
        slot: &S,
        name: &str,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        if let Some(text) = slot.lexical() {
            self.writer
                .write_event(Event::Start(BytesStart::new(name)))?;
            self.writer.write_event(Event::Text(BytesText::new(&text)))?;
            for raw in self.fragments_under(path) {
                self.raw(raw, false)?;
                self.fragments += 1;
            }
            self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Ok(())
    }

    fn element<N: XmlNode>(
        &mut self,
        node: &N,
        name: &str,
        path: &FieldPath,
        declarations: &[(String, String)],
    ) -> Result<(), ValidationError> {
        let mut start = BytesStart::new(name);
        for (key, value) in declarations {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        node.write_attributes(&mut start, path)?;

        let fragments = self.fragments_under(path);
        let text = node.content_text();
        if text.is_none() && !node.has_children() && fragments.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        // Indenting a fragment inside simple content would change the text value.
        let indent = text.is_none();
        self.writer.write_event(Event::Start(start))?;
        if let Some(text) = text {
            self.writer.write_event(Event::Text(BytesText::new(&text)))?;
        }
        node.write_children(self, path)?;
        for raw in fragments {
            self.raw(raw, indent)?;
            self.fragments += 1;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn fragments_under(&self, path: &FieldPath) -> Vec<&'a str> {
        let preserved: &'a [MixedEntry] = self.preserved;
        preserved
            .iter()
            .filter_map(|entry| match entry {
                MixedEntry::Element {
                    parent: Some(parent),
                    raw,
                    ..
                } if parent.as_str() == path.as_str() => Some(raw.as_str()),
                _ => None,
            })
            .collect()
    }

    fn raw(&mut self, raw: &str, indent: bool) -> Result<(), ValidationError> {
        if indent {
            self.writer.write_indent()?;
        }
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(raw)))?;
        Ok(())
    }

    fn entry(&mut self, entry: &MixedEntry) -> Result<(), ValidationError> {
        match entry {
            MixedEntry::Text(text) => {
                self.writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            MixedEntry::Comment(text) => {
                self.writer
                    .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
            }
            MixedEntry::ProcessingInstruction(text) => {
                self.writer
                    .write_event(Event::PI(BytesPI::new(text.as_str())))?;
            }
            MixedEntry::Element { raw, .. } => self.raw(raw, true)?,
        }
        Ok(())
    }
}

/// Serialize a document: declaration, document-level entries, and the `HMxml` tree.
pub(crate) fn write_document(
    document: &DocumentRoot,
    config: &CodecConfig,
) -> Result<Vec<u8>, ValidationError> {
    let root = document
        .hm_xml
        .as_ref()
        .ok_or_else(|| ValidationError::UnsetRequiredField {
            path: FieldPath::root(),
        })?;

    let mut writer = NodeWriter::new(config, &document.mixed);
    if config.xml_declaration {
        writer
            .writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    let declarations = root_declarations(document, config);
    let root_path = FieldPath::root();
    let mut root_written = false;
    for (index, entry) in document.document_entries().enumerate() {
        if index == document.root_index {
            writer.element(root, ROOT_ELEMENT, &root_path, &declarations)?;
            root_written = true;
        }
        writer.entry(entry)?;
    }
    if !root_written {
        writer.element(root, ROOT_ELEMENT, &root_path, &declarations)?;
    }

    let nested = document
        .mixed
        .iter()
        .filter(|entry| entry.parent().is_some())
        .count();
    if writer.fragments < nested {
        warn!(
            "{} preserved element(s) have no parent node in the document and were not written",
            nested - writer.fragments
        );
    }

    let mut output = writer.writer.into_inner();
    if config.indent.is_some() {
        output.push(b'\n');
    }
    debug!("Serialized {} ({} bytes)", ROOT_ELEMENT, output.len());
    Ok(output)
}

/// `xmlns` and `xsi:*` attributes of the root element.
fn root_declarations(document: &DocumentRoot, config: &CodecConfig) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    if let Some(namespace) = &config.target_namespace {
        declarations.push(("xmlns".to_string(), namespace.clone()));
    }
    for (prefix, namespace) in &document.xmlns_prefix_map {
        if !prefix.is_empty() {
            declarations.push((format!("xmlns:{}", prefix), namespace.clone()));
        } else if !config.is_schema_namespace(Some(namespace.as_str())) {
            warn!(
                "Dropping default namespace {:?}: schema elements are written in {:?}",
                namespace, config.target_namespace
            );
        }
    }

    if document.xsi_schema_location.is_empty() {
        return declarations;
    }
    let prefix = match document
        .xmlns_prefix_map
        .iter()
        .find(|(prefix, namespace)| !prefix.is_empty() && namespace.as_str() == XSI_NAMESPACE)
    {
        Some((prefix, _)) => prefix.clone(),
        None => {
            declarations.push(("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()));
            "xsi".to_string()
        }
    };
    let mut pairs = Vec::new();
    for (namespace, location) in &document.xsi_schema_location {
        if namespace.is_empty() {
            declarations.push((
                format!("{}:noNamespaceSchemaLocation", prefix),
                location.clone(),
            ));
        } else {
            pairs.push(format!("{} {}", namespace, location));
        }
    }
    if !pairs.is_empty() {
        declarations.push((format!("{}:schemaLocation", prefix), pairs.join(" ")));
    }
    declarations
}
