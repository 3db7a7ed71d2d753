//! Pull parser that walks the XML event stream into typed nodes.

use log::{debug, trace, warn};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::NsReader;

use super::{
    CodecConfig, FieldPath, ScalarSlot, ValidationError, XmlNode, ROOT_ELEMENT, XSI_NAMESPACE,
};
use crate::factory::NodeFactory;
use crate::model::{DocumentRoot, MixedEntry};

/// Owned copy of a start tag, with names resolved against the namespace scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementStart {
    /// Qualified name as written (`hm:ROI`)
    pub name: String,
    /// Local part of the name (`ROI`)
    pub local: String,
    /// Resolved namespace, `None` when unbound
    pub namespace: Option<String>,
    /// Attributes in document order
    pub attributes: Vec<XmlAttribute>,
    /// `true` for a self-closing tag
    pub empty: bool,
    /// Byte offset of the opening `<` in the input
    pub(crate) offset: usize,
}

/// One attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Qualified name as written
    pub name: String,
    /// Local part of the name
    pub local: String,
    /// Resolved namespace, `None` for unqualified attributes
    pub namespace: Option<String>,
    /// Unescaped value
    pub value: String,
}

impl XmlAttribute {
    /// Whether this is an `xmlns` or `xmlns:*` declaration.
    pub fn is_namespace_declaration(&self) -> bool {
        self.name == "xmlns" || self.name.starts_with("xmlns:")
    }
}

/// Reads one document into the typed tree.
///
/// Elements in the schema namespace are dispatched through [`XmlNode::read_child`];
/// anything else is either rejected (strict mode) or captured byte-for-byte.
pub struct NodeReader<'a> {
    reader: NsReader<&'a [u8]>,
    input: &'a [u8],
    factory: &'a dyn NodeFactory,
    config: &'a CodecConfig,
    /// Unknown elements found below the root, in document order
    preserved: Vec<MixedEntry>,
    /// `xmlns` declarations of the open schema elements below the root, outermost first
    scopes: Vec<Vec<(String, String)>>,
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

impl<'a> NodeReader<'a> {
    pub(crate) fn new(
        input: &'a [u8],
        factory: &'a dyn NodeFactory,
        config: &'a CodecConfig,
    ) -> Self {
        // Offsets of captured fragments index into `input`, so it must start where the reader does.
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        Self {
            reader: NsReader::from_reader(input),
            input,
            factory,
            config,
            preserved: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Read the whole input into `document`.
    pub(crate) fn read_document(
        mut self,
        mut document: DocumentRoot,
    ) -> Result<DocumentRoot, ValidationError> {
        let path = FieldPath::document();
        loop {
            let (namespace, event) = self.next(&path)?;
            match event {
                Event::Start(e) => self.document_element(&mut document, namespace, &e, false)?,
                Event::Empty(e) => self.document_element(&mut document, namespace, &e, true)?,
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if !text.trim().is_empty() {
                        document.mixed.push(MixedEntry::Text(text.into_owned()));
                    }
                }
                Event::CData(data) => {
                    let text = std::str::from_utf8(&data)?;
                    document.mixed.push(MixedEntry::Text(text.to_string()));
                }
                Event::Comment(comment) => {
                    let text = std::str::from_utf8(&comment)?;
                    document.mixed.push(MixedEntry::Comment(text.to_string()));
                }
                Event::PI(instruction) => {
                    let text = std::str::from_utf8(&instruction)?;
                    document
                        .mixed
                        .push(MixedEntry::ProcessingInstruction(text.to_string()));
                }
                Event::End(_) => {
                    return Err(ValidationError::malformed(&path, "unexpected end tag"));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if document.hm_xml.is_none() {
            return Err(ValidationError::UnsetRequiredField {
                path: FieldPath::root(),
            });
        }
        if !self.preserved.is_empty() {
            debug!(
                "Preserved {} unknown element(s) below {}",
                self.preserved.len(),
                ROOT_ELEMENT
            );
        }
        document.mixed.append(&mut self.preserved);
        Ok(document)
    }

    /// Read a child element into a node slot.
    pub fn node<N: XmlNode>(
        &mut self,
        slot: &mut Option<N>,
        start: &ElementStart,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        if slot.is_some() {
            return Err(ValidationError::ContainmentConflict { path: path.clone() });
        }
        *slot = Some(self.read_node(start, path)?);
        Ok(())
    }

    /// Read a child element's text into a scalar slot.
    pub fn scalar<S: ScalarSlot>(
        &mut self,
        slot: &mut S,
        start: &ElementStart,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        if slot.is_present() {
            return Err(ValidationError::ContainmentConflict { path: path.clone() });
        }
        for attribute in &start.attributes {
            if !attribute.is_namespace_declaration() {
                self.unknown_attribute(attribute, path)?;
            }
        }
        self.scopes.push(declarations_of(start));
        let text = self.read_text(start, path);
        self.scopes.pop();
        slot.store_text(&text?, path)
    }

    /// Read the element `start` (already consumed) up to its end tag.
    pub fn read_node<N: XmlNode>(
        &mut self,
        start: &ElementStart,
        path: &FieldPath,
    ) -> Result<N, ValidationError> {
        trace!("{}: reading {}", path, N::TYPE_NAME);
        let mut node = N::create(self.factory);
        for attribute in &start.attributes {
            if attribute.is_namespace_declaration() {
                continue;
            }
            let in_schema = attribute.namespace.is_none()
                || self
                    .config
                    .is_schema_namespace(attribute.namespace.as_deref());
            if !(in_schema && node.read_attribute(&attribute.local, &attribute.value)) {
                self.unknown_attribute(attribute, path)?;
            }
        }
        if start.empty {
            return Ok(node);
        }

        self.scopes.push(declarations_of(start));
        let node = self.read_body(node, path);
        self.scopes.pop();
        node
    }

    fn read_body<N: XmlNode>(&mut self, mut node: N, path: &FieldPath) -> Result<N, ValidationError> {
        let mut text = String::new();
        loop {
            let (namespace, event) = self.next(path)?;
            match event {
                Event::Start(e) => self.child(&mut node, namespace, &e, false, path)?,
                Event::Empty(e) => self.child(&mut node, namespace, &e, true, path)?,
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(data) => text.push_str(std::str::from_utf8(&data)?),
                Event::End(_) => break,
                Event::Eof => {
                    return Err(ValidationError::malformed(
                        path,
                        "unexpected end of document",
                    ))
                }
                // Comments and processing instructions inside schema nodes are not kept.
                _ => {}
            }
        }

        if N::has_content() {
            node.read_content(&text, path)?;
        } else if !text.trim().is_empty() {
            return Err(ValidationError::malformed(
                path,
                format!("unexpected text {:?} in element-only content", text.trim()),
            ));
        }
        Ok(node)
    }

    fn child<N: XmlNode>(
        &mut self,
        node: &mut N,
        namespace: Option<String>,
        e: &BytesStart<'a>,
        empty: bool,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        let start = self.element_start(namespace, e, empty, path)?;
        if self.config.is_schema_namespace(start.namespace.as_deref())
            && node.read_child(&start, self, path)?
        {
            return Ok(());
        }
        self.nested_unknown(start, path)
    }

    fn nested_unknown(&mut self, start: ElementStart, path: &FieldPath) -> Result<(), ValidationError> {
        let raw = self.unknown_element(&start, path)?;
        let raw = self.with_scope_declarations(raw, &start);
        self.preserved.push(MixedEntry::Element {
            parent: Some(path.as_str().to_string()),
            name: start.name,
            raw,
        });
        Ok(())
    }

    /// Declare on the fragment's own tag the prefixes it inherits from enclosing schema
    /// elements, whose declarations are not written back.
    fn with_scope_declarations(&self, mut raw: String, start: &ElementStart) -> String {
        let mut inherited: Vec<(&str, &str)> = Vec::new();
        for (name, value) in self.scopes.iter().rev().flatten() {
            let shadowed = inherited.iter().any(|(seen, _)| *seen == name.as_str())
                || start.attributes.iter().any(|attribute| &attribute.name == name);
            if !shadowed {
                inherited.push((name.as_str(), value.as_str()));
            }
        }
        if inherited.is_empty() {
            return raw;
        }
        let declarations: String = inherited
            .iter()
            .rev()
            .map(|(name, value)| format!(" {}=\"{}\"", name, escape(*value)))
            .collect();
        raw.insert_str(1 + start.name.len(), &declarations);
        raw
    }

    fn document_element(
        &mut self,
        document: &mut DocumentRoot,
        namespace: Option<String>,
        e: &BytesStart<'a>,
        empty: bool,
    ) -> Result<(), ValidationError> {
        let path = FieldPath::document();
        let start = self.element_start(namespace, e, empty, &path)?;
        if start.local != ROOT_ELEMENT
            || !self.config.is_schema_namespace(start.namespace.as_deref())
        {
            let raw = self.unknown_element(&start, &path)?;
            document.mixed.push(MixedEntry::Element {
                parent: None,
                name: start.name,
                raw,
            });
            return Ok(());
        }

        let root = FieldPath::root();
        if document.hm_xml.is_some() {
            return Err(ValidationError::ContainmentConflict { path: root });
        }
        let start = take_root_declarations(start, document, &root)?;
        document.root_index = document.mixed.len();
        document.hm_xml = Some(self.read_node(&start, &root)?);
        Ok(())
    }

    fn read_text(
        &mut self,
        start: &ElementStart,
        path: &FieldPath,
    ) -> Result<String, ValidationError> {
        let mut text = String::new();
        if start.empty {
            return Ok(text);
        }
        loop {
            let (namespace, event) = self.next(path)?;
            match event {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(data) => text.push_str(std::str::from_utf8(&data)?),
                Event::End(_) => return Ok(text),
                Event::Start(e) => {
                    let start = self.element_start(namespace, &e, false, path)?;
                    self.nested_unknown(start, path)?;
                }
                Event::Empty(e) => {
                    let start = self.element_start(namespace, &e, true, path)?;
                    self.nested_unknown(start, path)?;
                }
                Event::Eof => {
                    return Err(ValidationError::malformed(
                        path,
                        "unexpected end of document",
                    ))
                }
                _ => {}
            }
        }
    }

    /// Reject or capture an element outside the schema. Returns its exact source text.
    fn unknown_element(
        &mut self,
        start: &ElementStart,
        parent: &FieldPath,
    ) -> Result<String, ValidationError> {
        if self.config.strict {
            return Err(ValidationError::UnknownElement {
                path: parent.clone(),
                name: start.name.clone(),
            });
        }
        if !start.empty {
            self.reader.read_to_end(QName(start.name.as_bytes()))?;
        }
        let end = self.offset(parent)?;
        let raw = self
            .input
            .get(start.offset..end)
            .ok_or_else(|| ValidationError::malformed(parent, "element span outside input"))?;
        warn!("{}: preserving unknown element <{}>", parent, start.name);
        Ok(std::str::from_utf8(raw)?.to_string())
    }

    fn unknown_attribute(
        &self,
        attribute: &XmlAttribute,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        if self.config.strict {
            return Err(ValidationError::UnknownAttribute {
                path: path.clone(),
                name: attribute.name.clone(),
            });
        }
        warn!("{}: dropping unknown attribute {}", path, attribute.name);
        Ok(())
    }

    fn next(&mut self, path: &FieldPath) -> Result<(Option<String>, Event<'a>), ValidationError> {
        let (resolved, event) = self.reader.read_resolved_event()?;
        let namespace = namespace_of(resolved, path)?;
        Ok((namespace, event))
    }

    fn element_start(
        &self,
        namespace: Option<String>,
        e: &BytesStart<'a>,
        empty: bool,
        path: &FieldPath,
    ) -> Result<ElementStart, ValidationError> {
        let name = std::str::from_utf8(e.name().as_ref())?.to_string();
        let local = std::str::from_utf8(e.local_name().as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let attr_name = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr
                .decode_and_unescape_value(self.reader.decoder())?
                .into_owned();
            let attribute = if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
                let prefix = attr_name.strip_prefix("xmlns:").unwrap_or_default();
                XmlAttribute {
                    local: prefix.to_string(),
                    name: attr_name,
                    namespace: None,
                    value,
                }
            } else {
                let (resolved, attr_local) = self.reader.resolve_attribute(attr.key);
                let attr_local = std::str::from_utf8(attr_local.as_ref())?.to_string();
                XmlAttribute {
                    namespace: namespace_of(resolved, path)?,
                    local: attr_local,
                    name: attr_name,
                    value,
                }
            };
            attributes.push(attribute);
        }

        // The reader sits just past the tag; `e` holds everything between `<` and `>` or `/>`.
        let end = self.offset(path)?;
        let tag_len = e.len() + if empty { 3 } else { 2 };
        let offset = end
            .checked_sub(tag_len)
            .ok_or_else(|| ValidationError::malformed(path, "start tag outside input"))?;

        Ok(ElementStart {
            name,
            local,
            namespace,
            attributes,
            empty,
            offset,
        })
    }

    fn offset(&self, path: &FieldPath) -> Result<usize, ValidationError> {
        usize::try_from(self.reader.buffer_position())
            .map_err(|_| ValidationError::malformed(path, "input position exceeds address space"))
    }
}

fn declarations_of(start: &ElementStart) -> Vec<(String, String)> {
    start
        .attributes
        .iter()
        .filter(|attribute| attribute.is_namespace_declaration())
        .map(|attribute| (attribute.name.clone(), attribute.value.clone()))
        .collect()
}

fn namespace_of(
    resolved: ResolveResult<'_>,
    path: &FieldPath,
) -> Result<Option<String>, ValidationError> {
    match resolved {
        ResolveResult::Bound(namespace) => {
            Ok(Some(std::str::from_utf8(namespace.as_ref())?.to_string()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ValidationError::malformed(
            path,
            format!(
                "undeclared namespace prefix {:?}",
                String::from_utf8_lossy(&prefix)
            ),
        )),
    }
}

/// Move namespace and schema-location declarations of the root element into the document.
fn take_root_declarations(
    mut start: ElementStart,
    document: &mut DocumentRoot,
    path: &FieldPath,
) -> Result<ElementStart, ValidationError> {
    let mut remaining = Vec::with_capacity(start.attributes.len());
    for attribute in start.attributes {
        if attribute.is_namespace_declaration() {
            document
                .xmlns_prefix_map
                .insert(attribute.local, attribute.value);
            continue;
        }
        if attribute.namespace.as_deref() != Some(XSI_NAMESPACE) {
            remaining.push(attribute);
            continue;
        }
        match attribute.local.as_str() {
            "schemaLocation" => {
                let mut tokens = attribute.value.split_whitespace();
                while let Some(namespace) = tokens.next() {
                    let location = tokens.next().ok_or_else(|| {
                        ValidationError::malformed(
                            &path.attribute(&attribute.name),
                            format!("namespace {:?} has no schema location", namespace),
                        )
                    })?;
                    document
                        .xsi_schema_location
                        .insert(namespace.to_string(), location.to_string());
                }
            }
            "noNamespaceSchemaLocation" => {
                document
                    .xsi_schema_location
                    .insert(String::new(), attribute.value);
            }
            _ => remaining.push(attribute),
        }
    }
    start.attributes = remaining;
    Ok(start)
}
