//! The explicit codec context: one node factory plus one codec configuration.
//!
//! A `Registry` is built once at start-up and passed by reference to every parse
//! and serialize call. There is no global instance.

use log::info;
use std::fmt;
use std::path::Path;

use crate::codec::{self, CodecConfig, ValidationError};
use crate::factory::{DefaultFactory, NodeFactory};
use crate::model::DocumentRoot;

/// Node factory and codec settings used for parsing and serialization
pub struct Registry {
    factory: Box<dyn NodeFactory + Send + Sync>,
    config: CodecConfig,
}

impl Registry {
    /// Registry with the default factory.
    pub fn new(config: CodecConfig) -> Self {
        Self::with_factory(DefaultFactory, config)
    }

    /// Registry with a custom factory.
    pub fn with_factory(factory: impl NodeFactory + Send + Sync + 'static, config: CodecConfig) -> Self {
        Self {
            factory: Box::new(factory),
            config,
        }
    }

    /// The node factory.
    pub fn factory(&self) -> &dyn NodeFactory {
        self.factory.as_ref()
    }

    /// The codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Empty document, with the target namespace bound as default namespace when one is configured.
    pub fn new_document(&self) -> DocumentRoot {
        let mut document = self.factory.create_document_root();
        if let Some(namespace) = &self.config.target_namespace {
            document
                .xmlns_prefix_map
                .insert(String::new(), namespace.clone());
        }
        document
    }

    /// Parse XML bytes.
    pub fn parse(&self, input: &[u8]) -> Result<DocumentRoot, ValidationError> {
        codec::parse(input, self)
    }

    /// Parse an XML string.
    pub fn parse_str(&self, input: &str) -> Result<DocumentRoot, ValidationError> {
        codec::parse(input.as_bytes(), self)
    }

    /// Serialize to XML bytes.
    pub fn serialize(&self, document: &DocumentRoot) -> Result<Vec<u8>, ValidationError> {
        codec::serialize(document, self)
    }

    /// Serialize to an XML string.
    pub fn serialize_to_string(&self, document: &DocumentRoot) -> Result<String, ValidationError> {
        let bytes = self.serialize(document)?;
        String::from_utf8(bytes).map_err(|e| ValidationError::Utf8(e.utf8_error()))
    }

    /// Read and parse a settings file.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentRoot, ValidationError> {
        let path = path.as_ref();
        let input = std::fs::read(path)?;
        let document = self.parse(&input)?;
        info!("Read {}", path.display());
        Ok(document)
    }

    /// Serialize and write a settings file.
    pub fn write_file<P: AsRef<Path>>(
        &self,
        document: &DocumentRoot,
        path: P,
    ) -> Result<(), ValidationError> {
        let path = path.as_ref();
        let output = self.serialize(document)?;
        std::fs::write(path, &output)?;
        info!("Wrote {} ({} bytes)", path.display(), output.len());
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
