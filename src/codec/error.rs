use super::FieldPath;

/// Errors that can occur while reading or writing an HMxml document
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required field has no value at serialization time
    #[error("{path}: required field is not set")]
    UnsetRequiredField {
        /// Schema path of the missing field
        path: FieldPath,
    },

    /// Text content cannot be converted to the field's declared type
    #[error("{path}: cannot convert {value:?} to {expected}")]
    TypeCoercion {
        /// Schema path of the offending field
        path: FieldPath,
        /// The text found in the document
        value: String,
        /// XSD type the field is declared with
        expected: &'static str,
    },

    /// Element outside the schema (strict mode only)
    #[error("{path}: unknown element <{name}>")]
    UnknownElement {
        /// Schema path of the enclosing node
        path: FieldPath,
        /// Qualified name as written in the document
        name: String,
    },

    /// Attribute outside the schema (strict mode only)
    #[error("{path}: unknown attribute {name:?}")]
    UnknownAttribute {
        /// Schema path of the element carrying the attribute
        path: FieldPath,
        /// Qualified name as written in the document
        name: String,
    },

    /// A single-valued slot received a second child
    #[error("{path}: element occurs more than once in a single-valued slot")]
    ContainmentConflict {
        /// Schema path of the repeated element
        path: FieldPath,
    },

    /// Document structure does not fit the schema
    #[error("{path}: {message}")]
    Malformed {
        /// Schema path where the problem was found
        path: FieldPath,
        /// Description of the problem
        message: String,
    },

    /// Error from the XML engine
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 encoding error in names or text
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ValidationError {
    /// Schema path the error refers to, when it has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::UnsetRequiredField { path }
            | Self::TypeCoercion { path, .. }
            | Self::UnknownElement { path, .. }
            | Self::UnknownAttribute { path, .. }
            | Self::ContainmentConflict { path }
            | Self::Malformed { path, .. } => Some(path),
            Self::Xml(_) | Self::Io(_) | Self::Utf8(_) => None,
        }
    }

    pub(crate) fn malformed(path: &FieldPath, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.clone(),
            message: message.into(),
        }
    }
}
