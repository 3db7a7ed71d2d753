//! Simple-content nodes: a text value plus `done`/`info` annotations.

use serde::{Deserialize, Serialize};

use super::{Decimal, Unsettable};
use crate::codec::xml_node;

/// An enumerated choice with its `info` annotation.
///
/// Every `Type` element is a selector: its value decides which sibling fields are
/// meaningful (a fixed value, a file, or a profile). The same shape serves
/// `BitsType`, `ByteOrder`, `Name`, `WindowName`, `Normalisation`, `Restrictions`,
/// `ProfileType`, `ScaleType`, `State` and the other enumerations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selector {
    /// Selected value
    pub value: Option<String>,

    /// Description of the allowed values (required)
    pub info: Option<String>,
}

impl Selector {
    /// Selector with both value and annotation set.
    pub fn new(value: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            info: Some(info.into()),
        }
    }
}

xml_node! {
    Selector => "Type_._type", create = create_selector {
        attributes { Required info = "info" }
        content value;
    }
}

/// An `xsd:int` setting with its `info` annotation (`NOD`, `Offset`, `Gap`,
/// `MemorySizeMin`, `FirstImageIndex`, `RotationAngleType`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntSetting {
    /// Value
    pub value: Unsettable<i32>,

    /// Description (required)
    pub info: Option<String>,
}

impl IntSetting {
    /// Setting with both value and annotation set.
    pub fn new(value: i32, info: impl Into<String>) -> Self {
        Self {
            value: Unsettable::with(value),
            info: Some(info.into()),
        }
    }
}

xml_node! {
    IntSetting => "NOD_._type", create = create_int_setting {
        attributes { Required info = "info" }
        content value;
    }
}

/// An `xsd:decimal` setting with its `info` annotation (`MemorySizeMax`, `NumSeries`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalSetting {
    /// Value
    pub value: Option<Decimal>,

    /// Description (required)
    pub info: Option<String>,
}

impl DecimalSetting {
    /// Setting with both value and annotation set.
    pub fn new(value: Decimal, info: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            info: Some(info.into()),
        }
    }
}

xml_node! {
    DecimalSetting => "MemorySizeMax_._type", create = create_decimal_setting {
        attributes { Required info = "info" }
        content value;
    }
}

/// Image index with a `done` flag (`ImageFirst`, `ImageLast`, `ImageStep`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageIndex {
    /// Index
    pub value: Unsettable<i32>,

    /// Set by the pipeline once the value has been applied (required)
    pub done: Option<String>,
}

impl ImageIndex {
    /// Index with both value and flag set.
    pub fn new(value: i32, done: impl Into<String>) -> Self {
        Self {
            value: Unsettable::with(value),
            done: Some(done.into()),
        }
    }
}

xml_node! {
    ImageIndex => "ImageFirst_._type", create = create_image_index {
        attributes { Required done = "done" }
        content value;
    }
}

/// Path of the default settings file this document was derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultXml {
    /// File path
    pub value: Option<String>,

    /// Processing flag (required)
    pub done: Option<String>,
}

xml_node! {
    DefaultXml => "DefaultXml_._type", create = create_default_xml {
        attributes { Required done = "done" }
        content value;
    }
}

/// A choice carrying both annotations (`Orientation`, `ClockwiseRotation`,
/// `PolarCartesianInterpolation`, output `Shape`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlaggedSelector {
    /// Selected value
    pub value: Option<String>,

    /// Processing flag (required)
    pub done: Option<String>,

    /// Description of the allowed values (required)
    pub info: Option<String>,
}

impl FlaggedSelector {
    /// Selector with value and both annotations set.
    pub fn new(value: impl Into<String>, done: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            done: Some(done.into()),
            info: Some(info.into()),
        }
    }
}

xml_node! {
    FlaggedSelector => "Orientation_._type", create = create_flagged_selector {
        attributes {
            Required done = "done",
            Required info = "info",
        }
        content value;
    }
}
