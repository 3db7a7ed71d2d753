//! Flat-field and dark-field correction.

use serde::{Deserialize, Serialize};

use super::{Selector, Unsettable};
use crate::codec::xml_node;

/// Flat and dark field settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatDarkFields {
    /// Flat (bright) field
    pub flat_field: Option<FlatField>,

    /// Dark field
    pub dark_field: Option<DarkField>,
}

xml_node! {
    FlatDarkFields => "FlatDarkFields_._type", create = create_flat_dark_fields {
        elements {
            node flat_field = "FlatField",
            node dark_field = "DarkField",
        }
    }
}

/// Flat-field correction.
///
/// `ty` chooses between the fixed values and the before/after files; the profile
/// fields apply when a profile correction is selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatField {
    /// Source of the correction
    pub ty: Option<Selector>,

    /// Fixed value used before the scan
    pub value_before: Unsettable<f64>,

    /// Fixed value used after the scan
    pub value_after: Unsettable<f64>,

    /// Flat image taken before the scan
    pub file_before: Option<String>,

    /// Flat image taken after the scan
    pub file_after: Option<String>,

    /// Profile correction mode
    pub profile_type: Option<Selector>,

    /// Profile file
    pub file_profile: Option<String>,
}

xml_node! {
    FlatField => "FlatField_._type", create = create_flat_field {
        elements {
            node ty = "Type",
            scalar value_before = "ValueBefore",
            scalar value_after = "ValueAfter",
            scalar file_before = "FileBefore",
            scalar file_after = "FileAfter",
            node profile_type = "ProfileType",
            scalar file_profile = "FileProfile",
        }
    }
}

/// Dark-field correction. Same layout as [`FlatField`], but the values are
/// nullable rather than unsettable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DarkField {
    /// Source of the correction
    pub ty: Option<Selector>,

    /// Fixed value used before the scan
    pub value_before: Option<f64>,

    /// Fixed value used after the scan
    pub value_after: Option<f64>,

    /// Dark image taken before the scan
    pub file_before: Option<String>,

    /// Dark image taken after the scan
    pub file_after: Option<String>,

    /// Profile correction mode
    pub profile_type: Option<Selector>,

    /// Profile file
    pub file_profile: Option<String>,
}

xml_node! {
    DarkField => "DarkField_._type", create = create_dark_field {
        elements {
            node ty = "Type",
            scalar value_before = "ValueBefore",
            scalar value_after = "ValueAfter",
            scalar file_before = "FileBefore",
            scalar file_after = "FileAfter",
            node profile_type = "ProfileType",
            scalar file_profile = "FileProfile",
        }
    }
}
