//! # HMxml - Tomography Reconstruction Parameters
//!
//! `hmxml` reads, edits and writes the HMxml parameter documents that drive
//! filtered back-projection reconstructions: input projections, flat/dark field
//! correction, preprocessing, sinogram transforms, back-projection geometry and
//! output slices.
//!
//! ## Key Features
//!
//! - **Typed Model**: one Rust struct per schema element, with unsettable integer
//!   fields that distinguish "never set" from "set to 0".
//!
//! - **Lossless Round Trip**: comments, processing instructions, namespace
//!   declarations, schema locations and elements outside the schema are kept and
//!   written back in place. Decimals keep their lexical form.
//!
//! - **Explicit Context**: node construction goes through a [`factory::NodeFactory`]
//!   held by a [`registry::Registry`]; there is no global state.
//!
//! - **Validation Report**: every missing required attribute and inconsistent
//!   range in one pass.
//!
//! ## Quick Start
//!
//! ```rust
//! use hmxml::prelude::*;
//!
//! let registry = Registry::default();
//! let xml = r#"<HMxml><FBP><Backprojection><ROI>
//!     <Xmin>10</Xmin><Xmax>500</Xmax>
//! </ROI></Backprojection></FBP></HMxml>"#;
//!
//! let mut document = registry.parse_str(xml)?;
//! let root = document.hm_xml.as_mut().unwrap();
//! root.set_image_centre(Decimal::parse("1279.5").unwrap(), registry.factory());
//!
//! let roi = root.fbp.as_ref().unwrap().backprojection.as_ref().unwrap().roi.as_ref().unwrap();
//! assert!(roi.xmin.is_set());
//! assert!(!roi.ymin.is_set());
//!
//! let output = registry.serialize_to_string(&document)?;
//! assert!(output.contains("<ImageCentre>1279.5</ImageCentre>"));
//! assert!(!output.contains("Ymin"));
//! # Ok::<(), hmxml::codec::ValidationError>(())
//! ```
//!
//! ## Modules
//!
//! - [`model`]: node structs, [`model::Unsettable`], [`model::Decimal`], [`model::DocumentRoot`]
//! - [`codec`]: XML mapping, parse and serialize, [`codec::ValidationError`]
//! - [`factory`]: node construction
//! - [`registry`]: factory plus codec configuration
//! - [`validator`]: document consistency report

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod factory;
pub mod model;
pub mod registry;
pub mod validator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{CodecConfig, FieldPath, ValidationError, XmlNode};
    pub use crate::factory::{DefaultFactory, NodeFactory};
    pub use crate::model::{
        Backprojection, BeamlineUser, DarkField, Decimal, DocumentRoot, FbpConfig, FlatDarkFields,
        FlatField, InputData, MixedEntry, OutputData, ParameterSummary, Preprocessing,
        ReconstructionParameters, Roi, Selector, Transform, Unsettable,
    };
    pub use crate::registry::Registry;
    pub use crate::validator::{validate_document, validate_file, ValidationReport};
}
