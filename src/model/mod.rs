//! Typed document model for HMxml reconstruction parameters.
//!
//! The tree mirrors the XML schema one-to-one:
//!
//! ```text
//! DocumentRoot
//! └── HMxml (ReconstructionParameters)
//!     └── FBP (FbpConfig)
//!         ├── DefaultXml, GPUDeviceNumber, LogFile
//!         ├── BeamlineUser
//!         ├── InputData ── Raw (RawFormat)
//!         ├── FlatDarkFields ── FlatField, DarkField
//!         ├── Preprocessing ── HighPeaks*, RingArtefacts, Intensity
//!         ├── Transform
//!         ├── Backprojection ── Filter, Tilt, CoordinateSystem, Circles, ROI
//!         └── OutputData
//! ```
//!
//! ## Field states
//!
//! - `xsd:int` fields (and the flat-field doubles) are [`Unsettable`]: "never set"
//!   and "set to 0" are different, and only set values are written.
//! - Strings, decimals and the dark-field doubles are plain `Option`s.
//! - Child nodes are `Option<Child>` owned by value. Moving a child to another
//!   parent takes it out of the first one (`Option::take`), so a node never has
//!   two parents.
//!
//! Required attributes (`done`, `info`, `comm`) are `Option<String>` as well; they
//! are only checked when a document is serialized or validated, so a tree can be
//! filled in any order.
//!
//! ## Example
//!
//! ```rust
//! use hmxml::model::{Roi, Unsettable};
//!
//! let mut roi = Roi::default();
//! roi.xmin.set(10);
//! roi.xmax.set(500);
//! assert!(roi.xmin.is_set());
//! assert!(!roi.ymin.is_set());
//! assert_eq!(roi.ymin.get(), 0);
//! assert_eq!(roi.xmax, Unsettable::with(500));
//! ```

mod backprojection;
mod data;
mod document;
mod error;
mod fbp;
mod fields;
mod leaf;
mod preprocessing;
mod provenance;
mod summary;
mod transform;
mod value;

#[cfg(test)]
mod tests;

pub use backprojection::{Backprojection, CircleBound, Circles, CoordinateSystem, Filter, Roi, Tilt};
pub use data::{InputData, OutputData, RawFormat};
pub use document::{DocumentRoot, MixedEntry};
pub use error::ModelError;
pub use fbp::{FbpConfig, ReconstructionParameters};
pub use fields::{DarkField, FlatDarkFields, FlatField};
pub use leaf::{DecimalSetting, DefaultXml, FlaggedSelector, ImageIndex, IntSetting, Selector};
pub use preprocessing::{HighPeaks, Intensity, Preprocessing, RingArtefacts};
pub use provenance::BeamlineUser;
pub use summary::{FieldSummary, ParameterSummary, RoiSummary};
pub use transform::Transform;
pub use value::{Decimal, DecimalError, Unsettable};
