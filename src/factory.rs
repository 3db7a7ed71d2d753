//! Abstract factory for document nodes.
//!
//! The codec never constructs nodes directly: every node is obtained from a
//! [`NodeFactory`] held by the [`Registry`](crate::registry::Registry). Each method
//! returns a fresh, empty node (all unsettable fields unset, all options `None`).
//! Hosting code can override individual methods to pre-populate nodes.

use crate::model::{
    Backprojection, BeamlineUser, CircleBound, Circles, CoordinateSystem, DarkField,
    DecimalSetting, DefaultXml, DocumentRoot, FbpConfig, Filter, FlaggedSelector, FlatDarkFields,
    FlatField, HighPeaks, ImageIndex, InputData, IntSetting, Intensity, OutputData, Preprocessing,
    RawFormat, ReconstructionParameters, RingArtefacts, Roi, Selector, Tilt, Transform,
};

/// One creation operation per node type
pub trait NodeFactory {
    /// Create an empty document envelope
    fn create_document_root(&self) -> DocumentRoot {
        DocumentRoot::default()
    }

    /// Create an empty `HMxml` node
    fn create_reconstruction_parameters(&self) -> ReconstructionParameters {
        ReconstructionParameters::default()
    }

    /// Create an empty `FBP` node
    fn create_fbp_config(&self) -> FbpConfig {
        FbpConfig::default()
    }

    /// Create an empty `BeamlineUser` node
    fn create_beamline_user(&self) -> BeamlineUser {
        BeamlineUser::default()
    }

    /// Create an empty `InputData` node
    fn create_input_data(&self) -> InputData {
        InputData::default()
    }

    /// Create an empty `Raw` node
    fn create_raw_format(&self) -> RawFormat {
        RawFormat::default()
    }

    /// Create an empty `OutputData` node
    fn create_output_data(&self) -> OutputData {
        OutputData::default()
    }

    /// Create an empty `FlatDarkFields` node
    fn create_flat_dark_fields(&self) -> FlatDarkFields {
        FlatDarkFields::default()
    }

    /// Create an empty `FlatField` node
    fn create_flat_field(&self) -> FlatField {
        FlatField::default()
    }

    /// Create an empty `DarkField` node
    fn create_dark_field(&self) -> DarkField {
        DarkField::default()
    }

    /// Create an empty `Preprocessing` node
    fn create_preprocessing(&self) -> Preprocessing {
        Preprocessing::default()
    }

    /// Create an empty `HighPeaksBefore`/`HighPeaksAfterRows`/`HighPeaksAfterColumns` node
    fn create_high_peaks(&self) -> HighPeaks {
        HighPeaks::default()
    }

    /// Create an empty `RingArtefacts` node
    fn create_ring_artefacts(&self) -> RingArtefacts {
        RingArtefacts::default()
    }

    /// Create an empty `Intensity` node
    fn create_intensity(&self) -> Intensity {
        Intensity::default()
    }

    /// Create an empty `Transform` node
    fn create_transform(&self) -> Transform {
        Transform::default()
    }

    /// Create an empty `Backprojection` node
    fn create_backprojection(&self) -> Backprojection {
        Backprojection::default()
    }

    /// Create an empty `Filter` node
    fn create_filter(&self) -> Filter {
        Filter::default()
    }

    /// Create an empty `Tilt` node
    fn create_tilt(&self) -> Tilt {
        Tilt::default()
    }

    /// Create an empty `CoordinateSystem` node
    fn create_coordinate_system(&self) -> CoordinateSystem {
        CoordinateSystem::default()
    }

    /// Create an empty `Circles` node
    fn create_circles(&self) -> Circles {
        Circles::default()
    }

    /// Create an empty `ValueMin`/`ValueMax`/`ValueStep` circle bound
    fn create_circle_bound(&self) -> CircleBound {
        CircleBound::default()
    }

    /// Create an empty `ROI` node
    fn create_roi(&self) -> Roi {
        Roi::default()
    }

    /// Create an empty selector (`Type` and the other enumerations)
    fn create_selector(&self) -> Selector {
        Selector::default()
    }

    /// Create an empty `info`-annotated int setting
    fn create_int_setting(&self) -> IntSetting {
        IntSetting::default()
    }

    /// Create an empty `info`-annotated decimal setting
    fn create_decimal_setting(&self) -> DecimalSetting {
        DecimalSetting::default()
    }

    /// Create an empty `ImageFirst`/`ImageLast`/`ImageStep` node
    fn create_image_index(&self) -> ImageIndex {
        ImageIndex::default()
    }

    /// Create an empty `DefaultXml` node
    fn create_default_xml(&self) -> DefaultXml {
        DefaultXml::default()
    }

    /// Create an empty selector carrying both `done` and `info`
    fn create_flagged_selector(&self) -> FlaggedSelector {
        FlaggedSelector::default()
    }
}

/// Factory returning default-constructed nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl NodeFactory for DefaultFactory {}
