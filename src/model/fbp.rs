use serde::{Deserialize, Serialize};

use super::{
    Backprojection, BeamlineUser, Decimal, DefaultXml, FlatDarkFields, InputData, OutputData,
    Preprocessing, Transform, Unsettable,
};
use crate::codec::xml_node;
use crate::factory::NodeFactory;

/// The `HMxml` element: root of the reconstruction parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionParameters {
    /// Filtered back-projection settings
    pub fbp: Option<FbpConfig>,
}

impl ReconstructionParameters {
    /// Centre of rotation (`FBP/Backprojection/ImageCentre`), if set.
    pub fn image_centre(&self) -> Option<&Decimal> {
        self.fbp
            .as_ref()?
            .backprojection
            .as_ref()?
            .image_centre
            .as_ref()
    }

    /// Set the centre of rotation, creating `FBP` and `Backprojection` through
    /// `factory` when absent.
    ///
    /// Returns the previous value.
    pub fn set_image_centre(&mut self, centre: Decimal, factory: &dyn NodeFactory) -> Option<Decimal> {
        self.fbp
            .get_or_insert_with(|| factory.create_fbp_config())
            .backprojection
            .get_or_insert_with(|| factory.create_backprojection())
            .image_centre
            .replace(centre)
    }
}

xml_node! {
    ReconstructionParameters => "HMxml_._type", create = create_reconstruction_parameters {
        elements {
            node fbp = "FBP",
        }
    }
}

/// The `FBP` element: everything a filtered back-projection run needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbpConfig {
    /// Settings file this document was derived from
    pub default_xml: Option<DefaultXml>,

    /// GPU to run the reconstruction on
    pub gpu_device_number: Unsettable<i32>,

    /// Beamline and visit provenance
    pub beamline_user: Option<BeamlineUser>,

    /// Log file path
    pub log_file: Option<String>,

    /// Source projections
    pub input_data: Option<InputData>,

    /// Flat and dark field correction
    pub flat_dark_fields: Option<FlatDarkFields>,

    /// Defect and ring-artefact correction
    pub preprocessing: Option<Preprocessing>,

    /// Sinogram transforms applied before back-projection
    pub transform: Option<Transform>,

    /// Reconstruction geometry
    pub backprojection: Option<Backprojection>,

    /// Reconstructed slices
    pub output_data: Option<OutputData>,
}

xml_node! {
    FbpConfig => "FBP_._type", create = create_fbp_config {
        elements {
            node default_xml = "DefaultXml",
            scalar gpu_device_number = "GPUDeviceNumber",
            node beamline_user = "BeamlineUser",
            scalar log_file = "LogFile",
            node input_data = "InputData",
            node flat_dark_fields = "FlatDarkFields",
            node preprocessing = "Preprocessing",
            node transform = "Transform",
            node backprojection = "Backprojection",
            node output_data = "OutputData",
        }
    }
}
