use serde::{Deserialize, Serialize};

use super::{Decimal, IntSetting, Selector, Unsettable};
use crate::codec::xml_node;

/// Sinogram transforms applied before back-projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Projections missing from the scan
    pub missed_projections: Option<Selector>,

    /// How `missed_projections` is interpreted
    pub missed_projections_type: Option<Selector>,

    /// Rotation angle mode
    pub rotation_angle_type: Option<IntSetting>,

    /// Rotation angle
    pub rotation_angle: Unsettable<i32>,

    /// Whether the angular range includes both end points
    pub rotation_angle_end_points: Option<Selector>,

    /// Re-centring angle
    pub re_centre_angle: Option<Decimal>,

    /// Re-centring radius
    pub re_centre_radius: Option<Decimal>,

    /// Rows cropped from the top
    pub crop_top: Unsettable<i32>,

    /// Rows cropped from the bottom
    pub crop_bottom: Unsettable<i32>,

    /// Columns cropped from the left
    pub crop_left: Unsettable<i32>,

    /// Columns cropped from the right
    pub crop_right: Unsettable<i32>,

    /// Scaling mode
    pub scale_type: Option<Selector>,

    /// Scaled width
    pub scale_width: Unsettable<i32>,

    /// Scaled height
    pub scale_height: Unsettable<i32>,

    /// Extrapolation mode
    pub extrapolation_type: Option<Selector>,

    /// Pixels extrapolated at each edge
    pub extrapolation_pixels: Unsettable<i32>,

    /// Width of the extrapolation window
    pub extrapolation_width: Unsettable<i32>,

    /// Interpolation used when scaling
    pub interpolation: Option<Selector>,
}

impl Transform {
    /// Crop margins as `(top, bottom, left, right)`; unset margins read as zero.
    pub fn crop(&self) -> (i32, i32, i32, i32) {
        (
            self.crop_top.get(),
            self.crop_bottom.get(),
            self.crop_left.get(),
            self.crop_right.get(),
        )
    }
}

xml_node! {
    Transform => "Transform_._type", create = create_transform {
        elements {
            node missed_projections = "MissedProjections",
            node missed_projections_type = "MissedProjectionsType",
            node rotation_angle_type = "RotationAngleType",
            scalar rotation_angle = "RotationAngle",
            node rotation_angle_end_points = "RotationAngleEndPoints",
            scalar re_centre_angle = "ReCentreAngle",
            scalar re_centre_radius = "ReCentreRadius",
            scalar crop_top = "CropTop",
            scalar crop_bottom = "CropBottom",
            scalar crop_left = "CropLeft",
            scalar crop_right = "CropRight",
            node scale_type = "ScaleType",
            scalar scale_width = "ScaleWidth",
            scalar scale_height = "ScaleHeight",
            node extrapolation_type = "ExtrapolationType",
            scalar extrapolation_pixels = "ExtrapolationPixels",
            scalar extrapolation_width = "ExtrapolationWidth",
            node interpolation = "Interpolation",
        }
    }
}
