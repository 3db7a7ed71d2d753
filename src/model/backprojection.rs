//! Reconstruction geometry.

use serde::{Deserialize, Serialize};

use super::{Decimal, FlaggedSelector, Selector, Unsettable};
use crate::codec::xml_node;

/// Back-projection settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backprojection {
    /// Reconstruction filter
    pub filter: Option<Filter>,

    /// Centre of rotation in pixels
    pub image_centre: Option<Decimal>,

    /// Rotation direction
    pub clockwise_rotation: Option<FlaggedSelector>,

    /// Rotation axis tilt
    pub tilt: Option<Tilt>,

    /// Slice coordinate system
    pub coordinate_system: Option<CoordinateSystem>,

    /// Search range for centring circles
    pub circles: Option<Circles>,

    /// Region of interest
    pub roi: Option<Roi>,

    /// Polar to Cartesian interpolation
    pub polar_cartesian_interpolation: Option<FlaggedSelector>,
}

xml_node! {
    Backprojection => "Backprojection_._type", create = create_backprojection {
        elements {
            node filter = "Filter",
            scalar image_centre = "ImageCentre",
            node clockwise_rotation = "ClockwiseRotation",
            node tilt = "Tilt",
            node coordinate_system = "CoordinateSystem",
            node circles = "Circles",
            node roi = "ROI",
            node polar_cartesian_interpolation = "PolarCartesianInterpolation",
        }
    }
}

/// Reconstruction filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    /// Filter family
    pub ty: Option<Selector>,

    /// Filter name
    pub name: Option<Selector>,

    /// Relative bandwidth
    pub bandwidth: Option<Decimal>,

    /// Apodisation window
    pub window_name: Option<Selector>,

    /// Normalisation mode
    pub normalisation: Option<Selector>,

    /// Detector pixel size
    pub pixel_size: Option<Decimal>,
}

xml_node! {
    Filter => "Filter_._type", create = create_filter {
        elements {
            node ty = "Type",
            node name = "Name",
            scalar bandwidth = "Bandwidth",
            node window_name = "WindowName",
            node normalisation = "Normalisation",
            scalar pixel_size = "PixelSize",
        }
    }
}

/// Rotation axis tilt correction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tilt {
    /// Tilt mode
    pub ty: Option<Selector>,

    /// Tilt about the X axis
    pub x_tilt: Option<String>,

    /// Tilt about the Z axis
    pub z_tilt: Option<String>,

    /// Processing flag (required)
    pub done: Option<String>,
}

xml_node! {
    Tilt => "Tilt_._type", create = create_tilt {
        attributes { Required done = "done" }
        elements {
            node ty = "Type",
            scalar x_tilt = "X-tilt",
            scalar z_tilt = "Z-tilt",
        }
    }
}

/// Slice coordinate system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateSystem {
    /// Coordinate system
    pub ty: Option<Selector>,

    /// Slice selection
    pub slice: Option<String>,

    /// Processing flag (required)
    pub done: Option<String>,
}

xml_node! {
    CoordinateSystem => "CoordinateSystem_._type", create = create_coordinate_system {
        attributes { Required done = "done" }
        elements {
            node ty = "Type",
            scalar slice = "Slice",
        }
    }
}

/// Search range for the centring circles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Circles {
    /// Lower bound
    pub value_min: Option<CircleBound>,

    /// Upper bound
    pub value_max: Option<CircleBound>,

    /// Increment
    pub value_step: Option<CircleBound>,

    /// Comment (required)
    pub comm: Option<String>,
}

xml_node! {
    Circles => "Circles_._type", create = create_circles {
        attributes { Required comm = "comm" }
        elements {
            node value_min = "ValueMin",
            node value_max = "ValueMax",
            node value_step = "ValueStep",
        }
    }
}

/// One bound of the circle range, in percent or in pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleBound {
    /// Whether `percent` or `pixel` applies
    pub ty: Option<Selector>,

    /// Bound relative to the image width
    pub percent: Unsettable<i32>,

    /// Bound in pixels
    pub pixel: Unsettable<i32>,
}

xml_node! {
    CircleBound => "ValueMin_._type", create = create_circle_bound {
        elements {
            node ty = "Type",
            scalar percent = "Percent",
            scalar pixel = "Pixel",
        }
    }
}

/// Region of interest and output reshaping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roi {
    /// Whether the region is the full slice or a rectangle
    pub ty: Option<Selector>,

    /// Left edge
    pub xmin: Unsettable<i32>,

    /// Right edge
    pub xmax: Unsettable<i32>,

    /// Top edge
    pub ymin: Unsettable<i32>,

    /// Bottom edge
    pub ymax: Unsettable<i32>,

    /// How the output width is chosen
    pub output_width_type: Option<Selector>,

    /// Output width in pixels
    pub output_width: Unsettable<i32>,

    /// Rotation of the region
    pub angle: Option<Decimal>,
}

impl Roi {
    /// Rectangle `(xmin, xmax, ymin, ymax)` when all four edges are set.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        Some((
            self.xmin.value()?,
            self.xmax.value()?,
            self.ymin.value()?,
            self.ymax.value()?,
        ))
    }
}

xml_node! {
    Roi => "ROI_._type", create = create_roi {
        elements {
            node ty = "Type",
            scalar xmin = "Xmin",
            scalar xmax = "Xmax",
            scalar ymin = "Ymin",
            scalar ymax = "Ymax",
            node output_width_type = "OutputWidthType",
            scalar output_width = "OutputWidth",
            scalar angle = "Angle",
        }
    }
}
