//! Condensed view of the values operators check before a reconstruction.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DarkField, Decimal, DocumentRoot, FlatField, Roi};

/// Correction values of one flat or dark field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Selected correction source
    pub ty: Option<String>,
    /// Fixed value before the scan
    pub value_before: Option<f64>,
    /// Fixed value after the scan
    pub value_after: Option<f64>,
    /// Image taken before the scan
    pub file_before: Option<String>,
    /// Image taken after the scan
    pub file_after: Option<String>,
}

impl From<&FlatField> for FieldSummary {
    fn from(field: &FlatField) -> Self {
        Self {
            ty: field.ty.as_ref().and_then(|t| t.value.clone()),
            value_before: field.value_before.value(),
            value_after: field.value_after.value(),
            file_before: field.file_before.clone(),
            file_after: field.file_after.clone(),
        }
    }
}

impl From<&DarkField> for FieldSummary {
    fn from(field: &DarkField) -> Self {
        Self {
            ty: field.ty.as_ref().and_then(|t| t.value.clone()),
            value_before: field.value_before,
            value_after: field.value_after,
            file_before: field.file_before.clone(),
            file_after: field.file_after.clone(),
        }
    }
}

/// Region of interest as shown to the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiSummary {
    /// Selected region type
    pub ty: Option<String>,
    /// Left edge
    pub xmin: Option<i32>,
    /// Right edge
    pub xmax: Option<i32>,
    /// Top edge
    pub ymin: Option<i32>,
    /// Bottom edge
    pub ymax: Option<i32>,
}

impl From<&Roi> for RoiSummary {
    fn from(roi: &Roi) -> Self {
        Self {
            ty: roi.ty.as_ref().and_then(|t| t.value.clone()),
            xmin: roi.xmin.value(),
            xmax: roi.xmax.value(),
            ymin: roi.ymin.value(),
            ymax: roi.ymax.value(),
        }
    }
}

/// Key reconstruction parameters of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSummary {
    /// Centre of rotation
    pub image_centre: Option<Decimal>,
    /// Ring artefact suppression method
    pub ring_artefacts: Option<String>,
    /// Ring artefact series count
    pub num_series: Option<Decimal>,
    /// Flat-field correction
    pub flat_field: Option<FieldSummary>,
    /// Dark-field correction
    pub dark_field: Option<FieldSummary>,
    /// Region of interest
    pub roi: Option<RoiSummary>,
}

impl DocumentRoot {
    /// Collect the key parameters. Missing branches are left as `None`.
    pub fn summary(&self) -> ParameterSummary {
        let Some(fbp) = self.hm_xml.as_ref().and_then(|root| root.fbp.as_ref()) else {
            return ParameterSummary::default();
        };
        let backprojection = fbp.backprojection.as_ref();
        let rings = fbp
            .preprocessing
            .as_ref()
            .and_then(|p| p.ring_artefacts.as_ref());
        let fields = fbp.flat_dark_fields.as_ref();

        ParameterSummary {
            image_centre: backprojection.and_then(|b| b.image_centre.clone()),
            ring_artefacts: rings
                .and_then(|r| r.ty.as_ref())
                .and_then(|t| t.value.clone()),
            num_series: rings
                .and_then(|r| r.num_series.as_ref())
                .and_then(|n| n.value.clone()),
            flat_field: fields
                .and_then(|f| f.flat_field.as_ref())
                .map(FieldSummary::from),
            dark_field: fields
                .and_then(|f| f.dark_field.as_ref())
                .map(FieldSummary::from),
            roi: backprojection
                .and_then(|b| b.roi.as_ref())
                .map(RoiSummary::from),
        }
    }
}

fn show<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for ParameterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Centre of rotation: {}", show(&self.image_centre))?;
        writeln!(
            f,
            "Ring artefacts:     {} (series {})",
            show(&self.ring_artefacts),
            show(&self.num_series)
        )?;
        for (label, field) in [("Flat field", &self.flat_field), ("Dark field", &self.dark_field)] {
            match field {
                Some(field) => writeln!(
                    f,
                    "{:<20}{} (before {}, after {}, files {} / {})",
                    format!("{}:", label),
                    show(&field.ty),
                    show(&field.value_before),
                    show(&field.value_after),
                    show(&field.file_before),
                    show(&field.file_after)
                )?,
                None => writeln!(f, "{:<20}-", format!("{}:", label))?,
            }
        }
        match &self.roi {
            Some(roi) => write!(
                f,
                "ROI:                {} x [{}, {}] y [{}, {}]",
                show(&roi.ty),
                show(&roi.xmin),
                show(&roi.xmax),
                show(&roi.ymin),
                show(&roi.ymax)
            ),
            None => write!(f, "ROI:                -"),
        }
    }
}
