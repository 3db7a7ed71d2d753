use serde::{Deserialize, Serialize};

use super::{Decimal, DecimalSetting, Selector, Unsettable};
use crate::codec::xml_node;

/// Correction chain applied to projections and sinograms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preprocessing {
    /// Outlier removal on raw projections
    pub high_peaks_before: Option<HighPeaks>,

    /// Ring artefact suppression
    pub ring_artefacts: Option<RingArtefacts>,

    /// Intensity normalisation
    pub intensity: Option<Intensity>,

    /// Outlier removal along sinogram rows
    pub high_peaks_after_rows: Option<HighPeaks>,

    /// Outlier removal along sinogram columns
    pub high_peaks_after_columns: Option<HighPeaks>,
}

xml_node! {
    Preprocessing => "Preprocessing_._type", create = create_preprocessing {
        elements {
            node high_peaks_before = "HighPeaksBefore",
            node ring_artefacts = "RingArtefacts",
            node intensity = "Intensity",
            node high_peaks_after_rows = "HighPeaksAfterRows",
            node high_peaks_after_columns = "HighPeaksAfterColumns",
        }
    }
}

/// Outlier (zinger) filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighPeaks {
    /// Whether the filter is applied
    pub ty: Option<Selector>,

    /// Width of the neighbourhood in pixels
    pub number_pixels: Unsettable<i32>,

    /// Relative jump treated as an outlier
    pub jump: Option<Decimal>,
}

xml_node! {
    HighPeaks => "HighPeaksBefore_._type", create = create_high_peaks {
        elements {
            node ty = "Type",
            scalar number_pixels = "NumberPixels",
            scalar jump = "Jump",
        }
    }
}

/// Ring artefact suppression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingArtefacts {
    /// Suppression method
    pub ty: Option<Selector>,

    /// Method parameter N
    pub parameter_n: Option<Decimal>,

    /// Method parameter R
    pub parameter_r: Option<Decimal>,

    /// Number of series
    pub num_series: Option<DecimalSetting>,
}

xml_node! {
    RingArtefacts => "RingArtefacts_._type", create = create_ring_artefacts {
        elements {
            node ty = "Type",
            scalar parameter_n = "ParameterN",
            scalar parameter_r = "ParameterR",
            node num_series = "NumSeries",
        }
    }
}

/// Intensity normalisation from reference columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intensity {
    /// Normalisation mode
    pub ty: Option<Selector>,

    /// Left reference column
    pub column_left: Option<String>,

    /// Right reference column
    pub column_right: Option<String>,

    /// Left zero level
    pub zero_left: Unsettable<i32>,

    /// Right zero level
    pub zero_right: Unsettable<i32>,
}

xml_node! {
    Intensity => "Intensity_._type", create = create_intensity {
        elements {
            node ty = "Type",
            scalar column_left = "ColumnLeft",
            scalar column_right = "ColumnRight",
            scalar zero_left = "ZeroLeft",
            scalar zero_right = "ZeroRight",
        }
    }
}
