use serde::{Deserialize, Serialize};

use super::Selector;
use crate::codec::xml_node;

/// Beamline, visit and folder layout of the experiment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamlineUser {
    /// Where the folder values come from
    pub ty: Option<Selector>,

    /// Beamline identifier, e.g. `i12`
    pub beamline_name: Option<String>,

    /// Year of the visit
    pub year: Option<String>,

    /// Month of the visit
    pub month: Option<String>,

    /// Date of the visit
    pub date: Option<String>,

    /// Visit number, e.g. `ee1234-1`
    pub visit_number: Option<String>,

    /// Folder holding the raw data
    pub input_data_folder: Option<String>,

    /// Scan sub-folder of the raw data
    pub input_scan_folder: Option<String>,

    /// Folder receiving the reconstruction
    pub output_data_folder: Option<String>,

    /// Scan sub-folder of the reconstruction
    pub output_scan_folder: Option<String>,

    /// Processing flag (required)
    pub done: Option<String>,
}

xml_node! {
    BeamlineUser => "BeamlineUser_._type", create = create_beamline_user {
        attributes { Required done = "done" }
        elements {
            node ty = "Type",
            scalar beamline_name = "BeamlineName",
            scalar year = "Year",
            scalar month = "Month",
            scalar date = "Date",
            scalar visit_number = "VisitNumber",
            scalar input_data_folder = "InputDataFolder",
            scalar input_scan_folder = "InputScanFolder",
            scalar output_data_folder = "OutputDataFolder",
            scalar output_scan_folder = "OutputScanFolder",
        }
    }
}
