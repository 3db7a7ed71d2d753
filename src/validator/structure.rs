use log::warn;

use super::{ValidationCheck, ValidationReport};
use crate::codec::ROOT_ELEMENT;
use crate::model::{DocumentRoot, MixedEntry};

pub(super) const PARSE: &str = "Document parses";
pub(super) const ROOT: &str = "Root element";
pub(super) const REQUIRED: &str = "Required attributes";
pub(super) const UNKNOWN: &str = "Unknown content";

/// Returns `false` when there is no tree to check any further.
pub(super) fn check_structure(document: &DocumentRoot, report: &mut ValidationReport) -> bool {
    check_unknown_content(document, report);

    if document.hm_xml.is_none() {
        report.add_check(ValidationCheck::failed(
            ROOT,
            format!("document has no {} element", ROOT_ELEMENT),
        ));
        return false;
    }
    report.add_check(ValidationCheck::ok(ROOT));

    let missing = document.missing_required();
    if missing.is_empty() {
        report.add_check(ValidationCheck::ok(REQUIRED));
    } else {
        let paths: Vec<&str> = missing.iter().map(|p| p.as_str()).collect();
        report.add_check(ValidationCheck::failed(
            REQUIRED,
            format!("{} unset: {}", missing.len(), paths.join(", ")),
        ));
    }
    true
}

fn check_unknown_content(document: &DocumentRoot, report: &mut ValidationReport) {
    let unknown: Vec<String> = document
        .unknown_elements()
        .filter_map(|entry| match entry {
            MixedEntry::Element { parent, name, .. } => Some(match parent {
                Some(parent) => format!("{}/{}", parent, name),
                None => name.clone(),
            }),
            _ => None,
        })
        .collect();

    if unknown.is_empty() {
        report.add_check(ValidationCheck::ok(UNKNOWN));
    } else {
        warn!("{} element(s) outside the schema", unknown.len());
        report.add_check(ValidationCheck::warning(
            UNKNOWN,
            format!("preserved without interpretation: {}", unknown.join(", ")),
        ));
    }
}
