//! # HMxml Validation Module
//!
//! Consistency checks over a parsed parameter document, run before a
//! reconstruction is launched. Parsing accepts incomplete documents, so this is
//! the place where every problem is listed at once instead of stopping at the
//! first one.
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: root element present, required attributes set, content
//!    outside the schema reported as a warning
//! 2. **Ranges**: ROI edges, input image range, centring circles and crop margins
//!
//! Selector values (`Type` and friends) are not interpreted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hmxml::registry::Registry;
//! use hmxml::validator::validate_file;
//!
//! let registry = Registry::default();
//! let report = validate_file("settings.xml", &registry)?;
//! println!("{}", report);
//! # Ok::<(), hmxml::codec::ValidationError>(())
//! ```

use log::debug;
use std::path::Path;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

use crate::codec::ValidationError;
use crate::model::DocumentRoot;
use crate::registry::Registry;

mod ranges;
mod report;
mod structure;


/// Run every check over an in-memory document
pub fn validate_document(document: &DocumentRoot, source: impl Into<String>) -> ValidationReport {
    let mut report = ValidationReport::new(source);

    // 1. Structure
    if structure::check_structure(document, &mut report) {
        // 2. Ranges
        ranges::check_ranges(document, &mut report);
    }

    debug!(
        "Validated {}: {} passed, {} warnings, {} failed",
        report.source,
        report.success_count(),
        report.warning_count(),
        report.failure_count()
    );
    report
}

/// Read, parse and validate a settings file.
///
/// I/O errors are returned; a document that does not parse is reported as a
/// failed check.
pub fn validate_file<P: AsRef<Path>>(
    path: P,
    registry: &Registry,
) -> Result<ValidationReport, ValidationError> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let input = std::fs::read(path)?;

    match registry.parse(&input) {
        Ok(document) => {
            let mut report = ValidationReport::new(source.clone());
            report.add_check(ValidationCheck::ok(structure::PARSE));
            report
                .checks
                .extend(validate_document(&document, source).checks);
            Ok(report)
        }
        Err(e) => {
            let mut report = ValidationReport::new(source);
            report.add_check(ValidationCheck::failed(structure::PARSE, e.to_string()));
            Ok(report)
        }
    }
}
