use super::{ValidationCheck, ValidationReport};
use crate::model::{CircleBound, DocumentRoot, ImageIndex, InputData, Roi, Transform};

pub(super) const ROI: &str = "ROI bounds";
pub(super) const IMAGES: &str = "Image range";
pub(super) const CIRCLES: &str = "Centring circles";
pub(super) const CROP: &str = "Crop margins";

/// Sections that are absent from the document are not checked.
pub(super) fn check_ranges(document: &DocumentRoot, report: &mut ValidationReport) {
    let Some(fbp) = document.hm_xml.as_ref().and_then(|root| root.fbp.as_ref()) else {
        return;
    };
    let backprojection = fbp.backprojection.as_ref();

    if let Some(roi) = backprojection.and_then(|b| b.roi.as_ref()) {
        report.add_check(check_roi(roi));
    }
    if let Some(input) = fbp.input_data.as_ref() {
        report.add_check(check_images(input));
    }
    if let Some(circles) = backprojection.and_then(|b| b.circles.as_ref()) {
        report.add_check(check_circles(
            circles.value_min.as_ref(),
            circles.value_max.as_ref(),
            circles.value_step.as_ref(),
        ));
    }
    if let Some(transform) = fbp.transform.as_ref() {
        report.add_check(check_crop(transform));
    }
}

fn result(name: &str, problems: Vec<String>) -> ValidationCheck {
    if problems.is_empty() {
        ValidationCheck::ok(name)
    } else {
        ValidationCheck::failed(name, problems.join("; "))
    }
}

fn ordered(problems: &mut Vec<String>, label: &str, low: Option<i32>, high: Option<i32>) {
    if let (Some(low), Some(high)) = (low, high) {
        if low > high {
            problems.push(format!("{}: min {} > max {}", label, low, high));
        }
    }
}

fn positive(problems: &mut Vec<String>, label: &str, value: Option<i32>) {
    if let Some(value) = value {
        if value <= 0 {
            problems.push(format!("{} must be positive, got {}", label, value));
        }
    }
}

fn check_roi(roi: &Roi) -> ValidationCheck {
    let mut problems = Vec::new();
    ordered(&mut problems, "X", roi.xmin.value(), roi.xmax.value());
    ordered(&mut problems, "Y", roi.ymin.value(), roi.ymax.value());
    positive(&mut problems, "OutputWidth", roi.output_width.value());
    result(ROI, problems)
}

fn index(slot: &Option<ImageIndex>) -> Option<i32> {
    slot.as_ref().and_then(|i| i.value.value())
}

fn check_images(input: &InputData) -> ValidationCheck {
    let mut problems = Vec::new();
    ordered(
        &mut problems,
        "ImageFirst/ImageLast",
        index(&input.image_first),
        index(&input.image_last),
    );
    positive(&mut problems, "ImageStep", index(&input.image_step));
    ordered(
        &mut problems,
        "FileFirst/FileLast",
        input.file_first.value(),
        input.file_last.value(),
    );
    result(IMAGES, problems)
}

fn check_circles(
    min: Option<&CircleBound>,
    max: Option<&CircleBound>,
    step: Option<&CircleBound>,
) -> ValidationCheck {
    let percent = |b: Option<&CircleBound>| b.and_then(|b| b.percent.value());
    let pixel = |b: Option<&CircleBound>| b.and_then(|b| b.pixel.value());

    let mut problems = Vec::new();
    ordered(&mut problems, "Percent", percent(min), percent(max));
    ordered(&mut problems, "Pixel", pixel(min), pixel(max));
    positive(&mut problems, "ValueStep/Percent", percent(step));
    positive(&mut problems, "ValueStep/Pixel", pixel(step));
    result(CIRCLES, problems)
}

fn check_crop(transform: &Transform) -> ValidationCheck {
    let margins = [
        ("CropTop", &transform.crop_top),
        ("CropBottom", &transform.crop_bottom),
        ("CropLeft", &transform.crop_left),
        ("CropRight", &transform.crop_right),
    ];
    let problems = margins
        .iter()
        .filter_map(|(label, margin)| match margin.value() {
            Some(value) if value < 0 => Some(format!("{} is negative ({})", label, value)),
            _ => None,
        })
        .collect();
    result(CROP, problems)
}
