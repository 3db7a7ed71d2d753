use super::*;
use crate::factory::{DefaultFactory, NodeFactory};

#[test]
fn test_unsettable_states() {
    let mut value: Unsettable<i32> = Unsettable::default();
    assert!(!value.is_set());
    assert_eq!(value.get(), 0);
    assert_eq!(value.value(), None);

    value.set(0);
    assert!(value.is_set());
    assert_eq!(value.get(), 0);
    assert_eq!(value.value(), Some(0));

    value.unset();
    assert!(!value.is_set());
    assert_eq!(Option::<i32>::from(value), None);
}

#[test]
fn test_unsettable_fields_are_independent() {
    let mut roi = Roi::default();
    roi.xmin.set(5);
    roi.ymax.set(0);

    assert!(roi.xmin.is_set());
    assert!(!roi.xmax.is_set());
    assert!(!roi.ymin.is_set());
    assert!(roi.ymax.is_set());
    assert_eq!(roi.bounds(), None);

    roi.xmax.set(9);
    roi.ymin.set(-1);
    assert_eq!(roi.bounds(), Some((5, 9, -1, 0)));
}

#[test]
fn test_decimal_parse() {
    assert_eq!(Decimal::parse(" 12.50 ").unwrap().as_str(), "12.50");
    assert!(Decimal::parse("-.5").is_ok());
    assert!(Decimal::parse("+7.").is_ok());

    for bad in ["", ".", "-", "1e5", "1.2.3", "NaN", "12a"] {
        assert_eq!(Decimal::parse(bad), Err(DecimalError(bad.to_string())));
    }
}

#[test]
fn test_decimal_numeric_equality() {
    let d = |s: &str| Decimal::parse(s).unwrap();
    assert_eq!(d("1.50"), d("1.5"));
    assert_eq!(d("-0"), d("0.000"));
    assert_eq!(d("+007"), d("7"));
    assert_ne!(d("1.5"), d("-1.5"));
    assert_ne!(d("10"), d("1"));
}

#[test]
fn test_decimal_conversions() {
    assert_eq!(Decimal::from(42).as_str(), "42");
    assert_eq!(Decimal::from_f64(1279.5).unwrap().as_str(), "1279.5");
    assert!(Decimal::from_f64(f64::NAN).is_none());
    assert_eq!("3.25".parse::<Decimal>().unwrap().to_f64(), 3.25);
    assert_eq!(Decimal::parse("0.1").unwrap().to_string(), "0.1");
}

#[test]
fn test_set_image_centre_creates_path() {
    let mut root = ReconstructionParameters::default();
    assert!(root.image_centre().is_none());

    let previous = root.set_image_centre(Decimal::parse("1279.5").unwrap(), &DefaultFactory);
    assert!(previous.is_none());
    assert_eq!(root.image_centre().unwrap().as_str(), "1279.5");

    let previous = root.set_image_centre(Decimal::from(1280), &DefaultFactory);
    assert_eq!(previous.unwrap().as_str(), "1279.5");
    assert_eq!(root.image_centre(), Some(&Decimal::from(1280)));
}

struct LoggingFactory;

impl NodeFactory for LoggingFactory {
    fn create_fbp_config(&self) -> FbpConfig {
        FbpConfig {
            log_file: Some("reconstruction.log".to_string()),
            ..FbpConfig::default()
        }
    }
}

#[test]
fn test_set_image_centre_uses_factory() {
    let mut root = ReconstructionParameters::default();
    root.set_image_centre(Decimal::from(1024), &LoggingFactory);

    let fbp = root.fbp.as_ref().unwrap();
    assert_eq!(fbp.log_file.as_deref(), Some("reconstruction.log"));
    assert_eq!(root.image_centre(), Some(&Decimal::from(1024)));

    // Existing nodes are kept.
    root.set_image_centre(Decimal::from(1025), &DefaultFactory);
    assert_eq!(root.fbp.as_ref().unwrap().log_file.as_deref(), Some("reconstruction.log"));
}

#[test]
fn test_moving_a_child_detaches_it() {
    let mut first = Backprojection {
        roi: Some(Roi {
            xmin: Unsettable::with(3),
            ..Roi::default()
        }),
        ..Backprojection::default()
    };
    let mut second = Backprojection::default();

    second.roi = first.roi.take();
    assert!(first.roi.is_none());
    assert_eq!(second.roi.as_ref().unwrap().xmin.get(), 3);

    let replaced = second.roi.replace(Roi::default());
    assert_eq!(replaced.unwrap().xmin.get(), 3);
    assert!(!second.roi.as_ref().unwrap().xmin.is_set());
}

#[test]
fn test_document_root_attach_and_detach() {
    let mut document = DocumentRoot::new();
    assert!(document.set_hm_xml(ReconstructionParameters::default()).is_none());
    assert!(document.set_hm_xml(ReconstructionParameters::default()).is_some());
    assert!(document.take_hm_xml().is_some());
    assert!(document.hm_xml.is_none());
    assert_eq!(document.missing_required().len(), 1);
}

#[test]
fn test_missing_required_in_schema_order() {
    let fbp = FbpConfig {
        default_xml: Some(DefaultXml::default()),
        input_data: Some(InputData {
            nod: Some(IntSetting::default()),
            raw: Some(RawFormat::default()),
            ..InputData::default()
        }),
        backprojection: Some(Backprojection {
            tilt: Some(Tilt {
                ty: Some(Selector::default()),
                ..Tilt::default()
            }),
            ..Backprojection::default()
        }),
        ..FbpConfig::default()
    };
    let document = DocumentRoot::with_root(ReconstructionParameters { fbp: Some(fbp) });

    let missing: Vec<String> = document
        .missing_required()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(
        missing,
        vec![
            "HMxml/FBP/DefaultXml/@done",
            "HMxml/FBP/InputData/NOD/@info",
            "HMxml/FBP/InputData/Raw/@done",
            "HMxml/FBP/Backprojection/Tilt/@done",
            "HMxml/FBP/Backprojection/Tilt/Type/@info",
        ]
    );
}

#[test]
fn test_transform_crop_defaults() {
    let transform = Transform {
        crop_top: Unsettable::with(4),
        crop_right: Unsettable::with(2),
        ..Transform::default()
    };
    assert_eq!(transform.crop(), (4, 0, 0, 2));
}

#[test]
fn test_summary() {
    let flat = FlatField {
        ty: Some(Selector::new("UserDefined", "UserDefined or Row")),
        value_before: Unsettable::with(1.0),
        file_before: Some("flat_0.tif".to_string()),
        ..FlatField::default()
    };
    let mut root = ReconstructionParameters {
        fbp: Some(FbpConfig {
            flat_dark_fields: Some(FlatDarkFields {
                flat_field: Some(flat),
                dark_field: None,
            }),
            preprocessing: Some(Preprocessing {
                ring_artefacts: Some(RingArtefacts {
                    ty: Some(Selector::new("AML", "No, Column, AML")),
                    num_series: Some(DecimalSetting::new(Decimal::from(1), "series")),
                    ..RingArtefacts::default()
                }),
                ..Preprocessing::default()
            }),
            ..FbpConfig::default()
        }),
    };
    root.set_image_centre(Decimal::parse("1279.5").unwrap(), &DefaultFactory);
    let document = DocumentRoot::with_root(root);

    let summary = document.summary();
    assert_eq!(summary.image_centre, Some(Decimal::parse("1279.5").unwrap()));
    assert_eq!(summary.ring_artefacts.as_deref(), Some("AML"));
    assert_eq!(summary.num_series, Some(Decimal::from(1)));
    let flat = summary.flat_field.as_ref().unwrap();
    assert_eq!(flat.ty.as_deref(), Some("UserDefined"));
    assert_eq!(flat.value_before, Some(1.0));
    assert_eq!(flat.value_after, None);
    assert!(summary.dark_field.is_none());
    assert!(summary.roi.is_none());

    let text = summary.to_string();
    assert!(text.contains("Centre of rotation: 1279.5"));
    assert!(text.contains("Ring artefacts:     AML (series 1)"));
    assert!(text.contains("ROI:                -"));
}

#[test]
fn test_empty_summary() {
    assert_eq!(DocumentRoot::new().summary(), ParameterSummary::default());
}

#[test]
fn test_json_round_trip() {
    let mut document = DocumentRoot::with_root(ReconstructionParameters::default());
    document
        .hm_xml
        .as_mut()
        .unwrap()
        .set_image_centre(Decimal::parse("1279.50").unwrap(), &DefaultFactory);
    document.mixed.push(MixedEntry::Comment(" generated ".to_string()));
    document.root_index = 1;

    let json = document.to_json().unwrap();
    assert!(json.contains(r#""image_centre":"1279.50""#));
    assert!(json.contains(r#"{"kind":"comment","value":" generated "}"#));

    let restored = DocumentRoot::from_json(&json).unwrap();
    assert_eq!(restored, document);
}

#[test]
fn test_json_rejects_invalid_decimal() {
    let json = r#"{"hm_xml":{"fbp":{"backprojection":{"image_centre":"centre"}}}}"#;
    assert!(matches!(
        DocumentRoot::from_json(json),
        Err(ModelError::JsonError(_))
    ));
}

#[test]
fn test_unsettable_json_is_plain_value() {
    let roi = Roi {
        xmin: Unsettable::with(10),
        ..Roi::default()
    };
    let json = serde_json::to_value(&roi).unwrap();
    assert_eq!(json["xmin"], 10);
    assert!(json["xmax"].is_null());
}

#[test]
fn test_mixed_entry_parent() {
    let nested = MixedEntry::Element {
        parent: Some("HMxml/FBP".to_string()),
        name: "Extra".to_string(),
        raw: "<Extra/>".to_string(),
    };
    assert_eq!(nested.parent(), Some("HMxml/FBP"));
    assert_eq!(MixedEntry::Text("x".to_string()).parent(), None);

    let document = DocumentRoot {
        mixed: vec![nested, MixedEntry::Comment("c".to_string())],
        ..DocumentRoot::default()
    };
    assert_eq!(document.document_entries().count(), 1);
    assert_eq!(document.unknown_elements().count(), 1);
}
