use super::*;
use crate::factory::NodeFactory;
use crate::model::{
    BeamlineUser, Circles, Decimal, DocumentRoot, FbpConfig, MixedEntry, ReconstructionParameters,
    Roi, Selector, Unsettable,
};

fn compact() -> CodecConfig {
    CodecConfig {
        indent: None,
        xml_declaration: false,
        ..CodecConfig::default()
    }
}

fn registry(config: CodecConfig) -> Registry {
    Registry::new(config)
}

fn write(document: &DocumentRoot) -> String {
    registry(compact()).serialize_to_string(document).unwrap()
}

fn roi_of(document: &DocumentRoot) -> &Roi {
    document
        .hm_xml
        .as_ref()
        .and_then(|r| r.fbp.as_ref())
        .and_then(|f| f.backprojection.as_ref())
        .and_then(|b| b.roi.as_ref())
        .unwrap()
}

const ROI_XML: &str = r#"<HMxml><FBP><Backprojection><ROI><Type info="Standard or Rectangular">Rectangular</Type><Xmin>10</Xmin><Xmax>500</Xmax></ROI></Backprojection></FBP></HMxml>"#;

#[test]
fn test_parse_partial_roi() {
    let document = registry(compact()).parse_str(ROI_XML).unwrap();
    let roi = roi_of(&document);

    assert_eq!(roi.xmin, Unsettable::with(10));
    assert_eq!(roi.xmax, Unsettable::with(500));
    assert!(!roi.ymin.is_set());
    assert!(!roi.ymax.is_set());
    assert!(!roi.output_width.is_set());
    assert_eq!(roi.ymin.get(), 0);
    assert_eq!(roi.ty.as_ref().unwrap().value.as_deref(), Some("Rectangular"));
}

#[test]
fn test_compact_round_trip_is_exact() {
    let document = registry(compact()).parse_str(ROI_XML).unwrap();
    assert_eq!(write(&document), ROI_XML);
}

#[test]
fn test_indented_output() {
    let document = Registry::default().parse_str(ROI_XML).unwrap();
    let output = Registry::default().serialize_to_string(&document).unwrap();

    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<HMxml>\n  <FBP>\n"));
    assert!(output.contains("\n        <Xmin>10</Xmin>\n"));
    assert!(output.ends_with("</HMxml>\n"));
    assert!(!output.contains("Ymin"));

    let reparsed = Registry::default().parse_str(&output).unwrap();
    assert_eq!(reparsed, document);
}

#[test]
fn test_set_zero_is_written() {
    let mut roi = Roi::default();
    roi.xmin.set(0);
    let mut root = ReconstructionParameters::default();
    root.fbp
        .get_or_insert_with(FbpConfig::default)
        .backprojection
        .get_or_insert_with(Default::default)
        .roi = Some(roi);

    let output = write(&DocumentRoot::with_root(root));
    assert!(output.contains("<ROI><Xmin>0</Xmin></ROI>"));
}

#[test]
fn test_unset_required_attribute_fails() {
    let root = ReconstructionParameters {
        fbp: Some(FbpConfig {
            beamline_user: Some(BeamlineUser::default()),
            ..FbpConfig::default()
        }),
    };

    let err = registry(compact())
        .serialize(&DocumentRoot::with_root(root))
        .unwrap_err();
    match err {
        ValidationError::UnsetRequiredField { path } => {
            assert_eq!(path.as_str(), "HMxml/FBP/BeamlineUser/@done");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_empty_required_attribute_is_valid() {
    let root = ReconstructionParameters {
        fbp: Some(FbpConfig {
            beamline_user: Some(BeamlineUser {
                done: Some(String::new()),
                ..BeamlineUser::default()
            }),
            ..FbpConfig::default()
        }),
    };

    let output = write(&DocumentRoot::with_root(root));
    assert_eq!(output, r#"<HMxml><FBP><BeamlineUser done=""/></FBP></HMxml>"#);
}

#[test]
fn test_parse_accepts_missing_required_attribute() {
    let document = registry(compact())
        .parse_str("<HMxml><FBP><BeamlineUser><Year>2012</Year></BeamlineUser></FBP></HMxml>")
        .unwrap();

    assert_eq!(document.missing_required(), vec![FieldPath::from("HMxml/FBP/BeamlineUser/@done")]);
}

#[test]
fn test_missing_root_on_serialize() {
    let err = registry(compact()).serialize(&DocumentRoot::new()).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::UnsetRequiredField { ref path } if path.as_str() == "HMxml"
    ));
}

#[test]
fn test_missing_root_on_parse() {
    let err = registry(compact()).parse_str("<Other/>").unwrap_err();
    assert!(matches!(
        err,
        ValidationError::UnsetRequiredField { ref path } if path.as_str() == "HMxml"
    ));
}

#[test]
fn test_type_coercion() {
    let err = registry(compact())
        .parse_str("<HMxml><FBP><Backprojection><ROI><Xmin>ten</Xmin></ROI></Backprojection></FBP></HMxml>")
        .unwrap_err();

    match err {
        ValidationError::TypeCoercion {
            path,
            value,
            expected,
        } => {
            assert_eq!(path.as_str(), "HMxml/FBP/Backprojection/ROI/Xmin");
            assert_eq!(value, "ten");
            assert_eq!(expected, "xsd:int");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_empty_numeric_element_is_coercion_error() {
    let err = registry(compact())
        .parse_str("<HMxml><FBP><GPUDeviceNumber/></FBP></HMxml>")
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TypeCoercion { ref value, .. } if value.is_empty()
    ));
}

#[test]
fn test_empty_string_element_is_set() {
    let document = registry(compact())
        .parse_str("<HMxml><FBP><LogFile/></FBP></HMxml>")
        .unwrap();
    let fbp = document.hm_xml.as_ref().unwrap().fbp.as_ref().unwrap();
    assert_eq!(fbp.log_file.as_deref(), Some(""));
}

#[test]
fn test_duplicate_child_is_containment_conflict() {
    let err = registry(compact())
        .parse_str("<HMxml><FBP><LogFile>a</LogFile><LogFile>b</LogFile></FBP></HMxml>")
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::ContainmentConflict { ref path } if path.as_str() == "HMxml/FBP/LogFile"
    ));

    let err = registry(compact())
        .parse_str("<HMxml><FBP/><FBP/></HMxml>")
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::ContainmentConflict { ref path } if path.as_str() == "HMxml/FBP"
    ));
}

#[test]
fn test_second_root_is_containment_conflict() {
    let err = registry(compact()).parse_str("<HMxml/><HMxml/>").unwrap_err();
    assert!(matches!(err, ValidationError::ContainmentConflict { .. }));
}

#[test]
fn test_unknown_element_preserved_verbatim() {
    let input = r#"<HMxml><FBP><Extra a="1"><b>x &amp; y</b></Extra><LogFile>run.log</LogFile></FBP></HMxml>"#;
    let document = registry(compact()).parse_str(input).unwrap();

    assert_eq!(
        document.mixed,
        vec![MixedEntry::Element {
            parent: Some("HMxml/FBP".to_string()),
            name: "Extra".to_string(),
            raw: r#"<Extra a="1"><b>x &amp; y</b></Extra>"#.to_string(),
        }]
    );
    assert_eq!(
        write(&document),
        r#"<HMxml><FBP><LogFile>run.log</LogFile><Extra a="1"><b>x &amp; y</b></Extra></FBP></HMxml>"#
    );
}

#[test]
fn test_unknown_element_rejected_in_strict_mode() {
    let err = registry(CodecConfig::strict())
        .parse_str("<HMxml><FBP><Extra/></FBP></HMxml>")
        .unwrap_err();
    match err {
        ValidationError::UnknownElement { path, name } => {
            assert_eq!(path.as_str(), "HMxml/FBP");
            assert_eq!(name, "Extra");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unknown_element_after_byte_order_mark() {
    let input = "\u{feff}<HMxml><FBP><LogFile>run.log</LogFile><Extra>keep</Extra></FBP></HMxml>";
    let document = registry(compact()).parse_str(input).unwrap();

    assert_eq!(
        document.mixed,
        vec![MixedEntry::Element {
            parent: Some("HMxml/FBP".to_string()),
            name: "Extra".to_string(),
            raw: "<Extra>keep</Extra>".to_string(),
        }]
    );
    let output = write(&document);
    assert_eq!(
        output,
        "<HMxml><FBP><LogFile>run.log</LogFile><Extra>keep</Extra></FBP></HMxml>"
    );
    assert_eq!(registry(compact()).parse_str(&output).unwrap(), document);
}

#[test]
fn test_inherited_prefix_declared_on_fragment() {
    let input = r#"<HMxml><FBP xmlns:x="urn:x"><x:Extra a="1"/></FBP></HMxml>"#;
    let document = registry(compact()).parse_str(input).unwrap();

    match &document.mixed[..] {
        [MixedEntry::Element { raw, .. }] => {
            assert_eq!(raw, r#"<x:Extra xmlns:x="urn:x" a="1"/>"#)
        }
        other => panic!("unexpected mixed content {:?}", other),
    }
    let output = write(&document);
    assert_eq!(
        output,
        r#"<HMxml><FBP><x:Extra xmlns:x="urn:x" a="1"/></FBP></HMxml>"#
    );
    assert_eq!(registry(compact()).parse_str(&output).unwrap(), document);
}

#[test]
fn test_fragment_own_declaration_wins() {
    let input = r#"<HMxml><FBP xmlns:x="urn:x"><x:Extra xmlns:x="urn:y"><x:b/></x:Extra></FBP></HMxml>"#;
    let document = registry(compact()).parse_str(input).unwrap();

    match &document.mixed[..] {
        [MixedEntry::Element { raw, .. }] => {
            assert_eq!(raw, r#"<x:Extra xmlns:x="urn:y"><x:b/></x:Extra>"#)
        }
        other => panic!("unexpected mixed content {:?}", other),
    }
}

#[test]
fn test_unknown_element_in_simple_content() {
    let input = "<HMxml><FBP><LogFile>a<Note/></LogFile></FBP></HMxml>";
    let document = registry(compact()).parse_str(input).unwrap();

    let fbp = document.hm_xml.as_ref().and_then(|r| r.fbp.as_ref()).unwrap();
    assert_eq!(fbp.log_file.as_deref(), Some("a"));
    assert_eq!(
        document.mixed,
        vec![MixedEntry::Element {
            parent: Some("HMxml/FBP/LogFile".to_string()),
            name: "Note".to_string(),
            raw: "<Note/>".to_string(),
        }]
    );
    assert_eq!(write(&document), input);

    let err = registry(CodecConfig::strict()).parse_str(input).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::UnknownElement { ref path, ref name }
            if path.as_str() == "HMxml/FBP/LogFile" && name == "Note"
    ));
}

#[test]
fn test_empty_selector_value_reads_back_unset() {
    let mut document = registry(compact()).parse_str(ROI_XML).unwrap();
    let roi = document
        .hm_xml
        .as_mut()
        .and_then(|r| r.fbp.as_mut())
        .and_then(|f| f.backprojection.as_mut())
        .and_then(|b| b.roi.as_mut())
        .unwrap();
    roi.ty = Some(Selector {
        value: Some(String::new()),
        info: Some("x".to_string()),
    });

    let output = write(&document);
    assert!(output.contains(r#"<Type info="x"></Type>"#));

    // Empty simple content is indistinguishable from no content.
    let reparsed = registry(compact()).parse_str(&output).unwrap();
    let ty = roi_of(&reparsed).ty.as_ref().unwrap();
    assert_eq!(ty.value, None);
    assert_eq!(ty.info.as_deref(), Some("x"));
    assert_ne!(reparsed, document);
}

#[test]
fn test_unknown_attribute() {
    let input = r#"<HMxml><FBP><BeamlineUser done="" extra="1"/></FBP></HMxml>"#;

    let document = registry(compact()).parse_str(input).unwrap();
    assert_eq!(
        write(&document),
        r#"<HMxml><FBP><BeamlineUser done=""/></FBP></HMxml>"#
    );

    let err = registry(CodecConfig::strict()).parse_str(input).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::UnknownAttribute { ref path, ref name }
            if path.as_str() == "HMxml/FBP/BeamlineUser" && name == "extra"
    ));
}

#[test]
fn test_document_level_entries_keep_position() {
    let input = "<?xml version=\"1.0\"?>\n<!-- before -->\n<?proc data?>\n<HMxml/>\n<!-- after -->\n<Trailer x=\"1\"/>";
    let document = registry(compact()).parse_str(input).unwrap();

    assert_eq!(document.root_index, 2);
    assert_eq!(document.mixed.len(), 4);
    assert_eq!(document.mixed[1], MixedEntry::ProcessingInstruction("proc data".to_string()));
    assert_eq!(
        write(&document),
        "<!-- before --><?proc data?><HMxml/><!-- after --><Trailer x=\"1\"/>"
    );
}

#[test]
fn test_text_in_element_only_content_is_malformed() {
    let err = registry(compact())
        .parse_str("<HMxml><FBP>stray</FBP></HMxml>")
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::Malformed { ref path, .. } if path.as_str() == "HMxml/FBP"
    ));
}

#[test]
fn test_target_namespace() {
    let config = CodecConfig {
        target_namespace: Some("urn:hm".to_string()),
        ..compact()
    };
    let input = r#"<hm:HMxml xmlns:hm="urn:hm" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="urn:hm HMxml.xsd"><hm:FBP><hm:LogFile>a</hm:LogFile></hm:FBP></hm:HMxml>"#;
    let document = registry(config.clone()).parse_str(input).unwrap();

    assert_eq!(document.xmlns_prefix_map.get("hm").map(String::as_str), Some("urn:hm"));
    assert_eq!(
        document.xmlns_prefix_map.get("xsi").map(String::as_str),
        Some(XSI_NAMESPACE)
    );
    assert_eq!(
        document.xsi_schema_location.get("urn:hm").map(String::as_str),
        Some("HMxml.xsd")
    );
    let fbp = document.hm_xml.as_ref().unwrap().fbp.as_ref().unwrap();
    assert_eq!(fbp.log_file.as_deref(), Some("a"));

    let output = registry(config.clone()).serialize_to_string(&document).unwrap();
    assert_eq!(
        output,
        r#"<HMxml xmlns="urn:hm" xmlns:hm="urn:hm" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="urn:hm HMxml.xsd"><FBP><LogFile>a</LogFile></FBP></HMxml>"#
    );

    let reparsed = registry(config).parse_str(&output).unwrap();
    assert_eq!(reparsed.hm_xml, document.hm_xml);
    assert_eq!(reparsed.xsi_schema_location, document.xsi_schema_location);
}

#[test]
fn test_root_outside_target_namespace_is_not_recognised() {
    let config = CodecConfig::default().with_namespace("urn:hm");
    let err = registry(config).parse_str("<HMxml/>").unwrap_err();
    assert!(matches!(err, ValidationError::UnsetRequiredField { .. }));
}

#[test]
fn test_no_namespace_schema_location() {
    let input = r#"<HMxml xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="HMxml.xsd"/>"#;
    let document = registry(compact()).parse_str(input).unwrap();

    assert_eq!(
        document.xsi_schema_location.get("").map(String::as_str),
        Some("HMxml.xsd")
    );
    assert_eq!(write(&document), input);
}

#[test]
fn test_schema_location_without_xsi_binding_adds_one() {
    let mut document = DocumentRoot::with_root(ReconstructionParameters::default());
    document
        .xsi_schema_location
        .insert(String::new(), "HMxml.xsd".to_string());

    assert_eq!(
        write(&document),
        r#"<HMxml xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="HMxml.xsd"/>"#
    );
}

#[test]
fn test_odd_schema_location_is_malformed() {
    let input = r#"<HMxml xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="urn:hm"/>"#;
    let err = registry(compact()).parse_str(input).unwrap_err();
    assert!(matches!(err, ValidationError::Malformed { .. }));
}

#[test]
fn test_decimal_lexical_form_is_kept() {
    let input = "<HMxml><FBP><Backprojection><ImageCentre>1279.50</ImageCentre></Backprojection></FBP></HMxml>";
    let document = registry(compact()).parse_str(input).unwrap();

    let centre = document.hm_xml.as_ref().unwrap().image_centre().unwrap();
    assert_eq!(centre, &Decimal::parse("1279.5").unwrap());
    assert_eq!(centre.as_str(), "1279.50");
    assert_eq!(write(&document), input);
}

#[test]
fn test_double_special_values() {
    let input = "<HMxml><FBP><FlatDarkFields><DarkField><ValueBefore>INF</ValueBefore><ValueAfter>-1.5E3</ValueAfter></DarkField></FlatDarkFields></FBP></HMxml>";
    let document = registry(compact()).parse_str(input).unwrap();
    let dark = document
        .hm_xml
        .as_ref()
        .and_then(|r| r.fbp.as_ref())
        .and_then(|f| f.flat_dark_fields.as_ref())
        .and_then(|f| f.dark_field.as_ref())
        .unwrap();

    assert_eq!(dark.value_before, Some(f64::INFINITY));
    assert_eq!(dark.value_after, Some(-1500.0));
    assert!(write(&document).contains("<ValueBefore>INF</ValueBefore><ValueAfter>-1500</ValueAfter>"));

    let err = registry(compact())
        .parse_str("<HMxml><FBP><FlatDarkFields><FlatField><ValueBefore>inf</ValueBefore></FlatField></FlatDarkFields></FBP></HMxml>")
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::TypeCoercion { expected: "xsd:double", .. }
    ));
}

#[test]
fn test_text_is_escaped() {
    let root = ReconstructionParameters {
        fbp: Some(FbpConfig {
            log_file: Some("a<b&c".to_string()),
            ..FbpConfig::default()
        }),
    };
    let document = DocumentRoot::with_root(root);

    let output = write(&document);
    assert_eq!(output, "<HMxml><FBP><LogFile>a&lt;b&amp;c</LogFile></FBP></HMxml>");
    assert_eq!(registry(compact()).parse_str(&output).unwrap(), document);
}

#[test]
fn test_attribute_value_is_unescaped() {
    let input = r#"<HMxml><FBP><BeamlineUser done="a &amp; b &lt;c&gt;"/></FBP></HMxml>"#;
    let document = registry(compact()).parse_str(input).unwrap();

    let user = document
        .hm_xml
        .as_ref()
        .and_then(|r| r.fbp.as_ref())
        .and_then(|f| f.beamline_user.as_ref())
        .unwrap();
    assert_eq!(user.done.as_deref(), Some("a & b <c>"));
    assert_eq!(write(&document), input);
}

#[test]
fn test_mapping_table() {
    assert_eq!(Roi::TYPE_NAME, "ROI_._type");
    assert_eq!(Roi::FIELDS.len(), 8);
    assert_eq!(Roi::FIELDS[1], FieldDescriptor::element("xmin", "Xmin"));
    assert!(!Roi::has_content());

    assert_eq!(
        Selector::FIELDS,
        &[
            FieldDescriptor::attribute("info", "info", AttributeUse::Required),
            FieldDescriptor::content("value"),
        ]
    );
    assert!(Selector::FIELDS[0].is_required());
    assert!(Selector::has_content());
}

struct CommentedCircles;

impl NodeFactory for CommentedCircles {
    fn create_circles(&self) -> Circles {
        Circles {
            comm: Some("default range".to_string()),
            ..Circles::default()
        }
    }
}

#[test]
fn test_parse_uses_registry_factory() {
    let input = "<HMxml><FBP><Backprojection><Circles/></Backprojection></FBP></HMxml>";

    let plain = registry(compact()).parse_str(input).unwrap();
    assert!(registry(compact()).serialize(&plain).is_err());

    let custom = Registry::with_factory(CommentedCircles, compact());
    let document = custom.parse_str(input).unwrap();
    assert_eq!(
        custom.serialize_to_string(&document).unwrap(),
        r#"<HMxml><FBP><Backprojection><Circles comm="default range"/></Backprojection></FBP></HMxml>"#
    );
}

#[test]
fn test_new_document_binds_target_namespace() {
    let registry = registry(CodecConfig::default().with_namespace("urn:hm"));
    let document = registry.new_document();

    assert_eq!(document.xmlns_prefix_map.get("").map(String::as_str), Some("urn:hm"));
    assert!(document.hm_xml.is_none());
}

#[test]
fn test_error_paths() {
    let err = ValidationError::UnsetRequiredField {
        path: FieldPath::root().child("FBP").attribute("done"),
    };
    assert_eq!(err.to_string(), "HMxml/FBP/@done: required field is not set");
    assert_eq!(err.path().map(FieldPath::as_str), Some("HMxml/FBP/@done"));
    assert_eq!(FieldPath::document().to_string(), "/");
}
