//! Reading the JSON projection back reproduces the dumped field attributes.

use formscout_core::FieldType;
use formscout_parsing::FormExtractor;
use formscout_reporting::{JsonField, ReportForm, export_json};
use serde::Deserialize;

#[derive(Deserialize)]
struct Projection {
    fields: Vec<JsonField>,
}

const DUMP: &str = "\
---
FieldType: Text
FieldName: form1[0].#subform[0].Pt1Line1a_FamilyName[0]
FieldFlags: 8388608
FieldValue: O'Brien \"Jr.\"
FieldJustification: Left
FieldMaxLength: 33
---
FieldType: Button
FieldName: form1[0].#subform[0].Pt1_CB_Sex[0]
FieldFlags: 49152
FieldValue: Off
FieldStateOption: M
FieldStateOption: F
FieldStateOption: Off
---
FieldType: Choice
FieldName: Pt2Line3_State[0]
FieldValue: Ñuñoa
FieldStateOption: CA
FieldStateOption: NY
---
FieldName: Untyped
---
";

#[test]
fn name_type_and_value_survive_json() {
    let analysis = FormExtractor::new().analyze(DUMP, None);
    let form = ReportForm {
        filename: "form.pdf",
        analysis: &analysis,
        file_size_kb: None,
        generated_at: "2026-01-01T00:00:00Z",
    };

    let json = export_json(&form).unwrap();
    let projection: Projection = serde_json::from_str(&json).unwrap();

    assert_eq!(projection.fields.len(), analysis.fields.len());
    for (json_field, enriched) in projection.fields.iter().zip(&analysis.fields) {
        let record = &enriched.record;
        assert_eq!(json_field.name, record.name);
        assert_eq!(
            json_field.field_type.as_deref().map(FieldType::parse),
            record.field_type
        );
        assert_eq!(json_field.value, record.value);
        assert_eq!(json_field.max_length, record.max_length);
    }
}

#[test]
fn checkbox_values_exclude_off() {
    let analysis = FormExtractor::new().analyze(DUMP, None);
    let form = ReportForm {
        filename: "form.pdf",
        analysis: &analysis,
        file_size_kb: Some(1),
        generated_at: "2026-01-01T00:00:00Z",
    };

    let projection: Projection = serde_json::from_str(&export_json(&form).unwrap()).unwrap();
    let sex = &projection.fields[1];
    let values = sex.checkbox_values.as_ref().unwrap();
    assert_eq!(values.to_check, vec!["M", "F"]);
    assert_eq!(values.to_uncheck, "Off");
    assert!(projection.fields[0].checkbox_values.is_none());
}
