use std::io::Write;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use formscout_core::{EnrichedField, FieldCategory, FieldRecord, FieldType, OFF_STATE};

use crate::types::{ExportFormat, ReportForm};

/// Export a form report to the given path.
pub fn export_results(
    form: &ReportForm<'_>,
    format: ExportFormat,
    path: &Path,
) -> Result<(), String> {
    let content = match format {
        ExportFormat::Text => export_text(form),
        ExportFormat::Json => {
            export_json(form).map_err(|e| format!("Failed to serialize report: {}", e))?
        }
    };

    let mut file =
        std::fs::File::create(path).map_err(|e| format!("Failed to create file: {}", e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| format!("Failed to write: {}", e))?;
    Ok(())
}

/// Confidence as a whole percentage, e.g. `"67%"`. Halves round up.
fn confidence_pct(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}

/// What selecting a given state option means, for the text report.
fn state_meaning(option: &str) -> &'static str {
    match option {
        OFF_STATE => "Unchecked/Unselected",
        "Yes" => "Checked (Yes)",
        "No" => "Checked (No)",
        "Y" | "1" => "Checked/Selected",
        _ => "Selected/Checked",
    }
}

/// Fields listed in the checkbox/radio value guide.
fn in_value_guide(record: &FieldRecord) -> bool {
    let name = &record.name;
    (record.is_type(&FieldType::Button) && !record.state_options.is_empty())
        || name.contains("checkbox")
        || name.contains("CB")
        || name.contains("_YN")
        || name.contains("RadioButton")
}

const BANNER: &str = "=================================";
const RULE: &str = "---------------------------------";

fn banner(out: &mut String, title: &str) {
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(BANNER);
    out.push_str("\n\n");
}

pub fn export_text(form: &ReportForm<'_>) -> String {
    let analysis = form.analysis;
    let mut out = String::new();

    banner(&mut out, "     PDF FIELD EXTRACTION REPORT");
    out.push_str(&format!("File: {}\n", form.filename));
    out.push_str(&format!("Total Fields: {}\n", analysis.summary.total_fields));
    if let Some(kb) = form.file_size_kb {
        out.push_str(&format!("File Size: {} KB\n", kb));
    }
    out.push_str(&format!("Pages: {}\n", analysis.page_count));
    out.push_str(&format!("Extraction Date: {}\n", form.generated_at));
    if !analysis.text_available {
        out.push_str("Note: page text unavailable, labels inferred from field names only\n");
    }

    out.push_str(&format!("\n{}\n         FIELD LISTING\n{}\n", RULE, RULE));

    // Sections follow the first-seen order of type tags
    for (type_tag, count) in &analysis.summary.by_type {
        out.push_str(&format!(
            "\n[{} FIELDS] ({} fields)\n",
            type_tag.to_uppercase(),
            count
        ));
        out.push_str(&"─".repeat(50));
        out.push('\n');

        for field in analysis
            .fields
            .iter()
            .filter(|f| f.record.type_tag() == type_tag)
        {
            write_text_field(&mut out, field);
        }
    }

    out.push_str("\n\n");
    banner(&mut out, "     CHECKBOX/RADIO VALUE GUIDE");

    let guide: Vec<&FieldRecord> = analysis
        .fields
        .iter()
        .map(|f| &f.record)
        .filter(|r| in_value_guide(r))
        .collect();

    if guide.is_empty() {
        out.push_str("No checkbox or radio button fields found in this PDF.\n");
    } else {
        out.push_str(&format!("Found {} checkbox/radio fields:\n\n", guide.len()));
        for record in guide {
            out.push_str(&format!("{}\n", record.name));
            if let Some(values) = record.checkbox_values() {
                if let Some((first, rest)) = values.to_check.split_first() {
                    out.push_str(&format!("  → To check/select: Use value \"{}\"\n", first));
                    if !rest.is_empty() {
                        let alternatives: Vec<String> =
                            rest.iter().map(|v| format!("\"{}\"", v)).collect();
                        out.push_str(&format!(
                            "  → Alternative values: {}\n",
                            alternatives.join(", ")
                        ));
                    }
                }
                out.push_str(&format!(
                    "  → To uncheck: Use value \"{}\" or leave empty\n",
                    values.to_uncheck
                ));
            }
            out.push('\n');
        }
    }

    out.push('\n');
    banner(&mut out, "        FIELD NAME LIST\n  (For easy copy/paste)");
    for field in &analysis.fields {
        out.push_str(&format!("{}\n", field.record.name));
    }

    out
}

fn write_text_field(out: &mut String, field: &EnrichedField) {
    let record = &field.record;
    out.push_str(&format!("\nField Name: {}\n", record.name));

    if let Some(label) = &field.label {
        out.push_str(&format!(
            "  Label: {} ({}, {})\n",
            label,
            confidence_pct(field.label_confidence),
            field.label_source.as_str()
        ));
    }
    if let Some(value) = record.value.as_deref().filter(|v| !v.is_empty()) {
        out.push_str(&format!("  Current Value: {}\n", value));
    }
    if let Some(max) = record.max_length {
        out.push_str(&format!("  Max Length: {}\n", max));
    }

    if !record.state_options.is_empty() {
        out.push_str("  ✓ CHECKBOX/RADIO VALUES:\n");
        for option in &record.state_options {
            out.push_str(&format!("    • \"{}\" = {}\n", option, state_meaning(option)));
        }
    }

    if let Some(flags) = record.flags.as_deref().filter(|f| *f != "0" && !f.is_empty()) {
        out.push_str(&format!("  Flags: {}\n", flags));
    }
}

/// Per-field JSON projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonField {
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub name: String,
    pub label: Option<String>,
    pub label_confidence: String,
    pub label_source: String,
    pub category: String,
    pub flags: Option<String>,
    pub justification: Option<String>,
    pub max_length: Option<u32>,
    pub value: Option<String>,
    pub options: Vec<String>,
    pub checkbox_values: Option<JsonCheckboxValues>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCheckboxValues {
    pub to_check: Vec<String>,
    pub to_uncheck: String,
}

impl JsonField {
    fn from_enriched(field: &EnrichedField, category: FieldCategory) -> Self {
        let record = &field.record;
        Self {
            field_type: record.field_type.as_ref().map(|t| t.as_str().to_string()),
            name: record.name.clone(),
            label: field.label.clone(),
            label_confidence: confidence_pct(field.label_confidence),
            label_source: field.label_source.as_str().to_string(),
            category: category.as_str().to_string(),
            flags: record.flags.clone(),
            justification: record.justification.clone(),
            max_length: record.max_length,
            value: record.value.clone(),
            options: record.options().into_iter().map(str::to_string).collect(),
            checkbox_values: record.checkbox_values().map(|v| JsonCheckboxValues {
                to_check: v.to_check,
                to_uncheck: v.to_uncheck,
            }),
        }
    }
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    #[serde(serialize_with = "ordered_counts")]
    by_type: &'a [(String, usize)],
    #[serde(serialize_with = "ordered_category_counts")]
    by_category: &'a [(FieldCategory, usize)],
    #[serde(serialize_with = "ordered_counts")]
    by_part: &'a [(String, usize)],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    filename: &'a str,
    generated_at: &'a str,
    total_fields: usize,
    file_size_kb: Option<u64>,
    pages: usize,
    text_available: bool,
    summary: JsonSummary<'a>,
    fields: Vec<JsonField>,
}

/// Serialize `(key, count)` pairs as a JSON object in slice order.
fn ordered_counts<S: Serializer>(counts: &&[(String, usize)], s: S) -> Result<S::Ok, S::Error> {
    let mut map = s.serialize_map(Some(counts.len()))?;
    for (key, count) in counts.iter() {
        map.serialize_entry(key, count)?;
    }
    map.end()
}

fn ordered_category_counts<S: Serializer>(
    counts: &&[(FieldCategory, usize)],
    s: S,
) -> Result<S::Ok, S::Error> {
    let mut map = s.serialize_map(Some(counts.len()))?;
    for (category, count) in counts.iter() {
        map.serialize_entry(category.as_str(), count)?;
    }
    map.end()
}

pub fn export_json(form: &ReportForm<'_>) -> Result<String, serde_json::Error> {
    let analysis = form.analysis;
    let report = JsonReport {
        filename: form.filename,
        generated_at: form.generated_at,
        total_fields: analysis.summary.total_fields,
        file_size_kb: form.file_size_kb,
        pages: analysis.page_count,
        text_available: analysis.text_available,
        summary: JsonSummary {
            by_type: &analysis.summary.by_type,
            by_category: &analysis.summary.by_category,
            by_part: &analysis.summary.by_part,
        },
        fields: analysis
            .fields
            .iter()
            .map(|f| JsonField::from_enriched(f, formscout_parsing::categorize(&f.record)))
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}
