//! Field categorisation and aggregate counts.

use once_cell::sync::Lazy;
use regex::Regex;

use formscout_core::{FieldCategory, FieldRecord, FieldType, FormSummary};

/// Bucket a field for grouping. Buttons whose names look like checkboxes
/// (`checkbox`, `CB`, `_YN`) count as [`FieldCategory::Checkbox`].
pub fn categorize(record: &FieldRecord) -> FieldCategory {
    match &record.field_type {
        Some(FieldType::Text) => FieldCategory::Text,
        Some(FieldType::Button) => {
            let name = &record.name;
            if name.to_lowercase().contains("checkbox")
                || name.contains("CB")
                || name.contains("_YN")
            {
                FieldCategory::Checkbox
            } else {
                FieldCategory::Button
            }
        }
        Some(FieldType::Choice) => FieldCategory::Choice,
        Some(FieldType::Sig) => FieldCategory::Signature,
        Some(FieldType::Other(_)) | None => FieldCategory::Other,
    }
}

/// `"Part <n>"` from the first `Pt<n>` in the name, else `"Other"`.
pub fn structural_part(name: &str) -> String {
    static PT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Pt(\d+)").unwrap());
    match PT_RE.captures(name).and_then(|c| c.get(1)) {
        Some(n) => format!("Part {}", n.as_str()),
        None => "Other".to_string(),
    }
}

/// Count fields by type tag, category and structural part.
pub fn summarize(records: &[FieldRecord]) -> FormSummary {
    let mut summary = FormSummary {
        total_fields: records.len(),
        ..Default::default()
    };
    for record in records {
        bump(&mut summary.by_type, record.type_tag().to_string());
        bump(&mut summary.by_category, categorize(record));
        bump(&mut summary.by_part, structural_part(&record.name));
    }
    summary
}

/// Increment `key`, appending it on first sight.
fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}
