//! Parser for the line-oriented field dump (`pdftk dump_data_fields` format).
//!
//! ```text
//! ---
//! FieldType: Button
//! FieldName: CB_AppType[0]
//! FieldFlags: 0
//! FieldValue: Off
//! FieldStateOption: Off
//! FieldStateOption: Y
//! ---
//! ```

use formscout_core::{FieldRecord, FieldType};

const RECORD_DELIMITER: &str = "---";

const DIRECTIVES: &[(&str, Directive)] = &[
    ("FieldName:", Directive::Name),
    ("FieldType:", Directive::Type),
    ("FieldFlags:", Directive::Flags),
    ("FieldValue:", Directive::Value),
    ("FieldJustification:", Directive::Justification),
    ("FieldMaxLength:", Directive::MaxLength),
    ("FieldStateOption:", Directive::StateOption),
];

#[derive(Debug, Clone, Copy)]
enum Directive {
    Name,
    Type,
    Flags,
    Value,
    Justification,
    MaxLength,
    StateOption,
}

/// Parse a field dump into records, in dump order.
///
/// Never fails: unrecognised lines are skipped, a non-numeric
/// `FieldMaxLength` leaves `max_length` unset, and a block without a
/// `FieldName` is dropped. A name repeated within one block overwrites
/// the earlier one.
pub fn parse_field_dump(dump: &str) -> Vec<FieldRecord> {
    let mut fields = Vec::new();
    let mut current = FieldRecord::default();

    for line in dump.lines() {
        let trimmed = line.trim();

        if trimmed == RECORD_DELIMITER {
            flush(&mut current, &mut fields);
            continue;
        }

        let Some((directive, rest)) = match_directive(trimmed) else {
            continue;
        };
        let rest = rest.trim();

        match directive {
            Directive::Name => current.name = rest.to_string(),
            Directive::Type => current.field_type = Some(FieldType::parse(rest)),
            Directive::Flags => current.flags = Some(rest.to_string()),
            Directive::Value => current.value = Some(rest.to_string()),
            Directive::Justification => current.justification = Some(rest.to_string()),
            Directive::MaxLength => current.max_length = parse_max_length(rest),
            Directive::StateOption => current.state_options.push(rest.to_string()),
        }
    }

    // A dump without a trailing delimiter still yields its last field
    flush(&mut current, &mut fields);

    tracing::debug!(count = fields.len(), "parsed field dump");
    fields
}

fn match_directive(line: &str) -> Option<(Directive, &str)> {
    DIRECTIVES
        .iter()
        .find_map(|(prefix, directive)| line.strip_prefix(*prefix).map(|rest| (*directive, rest)))
}

fn flush(current: &mut FieldRecord, fields: &mut Vec<FieldRecord>) {
    let record = std::mem::take(current);
    if !record.name.is_empty() {
        fields.push(record);
    }
}

/// Positive integer or nothing. Zero means "no limit" in the dump format.
fn parse_max_length(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_field() {
        let dump = "---\nFieldType: Text\nFieldName: Pt1Line1a_FamilyName[0]\nFieldFlags: 0\nFieldJustification: Left\nFieldMaxLength: 33\n---\n";
        let fields = parse_field_dump(dump);
        assert_eq!(fields.len(), 1);
        let f = &fields[0];
        assert_eq!(f.name, "Pt1Line1a_FamilyName[0]");
        assert_eq!(f.field_type, Some(FieldType::Text));
        assert_eq!(f.flags.as_deref(), Some("0"));
        assert_eq!(f.justification.as_deref(), Some("Left"));
        assert_eq!(f.max_length, Some(33));
        assert!(f.state_options.is_empty());
    }

    #[test]
    fn test_block_without_name_is_dropped() {
        let dump = "FieldType: Text\nFieldFlags: 0\n---\nFieldName: Kept\n---\n";
        let fields = parse_field_dump(dump);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "Kept");
    }

    #[test]
    fn test_attributes_do_not_leak_across_blocks() {
        let dump = "FieldName: A\nFieldValue: hello\n---\nFieldName: B\n---\n";
        let fields = parse_field_dump(dump);
        assert_eq!(fields[1].name, "B");
        assert!(fields[1].value.is_none());
    }

    #[test]
    fn test_last_field_without_trailing_delimiter() {
        let dump = "FieldName: First\n---\nFieldName: Second\nFieldType: Sig";
        let fields = parse_field_dump(dump);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].field_type, Some(FieldType::Sig));
    }

    #[test]
    fn test_state_options_keep_off_and_order() {
        let dump = "FieldName: CB\nFieldType: Button\nFieldStateOption: Y\nFieldStateOption: Off\nFieldStateOption: N\n---";
        let fields = parse_field_dump(dump);
        assert_eq!(fields[0].state_options, vec!["Y", "Off", "N"]);
        assert_eq!(fields[0].options(), vec!["Y", "N"]);
    }

    #[test]
    fn test_non_numeric_max_length_is_absent() {
        let dump = "FieldName: X\nFieldMaxLength: lots\n---";
        let fields = parse_field_dump(dump);
        assert_eq!(fields[0].max_length, None);
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let dump = "FieldName: X\nFieldType: Barcode\n---";
        let fields = parse_field_dump(dump);
        assert_eq!(fields[0].field_type, Some(FieldType::Other("Barcode".into())));
    }

    #[test]
    fn test_unrecognised_lines_ignored() {
        let dump = "Warning: something odd\nFieldNameAlt: nope\nFieldName: X\nFieldName\n---";
        let fields = parse_field_dump(dump);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "X");
    }

    #[test]
    fn test_empty_dump() {
        assert!(parse_field_dump("").is_empty());
        assert!(parse_field_dump("---\n---\n").is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let dump = "FieldName: X\r\nFieldValue: v\r\n---\r\n";
        let fields = parse_field_dump(dump);
        assert_eq!(fields[0].name, "X");
        assert_eq!(fields[0].value.as_deref(), Some("v"));
    }
}
