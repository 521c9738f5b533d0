use once_cell::sync::Lazy;
use regex::Regex;

use formscout_core::TextElement;

use crate::config::ParsingConfig;

/// Case-sensitive substrings that mark a line as a likely caption.
/// Plain substring tests, so `No` also hits `Not` and `Note`.
pub(crate) static LABEL_VOCABULARY: &[&str] = &[
    "Name",
    "Address",
    "Date",
    "Phone",
    "Email",
    "Number",
    "Code",
    "Country",
    "State",
    "City",
    "ZIP",
    "Yes",
    "No",
    "Type",
    "Status",
    "Application",
    "Applicant",
    "Beneficiary",
    "Petitioner",
    "Employer",
    "Form",
    "Part",
    "Section",
    "Information",
    "Select",
    "Check",
    "Mark",
    "Indicate",
];

/// Split extracted text into trimmed, non-empty lines tagged with
/// [`is_likely_label`].
pub fn classify_text(full_text: &str) -> Vec<TextElement> {
    classify_text_with_config(full_text, &ParsingConfig::default())
}

/// Config-aware version of [`classify_text`].
pub(crate) fn classify_text_with_config(
    full_text: &str,
    config: &ParsingConfig,
) -> Vec<TextElement> {
    let defaults: Vec<String> = LABEL_VOCABULARY.iter().map(|s| s.to_string()).collect();
    let vocabulary = config.label_vocabulary.resolve(&defaults);

    full_text
        .split('\n')
        .enumerate()
        .filter_map(|(line_number, line)| {
            let text = line.trim();
            if text.is_empty() {
                return None;
            }
            Some(TextElement {
                text: text.to_string(),
                line_number,
                is_likely_label: is_likely_label_with(text, config, &vocabulary),
            })
        })
        .collect()
}

/// Whether a trimmed line looks like a form caption.
pub fn is_likely_label(line: &str) -> bool {
    let config = ParsingConfig::default();
    let vocabulary: Vec<String> = LABEL_VOCABULARY.iter().map(|s| s.to_string()).collect();
    is_likely_label_with(line, &config, &vocabulary)
}

fn is_likely_label_with(line: &str, config: &ParsingConfig, vocabulary: &[String]) -> bool {
    // `1.`, `A.`, `(a)`
    static LIST_MARKER_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?:\d+\.|[A-Z]\.|\([a-z]\))").unwrap());
    // `Part 2`, `Section 3`, `Item 4`
    static REFERENCE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^(?:Part|Section|Item) \d+").unwrap());

    if line.ends_with(':') || line.ends_with('?') {
        return true;
    }

    let list_marker_re = config.list_marker_re.as_ref().unwrap_or(&*LIST_MARKER_RE);
    let reference_re = config.reference_re.as_ref().unwrap_or(&*REFERENCE_RE);
    if list_marker_re.is_match(line) || reference_re.is_match(line) {
        return true;
    }

    vocabulary
        .iter()
        .any(|word| !word.is_empty() && line.contains(word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;

    #[test]
    fn test_trailing_colon_or_question() {
        assert!(is_likely_label("Family Name:"));
        assert!(is_likely_label("Are you married?"));
    }

    #[test]
    fn test_list_markers() {
        assert!(is_likely_label("1. something"));
        assert!(is_likely_label("B. something"));
        assert!(is_likely_label("(c) something"));
        assert!(!is_likely_label("(C) something"));
    }

    #[test]
    fn test_part_section_item_case_insensitive() {
        assert!(is_likely_label("PART 3 something"));
        assert!(is_likely_label("section 12"));
        assert!(is_likely_label("Item 4"));
    }

    #[test]
    fn test_vocabulary_is_case_sensitive_substring() {
        assert!(is_likely_label("Mailing Address"));
        assert!(is_likely_label("Nothing here")); // "No" substring
        assert!(!is_likely_label("mailing address"));
        assert!(!is_likely_label("for official use only"));
    }

    #[test]
    fn test_classify_keeps_unlabelled_lines_and_zero_based_numbers() {
        let text = "Family Name:\n\n  for official use only  \nGiven Name:";
        let elements = classify_text(text);
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].line_number, 0);
        assert!(elements[0].is_likely_label);
        assert_eq!(elements[1].text, "for official use only");
        assert_eq!(elements[1].line_number, 2);
        assert!(!elements[1].is_likely_label);
        assert_eq!(elements[2].line_number, 3);
    }

    #[test]
    fn test_classify_empty_text() {
        assert!(classify_text("").is_empty());
        assert!(classify_text("\n  \n").is_empty());
    }

    #[test]
    fn test_extended_vocabulary() {
        let config = ParsingConfigBuilder::new()
            .add_label_word("Spouse".into())
            .build()
            .unwrap();
        let elements = classify_text_with_config("Spouse details", &config);
        assert!(elements[0].is_likely_label);
    }

    #[test]
    fn test_replaced_vocabulary() {
        let config = ParsingConfigBuilder::new()
            .set_label_vocabulary(vec!["Spouse".into()])
            .build()
            .unwrap();
        let elements = classify_text_with_config("Mailing Address", &config);
        assert!(!elements[0].is_likely_label);
    }
}
