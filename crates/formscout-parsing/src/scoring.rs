//! Similarity between a decomposed field name and a line of page text.

use formscout_core::{FieldNameParts, TextElement};

/// Shortest token prefix that counts as a partial match.
const MIN_PREFIX_LEN: usize = 3;

/// Score how well `text` matches the field name's words, in `[0, 1]`.
///
/// Each word contributes 1.0 when it occurs in the text (case-insensitive),
/// otherwise `k / len` for the longest prefix of length `k >= 3` that
/// occurs in the text, otherwise 0. The sum is divided by the word count,
/// so a name with no words scores 0.
pub fn score_similarity(parts: &FieldNameParts, text: &str) -> f64 {
    if parts.words.is_empty() {
        return 0.0;
    }

    let text_lower = text.to_lowercase();
    let total: f64 = parts
        .words
        .iter()
        .map(|word| word_score(&word.to_lowercase(), &text_lower))
        .sum();

    total / parts.words.len() as f64
}

fn word_score(word: &str, text: &str) -> f64 {
    if text.contains(word) {
        return 1.0;
    }

    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let len = chars.len();
    if len < MIN_PREFIX_LEN {
        return 0.0;
    }

    // A prefix can only occur if every shorter prefix does, so stop growing
    // at the first miss.
    let mut matched = 0;
    for k in MIN_PREFIX_LEN..=len {
        let end = chars.get(k).map(|(i, _)| *i).unwrap_or(word.len());
        if !text.contains(&word[..end]) {
            break;
        }
        matched = k;
    }
    matched as f64 / len as f64
}

/// Best-scoring likely-label line for a field, with ties going to the
/// earliest line. Lines not flagged as likely labels are skipped, and a
/// zero score never wins.
pub fn best_text_match<'a>(
    parts: &FieldNameParts,
    elements: &'a [TextElement],
) -> Option<(&'a TextElement, f64)> {
    let mut best: Option<(&TextElement, f64)> = None;
    for element in elements.iter().filter(|e| e.is_likely_label) {
        let score = score_similarity(parts, &element.text);
        let current = best.map(|(_, s)| s).unwrap_or(0.0);
        if score > current {
            best = Some((element, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_name::parse_field_name;

    fn element(text: &str, line_number: usize, is_likely_label: bool) -> TextElement {
        TextElement {
            text: text.to_string(),
            line_number,
            is_likely_label,
        }
    }

    #[test]
    fn test_all_words_present_scores_one() {
        let parts = parse_field_name("FamilyName");
        assert!((score_similarity(&parts, "1.a. Family Name (Last Name)") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive() {
        let parts = parse_field_name("FAMILY_NAME");
        assert!((score_similarity(&parts, "family name") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_words_scores_zero() {
        let parts = parse_field_name("___");
        assert_eq!(score_similarity(&parts, "anything at all"), 0.0);
    }

    #[test]
    fn test_partial_prefix_uses_longest_hit() {
        // "mailing" misses; "mai" is the longest prefix found in "Maiden"
        let parts = parse_field_name("Mailing");
        let score = score_similarity(&parts, "Maiden");
        assert!((score - 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_word_no_partial_credit() {
        let parts = parse_field_name("Zz");
        assert_eq!(score_similarity(&parts, "zebra"), 0.0);
    }

    #[test]
    fn test_mixed_score_normalised_by_word_count() {
        // Line1a (0), Family (1), Name (1)
        let parts = parse_field_name("Pt1Line1a_FamilyName");
        let score = score_similarity(&parts, "Family Name:");
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_ascii_prefix_slicing() {
        let parts = parse_field_name("Ñandú");
        // no panic on multi-byte boundaries; "ñand" is the longest hit
        let score = score_similarity(&parts, "ñandu");
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_best_text_match_skips_non_labels_and_keeps_first_tie() {
        let parts = parse_field_name("FamilyName");
        let elements = vec![
            element("Family Name", 0, false),
            element("Family Name:", 2, true),
            element("Family Name?", 5, true),
        ];
        let (best, score) = best_text_match(&parts, &elements).unwrap();
        assert_eq!(best.line_number, 2);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_text_match_none_when_all_zero() {
        let parts = parse_field_name("Signature");
        let elements = vec![element("Mailing Address:", 0, true)];
        assert!(best_text_match(&parts, &elements).is_none());
    }
}
