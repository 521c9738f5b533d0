//! Label inference: an ordered chain of rules, first committed label wins.
//!
//! 1. [`LabelRule::TextMatch`]: best-scoring likely-label line at or above
//!    the configured threshold
//! 2. [`LabelRule::Dictionary`]: field-name substring dictionary
//! 3. [`LabelRule::LineRef`]: `Line5A` → "Line 5A"
//! 4. [`LabelRule::PartRef`]: `Part2` → "Part 2"
//! 5. [`LabelRule::CheckboxHeuristic`]: residue after a `CB_`/`Check_` prefix
//!
//! A candidate equal to the raw field name carries no information and is
//! passed over: the chain moves on to the next rule instead of stopping at
//! "no label". With the built-in dictionary the outcome is the same either
//! way. It differs only when an extra dictionary entry maps a name to
//! itself, in which case a later line, part or checkbox rule can still
//! label the field. When every rule passes, the field has no label and
//! zero confidence.

use once_cell::sync::Lazy;
use regex::Regex;

use formscout_core::{
    EnrichedField, FieldNameParts, FieldRecord, FieldType, LabelSource, TextElement,
};

use crate::config::ParsingConfig;
use crate::field_name::parse_field_name;
use crate::patterns::{self, LabelPattern};
use crate::scoring::best_text_match;

/// One step of the inference cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    TextMatch,
    Dictionary,
    LineRef,
    PartRef,
    CheckboxHeuristic,
}

/// Rules in evaluation order.
pub const RULE_CHAIN: &[LabelRule] = &[
    LabelRule::TextMatch,
    LabelRule::Dictionary,
    LabelRule::LineRef,
    LabelRule::PartRef,
    LabelRule::CheckboxHeuristic,
];

/// A label proposed by one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate {
    pub label: String,
    pub confidence: f64,
    pub source: LabelSource,
}

/// Everything a rule may look at for one field.
pub struct RuleInput<'a> {
    pub record: &'a FieldRecord,
    pub parts: &'a FieldNameParts,
    pub elements: &'a [TextElement],
    pub patterns: &'a [LabelPattern],
    pub config: &'a ParsingConfig,
}

impl LabelRule {
    pub fn source(&self) -> LabelSource {
        match self {
            Self::TextMatch => LabelSource::TextMatch,
            Self::Dictionary => LabelSource::Dictionary,
            Self::LineRef => LabelSource::LineRef,
            Self::PartRef => LabelSource::PartRef,
            Self::CheckboxHeuristic => LabelSource::Checkbox,
        }
    }

    /// Propose a label, or `None` if this rule does not apply.
    pub fn apply(&self, input: &RuleInput<'_>) -> Option<LabelCandidate> {
        let name = input.record.name.as_str();
        let inferred = |label: String| LabelCandidate {
            label,
            confidence: input.config.inferred_confidence,
            source: self.source(),
        };

        match self {
            Self::TextMatch => {
                let (element, score) = best_text_match(input.parts, input.elements)?;
                (score >= input.config.label_threshold).then(|| LabelCandidate {
                    label: element.text.clone(),
                    confidence: score,
                    source: self.source(),
                })
            }
            Self::Dictionary => {
                patterns::lookup(name, input.patterns).map(|p| inferred(p.label.clone()))
            }
            Self::LineRef => line_reference(name).map(|r| inferred(format!("Line {r}"))),
            Self::PartRef => part_reference(name).map(|n| inferred(format!("Part {n}"))),
            Self::CheckboxHeuristic => checkbox_label(input.record).map(inferred),
        }
    }
}

fn line_reference(name: &str) -> Option<&str> {
    static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Line([A-Z0-9]+)").unwrap());
    LINE_RE
        .captures(name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn part_reference(name: &str) -> Option<&str> {
    static PART_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Part(\d+)").unwrap());
    PART_RE
        .captures(name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Label for a checkbox-like button from what follows its `CB_`/`Check_`
/// prefix: `CB_AppType[0]` → "AppType Selection", `CB_Married_YN` →
/// "Yes/No Selection".
fn checkbox_label(record: &FieldRecord) -> Option<String> {
    static PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*(?:CB_|Check_)").unwrap());
    static INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\[\d+\])+$").unwrap());

    let name = record.name.as_str();
    if !record.is_type(&FieldType::Button) || !(name.contains("CB") || name.contains("Check")) {
        return None;
    }

    let residue = PREFIX_RE.replace(name, "");
    let residue = INDEX_RE.replace(&residue, "");
    let residue = residue.replace('_', " ").trim().to_string();

    if residue.chars().count() <= 2 || residue == name {
        return None;
    }

    if signals_yes_no(&residue) {
        Some("Yes/No Selection".to_string())
    } else {
        Some(format!("{residue} Selection"))
    }
}

fn signals_yes_no(residue: &str) -> bool {
    let lower = residue.to_lowercase();
    let compact: String = lower
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .collect();
    compact == "yn" || compact == "yesno" || lower.ends_with(" yn") || lower.ends_with(" yesno")
}

/// Runs the rule chain over fields of one document.
pub struct LabelEngine<'c> {
    config: &'c ParsingConfig,
    patterns: Vec<LabelPattern>,
}

impl<'c> LabelEngine<'c> {
    pub fn new(config: &'c ParsingConfig) -> Self {
        let patterns = config.label_patterns.resolve(&patterns::default_patterns());
        Self { config, patterns }
    }

    /// Infer the label for one field against the document's classified text.
    pub fn infer(&self, record: &FieldRecord, elements: &[TextElement]) -> EnrichedField {
        let parts = parse_field_name(&record.name);
        let input = RuleInput {
            record,
            parts: &parts,
            elements,
            patterns: &self.patterns,
            config: self.config,
        };

        let winner = RULE_CHAIN.iter().find_map(|rule| {
            rule.apply(&input).filter(|candidate| candidate.label != record.name)
        });

        match winner {
            Some(candidate) => {
                tracing::debug!(
                    field = %record.name,
                    label = %candidate.label,
                    confidence = candidate.confidence,
                    source = candidate.source.as_str(),
                    "label inferred"
                );
                EnrichedField {
                    record: record.clone(),
                    label: Some(candidate.label),
                    label_confidence: candidate.confidence,
                    label_source: candidate.source,
                    field_name_parts: parts,
                }
            }
            None => {
                tracing::trace!(field = %record.name, "no label");
                EnrichedField {
                    record: record.clone(),
                    label: None,
                    label_confidence: 0.0,
                    label_source: LabelSource::NoMatch,
                    field_name_parts: parts,
                }
            }
        }
    }

    /// Infer labels for every field, preserving input order.
    pub fn infer_all(
        &self,
        records: &[FieldRecord],
        elements: &[TextElement],
    ) -> Vec<EnrichedField> {
        records.iter().map(|r| self.infer(r, elements)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;
    use crate::text::classify_text;

    fn field(name: &str, field_type: Option<FieldType>) -> FieldRecord {
        FieldRecord {
            name: name.to_string(),
            field_type,
            ..Default::default()
        }
    }

    fn infer(name: &str, field_type: Option<FieldType>, text: &str) -> EnrichedField {
        let config = ParsingConfig::default();
        let engine = LabelEngine::new(&config);
        engine.infer(&field(name, field_type), &classify_text(text))
    }

    #[test]
    fn test_text_match_wins_over_dictionary() {
        let e = infer(
            "Pt1Line1a_FamilyName",
            Some(FieldType::Text),
            "Part 1. Information About You\nFamily Name:\nGiven Name:",
        );
        assert_eq!(e.label.as_deref(), Some("Family Name:"));
        assert_eq!(e.label_source, LabelSource::TextMatch);
        assert!(e.label_confidence >= 0.5);
    }

    #[test]
    fn test_dictionary_fallback() {
        let e = infer("Applicant_DOB[0]", Some(FieldType::Text), "");
        assert_eq!(e.label.as_deref(), Some("Date of Birth"));
        assert_eq!(e.label_source, LabelSource::Dictionary);
        assert!((e.label_confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_line_reference_fallback() {
        let e = infer("Pt3Line5A[0]", Some(FieldType::Text), "");
        assert_eq!(e.label.as_deref(), Some("Line 5A"));
        assert_eq!(e.label_source, LabelSource::LineRef);
    }

    #[test]
    fn test_part_reference_fallback() {
        let e = infer("Part2Field[0]", Some(FieldType::Text), "");
        assert_eq!(e.label.as_deref(), Some("Part 2"));
        assert!((e.label_confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_checkbox_residue() {
        let e = infer("CB_AppType[0]", Some(FieldType::Button), "");
        assert_eq!(e.label.as_deref(), Some("AppType Selection"));
        assert_eq!(e.label_source, LabelSource::Checkbox);
        assert!((e.label_confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_checkbox_yes_no_residue() {
        let e = infer("Pt4_CB_Married_YN[1]", Some(FieldType::Button), "");
        assert_eq!(e.label.as_deref(), Some("Yes/No Selection"));
    }

    #[test]
    fn test_checkbox_requires_button_type() {
        let e = infer("CB_AppType[0]", Some(FieldType::Text), "");
        assert!(e.label.is_none());
    }

    #[test]
    fn test_checkbox_short_residue_rejected() {
        let e = infer("CB_No[0]", Some(FieldType::Button), "");
        assert!(e.label.is_none());
    }

    #[test]
    fn test_no_words_no_label() {
        let e = infer("___", Some(FieldType::Text), "Family Name:\nAddress:");
        assert!(e.label.is_none());
        assert_eq!(e.label_confidence, 0.0);
        assert_eq!(e.label_source, LabelSource::NoMatch);
    }

    #[test]
    fn test_label_equal_to_name_is_skipped() {
        // Dictionary maps "City" → "City", identical to the name
        let e = infer("City", Some(FieldType::Text), "");
        assert!(e.label.is_none());
        assert_eq!(e.label_confidence, 0.0);
    }

    #[test]
    fn test_label_equal_to_name_falls_through_to_later_rule() {
        let config = ParsingConfigBuilder::new()
            .set_label_patterns(vec![LabelPattern::new("Line7", "Line7")])
            .build()
            .unwrap();
        let engine = LabelEngine::new(&config);
        let e = engine.infer(&field("Line7", Some(FieldType::Text)), &[]);
        assert_eq!(e.label.as_deref(), Some("Line 7"));
        assert_eq!(e.label_source, LabelSource::LineRef);
    }

    #[test]
    fn test_below_threshold_text_match_falls_back() {
        // "Mailing Address:" shares only "Address" with the name (0.5 raw),
        // but a stricter threshold rejects it and the dictionary answers.
        let config = ParsingConfigBuilder::new()
            .label_threshold(0.9)
            .build()
            .unwrap();
        let engine = LabelEngine::new(&config);
        let e = engine.infer(
            &field("HomeAddress", Some(FieldType::Text)),
            &classify_text("Mailing Address:"),
        );
        assert_eq!(e.label.as_deref(), Some("Address"));
        assert_eq!(e.label_source, LabelSource::Dictionary);
    }

    #[test]
    fn test_non_label_lines_never_match() {
        let e = infer("zebra_stripes", Some(FieldType::Text), "zebra stripes");
        assert!(e.label.is_none());
    }

    #[test]
    fn test_infer_all_preserves_order() {
        let config = ParsingConfig::default();
        let engine = LabelEngine::new(&config);
        let records = vec![field("B", None), field("A", None)];
        let enriched = engine.infer_all(&records, &[]);
        assert_eq!(enriched[0].record.name, "B");
        assert_eq!(enriched[1].record.name, "A");
    }

    #[test]
    fn test_signals_yes_no() {
        assert!(signals_yes_no("YN"));
        assert!(signals_yes_no("Yes No"));
        assert!(signals_yes_no("Yes/No"));
        assert!(signals_yes_no("Married YN"));
        assert!(!signals_yes_no("Synonym"));
    }
}
