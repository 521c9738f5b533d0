use once_cell::sync::Lazy;
use regex::Regex;

use formscout_core::FieldNameParts;

/// Decompose a raw field name into cleaned text, word tokens and any
/// `Line`/`Section` reference.
///
/// Normalisation, in order:
/// 1. strip a leading `form[0].` / `form1[0].` / `form.` prefix
/// 2. strip leading XFA container segments (`#subform[0].`, `Page1[0].`)
/// 3. strip a trailing `[n]` array index
/// 4. strip a leading `P1.` page prefix
/// 5. strip a leading `Pt1` part prefix
/// 6. turn `_` and `.` into spaces
///
/// Tokenisation splits lower→Upper boundaries first, then acronym→Word
/// boundaries (`USCISFormNumber` → `USCIS Form Number`). Digits never start
/// a token, so `Line5A` stays one word while `line` is still `5A`.
pub fn parse_field_name(field_name: &str) -> FieldNameParts {
    static FORM_PREFIX_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^form\d*(?:\[\d*\]\.?|\.)").unwrap());
    static CONTAINER_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^(?:#?subform\[\d+\]\.|page\d+\[\d+\]\.)+").unwrap());
    static INDEX_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]$").unwrap());
    static PAGE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^P\d+\.").unwrap());
    static PART_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Pt\d+").unwrap());
    static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Line([A-Z0-9]+)").unwrap());
    static SECTION_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)Section([A-Z0-9]+)").unwrap());

    let cleaned = FORM_PREFIX_RE.replace(field_name, "");
    let cleaned = CONTAINER_RE.replace(&cleaned, "");
    let cleaned = INDEX_SUFFIX_RE.replace(&cleaned, "");
    let cleaned = PAGE_PREFIX_RE.replace(&cleaned, "");
    let cleaned = PART_PREFIX_RE.replace(&cleaned, "");
    let cleaned = cleaned.replace(['_', '.'], " ");

    let capture = |re: &Regex| {
        re.captures(&cleaned)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };
    let line = capture(&LINE_RE);
    let section = capture(&SECTION_RE);

    FieldNameParts {
        original: field_name.to_string(),
        words: split_words(&cleaned),
        cleaned,
        line,
        section,
    }
}

/// Split a cleaned name on camel-case boundaries and separator runs.
pub fn split_words(text: &str) -> Vec<String> {
    static LOWER_UPPER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
    static ACRONYM_WORD_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());
    static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_\-.]+").unwrap());

    let spaced = LOWER_UPPER_RE.replace_all(text, "${1} ${2}");
    let spaced = ACRONYM_WORD_RE.replace_all(&spaced, "${1} ${2}");

    SEPARATOR_RE
        .split(&spaced)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
