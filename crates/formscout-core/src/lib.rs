use std::fmt;

pub mod backend;
pub mod config_file;

// Re-export for convenience
pub use backend::{BackendError, DumpFileBackend, FieldDumpBackend, TextBackend, TextFileBackend};

/// State option meaning "unselected" on checkboxes and radio buttons.
pub const OFF_STATE: &str = "Off";

/// Form field type tag as reported by the field dump.
///
/// Unrecognised tags are carried through unchanged in [`FieldType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Button,
    Choice,
    Sig,
    Other(String),
}

impl FieldType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Text" => Self::Text,
            "Button" => Self::Button,
            "Choice" => Self::Choice,
            "Sig" => Self::Sig,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "Text",
            Self::Button => "Button",
            Self::Choice => "Choice",
            Self::Sig => "Sig",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One form field parsed from the field dump.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRecord {
    pub name: String,
    pub field_type: Option<FieldType>,
    pub flags: Option<String>,
    pub value: Option<String>,
    pub justification: Option<String>,
    /// `None` when the dump gave no limit or a non-numeric one.
    pub max_length: Option<u32>,
    /// Every selectable state in dump order, including [`OFF_STATE`].
    pub state_options: Vec<String>,
}

impl FieldRecord {
    /// State options without `"Off"` and empty entries.
    pub fn options(&self) -> Vec<&str> {
        self.state_options
            .iter()
            .map(String::as_str)
            .filter(|o| !o.is_empty() && *o != OFF_STATE)
            .collect()
    }

    /// Type tag for grouping, `"Unknown"` when the dump gave none.
    pub fn type_tag(&self) -> &str {
        self.field_type
            .as_ref()
            .map(FieldType::as_str)
            .unwrap_or("Unknown")
    }

    pub fn is_type(&self, field_type: &FieldType) -> bool {
        self.field_type.as_ref() == Some(field_type)
    }

    /// Values to use when filling a checkbox/radio, if the field has states.
    pub fn checkbox_values(&self) -> Option<CheckboxValues> {
        if self.state_options.is_empty() {
            return None;
        }
        Some(CheckboxValues {
            to_check: self
                .state_options
                .iter()
                .filter(|o| o.as_str() != OFF_STATE)
                .cloned()
                .collect(),
            to_uncheck: OFF_STATE.to_string(),
        })
    }
}

/// Fill values for a selectable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxValues {
    pub to_check: Vec<String>,
    pub to_uncheck: String,
}

/// Raw page text returned by a [`TextBackend`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub full_text: String,
    pub page_count: usize,
}

/// One non-empty line of page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    pub text: String,
    /// Zero-based line index in the extracted text, counting empty lines.
    pub line_number: usize,
    pub is_likely_label: bool,
}

/// Decomposition of a raw field name into words and structural references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNameParts {
    pub original: String,
    pub cleaned: String,
    pub words: Vec<String>,
    pub line: Option<String>,
    pub section: Option<String>,
}

/// Which rule of the inference cascade produced a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSource {
    TextMatch,
    Dictionary,
    LineRef,
    PartRef,
    Checkbox,
    NoMatch,
}

impl LabelSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextMatch => "text_match",
            Self::Dictionary => "dictionary",
            Self::LineRef => "line_ref",
            Self::PartRef => "part_ref",
            Self::Checkbox => "checkbox",
            Self::NoMatch => "none",
        }
    }
}

/// A [`FieldRecord`] with its inferred label.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedField {
    pub record: FieldRecord,
    /// Never equal to `record.name`.
    pub label: Option<String>,
    /// In `[0, 1]`; `0.0` when `label` is `None`.
    pub label_confidence: f64,
    pub label_source: LabelSource,
    pub field_name_parts: FieldNameParts,
}

/// Coarse grouping used by reports, splitting checkbox-like buttons from
/// push buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    Text,
    Checkbox,
    Button,
    Choice,
    Signature,
    Other,
}

impl FieldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Checkbox => "checkbox",
            Self::Button => "button",
            Self::Choice => "choice",
            Self::Signature => "signature",
            Self::Other => "other",
        }
    }
}

/// Aggregate counts over one document's fields. Keys keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSummary {
    pub total_fields: usize,
    pub by_type: Vec<(String, usize)>,
    pub by_category: Vec<(FieldCategory, usize)>,
    pub by_part: Vec<(String, usize)>,
}

/// Result of running the label pipeline over one document.
#[derive(Debug, Clone, Default)]
pub struct FormAnalysis {
    pub fields: Vec<EnrichedField>,
    pub summary: FormSummary,
    pub page_count: usize,
    /// `false` when text extraction failed and labels were inferred from
    /// names alone.
    pub text_available: bool,
}
