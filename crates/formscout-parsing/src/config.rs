use regex::Regex;

use formscout_core::config_file::ConfigFile;

use crate::patterns::LabelPattern;

/// Default minimum text-match score accepted as a label.
pub const DEFAULT_LABEL_THRESHOLD: f64 = 0.5;
/// Default confidence for labels inferred from naming conventions.
pub const DEFAULT_INFERRED_CONFIDENCE: f64 = 0.7;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for the label inference pipeline.
///
/// Regex fields are `Option<Regex>`: `None` means "use the built-in default".
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── text.rs ──
    /// Regex for numbered/lettered/parenthetical list markers.
    pub(crate) list_marker_re: Option<Regex>,
    /// Regex for `Part 1` / `Section 2` / `Item 3` references.
    pub(crate) reference_re: Option<Regex>,
    /// Case-sensitive substrings that flag a line as a likely label.
    pub(crate) label_vocabulary: ListOverride<String>,

    // ── patterns.rs ──
    /// Ordered field-name substring → label dictionary.
    pub(crate) label_patterns: ListOverride<LabelPattern>,

    // ── inference.rs ──
    /// Minimum similarity score for a text line to be accepted as the label.
    pub(crate) label_threshold: f64,
    /// Confidence assigned to dictionary, line/part and checkbox labels.
    pub(crate) inferred_confidence: f64,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            list_marker_re: None,
            reference_re: None,
            label_vocabulary: ListOverride::Default,
            label_patterns: ListOverride::Default,
            label_threshold: DEFAULT_LABEL_THRESHOLD,
            inferred_confidence: DEFAULT_INFERRED_CONFIDENCE,
        }
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    list_marker_re: Option<String>,
    reference_re: Option<String>,
    label_vocabulary: ListOverride<String>,
    label_patterns: ListOverride<LabelPattern>,
    label_threshold: Option<f64>,
    inferred_confidence: Option<f64>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from the `[matching]` section of a config file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let mut builder = Self::new();
        let Some(matching) = config.matching.as_ref() else {
            return builder;
        };
        if let Some(threshold) = matching.label_threshold {
            builder = builder.label_threshold(threshold);
        }
        if let Some(confidence) = matching.inferred_confidence {
            builder = builder.inferred_confidence(confidence);
        }
        for word in matching.extra_label_vocabulary.iter().flatten() {
            builder = builder.add_label_word(word.clone());
        }
        for entry in matching.extra_patterns.iter().flatten() {
            builder = builder.add_label_pattern(LabelPattern::new(&entry.key, &entry.label));
        }
        builder
    }

    // ── Classifier regexes ──

    pub fn list_marker_regex(mut self, pattern: &str) -> Self {
        self.list_marker_re = Some(pattern.to_string());
        self
    }

    pub fn reference_regex(mut self, pattern: &str) -> Self {
        self.reference_re = Some(pattern.to_string());
        self
    }

    // ── Label vocabulary ──

    pub fn set_label_vocabulary(mut self, words: Vec<String>) -> Self {
        self.label_vocabulary = ListOverride::Replace(words);
        self
    }

    pub fn add_label_word(mut self, word: String) -> Self {
        match &mut self.label_vocabulary {
            ListOverride::Extend(v) => v.push(word),
            _ => self.label_vocabulary = ListOverride::Extend(vec![word]),
        }
        self
    }

    // ── Label dictionary ──

    pub fn set_label_patterns(mut self, patterns: Vec<LabelPattern>) -> Self {
        self.label_patterns = ListOverride::Replace(patterns);
        self
    }

    pub fn add_label_pattern(mut self, pattern: LabelPattern) -> Self {
        match &mut self.label_patterns {
            ListOverride::Extend(v) => v.push(pattern),
            _ => self.label_patterns = ListOverride::Extend(vec![pattern]),
        }
        self
    }

    // ── Scalars ──

    pub fn label_threshold(mut self, threshold: f64) -> Self {
        self.label_threshold = Some(threshold);
        self
    }

    pub fn inferred_confidence(mut self, confidence: f64) -> Self {
        self.inferred_confidence = Some(confidence);
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };

        Ok(ParsingConfig {
            list_marker_re: compile(self.list_marker_re)?,
            reference_re: compile(self.reference_re)?,
            label_vocabulary: self.label_vocabulary,
            label_patterns: self.label_patterns,
            label_threshold: self
                .label_threshold
                .unwrap_or(DEFAULT_LABEL_THRESHOLD)
                .clamp(0.0, 1.0),
            inferred_confidence: self
                .inferred_confidence
                .unwrap_or(DEFAULT_INFERRED_CONFIDENCE)
                .clamp(0.0, 1.0),
        })
    }
}
