use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub tools: Option<ToolsConfig>,
    pub matching: Option<MatchingConfig>,
    pub text: Option<TextConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Command or path used to run pdftk (default: `pdftk` on `PATH`).
    pub pdftk_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum text-match score accepted as a label.
    pub label_threshold: Option<f64>,
    /// Confidence assigned to labels inferred from naming conventions.
    pub inferred_confidence: Option<f64>,
    /// Words appended to the built-in label vocabulary.
    pub extra_label_vocabulary: Option<Vec<String>>,
    /// Dictionary entries appended after the built-in ones.
    pub extra_patterns: Option<Vec<PatternEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextConfig {
    pub footer_exclusion: Option<f32>,
    pub header_exclusion: Option<f32>,
}

/// Platform config directory path: `<config_dir>/formscout/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("formscout").join("config.toml"))
}

/// Load config by cascading CWD `.formscout.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".formscout.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        tools: Some(ToolsConfig {
            pdftk_path: overlay
                .tools
                .as_ref()
                .and_then(|t| t.pdftk_path.clone())
                .or_else(|| base.tools.as_ref().and_then(|t| t.pdftk_path.clone())),
        }),
        matching: Some(MatchingConfig {
            label_threshold: overlay
                .matching
                .as_ref()
                .and_then(|m| m.label_threshold)
                .or_else(|| base.matching.as_ref().and_then(|m| m.label_threshold)),
            inferred_confidence: overlay
                .matching
                .as_ref()
                .and_then(|m| m.inferred_confidence)
                .or_else(|| base.matching.as_ref().and_then(|m| m.inferred_confidence)),
            extra_label_vocabulary: overlay
                .matching
                .as_ref()
                .and_then(|m| m.extra_label_vocabulary.clone())
                .or_else(|| {
                    base.matching
                        .as_ref()
                        .and_then(|m| m.extra_label_vocabulary.clone())
                }),
            extra_patterns: overlay
                .matching
                .as_ref()
                .and_then(|m| m.extra_patterns.clone())
                .or_else(|| base.matching.as_ref().and_then(|m| m.extra_patterns.clone())),
        }),
        text: Some(TextConfig {
            footer_exclusion: overlay
                .text
                .as_ref()
                .and_then(|t| t.footer_exclusion)
                .or_else(|| base.text.as_ref().and_then(|t| t.footer_exclusion)),
            header_exclusion: overlay
                .text
                .as_ref()
                .and_then(|t| t.header_exclusion)
                .or_else(|| base.text.as_ref().and_then(|t| t.header_exclusion)),
        }),
    }
}
