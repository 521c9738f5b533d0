use std::io::Write;

use formscout_core::{FormAnalysis, LabelSource};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Counts of how each field got (or didn't get) its label.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LabelTally {
    pub matched: usize,
    pub inferred: usize,
    pub unlabelled: usize,
}

pub fn tally_labels(analysis: &FormAnalysis) -> LabelTally {
    let mut tally = LabelTally::default();
    for field in &analysis.fields {
        match field.label_source {
            LabelSource::TextMatch => tally.matched += 1,
            LabelSource::NoMatch => tally.unlabelled += 1,
            _ => tally.inferred += 1,
        }
    }
    tally
}

/// Print the one-screen summary after a form has been analysed.
pub fn print_summary(
    w: &mut dyn Write,
    name: &str,
    analysis: &FormAnalysis,
    color: ColorMode,
) -> std::io::Result<()> {
    let tally = tally_labels(analysis);

    if analysis.page_count > 0 {
        writeln!(
            w,
            "Extracted {} fields from {} ({} pages)",
            analysis.fields.len(),
            name,
            analysis.page_count
        )?;
    } else {
        writeln!(w, "Extracted {} fields from {}", analysis.fields.len(), name)?;
    }

    if !analysis.text_available {
        let msg = "Page text unavailable; labels inferred from field names only";
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }

    if color.enabled() {
        writeln!(
            w,
            "  {} matched from page text | {} inferred from names | {} unlabelled",
            tally.matched.to_string().green(),
            tally.inferred.to_string().yellow(),
            tally.unlabelled.to_string().dimmed()
        )?;
    } else {
        writeln!(
            w,
            "  {} matched from page text | {} inferred from names | {} unlabelled",
            tally.matched, tally.inferred, tally.unlabelled
        )?;
    }
    Ok(())
}
