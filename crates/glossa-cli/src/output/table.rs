//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use glossa::{LanguageCode, LanguageInfo};

/// Coverage data for a single language.
pub struct LanguageCoverage {
    /// Language code (e.g., "en", "de").
    pub language: String,
    /// Number of source keys translated.
    pub translated: usize,
    /// Source keys missing from this language.
    pub missing: Vec<String>,
    /// Keys present in this language but absent from the source.
    pub extra: Vec<String>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Missing", "Extra"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, source_count),
            lang.missing.len().to_string(),
            lang.extra.len().to_string(),
        ]);
    }

    table
}

/// Format discovered languages with their load status.
pub fn format_languages_table(languages: &[LanguageInfo], loaded: &[LanguageCode]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Code", "Name", "Loaded"]);

    for info in languages {
        let is_loaded = if loaded.contains(&info.code) { "yes" } else { "" };
        table.add_row(vec![
            info.code.to_string(),
            info.display_name.clone(),
            is_loaded.to_string(),
        ]);
    }

    table
}
