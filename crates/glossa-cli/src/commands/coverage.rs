//! Coverage command implementation.

use std::collections::BTreeSet;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::Args;
use glossa::parser::parse_catalog;
use glossa::Catalog;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;

use crate::output::table::{format_coverage_table, LanguageCoverage};
use crate::output::CatalogDiagnostic;

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Directory containing `<code>.json` catalogs.
    #[arg(long, env = "GLOSSA_DIR", default_value = "language")]
    pub dir: PathBuf,

    /// Reference language whose keys define 100% coverage.
    #[arg(long)]
    pub source: String,

    /// Languages to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    extra: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source_path = catalog_file(&args.dir, &args.source);
    let source_catalog = read_catalog(&source_path)?;
    let source_keys: BTreeSet<String> = source_catalog.key_paths('.').into_iter().collect();
    let source_count = source_keys.len();

    let mut coverage_data: Vec<LanguageCoverage> = Vec::new();

    for lang in &args.lang {
        let lang_file = catalog_file(&args.dir, lang);

        let translated_keys: BTreeSet<String> = if lang_file.exists() {
            read_catalog(&lang_file)?.key_paths('.').into_iter().collect()
        } else {
            // File doesn't exist - all keys are missing
            BTreeSet::new()
        };

        coverage_data.push(compare_keys(lang, &source_keys, &translated_keys));
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
                extra: c.extra.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for key in &lang_coverage.missing {
                    println!("  - {}", key);
                }
            }
            if !lang_coverage.extra.is_empty() {
                println!("\nNot in {} but in {}:", args.source, lang_coverage.language);
                for key in &lang_coverage.extra {
                    println!("  + {}", key);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn catalog_file(dir: &Path, code: &str) -> PathBuf {
    dir.join(format!("{code}.json"))
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read catalog {:?}: {}", path, e))?;
    parse_catalog(content.as_bytes())
        .map_err(|e| CatalogDiagnostic::from_parse_error(path, &content, &e).into())
}

fn compare_keys(
    language: &str,
    source_keys: &BTreeSet<String>,
    translated_keys: &BTreeSet<String>,
) -> LanguageCoverage {
    LanguageCoverage {
        language: language.to_string(),
        translated: source_keys.intersection(translated_keys).count(),
        missing: source_keys.difference(translated_keys).cloned().collect(),
        extra: translated_keys.difference(source_keys).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> BTreeSet<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn compare_reports_missing_and_extra() {
        let source = keys(&["tabs.read", "tabs.write", "write.title"]);
        let translated = keys(&["tabs.write", "tabs.old"]);

        let coverage = compare_keys("de", &source, &translated);

        assert_eq!(coverage.translated, 1);
        assert_eq!(coverage.missing, vec!["tabs.read", "write.title"]);
        assert_eq!(coverage.extra, vec!["tabs.old"]);
    }
}
