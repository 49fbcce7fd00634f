//! Implementation of the `glossa check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use glossa::parser::{parse_catalog, parse_manifest, ParseError};
use glossa::source::MANIFEST_PATH;
use miette::Report;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::CatalogDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (catalog `.json` files or `languages.json`)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a single checked file.
#[derive(Debug, Serialize)]
struct CheckResult {
    path: String,
    ok: bool,
    /// Leaf count for catalogs, declared language count for the manifest.
    entries: usize,
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results = Vec::with_capacity(args.files.len());

    for path in &args.files {
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                results.push(CheckResult {
                    path: path.display().to_string(),
                    ok: false,
                    entries: 0,
                    error: Some(format!("cannot read file: {e}")),
                });
                continue;
            }
        };

        let result = match check_content(path, &content) {
            Ok(entries) => CheckResult {
                path: path.display().to_string(),
                ok: true,
                entries,
                error: None,
            },
            Err(e) => {
                if !args.json {
                    let diagnostic = CatalogDiagnostic::from_parse_error(path, &content, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                CheckResult {
                    path: path.display().to_string(),
                    ok: false,
                    entries: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(result);
    }

    if args.json {
        let output = serde_json::to_string_pretty(&results)
            .map_err(|e| miette::miette!("Failed to serialize results: {}", e))?;
        println!("{}", output);
    } else {
        for result in &results {
            match &result.error {
                None => println!(
                    "{} {} ({} entries)",
                    "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                    result.path,
                    result.entries
                ),
                Some(error) => println!(
                    "{} {}: {}",
                    "error".if_supports_color(Stream::Stdout, |t| t.red()),
                    result.path,
                    error
                ),
            }
        }
    }

    if results.iter().all(|r| r.ok) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

/// Decode `content` as a manifest or a catalog, depending on the file name.
fn check_content(path: &Path, content: &str) -> Result<usize, ParseError> {
    let is_manifest = path
        .file_name()
        .is_some_and(|name| name == MANIFEST_PATH);
    if is_manifest {
        parse_manifest(content.as_bytes()).map(|m| m.available_languages.len())
    } else {
        parse_catalog(content.as_bytes()).map(|c| c.leaf_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_is_detected_by_file_name() {
        let manifest = r#"{"availableLanguages": ["en", "hu"]}"#;
        assert_eq!(check_content(Path::new("lang/languages.json"), manifest).unwrap(), 2);
        // The same body is a valid catalog too, but it has no string leaves.
        assert_eq!(check_content(Path::new("lang/en.json"), manifest).unwrap(), 0);
    }

    #[test]
    fn catalog_missing_manifest_fields_fail_as_manifest() {
        let body = r#"{"tabs": {"write": "Write"}}"#;
        assert!(check_content(Path::new("languages.json"), body).is_err());
        assert_eq!(check_content(Path::new("en.json"), body).unwrap(), 1);
    }
}
