//! Implementation of the `glossa verify` command.

use std::path::PathBuf;
use std::sync::Arc;

use glossa::source::DirSource;
use glossa::{LanguageInfo, Localizer};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::output::table::format_languages_table;

/// Arguments for the verify command.
#[derive(Debug, clap::Args)]
pub struct VerifyArgs {
    /// Directory containing `languages.json` and `<code>.json` catalogs
    #[arg(long, env = "GLOSSA_DIR", default_value = "language")]
    pub dir: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct VerifyJson {
    verified: bool,
    current: String,
    default: String,
    languages: Vec<LanguageInfo>,
}

/// Run the verify command.
///
/// Exits with `DATAERR` when the manifest is missing or declares a language
/// whose catalog does not exist.
pub async fn run_verify(args: VerifyArgs) -> miette::Result<i32> {
    let mut localizer = Localizer::builder()
        .source(Arc::new(DirSource::new(&args.dir)))
        .build();

    let verified = localizer.verify_catalogs().await;
    localizer
        .init()
        .await
        .map_err(|e| miette::miette!("Failed to initialize from {}: {}", args.dir.display(), e))?;

    if args.json {
        let output = VerifyJson {
            verified,
            current: localizer.current_language().to_string(),
            default: localizer.default_language().to_string(),
            languages: localizer.available_languages(),
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| miette::miette!("Failed to serialize result: {}", e))?;
        println!("{}", json);
    } else {
        let table =
            format_languages_table(&localizer.available_languages(), &localizer.loaded_languages());
        println!("{}", table);
        println!("Default language: {}", localizer.default_language());
        if verified {
            println!(
                "{}",
                "All manifest languages verified".if_supports_color(Stream::Stdout, |t| t.green())
            );
        } else {
            println!(
                "{}",
                "Some manifest languages are missing; check languages.json"
                    .if_supports_color(Stream::Stdout, |t| t.red())
            );
        }
    }

    if verified {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
