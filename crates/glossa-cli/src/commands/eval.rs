//! Implementation of the `glossa eval` command.

use std::path::PathBuf;
use std::sync::Arc;

use glossa::preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use glossa::source::DirSource;
use glossa::{LanguageCode, Localizer, Params};
use serde::Serialize;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Directory containing `languages.json` and `<code>.json` catalogs
    #[arg(long, env = "GLOSSA_DIR", default_value = "language")]
    pub dir: PathBuf,

    /// Language code to resolve in (e.g., en, hu, de); defaults to the
    /// language `init` picks
    #[arg(long)]
    pub lang: Option<String>,

    /// Read and save the language preference in the user config directory
    #[arg(long)]
    pub remember: bool,

    /// Dotted key path to resolve (e.g., tabs.write)
    #[arg(long, required = true)]
    pub key: String,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub language: String,
    pub served: Option<String>,
    pub result: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Run the eval command.
pub async fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let preferences: Arc<dyn PreferenceStore> = if args.remember {
        let store = FilePreferenceStore::for_app("glossa")
            .map_err(|e| miette::miette!("Cannot remember the language: {}", e))?;
        Arc::new(store)
    } else {
        Arc::new(MemoryPreferenceStore::new())
    };
    let mut localizer = Localizer::builder()
        .source(Arc::new(DirSource::new(&args.dir)))
        .preferences(preferences)
        .build();

    localizer
        .init()
        .await
        .map_err(|e| miette::miette!("Failed to initialize from {}: {}", args.dir.display(), e))?;

    if let Some(requested) = &args.lang {
        let lang = LanguageCode::from(requested.as_str());
        let switched = localizer
            .set_language(&lang)
            .await
            .map_err(|e| miette::miette!("Failed to load language '{}': {}", lang, e))?;
        if !switched {
            eprintln!("Language '{}' is not available in {}", lang, args.dir.display());
            return Ok(exitcode::DATAERR);
        }
    }
    let lang = localizer.current_language().clone();

    let params: Params = args.params.into_iter().collect();
    let result = localizer.t_with(&args.key, &params);

    if args.json {
        let output = EvalResult {
            language: lang.to_string(),
            served: localizer.served_language().map(ToString::to_string),
            result,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| miette::miette!("Failed to serialize result: {}", e))?;
        println!("{}", json);
    } else {
        println!("{}", result);
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("novalue").is_err());
    }
}
