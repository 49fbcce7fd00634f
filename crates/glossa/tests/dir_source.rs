//! End-to-end tests against a language directory on disk.

use std::fs;
use std::sync::Arc;

use glossa::preference::{FilePreferenceStore, MemoryPreferenceStore};
use glossa::source::{CatalogSource, DirSource, SourceError};
use glossa::{LanguageCode, Localizer, SessionState};
use tempfile::TempDir;

fn language_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("languages.json"),
        r#"{"availableLanguages": ["en", "hu"], "defaultLanguage": "hu"}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("en.json"),
        r#"{"tabs": {"write": "Write"}, "write": {"readerStatus": {"connected": "Connected"}}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("hu.json"),
        r#"{"tabs": {"write": "Írás"}, "write": {"readerStatus": {"connected": "Csatlakozva"}}}"#,
    )
    .unwrap();
    dir
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = language_dir();
    let source = DirSource::new(dir.path());

    let err = source.fetch("de.json").await.unwrap_err();
    assert!(matches!(err, SourceError::NotFound { ref path } if path == "de.json"));
    assert!(!source.exists("de.json").await);
    assert!(source.exists("en.json").await);
}

#[tokio::test]
async fn directories_do_not_count_as_catalogs() {
    let dir = language_dir();
    fs::create_dir(dir.path().join("fr.json")).unwrap();
    assert!(!DirSource::new(dir.path()).exists("fr.json").await);
}

#[tokio::test]
async fn preference_survives_restart() {
    let languages = language_dir();
    let config = TempDir::new().unwrap();

    let build = || {
        Localizer::builder()
            .source(Arc::new(DirSource::new(languages.path())))
            .preferences(Arc::new(FilePreferenceStore::new(config.path())))
            .build()
    };

    let mut first = build();
    first.init().await.unwrap();
    assert_eq!(first.t("write.readerStatus.connected"), "Csatlakozva");
    first.set_language(&"en".into()).await.unwrap();

    let mut second = build();
    second.init().await.unwrap();
    assert_eq!(second.current_language(), &LanguageCode::from("en"));
    assert_eq!(second.t("write.readerStatus.connected"), "Connected");
}

#[tokio::test]
async fn rediscover_replaces_a_current_language_that_disappeared() {
    let dir = language_dir();
    let mut l = Localizer::builder()
        .source(Arc::new(DirSource::new(dir.path())))
        .preferences(Arc::new(MemoryPreferenceStore::new()))
        .build();
    l.init().await.unwrap();
    l.set_language(&"en".into()).await.unwrap();
    let mut events = l.subscribe();

    fs::remove_file(dir.path().join("en.json")).unwrap();
    let available = l.rediscover().await.unwrap();

    assert_eq!(available, vec![LanguageCode::from("hu")]);
    assert!(available.contains(l.current_language()));
    assert_eq!(l.current_language(), &LanguageCode::from("hu"));
    assert_eq!(l.t("write.readerStatus.connected"), "Csatlakozva");
    let event = events.try_recv().unwrap();
    assert_eq!(event.requested, "hu");
    assert_eq!(event.served, "hu");
}

#[tokio::test]
async fn set_language_after_failed_reinit_is_a_no_op() {
    let dir = language_dir();
    let mut l = Localizer::builder()
        .source(Arc::new(DirSource::new(dir.path())))
        .default_language("en")
        .build();
    l.init().await.unwrap();
    assert_eq!(l.state(), SessionState::Ready);

    // Only a broken catalog remains and the configured default is gone.
    for name in ["languages.json", "en.json", "hu.json"] {
        fs::remove_file(dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("de.json"), "{").unwrap();
    assert!(l.init().await.is_err());
    assert_eq!(l.state(), SessionState::Unset);

    assert!(!l.set_language(&"de".into()).await.unwrap());
    assert_eq!(l.state(), SessionState::Unset);
}
