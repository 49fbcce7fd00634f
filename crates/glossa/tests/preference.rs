//! Integration tests for preference storage.

use std::path::Path;

use glossa::LanguageCode;
use glossa::preference::{
    FilePreferenceStore, MemoryPreferenceStore, PREFERENCE_KEY, PreferenceError, PreferenceStore,
};
use tempfile::TempDir;

#[tokio::test]
async fn file_store_missing_entry_is_none() {
    let dir = TempDir::new().unwrap();
    let store = FilePreferenceStore::new(dir.path());
    assert_eq!(store.load().await, None);
}

#[tokio::test]
async fn file_store_round_trip_as_plain_text() {
    let dir = TempDir::new().unwrap();
    let store = FilePreferenceStore::new(dir.path().join("nested"));

    store.save(&"en".into()).await.unwrap();

    assert_eq!(store.load().await, Some(LanguageCode::from("en")));
    let raw = std::fs::read_to_string(dir.path().join("nested").join(PREFERENCE_KEY)).unwrap();
    assert_eq!(raw, "en");
}

#[tokio::test]
async fn file_store_trims_whitespace_and_ignores_blank() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(PREFERENCE_KEY), "hu\n").unwrap();
    let store = FilePreferenceStore::new(dir.path());
    assert_eq!(store.load().await, Some(LanguageCode::from("hu")));

    std::fs::write(dir.path().join(PREFERENCE_KEY), "  \n").unwrap();
    assert_eq!(store.load().await, None);
}

#[tokio::test]
async fn memory_store_overwrites() {
    let store = MemoryPreferenceStore::with_value("hu");
    store.save(&"de".into()).await.unwrap();
    assert_eq!(store.load().await, Some(LanguageCode::from("de")));
}

#[test]
fn app_store_lives_under_the_platform_config_dir() {
    match (FilePreferenceStore::for_app("glossa"), dirs::config_dir()) {
        (Ok(store), Some(config)) => {
            assert_eq!(store.path(), config.join("glossa").join(PREFERENCE_KEY));
            assert!(store.path().ends_with(Path::new("glossa").join(PREFERENCE_KEY)));
        }
        (Err(PreferenceError::NoConfigDir), None) => {}
        (store, config) => panic!("unexpected combination: {store:?} with {config:?}"),
    }
}
