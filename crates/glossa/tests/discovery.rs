//! Integration tests for language discovery strategies.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use glossa::engine::{Discovery, DiscoveryStrategy};
use glossa::source::{CatalogSource, MemorySource, SourceError, SourceRequest};
use glossa::LanguageCode;
use tokio::sync::Barrier;

fn codes(raw: &[&str]) -> Vec<LanguageCode> {
    raw.iter().copied().map(LanguageCode::from).collect()
}

/// Serves bodies on fetch but answers every existence check with "absent",
/// like a server that rejects HEAD requests.
struct NoHeadSource {
    bodies: BTreeMap<String, String>,
}

#[async_trait]
impl CatalogSource for NoHeadSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        self.bodies
            .get(path)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| SourceError::NotFound { path: path.to_string() })
    }

    async fn exists(&self, _path: &str) -> bool {
        false
    }
}

/// Existence checks only complete once every one of them is in flight.
struct GatedSource {
    gate: Barrier,
    present: Vec<&'static str>,
}

#[async_trait]
impl CatalogSource for GatedSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        Err(SourceError::NotFound { path: path.to_string() })
    }

    async fn exists(&self, path: &str) -> bool {
        self.gate.wait().await;
        self.present.contains(&path)
    }
}

// =========================================================================
// Manifest strategy
// =========================================================================

#[tokio::test]
async fn manifest_codes_are_verified_in_order() {
    let source = MemorySource::new()
        .with_resource(
            "languages.json",
            r#"{"availableLanguages": ["en", "fr", "hu"], "defaultLanguage": "hu"}"#,
        )
        .with_resource("en.json", "{}")
        .with_resource("hu.json", "{}");
    let probes = codes(&["de"]);
    let fallback = codes(&["hu"]);

    let outcome = Discovery::new(&source, &probes, &fallback).discover().await;

    assert_eq!(outcome.strategy, DiscoveryStrategy::Manifest);
    assert_eq!(outcome.languages, codes(&["en", "hu"]));
    assert_eq!(outcome.manifest_default, Some("hu".into()));
    // One probe per declared code, and the built-in candidates are not touched.
    assert!(!source.requests().contains(&SourceRequest::Probe("de.json".into())));
    assert!(source.requests().contains(&SourceRequest::Probe("fr.json".into())));
}

#[tokio::test]
async fn duplicate_manifest_codes_are_probed_once() {
    let source = MemorySource::new()
        .with_resource("languages.json", r#"{"availableLanguages": ["en", "en"]}"#)
        .with_resource("en.json", "{}");
    let outcome = Discovery::new(&source, &[], &[]).discover().await;

    assert_eq!(outcome.languages, codes(&["en"]));
    let probes = source
        .requests()
        .into_iter()
        .filter(|r| matches!(r, SourceRequest::Probe(_)))
        .count();
    assert_eq!(probes, 1);
}

// =========================================================================
// Probe strategy
// =========================================================================

#[tokio::test]
async fn missing_manifest_falls_through_to_probing() {
    let source = MemorySource::new()
        .with_resource("de.json", "{}")
        .with_resource("en.json", "{}");
    let probes = codes(&["hu", "en", "de"]);
    let fallback = codes(&["hu"]);

    let outcome = Discovery::new(&source, &probes, &fallback).discover().await;

    assert_eq!(outcome.strategy, DiscoveryStrategy::Probe);
    assert_eq!(outcome.languages, codes(&["en", "de"]));
    assert_eq!(outcome.manifest_default, None);
}

#[tokio::test]
async fn malformed_manifest_falls_through_to_probing() {
    let source = MemorySource::new()
        .with_resource("languages.json", r#"{"languages": ["en"]}"#)
        .with_resource("en.json", "{}");
    let probes = codes(&["en"]);

    let outcome = Discovery::new(&source, &probes, &[]).discover().await;
    assert_eq!(outcome.strategy, DiscoveryStrategy::Probe);
}

#[tokio::test]
async fn manifest_with_no_verified_codes_falls_through_but_keeps_default() {
    let source = MemorySource::new()
        .with_resource(
            "languages.json",
            r#"{"availableLanguages": ["fr"], "defaultLanguage": "fr"}"#,
        )
        .with_resource("en.json", "{}");
    let probes = codes(&["en"]);

    let outcome = Discovery::new(&source, &probes, &[]).discover().await;

    assert_eq!(outcome.strategy, DiscoveryStrategy::Probe);
    assert_eq!(outcome.languages, codes(&["en"]));
    assert_eq!(outcome.manifest_default, Some("fr".into()));
}

#[tokio::test]
async fn probes_run_concurrently_and_one_failure_does_not_block_the_rest() {
    let probes = codes(&["hu", "en", "de"]);
    let source = GatedSource { gate: Barrier::new(probes.len()), present: vec!["hu.json", "de.json"] };

    let discovery = Discovery::new(&source, &probes, &[]);
    let outcome = tokio::time::timeout(Duration::from_secs(5), discovery.discover())
        .await
        .expect("probes were awaited one at a time");

    assert_eq!(outcome.strategy, DiscoveryStrategy::Probe);
    assert_eq!(outcome.languages, codes(&["hu", "de"]));
}

// =========================================================================
// Fetch verification and hardcoded fallback
// =========================================================================

#[tokio::test]
async fn failing_existence_checks_fall_back_to_full_fetch() {
    let source = NoHeadSource {
        bodies: BTreeMap::from([
            ("en.json".to_string(), r#"{"hello": "Hello"}"#.to_string()),
            ("de.json".to_string(), r#"{"hello": "Hallo"}"#.to_string()),
        ]),
    };
    let probes = codes(&["hu", "en", "de"]);
    let fallback = codes(&["hu", "en", "de"]);

    let outcome = Discovery::new(&source, &probes, &fallback).discover().await;

    assert_eq!(outcome.strategy, DiscoveryStrategy::Fetch);
    assert_eq!(outcome.languages, codes(&["en", "de"]));
}

#[tokio::test]
async fn fetch_all_keeps_order_and_drops_duplicates() {
    let source = NoHeadSource {
        bodies: BTreeMap::from([
            ("de.json".to_string(), "{}".to_string()),
            ("hu.json".to_string(), "{}".to_string()),
        ]),
    };
    let discovery = Discovery::new(&source, &[], &[]);

    let found = discovery.fetch_all(&codes(&["de", "fr", "hu", "de"])).await;
    assert_eq!(found, codes(&["de", "hu"]));
}

#[tokio::test]
async fn nothing_verified_uses_fallback_list() {
    let source = MemorySource::new();
    let probes = codes(&["hu", "en"]);
    let fallback = codes(&["hu", "en", "de"]);

    let outcome = Discovery::new(&source, &probes, &fallback).discover().await;

    assert_eq!(outcome.strategy, DiscoveryStrategy::Fallback);
    assert_eq!(outcome.languages, fallback);
    // Each fallback code was tried with a full fetch before being trusted.
    assert!(source.requests().contains(&SourceRequest::Fetch("de.json".into())));
}

// =========================================================================
// Verification
// =========================================================================

#[tokio::test]
async fn verify_manifest_requires_every_declared_catalog() {
    let manifest = r#"{"availableLanguages": ["en", "hu"]}"#;
    let complete = MemorySource::new()
        .with_resource("languages.json", manifest)
        .with_resource("en.json", "{}")
        .with_resource("hu.json", "{}");
    let partial = MemorySource::new()
        .with_resource("languages.json", manifest)
        .with_resource("en.json", "{}");

    assert!(Discovery::new(&complete, &[], &[]).verify_manifest().await);
    assert!(!Discovery::new(&partial, &[], &[]).verify_manifest().await);
}

#[tokio::test]
async fn verify_without_manifest_is_false() {
    let source = MemorySource::new().with_resource("en.json", "{}");
    assert!(!Discovery::new(&source, &[], &[]).verify_manifest().await);
}

#[tokio::test]
async fn verify_empty_manifest_is_true() {
    let source =
        MemorySource::new().with_resource("languages.json", r#"{"availableLanguages": []}"#);
    assert!(Discovery::new(&source, &[], &[]).verify_manifest().await);
}
