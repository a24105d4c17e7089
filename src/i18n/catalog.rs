//! Message catalog: translated messages keyed by locale, domain and source key.
//!
//! Catalog files are JSON documents shaped as
//! `{ "<locale>": { "<domain>": { "<key>": "<message>" } } }`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Domain used when a translatable property does not name one.
pub const DEFAULT_DOMAIN: &str = "messages";

type Messages = BTreeMap<String, String>;

/// In-memory message catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    locales: BTreeMap<String, BTreeMap<String, Messages>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse translation catalog")
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation catalog {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid translation catalog {}", path.display()))
    }

    /// Add or replace a message.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        domain: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.locales
            .entry(locale.into())
            .or_default()
            .entry(domain.into())
            .or_default()
            .insert(key.into(), message.into());
    }

    /// Builder form of [`Catalog::insert`] using the default domain.
    pub fn with_message(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.insert(locale, DEFAULT_DOMAIN, key, message);
        self
    }

    /// Look up one message without any fallback.
    pub fn get(&self, locale: &str, domain: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|domains| domains.get(domain))
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }

    /// Merge another catalog into this one; messages from `other` win.
    pub fn merge(&mut self, other: Catalog) {
        for (locale, domains) in other.locales {
            for (domain, messages) in domains {
                for (key, message) in messages {
                    self.insert(locale.clone(), domain.clone(), key, message);
                }
            }
        }
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn domains(&self, locale: &str) -> impl Iterator<Item = &str> {
        self.locales
            .get(locale)
            .into_iter()
            .flat_map(|domains| domains.keys().map(String::as_str))
    }

    /// All `(key, message)` pairs of one locale and domain.
    pub fn messages(&self, locale: &str, domain: &str) -> impl Iterator<Item = (&str, &str)> {
        self.locales
            .get(locale)
            .and_then(|domains| domains.get(domain))
            .into_iter()
            .flat_map(|messages| {
                messages
                    .iter()
                    .map(|(key, message)| (key.as_str(), message.as_str()))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Catalog {
        Catalog::new()
            .with_message("fr", "draft", "brouillon")
            .with_message("fr", "published", "publié")
            .with_message("es", "draft", "borrador")
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_get_existing_message() {
        let catalog = sample();
        assert_eq!(catalog.get("fr", DEFAULT_DOMAIN, "draft"), Some("brouillon"));
        assert_eq!(catalog.get("es", DEFAULT_DOMAIN, "draft"), Some("borrador"));
    }

    #[test]
    fn test_get_missing_message() {
        let catalog = sample();
        assert_eq!(catalog.get("es", DEFAULT_DOMAIN, "published"), None);
        assert_eq!(catalog.get("de", DEFAULT_DOMAIN, "draft"), None);
        assert_eq!(catalog.get("fr", "articles", "draft"), None);
    }

    #[test]
    fn test_insert_replaces_message() {
        let mut catalog = sample();
        catalog.insert("fr", DEFAULT_DOMAIN, "draft", "ébauche");
        assert_eq!(catalog.get("fr", DEFAULT_DOMAIN, "draft"), Some("ébauche"));
    }

    #[test]
    fn test_locales_and_domains() {
        let mut catalog = sample();
        catalog.insert("fr", "articles", "title", "titre");

        assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["es", "fr"]);
        assert_eq!(
            catalog.domains("fr").collect::<Vec<_>>(),
            vec!["articles", DEFAULT_DOMAIN]
        );
        assert!(catalog.domains("de").next().is_none());
        assert!(catalog.has_locale("es"));
        assert!(!catalog.has_locale("de"));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut catalog = sample();
        catalog.merge(
            Catalog::new()
                .with_message("fr", "draft", "ébauche")
                .with_message("de", "draft", "Entwurf"),
        );

        assert_eq!(catalog.get("fr", DEFAULT_DOMAIN, "draft"), Some("ébauche"));
        assert_eq!(catalog.get("fr", DEFAULT_DOMAIN, "published"), Some("publié"));
        assert_eq!(catalog.get("de", DEFAULT_DOMAIN, "draft"), Some("Entwurf"));
    }

    // ==================== Loading Tests ====================

    #[test]
    fn test_from_json_str() {
        let catalog = Catalog::from_json_str(
            r#"{
                "fr": {
                    "messages": { "draft": "brouillon" },
                    "articles": { "news": "actualités" }
                }
            }"#,
        )
        .expect("Should parse");

        assert_eq!(catalog.get("fr", "messages", "draft"), Some("brouillon"));
        assert_eq!(catalog.get("fr", "articles", "news"), Some("actualités"));
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = Catalog::from_json_str(r#"{ "fr": ["not", "a", "map"] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(&path, r#"{ "es": { "messages": { "draft": "borrador" } } }"#).unwrap();

        let catalog = Catalog::from_path(&path).expect("Should load");
        assert_eq!(catalog.get("es", DEFAULT_DOMAIN, "draft"), Some("borrador"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read translation catalog"));
    }
}
