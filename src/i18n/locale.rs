//! Locale type: validated locale tag with language fallback.

use anyhow::{bail, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Locale used when neither the context nor the configuration provides one.
pub const DEFAULT_LOCALE: &str = "en";

static LOCALE_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_regex() -> &'static Regex {
    LOCALE_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,3}(?:[_-][A-Za-z0-9]{2,8})*$").expect("locale pattern is valid")
    })
}

/// A validated locale tag (e.g. `en`, `fr_FR`, `pt-BR`).
///
/// The tag is kept as written; only its shape is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    tag: String,
}

impl Locale {
    /// Parse a locale tag.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the tag is a language code optionally followed by subtags
    /// * `Err` if the tag is empty or malformed
    pub fn parse(tag: &str) -> Result<Locale> {
        let tag = tag.trim();
        if tag.is_empty() {
            bail!("Locale must not be empty");
        }
        if !locale_regex().is_match(tag) {
            bail!("Invalid locale: '{}'", tag);
        }
        Ok(Locale {
            tag: tag.to_string(),
        })
    }

    /// The default locale (`en`).
    pub fn default_locale() -> Locale {
        Locale {
            tag: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// Language part of the tag (`fr` for `fr_FR`).
    pub fn language(&self) -> &str {
        self.tag
            .split(['_', '-'])
            .next()
            .unwrap_or(self.tag.as_str())
    }

    /// Whether the tag carries a region or other subtag.
    pub fn has_subtags(&self) -> bool {
        self.language().len() != self.tag.len()
    }

    /// Lookup order: this locale, its language, then `fallback`, without duplicates.
    pub fn fallback_chain<'a>(&'a self, fallback: &'a Locale) -> Vec<&'a str> {
        let mut chain = vec![self.as_str()];
        for candidate in [self.language(), fallback.as_str(), fallback.language()] {
            if !chain.contains(&candidate) {
                chain.push(candidate);
            }
        }
        chain
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl TryFrom<String> for Locale {
    type Error = anyhow::Error;

    fn try_from(tag: String) -> Result<Self> {
        Locale::parse(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag
    }
}
