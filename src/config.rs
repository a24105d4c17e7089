use crate::i18n::{Locale, DEFAULT_LOCALE};
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Translation
    pub locale: Option<String>,
    pub fallback_locale: String,
    pub catalog_path: String,

    // Metadata
    pub check_freshness: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: None,
            fallback_locale: DEFAULT_LOCALE.to_string(),
            catalog_path: "translations.json".to_string(),
            check_freshness: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // Translation - unset or empty means "keep the context's own locale"
            locale: match std::env::var("SERIALIZER_LOCALE") {
                Ok(value) if !value.trim().is_empty() => Some(
                    Locale::parse(&value)
                        .context("SERIALIZER_LOCALE is not a valid locale")?
                        .to_string(),
                ),
                _ => None,
            },
            fallback_locale: match std::env::var("SERIALIZER_FALLBACK_LOCALE") {
                Ok(value) => Locale::parse(&value)
                    .context("SERIALIZER_FALLBACK_LOCALE is not a valid locale")?
                    .to_string(),
                Err(_) => defaults.fallback_locale,
            },
            catalog_path: std::env::var("SERIALIZER_CATALOG")
                .unwrap_or(defaults.catalog_path),

            // Metadata
            check_freshness: std::env::var("SERIALIZER_CHECK_FRESHNESS")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.check_freshness),
        })
    }

    /// The fallback locale as a validated [`Locale`].
    pub fn fallback(&self) -> Result<Locale> {
        Locale::parse(&self.fallback_locale)
            .with_context(|| format!("Invalid fallback locale '{}'", self.fallback_locale))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
