//! Catalog validation.
//!
//! Compares every locale of a catalog against a reference locale: keys the
//! reference defines but a locale lacks, and messages whose placeholders
//! (`{name}` or `%name%`) differ from the reference message.

use crate::i18n::Catalog;
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the catalog unusable for the reference locale
    pub errors: Vec<String>,

    /// Missing or suspicious translations
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for translation catalogs.
pub struct CatalogValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate `catalog` against the messages of `reference_locale`.
    pub fn validate(catalog: &Catalog, reference_locale: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !catalog.has_locale(reference_locale) {
            report.errors.push(format!(
                "Reference locale '{}' is missing from the catalog",
                reference_locale
            ));
            return report;
        }

        let domains: Vec<&str> = catalog.domains(reference_locale).collect();

        for locale in catalog.locales().filter(|locale| *locale != reference_locale) {
            for domain in &domains {
                for (key, reference) in catalog.messages(reference_locale, domain) {
                    match catalog.get(locale, domain, key) {
                        None => report.warnings.push(format!(
                            "Missing translation: '{}' in {}/{}",
                            key, locale, domain
                        )),
                        Some(translated) => {
                            let expected = Self::extract_placeholders(reference);
                            let found = Self::extract_placeholders(translated);
                            if expected != found {
                                report.warnings.push(format!(
                                    "Placeholder mismatch for '{}' in {}/{}: \
                                     expected {:?}, found {:?}",
                                    key, locale, domain, expected, found
                                ));
                            }
                        }
                    }
                }
            }
        }

        report
    }

    /// Extract placeholders, sorted so that reordering in a translation is allowed.
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| {
            Regex::new(r"\{[A-Za-z0-9_.]+\}|%[A-Za-z0-9_.]+%")
                .expect("placeholder pattern is valid")
        });

        let mut placeholders: Vec<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        placeholders.sort();
        placeholders
    }
}
