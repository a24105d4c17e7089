//! Internationalization (i18n): locales, message catalogs and translators.
//!
//! # Architecture
//!
//! - `locale`: Validated locale tag with a language fallback chain
//! - `catalog`: Messages keyed by locale, domain and source key
//! - `translator`: The `Translator` seam used by the serialization hook, and the
//!   catalog-backed implementation
//! - `validator`: Catalog completeness and placeholder checks
//! - `metrics`: Lookup counters for a translator
//!
//! # Example
//!
//! ```rust,ignore
//! use serializer_translation::i18n::{Catalog, CatalogTranslator, Locale};
//!
//! let catalog = Catalog::from_path("translations.json")?;
//! let translator = CatalogTranslator::new(catalog)
//!     .with_fallback_locale(Locale::parse("en")?);
//! ```

mod catalog;
mod locale;
mod metrics;
mod translator;
mod validator;

pub use catalog::{Catalog, DEFAULT_DOMAIN};
pub use locale::{Locale, DEFAULT_LOCALE};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use translator::{CatalogTranslator, Translator};
pub use validator::{CatalogValidator, ValidationReport};
