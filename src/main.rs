//! Preview binary - serializes a sample article in the configured locale
//!
//! Usage:
//!   cargo run                                   # Uses translations.json if present
//!   SERIALIZER_LOCALE=fr cargo run              # Force the output locale
//!
//! Optional environment variables:
//! - SERIALIZER_LOCALE (defaults to the context's own locale)
//! - SERIALIZER_FALLBACK_LOCALE (defaults to en)
//! - SERIALIZER_CATALOG (defaults to translations.json, merged over built-in messages)
//! - SERIALIZER_CHECK_FRESHNESS (defaults to true)

use anyhow::{Context as _, Result};
use serde::Serialize;
use serializer_translation::annotation::{Annotation, RelationAnnotation, RouteAnnotation};
use serializer_translation::i18n::{Catalog, CatalogTranslator, CatalogValidator};
use serializer_translation::serializer::{
    BaseContext, Context, EventDispatcher, JsonEventSubscriber, Serializer, JSON_FORMAT,
};
use serializer_translation::{AnnotationDriver, AnnotationRegistry, Config, MetadataFactory};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Serialize)]
struct Article {
    id: u32,
    title: String,
    status: String,
}

serializer_translation::resource!(Article);

/// Messages for the sample article.
fn sample_catalog() -> Catalog {
    Catalog::new()
        .with_message("en", "draft", "Draft")
        .with_message("en", "published", "Published")
        .with_message("fr", "draft", "Brouillon")
        .with_message("fr", "published", "Publié")
        .with_message("es", "draft", "Borrador")
        .with_message("es", "published", "Publicado")
}

/// Built-in sample messages, overridden by the catalog file when it exists.
fn load_catalog(config: &Config) -> Result<Catalog> {
    let mut catalog = sample_catalog();

    if Path::new(&config.catalog_path).exists() {
        info!("Loading catalog from {}", config.catalog_path);
        catalog.merge(Catalog::from_path(&config.catalog_path)?);
    } else {
        info!(
            "Catalog {} not found, using built-in sample",
            config.catalog_path
        );
    }

    Ok(catalog)
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("serializer_translation=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let fallback = config.fallback()?;

    let catalog = load_catalog(&config)?;
    let report = CatalogValidator::validate(&catalog, fallback.as_str());
    for error in &report.errors {
        warn!("Catalog error: {}", error);
    }
    for warning in &report.warnings {
        warn!("Catalog warning: {}", warning);
    }

    let registry = AnnotationRegistry::new()
        .with_annotation::<Article>(Annotation::relation(RelationAnnotation::new(
            "self",
            RouteAnnotation::new("article_show")
                .with_parameter("id", "expr(object.id)")
                .absolute(true),
        )))
        .with_translatable::<Article>("status", None);

    let factory = MetadataFactory::new(AnnotationDriver::new(registry))
        .with_freshness_check(config.check_freshness);
    let translator = Arc::new(CatalogTranslator::new(catalog).with_fallback_locale(fallback));
    let hook = JsonEventSubscriber::new(translator.clone(), Arc::new(factory), &config);
    let serializer = Serializer::new(EventDispatcher::new().with_subscriber(Arc::new(hook)));

    let article = Article {
        id: 42,
        title: "Serializer translations".to_string(),
        status: "draft".to_string(),
    };

    let mut context = Context::from(BaseContext::new());
    let output = serializer
        .to_string_pretty(&article, JSON_FORMAT, &mut context)
        .context("Failed to serialize sample article")?;

    info!(
        "Serialized in locale {}",
        context.locale().unwrap_or("(none)")
    );
    println!("{}", output);
    println!(
        "{}",
        serde_json::to_string_pretty(&translator.metrics().report())?
    );

    Ok(())
}
