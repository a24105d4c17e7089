//! Integration tests for serializer translation
//!
//! These tests drive the public API end to end: annotations are registered,
//! turned into metadata by the driver and factory, and consumed by the JSON
//! pre-serialize hook while the serializer converts objects.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

use serializer_translation::annotation::{
    Annotation, EmbeddedAnnotation, ExclusionAnnotation, RelationAnnotation, RouteAnnotation,
};
use serializer_translation::i18n::{Catalog, CatalogTranslator, CatalogValidator, Locale};
use serializer_translation::metadata::Href;
use serializer_translation::serializer::{
    BaseContext, Context, EventDispatcher, JsonEventSubscriber, SerializationContext, Serializer,
};
use serializer_translation::{
    AnnotationDriver, AnnotationRegistry, Class, Config, MetadataDriver, MetadataFactory,
    MetadataSource,
};

#[derive(Serialize)]
struct Article {
    id: u32,
    status: String,
}

#[derive(Serialize)]
struct Plain {
    status: String,
}

serializer_translation::resource!(Article, Plain);

// ==================== Test Helpers ====================

fn registry() -> AnnotationRegistry {
    AnnotationRegistry::new()
        .with_annotation::<Article>(Annotation::relation(RelationAnnotation::new(
            "self",
            RouteAnnotation::new("article_show")
                .with_parameter("id", "expr(object.id)")
                .absolute(true),
        )))
        .with_annotation::<Article>(Annotation::relation(
            RelationAnnotation::new("author", "/authors/1").with_embedded(
                EmbeddedAnnotation::new("expr(object.author)").with_exclusion(
                    ExclusionAnnotation {
                        groups: vec!["detail".to_string()],
                        ..Default::default()
                    },
                ),
            ),
        ))
        .with_annotation::<Article>(Annotation::relation_provider("article_links"))
        .with_translatable::<Article>("status", None)
        .with_translatable::<Plain>("status", None)
}

fn catalog() -> Catalog {
    Catalog::new()
        .with_message("en", "draft", "Draft")
        .with_message("fr", "draft", "Brouillon")
        .with_message("de", "draft", "Entwurf")
}

struct Harness {
    serializer: Serializer,
    translator: Arc<CatalogTranslator>,
}

fn harness(locale: Option<&str>) -> Harness {
    let config = Config {
        locale: locale.map(str::to_string),
        ..Config::default()
    };
    let factory = MetadataFactory::new(AnnotationDriver::new(registry()));
    let translator = Arc::new(CatalogTranslator::new(catalog()));
    let hook = JsonEventSubscriber::new(translator.clone(), Arc::new(factory), &config);

    Harness {
        serializer: Serializer::new(EventDispatcher::new().with_subscriber(Arc::new(hook))),
        translator,
    }
}

fn article() -> Article {
    Article {
        id: 1,
        status: "draft".to_string(),
    }
}

fn plain() -> Plain {
    Plain {
        status: "draft".to_string(),
    }
}

// ==================== Metadata Tests ====================

#[test]
fn test_article_metadata_from_registry() {
    let driver = AnnotationDriver::new(registry());
    let metadata = driver
        .load_metadata_for_class(&Article::class())
        .unwrap()
        .expect("Article declares relations");

    let names: Vec<&str> = metadata.relations().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["self", "author"]);
    assert_eq!(metadata.relation_providers().len(), 1);
    assert_eq!(metadata.relation_providers()[0].name(), "article_links");

    match metadata.relation("self").unwrap().href() {
        Href::Route(route) => {
            assert_eq!(route.name, "article_show");
            assert!(route.absolute);
            assert_eq!(route.parameters["id"], json!("expr(object.id)"));
        }
        other => panic!("Expected route href, got {:?}", other),
    }

    let embedded = metadata.relation("author").unwrap().embedded().unwrap();
    assert_eq!(embedded.content, json!("expr(object.author)"));
    assert_eq!(
        embedded.exclusion.as_ref().unwrap().groups,
        vec!["detail".to_string()]
    );

    let file_resources: Vec<_> = metadata.file_resources().collect();
    assert_eq!(file_resources, vec![Article::class().file()]);
}

#[test]
fn test_plain_class_has_no_metadata() {
    let factory = MetadataFactory::new(AnnotationDriver::new(registry()));
    assert!(factory.metadata_for_class(&Plain::class()).unwrap().is_none());
}

// ==================== Serialization Tests ====================

#[test]
fn test_article_translated_into_configured_locale() {
    let harness = harness(Some("fr"));
    let mut context = Context::default();

    let value = harness
        .serializer
        .serialize(&article(), "json", &mut context)
        .unwrap();

    assert_eq!(value, json!({ "id": 1, "status": "Brouillon" }));
    assert_eq!(context.locale(), Some("fr"));
    assert_eq!(harness.translator.metrics().objects(), 1);
}

#[test]
fn test_plain_object_leaves_context_untouched() {
    let harness = harness(Some("fr"));
    let input = Context::from(BaseContext::new().with_attribute("tenant", "acme"));
    let mut context = input.clone();

    let value = harness
        .serializer
        .serialize(&plain(), "json", &mut context)
        .unwrap();

    assert_eq!(value, json!({ "status": "draft" }));
    assert_eq!(context, input);
    assert_eq!(harness.translator.metrics().objects(), 0);
}

#[test]
fn test_pre_adapted_context_keeps_its_locale() {
    let harness = harness(Some("de"));
    let mut wrapper = SerializationContext::new(BaseContext::new());
    wrapper.set_locale("fr");
    let mut context = Context::from(wrapper);

    let value = harness
        .serializer
        .serialize(&article(), "json", &mut context)
        .unwrap();

    assert_eq!(value["status"], json!("Brouillon"));
    assert_eq!(context.locale(), Some("fr"));
}

#[test]
fn test_without_configured_locale_plain_context_attribute_is_used() {
    let harness = harness(None);
    let mut context = Context::from(BaseContext::new().with_attribute("locale", "de"));

    let value = harness
        .serializer
        .serialize(&article(), "json", &mut context)
        .unwrap();

    assert_eq!(value["status"], json!("Entwurf"));
    assert_eq!(context.locale(), Some("de"));
}

#[test]
fn test_context_persists_across_objects_in_one_pass() {
    let harness = harness(Some("fr"));
    let mut context = Context::default();
    let first = article();
    let second = plain();

    let values = harness
        .serializer
        .serialize_all(
            [&first as &dyn serializer_translation::Resource, &second],
            "json",
            &mut context,
        )
        .unwrap();

    assert_eq!(values[0]["status"], json!("Brouillon"));
    assert_eq!(values[1]["status"], json!("draft"));
    assert_eq!(context.locale(), Some("fr"));
}

#[test]
fn test_non_json_format_is_untouched() {
    let harness = harness(Some("fr"));
    let mut context = Context::default();

    let value = harness
        .serializer
        .serialize(&article(), "xml", &mut context)
        .unwrap();

    assert_eq!(value["status"], json!("draft"));
    assert!(!context.is_localized());
    assert_eq!(harness.translator.metrics().objects(), 0);
}

// ==================== Catalog Tests ====================

#[test]
fn test_catalog_file_round_trip_and_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("translations.json");
    std::fs::write(
        &path,
        r#"{
            "en": { "messages": { "draft": "Draft", "greeting": "Hello {name}" } },
            "fr": { "messages": { "draft": "Brouillon", "greeting": "Bonjour {nom}" } },
            "es": { "messages": { "draft": "Borrador" } }
        }"#,
    )
    .unwrap();

    let catalog = Catalog::from_path(&path).unwrap();
    let report = CatalogValidator::validate(&catalog, "en");

    assert!(!report.has_errors());
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.iter().any(|w| w.contains("Missing translation")));
    assert!(report.warnings.iter().any(|w| w.contains("Placeholder mismatch")));

    let translator = CatalogTranslator::new(catalog);
    let locale = Locale::parse("es_MX").unwrap();
    assert_eq!(
        translator.lookup(&locale, "messages", "greeting"),
        Some("Hello {name}")
    );
}

#[test]
fn test_missing_catalog_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Catalog::from_path(temp_dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read translation catalog"));
}
