//! Homepage fallback content and its JSON wire shape.

use catalogo_server::models::HomeContent;

#[test]
fn fallback_carries_the_fixed_block_sizes() {
    let content = HomeContent::fallback();

    assert_eq!(content.carousel.len(), 3);
    assert_eq!(content.features.len(), 4);
    assert_eq!(content.stats.len(), 3);

    // Nothing in the fallback is empty - the UI never sees a null
    assert!(content.carousel.iter().all(|s| !s.src.is_empty()));
    assert!(content.features.iter().all(|f| !f.title.is_empty()));
    assert!(content.stats.iter().all(|s| !s.value.is_empty()));
    assert!(!content.sections.nav_brand.is_empty());
    assert!(!content.footer.copyright_line.is_empty());
}

#[test]
fn wire_shape_matches_the_admin_client() {
    let json = serde_json::to_value(HomeContent::fallback()).expect("serializable");

    // Top-level blocks
    for key in ["carousel", "features", "stats", "sections", "footer"] {
        assert!(json.get(key).is_some(), "missing block {key}");
    }

    // camelCase keys the admin forms read and write
    assert!(json["sections"]["whyUsTitle"].is_string());
    assert!(json["sections"]["catalogSubtitle"].is_string());
    assert!(json["footer"]["avisoLegalUrl"].is_string());
    assert!(json["footer"]["politicaPrivacidadLabel"].is_string());
    assert!(json["footer"]["terminosLabel"].is_string());
    assert!(json["footer"]["copyrightLine"].is_string());

    // Carousel slides keep their short keys
    assert!(json["carousel"][0]["src"].is_string());
    assert!(json["carousel"][0]["alt"].is_string());
}

#[test]
fn round_trips_through_json() {
    let content = HomeContent::fallback();
    let json = serde_json::to_string(&content).expect("serialize");
    let parsed: HomeContent = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, content);
}
