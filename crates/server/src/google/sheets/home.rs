//! Homepage content on the "Inicio" sheet.
//!
//! Four fixed cell ranges, each with its own header row:
//!
//! - `A1:B4` - carousel (image URL + alt text, 3 slides)
//! - `A6:D10` - feature cards (icon, title, description, 4 cards)
//! - `A12:C15` - stat tiles (value + label, 3 tiles)
//! - `A17:B35` - flat key/value pairs for section and footer texts
//!
//! Reads batch all four ranges; each block parses independently and falls
//! back to its default on absence or malformation, so corruption in one
//! block never invalidates the others. Writes overwrite the same ranges in
//! full.

use tracing::instrument;

use super::{SheetsClient, SheetsError};
use crate::google::drive::urls::normalize_image_url;
use crate::models::home::{
    CarouselSlide, Feature, FooterContent, HomeContent, MAX_CAROUSEL_SLIDES, MAX_FEATURES,
    MAX_STATS, SectionTexts, Stat,
};

const CAROUSEL_RANGE: &str = "Inicio!A1:B4";
const FEATURES_RANGE: &str = "Inicio!A6:D10";
const STATS_RANGE: &str = "Inicio!A12:C15";
const TEXTS_RANGE: &str = "Inicio!A17:B35";

/// Fixed key order of the section/footer text block.
const TEXT_KEYS: [&str; 14] = [
    "whyUsTitle",
    "catalogTitle",
    "catalogSubtitle",
    "navBrand",
    "footerBrand",
    "footerTagline",
    "avisoLegalLabel",
    "avisoLegalUrl",
    "politicaPrivacidadLabel",
    "politicaPrivacidadUrl",
    "terminosLabel",
    "terminosUrl",
    "copyright",
    "copyrightLine",
];

fn cell(row: &[String], i: usize) -> String {
    row.get(i).cloned().unwrap_or_default()
}

/// Parse the carousel block. `None` means "fall back to defaults": no rows
/// beyond the header, or no slide with a non-empty image.
fn parse_carousel(rows: Option<&Vec<Vec<String>>>) -> Option<Vec<CarouselSlide>> {
    let rows = rows.filter(|r| r.len() >= 2)?;
    let slides: Vec<CarouselSlide> = rows
        .iter()
        .skip(1)
        .map(|row| {
            let src = cell(row, 0);
            CarouselSlide {
                src: if src.is_empty() {
                    src
                } else {
                    normalize_image_url(&src)
                },
                alt: cell(row, 1),
            }
        })
        .filter(|slide| !slide.src.is_empty())
        .collect();
    (!slides.is_empty()).then_some(slides)
}

/// Parse the feature-card block.
fn parse_features(rows: Option<&Vec<Vec<String>>>) -> Option<Vec<Feature>> {
    let rows = rows.filter(|r| r.len() >= 2)?;
    let features: Vec<Feature> = rows
        .iter()
        .skip(1)
        .map(|row| Feature {
            icon: cell(row, 0),
            title: cell(row, 1),
            description: cell(row, 2),
        })
        .filter(|f| !f.icon.is_empty() || !f.title.is_empty())
        .collect();
    (!features.is_empty()).then_some(features)
}

/// Parse the stat-tile block.
fn parse_stats(rows: Option<&Vec<Vec<String>>>) -> Option<Vec<Stat>> {
    let rows = rows.filter(|r| r.len() >= 2)?;
    let stats: Vec<Stat> = rows
        .iter()
        .skip(1)
        .map(|row| Stat {
            value: cell(row, 0),
            label: cell(row, 1),
        })
        .filter(|s| !s.value.is_empty() || !s.label.is_empty())
        .collect();
    (!stats.is_empty()).then_some(stats)
}

/// Apply key/value overrides onto the default section and footer texts.
/// Keys present in the sheet win, including explicitly empty values.
fn apply_texts(rows: Option<&Vec<Vec<String>>>, sections: &mut SectionTexts, footer: &mut FooterContent) {
    let Some(rows) = rows.filter(|r| r.len() >= 2) else {
        return;
    };

    for row in rows.iter().skip(1) {
        let key = cell(row, 0);
        if key.is_empty() {
            continue;
        }
        let value = cell(row, 1);
        match key.as_str() {
            "whyUsTitle" => sections.why_us_title = value,
            "catalogTitle" => sections.catalog_title = value,
            "catalogSubtitle" => sections.catalog_subtitle = value,
            "navBrand" => sections.nav_brand = value,
            "footerBrand" => footer.brand = value,
            "footerTagline" => footer.tagline = value,
            "avisoLegalLabel" => footer.aviso_legal_label = value,
            "avisoLegalUrl" => footer.aviso_legal_url = value,
            "politicaPrivacidadLabel" => footer.politica_privacidad_label = value,
            "politicaPrivacidadUrl" => footer.politica_privacidad_url = value,
            "terminosLabel" => footer.terminos_label = value,
            "terminosUrl" => footer.terminos_url = value,
            "copyright" => footer.copyright = value,
            "copyrightLine" => footer.copyright_line = value,
            _ => {}
        }
    }
}

/// Assemble a `HomeContent` from the four raw blocks, falling back per
/// block.
fn content_from_blocks(blocks: &[Option<Vec<Vec<String>>>]) -> HomeContent {
    let defaults = HomeContent::fallback();
    let block = |i: usize| blocks.get(i).and_then(Option::as_ref);

    let carousel = parse_carousel(block(0)).unwrap_or(defaults.carousel);
    let features = parse_features(block(1)).unwrap_or(defaults.features);
    let stats = parse_stats(block(2)).unwrap_or(defaults.stats);

    let mut sections = defaults.sections;
    let mut footer = defaults.footer;
    apply_texts(block(3), &mut sections, &mut footer);

    HomeContent {
        carousel,
        features,
        stats,
        sections,
        footer,
    }
}

/// Serialize the carousel block (header + up to 3 slides).
fn carousel_values(slides: &[CarouselSlide]) -> Vec<Vec<String>> {
    let mut values = vec![vec!["imageUrl".to_string(), "altText".to_string()]];
    values.extend(
        slides
            .iter()
            .take(MAX_CAROUSEL_SLIDES)
            .map(|s| vec![s.src.clone(), s.alt.clone()]),
    );
    values
}

/// Serialize the feature block (header + up to 4 cards).
fn features_values(features: &[Feature]) -> Vec<Vec<String>> {
    let mut values = vec![vec![
        "icon".to_string(),
        "title".to_string(),
        "description".to_string(),
    ]];
    values.extend(
        features
            .iter()
            .take(MAX_FEATURES)
            .map(|f| vec![f.icon.clone(), f.title.clone(), f.description.clone()]),
    );
    values
}

/// Serialize the stats block (header + up to 3 tiles).
fn stats_values(stats: &[Stat]) -> Vec<Vec<String>> {
    let mut values = vec![vec!["value".to_string(), "label".to_string()]];
    values.extend(
        stats
            .iter()
            .take(MAX_STATS)
            .map(|s| vec![s.value.clone(), s.label.clone()]),
    );
    values
}

/// Serialize the text block in the fixed key order.
fn texts_values(sections: &SectionTexts, footer: &FooterContent) -> Vec<Vec<String>> {
    let mut values = vec![vec!["key".to_string(), "value".to_string()]];
    for key in TEXT_KEYS {
        let value = match key {
            "whyUsTitle" => &sections.why_us_title,
            "catalogTitle" => &sections.catalog_title,
            "catalogSubtitle" => &sections.catalog_subtitle,
            "navBrand" => &sections.nav_brand,
            "footerBrand" => &footer.brand,
            "footerTagline" => &footer.tagline,
            "avisoLegalLabel" => &footer.aviso_legal_label,
            "avisoLegalUrl" => &footer.aviso_legal_url,
            "politicaPrivacidadLabel" => &footer.politica_privacidad_label,
            "politicaPrivacidadUrl" => &footer.politica_privacidad_url,
            "terminosLabel" => &footer.terminos_label,
            "terminosUrl" => &footer.terminos_url,
            "copyright" => &footer.copyright,
            _ => &footer.copyright_line,
        };
        values.push(vec![key.to_string(), value.clone()]);
    }
    values
}

impl SheetsClient {
    /// Read the homepage content.
    ///
    /// Never fails: each block falls back to its hardcoded default
    /// independently, and an unreachable sheet yields the full default
    /// structure so the public homepage stays renderable.
    #[instrument(skip(self))]
    pub async fn get_home_content(&self) -> HomeContent {
        match self
            .batch_get(&[CAROUSEL_RANGE, FEATURES_RANGE, STATS_RANGE, TEXTS_RANGE])
            .await
        {
            Ok(blocks) => content_from_blocks(&blocks),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read home content, serving defaults");
                HomeContent::fallback()
            }
        }
    }

    /// Overwrite the homepage content ranges.
    ///
    /// Four sequential range writes; sequences are clamped to their fixed
    /// maximums and the text block always writes the full key list.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` on the first failed write.
    #[instrument(skip(self, content))]
    pub async fn update_home_content(&self, content: &HomeContent) -> Result<(), SheetsError> {
        self.update_values(CAROUSEL_RANGE, carousel_values(&content.carousel))
            .await?;
        self.update_values(FEATURES_RANGE, features_values(&content.features))
            .await?;
        self.update_values(STATS_RANGE, stats_values(&content.stats))
            .await?;
        self.update_values(TEXTS_RANGE, texts_values(&content.sections, &content.footer))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn test_empty_sheet_yields_full_defaults() {
        let content = content_from_blocks(&[None, None, None, None]);
        let defaults = HomeContent::fallback();

        assert_eq!(content, defaults);
        assert_eq!(content.carousel.len(), 3);
        assert_eq!(content.features.len(), 4);
        assert_eq!(content.stats.len(), 3);
    }

    #[test]
    fn test_missing_trailing_blocks_fall_back() {
        // batchGet can return fewer ranges than requested
        let blocks = vec![Some(rows(&[
            &["imageUrl", "altText"],
            &["https://cdn.example.com/b1.png", "Banner uno"],
        ]))];
        let content = content_from_blocks(&blocks);

        assert_eq!(content.carousel.len(), 1);
        assert_eq!(content.features, HomeContent::fallback().features);
    }

    #[test]
    fn test_one_malformed_block_does_not_invalidate_others() {
        let blocks = vec![
            // Carousel has only a header - malformed, falls back
            Some(rows(&[&["imageUrl", "altText"]])),
            // Features block is valid
            Some(rows(&[
                &["icon", "title", "description"],
                &["RiStarLine", "Calidad", "Solo lo mejor"],
            ])),
            None,
            None,
        ];
        let content = content_from_blocks(&blocks);
        let defaults = HomeContent::fallback();

        assert_eq!(content.carousel, defaults.carousel);
        assert_eq!(content.features.len(), 1);
        assert_eq!(content.features[0].title, "Calidad");
        assert_eq!(content.stats, defaults.stats);
    }

    #[test]
    fn test_carousel_slides_without_src_are_dropped() {
        let blocks = Some(rows(&[
            &["imageUrl", "altText"],
            &["", "sin imagen"],
            &["https://drive.google.com/file/d/xyz9/view", "con imagen"],
        ]));
        let slides = parse_carousel(blocks.as_ref()).unwrap();

        assert_eq!(slides.len(), 1);
        // Drive URLs are normalized to the thumbnail form
        assert_eq!(
            slides[0].src,
            "https://drive.google.com/thumbnail?id=xyz9&sz=w1000"
        );
    }

    #[test]
    fn test_text_overrides_apply_onto_defaults() {
        let blocks = Some(rows(&[
            &["key", "value"],
            &["navBrand", "Azura"],
            &["footerBrand", "Azura Beauty"],
            &["copyright", ""],
            &["unknownKey", "ignored"],
        ]));

        let defaults = HomeContent::fallback();
        let mut sections = defaults.sections.clone();
        let mut footer = defaults.footer.clone();
        apply_texts(blocks.as_ref(), &mut sections, &mut footer);

        assert_eq!(sections.nav_brand, "Azura");
        assert_eq!(footer.brand, "Azura Beauty");
        // Explicitly empty sheet value wins over the default
        assert_eq!(footer.copyright, "");
        // Untouched keys keep defaults
        assert_eq!(sections.why_us_title, defaults.sections.why_us_title);
    }

    #[test]
    fn test_write_blocks_clamp_to_fixed_maximums() {
        let slide = CarouselSlide {
            src: "/b.png".to_string(),
            alt: String::new(),
        };
        let values = carousel_values(&vec![slide; 7]);
        // Header + 3 slides
        assert_eq!(values.len(), 1 + MAX_CAROUSEL_SLIDES);

        let feature = Feature::default();
        assert_eq!(features_values(&vec![feature; 9]).len(), 1 + MAX_FEATURES);

        let stat = Stat::default();
        assert_eq!(stats_values(&vec![stat; 9]).len(), 1 + MAX_STATS);
    }

    #[test]
    fn test_texts_block_writes_every_key_in_order() {
        let defaults = HomeContent::fallback();
        let values = texts_values(&defaults.sections, &defaults.footer);

        assert_eq!(values.len(), 1 + TEXT_KEYS.len());
        assert_eq!(values[0], vec!["key", "value"]);
        assert_eq!(values[1][0], "whyUsTitle");
        assert_eq!(values[14][0], "copyrightLine");
        assert_eq!(values[5][0], "footerBrand");
        assert_eq!(values[5][1], "Catálogo Pro");
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let mut content = HomeContent::fallback();
        content.sections.nav_brand = "Azura".to_string();
        content.stats.truncate(2);

        let blocks = vec![
            Some(carousel_values(&content.carousel)),
            Some(features_values(&content.features)),
            Some(stats_values(&content.stats)),
            Some(texts_values(&content.sections, &content.footer)),
        ];
        let parsed = content_from_blocks(&blocks);

        assert_eq!(parsed.sections.nav_brand, "Azura");
        assert_eq!(parsed.stats.len(), 2);
        assert_eq!(parsed.carousel, content.carousel);
        assert_eq!(parsed.features, content.features);
    }
}
