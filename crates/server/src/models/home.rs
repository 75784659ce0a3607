//! Homepage content types.
//!
//! The homepage is editable from the admin panel and persisted as fixed cell
//! ranges on the "Inicio" sheet. Sequence lengths are fixed: 3 carousel
//! slides, 4 feature cards, 3 stats. Values are clamped on read and write and
//! never surface as null - missing blocks fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Maximum number of carousel slides.
pub const MAX_CAROUSEL_SLIDES: usize = 3;
/// Maximum number of feature cards.
pub const MAX_FEATURES: usize = 4;
/// Maximum number of stat tiles.
pub const MAX_STATS: usize = 3;

/// One slide of the homepage carousel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarouselSlide {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// One "why us" feature card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One stat tile (value + label).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stat {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Section heading texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionTexts {
    #[serde(default)]
    pub why_us_title: String,
    #[serde(default)]
    pub catalog_title: String,
    #[serde(default)]
    pub catalog_subtitle: String,
    #[serde(default)]
    pub nav_brand: String,
}

/// Footer branding, legal links and copyright lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub aviso_legal_label: String,
    #[serde(default)]
    pub aviso_legal_url: String,
    #[serde(default)]
    pub politica_privacidad_label: String,
    #[serde(default)]
    pub politica_privacidad_url: String,
    #[serde(default)]
    pub terminos_label: String,
    #[serde(default)]
    pub terminos_url: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub copyright_line: String,
}

/// The full editable homepage content.
///
/// `#[serde(default)]` on every block lets `PUT /api/home` accept a subset;
/// an omitted block is written out empty and falls back to defaults on the
/// next read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomeContent {
    #[serde(default)]
    pub carousel: Vec<CarouselSlide>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub sections: SectionTexts,
    #[serde(default)]
    pub footer: FooterContent,
}

impl HomeContent {
    /// The hardcoded fallback content used when the "Inicio" sheet is empty,
    /// malformed, or unreachable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            carousel: vec![
                CarouselSlide {
                    src: "/Banner1_Azura.png".to_string(),
                    alt: "Banner promocional de Azura Beauty & Nails".to_string(),
                },
                CarouselSlide {
                    src: "/Banner2_Azura.png".to_string(),
                    alt: "Banner promocional: Cuidado de Profesionales".to_string(),
                },
                CarouselSlide {
                    src: "/Banner3_Azura.png".to_string(),
                    alt: "Banner promocional: Cuidado de Manos".to_string(),
                },
            ],
            features: vec![
                Feature {
                    icon: "RiShieldCheckLine".to_string(),
                    title: "Seguridad".to_string(),
                    description:
                        "Nuestro compromiso por ser una empresa responsable y confiable nos respalda"
                            .to_string(),
                },
                Feature {
                    icon: "RiTimeLine".to_string(),
                    title: "Tiempo de Entrega".to_string(),
                    description: "Comprometidos con cumplir en tiempo y forma con tu pedido"
                        .to_string(),
                },
                Feature {
                    icon: "RiCustomerService2Line".to_string(),
                    title: "Servicio".to_string(),
                    description:
                        "Comprueba por ti mismo nuestro monitoreo y servicio durante y post venta"
                            .to_string(),
                },
                Feature {
                    icon: "RiLightbulbFlashLine".to_string(),
                    title: "Propuesta".to_string(),
                    description: "Contamos con propuesta e innovación difícil de superar"
                        .to_string(),
                },
            ],
            stats: vec![
                Stat {
                    value: "+2,500".to_string(),
                    label: "Pedidos Completados".to_string(),
                },
                Stat {
                    value: "98%".to_string(),
                    label: "Satisfacción del Cliente".to_string(),
                },
                Stat {
                    value: "+3".to_string(),
                    label: "Años de Experiencia".to_string(),
                },
            ],
            sections: SectionTexts {
                why_us_title: "¿POR QUÉ ELEGIRNOS?".to_string(),
                catalog_title: "Explora nuestro Catálogo".to_string(),
                catalog_subtitle: "Descubre nuestra amplia variedad de productos de calidad"
                    .to_string(),
                nav_brand: "Catálogo Pro".to_string(),
            },
            footer: FooterContent {
                brand: "Catálogo Pro".to_string(),
                tagline:
                    "Tu socio de confianza para productos de calidad y servicio excepcional"
                        .to_string(),
                aviso_legal_label: "Aviso Legal".to_string(),
                aviso_legal_url: "#".to_string(),
                politica_privacidad_label: "Política de Privacidad".to_string(),
                politica_privacidad_url: "#".to_string(),
                terminos_label: "Términos y Condiciones".to_string(),
                terminos_url: "#".to_string(),
                copyright: "© 2026 Catálogo Pro".to_string(),
                copyright_line: "Copyright © 2026 Catálogo Pro. Todos los derechos reservados."
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_fixed_counts() {
        let content = HomeContent::fallback();
        assert_eq!(content.carousel.len(), MAX_CAROUSEL_SLIDES);
        assert_eq!(content.features.len(), MAX_FEATURES);
        assert_eq!(content.stats.len(), MAX_STATS);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let content = HomeContent::fallback();
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["sections"]["whyUsTitle"], "¿POR QUÉ ELEGIRNOS?");
        assert_eq!(json["footer"]["avisoLegalLabel"], "Aviso Legal");
        assert_eq!(json["footer"]["politicaPrivacidadUrl"], "#");
        assert!(json["footer"]["copyrightLine"].is_string());
    }

    #[test]
    fn test_subset_payload_deserializes_with_defaults() {
        let content: HomeContent = serde_json::from_str(
            r#"{"stats": [{"value": "+10", "label": "Clientes"}]}"#,
        )
        .unwrap();

        assert!(content.carousel.is_empty());
        assert!(content.features.is_empty());
        assert_eq!(content.stats.len(), 1);
        assert_eq!(content.sections.why_us_title, "");
    }
}
