//! Catalog item types.
//!
//! Items live as rows on the "Catalogo" sheet, columns A-F. The JSON wire
//! names match the sheet header row (`id`, `name`, `description`, `price`,
//! `image`, `action`) plus the server-assigned `rowIndex`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalogo_core::RowIndex;

/// Default WhatsApp contact link applied when an item has no action URL.
pub const DEFAULT_WHATSAPP_ACTION: &str = "https://wa.me/522225230942";

/// A catalog item as read from the spreadsheet.
///
/// `row_index` is assigned on read and is the item's mutation key. It is not
/// stable across deletes of earlier rows; see [`RowIndex`] for the hazard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Client-generated identifier (timestamp string); not checked for
    /// uniqueness.
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Image URL, normalized to the Drive thumbnail form on read.
    pub image: String,
    /// WhatsApp contact link shown on the item card.
    pub action: String,
    /// 1-based sheet row backing this item.
    pub row_index: RowIndex,
}

/// Payload for creating or overwriting a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    /// Falls back to [`DEFAULT_WHATSAPP_ACTION`] when absent.
    #[serde(default)]
    pub action: Option<String>,
}

/// Payload for `PUT /api/catalog`: the target row plus the full item shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatalogItem {
    pub row_index: RowIndex,
    #[serde(flatten)]
    pub item: NewCatalogItem,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_wire_shape() {
        let item = CatalogItem {
            id: "1700000000000".to_string(),
            name: "Esmalte Gel".to_string(),
            description: "Esmalte semipermanente".to_string(),
            price: Decimal::new(24950, 2),
            image: "https://drive.google.com/thumbnail?id=abc&sz=w1000".to_string(),
            action: DEFAULT_WHATSAPP_ACTION.to_string(),
            row_index: RowIndex::FIRST_ITEM,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["rowIndex"], 2);
        assert_eq!(json["price"], "249.50");
        assert_eq!(json["action"], DEFAULT_WHATSAPP_ACTION);
    }

    #[test]
    fn test_update_payload_flattens_item_fields() {
        let payload: UpdateCatalogItem = serde_json::from_str(
            r#"{
                "rowIndex": 3,
                "id": "1700000000000",
                "name": "Lima",
                "description": "Lima profesional",
                "price": "35.00",
                "image": ""
            }"#,
        )
        .unwrap();

        assert_eq!(payload.row_index.get(), 3);
        assert_eq!(payload.item.name, "Lima");
        assert!(payload.item.action.is_none());
    }
}
