//! Catalog JSON wire shapes as the admin client sees them.

use catalogo_core::RowIndex;
use catalogo_server::models::{CatalogItem, NewCatalogItem, UpdateCatalogItem};

#[test]
fn listed_items_carry_camel_case_row_index() {
    let item = CatalogItem {
        id: "1700000000000".to_string(),
        name: "Esmalte Gel".to_string(),
        description: "Esmalte semipermanente".to_string(),
        price: "249.50".parse().expect("decimal"),
        image: "https://drive.google.com/thumbnail?id=abc&sz=w1000".to_string(),
        action: "https://wa.me/522225230942".to_string(),
        row_index: RowIndex::FIRST_ITEM,
    };

    let json = serde_json::to_value(&item).expect("serializable");
    assert_eq!(json["rowIndex"], 2);
    assert_eq!(json["price"], "249.50");
    assert!(json.get("row_index").is_none());
}

#[test]
fn create_payload_accepts_missing_action() {
    let item: NewCatalogItem = serde_json::from_str(
        r#"{"id":"1","name":"Lima","description":"Lima profesional","price":"35.00","image":""}"#,
    )
    .expect("payload");

    assert!(item.action.is_none());
    assert_eq!(item.price.to_string(), "35.00");
}

#[test]
fn update_payload_rejects_row_zero() {
    let result = serde_json::from_str::<UpdateCatalogItem>(
        r#"{"rowIndex":0,"id":"1","name":"Lima","description":"","price":"35.00","image":""}"#,
    );

    assert!(result.is_err());
}

#[test]
fn delete_shift_semantics_are_exposed_on_the_index() {
    // Deleting row r removes the 0-based span [r-1, r); everything below
    // shifts up, so a stale index now points at a different item.
    let row = RowIndex::new(5).expect("valid row");
    assert_eq!(row.zero_based(), 4);
    assert_eq!(row.get(), 5);
}
