//! Catalog operations on the "Catalogo" sheet.
//!
//! Columns A-F hold `id`, `name`, `description`, `price`, `image`, `action`;
//! row 1 is the header. Rows map to items by fixed column position - the
//! header row is checked against the expected schema and a mismatch is
//! logged, but does not fail the read.

use rust_decimal::Decimal;
use tracing::instrument;

use catalogo_core::RowIndex;

use super::{SheetsClient, SheetsError};
use crate::google::drive::urls::normalize_image_url;
use crate::models::catalog::{CatalogItem, DEFAULT_WHATSAPP_ACTION, NewCatalogItem};

/// Sheet holding the catalog.
pub const CATALOG_SHEET: &str = "Catalogo";

/// Full catalog column range.
pub const CATALOG_RANGE: &str = "Catalogo!A:F";

/// Expected header row (columns A-F in order).
const EXPECTED_HEADER: [&str; 6] = ["id", "name", "description", "price", "image", "action"];

/// Map one sheet row to a catalog item by column position.
///
/// Short rows pad with empty strings; an unparseable price becomes zero
/// rather than failing the whole listing.
fn item_from_row(row: &[String], row_index: RowIndex) -> CatalogItem {
    let cell = |i: usize| row.get(i).cloned().unwrap_or_default();

    let image = cell(4);
    let action = cell(5);

    CatalogItem {
        id: cell(0),
        name: cell(1),
        description: cell(2),
        price: cell(3).parse::<Decimal>().unwrap_or_default(),
        image: if image.is_empty() {
            image
        } else {
            normalize_image_url(&image)
        },
        action: if action.is_empty() {
            DEFAULT_WHATSAPP_ACTION.to_string()
        } else {
            action
        },
        row_index,
    }
}

/// Serialize an item payload to the 6-column row shape.
fn row_from_item(item: &NewCatalogItem) -> Vec<String> {
    vec![
        item.id.clone(),
        item.name.clone(),
        item.description.clone(),
        item.price.to_string(),
        item.image.clone(),
        item.action
            .clone()
            .unwrap_or_else(|| DEFAULT_WHATSAPP_ACTION.to_string()),
    ]
}

fn header_matches(header: &[String]) -> bool {
    header.len() >= EXPECTED_HEADER.len()
        && EXPECTED_HEADER
            .iter()
            .zip(header.iter())
            .all(|(expected, actual)| actual == expected)
}

impl SheetsClient {
    /// List all catalog items.
    ///
    /// Each item's `row_index` is its current 1-based sheet row (first item
    /// at row 2). Indices go stale after any mutation; refetch before using
    /// them again.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` if the remote read fails. An empty range is not
    /// an error - it yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<CatalogItem>, SheetsError> {
        let rows = self.get_values(CATALOG_RANGE).await?;

        let mut rows = rows.into_iter();
        match rows.next() {
            Some(header) if !header_matches(&header) => {
                tracing::warn!(?header, "Catalogo header row does not match expected schema");
            }
            Some(_) => {}
            None => return Ok(Vec::new()),
        }

        Ok(rows
            .enumerate()
            .filter_map(|(i, row)| {
                let row_number = u32::try_from(i).ok()?.checked_add(2)?;
                Some(item_from_row(&row, RowIndex::new(row_number)?))
            })
            .collect())
    }

    /// Append one item at the end of the catalog. The `id` is taken as-is;
    /// no uniqueness check is performed.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` if the remote write fails.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn append_item(&self, item: &NewCatalogItem) -> Result<(), SheetsError> {
        self.append_row(CATALOG_RANGE, row_from_item(item)).await
    }

    /// Overwrite the row at `row_index` with the full item shape. Last
    /// writer wins - there is no concurrency check.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` if the remote write fails.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn update_item(
        &self,
        row_index: RowIndex,
        item: &NewCatalogItem,
    ) -> Result<(), SheetsError> {
        let r = row_index.get();
        self.update_values(&format!("Catalogo!A{r}:F{r}"), vec![row_from_item(item)])
            .await
    }

    /// Structurally delete the row at `row_index`.
    ///
    /// Every item below the deleted row shifts up by one, so any `row_index`
    /// captured before this call is stale afterwards - refetch before the
    /// next mutation.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError` if the sheet lookup or the delete fails.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, row_index: RowIndex) -> Result<(), SheetsError> {
        let sheet_id = self.sheet_id(CATALOG_SHEET).await?;
        self.delete_rows(sheet_id, row_index.zero_based(), row_index.get())
            .await
    }
}
