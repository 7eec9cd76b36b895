//! Normalization of spreadsheet import rows.

use chrono::NaiveDate;

use freshtrack_entity::food::{CreateFood, ImportFood};

/// Category assigned when an imported row has none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Turn a raw import row into a create request.
///
/// Returns `None` for rows without a name or an expiration date.
pub fn normalize(row: ImportFood, today: NaiveDate) -> Option<CreateFood> {
    let name = row.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;
    let expiration_date = row.expiration_date?;

    let category = row
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Some(CreateFood {
        name,
        category,
        quantity: row.quantity.filter(|q| *q > 0).unwrap_or(1),
        purchase_date: row.purchase_date.unwrap_or(today),
        expiration_date,
        image: None,
        notes: row.notes,
        tags: row.tags,
    })
}
