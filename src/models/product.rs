//! Product catalog record, referenced by inspections via `product_id`.

use serde::Deserialize;

use super::lenient_number;

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    /// `None` when the upstream sends a non-numeric price.
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
}
