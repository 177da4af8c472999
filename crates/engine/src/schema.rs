//! Fixed Arrow schemas for the three logical collections.
//!
//! Column names are snake_case so they survive the engine's SQL identifier
//! normalization; [`wire_name`] maps them back to the document-store field
//! names on load and emit. Only fields the queries touch are non-nullable;
//! everything else is passed through when present.

use std::fmt;
use std::sync::Arc;

use datafusion::arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};

/// A logical record collection the queries read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Movements,
    Alerts,
}

impl Collection {
    /// Name of the collection in the document store.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Movements => "movements",
            Collection::Alerts => "alerts",
        }
    }

    /// Schema the connector's documents are coerced into on load.
    pub fn schema(&self) -> SchemaRef {
        match self {
            Collection::Products => Arc::new(Schema::new(vec![
                Field::new("product_id", DataType::Utf8, false),
                Field::new("name", DataType::Utf8, true),
                Field::new("description", DataType::Utf8, true),
                Field::new("category", DataType::Utf8, false),
                Field::new("current_stock", DataType::Int64, true),
                Field::new("quantity", DataType::Int64, false),
                Field::new("price", DataType::Float64, true),
                Field::new("min_stock_alert", DataType::Int64, true),
            ])),
            Collection::Movements => Arc::new(Schema::new(vec![
                Field::new("product_id", DataType::Utf8, false),
                Field::new("type", DataType::Utf8, false),
                Field::new("quantity", DataType::Int64, false),
                Field::new(
                    "date",
                    DataType::Timestamp(TimeUnit::Microsecond, None),
                    false,
                ),
                Field::new("user_id", DataType::Utf8, true),
                Field::new("user_name", DataType::Utf8, true),
            ])),
            Collection::Alerts => Arc::new(Schema::new(vec![
                Field::new("product_id", DataType::Utf8, true),
                Field::new("message", DataType::Utf8, true),
                Field::new(
                    "date",
                    DataType::Timestamp(TimeUnit::Microsecond, None),
                    false,
                ),
                Field::new("resolved", DataType::Boolean, true),
            ])),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Document-store field names for columns whose snake_case name differs.
const FIELD_WIRE_NAMES: &[(&str, &str)] = &[
    ("product_id", "productId"),
    ("current_stock", "currentStock"),
    ("min_stock_alert", "minStockAlert"),
    ("user_id", "userId"),
    ("user_name", "userName"),
];

/// Map an engine column name to its document-store field name.
///
/// Columns the store already spells in snake_case (and derived columns like
/// `total_sold`) pass through unchanged.
pub fn wire_name(column: &str) -> &str {
    FIELD_WIRE_NAMES
        .iter()
        .find(|(col, _)| *col == column)
        .map(|(_, wire)| *wire)
        .unwrap_or(column)
}
