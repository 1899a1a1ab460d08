//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,

    /// Price in minor currency units.
    pub price: u64,
    pub stock: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One page of a filtered product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    /// Number of products matching the filters, ignoring pagination.
    pub count: u64,
    pub products: Vec<ProductRecord>,
}

/// Catalogue-wide summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    pub products: Vec<ProductRecord>,
    pub count: u64,

    /// Highest price in the catalogue, `None` when it is empty.
    pub max_price: Option<u64>,
}
