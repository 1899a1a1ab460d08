//! Products Data

use std::str::FromStr;

use crate::{
    domain::products::records::ProductUuid,
    pagination::Page,
    validation::{
        FieldErrorKind, ValidationErrors, Validator, both, max_chars, non_negative, not_blank,
    },
};

/// Longest product name accepted.
pub const PRODUCT_NAME_MAX_CHARS: usize = 255;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i64,
}

impl NewProduct {
    /// # Errors
    ///
    /// Returns every field that fails its rule.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check("name", validate_name(&self.name))
            .check("price", non_negative(self.price))
            .check("stock", non_negative(self.stock))
            .finish()
    }
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns every supplied field that fails its rule.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check_optional("name", self.name.as_deref(), validate_name)
            .check_optional("price", self.price, non_negative)
            .check_optional("stock", self.stock, non_negative)
            .finish()
    }
}

fn validate_name(name: &str) -> Result<(), FieldErrorKind> {
    both(not_blank(name), || max_chars(name, PRODUCT_NAME_MAX_CHARS))
}

/// Product listing filters. Every field narrows the result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive exact name.
    pub name: Option<String>,

    /// Case-insensitive name substring.
    pub name_contains: Option<String>,
    pub price: Option<i64>,
    pub price_lt: Option<i64>,
    pub price_gt: Option<i64>,

    /// Inclusive lower bound.
    pub price_min: Option<i64>,

    /// Inclusive upper bound.
    pub price_max: Option<i64>,

    /// Case-insensitive substring over name or description.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrdering {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl ProductOrdering {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name",
            Self::NameDesc => "-name",
            Self::PriceAsc => "price",
            Self::PriceDesc => "-price",
        }
    }
}

/// Error returned for an unknown ordering key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product ordering `{0}`")]
pub struct UnknownOrdering(pub String);

impl FromStr for ProductOrdering {
    type Err = UnknownOrdering;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::NameAsc),
            "-name" => Ok(Self::NameDesc),
            "price" => Ok(Self::PriceAsc),
            "-price" => Ok(Self::PriceDesc),
            other => Err(UnknownOrdering(other.to_string())),
        }
    }
}

/// A full product listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub filter: ProductFilter,

    /// `None` orders by creation time.
    pub ordering: Option<ProductOrdering>,
    pub page: Page,
}
