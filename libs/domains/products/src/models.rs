use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Stored product. `serial_number` is the business key; `id` is assigned by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Surrogate key, `None` until the product is first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Product name
    #[serde(rename = "product")]
    pub name: String,
    pub serial_number: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    /// Units in stock
    pub quantity: i32,
}

/// Body of insert and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(rename = "product")]
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Cable")]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "S1")]
    pub serial_number: String,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    /// Units to add on insert; ignored on update
    #[validate(range(min = 0))]
    #[schema(example = 5)]
    pub quantity: i32,
}

fn non_negative(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// Product as returned to clients, without the surrogate key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "product")]
    pub name: String,
    pub serial_number: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub quantity: i32,
}

/// One page of products plus position metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageableResult {
    pub content: Vec<Product>,
    pub page_number: u64,
    pub total_pages: u64,
    pub total_records: u64,
    pub first_page: bool,
    pub last_page: bool,
}

/// A page as produced by a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u64, size: u64, total_elements: u64) -> Self {
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            1
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages()
    }
}

/// Pagination query: `?page=0&size=20&sort=price,desc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Zero-based page index (default 0, at most 2147483647)
    pub page: Option<u64>,
    /// Page size (default 20, at most 2000; 0 means default)
    pub size: Option<u64>,
    /// `property[,asc|desc]` where property is one of `id`, `product`, `serialNumber`, `price`, `quantity`
    pub sort: Option<String>,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u64 = 20;
    pub const MAX_SIZE: u64 = 2000;
    /// Page indexes are clamped here so `page * size` always fits an offset.
    pub const MAX_PAGE: u64 = i32::MAX as u64;

    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(0).min(Self::MAX_PAGE)
    }

    pub fn size(&self) -> u64 {
        match self.size {
            None | Some(0) => Self::DEFAULT_SIZE,
            Some(size) => size.min(Self::MAX_SIZE),
        }
    }

    /// Parse `sort`. A blank value means unsorted.
    pub fn sort_order(&self) -> Result<Option<SortOrder>, SortParseError> {
        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

/// Columns a page may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum SortProperty {
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "product", serialize = "name")]
    Name,
    #[strum(serialize = "serialNumber")]
    SerialNumber,
    #[strum(serialize = "price")]
    Price,
    #[strum(serialize = "quantity")]
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(serialize = "asc")]
    Asc,
    #[strum(serialize = "desc")]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub property: SortProperty,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    #[error("No property '{0}' found for type 'Product'")]
    UnknownProperty(String),
    #[error("Invalid sort direction '{0}'")]
    UnknownDirection(String),
}

impl std::str::FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (property, direction) = match raw.split_once(',') {
            Some((property, direction)) => (property.trim(), Some(direction.trim())),
            None => (raw.trim(), None),
        };

        let property = property
            .parse()
            .map_err(|_| SortParseError::UnknownProperty(property.to_string()))?;
        let direction = match direction {
            None | Some("") => SortDirection::default(),
            Some(d) => d
                .parse()
                .map_err(|_| SortParseError::UnknownDirection(d.to_string()))?,
        };

        Ok(Self {
            property,
            direction,
        })
    }
}
