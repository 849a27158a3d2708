//! Common DTOs used across the API

use serde::{de, Deserialize, Deserializer, Serialize};
use shipquote_core::traits::{PaginatedResponse, PaginationMeta};
use std::fmt;
use validator::Validate;

/// Envelope for single-resource responses
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Optional human-readable note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap data without a message
    pub const fn success(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    /// Wrap data with a message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// Pagination query parameters for catalog listings
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    /// Page number, starting at 1
    #[serde(default = "default_page", deserialize_with = "lenient_i64")]
    #[validate(range(min = 1, message = "Page starts at 1"))]
    pub page: i64,

    /// Rates per page
    #[serde(default = "default_per_page", deserialize_with = "lenient_i64")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub per_page: i64,
}

/// Accept `7` as well as `"7"`, since query strings carry everything as text
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientI64;

    impl de::Visitor<'_> for LenientI64 {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
            value.trim().parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(LenientI64)
}

const fn default_page() -> i64 {
    1
}

const fn default_per_page() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationParams {
    /// Rows to skip in the catalog
    #[inline]
    pub const fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Rows to return from the catalog
    #[inline]
    pub const fn limit(&self) -> i64 {
        self.per_page
    }

    /// Wrap one page of results with its metadata
    pub fn paginate<T>(&self, data: Vec<T>, total: i64) -> PaginatedResponse<T> {
        PaginatedResponse {
            data,
            pagination: PaginationMeta::new(total, self.page, self.per_page),
        }
    }
}
