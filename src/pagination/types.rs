//! Pagination types

use super::link::LinkRelations;
use crate::http::HttpResponse;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Options for a paginated GET
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationOptions {
    /// Fetch exactly this page and never follow `next`
    pub page: Option<u32>,
    /// Records per page (sent as `per_page`)
    pub per_page: Option<u32>,
    /// Stop following links once this page number is reached (0 is no limit)
    pub max_pages: Option<u32>,
    /// Wrap the records with pagination metadata
    pub show_pagination: bool,
    /// Extra query parameters; keys are converted to snake_case
    pub query: JsonObject,
}

impl PaginationOptions {
    /// Create empty options (fetch every page)
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a single page
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set the page limit
    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Request the metadata wrapper
    #[must_use]
    pub fn show_pagination(mut self, show: bool) -> Self {
        self.show_pagination = show;
        self
    }

    /// Add an extra query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Check if the caller asked for a single page
    pub fn is_single_page(&self) -> bool {
        self.page.is_some()
    }

    /// Query object sent with the first request
    pub fn to_query(&self) -> JsonObject {
        let mut query = self.query.clone();
        if let Some(page) = self.page {
            query.insert("page".to_string(), page.into());
        }
        if let Some(per_page) = self.per_page {
            query.insert("per_page".to_string(), per_page.into());
        }
        query
    }
}

/// Position of a page within a collection, read from `x-*` headers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// `x-per-page`
    pub per_page: Option<u32>,
    /// `x-next-page`
    pub next: Option<u32>,
    /// `x-page`
    pub current: Option<u32>,
    /// `x-prev-page`
    pub previous: Option<u32>,
    /// `x-total-pages`
    pub total: Option<u32>,
    /// `x-total`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u32>,
}

impl PaginationInfo {
    /// Read pagination headers from a response
    pub fn from_response(response: &HttpResponse) -> Self {
        Self {
            per_page: response.header_u32("x-per-page"),
            next: response.header_u32("x-next-page"),
            current: response.header_u32("x-page"),
            previous: response.header_u32("x-prev-page"),
            total: response.header_u32("x-total-pages"),
            total_records: response.header_u32("x-total"),
        }
    }
}

/// One fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records in server order
    pub records: Vec<T>,
    /// Pagination headers of this page
    pub pagination: PaginationInfo,
    /// Parsed link relations of this page
    pub links: LinkRelations,
}

/// Result of a paginated GET
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageResult<T> {
    /// Metadata wrapper, when `show_pagination` was requested
    Paginated {
        /// Records of every fetched page, in order
        data: Vec<T>,
        /// Metadata of the first fetched page
        pagination: PaginationInfo,
    },
    /// Bare records
    Records(Vec<T>),
}

impl<T> PageResult<T> {
    /// The records, regardless of shape
    pub fn records(&self) -> &[T] {
        match self {
            Self::Records(data) | Self::Paginated { data, .. } => data,
        }
    }

    /// Consume into the records
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Records(data) | Self::Paginated { data, .. } => data,
        }
    }

    /// Pagination metadata, if requested
    pub fn pagination(&self) -> Option<&PaginationInfo> {
        match self {
            Self::Paginated { pagination, .. } => Some(pagination),
            Self::Records(_) => None,
        }
    }
}
