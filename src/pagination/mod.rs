//! Pagination module
//!
//! Follows RFC 5988 `link` headers through GitLab-style collection
//! endpoints.
//!
//! # Overview
//!
//! A collection GET returns one page of records plus headers describing
//! where it sits (`x-page`, `x-total-pages`, ...) and a `link` header with a
//! `next` relation. The fetch loop follows `next` page by page, strictly in
//! order, until there is no next page, the page limit is reached, or the
//! caller pinned a single page.
//!
//! Pages are available lazily through [`page_stream`] or collected with
//! [`fetch_paginated`].

mod fetch;
mod link;
mod types;

pub use fetch::{fetch_paginated, page_stream};
pub use link::{Link, LinkRelations};
pub use types::{Page, PageResult, PaginationInfo, PaginationOptions};
