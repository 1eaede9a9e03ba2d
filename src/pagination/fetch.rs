//! The paginated fetch loop
//!
//! Pages are requested one at a time; each `next` link comes from the
//! previous response, so there is no fan-out. Rate-limited requests are
//! retried through the client's `RetryPolicy` before a page is yielded.

use super::link::LinkRelations;
use super::types::{Page, PageResult, PaginationInfo, PaginationOptions};
use crate::client::ClientContext;
use crate::error::Result;
use crate::http::RequestDescriptor;
use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use std::pin::pin;
use tracing::debug;

struct Cursor {
    request: RequestDescriptor,
    fetched: u32,
}

/// Lazily fetch the pages of a collection endpoint
///
/// The stream ends when the last page had no `next` link, when the page
/// limit was reached, or after the first page if a page was pinned.
/// Dropping the stream stops further requests.
pub fn page_stream<'a, T>(
    ctx: &'a ClientContext,
    endpoint: &str,
    options: &PaginationOptions,
) -> impl Stream<Item = Result<Page<T>>> + Send + 'a
where
    T: DeserializeOwned + Send + 'a,
{
    let first = ctx.get_request(endpoint, &options.to_query());
    let single_page = options.is_single_page();
    // A limit of 0 means no limit
    let max_pages = options.max_pages.filter(|&max| max > 0);

    let start = Some(Cursor {
        request: first,
        fetched: 0,
    });

    stream::try_unfold(start, move |cursor| next_page(ctx, cursor, single_page, max_pages))
}

async fn next_page<T>(
    ctx: &ClientContext,
    cursor: Option<Cursor>,
    single_page: bool,
    max_pages: Option<u32>,
) -> Result<Option<(Page<T>, Option<Cursor>)>>
where
    T: DeserializeOwned,
{
    let Some(cursor) = cursor else {
        return Ok(None);
    };

    let response = ctx.execute_with_backoff(&cursor.request).await?;
    let fetched = cursor.fetched + 1;

    let links = LinkRelations::from_response(&response);
    let pagination = PaginationInfo::from_response(&response);
    let records: Vec<T> = ctx.decode_records(response.body)?;

    // Page number from the server, falling back to our own count
    let current = pagination.current.unwrap_or(fetched);
    let under_limit = max_pages.map_or(true, |max| current < max);

    debug!(
        "Fetched page {} from {}: {} records",
        current,
        cursor.request.url,
        records.len()
    );

    let next = match links.next() {
        Some(link) if !single_page && under_limit => Some(Cursor {
            request: ctx.follow_request(&link.url),
            fetched,
        }),
        _ => None,
    };

    let page = Page {
        records,
        pagination,
        links,
    };
    Ok(Some((page, next)))
}

/// Fetch a collection endpoint and concatenate every page's records
///
/// Records keep server order. With `show_pagination`, the result carries the
/// metadata of the first page fetched.
pub async fn fetch_paginated<T>(
    ctx: &ClientContext,
    endpoint: &str,
    options: &PaginationOptions,
) -> Result<PageResult<T>>
where
    T: DeserializeOwned + Send,
{
    let mut pages = pin!(page_stream::<T>(ctx, endpoint, options));
    let mut data = Vec::new();
    let mut first = None;
    let mut count = 0u32;

    while let Some(page) = pages.try_next().await? {
        count += 1;
        first.get_or_insert(page.pagination);
        data.extend(page.records);
    }

    debug!("Fetched {} records in {} pages from {}", data.len(), count, endpoint);

    if options.show_pagination {
        return Ok(PageResult::Paginated {
            data,
            pagination: first.unwrap_or_default(),
        });
    }

    Ok(PageResult::Records(data))
}
