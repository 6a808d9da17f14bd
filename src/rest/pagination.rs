//! Cursor pagination over list endpoints.
//!
//! A list response embeds its items under `_embedded.items` and names the
//! following page in `_links.next.href`. [`Paginator`] follows those links
//! one page at a time; [`Paginator::collect_all`] drains it into a single
//! ordered `Vec`.
//!
//! Two safeguards bound the loop against a misbehaving server: a URL that
//! was already fetched is a cycle, and no more than `max_pages` pages are
//! fetched.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::rest::Paginator;
//!
//! let mut pages = Paginator::new(&rest_client, "families", &[], 100)?;
//! while let Some(page) = pages.next_page().await? {
//!     println!("{} families from {}", page.items.len(), page.url);
//! }
//! ```

use std::collections::HashSet;

use serde_json::Value;

use crate::clients::rest::{PaginationFailure, RestClient, RestError};
use crate::clients::{DataType, HttpError, HttpMethod, HttpRequest};

/// One fetched page.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// The URL the page was fetched from.
    pub url: String,
    /// The page items, in server order.
    pub items: Vec<Value>,
    /// The URL of the next page, `None` on the last page.
    pub next_url: Option<String>,
}

/// Lazily walks the pages of a list endpoint.
///
/// The paginator stops for good after the last page or after the first
/// failure.
#[derive(Debug)]
pub struct Paginator<'a> {
    client: &'a RestClient,
    next_url: Option<String>,
    seen: HashSet<String>,
    pages_fetched: u32,
    max_pages: u32,
}

impl<'a> Paginator<'a> {
    /// Creates a paginator starting at `path` with the given query.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if `path` is empty.
    pub fn new(
        client: &'a RestClient,
        path: &str,
        query: &[(String, String)],
        max_pages: u32,
    ) -> Result<Self, RestError> {
        if path.trim().trim_matches('/').is_empty() {
            return Err(RestError::InvalidPath {
                path: path.to_string(),
            });
        }

        let start_url = client.http_client().build_url(path, query);

        Ok(Self {
            client,
            next_url: Some(start_url),
            seen: HashSet::new(),
            pages_fetched: 0,
            max_pages,
        })
    }

    /// Returns the number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Returns `true` while another page remains to be fetched.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_url.is_some()
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the last page has been returned.
    ///
    /// # Errors
    ///
    /// Returns a [`PaginationFailure`] if the request fails, the page has no
    /// `_embedded.items`, the next URL was already fetched, or `max_pages`
    /// pages were fetched while more remain.
    pub async fn next_page(&mut self) -> Result<Option<Page>, PaginationFailure> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        if self.pages_fetched >= self.max_pages {
            return Err(PaginationFailure::MaxPagesExceeded {
                max_pages: self.max_pages,
            });
        }

        if !self.seen.insert(url.clone()) {
            return Err(PaginationFailure::Cycle { url });
        }

        let request = HttpRequest::builder(HttpMethod::Get, url.as_str())
            .body_type(DataType::Json)
            .build()
            .map_err(HttpError::from)?;
        let response = self.client.http_client().request(request).await?;

        let next_url = response.pagination.next_url.clone();
        let items = take_items(response.body)
            .ok_or_else(|| PaginationFailure::MissingItems { url: url.clone() })?;

        self.pages_fetched += 1;
        tracing::debug!(
            "Fetched page {} with {} items from {}",
            self.pages_fetched,
            items.len(),
            url
        );

        self.next_url.clone_from(&next_url);

        Ok(Some(Page {
            url,
            items,
            next_url,
        }))
    }

    /// Fetches every remaining page and concatenates their items.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] carrying the items collected before
    /// the failure.
    pub async fn collect_all(mut self) -> Result<Vec<Value>, RestError> {
        let mut items = Vec::new();

        loop {
            match self.next_page().await {
                Ok(Some(page)) => items.extend(page.items),
                Ok(None) => return Ok(items),
                Err(reason) => {
                    tracing::warn!(
                        "Pagination stopped after {} page(s) with {} item(s): {}",
                        self.pages_fetched,
                        items.len(),
                        reason
                    );
                    return Err(RestError::Pagination {
                        items,
                        pages_fetched: self.pages_fetched,
                        reason,
                    });
                }
            }
        }
    }
}

/// Moves the `_embedded.items` array out of a list body.
fn take_items(mut body: Value) -> Option<Vec<Value>> {
    match body.get_mut("_embedded")?.get_mut("items")?.take() {
        Value::Array(items) => Some(items),
        _ => None,
    }
}
