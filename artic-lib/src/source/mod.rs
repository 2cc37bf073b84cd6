//! Page sources
//!
//! A [`PageSource`] fetches one page of records at a time from a paginated
//! listing. It is stateless with respect to selection, never retries, and
//! never caches: every call is a fresh fetch. Caching belongs to the
//! [`SelectionController`](crate::selection::SelectionController).

mod http;

pub use http::*;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::Page;

/// Fetches pages from a paginated listing endpoint.
///
/// # Example
///
/// ```ignore
/// use artic_lib::source::{ArticClient, PageSource};
///
/// let client = ArticClient::builder().build()?;
/// let page = client.fetch(1, 10).await?;
/// println!("{} of {} artworks", page.len(), page.total());
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page.
    ///
    /// `page` is 1-based. `page_size` is the number of records per page and
    /// must be the same value the caller uses for its own page arithmetic.
    async fn fetch(&self, page: u32, page_size: usize) -> Result<Page, TransportError>;
}
