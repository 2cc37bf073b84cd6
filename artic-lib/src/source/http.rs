//! HTTP page source for the Art Institute of Chicago API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::PageSource;
use crate::error::TransportError;
use crate::model::Page;
use crate::model::Record;

/// Default base URL of the public collection API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Fields requested by default: the id plus the columns a grid displays.
pub const DEFAULT_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// Client for the `/artworks` listing endpoint.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use artic_lib::source::ArticClient;
///
/// let client = ArticClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct ArticClient {
    inner: Arc<ArticClientInner>,
}

struct ArticClientInner {
    listing_url: Url,
    fields: Vec<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArticClient {
    /// Creates a new builder with default settings.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Returns the listing endpoint URL, without query parameters.
    pub fn listing_url(&self) -> &Url {
        &self.inner.listing_url
    }

    /// Returns the fields requested for each record.
    pub fn fields(&self) -> &[String] {
        &self.inner.fields
    }

    fn page_url(&self, page: u32, page_size: usize) -> Url {
        let mut url = self.inner.listing_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            query.append_pair("limit", &page_size.to_string());
            if !self.inner.fields.is_empty() {
                query.append_pair("fields", &self.inner.fields.join(","));
            }
        }
        url
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => TransportError::Timeout(timeout),
            _ => TransportError::Network(err),
        }
    }
}

#[async_trait]
impl PageSource for ArticClient {
    async fn fetch(&self, page: u32, page_size: usize) -> Result<Page, TransportError> {
        if page == 0 {
            return Err(TransportError::InvalidRequest(
                "page numbers start at 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(TransportError::InvalidRequest(
                "page size must be positive".to_string(),
            ));
        }

        let url = self.page_url(page, page_size);
        log::debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(TransportError::http(status.as_u16(), message));
        }

        let listing: ListingResponse = serde_json::from_str(&body)
            .map_err(|e| TransportError::parse_with_body(e.to_string(), body.as_str()))?;

        Ok(Page::new(listing.data, listing.pagination.total))
    }
}

/// Listing response body. Only `data` and `pagination.total` are consumed.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: Vec<Record>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: usize,
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing an [`ArticClient`].
///
/// Every setting has a default, so `ArticClient::builder().build()` talks to
/// the public API.
pub struct ArticClientBuilder {
    base_url: String,
    fields: Vec<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            timeout: None,
            connect_timeout: None,
            user_agent: None,
            http_client: None,
        }
    }

    /// Sets the API base URL. `/artworks` is appended to it.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the fields requested for each record.
    ///
    /// An empty list omits the `fields` parameter and the API returns every
    /// field. `id` is always needed; it is added if missing.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        if !self.fields.is_empty() && !self.fields.iter().any(|f| f == "id") {
            self.fields.insert(0, "id".to_string());
        }
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header sent with every request.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ArticClient`].
    ///
    /// Fails if the base URL cannot be parsed or the HTTP client cannot be built.
    pub fn build(self) -> Result<ArticClient, TransportError> {
        let mut listing_url = Url::parse(&self.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        listing_url
            .path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("artworks");

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder.build()?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                listing_url,
                fields: self.fields,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_appends_artworks() {
        let client = ArticClient::builder()
            .base_url("http://localhost:8080/api/v1/")
            .build()
            .unwrap();
        assert_eq!(client.listing_url().as_str(), "http://localhost:8080/api/v1/artworks");
    }

    #[test]
    fn test_page_url_query() {
        let client = ArticClient::builder()
            .base_url("http://localhost/api/v1")
            .fields(["title"])
            .build()
            .unwrap();
        let url = client.page_url(3, 15);
        assert_eq!(
            url.as_str(),
            "http://localhost/api/v1/artworks?page=3&limit=15&fields=id%2Ctitle"
        );
    }

    #[test]
    fn test_empty_fields_omits_parameter() {
        let client = ArticClient::builder()
            .base_url("http://localhost/api/v1")
            .fields(Vec::<String>::new())
            .build()
            .unwrap();
        assert_eq!(
            client.page_url(1, 10).as_str(),
            "http://localhost/api/v1/artworks?page=1&limit=10"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ArticClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));

        let result = ArticClient::builder().base_url("mailto:someone@example.com").build();
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_page_zero_rejected_without_io() {
        let client = ArticClient::builder()
            .base_url("http://127.0.0.1:9/api/v1")
            .build()
            .unwrap();
        let result = client.fetch(0, 10).await;
        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }
}
