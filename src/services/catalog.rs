use crate::config::Config;
use crate::error::CatalogError;
use crate::models::book::{BookDetail, BookSummary};
use crate::models::responses::{parse_detail_body, parse_search_body};
use crate::utils::text::{normalize_query, strip_identifier_prefix};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

/// The two backend calls the search view depends on.
#[async_trait]
pub trait CatalogApi {
    async fn search(&self, query: &str) -> Result<Vec<BookSummary>, CatalogError>;
    /// `key` is the bare identifier, already stripped of any path prefix.
    async fn book_detail(&self, key: &str) -> Result<BookDetail, CatalogError>;
}

pub struct HttpCatalog {
    client: Client,
    base: Url,
}

impl HttpCatalog {
    pub fn new(api_base: &str, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let base = Url::parse(api_base).map_err(|e| CatalogError::InvalidBaseUrl {
            url: api_base.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                url: api_base.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        Self::new(&config.api_base, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, CatalogError> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn search(&self, query: &str) -> Result<Vec<BookSummary>, CatalogError> {
        let query = normalize_query(query).ok_or(CatalogError::EmptyQuery)?;

        let mut url = self.endpoint(&["api", "search"])?;
        url.query_pairs_mut().append_pair("query", &query);

        let body = self.get_bytes(url).await?;
        let books = parse_search_body(&body)?;

        info!("Search '{}' returned {} books", query, books.len());
        Ok(books)
    }

    async fn book_detail(&self, key: &str) -> Result<BookDetail, CatalogError> {
        let key = strip_identifier_prefix(key);
        if key.is_empty() {
            return Err(CatalogError::MalformedResponse(
                "book identifier is empty".to_string(),
            ));
        }

        let url = self.endpoint(&["api", "book", key])?;
        let body = self.get_bytes(url).await?;
        let detail = parse_detail_body(&body, key)?;

        info!("Fetched details for book {}", key);
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_extend_base_path() {
        let catalog = HttpCatalog::new("http://catalog.test/v1/", None).unwrap();
        let url = catalog.endpoint(&["api", "book", "OL1W"]).unwrap();
        assert_eq!(url.as_str(), "http://catalog.test/v1/api/book/OL1W");

        let catalog = HttpCatalog::new("http://catalog.test", None).unwrap();
        let url = catalog.endpoint(&["api", "search"]).unwrap();
        assert_eq!(url.as_str(), "http://catalog.test/api/search");
    }

    #[test]
    fn path_keys_are_percent_encoded() {
        let catalog = HttpCatalog::new("http://catalog.test", None).unwrap();
        let url = catalog.endpoint(&["api", "book", "a b?c"]).unwrap();
        assert_eq!(url.as_str(), "http://catalog.test/api/book/a%20b%3Fc");
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        assert!(matches!(
            HttpCatalog::new("not a url", None),
            Err(CatalogError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpCatalog::new("mailto:someone@example.com", None),
            Err(CatalogError::InvalidBaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn blank_query_never_reaches_the_network() {
        // Nothing listens on port 9; a request attempt would surface as a network error.
        let catalog = HttpCatalog::new("http://127.0.0.1:9", None).unwrap();
        assert!(matches!(
            catalog.search("   ").await,
            Err(CatalogError::EmptyQuery)
        ));
    }
}
