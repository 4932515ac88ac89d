use log::{error, info};

use vacancy_core::PageResult;

use crate::decode;
use crate::types::{ClientSettings, FailureKind, FetchError};

const ERROR_BODY_PREVIEW_CHARS: usize = 500;

#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches one page of the catalog. `page` is 1-based; an empty query
    /// applies no filter. Single attempt per call, no retry.
    async fn fetch_page(&self, query: &str, page: u32) -> Result<PageResult, FetchError>;
}

/// Catalog client over the upstream HTTP API.
///
/// The inner `reqwest::Client` is built once and shared for connection
/// reuse; dropping the client releases it.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    endpoint: String,
    settings: ClientSettings,
}

impl HttpCatalogClient {
    pub fn new(endpoint: impl Into<String>, settings: ClientSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        let endpoint = endpoint.into();
        info!("Catalog client created for {endpoint}");
        Ok(Self {
            client,
            endpoint,
            settings,
        })
    }
}

#[async_trait::async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<PageResult, FetchError> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("page", page.to_string().as_str())]);
        if !query.is_empty() {
            request = request.query(&[("query", query)]);
        }

        info!(
            "Requesting vacancies from {} (page {page}, query {query:?})",
            self.endpoint
        );
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        info!("Catalog response status: {status}");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Catalog request failed with status {status}; response: {}",
                truncate(&body, ERROR_BODY_PREVIEW_CHARS)
            );
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        match decode::normalize_page(&body, page, self.settings.default_page_size) {
            Ok(result) => Ok(result),
            Err(err) => {
                error!("Failed to decode catalog response (page {page}): {err}");
                Err(err)
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
