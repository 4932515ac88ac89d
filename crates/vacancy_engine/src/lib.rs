//! Vacancy engine: HTTP catalog client and response-shape normalization.
mod decode;
mod fetch;
mod types;

pub use fetch::{CatalogClient, HttpCatalogClient};
pub use types::{ClientSettings, FailureKind, FetchError, DEFAULT_PAGE_SIZE};
