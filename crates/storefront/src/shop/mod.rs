//! Shop API clients.
//!
//! # Architecture
//!
//! - Plain JSON-over-HTTP via `reqwest`, typed request/response structs
//! - The shop backend is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for catalog reads (5 minute TTL)
//!
//! # APIs
//!
//! ## Catalog API
//! - Product list, product detail, category list
//! - Read-only; results cached
//!
//! ## Auth API
//! - Login, registration, email availability
//! - Never cached; session state is owned by [`crate::session`]
//!
//! # Example
//!
//! ```rust,ignore
//! use fashionhub_storefront::shop::CatalogClient;
//!
//! let catalog = CatalogClient::new(&config.api)?;
//! let products = catalog.list_products().await?;
//! let product = catalog.get_product(&"P1".into()).await?;
//! ```

mod auth;
mod catalog;
pub mod types;

pub use auth::AuthClient;
pub use catalog::CatalogClient;
pub use types::*;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when talking to the shop API.
///
/// Everything except [`ShopError::NotFound`] is a transport-class failure
/// from the caller's point of view: the collaborator was unreachable, timed
/// out, or answered with something other than the agreed shape.
#[derive(Debug, Error)]
pub enum ShopError {
    /// HTTP request failed (connection refused, DNS, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("Unexpected status {status} from {endpoint}")]
    Status {
        /// HTTP status code returned.
        status: reqwest::StatusCode,
        /// Endpoint path that was called.
        endpoint: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response parsed but did not carry the fields the contract promises.
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
}

impl ShopError {
    /// Whether this error was caused by the fixed request timeout.
    ///
    /// Timeouts are reported the same way as any other transport failure;
    /// this only exists so callers can log a more helpful hint.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Read a JSON body of type `T` from a response.
///
/// Reads the body as text first so parse failures can log a snippet of what
/// the server actually sent.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, ShopError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            endpoint,
            body = %body.chars().take(500).collect::<String>(),
            "Shop API returned non-success status"
        );
        return Err(ShopError::Status {
            status,
            endpoint: endpoint.to_string(),
        });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                endpoint,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse shop API response"
            );
            Err(ShopError::Parse(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_error_display() {
        let err = ShopError::NotFound("product P1".to_string());
        assert_eq!(err.to_string(), "Not found: product P1");

        let err = ShopError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            endpoint: "products".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 500 Internal Server Error from products"
        );
    }

    #[test]
    fn non_http_errors_are_not_timeouts() {
        assert!(!ShopError::NotFound("x".to_string()).is_timeout());
        assert!(
            !ShopError::UnexpectedResponse("missing userId".to_string()).is_timeout()
        );
    }
}
