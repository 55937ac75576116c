//! CLI command implementations.

pub mod account;
pub mod catalog;

use thiserror::Error;

use fashionhub_storefront::config::ConfigError;
use fashionhub_storefront::session::AuthError;
use fashionhub_storefront::shop::ShopError;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shop API request failed.
    #[error("shop API error: {0}")]
    Shop(#[from] ShopError),

    /// An auth operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Command input was invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// A follow-up line worth printing under the error message, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        let shop_error = match self {
            Self::Shop(e) | Self::Auth(AuthError::Api(e)) => e,
            Self::Config(_) | Self::Auth(AuthError::Rejected(_)) | Self::InvalidArgument(_) => {
                return None;
            }
        };
        shop_error
            .is_timeout()
            .then_some("the shop API did not answer in time; check that the backend is running")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_timeouts_get_a_hint() {
        assert!(CliError::Shop(ShopError::NotFound("product P1".to_string()))
            .hint()
            .is_none());
        assert!(
            CliError::Auth(AuthError::Rejected("Invalid email or password".to_string()))
                .hint()
                .is_none()
        );
        assert!(CliError::InvalidArgument("price".to_string()).hint().is_none());
    }
}
