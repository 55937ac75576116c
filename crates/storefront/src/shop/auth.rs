//! Auth API client.
//!
//! Wire-level access to the shop's authentication endpoints. Interpretation
//! of the `success` flag (and all session state) lives in [`crate::session`];
//! this client only moves typed payloads back and forth.

use std::sync::Arc;

use tracing::instrument;

use crate::config::ShopApiConfig;
use crate::shop::types::{EmailAvailability, LoginResponse, NewUser, RegistrationResult};
use crate::shop::{ShopError, read_json};

/// Client for the shop's auth API.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    config: ShopApiConfig,
}

impl AuthClient {
    /// Create a new auth API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ShopApiConfig) -> Result<Self, ShopError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(AuthClientInner {
                client,
                config: config.clone(),
            }),
        })
    }

    /// Submit credentials to the login endpoint.
    ///
    /// Returns the raw response: rejected credentials come back with a 200
    /// status and `success: false`, not an HTTP error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable, times out, or answers
    /// with a non-success status or an unparseable body.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ShopError> {
        let endpoint = self.inner.config.endpoint("auth/login");
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self.inner.client.post(&endpoint).json(&body).send().await?;
        read_json(response, "auth/login").await
    }

    /// Submit a registration request.
    ///
    /// The backend rejects invalid or duplicate registrations with a 400
    /// status whose body still carries `{success, message}`; that verdict is
    /// returned to the caller rather than treated as a transport failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable, times out, or answers
    /// with a server error or an unparseable body.
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register(&self, new_user: &NewUser) -> Result<RegistrationResult, ShopError> {
        let endpoint = self.inner.config.endpoint("auth/register");

        let response = self
            .inner
            .client
            .post(&endpoint)
            .json(&new_user.to_body())
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            // Validation failures and duplicate emails come back as 400 with
            // the regular verdict body
            let body = response.text().await?;
            if let Ok(result) = serde_json::from_str::<RegistrationResult>(&body) {
                return Ok(result);
            }
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Unparseable registration rejection"
            );
            return Err(ShopError::Status {
                status,
                endpoint: "auth/register".to_string(),
            });
        }

        read_json(response, "auth/register").await
    }

    /// Ask whether an email address is free to register.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn check_email(&self, email: &str) -> Result<EmailAvailability, ShopError> {
        let endpoint = self.inner.config.endpoint("auth/check-email");

        let response = self
            .inner
            .client
            .get(&endpoint)
            .query(&[("email", email)])
            .send()
            .await?;

        read_json(response, "auth/check-email").await
    }
}
