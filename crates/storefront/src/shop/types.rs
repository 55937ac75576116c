//! Domain types for the shop API.
//!
//! Wire structs use camelCase field names to match the backend's JSON, with
//! defensive `#[serde(default)]` on everything the backend has been observed
//! to omit or null out. A product with no brand is a valid product; it just
//! never matches a brand filter.

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use fashionhub_core::{CategoryId, ProductId, UserId};

// =============================================================================
// Catalog Types
// =============================================================================

/// A product in the catalog.
///
/// Owned by the remote shop service; the client holds an immutable snapshot
/// per fetch and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID (e.g., "P1").
    pub product_id: ProductId,
    /// Display name.
    #[serde(default)]
    pub product_name: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Current selling price.
    #[serde(default)]
    pub price: Decimal,
    /// Pre-discount price, when the product is on offer. Always >= `price`.
    #[serde(default)]
    pub original_price: Option<Decimal>,
    /// Derived display value, 0-100.
    #[serde(default)]
    pub discount_percent: u32,
    /// Category display name. Absent products never match a category filter.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Brand name. Absent products never match a brand filter.
    #[serde(default)]
    pub brand: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub quantity_in_stock: u32,
    /// Product image URL, relative or absolute.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Available sizes, in the order the shop defines them.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Active offer lines, in the order the shop defines them.
    #[serde(default)]
    pub offers: Vec<String>,
}

impl Product {
    /// Whether the product is currently purchasable.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity_in_stock > 0
    }

    /// Whether the product is sold below its original price.
    #[must_use]
    pub fn discounted(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category ID.
    pub category_id: CategoryId,
    /// Display name (e.g., "Men", "Women", "Kids").
    #[serde(default)]
    pub category_name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Auth Request Types
// =============================================================================

/// Data submitted when registering a new account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct NewUser {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Chosen password.
    pub password: SecretString,
    /// Optional phone number.
    pub phone_number: Option<String>,
}

impl NewUser {
    /// Build the registration request body.
    pub(crate) fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "password": self.password.expose_secret(),
            "phoneNumber": self.phone_number,
        })
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

// =============================================================================
// Auth Response Types
// =============================================================================

/// Raw login response from the auth API.
///
/// The backend reports failed credentials with a 200 status and
/// `success: false`, so every field besides `success` is optional here and
/// checked by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Whether the credentials were accepted.
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome message.
    #[serde(default)]
    pub message: Option<String>,
    /// Authenticated user's ID, present on success.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// First name, present on success.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name, present on success.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Canonical email, present on success.
    #[serde(default)]
    pub email: Option<String>,
}

/// Outcome of a registration attempt, as reported by the shop.
///
/// Registration never authenticates; this is only the server's verdict.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    /// Whether the account was created.
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome message.
    #[serde(default)]
    pub message: String,
}

/// Outcome of an email availability check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAvailability {
    /// Whether the email is free to register.
    #[serde(default)]
    pub available: bool,
    /// Human-readable outcome message.
    #[serde(default)]
    pub message: String,
}
