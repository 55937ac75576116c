//! Integration tests for FashionHub.
//!
//! Provides [`StubShop`], an in-process stand-in for the remote shop API.
//! Each test spawns its own stub on an ephemeral port and points the
//! storefront clients at it, so the whole suite runs hermetically with no
//! external backend.
//!
//! The stub mirrors the real backend's quirks: rejected credentials come
//! back as 200 with `success: false`, duplicate registrations as 400 with a
//! verdict body, and `userId` is a JSON number.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// A registered account in the stub.
#[derive(Debug, Clone)]
pub struct StubUser {
    pub user_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Mutable stub state shared with the handlers.
#[derive(Default)]
pub struct StubState {
    products: Mutex<Vec<Value>>,
    categories: Mutex<Vec<Value>>,
    users: Mutex<Vec<StubUser>>,
    fail_products: AtomicBool,
    fail_categories: AtomicBool,
}

/// An in-process stub of the shop API.
pub struct StubShop {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubShop {
    /// Spawn a stub on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound (test-only code).
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::default());

        let app = Router::new()
            .route("/api/products", get(list_products))
            .route("/api/products/{id}", get(get_product))
            .route("/api/categories", get(list_categories))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/check-email", get(check_email))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Base URL to hand to `ShopApiConfig::for_base_url`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Replace the product list served by `/api/products`.
    pub fn set_products(&self, products: Vec<Value>) {
        *self.state.products.lock().expect("stub lock") = products;
    }

    /// Replace the category list served by `/api/categories`.
    pub fn set_categories(&self, categories: Vec<Value>) {
        *self.state.categories.lock().expect("stub lock") = categories;
    }

    /// Seed an account the login endpoint will accept.
    pub fn add_user(&self, user: StubUser) {
        self.state.users.lock().expect("stub lock").push(user);
    }

    /// Make `/api/products` answer 500 until turned off.
    pub fn fail_products(&self, fail: bool) {
        self.state.fail_products.store(fail, Ordering::SeqCst);
    }

    /// Make `/api/categories` answer 500 until turned off.
    pub fn fail_categories(&self, fail: bool) {
        self.state.fail_categories.store(fail, Ordering::SeqCst);
    }
}

// =============================================================================
// Catalog handlers
// =============================================================================

async fn list_products(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    if state.fail_products.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response();
    }
    let products = state.products.lock().expect("stub lock").clone();
    Json(Value::Array(products)).into_response()
}

async fn get_product(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let products = state.products.lock().expect("stub lock");
    let found = products
        .iter()
        .find(|p| p.get("productId").and_then(Value::as_str) == Some(id.as_str()));

    match found {
        Some(product) => Json(product.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn list_categories(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    if state.fail_categories.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response();
    }
    let categories = state.categories.lock().expect("stub lock").clone();
    Json(Value::Array(categories)).into_response()
}

// =============================================================================
// Auth handlers
// =============================================================================

async fn login(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let users = state.users.lock().expect("stub lock");
    let matched = users
        .iter()
        .find(|u| u.email == email && u.password == password);

    // Like the real backend: bad credentials are 200 + success:false
    match matched {
        Some(user) => Json(json!({
            "success": true,
            "message": "Login successful",
            "userId": user.user_id,
            "firstName": user.first_name,
            "lastName": user.last_name,
            "email": user.email,
        }))
        .into_response(),
        None => Json(json!({
            "success": false,
            "message": "Invalid email or password",
        }))
        .into_response(),
    }
}

async fn register(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let email = body
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    let mut users = state.users.lock().expect("stub lock");
    if users.iter().any(|u| u.email == email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Email already exists. Please use a different email.",
            })),
        )
            .into_response();
    }

    let user_id = users.iter().map(|u| u.user_id).max().unwrap_or(4) + 1;
    users.push(StubUser {
        user_id,
        first_name: body
            .get("firstName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        last_name: body
            .get("lastName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        email,
        password: body
            .get("password")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    });

    Json(json!({
        "success": true,
        "message": "Registration successful! You can now login with your credentials.",
        "userId": user_id,
    }))
    .into_response()
}

#[derive(serde::Deserialize)]
struct CheckEmailQuery {
    email: String,
}

async fn check_email(
    State(state): State<Arc<StubState>>,
    Query(query): Query<CheckEmailQuery>,
) -> impl IntoResponse {
    let email = query.email.trim().to_lowercase();
    let exists = state
        .users
        .lock()
        .expect("stub lock")
        .iter()
        .any(|u| u.email == email);

    Json(json!({
        "success": true,
        "available": !exists,
        "message": if exists { "Email already exists" } else { "Email is available" },
    }))
    .into_response()
}
