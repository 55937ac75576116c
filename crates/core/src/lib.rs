//! FashionHub Core - Shared types library.
//!
//! This crate provides common types used across all FashionHub components:
//! - `storefront` - Catalog, filtering, and session logic
//! - `cli` - Command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
