//! FashionHub Storefront core library.
//!
//! This crate implements the storefront's client-side core: typed access to
//! the remote shop API, the in-memory catalog filter engine, and the account
//! session lifecycle. Presentation layers (the CLI, a future web frontend)
//! supply criteria and credentials and render what comes back.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod config;
pub mod search;
pub mod session;
pub mod shop;
