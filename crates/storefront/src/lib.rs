//! Gift shop storefront library.
//!
//! Catalog browsing, a persisted shopping cart and checkout, served as a
//! JSON API. Exposed as a library so the router can be tested without a
//! running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
