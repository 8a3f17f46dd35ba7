//! Gift Shop Core - Shared types library.
//!
//! This crate provides the types shared by every gift shop component:
//! - `storefront` - Catalog, cart and checkout service
//! - `cli` - Command-line tools for inspecting the catalog and saved cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Catalog records, type-safe IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
