//! Core types for the gift shop.
//!
//! This module provides catalog records and type-safe wrappers for common
//! domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod price;

pub use catalog::{Category, Product};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
