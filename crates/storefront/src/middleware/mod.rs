//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (assign or propagate `x-request-id`)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
