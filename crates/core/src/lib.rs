//! Project Kisan Core - flow schemas, validation and price data.
//!
//! This crate holds everything about the flows that does not touch the
//! network: the declarative request/response schemas, the pure validation
//! functions over them, data-URI handling for image uploads, and the
//! read-only mandi price fixture used by the dashboard.

pub mod errors;
pub mod market_prices;
pub mod schema;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::{SchemaViolation, ValidationError};
