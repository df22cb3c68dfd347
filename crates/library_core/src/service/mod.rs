//! Catalog use-case layer.
//!
//! # Responsibility
//! - Keep the presentation-facing mirror and route every mutation to
//!   storage through the repository layer.
//! - Keep callers decoupled from SQL and connection handling.

pub mod catalog;
pub mod snapshot;
