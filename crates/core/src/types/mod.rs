//! Core types for the Lip Glaze storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod attributes;
pub mod id;
pub mod price;

pub use attributes::*;
pub use id::*;
pub use price::Price;
