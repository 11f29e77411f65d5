//! Lip Glaze Core - Shared domain library.
//!
//! This crate provides the domain model used by the storefront:
//! - [`types`] - Newtype wrappers for product ids, prices and product attributes
//! - [`catalog`] - The built-in product catalog, listing queries and the shade finder
//! - [`cart`] - Cart lines and the cart mutation rules
//! - [`i18n`] - Locales and the per-locale translation resources
//! - [`checkout`] - Payment method selection for the checkout form
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no storage, no DOM,
//! no logging. Everything here builds and is tested on any target.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod i18n;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogQuery, Product};
pub use checkout::{PaymentFields, PaymentMethod};
pub use i18n::{I18nError, Locale, Translations};
pub use types::*;
