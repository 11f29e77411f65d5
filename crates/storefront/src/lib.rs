//! Lip Glaze Storefront.
//!
//! The browser half of the catalog page, compiled to WebAssembly:
//! - [`config`] - Inline page configuration
//! - [`storage`] - Key-value persistence (`localStorage` in the browser)
//! - [`store`] - Cart and locale stores with change subscriptions
//! - [`views`] - askama fragments and display strings for every view
//! - [`telemetry`] - tracing output to the browser console
//!
//! Everything above builds natively and is tested without a browser. The DOM
//! adapter and event wiring are compiled for `wasm32` only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod telemetry;
pub mod views;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use error::{AppError, Result};
