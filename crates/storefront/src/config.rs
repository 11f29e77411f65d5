//! Storefront configuration.
//!
//! The browser has no environment, so the page may embed overrides as JSON:
//!
//! ```html
//! <script type="application/json" id="storefrontConfig">
//!   { "success_url": "thank-you.html", "log_filter": "lip_glaze_storefront=debug" }
//! </script>
//! ```
//!
//! # Fields
//!
//! - `cart_key` - local-storage key for the cart (default: `cart`)
//! - `locale_key` - local-storage key for the locale preference (default: `lang`)
//! - `default_locale` - locale used when none is persisted (default: `en`)
//! - `success_url` - checkout redirect target, relative to the page (default: `success.html`)
//! - `log_filter` - tracing `EnvFilter` directive
//! - `animation_threshold` - visible ratio that triggers scroll animations (default: 0.1)
//!
//! Missing fields take their defaults; unknown fields are rejected.

use lip_glaze_core::Locale;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Element id of the inline configuration script.
pub const CONFIG_ELEMENT_ID: &str = "storefrontConfig";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Invalid configuration value {0}: {1}")]
    InvalidValue(String, String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Storage key holding the serialized cart
    pub cart_key: String,
    /// Storage key holding the locale preference
    pub locale_key: String,
    /// Locale used when no preference is stored
    pub default_locale: Locale,
    /// Where checkout navigates after clearing the cart
    pub success_url: String,
    /// Tracing filter directive
    pub log_filter: String,
    /// Intersection ratio at which `.animate-on-scroll` elements animate
    pub animation_threshold: f64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_key: "cart".to_string(),
            locale_key: "lang".to_string(),
            default_locale: Locale::En,
            success_url: "success.html".to_string(),
            log_filter: "lip_glaze_storefront=info".to_string(),
            animation_threshold: 0.1,
        }
    }
}

impl StorefrontConfig {
    /// Parse and validate configuration from the inline JSON block.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed, names an unknown field,
    /// or a value fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the stores and wiring rely on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cart_key.trim().is_empty() {
            return Err(invalid("cart_key", "must not be empty"));
        }
        if self.locale_key.trim().is_empty() {
            return Err(invalid("locale_key", "must not be empty"));
        }
        if self.cart_key == self.locale_key {
            return Err(invalid("locale_key", "must differ from cart_key"));
        }
        if self.success_url.trim().is_empty() {
            return Err(invalid("success_url", "must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.animation_threshold) {
            return Err(invalid(
                "animation_threshold",
                &format!("must be between 0 and 1 (got {})", self.animation_threshold),
            ));
        }
        Ok(())
    }

    /// Absolute success location for a page at `page_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if either URL cannot be parsed.
    pub fn success_location(&self, page_url: &str) -> Result<Url, ConfigError> {
        Ok(Url::parse(page_url)?.join(&self.success_url)?)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue(field.to_string(), reason.to_string())
}
