//! Locales and translation resources.
//!
//! Each locale is a flat JSON object mapping a symbolic key (the value of a
//! `data-i18n` attribute) to display text. The English and Indonesian tables
//! are bundled from `locales/*.json`; pages can layer further resources on
//! top with [`Translations::load`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_EN: &str = include_str!("../locales/en.json");
const BUNDLED_ID: &str = include_str!("../locales/id.json");

/// Errors raised while loading translation resources.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("Invalid translation resource for {locale}: {source}")]
    InvalidResource {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Indonesian.
    Id,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Id];

    /// The persisted value and `<html lang>` code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| I18nError::UnknownLocale(s.to_string()))
    }
}

/// Translation keys referenced from code.
///
/// Keys used only by static markup live in the resources alone.
pub mod keys {
    pub const ADD_TO_CART: &str = "addToCart";
    pub const VIEW_DETAILS: &str = "viewDetails";
    pub const PRODUCT_ADDED: &str = "productAdded";
    pub const MINI_CART_TITLE: &str = "miniCartTitle";
    pub const MINI_CART_EMPTY: &str = "miniCartEmpty";
    pub const MINI_CART_TOTAL: &str = "miniCartTotal";
    pub const VIEW_CART: &str = "viewCart";
    pub const PROCEED_CHECKOUT: &str = "proceedCheckout";
    pub const CART_PRODUCT: &str = "cartProduct";
    pub const CART_PRICE: &str = "cartPrice";
    pub const CART_QUANTITY: &str = "cartQuantity";
    pub const CART_SUBTOTAL: &str = "cartSubtotal";
    pub const CART_ACTION: &str = "cartAction";
    pub const TOTAL_LABEL: &str = "totalLabel";
    pub const CONTINUE_SHOPPING: &str = "continueShopping";
    pub const CHECKOUT_BUTTON: &str = "checkoutButton";
    pub const RECOMMENDED_PRODUCTS: &str = "recommendedProducts";
}

/// Per-locale key/value string tables.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    tables: HashMap<Locale, HashMap<String, String>>,
}

impl Translations {
    /// Tables with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The English and Indonesian tables shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::InvalidResource` if a bundled file is not a flat
    /// JSON object of strings.
    pub fn bundled() -> Result<Self, I18nError> {
        let mut translations = Self::empty();
        translations.load(Locale::En, BUNDLED_EN)?;
        translations.load(Locale::Id, BUNDLED_ID)?;
        Ok(translations)
    }

    /// Merge a JSON resource into the table for `locale`.
    ///
    /// Keys already present are overwritten. Returns the number of entries in
    /// the resource.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::InvalidResource` if `json` is not a flat JSON
    /// object of strings; the table is left unchanged.
    pub fn load(&mut self, locale: Locale, json: &str) -> Result<usize, I18nError> {
        let entries: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|source| I18nError::InvalidResource { locale, source })?;
        let count = entries.len();
        self.tables.entry(locale).or_default().extend(entries);
        Ok(count)
    }

    /// Text for `key` in `locale`, if that table has it.
    #[must_use]
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.tables
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Text for `key` in `locale`, falling back to English and then to the
    /// key itself.
    #[must_use]
    pub fn text<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::En, key))
            .unwrap_or(key)
    }

    /// Number of entries for `locale`.
    #[must_use]
    pub fn len(&self, locale: Locale) -> usize {
        self.tables.get(&locale).map_or(0, HashMap::len)
    }

    /// Whether `locale` has no entries.
    #[must_use]
    pub fn is_empty(&self, locale: Locale) -> bool {
        self.len(locale) == 0
    }
}
