//! Integration tests for the Lip Glaze storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lip-glaze-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart store mutations and the views that follow them
//! - `catalog_listing` - Category filter, price sort and the shade finder
//! - `locale` - Locale switching, persistence and page translation overrides
//! - `checkout` - Order placement, payment toggle and configuration
//!
//! Every test runs against [`TestPage`]: the stores, subscriptions and
//! renderers of the real page over an in-memory storage, without a browser.

use std::cell::RefCell;
use std::rc::Rc;

use lip_glaze_core::{Catalog, Locale, Translations};
use lip_glaze_storefront::config::StorefrontConfig;
use lip_glaze_storefront::storage::MemoryStore;
use lip_glaze_storefront::store::{CartStore, LocaleStore};
use lip_glaze_storefront::views::cart::{CartPageView, render_cart_page};
use lip_glaze_storefront::views::mini_cart::{MiniCartView, nav_count, render_mini_cart};
use lip_glaze_storefront::views::Localizer;

/// What the cart-dependent views last showed.
#[derive(Debug, Default)]
pub struct Rendered {
    pub nav_count: Option<String>,
    pub mini_cart: Option<MiniCartView>,
    pub cart_page: Option<CartPageView>,
    /// Number of cart notifications received.
    pub cart_renders: usize,
    /// Locales announced by the locale store, in order.
    pub locale_changes: Vec<Locale>,
}

/// One page load over a storage that outlives it.
pub struct TestPage {
    pub storage: MemoryStore,
    pub config: StorefrontConfig,
    pub translations: Rc<Translations>,
    pub carts: CartStore<MemoryStore>,
    pub locales: LocaleStore<MemoryStore>,
    pub rendered: Rc<RefCell<Rendered>>,
}

impl TestPage {
    /// Load a page over fresh storage with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the bundled translations fail to parse.
    #[must_use]
    pub fn new() -> Self {
        Self::load(MemoryStore::new())
    }

    /// Load a page over `storage`, as a browser reload would.
    ///
    /// # Panics
    ///
    /// Panics if the bundled translations fail to parse.
    #[must_use]
    pub fn load(storage: MemoryStore) -> Self {
        let translations = Translations::bundled().expect("bundled translations should parse");
        Self::with_translations(storage, translations)
    }

    /// Load a page over `storage` with explicit translation tables.
    #[must_use]
    pub fn with_translations(storage: MemoryStore, translations: Translations) -> Self {
        let config = StorefrontConfig::default();
        let translations = Rc::new(translations);
        let carts = CartStore::new(
            storage.clone(),
            config.cart_key.clone(),
            Rc::new(Catalog::builtin()),
        );
        let locales = LocaleStore::new(
            storage.clone(),
            config.locale_key.clone(),
            config.default_locale,
        );
        let rendered = Rc::new(RefCell::new(Rendered::default()));

        // Cart views read the active locale the same way the page does.
        let locale_reader = LocaleStore::new(
            storage.clone(),
            config.locale_key.clone(),
            config.default_locale,
        );
        let sink = Rc::clone(&rendered);
        let tables = Rc::clone(&translations);
        carts.subscribe(move |cart| {
            let l10n = Localizer::new(&tables, locale_reader.current());
            let mut rendered = sink.borrow_mut();
            rendered.nav_count = Some(nav_count(cart));
            rendered.mini_cart = render_mini_cart(cart, &l10n).ok();
            rendered.cart_page = render_cart_page(cart).ok();
            rendered.cart_renders += 1;
        });

        let sink = Rc::clone(&rendered);
        locales.subscribe(move |locale| sink.borrow_mut().locale_changes.push(*locale));

        Self {
            storage,
            config,
            translations,
            carts,
            locales,
            rendered,
        }
    }

    /// Localizer for the persisted locale.
    #[must_use]
    pub fn l10n(&self) -> Localizer<'_> {
        Localizer::new(&self.translations, self.locales.current())
    }

    /// Raw persisted cart JSON.
    #[must_use]
    pub fn persisted_cart(&self) -> Option<String> {
        self.storage.raw(&self.config.cart_key)
    }

    /// Persisted cart parsed as plain JSON.
    ///
    /// # Panics
    ///
    /// Panics if the persisted value is not JSON.
    #[must_use]
    pub fn persisted_cart_json(&self) -> Option<serde_json::Value> {
        self.persisted_cart()
            .map(|raw| serde_json::from_str(&raw).expect("persisted cart should be JSON"))
    }
}

impl Default for TestPage {
    fn default() -> Self {
        Self::new()
    }
}
