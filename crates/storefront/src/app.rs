//! Page bootstrap and event wiring.
//!
//! Startup order: apply translations, wire the language and filter controls,
//! render the grid, cart page and mini-cart, then wire the modal, shade
//! finder, payment toggle, checkout form and scroll animations. Each step
//! skips itself when the page lacks its elements.
//!
//! Views redraw from store notifications. Handlers only mutate state.
//!
//! [`start`] mounts a [`Storefront`] over `localStorage`; browser tests mount
//! one over an in-memory store and a fixture document.

use std::cell::Cell;
use std::rc::Rc;

use lip_glaze_core::cart::read_quantity_input;
use lip_glaze_core::i18n::keys;
use lip_glaze_core::{
    Cart, Catalog, CatalogQuery, CategoryFilter, Locale, PaymentMethod, Product, ProductId,
    SkinTone, SortOrder, Translations,
};
use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlImageElement, HtmlInputElement, HtmlSelectElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node, Window,
};

use crate::config::{StorefrontConfig, CONFIG_ELEMENT_ID};
use crate::dom;
use crate::error::{AppError, Result};
use crate::storage::{KeyValueStore, LocalStorage, MemoryStore};
use crate::store::{CartStore, LocaleStore};
use crate::telemetry;
use crate::views::cart::{render_cart_page, CartLabels};
use crate::views::mini_cart::{nav_count, render_mini_cart};
use crate::views::modal::ProductModalView;
use crate::views::products::{render_product_grid, render_recommendations};
use crate::views::Localizer;

/// Entry point run by the generated JS glue once the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    install_panic_hook();

    let (window, doc) = match dom::window().and_then(|w| Ok((w, dom::document()?))) {
        Ok(pair) => pair,
        Err(e) => {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
            return;
        }
    };

    let (config, config_error) = load_config(&doc);
    if let Err(e) = telemetry::init(&config) {
        web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
    }
    if let Some(e) = config_error {
        e.report("load config");
    }

    let translations = load_translations(&doc);

    match LocalStorage::open() {
        Ok(storage) => {
            Storefront::mount(window, doc, config, translations, storage);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Local storage unavailable, cart will not persist");
            Storefront::mount(window, doc, config, translations, MemoryStore::new());
        }
    }
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&format!("panic: {info}")));
        }));
    });
}

/// Configuration from the inline JSON block, or defaults.
///
/// A rejected block is returned alongside the defaults so it can be logged
/// once tracing is up.
fn load_config(doc: &Document) -> (StorefrontConfig, Option<AppError>) {
    let Some(json) = doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return (StorefrontConfig::default(), None);
    };

    match StorefrontConfig::from_json(&json) {
        Ok(config) => (config, None),
        Err(e) => (StorefrontConfig::default(), Some(e.into())),
    }
}

/// Bundled tables overlaid with any `script[data-i18n-resource]` blocks.
fn load_translations(doc: &Document) -> Translations {
    let mut translations = Translations::bundled().unwrap_or_else(|e| {
        AppError::from(e).report("load bundled translations");
        Translations::empty()
    });

    for script in dom::query_all_doc::<Element>(doc, "script[data-i18n-resource]") {
        let Some(code) = script.get_attribute("data-i18n-resource") else {
            continue;
        };
        let json = script.text_content().unwrap_or_default();
        match code
            .parse::<Locale>()
            .and_then(|locale| translations.load(locale, &json))
        {
            Ok(count) => tracing::debug!(locale = %code, count, "Loaded page translations"),
            Err(e) => AppError::from(e).report("load page translations"),
        }
    }

    translations
}

fn log_failure(action: &str, result: Result<()>) {
    if let Err(e) = result {
        e.report(action);
    }
}

/// Page-lifetime state shared by every handler.
pub struct Storefront<S> {
    window: Window,
    doc: Document,
    config: StorefrontConfig,
    catalog: Rc<Catalog>,
    translations: Translations,
    carts: CartStore<S>,
    locales: LocaleStore<S>,
    query: Cell<CatalogQuery>,
    /// Tone of the shade finder results on screen, if any.
    tone: Cell<Option<SkinTone>>,
    animations: Option<IntersectionObserver>,
}

impl<S: KeyValueStore + Clone + 'static> Storefront<S> {
    /// Render `doc` from `storage` and wire every control it contains.
    ///
    /// Listeners hold the returned handle for the lifetime of the page.
    pub fn mount(
        window: Window,
        doc: Document,
        config: StorefrontConfig,
        translations: Translations,
        storage: S,
    ) -> Rc<Self> {
        let catalog = Rc::new(Catalog::builtin());
        let carts = CartStore::new(storage.clone(), config.cart_key.clone(), Rc::clone(&catalog));
        let locales = LocaleStore::new(storage, config.locale_key.clone(), config.default_locale);
        let animations = scroll_observer(&window, config.animation_threshold);

        let app = Rc::new(Self {
            window,
            doc,
            config,
            catalog,
            translations,
            carts,
            locales,
            query: Cell::new(CatalogQuery::default()),
            tone: Cell::new(None),
            animations,
        });
        app.start();
        app
    }
}

impl<S> std::fmt::Debug for Storefront<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("query", &self.query.get())
            .field("tone", &self.tone.get())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore + 'static> Storefront<S> {
    #[must_use]
    pub const fn carts(&self) -> &CartStore<S> {
        &self.carts
    }

    #[must_use]
    pub const fn locales(&self) -> &LocaleStore<S> {
        &self.locales
    }

    fn start(self: &Rc<Self>) {
        let l10n = self.l10n();
        self.subscribe();

        self.apply_translations(&l10n);
        self.setup_language_switcher();
        self.setup_filter_controls();
        log_failure("render products", self.render_products(&l10n));
        self.setup_product_grid();

        let cart = self.carts.get();
        log_failure("render cart page", self.render_cart_page(&cart));
        self.apply_cart_labels(&l10n);
        self.setup_cart_table();
        self.render_nav_count(&cart);
        self.setup_mini_cart();
        log_failure("render mini-cart", self.render_mini_cart(&cart, &l10n));

        self.setup_product_modal();
        self.setup_shade_finder();
        self.setup_payment_options();
        self.setup_checkout_form();
        if let Some(root) = self.doc.document_element() {
            self.observe_animations(&root);
        }

        tracing::info!(locale = %l10n.locale(), items = cart.item_count(), "Storefront ready");
    }

    fn l10n(&self) -> Localizer<'_> {
        Localizer::new(&self.translations, self.locales.current())
    }

    fn subscribe(self: &Rc<Self>) {
        let app = Rc::downgrade(self);
        self.carts.subscribe(move |cart| {
            if let Some(app) = app.upgrade() {
                app.render_cart_views(cart);
            }
        });

        let app = Rc::downgrade(self);
        self.locales.subscribe(move |locale| {
            if let Some(app) = app.upgrade() {
                app.render_locale_views(*locale);
            }
        });
    }

    fn render_cart_views(&self, cart: &Cart) {
        self.render_nav_count(cart);
        log_failure("render mini-cart", self.render_mini_cart(cart, &self.l10n()));
        log_failure("render cart page", self.render_cart_page(cart));
    }

    fn render_locale_views(&self, locale: Locale) {
        let l10n = Localizer::new(&self.translations, locale);
        self.apply_translations(&l10n);
        log_failure("render products", self.render_products(&l10n));
        log_failure("render mini-cart", self.render_mini_cart(&self.carts.get(), &l10n));
        self.apply_cart_labels(&l10n);
        log_failure("render shade results", self.render_shade_results(&l10n));
    }

    // =========================================================================
    // Translations
    // =========================================================================

    fn apply_translations(&self, l10n: &Localizer<'_>) {
        if let Some(root) = self.doc.document_element() {
            if let Err(e) = root.set_attribute("lang", l10n.locale().as_str()) {
                dom::js_error("lang", &e).report("apply translations");
            }
        }

        for el in dom::query_all_doc::<Element>(&self.doc, "[data-i18n]") {
            if let Some(text) = el.get_attribute("data-i18n").and_then(|key| l10n.lookup(&key)) {
                el.set_text_content(Some(text));
            }
        }

        for el in dom::query_all_doc::<Element>(&self.doc, "[data-i18n-placeholder]") {
            if let Some(text) = el
                .get_attribute("data-i18n-placeholder")
                .and_then(|key| l10n.lookup(&key))
            {
                if let Err(e) = el.set_attribute("placeholder", text) {
                    dom::js_error("placeholder", &e).report("apply translations");
                }
            }
        }
    }

    fn setup_language_switcher(self: &Rc<Self>) {
        let Some(select) = dom::by_id::<HtmlSelectElement>(&self.doc, "languageSelect") else {
            return;
        };
        select.set_value(self.locales.current().as_str());

        let app = Rc::clone(self);
        let control = select.clone();
        dom::on(&select, "change", move |_| match control.value().parse::<Locale>() {
            Ok(locale) => log_failure("switch locale", app.locales.set(locale)),
            Err(e) => tracing::warn!(error = %e, "Ignoring language selection"),
        });
    }

    // =========================================================================
    // Product listing
    // =========================================================================

    fn setup_filter_controls(self: &Rc<Self>) {
        if let Some(select) = dom::by_id::<HtmlSelectElement>(&self.doc, "categorySelect") {
            select.set_value(&self.query.get().category.to_string());
            let app = Rc::clone(self);
            let control = select.clone();
            dom::on(&select, "change", move |_| {
                match control.value().parse::<CategoryFilter>() {
                    Ok(category) => app.query.set(CatalogQuery {
                        category,
                        ..app.query.get()
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring category selection");
                        return;
                    }
                }
                log_failure("render products", app.render_products(&app.l10n()));
            });
        }

        if let Some(select) = dom::by_id::<HtmlSelectElement>(&self.doc, "priceSortSelect") {
            select.set_value(&self.query.get().sort.to_string());
            let app = Rc::clone(self);
            let control = select.clone();
            dom::on(&select, "change", move |_| {
                match control.value().parse::<SortOrder>() {
                    Ok(sort) => app.query.set(CatalogQuery {
                        sort,
                        ..app.query.get()
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring sort selection");
                        return;
                    }
                }
                log_failure("render products", app.render_products(&app.l10n()));
            });
        }
    }

    fn render_products(&self, l10n: &Localizer<'_>) -> Result<()> {
        let Some(grid) = self.doc.get_element_by_id("productGrid") else {
            return Ok(());
        };
        grid.set_inner_html(&render_product_grid(&self.catalog, &self.query.get(), l10n)?);
        self.observe_animations(&grid);
        Ok(())
    }

    fn setup_product_grid(self: &Rc<Self>) {
        let Some(grid) = self.doc.get_element_by_id("productGrid") else {
            return;
        };
        let app = Rc::clone(self);
        dom::on(&grid, "click", move |event| {
            if let Some(button) = dom::closest(&event, ".btn-add") {
                if let Some(id) = dom::data_id(&button) {
                    app.add_to_cart(id);
                }
            } else if let Some(button) = dom::closest(&event, ".btn-details") {
                if let Some(product) = dom::data_id(&button).and_then(|id| app.catalog.find(id)) {
                    app.show_product_modal(product);
                }
            }
        });
    }

    fn add_to_cart(&self, id: ProductId) {
        match self.carts.add(id) {
            Ok(true) => {
                let message = self.l10n().t(keys::PRODUCT_ADDED);
                if let Err(e) = self.window.alert_with_message(message) {
                    dom::js_error("alert", &e).report("confirm add to cart");
                }
            }
            Ok(false) => {}
            Err(e) => e.report("add to cart"),
        }
    }

    // =========================================================================
    // Product modal
    // =========================================================================

    fn show_product_modal(&self, product: &Product) {
        let Some(modal) = self.doc.get_element_by_id("productModal") else {
            return;
        };
        let view = ProductModalView::from(product);

        if let Some(image) = dom::query::<HtmlImageElement>(&modal, "#modalImage") {
            image.set_src(&view.image);
        }
        for (selector, text) in [
            ("#modalName", &view.name),
            ("#modalDesc", &view.description),
            ("#modalDetails", &view.details),
        ] {
            if let Some(el) = dom::query::<Element>(&modal, selector) {
                el.set_text_content(Some(text));
            }
        }
        dom::set_class(&modal, "open", true);
        tracing::debug!(product = %product.id, "Opened product details");
    }

    fn setup_product_modal(&self) {
        let Some(modal) = self.doc.get_element_by_id("productModal") else {
            return;
        };

        if let Some(close) = dom::query::<Element>(&modal, ".modal-close") {
            let modal = modal.clone();
            dom::on(&close, "click", move |_| dom::set_class(&modal, "open", false));
        }

        let backdrop = modal.clone();
        dom::on(&modal, "click", move |event| {
            if event
                .target()
                .is_some_and(|target| js_sys::Object::is(&target, &backdrop))
            {
                dom::set_class(&backdrop, "open", false);
            }
        });
    }

    // =========================================================================
    // Cart page, badge and mini-cart
    // =========================================================================

    fn render_cart_page(&self, cart: &Cart) -> Result<()> {
        let Some(table) = self.doc.get_element_by_id("cartTable") else {
            return Ok(());
        };
        let view = render_cart_page(cart)?;
        if let Some(body) = dom::query::<Element>(&table, "tbody") {
            body.set_inner_html(&view.rows_html);
        }
        dom::set_text_by_id(&self.doc, "cartTotal", &view.total);
        Ok(())
    }

    fn apply_cart_labels(&self, l10n: &Localizer<'_>) {
        let labels = CartLabels::new(l10n);

        if let Some(table) = self.doc.get_element_by_id("cartTable") {
            let cells = dom::query_all::<Element>(&table, "thead th");
            if cells.len() >= labels.headings.len() {
                for (cell, text) in cells.iter().zip(&labels.headings) {
                    cell.set_text_content(Some(text));
                }
            }
        }
        if let Some(link) = dom::query_doc::<Element>(&self.doc, ".btn-group a[href*=\"index.html\"]")
        {
            link.set_text_content(Some(&labels.continue_shopping));
        }
        dom::set_text_by_id(&self.doc, "checkoutBtn", &labels.checkout);

        // Only the label text node before the amount is replaced.
        if let Some(total) = dom::query_doc::<Element>(&self.doc, ".total") {
            let has_label = total.text_content().is_some_and(|t| t.contains(':'));
            if let (true, Some(label)) = (has_label, total.first_child()) {
                label.set_text_content(Some(&labels.total_label));
            }
        }
    }

    fn setup_cart_table(self: &Rc<Self>) {
        let Some(table) = self.doc.get_element_by_id("cartTable") else {
            return;
        };

        let app = Rc::clone(self);
        dom::on(&table, "change", move |event| {
            let Some(input) = dom::closest(&event, ".quantity-input")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(id) = dom::data_id(&input) else {
                return;
            };

            let (quantity, rewrite) = read_quantity_input(&input.value());
            if let Some(text) = rewrite {
                input.set_value(&text);
            }
            log_failure(
                "update quantity",
                app.carts.update_quantity(id, quantity).map(|_| ()),
            );
        });

        let app = Rc::clone(self);
        dom::on(&table, "click", move |event| {
            if let Some(id) = dom::closest(&event, ".btn-delete").and_then(|b| dom::data_id(&b)) {
                log_failure("remove from cart", app.carts.remove(id));
            }
        });
    }

    fn render_nav_count(&self, cart: &Cart) {
        dom::set_text_by_id(&self.doc, "navCartCount", &nav_count(cart));
    }

    fn render_mini_cart(&self, cart: &Cart, l10n: &Localizer<'_>) -> Result<()> {
        if self.doc.get_element_by_id("cartMenu").is_none() {
            return Ok(());
        }
        let view = render_mini_cart(cart, l10n)?;

        if let Some(list) = self.doc.get_element_by_id("miniCartItems") {
            list.set_inner_html(&view.items_html);
        }
        for (id, text) in [
            ("miniCartTotalPrice", &view.total),
            ("miniCartTitle", &view.title),
            ("miniCartTotalLabel", &view.total_label),
            ("miniViewCartBtn", &view.view_cart_label),
            ("miniCheckoutBtn", &view.checkout_label),
        ] {
            dom::set_text_by_id(&self.doc, id, text);
        }
        Ok(())
    }

    fn setup_mini_cart(self: &Rc<Self>) {
        let (Some(link), Some(menu)) = (
            dom::query_doc::<Element>(&self.doc, ".cart-link"),
            self.doc.get_element_by_id("cartMenu"),
        ) else {
            return;
        };

        let app = Rc::clone(self);
        let toggled = menu.clone();
        dom::on(&link, "click", move |event| {
            event.prevent_default();
            let open = !toggled.class_list().contains("open");
            dom::set_class(&toggled, "open", open);
            log_failure(
                "render mini-cart",
                app.render_mini_cart(&app.carts.get(), &app.l10n()),
            );
        });

        dom::on(&self.doc, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            if !menu.contains(target.as_ref()) && !link.contains(target.as_ref()) {
                dom::set_class(&menu, "open", false);
            }
        });
    }

    // =========================================================================
    // Shade finder
    // =========================================================================

    fn setup_shade_finder(self: &Rc<Self>) {
        let Some(button) = self.doc.get_element_by_id("shadeFinderBtn") else {
            return;
        };

        let app = Rc::clone(self);
        dom::on(&button, "click", move |_| {
            let Some(input) =
                dom::query_doc::<HtmlInputElement>(&app.doc, "input[name=\"skinTone\"]:checked")
            else {
                return;
            };
            match input.value().parse::<SkinTone>() {
                Ok(tone) => {
                    app.tone.set(Some(tone));
                    log_failure("render shade results", app.render_shade_results(&app.l10n()));
                    if let Some(section) = app.doc.get_element_by_id("shadeResult") {
                        dom::set_class(&section, "hidden", false);
                    }
                    tracing::debug!(%tone, "Shade finder");
                }
                Err(e) => tracing::warn!(error = %e, "Ignoring skin tone selection"),
            }
        });

        if let Some(results) = self.doc.get_element_by_id("shadeRecommendations") {
            let app = Rc::clone(self);
            dom::on(&results, "click", move |event| {
                if let Some(id) = dom::closest(&event, ".btn-add").and_then(|b| dom::data_id(&b)) {
                    app.add_to_cart(id);
                }
            });
        }
    }

    fn render_shade_results(&self, l10n: &Localizer<'_>) -> Result<()> {
        let (Some(tone), Some(results)) = (
            self.tone.get(),
            self.doc.get_element_by_id("shadeRecommendations"),
        ) else {
            return Ok(());
        };
        results.set_inner_html(&render_recommendations(&self.catalog, tone, l10n)?);
        self.observe_animations(&results);
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    fn setup_payment_options(&self) {
        let (Some(card), Some(ewallet)) = (
            self.doc.get_element_by_id("cardFields"),
            self.doc.get_element_by_id("ewalletFields"),
        ) else {
            return;
        };

        let doc = self.doc.clone();
        let update = Rc::new(move || {
            let selected = dom::query_doc::<HtmlInputElement>(
                &doc,
                "input[name=\"paymentMethod\"]:checked",
            )
            .map(|radio| radio.value());
            let method = PaymentMethod::from_radio(selected.as_deref());
            let fields = method.fields();

            dom::set_class(&card, "hidden", !fields.card_visible);
            dom::set_class(&ewallet, "hidden", !fields.ewallet_visible);
            for input in dom::query_all::<Element>(&card, "input") {
                dom::set_required(&input, fields.card_required);
            }
            for id in ["ewalletProvider", "ewalletNumber"] {
                if let Some(el) = doc.get_element_by_id(id) {
                    dom::set_required(&el, fields.ewallet_required);
                }
            }
            tracing::debug!(%method, "Payment method");
        });

        for radio in dom::query_all_doc::<Element>(&self.doc, "input[name=\"paymentMethod\"]") {
            let update = Rc::clone(&update);
            dom::on(&radio, "change", move |_| update());
        }
        update();
    }

    fn setup_checkout_form(self: &Rc<Self>) {
        let Some(form) = self.doc.get_element_by_id("checkoutForm") else {
            return;
        };
        let app = Rc::clone(self);
        dom::on(&form, "submit", move |event| {
            event.prevent_default();
            log_failure("place order", app.place_order());
        });
    }

    /// Clear the cart and leave for the success page.
    fn place_order(&self) -> Result<()> {
        let location = self.window.location();
        let page = location
            .href()
            .map_err(|e| dom::js_error("location.href", &e))?;
        let target = self.complete_order(&page)?;
        location
            .set_href(target.as_str())
            .map_err(|e| dom::js_error("location.href", &e))
    }

    /// Clear the cart and resolve the success page against `page`.
    ///
    /// The order completes even when the stale cart cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is not a URL the success page can be
    /// resolved against.
    pub fn complete_order(&self, page: &str) -> Result<Url> {
        if let Err(e) = self.carts.clear() {
            e.report("clear cart");
        }
        let target = self.config.success_location(page)?;
        tracing::info!(%target, "Order placed");
        Ok(target)
    }

    // =========================================================================
    // Scroll animations
    // =========================================================================

    fn observe_animations(&self, root: &Element) {
        let Some(observer) = &self.animations else {
            return;
        };
        for el in dom::query_all::<Element>(root, ".animate-on-scroll:not(.animated)") {
            observer.observe(&el);
        }
    }
}

/// Observer that marks `.animate-on-scroll` elements `animated` the first
/// time they intersect the viewport. `None` when unsupported.
fn scroll_observer(window: &Window, threshold: f64) -> Option<IntersectionObserver> {
    let supported = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false);
    if !supported {
        tracing::debug!("IntersectionObserver unavailable, skipping scroll animations");
        return None;
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    dom::set_class(&target, "animated", true);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            callback.forget();
            Some(observer)
        }
        Err(e) => {
            dom::js_error("IntersectionObserver", &e).report("start scroll animations");
            None
        }
    }
}
