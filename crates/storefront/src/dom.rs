//! Thin DOM helpers over `web-sys`.
//!
//! Lookups return `Option` so callers can skip setup for elements the
//! current page does not have.

use lip_glaze_core::ProductId;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::error::AppError;

/// Convert a thrown JS value into an [`AppError`].
pub fn js_error(context: &str, err: &JsValue) -> AppError {
    AppError::Dom(format!("{context}: {err:?}"))
}

pub fn window() -> Result<Window, AppError> {
    web_sys::window().ok_or_else(|| AppError::Dom("no window".to_string()))
}

pub fn document() -> Result<Document, AppError> {
    window()?
        .document()
        .ok_or_else(|| AppError::Dom("no document".to_string()))
}

/// Element with `id`, cast to `T`. `None` when absent or of another type.
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// First element under `root` matching `selector`, cast to `T`.
pub fn query<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

/// First element in the document matching `selector`, cast to `T`.
pub fn query_doc<T: JsCast>(doc: &Document, selector: &str) -> Option<T> {
    doc.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

/// Every element in `list` that casts to `T`.
fn collect<T: JsCast>(list: &web_sys::NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// All elements under `root` matching `selector`, cast to `T`.
pub fn query_all<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    root.query_selector_all(selector)
        .map(|list| collect(&list))
        .unwrap_or_default()
}

/// All elements in the document matching `selector`, cast to `T`.
pub fn query_all_doc<T: JsCast>(doc: &Document, selector: &str) -> Vec<T> {
    doc.query_selector_all(selector)
        .map(|list| collect(&list))
        .unwrap_or_default()
}

/// Set the text of the element with `id`, if present.
pub fn set_text_by_id(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Toggle `class` on `el`.
pub fn set_class(el: &Element, class: &str, on: bool) {
    let classes = el.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        js_error("classList", &e).report("toggle class");
    }
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        js_error(event, &e).report("attach listener");
    }
    closure.forget();
}

/// The element an event fired on, or its nearest ancestor, matching `selector`.
pub fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Product id from an element's `data-id` attribute.
pub fn data_id(el: &Element) -> Option<ProductId> {
    el.get_attribute("data-id")?.parse().ok()
}

/// Set or clear the `required` attribute on a form control.
pub fn set_required(el: &Element, required: bool) {
    if let Err(e) = el.toggle_attribute_with_force("required", required) {
        js_error("required", &e).report("toggle required");
    }
}
