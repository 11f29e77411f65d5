//! Cart lines and cart mutation rules.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product and every quantity
//! is at least one. The rules are enforced here; persistence and change
//! notification live in the storefront's cart store.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Smallest quantity a cart line may hold.
pub const MIN_QUANTITY: u32 = 1;

/// One product in the cart, snapshotted when it was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// A new line for `product` with quantity one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: MIN_QUANTITY,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Ordered cart contents.
///
/// Serializes as a bare array of lines. Deserializing goes through
/// [`Cart::from_lines`], so decoded carts are normalized too.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    /// Build a cart from lines of unknown provenance.
    ///
    /// Quantities below one are raised to one and repeated product ids are
    /// merged into the first occurrence.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::default();
        for mut line in lines {
            line.quantity = line.quantity.max(MIN_QUANTITY);
            match cart.line_mut(line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.id == id)
    }

    /// Add one unit of `product`: bumps the existing line or appends a new one.
    pub fn add(&mut self, product: &Product) {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Set the quantity of the line for `id`, raising it to at least one.
    ///
    /// Returns `false` and leaves the cart untouched when there is no such line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        self.line_mut(id).is_some_and(|line| {
            line.quantity = quantity.max(MIN_QUANTITY);
            true
        })
    }

    /// Drop the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() != before
    }

    /// Total number of units across all lines (the nav badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

/// Read a quantity typed into a quantity input.
///
/// Parses leading decimal digits the way the browser's `parseInt` does
/// (`"3 pcs"` is 3, `"2.7"` is 2) and falls back to one for anything empty,
/// non-numeric, zero or negative. Huge values saturate.
#[must_use]
pub fn parse_quantity(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..digits_end).unwrap_or_default();

    if negative || digits.is_empty() {
        return MIN_QUANTITY;
    }
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    value.max(MIN_QUANTITY)
}

/// Read a quantity input and decide whether its text must be rewritten.
///
/// Returns the quantity to store and, when the typed text does not already
/// show that quantity, the text to put back into the input.
#[must_use]
pub fn read_quantity_input(input: &str) -> (u32, Option<String>) {
    let quantity = parse_quantity(input);
    let shown = quantity.to_string();
    if input.trim() == shown {
        (quantity, None)
    } else {
        (quantity, Some(shown))
    }
}
