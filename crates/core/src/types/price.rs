//! Rupiah prices.
//!
//! The storefront only sells in Indonesian Rupiah, which has no minor unit in
//! everyday use, so a price is a whole number of rupiah. Prices serialize as
//! plain JSON numbers to keep persisted cart data readable.

use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Serialize};

/// Non-breaking space placed between the currency symbol and the amount.
const NBSP: char = '\u{a0}';

/// A price in whole Indonesian Rupiah.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero rupiah.
    pub const ZERO: Self = Self(0);

    /// Currency symbol shown before every amount.
    pub const SYMBOL: &'static str = "Rp";

    /// Create a new price from a whole rupiah amount.
    #[must_use]
    pub const fn new(rupiah: u64) -> Self {
        Self(rupiah)
    }

    /// Price of `quantity` units, saturating on overflow.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// The amount grouped the `id-ID` way, e.g. `149.000`.
    #[must_use]
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    }

    /// Symbol and amount separated by a plain space, e.g. `Rp 149.000`.
    #[must_use]
    pub fn plain(self) -> String {
        format!("{} {}", Self::SYMBOL, self.grouped())
    }
}

/// Formats as `Rp 149.000` with a non-breaking space.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{NBSP}{}", Self::SYMBOL, self.grouped())
    }
}

impl From<u64> for Price {
    fn from(rupiah: u64) -> Self {
        Self(rupiah)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(Price::new(0).grouped(), "0");
        assert_eq!(Price::new(999).grouped(), "999");
        assert_eq!(Price::new(1000).grouped(), "1.000");
        assert_eq!(Price::new(149_000).grouped(), "149.000");
        assert_eq!(Price::new(1_234_567).grouped(), "1.234.567");
    }

    #[test]
    fn test_display_uses_nbsp() {
        assert_eq!(Price::new(149_000).to_string(), "Rp\u{a0}149.000");
        assert_eq!(Price::new(149_000).plain(), "Rp 149.000");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(149_000).times(2), Price::new(139_000)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(437_000));
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }
}
