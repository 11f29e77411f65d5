//! Payment method selection on the checkout form.
//!
//! The form carries two mutually exclusive field groups. Only the group for
//! the selected method is shown and required, so the browser's own `required`
//! validation applies to the visible fields alone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    EWallet,
}

impl PaymentMethod {
    /// Method for the checked `paymentMethod` radio value.
    ///
    /// Only `"ewallet"` selects the e-wallet; anything else, including no
    /// checked radio at all, selects the card.
    #[must_use]
    pub fn from_radio(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Which field groups to show and require for this method.
    #[must_use]
    pub const fn fields(self) -> PaymentFields {
        match self {
            Self::Card => PaymentFields {
                card_visible: true,
                card_required: true,
                ewallet_visible: false,
                ewallet_required: false,
            },
            Self::EWallet => PaymentFields {
                card_visible: false,
                card_required: false,
                ewallet_visible: true,
                ewallet_required: true,
            },
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::EWallet => write!(f, "ewallet"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "ewallet" => Ok(Self::EWallet),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Visibility and `required` flags for the two payment field groups.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentFields {
    pub card_visible: bool,
    pub card_required: bool,
    pub ewallet_visible: bool,
    pub ewallet_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_radio() {
        assert_eq!(PaymentMethod::from_radio(Some("ewallet")), PaymentMethod::EWallet);
        assert_eq!(PaymentMethod::from_radio(Some("card")), PaymentMethod::Card);
        assert_eq!(PaymentMethod::from_radio(Some("cash")), PaymentMethod::Card);
        assert_eq!(PaymentMethod::from_radio(None), PaymentMethod::Card);
    }

    #[test]
    fn test_field_groups_are_exclusive() {
        for method in [PaymentMethod::Card, PaymentMethod::EWallet] {
            let fields = method.fields();
            assert_ne!(fields.card_visible, fields.ewallet_visible);
            assert_eq!(fields.card_visible, fields.card_required);
            assert_eq!(fields.ewallet_visible, fields.ewallet_required);
        }
        assert!(PaymentMethod::EWallet.fields().ewallet_required);
        assert!(!PaymentMethod::EWallet.fields().card_required);
    }
}
