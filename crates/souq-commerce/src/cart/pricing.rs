//! Cart pricing calculations.

use crate::cart::{Cart, LineKey};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// What the shopper saves against previous prices.
    pub savings: Money,
    /// Amount due. No shipping or tax is charged by the storefront.
    pub grand_total: Money,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Price every line of `cart`.
    pub fn for_cart(cart: &Cart) -> Result<Self, CommerceError> {
        let line_items = cart
            .items()
            .iter()
            .map(|item| {
                if item.unit_price.currency != cart.currency {
                    return Err(CommerceError::CurrencyMismatch {
                        expected: cart.currency.code().to_string(),
                        got: item.unit_price.currency.code().to_string(),
                    });
                }
                let total = item.line_total().ok_or(CommerceError::Overflow)?;
                let savings = match item.previous_unit_price {
                    Some(prev)
                        if prev.currency == item.unit_price.currency
                            && prev.amount_minor > item.unit_price.amount_minor =>
                    {
                        prev.try_subtract(&item.unit_price)
                            .and_then(|d| d.try_multiply(item.quantity))
                            .ok_or(CommerceError::Overflow)?
                    }
                    _ => Money::zero(cart.currency),
                };
                Ok(LineItemPricing {
                    key: item.key(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    total,
                    savings,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal = Money::try_sum(line_items.iter().map(|l| &l.total), cart.currency)
            .ok_or(CommerceError::Overflow)?;
        let savings = Money::try_sum(line_items.iter().map(|l| &l.savings), cart.currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            savings,
            grand_total: subtotal,
            line_items,
        })
    }

    /// Check if any line is discounted.
    pub fn has_savings(&self) -> bool {
        self.savings.is_positive()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line identity.
    pub key: LineKey,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub total: Money,
    /// (previous price - unit price) * quantity, zero when not discounted.
    pub savings: Money,
}
