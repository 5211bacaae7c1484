//! Shopping cart and order history
//!
//! Lines are never stored with a zero quantity: setting a quantity of zero or
//! less removes the line. Totals are derived on every call from the current
//! lines and the store's pricing rules.

mod orders;

use serde::Serialize;

use crate::catalog::ImageRef;
use crate::config::PricingConfig;
use crate::money::Money;

pub use orders::{order_history, Order};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: u32,
    pub title: String,
    pub unit_price: Money,
    quantity: u32,
    pub image: ImageRef,
}

impl CartLine {
    /// Returns `None` for a zero quantity, which cannot be stored
    pub fn new(id: u32, title: &str, unit_price: Money, quantity: u32, image: ImageRef) -> Option<Self> {
        (quantity > 0).then(|| Self {
            id,
            title: title.to_string(),
            unit_price,
            quantity,
            image,
        })
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Derived cart totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn free_shipping(&self) -> bool {
        self.shipping == Money::ZERO
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The cart a shopper starts with
    pub fn seeded() -> Self {
        Self::new(
            [
                CartLine::new(1, "iPhone 15 Pro", Money::from_dollars(999), 1, ImageRef::Phone),
                CartLine::new(2, "AirPods Pro 2", Money::from_dollars(249), 2, ImageRef::Headphones),
                CartLine::new(3, "MacBook Air M3", Money::from_dollars(1299), 1, ImageRef::Laptop),
            ]
            .into_iter()
            .flatten()
            .collect(),
        )
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, line_id: u32) -> bool {
        self.lines.iter().any(|l| l.id == line_id)
    }

    pub fn line(&self, line_id: u32) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Replace a line's quantity; zero or negative removes the line.
    /// Unknown ids are ignored. Quantities above `u32::MAX` are clamped to it.
    pub fn set_quantity(&mut self, line_id: u32, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(line_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity;
        }
    }

    pub fn increment(&mut self, line_id: u32) {
        if let Some(current) = self.line(line_id).map(CartLine::quantity) {
            self.set_quantity(line_id, i64::from(current) + 1);
        }
    }

    pub fn decrement(&mut self, line_id: u32) {
        if let Some(current) = self.line(line_id).map(CartLine::quantity) {
            self.set_quantity(line_id, i64::from(current) - 1);
        }
    }

    /// Drop a line regardless of quantity. Returns whether it existed.
    pub fn remove_line(&mut self, line_id: u32) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != line_id);
        self.lines.len() != before
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn summary(&self, pricing: &PricingConfig) -> OrderSummary {
        let subtotal = self.subtotal();
        let tax = subtotal.scale(pricing.tax_rate);
        let shipping = if subtotal > pricing.free_shipping_threshold() {
            Money::ZERO
        } else {
            pricing.shipping_fee()
        };

        OrderSummary {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_line_cart() -> Cart {
        Cart::new(vec![
            CartLine::new(1, "iPhone 15 Pro", Money::from_dollars(999), 1, ImageRef::Phone).unwrap(),
            CartLine::new(2, "AirPods Pro 2", Money::from_dollars(249), 2, ImageRef::Headphones)
                .unwrap(),
        ])
    }

    #[test]
    fn test_summary_arithmetic() {
        let summary = two_line_cart().summary(&PricingConfig::default());

        assert_eq!(summary.subtotal, Money::from_cents(149_700));
        assert_eq!(summary.tax, Money::from_cents(11_976));
        assert_eq!(summary.shipping, Money::ZERO);
        assert!(summary.free_shipping());
        assert_eq!(summary.total, Money::from_cents(161_676));
        assert_eq!(summary.total.to_string(), "$1616.76");
    }

    #[test]
    fn test_shipping_charged_at_threshold() {
        let pricing = PricingConfig::default();
        let cart = Cart::new(vec![CartLine::new(
            7,
            "Gift Card",
            Money::from_dollars(1000),
            1,
            ImageRef::Phone,
        )
        .unwrap()]);

        let summary = cart.summary(&pricing);
        assert_eq!(summary.shipping, Money::from_dollars(29));
        assert_eq!(summary.total, Money::from_cents(100_000 + 8_000 + 2_900));

        let empty = Cart::default().summary(&pricing);
        assert_eq!(empty.subtotal, Money::ZERO);
        assert_eq!(empty.shipping, Money::from_dollars(29));
    }

    #[test]
    fn test_zero_or_negative_quantity_removes_line() {
        let mut cart = two_line_cart();
        cart.set_quantity(1, 0);
        assert!(!cart.contains(1));
        assert_eq!(cart.len(), 1);

        cart.set_quantity(2, -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = two_line_cart();
        cart.set_quantity(2, 5);
        assert_eq!(cart.line(2).unwrap().quantity(), 5);

        cart.set_quantity(99, 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes() {
        let mut cart = two_line_cart();
        cart.increment(1);
        assert_eq!(cart.line(1).unwrap().quantity(), 2);

        cart.decrement(1);
        cart.decrement(1);
        assert!(cart.line(1).is_none());
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::seeded();
        assert_eq!(cart.len(), 3);
        assert!(cart.remove_line(3));
        assert!(!cart.remove_line(3));
        assert_eq!(cart.subtotal(), Money::from_dollars(1497));
    }

    #[test]
    fn test_zero_quantity_line_is_rejected() {
        assert!(CartLine::new(1, "Nothing", Money::from_dollars(1), 0, ImageRef::Phone).is_none());
    }

    #[test]
    fn test_huge_quantity_is_clamped() {
        let mut cart = two_line_cart();
        cart.set_quantity(1, i64::MAX);
        assert_eq!(cart.line(1).map(CartLine::quantity), Some(u32::MAX));
    }
}
