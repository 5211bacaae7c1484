//! Past orders shown on the orders tab

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::ImageRef;
use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Delivered,
    Shipped,
    Processing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub title: String,
    pub price: Money,
    pub quantity: u32,
    pub image: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub placed_on: NaiveDate,
    pub status: OrderStatus,
    pub total: Money,
    pub items: Vec<OrderItem>,
}

impl Order {
    fn new(id: &str, placed_on: NaiveDate, status: OrderStatus, items: Vec<OrderItem>) -> Self {
        let total: Money = items.iter().map(|i| i.price.times(i.quantity)).sum();
        Self {
            id: id.to_string(),
            placed_on,
            status,
            total,
            items,
        }
    }
}

fn item(title: &str, dollars: i64, image: ImageRef) -> OrderItem {
    OrderItem {
        title: title.to_string(),
        price: Money::from_dollars(dollars),
        quantity: 1,
        image,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Static order history, oldest first
pub fn order_history() -> Vec<Order> {
    vec![
        Order::new(
            "ORD-001",
            date(2024, 1, 15),
            OrderStatus::Delivered,
            vec![
                item("iPhone 15", 899, ImageRef::Phone),
                item("AirPods Pro", 249, ImageRef::Headphones),
            ],
        ),
        Order::new(
            "ORD-002",
            date(2024, 1, 20),
            OrderStatus::Shipped,
            vec![item("MacBook Air M3", 1299, ImageRef::Laptop)],
        ),
        Order::new(
            "ORD-003",
            date(2024, 1, 22),
            OrderStatus::Processing,
            vec![item("Sony Headphones", 399, ImageRef::Headphones)],
        ),
    ]
}
