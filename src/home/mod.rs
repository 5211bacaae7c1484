//! Home feed: hero banner, hot deals, AI picks and quick-buy lists

use serde::Serialize;

use crate::catalog::ImageRef;
use crate::money::Money;

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub badges: [&'static str; 2],
    pub image: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotDeal {
    pub id: u32,
    pub title: String,
    pub price: Money,
    pub original_price: Money,
    pub discount_percent: u32,
    pub image: ImageRef,
}

impl HotDeal {
    pub fn new(id: u32, title: &str, price: Money, original_price: Money, image: ImageRef) -> Self {
        Self {
            id,
            title: title.to_string(),
            price,
            original_price,
            discount_percent: discount_percent(price, original_price),
            image,
        }
    }
}

/// Whole-percent saving relative to the original price
pub fn discount_percent(price: Money, original_price: Money) -> u32 {
    if original_price <= price || original_price <= Money::ZERO {
        return 0;
    }
    let saved = (original_price - price).cents() as f64;
    (saved / original_price.cents() as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, Serialize)]
pub struct AiPick {
    pub id: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub image: ImageRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickBuyList {
    pub id: u32,
    pub title: &'static str,
    pub items: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub hero: Hero,
    pub hot_deals: Vec<HotDeal>,
    pub ai_picks: Vec<AiPick>,
    pub quick_buy: Vec<QuickBuyList>,
}

impl HomeFeed {
    pub fn seeded() -> Self {
        Self {
            hero: Hero {
                title: "Your AI Shopping Companion",
                subtitle: "Discover products tailored just for you with intelligent recommendations, instant answers, and personalized deals",
                badges: ["AI Powered", "Smart Shopping"],
                image: ImageRef::HeroAssistant,
            },
            hot_deals: vec![
                HotDeal::new(1, "iPhone 15 Pro", Money::from_dollars(999), Money::from_dollars(1199), ImageRef::Phone),
                HotDeal::new(2, "MacBook Air M3", Money::from_dollars(1199), Money::from_dollars(1299), ImageRef::Laptop),
                HotDeal::new(3, "AirPods Pro", Money::from_dollars(199), Money::from_dollars(249), ImageRef::Headphones),
            ],
            ai_picks: vec![
                AiPick { id: 1, title: "Recommended for You", subtitle: "Based on your browsing", image: ImageRef::Phone },
                AiPick { id: 2, title: "Trending Now", subtitle: "Popular this week", image: ImageRef::Laptop },
                AiPick { id: 3, title: "Best Value", subtitle: "Great price & quality", image: ImageRef::Headphones },
            ],
            quick_buy: vec![
                QuickBuyList { id: 1, title: "Often Buy", items: vec!["Coffee", "Headphones", "Books"] },
                QuickBuyList { id: 2, title: "AI Smart Cart", items: vec!["Recommended", "Bundled", "Trending"] },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_discounts() {
        let feed = HomeFeed::seeded();
        let discounts: Vec<_> = feed.hot_deals.iter().map(|d| d.discount_percent).collect();
        assert_eq!(discounts, [17, 8, 20]);
    }

    #[test]
    fn test_no_discount_without_markdown() {
        assert_eq!(discount_percent(Money::from_dollars(10), Money::from_dollars(10)), 0);
        assert_eq!(discount_percent(Money::from_dollars(12), Money::from_dollars(10)), 0);
        assert_eq!(discount_percent(Money::ZERO, Money::ZERO), 0);
    }
}
