//! Product catalog and its filters
//!
//! The visible product list is a pure function of the catalog and the current
//! `FilterState`: the title must contain the search text (case-insensitive) and
//! the category must match unless "all" is selected.
//!
//! Price ranges are recorded and shown as removable badges but do not narrow
//! the results. No numeric bounds exist for them yet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

/// Product image handle, resolved to an asset by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageRef {
    Phone,
    Laptop,
    Headphones,
    HeroAssistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Phones,
    Laptops,
    Audio,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Phones, Category::Laptops, Category::Audio];

    pub fn id(self) -> &'static str {
        match self {
            Category::Phones => "phones",
            Category::Laptops => "laptops",
            Category::Audio => "audio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Phones => "Phones",
            Category::Laptops => "Laptops",
            Category::Audio => "Audio",
        }
    }
}

/// Selected category, or every category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Products",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Options in the filter drawer, "all" first
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.id()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "phones" => Ok(CategoryFilter::Only(Category::Phones)),
            "laptops" => Ok(CategoryFilter::Only(Category::Laptops)),
            "audio" => Ok(CategoryFilter::Only(Category::Audio)),
            _ => Err(s.to_string()),
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "under-500")]
    Under500,
    #[serde(rename = "500-1000")]
    From500To1000,
    #[serde(rename = "1000-2000")]
    From1000To2000,
    #[serde(rename = "over-2000")]
    Over2000,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Under500,
        PriceRange::From500To1000,
        PriceRange::From1000To2000,
        PriceRange::Over2000,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PriceRange::Under500 => "under-500",
            PriceRange::From500To1000 => "500-1000",
            PriceRange::From1000To2000 => "1000-2000",
            PriceRange::Over2000 => "over-2000",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceRange::Under500 => "Under $500",
            PriceRange::From500To1000 => "$500 - $1000",
            PriceRange::From1000To2000 => "$1000 - $2000",
            PriceRange::Over2000 => "Over $2000",
        }
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceRange::ALL
            .into_iter()
            .find(|range| range.id() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub price: Money,
    pub rating: f32,
    pub review_count: u32,
    pub category: Category,
    pub image: ImageRef,
}

impl Product {
    pub fn new(
        id: u32,
        title: &str,
        price: Money,
        rating: f32,
        review_count: u32,
        category: Category,
        image: ImageRef,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            price,
            rating,
            review_count,
            category,
            image,
        }
    }
}

/// The static product catalog
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "iPhone 15 Pro Max", Money::from_dollars(1199), 4.8, 234, Category::Phones, ImageRef::Phone),
        Product::new(2, "MacBook Air M3", Money::from_dollars(1299), 4.9, 156, Category::Laptops, ImageRef::Laptop),
        Product::new(3, "AirPods Pro 2", Money::from_dollars(249), 4.7, 445, Category::Audio, ImageRef::Headphones),
        Product::new(4, "iPhone 15", Money::from_dollars(899), 4.6, 189, Category::Phones, ImageRef::Phone),
        Product::new(5, "MacBook Pro 16\"", Money::from_dollars(2499), 4.9, 78, Category::Laptops, ImageRef::Laptop),
        Product::new(6, "Sony WH-1000XM5", Money::from_dollars(399), 4.8, 267, Category::Audio, ImageRef::Headphones),
    ]
}

/// Search, category and price range selections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub selected_category: CategoryFilter,
    /// Kept in selection order, no duplicates
    pub selected_price_ranges: Vec<PriceRange>,
}

/// What a filter badge removes when dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum BadgeTarget {
    Category,
    PriceRange(PriceRange),
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterBadge {
    pub label: String,
    pub target: BadgeTarget,
}

impl FilterState {
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.selected_category = category;
    }

    /// Add the range if absent, remove it if present
    pub fn toggle_price_range(&mut self, range: PriceRange) {
        if let Some(pos) = self.selected_price_ranges.iter().position(|r| *r == range) {
            self.selected_price_ranges.remove(pos);
        } else {
            self.selected_price_ranges.push(range);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.selected_category != CategoryFilter::All
            || !self.selected_price_ranges.is_empty()
            || !self.search_query.is_empty()
    }

    /// Badges in display order: category, price ranges, search text
    pub fn active_badges(&self) -> Vec<FilterBadge> {
        let mut badges = Vec::new();

        if self.selected_category != CategoryFilter::All {
            badges.push(FilterBadge {
                label: self.selected_category.label().to_string(),
                target: BadgeTarget::Category,
            });
        }
        for range in &self.selected_price_ranges {
            badges.push(FilterBadge {
                label: range.label().to_string(),
                target: BadgeTarget::PriceRange(*range),
            });
        }
        if !self.search_query.is_empty() {
            badges.push(FilterBadge {
                label: format!("\"{}\"", self.search_query),
                target: BadgeTarget::Search,
            });
        }

        badges
    }

    pub fn dismiss(&mut self, target: BadgeTarget) {
        match target {
            BadgeTarget::Category => self.selected_category = CategoryFilter::All,
            BadgeTarget::PriceRange(range) => {
                self.selected_price_ranges.retain(|r| *r != range);
            }
            BadgeTarget::Search => self.search_query.clear(),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let query = self.search_query.to_lowercase();
        product.title.to_lowercase().contains(&query)
            && self.selected_category.matches(product.category)
    }
}

/// Visible subset of `products`, in catalog order
pub fn filter<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    products.iter().filter(|p| state.matches(p)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
}

/// What the catalog screen renders
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub count: usize,
    pub empty: bool,
    pub layout: Layout,
    pub filters: FilterState,
    pub badges: Vec<FilterBadge>,
}

/// State behind the catalog screen
#[derive(Debug, Clone)]
pub struct CatalogView {
    products: Vec<Product>,
    pub filters: FilterState,
    pub layout: Layout,
}

impl CatalogView {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            filters: FilterState::default(),
            layout: Layout::default(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn visible(&self) -> Vec<&Product> {
        filter(&self.products, &self.filters)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        let products: Vec<Product> = self.visible().into_iter().cloned().collect();
        CatalogSnapshot {
            count: products.len(),
            empty: products.is_empty(),
            products,
            layout: self.layout,
            filters: self.filters.clone(),
            badges: self.filters.active_badges(),
        }
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(seed_products())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.title.clone()).collect()
    }

    fn three_products() -> Vec<Product> {
        seed_products()
            .into_iter()
            .filter(|p| [1, 2, 4].contains(&p.id))
            .collect()
    }

    #[test]
    fn test_empty_catalog_stays_empty() {
        let mut state = FilterState::default();
        assert!(filter(&[], &state).is_empty());

        state.set_search("iphone");
        state.select_category(CategoryFilter::Only(Category::Audio));
        assert!(filter(&[], &state).is_empty());
    }

    #[test]
    fn test_default_state_keeps_everything_in_order() {
        let products = seed_products();
        let visible = filter(&products, &FilterState::default());
        let ids: Vec<_> = visible.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = three_products();
        let mut state = FilterState::default();
        state.set_search("iphone");

        assert_eq!(
            titles(&filter(&products, &state)),
            ["iPhone 15 Pro Max", "iPhone 15"]
        );

        state.set_search("MACBOOK");
        assert_eq!(titles(&filter(&products, &state)), ["MacBook Air M3"]);
    }

    #[test]
    fn test_search_and_category_are_combined() {
        let products = seed_products();
        let mut state = FilterState::default();
        state.select_category(CategoryFilter::Only(Category::Laptops));
        assert_eq!(
            titles(&filter(&products, &state)),
            ["MacBook Air M3", "MacBook Pro 16\""]
        );

        state.set_search("air");
        assert_eq!(titles(&filter(&products, &state)), ["MacBook Air M3"]);

        state.set_search("sony");
        assert!(filter(&products, &state).is_empty());
    }

    #[test]
    fn test_price_ranges_do_not_narrow_results() {
        let products = seed_products();
        let mut state = FilterState::default();
        state.toggle_price_range(PriceRange::Under500);
        state.toggle_price_range(PriceRange::Over2000);

        assert_eq!(filter(&products, &state).len(), products.len());
        assert!(state.has_active_filters());
    }

    #[test]
    fn test_toggle_price_range() {
        let mut state = FilterState::default();
        state.toggle_price_range(PriceRange::From500To1000);
        state.toggle_price_range(PriceRange::Under500);
        assert_eq!(
            state.selected_price_ranges,
            [PriceRange::From500To1000, PriceRange::Under500]
        );

        state.toggle_price_range(PriceRange::From500To1000);
        assert_eq!(state.selected_price_ranges, [PriceRange::Under500]);
    }

    #[test]
    fn test_badges_and_dismiss() {
        let mut state = FilterState::default();
        assert!(state.active_badges().is_empty());
        assert!(!state.has_active_filters());

        state.select_category(CategoryFilter::Only(Category::Audio));
        state.toggle_price_range(PriceRange::Under500);
        state.set_search("pods");

        let labels: Vec<_> = state.active_badges().into_iter().map(|b| b.label).collect();
        assert_eq!(labels, ["Audio", "Under $500", "\"pods\""]);

        state.dismiss(BadgeTarget::PriceRange(PriceRange::Under500));
        state.dismiss(BadgeTarget::Search);
        assert_eq!(state.active_badges().len(), 1);

        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_category_filter_names() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Phones".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Phones))
        );
        assert!("tablets".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::options().len(), 4);
        assert_eq!(CategoryFilter::options()[0].label(), "All Products");

        let json = serde_json::to_string(&CategoryFilter::Only(Category::Audio)).unwrap();
        assert_eq!(json, "\"audio\"");
        assert_eq!("over-2000".parse::<PriceRange>(), Ok(PriceRange::Over2000));
    }

    #[test]
    fn test_snapshot_reports_empty_state() {
        let mut view = CatalogView::default();
        view.filters.set_search("toaster");

        let snapshot = view.snapshot();
        assert!(snapshot.empty);
        assert_eq!(snapshot.count, 0);
        assert_eq!(snapshot.badges.len(), 1);
        assert_eq!(view.products().len(), 6);
    }
}
