//! Profile page: contact details, loyalty progress and coupons
//!
//! Contact fields are free text. Edits go to a draft that is only copied over
//! the saved profile on save.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Profile {
    pub fn seeded() -> Self {
        Self {
            name: "Alex Johnson".to_string(),
            email: "alex.johnson@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
}

/// Avatar fallback: first character of each word
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoyaltyLevel {
    Gold,
    Platinum,
}

impl LoyaltyLevel {
    pub fn next(self) -> LoyaltyLevel {
        match self {
            LoyaltyLevel::Gold | LoyaltyLevel::Platinum => LoyaltyLevel::Platinum,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Loyalty {
    pub level: LoyaltyLevel,
    pub points: u32,
    pub next_level_points: u32,
}

impl Loyalty {
    pub fn seeded() -> Self {
        Self {
            level: LoyaltyLevel::Gold,
            points: 2450,
            next_level_points: 3000,
        }
    }

    /// Progress towards the next level, 0-100
    pub fn progress_percent(&self) -> f64 {
        if self.next_level_points == 0 {
            return 100.0;
        }
        (f64::from(self.points) / f64::from(self.next_level_points) * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    Discount,
    Shipping,
}

#[derive(Debug, Clone, Serialize)]
pub struct Coupon {
    pub id: u32,
    pub title: &'static str,
    pub code: &'static str,
    pub expires_on: NaiveDate,
    pub kind: CouponKind,
}

/// Coupons closer than this to expiry are flagged
const EXPIRY_WARNING_DAYS: i64 = 7;

impl Coupon {
    /// Whole days left, negative once expired
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expires_on - today).num_days()
    }

    pub fn expiring_soon(&self, today: NaiveDate) -> bool {
        self.days_until_expiry(today) <= EXPIRY_WARNING_DAYS
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

pub fn seed_coupons() -> Vec<Coupon> {
    vec![
        Coupon { id: 1, title: "20% OFF Electronics", code: "TECH20", expires_on: date(2024, 2, 15), kind: CouponKind::Discount },
        Coupon { id: 2, title: "Free Shipping", code: "FREESHIP", expires_on: date(2024, 2, 28), kind: CouponKind::Shipping },
        Coupon { id: 3, title: "$50 OFF $200+", code: "SAVE50", expires_on: date(2024, 3, 10), kind: CouponKind::Discount },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct CouponView {
    #[serde(flatten)]
    pub coupon: Coupon,
    pub days_left: i64,
    pub expiring_soon: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoyaltyView {
    #[serde(flatten)]
    pub loyalty: Loyalty,
    pub next_level: LoyaltyLevel,
    pub progress_percent: f64,
}

/// What the profile screen renders
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshot {
    pub profile: Profile,
    pub editing: bool,
    pub initials: String,
    pub loyalty: LoyaltyView,
    pub coupons: Vec<CouponView>,
}

/// State behind the profile screen
#[derive(Debug, Clone)]
pub struct ProfileView {
    saved: Profile,
    draft: Profile,
    editing: bool,
    loyalty: Loyalty,
    coupons: Vec<Coupon>,
}

impl ProfileView {
    pub fn new(profile: Profile, loyalty: Loyalty, coupons: Vec<Coupon>) -> Self {
        Self {
            draft: profile.clone(),
            saved: profile,
            editing: false,
            loyalty,
            coupons,
        }
    }

    pub fn saved(&self) -> &Profile {
        &self.saved
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        if !self.editing {
            self.draft = self.saved.clone();
            self.editing = true;
        }
    }

    /// Change a draft field. Ignored unless editing.
    pub fn update_draft(&mut self, field: ProfileField, value: impl Into<String>) -> bool {
        if !self.editing {
            return false;
        }
        let slot = match field {
            ProfileField::Name => &mut self.draft.name,
            ProfileField::Email => &mut self.draft.email,
            ProfileField::Phone => &mut self.draft.phone,
        };
        *slot = value.into();
        true
    }

    pub fn save(&mut self) {
        if self.editing {
            self.saved = self.draft.clone();
            self.editing = false;
            tracing::info!("Profile updated");
        }
    }

    pub fn cancel(&mut self) {
        self.draft = self.saved.clone();
        self.editing = false;
    }

    pub fn snapshot(&self, today: NaiveDate) -> ProfileSnapshot {
        let profile = if self.editing { &self.draft } else { &self.saved };
        ProfileSnapshot {
            profile: profile.clone(),
            editing: self.editing,
            initials: initials(&self.saved.name),
            loyalty: LoyaltyView {
                next_level: self.loyalty.level.next(),
                progress_percent: self.loyalty.progress_percent(),
                loyalty: self.loyalty.clone(),
            },
            coupons: self
                .coupons
                .iter()
                .map(|coupon| CouponView {
                    days_left: coupon.days_until_expiry(today),
                    expiring_soon: coupon.expiring_soon(today),
                    coupon: coupon.clone(),
                })
                .collect(),
        }
    }
}

impl Default for ProfileView {
    fn default() -> Self {
        Self::new(Profile::seeded(), Loyalty::seeded(), seed_coupons())
    }
}
