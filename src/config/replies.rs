//! Canned assistant replies
//!
//! The assistant has no inference backend. Each chat screen owns a greeting and
//! a fixed pool of replies; one reply is picked uniformly for every shopper
//! message. Pools can be replaced from TOML files.
//!
//! # Example Reply File
//!
//! ```toml
//! [greeting]
//! text = "Hello! What are you shopping for?"
//! suggestions = ["Find me a laptop under $1000"]
//!
//! [[replies]]
//! text = "I found several great options for you!"
//! suggestions = ["Show me more details", "Add to cart"]
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// A pre-written assistant message and its follow-up prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannedReply {
    pub text: String,

    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl CannedReply {
    pub fn new<I, S>(text: impl Into<String>, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            suggestions: suggestions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawReplyPool {
    greeting: CannedReply,
    #[serde(default)]
    replies: Vec<CannedReply>,
}

/// Greeting plus a non-empty pool of replies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawReplyPool")]
pub struct ReplyPool {
    greeting: CannedReply,
    replies: Vec<CannedReply>,
}

impl TryFrom<RawReplyPool> for ReplyPool {
    type Error = ReplyPoolError;

    fn try_from(raw: RawReplyPool) -> Result<Self, Self::Error> {
        Self::new(raw.greeting, raw.replies)
    }
}

impl ReplyPool {
    pub fn new(greeting: CannedReply, replies: Vec<CannedReply>) -> Result<Self, ReplyPoolError> {
        if replies.is_empty() {
            return Err(ReplyPoolError::Empty);
        }
        Ok(Self { greeting, replies })
    }

    /// Parse a pool from TOML content
    pub fn from_str(content: &str) -> Result<Self, ReplyPoolError> {
        toml::from_str(content).map_err(|e| ReplyPoolError::ParseError(e.to_string()))
    }

    pub async fn load_from_file(path: &Path) -> Result<Self, ReplyPoolError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ReplyPoolError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::from_str(&content)
    }

    /// Pool used by the floating assistant widget
    pub fn widget() -> Self {
        Self {
            greeting: CannedReply::new(builtin::WIDGET_GREETING, Vec::<String>::new()),
            replies: vec![CannedReply::new(builtin::WIDGET_REPLY, Vec::<String>::new())],
        }
    }

    /// Pool used by the full assistant page
    pub fn page() -> Self {
        Self {
            greeting: CannedReply::new(
                builtin::PAGE_GREETING,
                builtin::PAGE_GREETING_SUGGESTIONS.iter().copied(),
            ),
            replies: builtin::PAGE_REPLIES
                .iter()
                .map(|(text, suggestions)| CannedReply::new(*text, suggestions.iter().copied()))
                .collect(),
        }
    }

    pub fn greeting(&self) -> &CannedReply {
        &self.greeting
    }

    pub fn replies(&self) -> &[CannedReply] {
        &self.replies
    }

    /// Pick one reply uniformly at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &CannedReply {
        &self.replies[rng.gen_range(0..self.replies.len())]
    }
}

/// Errors from reply pool loading
#[derive(Debug, thiserror::Error)]
pub enum ReplyPoolError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Reply pool has no replies")]
    Empty,
}

/// Built-in replies that don't require files
pub mod builtin {
    pub const WIDGET_GREETING: &str =
        "Hi! I'm your AI shopping assistant. How can I help you find the perfect products today?";

    pub const WIDGET_REPLY: &str = "Thanks for your message! I'm analyzing your request and will help you find the best products for your needs.";

    pub const PAGE_GREETING: &str = "Hello! I'm your AI shopping assistant. I can help you find products, compare prices, get recommendations, and create smart bundles. What can I help you with today?";

    pub const PAGE_GREETING_SUGGESTIONS: &[&str] = &[
        "Find me a laptop under $1000",
        "Recommend headphones for gaming",
        "Compare iPhone vs Samsung",
        "Create a work from home bundle",
    ];

    pub const PAGE_REPLIES: &[(&str, &[&str])] = &[
        (
            "I found several great options for you! Based on your request, here are my top recommendations:",
            &["Show me more details", "Compare these options", "Add to cart", "Find similar products"],
        ),
        (
            "Great choice! I can help you compare these products across different features like price, reviews, and specifications.",
            &["Show price history", "Check availability", "Find better deals", "Read reviews"],
        ),
        (
            "Perfect! I've analyzed your preferences and found products that match your needs and budget.",
            &["Personalize further", "Save to wishlist", "Share with friends", "Set price alerts"],
        ),
    ];
}
