//! Simulated chat sessions
//!
//! A `ChatSession` is the state behind one assistant screen:
//! 1. The shopper's message is appended immediately
//! 2. One canned reply is picked with the session's RNG
//! 3. A tokio task appends the reply after the screen's fixed delay
//!
//! Scheduled replies belong to the session. Closing or dropping it aborts them,
//! so a torn-down screen never receives a late reply.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::config::{AssistantConfig, ReplyPool, ReplyPoolError};
use crate::conversation::{ChatMessage, Transcript};

/// Which assistant surface a session backs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatScreen {
    /// Full-screen assistant page
    Page,
    /// Floating widget shown on every other page
    Widget,
}

impl FromStr for ChatScreen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "page" | "ai" => Ok(ChatScreen::Page),
            "widget" => Ok(ChatScreen::Widget),
            _ => Err(s.to_string()),
        }
    }
}

/// Quick action cards on the assistant page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    FindProducts,
    PriceCompare,
    Recommendations,
    SmartBundle,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::FindProducts,
        QuickAction::PriceCompare,
        QuickAction::Recommendations,
        QuickAction::SmartBundle,
    ];

    pub fn title(self) -> &'static str {
        match self {
            QuickAction::FindProducts => "Find Products",
            QuickAction::PriceCompare => "Price Compare",
            QuickAction::Recommendations => "Recommendations",
            QuickAction::SmartBundle => "Smart Bundle",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            QuickAction::FindProducts => "Search for specific items",
            QuickAction::PriceCompare => "Compare prices across brands",
            QuickAction::Recommendations => "Get personalized suggestions",
            QuickAction::SmartBundle => "Create product bundles",
        }
    }

    /// Message sent on the shopper's behalf
    pub fn prompt(self) -> String {
        format!("I need help with {}", self.title().to_lowercase())
    }
}

/// Greeting, reply pool and delay for one screen
#[derive(Debug, Clone)]
pub struct ChatProfile {
    pub pool: ReplyPool,
    pub reply_delay: Duration,
}

impl ChatProfile {
    pub fn new(pool: ReplyPool, reply_delay: Duration) -> Self {
        Self { pool, reply_delay }
    }

    pub fn builtin(screen: ChatScreen) -> Self {
        match screen {
            ChatScreen::Page => Self::new(ReplyPool::page(), Duration::from_millis(1500)),
            ChatScreen::Widget => Self::new(ReplyPool::widget(), Duration::from_millis(1000)),
        }
    }
}

/// Profiles for both assistant screens
#[derive(Debug, Clone)]
pub struct ChatProfiles {
    pub page: ChatProfile,
    pub widget: ChatProfile,
}

impl ChatProfiles {
    /// Build profiles from config, reading any reply pool files it names
    pub async fn load(config: &AssistantConfig) -> Result<Self, ReplyPoolError> {
        let page_pool = match &config.page.replies_file {
            Some(path) => ReplyPool::load_from_file(path).await?,
            None => ReplyPool::page(),
        };
        let widget_pool = match &config.widget.replies_file {
            Some(path) => ReplyPool::load_from_file(path).await?,
            None => ReplyPool::widget(),
        };

        Ok(Self {
            page: ChatProfile::new(page_pool, config.page.reply_delay()),
            widget: ChatProfile::new(widget_pool, config.widget.reply_delay()),
        })
    }

    pub fn get(&self, screen: ChatScreen) -> &ChatProfile {
        match screen {
            ChatScreen::Page => &self.page,
            ChatScreen::Widget => &self.widget,
        }
    }
}

impl Default for ChatProfiles {
    fn default() -> Self {
        Self {
            page: ChatProfile::builtin(ChatScreen::Page),
            widget: ChatProfile::builtin(ChatScreen::Widget),
        }
    }
}

/// What a screen renders
#[derive(Debug, Clone, Serialize)]
pub struct ChatSnapshot {
    pub messages: Transcript,
    pub is_typing: bool,
}

#[derive(Debug)]
struct Shared {
    transcript: Transcript,
    awaiting_replies: usize,
    /// Bumped by `close`; a reply only lands if its generation still matches
    generation: u64,
}

/// State behind one open assistant screen
pub struct ChatSession {
    profile: ChatProfile,
    shared: Arc<Mutex<Shared>>,
    rng: StdRng,
    pending: JoinSet<()>,
}

impl ChatSession {
    /// Open a session showing only the greeting
    pub fn open(profile: ChatProfile, rng: StdRng) -> Self {
        let transcript = Transcript::with_greeting(profile.pool.greeting());
        Self {
            profile,
            shared: Arc::new(Mutex::new(Shared {
                transcript,
                awaiting_replies: 0,
                generation: 0,
            })),
            rng,
            pending: JoinSet::new(),
        }
    }

    /// Send a shopper message. Whitespace-only text is ignored.
    ///
    /// Returns whether the message was accepted. Must be called inside a tokio
    /// runtime since the reply is scheduled on a task.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring empty chat message");
            return false;
        }

        // Forget replies that already landed
        while self.pending.try_join_next().is_some() {}

        let reply = self.profile.pool.pick(&mut self.rng).clone();
        let generation = {
            let mut shared = lock(&self.shared);
            shared.transcript.push(ChatMessage::from_user(text));
            shared.awaiting_replies += 1;
            shared.generation
        };

        let shared = Arc::clone(&self.shared);
        let delay = self.profile.reply_delay;
        self.pending.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut shared = lock(&shared);
            // Woke up but lost the race with `close`
            if shared.generation != generation {
                return;
            }
            shared.transcript.push(ChatMessage::from_assistant(&reply));
            shared.awaiting_replies = shared.awaiting_replies.saturating_sub(1);
        });

        tracing::debug!(delay_ms = delay.as_millis() as u64, "Scheduled canned reply");
        true
    }

    pub fn quick_action(&mut self, action: QuickAction) -> bool {
        self.submit(&action.prompt())
    }

    /// Text of a suggestion chip, used to prefill the input box
    pub fn suggestion(&self, message_id: Uuid, index: usize) -> Option<String> {
        let shared = lock(&self.shared);
        shared
            .transcript
            .get(message_id)?
            .suggestions
            .as_ref()?
            .get(index)
            .cloned()
    }

    /// True while a reply is still scheduled
    pub fn is_typing(&self) -> bool {
        lock(&self.shared).awaiting_replies > 0
    }

    pub fn transcript(&self) -> Transcript {
        lock(&self.shared).transcript.clone()
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        let shared = lock(&self.shared);
        ChatSnapshot {
            messages: shared.transcript.clone(),
            is_typing: shared.awaiting_replies > 0,
        }
    }

    /// Cancel every scheduled reply. Returns how many were still pending.
    pub fn close(&mut self) -> usize {
        while self.pending.try_join_next().is_some() {}

        let cancelled = self.pending.len();
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.awaiting_replies = 0;
            self.pending.abort_all();
        }

        if cancelled > 0 {
            tracing::debug!(cancelled, "Cancelled pending replies");
        }
        cancelled
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

// A panicking reply task must not take the screen down with it
fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn page_session(seed: u64) -> ChatSession {
        ChatSession::open(ChatProfile::builtin(ChatScreen::Page), StdRng::seed_from_u64(seed))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let mut session = page_session(1);
        assert!(session.submit("Find me a laptop under $1000"));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert!(snapshot.is_typing);
        assert_eq!(snapshot.messages.last().unwrap().text, "Find me a laptop under $1000");

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert_eq!(session.transcript().len(), 2);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.messages.len(), 3);
        assert!(!snapshot.is_typing);

        let reply = snapshot.messages.last().unwrap();
        assert!(reply.is_from_assistant);
        assert!(ReplyPool::page().replies().iter().any(|r| r.text == reply.text));
        assert_eq!(reply.suggestions.as_ref().map(Vec::len), Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_is_ignored() {
        let mut session = page_session(1);

        assert!(!session.submit(""));
        assert!(!session.submit("   \t\n"));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_unique_across_many_sends() {
        let mut session = ChatSession::open(
            ChatProfile::builtin(ChatScreen::Widget),
            StdRng::seed_from_u64(9),
        );
        for i in 0..20 {
            assert!(session.submit(&format!("message {}", i)));
        }

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 41);

        let ids: HashSet<_> = transcript.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 41);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_replies() {
        async fn replies(seed: u64) -> Vec<String> {
            let mut session = page_session(seed);
            for _ in 0..6 {
                session.submit("hi");
            }
            tokio::time::sleep(Duration::from_secs(2)).await;
            session
                .transcript()
                .messages()
                .iter()
                .skip(1)
                .filter(|m| m.is_from_assistant)
                .map(|m| m.text.clone())
                .collect()
        }

        let first = replies(3).await;
        assert_eq!(first.len(), 6);
        assert_eq!(first, replies(3).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_reply() {
        let mut session = page_session(1);
        session.submit("hello");

        assert_eq!(session.close(), 1);
        assert!(!session.is_typing());

        tokio::time::sleep(Duration::from_secs(3)).await;
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert!(!transcript.last().unwrap().is_from_assistant);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_scheduled_before_close_never_lands() {
        let mut session = page_session(1);
        session.submit("first");
        session.close();
        session.submit("second");

        tokio::time::sleep(Duration::from_secs(3)).await;
        let texts: Vec<_> = session
            .transcript()
            .messages()
            .iter()
            .map(|m| (m.is_from_assistant, m.text.clone()))
            .collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[1], (false, "first".to_string()));
        assert_eq!(texts[2], (false, "second".to_string()));
        assert!(texts[3].0);
        assert!(!session.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_is_discarded() {
        let mut session = page_session(1);
        session.submit("hello");

        // Same state `close` leaves behind for a task already past its sleep
        lock(&session.shared).generation += 1;
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.close(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_session_never_writes() {
        let mut session = page_session(1);
        session.submit("hello");
        let shared = Arc::clone(&session.shared);
        drop(session);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(lock(&shared).transcript.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_action_sends_prompt() {
        let mut session = page_session(1);
        assert!(session.quick_action(QuickAction::PriceCompare));
        assert_eq!(
            session.transcript().last().unwrap().text,
            "I need help with price compare"
        );
    }

    #[test]
    fn test_suggestion_lookup() {
        let session = page_session(1);
        let greeting = session.transcript().messages()[0].id;

        assert_eq!(
            session.suggestion(greeting, 0).as_deref(),
            Some("Find me a laptop under $1000")
        );
        assert!(session.suggestion(greeting, 10).is_none());
        assert!(session.suggestion(Uuid::new_v4(), 0).is_none());
    }

    #[test]
    fn test_screen_names() {
        assert_eq!("page".parse::<ChatScreen>(), Ok(ChatScreen::Page));
        assert_eq!("Widget".parse::<ChatScreen>(), Ok(ChatScreen::Widget));
        assert!("sidebar".parse::<ChatScreen>().is_err());
    }
}
