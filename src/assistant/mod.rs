//! Simulated shopping assistant
//!
//! There is no model behind the assistant: replies come from fixed pools and
//! arrive after a fixed delay, which is enough to drive the chat screens.

mod chat;

pub use chat::{ChatProfiles, ChatScreen, ChatSession, ChatSnapshot, QuickAction};
