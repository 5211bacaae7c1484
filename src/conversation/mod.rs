//! Chat transcript types

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::CannedReply;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub is_from_assistant: bool,
    pub sent_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ChatMessage {
    /// A message typed by the shopper, kept exactly as entered
    pub fn from_user(text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            is_from_assistant: false,
            sent_at: Utc::now(),
            suggestions: None,
        }
    }

    pub fn from_assistant(reply: &CannedReply) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: reply.text.clone(),
            is_from_assistant: true,
            sent_at: Utc::now(),
            suggestions: if reply.suggestions.is_empty() {
                None
            } else {
                Some(reply.suggestions.clone())
            },
        }
    }
}

/// Append-only, creation-ordered list of messages for one chat session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting(greeting: &CannedReply) -> Self {
        let mut transcript = Self::new();
        transcript.push(ChatMessage::from_assistant(greeting));
        transcript
    }

    pub fn push(&mut self, message: ChatMessage) {
        debug_assert!(
            self.messages.iter().all(|m| m.id != message.id),
            "duplicate message id {}",
            message.id
        );
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_is_first_assistant_message() {
        let greeting = CannedReply::new("Hi!", ["Show deals"]);
        let transcript = Transcript::with_greeting(&greeting);

        assert_eq!(transcript.len(), 1);
        let first = &transcript.messages()[0];
        assert!(first.is_from_assistant);
        assert_eq!(first.text, "Hi!");
        assert_eq!(first.suggestions, Some(vec!["Show deals".to_string()]));
    }

    #[test]
    fn test_user_text_is_not_trimmed() {
        let message = ChatMessage::from_user("  hello  ");
        assert_eq!(message.text, "  hello  ");
        assert!(!message.is_from_assistant);
        assert!(message.suggestions.is_none());
    }

    #[test]
    fn test_reply_without_suggestions_serializes_without_field() {
        let message = ChatMessage::from_assistant(&CannedReply::new("Thanks!", Vec::<String>::new()));
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("suggestions").is_none());
        assert_eq!(json["is_from_assistant"], true);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::from_user("one"));
        transcript.push(ChatMessage::from_user("two"));

        let texts: Vec<_> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
        let id = transcript.last().unwrap().id;
        assert_eq!(transcript.get(id).unwrap().text, "two");
    }
}
