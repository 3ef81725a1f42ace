//! Message types
//!
//! Chat messages shown in the chat window and sent to the model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who a chat line comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Typed by the user
    User,
    /// Reply from Karu
    Model,
    /// Local error notice, never sent to the API
    Error,
}

impl Role {
    /// Role name in the generateContent payload
    pub fn api_role(self) -> Option<&'static str> {
        match self {
            Role::User => Some("user"),
            Role::Model => Some("model"),
            Role::Error => None,
        }
    }

    /// Label shown above the bubble
    pub fn sender_name(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Model => "Karu",
            Role::Error => "Error",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Stable key for rendering
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    /// Unix seconds
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Role::Error, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello, Karu!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello, Karu!");
        assert!(msg.timestamp > 0);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Message::model("a").id, Message::model("a").id);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::User.api_role(), Some("user"));
        assert_eq!(Role::Model.api_role(), Some("model"));
        assert_eq!(Role::Error.api_role(), None);
        assert_eq!(Role::Model.sender_name(), "Karu");
        assert_eq!(Role::Error.sender_name(), "Error");
    }
}
