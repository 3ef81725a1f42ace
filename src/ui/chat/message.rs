//! One line of the conversation

use crate::types::message::{Message, Role};
use dioxus::prelude::*;

fn bubble_class(role: Role) -> &'static str {
    match role {
        Role::User => "message user",
        Role::Model => "message model",
        Role::Error => "message error",
    }
}

#[component]
pub fn MessageBubble(message: Message) -> Element {
    let class = bubble_class(message.role);
    let sender = message.role.sender_name();

    rsx! {
        div { class: "{class}",
            div { class: "sender", "{sender}" }
            div { "{message.content}" }
        }
    }
}

/// Shown while a reply is on its way
#[component]
pub fn ThinkingBubble() -> Element {
    rsx! {
        div { class: "message thinking", "Karu is thinking..." }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_class_per_role() {
        assert_eq!(bubble_class(Role::User), "message user");
        assert_eq!(bubble_class(Role::Model), "message model");
        assert_eq!(bubble_class(Role::Error), "message error");
    }
}
