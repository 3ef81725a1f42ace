//! Chat window
//!
//! Talks to Gemini through [`GeminiClient`]. One request is in flight at a
//! time and the input stays disabled until it settles.

pub mod input;
pub mod message;

use crate::chat::{ChatProvider, ChatSession, GeminiClient, MISSING_KEY_MESSAGE};
use crate::ui::components::TitleBar;
use crate::ui::windows::Companion;
use dioxus::prelude::*;
use input::{ChatInput, INPUT_ID};
use message::{MessageBubble, ThinkingBubble};
use std::rc::Rc;

/// Focus the input when "/" is typed anywhere else in the window
const SLASH_FOCUS_JS: &str = r#"
document.addEventListener('keydown', (e) => {
    const input = document.getElementById('chat-input');
    if (e.key === '/' && input && document.activeElement !== input) {
        e.preventDefault();
        input.focus();
    }
});
"#;

const SCROLL_TO_BOTTOM_JS: &str =
    "const m = document.getElementById('messages'); if (m) { m.scrollTop = m.scrollHeight; }";

#[component]
pub fn ChatWindow() -> Element {
    let client = use_hook(|| match GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!("Chat ready with model {}", client.model());
            Some(Rc::new(client))
        }
        Err(e) => {
            tracing::warn!("Chat disabled: {}", e);
            None
        }
    });
    let missing_key = client.is_none();

    let mut session = use_signal(|| {
        let mut session = ChatSession::new();
        if missing_key {
            session.push_error(MISSING_KEY_MESSAGE);
        }
        session
    });
    let mut waiting = use_signal(|| false);

    use_effect(|| {
        document::eval(SLASH_FOCUS_JS);
        document::eval(&format!("document.getElementById('{}')?.focus();", INPUT_ID));
    });

    use_effect(move || {
        let _ = session.read().messages().len();
        let _ = waiting();
        document::eval(SCROLL_TO_BOTTOM_JS);
    });

    let handle_send = move |text: String| {
        let Some(client) = client.clone() else {
            return;
        };
        if waiting() || !session.write().push_user(&text) {
            return;
        }
        waiting.set(true);
        let history = session.read().messages().to_vec();
        spawn(async move {
            let reply = client.generate(&history).await;
            session.write().apply_reply(reply);
            waiting.set(false);
        });
    };

    rsx! {
        div { class: "chat-frame",
            TitleBar { title: Companion::Chat.title().to_string() }
            div { id: "messages", class: "messages",
                for msg in session.read().messages().iter() {
                    MessageBubble { key: "{msg.id}", message: msg.clone() }
                }
                if waiting() {
                    ThinkingBubble {}
                }
            }
            ChatInput {
                on_send: handle_send,
                disabled: missing_key || waiting(),
            }
        }
    }
}
