//! Chat input line with a send button

use dioxus::prelude::*;

pub const INPUT_ID: &str = "chat-input";

#[component]
pub fn ChatInput(on_send: EventHandler<String>, disabled: bool) -> Element {
    let mut text = use_signal(String::new);

    let mut submit = move || {
        if disabled || text().trim().is_empty() {
            return;
        }
        on_send.call(text());
        text.set(String::new());
    };

    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter {
            evt.prevent_default();
            submit();
        }
    };

    let can_send = !disabled && !text().trim().is_empty();

    rsx! {
        div { class: "chat-input",
            input {
                id: INPUT_ID,
                r#type: "text",
                placeholder: "Say something... (Press Enter)",
                value: "{text}",
                disabled,
                oninput: move |evt| text.set(evt.value()),
                onkeydown: handle_keydown,
            }
            button {
                disabled: !can_send,
                onclick: move |_| submit(),
                "Send"
            }
        }
    }
}
