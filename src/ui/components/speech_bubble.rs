//! Speech bubble shown above the pet

use dioxus::prelude::*;

/// Root context of a bubble window
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleText {
    pub text: String,
    pub word_wrap: bool,
}

#[component]
pub fn SpeechBubble() -> Element {
    let BubbleText { text, word_wrap } = use_context::<BubbleText>();
    let wrap_class = if word_wrap { "wrap" } else { "nowrap" };

    rsx! {
        div { class: "bubble {wrap_class}", "{text}" }
    }
}
