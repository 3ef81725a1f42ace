//! Help window

use crate::ui::components::TitleBar;
use crate::ui::windows::Companion;
use dioxus::desktop::window;
use dioxus::prelude::*;

pub const PROJECT_URL: &str = "https://github.com/techmoocher/Karu-the-Fox.git";

#[component]
pub fn HelpWindow() -> Element {
    rsx! {
        div { class: "help-frame",
            TitleBar { title: Companion::Help.title().to_string(), minimize: false }
            div { class: "body",
                div { class: "dialog-title", "Karu the Fox" }
                div { "Your friendly desktop pet with chat, music, pomodoro, and more!" }
                div { class: "section-title", "How to use" }
                ul {
                    li { b { "Let him wander" } " around your screen or " b { "drag Karu around" } " your screen." }
                    li { "Open " b { "Chat with Karu" } " to talk and enjoy breaks during hard-working days." }
                    li { "Play your favorite tunes with the " b { "Dance with Karu" } " music player." }
                    li { "Start the " b { "Pomodoro Timer" } " to kickstart focus mode." }
                    li { b { "Hide/Show Karu" } " from the tray for a distraction-free workspace." }
                    li { "Right-click on the " b { "tray icon" } " for " b { "quick actions" } "." }
                }
                div { class: "buttons",
                    a { href: PROJECT_URL, target: "_blank", "Learn more" }
                    button { onclick: move |_| window().set_visible(false), "OK" }
                }
            }
        }
    }
}
