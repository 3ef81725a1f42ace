//! Draggable title bar for frameless windows

use dioxus::desktop::window;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;

/// Title bar with minimize and close buttons.
///
/// Dragging the bar moves the window. Close hides the window unless
/// `on_close` takes over.
#[component]
pub fn TitleBar(
    title: String,
    #[props(default = true)] minimize: bool,
    on_close: Option<EventHandler<()>>,
) -> Element {
    let start_drag = move |evt: MouseEvent| {
        if evt.trigger_button() == Some(MouseButton::Primary) {
            window().drag();
        }
    };

    rsx! {
        div { class: "title-bar", onmousedown: start_drag,
            span { class: "title-text", "{title}" }
            if minimize {
                button {
                    class: "window-button",
                    title: "Minimize",
                    onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                    onclick: move |_| window().set_minimized(true),
                    "—"
                }
            }
            button {
                class: "window-button",
                title: "Close",
                onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                onclick: move |_| match on_close {
                    Some(handler) => handler.call(()),
                    None => window().set_visible(false),
                },
                "✕"
            }
        }
    }
}
