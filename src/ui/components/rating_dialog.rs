//! "How are you feeling?" dialog asked during the greeting

use crate::app::{AppState, PetCommand};
use crate::pet::onboarding::{DEFAULT_RATING, EMOTICONS};
use crate::ui::components::TitleBar;
use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

/// Root context of a rating window
#[derive(Debug, Clone, PartialEq)]
pub struct RatingQuestion(pub String);

#[component]
pub fn RatingDialog() -> Element {
    let state = use_context::<AppState>();
    let RatingQuestion(question) = use_context::<RatingQuestion>();
    let mut selected = use_signal(|| DEFAULT_RATING);
    let answered = use_hook(|| Rc::new(Cell::new(false)));

    // Closing the window any other way counts as a dismissal
    {
        let state = state.clone();
        let answered = answered.clone();
        use_drop(move || {
            if !answered.get() {
                state.send(PetCommand::Rated(None));
            }
        });
    }

    let answer = move |rating: Option<u8>| {
        if answered.replace(true) {
            return;
        }
        state.send(PetCommand::Rated(rating));
    };
    let confirm = answer.clone();
    let dismiss = answer;

    rsx! {
        div { class: "rating",
            TitleBar {
                title: "How are you feeling?",
                minimize: false,
                on_close: move |_| dismiss(None),
            }
            div { class: "question", "{question}" }
            div { class: "choices",
                for (i, emoticon) in EMOTICONS.iter().enumerate() {
                    label { key: "{i}",
                        input {
                            r#type: "radio",
                            name: "rating",
                            checked: usize::from(selected()) == i + 1,
                            onchange: move |_| selected.set((i + 1) as u8),
                        }
                        "{emoticon}"
                    }
                }
            }
            button { class: "confirm", onclick: move |_| confirm(Some(selected())), "Confirm" }
        }
    }
}
