//! Pomodoro window
//!
//! The countdown lives in [`AppState`] so hiding the window does not stop it.

use crate::app::AppState;
use crate::pomodoro::themes::{resolve_theme_name, theme_names};
use crate::pomodoro::timer::{MAX_MINUTES, MIN_MINUTES};
use crate::pomodoro::{build_stylesheet, resolve_theme, TickOutcome, TomatoSprite};
use crate::storage::assets::PomodoroSprites;
use dioxus::desktop::window;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const POLL_MS: u64 = 100;
const SECOND: Duration = Duration::from_secs(1);

pub const ALERT_TEXT: &str = "Pomodoro complete. Take a short break or start another round.";

fn tomato_uri(sprites: &PomodoroSprites, tomato: TomatoSprite) -> Option<String> {
    let sprite = match tomato {
        TomatoSprite::Neutral => sprites.neutral.as_ref(),
        TomatoSprite::Ticking(i) => sprites
            .ticking
            .get(i % sprites.ticking.len().max(1))
            .or(sprites.neutral.as_ref()),
        TomatoSprite::Vibrate => sprites.vibrate.as_ref().or(sprites.neutral.as_ref()),
    };
    sprite.map(|s| s.uri.clone())
}

#[component]
pub fn PomodoroWindow() -> Element {
    let state = use_context::<AppState>();
    let mut version = use_signal(|| 0u64);
    let mut show_alert = use_signal(|| false);
    // When the next one second tick is due, while running
    let next_tick: Rc<Cell<Option<Instant>>> = use_hook(|| Rc::new(Cell::new(None)));

    {
        let state = state.clone();
        let next_tick = next_tick.clone();
        use_future(move || {
            let state = state.clone();
            let next_tick = next_tick.clone();
            async move {
                loop {
                    tokio::time::sleep(Duration::from_millis(POLL_MS)).await;
                    let Some(due) = next_tick.get() else {
                        continue;
                    };
                    if Instant::now() < due {
                        continue;
                    }

                    let outcome = state.pomodoro.borrow_mut().tick();
                    match outcome {
                        TickOutcome::Completed => {
                            next_tick.set(None);
                            state.alert.borrow_mut().start();
                            show_alert.set(true);
                            let desktop = window();
                            desktop.set_visible(true);
                            desktop.set_minimized(false);
                            desktop.set_focus();
                        }
                        TickOutcome::Ticked => next_tick.set(Some(due + SECOND)),
                        TickOutcome::Idle => next_tick.set(None),
                    }
                    version += 1;
                }
            }
        });
    }

    let toggle = {
        let state = state.clone();
        let next_tick = next_tick.clone();
        move |_: MouseEvent| {
            let running = {
                let mut timer = state.pomodoro.borrow_mut();
                timer.toggle();
                timer.is_running()
            };
            state.alert.borrow_mut().stop();
            show_alert.set(false);
            next_tick.set(running.then(|| Instant::now() + SECOND));
            version += 1;
        }
    };

    let reset = {
        let state = state.clone();
        let next_tick = next_tick.clone();
        move |_: MouseEvent| {
            state.pomodoro.borrow_mut().reset();
            state.alert.borrow_mut().stop();
            show_alert.set(false);
            next_tick.set(None);
            version += 1;
        }
    };

    let change_duration = {
        let state = state.clone();
        move |evt: FormEvent| {
            let Ok(minutes) = evt.value().parse::<i64>() else {
                return;
            };
            state.pomodoro.borrow_mut().set_duration(minutes);
            state.settings.borrow_mut().pomodoro_duration =
                i64::from(state.pomodoro.borrow().duration_minutes());
            version += 1;
        }
    };

    let change_theme = {
        let state = state.clone();
        move |evt: FormEvent| {
            let theme = resolve_theme_name(&evt.value()).to_string();
            tracing::debug!("Pomodoro theme: {}", theme);
            state.settings.borrow_mut().pomodoro_theme = theme;
            version += 1;
        }
    };

    let dismiss_alert = {
        let state = state.clone();
        move |_: MouseEvent| {
            state.alert.borrow_mut().stop();
            show_alert.set(false);
        }
    };

    let start_drag = move |evt: MouseEvent| {
        if evt.trigger_button() == Some(MouseButton::Primary) {
            window().drag();
        }
    };

    // Subscribe to timer changes
    let _ = version();
    let theme = state.settings.borrow().pomodoro_theme.clone();
    let css = build_stylesheet(&resolve_theme(&theme));
    let timer = state.pomodoro.borrow().clone();
    let time_text = timer.display_text();
    let start_label = timer.start_label();
    let minutes = timer.duration_minutes();
    let slider_enabled = timer.slider_enabled();
    let can_reset = timer.can_reset();
    let sprites = state.pomodoro_sprites.clone();
    let tomato = tomato_uri(&sprites, timer.tomato());
    let fox_icon = sprites.fox_icons.uri(timer.fox_icon().key());

    rsx! {
        style { "{css}" }
        div { class: "pomodoro-frame",
            div { class: "title-row", onmousedown: start_drag,
                span { class: "title", "POMODORO" }
                div { class: "fox-icon",
                    if let Some(uri) = fox_icon {
                        img { src: "{uri}" }
                    }
                }
                div { class: "spacer" }
                select {
                    onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                    onchange: change_theme,
                    for name in theme_names() {
                        option { key: "{name}", value: "{name}", selected: name == theme, "{name}" }
                    }
                }
                button {
                    class: "title-button",
                    title: "Minimize pomodoro",
                    onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                    onclick: move |_| window().set_minimized(true),
                    "-"
                }
                button {
                    class: "title-button",
                    title: "Close pomodoro",
                    onmousedown: move |evt: MouseEvent| evt.stop_propagation(),
                    onclick: move |_| window().set_visible(false),
                    "x"
                }
            }
            div { class: "time-label", "{time_text}" }
            div { class: "tomato",
                if let Some(uri) = tomato {
                    img { src: "{uri}" }
                }
            }
            div { class: "slider-row",
                span { class: "caption", "Duration: {minutes} min" }
                input {
                    r#type: "range",
                    min: "{MIN_MINUTES}",
                    max: "{MAX_MINUTES}",
                    step: "1",
                    value: "{minutes}",
                    disabled: !slider_enabled,
                    oninput: change_duration,
                }
            }
            div { class: "button-row",
                button { onclick: toggle, "{start_label}" }
                button { class: "reset", disabled: !can_reset, onclick: reset, "Reset" }
            }
            if show_alert() {
                div { class: "alert-overlay",
                    div { class: "alert-dialog time-label",
                        span { class: "caption", "{ALERT_TEXT}" }
                        button { onclick: dismiss_alert, "OK" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::assets::Sprite;

    fn sprite(name: &str) -> Sprite {
        Sprite {
            uri: format!("data:image/png;base64,{}", name),
            width: 8,
            height: 8,
        }
    }

    #[test]
    fn test_tomato_frames() {
        let sprites = PomodoroSprites {
            neutral: Some(sprite("neutral")),
            ticking: vec![sprite("t1"), sprite("t2")],
            vibrate: None,
            fox_icons: Default::default(),
        };
        assert!(tomato_uri(&sprites, TomatoSprite::Ticking(1)).unwrap().ends_with("t2"));
        assert!(tomato_uri(&sprites, TomatoSprite::Ticking(2)).unwrap().ends_with("t1"));
        // Missing vibrate frame falls back to the neutral tomato
        assert!(tomato_uri(&sprites, TomatoSprite::Vibrate).unwrap().ends_with("neutral"));
    }

    #[test]
    fn test_tomato_without_assets() {
        let sprites = PomodoroSprites::default();
        assert!(tomato_uri(&sprites, TomatoSprite::Ticking(0)).is_none());
        assert!(tomato_uri(&sprites, TomatoSprite::Neutral).is_none());
    }
}
