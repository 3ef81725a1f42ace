//! Music player window ("Dance with Karu")

use crate::app::AppState;
use crate::music::format::{format_artist_display, format_song_label, format_time, format_title_display};
use crate::music::{MusicPlayer, PlayerKey};
use crate::storage::assets::load_sprite;
use crate::ui::components::TitleBar;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// How often the window re-reads the shared player
const REFRESH_MS: u64 = 250;

/// Thumbnail of the song it was loaded for
type ArtCache = Rc<RefCell<(Option<usize>, Option<String>)>>;

fn thumbnail_uri(player: &MusicPlayer, cache: &ArtCache) -> Option<String> {
    let current = player.current_index();
    let mut cache = cache.borrow_mut();
    if cache.0 != current {
        let uri = player
            .current_song()
            .and_then(|song| song.thumbnail.as_deref())
            .and_then(load_sprite)
            .map(|sprite| sprite.uri);
        *cache = (current, uri);
    }
    cache.1.clone()
}

/// Header text, shortened only for real songs
fn header(player: &MusicPlayer) -> (String, String) {
    let (title, artist) = player.labels();
    if player.current_song().is_some() {
        (format_title_display(&title), format_artist_display(&artist))
    } else {
        (title, artist)
    }
}

#[component]
fn HelpOverlay(on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "overlay",
            div { class: "help-dialog",
                h2 { "Keybind" }
                ul {
                    li { b { "Up / K" } ": Move selection up" }
                    li { b { "Down / J" } ": Move selection down" }
                    li { b { "Enter" } ": Play selected (switches to Normal)" }
                    li { b { "P" } ": Play/Pause" }
                    li { b { "M" } ": Change Mode" }
                }
                h2 { "Modes" }
                ul {
                    li { b { "Normal" } ": Alphabetical order, stops at the end of the list" }
                    li { b { "Loop All" } ": Repeats the playlist upon end" }
                    li { b { "Shuffle" } ": Plays all tracks in random order" }
                }
                button { class: "control", onclick: move |_| on_close.call(()), "OK" }
            }
        }
    }
}

#[component]
pub fn MusicWindow() -> Element {
    let state = use_context::<AppState>();
    let mut tick = use_signal(|| 0u64);
    let mut show_help = use_signal(|| false);
    let art: ArtCache = use_hook(|| Rc::new(RefCell::new((None, None))));

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_millis(REFRESH_MS)).await;
            tick += 1;
        }
    });

    // Run `action` on the player and redraw straight away
    let act = {
        let player = state.player.clone();
        move |action: &dyn Fn(&mut MusicPlayer)| {
            action(&mut player.borrow_mut());
            tick += 1;
        }
    };

    let handle_keydown = {
        let mut act = act.clone();
        move |evt: KeyboardEvent| {
            if show_help() {
                if evt.key() == Key::Escape || evt.key() == Key::Enter {
                    show_help.set(false);
                }
                return;
            }
            if let Some(key) = PlayerKey::from_key_name(&evt.key().to_string()) {
                evt.prevent_default();
                act(&|player| player.handle_key(key));
            }
        }
    };

    // Subscribe to the refresh tick
    let _ = tick();
    let player = state.player.borrow();
    let (title, artist) = header(&player);
    let thumbnail = thumbnail_uri(&player, &art);
    let position_ms = player.position().as_millis() as u64;
    let duration_ms = player.duration().map_or(0, |d| d.as_millis() as u64);
    let position_label = format_time(position_ms);
    let duration_label = format_time(duration_ms);
    let playing = player.is_playing();
    let mode = player.mode();
    let muted = player.is_silent();
    let volume = player.volume();
    let current = player.current_index();
    let selection = player.selection();
    let songs: Vec<(usize, String)> = player
        .playlist()
        .iter()
        .enumerate()
        .map(|(i, song)| (i, format_song_label(&song.title, &song.artist)))
        .collect();
    drop(player);

    let icons = state.music_icons.clone();
    let play_icon = icons.uri(if playing { "pause" } else { "play" });
    let play_glyph = if playing { "⏸" } else { "▶" };
    let mode_icon = icons.uri(mode.as_config_str());
    let volume_icon = icons.uri(if muted { "volume_muted" } else { "volume" });
    let volume_glyph = if muted { "🔇" } else { "🔊" };
    let help_icon = icons.uri("help");
    let mode_title = format!("Change Playback Mode ({})", mode.label());

    let mode_label = mode.label();

    let mut prev = act.clone();
    let mut play_pause = act.clone();
    let mut next = act.clone();
    let mut cycle = act.clone();
    let mut mute = act.clone();
    let mut set_volume = act.clone();
    let mut seek = act.clone();
    let select = act.clone();
    let play_row = act;

    rsx! {
        div {
            class: "music-frame",
            tabindex: "0",
            autofocus: true,
            onkeydown: handle_keydown,
            TitleBar { title: "Dance with Karu" }
            div { class: "content",
                div { class: "info",
                    div { class: "thumbnail",
                        if let Some(uri) = thumbnail {
                            img { src: "{uri}" }
                        } else {
                            "No Art"
                        }
                    }
                    div {
                        div { class: "song-title", "{title}" }
                        div { class: "song-artist", "{artist}" }
                    }
                }
                div { class: "progress",
                    span { class: "time", "{position_label}" }
                    input {
                        r#type: "range",
                        title: "Seek",
                        min: "0",
                        max: "{duration_ms}",
                        value: "{position_ms}",
                        disabled: duration_ms == 0,
                        oninput: move |evt| {
                            if let Ok(ms) = evt.value().parse::<u64>() {
                                seek(&|player| player.seek(Duration::from_millis(ms)));
                            }
                        },
                    }
                    span { class: "time", "{duration_label}" }
                }
                div { class: "controls",
                    button { class: "control", title: "Previous", onclick: move |_| prev(&|p| p.prev()), "⏮" }
                    button {
                        class: "control play",
                        title: "Play / Pause",
                        onclick: move |_| play_pause(&|p| p.toggle_play_pause()),
                        if let Some(uri) = play_icon {
                            img { src: "{uri}", width: "32", height: "32" }
                        } else {
                            "{play_glyph}"
                        }
                    }
                    button { class: "control", title: "Next", onclick: move |_| next(&|p| p.next()), "⏭" }
                }
                div { class: "options",
                    button {
                        class: "control",
                        title: "{mode_title}",
                        onclick: move |_| cycle(&|p| p.cycle_mode()),
                        if let Some(uri) = mode_icon {
                            img { src: "{uri}" }
                        } else {
                            "{mode_label}"
                        }
                    }
                    div { class: "volume",
                        button {
                            class: "control",
                            title: "Mute / Unmute",
                            onclick: move |_| mute(&|p| p.toggle_mute()),
                            if let Some(uri) = volume_icon {
                                img { src: "{uri}" }
                            } else {
                                "{volume_glyph}"
                            }
                        }
                        input {
                            r#type: "range",
                            title: "Volume",
                            min: "0",
                            max: "100",
                            value: "{volume}",
                            oninput: move |evt| {
                                if let Ok(v) = evt.value().parse::<u8>() {
                                    set_volume(&|p| p.set_volume(v));
                                }
                            },
                        }
                    }
                    button {
                        class: "control",
                        title: "Help / Shortcuts",
                        onclick: move |_| show_help.set(true),
                        if let Some(uri) = help_icon {
                            img { src: "{uri}" }
                        } else {
                            "?"
                        }
                    }
                }
            }
            div { class: "song-list",
                for (i, label) in songs {
                    div {
                        key: "{i}",
                        class: if selection == Some(i) { "song selected" } else { "song" },
                        class: if current == Some(i) { "current" },
                        onclick: {
                            let mut select = select.clone();
                            move |_| select(&|p| p.select(i))
                        },
                        ondoubleclick: {
                            let mut play_row = play_row.clone();
                            move |_| play_row(&|p| p.play_from_list(i))
                        },
                        "{label}"
                    }
                }
            }
            if show_help() {
                HelpOverlay { on_close: move |_| show_help.set(false) }
            }
        }
    }
}
