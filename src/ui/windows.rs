//! Window management
//!
//! Every surface is its own desktop window with its own `VirtualDom`. The
//! companion windows are opened once and then only hidden and shown again;
//! the speech bubble and the rating dialog are replaced each time.

use crate::app::AppState;
use crate::storage::assets::DEFAULT_SPRITE_SIZE;
use crate::system::screen::{bubble_geometry, estimate_bubble_size};
use crate::ui::chat::ChatWindow;
use crate::ui::components::rating_dialog::{RatingDialog, RatingQuestion};
use crate::ui::components::speech_bubble::{BubbleText, SpeechBubble};
use crate::ui::help::HelpWindow;
use crate::ui::music::MusicWindow;
use crate::ui::pomodoro::PomodoroWindow;
use crate::ui::styles;
use dioxus::desktop::tao::dpi::{LogicalPosition, LogicalSize};
use dioxus::desktop::{window, Config, DesktopContext, DesktopService, WindowBuilder};
use dioxus::prelude::*;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

const RATING_SIZE: (i32, i32) = (320, 180);

/// Windows opened from the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Companion {
    Chat,
    Music,
    Pomodoro,
    Help,
}

impl Companion {
    pub fn title(self) -> &'static str {
        match self {
            Companion::Chat => "Chat with Karu",
            Companion::Music => "Music with Karu",
            Companion::Pomodoro => "Pomodoro Timer",
            Companion::Help => "Karu the Fox - Help",
        }
    }

    pub fn size(self) -> (f64, f64) {
        match self {
            Companion::Chat => (400.0, 500.0),
            Companion::Music => (440.0, 580.0),
            Companion::Pomodoro => (340.0, 440.0),
            Companion::Help => (460.0, 400.0),
        }
    }

    fn css(self) -> &'static str {
        match self {
            Companion::Chat => styles::CHAT_CSS,
            Companion::Music => styles::MUSIC_CSS,
            Companion::Pomodoro => styles::POMODORO_CSS,
            Companion::Help => styles::HELP_CSS,
        }
    }

    fn root(self) -> fn() -> Element {
        match self {
            Companion::Chat => ChatWindow,
            Companion::Music => MusicWindow,
            Companion::Pomodoro => PomodoroWindow,
            Companion::Help => HelpWindow,
        }
    }
}

enum Slot {
    Opening,
    Open(Weak<DesktopService>),
}

/// A window that is thrown away and rebuilt on every show
#[derive(Default)]
struct Transient {
    generation: u64,
    window: Option<Weak<DesktopService>>,
}

impl Transient {
    /// Close the current window and invalidate any that are still opening
    fn close(&mut self) -> u64 {
        self.generation += 1;
        if let Some(ctx) = self.window.take().and_then(|w| w.upgrade()) {
            ctx.close();
        }
        self.generation
    }

    fn attach(&mut self, generation: u64, ctx: &DesktopContext) {
        if generation == self.generation {
            self.window = Some(Rc::downgrade(ctx));
        } else {
            // Superseded while the webview was being built
            ctx.close();
        }
    }
}

/// Every secondary window the pet owns
#[derive(Default)]
pub struct WindowRegistry {
    companions: HashMap<Companion, Slot>,
    bubble: Transient,
    rating: Transient,
}

impl WindowRegistry {
    fn live(&self, kind: Companion) -> Option<DesktopContext> {
        match self.companions.get(&kind) {
            Some(Slot::Open(weak)) => weak.upgrade(),
            _ => None,
        }
    }

    /// Claim the right to open `kind`; false while it is already opening
    fn begin_opening(&mut self, kind: Companion) -> bool {
        if matches!(self.companions.get(&kind), Some(Slot::Opening)) {
            return false;
        }
        self.companions.insert(kind, Slot::Opening);
        true
    }

    fn opened(&mut self, kind: Companion, ctx: &DesktopContext) {
        self.companions.insert(kind, Slot::Open(Rc::downgrade(ctx)));
    }
}

/// What a window is for, which decides whether it gets a taskbar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Pet,
    Overlay,
    Companion,
}

impl Surface {
    fn in_taskbar(self) -> bool {
        self == Surface::Companion
    }
}

#[cfg(target_os = "windows")]
fn skip_taskbar(window: WindowBuilder) -> WindowBuilder {
    use dioxus::desktop::tao::platform::windows::WindowBuilderExtWindows;
    window.with_skip_taskbar(true)
}

#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn skip_taskbar(window: WindowBuilder) -> WindowBuilder {
    use dioxus::desktop::tao::platform::unix::WindowBuilderExtUnix;
    window.with_skip_taskbar(true)
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn skip_taskbar(window: WindowBuilder) -> WindowBuilder {
    window
}

fn frameless(surface: Surface, title: &str, size: (f64, f64)) -> WindowBuilder {
    let window = WindowBuilder::new()
        .with_title(title)
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top(true)
        .with_resizable(false)
        .with_inner_size(LogicalSize::new(size.0, size.1));
    if surface.in_taskbar() {
        window
    } else {
        skip_taskbar(window)
    }
}

fn window_config(window: WindowBuilder, css: &str) -> Config {
    Config::new()
        .with_window(window)
        .with_menu(None)
        .with_background_color((0, 0, 0, 0))
        .with_disable_context_menu(true)
        .with_custom_head(styles::head(css))
}

/// The pet window itself; it is resized to the sprite once assets are loaded
pub fn pet_config() -> Config {
    let (width, height) = DEFAULT_SPRITE_SIZE;
    window_config(
        frameless(Surface::Pet, "Karu the Fox", (f64::from(width), f64::from(height))),
        styles::PET_CSS,
    )
}

fn companion_config(kind: Companion) -> Config {
    window_config(frameless(Surface::Companion, kind.title(), kind.size()), kind.css())
}

fn overlay_config(title: &str, size: (i32, i32), position: (i32, i32), css: &str) -> Config {
    let window = frameless(Surface::Overlay, title, (f64::from(size.0), f64::from(size.1)))
        .with_position(LogicalPosition::new(
            f64::from(position.0),
            f64::from(position.1),
        ))
        .with_focused(false);
    window_config(window, css)
}

/// Show, restore and focus a companion window, opening it on first use
pub fn show_companion(state: &AppState, kind: Companion) {
    let existing = state.windows.borrow().live(kind);
    if let Some(ctx) = existing {
        ctx.set_visible(true);
        ctx.set_minimized(false);
        ctx.set_focus();
        return;
    }

    if !state.windows.borrow_mut().begin_opening(kind) {
        return;
    }

    tracing::info!("Opening {} window", kind.title());
    let dom = VirtualDom::new(kind.root()).with_root_context(state.clone());
    let pending = window().new_window(dom, companion_config(kind));
    let windows = state.windows.clone();
    spawn(async move {
        let ctx = pending.resolve().await;
        windows.borrow_mut().opened(kind, &ctx);
    });
}

/// Replace the speech bubble above the pet
pub fn show_bubble(
    state: &AppState,
    text: String,
    word_wrap: bool,
    pet: (i32, i32),
    pet_size: (i32, i32),
) {
    let size = estimate_bubble_size(&text, word_wrap);
    let position = bubble_geometry(pet, pet_size, size);
    let generation = state.windows.borrow_mut().bubble.close();

    let dom = VirtualDom::new(SpeechBubble).with_root_context(BubbleText { text, word_wrap });
    let pending = window().new_window(
        dom,
        overlay_config("Karu", size, position, styles::BUBBLE_CSS),
    );
    let windows = state.windows.clone();
    spawn(async move {
        let ctx = pending.resolve().await;
        windows.borrow_mut().bubble.attach(generation, &ctx);
    });
}

pub fn hide_bubble(state: &AppState) {
    state.windows.borrow_mut().bubble.close();
}

/// Ask how the user feels. The answer comes back as a pet command.
pub fn open_rating(state: &AppState, question: String, pet: (i32, i32), pet_size: (i32, i32)) {
    let position = bubble_geometry(pet, pet_size, RATING_SIZE);
    let generation = state.windows.borrow_mut().rating.close();

    let dom = VirtualDom::new(RatingDialog)
        .with_root_context(state.clone())
        .with_root_context(RatingQuestion(question));
    let pending = window().new_window(
        dom,
        overlay_config("How are you feeling?", RATING_SIZE, position, styles::RATING_CSS),
    );
    let windows = state.windows.clone();
    spawn(async move {
        let ctx = pending.resolve().await;
        ctx.set_focus();
        windows.borrow_mut().rating.attach(generation, &ctx);
    });
}

pub fn close_rating(state: &AppState) {
    state.windows.borrow_mut().rating.close();
}
