//! Root Dioxus application component
//!
//! The root component renders the pet window. It also owns the tray icon and
//! runs the loop that drives the behaviour machine.

use crate::music::audio::{default_backend, AlertPlayer, AudioOutput};
use crate::music::{scan_music_directory, MusicPlayer};
use crate::pet::{PetBrain, PetEffect};
use crate::pomodoro::timer::clamp_duration_minutes;
use crate::pomodoro::PomodoroTimer;
use crate::storage::assets::{load_music_icons, IconSet, PetSprites, PomodoroSprites};
use crate::storage::settings::{load_settings, save_settings, AppSettings};
use crate::storage::{image_dir, logo_icon_path, music_dir};
use crate::system::screen::ScreenArea;
use crate::system::tray::{create_tray, TrayAction, TrayLabels, TrayMenu};
use crate::ui::windows::{self, Companion};
use chrono::Timelike;
use dioxus::desktop::tao::dpi::{LogicalPosition, LogicalSize};
use dioxus::desktop::trayicon::TrayIcon;
use dioxus::desktop::{use_tray_menu_event_handler, window, DesktopContext};
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Longest the pet loop sleeps before checking on the music and the tray
const MAX_IDLE_MS: u64 = 100;
/// How often the monitor layout is re-read
const AREA_REFRESH_MS: u64 = 2000;

/// Requests handled by the pet loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetCommand {
    Tray(TrayAction),
    /// Answer from the rating dialog, `None` when it was dismissed
    Rated(Option<u8>),
}

/// State shared by every window.
///
/// Each window runs its own `VirtualDom`, so this is handed to them as a root
/// context and uses plain `Rc<RefCell<_>>` instead of signals.
#[derive(Clone)]
pub struct AppState {
    pub settings: Rc<RefCell<AppSettings>>,
    pub player: Rc<RefCell<MusicPlayer>>,
    /// Looping sound played when a pomodoro completes
    pub alert: Rc<RefCell<AlertPlayer>>,
    pub pomodoro: Rc<RefCell<PomodoroTimer>>,
    pub sprites: Rc<PetSprites>,
    pub music_icons: Rc<IconSet>,
    pub pomodoro_sprites: Rc<PomodoroSprites>,
    pub windows: Rc<RefCell<windows::WindowRegistry>>,
    pub pet_visible: Rc<Cell<bool>>,
    commands: UnboundedSender<PetCommand>,
    command_rx: Rc<RefCell<Option<UnboundedReceiver<PetCommand>>>>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();

        let output = match AudioOutput::open() {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::warn!("Audio disabled: {}", e);
                None
            }
        };

        let mut player = MusicPlayer::new(default_backend(output.as_ref()));
        player.set_playlist(scan_music_directory(&music_dir()));
        player.apply_settings(&settings);
        tracing::info!("Music playlist has {} songs", player.playlist().len());

        let alert = AlertPlayer::new(
            default_backend(output.as_ref()),
            music_dir().join("pomodoro-alert.mp3"),
        );
        let pomodoro = PomodoroTimer::new(clamp_duration_minutes(settings.pomodoro_duration));

        let images = image_dir();
        let (commands, command_rx) = unbounded_channel();

        tracing::info!("AppState initialized");
        Self {
            settings: Rc::new(RefCell::new(settings)),
            player: Rc::new(RefCell::new(player)),
            alert: Rc::new(RefCell::new(alert)),
            pomodoro: Rc::new(RefCell::new(pomodoro)),
            sprites: Rc::new(PetSprites::load(&images)),
            music_icons: Rc::new(load_music_icons(&images)),
            pomodoro_sprites: Rc::new(PomodoroSprites::load(&images)),
            windows: Rc::new(RefCell::new(windows::WindowRegistry::default())),
            pet_visible: Rc::new(Cell::new(true)),
            commands,
            command_rx: Rc::new(RefCell::new(Some(command_rx))),
        }
    }

    pub fn send(&self, command: PetCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!("Pet loop gone, dropping {:?}", command);
        }
    }

    /// The receiving end of the command channel; only the pet loop takes it
    fn take_commands(&self) -> Option<UnboundedReceiver<PetCommand>> {
        self.command_rx.borrow_mut().take()
    }

    /// Write player and pomodoro preferences to the config file
    pub fn save(&self) {
        let mut settings = self.settings.borrow_mut();
        self.player.borrow().write_settings(&mut settings);
        settings.pomodoro_duration = i64::from(self.pomodoro.borrow().duration_minutes());
        match save_settings(&settings) {
            Ok(()) => tracing::info!("Settings saved"),
            Err(e) => tracing::error!("Failed to save settings: {}", e),
        }
    }

    fn tray_labels(&self, music_enabled: bool) -> TrayLabels {
        let player = self.player.borrow();
        TrayLabels::new(
            player.is_playing(),
            player.mode(),
            player.is_muted(),
            self.pet_visible.get(),
            music_enabled,
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

type Tray = Rc<RefCell<Option<(TrayMenu, TrayIcon)>>>;

fn elapsed_ms(clock: Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

fn monitor_area(desktop: &DesktopContext) -> Option<ScreenArea> {
    desktop
        .current_monitor()
        .or_else(|| desktop.primary_monitor())
        .map(|monitor| ScreenArea::from_monitor(&monitor))
}

fn place(desktop: &DesktopContext, (x, y): (i32, i32)) {
    desktop.set_outer_position(LogicalPosition::new(f64::from(x), f64::from(y)));
}

/// Where the window was dropped, in logical pixels
fn dropped_x(desktop: &DesktopContext) -> Option<i32> {
    let scale = desktop.scale_factor();
    desktop
        .outer_position()
        .ok()
        .map(|p| p.to_logical::<f64>(scale).x.round() as i32)
}

fn apply_effects(
    state: &AppState,
    brain: &RefCell<PetBrain>,
    effects: Vec<PetEffect>,
    music_enabled: &mut bool,
) {
    for effect in effects {
        let (position, size) = {
            let brain = brain.borrow();
            (brain.position(), brain.size())
        };
        match effect {
            PetEffect::ShowBubble { text, word_wrap } => {
                windows::show_bubble(state, text, word_wrap, position, size)
            }
            PetEffect::HideBubble => windows::hide_bubble(state),
            PetEffect::RequestRating { question } => {
                windows::open_rating(state, question, position, size)
            }
            PetEffect::LifecycleStarted => {
                tracing::info!("Main lifecycle started");
                *music_enabled = true;
            }
        }
    }
}

fn handle_tray_action(state: &AppState, desktop: &DesktopContext, tray: &Tray, action: TrayAction) {
    tracing::debug!("Tray action {:?}", action);
    match action {
        TrayAction::Chat => windows::show_companion(state, Companion::Chat),
        TrayAction::Pomodoro => windows::show_companion(state, Companion::Pomodoro),
        TrayAction::OpenMusic => windows::show_companion(state, Companion::Music),
        TrayAction::Help => windows::show_companion(state, Companion::Help),
        TrayAction::PlayPause => state.player.borrow_mut().toggle_play_pause(),
        TrayAction::Prev => state.player.borrow_mut().prev(),
        TrayAction::Next => state.player.borrow_mut().next(),
        TrayAction::Mode => state.player.borrow_mut().cycle_mode(),
        TrayAction::Mute => state.player.borrow_mut().toggle_mute(),
        TrayAction::ToggleVisibility => {
            let visible = !state.pet_visible.get();
            state.pet_visible.set(visible);
            desktop.set_visible(visible);
            if !visible {
                windows::hide_bubble(state);
            }
        }
        TrayAction::Exit => {
            state.save();
            state.alert.borrow_mut().stop();
            tray.borrow_mut().take();
            tracing::info!("Goodbye");
            std::process::exit(0);
        }
    }
}

/// Drop the pet where the native drag left the window
fn release_pet(brain: &RefCell<PetBrain>, clock: Instant, mut dragging: Signal<bool>) {
    if !dragging() {
        return;
    }
    dragging.set(false);

    let desktop = window();
    let fallback = brain.borrow().position().0;
    let x = dropped_x(&desktop).unwrap_or(fallback);
    brain
        .borrow_mut()
        .release(elapsed_ms(clock), x, &mut rand::thread_rng());
    place(&desktop, brain.borrow().position());
}

#[component]
pub fn App() -> Element {
    let app_state = use_hook(AppState::new);
    use_context_provider(|| app_state.clone());

    let clock = use_hook(Instant::now);
    let brain = use_hook(|| {
        let desktop = window();
        let area = monitor_area(&desktop).unwrap_or_default();
        let size = app_state.sprites.base_size();
        desktop.set_inner_size(LogicalSize::new(f64::from(size.0), f64::from(size.1)));
        let brain = PetBrain::new(size, area, &mut rand::thread_rng());
        place(&desktop, brain.position());
        Rc::new(RefCell::new(brain))
    });
    let mut sprite = use_signal(|| brain.borrow().sprite());
    let mut dragging = use_signal(|| false);

    let tray: Tray = use_hook(|| {
        let built = TrayMenu::build().and_then(|menu| {
            let icon = create_tray(&menu, &logo_icon_path())?;
            Ok((menu, icon))
        });
        match built {
            Ok(tray) => Rc::new(RefCell::new(Some(tray))),
            Err(e) => {
                tracing::error!("Failed to create tray icon: {}", e);
                Rc::new(RefCell::new(None))
            }
        }
    });

    {
        let state = app_state.clone();
        use_tray_menu_event_handler(move |event| {
            let id = event.id.0.as_str();
            match TrayAction::from_id(id) {
                Some(action) => state.send(PetCommand::Tray(action)),
                None => tracing::debug!("Unknown tray item {}", id),
            }
        });
    }

    {
        let state = app_state.clone();
        use_drop(move || state.save());
    }

    // Behaviour loop
    {
        let state = app_state.clone();
        let brain = brain.clone();
        let tray = tray.clone();
        use_future(move || {
            let state = state.clone();
            let brain = brain.clone();
            let tray = tray.clone();
            async move {
                let Some(mut commands) = state.take_commands() else {
                    return;
                };
                let desktop = window();
                let mut rng = StdRng::from_entropy();
                let mut music_enabled = false;
                let mut placed = brain.borrow().position();
                let mut last_area_check = 0;

                let hour = chrono::Local::now().hour();
                let effects = brain.borrow_mut().start(elapsed_ms(clock), hour);
                apply_effects(&state, &brain, effects, &mut music_enabled);

                loop {
                    let now = elapsed_ms(clock);
                    let wait = brain
                        .borrow()
                        .next_wakeup()
                        .map_or(MAX_IDLE_MS, |at| at.saturating_sub(now).min(MAX_IDLE_MS));

                    tokio::select! {
                        command = commands.recv() => match command {
                            Some(PetCommand::Tray(action)) => {
                                handle_tray_action(&state, &desktop, &tray, action);
                            }
                            Some(PetCommand::Rated(rating)) => {
                                windows::close_rating(&state);
                                let effects = brain.borrow_mut().rated(rating, elapsed_ms(clock), &mut rng);
                                apply_effects(&state, &brain, effects, &mut music_enabled);
                            }
                            None => break,
                        },
                        _ = tokio::time::sleep(Duration::from_millis(wait)) => {}
                    }

                    let now = elapsed_ms(clock);
                    if now.saturating_sub(last_area_check) >= AREA_REFRESH_MS {
                        last_area_check = now;
                        if let Some(area) = monitor_area(&desktop) {
                            brain.borrow_mut().update_area(area);
                        }
                    }

                    let effects = brain.borrow_mut().advance(now, &mut rng);
                    apply_effects(&state, &brain, effects, &mut music_enabled);

                    let (position, current) = {
                        let brain = brain.borrow();
                        (brain.position(), brain.sprite())
                    };
                    if !*dragging.peek() && position != placed {
                        place(&desktop, position);
                        placed = position;
                    }
                    if *sprite.peek() != current {
                        sprite.set(current);
                    }

                    state.player.borrow_mut().poll();
                    if let Some((menu, _)) = tray.borrow_mut().as_mut() {
                        menu.sync(&state.tray_labels(music_enabled));
                    }
                }
            }
        });
    }

    let grab = {
        let brain = brain.clone();
        move |evt: MouseEvent| {
            if evt.trigger_button() != Some(MouseButton::Primary) {
                return;
            }
            if brain.borrow_mut().grab(elapsed_ms(clock)) {
                dragging.set(true);
                sprite.set(brain.borrow().sprite());
                window().drag();
            }
        }
    };
    let release_on_up = {
        let brain = brain.clone();
        move |_: MouseEvent| release_pet(&brain, clock, dragging)
    };
    let release_on_move = {
        let brain = brain.clone();
        move |evt: MouseEvent| {
            if evt.held_buttons().is_empty() {
                release_pet(&brain, clock, dragging);
            }
        }
    };

    let image = app_state
        .sprites
        .resolve(sprite())
        .map(|s| s.uri.clone())
        .unwrap_or_default();
    let pet_class = if dragging() { "pet dragging" } else { "pet" };

    rsx! {
        div {
            class: "{pet_class}",
            onmousedown: grab,
            onmouseup: release_on_up,
            onmousemove: release_on_move,
            if !image.is_empty() {
                img { src: "{image}", draggable: "false" }
            }
        }
    }
}
