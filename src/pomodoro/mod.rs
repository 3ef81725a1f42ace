//! Pomodoro timer
//!
//! Countdown state and the colour themes of the pomodoro window.

pub mod themes;
pub mod timer;

pub use themes::{build_stylesheet, resolve_theme, ThemeColors, DEFAULT_THEME};
pub use timer::{FoxIcon, PomodoroTimer, TickOutcome, TomatoSprite};
