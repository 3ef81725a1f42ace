//! Karu the Fox
//!
//! A desktop pet that wanders along the bottom of the screen, with chat,
//! music and pomodoro companions reachable from the system tray.

pub mod app;
pub mod chat;
pub mod music;
pub mod pet;
pub mod pomodoro;
pub mod storage;
pub mod system;
pub mod types;
pub mod ui;
