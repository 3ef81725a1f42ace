//! UI components for Karu
//!
//! Every window is a Dioxus component rendered in its own webview.

pub mod chat;
pub mod components;
pub mod help;
pub mod music;
pub mod pomodoro;
pub mod styles;
pub mod windows;
