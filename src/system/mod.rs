//! System integration
//!
//! This module provides the tray icon and screen geometry.

pub mod screen;
pub mod tray;
