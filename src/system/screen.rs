//! Screen geometry
//!
//! Where the pet may walk and where its speech bubble goes.

use dioxus::desktop::tao::monitor::MonitorHandle;

/// Logical pixels reserved at the bottom of the monitor for a taskbar/dock
pub const TASKBAR_MARGIN: i32 = 48;

/// Area of the desktop the pet lives in, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenArea {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1280,
            height: 720 - TASKBAR_MARGIN,
        }
    }
}

impl ScreenArea {
    /// Available area of a monitor, minus the taskbar margin
    pub fn from_monitor(monitor: &MonitorHandle) -> Self {
        let scale = monitor.scale_factor();
        let position = monitor.position().to_logical::<f64>(scale);
        let size = monitor.size().to_logical::<f64>(scale);
        Self {
            x: position.x.round() as i32,
            y: position.y.round() as i32,
            width: size.width.round() as i32,
            height: (size.height.round() as i32 - TASKBAR_MARGIN).max(0),
        }
    }
}

/// Rough size a speech bubble needs for `text`.
///
/// Wrapped bubbles are capped at 270px of text like a label with word wrap;
/// unwrapped ones grow with the line.
pub fn estimate_bubble_size(text: &str, word_wrap: bool) -> (i32, i32) {
    const CHAR_WIDTH: i32 = 8;
    const LINE_HEIGHT: i32 = 20;
    const PADDING: i32 = 40;
    const WRAP_WIDTH: i32 = 270;

    let chars = text.chars().count() as i32;
    if word_wrap {
        let per_line = (WRAP_WIDTH / CHAR_WIDTH).max(1);
        let lines = ((chars + per_line - 1) / per_line).max(1);
        let width = (chars * CHAR_WIDTH).min(WRAP_WIDTH) + PADDING;
        (width, lines * LINE_HEIGHT + PADDING)
    } else {
        (chars.max(1) * CHAR_WIDTH + PADDING, LINE_HEIGHT + PADDING)
    }
}

/// Top-left corner for a bubble centred over the pet.
///
/// Goes above the pet when there is room, otherwise just below it.
pub fn bubble_geometry(pet: (i32, i32), pet_size: (i32, i32), bubble_size: (i32, i32)) -> (i32, i32) {
    let (px, py) = pet;
    let (pw, ph) = pet_size;
    let (bw, bh) = bubble_size;

    let x = px + pw / 2 - bw / 2;
    let above = py - bh - 5;
    let y = if above > 0 { above } else { py + ph + 5 };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_goes_above_when_room() {
        let (x, y) = bubble_geometry((500, 900), (100, 80), (200, 60));
        assert_eq!(x, 500 + 50 - 100);
        assert_eq!(y, 900 - 60 - 5);
    }

    #[test]
    fn test_bubble_goes_below_at_top_of_screen() {
        let (_, y) = bubble_geometry((500, 20), (100, 80), (200, 60));
        assert_eq!(y, 20 + 80 + 5);
    }

    #[test]
    fn test_estimate_wrapped_bubble() {
        let short = estimate_bubble_size("Hi", true);
        let long = estimate_bubble_size(&"a".repeat(200), true);
        assert!(long.1 > short.1);
        assert!(long.0 <= 270 + 40);
    }

    #[test]
    fn test_estimate_single_line_bubble() {
        let (w, h) = estimate_bubble_size("How's your day going?", false);
        assert_eq!(h, 60);
        assert_eq!(w, 21 * 8 + 40);
    }
}
