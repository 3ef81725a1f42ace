//! Stylesheets injected into each window's `<head>`

/// Shared by every window: transparent page, no scrollbars on the body
pub const BASE_CSS: &str = r#"
html, body {
    margin: 0;
    padding: 0;
    background: transparent;
    overflow: hidden;
    user-select: none;
    -webkit-user-select: none;
    font-family: 'Segoe UI', 'Helvetica Neue', Arial, sans-serif;
}
#main { width: 100vw; height: 100vh; }
button { cursor: pointer; font-family: inherit; }
button:disabled { cursor: default; }
img { -webkit-user-drag: none; }

.title-bar {
    display: flex;
    align-items: center;
    gap: 8px;
    height: 34px;
    padding: 0 6px 0 12px;
    cursor: grab;
}
.title-bar .title-text { flex: 1; font-weight: bold; }
.title-bar .window-button {
    width: 30px;
    height: 26px;
    padding: 0;
    font-size: 12px;
}
"#;

pub const PET_CSS: &str = r#"
.pet {
    width: 100vw;
    height: 100vh;
    display: flex;
    align-items: flex-end;
    justify-content: center;
    cursor: grab;
}
.pet img { max-width: 100%; max-height: 100%; image-rendering: pixelated; }
.pet.dragging { cursor: grabbing; }
"#;

pub const BUBBLE_CSS: &str = r#"
.bubble {
    box-sizing: border-box;
    margin: 5px;
    background-color: white;
    color: black;
    border: 1px solid black;
    border-radius: 10px;
    padding: 10px;
    font-size: 13px;
    line-height: 18px;
}
.bubble.wrap { max-width: 270px; white-space: normal; }
.bubble.nowrap { white-space: nowrap; display: inline-block; }
"#;

pub const RATING_CSS: &str = r#"
.rating {
    box-sizing: border-box;
    height: 100vh;
    background: #FFF5EC;
    border: 1px solid #F2C194;
    border-radius: 10px;
    color: #5D3C23;
    display: flex;
    flex-direction: column;
}
.rating .title-bar { background: #FFC387; border-radius: 9px 9px 0 0; }
.rating .window-button { background: #F7B267; border: 1px solid #F0A04B; border-radius: 4px; }
.rating .question { padding: 12px 16px 4px; font-size: 14px; }
.rating .choices { display: flex; justify-content: space-around; padding: 8px 12px; }
.rating .choices label { font-size: 24px; cursor: pointer; display: flex; align-items: center; gap: 2px; }
.rating .confirm {
    margin: 6px 16px 12px;
    background: #F7B267;
    border: 1px solid #F0A04B;
    border-radius: 6px;
    padding: 6px 14px;
    font-weight: 600;
}
.rating .confirm:hover { background: #F4A64F; }
"#;

pub const CHAT_CSS: &str = r#"
.chat-frame {
    box-sizing: border-box;
    height: 100vh;
    display: flex;
    flex-direction: column;
    background-color: #FFF4E6;
    border: 2px solid #F7B267;
    border-radius: 10px;
    color: #2B1B00;
}
.chat-frame .title-bar { background: #FFC387; border-radius: 8px 8px 0 0; }
.chat-frame .window-button {
    background: #F7B267;
    border: 1px solid #E0913F;
    border-radius: 6px;
    color: #2B1B00;
}
.chat-frame .window-button:hover { background: #FFD6A5; }
.messages {
    flex: 1;
    overflow-y: auto;
    padding: 10px;
    display: flex;
    flex-direction: column;
    gap: 8px;
}
.message { max-width: 80%; padding: 8px 12px; border-radius: 12px; font-size: 14px; white-space: pre-wrap; }
.message .sender { font-weight: bold; font-size: 12px; margin-bottom: 2px; }
.message.user { align-self: flex-end; background: #FFD6A5; }
.message.model { align-self: flex-start; background: #FFB570; }
.message.error { align-self: flex-start; background: #FFDEDA; border: 1px solid #D16F4F; }
.message.thinking { align-self: flex-start; background: #FFB570; opacity: 0.7; font-style: italic; }
.chat-input { display: flex; gap: 8px; padding: 10px; border-top: 1px solid #F7B267; }
.chat-input input {
    flex: 1;
    padding: 8px 10px;
    border: 1px solid #F7B267;
    border-radius: 8px;
    background: white;
    color: #2B1B00;
    font-size: 14px;
    outline: none;
}
.chat-input input:disabled { background: #F3E6D6; }
.chat-input button {
    background: #F7B267;
    border: 1px solid #E0913F;
    border-radius: 8px;
    padding: 8px 14px;
    font-weight: 600;
    color: #2B1B00;
}
.chat-input button:disabled { opacity: 0.5; }
"#;

pub const MUSIC_CSS: &str = r#"
.music-frame {
    box-sizing: border-box;
    height: 100vh;
    display: flex;
    flex-direction: column;
    background: linear-gradient(to bottom, #CFE8FF, #B6DCFF);
    color: #1F2A44;
    border: 4px solid #1F3D66;
    border-radius: 10px;
    font-family: 'Press Start 2P', 'VT323', 'Courier New', monospace;
    font-size: 13px;
    letter-spacing: 0.5px;
    outline: none;
    position: relative;
}
.music-frame .title-bar {
    background: #9CD5FF;
    border-radius: 7px 7px 0 0;
    border-bottom: 3px solid #1F3D66;
    color: #000000;
}
.music-frame .window-button,
.music-frame .control {
    background: #9CD5FF;
    border: 3px solid #1F3D66;
    border-radius: 6px;
    color: #0F1B2D;
}
.music-frame .window-button { background: #7CB8F0; border-radius: 4px; }
.music-frame .window-button:hover, .music-frame .control:hover { background: #BFE6FF; }
.music-frame .control:active { background: #7CB8F0; margin-top: 2px; }
.music-frame .content { padding: 10px 20px; display: flex; flex-direction: column; gap: 12px; }
.music-frame .info { display: flex; gap: 20px; align-items: flex-start; }
.music-frame .thumbnail {
    width: 100px;
    height: 100px;
    flex-shrink: 0;
    border: 3px solid #1F3D66;
    border-radius: 6px;
    background: #E5F3FF;
    display: flex;
    align-items: center;
    justify-content: center;
    overflow: hidden;
}
.music-frame .thumbnail img { width: 100%; height: 100%; object-fit: cover; }
.music-frame .song-title { font-size: 18px; font-weight: bold; color: #0F1B2D; margin-top: 5px; }
.music-frame .song-artist { font-size: 13px; color: #294368; margin-top: 6px; }
.music-frame .progress { display: flex; align-items: center; gap: 8px; }
.music-frame .progress input { flex: 1; }
.music-frame .time { font-weight: bold; color: #000000; min-width: 48px; text-align: center; }
.music-frame input[type=range] { accent-color: #1F3D66; }
.music-frame .controls { display: flex; justify-content: center; gap: 10px; }
.music-frame .controls .control { width: 48px; height: 48px; font-size: 16px; }
.music-frame .controls .control.play { width: 56px; height: 56px; background: #8BC7FF; border-radius: 8px; }
.music-frame .options { display: flex; align-items: center; justify-content: space-between; }
.music-frame .options .control { width: 40px; height: 40px; padding: 4px; }
.music-frame .options .control img { width: 22px; height: 22px; }
.music-frame .volume { display: flex; align-items: center; gap: 6px; }
.music-frame .volume input { width: 120px; }
.music-frame .song-list {
    flex: 1;
    min-height: 140px;
    margin: 0 20px 15px;
    overflow-y: auto;
    background: #E5F3FF;
    border: 3px solid #1F3D66;
    padding: 6px;
    font-size: 12px;
    color: #0F1B2D;
}
.music-frame .song-list .song { padding: 10px 6px; cursor: pointer; border: 2px solid transparent; }
.music-frame .song-list .song.selected { background: #7CB8F0; border-color: #1F3D66; }
.music-frame .song-list .song.current { font-weight: bold; }
.music-frame .overlay {
    position: absolute;
    inset: 0;
    background: rgba(15, 27, 45, 0.4);
    display: flex;
    align-items: center;
    justify-content: center;
    border-radius: 6px;
}
.music-frame .help-dialog {
    width: 320px;
    background: #E5F3FF;
    border: 3px solid #1F3D66;
    border-radius: 6px;
    padding: 12px 16px;
    font-size: 12px;
}
.music-frame .help-dialog h2 { font-size: 14px; margin: 6px 0; }
.music-frame .help-dialog ul { margin: 4px 0 8px; padding-left: 18px; }
.music-frame .help-dialog button { width: 100%; height: 30px; }
"#;

pub const POMODORO_CSS: &str = r#"
.pomodoro-frame {
    box-sizing: border-box;
    height: 100vh;
    padding: 16px;
    display: flex;
    flex-direction: column;
    gap: 12px;
    position: relative;
}
.pomodoro-frame .title-row { display: flex; align-items: center; gap: 6px; cursor: grab; }
.pomodoro-frame .title-row .spacer { flex: 1; }
.pomodoro-frame .fox-icon { width: 40px; height: 40px; display: flex; align-items: center; justify-content: center; }
.pomodoro-frame .fox-icon img { max-width: 40px; max-height: 40px; image-rendering: pixelated; }
.pomodoro-frame .tomato { display: flex; justify-content: center; min-height: 64px; }
.pomodoro-frame .tomato img { max-height: 96px; image-rendering: pixelated; }
.pomodoro-frame .slider-row { display: flex; flex-direction: column; gap: 4px; }
.pomodoro-frame .button-row { display: flex; gap: 10px; }
.pomodoro-frame .button-row button { flex: 1; }
.pomodoro-frame .alert-overlay {
    position: absolute;
    inset: 0;
    background: rgba(0, 0, 0, 0.35);
    display: flex;
    align-items: center;
    justify-content: center;
    border-radius: 10px;
}
.pomodoro-frame .alert-dialog {
    width: 80%;
    padding: 14px;
    display: flex;
    flex-direction: column;
    gap: 12px;
    text-align: center;
}
"#;

pub const HELP_CSS: &str = r#"
.help-frame {
    box-sizing: border-box;
    height: 100vh;
    background-color: #FFF5EC;
    border: 1px solid #F2C194;
    border-radius: 10px;
    color: #5D3C23;
    display: flex;
    flex-direction: column;
}
.help-frame .title-bar { color: #D2641A; }
.help-frame .window-button { background: #F7B267; border: 1px solid #F0A04B; border-radius: 4px; }
.help-frame .body { padding: 4px 18px 14px; display: flex; flex-direction: column; gap: 10px; font-size: 13px; }
.help-frame .dialog-title { font-size: 18px; font-weight: 700; color: #D2641A; }
.help-frame .section-title { font-size: 13px; font-weight: 600; color: #B14F0F; }
.help-frame ul { margin: 0; padding-left: 20px; }
.help-frame li { margin-bottom: 4px; }
.help-frame .buttons { display: flex; justify-content: space-between; align-items: center; }
.help-frame .buttons a, .help-frame .buttons button {
    background-color: #F7B267;
    border: 1px solid #F0A04B;
    padding: 6px 14px;
    border-radius: 6px;
    font-weight: 600;
    color: #5D3C23;
    text-decoration: none;
    font-size: 13px;
}
.help-frame .buttons a:hover, .help-frame .buttons button:hover { background-color: #F4A64F; }
"#;

/// `<style>` block for a window: the shared rules plus its own
pub fn head(window_css: &str) -> String {
    format!("<style>{}{}</style>", BASE_CSS, window_css)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_wraps_base_and_window_rules() {
        let head = head(CHAT_CSS);
        assert!(head.starts_with("<style>"));
        assert!(head.ends_with("</style>"));
        assert!(head.contains(".title-bar"));
        assert!(head.contains("#FFDEDA"));
    }
}
