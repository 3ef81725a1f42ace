//! Display helpers for the player window

pub const TITLE_DISPLAY_LIMIT: usize = 25;
pub const ARTIST_DISPLAY_LIMIT: usize = 22;
pub const SONG_LABEL_LIMIT: usize = 42;

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit <= 3 {
        return text.chars().take(limit).collect();
    }
    let mut short: String = text.chars().take(limit - 3).collect();
    short.push_str("...");
    short
}

/// `MM:SS`, minutes wrap at an hour
pub fn format_time(ms: u64) -> String {
    let seconds = (ms / 1000) % 60;
    let minutes = (ms / 60_000) % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

pub fn format_title_display(title: &str) -> String {
    let title = if title.is_empty() { "Unknown Title" } else { title };
    truncate(title, TITLE_DISPLAY_LIMIT)
}

pub fn format_artist_display(artist: &str) -> String {
    let artist = if artist.is_empty() { "Unknown Author" } else { artist };
    truncate(artist, ARTIST_DISPLAY_LIMIT)
}

/// Single line label used in the song list
pub fn format_song_label(title: &str, artist: &str) -> String {
    let text = format!(
        "{} - {}",
        format_title_display(title),
        format_artist_display(artist)
    );
    truncate(&text, SONG_LABEL_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(61_500), "01:01");
        assert_eq!(format_time(59 * 60_000 + 59_999), "59:59");
        assert_eq!(format_time(61 * 60_000), "01:00");
    }

    #[test]
    fn test_short_label_is_untouched() {
        assert_eq!(format_song_label("Sunny", "Karu"), "Sunny - Karu");
    }

    #[test]
    fn test_long_parts_are_truncated() {
        let title = "A".repeat(40);
        let artist = "B".repeat(40);
        assert_eq!(format_title_display(&title), format!("{}...", "A".repeat(22)));
        assert_eq!(format_artist_display(&artist), format!("{}...", "B".repeat(19)));

        let label = format_song_label(&title, &artist);
        assert_eq!(label.chars().count(), SONG_LABEL_LIMIT);
        assert!(label.ends_with("..."));
    }

    #[test]
    fn test_empty_parts_have_placeholders() {
        assert_eq!(format_song_label("", ""), "Unknown Title - Unknown Author");
    }
}
