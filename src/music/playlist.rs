//! Playlist discovery and shuffle queue helpers

use glob::glob;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

const THUMBNAIL_EXTENSIONS: [&str; 4] = ["jpg", "png", "jfif", "jpeg"];

/// One song folder under the music directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub path: PathBuf,
    pub thumbnail: Option<PathBuf>,
}

/// Split a `Title_Artist` file stem, with dashes standing in for spaces.
pub fn parse_song_name(stem: &str) -> (String, String) {
    match stem.split_once('_') {
        Some((title, artist)) => (title.replace('-', " "), artist.replace('-', " ")),
        None => (stem.replace('-', " "), "Unknown Artist".to_string()),
    }
}

fn find_thumbnail(song_dir: &Path) -> Option<PathBuf> {
    THUMBNAIL_EXTENSIONS
        .iter()
        .map(|ext| song_dir.join(format!("thumbnail.{}", ext)))
        .find(|candidate| candidate.exists())
}

fn first_mp3(song_dir: &Path) -> Option<PathBuf> {
    let pattern = format!(
        "{}/*.mp3",
        glob::Pattern::escape(&song_dir.to_string_lossy())
    );
    let entries = match glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Bad music glob for {}: {}", song_dir.display(), e);
            return None;
        }
    };
    entries.filter_map(Result::ok).next()
}

/// Scan `music_dir` for song folders.
///
/// Each direct sub-directory holding at least one `.mp3` contributes one song.
pub fn scan_music_directory(music_dir: &Path) -> Vec<Song> {
    let entries = match fs::read_dir(music_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::info!("No music directory at {}: {}", music_dir.display(), e);
            return Vec::new();
        }
    };

    let mut songs: Vec<Song> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|song_dir| {
            let mp3 = first_mp3(&song_dir)?;
            let stem = mp3.file_stem()?.to_string_lossy().to_string();
            let (title, artist) = parse_song_name(&stem);
            Some(Song {
                title: if title.is_empty() {
                    "Unknown Title".to_string()
                } else {
                    title
                },
                artist: if artist.is_empty() {
                    "Unknown Artist".to_string()
                } else {
                    artist
                },
                thumbnail: find_thumbnail(&song_dir),
                path: mp3,
            })
        })
        .collect();

    songs.sort_by_cached_key(|song| (song.title.to_lowercase(), song.artist.to_lowercase()));
    tracing::info!("Found {} songs in {}", songs.len(), music_dir.display());
    songs
}

/// Every index except `current`, in random order
pub fn build_shuffle_queue(len: usize, current: Option<usize>, rng: &mut impl Rng) -> Vec<usize> {
    let mut queue: Vec<usize> = (0..len).filter(|&i| Some(i) != current).collect();
    queue.shuffle(rng);
    queue
}

/// Refill an exhausted queue; an empty playlist empties it.
pub fn ensure_shuffle_queue(
    queue: &mut Vec<usize>,
    len: usize,
    current: Option<usize>,
    rng: &mut impl Rng,
) {
    if len == 0 {
        queue.clear();
        return;
    }
    if queue.is_empty() {
        queue.extend(build_shuffle_queue(len, current, rng));
    }
}

pub fn remove_from_shuffle_queue(queue: &mut Vec<usize>, index: usize) {
    queue.retain(|&i| i != index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn add_song(root: &Path, folder: &str, file: &str) -> PathBuf {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_parse_song_name() {
        assert_eq!(
            parse_song_name("Blue-Sky_The-Foxes"),
            ("Blue Sky".to_string(), "The Foxes".to_string())
        );
        assert_eq!(
            parse_song_name("a_b_c"),
            ("a".to_string(), "b c".to_string())
        );
        assert_eq!(
            parse_song_name("Lonely-Tune"),
            ("Lonely Tune".to_string(), "Unknown Artist".to_string())
        );
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        assert!(scan_music_directory(&dir.path().join("music")).is_empty());
    }

    #[test]
    fn test_scan_sorts_and_finds_thumbnails() {
        let dir = tempdir().unwrap();
        add_song(dir.path(), "one", "zebra_Zed.mp3");
        add_song(dir.path(), "two", "apple_Ann.mp3");
        fs::write(dir.path().join("two").join("thumbnail.png"), b"").unwrap();
        // Folders without an mp3 and loose files are skipped
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("loose.mp3"), b"").unwrap();

        let songs = scan_music_directory(dir.path());
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "apple");
        assert_eq!(songs[0].artist, "Ann");
        assert!(songs[0].thumbnail.is_some());
        assert_eq!(songs[1].title, "zebra");
        assert!(songs[1].thumbnail.is_none());
    }

    #[test]
    fn test_empty_title_falls_back() {
        let dir = tempdir().unwrap();
        add_song(dir.path(), "x", "_Someone.mp3");
        let songs = scan_music_directory(dir.path());
        assert_eq!(songs[0].title, "Unknown Title");
        assert_eq!(songs[0].artist, "Someone");
    }

    #[test]
    fn test_shuffle_queue_excludes_current() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut queue = build_shuffle_queue(6, Some(2), &mut rng);
        assert_eq!(queue.len(), 5);
        assert!(!queue.contains(&2));
        queue.sort();
        assert_eq!(queue, vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn test_ensure_shuffle_queue() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut queue = vec![4];
        ensure_shuffle_queue(&mut queue, 5, None, &mut rng);
        assert_eq!(queue, vec![4]);

        queue.clear();
        ensure_shuffle_queue(&mut queue, 5, None, &mut rng);
        assert_eq!(queue.len(), 5);

        ensure_shuffle_queue(&mut queue, 0, None, &mut rng);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_remove_from_shuffle_queue() {
        let mut queue = vec![3, 1, 2];
        remove_from_shuffle_queue(&mut queue, 1);
        assert_eq!(queue, vec![3, 2]);
        remove_from_shuffle_queue(&mut queue, 9);
        assert_eq!(queue, vec![3, 2]);
    }
}
