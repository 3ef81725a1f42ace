//! Image assets
//!
//! Sprites are read once from the asset tree and handed to the webview as
//! `data:` URIs. Anything missing on disk is simply absent.

use crate::pet::behavior::PetSprite;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Fallback pet size used when the idle sprite is missing
pub const DEFAULT_SPRITE_SIZE: (u32, u32) = (128, 128);

/// An image ready to be embedded in markup
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("gif") => "image/gif",
        Some("jpg") | Some("jpeg") | Some("jfif") => "image/jpeg",
        _ => "image/png",
    }
}

/// Encode raw bytes as a `data:` URI
pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Load a single image, returning `None` when it does not exist or cannot be read
pub fn load_sprite(path: &Path) -> Option<Sprite> {
    if !path.exists() {
        tracing::debug!("Asset missing: {}", path.display());
        return None;
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read asset {}: {}", path.display(), e);
            return None;
        }
    };

    let (width, height) = image::image_dimensions(path).unwrap_or(DEFAULT_SPRITE_SIZE);

    Some(Sprite {
        uri: data_uri(&bytes, mime_for(path)),
        width,
        height,
    })
}

fn load_frames(dir: &Path, names: &[&str]) -> Vec<Sprite> {
    names.iter().filter_map(|name| load_sprite(&dir.join(name))).collect()
}

/// Every animation frame of the fox
#[derive(Debug, Clone, Default)]
pub struct PetSprites {
    pub idle: Vec<Sprite>,
    pub walk_left: Vec<Sprite>,
    pub walk_right: Vec<Sprite>,
    pub posture_left: Option<Sprite>,
    pub posture_right: Option<Sprite>,
    pub shock_left: Option<Sprite>,
    pub shock_right: Option<Sprite>,
    pub post_trauma_left: Vec<Sprite>,
    pub post_trauma_right: Vec<Sprite>,
    pub sleep: Option<Sprite>,
}

impl PetSprites {
    pub fn load(image_dir: &Path) -> Self {
        let dir = image_dir.join("fox");
        let sprites = Self {
            idle: load_frames(&dir, &["fox-1.png", "fox-2.png"]),
            walk_left: load_frames(&dir, &["fox-walking-left-1.png", "fox-walking-left-2.png"]),
            walk_right: load_frames(&dir, &["fox-walking-right-1.png", "fox-walking-right-2.png"]),
            posture_left: load_sprite(&dir.join("fox-idle-left.png")),
            posture_right: load_sprite(&dir.join("fox-idle-right.png")),
            shock_left: load_sprite(&dir.join("fox-shock-left.png")),
            shock_right: load_sprite(&dir.join("fox-shock-right.png")),
            post_trauma_left: load_frames(
                &dir,
                &["fox-post-trauma-left-1.png", "fox-post-trauma-left-2.png"],
            ),
            post_trauma_right: load_frames(
                &dir,
                &["fox-post-trauma-right-1.png", "fox-post-trauma-right-2.png"],
            ),
            sleep: load_sprite(&dir.join("fox-sleeping.gif")),
        };
        tracing::info!("Loaded {} idle frames from {}", sprites.idle.len(), dir.display());
        sprites
    }

    /// Size of the pet window, taken from the first idle frame
    pub fn base_size(&self) -> (u32, u32) {
        self.idle
            .first()
            .map(|s| (s.width, s.height))
            .unwrap_or(DEFAULT_SPRITE_SIZE)
    }

    pub fn resolve(&self, sprite: PetSprite) -> Option<&Sprite> {
        fn frame(frames: &[Sprite], index: usize) -> Option<&Sprite> {
            if frames.is_empty() {
                None
            } else {
                frames.get(index % frames.len())
            }
        }

        match sprite {
            PetSprite::Idle(i) => frame(&self.idle, i),
            PetSprite::WalkLeft(i) => frame(&self.walk_left, i),
            PetSprite::WalkRight(i) => frame(&self.walk_right, i),
            PetSprite::PostureLeft => self.posture_left.as_ref(),
            PetSprite::PostureRight => self.posture_right.as_ref(),
            PetSprite::ShockLeft => self.shock_left.as_ref(),
            PetSprite::ShockRight => self.shock_right.as_ref(),
            PetSprite::PostTraumaLeft(i) => frame(&self.post_trauma_left, i),
            PetSprite::PostTraumaRight(i) => frame(&self.post_trauma_right, i),
            PetSprite::Sleep => self.sleep.as_ref(),
        }
    }
}

/// A named collection of small UI icons
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: HashMap<&'static str, Sprite>,
}

impl IconSet {
    pub fn load(dir: &Path, entries: &[(&'static str, &str)]) -> Self {
        let icons = entries
            .iter()
            .filter_map(|(key, file)| load_sprite(&dir.join(file)).map(|s| (*key, s)))
            .collect();
        Self { icons }
    }

    pub fn get(&self, key: &str) -> Option<&Sprite> {
        self.icons.get(key)
    }

    pub fn uri(&self, key: &str) -> Option<String> {
        self.get(key).map(|s| s.uri.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Music player control icons
pub fn load_music_icons(image_dir: &Path) -> IconSet {
    let mut set = IconSet::load(
        &image_dir.join("music-player"),
        &[
            ("play", "play.png"),
            ("pause", "pause.png"),
            ("normal", "normal.png"),
            ("loop_all", "loop.png"),
            ("shuffle", "shuffle.png"),
            ("volume", "volume.png"),
            ("volume_muted", "volume-muted.png"),
        ],
    );
    if let Some(help) = load_sprite(&image_dir.join("others").join("help.png")) {
        set.icons.insert("help", help);
    }
    set
}

/// Tomato sprites and fox hourglass icons for the pomodoro window
#[derive(Debug, Clone, Default)]
pub struct PomodoroSprites {
    pub neutral: Option<Sprite>,
    pub ticking: Vec<Sprite>,
    pub vibrate: Option<Sprite>,
    pub fox_icons: IconSet,
}

impl PomodoroSprites {
    pub fn load(image_dir: &Path) -> Self {
        let dir = image_dir.join("pomodoro");
        let mut ticking = load_frames(&dir, &["tomato-ticking-1.png", "tomato-ticking-2.png"]);
        if ticking.is_empty() {
            // Older asset packs ship a single ticking frame
            if let Some(single) = load_sprite(&dir.join("tomato-ticking.png")) {
                ticking = vec![single.clone(), single];
            }
        }

        Self {
            neutral: load_sprite(&dir.join("tomato-neutral.png")),
            ticking,
            vibrate: load_sprite(&dir.join("tomato-vibrate.png")),
            fox_icons: IconSet::load(
                &dir,
                &[
                    ("empty", "fox-hourglass-empty.png"),
                    ("half_top", "fox-hourglass-half-top.png"),
                    ("half_bottom", "fox-hourglass-half-bottom.png"),
                ],
            ),
        }
    }
}
