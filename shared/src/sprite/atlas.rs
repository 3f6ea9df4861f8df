use std::collections::HashMap;
use std::path::Path;

use bevy_ecs::resource::Resource;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::utils::load_ron_or_default;

use super::{AnimatedSprite, UvCoords, WaveSpriteMetadata};

pub const WAVE_COLORABLE: &str = "wave_colorable";
pub const WAVE_WHITE: &str = "wave_white";
pub const WASHING_COLORABLE: &str = "washing_colorable";
pub const WASHING_WHITE: &str = "washing_white";
pub const WET_OVERLAY: &str = "wet_overlay";

/// One sprite rectangle of the stitched atlas, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteEntry {
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub animation: Option<WaveSpriteMetadata>,
}

/// Layout of the wave atlas produced by the host's stitcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteManifest {
    pub width: u32,
    pub height: u32,
    pub sprites: Vec<SpriteEntry>,
}

impl Default for SpriteManifest {
    fn default() -> Self {
        let strip = |id: &str, x: u32, height: u32, frame_time: u32| SpriteEntry {
            id: id.to_string(),
            x,
            y: 0,
            width: 16,
            height,
            animation: Some(WaveSpriteMetadata::new(16, 16, frame_time)),
        };

        Self {
            width: 64,
            height: 256,
            sprites: vec![
                strip(WAVE_COLORABLE, 0, 64, 5),
                strip(WAVE_WHITE, 16, 64, 5),
                strip(WASHING_COLORABLE, 32, 128, 4),
                strip(WASHING_WHITE, 48, 128, 4),
                SpriteEntry {
                    id: WET_OVERLAY.to_string(),
                    x: 0,
                    y: 128,
                    width: 16,
                    height: 16,
                    animation: None,
                },
            ],
        }
    }
}

pub fn load_sprite_manifest(path: &Path) -> Result<SpriteManifest, Box<dyn std::error::Error>> {
    load_ron_or_default(path)
}

/// Resolved wave sprites, keyed by identifier.
///
/// The atlas is only read by the wave core; rebuilding it on resource reload is
/// the host's job.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpriteAtlas {
    sprites: HashMap<String, AnimatedSprite>,
}

impl SpriteAtlas {
    pub fn from_manifest(manifest: &SpriteManifest) -> Self {
        let mut sprites = HashMap::new();

        if manifest.width == 0 || manifest.height == 0 {
            warn!("Sprite manifest has an empty atlas, no sprites resolved");
            return Self { sprites };
        }

        let width = manifest.width as f32;
        let height = manifest.height as f32;

        for entry in &manifest.sprites {
            let fits = |start: u32, size: u32, limit: u32| {
                start.checked_add(size).is_some_and(|end| end <= limit)
            };
            if !fits(entry.x, entry.width, manifest.width)
                || !fits(entry.y, entry.height, manifest.height)
            {
                warn!(
                    "Sprite {} lies outside the {}x{} atlas, skipping",
                    entry.id, manifest.width, manifest.height
                );
                continue;
            }

            let uvs = UvCoords::new(
                entry.x as f32 / width,
                (entry.x + entry.width) as f32 / width,
                entry.y as f32 / height,
                (entry.y + entry.height) as f32 / height,
            );
            sprites.insert(
                entry.id.clone(),
                AnimatedSprite::new(uvs, entry.height, entry.animation),
            );
        }

        Self { sprites }
    }

    pub fn get_sprite(&self, id: &str) -> Option<&AnimatedSprite> {
        self.sprites.get(id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// The sprites needed to draw waves, resolved once per frame.
#[derive(Debug, Clone)]
pub struct WaveSprites {
    pub colorable: AnimatedSprite,
    pub white: AnimatedSprite,
    pub washing_colorable: AnimatedSprite,
    pub washing_white: AnimatedSprite,
    pub wet_overlay: AnimatedSprite,
}

impl WaveSprites {
    /// Returns `None` if any wave sprite is missing from the atlas.
    pub fn resolve(atlas: &SpriteAtlas) -> Option<Self> {
        Some(Self {
            colorable: atlas.get_sprite(WAVE_COLORABLE)?.clone(),
            white: atlas.get_sprite(WAVE_WHITE)?.clone(),
            washing_colorable: atlas.get_sprite(WASHING_COLORABLE)?.clone(),
            washing_white: atlas.get_sprite(WASHING_WHITE)?.clone(),
            wet_overlay: atlas.get_sprite(WET_OVERLAY)?.clone(),
        })
    }

    pub fn missing(atlas: &SpriteAtlas) -> Vec<&'static str> {
        [
            WAVE_COLORABLE,
            WAVE_WHITE,
            WASHING_COLORABLE,
            WASHING_WHITE,
            WET_OVERLAY,
        ]
        .into_iter()
        .filter(|id| atlas.get_sprite(id).is_none())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_resolves_every_wave_sprite() {
        let atlas = SpriteAtlas::from_manifest(&SpriteManifest::default());

        assert_eq!(atlas.len(), 5);
        assert!(WaveSprites::missing(&atlas).is_empty());
        assert!(WaveSprites::resolve(&atlas).is_some());
    }

    #[test]
    fn pixel_rectangles_become_normalized_uvs() {
        let atlas = SpriteAtlas::from_manifest(&SpriteManifest::default());
        let sprite = atlas.get_sprite(WAVE_WHITE).unwrap();

        assert_eq!(sprite.uvs, UvCoords::new(0.25, 0.5, 0.0, 0.25));
        assert_eq!(sprite.frame_count(), 4);

        let washing = atlas.get_sprite(WASHING_COLORABLE).unwrap();
        assert_eq!(washing.frame_count(), 8);
        assert_eq!(washing.frame_time(), 4);
    }

    #[test]
    fn out_of_bounds_entries_are_skipped() {
        let mut manifest = SpriteManifest::default();
        manifest.sprites.push(SpriteEntry {
            id: "too_big".to_string(),
            x: 60,
            y: 0,
            width: 16,
            height: 16,
            animation: None,
        });

        let atlas = SpriteAtlas::from_manifest(&manifest);
        assert!(atlas.get_sprite("too_big").is_none());
        assert_eq!(atlas.len(), 5);
    }

    #[test]
    fn entries_near_u32_max_are_skipped() {
        let mut manifest = SpriteManifest::default();
        manifest.sprites.push(SpriteEntry {
            id: "wraps_x".to_string(),
            x: u32::MAX,
            y: 0,
            width: 16,
            height: 16,
            animation: None,
        });
        manifest.sprites.push(SpriteEntry {
            id: "wraps_y".to_string(),
            x: 0,
            y: u32::MAX - 1,
            width: 16,
            height: 16,
            animation: None,
        });

        let atlas = SpriteAtlas::from_manifest(&manifest);
        assert!(atlas.get_sprite("wraps_x").is_none());
        assert!(atlas.get_sprite("wraps_y").is_none());
        assert_eq!(atlas.len(), 5);
    }

    #[test]
    fn missing_sprite_fails_resolution() {
        let mut manifest = SpriteManifest::default();
        manifest.sprites.retain(|entry| entry.id != WET_OVERLAY);

        let atlas = SpriteAtlas::from_manifest(&manifest);
        assert!(WaveSprites::resolve(&atlas).is_none());
        assert_eq!(WaveSprites::missing(&atlas), vec![WET_OVERLAY]);
    }

    #[test]
    fn manifest_parses_from_ron() {
        let text = r#"(
            width: 32,
            height: 32,
            sprites: [
                (id: "wet_overlay", x: 0, y: 0, width: 16, height: 16),
                (id: "wave_white", x: 16, y: 0, width: 16, height: 32,
                 animation: Some((frame_width: 16, frame_height: 16, frame_time: 3))),
            ],
        )"#;
        let manifest: SpriteManifest = ron::de::from_str(text).unwrap();
        let atlas = SpriteAtlas::from_manifest(&manifest);

        assert_eq!(atlas.get_sprite(WAVE_WHITE).unwrap().frame_count(), 2);
        assert_eq!(atlas.get_sprite(WET_OVERLAY).unwrap().frame_count(), 1);
    }
}
