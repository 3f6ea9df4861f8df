//! Per-instance sprite animation.
//!
//! Atlas animation in the host renderer ticks every sprite on one global clock,
//! which cannot give two waves different phases or speeds. Wave sprites instead
//! carry their own frame metadata and the frame is picked from the age of the
//! wave drawing them.

use serde::{Deserialize, Serialize};

/// U/V bounds of a rectangle inside the atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvCoords {
    pub u0: f32,
    pub u1: f32,
    pub v0: f32,
    pub v1: f32,
}

impl UvCoords {
    pub fn new(u0: f32, u1: f32, v0: f32, v1: f32) -> Self {
        Self { u0, u1, v0, v1 }
    }
}

/// Animation metadata shipped alongside a wave texture.
///
/// Frames are stacked vertically in the texture, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveSpriteMetadata {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Ticks each frame stays on screen.
    pub frame_time: u32,
}

impl WaveSpriteMetadata {
    pub fn new(frame_width: u32, frame_height: u32, frame_time: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_time,
        }
    }
}

/// A sprite resolved from the atlas, with optional frame metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    pub uvs: UvCoords,
    /// Pixel height of the whole sprite rectangle in the atlas.
    pub height: u32,
    pub metadata: Option<WaveSpriteMetadata>,
}

impl AnimatedSprite {
    pub fn new(uvs: UvCoords, height: u32, metadata: Option<WaveSpriteMetadata>) -> Self {
        Self {
            uvs,
            height,
            metadata,
        }
    }

    /// A sprite with a single frame covering its whole rectangle.
    pub fn still(uvs: UvCoords, height: u32) -> Self {
        Self::new(uvs, height, None)
    }

    pub fn frame_count(&self) -> u32 {
        match self.metadata {
            Some(meta) if meta.frame_height > 0 => (self.height / meta.frame_height).max(1),
            _ => 1,
        }
    }

    pub fn frame_time(&self) -> u32 {
        self.metadata.map_or(1, |meta| meta.frame_time.max(1))
    }

    /// Looping frame index for an animation that started `age` ticks ago.
    pub fn frame_from_age(&self, age: u32) -> u32 {
        (age / self.frame_time()) % self.frame_count()
    }

    pub fn min_u(&self) -> f32 {
        self.uvs.u0
    }

    pub fn max_u(&self) -> f32 {
        self.uvs.u1
    }

    pub fn min_v(&self, frame: u32) -> f32 {
        let frame = frame % self.frame_count();
        self.uvs.v0 + self.frame_v_span() * frame as f32
    }

    pub fn max_v(&self, frame: u32) -> f32 {
        let frame = frame % self.frame_count();
        self.uvs.v0 + self.frame_v_span() * (frame + 1) as f32
    }

    pub fn frame_uvs(&self, frame: u32) -> UvCoords {
        UvCoords::new(self.min_u(), self.max_u(), self.min_v(frame), self.max_v(frame))
    }

    /// UV bounds of the frame shown at `age`.
    pub fn uvs_at_age(&self, age: u32) -> UvCoords {
        self.frame_uvs(self.frame_from_age(age))
    }

    fn frame_v_span(&self) -> f32 {
        (self.uvs.v1 - self.uvs.v0) / self.frame_count() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(frame_time: u32, frames: u32) -> AnimatedSprite {
        AnimatedSprite::new(
            UvCoords::new(0.25, 0.5, 0.0, 0.5),
            16 * frames,
            Some(WaveSpriteMetadata::new(16, 16, frame_time)),
        )
    }

    #[test]
    fn frame_index_loops_over_the_strip() {
        let sprite = strip(5, 4);
        assert_eq!(sprite.frame_count(), 4);

        let frames: Vec<u32> = [0, 5, 10, 15, 20]
            .iter()
            .map(|age| sprite.frame_from_age(*age))
            .collect();
        assert_eq!(frames, vec![0, 1, 2, 3, 0]);

        assert_eq!(sprite.frame_from_age(4), 0);
        assert_eq!(sprite.frame_from_age(19), 3);
    }

    #[test]
    fn frames_split_v_range_evenly_and_keep_u() {
        let sprite = strip(5, 4);

        assert_eq!(sprite.frame_uvs(0), UvCoords::new(0.25, 0.5, 0.0, 0.125));
        assert_eq!(sprite.frame_uvs(3), UvCoords::new(0.25, 0.5, 0.375, 0.5));
        for frame in 0..4 {
            assert_eq!(sprite.min_u(), 0.25);
            assert_eq!(sprite.max_u(), 0.5);
            assert!((sprite.max_v(frame) - sprite.min_v(frame) - 0.125).abs() < 1e-6);
        }
    }

    #[test]
    fn two_instances_animate_independently() {
        let sprite = strip(2, 8);
        let young = sprite.uvs_at_age(3);
        let old = sprite.uvs_at_age(9);

        assert_ne!(young, old);
        assert_eq!(sprite.uvs_at_age(3), young);
    }

    #[test]
    fn still_sprites_have_one_frame() {
        let sprite = AnimatedSprite::still(UvCoords::new(0.0, 1.0, 0.0, 1.0), 16);
        assert_eq!(sprite.frame_count(), 1);
        assert_eq!(sprite.frame_from_age(1234), 0);
        assert_eq!(sprite.uvs_at_age(99), UvCoords::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_metadata_does_not_divide_by_zero() {
        let sprite = AnimatedSprite::new(
            UvCoords::new(0.0, 1.0, 0.0, 1.0),
            64,
            Some(WaveSpriteMetadata::new(16, 0, 0)),
        );
        assert_eq!(sprite.frame_count(), 1);
        assert_eq!(sprite.frame_time(), 1);
        assert_eq!(sprite.frame_from_age(17), 0);
    }
}
