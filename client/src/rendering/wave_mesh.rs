//! Wave body geometry.
//!
//! Every wave becomes a strip of `width` quad pairs laid flat in its local
//! frame: a tinted "colorable" quad and a white highlight just above it. Big
//! waves that are washing up get a second, wider strip of foam quads behind
//! them, animated on the washing age instead of the wave age.

use bevy::math::{Affine3A, Vec3};
use shore_shared::sprite::{AnimatedSprite, WaveSprites};
use shore_shared::wave::Wave;
use shore_shared::world::WaveWorld;

use super::mesh::{flat_quad, QuadVertex, WaveMeshData};

/// Height of the white quad above the colorable one
const WHITE_LIFT: f32 = 0.05;
/// Local X and Z stretch of the whole strip
const STRIP_SCALE: f32 = 3.0;
/// Extra local X stretch of the foam strip
const WASH_SCALE_X: f32 = 1.25;
const WASH_SHIFT_X: f32 = -0.15;
const WASH_COLORABLE_Y: f32 = -0.05;
const WASH_WHITE_Y: f32 = -0.01;
const WASH_LENGTH: f32 = 2.0;
const WASH_BOB_PERIOD: f32 = 40.0;
const WASH_BOB_OFFSET: f32 = 1.15;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Where the frame is seen from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveView {
    pub camera_position: Vec3,
    /// Fraction of the simulation step elapsed since the last tick, in `[0, 1]`
    pub partial_tick: f32,
}

/// Local frame of a wave: origin at its feet, X across the strip, Z along travel.
pub fn wave_transform(wave: &Wave, view: &WaveView) -> Affine3A {
    let origin = wave.lerp_position(view.partial_tick) - view.camera_position;
    Affine3A::from_translation(origin)
        * Affine3A::from_rotation_y((-wave.yaw + 90.0).to_radians())
        * Affine3A::from_translation(Vec3::new(-(wave.width as f32) / 3.0, 0.0, 0.0))
        * Affine3A::from_scale(Vec3::new(STRIP_SCALE, 1.0, STRIP_SCALE))
}

/// Local Z offset of the foam strip for a washing age.
pub fn washing_bob(washing_age: u32) -> f32 {
    (washing_age as f32 / WASH_BOB_PERIOD).sin() + WASH_BOB_OFFSET
}

struct QuadSpec<'a> {
    sprite: &'a AnimatedSprite,
    age: u32,
    center: Vec3,
    length: f32,
    rgb: [f32; 3],
}

fn push_wave_quad(
    data: &mut WaveMeshData,
    transform: &Affine3A,
    quad: QuadSpec,
    alpha: f32,
    light: u32,
) {
    let uvs = quad.sprite.uvs_at_age(quad.age);
    let local = flat_quad(quad.center, 0.5, quad.length / 2.0, uvs);
    let world = local.map(|vertex| QuadVertex {
        position: transform.transform_point3(vertex.position),
        uv: vertex.uv,
    });
    let [red, green, blue] = quad.rgb;
    data.push_quad(world, [red, green, blue, alpha], light);
}

/// Builds the geometry of one wave, or `None` if it has nothing to draw.
pub fn generate_wave_mesh<W: WaveWorld>(
    wave: &Wave,
    world: &W,
    sprites: &WaveSprites,
    view: &WaveView,
) -> Option<WaveMeshData> {
    if wave.is_dead() || wave.width == 0 {
        return None;
    }

    let mut data = WaveMeshData::new();
    let transform = wave_transform(wave, view);
    let light = wave.light(world);
    let rgb = [wave.red, wave.green, wave.blue];

    for i in 0..wave.width {
        let x = i as f32;
        push_wave_quad(
            &mut data,
            &transform,
            QuadSpec {
                sprite: &sprites.colorable,
                age: wave.age(),
                center: Vec3::new(x, 0.0, 0.0),
                length: wave.length,
                rgb,
            },
            wave.alpha,
            light,
        );
        push_wave_quad(
            &mut data,
            &transform,
            QuadSpec {
                sprite: &sprites.white,
                age: wave.age(),
                center: Vec3::new(x, WHITE_LIFT, 0.0),
                length: wave.length,
                rgb: WHITE,
            },
            wave.alpha,
            light,
        );
    }

    if wave.big_wave && wave.is_washing_up() {
        let washing_age = wave.washing_age();
        let washing_z = washing_bob(washing_age);
        let transform = transform * Affine3A::from_scale(Vec3::new(WASH_SCALE_X, 1.0, 1.0));

        for i in 0..wave.width {
            let x = i as f32 + WASH_SHIFT_X;
            push_wave_quad(
                &mut data,
                &transform,
                QuadSpec {
                    sprite: &sprites.washing_colorable,
                    age: washing_age,
                    center: Vec3::new(x, WASH_COLORABLE_Y, washing_z),
                    length: WASH_LENGTH,
                    rgb,
                },
                wave.alpha,
                light,
            );
            push_wave_quad(
                &mut data,
                &transform,
                QuadSpec {
                    sprite: &sprites.washing_white,
                    age: washing_age,
                    center: Vec3::new(x, WASH_WHITE_Y, washing_z),
                    length: WASH_LENGTH,
                    rgb: WHITE,
                },
                wave.alpha,
                light,
            );
        }
    }

    (!data.is_empty()).then_some(data)
}

/// Geometry of all waves in one buffer. Waves without geometry are skipped.
pub fn generate_wave_meshes<'a, W, I>(
    waves: I,
    world: &W,
    sprites: &WaveSprites,
    view: &WaveView,
) -> Option<WaveMeshData>
where
    W: WaveWorld,
    I: IntoIterator<Item = &'a Wave>,
{
    let mut batch = WaveMeshData::new();
    for wave in waves {
        if let Some(data) = generate_wave_mesh(wave, world, sprites, view) {
            batch.extend(data);
        }
    }
    (!batch.is_empty()).then_some(batch)
}
