//! Bevy glue for the wave effect.
//!
//! Waves are ticked in `FixedUpdate` at the simulation rate. Geometry is rebuilt
//! in `Update` from the settled wave collection, interpolated with the fixed
//! timestep overstep.

use std::marker::PhantomData;

use bevy::prelude::*;
use shore_shared::sprite::{SpriteAtlas, SpriteManifest, WaveSprites};
use shore_shared::wave::WaveHandler;
use shore_shared::world::{WaveEffect, WaveWorld};

use crate::rendering::{generate_overlay_mesh, generate_wave_meshes, WaveMeshData, WaveView};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaveSet {
    /// Ticks every live wave once, in `FixedUpdate`
    Simulation,
    /// Rebuilds wave and overlay geometry, in `Update`
    Geometry,
}

/// Effect emitted by a wave, for the host particle system.
#[derive(Event, Debug, Clone, Copy)]
pub struct WaveEffectEvent(pub WaveEffect);

/// Viewpoint used to build camera-relative geometry.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WaveCamera {
    pub position: Vec3,
}

/// Latest wave geometry, replaced on every rebuild.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaveGeometry {
    pub waves: Option<WaveMeshData>,
    pub overlays: Option<WaveMeshData>,
    pub covered_cells: usize,
}

impl WaveGeometry {
    pub fn wave_mesh(&self) -> Option<Mesh> {
        self.waves.clone().and_then(WaveMeshData::into_mesh)
    }

    pub fn overlay_mesh(&self) -> Option<Mesh> {
        self.overlays.clone().and_then(WaveMeshData::into_mesh)
    }

    pub fn clear(&mut self) {
        self.waves = None;
        self.overlays = None;
        self.covered_cells = 0;
    }
}

/// Adds wave simulation and geometry for a world resource `W`.
///
/// `W` must be inserted by the host. A [`WaveHandler`] or [`SpriteAtlas`]
/// inserted before the plugin is kept; otherwise defaults are used.
pub struct WavePlugin<W>(PhantomData<fn() -> W>);

impl<W> Default for WavePlugin<W> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<W: WaveWorld + Resource> Plugin for WavePlugin<W> {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SpriteAtlas>() {
            app.insert_resource(SpriteAtlas::from_manifest(&SpriteManifest::default()));
        }

        app.init_resource::<WaveHandler>()
            .init_resource::<WaveCamera>()
            .init_resource::<WaveGeometry>()
            .add_event::<WaveEffectEvent>()
            .add_systems(
                FixedUpdate,
                (tick_waves::<W>, forward_wave_effects)
                    .chain()
                    .in_set(WaveSet::Simulation),
            )
            .add_systems(
                Update,
                rebuild_wave_geometry::<W>.in_set(WaveSet::Geometry),
            );
    }
}

pub fn tick_waves<W: WaveWorld + Resource>(world: Res<W>, mut handler: ResMut<WaveHandler>) {
    handler.tick(world.as_ref());
}

fn forward_wave_effects(
    mut handler: ResMut<WaveHandler>,
    mut events: EventWriter<WaveEffectEvent>,
) {
    if handler.pending_effects().is_empty() {
        return;
    }
    events.write_batch(handler.drain_effects().into_iter().map(WaveEffectEvent));
}

pub fn rebuild_wave_geometry<W: WaveWorld + Resource>(
    world: Res<W>,
    handler: Res<WaveHandler>,
    atlas: Res<SpriteAtlas>,
    camera: Res<WaveCamera>,
    time: Res<Time<Fixed>>,
    mut geometry: ResMut<WaveGeometry>,
    mut warned: Local<bool>,
) {
    let Some(sprites) = WaveSprites::resolve(&atlas) else {
        if !*warned {
            warn!(
                "Wave sprites missing from atlas: {:?}",
                WaveSprites::missing(&atlas)
            );
            *warned = true;
        }
        geometry.clear();
        return;
    };
    *warned = false;

    let view = WaveView {
        camera_position: camera.position,
        partial_tick: time.overstep_fraction(),
    };
    let world = world.as_ref();

    let cells = handler.covered_cells(world);
    geometry.waves = generate_wave_meshes(handler.waves(), world, &sprites, &view);
    geometry.overlays = generate_overlay_mesh(&cells, &sprites.wet_overlay, camera.position);
    geometry.covered_cells = cells.len();
}

#[cfg(test)]
mod tests {
    use shore_shared::world::ShoreWorldMap;

    use super::*;

    fn app(world: ShoreWorldMap) -> App {
        let mut app = App::new();
        app.init_resource::<Time<Fixed>>();
        app.insert_resource(world);
        app
    }

    #[test]
    fn simulation_then_geometry() {
        let mut app = app(ShoreWorldMap::island(4, 8, 62, 3));
        app.add_plugins(WavePlugin::<ShoreWorldMap>::default());
        app.world_mut()
            .resource_mut::<WaveHandler>()
            .spawn(IVec3::new(10, 62, 0), 180.0, 0.0, true, 2);

        app.world_mut().run_schedule(FixedUpdate);
        assert_eq!(app.world().resource::<WaveHandler>().waves()[0].age(), 1);

        app.world_mut().run_schedule(Update);
        let geometry = app.world().resource::<WaveGeometry>();
        assert_eq!(geometry.waves.as_ref().map(WaveMeshData::quad_count), Some(4));
        assert!(geometry.overlays.is_none());
        assert_eq!(geometry.wave_mesh().map(|mesh| mesh.count_vertices()), Some(16));
    }

    #[test]
    fn missing_sprites_skip_geometry() {
        let mut app = app(ShoreWorldMap::island(4, 8, 62, 3));
        app.insert_resource(SpriteAtlas::default());
        app.add_plugins(WavePlugin::<ShoreWorldMap>::default());
        app.world_mut()
            .resource_mut::<WaveHandler>()
            .spawn(IVec3::new(10, 62, 0), 180.0, 0.0, false, 1);

        app.world_mut().run_schedule(Update);

        let geometry = app.world().resource::<WaveGeometry>();
        assert!(geometry.waves.is_none());
        assert!(geometry.overlays.is_none());
    }

    #[test]
    fn effects_are_forwarded_as_events() {
        let mut world = ShoreWorldMap::island(4, 8, 62, 3);
        for z in -3..=3 {
            for y in 60..=63 {
                world.set_block(IVec3::new(9, y, z), shore_shared::world::BlockId::Stone);
            }
        }
        let mut app = app(world);
        app.add_plugins(WavePlugin::<ShoreWorldMap>::default());
        app.world_mut()
            .resource_mut::<WaveHandler>()
            .spawn(IVec3::new(11, 62, 0), 180.0, 0.0, false, 1);

        for _ in 0..10 {
            app.world_mut().run_schedule(FixedUpdate);
        }

        assert!(!app.world().resource::<Events<WaveEffectEvent>>().is_empty());
        assert!(app
            .world()
            .resource::<WaveHandler>()
            .pending_effects()
            .is_empty());
    }
}
