use std::path::PathBuf;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use clap::Parser;
use shore_client::shoreline::{find_spawn_points, spawn_shore_waves, ShoreSpawner};
use shore_client::{WaveCamera, WaveEffectEvent, WaveGeometry, WavePlugin, WaveSet};
use shore_shared::sprite::{load_sprite_manifest, SpriteAtlas, SpriteManifest};
use shore_shared::wave::{load_wave_config, WaveConfig, WaveHandler};
use shore_shared::world::{ShoreWorldMap, WaveEffectKind};
use shore_shared::{SEA_LEVEL, SPRITE_MANIFEST_FILE, TICKS_PER_SECOND, WAVE_CONFIG_FILE};

/// Open water around the island
const ISLAND_MARGIN: i32 = 10;
/// Distance from the shore at which waves spawn
const SPAWN_DISTANCE: i32 = 5;
const CAMERA_HEIGHT: f32 = 20.0;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 1200, help = "Number of simulation ticks to run")]
    ticks: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 12)]
    island_radius: i32,

    #[arg(long, help = "Starting world time in ticks")]
    time: Option<i64>,

    #[arg(short, long, help = "Wave tuning file, defaults to ./waves.ron")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Sprite manifest, defaults to ./wave_sprites.ron")]
    sprites: Option<PathBuf>,

    #[arg(long, default_value_t = 10, help = "Ticks between wave spawns")]
    spawn_interval: u32,
}

#[derive(Resource, Debug, Default)]
struct RunStats {
    ticks: u32,
    max_ticks: u32,
    reported_at: u32,
    splashes: usize,
    sprays: usize,
}

fn main() {
    let args = Args::parse();

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICKS_PER_SECOND as f64,
        ))),
    );
    app.add_plugins(bevy::log::LogPlugin::default());

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(WAVE_CONFIG_FILE));
    let config = load_wave_config(&config_path).unwrap_or_else(|err| {
        error!("Failed to load {}: {}", config_path.display(), err);
        WaveConfig::default()
    });

    let sprites_path = args
        .sprites
        .unwrap_or_else(|| PathBuf::from(SPRITE_MANIFEST_FILE));
    let manifest = load_sprite_manifest(&sprites_path).unwrap_or_else(|err| {
        error!("Failed to load {}: {}", sprites_path.display(), err);
        SpriteManifest::default()
    });

    let mut world = ShoreWorldMap::island(
        args.island_radius,
        ISLAND_MARGIN,
        SEA_LEVEL,
        args.seed as u32,
    );
    world.time = args.time.unwrap_or_default();

    let extent = args.island_radius + ISLAND_MARGIN;
    let points = find_spawn_points(
        &world,
        IVec2::splat(-extent),
        IVec2::splat(extent),
        SEA_LEVEL,
        SPAWN_DISTANCE,
    );
    info!(
        "Island of radius {} with {} spawn points",
        args.island_radius,
        points.len()
    );

    app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND as f64))
        .insert_resource(world)
        .insert_resource(SpriteAtlas::from_manifest(&manifest))
        .insert_resource(WaveHandler::new(config, args.seed))
        .insert_resource(ShoreSpawner::new(
            points,
            args.spawn_interval,
            args.seed.wrapping_add(1),
        ))
        .insert_resource(WaveCamera {
            position: Vec3::new(0.0, SEA_LEVEL as f32 + CAMERA_HEIGHT, 0.0),
        })
        .insert_resource(RunStats {
            max_ticks: args.ticks,
            ..Default::default()
        })
        .add_plugins(WavePlugin::<ShoreWorldMap>::default())
        .add_systems(
            FixedUpdate,
            (
                (advance_world_time, spawn_shore_waves).before(WaveSet::Simulation),
                count_ticks.after(WaveSet::Simulation),
            ),
        )
        .add_systems(
            Update,
            (count_effects, report_stats, exit_when_done)
                .chain()
                .after(WaveSet::Geometry),
        );

    app.run();
}

fn advance_world_time(mut world: ResMut<ShoreWorldMap>) {
    world.time += 1;
}

fn count_ticks(mut stats: ResMut<RunStats>) {
    stats.ticks += 1;
}

fn count_effects(mut events: EventReader<WaveEffectEvent>, mut stats: ResMut<RunStats>) {
    for WaveEffectEvent(effect) in events.read() {
        match effect.kind {
            WaveEffectKind::Splash => stats.splashes += 1,
            WaveEffectKind::Spray { .. } => stats.sprays += 1,
        }
    }
}

fn report_stats(
    mut stats: ResMut<RunStats>,
    handler: Res<WaveHandler>,
    geometry: Res<WaveGeometry>,
) {
    let second = TICKS_PER_SECOND as u32;
    if stats.ticks < stats.reported_at + second {
        return;
    }
    stats.reported_at = stats.ticks;

    let washing = handler
        .waves()
        .iter()
        .filter(|wave| wave.is_washing_up())
        .count();
    let vertices = geometry
        .wave_mesh()
        .map_or(0, |mesh| mesh.count_vertices());
    let overlay_vertices = geometry
        .overlay_mesh()
        .map_or(0, |mesh| mesh.count_vertices());

    info!(
        "tick {}: {} waves ({} washing up), {} wet cells, {} wave vertices, {} overlay vertices, {} splashes, {} sprays",
        stats.ticks,
        handler.len(),
        washing,
        geometry.covered_cells,
        vertices,
        overlay_vertices,
        stats.splashes,
        stats.sprays
    );
}

fn exit_when_done(stats: Res<RunStats>, mut exit: EventWriter<AppExit>) {
    if stats.ticks >= stats.max_ticks {
        info!("Ran {} ticks, exiting", stats.ticks);
        exit.write(AppExit::Success);
    }
}
