//! Terrain streaming demo.
//!
//! Builds a world from a seed, walks a viewer across it and logs how the
//! chunk window evolves. With `--background` the missing chunks are
//! generated on worker threads instead of inline.

use clap::Parser;
use glam::Vec3;

use voxelterra::config::WorldConfig;
use voxelterra::constants::CHUNK_WIDTH;
use voxelterra::world::{ChunkLoader, World};

#[derive(Parser)]
#[command(name = "voxelterra", about = "Chunked voxel terrain generator demo")]
struct Args {
    /// World seed
    #[arg(long, default_value_t = 0)]
    seed: i32,

    /// View distance in chunks
    #[arg(long)]
    view_distance: Option<i32>,

    /// Optional JSON world config; CLI flags override it
    #[arg(long)]
    config: Option<String>,

    /// Number of chunk-sized steps the demo viewer walks
    #[arg(long, default_value_t = 8)]
    walk: u32,

    /// Generate chunks on background workers
    #[arg(long)]
    background: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match WorldConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };
    config.seed = args.seed;
    if let Some(view_distance) = args.view_distance {
        config.view_distance = view_distance;
    }
    if let Err(e) = config.validate() {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    tracing::info!(
        seed = config.seed,
        view_distance = config.view_distance,
        "generating world"
    );

    let mut world = World::from_config(&config);
    world.generate_initial_world();
    tracing::info!(
        chunks = world.chunk_count(),
        active = world.active_count(),
        triangles = world.triangle_count(),
        "initial window ready"
    );

    if args.background {
        walk_with_loader(&mut world, args.walk);
    } else {
        walk_inline(&mut world, args.walk);
    }

    tracing::info!(
        chunks = world.chunk_count(),
        active = world.active_count(),
        triangles = world.triangle_count(),
        "walk finished"
    );
}

/// Walks the viewer east one chunk at a time, generating inline.
fn walk_inline(world: &mut World, steps: u32) {
    let mut viewer = world.spawn;
    for _ in 0..steps {
        viewer += Vec3::new(CHUNK_WIDTH as f32, 0.0, 0.0);
        world.on_viewer_moved(viewer);
        tracing::info!(
            x = viewer.x,
            active = world.active_count(),
            chunks = world.chunk_count(),
            "viewer moved"
        );
    }
}

/// Same walk, but unloaded chunks are requested from worker threads and
/// installed as they finish.
fn walk_with_loader(world: &mut World, steps: u32) {
    let mut loader = ChunkLoader::new(
        world.generator().clone(),
        world.catalog().clone(),
        world.atlas(),
    );

    let mut viewer = world.spawn;
    for _ in 0..steps {
        viewer += Vec3::new(CHUNK_WIDTH as f32, 0.0, 0.0);
        let missing = world.stream_viewer_moved(viewer);
        loader.request_all(&missing);

        for chunk in loader.poll_all_results() {
            world.install_chunk(chunk);
        }
        tracing::info!(
            x = viewer.x,
            pending = loader.pending_count(),
            active = world.active_count(),
            "viewer moved"
        );
    }

    // drain whatever is still in flight
    while loader.pending_count() > 0 {
        for chunk in loader.poll_all_results() {
            world.install_chunk(chunk);
        }
        std::thread::yield_now();
    }
}
