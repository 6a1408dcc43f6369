//! Chunk streaming: keeps a bounded window of chunks alive around the
//! viewer.
//!
//! Chunks live in a flat arena with a coordinate index; leaving the view
//! window deactivates a chunk but keeps its grid and mesh, so re-entering
//! the window is a flag flip with no regeneration.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::WorldConfig;
use crate::constants::*;
use crate::core::block::BlockCatalog;
use crate::core::chunk::{Chunk, ChunkCoord};
use crate::render::atlas::TextureAtlas;
use crate::render::mesh::build_chunk_mesh;
use crate::world::generator::VoxelGenerator;

/// Lifecycle state of a chunk coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChunkState {
    Unloaded,
    Active,
    Inactive,
}

pub struct World {
    generator: VoxelGenerator,
    catalog: BlockCatalog,
    atlas: TextureAtlas,
    view_distance: i32,
    chunks: Vec<Chunk>,
    index: FxHashMap<ChunkCoord, usize>,
    active: FxHashSet<ChunkCoord>,
    last_viewer_coord: Option<ChunkCoord>,
    pub spawn: Vec3,
}

impl World {
    pub fn new(catalog: BlockCatalog, generator: VoxelGenerator) -> Self {
        World {
            generator,
            catalog,
            atlas: TextureAtlas::default(),
            view_distance: VIEW_DISTANCE_IN_CHUNKS,
            chunks: Vec::new(),
            index: FxHashMap::default(),
            active: FxHashSet::default(),
            last_viewer_coord: None,
            spawn: Vec3::ZERO,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        let generator = VoxelGenerator::new(config.seed, config.biome.clone());
        World {
            generator,
            catalog: config.catalog.clone(),
            atlas: TextureAtlas::new(config.atlas_size_in_blocks),
            view_distance: config.view_distance,
            chunks: Vec::new(),
            index: FxHashMap::default(),
            active: FxHashSet::default(),
            last_viewer_coord: None,
            spawn: Vec3::ZERO,
        }
    }

    pub fn generator(&self) -> &VoxelGenerator {
        &self.generator
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    pub fn atlas(&self) -> TextureAtlas {
        self.atlas
    }

    pub fn view_distance(&self) -> i32 {
        self.view_distance
    }

    /// Eagerly materializes the startup window around the world center and
    /// places the spawn point above it.
    pub fn generate_initial_world(&mut self) {
        let center = WORLD_SIZE_IN_CHUNKS / 2;
        for x in (center - self.view_distance)..(center + self.view_distance) {
            for z in (center - self.view_distance)..(center + self.view_distance) {
                let coord = ChunkCoord::new(x, z);
                if is_chunk_in_world(coord) {
                    self.create_chunk(coord);
                }
            }
        }

        self.spawn = Vec3::new(
            (WORLD_SIZE_IN_VOXELS / 2) as f32,
            (CHUNK_HEIGHT + 2) as f32,
            (WORLD_SIZE_IN_VOXELS / 2) as f32,
        );
        self.last_viewer_coord = Some(ChunkCoord::from_world_pos(self.spawn));

        tracing::info!(
            chunks = self.chunks.len(),
            triangles = self.triangle_count(),
            "initial world generated"
        );
    }

    /// Per-tick entry point. Work only happens when the viewer crosses a
    /// chunk boundary; calling this every frame with an unchanged chunk
    /// coordinate is a no-op.
    pub fn on_viewer_moved(&mut self, pos: Vec3) {
        let coord = ChunkCoord::from_world_pos(pos);
        if self.last_viewer_coord == Some(coord) {
            return;
        }
        self.last_viewer_coord = Some(coord);
        self.refresh_window(coord, true);
    }

    /// Asynchronous variant of `on_viewer_moved`: activates and
    /// deactivates loaded chunks immediately but returns the Unloaded
    /// coordinates in the window instead of generating them, so they can
    /// be handed to a `ChunkLoader`.
    pub fn stream_viewer_moved(&mut self, pos: Vec3) -> Vec<ChunkCoord> {
        let coord = ChunkCoord::from_world_pos(pos);
        if self.last_viewer_coord == Some(coord) {
            return Vec::new();
        }
        self.last_viewer_coord = Some(coord);
        self.refresh_window(coord, false)
    }

    /// Recomputes the required window around `center`. Returns the
    /// coordinates that are still Unloaded (empty when `create_missing`).
    fn refresh_window(&mut self, center: ChunkCoord, create_missing: bool) -> Vec<ChunkCoord> {
        let mut leftover: FxHashSet<ChunkCoord> = self.active.clone();
        let mut missing = Vec::new();

        for x in (center.x - self.view_distance)..(center.x + self.view_distance) {
            for z in (center.z - self.view_distance)..(center.z + self.view_distance) {
                let coord = ChunkCoord::new(x, z);
                if !is_chunk_in_world(coord) {
                    continue;
                }
                leftover.remove(&coord);

                match self.index.get(&coord).copied() {
                    None => {
                        if create_missing {
                            self.create_chunk(coord);
                        } else {
                            missing.push(coord);
                        }
                    }
                    Some(slot) => {
                        if !self.chunks[slot].is_active {
                            self.chunks[slot].is_active = true;
                            self.active.insert(coord);
                            tracing::debug!(?coord, "chunk reactivated");
                        }
                    }
                }
            }
        }

        for coord in leftover {
            if let Some(&slot) = self.index.get(&coord) {
                self.chunks[slot].is_active = false;
            }
            self.active.remove(&coord);
            tracing::debug!(?coord, "chunk deactivated");
        }

        missing
    }

    /// Generates, meshes and activates the chunk at `coord`. The grid is
    /// fully populated before the mesh is built and before the chunk
    /// becomes Active.
    fn create_chunk(&mut self, coord: ChunkCoord) {
        let chunk = generate_chunk(coord, &self.generator, &self.catalog, self.atlas);
        self.insert_chunk(chunk);
    }

    /// Adopts a chunk produced elsewhere (the background loader). The
    /// result is discarded when its coordinate already exists or has left
    /// the required window since the request was made.
    pub fn install_chunk(&mut self, chunk: Chunk) {
        let coord = chunk.coord;
        if self.index.contains_key(&coord) {
            return;
        }
        if !self.is_in_window(coord) {
            tracing::debug!(?coord, "discarding chunk that left the view window");
            return;
        }
        self.insert_chunk(chunk);
    }

    fn insert_chunk(&mut self, mut chunk: Chunk) {
        let coord = chunk.coord;
        chunk.is_active = true;
        self.index.insert(coord, self.chunks.len());
        self.chunks.push(chunk);
        self.active.insert(coord);
        tracing::debug!(?coord, "chunk created");
    }

    /// Whether `coord` lies in the window around the last viewer position.
    pub fn is_in_window(&self, coord: ChunkCoord) -> bool {
        let Some(center) = self.last_viewer_coord else {
            return false;
        };
        is_chunk_in_world(coord)
            && coord.x >= center.x - self.view_distance
            && coord.x < center.x + self.view_distance
            && coord.z >= center.z - self.view_distance
            && coord.z < center.z + self.view_distance
    }

    pub fn chunk_state(&self, coord: ChunkCoord) -> ChunkState {
        match self.index.get(&coord) {
            None => ChunkState::Unloaded,
            Some(&slot) if self.chunks[slot].is_active => ChunkState::Active,
            Some(_) => ChunkState::Inactive,
        }
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.index.get(&coord).map(|&slot| &self.chunks[slot])
    }

    pub fn active_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| c.is_active)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.chunks.iter().map(|c| c.mesh.triangle_count()).sum()
    }

    /// Block id at a world position, resolved against the generator. This
    /// is the neighbor-lookup capability handed to the mesher; it returns
    /// air outside world bounds by contract.
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> u8 {
        self.generator.get_voxel(x, y, z)
    }
}

/// Populates and meshes one chunk. Free function so the background loader
/// can run it on worker threads with its own generator clone.
pub fn generate_chunk(
    coord: ChunkCoord,
    generator: &VoxelGenerator,
    catalog: &BlockCatalog,
    atlas: TextureAtlas,
) -> Chunk {
    let mut chunk = Chunk::generate(coord, |x, y, z| generator.get_voxel(x, y, z));
    chunk.mesh = build_chunk_mesh(&chunk, catalog, &atlas, |x, y, z| {
        generator.get_voxel(x, y, z)
    });
    chunk
}

/// Chunks on or beyond the world border are never materialized. The
/// one-chunk margin guarantees neighbor lookups during meshing stay inside
/// the world volume.
pub fn is_chunk_in_world(coord: ChunkCoord) -> bool {
    coord.x > 0
        && coord.x < WORLD_SIZE_IN_CHUNKS - 1
        && coord.z > 0
        && coord.z < WORLD_SIZE_IN_CHUNKS - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::biome::BiomeAttributes;

    // Low flat terrain with no lodes keeps whole-window tests fast.
    fn flat_biome() -> BiomeAttributes {
        BiomeAttributes {
            name: "Flat".to_string(),
            solid_ground_height: 5,
            terrain_height: 4,
            terrain_scale: 0.2,
            lodes: Vec::new(),
        }
    }

    fn test_world(view_distance: i32) -> World {
        let config = WorldConfig {
            seed: 42,
            view_distance,
            biome: flat_biome(),
            ..WorldConfig::default()
        };
        World::from_config(&config)
    }

    fn world_pos(coord: ChunkCoord) -> Vec3 {
        Vec3::new(
            (coord.x * CHUNK_WIDTH) as f32 + 0.5,
            60.0,
            (coord.z * CHUNK_WIDTH) as f32 + 0.5,
        )
    }

    #[test]
    fn border_coords_are_never_materialized() {
        assert!(!is_chunk_in_world(ChunkCoord::new(0, 10)));
        assert!(!is_chunk_in_world(ChunkCoord::new(10, 0)));
        assert!(!is_chunk_in_world(ChunkCoord::new(WORLD_SIZE_IN_CHUNKS - 1, 10)));
        assert!(is_chunk_in_world(ChunkCoord::new(1, 1)));

        let mut world = test_world(2);
        world.on_viewer_moved(world_pos(ChunkCoord::new(1, 1)));
        assert_eq!(world.chunk_state(ChunkCoord::new(0, 1)), ChunkState::Unloaded);
        assert_eq!(world.chunk_state(ChunkCoord::new(1, 1)), ChunkState::Active);
    }

    #[test]
    fn window_matches_view_distance() {
        let mut world = test_world(5);
        world.on_viewer_moved(world_pos(ChunkCoord::new(10, 10)));

        for x in 5..15 {
            for z in 5..15 {
                assert_eq!(
                    world.chunk_state(ChunkCoord::new(x, z)),
                    ChunkState::Active,
                    "({x},{z}) should be active"
                );
            }
        }
        assert_eq!(world.chunk_state(ChunkCoord::new(15, 10)), ChunkState::Unloaded);
        assert_eq!(world.chunk_state(ChunkCoord::new(4, 10)), ChunkState::Unloaded);
        assert_eq!(world.active_count(), 100);
    }

    #[test]
    fn viewer_movement_within_chunk_is_a_noop() {
        let mut world = test_world(2);
        let base = world_pos(ChunkCoord::new(10, 10));
        world.on_viewer_moved(base);
        let created = world.chunk_count();
        let active = world.active_count();

        world.on_viewer_moved(base + Vec3::new(3.0, 0.0, 7.0));
        assert_eq!(world.chunk_count(), created);
        assert_eq!(world.active_count(), active);
    }

    #[test]
    fn leaving_window_deactivates_but_keeps_chunks() {
        let mut world = test_world(2);
        world.on_viewer_moved(world_pos(ChunkCoord::new(10, 10)));
        assert_eq!(world.chunk_state(ChunkCoord::new(8, 8)), ChunkState::Active);

        world.on_viewer_moved(world_pos(ChunkCoord::new(20, 20)));
        assert_eq!(world.chunk_state(ChunkCoord::new(8, 8)), ChunkState::Inactive);

        // the grid and mesh survived deactivation
        let chunk = world.chunk(ChunkCoord::new(8, 8)).unwrap();
        assert!(!chunk.mesh.vertices.is_empty());

        // re-entering reactivates without regeneration
        let count = world.chunk_count();
        world.on_viewer_moved(world_pos(ChunkCoord::new(10, 10)));
        assert_eq!(world.chunk_state(ChunkCoord::new(8, 8)), ChunkState::Active);
        assert_eq!(world.chunk_count(), count);
    }

    #[test]
    fn initial_world_centers_spawn() {
        let mut world = test_world(2);
        world.generate_initial_world();
        assert_eq!(world.chunk_count(), 16);
        assert_eq!(world.spawn.y, (CHUNK_HEIGHT + 2) as f32);
        let spawn_coord = ChunkCoord::from_world_pos(world.spawn);
        assert_eq!(spawn_coord, ChunkCoord::new(WORLD_SIZE_IN_CHUNKS / 2, WORLD_SIZE_IN_CHUNKS / 2));
    }

    #[test]
    fn stream_variant_reports_missing_instead_of_creating() {
        let mut world = test_world(2);
        let missing = world.stream_viewer_moved(world_pos(ChunkCoord::new(10, 10)));
        assert_eq!(missing.len(), 16);
        assert_eq!(world.chunk_count(), 0);
        assert!(missing.iter().all(|&c| world.is_in_window(c)));
    }

    #[test]
    fn install_discards_chunks_outside_window() {
        let mut world = test_world(2);
        world.stream_viewer_moved(world_pos(ChunkCoord::new(10, 10)));

        let far = generate_chunk(
            ChunkCoord::new(40, 40),
            world.generator(),
            world.catalog(),
            world.atlas(),
        );
        world.install_chunk(far);
        assert_eq!(world.chunk_state(ChunkCoord::new(40, 40)), ChunkState::Unloaded);

        let near = generate_chunk(
            ChunkCoord::new(9, 9),
            world.generator(),
            world.catalog(),
            world.atlas(),
        );
        world.install_chunk(near);
        assert_eq!(world.chunk_state(ChunkCoord::new(9, 9)), ChunkState::Active);
    }

    #[test]
    fn world_voxel_lookup_matches_generator() {
        let world = test_world(2);
        let reference = VoxelGenerator::new(42, flat_biome());
        for y in [0, 30, 60, 120] {
            assert_eq!(world.get_voxel(200, y, 200), reference.get_voxel(200, y, 200));
        }
    }
}
