//! Background chunk generation with worker threads.
//!
//! Chunk creation is O(width^2 * height) noise samples plus meshing, so a
//! host targeting real-time responsiveness moves it off the update thread.
//! Workers receive coordinates over a bounded crossbeam channel, run
//! generation and meshing to completion (the grid is always fully
//! populated before the mesh is built), and hand finished chunks back to
//! be polled on the main step. Whether a finished chunk is still wanted is
//! decided at install time by the world, which discards results that left
//! the view window.

use std::collections::VecDeque;
use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use rustc_hash::FxHashSet;

use crate::constants::ASYNC_WORKER_COUNT;
use crate::core::block::BlockCatalog;
use crate::core::chunk::{Chunk, ChunkCoord};
use crate::render::atlas::TextureAtlas;
use crate::world::generator::VoxelGenerator;
use crate::world::streamer::generate_chunk;

pub struct ChunkLoader {
    request_tx: Sender<ChunkCoord>,
    result_rx: Receiver<Chunk>,
    pending: FxHashSet<ChunkCoord>,
    // Accepted coordinates that did not fit the request channel yet.
    backlog: VecDeque<ChunkCoord>,
    worker_count: usize,
}

impl ChunkLoader {
    pub fn new(generator: VoxelGenerator, catalog: BlockCatalog, atlas: TextureAtlas) -> Self {
        Self::with_worker_count(ASYNC_WORKER_COUNT, generator, catalog, atlas)
    }

    pub fn with_worker_count(
        num_workers: usize,
        generator: VoxelGenerator,
        catalog: BlockCatalog,
        atlas: TextureAtlas,
    ) -> Self {
        let num_workers = if num_workers == 0 {
            tracing::warn!("chunk loader needs at least one worker, using 1");
            1
        } else {
            num_workers
        };

        // Bounded channels keep memory use flat when the viewer outruns
        // the workers.
        let (request_tx, request_rx) = bounded::<ChunkCoord>(256);
        let (result_tx, result_rx) = bounded::<Chunk>(64);

        for worker_id in 0..num_workers {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            let generator = generator.clone();
            let catalog = catalog.clone();

            thread::Builder::new()
                .name(format!("chunk-gen-{worker_id}"))
                .spawn(move || {
                    while let Ok(coord) = rx.recv() {
                        let chunk = generate_chunk(coord, &generator, &catalog, atlas);
                        if tx.send(chunk).is_err() {
                            // main thread dropped the loader
                            break;
                        }
                    }
                })
                .expect("failed to spawn chunk generation worker");
        }

        ChunkLoader {
            request_tx,
            result_rx,
            pending: FxHashSet::default(),
            backlog: VecDeque::new(),
            worker_count: num_workers,
        }
    }

    /// Queues a coordinate for generation. Duplicate requests for a
    /// coordinate already in flight are dropped. Coordinates that do not
    /// fit the bounded request channel are kept in a backlog and handed to
    /// the workers as polling frees queue space; nothing is lost.
    pub fn request(&mut self, coord: ChunkCoord) {
        if !self.pending.insert(coord) {
            return;
        }
        // Backlogged coordinates go first, so a new request behind them
        // joins the backlog instead of overtaking.
        if !self.backlog.is_empty() || self.request_tx.try_send(coord).is_err() {
            tracing::debug!(?coord, "request queue full, backlogged");
            self.backlog.push_back(coord);
        }
    }

    fn flush_backlog(&mut self) {
        while let Some(&coord) = self.backlog.front() {
            if self.request_tx.try_send(coord).is_err() {
                break;
            }
            self.backlog.pop_front();
        }
    }

    pub fn request_all(&mut self, coords: &[ChunkCoord]) {
        for &coord in coords {
            self.request(coord);
        }
    }

    pub fn is_pending(&self, coord: ChunkCoord) -> bool {
        self.pending.contains(&coord)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drains up to `max_results` finished chunks without blocking, then
    /// refills the request channel from the backlog.
    pub fn poll_results(&mut self, max_results: usize) -> Vec<Chunk> {
        let mut results = Vec::new();
        for _ in 0..max_results {
            match self.result_rx.try_recv() {
                Ok(chunk) => {
                    self.pending.remove(&chunk.coord);
                    results.push(chunk);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.flush_backlog();
        results
    }

    pub fn poll_all_results(&mut self) -> Vec<Chunk> {
        self.poll_results(64)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::core::biome::BiomeAttributes;

    fn loader() -> ChunkLoader {
        ChunkLoader::with_worker_count(
            2,
            VoxelGenerator::new(42, BiomeAttributes::default()),
            BlockCatalog::default(),
            TextureAtlas::default(),
        )
    }

    fn wait_for_results(loader: &mut ChunkLoader, count: usize) -> Vec<Chunk> {
        let deadline = Instant::now() + Duration::from_secs(30);
        let mut chunks = Vec::new();
        while chunks.len() < count {
            chunks.extend(loader.poll_all_results());
            if Instant::now() > deadline {
                panic!("timed out waiting for {count} chunks");
            }
            thread::sleep(Duration::from_millis(5));
        }
        chunks
    }

    #[test]
    fn background_chunks_match_synchronous_generation() {
        let mut loader = loader();
        let coord = ChunkCoord::new(12, 9);
        loader.request(coord);

        let chunks = wait_for_results(&mut loader, 1);
        assert_eq!(chunks[0].coord, coord);

        let reference = generate_chunk(
            coord,
            &VoxelGenerator::new(42, BiomeAttributes::default()),
            &BlockCatalog::default(),
            TextureAtlas::default(),
        );
        assert_eq!(chunks[0].voxels(), reference.voxels());
        assert_eq!(chunks[0].mesh.vertices, reference.mesh.vertices);
        assert_eq!(chunks[0].mesh.indices, reference.mesh.indices);
    }

    #[test]
    fn duplicate_requests_are_deduped() {
        let mut loader = loader();
        let coord = ChunkCoord::new(5, 5);
        loader.request(coord);
        loader.request(coord);
        assert_eq!(loader.pending_count(), 1);

        let chunks = wait_for_results(&mut loader, 1);
        assert_eq!(chunks.len(), 1);
        assert_eq!(loader.pending_count(), 0);
        assert!(!loader.is_pending(coord));
    }

    fn flat_biome() -> BiomeAttributes {
        BiomeAttributes {
            solid_ground_height: 5,
            terrain_height: 4,
            terrain_scale: 0.2,
            lodes: Vec::new(),
            ..BiomeAttributes::default()
        }
    }

    #[test]
    fn zero_worker_count_is_clamped_to_one() {
        let mut loader = ChunkLoader::with_worker_count(
            0,
            VoxelGenerator::new(42, flat_biome()),
            BlockCatalog::default(),
            TextureAtlas::default(),
        );
        assert_eq!(loader.worker_count(), 1);

        let coord = ChunkCoord::new(7, 3);
        loader.request(coord);
        assert_eq!(loader.pending_count(), 1);

        let chunks = wait_for_results(&mut loader, 1);
        assert_eq!(chunks[0].coord, coord);
        assert_eq!(loader.pending_count(), 0);
    }

    #[test]
    fn burst_larger_than_request_queue_loses_nothing() {
        let mut loader = ChunkLoader::with_worker_count(
            4,
            VoxelGenerator::new(42, flat_biome()),
            BlockCatalog::default(),
            TextureAtlas::default(),
        );

        // 300 coordinates against a 256-slot request channel: the overflow
        // must survive in the backlog until polling drains it.
        let coords: Vec<ChunkCoord> = (0..20)
            .flat_map(|x| (0..15).map(move |z| ChunkCoord::new(x, z)))
            .collect();
        assert_eq!(coords.len(), 300);
        loader.request_all(&coords);
        assert_eq!(loader.pending_count(), 300);

        let chunks = wait_for_results(&mut loader, 300);
        assert_eq!(chunks.len(), 300);
        assert_eq!(loader.pending_count(), 0);

        let mut got: Vec<ChunkCoord> = chunks.iter().map(|c| c.coord).collect();
        got.sort_by_key(|c| (c.x, c.z));
        let mut expected = coords;
        expected.sort_by_key(|c| (c.x, c.z));
        assert_eq!(got, expected);
    }

    #[test]
    fn request_all_queues_every_coordinate() {
        let mut loader = loader();
        let coords = [
            ChunkCoord::new(3, 3),
            ChunkCoord::new(3, 4),
            ChunkCoord::new(4, 3),
        ];
        loader.request_all(&coords);
        assert_eq!(loader.pending_count(), 3);

        let mut chunks = wait_for_results(&mut loader, 3);
        chunks.sort_by_key(|c| (c.coord.x, c.coord.z));
        let got: Vec<ChunkCoord> = chunks.iter().map(|c| c.coord).collect();
        assert_eq!(got, coords);
    }
}
