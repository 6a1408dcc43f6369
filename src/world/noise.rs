//! Deterministic noise sampling for terrain and lode placement.
//!
//! All sampling is a pure function of (seed, coordinates, offset, scale),
//! so a world can be regenerated from its seed alone and chunks can be
//! meshed without their neighbors existing.

use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::constants::CHUNK_WIDTH;

/// Seeded 2D/3D noise field. The seed is threaded through an explicit
/// instance, never through process-wide random state.
pub struct NoiseField {
    noise: FastNoiseLite,
    pub seed: i32,
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        // Coordinates are pre-scaled at the call sites below.
        noise.set_frequency(Some(1.0));
        NoiseField { noise, seed }
    }

    /// Raw 2D sample mapped from [-1, 1] into [0, 1).
    fn sample_raw(&self, x: f32, y: f32) -> f32 {
        let n = self.noise.get_noise_2d(x, y);
        (n * 0.5 + 0.5).clamp(0.0, 1.0 - f32::EPSILON)
    }

    /// Height-field sample in [0, 1). The small epsilon keeps integer
    /// inputs off the noise lattice points.
    pub fn sample_2d(&self, x: f32, z: f32, offset: f32, scale: f32) -> f32 {
        self.sample_raw(
            (x + 0.1) / CHUNK_WIDTH as f32 * scale + offset,
            (z + 0.1) / CHUNK_WIDTH as f32 * scale + offset,
        )
    }

    /// 3D inclusion test used for lode placement. Averages 2D samples over
    /// the three axis pairs (xy, yz, xz); the asymmetric combination biases
    /// vein shapes and is deliberate.
    pub fn sample_3d(&self, x: f32, y: f32, z: f32, offset: f32, scale: f32, threshold: f32) -> bool {
        let sx = (x + offset + 0.1) * scale;
        let sy = (y + offset + 0.1) * scale;
        let sz = (z + offset + 0.1) * scale;

        let xy = self.sample_raw(sx, sy);
        let yz = self.sample_raw(sy, sz);
        let xz = self.sample_raw(sx, sz);

        (xy + yz + xz) / 3.0 > threshold
    }
}

impl Clone for NoiseField {
    fn clone(&self) -> Self {
        NoiseField::new(self.seed)
    }
}
