//! Tileable fractal noise field used by the mist mask.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::debug;

/// Number of octaves summed per cell.
pub const OCTAVES: u32 = 8;

/// Square grid of grayscale intensities with wraparound addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseField {
    size: usize,
    seed: u64,
    texels: Vec<u8>,
}

impl NoiseField {
    /// Synthesize a full field in one go.
    pub fn generate(size: usize, seed: u64) -> Self {
        let mut synthesis = NoiseSynthesis::new(size, seed);
        while !synthesis.is_done() {
            synthesis.step(size);
        }
        synthesis.finish()
    }

    /// Edge length in texels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Seed the field was generated with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw texel bytes, row-major.
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Intensity at integer coordinates, wrapping on both axes.
    pub fn texel(&self, x: i64, y: i64) -> f32 {
        self.texel_byte(x, y) as f32 / 255.0
    }

    /// Byte at integer coordinates, wrapping on both axes.
    pub fn texel_byte(&self, x: i64, y: i64) -> u8 {
        let n = self.size as i64;
        let x = x.rem_euclid(n) as usize;
        let y = y.rem_euclid(n) as usize;
        self.texels[y * self.size + x]
    }

    /// Bilinearly filtered sample at normalized coordinates with repeat wrapping.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let n = self.size as f32;
        // Texel centers sit at half-integer positions.
        let x = u * n - 0.5;
        let y = v * n - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let a = self.texel(x0, y0);
        let b = self.texel(x0 + 1, y0);
        let c = self.texel(x0, y0 + 1);
        let d = self.texel(x0 + 1, y0 + 1);

        let top = a + (b - a) * fx;
        let bottom = c + (d - c) * fx;
        top + (bottom - top) * fy
    }
}

/// Incremental synthesis of a [`NoiseField`], one band of rows at a time.
///
/// Rows are produced in order and the jitter generator is consumed in the
/// same order, so the result is the same whatever band size is used.
#[derive(Debug)]
pub struct NoiseSynthesis {
    size: usize,
    seed: u64,
    next_row: usize,
    texels: Vec<u8>,
    rng: Pcg64Mcg,
}

impl NoiseSynthesis {
    /// Begin synthesizing a `size`×`size` field. A zero size is bumped to 1.
    pub fn new(size: usize, seed: u64) -> Self {
        let size = size.max(1);
        if !size.is_power_of_two() {
            debug!(size, "noise size is not a power of two");
        }
        Self {
            size,
            seed,
            next_row: 0,
            texels: Vec::with_capacity(size * size),
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Fraction of rows completed.
    pub fn progress(&self) -> f32 {
        self.next_row as f32 / self.size as f32
    }

    pub fn is_done(&self) -> bool {
        self.next_row >= self.size
    }

    /// Synthesize up to `rows` more rows.
    pub fn step(&mut self, rows: usize) {
        let end = (self.next_row + rows.max(1)).min(self.size);
        for y in self.next_row..end {
            for x in 0..self.size {
                let value = cell_value(x, y, self.size, &mut self.rng);
                self.texels.push(quantize(value));
            }
        }
        self.next_row = end;
    }

    /// Finish any remaining rows and hand over the field.
    pub fn finish(mut self) -> NoiseField {
        if !self.is_done() {
            let remaining = self.size - self.next_row;
            self.step(remaining);
        }
        debug!(size = self.size, seed = self.seed, "noise field synthesized");
        NoiseField {
            size: self.size,
            seed: self.seed,
            texels: self.texels,
        }
    }
}

/// Final intensity of one cell before quantization.
fn cell_value(x: usize, y: usize, size: usize, rng: &mut Pcg64Mcg) -> f32 {
    let n = size as f32;
    let mut sum = 0.0;
    let mut total_amplitude = 0.0;

    for octave in 0..OCTAVES {
        let period = 1u32 << octave;
        let frequency = period as f32 / n;
        let amplitude = 0.5f32.powi(octave as i32);
        let salt = octave as f32 * 17.31 + 1.0;
        sum += value_noise(x as f32 * frequency, y as f32 * frequency, period, salt) * amplitude;
        total_amplitude += amplitude;
    }

    let mut value = (sum / total_amplitude) * 0.5 + 0.5;

    // Denser toward the ground.
    let vertical_gradient = (y as f32 / n).powf(1.2);
    value = value.max(vertical_gradient * 0.8);

    // Fray the cloud boundary.
    if value > 0.3 && value < 0.7 {
        value += rng.random_range(-0.15..=0.15);
    }

    value.clamp(0.0, 1.0)
}

fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Sinusoidal lattice hash in `[-1, 1]`.
///
/// Cheap and intentionally non-uniform; only coherence matters here.
fn lattice(ix: i64, iy: i64, salt: f32) -> f32 {
    let h = ((ix as f32 + salt) * 12.9898 + (iy as f32 + salt) * 78.233).sin() * 43758.5453;
    h.fract().abs() * 2.0 - 1.0
}

/// Smoothed value noise whose lattice repeats every `period` units.
///
/// `salt` decorrelates the lattices of different octaves.
fn value_noise(x: f32, y: f32, period: u32, salt: f32) -> f32 {
    let period = period.max(1) as i64;
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let ux = fx * fx * (3.0 - 2.0 * fx);
    let uy = fy * fy * (3.0 - 2.0 * fy);

    let ix = x0 as i64;
    let iy = y0 as i64;
    let wrap = |v: i64| v.rem_euclid(period);

    let a = lattice(wrap(ix), wrap(iy), salt);
    let b = lattice(wrap(ix + 1), wrap(iy), salt);
    let c = lattice(wrap(ix), wrap(iy + 1), salt);
    let d = lattice(wrap(ix + 1), wrap(iy + 1), salt);

    let top = a + (b - a) * ux;
    let bottom = c + (d - c) * ux;
    top + (bottom - top) * uy
}
