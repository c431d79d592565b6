//! Fixed-capacity particle pool stored as parallel attribute arrays

use crate::DEAD_POSITION;

/// Structure-of-arrays particle storage.
///
/// Slot `i` owns `positions[3i..3i+3]`, `velocities[3i..3i+3]` and element `i`
/// of every scalar array. A slot is alive iff `age < lifetime`; dead slots are
/// parked at [`DEAD_POSITION`] with zero size and alpha so they draw nothing.
/// Nothing is allocated after construction.
pub struct ParticlePool {
    pub(crate) positions: Vec<f32>,
    pub(crate) velocities: Vec<f32>,
    pub(crate) ages: Vec<f32>,
    pub(crate) lifetimes: Vec<f32>,
    pub(crate) sizes: Vec<f32>,
    pub(crate) alphas: Vec<f32>,
}

impl ParticlePool {
    /// Create a pool with every slot dead
    pub fn new(capacity: usize) -> Self {
        let mut positions = Vec::with_capacity(capacity * 3);
        for _ in 0..capacity {
            positions.extend_from_slice(&DEAD_POSITION);
        }
        Self {
            positions,
            velocities: vec![0.0; capacity * 3],
            ages: vec![0.0; capacity],
            lifetimes: vec![0.0; capacity],
            sizes: vec![0.0; capacity],
            alphas: vec![0.0; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.ages.len()
    }

    pub fn is_alive(&self, i: usize) -> bool {
        self.ages[i] < self.lifetimes[i]
    }

    /// Number of alive slots (linear scan)
    pub fn alive_count(&self) -> usize {
        (0..self.capacity()).filter(|&i| self.is_alive(i)).count()
    }

    /// Pin a slot to the dead state. Age is left untouched.
    pub(crate) fn retire(&mut self, i: usize) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&DEAD_POSITION);
        self.sizes[i] = 0.0;
        self.alphas[i] = 0.0;
    }

    pub fn position(&self, i: usize) -> [f32; 3] {
        [
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        ]
    }

    pub fn velocity(&self, i: usize) -> [f32; 3] {
        [
            self.velocities[i * 3],
            self.velocities[i * 3 + 1],
            self.velocities[i * 3 + 2],
        ]
    }

    pub fn age(&self, i: usize) -> f32 {
        self.ages[i]
    }

    pub fn lifetime(&self, i: usize) -> f32 {
        self.lifetimes[i]
    }

    pub fn size(&self, i: usize) -> f32 {
        self.sizes[i]
    }

    pub fn alpha(&self, i: usize) -> f32 {
        self.alphas[i]
    }

    /// Flat xyz positions, three floats per slot
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn alphas(&self) -> &[f32] {
        &self.alphas
    }

    /// Place a live particle directly, bypassing the spawner
    #[cfg(test)]
    pub(crate) fn place(
        &mut self,
        i: usize,
        position: [f32; 3],
        velocity: [f32; 3],
        lifetime: f32,
        size: f32,
    ) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&position);
        self.velocities[i * 3..i * 3 + 3].copy_from_slice(&velocity);
        self.ages[i] = 0.0;
        self.lifetimes[i] = lifetime;
        self.sizes[i] = size;
        self.alphas[i] = 1.0;
    }
}
