//! Height-field wave grid integrated with an explicit finite-difference scheme.
//!
//! Heights evolve under the damped 2D wave equation using a leapfrog update
//! that needs the current and previous height buffers. A third buffer is
//! scratch for the tick in progress; the three are rotated by swapping the
//! owned `Vec`s so a tick never copies the whole field.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::error::{Result, WaveError};
use crate::params::WaveParams;

/// Leapfrog update coefficients derived once from the physical parameters
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coefficients {
    /// Weight of the previous height
    k1: f32,
    /// Weight of the current height
    k2: f32,
    /// Weight of the sum of the four axis-neighbours
    k3: f32,
}

impl Coefficients {
    fn new(params: &WaveParams) -> Self {
        let damped_dt = params.damping * params.time_step_s;
        let denom = damped_dt + 2.0;
        let courant_squared = params.courant_squared();

        Self {
            k1: (damped_dt - 2.0) / denom,
            k2: (2.0 - 4.0 * courant_squared) / denom,
            k3: (2.0 * courant_squared) / denom,
        }
    }
}

/// Dynamic height field with fixed topology
pub struct WaveGrid {
    rows: usize,
    cols: usize,
    spatial_step: f32,
    time_step: f32,
    courant_squared: f32,
    coeffs: Coefficients,

    previous: Vec<f32>,
    current: Vec<f32>,
    /// Scratch for the tick in progress
    next: Vec<f32>,

    /// Fixed world-space (x, z) of every sample
    layout: Vec<Vec2>,
    normals: Vec<Vec3>,
    tangents_x: Vec<Vec3>,
    tangents_z: Vec<Vec3>,

    /// Real time not yet consumed by a tick (seconds, never negative)
    accumulator: f32,
    ticks: u64,
}

impl WaveGrid {
    /// Create a flat, resting grid
    ///
    /// Fails with [`WaveError::Configuration`] if the parameters are out of
    /// range or the squared Courant number exceeds the stability bound.
    pub fn new(params: &WaveParams) -> Result<Self> {
        params.validate().map_err(WaveError::Configuration)?;

        let rows = params.rows;
        let cols = params.cols;
        let dx = params.spatial_step_m;
        let count = rows * cols;

        // Centered on the origin, row 0 at +Z so the grid reads top-down
        let half_width = (cols - 1) as f32 * dx * 0.5;
        let half_depth = (rows - 1) as f32 * dx * 0.5;
        let layout = (0..rows)
            .flat_map(|i| {
                (0..cols).map(move |j| {
                    Vec2::new(-half_width + j as f32 * dx, half_depth - i as f32 * dx)
                })
            })
            .collect();

        let coeffs = Coefficients::new(params);
        log::debug!(
            "Wave grid {}x{}: c^2 = {:.5}, k1 = {:.5}, k2 = {:.5}, k3 = {:.5}",
            rows,
            cols,
            params.courant_squared(),
            coeffs.k1,
            coeffs.k2,
            coeffs.k3
        );

        Ok(Self {
            rows,
            cols,
            spatial_step: dx,
            time_step: params.time_step_s,
            courant_squared: params.courant_squared(),
            coeffs,
            previous: vec![0.0; count],
            current: vec![0.0; count],
            next: vec![0.0; count],
            layout,
            normals: vec![Vec3::Y; count],
            tangents_x: vec![Vec3::X; count],
            tangents_z: vec![Vec3::Z; count],
            accumulator: 0.0,
            ticks: 0,
        })
    }

    /// Advance simulated time by `elapsed_s` seconds
    ///
    /// Runs one fixed-length tick for every whole `time_step` accumulated;
    /// the leftover fraction carries into the next call. Negative or
    /// non-finite input is ignored.
    ///
    /// # Returns
    /// Number of ticks performed
    pub fn advance(&mut self, elapsed_s: f32) -> u32 {
        if !elapsed_s.is_finite() || elapsed_s <= 0.0 {
            return 0;
        }

        self.accumulator += elapsed_s;

        let mut performed = 0;
        while self.accumulator >= self.time_step {
            self.tick();
            self.accumulator -= self.time_step;
            performed += 1;
        }
        performed
    }

    /// Add an instantaneous diamond-shaped impulse centred on `(row, col)`
    ///
    /// The centre receives `magnitude / 2` and each axis-neighbour
    /// `magnitude / 4`. Only the current heights change; the impulse starts
    /// propagating on the next tick and normals stay stale until then.
    ///
    /// Sites on the boundary ring are rejected with
    /// [`WaveError::OutOfRange`], and a NaN or infinite magnitude with
    /// [`WaveError::InvalidMagnitude`]. Either way the grid is untouched.
    pub fn disturb(&mut self, row: usize, col: usize, magnitude: f32) -> Result<()> {
        if !magnitude.is_finite() {
            return Err(WaveError::InvalidMagnitude(magnitude));
        }
        if !self.is_interior(row, col) {
            return Err(WaveError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let half_mag = 0.5 * magnitude;
        let quarter_mag = 0.25 * magnitude;
        let k = self.index(row, col);
        let cols = self.cols;

        self.current[k] += half_mag;
        self.current[k - cols] += quarter_mag;
        self.current[k + cols] += quarter_mag;
        self.current[k - 1] += quarter_mag;
        self.current[k + 1] += quarter_mag;
        Ok(())
    }

    /// One discrete simulation step of length `time_step`
    fn tick(&mut self) {
        let rows = self.rows;
        let cols = self.cols;
        let Coefficients { k1, k2, k3 } = self.coeffs;
        let previous = &self.previous;
        let current = &self.current;

        self.next
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, next_row)| {
                let row_start = i * cols;
                let current_row = &current[row_start..row_start + cols];

                // Edges are clamped: carry their height through unchanged
                if i == 0 || i == rows - 1 || cols < 3 {
                    next_row.copy_from_slice(current_row);
                    return;
                }
                next_row[0] = current_row[0];
                next_row[cols - 1] = current_row[cols - 1];

                for j in 1..cols - 1 {
                    let k = row_start + j;
                    next_row[j] = k1 * previous[k]
                        + k2 * current[k]
                        + k3 * (current[k + cols] + current[k - cols] + current[k + 1] + current[k - 1]);
                }
            });

        // previous <- current, current <- next, scratch <- old previous
        std::mem::swap(&mut self.previous, &mut self.current);
        std::mem::swap(&mut self.current, &mut self.next);

        self.update_normals();
        self.ticks += 1;
    }

    /// Recompute interior normals and tangents from central differences
    ///
    /// Boundary samples keep the flat-surface frame they were built with.
    fn update_normals(&mut self) {
        let rows = self.rows;
        let cols = self.cols;
        let two_dx = 2.0 * self.spatial_step;
        let heights = &self.current;

        self.normals
            .par_chunks_mut(cols)
            .zip(self.tangents_x.par_chunks_mut(cols))
            .zip(self.tangents_z.par_chunks_mut(cols))
            .enumerate()
            .filter(|(i, _)| *i > 0 && *i < rows - 1)
            .for_each(|(i, ((normal_row, tangent_x_row), tangent_z_row))| {
                for j in 1..cols.saturating_sub(1) {
                    let k = i * cols + j;
                    let left = heights[k - 1];
                    let right = heights[k + 1];
                    // Row i - 1 lies towards +Z
                    let towards_pos_z = heights[k - cols];
                    let towards_neg_z = heights[k + cols];

                    let tangent_x = Vec3::new(two_dx, right - left, 0.0);
                    let tangent_z = Vec3::new(0.0, towards_pos_z - towards_neg_z, two_dx);

                    normal_row[j] = tangent_z.cross(tangent_x).normalize();
                    tangent_x_row[j] = tangent_x.normalize();
                    tangent_z_row[j] = tangent_z.normalize();
                }
            });
    }

    /// True when `(row, col)` has all four axis-neighbours inside the grid
    pub fn is_interior(&self, row: usize, col: usize) -> bool {
        row >= 1 && col >= 1 && row + 1 < self.rows && col + 1 < self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn vertex_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn triangle_count(&self) -> usize {
        (self.rows - 1) * (self.cols - 1) * 2
    }

    /// World-space extent along X (meters)
    pub fn width(&self) -> f32 {
        (self.cols - 1) as f32 * self.spatial_step
    }

    /// World-space extent along Z (meters)
    pub fn depth(&self) -> f32 {
        (self.rows - 1) as f32 * self.spatial_step
    }

    pub fn spatial_step(&self) -> f32 {
        self.spatial_step
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    pub fn courant_squared(&self) -> f32 {
        self.courant_squared
    }

    /// Ticks performed since construction
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// World-space position of sample `index` (y is the current height)
    pub fn position(&self, index: usize) -> Vec3 {
        let xz = self.layout[index];
        Vec3::new(xz.x, self.current[index], xz.y)
    }

    /// Surface normal of sample `index` as of the last tick
    pub fn normal(&self, index: usize) -> Vec3 {
        self.normals[index]
    }

    /// Unit tangent along +X of sample `index` as of the last tick
    pub fn tangent_x(&self, index: usize) -> Vec3 {
        self.tangents_x[index]
    }

    /// Unit tangent along +Z of sample `index` as of the last tick
    pub fn tangent_z(&self, index: usize) -> Vec3 {
        self.tangents_z[index]
    }

    pub fn height(&self, row: usize, col: usize) -> f32 {
        self.current[self.index(row, col)]
    }

    pub fn previous_height(&self, row: usize, col: usize) -> f32 {
        self.previous[self.index(row, col)]
    }

    /// Current heights, row-major
    pub fn heights(&self) -> &[f32] {
        &self.current
    }

    /// Heights one tick ago, row-major
    pub fn previous_heights(&self) -> &[f32] {
        &self.previous
    }

    /// `(position, normal)` for every sample in index order
    pub fn samples(&self) -> impl ExactSizeIterator<Item = (Vec3, Vec3)> + '_ {
        (0..self.vertex_count()).map(move |k| (self.position(k), self.normals[k]))
    }

    /// Sum of squared heights
    pub fn energy(&self) -> f32 {
        self.current.iter().map(|h| h * h).sum()
    }

    pub fn max_abs_height(&self) -> f32 {
        self.current.iter().fold(0.0, |acc, h| acc.max(h.abs()))
    }
}
