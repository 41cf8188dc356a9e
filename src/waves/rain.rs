//! Synthetic raindrops: periodic random disturbances of the wave grid.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::grid::WaveGrid;
use crate::params::RainParams;

/// Most drops a single `RainDriver::update` call releases; any further
/// backlog is discarded
pub const MAX_DROPS_PER_UPDATE: usize = 64;

/// A single drop applied to the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    pub row: usize,
    pub col: usize,
    pub magnitude: f32,
}

/// Drives `WaveGrid::disturb` on a fixed real-time interval
pub struct RainDriver {
    params: RainParams,
    rng: StdRng,
    /// Real time since the last drop (seconds)
    since_last_drop_s: f32,
}

impl RainDriver {
    pub fn new(params: RainParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            params,
            rng,
            since_last_drop_s: 0.0,
        }
    }

    pub fn params(&self) -> &RainParams {
        &self.params
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.params.enabled = enabled;
        self.since_last_drop_s = 0.0;
    }

    /// Let `dt_s` seconds of rain fall onto `grid`
    ///
    /// # Returns
    /// The drops applied this call, in order
    pub fn update(&mut self, grid: &mut WaveGrid, dt_s: f32) -> Vec<Raindrop> {
        let mut drops = Vec::new();
        if !self.params.enabled || !dt_s.is_finite() || dt_s <= 0.0 {
            return drops;
        }

        self.since_last_drop_s += dt_s;
        let mut released = 0;
        while self.since_last_drop_s >= self.params.interval_s {
            if released == MAX_DROPS_PER_UPDATE {
                log::warn!(
                    "Rain backlog of {:.3}s dropped after {} drops this update",
                    self.since_last_drop_s,
                    MAX_DROPS_PER_UPDATE
                );
                self.since_last_drop_s = 0.0;
                break;
            }
            released += 1;
            self.since_last_drop_s -= self.params.interval_s;

            let Some(drop) = self.next_drop(grid) else {
                continue;
            };
            match grid.disturb(drop.row, drop.col, drop.magnitude) {
                Ok(()) => {
                    log::debug!(
                        "Raindrop at ({}, {}) magnitude {:.3}",
                        drop.row,
                        drop.col,
                        drop.magnitude
                    );
                    drops.push(drop);
                }
                Err(e) => log::warn!("Raindrop rejected: {}", e),
            }
        }
        drops
    }

    /// Pick a random site and magnitude, or `None` if the grid has no interior
    pub fn next_drop(&mut self, grid: &WaveGrid) -> Option<Raindrop> {
        let rows = site_range(grid.row_count(), self.params.edge_margin)?;
        let cols = site_range(grid.column_count(), self.params.edge_margin)?;

        Some(Raindrop {
            row: self.rng.gen_range(rows),
            col: self.rng.gen_range(cols),
            magnitude: self.rng.gen_range(self.params.magnitude_range_m.clone()),
        })
    }
}

/// Indices along one axis that keep `margin` cells from either edge
///
/// The margin shrinks on small grids but never below one cell, so every
/// returned index has both neighbours inside the grid.
fn site_range(len: usize, margin: usize) -> Option<RangeInclusive<usize>> {
    if len < 3 {
        return None;
    }
    let margin = margin.clamp(1, (len - 1) / 2);
    Some(margin..=len - 1 - margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WaveParams;

    fn grid(rows: usize, cols: usize) -> WaveGrid {
        WaveGrid::new(&WaveParams {
            rows,
            cols,
            ..WaveParams::default()
        })
        .unwrap()
    }

    fn seeded(seed: u64) -> RainParams {
        RainParams {
            seed: Some(seed),
            ..RainParams::default()
        }
    }

    #[test]
    fn test_site_range() {
        assert_eq!(site_range(160, 4), Some(4..=155));
        assert_eq!(site_range(9, 4), Some(4..=4));
        assert_eq!(site_range(5, 4), Some(2..=2));
        assert_eq!(site_range(3, 0), Some(1..=1));
        assert_eq!(site_range(2, 1), None);
    }

    #[test]
    fn test_drops_on_interval() {
        let mut grid = grid(40, 30);
        let mut rain = RainDriver::new(seeded(7));

        assert!(rain.update(&mut grid, 0.1).is_empty());
        assert!(rain.update(&mut grid, 0.1).is_empty());
        assert_eq!(rain.update(&mut grid, 0.1).len(), 1);

        // A long frame releases every drop that came due
        assert_eq!(rain.update(&mut grid, 1.0).len(), 4);
    }

    #[test]
    fn test_drops_stay_inside_margin() {
        let mut grid = grid(40, 30);
        let mut rain = RainDriver::new(seeded(11));

        for _ in 0..500 {
            let drop = rain.next_drop(&grid).unwrap();
            assert!((4..=35).contains(&drop.row));
            assert!((4..=25).contains(&drop.col));
            assert!((0.2..0.5).contains(&drop.magnitude));
        }

        let drops = rain.update(&mut grid, 10.0);
        assert_eq!(drops.len(), 40);
        assert!(grid.max_abs_height() > 0.0);
    }

    #[test]
    fn test_long_update_is_capped() {
        let mut grid = grid(40, 30);
        let mut rain = RainDriver::new(RainParams {
            interval_s: 0.01,
            ..seeded(13)
        });

        assert_eq!(rain.update(&mut grid, 10.0).len(), MAX_DROPS_PER_UPDATE);

        // The backlog is gone, rain resumes on the normal interval
        assert!(rain.update(&mut grid, 0.005).is_empty());
        assert_eq!(rain.update(&mut grid, 0.006).len(), 1);
    }

    #[test]
    fn test_seeded_rain_is_reproducible() {
        let mut grid_a = grid(20, 20);
        let mut grid_b = grid(20, 20);
        let mut rain_a = RainDriver::new(seeded(42));
        let mut rain_b = RainDriver::new(seeded(42));

        let a = rain_a.update(&mut grid_a, 2.0);
        let b = rain_b.update(&mut grid_b, 2.0);
        assert_eq!(a, b);
        assert_eq!(grid_a.heights(), grid_b.heights());
    }

    #[test]
    fn test_disabled_rain_is_dry() {
        let mut grid = grid(20, 20);
        let mut rain = RainDriver::new(RainParams {
            enabled: false,
            ..seeded(3)
        });
        assert!(rain.update(&mut grid, 5.0).is_empty());
        assert_eq!(grid.max_abs_height(), 0.0);

        rain.set_enabled(true);
        assert_eq!(rain.update(&mut grid, 0.25).len(), 1);
    }

    #[test]
    fn test_no_interior_means_no_drops() {
        let mut grid = grid(2, 8);
        let mut rain = RainDriver::new(seeded(5));
        assert!(rain.next_drop(&grid).is_none());
        assert!(rain.update(&mut grid, 1.0).is_empty());
    }
}
