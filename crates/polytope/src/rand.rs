//! Reproducible random polytopes (replay tokens + config structs).
//!
//! Purpose
//! - Deterministic samplers for boxes and point clouds, used by the test
//!   suite and benches. Determinism uses a replay token `(seed, index)`
//!   mixed into a single RNG.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::poly::Polytope;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Random axis-aligned box configuration.
#[derive(Clone, Copy, Debug)]
pub struct BoxCfg {
    pub dim: usize,
    /// Per-axis half-width range.
    pub half_width: (f64, f64),
    /// Per-axis center offset drawn from `[-center_spread, center_spread]`.
    pub center_spread: f64,
}

impl Default for BoxCfg {
    fn default() -> Self {
        Self {
            dim: 2,
            half_width: (0.5, 2.0),
            center_spread: 3.0,
        }
    }
}

/// Draw a random axis-aligned box as an H-rep polytope.
pub fn draw_box(cfg: BoxCfg, tok: ReplayToken) -> Result<Polytope> {
    let mut rng = tok.to_std_rng();
    let dim = cfg.dim.max(1);
    let (w_lo, w_hi) = cfg.half_width;
    let w_lo = w_lo.max(1e-6);
    let w_hi = w_hi.max(w_lo);
    let s = cfg.center_spread.abs();
    let mut lb = DVector::zeros(dim);
    let mut ub = DVector::zeros(dim);
    for i in 0..dim {
        let c = if s > 0.0 { rng.gen_range(-s..s) } else { 0.0 };
        let w = rng.gen_range(w_lo..=w_hi);
        lb[i] = c - w;
        ub[i] = c + w;
    }
    Polytope::from_bounds(lb, ub)
}

/// Draw `count` points uniformly from the cube `[-radius, radius]^dim`.
pub fn draw_point_cloud(dim: usize, count: usize, radius: f64, tok: ReplayToken) -> Vec<DVector<f64>> {
    let mut rng = tok.to_std_rng();
    let r = radius.abs().max(1e-9);
    (0..count)
        .map(|_| DVector::from_fn(dim, |_, _| rng.gen_range(-r..r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draws() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_box(BoxCfg::default(), tok).expect("box");
        let b = draw_box(BoxCfg::default(), tok).expect("box");
        let ha = a.h_matrix().expect("h");
        let hb = b.h_matrix().expect("h");
        assert_eq!(ha, hb);

        let p = draw_point_cloud(3, 10, 1.0, tok);
        let q = draw_point_cloud(3, 10, 1.0, tok);
        assert_eq!(p, q);
    }

    #[test]
    fn distinct_indices_differ() {
        let a = draw_box(BoxCfg::default(), ReplayToken { seed: 1, index: 0 }).expect("box");
        let b = draw_box(BoxCfg::default(), ReplayToken { seed: 1, index: 1 }).expect("box");
        assert_ne!(a.h_matrix(), b.h_matrix());
    }
}
