//! Tolerance configuration.
//!
//! Policy
//! - One tolerance drives every feasibility, incidence, and dedup decision.
//!   Near-degenerate geometry is the main source of flaky behavior, so the
//!   threshold is a single configurable knob rather than scattered literals.
//! - The default is fixed; adjust per instance via `Polytope::with_cfg` when
//!   inputs live at unusual scales.

/// Geometry configuration (tolerance).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Feasibility/membership/dedup epsilon.
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps: 1e-9 }
    }
}
