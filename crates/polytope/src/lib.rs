//! Convex polytopes in R^n: dual H/V representations, conversion, and
//! minimization.
//!
//! A [`Polytope`](poly::Polytope) is built from exactly one of a vertex list,
//! an inequality system `A x <= b`, or an axis-aligned bound pair. The missing
//! representation is materialized on demand (H→V via Chebyshev center and
//! polar-dual hull, V→H via hull facets) and either side can be reduced to
//! its minimal form in place. All numerics are floating point with a single
//! configurable tolerance; degenerate inputs fail fast with typed errors.

pub mod error;
pub mod hull;
pub mod lp;
pub mod poly;
pub mod rand;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{PolytopeError, Result};
pub use poly::{GeomCfg, HRep, Polytope, PolytopeBuilder};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{PolytopeError, Result};
    pub use crate::poly::{GeomCfg, HRep, Polytope, PolytopeBuilder};
    pub use nalgebra::{DMatrix, DVector};
}
