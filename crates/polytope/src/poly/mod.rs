//! n-dimensional convex polytopes (H- and V-representations; explicit,
//! auditable conversions).
//!
//! Purpose
//! - Track both the half-space description `{x : Ax <= b}` and the vertex
//!   description `conv(V)` of one polytope, materializing the missing side on
//!   demand and shrinking either side to its minimal form in place.
//!
//! Why this design (short)
//! - Either representation may be absent until requested; conversions cache
//!   their result and record that it was derived, so minimization knows what
//!   it may invalidate.
//! - The numerical work is delegated to two narrow oracles (`crate::lp`,
//!   `crate::hull`); the store owns validation, caching, and the algebraic
//!   operators.
//!
//! Conventions
//! - Inequalities use `A_i·x <= b_i`; user-supplied rows are kept as given,
//!   derived rows carry unit outward normals.
//! - All tolerance decisions go through one `GeomCfg` epsilon.

pub mod cfg;
mod convert;
pub mod types;
pub(crate) mod util;

pub use cfg::GeomCfg;
pub use types::{HRep, Polytope, PolytopeBuilder};
