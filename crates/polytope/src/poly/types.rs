//! Polytope store: construction, validation, lazy dual representation,
//! in-place operators, and views.
//!
//! Invariants
//! - `n >= 1`, fixed at construction.
//! - At least one representation is present at all times.
//! - When H is present: `a.nrows() == b.len()` and `a.ncols() == n`.
//! - When V is present: every vertex has length `n`.
//! - If both are present they describe the same region up to tolerance; the
//!   conversion kernels establish this, the store only tracks which side was
//!   derived (`h_derived`/`v_derived`) for cache invalidation.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::{DMatrix, DVector};

use crate::error::{PolytopeError, Result};
use crate::lp::{self, LpOutcome};

use super::cfg::GeomCfg;
use super::convert;
use super::util::lex_cmp;

/// H-representation `{x : A x <= b}`.
#[derive(Clone, Debug)]
pub struct HRep {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
}

impl HRep {
    /// Stacked `[A | b]` matrix.
    pub fn stacked(&self) -> DMatrix<f64> {
        let m = self.a.nrows();
        let n = self.a.ncols();
        DMatrix::from_fn(m, n + 1, |i, j| if j < n { self.a[(i, j)] } else { self.b[i] })
    }
}

/// Convex polytope in R^n with lazily materialized H- and V-representations.
#[derive(Clone, Debug)]
pub struct Polytope {
    n: usize,
    h: Option<HRep>,
    v: Option<Vec<DVector<f64>>>,
    h_derived: bool,
    v_derived: bool,
    cfg: GeomCfg,
}

/// Staged constructor arguments; `build` enforces that exactly one input
/// shape was supplied.
#[derive(Default)]
pub struct PolytopeBuilder {
    vertices: Option<Vec<DVector<f64>>>,
    a: Option<DMatrix<f64>>,
    b: Option<DVector<f64>>,
    bounds: Option<(DVector<f64>, DVector<f64>)>,
    cfg: GeomCfg,
}

fn invalid(msg: &str) -> PolytopeError {
    PolytopeError::InvalidConstruction(msg.into())
}

impl PolytopeBuilder {
    pub fn vertices(mut self, vertices: Vec<DVector<f64>>) -> Self {
        self.vertices = Some(vertices);
        self
    }

    pub fn a(mut self, a: DMatrix<f64>) -> Self {
        self.a = Some(a);
        self
    }

    pub fn b(mut self, b: DVector<f64>) -> Self {
        self.b = Some(b);
        self
    }

    pub fn bounds(mut self, lb: DVector<f64>, ub: DVector<f64>) -> Self {
        self.bounds = Some((lb, ub));
        self
    }

    pub fn cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn build(self) -> Result<Polytope> {
        let have_v = self.vertices.is_some();
        let have_a = self.a.is_some();
        let have_b = self.b.is_some();
        let have_bounds = self.bounds.is_some();
        if have_v && (have_a || have_b || have_bounds) {
            return Err(invalid(
                "vertices cannot be combined with half-space or bound inputs",
            ));
        }
        if have_bounds && (have_a || have_b) {
            return Err(invalid("bounds cannot be combined with A or b"));
        }
        if have_a != have_b {
            return Err(invalid("A and b must be supplied together"));
        }
        if !(have_v || have_a || have_bounds) {
            return Err(invalid("no representation supplied"));
        }

        if let Some(vertices) = self.vertices {
            let n = match vertices.first() {
                Some(v) if !v.is_empty() => v.len(),
                _ => return Err(invalid("vertex list must contain points of dimension >= 1")),
            };
            if vertices.iter().any(|v| v.len() != n) {
                return Err(invalid("vertices have unequal lengths"));
            }
            return Ok(Polytope {
                n,
                h: None,
                v: Some(vertices),
                h_derived: false,
                v_derived: false,
                cfg: self.cfg,
            });
        }
        if let Some((lb, ub)) = self.bounds {
            let n = lb.len();
            if n == 0 || ub.len() != n {
                return Err(invalid("lower and upper bounds must have equal non-zero length"));
            }
            // Box rows: -e_i·x <= -lb_i stacked above e_i·x <= ub_i.
            let mut a = DMatrix::zeros(2 * n, n);
            let mut b = DVector::zeros(2 * n);
            for i in 0..n {
                a[(i, i)] = -1.0;
                b[i] = -lb[i];
                a[(n + i, i)] = 1.0;
                b[n + i] = ub[i];
            }
            return Ok(Polytope {
                n,
                h: Some(HRep { a, b }),
                v: None,
                h_derived: false,
                v_derived: false,
                cfg: self.cfg,
            });
        }
        // Guarded above: a and b are both present here.
        let (a, b) = match (self.a, self.b) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(invalid("A and b must be supplied together")),
        };
        let n = a.ncols();
        if n == 0 || a.nrows() == 0 {
            return Err(invalid("A must have at least one row and one column"));
        }
        if a.nrows() != b.len() {
            return Err(invalid("A and b must have the same number of rows"));
        }
        Ok(Polytope {
            n,
            h: Some(HRep { a, b }),
            v: None,
            h_derived: false,
            v_derived: false,
            cfg: self.cfg,
        })
    }
}

impl Polytope {
    pub fn builder() -> PolytopeBuilder {
        PolytopeBuilder::default()
    }

    /// Construct from a vertex list.
    pub fn from_vertices(vertices: Vec<DVector<f64>>) -> Result<Self> {
        Self::builder().vertices(vertices).build()
    }

    /// Construct from `A x <= b`.
    pub fn from_halfspaces(a: DMatrix<f64>, b: DVector<f64>) -> Result<Self> {
        Self::builder().a(a).b(b).build()
    }

    /// Construct the axis-aligned box `lb <= x <= ub`.
    pub fn from_bounds(lb: DVector<f64>, ub: DVector<f64>) -> Result<Self> {
        Self::builder().bounds(lb, ub).build()
    }

    /// Replace the tolerance configuration.
    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn cfg(&self) -> GeomCfg {
        self.cfg
    }

    /// Ambient dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn in_h_rep(&self) -> bool {
        self.h.is_some()
    }

    #[inline]
    pub fn in_v_rep(&self) -> bool {
        self.v.is_some()
    }

    /// Whether the H-representation was derived by conversion rather than
    /// user-supplied.
    #[inline]
    pub fn h_is_derived(&self) -> bool {
        self.h_derived
    }

    /// Whether the V-representation was derived by conversion rather than
    /// user-supplied.
    #[inline]
    pub fn v_is_derived(&self) -> bool {
        self.v_derived
    }

    #[inline]
    pub fn h_rep(&self) -> Option<&HRep> {
        self.h.as_ref()
    }

    #[inline]
    pub fn vertices(&self) -> Option<&[DVector<f64>]> {
        self.v.as_deref()
    }

    /// Stacked `[A | b]`, when H is materialized.
    pub fn h_matrix(&self) -> Option<DMatrix<f64>> {
        self.h.as_ref().map(HRep::stacked)
    }

    fn require_h(&self) -> Result<&HRep> {
        self.h
            .as_ref()
            .ok_or_else(|| invalid("no H-representation present"))
    }

    fn require_v(&self) -> Result<&[DVector<f64>]> {
        self.v
            .as_deref()
            .ok_or_else(|| invalid("no V-representation present"))
    }

    /// Materialize the vertex representation from (A, b). No-op when V is
    /// already present.
    pub fn determine_v_rep(&mut self) -> Result<()> {
        if self.v.is_some() {
            return Ok(());
        }
        let verts = convert::vertex_enumeration(self.require_h()?, self.cfg)?;
        self.v = Some(verts);
        self.v_derived = true;
        Ok(())
    }

    /// Materialize the half-space representation from the vertex set. No-op
    /// when H is already present.
    pub fn determine_h_rep(&mut self) -> Result<()> {
        if self.h.is_some() {
            return Ok(());
        }
        let h = convert::halfspace_enumeration(self.require_v()?, self.cfg)?;
        self.h = Some(h);
        self.h_derived = true;
        Ok(())
    }

    /// Remove redundant inequalities in place, materializing H first if
    /// needed. A derived vertex cache is dropped (re-derived on demand); a
    /// user-supplied one is kept, since the region is unchanged.
    pub fn minimize_h_rep(&mut self) -> Result<()> {
        if self.h.is_none() {
            self.determine_h_rep()?;
        }
        let h = match self.h.take() {
            Some(h) => h,
            None => return Err(invalid("no H-representation present")),
        };
        let keep = convert::irredundant_rows(&h, self.cfg);
        if keep.len() == h.a.nrows() {
            self.h = Some(h);
            return Ok(());
        }
        let n = h.a.ncols();
        let a = DMatrix::from_fn(keep.len(), n, |r, c| h.a[(keep[r], c)]);
        let b = DVector::from_fn(keep.len(), |r, _| h.b[keep[r]]);
        self.h = Some(HRep { a, b });
        if self.v_derived {
            self.v = None;
            self.v_derived = false;
        }
        Ok(())
    }

    /// Shrink the vertex set to the extreme points in place, materializing V
    /// first if needed. A present H stays valid: dropping non-extreme points
    /// never changes the hull.
    pub fn minimize_v_rep(&mut self) -> Result<()> {
        if self.v.is_none() {
            self.determine_v_rep()?;
        }
        let v = match self.v.take() {
            Some(v) => v,
            None => return Err(invalid("no V-representation present")),
        };
        match convert::extreme_points(&v, self.cfg) {
            Ok(minimal) => {
                self.v = Some(minimal);
                Ok(())
            }
            Err(e) => {
                // Leave the store in its prior state.
                self.v = Some(v);
                Err(e)
            }
        }
    }

    /// Vertices in canonical order (lexicographic by coordinates, ties broken
    /// by later coordinates). Pure view; `None` when V is not materialized.
    pub fn sorted_vertices(&self) -> Option<Vec<DVector<f64>>> {
        let mut verts = self.v.clone()?;
        verts.sort_by(lex_cmp);
        Some(verts)
    }

    /// Shift the polytope by `p` in place: vertices move by `p`, offsets by
    /// `A_i·p` (normals are translation-invariant).
    pub fn translate(&mut self, p: &DVector<f64>) -> Result<()> {
        if p.len() != self.n {
            return Err(PolytopeError::DimensionMismatch {
                expected: self.n,
                actual: p.len(),
            });
        }
        if let Some(vs) = self.v.as_mut() {
            for x in vs.iter_mut() {
                *x += p;
            }
        }
        if let Some(h) = self.h.as_mut() {
            h.b += &h.a * p;
        }
        Ok(())
    }

    /// Translated copy; see [`Polytope::translate`].
    pub fn translated(&self, p: &DVector<f64>) -> Result<Self> {
        let mut out = self.clone();
        out.translate(p)?;
        Ok(out)
    }

    /// Scale about the origin by `k != 0` in place. For `k < 0` the stored
    /// normals are negated along with the offsets, so the half-spaces keep
    /// describing the scaled region with outward orientation.
    pub fn scale(&mut self, k: f64) -> Result<()> {
        if k == 0.0 {
            return Err(PolytopeError::DegenerateInput(
                "scale factor must be non-zero".into(),
            ));
        }
        if let Some(vs) = self.v.as_mut() {
            for x in vs.iter_mut() {
                *x *= k;
            }
        }
        if let Some(h) = self.h.as_mut() {
            if k > 0.0 {
                h.b *= k;
            } else {
                h.a.neg_mut();
                h.b *= -k;
            }
        }
        Ok(())
    }

    /// Scaled copy; see [`Polytope::scale`].
    pub fn scaled(&self, k: f64) -> Result<Self> {
        let mut out = self.clone();
        out.scale(k)?;
        Ok(out)
    }

    /// Support function `max {eta·x : x in P}`, from whichever representation
    /// is materialized (vertex sweep over V, else LP over H).
    pub fn support(&self, eta: &DVector<f64>) -> Result<f64> {
        if eta.len() != self.n {
            return Err(PolytopeError::DimensionMismatch {
                expected: self.n,
                actual: eta.len(),
            });
        }
        if let Some(vs) = self.v.as_ref() {
            let mut best = f64::NEG_INFINITY;
            for x in vs {
                best = best.max(eta.dot(x));
            }
            return Ok(best);
        }
        let h = self.require_h()?;
        match lp::maximize(eta, &h.a, &h.b, self.cfg.eps) {
            LpOutcome::Solved { value, .. } => Ok(value),
            LpOutcome::Infeasible => Err(PolytopeError::EmptyPolytope),
            LpOutcome::Unbounded => Err(PolytopeError::DegenerateInput(
                "support is unbounded in this direction".into(),
            )),
            LpOutcome::Unsolved => Err(PolytopeError::DegenerateInput(
                "support solve did not converge".into(),
            )),
        }
    }
}

impl fmt::Display for Polytope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polytope in R^{}", self.n)?;
        if let Some(h) = &self.h {
            write!(f, ", H-rep with {} inequalities", h.a.nrows())?;
        }
        if let Some(v) = &self.v {
            write!(f, ", V-rep with {} vertices", v.len())?;
        }
        Ok(())
    }
}

// Operator sugar. Dimension mismatches panic with the underlying error
// message, matching nalgebra's operator convention; `translated`/`scaled`
// are the checked paths.

fn shift(p: &Polytope, d: &DVector<f64>) -> Polytope {
    match p.translated(d) {
        Ok(q) => q,
        Err(e) => panic!("{e}"),
    }
}

fn rescale(p: &Polytope, k: f64) -> Polytope {
    match p.scaled(k) {
        Ok(q) => q,
        Err(e) => panic!("{e}"),
    }
}

impl Add<&DVector<f64>> for &Polytope {
    type Output = Polytope;
    fn add(self, p: &DVector<f64>) -> Polytope {
        shift(self, p)
    }
}

impl Add<DVector<f64>> for Polytope {
    type Output = Polytope;
    fn add(self, p: DVector<f64>) -> Polytope {
        shift(&self, &p)
    }
}

impl Add<&[f64]> for &Polytope {
    type Output = Polytope;
    fn add(self, p: &[f64]) -> Polytope {
        shift(self, &DVector::from_column_slice(p))
    }
}

impl Sub<&DVector<f64>> for &Polytope {
    type Output = Polytope;
    fn sub(self, p: &DVector<f64>) -> Polytope {
        shift(self, &p.neg())
    }
}

impl Sub<DVector<f64>> for Polytope {
    type Output = Polytope;
    fn sub(self, p: DVector<f64>) -> Polytope {
        shift(&self, &p.neg())
    }
}

impl Sub<&[f64]> for &Polytope {
    type Output = Polytope;
    fn sub(self, p: &[f64]) -> Polytope {
        shift(self, &DVector::from_column_slice(p).neg())
    }
}

impl Mul<f64> for &Polytope {
    type Output = Polytope;
    fn mul(self, k: f64) -> Polytope {
        rescale(self, k)
    }
}

impl Mul<f64> for Polytope {
    type Output = Polytope;
    fn mul(self, k: f64) -> Polytope {
        rescale(&self, k)
    }
}

impl Mul<&Polytope> for f64 {
    type Output = Polytope;
    fn mul(self, p: &Polytope) -> Polytope {
        rescale(p, self)
    }
}

impl Mul<Polytope> for f64 {
    type Output = Polytope;
    fn mul(self, p: Polytope) -> Polytope {
        rescale(&p, self)
    }
}
