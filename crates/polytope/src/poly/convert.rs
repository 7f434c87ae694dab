//! H↔V conversion and minimization kernels.
//!
//! All kernels compute into fresh buffers and let the store commit the
//! result, so a failing conversion never leaves a half-written
//! representation behind.

use nalgebra::{DMatrix, DVector};

use crate::error::{PolytopeError, Result};
use crate::hull;
use crate::lp::{self, LpOutcome};

use super::cfg::GeomCfg;
use super::types::HRep;
use super::util::dedup_points_in_place;

/// Chebyshev center of `{x : Ax <= b}`: the interior point maximizing the
/// inscribed-ball radius. Solves `max r  s.t.  A_i·x + r‖A_i‖ <= b_i`.
pub(crate) fn chebyshev_center(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    cfg: GeomCfg,
) -> Result<(DVector<f64>, f64)> {
    let m = a.nrows();
    let n = a.ncols();
    let mut ac = DMatrix::zeros(m, n + 1);
    for i in 0..m {
        for j in 0..n {
            ac[(i, j)] = a[(i, j)];
        }
        ac[(i, n)] = a.row(i).norm();
    }
    let mut c = DVector::zeros(n + 1);
    c[n] = 1.0;
    match lp::maximize(&c, &ac, b, cfg.eps) {
        LpOutcome::Solved { value, point } => {
            if value <= cfg.eps {
                return Err(PolytopeError::EmptyPolytope);
            }
            Ok((point.rows(0, n).into_owned(), value))
        }
        LpOutcome::Infeasible => Err(PolytopeError::EmptyPolytope),
        LpOutcome::Unbounded => Err(PolytopeError::DegenerateInput(
            "half-space system is unbounded".into(),
        )),
        LpOutcome::Unsolved => Err(PolytopeError::DegenerateInput(
            "interior-point solve did not converge".into(),
        )),
    }
}

/// H→V: Chebyshev center, polar-dual point set, hull of the dual, then each
/// dual facet maps back to a primal vertex.
pub(crate) fn vertex_enumeration(h: &HRep, cfg: GeomCfg) -> Result<Vec<DVector<f64>>> {
    let (x0, radius) = chebyshev_center(&h.a, &h.b, cfg)?;
    tracing::debug!(rows = h.a.nrows(), radius, "enumerating vertices");
    let m = h.a.nrows();

    // Dual point per inequality, relative to the interior point: A_i / (b_i - A_i·x0).
    let mut dual: Vec<DVector<f64>> = Vec::with_capacity(m);
    for i in 0..m {
        let ai = h.a.row(i).transpose();
        if ai.norm() <= cfg.eps {
            tracing::warn!(row = i, "skipping zero-normal inequality");
            continue;
        }
        // x0 is strictly interior, so the slack is positive for every
        // non-trivial row.
        let slack = h.b[i] - ai.dot(&x0);
        dual.push(ai / slack);
    }
    let facets = hull::facet_enumeration(&dual, cfg)?;

    let feas = cfg.eps * 100.0;
    let mut verts: Vec<DVector<f64>> = Vec::with_capacity(facets.len());
    for f in &facets {
        if f.offset <= cfg.eps {
            // A dual facet through the origin corresponds to a primal vertex
            // at infinity.
            return Err(PolytopeError::DegenerateInput(
                "half-space system is unbounded".into(),
            ));
        }
        let v = &f.normal / f.offset + &x0;
        // Guard against hull roundoff.
        if (0..m).all(|i| h.a.row(i).transpose().dot(&v) <= h.b[i] + feas) {
            verts.push(v);
        }
    }
    dedup_points_in_place(&mut verts, cfg.eps);
    if verts.is_empty() {
        return Err(PolytopeError::DegenerateInput(
            "no vertices recovered from half-space system".into(),
        ));
    }
    Ok(verts)
}

/// V→H: hull facets of the vertex set as inequality rows.
pub(crate) fn halfspace_enumeration(v: &[DVector<f64>], cfg: GeomCfg) -> Result<HRep> {
    let facets = hull::facet_enumeration(v, cfg)?;
    let n = v[0].len();
    let mut a = DMatrix::zeros(facets.len(), n);
    let mut b = DVector::zeros(facets.len());
    for (i, f) in facets.iter().enumerate() {
        for j in 0..n {
            a[(i, j)] = f.normal[j];
        }
        b[i] = f.offset;
    }
    Ok(HRep { a, b })
}

/// Indices of the irredundant rows of `h`: row i is kept unless its maximum
/// over the remaining kept rows certifies it implied (optimum <= b_i).
pub(crate) fn irredundant_rows(h: &HRep, cfg: GeomCfg) -> Vec<usize> {
    let m = h.a.nrows();
    let n = h.a.ncols();
    let mut keep = vec![true; m];
    for i in 0..m {
        let others: Vec<usize> = (0..m).filter(|&j| j != i && keep[j]).collect();
        if others.is_empty() {
            continue;
        }
        let sub_a = DMatrix::from_fn(others.len(), n, |r, c| h.a[(others[r], c)]);
        let sub_b = DVector::from_fn(others.len(), |r, _| h.b[others[r]]);
        let obj = h.a.row(i).transpose();
        // Unbounded, infeasible, or stalled subproblems cannot certify
        // redundancy; the row stays.
        if let LpOutcome::Solved { value, .. } = lp::maximize(&obj, &sub_a, &sub_b, cfg.eps) {
            if value <= h.b[i] + cfg.eps {
                keep[i] = false;
            }
        }
    }
    (0..m).filter(|&i| keep[i]).collect()
}

/// Minimal vertex set: the input points that are vertices of their own hull.
/// Near-duplicates are merged first so one representative per geometric
/// vertex survives.
pub(crate) fn extreme_points(v: &[DVector<f64>], cfg: GeomCfg) -> Result<Vec<DVector<f64>>> {
    let mut pts = v.to_vec();
    dedup_points_in_place(&mut pts, cfg.eps);
    let facets = hull::facet_enumeration(&pts, cfg)?;
    let flags = hull::hull_vertex_flags(&pts, &facets, cfg);
    Ok(pts
        .into_iter()
        .zip(flags)
        .filter_map(|(p, is_vertex)| is_vertex.then_some(p))
        .collect())
}
