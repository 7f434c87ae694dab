//! Convex-hull oracle: supporting-hyperplane enumeration in R^n.
//!
//! Purpose
//! - Produce the facet list (outward unit normal + offset) of the convex hull
//!   of a finite point set, and classify which input points are hull vertices.
//!
//! Why enumeration
//! - Candidate hyperplanes are spanned by n-tuples of input points; a
//!   candidate is a facet iff every point lies on its inner side. Complexity
//!   is O(C(V,n) · V), acceptable at conversion sizes, and the kernel stays
//!   explicit and easy to audit.
//!
//! Conventions
//! - Facets use `n·x <= c` with unit `n`, oriented so the point-set centroid
//!   satisfies the inequality strictly.
//! - Numerically identical facets arising from different tuples are deduped
//!   via quantized hyperplane keys.
//! - Every tolerance decision goes through the caller's `GeomCfg` epsilon.

use std::collections::HashSet;

use itertools::Itertools;
use nalgebra::DVector;

use crate::error::{PolytopeError, Result};
use crate::poly::cfg::GeomCfg;
use crate::poly::util::{centroid, quantize_hyperplane};

/// Hull facet: supporting half-space `normal · x <= offset` with unit normal.
#[derive(Clone, Debug)]
pub struct Facet {
    pub normal: DVector<f64>,
    pub offset: f64,
}

/// Enumerate the facets of the convex hull of `points`.
///
/// Fails with `DegenerateInput` when the points cannot span full affine
/// dimension (fewer than n+1 points, or affinely dependent).
pub fn facet_enumeration(points: &[DVector<f64>], cfg: GeomCfg) -> Result<Vec<Facet>> {
    let eps = cfg.eps;
    let m = points.len();
    if m == 0 {
        return Err(PolytopeError::DegenerateInput("empty point set".into()));
    }
    let n = points[0].len();
    debug_assert!(points.iter().all(|p| p.len() == n));
    if m < n + 1 {
        return Err(PolytopeError::DegenerateInput(format!(
            "{m} points cannot span R^{n}"
        )));
    }
    if affine_rank(points, eps) < n {
        return Err(PolytopeError::DegenerateInput(format!(
            "point set does not span full affine dimension {n}"
        )));
    }

    let c0 = centroid(points);
    let mut seen: HashSet<Vec<i64>> = HashSet::new();
    let mut out: Vec<Facet> = Vec::new();
    for comb in (0..m).combinations(n) {
        let base = &points[comb[0]];
        let dirs: Vec<DVector<f64>> = comb[1..].iter().map(|&k| &points[k] - base).collect();
        let Some(mut normal) = orthogonal_complement_vector(&dirs, n, eps) else {
            // Affinely dependent tuple; spans no hyperplane.
            continue;
        };
        let mut offset = normal.dot(base);
        // Orient outward: the centroid lies strictly inside every facet.
        if normal.dot(&c0) > offset {
            normal.neg_mut();
            offset = -offset;
        }
        // Supporting iff no point lies outside.
        if points.iter().any(|p| normal.dot(p) - offset > eps) {
            continue;
        }
        let key = quantize_hyperplane(&normal, offset, eps);
        if seen.insert(key) {
            out.push(Facet { normal, offset });
        }
    }
    if out.is_empty() {
        return Err(PolytopeError::DegenerateInput(
            "no supporting hyperplanes found".into(),
        ));
    }
    Ok(out)
}

/// For each input point, whether it is a vertex of the hull described by
/// `facets`: incident facet normals must span R^n.
pub fn hull_vertex_flags(points: &[DVector<f64>], facets: &[Facet], cfg: GeomCfg) -> Vec<bool> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let n = first.len();
    // Incidence is looser than the base tolerance: vertices are recomputed
    // quantities, not raw inputs.
    let tight = cfg.eps * 100.0;
    points
        .iter()
        .map(|p| {
            let mut basis: Vec<DVector<f64>> = Vec::new();
            for f in facets {
                if (f.normal.dot(p) - f.offset).abs() > tight {
                    continue;
                }
                let mut t = f.normal.clone();
                for b in &basis {
                    let d = b.dot(&t);
                    t -= b * d;
                }
                let nrm = t.norm();
                if nrm > cfg.eps {
                    basis.push(t / nrm);
                }
                if basis.len() == n {
                    return true;
                }
            }
            false
        })
        .collect()
}

/// Dimension of the affine span of `points`.
fn affine_rank(points: &[DVector<f64>], eps: f64) -> usize {
    let base = &points[0];
    let mut basis: Vec<DVector<f64>> = Vec::new();
    for p in &points[1..] {
        let mut t = p - base;
        for b in &basis {
            let d = b.dot(&t);
            t -= b * d;
        }
        let nrm = t.norm();
        if nrm > eps {
            basis.push(t / nrm);
        }
        if basis.len() == base.len() {
            break;
        }
    }
    basis.len()
}

/// Unit vector orthogonal to all of `rows` (Gram–Schmidt on the rows, then on
/// the coordinate axes). `None` when the rows are linearly dependent, i.e.
/// the tuple spans no unique hyperplane.
fn orthogonal_complement_vector(
    rows: &[DVector<f64>],
    n: usize,
    eps: f64,
) -> Option<DVector<f64>> {
    let mut basis: Vec<DVector<f64>> = Vec::with_capacity(rows.len());
    for r in rows {
        let mut t = r.clone();
        for b in &basis {
            let d = b.dot(&t);
            t -= b * d;
        }
        let nrm = t.norm();
        if nrm <= eps {
            return None;
        }
        basis.push(t / nrm);
    }
    // Some axis always keeps a component of at least 1/sqrt(n) in the
    // complement; take the largest residual so the direction is not
    // noise-dominated.
    let mut best: Option<DVector<f64>> = None;
    let mut best_nrm = eps;
    for k in 0..n {
        let mut t = DVector::zeros(n);
        t[k] = 1.0;
        for b in &basis {
            let d = b.dot(&t);
            t -= b * d;
        }
        let nrm = t.norm();
        if nrm > best_nrm {
            best_nrm = nrm;
            best = Some(t / nrm);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn cfg() -> GeomCfg {
        GeomCfg::default()
    }

    #[test]
    fn square_has_four_facets() {
        let pts = vec![
            dvector![1.0, 1.0],
            dvector![-1.0, 1.0],
            dvector![-1.0, -1.0],
            dvector![1.0, -1.0],
            dvector![0.0, 0.0],
        ];
        let facets = facet_enumeration(&pts, cfg()).unwrap();
        assert_eq!(facets.len(), 4);
        for f in &facets {
            assert!((f.normal.norm() - 1.0).abs() < 1e-12);
            assert!(f.offset > 0.0);
        }
        let flags = hull_vertex_flags(&pts, &facets, cfg());
        assert_eq!(flags, vec![true, true, true, true, false]);
    }

    #[test]
    fn edge_midpoint_is_not_a_vertex() {
        let pts = vec![
            dvector![0.0, 0.0],
            dvector![2.0, 0.0],
            dvector![2.0, 2.0],
            dvector![0.0, 2.0],
            dvector![1.0, 0.0],
        ];
        let facets = facet_enumeration(&pts, cfg()).unwrap();
        assert_eq!(facets.len(), 4);
        let flags = hull_vertex_flags(&pts, &facets, cfg());
        assert_eq!(flags, vec![true, true, true, true, false]);
    }

    #[test]
    fn cube_has_six_facets() {
        let mut pts = Vec::new();
        for &x in &[-1.0, 1.0] {
            for &y in &[-1.0, 1.0] {
                for &z in &[-1.0, 1.0] {
                    pts.push(dvector![x, y, z]);
                }
            }
        }
        let facets = facet_enumeration(&pts, cfg()).unwrap();
        assert_eq!(facets.len(), 6);
        let flags = hull_vertex_flags(&pts, &facets, cfg());
        assert!(flags.iter().all(|&f| f));
    }

    #[test]
    fn octahedron_has_eight_facets() {
        let pts = vec![
            dvector![1.0, 0.0, 0.0],
            dvector![-1.0, 0.0, 0.0],
            dvector![0.0, 1.0, 0.0],
            dvector![0.0, -1.0, 0.0],
            dvector![0.0, 0.0, 1.0],
            dvector![0.0, 0.0, -1.0],
        ];
        let facets = facet_enumeration(&pts, cfg()).unwrap();
        assert_eq!(facets.len(), 8);
    }

    #[test]
    fn interval_in_one_dimension() {
        let pts = vec![dvector![0.0], dvector![2.0], dvector![1.0]];
        let facets = facet_enumeration(&pts, cfg()).unwrap();
        assert_eq!(facets.len(), 2);
        let flags = hull_vertex_flags(&pts, &facets, cfg());
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let pts = vec![
            dvector![0.0, 0.0],
            dvector![1.0, 1.0],
            dvector![2.0, 2.0],
        ];
        assert!(matches!(
            facet_enumeration(&pts, cfg()),
            Err(PolytopeError::DegenerateInput(_))
        ));
    }

    #[test]
    fn too_few_points_are_degenerate() {
        let pts = vec![dvector![0.0, 0.0], dvector![1.0, 0.0]];
        assert!(matches!(
            facet_enumeration(&pts, cfg()),
            Err(PolytopeError::DegenerateInput(_))
        ));
    }
}
