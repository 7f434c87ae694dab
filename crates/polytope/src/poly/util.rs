//! Small utilities: canonical ordering and geometric dedup/quantization.

use std::cmp::Ordering;

use nalgebra::DVector;

/// Lexicographic comparison by coordinates, ties broken by later coordinates.
pub(crate) fn lex_cmp(a: &DVector<f64>, b: &DVector<f64>) -> Ordering {
    for k in 0..a.len().min(b.len()) {
        match a[k].partial_cmp(&b[k]).unwrap_or(Ordering::Equal) {
            Ordering::Equal => continue,
            o => return o,
        }
    }
    a.len().cmp(&b.len())
}

/// Sort points into canonical (lexicographic) order.
pub(crate) fn lex_sort(points: &mut [DVector<f64>]) {
    points.sort_by(lex_cmp);
}

/// Sort lexicographically, then drop near-duplicates within `tol`.
pub(crate) fn dedup_points_in_place(points: &mut Vec<DVector<f64>>, tol: f64) {
    if points.len() < 2 {
        return;
    }
    lex_sort(points);
    points.dedup_by(|a, b| (&*a - &*b).norm() < tol);
}

/// Quantized key for a hyperplane `(n, c)`, used to dedup numerically equal
/// hyperplanes via hashing.
pub(crate) fn quantize_hyperplane(n: &DVector<f64>, c: f64, tol: f64) -> Vec<i64> {
    let s = 1.0 / tol;
    let mut key: Vec<i64> = n.iter().map(|x| (x * s).round() as i64).collect();
    key.push((c * s).round() as i64);
    key
}

/// Arithmetic mean of a point set. Caller guarantees `points` is non-empty.
pub(crate) fn centroid(points: &[DVector<f64>]) -> DVector<f64> {
    let n = points[0].len();
    let mut c = DVector::zeros(n);
    for p in points {
        c += p;
    }
    c / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn lex_order_ties_broken_by_later_coords() {
        let mut pts = vec![
            dvector![1.0, 2.0],
            dvector![0.0, 5.0],
            dvector![1.0, -3.0],
        ];
        lex_sort(&mut pts);
        assert_eq!(pts[0], dvector![0.0, 5.0]);
        assert_eq!(pts[1], dvector![1.0, -3.0]);
        assert_eq!(pts[2], dvector![1.0, 2.0]);
    }

    #[test]
    fn dedup_merges_near_duplicates() {
        let mut pts = vec![
            dvector![1.0, 1.0],
            dvector![0.0, 0.0],
            dvector![1.0 + 1e-12, 1.0 - 1e-12],
        ];
        dedup_points_in_place(&mut pts, 1e-9);
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn quantize_separates_distinct_planes() {
        let a = quantize_hyperplane(&dvector![1.0, 0.0], 1.0, 1e-9);
        let b = quantize_hyperplane(&dvector![1.0, 0.0], 1.0 + 1e-12, 1e-9);
        let c = quantize_hyperplane(&dvector![0.0, 1.0], 1.0, 1e-9);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
