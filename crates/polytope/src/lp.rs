//! Linear-program oracle: dense two-phase primal simplex.
//!
//! Purpose
//! - Solve the small geometric LPs the conversion kernels need: the
//!   Chebyshev-center feasibility problem and the per-row redundancy test.
//!
//! Problem form
//! - `maximize c·x  subject to  A x <= b`, with `x` free (unrestricted in
//!   sign). Free variables are split into positive and negative parts, one
//!   slack is added per row, and rows with negative right-hand side get an
//!   artificial variable driven out in phase 1.
//!
//! Notes
//! - Bland's rule (smallest index) for both the entering column and ratio-test
//!   ties, so the iteration terminates on degenerate bases. The iteration cap
//!   is a backstop against floating-point stalling and reports `Unsolved`.
//! - Problem sizes here are tiny (facet counts times ambient dimension), so a
//!   full dense tableau is simpler and fast enough.

use nalgebra::{DMatrix, DVector};

/// Result of an LP solve.
///
/// `Unsolved` covers numerical non-convergence only; it is not a statement
/// about the problem itself.
#[derive(Clone, Debug)]
pub enum LpOutcome {
    Solved { value: f64, point: DVector<f64> },
    Infeasible,
    Unbounded,
    Unsolved,
}

enum Step {
    Optimal,
    Unbounded,
    IterCap,
}

struct Tableau {
    /// Constraint rows, right-hand side in the last column.
    t: DMatrix<f64>,
    /// Reduced-cost row, objective value in the last entry.
    z: DVector<f64>,
    /// Basic variable per row.
    basis: Vec<usize>,
    /// Number of structural columns (excludes the rhs column).
    ncols: usize,
    eps: f64,
}

impl Tableau {
    /// Rebuild the reduced-cost row for objective `c` against the current basis.
    fn canonicalize(&mut self, c: &[f64]) {
        let ncols = self.ncols;
        for j in 0..ncols {
            self.z[j] = -c[j];
        }
        self.z[ncols] = 0.0;
        for i in 0..self.t.nrows() {
            let cb = c[self.basis[i]];
            if cb != 0.0 {
                for j in 0..=ncols {
                    self.z[j] += cb * self.t[(i, j)];
                }
            }
        }
    }

    fn pivot(&mut self, r: usize, jin: usize) {
        let ncols = self.ncols;
        let piv = self.t[(r, jin)];
        for j in 0..=ncols {
            self.t[(r, j)] /= piv;
        }
        for i in 0..self.t.nrows() {
            if i == r {
                continue;
            }
            let f = self.t[(i, jin)];
            if f != 0.0 {
                for j in 0..=ncols {
                    self.t[(i, j)] -= f * self.t[(r, j)];
                }
            }
        }
        let f = self.z[jin];
        if f != 0.0 {
            for j in 0..=ncols {
                self.z[j] -= f * self.t[(r, j)];
            }
        }
        self.basis[r] = jin;
    }

    fn run(&mut self) -> Step {
        let max_iters = 200 + 50 * (self.t.nrows() + self.ncols);
        for _ in 0..max_iters {
            let Some(jin) = (0..self.ncols).find(|&j| self.z[j] < -self.eps) else {
                return Step::Optimal;
            };
            let mut leave: Option<(usize, f64)> = None;
            for i in 0..self.t.nrows() {
                let tij = self.t[(i, jin)];
                if tij > self.eps {
                    let ratio = self.t[(i, self.ncols)] / tij;
                    let better = match leave {
                        None => true,
                        Some((li, lr)) => {
                            ratio < lr - self.eps
                                || (ratio < lr + self.eps && self.basis[i] < self.basis[li])
                        }
                    };
                    if better {
                        leave = Some((i, ratio));
                    }
                }
            }
            match leave {
                Some((r, _)) => self.pivot(r, jin),
                None => return Step::Unbounded,
            }
        }
        tracing::warn!("simplex iteration cap reached");
        Step::IterCap
    }
}

/// Maximize `c·x` subject to `A x <= b` with `x` free.
pub fn maximize(c: &DVector<f64>, a: &DMatrix<f64>, b: &DVector<f64>, eps: f64) -> LpOutcome {
    let m = a.nrows();
    let n = a.ncols();
    debug_assert_eq!(c.len(), n);
    debug_assert_eq!(b.len(), m);
    if m == 0 {
        // Unconstrained: bounded only for a zero objective.
        return if c.iter().all(|x| x.abs() <= eps) {
            LpOutcome::Solved {
                value: 0.0,
                point: DVector::zeros(n),
            }
        } else {
            LpOutcome::Unbounded
        };
    }

    // Columns: 0..n positive parts, n..2n negative parts, 2n..2n+m slacks,
    // then one artificial per negative-rhs row.
    let art_start = 2 * n + m;
    let neg: Vec<bool> = (0..m).map(|i| b[i] < 0.0).collect();
    let n_art = neg.iter().filter(|&&x| x).count();
    let ncols = art_start + n_art;

    let mut t = DMatrix::zeros(m, ncols + 1);
    let mut basis = vec![0usize; m];
    let mut next_art = art_start;
    for i in 0..m {
        let s = if neg[i] { -1.0 } else { 1.0 };
        for j in 0..n {
            t[(i, j)] = s * a[(i, j)];
            t[(i, n + j)] = -s * a[(i, j)];
        }
        t[(i, 2 * n + i)] = s;
        t[(i, ncols)] = s * b[i];
        if neg[i] {
            t[(i, next_art)] = 1.0;
            basis[i] = next_art;
            next_art += 1;
        } else {
            basis[i] = 2 * n + i;
        }
    }
    let mut tab = Tableau {
        t,
        z: DVector::zeros(ncols + 1),
        basis,
        ncols,
        eps,
    };

    if n_art > 0 {
        // Phase 1: drive the artificial variables to zero.
        let mut c1 = vec![0.0; ncols];
        for cj in c1.iter_mut().skip(art_start) {
            *cj = -1.0;
        }
        tab.canonicalize(&c1);
        match tab.run() {
            Step::Optimal => {}
            // Phase 1 is bounded above by zero; anything else is numerical.
            _ => return LpOutcome::Unsolved,
        }
        if tab.z[ncols] < -eps {
            return LpOutcome::Infeasible;
        }
        // Pivot leftover artificials out of the basis; rows that offer no
        // pivot are redundant and dropped.
        let mut drop_rows: Vec<usize> = Vec::new();
        for i in 0..m {
            if tab.basis[i] >= art_start {
                let jin = (0..art_start).find(|&j| tab.t[(i, j)].abs() > eps);
                match jin {
                    Some(j) => tab.pivot(i, j),
                    None => drop_rows.push(i),
                }
            }
        }
        let rows: Vec<usize> = (0..m).filter(|i| !drop_rows.contains(i)).collect();
        let mut t2 = DMatrix::zeros(rows.len(), art_start + 1);
        let mut basis2 = Vec::with_capacity(rows.len());
        for (ri, &i) in rows.iter().enumerate() {
            for j in 0..art_start {
                t2[(ri, j)] = tab.t[(i, j)];
            }
            t2[(ri, art_start)] = tab.t[(i, ncols)];
            basis2.push(tab.basis[i]);
        }
        tab = Tableau {
            t: t2,
            z: DVector::zeros(art_start + 1),
            basis: basis2,
            ncols: art_start,
            eps,
        };
    }

    // Phase 2: the caller's objective over the split variables.
    let mut c2 = vec![0.0; tab.ncols];
    for j in 0..n {
        c2[j] = c[j];
        c2[n + j] = -c[j];
    }
    tab.canonicalize(&c2);
    match tab.run() {
        Step::Optimal => {
            let rhs = tab.ncols;
            let mut x = DVector::zeros(n);
            for (i, &bj) in tab.basis.iter().enumerate() {
                let val = tab.t[(i, rhs)];
                if bj < n {
                    x[bj] += val;
                } else if bj < 2 * n {
                    x[bj - n] -= val;
                }
            }
            LpOutcome::Solved {
                value: tab.z[rhs],
                point: x,
            }
        }
        Step::Unbounded => LpOutcome::Unbounded,
        Step::IterCap => LpOutcome::Unsolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{dmatrix, dvector};

    const EPS: f64 = 1e-9;

    #[test]
    fn box_optimum_at_corner() {
        // maximize x + y over [-1,1]^2
        let a = dmatrix![1.0, 0.0; -1.0, 0.0; 0.0, 1.0; 0.0, -1.0];
        let b = dvector![1.0, 1.0, 1.0, 1.0];
        let c = dvector![1.0, 1.0];
        match maximize(&c, &a, &b, EPS) {
            LpOutcome::Solved { value, point } => {
                assert_abs_diff_eq!(value, 2.0, epsilon = 1e-7);
                assert_abs_diff_eq!(point[0], 1.0, epsilon = 1e-7);
                assert_abs_diff_eq!(point[1], 1.0, epsilon = 1e-7);
            }
            other => panic!("expected solved, got {other:?}"),
        }
    }

    #[test]
    fn contradictory_strip_is_infeasible() {
        // x <= 0 and x >= 1
        let a = dmatrix![1.0; -1.0];
        let b = dvector![0.0, -1.0];
        let c = dvector![1.0];
        assert!(matches!(maximize(&c, &a, &b, EPS), LpOutcome::Infeasible));
    }

    #[test]
    fn open_wedge_is_unbounded() {
        // maximize x subject to x >= 0
        let a = dmatrix![-1.0];
        let b = dvector![0.0];
        let c = dvector![1.0];
        assert!(matches!(maximize(&c, &a, &b, EPS), LpOutcome::Unbounded));
    }

    #[test]
    fn no_constraints_is_unbounded() {
        let a = DMatrix::zeros(0, 2);
        let b = DVector::zeros(0);
        let c = dvector![0.0, 1.0];
        assert!(matches!(maximize(&c, &a, &b, EPS), LpOutcome::Unbounded));
    }

    #[test]
    fn negative_rhs_exercises_phase_one() {
        // 1 <= x <= 3; both directions.
        let a = dmatrix![-1.0; 1.0];
        let b = dvector![-1.0, 3.0];
        match maximize(&dvector![1.0], &a, &b, EPS) {
            LpOutcome::Solved { value, point } => {
                assert_abs_diff_eq!(value, 3.0, epsilon = 1e-7);
                assert_abs_diff_eq!(point[0], 3.0, epsilon = 1e-7);
            }
            other => panic!("expected solved, got {other:?}"),
        }
        match maximize(&dvector![-1.0], &a, &b, EPS) {
            LpOutcome::Solved { value, point } => {
                assert_abs_diff_eq!(value, -1.0, epsilon = 1e-7);
                assert_abs_diff_eq!(point[0], 1.0, epsilon = 1e-7);
            }
            other => panic!("expected solved, got {other:?}"),
        }
    }

    #[test]
    fn chebyshev_center_of_unit_square() {
        // Variables (x, y, r): maximize r subject to +-x + r <= 1, +-y + r <= 1.
        let a = dmatrix![
            1.0, 0.0, 1.0;
            -1.0, 0.0, 1.0;
            0.0, 1.0, 1.0;
            0.0, -1.0, 1.0
        ];
        let b = dvector![1.0, 1.0, 1.0, 1.0];
        let c = dvector![0.0, 0.0, 1.0];
        match maximize(&c, &a, &b, EPS) {
            LpOutcome::Solved { value, point } => {
                assert_abs_diff_eq!(value, 1.0, epsilon = 1e-7);
                assert_abs_diff_eq!(point[0], 0.0, epsilon = 1e-7);
                assert_abs_diff_eq!(point[1], 0.0, epsilon = 1e-7);
            }
            other => panic!("expected solved, got {other:?}"),
        }
    }
}
