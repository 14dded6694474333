//! Dense linear algebra helpers for small square systems.
//!
//! Only what the control inversion needs: a Gauss-Jordan inverse with
//! partial pivoting. Matrices here are at most a few hundred rows, so the
//! O(n³) elimination is run once per model and cached by the caller.

use ndarray::{s, Array2};

/// Relative pivot threshold below which a matrix is treated as singular
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Invert a square matrix via Gauss-Jordan elimination with partial pivoting.
///
/// Eliminates on the augmented matrix [M | I]; the right half ends up as
/// M⁻¹. Returns `None` if the matrix is not square, is empty, contains
/// non-finite entries, or has a pivot smaller than
/// `SINGULAR_TOLERANCE · max|m|`.
pub fn invert(m: &Array2<f64>) -> Option<Array2<f64>> {
    let n = m.nrows();
    if n == 0 || m.ncols() != n {
        return None;
    }
    if m.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let scale = m.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()));
    if scale == 0.0 {
        return None;
    }
    let tol = SINGULAR_TOLERANCE * scale;

    // Augmented matrix [M | I]
    let mut aug = Array2::<f64>::zeros((n, 2 * n));
    aug.slice_mut(s![.., ..n]).assign(m);
    aug.slice_mut(s![.., n..]).assign(&Array2::<f64>::eye(n));

    for col in 0..n {
        // Partial pivot
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val < tol {
            return None;
        }
        if max_row != col {
            swap_rows(&mut aug, col, max_row);
        }

        let pivot = aug[[col, col]];
        aug.row_mut(col).mapv_inplace(|v| v / pivot);

        let pivot_row = aug.row(col).to_owned();
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[[row, col]];
            if factor != 0.0 {
                aug.row_mut(row).scaled_add(-factor, &pivot_row);
            }
        }
    }

    Some(aug.slice(s![.., n..]).to_owned())
}

fn swap_rows(m: &mut Array2<f64>, i: usize, j: usize) {
    for k in 0..m.ncols() {
        m.swap([i, k], [j, k]);
    }
}
