//! adjustment::solver — in-place inversion of the aggregated Gram matrix.
//!
//! Purpose
//! -------
//! Invert the symmetric positive definite `mm x mm` constraint matrix by
//! pivotal condensation, in place and without row exchanges, clamping
//! vanishing pivots so degenerate constraint systems still produce a
//! least-disturbance answer instead of overflowing.
//!
//! Invariants & assumptions
//! ------------------------
//! - The matrix is square. Diagonal pivots are taken in order; symmetric
//!   positive definite inputs never need pivoting, and near-singular
//!   inputs are handled by the signed pivot floor.
use ndarray::Array2;

/// Smallest pivot magnitude admitted during condensation. Pivots below
/// this are replaced by the floor with their sign preserved.
const PIVOT_FLOOR: f64 = 1.0e-20;

/// Invert `mat` in place by pivotal condensation.
///
/// Parameters
/// ----------
/// - `mat`: `&mut Array2<f64>`
///   Square matrix, overwritten with its inverse.
///
/// Notes
/// -----
/// - A pivot with magnitude below [`PIVOT_FLOOR`] is clamped to the floor
///   with its sign preserved (a zero pivot counts as positive), so the
///   routine is total. The resulting inverse of a singular matrix is a
///   regularized one, which downstream code treats as the degenerate
///   least-disturbance solution.
pub(crate) fn invert_in_place(mat: &mut Array2<f64>) {
    let dim = mat.nrows();

    for icol in 0..dim {
        let mut pivot = mat[[icol, icol]];
        mat[[icol, icol]] = 1.0;

        let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
        if pivot.abs() < PIVOT_FLOOR {
            pivot = PIVOT_FLOOR * sign;
        }
        let pivot = 1.0 / pivot;

        for l in 0..dim {
            mat[[icol, l]] *= pivot;
        }

        for l1 in 0..dim {
            if l1 == icol {
                continue;
            }
            let t = mat[[l1, icol]];
            mat[[l1, icol]] = 0.0;
            for l in 0..dim {
                let pivot_row = mat[[icol, l]];
                mat[[l1, l]] -= pivot_row * t;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact inversion of small well-conditioned matrices.
    // - The identity `A * inv(A) = I` on a symmetric positive definite
    //   matrix.
    // - Totality on a singular input via the pivot floor.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify inversion of a 2x2 matrix against the closed form.
    //
    // Given
    // -----
    // - [[4, 7], [2, 6]] with determinant 10.
    //
    // Expect
    // ------
    // - Inverse [[0.6, -0.7], [-0.2, 0.4]].
    fn two_by_two_matches_closed_form() {
        // Arrange
        let mut mat = array![[4.0, 7.0], [2.0, 6.0]];

        // Act
        invert_in_place(&mut mat);

        // Assert
        let expected = array![[0.6, -0.7], [-0.2, 0.4]];
        for r in 0..2 {
            for c in 0..2 {
                assert!(
                    (mat[[r, c]] - expected[[r, c]]).abs() < 1e-12,
                    "entry ({r}, {c}) = {}",
                    mat[[r, c]]
                );
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the inverse identity on a symmetric positive definite
    // matrix of the kind the engine produces.
    //
    // Given
    // -----
    // - A 3x3 diagonally dominant symmetric matrix.
    //
    // Expect
    // ------
    // - The product with the original is the identity to 1e-10.
    fn product_with_original_is_identity() {
        // Arrange
        let original = array![[5.0, 1.0, 0.5], [1.0, 4.0, 1.0], [0.5, 1.0, 3.0]];
        let mut mat = original.clone();

        // Act
        invert_in_place(&mut mat);
        let product = original.dot(&mat);

        // Assert
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert!(
                    (product[[r, c]] - expected).abs() < 1e-10,
                    "entry ({r}, {c}) = {}",
                    product[[r, c]]
                );
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a singular matrix does not produce NaN or infinity:
    // the pivot floor regularizes it.
    //
    // Given
    // -----
    // - The all-ones 2x2 matrix, rank one.
    //
    // Expect
    // ------
    // - Every output entry is finite.
    fn singular_input_stays_finite() {
        // Arrange
        let mut mat = array![[1.0, 1.0], [1.0, 1.0]];

        // Act
        invert_in_place(&mut mat);

        // Assert
        for value in mat.iter() {
            assert!(value.is_finite(), "entry should be finite, got {value}");
        }
    }
}
