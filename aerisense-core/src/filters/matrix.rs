//! Fixed-size matrix helpers for the adaptive filter
//!
//! Plain `[[f32; C]; R]` arrays with const-generic dimensions; no heap, no
//! external linear-algebra crate. Only the handful of operations a
//! two-state Kalman filter needs.

/// Matrix type using const generics
pub type Matrix<const R: usize, const C: usize> = [[f32; C]; R];

/// Square matrix type
pub type SquareMatrix<const N: usize> = Matrix<N, N>;

/// Vector type
pub type Vector<const N: usize> = [f32; N];

/// Matrix multiplication: A[R×K] × B[K×C]
pub fn multiply<const R: usize, const K: usize, const C: usize>(
    a: &Matrix<R, K>,
    b: &Matrix<K, C>,
) -> Matrix<R, C> {
    let mut result = [[0.0; C]; R];
    for i in 0..R {
        for j in 0..C {
            for k in 0..K {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Matrix transpose
pub fn transpose<const R: usize, const C: usize>(a: &Matrix<R, C>) -> Matrix<C, R> {
    let mut result = [[0.0; R]; C];
    for i in 0..R {
        for j in 0..C {
            result[j][i] = a[i][j];
        }
    }
    result
}

/// Element-wise addition
pub fn add<const R: usize, const C: usize>(a: &Matrix<R, C>, b: &Matrix<R, C>) -> Matrix<R, C> {
    let mut result = *a;
    for i in 0..R {
        for j in 0..C {
            result[i][j] += b[i][j];
        }
    }
    result
}

/// Matrix-vector product
pub fn matvec<const R: usize, const C: usize>(m: &Matrix<R, C>, v: &Vector<C>) -> Vector<R> {
    let mut result = [0.0; R];
    for i in 0..R {
        for j in 0..C {
            result[i] += m[i][j] * v[j];
        }
    }
    result
}

/// Make matrix symmetric: A = (A + Aᵀ) / 2
///
/// Keeps round-off from slowly breaking covariance symmetry.
pub fn make_symmetric<const N: usize>(matrix: &mut SquareMatrix<N>) {
    for i in 0..N {
        for j in i + 1..N {
            let avg = (matrix[i][j] + matrix[j][i]) * 0.5;
            matrix[i][j] = avg;
            matrix[j][i] = avg;
        }
    }
}

/// Identity matrix
pub fn identity<const N: usize>() -> SquareMatrix<N> {
    let mut m = [[0.0; N]; N];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    m
}

/// Determinant of a 2×2 matrix
pub fn det2(m: &SquareMatrix<2>) -> f32 {
    m[0][0] * m[1][1] - m[0][1] * m[1][0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication() {
        let a: Matrix<2, 3> = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let b: Matrix<3, 2> = [[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]];
        let c = multiply(&a, &b);
        assert_eq!(c[0][0], 58.0);
        assert_eq!(c[0][1], 64.0);
        assert_eq!(c[1][0], 139.0);
        assert_eq!(c[1][1], 154.0);
    }

    #[test]
    fn transpose_and_symmetry() {
        let a: Matrix<2, 3> = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let t = transpose(&a);
        assert_eq!(t[2][1], 6.0);

        let mut m: SquareMatrix<2> = [[1.0, 2.0], [3.0, 4.0]];
        make_symmetric(&mut m);
        assert_eq!(m[0][1], 2.5);
        assert_eq!(m[1][0], 2.5);
        assert_eq!(det2(&m), 1.0 * 4.0 - 2.5 * 2.5);
    }

    #[test]
    fn matvec_identity() {
        let i = identity::<2>();
        assert_eq!(matvec(&i, &[3.0, -1.0]), [3.0, -1.0]);
        assert_eq!(add(&i, &i), [[2.0, 0.0], [0.0, 2.0]]);
    }
}
