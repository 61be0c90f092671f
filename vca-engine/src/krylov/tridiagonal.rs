use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

/// A real symmetric tridiagonal matrix, stored as its diagonal and first off-diagonal
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    pub(crate) diagonal: DVector<f64>,
    pub(crate) off_diagonal: DVector<f64>,
}

impl Tridiagonal {
    pub(crate) fn new(diagonal: Vec<f64>, off_diagonal: Vec<f64>) -> Self {
        debug_assert_eq!(diagonal.len(), off_diagonal.len() + 1);
        Self {
            diagonal: DVector::from_vec(diagonal),
            off_diagonal: DVector::from_vec(off_diagonal),
        }
    }

    /// The matrix of dimension zero, produced by an empty Krylov space
    pub(crate) fn empty() -> Self {
        Self {
            diagonal: DVector::zeros(0),
            off_diagonal: DVector::zeros(0),
        }
    }

    pub fn dimension(&self) -> usize {
        self.diagonal.len()
    }

    pub fn diagonal(&self) -> &DVector<f64> {
        &self.diagonal
    }

    pub fn off_diagonal(&self) -> &DVector<f64> {
        &self.off_diagonal
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.dimension();
        let mut dense = DMatrix::from_diagonal(&self.diagonal);
        for (i, &beta) in self.off_diagonal.iter().enumerate().take(n.saturating_sub(1)) {
            dense[(i, i + 1)] = beta;
            dense[(i + 1, i)] = beta;
        }
        dense
    }

    /// Solve `(shift I + sign T) x = e_1` with the Thomas algorithm
    ///
    /// Returns `None` when a pivot vanishes, which cannot happen for a shift with a non-zero
    /// imaginary part.
    pub fn solve_shifted(&self, shift: Complex<f64>, sign: f64) -> Option<DVector<Complex<f64>>> {
        let n = self.dimension();
        if n == 0 {
            return Some(DVector::zeros(0));
        }
        // Forward sweep, the right hand side is zero below the first row
        let mut upper = DVector::<Complex<f64>>::zeros(n);
        let mut rhs = DVector::<Complex<f64>>::zeros(n);
        let mut pivot = shift + sign * self.diagonal[0];
        if pivot.norm() == 0_f64 {
            return None;
        }
        if n > 1 {
            upper[0] = sign * self.off_diagonal[0] / pivot;
        }
        rhs[0] = Complex::from(1_f64) / pivot;
        for i in 1..n {
            let lower = Complex::from(sign * self.off_diagonal[i - 1]);
            pivot = shift + sign * self.diagonal[i] - lower * upper[i - 1];
            if pivot.norm() == 0_f64 {
                return None;
            }
            if i < n - 1 {
                upper[i] = sign * self.off_diagonal[i] / pivot;
            }
            rhs[i] = -lower * rhs[i - 1] / pivot;
        }
        // Back substitution
        let mut solution = rhs;
        for i in (0..n - 1).rev() {
            let next = solution[i + 1];
            solution[i] -= upper[i] * next;
        }
        Some(solution)
    }
}
