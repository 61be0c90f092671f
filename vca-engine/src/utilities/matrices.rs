use nalgebra::DMatrix;
use num_complex::Complex;

/// Tests for hermiticity of a matrix
pub(crate) fn is_hermitian(matrix: &DMatrix<Complex<f64>>) -> bool {
    if !matrix.is_square() {
        return false;
    }
    let scale = matrix.camax().max(1_f64);
    let adjoint = matrix.adjoint();
    matrix
        .iter()
        .zip(adjoint.iter())
        .all(|(element, adjoint_element)| {
            (element - adjoint_element).norm() / scale < std::f64::EPSILON * 100_f64
        })
}

/// The matrix with every element replaced by its imaginary part
pub(crate) fn imaginary_part(matrix: &DMatrix<Complex<f64>>) -> DMatrix<f64> {
    matrix.map(|element| element.im)
}

#[cfg(test)]
mod test {
    use super::{imaginary_part, is_hermitian};
    use nalgebra::DMatrix;
    use num_complex::Complex;

    #[test]
    fn real_non_hermitian_matrix_returns_false() {
        let matrix = DMatrix::from_row_slice(3, 3, &[1., 2., 3., 4., 5., 6., 7., 8., 9.])
            .map(Complex::from);
        assert!(!is_hermitian(&matrix));
    }

    #[test]
    fn real_hermitian_matrix_returns_true() {
        let matrix = DMatrix::from_row_slice(3, 3, &[1., 2., 3., 2., 5., 6., 3., 6., 9.])
            .map(Complex::from);
        assert!(is_hermitian(&matrix));
    }

    #[test]
    fn complex_hermitian_matrix_returns_true() {
        let matrix = DMatrix::from_row_slice(
            2,
            2,
            &[
                Complex::new(1., 0.),
                Complex::new(2., 3.),
                Complex::new(2., -3.),
                Complex::new(5., 0.),
            ],
        );
        assert!(is_hermitian(&matrix));
        assert!(!is_hermitian(&matrix.transpose()));
    }

    #[test]
    fn rectangular_matrix_is_not_hermitian() {
        let matrix = DMatrix::<Complex<f64>>::zeros(2, 3);
        assert!(!is_hermitian(&matrix));
    }

    #[test]
    fn imaginary_part_is_taken_elementwise() {
        let matrix = DMatrix::from_element(2, 2, Complex::new(1., -2.));
        approx::assert_relative_eq!(imaginary_part(&matrix), DMatrix::from_element(2, 2, -2.));
    }
}
