//! Ground state of a sparse Hermitian operator
//!
//! Restarted Lanczos: a Krylov space of fixed size is built from the current estimate, the lowest
//! Ritz pair of its tridiagonal matrix becomes the next estimate. The iteration terminates when the
//! residual `‖Hψ - Eψ‖` drops below the tolerance, or fails after the iteration cap.

use crate::{
    constants::{
        DEFAULT_EIGENSOLVER_ITERATIONS, DEFAULT_EIGENSOLVER_SUBSPACE,
        DEFAULT_EIGENSOLVER_TOLERANCE,
    },
    error::BuildError,
    krylov::{HermitianOperator, KrylovBuilder},
};
use miette::Diagnostic;
use nalgebra::{DVector, SymmetricEigen};
use num_complex::Complex;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EigensolverError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("the operator acts on an empty space")]
    EmptySpace,
    #[error("ground state not converged after {iterations} restarts, residual {residual:e}")]
    NotConverged { iterations: usize, residual: f64 },
}

/// The lowest eigenpair of an operator
#[derive(Clone, Debug)]
pub struct GroundState {
    pub energy: f64,
    pub vector: DVector<Complex<f64>>,
}

/// Settings for the restarted Lanczos iteration
#[derive(Copy, Clone, Debug)]
pub struct GroundStateSolver {
    pub tolerance: f64,
    pub maximum_iterations: usize,
    pub subspace: usize,
    pub seed: u64,
}

impl Default for GroundStateSolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_EIGENSOLVER_TOLERANCE,
            maximum_iterations: DEFAULT_EIGENSOLVER_ITERATIONS,
            subspace: DEFAULT_EIGENSOLVER_SUBSPACE,
            seed: 0,
        }
    }
}

impl GroundStateSolver {
    #[tracing::instrument(name = "Ground state", level = "info", skip_all, fields(dimension = operator.dimension()))]
    pub fn solve<Operator: HermitianOperator>(
        &self,
        operator: &Operator,
    ) -> Result<GroundState, EigensolverError> {
        let dimension = operator.dimension();
        if dimension == 0 {
            return Err(EigensolverError::EmptySpace);
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut estimate = DVector::from_fn(dimension, |_, _| {
            Complex::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5)
        });

        let mut residual = f64::INFINITY;
        for iteration in 0..self.maximum_iterations {
            let subspace = KrylovBuilder::new()
                .with_operator(operator)
                .with_start(&estimate)
                .with_depth(self.subspace.max(2))
                .build()?;
            let eigen = SymmetricEigen::new(subspace.tridiagonal().to_dense());
            let (lowest, energy) = eigen
                .eigenvalues
                .iter()
                .copied()
                .enumerate()
                .fold((0, f64::INFINITY), |best, (index, value)| {
                    if value < best.1 {
                        (index, value)
                    } else {
                        best
                    }
                });
            let ritz = eigen.eigenvectors.column(lowest).map(Complex::from);
            let vector = subspace.expand(&ritz);
            let vector = &vector / Complex::from(vector.norm());

            residual = (operator.apply(&vector) - &vector * Complex::from(energy)).norm();
            tracing::debug!(
                "Restart {}: energy {:.12}, residual {:e}",
                iteration,
                energy,
                residual
            );
            if residual < self.tolerance {
                tracing::info!("Ground state energy {:.10}", energy);
                return Ok(GroundState { energy, vector });
            }
            estimate = vector;
        }
        Err(EigensolverError::NotConverged {
            iterations: self.maximum_iterations,
            residual,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{EigensolverError, GroundStateSolver};
    use nalgebra::{DMatrix, SymmetricEigen};
    use num_complex::Complex;

    #[test]
    fn lowest_eigenvalue_of_a_dense_matrix_is_found() {
        let dimension = 30;
        let matrix = DMatrix::from_fn(dimension, dimension, |i, j| {
            if i == j {
                i as f64 * 0.5
            } else if (i as isize - j as isize).abs() == 1 {
                -1.0
            } else {
                0.0
            }
        });
        let expected = SymmetricEigen::new(matrix.clone()).eigenvalues.min();
        let operator = matrix.map(Complex::from);
        let solver = GroundStateSolver {
            subspace: 12,
            ..GroundStateSolver::default()
        };
        let ground_state = solver.solve(&operator).unwrap();
        approx::assert_relative_eq!(ground_state.energy, expected, epsilon = 1e-9);
        approx::assert_relative_eq!(ground_state.vector.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn one_dimensional_operator_converges_immediately() {
        let operator = DMatrix::from_element(1, 1, Complex::from(-3.0));
        let ground_state = GroundStateSolver::default().solve(&operator).unwrap();
        approx::assert_relative_eq!(ground_state.energy, -3.0);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let dimension = 40;
        let matrix = DMatrix::from_fn(dimension, dimension, |i, j| {
            if i == j {
                (i as f64).sqrt()
            } else if (i as isize - j as isize).abs() == 1 {
                -1.0
            } else {
                0.0
            }
        })
        .map(Complex::from);
        let solver = GroundStateSolver {
            tolerance: 1e-15,
            maximum_iterations: 1,
            subspace: 2,
            seed: 3,
        };
        assert!(matches!(
            solver.solve(&matrix),
            Err(EigensolverError::NotConverged { iterations: 1, .. })
        ));
    }

    #[test]
    fn empty_operator_is_rejected() {
        let operator = DMatrix::<Complex<f64>>::zeros(0, 0);
        assert!(matches!(
            GroundStateSolver::default().solve(&operator),
            Err(EigensolverError::EmptySpace)
        ));
    }
}
