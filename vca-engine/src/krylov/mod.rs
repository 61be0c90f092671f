// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Krylov
//!
//! Lanczos construction of the Krylov space generated by a Hermitian operator from a starting
//! vector. The operator restricted to the space is a real tridiagonal matrix, which is all the
//! Green's function evaluators need to know about the many-body problem.
//!
//! Every Lanczos vector is re-orthogonalised against all previous vectors with modified
//! Gram-Schmidt. The iteration stops at the requested depth, at the dimension of the operator, or
//! when the residual vanishes because the space became invariant.
//!
//! A `KrylovSubspace` is built through the `KrylovBuilder`
//!
//! ```ignore
//! KrylovBuilder::new()
//!     .with_operator(&hamiltonian)
//!     .with_start(&vector)
//!     .with_depth(200)
//!     .build()?;
//! ```

mod tridiagonal;

pub use tridiagonal::Tridiagonal;

use crate::{
    constants::{DEFAULT_KRYLOV_DEPTH, LANCZOS_BREAKDOWN, ZERO_NORM},
    error::BuildError,
    hamiltonian::Hamiltonian,
};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

/// A Hermitian operator which can act on vectors
pub trait HermitianOperator {
    /// The dimension of the space the operator acts on
    fn dimension(&self) -> usize;
    /// The product of the operator and `vector`
    fn apply(&self, vector: &DVector<Complex<f64>>) -> DVector<Complex<f64>>;
}

impl HermitianOperator for Hamiltonian {
    fn dimension(&self) -> usize {
        self.num_rows()
    }

    fn apply(&self, vector: &DVector<Complex<f64>>) -> DVector<Complex<f64>> {
        Hamiltonian::apply(self, vector)
    }
}

impl HermitianOperator for DMatrix<Complex<f64>> {
    fn dimension(&self) -> usize {
        self.nrows()
    }

    fn apply(&self, vector: &DVector<Complex<f64>>) -> DVector<Complex<f64>> {
        self * vector
    }
}

/// The Krylov data retained for Green's function evaluation
#[derive(Clone, Debug)]
pub struct KrylovResult {
    /// The operator restricted to the Krylov space
    pub tridiagonal: Tridiagonal,
    /// The norm of the starting vector
    pub norm: f64,
    /// The coordinates of the starting vector in the Krylov basis
    pub projection: DVector<Complex<f64>>,
    /// Column `i` holds the coordinates of the `i`th starting vector of the sector in this basis
    pub overlaps: DMatrix<Complex<f64>>,
}

impl KrylovResult {
    /// The result for a vanishing starting vector, which contributes nothing to any sum
    pub fn degenerate(number_of_labels: usize) -> Self {
        Self {
            tridiagonal: Tridiagonal::empty(),
            norm: 0_f64,
            projection: DVector::zeros(0),
            overlaps: DMatrix::zeros(0, number_of_labels),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.tridiagonal.dimension() == 0
    }

    pub fn dimension(&self) -> usize {
        self.tridiagonal.dimension()
    }
}

/// An orthonormal Krylov basis and the tridiagonal restriction of the operator to it
#[derive(Debug)]
pub struct KrylovSubspace {
    basis: Vec<DVector<Complex<f64>>>,
    tridiagonal: Tridiagonal,
    norm: f64,
}

impl KrylovSubspace {
    /// A subspace generated from a vanishing vector
    fn empty() -> Self {
        Self {
            basis: Vec::new(),
            tridiagonal: Tridiagonal::empty(),
            norm: 0_f64,
        }
    }

    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn tridiagonal(&self) -> &Tridiagonal {
        &self.tridiagonal
    }

    pub fn basis(&self) -> &[DVector<Complex<f64>>] {
        &self.basis
    }

    /// The coordinates `Q^H v` of `vector` in the Krylov basis
    pub fn coordinates(&self, vector: &DVector<Complex<f64>>) -> DVector<Complex<f64>> {
        DVector::from_iterator(
            self.basis.len(),
            self.basis.iter().map(|basis_vector| basis_vector.dotc(vector)),
        )
    }

    /// The vector with coordinates `coefficients` in the Krylov basis
    pub fn expand(&self, coefficients: &DVector<Complex<f64>>) -> DVector<Complex<f64>> {
        let length = self.basis.first().map(|vector| vector.len()).unwrap_or(0);
        self.basis
            .iter()
            .zip(coefficients.iter())
            .fold(DVector::zeros(length), |sum, (vector, &coefficient)| {
                sum + vector * coefficient
            })
    }

    /// Reduce to the data needed for Green's function evaluation
    ///
    /// `starts` are the starting vectors of every label in the sector, their coordinates in this
    /// basis are retained as the overlaps of the result.
    pub fn into_result(self, start: &DVector<Complex<f64>>, starts: &[DVector<Complex<f64>>]) -> KrylovResult {
        if self.basis.is_empty() {
            return KrylovResult::degenerate(starts.len());
        }
        let mut overlaps = DMatrix::zeros(self.basis.len(), starts.len());
        for (mut column, vector) in overlaps.column_iter_mut().zip(starts.iter()) {
            column.copy_from(&self.coordinates(vector));
        }
        KrylovResult {
            projection: self.coordinates(start),
            tridiagonal: self.tridiagonal,
            norm: self.norm,
            overlaps,
        }
    }
}

/// Builder for a Krylov subspace from references to an operator and a starting vector
pub struct KrylovBuilder<RefOperator, RefStart> {
    operator: RefOperator,
    start: RefStart,
    depth: usize,
}

impl Default for KrylovBuilder<(), ()> {
    fn default() -> Self {
        Self {
            operator: (),
            start: (),
            depth: DEFAULT_KRYLOV_DEPTH,
        }
    }
}

impl KrylovBuilder<(), ()> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<RefOperator, RefStart> KrylovBuilder<RefOperator, RefStart> {
    pub fn with_operator<Operator>(self, operator: &Operator) -> KrylovBuilder<&Operator, RefStart> {
        KrylovBuilder {
            operator,
            start: self.start,
            depth: self.depth,
        }
    }

    pub fn with_start<Start>(self, start: &Start) -> KrylovBuilder<RefOperator, &Start> {
        KrylovBuilder {
            operator: self.operator,
            start,
            depth: self.depth,
        }
    }

    /// The maximum number of Lanczos vectors
    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }
}

impl<'a, Operator> KrylovBuilder<&'a Operator, &'a DVector<Complex<f64>>>
where
    Operator: HermitianOperator,
{
    #[tracing::instrument(name = "Lanczos", level = "trace", skip_all, fields(depth = self.depth))]
    pub fn build(self) -> Result<KrylovSubspace, BuildError> {
        if self.start.len() != self.operator.dimension() {
            return Err(BuildError::DimensionMismatch {
                what: "Krylov starting vector",
                expected: self.operator.dimension(),
                found: self.start.len(),
            });
        }
        if self.depth == 0 {
            return Err(BuildError::Model(
                "the Krylov depth must be at least one".into(),
            ));
        }
        let norm = self.start.norm();
        if norm < ZERO_NORM {
            tracing::trace!("Starting vector vanishes, the Krylov space is empty");
            return Ok(KrylovSubspace::empty());
        }

        let depth = self.depth.min(self.operator.dimension());
        let mut basis: Vec<DVector<Complex<f64>>> = Vec::with_capacity(depth);
        let mut alpha = Vec::with_capacity(depth);
        let mut beta: Vec<f64> = Vec::with_capacity(depth);
        basis.push(self.start / Complex::from(norm));

        loop {
            let current = basis.len() - 1;
            let mut residual = self.operator.apply(&basis[current]);
            let diagonal = basis[current].dotc(&residual).re;
            residual -= &basis[current] * Complex::from(diagonal);
            if current > 0 {
                residual -= &basis[current - 1] * Complex::from(beta[current - 1]);
            }
            // Two passes of modified Gram-Schmidt against the whole basis
            for _ in 0..2 {
                for vector in basis.iter() {
                    let overlap = vector.dotc(&residual);
                    residual -= vector * overlap;
                }
            }
            alpha.push(diagonal);

            if basis.len() == depth {
                break;
            }
            let off_diagonal = residual.norm();
            if off_diagonal < LANCZOS_BREAKDOWN * (1_f64 + diagonal.abs()) {
                tracing::trace!("Krylov space is invariant after {} vectors", basis.len());
                break;
            }
            beta.push(off_diagonal);
            basis.push(residual / Complex::from(off_diagonal));
        }

        Ok(KrylovSubspace {
            basis,
            tridiagonal: Tridiagonal::new(alpha, beta),
            norm,
        })
    }
}
