//! Hamiltonian module
//!
//! Creates the many-body Hamiltonian of the reference cluster restricted to a single particle-number
//! sector:
//!
//! The Hamiltonian has two components:
//! - `quadratic`: The one-body operators, hopping and on-site fields, expanded over the intra-cluster bonds
//! - `interaction`: The diagonal density-density operators of the Hubbard interaction
//!
//! A Hamiltonian is constructed through the `HamiltonianBuilder` from a `sector: FockSector`, a
//! `table: BasisTable` and the expanded operators as
//!
//! ```ignore
//! HamiltonianBuilder::new()
//!     .with_sector(&sector)
//!     .with_table(&table)
//!     .with_operators(&operators)
//!     .build(statistics);
//! ```
//!
//! The matrix is stored in `CsrMatrix` form, each column holds the images of a single occupation
//! state. Duplicate entries generated by different operators are summed on conversion from the
//! coordinate format.

use crate::{
    error::BuildError,
    fock::{BasisTable, FockSector, Statistics},
    model::{HubbardOperator, QuadraticOperator},
};
use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use num_complex::Complex;

/// The operators which make up a cluster Hamiltonian
#[derive(Clone, Debug, Default)]
pub struct ClusterOperators {
    pub quadratic: Vec<QuadraticOperator>,
    pub interaction: Vec<HubbardOperator>,
}

#[derive(Clone, Debug)]
/// A sector-restricted many-body Hamiltonian
pub struct Hamiltonian {
    matrix: CsrMatrix<Complex<f64>>,
}

impl AsRef<CsrMatrix<Complex<f64>>> for Hamiltonian {
    fn as_ref(&self) -> &CsrMatrix<Complex<f64>> {
        &self.matrix
    }
}

impl Hamiltonian {
    /// Return the number of rows in the `Hamiltonian` matrix
    pub fn num_rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// The matrix-vector product H v
    pub fn apply(&self, vector: &DVector<Complex<f64>>) -> DVector<Complex<f64>> {
        let mut result = DVector::zeros(self.matrix.nrows());
        for (element, row) in result.iter_mut().zip(self.matrix.row_iter()) {
            *element = row
                .col_indices()
                .iter()
                .zip(row.values())
                .fold(Complex::from(0_f64), |sum, (&column, &value)| {
                    sum + value * vector[column]
                });
        }
        result
    }
}

/// Builder for a Hamiltonian from references to a sector, a basis table and the cluster operators
pub struct HamiltonianBuilder<RefSector, RefTable, RefOperators> {
    sector: RefSector,
    table: RefTable,
    operators: RefOperators,
}

impl Default for HamiltonianBuilder<(), (), ()> {
    /// Initialize an empty instance of HamiltonianBuilder
    fn default() -> Self {
        Self {
            sector: (),
            table: (),
            operators: (),
        }
    }
}

impl HamiltonianBuilder<(), (), ()> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<RefSector, RefTable, RefOperators> HamiltonianBuilder<RefSector, RefTable, RefOperators> {
    /// Attach the sector the Hamiltonian is restricted to
    pub fn with_sector<Sector>(
        self,
        sector: &Sector,
    ) -> HamiltonianBuilder<&Sector, RefTable, RefOperators> {
        HamiltonianBuilder {
            sector,
            table: self.table,
            operators: self.operators,
        }
    }

    /// Attach the basis table which maps labels to modes
    pub fn with_table<Table>(
        self,
        table: &Table,
    ) -> HamiltonianBuilder<RefSector, &Table, RefOperators> {
        HamiltonianBuilder {
            sector: self.sector,
            table,
            operators: self.operators,
        }
    }

    /// Attach the expanded cluster operators
    pub fn with_operators<Operators>(
        self,
        operators: &Operators,
    ) -> HamiltonianBuilder<RefSector, RefTable, &Operators> {
        HamiltonianBuilder {
            sector: self.sector,
            table: self.table,
            operators,
        }
    }
}

impl<'a> HamiltonianBuilder<&'a FockSector, &'a BasisTable, &'a ClusterOperators> {
    /// Builds an instance of `Hamiltonian` from a `HamiltonianBuilder`
    #[tracing::instrument(name = "Hamiltonian Builder", level = "debug", skip_all, fields(dimension = self.sector.dimension()))]
    pub fn build(self, statistics: Statistics) -> Result<Hamiltonian, BuildError> {
        if self.table.len() != self.sector.modes() {
            return Err(BuildError::DimensionMismatch {
                what: "basis table",
                expected: self.sector.modes(),
                found: self.table.len(),
            });
        }
        let dimension = self.sector.dimension();
        let mut coo = CooMatrix::new(dimension, dimension);

        tracing::trace!("Assembling the one-body operators");
        for operator in self.operators.quadratic.iter() {
            if !operator.is_intra_cell() {
                return Err(BuildError::Model(format!(
                    "operator on {} couples neighbouring clusters",
                    operator.created
                )));
            }
            let created = self.table.try_index(&operator.created)?;
            let annihilated = self.table.try_index(&operator.annihilated)?;
            for (column, &state) in self.sector.states().iter().enumerate() {
                let image = statistics
                    .annihilate(state, annihilated)
                    .and_then(|(first, state)| {
                        statistics
                            .create(state, created)
                            .map(|(second, state)| (first * second, state))
                    });
                if let Some((sign, image)) = image {
                    // The image conserves particle number so it is always in the sector
                    if let Some(row) = self.sector.index_of(image) {
                        coo.push(row, column, operator.value * sign);
                    }
                }
            }
        }

        tracing::trace!("Assembling the interaction diagonal");
        for operator in self.operators.interaction.iter() {
            let up = self.table.try_index(&operator.up)?;
            let down = self.table.try_index(&operator.down)?;
            let mask = (1u64 << up) | (1u64 << down);
            for (index, &state) in self.sector.states().iter().enumerate() {
                if state & mask == mask {
                    coo.push(index, index, Complex::from(operator.value));
                }
            }
        }

        Ok(Hamiltonian {
            matrix: CsrMatrix::from(&coo),
        })
    }
}
