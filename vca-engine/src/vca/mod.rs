// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # VCA
//!
//! The cluster perturbation context. The reference cluster is solved exactly once, on
//! construction, and the lattice Green's function at any momentum and frequency follows from the
//! discrete Dyson equation
//!
//! G(k, ω) = C(ω) [I - V(k) C(ω)]^{-1}
//!
//! where `C` is the cluster Green's function and `V` the one-body coupling which the reference
//! cluster omits. The result is folded back to lattice momentum with the structure factor and
//! averaged onto the unit cell.
//!
//! The context is built from a validated model as
//!
//! ```ignore
//! let vca = VcaBuilder::new()
//!     .with_model(&model)
//!     .with_settings(&settings)
//!     .build()?;
//! let g = vca.lattice_greens_function(&k, omega, mu)?;
//! ```

mod coupling;
mod perioder;

pub use coupling::quadratic_difference;
pub use perioder::{Perioder, PerioderError};

use crate::{
    constants::{DEFAULT_BROADENING, DEFAULT_KRYLOV_DEPTH},
    eigensolver::{EigensolverError, GroundStateSolver},
    error::BuildError,
    fock::{BasisTable, FockSector},
    greens_functions::{
        ClusterGreensFunction, ClusterSectors, ClusterSpectralData, ClusterSpectralDataBuilder,
        GreensFunctionError, SectorHamiltonian,
    },
    hamiltonian::{ClusterOperators, HamiltonianBuilder},
    model::{expand_hubbard, expand_quadratic, InternalDegrees, ModelSpecification, QuadraticOperator},
};
use miette::Diagnostic;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex;
use vca_lattice::Lattice;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum VcaError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Eigensolver(#[from] EigensolverError),
    #[error(transparent)]
    GreensFunction(#[from] GreensFunctionError),
    #[error(transparent)]
    Perioder(#[from] PerioderError),
}

/// Numerical settings of a VCA calculation
#[derive(Copy, Clone, Debug)]
pub struct VcaSettings {
    pub krylov_depth: usize,
    pub broadening: f64,
    pub eigensolver: GroundStateSolver,
}

impl Default for VcaSettings {
    fn default() -> Self {
        Self {
            krylov_depth: DEFAULT_KRYLOV_DEPTH,
            broadening: DEFAULT_BROADENING,
            eigensolver: GroundStateSolver::default(),
        }
    }
}

/// The solved reference cluster and everything needed to periodize its Green's function
#[derive(Debug)]
pub struct Vca {
    cluster: Lattice,
    unit_cell: Lattice,
    internal: InternalDegrees,
    cluster_table: BasisTable,
    unit_cell_table: BasisTable,
    original: Vec<QuadraticOperator>,
    reference: Vec<QuadraticOperator>,
    spectral_data: ClusterSpectralData,
    perioder: Perioder,
    broadening: f64,
}

/// Builder for a `Vca` context from references to a model and the numerical settings
pub struct VcaBuilder<RefModel, RefSettings> {
    model: RefModel,
    settings: RefSettings,
}

impl Default for VcaBuilder<(), ()> {
    fn default() -> Self {
        Self {
            model: (),
            settings: (),
        }
    }
}

impl VcaBuilder<(), ()> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<RefModel, RefSettings> VcaBuilder<RefModel, RefSettings> {
    pub fn with_model<Model>(self, model: &Model) -> VcaBuilder<&Model, RefSettings> {
        VcaBuilder {
            model,
            settings: self.settings,
        }
    }

    pub fn with_settings<Settings>(self, settings: &Settings) -> VcaBuilder<RefModel, &Settings> {
        VcaBuilder {
            model: self.model,
            settings,
        }
    }
}

impl<'a> VcaBuilder<&'a ModelSpecification, &'a VcaSettings> {
    #[tracing::instrument(name = "VCA builder", level = "info", skip(self), fields(model = %self.model.name))]
    pub fn build(self) -> Result<Vca, VcaError> {
        let model = self.model;
        let internal = model.internal;
        let cluster_table = BasisTable::from_lattice(
            &model.cluster,
            internal.number_of_orbitals,
            internal.number_of_spins,
        );
        let unit_cell_table = BasisTable::from_lattice(
            &model.unit_cell,
            internal.number_of_orbitals,
            internal.number_of_spins,
        );

        tracing::info!("Expanding the model terms");
        let bonds = model.cluster.bonds(model.neighbours);
        let intra_cell_bonds = bonds
            .iter()
            .filter(|bond| bond.is_intra_cell())
            .cloned()
            .collect::<Vec<_>>();
        let original = expand_quadratic(&model.original, &bonds, &internal)?;
        let reference = expand_quadratic(&model.reference, &intra_cell_bonds, &internal)?;
        let operators = ClusterOperators {
            quadratic: reference.clone(),
            interaction: expand_hubbard(&model.reference, &intra_cell_bonds, &internal)?,
        };

        let modes = cluster_table.len();
        let particles = model.particles.unwrap_or(modes / 2);
        tracing::info!("Solving the {} particle sector of {} modes", particles, modes);
        let ground = FockSector::new(modes, particles)?;
        let sector_hamiltonian = |sector: FockSector| -> Result<SectorHamiltonian, BuildError> {
            let hamiltonian = HamiltonianBuilder::new()
                .with_sector(&sector)
                .with_table(&cluster_table)
                .with_operators(&operators)
                .build(internal.statistics)?;
            Ok(SectorHamiltonian {
                sector,
                hamiltonian,
            })
        };
        let sectors = ClusterSectors {
            removal: sector_hamiltonian(ground.neighbour(-1)?)?,
            addition: sector_hamiltonian(ground.neighbour(1)?)?,
            ground: sector_hamiltonian(ground)?,
        };
        let ground_state = self.settings.eigensolver.solve(&sectors.ground.hamiltonian)?;

        let spectral_data = ClusterSpectralDataBuilder::new()
            .with_sectors(&sectors)
            .with_ground_state(&ground_state)
            .with_table(&cluster_table)
            .with_depth(self.settings.krylov_depth)
            .build(internal.statistics)?;

        let perioder = Perioder::new(
            &model.cluster,
            &cluster_table,
            &model.unit_cell,
            &unit_cell_table,
        )?;

        Ok(Vca {
            cluster: model.cluster.clone(),
            unit_cell: model.unit_cell.clone(),
            internal,
            cluster_table,
            unit_cell_table,
            original,
            reference,
            spectral_data,
            perioder,
            broadening: self.settings.broadening,
        })
    }
}

impl Vca {
    pub fn cluster(&self) -> &Lattice {
        &self.cluster
    }

    pub fn unit_cell(&self) -> &Lattice {
        &self.unit_cell
    }

    pub fn internal(&self) -> &InternalDegrees {
        &self.internal
    }

    pub fn cluster_table(&self) -> &BasisTable {
        &self.cluster_table
    }

    pub fn unit_cell_table(&self) -> &BasisTable {
        &self.unit_cell_table
    }

    pub fn spectral_data(&self) -> &ClusterSpectralData {
        &self.spectral_data
    }

    pub fn perioder(&self) -> &Perioder {
        &self.perioder
    }

    pub fn ground_state_energy(&self) -> f64 {
        self.spectral_data.ground_state_energy
    }

    pub fn broadening(&self) -> f64 {
        self.broadening
    }

    pub fn with_broadening(self, broadening: f64) -> Self {
        Self { broadening, ..self }
    }

    /// The coupling `V(k)` between neighbouring clusters
    pub fn coupling(&self, momentum: &DVector<f64>) -> Result<DMatrix<Complex<f64>>, BuildError> {
        quadratic_difference(&self.original, &self.reference, &self.cluster_table, momentum)
    }

    /// The cluster Green's function `C(ω)`
    pub fn cluster_greens_function(
        &self,
        frequency: f64,
        chemical_potential: f64,
    ) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        ClusterGreensFunction::new(&self.spectral_data)
            .with_broadening(self.broadening)
            .evaluate(frequency, chemical_potential)
    }

    /// `S[p, q] = exp(-i k.(r_p - r_q))` over the cluster labels
    pub fn structure_factor(&self, momentum: &DVector<f64>) -> Result<DMatrix<Complex<f64>>, BuildError> {
        self.check_momentum(momentum)?;
        let phases = self
            .cluster_table
            .labels()
            .iter()
            .map(|label| momentum.dot(self.cluster.coordinate(label.site)))
            .collect::<Vec<_>>();
        let n = phases.len();
        Ok(DMatrix::from_fn(n, n, |p, q| {
            Complex::new(0_f64, -(phases[p] - phases[q])).exp()
        }))
    }

    /// The lattice Green's function at the resolution of the cluster labels
    ///
    /// The structure factor multiplies element-wise, `G_full[p, q] = S[p, q] G[p, q]` with
    /// `G = C (I - V C)^{-1}`. It is a Hadamard product, not a matrix product.
    pub fn cluster_resolved_greens_function(
        &self,
        momentum: &DVector<f64>,
        frequency: f64,
        chemical_potential: f64,
    ) -> Result<DMatrix<Complex<f64>>, VcaError> {
        let coupling = self.coupling(momentum)?;
        let cluster = self.cluster_greens_function(frequency, chemical_potential)?;
        let n = cluster.nrows();
        let dyson = (DMatrix::identity(n, n) - &coupling * &cluster)
            .try_inverse()
            .ok_or(GreensFunctionError::Inversion { frequency })?;
        let greens_function = cluster * dyson;
        Ok(self.structure_factor(momentum)?.component_mul(&greens_function))
    }

    /// The lattice Green's function averaged onto the unit cell labels
    ///
    /// `G_cell[a, b] = (1 / |group_a|) Σ_{p ∈ group_a, q ∈ group_b} G_full[p, q]`
    #[tracing::instrument(level = "trace", skip(self, momentum))]
    pub fn lattice_greens_function(
        &self,
        momentum: &DVector<f64>,
        frequency: f64,
        chemical_potential: f64,
    ) -> Result<DMatrix<Complex<f64>>, VcaError> {
        let full = self.cluster_resolved_greens_function(momentum, frequency, chemical_potential)?;
        let groups = self.perioder.groups();
        Ok(DMatrix::from_fn(groups.len(), groups.len(), |a, b| {
            let sum = groups[a]
                .iter()
                .flat_map(|&p| groups[b].iter().map(move |&q| (p, q)))
                .map(|(p, q)| full[(p, q)])
                .sum::<Complex<f64>>();
            sum / groups[a].len() as f64
        }))
    }

    /// The single-particle spectral function `-(1/π) Tr Im G_cell(k, ω)`
    pub fn spectral_function(
        &self,
        momentum: &DVector<f64>,
        frequency: f64,
        chemical_potential: f64,
    ) -> Result<f64, VcaError> {
        let greens_function =
            self.lattice_greens_function(momentum, frequency, chemical_potential)?;
        Ok(-crate::utilities::matrices::imaginary_part(&greens_function).trace()
            / std::f64::consts::PI)
    }

    fn check_momentum(&self, momentum: &DVector<f64>) -> Result<(), BuildError> {
        if momentum.len() != self.cluster.dimension() {
            return Err(BuildError::DimensionMismatch {
                what: "momentum",
                expected: self.cluster.dimension(),
                found: momentum.len(),
            });
        }
        Ok(())
    }
}
