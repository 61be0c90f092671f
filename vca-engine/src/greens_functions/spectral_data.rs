use crate::{
    constants::DEFAULT_KRYLOV_DEPTH,
    eigensolver::GroundState,
    error::BuildError,
    fock::{BasisTable, FockSector, Statistics},
    hamiltonian::Hamiltonian,
    krylov::{KrylovBuilder, KrylovResult},
};
use nalgebra::DVector;
use num_complex::Complex;
use rayon::prelude::*;

/// A Hamiltonian together with the sector it is restricted to
#[derive(Clone, Debug)]
pub struct SectorHamiltonian {
    pub sector: FockSector,
    pub hamiltonian: Hamiltonian,
}

impl SectorHamiltonian {
    fn validate(&self, what: &'static str) -> Result<(), BuildError> {
        if self.hamiltonian.num_rows() != self.sector.dimension() {
            return Err(BuildError::DimensionMismatch {
                what,
                expected: self.sector.dimension(),
                found: self.hamiltonian.num_rows(),
            });
        }
        Ok(())
    }
}

/// The ground-state sector and its two neighbours
#[derive(Clone, Debug)]
pub struct ClusterSectors {
    pub ground: SectorHamiltonian,
    pub removal: SectorHamiltonian,
    pub addition: SectorHamiltonian,
}

/// The Krylov data of every single-particle excitation of the cluster ground state
///
/// Entries of `removal` and `addition` follow the order of the basis table. The data is
/// read-only once built and is shared between all frequency and momentum evaluations.
#[derive(Clone, Debug)]
pub struct ClusterSpectralData {
    pub ground_state_energy: f64,
    pub statistics: Statistics,
    pub removal: Vec<KrylovResult>,
    pub addition: Vec<KrylovResult>,
}

impl ClusterSpectralData {
    pub fn number_of_labels(&self) -> usize {
        self.addition.len()
    }
}

/// Builder for the spectral data from references to the sectors, the ground state and the table
pub struct ClusterSpectralDataBuilder<RefSectors, RefGroundState, RefTable> {
    sectors: RefSectors,
    ground_state: RefGroundState,
    table: RefTable,
    depth: usize,
}

impl Default for ClusterSpectralDataBuilder<(), (), ()> {
    fn default() -> Self {
        Self {
            sectors: (),
            ground_state: (),
            table: (),
            depth: DEFAULT_KRYLOV_DEPTH,
        }
    }
}

impl ClusterSpectralDataBuilder<(), (), ()> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<RefSectors, RefGroundState, RefTable>
    ClusterSpectralDataBuilder<RefSectors, RefGroundState, RefTable>
{
    pub fn with_sectors<Sectors>(
        self,
        sectors: &Sectors,
    ) -> ClusterSpectralDataBuilder<&Sectors, RefGroundState, RefTable> {
        ClusterSpectralDataBuilder {
            sectors,
            ground_state: self.ground_state,
            table: self.table,
            depth: self.depth,
        }
    }

    pub fn with_ground_state<State>(
        self,
        ground_state: &State,
    ) -> ClusterSpectralDataBuilder<RefSectors, &State, RefTable> {
        ClusterSpectralDataBuilder {
            sectors: self.sectors,
            ground_state,
            table: self.table,
            depth: self.depth,
        }
    }

    pub fn with_table<Table>(
        self,
        table: &Table,
    ) -> ClusterSpectralDataBuilder<RefSectors, RefGroundState, &Table> {
        ClusterSpectralDataBuilder {
            sectors: self.sectors,
            ground_state: self.ground_state,
            table,
            depth: self.depth,
        }
    }

    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }
}

impl<'a> ClusterSpectralDataBuilder<&'a ClusterSectors, &'a GroundState, &'a BasisTable> {
    #[tracing::instrument(name = "Cluster spectral data", level = "info", skip_all, fields(labels = self.table.len()))]
    pub fn build(self, statistics: Statistics) -> Result<ClusterSpectralData, BuildError> {
        let sectors = self.sectors;
        sectors.ground.validate("ground state sector Hamiltonian")?;
        sectors.removal.validate("removal sector Hamiltonian")?;
        sectors.addition.validate("addition sector Hamiltonian")?;
        if self.ground_state.vector.len() != sectors.ground.sector.dimension() {
            return Err(BuildError::DimensionMismatch {
                what: "ground state vector",
                expected: sectors.ground.sector.dimension(),
                found: self.ground_state.vector.len(),
            });
        }
        if self.table.len() != sectors.ground.sector.modes() {
            return Err(BuildError::DimensionMismatch {
                what: "basis table",
                expected: sectors.ground.sector.modes(),
                found: self.table.len(),
            });
        }

        let ground = &sectors.ground.sector;
        let vector = &self.ground_state.vector;
        let removal_starts = (0..self.table.len())
            .map(|mode| ground.annihilate(statistics, mode, vector, &sectors.removal.sector))
            .collect::<Result<Vec<_>, _>>()?;
        let addition_starts = (0..self.table.len())
            .map(|mode| ground.create(statistics, mode, vector, &sectors.addition.sector))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Building {} removal Krylov spaces", removal_starts.len());
        let removal = krylov_results(&sectors.removal.hamiltonian, &removal_starts, self.depth)?;
        tracing::info!("Building {} addition Krylov spaces", addition_starts.len());
        let addition = krylov_results(&sectors.addition.hamiltonian, &addition_starts, self.depth)?;

        Ok(ClusterSpectralData {
            ground_state_energy: self.ground_state.energy,
            statistics,
            removal,
            addition,
        })
    }
}

/// One Krylov result per starting vector, built in parallel
fn krylov_results(
    hamiltonian: &Hamiltonian,
    starts: &[DVector<Complex<f64>>],
    depth: usize,
) -> Result<Vec<KrylovResult>, BuildError> {
    starts
        .par_iter()
        .map(|start| {
            KrylovBuilder::new()
                .with_operator(hamiltonian)
                .with_start(start)
                .with_depth(depth)
                .build()
                .map(|subspace| subspace.into_result(start, starts))
        })
        .collect()
}
