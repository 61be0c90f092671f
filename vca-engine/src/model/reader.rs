use super::{InternalDegrees, Term};
use crate::{error::BuildError, fock::Statistics};
use color_eyre::eyre::eyre;
use config::{Config, File};
use nalgebra::DVector;
use serde::Deserialize;
use std::path::PathBuf;
use vca_lattice::Lattice;

/// The on-disk description of a model, read from a `.toml` file
#[derive(Debug, Deserialize)]
pub struct ModelFile {
    pub name: String,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default = "one")]
    pub orbitals: usize,
    #[serde(default = "two")]
    pub spins: usize,
    #[serde(default = "one")]
    pub neighbours: usize,
    /// Particles in the cluster ground state, half filling when absent
    pub particles: Option<usize>,
    pub cluster: LatticeFile,
    pub unit_cell: LatticeFile,
    pub original: Vec<Term>,
    /// Terms of the reference cluster Hamiltonian, the original terms when absent
    #[serde(default)]
    pub reference: Vec<Term>,
    /// High-symmetry points of the momentum path
    #[serde(default)]
    pub path: Vec<Vec<f64>>,
    /// Number of momentum points along each reciprocal vector for the density of states
    #[serde(default)]
    pub mesh: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LatticeFile {
    pub points: Vec<Vec<f64>>,
    #[serde(default)]
    pub vectors: Vec<Vec<f64>>,
}

fn one() -> usize {
    1
}

fn two() -> usize {
    2
}

impl ModelFile {
    pub fn build(path: PathBuf) -> color_eyre::Result<Self> {
        let s = Config::builder().add_source(File::from(path)).build()?;
        s.try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize model: {:?}", e))
    }
}

impl LatticeFile {
    fn into_lattice(self, name: String) -> Result<Lattice, BuildError> {
        Ok(Lattice::new(
            name,
            self.points.into_iter().map(DVector::from_vec).collect(),
            self.vectors.into_iter().map(DVector::from_vec).collect(),
        )?)
    }
}

/// A validated model, with its geometry converted to lattices
#[derive(Debug)]
pub struct ModelSpecification {
    pub name: String,
    pub internal: InternalDegrees,
    pub neighbours: usize,
    pub particles: Option<usize>,
    pub cluster: Lattice,
    pub unit_cell: Lattice,
    pub original: Vec<Term>,
    pub reference: Vec<Term>,
    pub path: Vec<DVector<f64>>,
    pub mesh: Vec<usize>,
}

impl TryFrom<ModelFile> for ModelSpecification {
    type Error = BuildError;

    fn try_from(file: ModelFile) -> Result<Self, Self::Error> {
        if file.orbitals == 0 || file.spins == 0 {
            return Err(BuildError::Model(
                "every site needs at least one orbital and one spin species".into(),
            ));
        }
        let cluster = file.cluster.into_lattice(format!("{}-cluster", file.name))?;
        let unit_cell = file
            .unit_cell
            .into_lattice(format!("{}-unit-cell", file.name))?;
        if cluster.dimension() != unit_cell.dimension() {
            return Err(BuildError::DimensionMismatch {
                what: "unit cell coordinates",
                expected: cluster.dimension(),
                found: unit_cell.dimension(),
            });
        }
        let path = file
            .path
            .into_iter()
            .map(DVector::from_vec)
            .collect::<Vec<_>>();
        if let Some(point) = path.iter().find(|point| point.len() != cluster.dimension()) {
            return Err(BuildError::DimensionMismatch {
                what: "momentum path point",
                expected: cluster.dimension(),
                found: point.len(),
            });
        }
        let reference = if file.reference.is_empty() {
            file.original.clone()
        } else {
            file.reference
        };

        Ok(Self {
            name: file.name,
            internal: InternalDegrees {
                statistics: file.statistics,
                number_of_orbitals: file.orbitals,
                number_of_spins: file.spins,
            },
            neighbours: file.neighbours,
            particles: file.particles,
            cluster,
            unit_cell,
            original: file.original,
            reference,
            path,
            mesh: file.mesh,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{ModelFile, ModelSpecification};
    use config::{Config, File, FileFormat};

    const DIMER: &str = r#"
        name = "dimer"
        neighbours = 1
        path = [[0.0], [3.14159]]

        [cluster]
        points = [[0.0], [1.0]]
        vectors = [[2.0]]

        [unit_cell]
        points = [[0.0]]
        vectors = [[1.0]]

        [[original]]
        kind = "hopping"
        tag = "t"
        amplitude = -1.0
        neighbour = 1

        [[original]]
        kind = "hubbard"
        tag = "U"
        strength = 4.0
    "#;

    fn parse(source: &str) -> ModelFile {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn model_file_deserializes_with_defaults() {
        let file = parse(DIMER);
        assert_eq!(file.orbitals, 1);
        assert_eq!(file.spins, 2);
        assert!(file.particles.is_none());
        assert_eq!(file.original.len(), 2);
        assert_eq!(file.original[1].tag(), "U");
    }

    #[test]
    fn missing_reference_terms_fall_back_to_the_original() {
        let model = ModelSpecification::try_from(parse(DIMER)).unwrap();
        assert_eq!(model.reference.len(), model.original.len());
        assert_eq!(model.cluster.num_points(), 2);
        assert_eq!(model.path.len(), 2);
    }
}
