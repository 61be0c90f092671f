//! Shared fixtures for the tests and benchmarks of `vca-engine`

use nalgebra::DMatrix;
use num_complex::Complex;
use rand::{thread_rng, Rng};
use vca_engine::{
    fock::Statistics,
    model::{InternalDegrees, ModelSpecification, Term},
};
use vca_lattice::Lattice;

fn spin_half_fermions() -> InternalDegrees {
    InternalDegrees {
        statistics: Statistics::Fermionic,
        number_of_orbitals: 1,
        number_of_spins: 2,
    }
}

fn hubbard_terms(hopping: f64, interaction: f64) -> Vec<Term> {
    vec![
        Term::Hopping {
            tag: "t".into(),
            amplitude: hopping,
            neighbour: 1,
        },
        Term::Hubbard {
            tag: "U".into(),
            strength: interaction,
        },
    ]
}

fn hubbard_model(
    name: &str,
    cluster: Lattice,
    unit_cell: Lattice,
    hopping: f64,
    interaction: f64,
) -> ModelSpecification {
    let terms = hubbard_terms(hopping, interaction);
    ModelSpecification {
        name: name.into(),
        internal: spin_half_fermions(),
        neighbours: 1,
        particles: None,
        cluster,
        unit_cell,
        original: terms.clone(),
        reference: terms,
        path: vec![],
        mesh: vec![],
    }
}

/// The Hubbard chain tiled by clusters of `sites` sites, at half filling
pub fn hubbard_chain(sites: usize, hopping: f64, interaction: f64) -> ModelSpecification {
    hubbard_model(
        "hubbard-chain",
        vca_lattice::chain(sites, 1.0),
        vca_lattice::chain(1, 1.0),
        hopping,
        interaction,
    )
}

/// The square lattice Hubbard model tiled by `num_x x num_y` clusters, at half filling
pub fn hubbard_square(
    num_x: usize,
    num_y: usize,
    hopping: f64,
    interaction: f64,
) -> ModelSpecification {
    hubbard_model(
        "hubbard-square",
        vca_lattice::rectangle(num_x, num_y, 1.0),
        vca_lattice::rectangle(1, 1, 1.0),
        hopping,
        interaction,
    )
}

/// A dense Hermitian matrix with uniformly distributed entries
pub fn random_hermitian(dimension: usize) -> DMatrix<Complex<f64>> {
    let mut rng = thread_rng();
    let matrix = DMatrix::from_fn(dimension, dimension, |_, _| {
        Complex::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5)
    });
    (&matrix + matrix.adjoint()).scale(0.5)
}
