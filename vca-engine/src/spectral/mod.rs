//! This module provides the discrete frequency and momentum spaces on which the lattice Green's
//! function is sampled, and the scans which turn it into spectra
mod frequency;
mod momentum;

pub use frequency::{FrequencyGrid, FrequencyGridBuilder};
pub use momentum::{MomentumPath, MomentumPathBuilder, ReciprocalMesh};

use crate::vca::{Vca, VcaError};
use nalgebra::DVector;
use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// The spectral function `A[frequency, momentum]` over every pair of grid points
///
/// Each element is evaluated independently, in parallel.
#[tracing::instrument(name = "Spectrum", level = "info", skip_all, fields(frequencies = frequencies.len(), momenta = momenta.len()))]
pub fn single_particle_spectrum(
    vca: &Vca,
    momenta: &[DVector<f64>],
    frequencies: &[f64],
    chemical_potential: f64,
) -> Result<Array2<f64>, VcaError> {
    let number_of_momenta = momenta.len();
    let values = (0..frequencies.len() * number_of_momenta)
        .into_par_iter()
        .map(|index| {
            let frequency = frequencies[index / number_of_momenta];
            let momentum = &momenta[index % number_of_momenta];
            vca.spectral_function(momentum, frequency, chemical_potential)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Array2::from_shape_fn(
        (frequencies.len(), number_of_momenta),
        |(i, j)| values[i * number_of_momenta + j],
    ))
}

/// The momentum averaged spectral function
#[tracing::instrument(name = "Density of states", level = "info", skip_all, fields(frequencies = frequencies.len(), momenta = mesh.num_points()))]
pub fn density_of_states(
    vca: &Vca,
    mesh: &ReciprocalMesh,
    frequencies: &[f64],
    chemical_potential: f64,
) -> Result<Array1<f64>, VcaError> {
    let spectrum = single_particle_spectrum(vca, mesh.points(), frequencies, chemical_potential)?;
    Ok(spectrum.sum_axis(ndarray::Axis(1)) / mesh.num_points() as f64)
}

#[cfg(test)]
mod test {
    use super::{density_of_states, single_particle_spectrum, FrequencyGridBuilder, ReciprocalMesh};
    use crate::{
        fock::Statistics,
        model::{InternalDegrees, ModelSpecification, Term},
        vca::{Vca, VcaBuilder, VcaSettings},
    };
    use nalgebra::DVector;
    use std::f64::consts::PI;

    const HOPPING: f64 = -1.0;

    fn noninteracting_chain() -> Vca {
        let terms = vec![Term::Hopping {
            tag: "t".into(),
            amplitude: HOPPING,
            neighbour: 1,
        }];
        let model = ModelSpecification {
            name: "chain".into(),
            internal: InternalDegrees {
                statistics: Statistics::Fermionic,
                number_of_orbitals: 1,
                number_of_spins: 2,
            },
            neighbours: 1,
            particles: None,
            cluster: vca_lattice::chain(2, 1.0),
            unit_cell: vca_lattice::chain(1, 1.0),
            original: terms.clone(),
            reference: terms,
            path: vec![],
            mesh: vec![],
        };
        VcaBuilder::new()
            .with_model(&model)
            .with_settings(&VcaSettings::default())
            .build()
            .unwrap()
    }

    fn lorentzian(omega: f64, energy: f64, eta: f64) -> f64 {
        eta / PI / ((omega - energy).powi(2) + eta.powi(2))
    }

    #[test]
    fn spectrum_has_one_row_per_frequency() {
        let vca = noninteracting_chain();
        let eta = vca.broadening();
        let momenta = vec![DVector::from_vec(vec![0.0]), DVector::from_vec(vec![PI / 3.0])];
        let frequencies = vec![-2.0, -0.5, 1.0];
        let spectrum = single_particle_spectrum(&vca, &momenta, &frequencies, 0.0).unwrap();
        assert_eq!(spectrum.dim(), (3, 2));
        for (i, &omega) in frequencies.iter().enumerate() {
            for (j, k) in momenta.iter().enumerate() {
                // Two spin species, each a single Lorentzian at the band energy
                let expected = 2.0 * lorentzian(omega, 2.0 * HOPPING * k[0].cos(), eta);
                approx::assert_relative_eq!(spectrum[[i, j]], expected, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn density_of_states_averages_the_band() {
        let vca = noninteracting_chain();
        let eta = vca.broadening();
        let mesh = ReciprocalMesh::new(vca.unit_cell(), &[8]).unwrap();
        let frequencies = FrequencyGridBuilder::new()
            .with_number_of_points(7)
            .with_frequency_range(-3.0..3.0)
            .build()
            .unwrap();
        let dos = density_of_states(&vca, &mesh, frequencies.points(), 0.0).unwrap();
        for (&omega, &value) in frequencies.points().iter().zip(dos.iter()) {
            let expected = mesh
                .points()
                .iter()
                .map(|k| 2.0 * lorentzian(omega, 2.0 * HOPPING * k[0].cos(), eta))
                .sum::<f64>()
                / mesh.num_points() as f64;
            approx::assert_relative_eq!(value, expected, max_relative = 1e-6);
        }
    }
}
