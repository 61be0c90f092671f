//! # Calculations
//!
//! Delegated functions from `App` which evaluate the solved cluster and write the results to
//! plain whitespace separated tables.

use super::{styles::Styles, Configuration};
use crate::{
    error::IOError,
    spectral::{
        density_of_states, single_particle_spectrum, FrequencyGrid, FrequencyGridBuilder,
        MomentumPathBuilder, ReciprocalMesh,
    },
    utilities::matrices::imaginary_part,
    vca::Vca,
};
use color_eyre::eyre::eyre;
use ndarray::Array2;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub(crate) fn frequency_grid(config: &Configuration) -> color_eyre::Result<FrequencyGrid> {
    Ok(FrequencyGridBuilder::new()
        .with_number_of_points(config.spectral.number_of_frequency_points)
        .with_frequency_range(config.spectral.minimum_frequency..config.spectral.maximum_frequency)
        .build()?)
}

/// The spectral function along the momentum path of the model, written to `spectrum.dat` as
/// `distance frequency A` rows
pub(crate) fn spectrum_along_path(
    vca: &Vca,
    vertices: &[nalgebra::DVector<f64>],
    config: &Configuration,
    results: &Path,
    styles: &Styles,
) -> color_eyre::Result<()> {
    if vertices.is_empty() {
        return Err(eyre!("The model defines no momentum path."));
    }
    let path = MomentumPathBuilder::new()
        .with_vertices(vertices)
        .with_points_per_segment(config.spectral.points_per_segment)
        .build()?;
    let grid = frequency_grid(config)?;
    tracing::info!(
        "Spectrum over {} momenta and {} frequencies",
        path.num_points(),
        grid.num_points()
    );
    let spectrum = single_particle_spectrum(
        vca,
        path.points(),
        grid.points(),
        config.spectral.chemical_potential,
    )?;

    write_spectrum(&results.join("spectrum.dat"), path.distances(), grid.points(), &spectrum)?;
    println!("{}", styles.heading("Spectrum"));
    println!("{}", styles.entry("momenta", path.num_points()));
    println!("{}", styles.entry("maximum", spectrum.fold(0_f64, |acc, &x| acc.max(x))));
    Ok(())
}

/// The momentum averaged spectral function on the reciprocal mesh of the model, written to
/// `dos.dat` as `frequency N` rows
pub(crate) fn density_of_states_on_mesh(
    vca: &Vca,
    divisions: &[usize],
    config: &Configuration,
    results: &Path,
    styles: &Styles,
) -> color_eyre::Result<()> {
    let mesh = ReciprocalMesh::new(vca.unit_cell(), divisions)?;
    let grid = frequency_grid(config)?;
    let dos = density_of_states(vca, &mesh, grid.points(), config.spectral.chemical_potential)?;

    let rows = grid
        .points()
        .iter()
        .zip(dos.iter())
        .map(|(&frequency, &value)| [frequency, value]);
    write_columns(&results.join("dos.dat"), "frequency dos", rows)?;

    let weight = grid.integrate(&dos.to_vec());
    tracing::info!("Integrated spectral weight {}", weight);
    println!("{}", styles.heading("Density of states"));
    println!("{}", styles.entry("momenta", mesh.num_points()));
    println!("{}", styles.entry("spectral weight", weight));
    Ok(())
}

/// The local spectral function of the reference cluster `-(1/π) Tr Im C(ω)`, written to
/// `cluster.dat` as `frequency A` rows
pub(crate) fn cluster_spectrum(
    vca: &Vca,
    config: &Configuration,
    results: &Path,
    styles: &Styles,
) -> color_eyre::Result<()> {
    let grid = frequency_grid(config)?;
    let values = grid
        .points()
        .iter()
        .map(|&frequency| -> color_eyre::Result<f64> {
            let greens_function =
                vca.cluster_greens_function(frequency, config.spectral.chemical_potential)?;
            Ok(-imaginary_part(&greens_function).trace() / std::f64::consts::PI)
        })
        .collect::<color_eyre::Result<Vec<_>>>()?;

    let rows = grid
        .points()
        .iter()
        .zip(values.iter())
        .map(|(&frequency, &value)| [frequency, value]);
    write_columns(&results.join("cluster.dat"), "frequency spectrum", rows)?;

    println!("{}", styles.heading("Cluster spectrum"));
    println!("{}", styles.entry("labels", vca.cluster_table().len()));
    println!("{}", styles.entry("spectral weight", grid.integrate(&values)));
    Ok(())
}

fn write_spectrum(
    path: &Path,
    distances: &[f64],
    frequencies: &[f64],
    spectrum: &Array2<f64>,
) -> Result<(), IOError> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "# distance frequency spectrum")?;
    for (j, distance) in distances.iter().enumerate() {
        for (i, frequency) in frequencies.iter().enumerate() {
            writeln!(file, "{} {} {}", distance, frequency, spectrum[[i, j]])?;
        }
        // Blank line between momenta, for gnuplot's pm3d
        writeln!(file)?;
    }
    file.flush()?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn write_columns<const N: usize>(
    path: &Path,
    header: &str,
    rows: impl Iterator<Item = [f64; N]>,
) -> Result<(), IOError> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "# {}", header)?;
    for row in rows {
        let line = row.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        writeln!(file, "{}", line.join(" "))?;
    }
    file.flush()?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
