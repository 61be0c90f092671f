use crate::{eigensolver::GroundStateSolver, vca::VcaSettings};
use color_eyre::eyre::eyre;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub(crate) struct Configuration {
    pub(crate) krylov: KrylovConfiguration,
    pub(crate) eigensolver: EigensolverConfiguration,
    pub(crate) spectral: SpectralConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KrylovConfiguration {
    pub(crate) depth: usize,
    pub(crate) broadening: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EigensolverConfiguration {
    pub(crate) tolerance: f64,
    pub(crate) maximum_iterations: usize,
    pub(crate) subspace: usize,
    #[serde(default)]
    pub(crate) seed: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpectralConfiguration {
    pub(crate) number_of_frequency_points: usize,
    pub(crate) minimum_frequency: f64,
    pub(crate) maximum_frequency: f64,
    pub(crate) chemical_potential: f64,
    pub(crate) points_per_segment: usize,
}

impl Configuration {
    pub(crate) fn build() -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings for the calculation
            .add_source(File::with_name("../.config/default"))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!("../.config/{}", run_mode)).required(false))
            // Single values can be overridden as VCA__KRYLOV__DEPTH=100
            .add_source(Environment::with_prefix("VCA").separator("__"))
            .build()?;

        s.try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }

    pub(crate) fn vca_settings(&self) -> VcaSettings {
        VcaSettings {
            krylov_depth: self.krylov.depth,
            broadening: self.krylov.broadening,
            eigensolver: GroundStateSolver {
                tolerance: self.eigensolver.tolerance,
                maximum_iterations: self.eigensolver.maximum_iterations,
                subspace: self.eigensolver.subspace,
                seed: self.eigensolver.seed,
            },
        }
    }
}
