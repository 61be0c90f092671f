// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Green's functions
//!
//! The cluster Green's function in the Lehmann representation. The single-particle excitations
//! of the cluster ground state are described by one Krylov space per basis label and per
//! neighbouring particle-number sector, collected in `ClusterSpectralData`. Evaluating the
//! Green's function at a frequency then only requires tridiagonal solves.
//!
//! The spectral data is constructed through the `ClusterSpectralDataBuilder`
//!
//! ```ignore
//! let data = ClusterSpectralDataBuilder::new()
//!     .with_sectors(&sectors)
//!     .with_ground_state(&ground_state)
//!     .with_table(&table)
//!     .with_depth(200)
//!     .build(statistics)?;
//! let matrix = ClusterGreensFunction::new(&data)
//!     .with_broadening(0.05)
//!     .evaluate(frequency, chemical_potential)?;
//! ```

mod cluster;
mod lehmann;
mod spectral_data;

pub use cluster::{cluster_greens_function, ClusterGreensFunction};
pub use lehmann::{LehmannBranch, LehmannElement};
pub use spectral_data::{
    ClusterSectors, ClusterSpectralData, ClusterSpectralDataBuilder, SectorHamiltonian,
};

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum GreensFunctionError {
    #[error("the broadening must be positive, found {0}")]
    Broadening(f64),
    #[error("the tridiagonal resolvent is singular at frequency {frequency}")]
    SingularResolvent { frequency: f64 },
    #[error("I - VC is not invertible at frequency {frequency}")]
    Inversion { frequency: f64 },
    #[error("{what}: expected dimension {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}
