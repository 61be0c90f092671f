// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! VCA engine computes single-particle spectra of strongly correlated lattice models
//!
//! # Overview
//! The lattice is tiled by identical finite clusters. The many-body problem of a single reference
//! cluster is solved exactly: its ground state is found by restarted Lanczos iteration, and the
//! single-particle excitations above and below it are captured by one single-vector Lanczos Krylov
//! space per basis label and branch. The cluster Green's function `C(ω)` then follows from one
//! tridiagonal solve per Krylov space, contracted against the stored overlaps of every other label.
//!
//! The inter-cluster one-body terms, together with any one-body terms in which the reference
//! Hamiltonian differs from the original, are reinstated perturbatively through
//!
//! G(k, ω) = C(ω) [I - V(k) C(ω)]^{-1}
//!
//! and the result is periodized onto the unit cell of the lattice. With identical original and
//! reference Hamiltonians this is cluster perturbation theory; variational parameters enter as
//! reference-only terms.
//!
//! # Usage
//! VCA engine is distributed as a binary crate. To run it first describe a model in a `.toml` file:
//!
//! ```toml
//! name = "hubbard-chain"
//! neighbours = 1
//! path = [[0.0], [3.14159]]
//!
//! [cluster]
//! points = [[0.0], [1.0]]
//! vectors = [[2.0]]
//!
//! [unit_cell]
//! points = [[0.0]]
//! vectors = [[1.0]]
//!
//! [[original]]
//! kind = "hopping"
//! tag = "t"
//! amplitude = -1.0
//! neighbour = 1
//!
//! [[original]]
//! kind = "hubbard"
//! tag = "U"
//! strength = 4.0
//! ```
//!
//! where the numerical settings are read from `.config/default.toml`.

#![allow(clippy::type_complexity)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Numerical defaults
mod constants;

/// Ground state of the reference cluster
pub mod eigensolver;

/// Error handling
pub mod error;

/// Occupation number bases
pub mod fock;

/// Cluster Green's functions in the Lehmann representation
pub mod greens_functions;

/// Sparse many-body Hamiltonians
pub mod hamiltonian;

/// Lanczos tridiagonalization
pub mod krylov;

/// Model terms and their description on disk
pub mod model;

/// Discrete frequency and momentum spaces, and the spectra sampled on them
pub mod spectral;

/// Helper functions
mod utilities;

/// Periodization of the cluster Green's function
pub mod vca;

pub use constants::*;
