//! Lattice geometry for cluster perturbation calculations
//!
//! A `Lattice` is a finite set of points together with the translation vectors which tile
//! them through space. The same structure describes both a cluster, whose vectors are the
//! superlattice vectors of the cluster tiling, and a unit cell.
//!
//! Bonds are enumerated by neighbour shell through the `Lattice::bonds` method. Each bond
//! carries the cell translation of its end point, so that a caller can tell the bonds internal
//! to the cluster apart from those which couple neighbouring clusters.

mod connectivity;
mod error;
mod generate;
mod lattice;
mod primitives;

pub use connectivity::*;
pub use error::LatticeError;
pub use generate::*;
pub use lattice::*;
pub use primitives::*;

/// Tolerance used when comparing coordinates and distances
pub const GEOMETRY_TOLERANCE: f64 = 1e-6;
