//! Single-particle labels and many-body occupation-number sectors
//!
//! Every single-particle degree of freedom of a cluster is identified by a `BasisLabel`. The
//! labels of a cluster are collected in a `BasisTable`, which fixes the integer ordering used by
//! every matrix in the calculation: the cluster Green's function, the coupling matrix and the
//! structure factor all index their rows and columns through the same table.
//!
//! The many-body states are occupation-number bit strings, grouped into `FockSector`s of fixed
//! particle number. The `Statistics` tag decides the exchange signs picked up when particles are
//! created or destroyed.

mod sector;

pub use sector::FockSector;

use crate::error::BuildError;
use serde::Deserialize;
use std::collections::HashMap;
use vca_lattice::Lattice;

/// Identifies one single-particle degree of freedom
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasisLabel {
    pub site: usize,
    pub orbital: usize,
    pub spin: usize,
}

impl BasisLabel {
    pub fn new(site: usize, orbital: usize, spin: usize) -> Self {
        Self {
            site,
            orbital,
            spin,
        }
    }

    /// True when two labels differ at most in their site
    pub fn is_internal_match(&self, other: &BasisLabel) -> bool {
        self.orbital == other.orbital && self.spin == other.spin
    }
}

impl std::fmt::Display for BasisLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(site {}, orbital {}, spin {})",
            self.site, self.orbital, self.spin
        )
    }
}

/// The ordered set of single-particle labels of a lattice
///
/// Labels are ordered spin-major, then by site, then by orbital.
#[derive(Clone, Debug)]
pub struct BasisTable {
    labels: Vec<BasisLabel>,
    lookup: HashMap<BasisLabel, usize>,
}

impl BasisTable {
    pub fn from_labels(labels: Vec<BasisLabel>) -> Self {
        let lookup = labels
            .iter()
            .enumerate()
            .map(|(index, &label)| (label, index))
            .collect();
        Self { labels, lookup }
    }

    pub fn from_lattice(lattice: &Lattice, number_of_orbitals: usize, number_of_spins: usize) -> Self {
        let mut labels = Vec::with_capacity(lattice.num_points() * number_of_orbitals * number_of_spins);
        for spin in 0..number_of_spins {
            for point in lattice.points() {
                for orbital in 0..number_of_orbitals {
                    labels.push(BasisLabel::new(point.site, orbital, spin));
                }
            }
        }
        Self::from_labels(labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> &BasisLabel {
        &self.labels[index]
    }

    pub fn labels(&self) -> &[BasisLabel] {
        &self.labels
    }

    pub fn index(&self, label: &BasisLabel) -> Option<usize> {
        self.lookup.get(label).copied()
    }

    /// The index of `label`, failing if the label is not in the table
    pub fn try_index(&self, label: &BasisLabel) -> Result<usize, BuildError> {
        self.index(label).ok_or(BuildError::MissingLabel(*label))
    }
}

/// The exchange statistics of the particles in the model
///
/// Selected once when the calculation context is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistics {
    /// Fermions, with a Jordan-Wigner string ordered by table index
    Fermionic,
    /// Hard-core bosons, which commute between different modes
    HardCoreBosonic,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::Fermionic
    }
}

impl Statistics {
    /// The sign picked up when an operator on `mode` passes the occupied modes below it
    fn exchange_sign(&self, state: u64, mode: usize) -> f64 {
        match self {
            Statistics::Fermionic => {
                let below = state & ((1u64 << mode) - 1);
                if below.count_ones() % 2 == 0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Statistics::HardCoreBosonic => 1.0,
        }
    }

    /// Destroy a particle in `mode`, returning the sign and the resulting state
    pub fn annihilate(&self, state: u64, mode: usize) -> Option<(f64, u64)> {
        if state & (1u64 << mode) == 0 {
            return None;
        }
        Some((self.exchange_sign(state, mode), state ^ (1u64 << mode)))
    }

    /// Create a particle in `mode`, returning the sign and the resulting state
    pub fn create(&self, state: u64, mode: usize) -> Option<(f64, u64)> {
        if state & (1u64 << mode) != 0 {
            return None;
        }
        Some((self.exchange_sign(state, mode), state | (1u64 << mode)))
    }

    /// The relative sign of the removal contribution to the Lehmann sum
    ///
    /// Fermionic Green's functions are built from anticommutators, bosonic ones from commutators.
    pub fn hole_sign(&self) -> f64 {
        match self {
            Statistics::Fermionic => 1.0,
            Statistics::HardCoreBosonic => -1.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{BasisLabel, BasisTable, Statistics};

    #[test]
    fn table_is_spin_major() {
        let lattice = vca_lattice::chain(2, 1.0);
        let table = BasisTable::from_lattice(&lattice, 1, 2);
        assert_eq!(table.len(), 4);
        assert_eq!(*table.label(1), BasisLabel::new(1, 0, 0));
        assert_eq!(*table.label(2), BasisLabel::new(0, 0, 1));
        assert_eq!(table.index(&BasisLabel::new(1, 0, 1)), Some(3));
        assert!(table.try_index(&BasisLabel::new(2, 0, 0)).is_err());
    }

    #[test]
    fn fermionic_signs_follow_the_jordan_wigner_string() {
        let statistics = Statistics::Fermionic;
        // Modes 0 and 2 occupied, creating in mode 3 passes two particles
        let state = 0b0101;
        assert_eq!(statistics.create(state, 3), Some((1.0, 0b1101)));
        // Creating in mode 1 passes one particle
        assert_eq!(statistics.create(state, 1), Some((-1.0, 0b0111)));
        assert_eq!(statistics.create(state, 2), None);
        assert_eq!(statistics.annihilate(state, 2), Some((-1.0, 0b0001)));
        assert_eq!(statistics.annihilate(state, 1), None);
    }

    #[test]
    fn hard_core_bosons_never_pick_up_a_sign() {
        let statistics = Statistics::HardCoreBosonic;
        assert_eq!(statistics.create(0b0101, 1), Some((1.0, 0b0111)));
        assert_eq!(statistics.hole_sign(), -1.0);
    }

    #[test]
    fn creation_after_annihilation_on_the_same_mode_is_sign_free() {
        let statistics = Statistics::Fermionic;
        let state = 0b1011;
        let (first, intermediate) = statistics.annihilate(state, 3).unwrap();
        let (second, last) = statistics.create(intermediate, 3).unwrap();
        assert_eq!(last, state);
        assert_eq!(first * second, 1.0);
    }
}
