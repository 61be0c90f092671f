//! Model terms and their expansion into operators
//!
//! A model is a list of `Term`s, each of which acts on bonds of a given neighbour order. Expanding
//! the terms over the bonds of a lattice gives the individual weighted operators from which both
//! the many-body cluster Hamiltonian and the inter-cluster coupling are assembled.
//!
//! Quadratic operators carry the cell translation of their annihilated mode. Hopping bonds are
//! expanded together with their Hermitian partner, which carries the opposite translation, so that
//! any matrix accumulated from the operators is Hermitian.

pub(crate) mod reader;

pub use reader::{ModelFile, ModelSpecification};

use crate::{
    error::BuildError,
    fock::{BasisLabel, Statistics},
};
use nalgebra::DVector;
use num_complex::Complex;
use serde::Deserialize;
use vca_lattice::Bond;

/// A single term in a lattice Hamiltonian
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    /// Orbital and spin conserving hopping t c†_i c_j + h.c. on bonds of order `neighbour`
    Hopping {
        tag: String,
        amplitude: f64,
        neighbour: usize,
    },
    /// On-site energy ε n_i
    Onsite { tag: String, energy: f64 },
    /// Spin dependent on-site field h (n_i↑ - n_i↓)
    Zeeman { tag: String, field: f64 },
    /// On-site interaction U n_i↑ n_i↓
    Hubbard { tag: String, strength: f64 },
}

impl Term {
    pub fn tag(&self) -> &str {
        match self {
            Term::Hopping { tag, .. }
            | Term::Onsite { tag, .. }
            | Term::Zeeman { tag, .. }
            | Term::Hubbard { tag, .. } => tag,
        }
    }
}

/// A weighted one-body operator `value c†_created c_annihilated`
#[derive(Clone, Debug)]
pub struct QuadraticOperator {
    pub value: Complex<f64>,
    pub created: BasisLabel,
    pub annihilated: BasisLabel,
    /// The lattice translation of the annihilated mode relative to the created mode
    pub cell_translation: DVector<f64>,
}

impl QuadraticOperator {
    pub fn is_intra_cell(&self) -> bool {
        self.cell_translation
            .iter()
            .all(|x| x.abs() < vca_lattice::GEOMETRY_TOLERANCE)
    }
}

/// A weighted density-density operator `value n_up n_down`
#[derive(Clone, Debug)]
pub struct HubbardOperator {
    pub value: f64,
    pub up: BasisLabel,
    pub down: BasisLabel,
}

/// The internal degrees of freedom carried by every site
#[derive(Copy, Clone, Debug)]
pub struct InternalDegrees {
    pub statistics: Statistics,
    pub number_of_orbitals: usize,
    pub number_of_spins: usize,
}

/// Expand the one-body terms over `bonds`
pub fn expand_quadratic(
    terms: &[Term],
    bonds: &[Bond],
    internal: &InternalDegrees,
) -> Result<Vec<QuadraticOperator>, BuildError> {
    let mut operators = Vec::new();
    for term in terms {
        match term {
            Term::Hopping {
                amplitude,
                neighbour,
                tag,
            } => {
                if *neighbour == 0 {
                    return Err(BuildError::Model(format!(
                        "hopping term {} acts on-site, use an onsite term instead",
                        tag
                    )));
                }
                for bond in bonds.iter().filter(|bond| bond.neighbour == *neighbour) {
                    for (orbital, spin) in internal.iter() {
                        let start = BasisLabel::new(bond.start, orbital, spin);
                        let end = BasisLabel::new(bond.end, orbital, spin);
                        let value = Complex::from(*amplitude);
                        operators.push(QuadraticOperator {
                            value,
                            created: start,
                            annihilated: end,
                            cell_translation: bond.cell_translation.clone(),
                        });
                        operators.push(QuadraticOperator {
                            value: value.conj(),
                            created: end,
                            annihilated: start,
                            cell_translation: -bond.cell_translation.clone(),
                        });
                    }
                }
            }
            Term::Onsite { energy, .. } => {
                operators.extend(onsite_operators(bonds, internal, |_| *energy));
            }
            Term::Zeeman { field, tag } => {
                if internal.number_of_spins != 2 {
                    return Err(BuildError::Model(format!(
                        "zeeman term {} needs two spin species",
                        tag
                    )));
                }
                operators.extend(onsite_operators(bonds, internal, |spin| {
                    if spin == 0 {
                        *field
                    } else {
                        -*field
                    }
                }));
            }
            Term::Hubbard { .. } => {}
        }
    }
    tracing::trace!("Expanded {} quadratic operators", operators.len());
    Ok(operators)
}

/// Expand the interaction terms over the on-site `bonds`
pub fn expand_hubbard(
    terms: &[Term],
    bonds: &[Bond],
    internal: &InternalDegrees,
) -> Result<Vec<HubbardOperator>, BuildError> {
    let mut operators = Vec::new();
    for term in terms {
        if let Term::Hubbard { strength, tag } = term {
            if internal.number_of_spins != 2 {
                return Err(BuildError::Model(format!(
                    "hubbard term {} needs two spin species",
                    tag
                )));
            }
            for bond in bonds.iter().filter(|bond| bond.is_onsite()) {
                for orbital in 0..internal.number_of_orbitals {
                    operators.push(HubbardOperator {
                        value: *strength,
                        up: BasisLabel::new(bond.start, orbital, 0),
                        down: BasisLabel::new(bond.start, orbital, 1),
                    });
                }
            }
        }
    }
    Ok(operators)
}

fn onsite_operators(
    bonds: &[Bond],
    internal: &InternalDegrees,
    value: impl Fn(usize) -> f64,
) -> Vec<QuadraticOperator> {
    let mut operators = Vec::new();
    for bond in bonds.iter().filter(|bond| bond.is_onsite()) {
        for (orbital, spin) in internal.iter() {
            let label = BasisLabel::new(bond.start, orbital, spin);
            operators.push(QuadraticOperator {
                value: Complex::from(value(spin)),
                created: label,
                annihilated: label,
                cell_translation: bond.cell_translation.clone(),
            });
        }
    }
    operators
}

impl InternalDegrees {
    /// Every (orbital, spin) pair carried by a site
    fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        let number_of_spins = self.number_of_spins;
        (0..self.number_of_orbitals)
            .flat_map(move |orbital| (0..number_of_spins).map(move |spin| (orbital, spin)))
    }
}

#[cfg(test)]
mod test {
    use super::{expand_hubbard, expand_quadratic, InternalDegrees, Term};
    use crate::fock::Statistics;

    fn spinful() -> InternalDegrees {
        InternalDegrees {
            statistics: Statistics::Fermionic,
            number_of_orbitals: 1,
            number_of_spins: 2,
        }
    }

    #[test]
    fn hopping_is_expanded_with_its_hermitian_partner() {
        let bonds = vca_lattice::chain(2, 1.0).bonds(1);
        let terms = vec![Term::Hopping {
            tag: "t".into(),
            amplitude: -1.0,
            neighbour: 1,
        }];
        let operators = expand_quadratic(&terms, &bonds, &spinful()).unwrap();
        // Two nearest-neighbour bonds, two spins, two directions
        assert_eq!(operators.len(), 8);
        for pair in operators.chunks(2) {
            assert_eq!(pair[0].created, pair[1].annihilated);
            assert_eq!(pair[0].value, pair[1].value.conj());
            approx::assert_relative_eq!(
                (&pair[0].cell_translation + &pair[1].cell_translation).norm(),
                0.0
            );
        }
    }

    #[test]
    fn onsite_hopping_is_rejected() {
        let bonds = vca_lattice::chain(1, 1.0).bonds(0);
        let terms = vec![Term::Hopping {
            tag: "t".into(),
            amplitude: 1.0,
            neighbour: 0,
        }];
        assert!(expand_quadratic(&terms, &bonds, &spinful()).is_err());
    }

    #[test]
    fn zeeman_field_splits_the_spins() {
        let bonds = vca_lattice::chain(1, 1.0).bonds(0);
        let terms = vec![Term::Zeeman {
            tag: "h".into(),
            field: 0.3,
        }];
        let operators = expand_quadratic(&terms, &bonds, &spinful()).unwrap();
        assert_eq!(operators.len(), 2);
        let up = operators.iter().find(|op| op.created.spin == 0).unwrap();
        let down = operators.iter().find(|op| op.created.spin == 1).unwrap();
        approx::assert_relative_eq!(up.value.re, 0.3);
        approx::assert_relative_eq!(down.value.re, -0.3);
    }

    #[test]
    fn hubbard_needs_two_spins() {
        let bonds = vca_lattice::chain(2, 1.0).bonds(0);
        let terms = vec![Term::Hubbard {
            tag: "U".into(),
            strength: 4.0,
        }];
        assert_eq!(expand_hubbard(&terms, &bonds, &spinful()).unwrap().len(), 2);
        let spinless = InternalDegrees {
            number_of_spins: 1,
            ..spinful()
        };
        assert!(expand_hubbard(&terms, &bonds, &spinless).is_err());
    }
}
