use crate::{
    error::BuildError, fock::BasisTable, model::QuadraticOperator,
    utilities::matrices::is_hermitian,
};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

/// The momentum-dependent one-body coupling omitted by the reference cluster
///
/// Every original operator `value c†_a c_b` whose annihilated mode sits in the cluster translated
/// by `R` contributes `value exp(i k.R)` at `(a, b)`. The reference operators are intra-cluster and
/// contribute without a phase. The result is `Ω - Ρ`, Hermitian because every bond operator
/// arrives together with its partner.
///
/// Rows index the created label and columns the annihilated label, `V[created, annihilated]`.
pub fn quadratic_difference(
    original: &[QuadraticOperator],
    reference: &[QuadraticOperator],
    table: &BasisTable,
    momentum: &DVector<f64>,
) -> Result<DMatrix<Complex<f64>>, BuildError> {
    let n = table.len();
    let mut omega = DMatrix::zeros(n, n);
    for operator in original {
        if operator.cell_translation.len() != momentum.len() {
            return Err(BuildError::DimensionMismatch {
                what: "momentum",
                expected: operator.cell_translation.len(),
                found: momentum.len(),
            });
        }
        let created = table.try_index(&operator.created)?;
        let annihilated = table.try_index(&operator.annihilated)?;
        let phase = if operator.is_intra_cell() {
            Complex::from(1_f64)
        } else {
            Complex::new(0_f64, momentum.dot(&operator.cell_translation)).exp()
        };
        omega[(created, annihilated)] += operator.value * phase;
    }

    let mut rho = DMatrix::zeros(n, n);
    for operator in reference {
        if !operator.is_intra_cell() {
            return Err(BuildError::Model(format!(
                "reference operator on {} leaves the cluster",
                operator.created
            )));
        }
        let created = table.try_index(&operator.created)?;
        let annihilated = table.try_index(&operator.annihilated)?;
        rho[(created, annihilated)] += operator.value;
    }
    let difference = omega - rho;
    debug_assert!(is_hermitian(&difference));
    Ok(difference)
}

#[cfg(test)]
mod test {
    use super::quadratic_difference;
    use crate::{
        fock::{BasisTable, Statistics},
        model::{expand_quadratic, InternalDegrees, Term},
    };
    use nalgebra::DVector;
    use num_complex::Complex;

    fn internal() -> InternalDegrees {
        InternalDegrees {
            statistics: Statistics::Fermionic,
            number_of_orbitals: 1,
            number_of_spins: 1,
        }
    }

    fn hopping(amplitude: f64) -> Vec<Term> {
        vec![Term::Hopping {
            tag: "t".into(),
            amplitude,
            neighbour: 1,
        }]
    }

    #[test]
    fn identical_intra_cluster_terms_cancel() {
        // An isolated dimer, the lattice vector is too long for bonds to leave the cluster
        let cluster = vca_lattice::Lattice::new(
            "dimer",
            vec![DVector::from_vec(vec![0.0]), DVector::from_vec(vec![1.0])],
            vec![DVector::from_vec(vec![10.0])],
        )
        .unwrap();
        let table = BasisTable::from_lattice(&cluster, 1, 1);
        let original = expand_quadratic(&hopping(-1.0), &cluster.bonds(1), &internal()).unwrap();
        let reference =
            expand_quadratic(&hopping(-1.0), &cluster.intra_cell_bonds(1), &internal()).unwrap();
        let coupling =
            quadratic_difference(&original, &reference, &table, &DVector::zeros(1)).unwrap();
        approx::assert_relative_eq!(coupling.norm(), 0.0);
    }

    #[test]
    fn inter_cluster_bonds_carry_the_momentum_phase() {
        let cluster = vca_lattice::chain(2, 1.0);
        let table = BasisTable::from_lattice(&cluster, 1, 1);
        let original = expand_quadratic(&hopping(-1.0), &cluster.bonds(1), &internal()).unwrap();
        let reference =
            expand_quadratic(&hopping(-1.0), &cluster.intra_cell_bonds(1), &internal()).unwrap();
        let k = 0.3;
        let coupling =
            quadratic_difference(&original, &reference, &table, &DVector::from_vec(vec![k]))
                .unwrap();
        // Site 1 hops onto site 0 of the next cluster, two sites along the chain
        let expected = Complex::new(0.0, 2.0 * k).exp() * -1.0;
        approx::assert_relative_eq!((coupling[(1, 0)] - expected).norm(), 0.0, epsilon = 1e-12);
        approx::assert_relative_eq!(
            (coupling[(0, 1)] - expected.conj()).norm(),
            0.0,
            epsilon = 1e-12
        );
        approx::assert_relative_eq!(coupling[(0, 0)].norm(), 0.0);
        assert!(crate::utilities::matrices::is_hermitian(&coupling));
    }

    #[test]
    fn reference_only_fields_are_subtracted() {
        let cluster = vca_lattice::chain(1, 1.0);
        let table = BasisTable::from_lattice(&cluster, 1, 1);
        let bonds = cluster.intra_cell_bonds(0);
        let reference = expand_quadratic(
            &[Term::Onsite {
                tag: "weiss".into(),
                energy: 0.25,
            }],
            &bonds,
            &internal(),
        )
        .unwrap();
        let coupling = quadratic_difference(&[], &reference, &table, &DVector::zeros(1)).unwrap();
        approx::assert_relative_eq!(coupling[(0, 0)].re, -0.25);
    }

    #[test]
    fn momentum_of_the_wrong_dimension_is_rejected() {
        let cluster = vca_lattice::chain(2, 1.0);
        let table = BasisTable::from_lattice(&cluster, 1, 1);
        let original = expand_quadratic(&hopping(-1.0), &cluster.bonds(1), &internal()).unwrap();
        assert!(quadratic_difference(&original, &[], &table, &DVector::zeros(2)).is_err());
    }
}
