use crate::fock::{BasisLabel, BasisTable};
use miette::Diagnostic;
use vca_lattice::{Lattice, LatticeError};

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum PerioderError {
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error("cluster label {0} is not the image of any unit cell label")]
    Uncovered(BasisLabel),
    #[error("cluster label {0} is the image of more than one unit cell label")]
    Ambiguous(BasisLabel),
    #[error("the cluster is {cluster} dimensional but the unit cell is {unit_cell} dimensional")]
    DimensionMismatch { cluster: usize, unit_cell: usize },
}

/// Maps the basis labels of a cluster onto the labels of the unit cell it tiles
///
/// Group `i` holds, in cluster table order, the indices of the cluster labels which are lattice
/// translations of unit cell label `i` with the same orbital and spin.
#[derive(Clone, Debug)]
pub struct Perioder {
    groups: Vec<Vec<usize>>,
}

impl Perioder {
    /// Partition the cluster labels, the unit cell must be enclosed in the cluster and share its
    /// origin
    #[tracing::instrument(name = "Perioder", level = "debug", skip_all)]
    pub fn new(
        cluster: &Lattice,
        cluster_table: &BasisTable,
        unit_cell: &Lattice,
        unit_cell_table: &BasisTable,
    ) -> Result<Self, PerioderError> {
        if cluster.dimension() != unit_cell.dimension() {
            return Err(PerioderError::DimensionMismatch {
                cluster: cluster.dimension(),
                unit_cell: unit_cell.dimension(),
            });
        }
        let mut groups = Vec::with_capacity(unit_cell_table.len());
        for unit_cell_label in unit_cell_table.labels() {
            let origin = unit_cell.coordinate(unit_cell_label.site);
            let mut group = Vec::new();
            for (index, cluster_label) in cluster_table.labels().iter().enumerate() {
                if !cluster_label.is_internal_match(unit_cell_label) {
                    continue;
                }
                let displacement = cluster.coordinate(cluster_label.site) - origin;
                if unit_cell.is_subordinate(&displacement)? {
                    group.push(index);
                }
            }
            groups.push(group);
        }

        let mut membership = vec![0_usize; cluster_table.len()];
        for &index in groups.iter().flatten() {
            membership[index] += 1;
        }
        for (index, &count) in membership.iter().enumerate() {
            match count {
                1 => {}
                0 => return Err(PerioderError::Uncovered(*cluster_table.label(index))),
                _ => return Err(PerioderError::Ambiguous(*cluster_table.label(index))),
            }
        }
        tracing::debug!("Partitioned {} cluster labels into {} groups", cluster_table.len(), groups.len());
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    pub fn number_of_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, index: usize) -> &[usize] {
        &self.groups[index]
    }
}

#[cfg(test)]
mod test {
    use super::{Perioder, PerioderError};
    use crate::fock::BasisTable;
    use nalgebra::DVector;
    use vca_lattice::Lattice;

    #[test]
    fn chain_cluster_folds_onto_a_single_site() {
        let cluster = vca_lattice::chain(4, 1.0);
        let unit_cell = vca_lattice::chain(1, 1.0);
        let cluster_table = BasisTable::from_lattice(&cluster, 1, 2);
        let unit_cell_table = BasisTable::from_lattice(&unit_cell, 1, 2);
        let perioder = Perioder::new(&cluster, &cluster_table, &unit_cell, &unit_cell_table).unwrap();
        assert_eq!(perioder.number_of_groups(), 2);
        assert_eq!(perioder.group(0), &[0, 1, 2, 3]);
        assert_eq!(perioder.group(1), &[4, 5, 6, 7]);
    }

    #[test]
    fn every_cluster_label_is_in_exactly_one_group() {
        let cluster = vca_lattice::rectangle(2, 2, 1.0);
        // A two-site unit cell along x
        let unit_cell = Lattice::new(
            "pair",
            vec![DVector::from_vec(vec![0.0, 0.0]), DVector::from_vec(vec![1.0, 0.0])],
            vec![DVector::from_vec(vec![2.0, 0.0]), DVector::from_vec(vec![0.0, 1.0])],
        )
        .unwrap();
        let cluster_table = BasisTable::from_lattice(&cluster, 1, 1);
        let unit_cell_table = BasisTable::from_lattice(&unit_cell, 1, 1);
        let perioder = Perioder::new(&cluster, &cluster_table, &unit_cell, &unit_cell_table).unwrap();
        let mut members = perioder.groups().concat();
        members.sort_unstable();
        assert_eq!(members, (0..cluster_table.len()).collect::<Vec<_>>());
        assert!(perioder.groups().iter().all(|group| group.len() == 2));
    }

    #[test]
    fn unit_cell_without_vectors_is_rejected() {
        let cluster = vca_lattice::chain(2, 1.0);
        let unit_cell =
            Lattice::new("site", vec![DVector::from_vec(vec![0.0])], vec![]).unwrap();
        let result = Perioder::new(
            &cluster,
            &BasisTable::from_lattice(&cluster, 1, 1),
            &unit_cell,
            &BasisTable::from_lattice(&unit_cell, 1, 1),
        );
        assert!(matches!(result, Err(PerioderError::Lattice(_))));
    }

    #[test]
    fn unit_cell_of_another_dimension_is_rejected() {
        let cluster = vca_lattice::rectangle(2, 2, 1.0);
        let unit_cell = vca_lattice::chain(1, 1.0);
        let result = Perioder::new(
            &cluster,
            &BasisTable::from_lattice(&cluster, 1, 1),
            &unit_cell,
            &BasisTable::from_lattice(&unit_cell, 1, 1),
        );
        assert!(matches!(
            result,
            Err(PerioderError::DimensionMismatch {
                cluster: 2,
                unit_cell: 1
            })
        ));
    }

    #[test]
    fn unit_cell_outside_the_cluster_leaves_labels_uncovered() {
        let cluster = vca_lattice::chain(2, 1.0);
        // Offset from the cluster origin
        let unit_cell = Lattice::new(
            "shifted",
            vec![DVector::from_vec(vec![0.5])],
            vec![DVector::from_vec(vec![1.0])],
        )
        .unwrap();
        let result = Perioder::new(
            &cluster,
            &BasisTable::from_lattice(&cluster, 1, 1),
            &unit_cell,
            &BasisTable::from_lattice(&unit_cell, 1, 1),
        );
        assert!(matches!(result, Err(PerioderError::Uncovered(_))));
    }
}
