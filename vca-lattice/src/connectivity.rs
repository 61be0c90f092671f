use crate::{Bond, Lattice, GEOMETRY_TOLERANCE};
use itertools::Itertools;
use nalgebra::DVector;

impl Lattice {
    /// Enumerate every bond up to and including the `neighbours`-th neighbour shell
    ///
    /// Each undirected bond is returned exactly once. The neighbour shells are found by sorting the
    /// distinct distances between points and their periodic images, with shell 0 containing only
    /// the on-site bonds. Bonds are ordered by shell, then by start and end site.
    pub fn bonds(&self, neighbours: usize) -> Vec<Bond> {
        let translations = self.translations(neighbours + 1);

        // Every candidate pair in canonical orientation, the end point must lie "after" the start
        let mut candidates = Vec::new();
        for (start, end) in (0..self.num_points()).cartesian_product(0..self.num_points()) {
            for (integers, translation) in translations.iter() {
                if !is_canonical(start, end, integers) {
                    continue;
                }
                let displacement = self.coordinate(end) + translation - self.coordinate(start);
                candidates.push((start, end, displacement, translation.clone()));
            }
        }

        let shells = distinct_distances(candidates.iter().map(|candidate| candidate.2.norm()));

        let mut bonds = candidates
            .into_iter()
            .filter_map(|(start, end, displacement, cell_translation)| {
                let distance = displacement.norm();
                shells
                    .iter()
                    .position(|&shell| (shell - distance).abs() < GEOMETRY_TOLERANCE)
                    .filter(|&neighbour| neighbour <= neighbours)
                    .map(|neighbour| Bond {
                        neighbour,
                        start,
                        end,
                        displacement,
                        cell_translation,
                    })
            })
            .collect::<Vec<_>>();
        bonds.sort_by_key(|bond| (bond.neighbour, bond.start, bond.end));
        bonds
    }

    /// The bonds internal to a single cell
    pub fn intra_cell_bonds(&self, neighbours: usize) -> Vec<Bond> {
        self.bonds(neighbours)
            .into_iter()
            .filter(|bond| bond.is_intra_cell())
            .collect()
    }

    /// All lattice translations with integer coefficients in `-range..=range`, with the
    /// coefficients which generate them
    fn translations(&self, range: usize) -> Vec<(Vec<isize>, DVector<f64>)> {
        let dimension = self.dimension();
        if self.vectors().is_empty() {
            return vec![(vec![], DVector::zeros(dimension))];
        }
        let range = range as isize;
        self.vectors()
            .iter()
            .map(|_| -range..=range)
            .multi_cartesian_product()
            .map(|integers| {
                let translation = integers.iter().zip(self.vectors()).fold(
                    DVector::zeros(dimension),
                    |sum: DVector<f64>, (&n, vector)| sum + vector * n as f64,
                );
                (integers, translation)
            })
            .collect()
    }
}

/// An undirected bond is stored once: with a lexicographically positive translation, or with
/// zero translation and `end >= start`
fn is_canonical(start: usize, end: usize, integers: &[isize]) -> bool {
    match integers.iter().find(|&&n| n != 0) {
        Some(&n) => n > 0,
        None => end >= start,
    }
}

fn distinct_distances(distances: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut distances = distances.collect::<Vec<_>>();
    distances.sort_by(|a, b| a.total_cmp(b));
    distances.dedup_by(|a, b| (*a - *b).abs() < GEOMETRY_TOLERANCE);
    distances
}

#[cfg(test)]
mod test {
    use crate::{chain, rectangle};

    #[test]
    fn single_site_chain_has_one_bond_per_shell() {
        let lattice = chain(1, 1.0);
        let bonds = lattice.bonds(2);
        assert_eq!(bonds.len(), 3);
        assert!(bonds[0].is_onsite());
        assert_eq!(bonds[1].neighbour, 1);
        assert!(!bonds[1].is_intra_cell());
        approx::assert_relative_eq!(bonds[2].length(), 2.0);
    }

    #[test]
    fn dimer_cluster_separates_intra_and_inter_cell_bonds() {
        let cluster = chain(2, 1.0);
        let bonds = cluster.bonds(1);
        let nearest = bonds
            .iter()
            .filter(|bond| bond.neighbour == 1)
            .collect::<Vec<_>>();
        assert_eq!(nearest.len(), 2);
        assert_eq!(nearest.iter().filter(|bond| bond.is_intra_cell()).count(), 1);
        let inter = nearest.iter().find(|bond| !bond.is_intra_cell()).unwrap();
        assert_eq!((inter.start, inter.end), (1, 0));
        approx::assert_relative_eq!(inter.cell_translation[0], 2.0);
        approx::assert_relative_eq!(inter.displacement[0], 1.0);
    }

    #[test]
    fn square_plaquette_has_two_bonds_per_site() {
        let cluster = rectangle(2, 2, 1.0);
        let nearest = cluster
            .bonds(1)
            .into_iter()
            .filter(|bond| bond.neighbour == 1)
            .count();
        // A periodic 2x2 tiling of the square lattice has 2 nearest-neighbour bonds per site
        assert_eq!(nearest, 8);
        let intra = cluster
            .intra_cell_bonds(1)
            .into_iter()
            .filter(|bond| bond.neighbour == 1)
            .count();
        assert_eq!(intra, 4);
    }

    #[test]
    fn isolated_cluster_only_has_intra_cell_bonds() {
        let cluster = crate::Lattice::new(
            "dimer",
            vec![
                nalgebra::DVector::from_vec(vec![0.0]),
                nalgebra::DVector::from_vec(vec![1.0]),
            ],
            vec![],
        )
        .unwrap();
        let bonds = cluster.bonds(1);
        assert_eq!(bonds.len(), 3);
        assert!(bonds.iter().all(|bond| bond.is_intra_cell()));
    }
}
