use crate::Lattice;
use nalgebra::DVector;

/// A one-dimensional cluster of `num_sites` points separated by `spacing`
///
/// The single superlattice vector has length `num_sites * spacing`, so that repeating the cluster
/// reproduces the infinite chain.
pub fn chain(num_sites: usize, spacing: f64) -> Lattice {
    assert!(num_sites > 0, "A chain needs at least one site");
    let coordinates = (0..num_sites)
        .map(|i| DVector::from_vec(vec![i as f64 * spacing]))
        .collect();
    let vectors = vec![DVector::from_vec(vec![num_sites as f64 * spacing])];
    Lattice::new(format!("chain-{}", num_sites), coordinates, vectors)
        .expect("A generated chain is always well formed")
}

/// A two-dimensional `num_x x num_y` cluster of the square lattice with lattice constant `spacing`
pub fn rectangle(num_x: usize, num_y: usize, spacing: f64) -> Lattice {
    assert!(
        num_x > 0 && num_y > 0,
        "A rectangle needs at least one site along each axis"
    );
    let coordinates = (0..num_y)
        .flat_map(|j| {
            (0..num_x).map(move |i| DVector::from_vec(vec![i as f64 * spacing, j as f64 * spacing]))
        })
        .collect();
    let vectors = vec![
        DVector::from_vec(vec![num_x as f64 * spacing, 0.0]),
        DVector::from_vec(vec![0.0, num_y as f64 * spacing]),
    ];
    Lattice::new(format!("rectangle-{}x{}", num_x, num_y), coordinates, vectors)
        .expect("A generated rectangle is always well formed")
}

#[cfg(test)]
mod test {
    use super::{chain, rectangle};

    #[test]
    fn chain_vector_spans_the_cluster() {
        let lattice = chain(4, 0.5);
        assert_eq!(lattice.num_points(), 4);
        approx::assert_relative_eq!(lattice.vectors()[0][0], 2.0);
        approx::assert_relative_eq!(lattice.coordinate(3)[0], 1.5);
    }

    #[test]
    fn rectangle_points_are_row_major() {
        let lattice = rectangle(3, 2, 1.0);
        assert_eq!(lattice.num_points(), 6);
        approx::assert_relative_eq!(lattice.coordinate(4)[0], 1.0);
        approx::assert_relative_eq!(lattice.coordinate(4)[1], 1.0);
        assert_eq!(lattice.dimension(), 2);
    }
}
