//! # Momentum
//!
//! Momentum sampling of the Brillouin zone of the unit cell. A `MomentumPath` visits a sequence of
//! high-symmetry points along straight segments and is used for band-structure like spectra. A
//! `ReciprocalMesh` covers the zone uniformly and is used for momentum averages.

use crate::error::BuildError;
use nalgebra::DVector;
use vca_lattice::Lattice;

/// A piecewise-linear path through momentum space
#[derive(Clone, Debug)]
pub struct MomentumPath {
    points: Vec<DVector<f64>>,
    distances: Vec<f64>,
}

impl MomentumPath {
    pub fn points(&self) -> &[DVector<f64>] {
        &self.points
    }

    /// The cumulative length of the path at each point
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

pub struct MomentumPathBuilder<RefVertices> {
    vertices: RefVertices,
    points_per_segment: usize,
}

impl MomentumPathBuilder<()> {
    pub fn new() -> Self {
        Self {
            vertices: (),
            points_per_segment: 1,
        }
    }
}

impl Default for MomentumPathBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefVertices> MomentumPathBuilder<RefVertices> {
    pub fn with_vertices<Vertices: ?Sized>(
        self,
        vertices: &Vertices,
    ) -> MomentumPathBuilder<&Vertices> {
        MomentumPathBuilder {
            vertices,
            points_per_segment: self.points_per_segment,
        }
    }

    /// The number of points from the start of a segment up to, not including, its end
    pub fn with_points_per_segment(self, points_per_segment: usize) -> Self {
        Self {
            points_per_segment,
            ..self
        }
    }
}

impl<'a> MomentumPathBuilder<&'a [DVector<f64>]> {
    pub fn build(self) -> Result<MomentumPath, BuildError> {
        let first = self.vertices.first().ok_or_else(|| {
            BuildError::Model("a momentum path needs at least one vertex".into())
        })?;
        if let Some(vertex) = self.vertices.iter().find(|vertex| vertex.len() != first.len()) {
            return Err(BuildError::DimensionMismatch {
                what: "momentum path vertex",
                expected: first.len(),
                found: vertex.len(),
            });
        }
        if self.points_per_segment == 0 {
            return Err(BuildError::Model(
                "each path segment needs at least one point".into(),
            ));
        }

        let mut points = Vec::with_capacity(self.vertices.len() * self.points_per_segment);
        for segment in self.vertices.windows(2) {
            let (start, end) = (&segment[0], &segment[1]);
            for step in 0..self.points_per_segment {
                let fraction = step as f64 / self.points_per_segment as f64;
                points.push(start + (end - start) * fraction);
            }
        }
        points.push(self.vertices[self.vertices.len() - 1].clone());

        let mut distances = Vec::with_capacity(points.len());
        let mut travelled = 0_f64;
        distances.push(travelled);
        for pair in points.windows(2) {
            travelled += (&pair[1] - &pair[0]).norm();
            distances.push(travelled);
        }
        Ok(MomentumPath { points, distances })
    }
}

/// A uniform Monkhorst-Pack style mesh `k = Σ_i (m_i / N_i) b_i` of the reciprocal cell
#[derive(Clone, Debug)]
pub struct ReciprocalMesh {
    points: Vec<DVector<f64>>,
}

impl ReciprocalMesh {
    pub fn new(unit_cell: &Lattice, divisions: &[usize]) -> Result<Self, BuildError> {
        let reciprocals = unit_cell.reciprocals()?;
        if divisions.len() != reciprocals.len() {
            return Err(BuildError::DimensionMismatch {
                what: "reciprocal mesh divisions",
                expected: reciprocals.len(),
                found: divisions.len(),
            });
        }
        if divisions.iter().any(|&n| n == 0) {
            return Err(BuildError::Model(
                "every reciprocal mesh division must be positive".into(),
            ));
        }
        let mut points = vec![DVector::zeros(unit_cell.dimension())];
        for (reciprocal, &n) in reciprocals.iter().zip(divisions) {
            points = points
                .iter()
                .flat_map(|point| {
                    (0..n).map(move |m| point + reciprocal * (m as f64 / n as f64))
                })
                .collect();
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[DVector<f64>] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod test {
    use super::{MomentumPathBuilder, ReciprocalMesh};
    use nalgebra::DVector;
    use std::f64::consts::PI;

    #[test]
    fn path_visits_every_vertex() {
        let vertices = vec![
            DVector::from_vec(vec![0.0, 0.0]),
            DVector::from_vec(vec![PI, 0.0]),
            DVector::from_vec(vec![PI, PI]),
        ];
        let path = MomentumPathBuilder::new()
            .with_vertices(vertices.as_slice())
            .with_points_per_segment(4)
            .build()
            .unwrap();
        assert_eq!(path.num_points(), 9);
        approx::assert_relative_eq!(path.points()[4], vertices[1]);
        approx::assert_relative_eq!(path.points()[8], vertices[2]);
        approx::assert_relative_eq!(path.distances()[8], 2.0 * PI, epsilon = 1e-12);
        assert!(path.distances().windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn single_vertex_path_is_a_point() {
        let vertices = vec![DVector::from_vec(vec![0.5])];
        let path = MomentumPathBuilder::new()
            .with_vertices(vertices.as_slice())
            .with_points_per_segment(10)
            .build()
            .unwrap();
        assert_eq!(path.num_points(), 1);
        assert_eq!(path.distances(), &[0.0]);
    }

    #[test]
    fn mesh_of_a_chain_covers_the_zone() {
        let unit_cell = vca_lattice::chain(1, 1.0);
        let mesh = ReciprocalMesh::new(&unit_cell, &[4]).unwrap();
        let momenta = mesh.points().iter().map(|k| k[0]).collect::<Vec<_>>();
        for (k, expected) in momenta.iter().zip([0.0, PI / 2.0, PI, 3.0 * PI / 2.0]) {
            approx::assert_relative_eq!(*k, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn mesh_of_a_square_has_the_product_size() {
        let unit_cell = vca_lattice::rectangle(1, 1, 1.0);
        let mesh = ReciprocalMesh::new(&unit_cell, &[3, 5]).unwrap();
        assert_eq!(mesh.num_points(), 15);
        assert!(ReciprocalMesh::new(&unit_cell, &[3]).is_err());
    }
}
