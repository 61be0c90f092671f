use crate::{LatticeError, Point, GEOMETRY_TOLERANCE};
use nalgebra::{DMatrix, DVector};

/// A finite set of points which is periodically repeated along `vectors`
///
/// When the lattice represents a cluster the `vectors` are the superlattice vectors of the
/// cluster tiling. A lattice with no vectors is an isolated cluster.
#[derive(Clone, Debug)]
pub struct Lattice {
    name: String,
    points: Vec<Point>,
    vectors: Vec<DVector<f64>>,
}

impl Lattice {
    /// Construct a lattice from raw coordinates, assigning site indices in order
    pub fn new(
        name: impl Into<String>,
        coordinates: Vec<DVector<f64>>,
        vectors: Vec<DVector<f64>>,
    ) -> Result<Self, LatticeError> {
        let expected = coordinates.first().ok_or(LatticeError::Empty)?.len();
        for (site, coordinate) in coordinates.iter().enumerate() {
            if coordinate.len() != expected {
                return Err(LatticeError::PointDimension {
                    site,
                    expected,
                    found: coordinate.len(),
                });
            }
        }
        for (index, vector) in vectors.iter().enumerate() {
            if vector.len() != expected {
                return Err(LatticeError::VectorDimension {
                    index,
                    expected,
                    found: vector.len(),
                });
            }
        }
        if !vectors.is_empty() {
            let gram = gram_matrix(&vectors);
            if gram.determinant().abs() < GEOMETRY_TOLERANCE {
                return Err(LatticeError::DependentVectors(vectors.len()));
            }
        }

        let points = coordinates
            .into_iter()
            .enumerate()
            .map(|(site, coordinate)| Point::new(site, coordinate))
            .collect();

        Ok(Self {
            name: name.into(),
            points,
            vectors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn vectors(&self) -> &[DVector<f64>] {
        &self.vectors
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The spatial dimension of the embedding space
    pub fn dimension(&self) -> usize {
        self.points[0].dimension()
    }

    /// The coordinate of the point with index `site`
    pub fn coordinate(&self, site: usize) -> &DVector<f64> {
        &self.points[site].coordinate
    }

    /// The reciprocal vectors b_i satisfying a_i · b_j = 2π δ_ij
    ///
    /// For `m` vectors embedded in `d >= m` dimensions the reciprocals span the same subspace,
    /// B = 2π A (AᵀA)⁻¹ where the columns of A are the lattice vectors.
    pub fn reciprocals(&self) -> Result<Vec<DVector<f64>>, LatticeError> {
        if self.vectors.is_empty() {
            return Err(LatticeError::NoVectors);
        }
        let a = self.vector_matrix();
        let inverse_gram = gram_matrix(&self.vectors)
            .try_inverse()
            .ok_or(LatticeError::DependentVectors(self.vectors.len()))?;
        let b = a * inverse_gram * (2.0 * std::f64::consts::PI);
        Ok(b.column_iter().map(|column| column.into_owned()).collect())
    }

    /// Test whether `displacement` is an integer combination of the lattice vectors
    ///
    /// The coefficients are found from the normal equations, the displacement is subordinate when
    /// the fit is exact and every coefficient is integral.
    pub fn is_subordinate(&self, displacement: &DVector<f64>) -> Result<bool, LatticeError> {
        if self.vectors.is_empty() {
            return Err(LatticeError::NoVectors);
        }
        if displacement.len() != self.dimension() {
            return Err(LatticeError::DisplacementDimension {
                expected: self.dimension(),
                found: displacement.len(),
            });
        }
        let a = self.vector_matrix();
        let inverse_gram = gram_matrix(&self.vectors)
            .try_inverse()
            .ok_or(LatticeError::DependentVectors(self.vectors.len()))?;
        let coefficients = &inverse_gram * (a.transpose() * displacement);
        let residual = (&a * &coefficients - displacement).norm();
        Ok(residual < GEOMETRY_TOLERANCE
            && coefficients
                .iter()
                .all(|c| (c - c.round()).abs() < GEOMETRY_TOLERANCE))
    }

    /// The lattice vectors stacked as the columns of a `dimension x num_vectors` matrix
    pub(crate) fn vector_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_columns(&self.vectors)
    }
}

fn gram_matrix(vectors: &[DVector<f64>]) -> DMatrix<f64> {
    DMatrix::from_fn(vectors.len(), vectors.len(), |i, j| vectors[i].dot(&vectors[j]))
}
