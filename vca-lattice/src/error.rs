/// Errors raised while constructing or querying a lattice
#[derive(thiserror::Error, Debug)]
pub enum LatticeError {
    #[error("a lattice needs at least one point")]
    Empty,
    #[error("point {site} has dimension {found}, expected {expected}")]
    PointDimension {
        site: usize,
        expected: usize,
        found: usize,
    },
    #[error("lattice vector {index} has dimension {found}, expected {expected}")]
    VectorDimension {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("the {0} lattice vectors are not linearly independent")]
    DependentVectors(usize),
    #[error("the operation requires at least one lattice vector")]
    NoVectors,
    #[error("displacement has dimension {found}, expected {expected}")]
    DisplacementDimension { expected: usize, found: usize },
}
