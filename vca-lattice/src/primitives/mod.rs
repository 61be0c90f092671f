use nalgebra::DVector;

/// A single point of a lattice
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// The index of the point within its lattice
    pub site: usize,
    /// The Cartesian coordinate of the point
    pub coordinate: DVector<f64>,
}

impl Point {
    pub fn new(site: usize, coordinate: DVector<f64>) -> Self {
        Self { site, coordinate }
    }

    pub fn dimension(&self) -> usize {
        self.coordinate.len()
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (&self.coordinate - &other.coordinate).norm()
    }
}

/// A bond between two points of a lattice
///
/// The start point always lives in the reference cell. The end point is displaced from its
/// reference-cell image by `cell_translation`, an integer combination of the lattice vectors.
#[derive(Clone, Debug)]
pub struct Bond {
    /// The neighbour shell, 0 for an on-site bond, 1 for nearest neighbours...
    pub neighbour: usize,
    /// Site index of the start point in the reference cell
    pub start: usize,
    /// Site index of the reference-cell image of the end point
    pub end: usize,
    /// The vector from the start point to the (translated) end point
    pub displacement: DVector<f64>,
    /// The lattice translation separating the end point from its reference-cell image
    pub cell_translation: DVector<f64>,
}

impl Bond {
    /// True when both ends of the bond lie in the same cell
    pub fn is_intra_cell(&self) -> bool {
        self.cell_translation
            .iter()
            .all(|x| x.abs() < crate::GEOMETRY_TOLERANCE)
    }

    pub fn is_onsite(&self) -> bool {
        self.neighbour == 0
    }

    pub fn length(&self) -> f64 {
        self.displacement.norm()
    }
}
