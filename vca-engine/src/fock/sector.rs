use super::Statistics;
use crate::error::BuildError;
use itertools::Itertools;
use nalgebra::DVector;
use num_complex::Complex;
use std::collections::HashMap;

/// The occupation-number states of `modes` single-particle modes holding a fixed number of particles
///
/// A sector may be empty, for example the removal sector of the vacuum. Vectors in an empty sector
/// have length zero.
#[derive(Clone, Debug)]
pub struct FockSector {
    modes: usize,
    particles: Option<usize>,
    states: Vec<u64>,
    lookup: HashMap<u64, usize>,
}

impl FockSector {
    /// Enumerate the sector with `particles` particles, states are in ascending bit-string order
    pub fn new(modes: usize, particles: usize) -> Result<Self, BuildError> {
        if modes >= 64 {
            return Err(BuildError::Model(format!(
                "{} single-particle modes do not fit in a 64 bit occupation string",
                modes
            )));
        }
        if particles > modes {
            return Ok(Self::empty(modes));
        }
        let mut states = (0..modes)
            .combinations(particles)
            .map(|occupied| occupied.into_iter().fold(0u64, |state, mode| state | (1 << mode)))
            .collect::<Vec<_>>();
        states.sort_unstable();
        let lookup = states
            .iter()
            .enumerate()
            .map(|(index, &state)| (state, index))
            .collect();
        Ok(Self {
            modes,
            particles: Some(particles),
            states,
            lookup,
        })
    }

    /// A sector with no states
    pub fn empty(modes: usize) -> Self {
        Self {
            modes,
            particles: None,
            states: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// The sector obtained by adding `delta` particles, empty when the count leaves `0..=modes`
    pub fn neighbour(&self, delta: isize) -> Result<Self, BuildError> {
        match self
            .particles
            .and_then(|particles| usize::try_from(particles as isize + delta).ok())
        {
            Some(particles) => Self::new(self.modes, particles),
            None => Ok(Self::empty(self.modes)),
        }
    }

    pub fn modes(&self) -> usize {
        self.modes
    }

    pub fn particles(&self) -> Option<usize> {
        self.particles
    }

    pub fn dimension(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> &[u64] {
        &self.states
    }

    pub fn index_of(&self, state: u64) -> Option<usize> {
        self.lookup.get(&state).copied()
    }

    /// Apply c_mode to `vector`, which lives in this sector, returning a vector in `target`
    pub fn annihilate(
        &self,
        statistics: Statistics,
        mode: usize,
        vector: &DVector<Complex<f64>>,
        target: &FockSector,
    ) -> Result<DVector<Complex<f64>>, BuildError> {
        self.apply(vector, target, |state| statistics.annihilate(state, mode))
    }

    /// Apply c†_mode to `vector`, which lives in this sector, returning a vector in `target`
    pub fn create(
        &self,
        statistics: Statistics,
        mode: usize,
        vector: &DVector<Complex<f64>>,
        target: &FockSector,
    ) -> Result<DVector<Complex<f64>>, BuildError> {
        self.apply(vector, target, |state| statistics.create(state, mode))
    }

    fn apply(
        &self,
        vector: &DVector<Complex<f64>>,
        target: &FockSector,
        operator: impl Fn(u64) -> Option<(f64, u64)>,
    ) -> Result<DVector<Complex<f64>>, BuildError> {
        if vector.len() != self.dimension() {
            return Err(BuildError::DimensionMismatch {
                what: "sector vector",
                expected: self.dimension(),
                found: vector.len(),
            });
        }
        let mut result = DVector::zeros(target.dimension());
        for (&state, &amplitude) in self.states.iter().zip(vector.iter()) {
            if let Some((sign, image)) = operator(state) {
                // An image outside `target` means the operator left the sector, which only happens
                // if `target` is the wrong neighbour
                let index = target.index_of(image).ok_or_else(|| {
                    BuildError::Model(format!(
                        "state {:#b} is not in the target sector",
                        image
                    ))
                })?;
                result[index] += amplitude * sign;
            }
        }
        Ok(result)
    }
}
