//! # Frequency
//!
//! The real frequency grid on which spectra are evaluated: `number_of_points` nodes linearly
//! distributed over the closed range `frequency_range`.

use crate::error::BuildError;
use std::ops::Range;

/// An inclusive, uniformly spaced frequency grid
#[derive(Clone, Debug)]
pub struct FrequencyGrid {
    points: Vec<f64>,
}

impl FrequencyGrid {
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The distance between neighbouring nodes, zero for a single node
    pub fn spacing(&self) -> f64 {
        match self.points.as_slice() {
            [first, second, ..] => second - first,
            _ => 0_f64,
        }
    }

    /// Trapezoidal integral of `integrand` sampled on the grid
    pub fn integrate(&self, integrand: &[f64]) -> f64 {
        integrand
            .windows(2)
            .map(|pair| 0.5 * (pair[0] + pair[1]) * self.spacing())
            .sum()
    }
}

pub struct FrequencyGridBuilder<RefRange> {
    number_of_points: Option<usize>,
    frequency_range: RefRange,
}

impl FrequencyGridBuilder<()> {
    pub fn new() -> Self {
        Self {
            number_of_points: None,
            frequency_range: (),
        }
    }
}

impl Default for FrequencyGridBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefRange> FrequencyGridBuilder<RefRange> {
    pub fn with_number_of_points(self, number_of_points: usize) -> Self {
        Self {
            number_of_points: Some(number_of_points),
            frequency_range: self.frequency_range,
        }
    }

    pub fn with_frequency_range(self, frequency_range: Range<f64>) -> FrequencyGridBuilder<Range<f64>> {
        FrequencyGridBuilder {
            number_of_points: self.number_of_points,
            frequency_range,
        }
    }
}

impl FrequencyGridBuilder<Range<f64>> {
    pub fn build(self) -> Result<FrequencyGrid, BuildError> {
        let number_of_points = self.number_of_points.unwrap_or(0);
        if number_of_points == 0 {
            return Err(BuildError::Model(
                "a frequency grid needs at least one point".into(),
            ));
        }
        let Range { start, end } = self.frequency_range;
        if end < start {
            return Err(BuildError::Model(format!(
                "the frequency range {}..{} is reversed",
                start, end
            )));
        }
        let points = if number_of_points == 1 {
            vec![start]
        } else {
            let step = (end - start) / (number_of_points - 1) as f64;
            (0..number_of_points)
                .map(|i| start + step * i as f64)
                .collect()
        };
        Ok(FrequencyGrid { points })
    }
}

#[cfg(test)]
mod test {
    use super::FrequencyGridBuilder;

    #[test]
    fn grid_includes_both_ends() {
        let grid = FrequencyGridBuilder::new()
            .with_number_of_points(5)
            .with_frequency_range(-1.0..1.0)
            .build()
            .unwrap();
        assert_eq!(grid.num_points(), 5);
        approx::assert_relative_eq!(grid.points()[0], -1.0);
        approx::assert_relative_eq!(grid.points()[4], 1.0);
        approx::assert_relative_eq!(grid.spacing(), 0.5);
    }

    #[test]
    fn trapezoidal_rule_integrates_linear_functions_exactly() {
        let grid = FrequencyGridBuilder::new()
            .with_number_of_points(11)
            .with_frequency_range(0.0..2.0)
            .build()
            .unwrap();
        let integrand = grid.points().iter().map(|x| 3.0 * x + 1.0).collect::<Vec<_>>();
        approx::assert_relative_eq!(grid.integrate(&integrand), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_and_reversed_grids_are_rejected() {
        assert!(FrequencyGridBuilder::new()
            .with_frequency_range(0.0..1.0)
            .build()
            .is_err());
        assert!(FrequencyGridBuilder::new()
            .with_number_of_points(3)
            .with_frequency_range(1.0..0.0)
            .build()
            .is_err());
    }
}
