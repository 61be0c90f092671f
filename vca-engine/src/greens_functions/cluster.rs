use super::{
    lehmann::{project, solve_resolvent, LehmannBranch, LehmannElement},
    ClusterSpectralData, GreensFunctionError,
};
use crate::constants::DEFAULT_BROADENING;
use nalgebra::DMatrix;
use num_complex::Complex;

/// Assembles the cluster Green's function matrix from its spectral data
///
/// Element `(i, j)` is the particle contribution with `addition[i]` as bra and `addition[j]` as
/// ket, plus the hole contribution with `removal[j]` as bra and `removal[i]` as ket, weighted by
/// the sign of the particle statistics.
#[derive(Copy, Clone, Debug)]
pub struct ClusterGreensFunction<'a> {
    data: &'a ClusterSpectralData,
    broadening: f64,
}

impl<'a> ClusterGreensFunction<'a> {
    pub fn new(data: &'a ClusterSpectralData) -> Self {
        Self {
            data,
            broadening: DEFAULT_BROADENING,
        }
    }

    /// The imaginary part added to the frequency
    pub fn with_broadening(self, broadening: f64) -> Self {
        Self { broadening, ..self }
    }

    pub fn broadening(&self) -> f64 {
        self.broadening
    }

    pub fn element(&self, left_label: usize, right_label: usize, branch: LehmannBranch) -> LehmannElement<'a> {
        let sector = match branch {
            LehmannBranch::Particle => &self.data.addition,
            LehmannBranch::Hole => &self.data.removal,
        };
        LehmannElement {
            ground_state_energy: self.data.ground_state_energy,
            branch,
            left: &sector[left_label],
            left_label,
            right: &sector[right_label],
        }
    }

    /// The `N x N` cluster Green's function at frequency `frequency`
    pub fn evaluate(
        &self,
        frequency: f64,
        chemical_potential: f64,
    ) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
        if self.broadening <= 0_f64 {
            return Err(GreensFunctionError::Broadening(self.broadening));
        }
        let n = self.data.number_of_labels();
        if self.data.removal.len() != n {
            return Err(GreensFunctionError::DimensionMismatch {
                what: "removal sector results",
                expected: n,
                found: self.data.removal.len(),
            });
        }
        let hole_sign = self.data.statistics.hole_sign();
        let mut matrix = DMatrix::zeros(n, n);
        // One tridiagonal solve per ket, contracted against every bra
        for (branch, sector) in [
            (LehmannBranch::Particle, &self.data.addition),
            (LehmannBranch::Hole, &self.data.removal),
        ] {
            for (right_label, right) in sector.iter().enumerate() {
                let solution = match solve_resolvent(
                    right,
                    branch,
                    self.data.ground_state_energy,
                    frequency,
                    chemical_potential,
                    self.broadening,
                )? {
                    Some(solution) => solution,
                    None => continue,
                };
                for (left_label, left) in sector.iter().enumerate() {
                    let value = project(left, left_label, right, &solution);
                    match branch {
                        LehmannBranch::Particle => matrix[(left_label, right_label)] += value,
                        LehmannBranch::Hole => {
                            matrix[(right_label, left_label)] += value * hole_sign
                        }
                    }
                }
            }
        }
        Ok(matrix)
    }
}

/// The cluster Green's function at the default broadening
pub fn cluster_greens_function(
    data: &ClusterSpectralData,
    frequency: f64,
    chemical_potential: f64,
) -> Result<DMatrix<Complex<f64>>, GreensFunctionError> {
    ClusterGreensFunction::new(data).evaluate(frequency, chemical_potential)
}
