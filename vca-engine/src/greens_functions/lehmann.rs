use super::GreensFunctionError;
use crate::krylov::KrylovResult;
use nalgebra::DVector;
use num_complex::Complex;

/// The two pole branches of the Lehmann sum
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LehmannBranch {
    /// Particle addition, poles at `E_n - E_0`, the resolvent `[(z + E_0) I - T]^{-1}`
    Particle,
    /// Particle removal, poles at `E_0 - E_n`, the resolvent `[(z - E_0) I + T]^{-1}`
    Hole,
}

impl LehmannBranch {
    /// The shift and the sign of the tridiagonal matrix in the resolvent at complex frequency `z`
    fn resolvent(&self, z: Complex<f64>, ground_state_energy: f64) -> (Complex<f64>, f64) {
        match self {
            LehmannBranch::Particle => (z + ground_state_energy, -1_f64),
            LehmannBranch::Hole => (z - ground_state_energy, 1_f64),
        }
    }
}

/// A single matrix element of the Lehmann representation
///
/// The resolvent is evaluated in the Krylov space of `right`. The bra is the starting vector of
/// `left_label`: its coordinates in the `right` space are used when `right` carries them,
/// otherwise the projection of `left` onto its own space stands in for them.
#[derive(Copy, Clone, Debug)]
pub struct LehmannElement<'a> {
    pub ground_state_energy: f64,
    pub branch: LehmannBranch,
    pub left: &'a KrylovResult,
    pub left_label: usize,
    pub right: &'a KrylovResult,
}

impl<'a> LehmannElement<'a> {
    pub fn evaluate(
        &self,
        frequency: f64,
        chemical_potential: f64,
        broadening: f64,
    ) -> Result<Complex<f64>, GreensFunctionError> {
        let solution = solve_resolvent(
            self.right,
            self.branch,
            self.ground_state_energy,
            frequency,
            chemical_potential,
            broadening,
        )?;
        Ok(solution
            .map(|solution| project(self.left, self.left_label, self.right, &solution))
            .unwrap_or_else(|| Complex::from(0_f64)))
    }
}

/// The branch resolvent in the Krylov space of `right` applied to its first basis vector, scaled
/// by the norm of the starting vector
///
/// `None` when `right` contributes nothing. The solution is shared by every bra in the same row.
pub(crate) fn solve_resolvent(
    right: &KrylovResult,
    branch: LehmannBranch,
    ground_state_energy: f64,
    frequency: f64,
    chemical_potential: f64,
    broadening: f64,
) -> Result<Option<DVector<Complex<f64>>>, GreensFunctionError> {
    if right.norm == 0_f64 || right.is_degenerate() {
        return Ok(None);
    }
    let z = Complex::new(frequency + chemical_potential, broadening);
    let (shift, sign) = branch.resolvent(z, ground_state_energy);
    let solution = right
        .tridiagonal
        .solve_shifted(shift, sign)
        .ok_or(GreensFunctionError::SingularResolvent { frequency })?;
    Ok(Some(solution * Complex::from(right.norm)))
}

/// Contract the bra of `left_label` against a solution from `solve_resolvent` on `right`
pub(crate) fn project(
    left: &KrylovResult,
    left_label: usize,
    right: &KrylovResult,
    solution: &DVector<Complex<f64>>,
) -> Complex<f64> {
    if left_label < right.overlaps.ncols() {
        contract(right.overlaps.column(left_label).iter(), solution)
    } else {
        contract(left.projection.iter(), solution)
    }
}

/// `<projection, solution>`, over the shorter of the two vectors
fn contract<'b>(
    projection: impl Iterator<Item = &'b Complex<f64>>,
    solution: &DVector<Complex<f64>>,
) -> Complex<f64> {
    projection
        .zip(solution.iter())
        .map(|(p, x)| p.conj() * x)
        .sum()
}
