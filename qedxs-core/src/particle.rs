//! External particle states: momentum, declared mass and spin-density matrix.

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::pauli::PauliMatrix;
use crate::vector::{FourMomentum, PolarizationVector, ThreeVector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// How a spin-density matrix weights the amplitude and its conjugate.
///
/// For a leg with amplitude index `a` and conjugate-amplitude index `b`,
/// `Preparation` uses `rho[a][b]` and `Detection` uses `rho[b][a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdmRole {
    /// State prepared before the interaction (incoming legs, and outgoing
    /// antifermions whose spinor enters as a ket).
    Preparation,
    /// State selected by a detector (outgoing fermions and photons).
    Detection,
}

/// 2x2 Hermitian spin-density matrix in helicity-index space.
///
/// Index 0 is helicity +1/2 for fermions and polarization 1 (helicity +1)
/// for photons.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpinDensity {
    rho: [[Complex64; 2]; 2],
}

impl Default for SpinDensity {
    fn default() -> Self {
        Self::unpolarized()
    }
}

impl SpinDensity {
    /// Wraps raw entries.
    #[inline]
    pub const fn new(rho: [[Complex64; 2]; 2]) -> Self {
        Self { rho }
    }

    /// Unpolarized state, `I/2`.
    pub fn unpolarized() -> Self {
        let half = Complex64::new(0.5, 0.0);
        Self::new([[half, ZERO], [ZERO, half]])
    }

    /// The identity: sums over final states.
    pub const fn unit() -> Self {
        Self::new([[ONE, ZERO], [ZERO, ONE]])
    }

    /// Pure state selecting one helicity index.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHelicityIndex`] for indices other than 0 and 1.
    pub fn pure(index: usize) -> Result<Self> {
        if index > 1 {
            return Err(Error::InvalidHelicityIndex(index));
        }
        let mut rho = [[ZERO; 2]; 2];
        rho[index][index] = ONE;
        Ok(Self::new(rho))
    }

    /// `(I + P.sigma) / 2` for a polarization vector with `|P| <= 1`.
    pub fn from_polarization(polarization: ThreeVector) -> Self {
        Self::from_pauli(&PauliMatrix::compose(0.5, polarization * 0.5))
    }

    /// Takes the entries of a Pauli matrix.
    pub fn from_pauli(matrix: &PauliMatrix) -> Self {
        Self::new([
            [matrix.get(0, 0), matrix.get(0, 1)],
            [matrix.get(1, 0), matrix.get(1, 1)],
        ])
    }

    /// Entry `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.rho[row][col]
    }

    /// Weight for amplitude index `a` and conjugate index `b` in the given role.
    #[inline]
    pub fn weight(&self, role: SdmRole, a: usize, b: usize) -> Complex64 {
        match role {
            SdmRole::Preparation => self.rho[a][b],
            SdmRole::Detection => self.rho[b][a],
        }
    }

    /// Trace.
    pub fn trace(&self) -> Complex64 {
        self.rho[0][0] + self.rho[1][1]
    }

    /// Whether `rho` equals its adjoint within `tolerance`.
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        (self.rho[0][1] - self.rho[1][0].conj()).norm() < tolerance
            && self.rho[0][0].im.abs() < tolerance
            && self.rho[1][1].im.abs() < tolerance
    }
}

/// Common view of an external leg.
pub trait Particle {
    /// Four-momentum in GeV.
    fn momentum(&self) -> FourMomentum;
    /// Declared rest mass in GeV.
    fn mass(&self) -> f64;
    /// Spin-density matrix.
    fn sdm(&self) -> &SpinDensity;
}

/// Spin-1/2 particle: electron, positron, muon or nucleon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lepton {
    momentum: FourMomentum,
    mass: f64,
    sdm: SpinDensity,
}

impl Lepton {
    /// Creates an unpolarized lepton.
    pub fn new(momentum: FourMomentum, mass: f64) -> Self {
        Self {
            momentum,
            mass,
            sdm: SpinDensity::unpolarized(),
        }
    }

    /// On-shell lepton with the given three-momentum.
    pub fn on_shell(mass: f64, momentum: ThreeVector) -> Self {
        Self::new(FourMomentum::from_mass_and_momentum(mass, momentum), mass)
    }

    /// Replaces the spin-density matrix.
    #[must_use]
    pub fn with_sdm(mut self, sdm: SpinDensity) -> Self {
        self.sdm = sdm;
        self
    }

    /// Replaces the four-momentum.
    #[must_use]
    pub fn with_momentum(mut self, momentum: FourMomentum) -> Self {
        self.momentum = momentum;
        self
    }
}

impl Particle for Lepton {
    fn momentum(&self) -> FourMomentum {
        self.momentum
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    fn sdm(&self) -> &SpinDensity {
        &self.sdm
    }
}

/// Real photon with helicity-basis polarization vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Photon {
    momentum: FourMomentum,
    sdm: SpinDensity,
}

impl Photon {
    /// Creates an unpolarized photon.
    pub fn new(momentum: FourMomentum) -> Self {
        Self {
            momentum,
            sdm: SpinDensity::unpolarized(),
        }
    }

    /// Photon with the given three-momentum, `E = |k|`.
    pub fn along(momentum: ThreeVector) -> Self {
        Self::new(FourMomentum::from_mass_and_momentum(0.0, momentum))
    }

    /// Replaces the spin-density matrix.
    #[must_use]
    pub fn with_sdm(mut self, sdm: SpinDensity) -> Self {
        self.sdm = sdm;
        self
    }

    /// Replaces the four-momentum.
    #[must_use]
    pub fn with_momentum(mut self, momentum: FourMomentum) -> Self {
        self.momentum = momentum;
        self
    }

    /// Polarization vector `i` (1 = helicity +1, 2 = helicity -1).
    ///
    /// `eps(+-) = -+(e1 +- i e2)/sqrt(2)` with `e1`, `e2` the transverse
    /// unit vectors of increasing theta and phi.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPolarizationIndex`] for `i` outside {1, 2}.
    pub fn eps(&self, i: usize) -> Result<PolarizationVector> {
        match i {
            1 => Ok(self.helicity_vector(true)),
            2 => Ok(self.helicity_vector(false)),
            other => Err(Error::InvalidPolarizationIndex(other)),
        }
    }

    fn helicity_vector(&self, plus: bool) -> PolarizationVector {
        let k = self.momentum.momentum();
        let (sin_theta, cos_theta) = k.polar_angle().sin_cos();
        let (sin_phi, cos_phi) = k.azimuth().sin_cos();
        let e1 = ThreeVector::new(cos_theta * cos_phi, cos_theta * sin_phi, -sin_theta);
        let e2 = ThreeVector::new(-sin_phi, cos_phi, 0.0);
        let r = std::f64::consts::FRAC_1_SQRT_2;
        let a = Complex64::new(if plus { -r } else { r }, 0.0);
        PolarizationVector::transverse(e1, a, e2, Complex64::new(0.0, -r))
    }

    /// Complex conjugate of [`Photon::eps`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidPolarizationIndex`] for `i` outside {1, 2}.
    pub fn eps_star(&self, i: usize) -> Result<PolarizationVector> {
        Ok(self.eps(i)?.conj())
    }

    /// Both polarization vectors in tensor-index order.
    pub fn polarizations(&self) -> [PolarizationVector; 2] {
        [self.helicity_vector(true), self.helicity_vector(false)]
    }

    /// Both conjugated polarization vectors in tensor-index order.
    pub fn conj_polarizations(&self) -> [PolarizationVector; 2] {
        self.polarizations().map(|eps| eps.conj())
    }
}

impl Particle for Photon {
    fn momentum(&self) -> FourMomentum {
        self.momentum
    }

    fn mass(&self) -> f64 {
        0.0
    }

    fn sdm(&self) -> &SpinDensity {
        &self.sdm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sdm_constructors() {
        assert_abs_diff_eq!(SpinDensity::unpolarized().trace().re, 1.0);
        assert_abs_diff_eq!(SpinDensity::unit().trace().re, 2.0);
        let down = SpinDensity::pure(1).unwrap();
        assert_abs_diff_eq!(down.get(1, 1).re, 1.0);
        assert_abs_diff_eq!(down.get(0, 0).re, 0.0);
        assert!(SpinDensity::pure(2).is_err());
    }

    #[test]
    fn test_polarization_sdm() {
        let sdm = SpinDensity::from_polarization(ThreeVector::new(0.0, 0.6, 0.0));
        assert!(sdm.is_hermitian(1e-14));
        assert_abs_diff_eq!(sdm.trace().re, 1.0, epsilon = 1e-14);
        // (I + 0.6 sigma_2)/2 has rho[0][1] = -0.3 i
        assert_abs_diff_eq!(sdm.get(0, 1).im, -0.3, epsilon = 1e-14);
        assert_abs_diff_eq!(sdm.weight(SdmRole::Preparation, 0, 1).im, -0.3, epsilon = 1e-14);
        assert_abs_diff_eq!(sdm.weight(SdmRole::Detection, 0, 1).im, 0.3, epsilon = 1e-14);
    }

    #[test]
    fn test_polarization_vectors_transverse_and_normalised() {
        let photon = Photon::along(ThreeVector::new(0.3, -0.4, 1.2));
        let k = photon.momentum();
        for eps in photon.polarizations() {
            assert_abs_diff_eq!(eps.scalar_prod_real(&k).norm(), 0.0, epsilon = 1e-14);
            // eps . eps* = -1 for spacelike unit polarization
            let norm = eps.scalar_prod(&eps.conj());
            assert_abs_diff_eq!(norm.re, -1.0, epsilon = 1e-14);
            assert_abs_diff_eq!(norm.im, 0.0, epsilon = 1e-14);
        }
        let [plus, minus] = photon.polarizations();
        assert_abs_diff_eq!(plus.scalar_prod(&minus.conj()).norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_invalid_polarization_index() {
        let photon = Photon::along(ThreeVector::Z);
        assert_eq!(photon.eps(0), Err(Error::InvalidPolarizationIndex(0)));
        assert!(photon.eps_star(3).is_err());
    }

    #[test]
    fn test_lepton_accessors() {
        let lepton = Lepton::on_shell(0.105, ThreeVector::new(0.0, 0.0, 1.0))
            .with_sdm(SpinDensity::unit());
        assert_abs_diff_eq!(lepton.mass(), 0.105);
        assert_abs_diff_eq!(lepton.momentum().invariant_mass(), 0.105, epsilon = 1e-12);
        assert_eq!(*lepton.sdm(), SpinDensity::unit());
    }
}
