//! Dirac algebra in the Dirac representation.
//!
//! `gamma^0 = diag(1, 1, -1, -1)` and `gamma^k = [[0, sigma_k], [-sigma_k, 0]]`.
//! Spinors are helicity eigenstates normalised to `ubar u = 2m`.

use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::vector::{FourMomentum, PolarizationVector};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Fermion helicity, `+1/2` or `-1/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helicity {
    /// Helicity +1/2, tensor index 0.
    Up,
    /// Helicity -1/2, tensor index 1.
    Down,
}

impl Helicity {
    /// Both helicities in tensor-index order.
    pub const ALL: [Self; 2] = [Self::Up, Self::Down];

    /// Tensor index (0 for `Up`, 1 for `Down`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
        }
    }

    /// Inverse of [`Helicity::index`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidHelicityIndex`] for indices other than 0 and 1.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Self::Up),
            1 => Ok(Self::Down),
            other => Err(Error::InvalidHelicityIndex(other)),
        }
    }

    /// Twice the helicity: +1 or -1.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Complex 4x4 matrix acting on Dirac spinors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiracMatrix {
    m: [[Complex64; 4]; 4],
}

impl Default for DiracMatrix {
    fn default() -> Self {
        Self::zero()
    }
}

impl DiracMatrix {
    /// Wraps raw row-major entries.
    #[inline]
    pub const fn new(m: [[Complex64; 4]; 4]) -> Self {
        Self { m }
    }

    /// The zero matrix.
    pub const fn zero() -> Self {
        Self { m: [[ZERO; 4]; 4] }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::diagonal([ONE; 4])
    }

    fn diagonal(d: [Complex64; 4]) -> Self {
        let mut out = Self::zero();
        for (k, value) in d.into_iter().enumerate() {
            out.m[k][k] = value;
        }
        out
    }

    /// Dirac matrix `gamma^mu`.
    ///
    /// # Panics
    /// Panics if `mu > 3`.
    pub fn gamma(mu: usize) -> Self {
        let (z, o, n) = (ZERO, ONE, -ONE);
        let m = match mu {
            0 => return Self::diagonal([o, o, n, n]),
            1 => [[z, z, z, o], [z, z, o, z], [z, n, z, z], [n, z, z, z]],
            2 => [[z, z, z, -I], [z, z, I, z], [z, I, z, z], [-I, z, z, z]],
            3 => [[z, z, o, z], [z, z, z, n], [n, z, z, z], [z, o, z, z]],
            _ => panic!("Lorentz index out of range: {mu}"),
        };
        Self { m }
    }

    /// `sigma^{mu nu} = (i/2) [gamma^mu, gamma^nu]`.
    pub fn sigma(mu: usize, nu: usize) -> Self {
        let (a, b) = (Self::gamma(mu), Self::gamma(nu));
        (a * b - b * a) * Complex64::new(0.0, 0.5)
    }

    /// Feynman slash `gamma^mu p_mu` of a real four-vector.
    pub fn slash(p: &FourMomentum) -> Self {
        (1..4).fold(Self::gamma(0) * p[0], |acc, k| acc - Self::gamma(k) * p[k])
    }

    /// Feynman slash of a complex four-vector, without conjugation.
    pub fn slash_complex(eps: &PolarizationVector) -> Self {
        (1..4).fold(Self::gamma(0) * eps[0], |acc, k| acc - Self::gamma(k) * eps[k])
    }

    /// Entry `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.m[row][col]
    }

    fn map(self, f: impl Fn(Complex64) -> Complex64) -> Self {
        Self {
            m: self.m.map(|row| row.map(&f)),
        }
    }

    fn zip(self, other: Self, f: impl Fn(Complex64, Complex64) -> Complex64) -> Self {
        let mut out = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                out.m[i][j] = f(self.m[i][j], other.m[i][j]);
            }
        }
        out
    }
}

impl Index<(usize, usize)> for DiracMatrix {
    type Output = Complex64;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Complex64 {
        &self.m[row][col]
    }
}

impl Add for DiracMatrix {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl AddAssign for DiracMatrix {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for DiracMatrix {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Neg for DiracMatrix {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

/// Adds a multiple of the identity, as in `slash(p) + m`.
impl Add<f64> for DiracMatrix {
    type Output = Self;
    fn add(mut self, rhs: f64) -> Self {
        for k in 0..4 {
            self.m[k][k] += rhs;
        }
        self
    }
}

impl Mul<f64> for DiracMatrix {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.map(|a| a * rhs)
    }
}

impl Mul<Complex64> for DiracMatrix {
    type Output = Self;
    fn mul(self, rhs: Complex64) -> Self {
        self.map(|a| a * rhs)
    }
}

impl Div<f64> for DiracMatrix {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        self.map(|a| a / rhs)
    }
}

impl Mul for DiracMatrix {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                out.m[i][j] = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        out
    }
}

impl Mul<DiracSpinor> for DiracMatrix {
    type Output = DiracSpinor;
    fn mul(self, rhs: DiracSpinor) -> DiracSpinor {
        let mut out = [ZERO; 4];
        for (i, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|k| self.m[i][k] * rhs.c[k]).sum();
        }
        DiracSpinor { c: out }
    }
}

/// Four-component Dirac spinor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiracSpinor {
    c: [Complex64; 4],
}

impl DiracSpinor {
    /// Wraps raw components.
    #[inline]
    pub const fn new(c: [Complex64; 4]) -> Self {
        Self { c }
    }

    /// Positive-energy helicity spinor `u(p, h)`.
    ///
    /// The mass is taken from the invariant `p.p`, clamped at zero.
    pub fn u(p: &FourMomentum, helicity: Helicity) -> Self {
        let mass = p.invariant_mass();
        let momentum = p.momentum();
        let length = momentum.length();
        let (theta, phi) = (momentum.polar_angle(), momentum.azimuth());
        let (sin_half, cos_half) = (theta / 2.0).sin_cos();
        let chi = match helicity {
            Helicity::Up => [
                Complex64::new(cos_half, 0.0),
                Complex64::from_polar(sin_half, phi),
            ],
            Helicity::Down => [
                -Complex64::from_polar(sin_half, -phi),
                Complex64::new(cos_half, 0.0),
            ],
        };
        let upper = (p.energy() + mass).sqrt();
        let lower = helicity.sign() * length / upper;
        Self::new([
            chi[0] * upper,
            chi[1] * upper,
            chi[0] * lower,
            chi[1] * lower,
        ])
    }

    /// Negative-energy spinor `v(p, h) = i gamma^2 u(p, h)*`.
    pub fn v(p: &FourMomentum, helicity: Helicity) -> Self {
        let u = Self::u(p, helicity).conj();
        Self::new([u.c[3], -u.c[2], -u.c[1], u.c[0]])
    }

    /// `u` spinors for both helicities, in tensor-index order.
    pub fn u_pair(p: &FourMomentum) -> [Self; 2] {
        Helicity::ALL.map(|h| Self::u(p, h))
    }

    /// `v` spinors for both helicities, in tensor-index order.
    pub fn v_pair(p: &FourMomentum) -> [Self; 2] {
        Helicity::ALL.map(|h| Self::v(p, h))
    }

    /// Component-wise complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.c.map(|z| z.conj()))
    }

    /// Dirac adjoint `psi^dagger gamma^0`, returned as the conjugated row.
    #[must_use]
    pub fn bar(&self) -> [Complex64; 4] {
        let c = self.conj().c;
        [c[0], c[1], -c[2], -c[3]]
    }

    /// Bilinear `self^dagger gamma^0 ket`.
    pub fn sandwich(&self, ket: &Self) -> Complex64 {
        self.bar().iter().zip(ket.c.iter()).map(|(a, b)| a * b).sum()
    }

    /// Bilinear `self^dagger gamma^0 M ket`.
    pub fn sandwich_with(&self, matrix: &DiracMatrix, ket: &Self) -> Complex64 {
        self.sandwich(&(*matrix * *ket))
    }

    /// Component `k`.
    #[inline]
    pub fn get(&self, k: usize) -> Complex64 {
        self.c[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::ThreeVector;
    use approx::assert_abs_diff_eq;

    fn metric(mu: usize) -> f64 {
        if mu == 0 {
            1.0
        } else {
            -1.0
        }
    }

    fn max_abs(m: &DiracMatrix) -> f64 {
        let mut worst = 0.0_f64;
        for i in 0..4 {
            for j in 0..4 {
                worst = worst.max(m[(i, j)].norm());
            }
        }
        worst
    }

    #[test]
    fn test_clifford_algebra() {
        for mu in 0..4 {
            for nu in 0..4 {
                let (a, b) = (DiracMatrix::gamma(mu), DiracMatrix::gamma(nu));
                let anti = a * b + b * a;
                let expected = if mu == nu {
                    DiracMatrix::identity() * (2.0 * metric(mu))
                } else {
                    DiracMatrix::zero()
                };
                assert!(max_abs(&(anti - expected)) < 1e-14, "mu={mu} nu={nu}");
            }
        }
    }

    #[test]
    fn test_slash_squares_to_invariant() {
        let p = FourMomentum::new(3.0, 0.5, -1.0, 2.0);
        let slash = DiracMatrix::slash(&p);
        let diff = slash * slash - DiracMatrix::identity() * p.invariant_sqr();
        assert!(max_abs(&diff) < 1e-12);
    }

    #[test]
    fn test_sigma_antisymmetric() {
        let diff = DiracMatrix::sigma(1, 2) + DiracMatrix::sigma(2, 1);
        assert!(max_abs(&diff) < 1e-14);
        assert!(max_abs(&DiracMatrix::sigma(3, 3)) < 1e-14);
    }

    #[test]
    fn test_spinor_normalisation() {
        let mass = 0.105;
        let p = FourMomentum::from_mass_and_momentum(mass, ThreeVector::new(0.3, -0.7, 0.2));
        for h in Helicity::ALL {
            let u = DiracSpinor::u(&p, h);
            let v = DiracSpinor::v(&p, h);
            assert_abs_diff_eq!(u.sandwich(&u).re, 2.0 * mass, epsilon = 1e-12);
            assert_abs_diff_eq!(v.sandwich(&v).re, -2.0 * mass, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_dirac_equation() {
        let mass = 0.938;
        let p = FourMomentum::from_mass_and_momentum(mass, ThreeVector::new(-0.4, 0.1, 1.3));
        let slash = DiracMatrix::slash(&p);
        for h in Helicity::ALL {
            let u = DiracSpinor::u(&p, h);
            let v = DiracSpinor::v(&p, h);
            let ru = (slash + (-mass)) * u;
            let rv = (slash + mass) * v;
            for k in 0..4 {
                assert!(ru.get(k).norm() < 1e-12);
                assert!(rv.get(k).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_spin_sum_completeness() {
        let mass = 0.2;
        let p = FourMomentum::from_mass_and_momentum(mass, ThreeVector::new(0.1, 0.2, -0.5));
        // sum_h u ubar = slash(p) + m, checked through bilinears with unit spinors.
        let expected = DiracMatrix::slash(&p) + mass;
        let u = DiracSpinor::u_pair(&p);
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = Complex64::new(0.0, 0.0);
                for s in &u {
                    sum += s.get(i) * s.bar()[j];
                }
                assert!((sum - expected[(i, j)]).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_helicity_index() {
        assert_eq!(Helicity::from_index(1), Ok(Helicity::Down));
        assert_eq!(Helicity::Up.index(), 0);
        assert!(matches!(
            Helicity::from_index(2),
            Err(Error::InvalidHelicityIndex(2))
        ));
    }
}
