//! Complex 2x2 matrices in the basis `{1, sigma_1, sigma_2, sigma_3}`.

use std::fmt;
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

use num_complex::Complex64;

use crate::config::Resolution;
use crate::error::{Error, Result};
use crate::vector::{ThreeRotation, ThreeVector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Selects one of the four Pauli basis matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PauliIndex {
    /// The 2x2 identity.
    One,
    /// `sigma_1`.
    Sigma1,
    /// `sigma_2`.
    Sigma2,
    /// `sigma_3`.
    Sigma3,
}

/// Complex 2x2 matrix with SU(2) helpers.
///
/// Near-equality checks use [`Resolution::current`] unless a `_within`
/// variant is called with an explicit threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PauliMatrix {
    m: [[Complex64; 2]; 2],
}

impl PauliMatrix {
    /// Wraps raw row-major entries.
    #[inline]
    pub const fn new(m: [[Complex64; 2]; 2]) -> Self {
        Self { m }
    }

    /// The zero matrix.
    pub const fn zero() -> Self {
        Self { m: [[ZERO; 2]; 2] }
    }

    /// The identity matrix.
    pub const fn identity() -> Self {
        Self {
            m: [[ONE, ZERO], [ZERO, ONE]],
        }
    }

    /// One of the standard basis matrices.
    pub fn basis(index: PauliIndex) -> Self {
        let m = match index {
            PauliIndex::One => [[ONE, ZERO], [ZERO, ONE]],
            PauliIndex::Sigma1 => [[ZERO, ONE], [ONE, ZERO]],
            PauliIndex::Sigma2 => [[ZERO, -I], [I, ZERO]],
            PauliIndex::Sigma3 => [[ONE, ZERO], [ZERO, -ONE]],
        };
        Self { m }
    }

    /// `a * 1 + b . sigma` with real coefficients (a Hermitian matrix).
    pub fn compose(a: f64, b: ThreeVector) -> Self {
        Self::compose_complex(
            Complex64::new(a, 0.0),
            [b.x.into(), b.y.into(), b.z.into()],
        )
    }

    /// `a * 1 + b . sigma` with complex coefficients.
    pub fn compose_complex(a: Complex64, b: [Complex64; 3]) -> Self {
        Self {
            m: [[a + b[2], b[0] - I * b[1]], [b[0] + I * b[1], a - b[2]]],
        }
    }

    /// Inverse of [`PauliMatrix::compose`].
    ///
    /// # Errors
    /// Returns [`Error::NonHermitian`] if the matrix is not Hermitian within
    /// the current resolution.
    pub fn decompose(&self) -> Result<(f64, ThreeVector)> {
        self.decompose_within(Resolution::current())
    }

    /// [`PauliMatrix::decompose`] with an explicit resolution.
    ///
    /// # Errors
    /// Returns [`Error::NonHermitian`] for non-Hermitian input.
    pub fn decompose_within(&self, resolution: Resolution) -> Result<(f64, ThreeVector)> {
        if !self.is_hermitian_within(resolution) {
            return Err(Error::NonHermitian);
        }
        let m = &self.m;
        let a = (m[0][0] + m[1][1]).re / 2.0;
        let b = ThreeVector::new(
            (m[1][0] + m[0][1]).re / 2.0,
            (m[1][0] - m[0][1]).im / 2.0,
            (m[0][0] - m[1][1]).re / 2.0,
        );
        Ok((a, b))
    }

    /// Inverse of [`PauliMatrix::compose_complex`]; defined for every matrix.
    pub fn decompose_complex(&self) -> (Complex64, [Complex64; 3]) {
        let m = &self.m;
        (
            (m[0][0] + m[1][1]) / 2.0,
            [
                (m[1][0] + m[0][1]) / 2.0,
                (m[1][0] - m[0][1]) / (I * 2.0),
                (m[0][0] - m[1][1]) / 2.0,
            ],
        )
    }

    /// Entry `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.m[row][col]
    }

    /// Determinant.
    pub fn determinant(&self) -> Complex64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Trace.
    pub fn trace(&self) -> Complex64 {
        self.m[0][0] + self.m[1][1]
    }

    /// Hermitian conjugate.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        let m = &self.m;
        Self {
            m: [
                [m[0][0].conj(), m[1][0].conj()],
                [m[0][1].conj(), m[1][1].conj()],
            ],
        }
    }

    /// Whether the matrix equals its adjoint within the current resolution.
    pub fn is_hermitian(&self) -> bool {
        self.is_hermitian_within(Resolution::current())
    }

    /// [`PauliMatrix::is_hermitian`] with an explicit resolution.
    pub fn is_hermitian_within(&self, resolution: Resolution) -> bool {
        self.approx_eq_within(&self.adjoint(), resolution)
    }

    /// Whether both off-diagonal entries vanish within the current resolution.
    pub fn is_diagonal(&self) -> bool {
        let limit = Resolution::current().value();
        self.m[0][1].norm() < limit && self.m[1][0].norm() < limit
    }

    /// Entry-wise comparison within the current resolution.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_within(other, Resolution::current())
    }

    /// Entry-wise comparison within an explicit resolution.
    pub fn approx_eq_within(&self, other: &Self, resolution: Resolution) -> bool {
        let limit = resolution.value();
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).norm() < limit)
    }

    /// Returns the inverse matrix.
    ///
    /// # Errors
    /// Returns [`Error::SingularMatrix`] when `|det|` is below the current
    /// resolution.
    pub fn try_inverse(&self) -> Result<Self> {
        let det = self.determinant();
        if det.norm() < Resolution::current().value() {
            return Err(Error::SingularMatrix {
                determinant: det.norm(),
            });
        }
        let m = &self.m;
        Ok(Self {
            m: [[m[1][1] / det, -m[0][1] / det], [-m[1][0] / det, m[0][0] / det]],
        })
    }

    /// Inverts in place; a singular matrix is left untouched.
    ///
    /// # Errors
    /// Returns [`Error::SingularMatrix`] when `|det|` is below resolution.
    pub fn invert(&mut self) -> Result<()> {
        *self = self.try_inverse()?;
        Ok(())
    }

    /// Spin-1/2 rotation operator `cos(a/2) + i sin(a/2) n.sigma`.
    ///
    /// The axis need not be normalised.
    pub fn rotation(axis: ThreeVector, angle: f64) -> Self {
        let n = axis.normalized();
        let (sin_half, cos_half) = (angle / 2.0).sin_cos();
        let b = [n.x, n.y, n.z].map(|c| I * (c * sin_half));
        Self::compose_complex(cos_half.into(), b)
    }

    /// Rotation about `v` by the angle `|v|`.
    pub fn rotation_vector(v: ThreeVector) -> Self {
        Self::rotation(v, v.length())
    }

    /// Euler rotation `R_z(psi) R_y(theta) R_z(phi)`.
    pub fn euler_rotation(phi: f64, theta: f64, psi: f64) -> Self {
        Self::rotation(ThreeVector::Z, psi)
            * Self::rotation(ThreeVector::Y, theta)
            * Self::rotation(ThreeVector::Z, phi)
    }

    /// Rotation operator for a spatial rotation, using its canonical axis and
    /// angle in [0, pi].
    ///
    /// This may differ from [`PauliMatrix::euler_rotation`] or
    /// [`PauliMatrix::rotation`] for the same spatial rotation by an overall
    /// sign, the spin-1/2 phase of a 2 pi turn.
    pub fn from_rotation(rotation: &ThreeRotation) -> Self {
        let (axis, angle) = rotation.axis_angle();
        Self::rotation(axis, angle)
    }

    /// Similarity transform `M A M^-1`.
    ///
    /// # Errors
    /// Returns [`Error::SingularMatrix`] if `m` cannot be inverted.
    pub fn sim_transform(&self, m: &Self) -> Result<Self> {
        Ok(*m * *self * m.try_inverse()?)
    }

    /// Unitary transform `M A M^dagger`.
    #[must_use]
    pub fn uni_transform(&self, m: &Self) -> Self {
        *m * *self * m.adjoint()
    }

    /// Raw layout: row-major entries with real and imaginary parts interleaved.
    pub fn to_array(&self) -> [f64; 8] {
        let mut out = [0.0; 8];
        for (k, z) in self.m.iter().flatten().enumerate() {
            out[2 * k] = z.re;
            out[2 * k + 1] = z.im;
        }
        out
    }

    /// Inverse of [`PauliMatrix::to_array`].
    pub fn from_array(raw: [f64; 8]) -> Self {
        let z = |k: usize| Complex64::new(raw[2 * k], raw[2 * k + 1]);
        Self {
            m: [[z(0), z(1)], [z(2), z(3)]],
        }
    }
}

impl Mul for PauliMatrix {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (&self.m, &rhs.m);
        Self {
            m: [
                [
                    a[0][0] * b[0][0] + a[0][1] * b[1][0],
                    a[0][0] * b[0][1] + a[0][1] * b[1][1],
                ],
                [
                    a[1][0] * b[0][0] + a[1][1] * b[1][0],
                    a[1][0] * b[0][1] + a[1][1] * b[1][1],
                ],
            ],
        }
    }
}

impl MulAssign for PauliMatrix {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Complex64> for PauliMatrix {
    type Output = Self;
    fn mul(self, rhs: Complex64) -> Self {
        Self {
            m: self.m.map(|row| row.map(|z| z * rhs)),
        }
    }
}

impl Mul<f64> for PauliMatrix {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self * Complex64::new(rhs, 0.0)
    }
}

impl Add for PauliMatrix {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let (a, b) = (&self.m, &rhs.m);
        Self {
            m: [
                [a[0][0] + b[0][0], a[0][1] + b[0][1]],
                [a[1][0] + b[1][0], a[1][1] + b[1][1]],
            ],
        }
    }
}

impl Sub for PauliMatrix {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for PauliMatrix {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

/// Rows in brackets; format options apply to every entry.
impl fmt::Display for PauliMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.m.iter().enumerate() {
            f.write_str(if r == 0 { "[[" } else { ", [" })?;
            fmt::Display::fmt(&row[0], f)?;
            f.write_str(", ")?;
            fmt::Display::fmt(&row[1], f)?;
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}
