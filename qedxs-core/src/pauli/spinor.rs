//! Two-component spinors acted on by [`PauliMatrix`].

use std::fmt;
use std::ops::Mul;

use num_complex::Complex64;

use super::PauliMatrix;
use crate::config::Resolution;
use crate::vector::{ThreeRotation, ThreeVector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two-component complex spinor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PauliSpinor {
    s: [Complex64; 2],
}

impl PauliSpinor {
    /// Creates a spinor from its two components.
    #[inline]
    pub const fn new(up: Complex64, down: Complex64) -> Self {
        Self { s: [up, down] }
    }

    /// State polarized along the direction `(theta, phi)`.
    ///
    /// Equals `(cos(theta/2) e^{-i phi/2}, sin(theta/2) e^{i phi/2})`, the
    /// reference state `(1, 0)` carried onto that direction.
    pub fn polar(theta: f64, phi: f64) -> Self {
        let (sin_half, cos_half) = (theta / 2.0).sin_cos();
        Self::new(
            Complex64::from_polar(cos_half, -phi / 2.0),
            Complex64::from_polar(sin_half, phi / 2.0),
        )
    }

    /// Component `k` (0 = up, 1 = down).
    #[inline]
    pub fn get(&self, k: usize) -> Complex64 {
        self.s[k]
    }

    /// Replaces `self` with `op * self`.
    pub fn operate(&mut self, op: &PauliMatrix) -> &mut Self {
        *self = *op * *self;
        self
    }

    /// Rotates by `angle` about `axis`.
    pub fn rotate(&mut self, axis: ThreeVector, angle: f64) -> &mut Self {
        self.operate(&PauliMatrix::rotation(axis, angle))
    }

    /// Rotates by the Euler angles `(phi, theta, psi)`.
    pub fn rotate_euler(&mut self, phi: f64, theta: f64, psi: f64) -> &mut Self {
        self.operate(&PauliMatrix::euler_rotation(phi, theta, psi))
    }

    /// Rotates about `v` by the angle `|v|`.
    pub fn rotate_vector(&mut self, v: ThreeVector) -> &mut Self {
        self.operate(&PauliMatrix::rotation_vector(v))
    }

    /// Rotates by a spatial rotation (canonical axis and angle).
    pub fn rotate_by(&mut self, rotation: &ThreeRotation) -> &mut Self {
        self.operate(&PauliMatrix::from_rotation(rotation))
    }

    /// Hermitian inner product `<self|other>`.
    pub fn inner(&self, other: &Self) -> Complex64 {
        self.s[0].conj() * other.s[0] + self.s[1].conj() * other.s[1]
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.inner(self).re.sqrt()
    }

    /// Expectation value of `sigma`, divided by the squared norm.
    pub fn polarization(&self) -> ThreeVector {
        let [up, down] = self.s;
        let cross = up.conj() * down;
        let norm_sqr = self.inner(self).re;
        ThreeVector::new(
            2.0 * cross.re,
            2.0 * cross.im,
            up.norm_sqr() - down.norm_sqr(),
        ) * (1.0 / norm_sqr)
    }

    /// Component-wise comparison within the current resolution.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_within(other, Resolution::current())
    }

    /// Component-wise comparison within an explicit resolution.
    pub fn approx_eq_within(&self, other: &Self, resolution: Resolution) -> bool {
        self.s
            .iter()
            .zip(other.s.iter())
            .all(|(a, b)| (a - b).norm() < resolution.value())
    }

    /// Raw layout: `[re0, im0, re1, im1]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.s[0].re, self.s[0].im, self.s[1].re, self.s[1].im]
    }

    /// Inverse of [`PauliSpinor::to_array`].
    pub fn from_array(raw: [f64; 4]) -> Self {
        Self::new(
            Complex64::new(raw[0], raw[1]),
            Complex64::new(raw[2], raw[3]),
        )
    }
}

impl Mul<PauliSpinor> for PauliMatrix {
    type Output = PauliSpinor;
    fn mul(self, rhs: PauliSpinor) -> PauliSpinor {
        PauliSpinor::new(
            self.get(0, 0) * rhs.s[0] + self.get(0, 1) * rhs.s[1],
            self.get(1, 0) * rhs.s[0] + self.get(1, 1) * rhs.s[1],
        )
    }
}

/// Column as `[up, down]`; format options apply to both components.
impl fmt::Display for PauliSpinor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        fmt::Display::fmt(&self.s[0], f)?;
        f.write_str(", ")?;
        fmt::Display::fmt(&self.s[1], f)?;
        f.write_str("]")
    }
}
