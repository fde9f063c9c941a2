//! Three-vectors, Lorentz four-vectors and spatial rotations.
//!
//! Four-vectors are stored contravariantly as `(t, x, y, z)` and contracted
//! with the metric `diag(+1, -1, -1, -1)`.

use std::ops::{Add, AddAssign, Index, Mul, Neg, Sub, SubAssign};

use num_complex::Complex64;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Real Cartesian three-vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreeVector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl ThreeVector {
    /// Unit vector along x.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along y.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along z.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new three-vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector of given length along the direction (theta, phi).
    pub fn from_polar(length: f64, theta: f64, phi: f64) -> Self {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Self::new(
            length * sin_theta * cos_phi,
            length * sin_theta * sin_phi,
            length * cos_theta,
        )
    }

    /// Euclidean dot product.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared length.
    #[inline]
    pub fn length_sqr(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_sqr().sqrt()
    }

    /// Returns the unit vector along `self`, or `self` if it has zero length.
    pub fn normalized(&self) -> Self {
        let length = self.length();
        if length > 0.0 {
            *self * (1.0 / length)
        } else {
            *self
        }
    }

    /// Polar angle with respect to +z, in [0, pi].
    pub fn polar_angle(&self) -> f64 {
        self.x.hypot(self.y).atan2(self.z)
    }

    /// Azimuthal angle about +z, in (-pi, pi].
    pub fn azimuth(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Components as an array.
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for ThreeVector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for ThreeVector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for ThreeVector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for ThreeVector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Real Lorentz four-vector `(t, x, y, z)`, typically a four-momentum in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FourMomentum {
    c: [f64; 4],
}

impl FourMomentum {
    /// Creates a four-vector from its contravariant components.
    #[inline]
    pub const fn new(t: f64, x: f64, y: f64, z: f64) -> Self {
        Self { c: [t, x, y, z] }
    }

    /// The zero four-vector.
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Builds an on-shell four-momentum from a rest mass and three-momentum.
    pub fn from_mass_and_momentum(mass: f64, p: ThreeVector) -> Self {
        let energy = (mass * mass + p.length_sqr()).sqrt();
        Self::new(energy, p.x, p.y, p.z)
    }

    /// Energy (time) component.
    #[inline]
    pub fn energy(&self) -> f64 {
        self.c[0]
    }

    /// Spatial part.
    #[inline]
    pub fn momentum(&self) -> ThreeVector {
        ThreeVector::new(self.c[1], self.c[2], self.c[3])
    }

    /// Lorentz-invariant scalar product with metric (+,-,-,-).
    #[inline]
    pub fn scalar_prod(&self, other: &Self) -> f64 {
        self.c[0] * other.c[0] - self.c[1] * other.c[1] - self.c[2] * other.c[2]
            - self.c[3] * other.c[3]
    }

    /// Invariant norm `p.p`.
    #[inline]
    pub fn invariant_sqr(&self) -> f64 {
        self.scalar_prod(self)
    }

    /// Invariant mass, clamped at zero for spacelike vectors.
    pub fn invariant_mass(&self) -> f64 {
        self.invariant_sqr().max(0.0).sqrt()
    }

    /// Length of the spatial part.
    #[inline]
    pub fn length(&self) -> f64 {
        self.momentum().length()
    }

    /// Components as an array.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        self.c
    }

    /// Applies an active Lorentz boost with velocity `beta` (|beta| < 1).
    #[must_use]
    pub fn boost(&self, beta: ThreeVector) -> Self {
        let beta_sqr = beta.length_sqr();
        if beta_sqr == 0.0 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - beta_sqr).sqrt();
        let p = self.momentum();
        let beta_p = beta.dot(&p);
        let energy = gamma * (self.c[0] + beta_p);
        let coefficient = (gamma - 1.0) * beta_p / beta_sqr + gamma * self.c[0];
        let boosted = p + beta * coefficient;
        Self::new(energy, boosted.x, boosted.y, boosted.z)
    }

    /// Boosts along +z by the given rapidity.
    #[must_use]
    pub fn rapidity_boost_z(&self, rapidity: f64) -> Self {
        let (sinh, cosh) = (rapidity.sinh(), rapidity.cosh());
        Self::new(
            cosh * self.c[0] + sinh * self.c[3],
            self.c[1],
            self.c[2],
            sinh * self.c[0] + cosh * self.c[3],
        )
    }
}

impl Index<usize> for FourMomentum {
    type Output = f64;
    #[inline]
    fn index(&self, mu: usize) -> &f64 {
        &self.c[mu]
    }
}

impl Add for FourMomentum {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.c[0] + rhs.c[0],
            self.c[1] + rhs.c[1],
            self.c[2] + rhs.c[2],
            self.c[3] + rhs.c[3],
        )
    }
}

impl Sub for FourMomentum {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.c[0] - rhs.c[0],
            self.c[1] - rhs.c[1],
            self.c[2] - rhs.c[2],
            self.c[3] - rhs.c[3],
        )
    }
}

impl AddAssign for FourMomentum {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FourMomentum {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for FourMomentum {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c[0], -self.c[1], -self.c[2], -self.c[3])
    }
}

impl Mul<f64> for FourMomentum {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(
            self.c[0] * rhs,
            self.c[1] * rhs,
            self.c[2] * rhs,
            self.c[3] * rhs,
        )
    }
}

/// Complex four-vector, used for photon polarization states.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarizationVector {
    c: [Complex64; 4],
}

impl PolarizationVector {
    /// Creates a complex four-vector from its contravariant components.
    #[inline]
    pub const fn new(c: [Complex64; 4]) -> Self {
        Self { c }
    }

    /// Purely spatial polarization `(0, e)` built as `a * e1 + b * e2`.
    pub fn transverse(e1: ThreeVector, a: Complex64, e2: ThreeVector, b: Complex64) -> Self {
        Self::new([
            Complex64::new(0.0, 0.0),
            a * e1.x + b * e2.x,
            a * e1.y + b * e2.y,
            a * e1.z + b * e2.z,
        ])
    }

    /// Complex conjugate, component by component.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.c.map(|z| z.conj()))
    }

    /// Bilinear Minkowski product (no conjugation).
    pub fn scalar_prod(&self, other: &Self) -> Complex64 {
        self.c[0] * other.c[0] - self.c[1] * other.c[1] - self.c[2] * other.c[2]
            - self.c[3] * other.c[3]
    }

    /// Minkowski product with a real four-vector.
    pub fn scalar_prod_real(&self, p: &FourMomentum) -> Complex64 {
        self.c[0] * p[0] - self.c[1] * p[1] - self.c[2] * p[2] - self.c[3] * p[3]
    }
}

impl Index<usize> for PolarizationVector {
    type Output = Complex64;
    #[inline]
    fn index(&self, mu: usize) -> &Complex64 {
        &self.c[mu]
    }
}

/// Proper rotation in three dimensions, stored as an orthogonal matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreeRotation {
    m: [[f64; 3]; 3],
}

impl Default for ThreeRotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl ThreeRotation {
    /// The identity rotation.
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Active rotation by `angle` (radians) about `axis` (any non-zero length).
    pub fn from_axis_angle(axis: ThreeVector, angle: f64) -> Self {
        let n = axis.normalized();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Self {
            m: [
                [c + t * n.x * n.x, t * n.x * n.y - s * n.z, t * n.x * n.z + s * n.y],
                [t * n.y * n.x + s * n.z, c + t * n.y * n.y, t * n.y * n.z - s * n.x],
                [t * n.z * n.x - s * n.y, t * n.z * n.y + s * n.x, c + t * n.z * n.z],
            ],
        }
    }

    /// Euler rotation `R_z(psi) R_y(theta) R_z(phi)`.
    pub fn from_euler(phi: f64, theta: f64, psi: f64) -> Self {
        Self::from_axis_angle(ThreeVector::Z, psi)
            * Self::from_axis_angle(ThreeVector::Y, theta)
            * Self::from_axis_angle(ThreeVector::Z, phi)
    }

    /// Matrix element `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    /// Rotates a vector.
    pub fn apply(&self, v: ThreeVector) -> ThreeVector {
        let a = v.to_array();
        let row = |r: &[f64; 3]| r[0] * a[0] + r[1] * a[1] + r[2] * a[2];
        ThreeVector::new(row(&self.m[0]), row(&self.m[1]), row(&self.m[2]))
    }

    /// Inverse (transpose) rotation.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.m[j][i];
            }
        }
        Self { m }
    }

    /// Canonical axis and angle, with the angle in [0, pi].
    ///
    /// The identity returns the z axis with zero angle.
    pub fn axis_angle(&self) -> (ThreeVector, f64) {
        let m = &self.m;
        let cos_angle = ((m[0][0] + m[1][1] + m[2][2] - 1.0) / 2.0).clamp(-1.0, 1.0);
        let axis = ThreeVector::new(m[2][1] - m[1][2], m[0][2] - m[2][0], m[1][0] - m[0][1]);
        let sin_twice = axis.length();
        if sin_twice > 1e-9 {
            let angle = (sin_twice / 2.0).atan2(cos_angle);
            return (axis * (1.0 / sin_twice), angle);
        }
        if cos_angle > 0.0 {
            return (ThreeVector::Z, 0.0);
        }
        // Rotation by pi: R = 2 n n^T - 1, read n off the largest diagonal entry.
        let diag = [m[0][0], m[1][1], m[2][2]];
        let k = (0..3)
            .max_by(|&a, &b| diag[a].total_cmp(&diag[b]))
            .unwrap_or(2);
        let nk = ((diag[k] + 1.0) / 2.0).max(0.0).sqrt();
        let mut n = [0.0; 3];
        n[k] = nk;
        for (j, value) in n.iter_mut().enumerate() {
            if j != k {
                *value = (m[k][j] + m[j][k]) / (4.0 * nk);
            }
        }
        (
            ThreeVector::new(n[0], n[1], n[2]).normalized(),
            std::f64::consts::PI,
        )
    }
}

impl Mul for ThreeRotation {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Self { m }
    }
}
