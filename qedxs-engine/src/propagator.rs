//! Internal lines and vertex factors.

use num_complex::Complex64;
use qedxs_core::dirac::DiracMatrix;
use qedxs_core::vector::FourMomentum;

/// Diagonal of the Minkowski metric: +1 for `mu = 0`, -1 otherwise.
#[inline]
pub fn metric(mu: usize) -> f64 {
    if mu == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Fermion propagator `(slash(q) + m) / (q^2 - p^2)`.
///
/// `pole` is the on-shell external momentum adjoining the line, so the
/// denominator is `(q - p).(q + p)`: `2 p.k` for a real photon of momentum
/// `k = q - p`, and `k^2 + 2 p.k` in general.
pub fn fermion_propagator(q: &FourMomentum, pole: &FourMomentum, mass: f64) -> DiracMatrix {
    let denominator = (*q - *pole).scalar_prod(&(*q + *pole));
    (DiracMatrix::slash(q) + mass) / denominator
}

/// Photon propagator `1 / q^2`; the metric tensor is applied by the caller.
#[inline]
pub fn photon_propagator(q: &FourMomentum) -> f64 {
    1.0 / q.invariant_sqr()
}

/// The two orderings of two vertices on one fermion line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoVertexLine {
    /// Propagator between `first` (right) and `second` (left).
    pub direct: DiracMatrix,
    /// Propagator between `second` (right) and `first` (left).
    pub crossed: DiracMatrix,
}

impl TwoVertexLine {
    /// Creates the line from its two propagators.
    pub fn new(direct: DiracMatrix, crossed: DiracMatrix) -> Self {
        Self { direct, crossed }
    }

    /// `second * direct * first + first * crossed * second`.
    pub fn current(&self, first: &DiracMatrix, second: &DiracMatrix) -> DiracMatrix {
        *second * self.direct * *first + *first * self.crossed * *second
    }
}

/// Electromagnetic vertex of a spin-1/2 composite:
/// `F1 gamma^mu + i F2/(2M) sigma^{mu nu} q_nu`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NucleonVertex {
    currents: [DiracMatrix; 4],
}

impl NucleonVertex {
    /// Builds all four components for momentum transfer `q` into the nucleon.
    pub fn new(f1: f64, f2: f64, mass: f64, q: &FourMomentum) -> Self {
        let anomalous = Complex64::new(0.0, f2 / (2.0 * mass));
        let currents = std::array::from_fn(|mu| {
            let tensor = (0..4)
                .filter(|&nu| nu != mu)
                .fold(DiracMatrix::zero(), |acc, nu| {
                    acc + DiracMatrix::sigma(mu, nu) * (metric(nu) * q[nu])
                });
            DiracMatrix::gamma(mu) * f1 + tensor * anomalous
        });
        Self { currents }
    }

    /// Component `mu` of the vertex.
    #[inline]
    pub fn current(&self, mu: usize) -> &DiracMatrix {
        &self.currents[mu]
    }
}
