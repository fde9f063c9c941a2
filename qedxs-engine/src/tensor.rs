//! Dense helicity-amplitude tensors and their polarization-weighted squares.

use num_complex::Complex64;
use qedxs_core::particle::{Particle, SdmRole, SpinDensity};

/// Largest supported number of external legs.
pub const MAX_RANK: usize = 12;

/// Spin-density weight attached to one tensor index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegWeight {
    /// Spin-density matrix of the leg.
    pub sdm: SpinDensity,
    /// Whether the matrix prepares or detects the state.
    pub role: SdmRole,
}

impl LegWeight {
    /// Weight for an incoming leg or an outgoing antifermion.
    pub fn prepared(particle: &impl Particle) -> Self {
        Self {
            sdm: *particle.sdm(),
            role: SdmRole::Preparation,
        }
    }

    /// Weight for an outgoing fermion or photon.
    pub fn detected(particle: &impl Particle) -> Self {
        Self {
            sdm: *particle.sdm(),
            role: SdmRole::Detection,
        }
    }

    /// Element for amplitude index `a` and conjugate index `b`.
    #[inline]
    pub fn weight(&self, a: usize, b: usize) -> Complex64 {
        self.sdm.weight(self.role, a, b)
    }
}

/// Amplitudes indexed by one binary helicity/polarization index per leg.
///
/// Index `k` of a multi-index is bit `rank - 1 - k` of the flat offset, so
/// the first leg varies slowest.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeTensor {
    rank: usize,
    data: Vec<Complex64>,
}

impl AmplitudeTensor {
    /// Builds the tensor by evaluating `f` on every multi-index.
    ///
    /// # Panics
    /// Panics if `rank` exceeds [`MAX_RANK`].
    pub fn from_fn(rank: usize, mut f: impl FnMut(&[usize]) -> Complex64) -> Self {
        assert!(rank <= MAX_RANK, "tensor rank {rank} exceeds {MAX_RANK}");
        let mut index = [0usize; MAX_RANK];
        let data = (0..1usize << rank)
            .map(|flat| {
                decode(flat, &mut index[..rank]);
                f(&index[..rank])
            })
            .collect();
        Self { rank, data }
    }

    /// Number of legs.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of entries, `2^rank`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor has no entries (never true, rank 0 has one).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entry at a multi-index with one entry per leg.
    pub fn get(&self, index: &[usize]) -> Complex64 {
        debug_assert_eq!(index.len(), self.rank, "one index per leg");
        let flat = index.iter().fold(0, |acc, &bit| (acc << 1) | (bit & 1));
        self.data[flat]
    }

    /// `sum_{a,b} A[a] conj(A[b]) prod_k w_k(a_k, b_k)`.
    ///
    /// # Panics
    /// Panics if the number of weights differs from the rank.
    pub fn polarized_sum(&self, weights: &[LegWeight]) -> Complex64 {
        assert_eq!(weights.len(), self.rank, "one weight per leg");
        let mut total = Complex64::new(0.0, 0.0);
        for (a, amp) in self.data.iter().enumerate() {
            let mut row = Complex64::new(0.0, 0.0);
            for (b, conj_amp) in self.data.iter().enumerate() {
                row += conj_amp.conj() * self.product_weight(weights, a, b, None);
            }
            total += amp * row;
        }
        total
    }

    /// Partial polarized sum with leg `leg` left open.
    ///
    /// Entry `[i][j]` sums over every amplitude index with `a_leg = i` and
    /// conjugate index with `b_leg = j`, omitting that leg's own weight. The
    /// diagonal is real and non-negative for a consistent calculation.
    ///
    /// # Panics
    /// Panics if `leg` is out of range or the number of weights differs from
    /// the rank.
    pub fn leg_density(&self, weights: &[LegWeight], leg: usize) -> [[Complex64; 2]; 2] {
        assert_eq!(weights.len(), self.rank, "one weight per leg");
        assert!(leg < self.rank, "leg {leg} out of range");
        let shift = self.rank - 1 - leg;
        let mut density = [[Complex64::new(0.0, 0.0); 2]; 2];
        for (a, amp) in self.data.iter().enumerate() {
            for (b, conj_amp) in self.data.iter().enumerate() {
                let w = self.product_weight(weights, a, b, Some(leg));
                density[(a >> shift) & 1][(b >> shift) & 1] += amp * conj_amp.conj() * w;
            }
        }
        density
    }

    fn product_weight(
        &self,
        weights: &[LegWeight],
        a: usize,
        b: usize,
        skip: Option<usize>,
    ) -> Complex64 {
        let mut product = Complex64::new(1.0, 0.0);
        for (k, weight) in weights.iter().enumerate() {
            if skip == Some(k) {
                continue;
            }
            let shift = self.rank - 1 - k;
            product *= weight.weight((a >> shift) & 1, (b >> shift) & 1);
        }
        product
    }
}

fn decode(flat: usize, index: &mut [usize]) {
    let rank = index.len();
    for (k, slot) in index.iter_mut().enumerate() {
        *slot = (flat >> (rank - 1 - k)) & 1;
    }
}

/// Amplitude tensor together with the spin-density weight of every leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Amplitudes {
    /// Helicity amplitudes.
    pub tensor: AmplitudeTensor,
    /// One weight per tensor index, in the same order.
    pub weights: Vec<LegWeight>,
}

impl Amplitudes {
    /// Polarization-weighted squared amplitude.
    pub fn polarized_sum(&self) -> Complex64 {
        self.tensor.polarized_sum(&self.weights)
    }

    /// Density of one open leg, see [`AmplitudeTensor::leg_density`].
    pub fn leg_density(&self, leg: usize) -> [[Complex64; 2]; 2] {
        self.tensor.leg_density(&self.weights, leg)
    }
}
