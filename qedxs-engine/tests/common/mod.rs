//! Kinematics shared by the integration tests.
#![allow(dead_code)]

use qedxs_core::config::ELECTRON_MASS_GEV;
use qedxs_core::particle::{Lepton, Particle, Photon, SpinDensity};
use qedxs_core::vector::{FourMomentum, ThreeVector};

pub const ME: f64 = ELECTRON_MASS_GEV;
pub const MMU: f64 = 0.105_658_375;
pub const MP: f64 = 0.938_272_088;

/// Two-body decay of `parent` with the first daughter at `(theta, phi)` in
/// the parent rest frame.
pub fn two_body(
    parent: FourMomentum,
    m1: f64,
    m2: f64,
    theta: f64,
    phi: f64,
) -> (FourMomentum, FourMomentum) {
    let mass = parent.invariant_mass();
    let lambda = (mass * mass - (m1 + m2).powi(2)) * (mass * mass - (m1 - m2).powi(2));
    let p_star = lambda.sqrt() / (2.0 * mass);
    let direction = ThreeVector::from_polar(p_star, theta, phi);
    let beta = parent.momentum() * (1.0 / parent.energy());
    let first = FourMomentum::from_mass_and_momentum(m1, direction).boost(beta);
    let second = FourMomentum::from_mass_and_momentum(m2, -direction).boost(beta);
    (first, second)
}

/// Three-body final state: `m1` and `m2` form a subsystem of invariant mass
/// `m12`, recoiling against `m3`.
pub fn three_body(
    parent: FourMomentum,
    masses: [f64; 3],
    m12: f64,
    angles_3: (f64, f64),
    angles_1: (f64, f64),
) -> [FourMomentum; 3] {
    let (system, third) = two_body(parent, m12, masses[2], angles_3.0, angles_3.1);
    let (first, second) = two_body(system, masses[0], masses[1], angles_1.0, angles_1.1);
    [first, second, third]
}

/// Point a fraction `t` of the way from `lo` to `hi`.
pub fn between(lo: f64, hi: f64, t: f64) -> f64 {
    lo + t * (hi - lo)
}

/// Incoming lepton with an unpolarized spin state.
pub fn incoming(momentum: FourMomentum, mass: f64) -> Lepton {
    Lepton::new(momentum, mass).with_sdm(SpinDensity::unpolarized())
}

/// Outgoing lepton summed over spins.
pub fn outgoing(momentum: FourMomentum, mass: f64) -> Lepton {
    Lepton::new(momentum, mass).with_sdm(SpinDensity::unit())
}

pub fn incoming_photon(momentum: FourMomentum) -> Photon {
    Photon::new(momentum).with_sdm(SpinDensity::unpolarized())
}

pub fn outgoing_photon(momentum: FourMomentum) -> Photon {
    Photon::new(momentum).with_sdm(SpinDensity::unit())
}

/// Lab-frame Compton kinematics off a lepton at rest.
pub struct Compton {
    pub g_in: Photon,
    pub e_in: Lepton,
    pub g_out: Photon,
    pub e_out: Lepton,
}

impl Compton {
    /// Photon of energy `k` along +z scattered to `(theta, phi)`.
    pub fn at_rest(k: f64, mass: f64, theta: f64, phi: f64) -> Self {
        let k_in = FourMomentum::new(k, 0.0, 0.0, k);
        let p_in = FourMomentum::new(mass, 0.0, 0.0, 0.0);
        let k_prime = k / (1.0 + (k / mass) * (1.0 - theta.cos()));
        let k_out = FourMomentum::from_mass_and_momentum(
            0.0,
            ThreeVector::from_polar(k_prime, theta, phi),
        );
        Self {
            g_in: incoming_photon(k_in),
            e_in: incoming(p_in, mass),
            g_out: outgoing_photon(k_out),
            e_out: outgoing(k_in + p_in - k_out, mass),
        }
    }

    /// The same event boosted along z.
    pub fn boosted(&self, rapidity: f64) -> Self {
        let boost = |p: FourMomentum| p.rapidity_boost_z(rapidity);
        Self {
            g_in: self.g_in.with_momentum(boost(self.g_in.momentum())),
            e_in: self.e_in.with_momentum(boost(self.e_in.momentum())),
            g_out: self.g_out.with_momentum(boost(self.g_out.momentum())),
            e_out: self.e_out.with_momentum(boost(self.e_out.momentum())),
        }
    }
}

/// `g + e -> e+ e- e` with the target electron at rest.
pub fn triplet_event(k: f64) -> (Photon, Lepton, Lepton, Lepton, Lepton) {
    let g = FourMomentum::new(k, 0.0, 0.0, k);
    let target = FourMomentum::new(ME, 0.0, 0.0, 0.0);
    let total = g + target;
    let m12 = between(2.0 * ME, total.invariant_mass() - ME, 0.4);
    let [positron, electron2, electron3] =
        three_body(total, [ME, ME, ME], m12, (1.1, 0.4), (0.8, 2.0));
    (
        incoming_photon(g),
        incoming(target, ME),
        outgoing(positron, ME),
        outgoing(electron2, ME),
        outgoing(electron3, ME),
    )
}

/// `e + e -> e e g` with the target electron at rest.
pub fn ee_bremsstrahlung_event(energy: f64) -> (Lepton, Lepton, Lepton, Lepton, Photon) {
    let beam = FourMomentum::from_mass_and_momentum(ME, ThreeVector::new(0.0, 0.0, energy));
    let target = FourMomentum::new(ME, 0.0, 0.0, 0.0);
    let total = beam + target;
    let m12 = between(2.0 * ME, total.invariant_mass(), 0.6);
    let [e2, e3, k] = three_body(total, [ME, ME, 0.0], m12, (0.9, 0.3), (1.3, -1.0));
    (
        incoming(beam, ME),
        incoming(target, ME),
        outgoing(e2, ME),
        outgoing(e3, ME),
        outgoing_photon(k),
    )
}

/// `e + e -> e e+ e- e` with a beam of momentum `p` on a target at rest.
///
/// Returns `(e_in, e_out, l+, l-, te_in, te_out)`.
pub fn e_triplet_event(p: f64) -> (Lepton, Lepton, Lepton, Lepton, Lepton, Lepton) {
    let beam = FourMomentum::from_mass_and_momentum(ME, ThreeVector::new(0.0, 0.0, p));
    let target = FourMomentum::new(ME, 0.0, 0.0, 0.0);
    let total = beam + target;
    let m_rest = between(3.0 * ME, total.invariant_mass() - ME, 0.6);
    let (rest, recoil) = two_body(total, m_rest, ME, 0.9, 0.2);
    let m12 = between(2.0 * ME, m_rest - ME, 0.5);
    let [scattered, positron, electron] =
        three_body(rest, [ME, ME, ME], m12, (0.5, 1.5), (1.7, 0.3));
    (
        incoming(beam, ME),
        outgoing(scattered, ME),
        outgoing(positron, ME),
        outgoing(electron, ME),
        incoming(target, ME),
        outgoing(recoil, ME),
    )
}

/// `g + p -> e+ e- p` with the proton at rest.
///
/// Returns `(g_in, n_in, e+, e-, n_out)`.
pub fn bethe_heitler_event(k: f64) -> (Photon, Lepton, Lepton, Lepton, Lepton) {
    let g = FourMomentum::new(k, 0.0, 0.0, k);
    let target = FourMomentum::new(MP, 0.0, 0.0, 0.0);
    let total = g + target;
    let m12 = between(2.0 * ME, total.invariant_mass() - MP, 0.2);
    let [positron, electron, recoil] =
        three_body(total, [ME, ME, MP], m12, (0.4, 0.9), (0.6, -1.2));
    (
        incoming_photon(g),
        incoming(target, MP),
        outgoing(positron, ME),
        outgoing(electron, ME),
        outgoing(recoil, MP),
    )
}
