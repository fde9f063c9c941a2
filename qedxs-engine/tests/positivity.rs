#![allow(clippy::uninlined_format_args)]
mod common;

use common::{
    between, incoming, incoming_photon, outgoing, outgoing_photon, three_body, two_body, Compton,
    ME, MMU, MP,
};
use qedxs_core::particle::SpinDensity;
use qedxs_core::vector::{FourMomentum, ThreeVector};
use qedxs_engine::{CrossSection, FormFactors};

fn on_shell(mass: f64, p: f64, theta: f64, phi: f64) -> FourMomentum {
    FourMomentum::from_mass_and_momentum(mass, ThreeVector::from_polar(p, theta, phi))
}

fn assert_physical(name: &str, value: f64) {
    assert!(value.is_finite(), "{}: {}", name, value);
    assert!(value > 0.0, "{}: {}", name, value);
}

#[test]
fn test_compton_positive() {
    let engine = CrossSection::default();
    for theta in [0.01, 0.5, 1.5, 3.0] {
        let event = Compton::at_rest(0.3, ME, theta, 0.0);
        let xs = engine.compton(&event.g_in, &event.e_in, &event.g_out, &event.e_out);
        assert_physical("compton", xs);
    }
}

#[test]
fn test_bremsstrahlung_positive() {
    let engine = CrossSection::default();
    let e_in = incoming(on_shell(ME, 1.0, 0.0, 0.0), ME);
    let e_out = outgoing(on_shell(ME, 0.6, 0.02, 0.5), ME);
    let g_out = outgoing_photon(on_shell(0.0, 0.38, 0.01, -2.0));
    assert_physical("bremsstrahlung", engine.bremsstrahlung(&e_in, &e_out, &g_out));

    // Polarized beam and detected photon helicity
    let e_in = e_in.with_sdm(SpinDensity::from_polarization(ThreeVector::new(0.0, 0.0, 1.0)));
    let g_out = g_out.with_sdm(SpinDensity::pure(1).unwrap());
    let xs = engine.bremsstrahlung(&e_in, &e_out, &g_out);
    assert!(xs.is_finite() && xs >= 0.0, "{}", xs);
}

#[test]
fn test_pair_production_positive() {
    let engine = CrossSection::default();
    let g_in = incoming_photon(on_shell(0.0, 2.0, 0.0, 0.0));
    let e_out = outgoing(on_shell(ME, 1.1, 0.01, 0.3), ME);
    let p_out = outgoing(on_shell(ME, 0.85, 0.015, 2.9), ME);
    assert_physical("pair", engine.pair_production(&g_in, &e_out, &p_out));
}

#[test]
fn test_triplet_production_positive() {
    let engine = CrossSection::default();
    let (g, e0, p, e2, e3) = common::triplet_event(1.0);
    assert_physical("triplet", engine.triplet_production(&g, &e0, &p, &e2, &e3));
}

#[test]
fn test_triplet_muon_pair_without_exchange() {
    let engine = CrossSection::default();
    let g = FourMomentum::new(10.0, 0.0, 0.0, 10.0);
    let target = FourMomentum::new(ME, 0.0, 0.0, 0.0);
    let total = g + target;
    let m12 = between(2.0 * MMU, total.invariant_mass() - ME, 0.5);
    let [mu_plus, mu_minus, recoil] =
        three_body(total, [MMU, MMU, ME], m12, (0.5, 0.0), (1.0, 1.0));
    let xs = engine.triplet_production(
        &incoming_photon(g),
        &incoming(target, ME),
        &outgoing(mu_plus, MMU),
        &outgoing(recoil, ME),
        &outgoing(mu_minus, MMU),
    );
    assert_physical("triplet (muons)", xs);
}

#[test]
fn test_bethe_heitler_positive() {
    let engine = CrossSection::default();
    let g = FourMomentum::new(1.5, 0.0, 0.0, 1.5);
    let target = FourMomentum::new(MP, 0.0, 0.0, 0.0);
    let total = g + target;
    let m12 = between(2.0 * ME, total.invariant_mass() - MP, 0.2);
    let [positron, electron, recoil] =
        three_body(total, [ME, ME, MP], m12, (0.4, 0.9), (0.6, -1.2));
    let form_factors = [FormFactors::pointlike(), FormFactors::fixed(0.9, 1.79)];
    for ff in &form_factors {
        let xs = engine.bethe_heitler_nucleon(
            &incoming_photon(g),
            &incoming(target, MP),
            &outgoing(positron, ME),
            &outgoing(electron, ME),
            &outgoing(recoil, MP),
            ff,
        );
        assert_physical("bethe-heitler", xs);
    }
}

#[test]
fn test_ee_bremsstrahlung_positive() {
    let engine = CrossSection::default();
    let (e0, e1, e2, e3, g) = common::ee_bremsstrahlung_event(0.5);
    assert_physical("ee bremsstrahlung", engine.ee_bremsstrahlung(&e0, &e1, &e2, &e3, &g));
}

#[test]
fn test_e_pair_production_positive() {
    let engine = CrossSection::default();
    let e_in = incoming(on_shell(ME, 3.0, 0.0, 0.0), ME);
    let e_out = outgoing(on_shell(ME, 1.2, 0.03, 0.4), ME);
    let lp = outgoing(on_shell(ME, 0.9, 0.02, -1.0), ME);
    let ln = outgoing(on_shell(ME, 0.85, 0.025, 2.2), ME);
    assert_physical("e-pair", engine.e_pair_production(&e_in, &e_out, &lp, &ln));

    // A muon pair has no exchange diagrams
    let mu_plus = outgoing(on_shell(MMU, 0.9, 0.02, -1.0), MMU);
    let mu_minus = outgoing(on_shell(MMU, 0.85, 0.025, 2.2), MMU);
    assert_physical(
        "e-pair (muons)",
        engine.e_pair_production(&e_in, &e_out, &mu_plus, &mu_minus),
    );
}

#[test]
fn test_e_triplet_production_positive() {
    let engine = CrossSection::default();
    let beam = on_shell(ME, 0.5, 0.0, 0.0);
    let target = FourMomentum::new(ME, 0.0, 0.0, 0.0);
    let total = beam + target;
    let m_rest = between(3.0 * ME, total.invariant_mass() - ME, 0.6);
    let (rest, recoil) = two_body(total, m_rest, ME, 0.9, 0.2);
    let m12 = between(2.0 * ME, m_rest - ME, 0.5);
    let [scattered, positron, electron] =
        three_body(rest, [ME, ME, ME], m12, (0.5, 1.5), (1.7, 0.3));
    let xs = engine.e_triplet_production(
        &incoming(beam, ME),
        &outgoing(scattered, ME),
        &outgoing(positron, ME),
        &outgoing(electron, ME),
        &incoming(target, ME),
        &outgoing(recoil, ME),
    );
    assert_physical("e-triplet", xs);
}
