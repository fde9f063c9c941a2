//! The cross-section context object.
//!
//! [`CrossSection`] turns the process amplitudes into differential cross
//! sections: it runs the advisory reality check on the polarization-weighted
//! squared amplitude and applies flux, phase-space density, couplings and the
//! unit conversion from its [`PhysicsConstants`].

use qedxs_core::config::PhysicsConstants;
use qedxs_core::particle::{Lepton, Photon};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::check::{self, DEFAULT_REALITY_TOLERANCE};
use crate::processes::bethe_heitler::FormFactors;
use crate::processes::{
    bethe_heitler, bremsstrahlung, compton, e_pair, e_triplet, ee_bremsstrahlung, pair, triplet,
};
use crate::tensor::Amplitudes;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Coupling and unit conversion.
    pub constants: PhysicsConstants,
    /// Relative tolerance on the imaginary part of `|M|^2` before a warning is logged.
    pub reality_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            constants: PhysicsConstants::default(),
            reality_tolerance: DEFAULT_REALITY_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Replaces the physical constants.
    #[must_use]
    pub fn with_constants(mut self, constants: PhysicsConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Sets the reality-check tolerance.
    #[must_use]
    pub fn with_reality_tolerance(mut self, tolerance: f64) -> Self {
        self.reality_tolerance = tolerance;
        self
    }
}

/// Differential cross sections for every supported process.
///
/// Every method is a pure function of its arguments. Degenerate kinematics
/// (on-shell internal lines, zero momentum transfer) give infinite or NaN
/// results rather than errors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrossSection {
    config: EngineConfig,
}

impl CrossSection {
    /// Create with custom configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The active physical constants.
    pub fn constants(&self) -> &PhysicsConstants {
        &self.config.constants
    }

    fn checked(&self, process: &str, amplitudes: &Amplitudes) -> f64 {
        check::squared_amplitude(process, amplitudes, self.config.reality_tolerance)
    }

    /// Compton scattering off a lepton, `d(sigma)/d(Omega)` of the outgoing
    /// photon in ub/sr.
    pub fn compton(&self, g_in: &Photon, e_in: &Lepton, g_out: &Photon, e_out: &Lepton) -> f64 {
        let amplitudes = compton::amplitudes(g_in, e_in, g_out, e_out);
        self.checked("compton", &amplitudes)
            * compton::kinematic_factor(self.constants(), g_in, e_in, g_out, e_out)
    }

    /// Bremsstrahlung in a static Coulomb field, ub/GeV^4/r.
    pub fn bremsstrahlung(&self, e_in: &Lepton, e_out: &Lepton, g_out: &Photon) -> f64 {
        let amplitudes = bremsstrahlung::amplitudes(e_in, e_out, g_out);
        self.checked("bremsstrahlung", &amplitudes)
            * bremsstrahlung::kinematic_factor(self.constants(), e_in, e_out, g_out)
    }

    /// Pair production in a static Coulomb field, ub/GeV^4/r.
    pub fn pair_production(&self, g_in: &Photon, e_out: &Lepton, p_out: &Lepton) -> f64 {
        let amplitudes = pair::amplitudes(g_in, e_out, p_out);
        self.checked("pair production", &amplitudes)
            * pair::kinematic_factor(self.constants(), g_in, e_out, p_out)
    }

    /// Triplet production on a free electron, ub/GeV^4/r.
    pub fn triplet_production(
        &self,
        g_in: &Photon,
        e_in: &Lepton,
        p_out: &Lepton,
        e_out2: &Lepton,
        e_out3: &Lepton,
    ) -> f64 {
        let amplitudes = triplet::amplitudes(g_in, e_in, p_out, e_out2, e_out3);
        self.checked("triplet production", &amplitudes)
            * triplet::kinematic_factor(self.constants(), g_in, e_in, p_out, e_out2, e_out3)
    }

    /// Bethe-Heitler pair production on a free nucleon, ub/GeV^4/r.
    ///
    /// `n_in` and `n_out` carry the nucleon mass; the form factors must be
    /// evaluated by the caller at the transfers of these kinematics.
    pub fn bethe_heitler_nucleon(
        &self,
        g_in: &Photon,
        n_in: &Lepton,
        p_out: &Lepton,
        e_out: &Lepton,
        n_out: &Lepton,
        form_factors: &FormFactors,
    ) -> f64 {
        let amplitudes = bethe_heitler::amplitudes(g_in, n_in, p_out, e_out, n_out, form_factors);
        self.checked("Bethe-Heitler", &amplitudes)
            * bethe_heitler::kinematic_factor(self.constants(), g_in, n_in, p_out, e_out, n_out)
    }

    /// Electron-electron bremsstrahlung, ub/GeV^4/r.
    pub fn ee_bremsstrahlung(
        &self,
        e_in0: &Lepton,
        e_in1: &Lepton,
        e_out2: &Lepton,
        e_out3: &Lepton,
        g_out: &Photon,
    ) -> f64 {
        let amplitudes = ee_bremsstrahlung::amplitudes(e_in0, e_in1, e_out2, e_out3, g_out);
        self.checked("ee bremsstrahlung", &amplitudes)
            * ee_bremsstrahlung::kinematic_factor(self.constants(), e_in0, e_in1, e_out3)
    }

    /// Lepton pair electro-production in a static Coulomb field, ub/GeV^7/r.
    pub fn e_pair_production(
        &self,
        e_in: &Lepton,
        e_out: &Lepton,
        lp_out: &Lepton,
        ln_out: &Lepton,
    ) -> f64 {
        let amplitudes = e_pair::amplitudes(e_in, e_out, lp_out, ln_out);
        self.checked("e-pair production", &amplitudes)
            * e_pair::kinematic_factor(self.constants(), e_in, e_out, lp_out, ln_out)
    }

    /// Lepton pair electro-production on a free electron at rest, ub/GeV^7/r.
    pub fn e_triplet_production(
        &self,
        e_in: &Lepton,
        e_out: &Lepton,
        lp_out: &Lepton,
        ln_out: &Lepton,
        te_in: &Lepton,
        te_out: &Lepton,
    ) -> f64 {
        let amplitudes = e_triplet::amplitudes(e_in, e_out, lp_out, ln_out, te_in, te_out);
        self.checked("e-triplet production", &amplitudes)
            * e_triplet::kinematic_factor(
                self.constants(),
                e_in,
                e_out,
                lp_out,
                ln_out,
                te_in,
                te_out,
            )
    }
}
