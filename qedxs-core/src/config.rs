//! Physical constants and numerical resolution settings.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fine-structure constant at zero momentum transfer.
pub const ALPHA_QED: f64 = 1.0 / 137.035_999_084;

/// (hbar c)^2 in GeV^2 microbarn.
pub const HBARC_SQR_GEV2_UB: f64 = 389.379_372;

/// Electron rest mass in GeV.
pub const ELECTRON_MASS_GEV: f64 = 0.510_998_95e-3;

/// Default threshold for near-equality and singularity checks.
pub const DEFAULT_RESOLUTION: f64 = 1e-12;

/// Coupling, unit conversion and reference mass used by the cross-section engine.
///
/// All cross sections are expressed in microbarn-based units through
/// `hbarc_sqr`; energies and momenta are in GeV.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConstants {
    /// Electromagnetic coupling alpha.
    pub alpha: f64,
    /// Unit conversion (hbar c)^2, GeV^2 ub.
    pub hbarc_sqr: f64,
    /// Electron rest mass (GeV). The engine takes masses from the particles
    /// it is given; callers read this when building lepton kinematics.
    pub electron_mass: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            alpha: ALPHA_QED,
            hbarc_sqr: HBARC_SQR_GEV2_UB,
            electron_mass: ELECTRON_MASS_GEV,
        }
    }
}

impl PhysicsConstants {
    /// Creates the standard set of constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coupling constant.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the (hbar c)^2 conversion factor.
    #[must_use]
    pub fn with_hbarc_sqr(mut self, hbarc_sqr: f64) -> Self {
        self.hbarc_sqr = hbarc_sqr;
        self
    }

    /// Sets the electron mass.
    #[must_use]
    pub fn with_electron_mass(mut self, mass: f64) -> Self {
        self.electron_mass = mass;
        self
    }

    /// Checks that every constant is finite and strictly positive.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("alpha", self.alpha),
            ("hbarc_sqr", self.hbarc_sqr),
            ("electron_mass", self.electron_mass),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::ConfigError(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// Zero bits mean "never reconfigured".
static DEFAULT_RESOLUTION_BITS: AtomicU64 = AtomicU64::new(0);

/// Threshold below which two complex entries are considered equal.
///
/// A process-wide default is kept for the Pauli algebra; it can be changed
/// with [`Resolution::set_default`]. Methods with a `_within` suffix take an
/// explicit value instead.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Resolution(f64);

impl Default for Resolution {
    fn default() -> Self {
        Self(DEFAULT_RESOLUTION)
    }
}

impl Resolution {
    /// Creates a resolution from a finite, strictly positive threshold.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] otherwise.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::ConfigError(format!(
                "resolution must be finite and positive, got {value}"
            )))
        }
    }

    /// Returns the current process-wide resolution.
    #[inline]
    pub fn current() -> Self {
        match DEFAULT_RESOLUTION_BITS.load(Ordering::Relaxed) {
            0 => Self::default(),
            bits => Self(f64::from_bits(bits)),
        }
    }

    /// Replaces the process-wide resolution.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] if `value` is not finite and positive.
    pub fn set_default(value: f64) -> Result<()> {
        let resolution = Self::new(value)?;
        DEFAULT_RESOLUTION_BITS.store(resolution.0.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    /// Returns the raw threshold.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Resolution {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Resolution> for f64 {
    fn from(resolution: Resolution) -> f64 {
        resolution.0
    }
}
