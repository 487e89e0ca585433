//! Derived-quantity presets used by the lab experiments.
//!
//! Each preset is a closed-form function of the fitted slope (and possibly the
//! intercept) together with its analytic derivative. `scale` multiplies the value,
//! so unit conversions stay outside the formulas.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{DerivedQuantity, FitResult};
use crate::error::Result;
use crate::fit::propagate::{propagate, propagate_joint};

/// Which closed-form transform to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DeriveKind {
    /// `scale·k`
    Identity,
    /// `scale/k`
    Reciprocal,
    /// `scale·b`
    Intercept,
    /// `scale·k/b` (relative change per unit x, e.g. resistance temperature coefficient)
    TemperatureCoefficient,
}

impl DeriveKind {
    pub fn display_name(self) -> &'static str {
        match self {
            DeriveKind::Identity => "slope",
            DeriveKind::Reciprocal => "1/slope",
            DeriveKind::Intercept => "intercept",
            DeriveKind::TemperatureCoefficient => "slope/intercept",
        }
    }
}

/// A derived quantity to compute from a fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSpec {
    pub kind: DeriveKind,
    pub scale: f64,
    pub reference: Option<f64>,
    pub label: String,
}

/// Speed of light in vacuum used as reference by the time-of-flight experiment (m/s).
pub const SPEED_OF_LIGHT: f64 = 2.998e8;

impl DerivedSpec {
    pub fn new(kind: DeriveKind) -> Self {
        Self {
            kind,
            scale: 1.0,
            reference: None,
            label: kind.display_name().to_string(),
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_reference(mut self, reference: f64) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// `Δt' = Δs/c` with Δs in cm and Δt' in ns gives `c = 10⁷/k` m/s.
    pub fn speed_of_light() -> Self {
        Self::new(DeriveKind::Reciprocal)
            .with_scale(1e7)
            .with_reference(SPEED_OF_LIGHT)
            .with_label("speed of light c (m/s)")
    }

    /// `R(t) = R₀(1 + α·t)` gives `R₀ = b` and `α = k/b`.
    pub fn resistance_at_zero() -> Self {
        Self::new(DeriveKind::Intercept).with_label("R0 (intercept)")
    }

    pub fn temperature_coefficient() -> Self {
        Self::new(DeriveKind::TemperatureCoefficient).with_label("temperature coefficient alpha (1/degC)")
    }

    /// Evaluate against a fit and propagate its uncertainty.
    pub fn evaluate(&self, fit: &FitResult) -> Result<DerivedQuantity> {
        let s = self.scale;
        let quantity = match self.kind {
            DeriveKind::Identity => propagate(fit, |k| s * k, |_| s, self.reference)?,
            DeriveKind::Reciprocal => propagate(fit, |k| s / k, |k| -s / (k * k), self.reference)?,
            DeriveKind::Intercept => propagate_joint(fit, |_, b| s * b, |_, _| (0.0, s), self.reference)?,
            DeriveKind::TemperatureCoefficient => propagate_joint(
                fit,
                |k, b| s * k / b,
                |k, b| (s / b, -s * k / (b * b)),
                self.reference,
            )?,
        };
        Ok(quantity.labeled(self.label.clone()))
    }
}
