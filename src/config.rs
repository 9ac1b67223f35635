//! User-tunable parameters and session configuration.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::LabError;

/// Standard gravity the gravity slider is expressed in multiples of.
pub const EARTH_GRAVITY: f32 = 9.8;

/// Lowest friction the control offers. Zero would stop the body dead every tick.
pub const MIN_FRICTION: f32 = 0.01;

/// The six values exposed on the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabParams {
    /// Kilograms. Always positive once stored in a simulation.
    pub mass: f32,
    /// Gravity magnitude in m/s².
    pub gravity: f32,
    /// Impulse "force" slider value.
    pub impulse_magnitude: f32,
    /// Impulse direction in degrees, 0 = straight up.
    pub impulse_angle: f32,
    /// Multiplicative velocity damping per tick, 1 = none.
    pub friction: f32,
    /// Fraction of speed kept when bouncing off a boundary.
    pub restitution: f32,
}

impl Default for LabParams {
    fn default() -> Self {
        Self {
            mass: 5.0,
            gravity: 9.8,
            impulse_magnitude: 20.0,
            impulse_angle: 0.0,
            friction: 1.0,
            restitution: 0.8,
        }
    }
}

impl LabParams {
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::Mass => self.mass,
            Param::Gravity => self.gravity,
            Param::ImpulseMagnitude => self.impulse_magnitude,
            Param::ImpulseAngle => self.impulse_angle,
            Param::Friction => self.friction,
            Param::Restitution => self.restitution,
        }
    }

    /// Overwrites one field as-is. Mass flooring is the simulation's job.
    pub fn set(&mut self, param: Param, value: f32) {
        match param {
            Param::Mass => self.mass = value,
            Param::Gravity => self.gravity = value,
            Param::ImpulseMagnitude => self.impulse_magnitude = value,
            Param::ImpulseAngle => self.impulse_angle = value,
            Param::Friction => self.friction = value,
            Param::Restitution => self.restitution = value,
        }
    }
}

/// Selects one of the [`LabParams`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Mass,
    Gravity,
    ImpulseMagnitude,
    ImpulseAngle,
    Friction,
    Restitution,
}

impl Param {
    pub const ALL: [Param; 6] = [
        Param::Mass,
        Param::Gravity,
        Param::ImpulseMagnitude,
        Param::ImpulseAngle,
        Param::Friction,
        Param::Restitution,
    ];

    /// Range offered by the control for this parameter. Informational only;
    /// values outside it are still accepted by `configure`.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Param::Mass => 1.0..=10.0,
            Param::Gravity => {
                ControlRange::gravity_from_slider(0.0)..=ControlRange::gravity_from_slider(20.0)
            }
            Param::ImpulseMagnitude => 0.0..=100.0,
            Param::ImpulseAngle => 0.0..=360.0,
            Param::Friction => MIN_FRICTION..=1.0,
            Param::Restitution => 0.0..=1.0,
        }
    }
}

impl TryFrom<u32> for Param {
    type Error = LabError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Param::ALL
            .get(code as usize)
            .copied()
            .ok_or(LabError::UnknownParam(code))
    }
}

/// Conversions between raw slider positions and stored values.
pub struct ControlRange;

impl ControlRange {
    /// The gravity slider runs 0..20 in multiples of Earth gravity.
    pub fn gravity_from_slider(position: f32) -> f32 {
        position * EARTH_GRAVITY
    }

    pub fn gravity_to_slider(gravity: f32) -> f32 {
        gravity / EARTH_GRAVITY
    }
}

/// How long the force arrow stays on screen after an impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowMode {
    /// Shown for as long as the body is active. The elapsed timer never advances.
    #[default]
    WhileActive,
    /// Shown until `Simulation::ARROW_WINDOW` seconds of ticks have passed since the last impulse.
    Fade,
}

/// Everything needed to build a [`Simulation`](crate::Simulation) for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Viewport width in units.
    pub width: f32,
    /// Viewport height in units, including the floor margin kept for the controls.
    pub height: f32,
    pub params: LabParams,
    pub arrow: ArrowMode,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 600.0,
            params: LabParams::default(),
            arrow: ArrowMode::default(),
        }
    }
}

impl LabConfig {
    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, LabError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, LabError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
