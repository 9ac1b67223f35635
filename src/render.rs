//! What the render adapter receives each tick.

use ultraviolet::Vec2;

use crate::utils;

/// The force-arrow overlay drawn from the body along the impulse direction.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceArrow {
    /// Start of the shaft (the body centre).
    pub tail: Vec2,
    /// End of the shaft.
    pub tip: Vec2,
    /// The two back corners of the triangular head.
    pub head: [Vec2; 2],
}

impl ForceArrow {
    pub const LENGTH: f32 = 50.0;
    pub const HEAD_SIZE: f32 = 10.0;
    pub const HEAD_SPREAD: f32 = std::f32::consts::PI / 6.0;

    /// Builds the arrow at `origin` pointing along a control angle in degrees.
    pub fn new(origin: Vec2, angle_deg: f32) -> Self {
        let angle = utils::control_angle_to_rad(angle_deg);
        let tip = origin + utils::heading(angle_deg) * Self::LENGTH;

        let corner = |a: f32| {
            let (sin, cos) = a.sin_cos();
            tip - Vec2::new(cos, sin) * Self::HEAD_SIZE
        };

        Self {
            tail: origin,
            tip,
            head: [corner(angle + Self::HEAD_SPREAD), corner(angle - Self::HEAD_SPREAD)],
        }
    }
}

/// Per-tick view of the simulation: enough to draw a circle and the optional arrow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
    /// Present only while the overlay is visible.
    pub arrow: Option<ForceArrow>,
}
