use ultraviolet::Vec2;

/// The single point mass shown on the lab screen.
///
/// Only kinematic state lives here; the user-tunable values (mass, gravity,
/// friction, ...) are kept in [`LabParams`](crate::config::LabParams) so a
/// reset can replace the body wholesale without touching them.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Position in viewport units.
    pub pos: Vec2,
    /// Velocity in units per tick.
    pub vel: Vec2,
    /// Acceleration vector (cleared on reset).
    pub acc: Vec2,
    /// Visual and collision radius.
    pub radius: f32,
}

impl Body {
    /// Creates a body at rest at `pos`.
    pub fn at_rest(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::zero(),
            acc: Vec2::zero(),
            radius,
        }
    }

    /// Spawn point for a viewport: centred horizontally, `lift` units above the bottom edge.
    pub fn spawn_point(width: f32, height: f32, lift: f32) -> Vec2 {
        Vec2::new(width / 2.0, height - lift)
    }

    /// Adds an instantaneous velocity change.
    pub fn kick(&mut self, delta_v: Vec2) {
        self.vel += delta_v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_point_is_centred_near_the_bottom() {
        let p = Body::spawn_point(300.0, 600.0, 140.0);
        assert_eq!(p, Vec2::new(150.0, 460.0));
    }

    #[test]
    fn kicks_accumulate() {
        let mut body = Body::at_rest(Vec2::zero(), 30.0);
        body.kick(Vec2::new(1.0, -2.0));
        body.kick(Vec2::new(0.5, 0.5));
        assert_eq!(body.vel, Vec2::new(1.5, -1.5));
        assert_eq!(body.acc, Vec2::zero());
    }
}
