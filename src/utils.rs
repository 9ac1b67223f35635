use ultraviolet::Vec2;

/// Converts a control angle in degrees to radians in screen space.
/// Controls measure 0° as straight up, so the angle is rotated by -90° first.
pub fn control_angle_to_rad(angle_deg: f32) -> f32 {
    (angle_deg - 90.0) * (std::f32::consts::PI / 180.0)
}

/// Unit vector pointing along a control angle. Screen y grows downwards,
/// so 0° gives `(0, -1)`.
pub fn heading(angle_deg: f32) -> Vec2 {
    let (sin, cos) = control_angle_to_rad(angle_deg).sin_cos();
    Vec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn zero_degrees_points_up() {
        let h = heading(0.0);
        assert_relative_eq!(h.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(h.y, -1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn ninety_degrees_points_right() {
        let h = heading(90.0);
        assert_relative_eq!(h.x, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(h.y, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn one_eighty_points_down() {
        let h = heading(180.0);
        assert_relative_eq!(h.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(h.y, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn heading_is_unit_length() {
        for angle in [0.0, 17.0, 135.0, 271.5, 359.9] {
            assert_relative_eq!(heading(angle).mag(), 1.0, epsilon = TOLERANCE);
        }
    }
}
