use eframe::egui::Pos2;

pub fn distance(a: Pos2, b: Pos2) -> f32 {
    (b - a).length()
}

/// Shortest distance from `point` to the segment `a`-`b`, projecting onto the
/// segment and clamping to its endpoints.
pub fn point_segment_distance(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let length_sq = ab.length_sq();
    if length_sq <= f32::EPSILON {
        return ap.length();
    }

    let t = (ap.dot(ab) / length_sq).clamp(0.0, 1.0);
    distance(point, a + ab * t)
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::{distance, point_segment_distance};

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(pos2(0.0, 0.0), pos2(3.0, 4.0)), 5.0);
        assert_eq!(distance(pos2(2.0, 2.0), pos2(2.0, 2.0)), 0.0);
    }

    #[test]
    fn segment_distance_uses_perpendicular_inside_the_segment() {
        let d = point_segment_distance(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn segment_distance_clamps_to_nearest_endpoint() {
        let before = point_segment_distance(pos2(-3.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        let after = point_segment_distance(pos2(13.0, -4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((before - 5.0).abs() < 1e-6);
        assert!((after - 5.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_segment_falls_back_to_point_distance() {
        let d = point_segment_distance(pos2(4.0, 5.0), pos2(1.0, 1.0), pos2(1.0, 1.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
