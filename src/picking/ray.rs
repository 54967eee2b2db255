use glam::{Vec2, Vec3};

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction` (normalized here; a zero vector
    /// yields a zero direction that hits nothing).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Hit distance against a rectangle lying in the XY plane at
    /// `center.z`, spanning `center.xy ± half_extents`. Edges count as hits.
    #[must_use]
    pub fn intersect_rect(&self, center: Vec3, half_extents: Vec2) -> Option<f32> {
        if self.direction.z.abs() <= f32::EPSILON {
            return None;
        }
        let t = (center.z - self.origin.z) / self.direction.z;
        if !(t.is_finite() && t >= 0.0) {
            return None;
        }
        let offset = (self.at(t) - center).truncate().abs();
        (offset.x <= half_extents.x && offset.y <= half_extents.y).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_ray_hits_rect_in_front() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = ray.intersect_rect(Vec3::new(0.0, 0.0, -4.0), Vec2::splat(0.5));
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn rect_behind_origin_is_missed() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(
            ray.intersect_rect(Vec3::new(0.0, 0.0, 2.0), Vec2::splat(0.5)),
            None
        );
    }

    #[test]
    fn ray_passing_beside_rect_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(
            ray.intersect_rect(Vec3::new(1.0, 0.0, -4.0), Vec2::splat(0.4)),
            None
        );
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(
            ray.intersect_rect(Vec3::new(1.0, 0.0, 0.0), Vec2::splat(1.0)),
            None
        );
    }

    #[test]
    fn zero_direction_is_inert() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::ZERO);
        assert_eq!(ray.intersect_rect(Vec3::ZERO, Vec2::ONE), None);
    }
}
