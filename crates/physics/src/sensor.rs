//! Environment contact results consumed by the movement controller.
//!
//! The casts themselves (ground sphere cast, wall rays, ledge box cast) are
//! performed by the engine. This module only describes their results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Result of a single contact query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactHit {
    /// Whether the query hit anything.
    pub detected: bool,

    /// World-space contact point. Meaningless when `detected` is false.
    pub point: Vec3,

    /// Surface normal at the contact point, pointing away from the surface.
    /// Meaningless when `detected` is false.
    pub normal: Vec3,
}

impl Default for ContactHit {
    fn default() -> Self {
        Self::miss()
    }
}

impl ContactHit {
    /// A query that found nothing.
    pub fn miss() -> Self {
        Self {
            detected: false,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
        }
    }

    /// A query that hit a surface.
    pub fn hit(point: Vec3, normal: Vec3) -> Self {
        Self {
            detected: true,
            point,
            normal,
        }
    }

    /// The hit normal, or `None` on a miss.
    #[inline]
    pub fn normal_if_hit(&self) -> Option<Vec3> {
        self.detected.then_some(self.normal)
    }
}

/// All contact results for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub ground: ContactHit,
    pub left_wall: ContactHit,
    pub right_wall: ContactHit,
    pub front_wall: ContactHit,
    pub ledge_top: ContactHit,
    /// Only meaningful while `ledge_top` is detected.
    pub ledge_grab_point: ContactHit,
}

impl SensorSnapshot {
    #[inline]
    pub fn grounded(&self) -> bool {
        self.ground.detected
    }

    #[inline]
    pub fn wall_on_left(&self) -> bool {
        self.left_wall.detected
    }

    #[inline]
    pub fn wall_on_right(&self) -> bool {
        self.right_wall.detected
    }

    #[inline]
    pub fn wall_in_front(&self) -> bool {
        self.front_wall.detected
    }

    #[inline]
    pub fn ledge_detected(&self) -> bool {
        self.ledge_top.detected
    }

    /// A ledge was found and a grab point exists under its lip.
    #[inline]
    pub fn ledge_grabbable(&self) -> bool {
        self.ledge_top.detected && self.ledge_grab_point.detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_detects_nothing() {
        let sensors = SensorSnapshot::default();
        assert!(!sensors.grounded());
        assert!(!sensors.wall_on_left());
        assert!(!sensors.wall_on_right());
        assert!(!sensors.wall_in_front());
        assert!(!sensors.ledge_grabbable());
    }

    #[test]
    fn test_grab_point_requires_ledge_top() {
        let mut sensors = SensorSnapshot::default();
        sensors.ledge_grab_point = ContactHit::hit(Vec3::new(0.0, 2.0, 1.0), Vec3::NEG_Z);
        assert!(!sensors.ledge_grabbable());

        sensors.ledge_top = ContactHit::hit(Vec3::new(0.0, 2.0, 1.2), Vec3::Y);
        assert!(sensors.ledge_grabbable());
    }

    #[test]
    fn test_normal_if_hit() {
        assert_eq!(ContactHit::miss().normal_if_hit(), None);
        assert_eq!(ContactHit::hit(Vec3::ZERO, Vec3::X).normal_if_hit(), Some(Vec3::X));
    }
}
