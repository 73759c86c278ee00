//! Rotation helpers for the +Z forward / +X right / +Y up convention.

use glam::{Mat3, Quat, Vec3};

/// Rotation whose forward axis points along `forward`, with its up axis as
/// close to `up` as possible.
///
/// Returns `None` when `forward` is zero or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = up.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

/// Shortest-arc rotation that takes the right axis onto `right`.
pub fn right_axis_rotation(right: Vec3) -> Option<Quat> {
    let right = right.try_normalize()?;
    Some(Quat::from_rotation_arc(Vec3::X, right))
}

/// Drop the vertical component.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_along_forward_is_identity() {
        let rotation = look_rotation(Vec3::Z, Vec3::Y).unwrap();
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_look_rotation_axes() {
        let rotation = look_rotation(Vec3::new(1.0, 0.0, 1.0), Vec3::Y).unwrap();
        let forward = rotation * Vec3::Z;
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!(forward.abs_diff_eq(expected, 1e-5));
        assert!((rotation * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_degenerate_look_rotation() {
        assert!(look_rotation(Vec3::ZERO, Vec3::Y).is_none());
        assert!(look_rotation(Vec3::Y, Vec3::Y).is_none());
    }

    #[test]
    fn test_right_axis_rotation() {
        let rotation = right_axis_rotation(Vec3::NEG_Z).unwrap();
        assert!((rotation * Vec3::X).abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(right_axis_rotation(Vec3::ZERO).is_none());
    }
}
