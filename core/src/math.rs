//! Math type aliases and helper functions.
//!
//! World entities store their transforms in f32 nalgebra types.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory; construct with
/// `Quaternion::new(w, x, y, z)`.
pub type Quat = nalgebra::Quaternion<f32>;

/// Identity rotation.
pub fn quat_identity() -> Quat {
    Quat::identity()
}

/// Quaternion from XYZ euler angles in radians.
pub fn quat_from_euler(euler: Vec3) -> Quat {
    nalgebra::UnitQuaternion::from_euler_angles(euler.x, euler.y, euler.z).into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_components() {
        let q = quat_identity();
        assert_eq!(q.w, 1.0);
        assert_eq!(q.i, 0.0);
        assert_eq!(q.j, 0.0);
        assert_eq!(q.k, 0.0);
    }

    #[test]
    fn zero_euler_is_identity() {
        let q = quat_from_euler(Vec3::zeros());
        assert!((q.w - 1.0).abs() < 1e-6);
    }
}
