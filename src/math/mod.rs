/// Matrix helpers shared by the render pipeline and the scene layer.
/// All matrices are column-major and multiply column vectors.
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Compose a local-to-parent transform as translation * rotation * scale.
/// `rotation` holds Euler angles in radians; the rotation matrix applies
/// yaw (Y), then pitch (X), then roll (Z). Cameras, instances and the
/// light all use this one convention.
pub fn transform_matrix(translation: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    let rotation_matrix = Mat4::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z);
    Mat4::from_translation(translation) * rotation_matrix * Mat4::from_scale(scale)
}

/// Recover YXZ Euler angles from a rigid transform, packed back into the
/// (pitch, yaw, roll) = (x, y, z) layout that `transform_matrix` consumes.
/// The movement pass uses this to re-normalize a pose after composing
/// incremental transforms.
pub fn extract_euler_yxz(transform: &Mat4) -> Vec3 {
    let (yaw, pitch, roll) = Quat::from_mat4(transform).to_euler(EulerRot::YXZ);
    Vec3::new(pitch, yaw, roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn transform_applies_scale_then_rotation_then_translation() {
        // Quarter turn around Y maps +X onto -Z; scale doubles first.
        let m = transform_matrix(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::splat(2.0),
        );

        let p = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z - -2.0).abs() < 1e-5);
    }

    #[test]
    fn euler_extraction_round_trips() {
        let rotation = Vec3::new(0.3, -1.1, 0.7);
        let m = transform_matrix(Vec3::ZERO, rotation, Vec3::ONE);
        let recovered = extract_euler_yxz(&m);

        assert!(
            (recovered - rotation).length() < 1e-5,
            "expected {rotation}, got {recovered}"
        );
    }
}
