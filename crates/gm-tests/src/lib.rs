//! Integration tests for gm-rs crates.
//!
//! This crate contains cross-crate tests that verify the interaction
//! between the math types and the geometry predicates, plus the library-wide
//! algebraic properties.

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use gm_core::angle::deg_to_rad;
    use gm_core::Buffer;
    use gm_geom::{FrustumCullerf, FrustumTest, PolygonsPointf, RayAabf};
    use gm_math::{
        AxisAngled, Mat3d, Mat4d, Mat4f, Mat4x3d, MatrixStackf, Quatd, Quatf, Vec3d, Vec3f,
    };

    /// normalize() yields unit length for every non-degenerate vector
    #[test]
    fn test_normalize_unit_length_property() {
        let samples = [
            Vec3d::new(1.0, 0.0, 0.0),
            Vec3d::new(-3.0, 4.0, 12.0),
            Vec3d::new(1e-3, 2e-3, -5e-4),
            Vec3d::new(1e6, -2e6, 3e6),
        ];
        for v in samples {
            assert_relative_eq!(v.normalize().length(), 1.0, epsilon = 1e-12);
        }
    }

    /// M.invert().invert() == M and M * M.invert() == I for invertible M
    #[test]
    fn test_matrix_inverse_properties() {
        let mats = [
            Mat4d::translation(1.0, -2.0, 3.0),
            Mat4d::rotation(0.8, Vec3d::new(0.0, 1.0, 0.0)),
            Mat4d::perspective(1.1, 1.77, 0.1, 500.0),
            Mat4d::translation(5.0, 0.0, 0.0)
                .rotate(0.3, Vec3d::new(1.0, 0.0, 0.0))
                .scale(0.5, 2.0, 4.0),
        ];
        for m in mats {
            let inv = m.invert().unwrap();
            assert_abs_diff_eq!(m * inv, Mat4d::identity(), epsilon = 1e-9);
            assert_abs_diff_eq!(inv.invert().unwrap(), m, epsilon = 1e-9);
        }
    }

    /// transpose is exactly involutive
    #[test]
    fn test_transpose_involutive_exact() {
        let m = Mat4d::perspective(0.9, 1.5, 0.05, 80.0)
            * Mat4d::look_at(
                Vec3d::new(1.0, 2.0, 3.0),
                Vec3d::zero(),
                Vec3d::new(0.0, 1.0, 0.0),
            );
        assert_eq!(m.transpose().transpose(), m);
        let m3 = Mat3d::rotation(1.0, Vec3d::new(0.0, 0.0, 1.0));
        assert_eq!(m3.transpose().transpose(), m3);
    }

    /// q * q.conjugate() == (0, 0, 0, dot(q, q))
    #[test]
    fn test_quaternion_conjugate_property() {
        let q = Quatd::new(0.7, -1.2, 0.3, 2.0);
        let p = q * q.conjugate();
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.w, q.dot(q), epsilon = 1e-12);
        assert_abs_diff_eq!(q.normalize().length_squared(), 1.0, epsilon = 1e-12);
    }

    /// the ortho frustum scenario: (1,0,0) r=0.1 intersects, (1.2,0,0) is out
    #[test]
    fn test_ortho_frustum_sphere_scenario() {
        let culler = FrustumCullerf::from_matrix(&Mat4f::ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0));
        assert!(culler.test_sphere(Vec3f::new(1.0, 0.0, 0.0), 0.1));
        assert!(!culler.test_sphere(Vec3f::new(1.2, 0.0, 0.0), 0.1));
        assert_eq!(
            culler.intersect_sphere(Vec3f::new(1.0, 0.0, 0.0), 0.1),
            FrustumTest::Intersect
        );
        assert!(!culler
            .intersect_sphere(Vec3f::new(1.2, 0.0, 0.0), 0.1)
            .is_visible());
    }

    /// two 90-degree turns about y compose to the 180-degree turn
    #[test]
    fn test_quaternion_composition_scenario() {
        let y = Vec3d::new(0.0, 1.0, 0.0);
        let quarter = Quatd::from_axis_angle(deg_to_rad(90.0), y);
        let half = Quatd::from_axis_angle(deg_to_rad(180.0), y);
        let v = Vec3d::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(
            (quarter * quarter).transform(v),
            half.transform(v),
            epsilon = 1e-12
        );
    }

    /// slerp endpoints return the operands
    #[test]
    fn test_slerp_boundaries() {
        let a = Quatd::from_euler_xyz(0.1, 0.4, -0.2);
        let b = Quatd::from_euler_zyx(0.9, -0.3, 0.5);
        assert_abs_diff_eq!(a.slerp(b, 0.0), a, epsilon = 1e-12);
        assert_abs_diff_eq!(a.slerp(b, 1.0), b, epsilon = 1e-12);
    }

    /// stack push/pop restores the pre-push matrix exactly, and failures
    /// leave the depth alone
    #[test]
    fn test_matrix_stack_contract() {
        let mut stack = MatrixStackf::new(2).unwrap();
        stack.rotate_y(0.25).translate(0.0, 1.0, 0.0);
        let before = stack.current();
        stack.push().unwrap();
        stack.scale(3.0, 3.0, 3.0);
        stack.pop().unwrap();
        assert_eq!(stack.current(), before);

        stack.push().unwrap();
        assert!(stack.push().is_err());
        assert_eq!(stack.depth(), 2);
        stack.pop().unwrap();
        assert!(stack.pop().is_err());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), before);
    }

    /// quaternion, axis-angle and matrix agree on the same rotation
    #[test]
    fn test_rotation_representations_agree() {
        let axis = Vec3d::new(1.0, -1.0, 0.5).normalize();
        let angle = 1.1;
        let q = Quatd::from_axis_angle(angle, axis);
        let aa = AxisAngled::from_vec(angle, axis);
        let m = Mat3d::rotation(angle, axis);
        let v = Vec3d::new(0.2, 0.4, -0.6);
        assert_abs_diff_eq!(q.transform(v), m.transform(v), epsilon = 1e-12);
        assert_abs_diff_eq!(aa.to_quat().transform(v), m.transform(v), epsilon = 1e-12);
        let back = AxisAngled::from_quat(q);
        assert_abs_diff_eq!(back.angle, angle, epsilon = 1e-9);
        assert_abs_diff_eq!(back.axis(), axis, epsilon = 1e-9);
    }

    /// the affine 4x3 form tracks the full 4x4 on affine input
    #[test]
    fn test_affine_matrix_consistency() {
        let m4 = Mat4d::translation(2.0, 1.0, -1.0)
            .rotate(0.6, Vec3d::new(0.0, 0.0, 1.0))
            .scale(1.5, 1.5, 1.5);
        let m43 = m4.to_mat4x3();
        let p = Vec3d::new(0.3, -0.6, 0.9);
        assert_abs_diff_eq!(m43.transform_point(p), m4.transform_point(p), epsilon = 1e-12);
        assert_abs_diff_eq!(
            m43.invert().unwrap().to_mat4(),
            m4.invert().unwrap(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(Mat4x3d::identity().to_mat4(), Mat4d::identity());
    }

    /// matrices round-trip through a shared column-major buffer
    #[test]
    fn test_buffer_interop_across_types() {
        let mut buf: Buffer<f32> = Buffer::with_capacity(16 + 4 + 3);
        let m = Mat4f::translation(1.0, 2.0, 3.0);
        let q = Quatf::from_axis_angle(0.5, Vec3f::new(0.0, 1.0, 0.0));
        let v = Vec3f::new(7.0, 8.0, 9.0);
        m.write_to_buffer(&mut buf).unwrap();
        q.write_to_buffer(&mut buf).unwrap();
        v.write_to_buffer(&mut buf).unwrap();
        assert_eq!(buf.remaining(), 0);

        buf.rewind();
        assert_eq!(Mat4f::read_from_buffer(&mut buf).unwrap(), m);
        assert_eq!(Quatf::read_from_buffer(&mut buf).unwrap(), q);
        assert_eq!(Vec3f::read_from_buffer(&mut buf).unwrap(), v);
    }

    /// a transformed frustum culls in world space
    #[test]
    fn test_view_projection_culling() {
        let proj = Mat4f::perspective(deg_to_rad(60.0f32), 1.0, 0.5, 50.0);
        let view = Mat4f::look_at(
            Vec3f::new(0.0, 0.0, 10.0),
            Vec3f::zero(),
            Vec3f::new(0.0, 1.0, 0.0),
        );
        let culler = FrustumCullerf::from_matrix(&(proj * view));
        assert!(culler.test_point(Vec3f::zero()));
        assert!(!culler.test_point(Vec3f::new(0.0, 0.0, 20.0)));

        let ray = RayAabf::new(Vec3f::new(0.0, 0.0, 10.0), Vec3f::new(0.0, 0.0, -1.0));
        assert!(ray.test(Vec3f::splat(-1.0), Vec3f::one()));
    }

    /// polygon-with-hole containment over a flattened buffer
    #[test]
    fn test_polygon_hole_scenario() {
        let verts = [
            0.0f32, 0.0, 8.0, 0.0, 8.0, 8.0, 0.0, 8.0, // outer square
            2.0, 2.0, 6.0, 2.0, 6.0, 6.0, 2.0, 6.0, // hole
        ];
        let poly = PolygonsPointf::new(&verts, &[4]);
        assert!(poly.test_point(1.0, 4.0));
        assert!(!poly.test_point(4.0, 4.0));
        assert!(poly.test_point(7.0, 7.0));
        assert!(!poly.test_point(9.0, 4.0));
    }
}
