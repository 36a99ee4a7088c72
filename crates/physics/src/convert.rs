//! glam <-> nalgebra conversions at the rapier boundary.

use glam::{Quat, Vec3};
use rapier3d::na::{Point3, UnitQuaternion, Vector3};
use rapier3d::prelude::{RigidBodyHandle, Real};
use sandbox_common::BodyId;

pub(crate) fn vector(v: Vec3) -> Vector3<Real> {
    Vector3::new(v.x, v.y, v.z)
}

pub(crate) fn point(v: Vec3) -> Point3<Real> {
    Point3::new(v.x, v.y, v.z)
}

pub(crate) fn vec3(v: &Vector3<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn point_to_vec3(p: &Point3<Real>) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

pub(crate) fn quat(r: &UnitQuaternion<Real>) -> Quat {
    Quat::from_xyzw(r.i, r.j, r.k, r.w)
}

pub(crate) fn body_id(handle: RigidBodyHandle) -> BodyId {
    let (index, generation) = handle.into_raw_parts();
    BodyId::from_parts(index, generation)
}

pub(crate) fn body_handle(id: BodyId) -> RigidBodyHandle {
    RigidBodyHandle::from_raw_parts(id.index(), id.generation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_id_round_trip() {
        let handle = RigidBodyHandle::from_raw_parts(12, 5);
        assert_eq!(body_handle(body_id(handle)), handle);
    }

    #[test]
    fn quaternion_component_order() {
        let q = Quat::from_rotation_y(1.0);
        let na = UnitQuaternion::from_quaternion(rapier3d::na::Quaternion::new(q.w, q.x, q.y, q.z));
        let back = quat(&na);
        assert!((back.x - q.x).abs() < 1e-6);
        assert!((back.y - q.y).abs() < 1e-6);
        assert!((back.w - q.w).abs() < 1e-6);
    }
}
