use cgmath::{Point3, Vector3};
use rapier3d::prelude::*;

pub fn point_to_npoint(p: Point3<f32>) -> Point<Real> {
    point![p.x, p.y, p.z]
}

pub fn vec_to_nvec(v: Vector3<f32>) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub fn npoint_to_point(p: Point<Real>) -> Point3<f32> {
    Point3 {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}
