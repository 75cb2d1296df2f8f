use crate::math::{Point3, Ray, Vec3};

mod sphere;

pub use sphere::Sphere;

#[derive(Copy, Clone, Debug)]
pub struct SurfaceIntersectionData {
    pub time: f32,
    pub point: Point3,
    pub normal: Vec3,
    pub primitive: usize,
}

impl SurfaceIntersectionData {
    pub fn new(time: f32, point: Point3, normal: Vec3, primitive: usize) -> Self {
        SurfaceIntersectionData {
            time,
            point,
            normal,
            primitive,
        }
    }
}

pub type IntersectionData = SurfaceIntersectionData;

pub trait Primitive {
    // distance along `r` to the surface, if the surface is ahead of the origin.
    fn intersect_time(&self, r: Ray) -> Option<f32>;
    fn normal_at(&self, point: Point3) -> Vec3;

    fn intersect(&self, r: Ray, primitive: usize) -> Option<IntersectionData> {
        let time = self.intersect_time(r)?;
        let point = r.point_at_parameter(time);
        Some(SurfaceIntersectionData::new(
            time,
            point,
            self.normal_at(point),
            primitive,
        ))
    }
}
