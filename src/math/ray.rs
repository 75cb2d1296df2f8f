use super::{Point3, Vec3};

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub const fn new(origin: Point3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }
    // a ray starting `bias` units along `direction` from `origin`, so it can't re-hit the surface it left.
    pub fn offset(origin: Point3, direction: Vec3, bias: f32) -> Self {
        Ray::new(origin + direction * bias, direction)
    }
    pub fn point_at_parameter(self, time: f32) -> Point3 {
        self.origin + self.direction * time
    }
}

impl Default for Ray {
    fn default() -> Self {
        Ray::new(Point3::default(), Vec3::default())
    }
}
