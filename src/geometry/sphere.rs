use crate::geometry::Primitive;
use crate::math::{Point3, Ray, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub radius: f32,
    pub origin: Point3,
}

impl Sphere {
    pub fn new(radius: f32, origin: Point3) -> Sphere {
        Sphere { radius, origin }
    }
}

impl Primitive for Sphere {
    // assumes a normalized ray direction.
    fn intersect_time(&self, r: Ray) -> Option<f32> {
        if !(self.radius > 0.0) {
            return None;
        }
        let k: Vec3 = r.origin - self.origin;
        let b = k * r.direction;
        let c = k.norm_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let discriminant_sqrt = discriminant.sqrt();
        let t1 = -b + discriminant_sqrt;
        let t2 = -b - discriminant_sqrt;
        let time = if t1.min(t2) >= 0.0 {
            t1.min(t2)
        } else {
            t1.max(t2)
        };
        // also rejects NaN
        if time > 0.0 {
            Some(time)
        } else {
            None
        }
    }

    fn normal_at(&self, point: Point3) -> Vec3 {
        (point - self.origin).normalized()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_ray_intersection() {
        let sphere = Sphere::new(2.0, Point3::new(0.0, 0.0, 10.0));
        let ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        let isect = sphere.intersect(ray, 4).expect("ray aims at the center");
        assert_relative_eq!(isect.time, 8.0);
        assert_relative_eq!(isect.point.z(), 8.0);
        assert_eq!(isect.normal, -Vec3::Z);
        assert_eq!(isect.primitive, 4);
    }

    #[test]
    fn test_origin_inside_sphere_hits_far_side() {
        let sphere = Sphere::new(3.0, Point3::ORIGIN);
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert_relative_eq!(sphere.intersect_time(ray).unwrap(), 2.0);
    }

    #[test]
    fn test_sphere_behind_origin_is_missed() {
        let sphere = Sphere::new(1.0, Point3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        assert!(sphere.intersect_time(ray).is_none());
    }

    #[test]
    fn test_miss_and_degenerate_radius() {
        let ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        assert!(Sphere::new(1.0, Point3::new(5.0, 0.0, 10.0))
            .intersect_time(ray)
            .is_none());
        assert!(Sphere::new(0.0, Point3::new(0.0, 0.0, 10.0))
            .intersect_time(ray)
            .is_none());
        assert!(Sphere::new(-1.0, Point3::new(0.0, 0.0, 10.0))
            .intersect_time(ray)
            .is_none());
    }
}
