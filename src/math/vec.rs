use std::{
    fmt,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

use nalgebra::Vector3;

#[derive(Copy, Clone, PartialEq, Default)]
pub struct Vec3(pub Vector3<f32>);

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Point3(pub Vector3<f32>);

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3(Vector3::new(x, y, z))
    }
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|e| e.is_finite())
    }
}

impl Vec3 {
    #[inline(always)]
    pub fn x(&self) -> f32 {
        self.0.x
    }
    #[inline(always)]
    pub fn y(&self) -> f32 {
        self.0.y
    }
    #[inline(always)]
    pub fn z(&self) -> f32 {
        self.0.z
    }
    pub fn as_array(&self) -> [f32; 3] {
        [self.0.x, self.0.y, self.0.z]
    }
    pub fn cross(&self, other: Vec3) -> Self {
        Vec3(self.0.cross(&other.0))
    }

    pub fn norm_squared(&self) -> f32 {
        self.0.norm_squared()
    }

    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    // no zero check. a zero vector normalizes to NaN, same as the device code would.
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        Vec3(self.0 / norm)
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vec3")
            .field(&self.x())
            .field(&self.y())
            .field(&self.z())
            .finish()
    }
}

// dot product
impl Mul for Vec3 {
    type Output = f32;
    fn mul(self, other: Vec3) -> f32 {
        self.0.dot(&other.0)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, other: f32) -> Vec3 {
        Vec3(self.0 * other)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, other: Vec3) -> Vec3 {
        Vec3(other.0 * self)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, other: f32) -> Vec3 {
        Vec3(self.0 / other)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3(self.0 + other.0)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Vec3) {
        self.0 += other.0;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        self + (-other)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(other: [f32; 3]) -> Vec3 {
        Vec3::new(other[0], other[1], other[2])
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Vec3(p.0)
    }
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Point3 {
        Point3(Vector3::new(x, y, z))
    }
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub fn x(&self) -> f32 {
        self.0.x
    }
    pub fn y(&self) -> f32 {
        self.0.y
    }
    pub fn z(&self) -> f32 {
        self.0.z
    }
    pub fn as_array(&self) -> [f32; 3] {
        [self.0.x, self.0.y, self.0.z]
    }
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|e| e.is_finite())
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Point3::ORIGIN
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;
    fn add(self, other: Vec3) -> Point3 {
        Point3(self.0 + other.0)
    }
}

impl AddAssign<Vec3> for Point3 {
    fn add_assign(&mut self, other: Vec3) {
        self.0 += other.0
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Point3;
    fn sub(self, other: Vec3) -> Point3 {
        Point3(self.0 - other.0)
    }
}

impl SubAssign<Vec3> for Point3 {
    fn sub_assign(&mut self, other: Vec3) {
        self.0 -= other.0
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, other: Point3) -> Vec3 {
        Vec3(self.0 - other.0)
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(other: [f32; 3]) -> Point3 {
        Point3::new(other[0], other[1], other[2])
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Point3 {
        Point3::ORIGIN + v
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dot_and_cross() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-2.0, 0.5, 4.0);
        assert_relative_eq!(a * b, -2.0 + 1.0 + 12.0);
        let c = Vec3::X.cross(Vec3::Y);
        assert_eq!(c, Vec3::Z);
    }

    #[test]
    fn test_point_difference_is_vector() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let q = Point3::new(-1.0, 0.0, 3.0);
        let v = p - q;
        assert_eq!(v, Vec3::new(2.0, 1.0, -2.0));
        assert_eq!(q + v, p);
        assert_relative_eq!(v.normalized().norm(), 1.0, epsilon = 1e-6);
    }
}
