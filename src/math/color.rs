use std::ops::{Add, AddAssign, Mul, MulAssign};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RGBColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RGBColor {
    pub const fn new(r: f32, g: f32, b: f32) -> RGBColor {
        RGBColor { r, g, b }
    }
    pub const fn splat(v: f32) -> RGBColor {
        RGBColor::new(v, v, v)
    }
    pub const ZERO: RGBColor = RGBColor::splat(0.0);
    pub const BLACK: RGBColor = RGBColor::splat(0.0);
    pub const WHITE: RGBColor = RGBColor::splat(1.0);

    pub fn as_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Mul for RGBColor {
    type Output = Self;
    fn mul(self, other: RGBColor) -> Self {
        RGBColor::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl MulAssign for RGBColor {
    fn mul_assign(&mut self, other: RGBColor) {
        *self = *self * other;
    }
}

impl Mul<f32> for RGBColor {
    type Output = RGBColor;
    fn mul(self, other: f32) -> RGBColor {
        RGBColor::new(self.r * other, self.g * other, self.b * other)
    }
}

impl Mul<RGBColor> for f32 {
    type Output = RGBColor;
    fn mul(self, other: RGBColor) -> RGBColor {
        other * self
    }
}

impl Add for RGBColor {
    type Output = RGBColor;
    fn add(self, other: RGBColor) -> RGBColor {
        RGBColor::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for RGBColor {
    fn add_assign(&mut self, other: RGBColor) {
        *self = *self + other;
    }
}

impl From<f32> for RGBColor {
    fn from(s: f32) -> RGBColor {
        RGBColor::splat(s)
    }
}

impl From<[f32; 3]> for RGBColor {
    fn from(c: [f32; 3]) -> RGBColor {
        RGBColor::new(c[0], c[1], c[2])
    }
}
