use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Point3,
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Point3) -> Self {
        Transform {
            position,
            scale: 1.0,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::at(Point3::ORIGIN)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec3,
}

// `albedo` is (specular exponent, specular magnitude, reflectivity).
// `refract` is (blend weight, relative index).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: [f32; 3],
    pub diffuse: f32,
    pub albedo: [f32; 3],
    pub refract: [f32; 2],
    // carried, not consulted by shading.
    pub shadow_quality: i32,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            color: [1.0, 1.0, 1.0],
            diffuse: 0.9,
            albedo: [20.0, 1.4, 0.1],
            refract: [0.0, 0.0],
            shadow_quality: 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereRenderer {
    pub radius: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightSource {
    pub power: f32,
}

// direction and focus distance are stored but the active kernel path only uses the position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub direction: Vec3,
    pub focus_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            direction: Vec3::new(0.0, 0.0, 20.0),
            focus_distance: 20.0,
        }
    }
}
