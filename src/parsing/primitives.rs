use serde::{Deserialize, Serialize};

use crate::{
    error::SceneError,
    math::{Point3, Vec3},
    scene::{Entity, Material, Registry, RigidBody, SphereRenderer, Transform},
};

fn default_scale() -> f32 {
    1.0
}

fn default_color() -> [f32; 3] {
    Material::default().color
}

fn default_diffuse() -> f32 {
    Material::default().diffuse
}

fn default_albedo() -> [f32; 3] {
    Material::default().albedo
}

fn default_shadow_quality() -> i32 {
    Material::default().shadow_quality
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PrimitiveData {
    Sphere {
        origin: [f32; 3],
        #[serde(default = "default_scale")]
        scale: f32,
        radius: f32,
        #[serde(default = "default_color")]
        color: [f32; 3],
        #[serde(default = "default_diffuse")]
        diffuse: f32,
        #[serde(default = "default_albedo")]
        albedo: [f32; 3],
        #[serde(default)]
        refract: [f32; 2],
        #[serde(default = "default_shadow_quality")]
        shadow_quality: i32,
        // bodies without one never move.
        #[serde(default)]
        velocity: Option<[f32; 3]>,
    },
}

impl PrimitiveData {
    pub fn spawn(self, registry: &mut Registry) -> Result<Entity, SceneError> {
        match self {
            Self::Sphere {
                origin,
                scale,
                radius,
                color,
                diffuse,
                albedo,
                refract,
                shadow_quality,
                velocity,
            } => {
                if !(radius > 0.0) {
                    return Err(SceneError::InvalidRadius(radius));
                }
                let entity = registry.create();
                registry.attach(
                    entity,
                    Transform {
                        position: Point3::from(origin),
                        scale,
                    },
                )?;
                registry.attach(entity, SphereRenderer { radius })?;
                registry.attach(
                    entity,
                    Material {
                        color,
                        diffuse,
                        albedo,
                        refract,
                        shadow_quality,
                    },
                )?;
                if let Some(velocity) = velocity {
                    registry.attach(
                        entity,
                        RigidBody {
                            velocity: Vec3::from(velocity),
                        },
                    )?;
                }
                Ok(entity)
            }
        }
    }
}
