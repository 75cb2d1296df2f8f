use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::RegistryError;
use crate::math::{Point3, Vec3};
use crate::scene::{Entity, Material, Registry, RigidBody, SphereRenderer, Transform};

fn unit<R: Rng>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

// uniform in [-extent, extent) on every axis.
fn centered<R: Rng>(rng: &mut R, extent: f32) -> [f32; 3] {
    [
        unit(rng) * 2.0 * extent - extent,
        unit(rng) * 2.0 * extent - extent,
        unit(rng) * 2.0 * extent - extent,
    ]
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBody {
    pub position: Point3,
    pub radius: f32,
    pub material: Material,
    pub velocity: Vec3,
}

impl RandomBody {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let position = Point3::from(centered(rng, 2.0));
        let radius = 0.3 + unit(rng) * 0.6;
        let color = [unit(rng), unit(rng), unit(rng)];
        let diffuse = 0.1 + unit(rng) * 0.8;
        let albedo = [20.0, 1.4, unit(rng) * 0.4];
        let refract = [unit(rng) * 0.2, 0.0];
        let velocity = Vec3::from(centered(rng, 0.08));
        RandomBody {
            position,
            radius,
            material: Material {
                color,
                diffuse,
                albedo,
                refract,
                shadow_quality: 2,
            },
            velocity,
        }
    }

    pub fn spawn(self, registry: &mut Registry) -> Result<Entity, RegistryError> {
        let entity = registry.create();
        registry.attach(entity, Transform::at(self.position))?;
        registry.attach(entity, SphereRenderer { radius: self.radius })?;
        registry.attach(entity, self.material)?;
        registry.attach(
            entity,
            RigidBody {
                velocity: self.velocity,
            },
        )?;
        Ok(entity)
    }
}

// Spawns `count` moving spheres. The same seed always yields the same bodies.
pub fn spawn_random_spheres(
    registry: &mut Registry,
    count: usize,
    seed: u64,
) -> Result<Vec<Entity>, RegistryError> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| RandomBody::sample(&mut rng).spawn(registry))
        .collect()
}
