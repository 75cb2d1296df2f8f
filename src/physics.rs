use serde::{Deserialize, Serialize};

use crate::scene::{Registry, RigidBody, Transform};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisInterval {
    pub min: f32,
    pub max: f32,
}

impl AxisInterval {
    pub const fn new(min: f32, max: f32) -> Self {
        AxisInterval { min, max }
    }
    pub fn contains(&self, x: f32) -> bool {
        !(x < self.min || x > self.max)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    pub x: AxisInterval,
    pub y: AxisInterval,
    pub z: AxisInterval,
}

impl DomainBounds {
    // the tighter box some scenes were tuned against.
    pub const fn compact() -> Self {
        DomainBounds {
            x: AxisInterval::new(-4.0, 4.0),
            y: AxisInterval::new(-3.0, 3.0),
            z: AxisInterval::new(-2.0, 2.0),
        }
    }
}

impl Default for DomainBounds {
    fn default() -> Self {
        DomainBounds {
            x: AxisInterval::new(-4.0, 4.0),
            y: AxisInterval::new(-5.0, 3.0),
            z: AxisInterval::new(-2.1, 2.1),
        }
    }
}

// Moves every body by its velocity once per frame and flips a velocity component whenever the
// body sits outside that axis' interval. Positions are never pulled back inside.
#[derive(Clone, Debug, Default)]
pub struct Integrator {
    pub bounds: DomainBounds,
}

impl Integrator {
    pub fn new(bounds: DomainBounds) -> Self {
        Integrator { bounds }
    }

    pub fn update(&self, registry: &mut Registry) {
        let bounds = self.bounds;
        registry.each_mut::<Transform, RigidBody, _>(|_, transform, body| {
            transform.position += body.velocity;

            let p = transform.position;
            let v = &mut body.velocity.0;
            if !bounds.x.contains(p.x()) {
                v.x = -v.x;
            }
            if !bounds.y.contains(p.y()) {
                v.y = -v.y;
            }
            if !bounds.z.contains(p.z()) {
                v.z = -v.z;
            }
        });
    }
}
