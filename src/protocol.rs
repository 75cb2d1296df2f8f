// per frame:
// [width, height, camera.xyz, light.xyz, sphere_count,
//  per sphere: pos.xyz, radius, rgb, diffuse, albedo.xyz, refract.xy]
// fields are positional.

use crate::error::RenderError;
use crate::math::{Point3, RGBColor, Vec3};
use crate::scene::{Camera, LightSource, Material, Registry, SphereRenderer, Transform};

pub const WIDTH: usize = 0;
pub const HEIGHT: usize = 1;
pub const CAMERA: usize = 2;
pub const LIGHT: usize = 5;
pub const SPHERE_COUNT: usize = 8;
pub const HEADER_LEN: usize = 9;

pub mod sphere {
    pub const POSITION: usize = 0;
    pub const RADIUS: usize = 3;
    pub const COLOR: usize = 4;
    pub const DIFFUSE: usize = 7;
    pub const ALBEDO: usize = 8;
    pub const REFRACT: usize = 11;
    pub const STRIDE: usize = 13;
}

pub use sphere::STRIDE as SPHERE_STRIDE;

// written in place of the light position when the scene has no light.
pub const ABSENT_LIGHT: f32 = f32::NAN;

// None when the length does not fit in a usize.
pub fn max_payload_len(max_spheres: usize) -> Option<usize> {
    max_spheres
        .checked_mul(SPHERE_STRIDE)
        .and_then(|len| len.checked_add(HEADER_LEN))
}

#[derive(Default)]
pub struct Serializer;

impl Serializer {
    pub fn serialize(&self, registry: &Registry, width: usize, height: usize, out: &mut Vec<f32>) {
        out.clear();
        out.push(width as f32);
        out.push(height as f32);

        let cameras = registry.view::<(Camera, Transform)>();
        let camera = cameras
            .first()
            .and_then(|e| cameras.get::<Transform>(e))
            .map(|t| t.position.as_array())
            .unwrap_or([0.0; 3]);
        out.extend_from_slice(&camera);

        // only the first light is consumed
        let lights = registry.view::<(LightSource, Transform)>();
        let light = lights
            .first()
            .and_then(|e| lights.get::<Transform>(e))
            .map(|t| t.position.as_array())
            .unwrap_or([ABSENT_LIGHT; 3]);
        out.extend_from_slice(&light);

        let spheres = registry.view::<(SphereRenderer, Transform, Material)>();
        out.push(spheres.len() as f32);
        out.reserve(spheres.len() * SPHERE_STRIDE);
        for entity in spheres.iter() {
            let (transform, renderer, material) = match (
                spheres.get::<Transform>(entity),
                spheres.get::<SphereRenderer>(entity),
                spheres.get::<Material>(entity),
            ) {
                (Some(t), Some(r), Some(m)) => (t, r, m),
                _ => continue,
            };
            out.extend_from_slice(&transform.position.as_array());
            out.push(renderer.radius);
            out.extend_from_slice(&material.color);
            out.push(material.diffuse);
            out.extend_from_slice(&material.albedo);
            out.extend_from_slice(&material.refract);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereRecord {
    pub center: Point3,
    pub radius: f32,
    pub color: RGBColor,
    pub diffuse: f32,
    pub albedo: Vec3,
    pub refract: [f32; 2],
}

#[derive(Copy, Clone, Debug)]
pub struct SceneBuffer<'a> {
    data: &'a [f32],
    sphere_count: usize,
}

impl<'a> SceneBuffer<'a> {
    pub fn new(data: &'a [f32]) -> Result<Self, RenderError> {
        if data.len() < HEADER_LEN {
            return Err(RenderError::MalformedPayload(format!(
                "{} floats is shorter than the {} float header",
                data.len(),
                HEADER_LEN
            )));
        }
        let raw_count = data[SPHERE_COUNT];
        if !(raw_count >= 0.0) || raw_count.fract() != 0.0 {
            return Err(RenderError::MalformedPayload(format!(
                "sphere count {} is not a whole number",
                raw_count
            )));
        }
        let sphere_count = raw_count as usize;
        let needed = max_payload_len(sphere_count).ok_or_else(|| {
            RenderError::MalformedPayload(format!("sphere count {} is out of range", raw_count))
        })?;
        if data.len() < needed {
            return Err(RenderError::MalformedPayload(format!(
                "{} spheres need {} floats, got {}",
                sphere_count,
                needed,
                data.len()
            )));
        }
        Ok(SceneBuffer { data, sphere_count })
    }

    pub fn width(&self) -> usize {
        self.data[WIDTH] as usize
    }
    pub fn height(&self) -> usize {
        self.data[HEIGHT] as usize
    }

    fn point(&self, at: usize) -> Point3 {
        Point3::new(self.data[at], self.data[at + 1], self.data[at + 2])
    }

    pub fn camera(&self) -> Point3 {
        self.point(CAMERA)
    }

    // None when the frame was serialized without a light.
    pub fn light(&self) -> Option<Point3> {
        Some(self.point(LIGHT)).filter(|p| p.is_finite())
    }

    pub fn sphere_count(&self) -> usize {
        self.sphere_count
    }

    pub fn sphere(&self, index: usize) -> SphereRecord {
        let base = HEADER_LEN + index * SPHERE_STRIDE;
        let s = &self.data[base..base + SPHERE_STRIDE];
        SphereRecord {
            center: Point3::new(
                s[sphere::POSITION],
                s[sphere::POSITION + 1],
                s[sphere::POSITION + 2],
            ),
            radius: s[sphere::RADIUS],
            color: RGBColor::new(s[sphere::COLOR], s[sphere::COLOR + 1], s[sphere::COLOR + 2]),
            diffuse: s[sphere::DIFFUSE],
            albedo: Vec3::new(
                s[sphere::ALBEDO],
                s[sphere::ALBEDO + 1],
                s[sphere::ALBEDO + 2],
            ),
            refract: [s[sphere::REFRACT], s[sphere::REFRACT + 1]],
        }
    }

    pub fn spheres(&self) -> impl Iterator<Item = SphereRecord> + '_ {
        (0..self.sphere_count).map(move |i| self.sphere(i))
    }

    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scene::RigidBody;

    fn add_sphere(registry: &mut Registry, position: Point3, radius: f32, material: Material) {
        let e = registry.create();
        registry.attach(e, Transform::at(position)).unwrap();
        registry.attach(e, SphereRenderer { radius }).unwrap();
        registry.attach(e, material).unwrap();
        registry.attach(e, RigidBody::default()).unwrap();
    }

    fn odd_material(seed: f32) -> Material {
        Material {
            color: [0.1 * seed, 1.0 / 3.0, seed.sqrt()],
            diffuse: 0.7 + seed,
            albedo: [20.0, 1.4, 0.1 * seed],
            refract: [0.2 / seed, 1.33],
            shadow_quality: 2,
        }
    }

    #[test]
    fn test_layout_and_lossless_readback() {
        let mut registry = Registry::new();
        let camera = registry.create();
        registry
            .attach(camera, Transform::at(Point3::new(0.0, -2.0, -20.0)))
            .unwrap();
        registry.attach(camera, Camera::default()).unwrap();

        let light = registry.create();
        registry
            .attach(light, Transform::at(Point3::new(23.0, 30.0, -80.0)))
            .unwrap();
        registry.attach(light, LightSource { power: 0.9 }).unwrap();

        // a second light must be ignored
        let extra = registry.create();
        registry
            .attach(extra, Transform::at(Point3::new(1.0, 1.0, 1.0)))
            .unwrap();
        registry.attach(extra, LightSource { power: 5.0 }).unwrap();

        let spheres = [
            (Point3::new(-1.0, 0.0, 3.0), 2.0, odd_material(1.0)),
            (Point3::new(0.1, 0.2, 0.3), 0.7, odd_material(3.0)),
            (Point3::new(1e-7, -1e7, 3.3), 1.1, odd_material(7.0)),
        ];
        for (p, r, m) in spheres.iter() {
            add_sphere(&mut registry, *p, *r, *m);
        }

        let mut out = Vec::new();
        Serializer.serialize(&registry, 640, 480, &mut out);
        assert_eq!(out.len(), HEADER_LEN + 3 * SPHERE_STRIDE);
        assert_eq!(&out[..HEADER_LEN], &[640.0, 480.0, 0.0, -2.0, -20.0, 23.0, 30.0, -80.0, 3.0]);

        let buffer = SceneBuffer::new(&out).unwrap();
        assert_eq!(buffer.width(), 640);
        assert_eq!(buffer.height(), 480);
        assert_eq!(buffer.camera(), Point3::new(0.0, -2.0, -20.0));
        assert_eq!(buffer.light(), Some(Point3::new(23.0, 30.0, -80.0)));
        assert_eq!(buffer.sphere_count(), 3);
        for (record, (p, r, m)) in buffer.spheres().zip(spheres.iter()) {
            assert_eq!(record.center.as_array().map(f32::to_bits), p.as_array().map(f32::to_bits));
            assert_eq!(record.radius.to_bits(), r.to_bits());
            assert_eq!(record.color.as_array().map(f32::to_bits), m.color.map(f32::to_bits));
            assert_eq!(record.diffuse.to_bits(), m.diffuse.to_bits());
            assert_eq!(record.albedo.as_array().map(f32::to_bits), m.albedo.map(f32::to_bits));
            assert_eq!(record.refract.map(f32::to_bits), m.refract.map(f32::to_bits));
        }
    }

    #[test]
    fn test_missing_camera_and_light() {
        let mut registry = Registry::new();
        add_sphere(&mut registry, Point3::ORIGIN, 1.0, Material::default());
        let mut out = vec![42.0; 100];
        Serializer.serialize(&registry, 4, 2, &mut out);
        assert_eq!(out.len(), HEADER_LEN + SPHERE_STRIDE);
        assert_eq!(&out[CAMERA..CAMERA + 3], &[0.0, 0.0, 0.0]);
        assert!(out[LIGHT..LIGHT + 3].iter().all(|v| v.is_nan()));
        let buffer = SceneBuffer::new(&out).unwrap();
        assert_eq!(buffer.light(), None);
    }

    #[test]
    fn test_entities_without_material_are_not_spheres() {
        let mut registry = Registry::new();
        let e = registry.create();
        registry.attach(e, Transform::default()).unwrap();
        registry.attach(e, SphereRenderer { radius: 1.0 }).unwrap();
        let mut out = Vec::new();
        Serializer.serialize(&registry, 1, 1, &mut out);
        assert_eq!(out[SPHERE_COUNT], 0.0);
        assert_eq!(out.len(), HEADER_LEN);
    }

    #[test]
    fn test_reader_rejects_truncated_payloads() {
        assert!(SceneBuffer::new(&[1.0, 1.0]).is_err());
        let mut frame = vec![0.0; HEADER_LEN + SPHERE_STRIDE];
        frame[SPHERE_COUNT] = 2.0;
        assert!(SceneBuffer::new(&frame).is_err());
        frame[SPHERE_COUNT] = 1.5;
        assert!(SceneBuffer::new(&frame).is_err());
        frame[SPHERE_COUNT] = 1.0;
        assert!(SceneBuffer::new(&frame).is_ok());
    }

    #[test]
    fn test_reader_rejects_huge_sphere_counts() {
        let mut frame = vec![0.0; HEADER_LEN + SPHERE_STRIDE];
        for count in [1e19, f32::INFINITY, usize::MAX as f32] {
            frame[SPHERE_COUNT] = count;
            assert!(matches!(
                SceneBuffer::new(&frame),
                Err(RenderError::MalformedPayload(_))
            ));
        }
    }

    #[test]
    fn test_max_payload_len() {
        assert_eq!(max_payload_len(0), Some(9));
        assert_eq!(max_payload_len(50), Some(9 + 50 * 13));
        assert_eq!(max_payload_len(usize::MAX / 4), None);
    }
}
