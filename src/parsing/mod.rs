mod primitives;

use std::{fs::File, io::Read, path::Path};

use log::{debug, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use primitives::PrimitiveData;

use crate::{
    error::{LoadError, SceneError},
    kernel::KernelParams,
    math::{Point3, Vec3},
    random::spawn_random_spheres,
    scene::{Camera, LightSource, Registry, Transform},
};

fn default_camera_direction() -> [f32; 3] {
    [0.0, 0.0, 20.0]
}

fn default_focus_distance() -> f32 {
    20.0
}

fn default_light_power() -> f32 {
    KernelParams::default().light_power
}

// the frame layout has no power slot, shading always uses the kernel constant
fn kernel_uses_light_power(power: f32) -> bool {
    let kernel_power = KernelParams::default().light_power;
    if power != kernel_power {
        warn!(
            "light power {} is not used, the kernel renders every light at {}",
            power, kernel_power
        );
        return false;
    }
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraData {
    pub origin: [f32; 3],
    #[serde(default = "default_camera_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_focus_distance")]
    pub focus_distance: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightData {
    pub origin: [f32; 3],
    #[serde(default = "default_light_power")]
    pub power: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomData {
    pub count: usize,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneData {
    pub camera: Option<CameraData>,
    pub lights: Vec<LightData>,
    pub primitives: Vec<PrimitiveData>,
    pub random: Option<RandomData>,
}

impl SceneData {
    // camera and light of the interactive demo, plus 50 random moving spheres.
    pub fn default_scene() -> Self {
        SceneData {
            camera: Some(CameraData {
                origin: [0.0, -2.0, -20.0],
                direction: default_camera_direction(),
                focus_distance: default_focus_distance(),
            }),
            lights: vec![LightData {
                origin: [23.0, 30.0, -80.0],
                power: default_light_power(),
            }],
            primitives: Vec::new(),
            random: Some(RandomData { count: 50, seed: 0 }),
        }
    }

    pub fn build_into(self, registry: &mut Registry) -> Result<(), SceneError> {
        if let Some(camera) = self.camera {
            let entity = registry.create();
            registry.attach(entity, Transform::at(Point3::from(camera.origin)))?;
            registry.attach(
                entity,
                Camera {
                    direction: Vec3::from(camera.direction),
                    focus_distance: camera.focus_distance,
                },
            )?;
        }
        for light in self.lights {
            kernel_uses_light_power(light.power);
            let entity = registry.create();
            registry.attach(entity, Transform::at(Point3::from(light.origin)))?;
            registry.attach(entity, LightSource { power: light.power })?;
        }
        for primitive in self.primitives {
            primitive.spawn(registry)?;
        }
        if let Some(random) = self.random {
            spawn_random_spheres(registry, random.count, random.seed)?;
        }
        debug!("scene built with {} entities", registry.len());
        Ok(())
    }

    pub fn into_registry(self) -> Result<Registry, SceneError> {
        let mut registry = Registry::new();
        self.build_into(&mut registry)?;
        Ok(registry)
    }
}

pub fn load_json<T>(path: &Path) -> Result<T, LoadError>
where
    T: DeserializeOwned,
{
    let mut input = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut input))
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&input).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::Serializer;
    use crate::scene::{Material, RigidBody, SphereRenderer};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_loading_default_scene_file() {
        let scene = load_json::<SceneData>(&PathBuf::from("data/scenes/default.json"))
            .expect("failed to parse scene");
        assert_eq!(scene, SceneData::default_scene());
    }

    #[test]
    fn test_loading_showcase_scene() {
        let scene = load_json::<SceneData>(&PathBuf::from("data/scenes/showcase.json"))
            .expect("failed to parse scene");
        let registry = scene.into_registry().unwrap();
        assert_eq!(registry.view::<(SphereRenderer, Material)>().len(), 5);
        assert_eq!(registry.view::<(RigidBody,)>().len(), 5);
    }

    #[test]
    fn test_default_scene_layout() {
        let registry = SceneData::default_scene().into_registry().unwrap();
        assert_eq!(registry.len(), 52);
        let mut out = Vec::new();
        Serializer.serialize(&registry, 1280, 1024, &mut out);
        assert_eq!(&out[2..9], &[0.0, -2.0, -20.0, 23.0, 30.0, -80.0, 50.0]);
    }

    #[test]
    fn test_explicit_primitive_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"primitives": [{{"type": "Sphere", "origin": [-1, 0, 3], "radius": 2,
                "color": [0, 0, 1], "diffuse": 0.95, "albedo": [20, 1.4, 0.1],
                "refract": [0, 0], "shadow_quality": 2}}]}}"#
        )
        .unwrap();
        let registry = load_json::<SceneData>(file.path())
            .unwrap()
            .into_registry()
            .unwrap();
        let spheres = registry.view::<(SphereRenderer, Transform, Material)>();
        let e = spheres.first().unwrap();
        assert_eq!(spheres.get::<SphereRenderer>(e).unwrap().radius, 2.0);
        assert_eq!(spheres.get::<Transform>(e).unwrap().scale, 1.0);
        assert_eq!(spheres.get::<Material>(e).unwrap().color, [0.0, 0.0, 1.0]);
        assert!(!registry.has::<RigidBody>(e));
        assert!(registry.view::<(Camera,)>().is_empty());
    }

    #[test]
    fn test_light_power_other_than_the_kernel_constant_is_flagged() {
        assert!(kernel_uses_light_power(0.9));
        assert!(!kernel_uses_light_power(2.0));

        // still built, the power just stays on the entity
        let scene = SceneData {
            lights: vec![LightData {
                origin: [0.0; 3],
                power: 2.0,
            }],
            ..SceneData::default()
        };
        let registry = scene.into_registry().unwrap();
        let lights = registry.view::<(LightSource,)>();
        let e = lights.first().unwrap();
        assert_eq!(lights.get::<LightSource>(e).unwrap().power, 2.0);
    }

    #[test]
    fn test_non_positive_radius_is_rejected() {
        let scene = SceneData {
            primitives: vec![PrimitiveData::Sphere {
                origin: [0.0; 3],
                scale: 1.0,
                radius: 0.0,
                color: [1.0; 3],
                diffuse: 0.9,
                albedo: [20.0, 1.4, 0.1],
                refract: [0.0; 2],
                shadow_quality: 2,
                velocity: None,
            }],
            ..SceneData::default()
        };
        assert!(matches!(
            scene.into_registry(),
            Err(SceneError::InvalidRadius(r)) if r == 0.0
        ));
    }

    #[test]
    fn test_bad_json_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"lights\": 3 }}").unwrap();
        match load_json::<SceneData>(file.path()) {
            Err(LoadError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected a parse error, got {:?}", other.map(|_| ())),
        }
    }
}
