use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dispatch::DeviceSelector;
use crate::error::LoadError;
use crate::parsing::load_json;
use crate::physics::DomainBounds;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub group_size: usize,
    // sizes the input transport buffer.
    pub max_spheres: usize,
    pub device: DeviceSelector,
    pub kernel_path: PathBuf,
    pub scene_path: Option<PathBuf>,
    pub bounds: DomainBounds,
    pub frames: usize,
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1280,
            height: 1024,
            group_size: 256,
            max_spheres: 1024,
            device: DeviceSelector::default(),
            kernel_path: PathBuf::from("data/kernels/raytrace.json"),
            scene_path: None,
            bounds: DomainBounds::default(),
            frames: 1,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RenderConfig, LoadError> {
        load_json(path.as_ref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"width": 64, "height": 48, "device": {{"index": 1}}, "bounds": {{
                "x": {{"min": -4.0, "max": 4.0}},
                "y": {{"min": -3.0, "max": 3.0}},
                "z": {{"min": -2.0, "max": 2.0}}}}}}"#
        )
        .unwrap();
        let config = RenderConfig::load(file.path()).unwrap();
        assert_eq!((config.width, config.height), (64, 48));
        assert_eq!(config.device, DeviceSelector::Index(1));
        assert_eq!(config.bounds, DomainBounds::compact());
        assert_eq!(config.group_size, 256);
        assert_eq!(config.kernel_path, PathBuf::from("data/kernels/raytrace.json"));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = RenderConfig::load("data/config.json").unwrap();
        assert_eq!((config.width, config.height), (1280, 1024));
    }

    #[test]
    fn test_missing_config_is_an_io_error() {
        assert!(matches!(
            RenderConfig::load("data/does_not_exist.json"),
            Err(LoadError::Io { .. })
        ));
    }
}
