mod trace;
mod work_item;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::math::RGBColor;
use crate::protocol::SceneBuffer;

pub use trace::{intersect, intersect_anything, primary_ray, shade, trace};
pub use work_item::{WorkItem, CHANNELS};

pub const PROCESS_RAYTRACE: &str = "process_raytrace";
const KNOWN_ENTRY_POINTS: &[&str] = &[PROCESS_RAYTRACE];

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelParams {
    pub scale: f32,
    // z component of every primary ray before normalization.
    pub focal_z: f32,
    pub shadow_bias: f32,
    // ambient floor added to every lit or shadowed hit.
    pub min_light: f32,
    pub background: [f32; 3],
    pub light_power: f32,
    pub max_depth: u32,
    // reflection and refraction terms. off unless explicitly turned on.
    pub secondary_rays: bool,
    pub reflection_bias: f32,
    pub refraction_bias: f32,
}

impl Default for KernelParams {
    fn default() -> Self {
        KernelParams {
            scale: 0.01,
            focal_z: 20.0,
            shadow_bias: 0.001,
            min_light: 0.0,
            background: [1.0, 1.0, 1.0],
            light_power: 0.9,
            max_depth: 2,
            secondary_rays: false,
            reflection_bias: 0.01,
            refraction_bias: 0.001,
        }
    }
}

impl KernelParams {
    pub fn background(&self) -> RGBColor {
        RGBColor::from(self.background)
    }

    fn validate(&self) -> Vec<String> {
        let mut log = Vec::new();
        let positive = [
            ("scale", self.scale),
            ("focal_z", self.focal_z),
            ("shadow_bias", self.shadow_bias),
            ("reflection_bias", self.reflection_bias),
            ("refraction_bias", self.refraction_bias),
        ];
        for (name, value) in positive.iter() {
            if !(value.is_finite() && *value > 0.0) {
                log.push(format!("{} must be finite and positive, got {}", name, value));
            }
        }
        let finite = [("min_light", self.min_light), ("light_power", self.light_power)];
        for (name, value) in finite.iter() {
            if !value.is_finite() {
                log.push(format!("{} must be finite, got {}", name, value));
            }
        }
        if !self.background.iter().all(|c| c.is_finite()) {
            log.push(format!("background must be finite, got {:?}", self.background));
        }
        log
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct KernelSource {
    entry_point: String,
    #[serde(default)]
    params: KernelParams,
}

#[derive(Clone, Debug)]
pub struct KernelProgram {
    entry_point: String,
    params: KernelParams,
}

impl KernelProgram {
    // parses and validates kernel source. every problem found goes into the build log.
    pub fn build(source: &str) -> Result<KernelProgram, RenderError> {
        let source: KernelSource =
            serde_json::from_str(source).map_err(|e| RenderError::ProgramBuild {
                log: format!("syntax error: {}", e),
            })?;

        let mut log = Vec::new();
        if !KNOWN_ENTRY_POINTS.contains(&source.entry_point.as_str()) {
            log.push(format!(
                "unknown entry point {:?}, expected one of {:?}",
                source.entry_point, KNOWN_ENTRY_POINTS
            ));
        }
        log.extend(source.params.validate());
        if !log.is_empty() {
            return Err(RenderError::ProgramBuild {
                log: log.join("\n"),
            });
        }
        Ok(KernelProgram {
            entry_point: source.entry_point,
            params: source.params,
        })
    }

    pub fn from_params(params: KernelParams) -> Result<KernelProgram, RenderError> {
        let source = KernelSource {
            entry_point: PROCESS_RAYTRACE.to_string(),
            params,
        };
        let text = serde_json::to_string(&source).map_err(|e| RenderError::ProgramBuild {
            log: e.to_string(),
        })?;
        KernelProgram::build(&text)
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn params(&self) -> &KernelParams {
        &self.params
    }

    pub fn run(&self, scene: &SceneBuffer, item: WorkItem) -> RGBColor {
        let ray = primary_ray(scene, item, &self.params);
        trace(scene, ray, self.params.max_depth, &self.params)
    }
}
