use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("entity {0} was never created by this registry")]
    UnknownEntity(u32),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("kernel source {0:?} is missing or empty")]
    EmptyKernelSource(PathBuf),
    #[error("kernel program failed to build:\n{log}")]
    ProgramBuild { log: String },
    #[error("no compute device satisfies {0}")]
    NoDevice(String),
    #[error("failed to create a thread pool for device {device}: {reason}")]
    DeviceInit { device: String, reason: String },
    #[error("could not allocate a transport buffer of {len} floats")]
    BufferAllocation { len: usize },
    #[error("image dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: usize, height: usize },
    #[error("work group size must be positive")]
    InvalidGroupSize,
    #[error("payload of {len} floats exceeds input capacity of {capacity}")]
    PayloadTooLarge { len: usize, capacity: usize },
    #[error("payload is malformed: {0}")]
    MalformedPayload(String),
    #[error("payload describes a {got_width}x{got_height} image, dispatcher renders {width}x{height}")]
    LayoutMismatch {
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },
    #[error("nothing was uploaded before dispatch")]
    NothingUploaded,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("frame buffer holds {len} floats, expected {expected}")]
    SizeMismatch { len: usize, expected: usize },
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Exr(#[from] exr::error::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
