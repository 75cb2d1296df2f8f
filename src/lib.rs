pub mod assets;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod output;
pub mod parsing;
pub mod physics;
pub mod pipeline;
pub mod protocol;
pub mod random;
pub mod scene;

pub use config::RenderConfig;
pub use dispatch::{ComputeDispatcher, DeviceSelector};
pub use error::{LoadError, OutputError, RegistryError, RenderError, SceneError};
pub use kernel::{KernelParams, KernelProgram};
pub use parsing::SceneData;
pub use physics::Integrator;
pub use pipeline::FramePipeline;
pub use protocol::{SceneBuffer, Serializer};
pub use scene::Registry;
