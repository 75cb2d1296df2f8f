use std::time::Instant;

use log::debug;

use crate::assets::load_text;
use crate::config::RenderConfig;
use crate::dispatch::ComputeDispatcher;
use crate::error::RenderError;
use crate::physics::Integrator;
use crate::protocol::Serializer;
use crate::scene::Registry;

pub struct FramePipeline {
    registry: Registry,
    integrator: Integrator,
    serializer: Serializer,
    scratch: Vec<f32>,
    dispatcher: ComputeDispatcher,
    frames: usize,
}

impl FramePipeline {
    pub fn new(registry: Registry, integrator: Integrator, dispatcher: ComputeDispatcher) -> Self {
        FramePipeline {
            registry,
            integrator,
            serializer: Serializer,
            scratch: Vec::new(),
            dispatcher,
            frames: 0,
        }
    }

    pub fn from_config(config: &RenderConfig, registry: Registry) -> Result<Self, RenderError> {
        let source = load_text(&config.kernel_path);
        let dispatcher = ComputeDispatcher::new(config, &source)?;
        Ok(FramePipeline::new(
            registry,
            Integrator::new(config.bounds),
            dispatcher,
        ))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn dispatcher(&self) -> &ComputeDispatcher {
        &self.dispatcher
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames
    }

    // physics, then a full render.
    pub fn step(&mut self) -> Result<&[f32], RenderError> {
        self.integrator.update(&mut self.registry);
        self.render()
    }

    // serialize, upload, dispatch and wait. The scene is not advanced.
    pub fn render(&mut self) -> Result<&[f32], RenderError> {
        let start = Instant::now();
        let (width, height) = (self.dispatcher.width(), self.dispatcher.height());
        self.serializer
            .serialize(&self.registry, width, height, &mut self.scratch);
        self.frames += 1;
        let frame = self.frames;
        let output = self.dispatcher.render_frame(&self.scratch)?;
        debug!(
            "frame {}: {} floats in, rendered in {:?}",
            frame,
            self.scratch.len(),
            start.elapsed()
        );
        Ok(output)
    }
}
