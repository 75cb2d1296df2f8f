mod buffer;
mod device;

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::kernel::{KernelProgram, WorkItem, CHANNELS};
use crate::protocol::{max_payload_len, SceneBuffer};

pub use buffer::TransportBuffer;
pub use device::{enumerate_devices, ComputeDevice, DeviceKind, DeviceSelector};

pub struct ComputeDispatcher {
    device: ComputeDevice,
    pool: ThreadPool,
    program: KernelProgram,
    width: usize,
    height: usize,
    group_size: usize,
    input: TransportBuffer,
    output: TransportBuffer,
    uploaded: bool,
}

impl ComputeDispatcher {
    pub fn new(config: &RenderConfig, kernel_source: &str) -> Result<Self, RenderError> {
        let (width, height) = (config.width, config.height);
        let output_len = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .filter(|len| *len > 0)
            .ok_or(RenderError::InvalidDimensions { width, height })?;
        if config.group_size == 0 {
            return Err(RenderError::InvalidGroupSize);
        }
        if kernel_source.trim().is_empty() {
            return Err(RenderError::EmptyKernelSource(config.kernel_path.clone()));
        }

        let devices = enumerate_devices();
        let device = config.device.select(&devices)?.clone();
        info!(
            "using compute device {} with {} compute units",
            device.name, device.compute_units
        );
        let pool = device.create_pool()?;

        let program = KernelProgram::build(kernel_source)?;
        debug!(
            "built kernel {} with {:?}",
            program.entry_point(),
            program.params()
        );

        let input_len = max_payload_len(config.max_spheres)
            .ok_or(RenderError::BufferAllocation { len: usize::MAX })?;
        let input = TransportBuffer::with_capacity(input_len)?;
        let output = TransportBuffer::zeroed(output_len)?;
        debug!(
            "allocated transport buffers: input {} floats, output {} floats",
            input.capacity(),
            output.len()
        );

        Ok(ComputeDispatcher {
            device,
            pool,
            program,
            width,
            height,
            group_size: config.group_size,
            input,
            output,
            uploaded: false,
        })
    }

    pub fn device(&self) -> &ComputeDevice {
        &self.device
    }

    pub fn program(&self) -> &KernelProgram {
        &self.program
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn upload(&mut self, payload: &[f32]) -> Result<(), RenderError> {
        let scene = SceneBuffer::new(payload)?;
        if (scene.width(), scene.height()) != (self.width, self.height) {
            return Err(RenderError::LayoutMismatch {
                width: self.width,
                height: self.height,
                got_width: scene.width(),
                got_height: scene.height(),
            });
        }
        self.input.write(payload)?;
        self.uploaded = true;
        Ok(())
    }

    // Runs one work-item per pixel and blocks until all of them finish.
    pub fn dispatch(&mut self) -> Result<(), RenderError> {
        if !self.uploaded {
            return Err(RenderError::NothingUploaded);
        }
        let start = Instant::now();
        let ComputeDispatcher {
            pool,
            program,
            width,
            height,
            group_size,
            input,
            output,
            ..
        } = self;
        let (width, height, group_size) = (*width, *height, *group_size);
        let program = &*program;
        let scene = SceneBuffer::new(input.as_slice())?;
        let output = output.as_mut_slice();

        // each group owns a disjoint run of output slots
        pool.install(|| {
            output
                .par_chunks_mut(group_size * CHANNELS)
                .enumerate()
                .for_each(|(group, chunk)| {
                    for (i, pixel) in chunk.chunks_exact_mut(CHANNELS).enumerate() {
                        let slot = group * group_size + i;
                        let item = WorkItem::owning_slot(slot, width, height);
                        debug_assert_eq!(item.output_offset(width), slot * CHANNELS);
                        pixel.copy_from_slice(&program.run(&scene, item).as_array());
                    }
                });
        });
        debug!(
            "dispatched {} work-items in groups of {} in {:?}",
            width * height,
            group_size,
            start.elapsed()
        );
        Ok(())
    }

    // flat row-major RGB floats. valid until the next dispatch.
    pub fn output(&self) -> &[f32] {
        self.output.as_slice()
    }

    pub fn render_frame(&mut self, payload: &[f32]) -> Result<&[f32], RenderError> {
        self.upload(payload)?;
        self.dispatch()?;
        Ok(self.output())
    }
}
