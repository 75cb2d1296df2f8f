use std::error::Error;
use std::path::PathBuf;
use std::process;

use log::{error, info};
use structopt::StructOpt;

use realtime_rt::output::save_frame;
use realtime_rt::parsing::load_json;
use realtime_rt::{FramePipeline, RenderConfig, SceneData};

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    #[structopt(long, default_value = "data/config.json")]
    pub config: PathBuf,
    #[structopt(long, help = "scene json, the built-in demo scene when unset")]
    pub scene: Option<PathBuf>,
    #[structopt(short = "n", long)]
    pub frames: Option<usize>,
    #[structopt(long)]
    pub output_dir: Option<PathBuf>,
    #[structopt(long, help = "only write the last frame")]
    pub last_only: bool,
    #[structopt(long, help = "open a live window, needs the `preview` feature")]
    pub preview: bool,
}

fn load_config(opt: &Opt) -> Result<RenderConfig, Box<dyn Error>> {
    let mut config = RenderConfig::load(&opt.config)?;
    if let Some(scene) = &opt.scene {
        config.scene_path = Some(scene.clone());
    }
    if let Some(frames) = opt.frames {
        config.frames = frames;
    }
    if let Some(dir) = &opt.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    let config = load_config(&opt)?;
    let scene = match &config.scene_path {
        Some(path) => load_json::<SceneData>(path)?,
        None => SceneData::default_scene(),
    };
    let mut pipeline = FramePipeline::from_config(&config, scene.into_registry()?)?;
    info!(
        "rendering {} frames at {}x{} on {}",
        config.frames,
        config.width,
        config.height,
        pipeline.dispatcher().device().name
    );

    if opt.preview {
        return preview::run(&mut pipeline, &config);
    }

    let mut pb = pbr::ProgressBar::new(config.frames as u64);
    for index in 0..config.frames {
        let frame = pipeline.step()?;
        if !opt.last_only || index + 1 == config.frames {
            save_frame(&config.output_dir, index, frame, config.width, config.height)?;
        }
        pb.inc();
    }
    pb.finish_print("done");
    Ok(())
}

#[cfg(feature = "preview")]
mod preview {
    use std::error::Error;

    use minifb::{Key, Window, WindowOptions};

    use realtime_rt::output::to_argb;
    use realtime_rt::{FramePipeline, RenderConfig};

    pub fn run(pipeline: &mut FramePipeline, config: &RenderConfig) -> Result<(), Box<dyn Error>> {
        let mut window = Window::new(
            "realtime_rt",
            config.width,
            config.height,
            WindowOptions::default(),
        )?;
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        while window.is_open() && !window.is_key_down(Key::Escape) {
            let pixels = to_argb(pipeline.step()?, config.width, config.height)?;
            window.update_with_buffer(&pixels, config.width, config.height)?;
        }
        Ok(())
    }
}

#[cfg(not(feature = "preview"))]
mod preview {
    use std::error::Error;

    use realtime_rt::{FramePipeline, RenderConfig};

    pub fn run(_: &mut FramePipeline, _: &RenderConfig) -> Result<(), Box<dyn Error>> {
        Err("built without the `preview` feature".into())
    }
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();
    if let Err(e) = run(opt) {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
