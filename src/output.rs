use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::info;

use crate::error::OutputError;
use crate::kernel::CHANNELS;

fn check_len(data: &[f32], width: usize, height: usize) -> Result<(), OutputError> {
    let expected = width * height * CHANNELS;
    if data.len() != expected {
        return Err(OutputError::SizeMismatch {
            len: data.len(),
            expected,
        });
    }
    Ok(())
}

// offset of the pixel shown at file coordinates (x, y), y counted from the top.
fn source_offset(x: usize, y: usize, width: usize, height: usize) -> usize {
    ((height - 1 - y) * width + x) * CHANNELS
}

fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0) as u8
}

pub fn write_png(path: &Path, data: &[f32], width: usize, height: usize) -> Result<(), OutputError> {
    check_len(data, width, height)?;
    let image = RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let at = source_offset(x as usize, y as usize, width, height);
        Rgb([to_byte(data[at]), to_byte(data[at + 1]), to_byte(data[at + 2])])
    });
    image.save(path)?;
    Ok(())
}

// raw floats, nothing clamped.
pub fn write_exr(path: &Path, data: &[f32], width: usize, height: usize) -> Result<(), OutputError> {
    check_len(data, width, height)?;
    exr::prelude::write_rgb_file(path, width, height, |x, y| {
        let at = source_offset(x, y, width, height);
        (data[at], data[at + 1], data[at + 2])
    })?;
    Ok(())
}

pub fn save_frame(
    dir: &Path,
    index: usize,
    data: &[f32],
    width: usize,
    height: usize,
) -> Result<(PathBuf, PathBuf), OutputError> {
    fs::create_dir_all(dir)?;
    let png = dir.join(format!("frame_{:04}.png", index));
    let exr = dir.join(format!("frame_{:04}.exr", index));
    write_png(&png, data, width, height)?;
    write_exr(&exr, data, width, height)?;
    info!("wrote {:?} and {:?}", png, exr);
    Ok((png, exr))
}

// packed 0RGB words in window order, for a preview surface.
pub fn to_argb(data: &[f32], width: usize, height: usize) -> Result<Vec<u32>, OutputError> {
    check_len(data, width, height)?;
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let at = source_offset(x, y, width, height);
            let [r, g, b] = [data[at], data[at + 1], data[at + 2]].map(to_byte);
            pixels.push(u32::from_be_bytes([0, r, g, b]));
        }
    }
    Ok(pixels)
}
