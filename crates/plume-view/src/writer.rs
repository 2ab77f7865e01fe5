use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::debug;

use crate::{Frame, ViewError};

/// Writes numbered PNG frames into a directory.
pub struct FrameWriter {
    /// The directory the frames are written into.
    path: PathBuf,
    num_frames: u64,
    current_frame: u64,
}

impl FrameWriter {
    /// Creates the output directory. `num_frames` only sets the zero padding of file names.
    pub fn new(path: PathBuf, num_frames: u64) -> Result<FrameWriter, ViewError> {
        std::fs::create_dir_all(&path)?;

        Ok(Self {
            path,
            num_frames: num_frames.max(1),
            current_frame: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> u64 {
        self.current_frame
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        let max_digits = (self.num_frames - 1).checked_ilog10().unwrap_or(0) + 1;
        let digits = frame.checked_ilog10().unwrap_or(0) + 1;
        let zeros = max_digits.saturating_sub(digits);

        self.path.join(format!("{}{frame}.png", "0".repeat(zeros as usize)))
    }

    /// Writes the next frame, flipped so the bottom of the domain is at the bottom of the image.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<PathBuf, ViewError> {
        let (width, height) = (frame.width(), frame.height());
        let mut raw = Vec::with_capacity(width * height * 4);

        for y in (0..height).rev() {
            for x in 0..width {
                raw.extend_from_slice(&frame.pixel(x, y));
            }
        }

        let image = RgbaImage::from_raw(width as u32, height as u32, raw)
            .ok_or(ViewError::FrameSize { width, height })?;

        let path = self.frame_path(self.current_frame);
        image.save(&path)?;
        debug!("wrote frame {} to {}", self.current_frame, path.display());

        self.current_frame += 1;

        Ok(path)
    }
}
