//! CPU rendering of a [`MacGrid2D`](plume_fluids::MacGrid2D) into RGBA frames.

use thiserror::Error;

pub mod frame;
pub mod mode;
pub mod overlay;
pub mod palette;
pub mod writer;

pub use frame::Frame;
pub use mode::DrawMode;
pub use overlay::{overlay_segments, Overlay, Segment};
pub use palette::Palette;
pub use writer::FrameWriter;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("unknown draw mode `{0}`")]
    UnknownDrawMode(String),
    #[error("unknown overlay `{0}`")]
    UnknownOverlay(String),
    #[error("frame of {width}x{height} pixels does not match its buffer")]
    FrameSize {
        width: usize,
        height: usize,
    },
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
