/// Frame layer: energy → diffraction image.
///
/// ```text
///   energy (f64)
///        │
///        ▼
///   ┌──────────┐
///   │  mapper   │  quantize → FrameId
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐      ┌──────────┐
///   │ controller │ ───▶ │  source   │  {id}.jpg → RgbaImage
///   └────────────┘      └──────────┘
///        │
///        ▼
///   DisplayState (held frame, missing flag)
/// ```

pub mod controller;
pub mod mapper;
pub mod source;

pub use controller::{DisplayState, FrameController, MissingFramePolicy};
pub use mapper::FrameId;
pub use source::DirectoryFrames;
