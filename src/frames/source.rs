use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use super::mapper::FrameId;

/// A frame file exists but could not be turned into an image.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("reading frame '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding frame '{}'", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Resolves frame identifiers to decoded frames.
pub trait FrameSource {
    type Frame;

    /// Load the frame for `id`. `Ok(None)` means no resource backs `id`.
    fn load(&mut self, id: FrameId) -> Result<Option<Self::Frame>, FrameError>;
}

/// Frames stored as `{id}.{extension}` files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryFrames {
    dir: PathBuf,
    extension: String,
}

impl DirectoryFrames {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the frame for `id` would live at.
    pub fn path_for(&self, id: FrameId) -> PathBuf {
        self.dir.join(format!("{id}.{}", self.extension))
    }
}

impl FrameSource for DirectoryFrames {
    type Frame = RgbaImage;

    fn load(&mut self, id: FrameId) -> Result<Option<RgbaImage>, FrameError> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|source| FrameError::Io {
            path: path.clone(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|source| FrameError::Decode { path, source })?;
        Ok(Some(decoded.to_rgba8()))
    }
}
