//! Drawing the scene once per frame.

mod raycast;

pub use raycast::RaycastRenderer;

use image::RgbImage;

use crate::{camera::PerspectiveCamera, scene::SceneT};

/// Draws the scene as the camera sees it.
///
/// Infallible from the loop's point of view: a renderer that can fail reports
/// it on its own side.
pub trait Renderer: Send {
    fn render_frame(&mut self, scene: &dyn SceneT, camera: &PerspectiveCamera);

    /// Surface size changed
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Number of frames drawn so far
    fn frames(&self) -> u64;

    /// Last frame, for renderers that keep one in memory
    fn image(&self) -> Option<&RgbImage> {
        None
    }
}

/// Draws nothing, only counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer {
    frames: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for NullRenderer {
    fn render_frame(&mut self, _scene: &dyn SceneT, _camera: &PerspectiveCamera) {
        self.frames += 1;
    }

    fn frames(&self) -> u64 {
        self.frames
    }
}
