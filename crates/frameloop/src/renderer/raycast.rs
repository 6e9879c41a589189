use glam::Vec3;
use image::{ImageBuffer, RgbImage};
use rayon::prelude::*;

use super::Renderer;
use crate::{
    camera::PerspectiveCamera,
    color::{self, Color, ColorExt, Vec3AsColorExt},
    material::Shading,
    picking::Raycaster,
    pointer::{Ndc, Viewport},
    scene::SceneT,
};

/// Headless renderer casting one ray per pixel.
///
/// `Basic` and wireframe materials are drawn flat, `Standard` ones are lit with
/// a Lambert term from every scene light.
pub struct RaycastRenderer {
    image: RgbImage,
    pub background: Color,
    frames: u64,
}

impl RaycastRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::new(width, height),
            background: color::BLACK,
            frames: 0,
        }
    }

    pub fn with_background(self, background: Color) -> Self {
        Self { background, ..self }
    }

    fn shade(scene: &dyn SceneT, camera: &PerspectiveCamera, ndc: Ndc, background: Color) -> Color {
        let raycaster = Raycaster::from_camera(camera, ndc);
        let Some(hit) = raycaster.closest(scene) else {
            return background;
        };
        let Some(object) = scene.object(hit.object) else {
            return background;
        };
        let material = &object.material;
        if material.wireframe || material.shading == Shading::Basic {
            return material.color;
        }

        // Double sided: light the face turned towards the viewer
        let normal = if hit.normal.dot(raycaster.ray.direction) > 0.0 {
            -hit.normal
        } else {
            hit.normal
        };
        let irradiance: Vec3 = scene
            .lights()
            .map(|(_, light)| light.irradiance(hit.point, normal))
            .fold(Vec3::ZERO, |acc, x| acc + x);
        (material.color.vec() * irradiance).color().clamp_channels(0.0, 1.0)
    }
}

impl Renderer for RaycastRenderer {
    fn render_frame(&mut self, scene: &dyn SceneT, camera: &PerspectiveCamera) {
        let (width, height) = self.image.dimensions();
        let viewport = Viewport::new(width, height);
        let mut camera = *camera;
        camera.set_viewport(viewport);
        let background = self.background;

        self.image
            .enumerate_pixels_mut()
            .par_bridge()
            .for_each(|(x, y, p)| {
                // pixels in the image crate are from left to right, top to bottom
                let ndc = Ndc::from_screen(x as f32 + 0.5, y as f32 + 0.5, viewport);
                *p = Self::shade(scene, &camera, ndc, background).to_rgb8();
            });

        self.frames += 1;
        crate::counter!("frames rendered");
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            log::debug!("renderer resized to {width}x{height}");
            self.image = ImageBuffer::new(width, height);
        }
    }

    fn frames(&self) -> u64 {
        self.frames
    }

    fn image(&self) -> Option<&RgbImage> {
        Some(&self.image)
    }
}
