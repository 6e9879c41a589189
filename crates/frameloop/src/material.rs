use crate::color::{self, Color};

/// Opaque reference to an image handed out by the asset loader.
///
/// The loop never looks inside; it only travels with the material.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub String);

/// How an object is shaded.
///
/// `Basic` ignores lights, `Standard` is lit by the scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    Basic,
    #[default]
    Standard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub wireframe: bool,
    pub shading: Shading,
    pub map: Option<TextureHandle>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: color::WHITE,
            wireframe: false,
            shading: Shading::Standard,
            map: None,
        }
    }
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            shading: Shading::Basic,
            ..Default::default()
        }
    }

    pub fn standard(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_map(self, texture: impl Into<String>) -> Self {
        Self {
            map: Some(TextureHandle(texture.into())),
            ..self
        }
    }

    pub fn with_wireframe(self, wireframe: bool) -> Self {
        Self { wireframe, ..self }
    }
}
