use image::Rgb;

use crate::math::Vec3;

pub type Color = Rgb<f32>;

pub const WHITE: Color = Rgb([1.0, 1.0, 1.0]);
pub const BLACK: Color = Rgb([0.0, 0.0, 0.0]);
pub const RED: Color = Rgb([1.0, 0.0, 0.0]);
pub const GREEN: Color = Rgb([0.0, 1.0, 0.0]);
pub const BLUE: Color = Rgb([0.0, 0.0, 1.0]);

/// Build a color from a `0xRRGGBB` literal
pub fn from_hex(hex: u32) -> Color {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Rgb([channel(16), channel(8), channel(0)])
}

pub trait ColorExt {
    fn vec(&self) -> Vec3;
    fn clamp_channels(&self, min: f32, max: f32) -> Color;
    fn to_rgb8(&self) -> Rgb<u8>;
}

impl ColorExt for Color {
    fn vec(&self) -> Vec3 {
        Vec3::from_array(self.0)
    }

    fn clamp_channels(&self, min: f32, max: f32) -> Color {
        Rgb(self.0.map(|c| if c.is_nan() { min } else { c.clamp(min, max) }))
    }

    fn to_rgb8(&self) -> Rgb<u8> {
        Rgb(self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
    }
}

pub trait Vec3AsColorExt {
    fn color(&self) -> Color;
}

impl Vec3AsColorExt for Vec3 {
    fn color(&self) -> Color {
        Rgb(self.to_array())
    }
}
