use glam::Vec2;

use crate::math::float::FloatExt;

/// Size of the drawing surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// A position in normalized device coordinates.
///
/// The visible area maps to $\left[-1, 1\right]$ on both axes, $(-1, -1)$ being
/// the bottom left corner. Values outside that range are allowed and
/// describe points beyond the edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ndc(pub Vec2);

impl Ndc {
    pub const CENTER: Ndc = Ndc(Vec2::ZERO);

    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Convert a screen position (origin top left, y down) to NDC.
    ///
    /// A viewport with a zero dimension maps to the center on that axis.
    pub fn from_screen(x: f32, y: f32, viewport: Viewport) -> Self {
        let nx = if viewport.width > 0.0 {
            2.0 * x / viewport.width - 1.0
        } else {
            0.0
        };
        let ny = if viewport.height > 0.0 {
            1.0 - 2.0 * y / viewport.height
        } else {
            0.0
        };
        Self::new(nx, ny).sanitized()
    }

    /// Replace non finite coordinates by 0
    pub fn sanitized(self) -> Self {
        Self::new(self.0.x.finite_or(0.0), self.0.y.finite_or(0.0))
    }
}

/// Last known pointer position.
///
/// Written by the input side, read once per frame. Last write wins.
/// Starts at the center of the view, where picking happens until the first move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub ndc: Ndc,
}

impl PointerState {
    pub fn from_screen(x: f32, y: f32, viewport: Viewport) -> Self {
        Self {
            ndc: Ndc::from_screen(x, y, viewport),
        }
    }

    pub fn at(ndc: Ndc) -> Self {
        Self {
            ndc: ndc.sanitized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners() {
        let viewport = Viewport::new(800, 600);
        assert_eq!(Ndc::from_screen(0.0, 0.0, viewport), Ndc::new(-1.0, 1.0));
        assert_eq!(Ndc::from_screen(800.0, 600.0, viewport), Ndc::new(1.0, -1.0));
        assert_eq!(Ndc::from_screen(400.0, 300.0, viewport), Ndc::CENTER);
    }

    #[test]
    fn outside_viewport_extrapolates() {
        let viewport = Viewport::new(100, 100);
        let ndc = Ndc::from_screen(150.0, -50.0, viewport);
        assert_eq!(ndc, Ndc::new(2.0, 2.0));
    }

    #[test]
    fn degenerate_inputs() {
        let empty = Viewport::new(0, 0);
        assert_eq!(Ndc::from_screen(10.0, 10.0, empty), Ndc::CENTER);
        assert_eq!(empty.aspect(), 1.0);

        let ndc = Ndc::new(f32::NAN, f32::INFINITY).sanitized();
        assert_eq!(ndc, Ndc::CENTER);
        assert_eq!(PointerState::at(Ndc::new(f32::NAN, 0.5)).ndc, Ndc::new(0.0, 0.5));
    }
}
