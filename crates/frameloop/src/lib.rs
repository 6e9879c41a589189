//! Interactive pick-and-highlight animation loop.
//!
//! Each frame the [frame::FrameLoop] advances procedural motion, casts a ray
//! from the camera through the pointer, applies hover rules to the objects it
//! hits, copies live-tunable parameters onto their targets and asks a
//! [renderer::Renderer] to draw the scene.
//!
//! Everything the loop touches is threaded explicitly through a
//! [frame::FrameContext]; there is no global state.

pub mod camera;
pub mod color;
pub mod config;
pub mod driver;
pub mod frame;
pub mod input;
pub mod light;
pub mod material;
pub mod math;
pub mod motion;
pub mod picking;
pub mod pointer;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod shape;
pub mod utils;
