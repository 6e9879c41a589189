//! Runtime constants of the loop and of the tutorial scenes.

/// Frames per second the driver paces itself to when running in real time
pub const TARGET_FPS: f64 = 60.0;

/// Interval between two frame statistics reports, in seconds
pub const STATS_PRINT_INTERVAL: f64 = 2.0;

/// Number of frame timings kept for averaging
pub const FRAME_TIMING_SAMPLES: usize = 60;

/// Names of the parameters shared by the tutorial scenes
pub mod params {
    pub const BOUNCE_SPEED: &str = "bounceSpeed";
    pub const SPHERE_COLOR: &str = "sphereColor";
    pub const WIREFRAME: &str = "wireframe";
    pub const ANGLE: &str = "angle";
    pub const PENUMBRA: &str = "penumbra";
    pub const INTENSITY: &str = "intensity";

    /// Range of the bounce speed slider
    pub const BOUNCE_SPEED_RANGE: (f32, f32) = (0.0, 0.2);
}

/// Orbit camera settings
pub mod orbit {
    /// Rotation per dragged pixel, in radians
    pub const ROTATION_SPEED: f32 = 0.005;

    /// Distance change per scroll unit
    pub const ZOOM_SPEED: f32 = 0.5;

    pub const MIN_DISTANCE: f32 = 2.0;
    pub const MAX_DISTANCE: f32 = 500.0;

    /// Pitch limits (radians), short of the poles to prevent flipping
    pub const MAX_PITCH: f32 = 1.5;
    pub const MIN_PITCH: f32 = -1.5;
}
