//! Runs a [FrameLoop] once per frame until told to stop.

use std::{
    collections::VecDeque,
    ops::ControlFlow,
    thread,
    time::{Duration, Instant},
};

use crate::{
    config::defaults::{FRAME_TIMING_SAMPLES, STATS_PRINT_INTERVAL, TARGET_FPS},
    frame::{FrameLoop, FrameReport},
    scene::SceneT,
    utils::timer::format_elapsed,
};

/// Source of frame timestamps, in milliseconds
pub trait Clock {
    fn now_ms(&mut self) -> f64;
}

/// Milliseconds since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock: 0, step, 2 * step, ...
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    next: f64,
    pub step: f64,
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self { next: 0.0, step }
    }

    /// One step per frame at `fps`
    pub fn at_fps(fps: f64) -> Self {
        Self::new(1000.0 / fps)
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&mut self) -> f64 {
        let t = self.next;
        self.next += self.step;
        t
    }
}

/// Rolling window of frame durations
#[derive(Debug, Default)]
pub struct FrameTimings {
    samples: VecDeque<Duration>,
}

impl FrameTimings {
    pub fn push(&mut self, elapsed: Duration) {
        self.samples.push_back(elapsed);
        if self.samples.len() > FRAME_TIMING_SAMPLES {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average(&self) -> Option<Duration> {
        let n = self.samples.len() as u32;
        (n > 0).then(|| self.samples.iter().sum::<Duration>() / n)
    }

    pub fn min(&self) -> Option<Duration> {
        self.samples.iter().min().copied()
    }

    pub fn max(&self) -> Option<Duration> {
        self.samples.iter().max().copied()
    }

    /// Frames per second matching the average frame time
    pub fn fps(&self) -> Option<f64> {
        self.average()
            .filter(|avg| !avg.is_zero())
            .map(|avg| 1.0 / avg.as_secs_f64())
    }
}

pub struct AnimationLoop {
    /// Frames per second to pace to, None to run as fast as possible
    pub target_fps: Option<f64>,
    /// Stop after that many frames
    pub max_frames: Option<u64>,
    pub timings: FrameTimings,
    last_stats: Option<Instant>,
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self {
            target_fps: None,
            max_frames: None,
            timings: FrameTimings::default(),
            last_stats: None,
        }
    }
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pace to `fps`, or to the default rate when None
    pub fn realtime(self, fps: Option<f64>) -> Self {
        Self {
            target_fps: Some(fps.unwrap_or(TARGET_FPS)),
            ..self
        }
    }

    pub fn with_max_frames(self, max_frames: u64) -> Self {
        Self {
            max_frames: Some(max_frames),
            ..self
        }
    }

    fn frame_budget(&self) -> Option<Duration> {
        self.target_fps
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps))
    }

    /// Tick `frame_loop` with timestamps from `clock` until `max_frames` is
    /// reached or `on_frame` breaks. Returns the number of frames run.
    pub fn run<S, C, F>(&mut self, frame_loop: &mut FrameLoop<S>, clock: &mut C, mut on_frame: F) -> u64
    where
        S: SceneT,
        C: Clock,
        F: FnMut(&FrameReport, &FrameLoop<S>) -> ControlFlow<()>,
    {
        let budget = self.frame_budget();
        let mut frames = 0;
        log::info!(
            "animation loop started ({})",
            match self.target_fps {
                Some(fps) => format!("{fps} fps"),
                None => "unpaced".to_owned(),
            }
        );

        while self.max_frames.map_or(true, |max| frames < max) {
            let frame_start = Instant::now();
            let report = frame_loop.tick(clock.now_ms());
            frames += 1;
            let flow = on_frame(&report, frame_loop);

            let elapsed = frame_start.elapsed();
            self.timings.push(elapsed);
            crate::time_counter!("frame time", elapsed);
            self.print_stats(frame_loop.frames());

            if flow.is_break() {
                log::debug!("animation loop stopped by caller");
                break;
            }
            if let Some(budget) = budget {
                if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }

        log::info!("animation loop ended after {frames} frames");
        frames
    }

    fn print_stats(&mut self, frame: u64) {
        let now = Instant::now();
        let due = self
            .last_stats
            .map_or(true, |last| now.duration_since(last).as_secs_f64() >= STATS_PRINT_INTERVAL);
        if !due {
            return;
        }
        self.last_stats = Some(now);

        let (Some(avg), Some(min), Some(max), Some(fps)) = (
            self.timings.average(),
            self.timings.min(),
            self.timings.max(),
            self.timings.fps(),
        ) else {
            return;
        };
        log::info!(
            target: "frame_stats",
            "frame {frame} | avg {} (min {}, max {}) | {fps:.1} fps",
            format_elapsed(avg),
            format_elapsed(min),
            format_elapsed(max),
        );
    }
}
