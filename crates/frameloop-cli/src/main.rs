mod utils;

use std::{ops::ControlFlow, path::PathBuf, thread, time::Duration};

use anyhow::Result;
use clap::Parser;
use frameloop::{
    config::defaults::TARGET_FPS,
    driver::{AnimationLoop, Clock, FixedStepClock, SystemClock},
    frame::{FrameContext, FrameLoop, FrameReport},
    input::{InputEvent, InputSender},
    pointer::Viewport,
    renderer::{NullRenderer, RaycastRenderer, Renderer},
    scene::{ObjectId, Scene, SceneT},
    utils::{counter::report_counters, timer::timed_scope_log},
};
use utils::{AvailableScene, Dimensions, ParamOverride, ScreenPoint, Sweep};

/// Sweep length when the frame count is unlimited
const SWEEP_STEPS: u64 = 120;

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, value_enum, default_value_t)]
    /// Scene selector
    scene: AvailableScene,

    #[arg(long, default_value_t = 300)]
    /// Number of frames to run, 0 to run until interrupted
    frames: u64,

    #[arg(short, long, default_value = "800x600")]
    /// Screen dimension in format `width`x`height`
    dimensions: Dimensions,

    #[arg(long)]
    /// Pointer position in pixels from the top left corner, in format `x`,`y`
    pointer: Option<ScreenPoint>,

    #[arg(long)]
    /// Sweep the pointer across the screen diagonal, one position per frame
    sweep: bool,

    #[arg(long = "set")]
    /// Parameter override in format `name`=`value`, can be repeated
    overrides: Vec<ParamOverride>,

    #[arg(long)]
    /// Restore the color of highlighted objects once the pointer leaves them
    non_sticky: bool,

    #[arg(long)]
    /// Pace frames in real time instead of running as fast as possible
    realtime: bool,

    #[arg(long)]
    /// Frame rate, for pacing and for the simulated clock
    fps: Option<f64>,

    #[arg(short, long)]
    /// Directory receiving PNG snapshots of the rendered frames
    output_dir: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    /// Save one frame every N, 0 to only save the last one
    snapshot_every: u64,
}

impl Args {
    fn fps(&self) -> f64 {
        self.fps.filter(|fps| *fps > 0.0).unwrap_or(TARGET_FPS)
    }
}

fn pointer_move(ScreenPoint { x, y }: ScreenPoint) -> InputEvent {
    InputEvent::PointerMove { x, y }
}

/// Moves the pointer along the sweep from another thread, one position per frame period.
/// Only used when frames are paced in real time.
fn spawn_sweep(input: InputSender, sweep: Sweep, fps: f64) -> thread::JoinHandle<()> {
    let period = Duration::from_secs_f64(1.0 / fps);
    thread::spawn(move || {
        for i in 0..sweep.steps {
            if !input.send(pointer_move(sweep.point(i))) {
                log::debug!("frame loop gone, sweep stops");
                return;
            }
            thread::sleep(period);
        }
    })
}

fn object_names(frame_loop: &FrameLoop, ids: &[ObjectId]) -> Vec<String> {
    ids.iter()
        .map(|&id| {
            frame_loop
                .context
                .scene
                .object(id)
                .and_then(|object| object.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
        .collect()
}

struct Snapshots {
    dir: PathBuf,
    every: u64,
}

impl Snapshots {
    fn save(&self, frame_loop: &FrameLoop, frame: u64) -> Result<()> {
        let Some(image) = frame_loop.context.renderer.image() else {
            return Ok(());
        };
        let path = self.dir.join(format!("frame_{frame:05}.png"));
        log::debug!("saving {}", path.display());
        image.save(&path)?;
        Ok(())
    }
}

fn drive<C: Clock>(
    args: &Args,
    frame_loop: &mut FrameLoop,
    clock: &mut C,
    snapshots: Option<&Snapshots>,
    stepped_sweep: Option<Sweep>,
) -> Result<()> {
    let mut animation = AnimationLoop::new();
    if args.realtime {
        animation = animation.realtime(Some(args.fps()));
    }
    if args.frames > 0 {
        animation = animation.with_max_frames(args.frames);
    }

    let mut last_picked = Vec::new();
    let mut last_report: Option<FrameReport> = None;
    let mut failure = None;

    if let Some(sweep) = stepped_sweep {
        frame_loop.input().send(pointer_move(sweep.point(0)));
    }
    animation.run(frame_loop, clock, |report, frame_loop| {
        if report.picked != last_picked {
            log::info!(
                "frame {}: pointer over {:?}",
                report.frame,
                object_names(frame_loop, &report.picked)
            );
            last_picked = report.picked.clone();
        }

        if let Some(snapshots) = snapshots {
            if snapshots.every > 0 && report.frame % snapshots.every == 0 {
                if let Err(e) = snapshots.save(frame_loop, report.frame) {
                    failure = Some(e);
                    return ControlFlow::Break(());
                }
            }
        }
        // the next frame drains the next position
        if let Some(sweep) = stepped_sweep {
            frame_loop.input().send(pointer_move(sweep.point(report.frame + 1)));
        }
        last_report = Some(report.clone());
        ControlFlow::Continue(())
    });

    if let Some(e) = failure {
        return Err(e);
    }

    if let (Some(snapshots), Some(report)) = (snapshots, &last_report) {
        if snapshots.every == 0 || report.frame % snapshots.every != 0 {
            snapshots.save(frame_loop, report.frame)?;
        }
    }
    if let Some(report) = last_report {
        log::info!(
            "last frame {} at {:.1}ms, {} bindings applied, highlighted {:?}",
            report.frame,
            report.t,
            report.applied_bindings,
            object_names(frame_loop, &report.highlighted)
        );
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let Dimensions { width, height } = args.dimensions;

    log::info!("loading scene {:?}", args.scene);
    let mut scene = Scene::new();
    let setup = args.scene.insert_into(&mut scene);
    log::info!(
        "{} objects, {} lights, parameters: {:?}",
        scene.len(),
        scene.lights().count(),
        setup.tunables.names().collect::<Vec<_>>()
    );

    let snapshots = match &args.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            Some(Snapshots {
                dir: dir.clone(),
                every: args.snapshot_every,
            })
        }
        None => None,
    };
    let renderer: Box<dyn Renderer> = if snapshots.is_some() {
        Box::new(RaycastRenderer::new(width, height))
    } else {
        Box::new(NullRenderer::new())
    };

    let context = FrameContext::new(
        scene,
        setup,
        renderer,
        Viewport::new(width, height),
        !args.non_sticky,
    );
    let mut frame_loop = FrameLoop::new(context);

    let input = frame_loop.input();
    for ParamOverride { name, value } in &args.overrides {
        input.send(InputEvent::set_param_text(name, value));
    }
    if let Some(point) = args.pointer {
        input.send(pointer_move(point));
    }
    let sweep = args.sweep.then(|| {
        let steps = if args.frames > 0 { args.frames } else { SWEEP_STEPS };
        Sweep::new(args.dimensions, steps)
    });
    let sweep_thread = sweep
        .filter(|_| args.realtime)
        .map(|sweep| spawn_sweep(input.clone(), sweep, args.fps()));

    let result = timed_scope_log("animation", || {
        if args.realtime {
            drive(&args, &mut frame_loop, &mut SystemClock::new(), snapshots.as_ref(), None)
        } else {
            let mut clock = FixedStepClock::at_fps(args.fps());
            drive(&args, &mut frame_loop, &mut clock, snapshots.as_ref(), sweep)
        }
    });

    drop(frame_loop);
    if let Some(sweep_thread) = sweep_thread {
        sweep_thread
            .join()
            .map_err(|_| anyhow::anyhow!("pointer sweep thread panicked"))?;
    }

    report_counters();
    result.res
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    run(args).map_err(|e| {
        log::error!("{e:#}");
        e
    })
}
