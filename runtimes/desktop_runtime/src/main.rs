mod emulated_session;

use std::{thread, time::Duration, time::Instant};

use anyhow::{ensure, Result};
use clap::Parser;
use spiral_vr::{profile, SceneOptions, SpiralScene};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use emulated_session::EmulatedControllers;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to run, 0 runs until interrupted
    #[arg(short, long, default_value_t = 720)]
    frames: u64,

    /// Target frame rate of the emulated display, at least 1
    #[arg(long, default_value_t = 72.0)]
    fps: f32,

    /// Initial spiral speed
    #[arg(short, long, default_value_t = 1.0)]
    speed: f32,

    /// Initial ornament scale
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    #[arg(long)]
    wireframe: bool,

    /// Run without an immersive session (only the spiral animates)
    #[arg(long = "no-session")]
    no_session: bool,

    /// Don't sleep between frames
    #[arg(long)]
    unpaced: bool,
}

/// Wall-clock budget of one frame at `fps`. Rates below one frame per second are rejected.
fn frame_duration(fps: f32) -> Result<Duration> {
    ensure!(
        fps.is_finite() && fps >= 1.0,
        "fps must be a finite value of at least 1, got {}",
        fps
    );
    Ok(Duration::try_from_secs_f32(1.0 / fps)?)
}

pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let frame_duration = frame_duration(args.fps)?;

    let options = SceneOptions {
        speed: args.speed,
        scale: args.scale,
        wireframe: args.wireframe,
        ..SceneOptions::default()
    };
    let mut scene = SpiralScene::new(options);
    // Route initial values through the panel so they get its clamping
    scene.set_speed(args.speed);
    scene.set_scale(args.scale);

    let mut controllers = EmulatedControllers::new();
    let report_every = args.fps.round().max(1.0) as u64;

    info!("running {:?}", args);

    let mut frame: u64 = 0;
    while args.frames == 0 || frame < args.frames {
        let frame_start = Instant::now();

        let (session, events) = controllers.step();
        let session = if args.no_session { None } else { Some(session) };

        profile!("scene.frame", scene.frame(session.as_ref()));

        // Press/release events land after the frame pass, the way a host delivers them
        // between animation callbacks
        if session.is_some() {
            for event in events {
                if let Some(handler) = scene.handle_event(event) {
                    debug!("event {:?} -> {:?}", event, handler);
                }
            }
        }

        frame += 1;
        if frame % report_every == 0 {
            let snapshot = scene.snapshot();
            info!(
                "frame {}: ornament pos {:?} scale {:?} color {:?}, indicators {:?}",
                frame,
                snapshot.ornament_position,
                snapshot.ornament_scale,
                snapshot.ornament_color,
                snapshot.indicator_colors
            );
        }

        if !args.unpaced {
            let spent = frame_start.elapsed();
            if spent < frame_duration {
                thread::sleep(frame_duration - spent);
            }
        }
    }

    let time = scene.time();
    info!(
        "finished {} frames in {:.2}s of simulated time",
        scene.frame_count(),
        time.total.as_secs_f32()
    );
    Ok(())
}
