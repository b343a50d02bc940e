// Debug Runtime - headless scripted driver for the snap teleport system
//
// Builds a small rapier scene with teleport pads around the player,
// feeds the controller a scripted thumbstick timeline at a fixed tick
// rate, and logs every teleport request. Useful for eyeballing the
// debounce cadence and the strafing/anchorless edge cases without a
// headset attached.

use std::cell::{Cell, RefCell};
use std::fs;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::Context;
use cgmath::{Deg, Point3, Quaternion, Rotation3, Vector2, point3, vec2};
use clap::Parser;
use rapier3d::prelude::*;
use tracing::info;

use snap_teleport::physics::surface_groups;
use snap_teleport::{
    HeadPose, InputAggregator, InputReader, PhysicsWorld, PoseSource, SnapTeleportConfig,
    SnapTeleportController, TeleportAnchor, TeleportError, TeleportLayers, TeleportWorld,
    TickOutcome, Time,
};

#[derive(Parser)]
#[command(name = "debug_runtime")]
#[command(about = "Headless scripted driver for the snap teleport system")]
struct Args {
    /// Number of simulation ticks to run
    #[arg(short, long, default_value = "360")]
    ticks: u32,

    /// Simulation tick rate in Hz
    #[arg(long, default_value = "60")]
    tick_rate: u32,

    /// Optional JSON config file overriding the built-in defaults
    #[arg(short, long)]
    config: Option<String>,

    /// Disable left & right strafing
    #[arg(long)]
    no_strafing: bool,
}

/// Thumbstick value owned by the script and polled by the controller.
struct ScriptedStick {
    label: &'static str,
    value: Rc<Cell<Vector2<f32>>>,
}

impl InputReader for ScriptedStick {
    fn enable(&mut self) -> Result<(), TeleportError> {
        info!("{} stick bound", self.label);
        Ok(())
    }

    fn disable(&mut self) {
        info!("{} stick released", self.label);
    }

    fn read(&self) -> Vector2<f32> {
        self.value.get()
    }
}

/// Player pose shared between the controller (reads) and the teleport
/// executor (writes on every granted request).
struct SharedPose(Rc<RefCell<HeadPose>>);

impl PoseSource for SharedPose {
    fn head_pose(&self) -> HeadPose {
        *self.0.borrow()
    }
}

struct TeleportRequest {
    pad: &'static str,
    destination: Point3<f32>,
}

/// Pad anchor that forwards granted requests to the main loop.
struct ChannelPad {
    name: &'static str,
    destination: Point3<f32>,
    requests: Sender<TeleportRequest>,
}

impl TeleportAnchor for ChannelPad {
    fn position(&self) -> Point3<f32> {
        self.destination
    }

    fn request_teleport(&self) {
        // The receiver outlives the scene; a send failure only means the
        // loop already ended.
        let _ = self.requests.send(TeleportRequest {
            pad: self.name,
            destination: self.destination,
        });
    }
}

const HEAD_HEIGHT: f32 = 1.6;

fn pad_collider(x: f32, z: f32) -> Collider {
    ColliderBuilder::cuboid(0.5, 2.0, 0.5)
        .translation(vector![x, HEAD_HEIGHT, z])
        .collision_groups(surface_groups(TeleportLayers::ANCHOR))
        .build()
}

/// Four walls around the origin: three carry teleport pads, the west
/// one is plain geometry so westward input probes without ever landing.
fn build_scene(requests: Sender<TeleportRequest>) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();

    let pads = [
        ("north-pad", 0.0, -6.0, point3(0.0, 0.0, -5.0)),
        ("south-pad", 0.0, 6.0, point3(0.0, 0.0, 5.0)),
        ("east-pad", 6.0, 0.0, point3(5.0, 0.0, 0.0)),
    ];
    for (name, x, z, destination) in pads {
        world.add_anchor(
            pad_collider(x, z),
            Box::new(ChannelPad {
                name,
                destination,
                requests: requests.clone(),
            }),
        );
    }

    world.add_surface(
        ColliderBuilder::cuboid(0.5, 2.0, 0.5)
            .translation(vector![-6.0, HEAD_HEIGHT, 0.0])
            .collision_groups(surface_groups(TeleportLayers::TERRAIN))
            .build(),
    );

    world.refresh();
    world
}

/// Scripted thumbstick timeline: forward, strafe east, rest, probe the
/// anchorless west wall, then backward home.
fn scripted_input(seconds: f32) -> Vector2<f32> {
    if seconds < 1.5 {
        vec2(0.0, 1.0)
    } else if seconds < 2.5 {
        vec2(1.0, 0.0)
    } else if seconds < 3.0 {
        vec2(0.0, 0.0)
    } else if seconds < 4.0 {
        vec2(-1.0, 0.0)
    } else {
        vec2(0.0, -1.0)
    }
}

fn load_config(args: &Args) -> anyhow::Result<SnapTeleportConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config file {}", path))?
        }
        None => SnapTeleportConfig::default(),
    };
    if args.no_strafing {
        config.strafing_enabled = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing with info level by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug_runtime=info,snap_teleport=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(
        "Starting debug runtime: {} ticks at {} Hz, window {:?}, strafing {}",
        args.ticks, args.tick_rate, config.debounce_window, config.strafing_enabled
    );

    let (request_tx, request_rx): (Sender<TeleportRequest>, Receiver<TeleportRequest>) =
        mpsc::channel();
    let world = Rc::new(build_scene(request_tx));

    let stick = Rc::new(Cell::new(vec2(0.0, 0.0)));
    let pose = Rc::new(RefCell::new(HeadPose {
        position: point3(0.0, HEAD_HEIGHT, 0.0),
        rotation: Quaternion::from_angle_y(Deg(0.0)),
    }));

    let aggregator = InputAggregator::new(
        Box::new(ScriptedStick {
            label: "left",
            value: stick.clone(),
        }),
        Box::new(ScriptedStick {
            label: "right",
            value: Rc::new(Cell::new(vec2(0.0, 0.0))),
        }),
    );

    let mut controller = SnapTeleportController::new(
        config,
        aggregator,
        Rc::new(SharedPose(pose.clone())),
        world.clone() as Rc<dyn TeleportWorld>,
    );
    controller.initialize()?;

    let dt = Duration::from_secs_f64(1.0 / args.tick_rate as f64);
    let mut teleports = 0u32;
    let mut probes = 0u32;

    for i in 0..args.ticks {
        let total = dt * i;
        let seconds = total.as_secs_f32();
        stick.set(scripted_input(seconds));

        let time = Time { elapsed: dt, total };
        match controller.tick(&time) {
            TickOutcome::Teleported { cardinal } => {
                info!(t = seconds, ?cardinal, "tick teleported");
            }
            TickOutcome::NoTarget { cardinal } => {
                probes += 1;
                tracing::debug!(t = seconds, ?cardinal, "probe found no destination");
            }
            TickOutcome::CoolingDown | TickOutcome::NoInput => {}
        }

        // Execute granted requests: move the player to the pad.
        while let Ok(request) = request_rx.try_recv() {
            teleports += 1;
            let mut head = pose.borrow_mut();
            head.position = request.destination + cgmath::vec3(0.0, HEAD_HEIGHT, 0.0);
            info!(
                t = seconds,
                pad = request.pad,
                "player moved to {:?}",
                head.position
            );
        }
    }

    controller.shutdown();
    info!(
        "Run complete: {} teleports executed, {} empty probes",
        teleports, probes
    );

    Ok(())
}
