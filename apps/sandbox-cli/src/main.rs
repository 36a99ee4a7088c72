use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glam::Vec3;
use sandbox_common::ShapeKind;
use sandbox_physics::{PhysicsWorld, SceneConfig};
use sandbox_render::{DebugTextRenderer, RenderView, Renderer, extract_draw_list};
use sandbox_tools::{BodyInfo, SceneInspector, SceneSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sandbox-cli", about = "Headless rigid-body sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default scene parameters
    Info,
    /// Run the default scene headless and print the final frame
    Simulate {
        /// Number of fixed steps to run
        #[arg(short, long, default_value = "120")]
        steps: u64,
        /// Scene config file (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print a JSON report instead of the text frame
        #[arg(long)]
        json: bool,
    },
    /// Grab the body under the screen center, drag it upward, and report
    Pick {
        /// Steps to hold the body before releasing
        #[arg(short, long, default_value = "60")]
        steps: u64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print a scene config as YAML (the defaults unless --config is given)
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Report {
    summary: SceneSummary,
    bodies: Vec<BodyInfo>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = SceneConfig::default();
            println!("sandbox-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "scene: {} boxes, {} spheres, gravity={:?}, timestep={:.4}s",
                config.initial_boxes, config.initial_spheres, config.gravity, config.timestep
            );
            println!(
                "shapes: {} half-extent={}, {} radius={}",
                ShapeKind::Box.label(),
                config.box_half_extent,
                ShapeKind::Sphere.label(),
                config.sphere_radius
            );
        }
        Commands::Simulate {
            steps,
            config,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let mut world = PhysicsWorld::with_scene(config);
            for _ in 0..steps {
                world.step();
            }
            tracing::info!("simulated {} steps", world.tick());

            if json {
                let report = Report {
                    summary: SceneInspector::summary(&world),
                    bodies: SceneInspector::list_bodies(&world),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let draws = extract_draw_list(&world);
                print!("{}", DebugTextRenderer::new().render(&draws, &RenderView::default()));
                println!("{}", SceneInspector::summary(&world));
            }
        }
        Commands::Pick { steps, config } => {
            let config = load_config(config.as_deref())?;
            let mut world = PhysicsWorld::new(config);
            let eye = RenderView::default().eye;
            let target = Vec3::new(0.0, 5.0, 0.0);
            let id = world.spawn(ShapeKind::Box, target);

            let Some(picked) = world.pick(eye, (target - eye).normalize()) else {
                anyhow::bail!("ray from {eye} missed body {id}");
            };
            let lift = (target + Vec3::Y * 4.0 - eye).normalize();
            world.drag_to(eye, lift);
            for _ in 0..steps {
                world.step();
            }
            if let Some(info) = SceneInspector::inspect_body(&world, picked) {
                println!("held:     {info}");
            }
            world.release();
            println!("{}", SceneInspector::summary(&world));
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}
