mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cratecam_input::{Viewer, ViewerConfig};
use glam::{Mat4, Vec3};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cratecam-cli", about = "Headless driver for the crate viewer camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Viewer configuration file (JSON). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default configuration
    Info,
    /// Print the view-projection matrix of the configured camera
    Matrix,
    /// Aim the camera at a point and print the resulting orientation
    LookAt {
        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        #[arg(long, allow_hyphen_values = true)]
        y: f32,
        #[arg(long, allow_hyphen_values = true)]
        z: f32,
    },
    /// Replay scripted input, e.g. "forward:0.5,look:40:-20,zoom:2"
    Simulate {
        /// Comma separated steps
        #[arg(short, long, allow_hyphen_values = true)]
        script: String,
        /// Frame delta in seconds
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Print the final camera as JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },
}

fn print_matrix(label: &str, m: Mat4) {
    println!("{label}:");
    for r in 0..4 {
        let row = m.row(r);
        println!(
            "  [{:>10.5} {:>10.5} {:>10.5} {:>10.5}]",
            row.x, row.y, row.z, row.w
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ViewerConfig::load_or_default(cli.config.as_deref())
        .context("failed to load viewer configuration")?;
    let mut viewer = Viewer::new(&config)?;

    match cli.command {
        Commands::Info => {
            println!("cratecam-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: {}", cratecam_camera::crate_info());
            println!("input: {}", cratecam_input::crate_info());
            println!("default configuration:");
            println!("{}", serde_json::to_string_pretty(&ViewerConfig::default())?);
        }
        Commands::Matrix => {
            let camera = viewer.camera();
            println!("{camera}");
            println!(
                "near={} far={} aspect={:.4}",
                camera.near_plane(),
                camera.far_plane(),
                camera.aspect_ratio()
            );
            print_matrix("view", camera.view());
            print_matrix("projection", camera.projection());
            print_matrix("view_projection", camera.view_projection());
        }
        Commands::LookAt { x, y, z } => {
            let target = Vec3::new(x, y, z);
            viewer
                .camera_mut()
                .look_at(target)
                .with_context(|| format!("cannot aim at {target}"))?;

            let camera = viewer.camera();
            println!("yaw: {:.3}", camera.yaw());
            println!("pitch: {:.3}", camera.pitch());
            let forward = camera.forward();
            println!(
                "forward: ({:.4}, {:.4}, {:.4})",
                forward.x, forward.y, forward.z
            );
        }
        Commands::Simulate { script, dt, json } => {
            let steps = script::parse_script(&script)?;
            tracing::info!(steps = steps.len(), dt, "simulating");

            let frames = script::run_script(&mut viewer, &steps, dt)?;
            tracing::info!(frames, "simulation finished");

            if json {
                let camera = viewer.camera().to_config();
                println!("{}", serde_json::to_string_pretty(&camera)?);
            } else {
                println!("frames: {frames}");
                println!("move speed: {}", viewer.controls().move_speed);
                println!("spin: {:.2}", viewer.spin_degrees());
                println!("{}", viewer.camera());
            }
        }
    }

    Ok(())
}
