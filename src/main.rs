//! Headless pond session runner.
//!
//! Replays a scripted session (or the built-in tour) against the demo pond
//! scene and logs every camera retarget.

use std::path::PathBuf;

use clap::Parser;
use pond_rig::error::PondError;
use pond_rig::options::Options;
use pond_rig::session::{Session, SessionScript};

#[derive(Parser, Debug)]
#[command(name = "pond-sim", about = "Replay a pond camera session headlessly")]
struct Args {
    /// Options preset (TOML). Defaults are used when omitted.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Session script (TOML). The built-in tour runs when omitted.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Fixed timestep in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for decoration drift.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<(), PondError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse();
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let script = match &args.script {
        Some(path) => SessionScript::load(path)?,
        None => SessionScript::demo(),
    };

    let mut session = Session::new(&options, &script.device, args.seed)?;
    let report = session.run(&script, args.dt)?;

    for issued in &report.poses {
        log::info!(
            "frame {:>5}  {:<28}  eye {}  target {}",
            issued.frame,
            format!("{:?}", issued.state),
            issued.pose.eye,
            issued.pose.target,
        );
    }
    log::info!(
        "{} frames, {} retargets, final eye {}, \
         pool allocations beyond seed: {}",
        report.frames,
        report.poses.len(),
        report.final_eye,
        report.pool_created
    );
    Ok(())
}
