//! Simulacra - looping procedural geometry animator
//!
//! Runs the frame loop headless against a recording renderer, then
//! optionally exports the artifact as OBJ meshes or hands control to
//! commands read from stdin.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use simulacra::cli::Args;
use simulacra::control::Command;
use simulacra::render::FrameRecorder;
use simulacra::session::Session;

/// Run `count` frames, stopping at the first failure
fn run_frames(session: &mut Session, recorder: &mut FrameRecorder, count: usize) -> Result<()> {
    for _ in 0..count {
        session
            .frame(recorder)
            .with_context(|| format!("frame at tick {} failed", session.tick()))?;
    }
    let stats = recorder.stats();
    info!(
        "Tick {}: {} vertices, {} points, {} strips, {} triangles",
        session.tick(),
        session.artifact().vertices().len(),
        stats.points,
        stats.strips,
        stats.triangles
    );
    Ok(())
}

/// Apply stdin lines until EOF or `quit`
///
/// `frame [n]` runs frames without queuing anything; any other line is
/// parsed as a command and followed by one frame.
fn run_interactive(session: &mut Session, recorder: &mut FrameRecorder) -> Result<()> {
    info!("Reading commands from stdin (`quit` to stop)");
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        let frames = match (words.next(), words.next()) {
            (Some("quit" | "exit"), _) => break,
            (Some("frame"), count) => match count.map(str::parse::<usize>).transpose() {
                Ok(count) => count.unwrap_or(1),
                Err(e) => {
                    warn!("Bad frame count: {}", e);
                    continue;
                }
            },
            _ => match line.parse::<Command>() {
                Ok(command) => {
                    session.queue(command);
                    1
                }
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            },
        };

        if let Err(e) = run_frames(session, recorder, frames) {
            warn!("{:#}", e);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = args.parameters().context("failed to prepare parameters")?;

    if let Some(path) = &args.save_params {
        params
            .save(path)
            .with_context(|| format!("failed to save parameters to {}", path.display()))?;
    }

    let frames = args
        .frames
        .unwrap_or(params.animation.num_frames as usize);
    let mut session =
        Session::new(params, args.params.clone()).context("failed to start session")?;
    let mut recorder = FrameRecorder::new();

    run_frames(&mut session, &mut recorder, frames)?;

    if args.export_frame {
        let path = session.export_frame().context("frame export failed")?;
        info!("Wrote {}", path.display());
    }
    if args.export_sequence {
        let abort = session.abort_handle();
        let report = session
            .export_sequence(&abort)
            .context("sequence export failed")?;
        info!(
            "Wrote {} frames to {}",
            report.frames_written,
            report.directory.display()
        );
    }

    if args.interactive {
        run_interactive(&mut session, &mut recorder)?;
    }
    Ok(())
}
