//! wirebox - interactively transform a 3D wireframe box in the terminal
//!
//! Controls:
//!   - Up/Down, Tab: select a slider
//!   - Left/Right: adjust (Shift for fine steps, PgUp/PgDn for coarse)
//!   - Home/End: slider minimum / maximum
//!   - R: reset, A: toggle local axes
//!   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use wirebox_core::{pose, TransformParams};
use wirebox_terminal::TerminalApp;

#[derive(Parser, Debug)]
#[command(name = "wirebox", version, about = "Rotate and translate a 3D wireframe box with sliders")]
struct Args {
    /// Initial slider values, e.g. "rx=0 ry=45, tz=-2" (keys: rx ry rz tx ty tz)
    #[arg(long, value_name = "SPEC")]
    pose: Option<String>,

    /// Start with the local axes hidden
    #[arg(long)]
    no_axes: bool,

    /// Write logs to this file (filtered with RUST_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// The UI owns the terminal, so logs only ever go to a file
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let initial = match &args.pose {
        Some(spec) => {
            pose::parse_pose(spec).with_context(|| format!("invalid --pose {spec:?}"))?
        }
        None => TransformParams::default(),
    };
    log::info!("starting with {initial}");

    let mut app = TerminalApp::new(initial, !args.no_axes).context("cannot query terminal size")?;
    app.run().context("terminal session failed")?;

    log::info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["wirebox", "--pose", "rx=10 tz=0", "--no-axes"]);
        assert_eq!(args.pose.as_deref(), Some("rx=10 tz=0"));
        assert!(args.no_axes);
        assert!(args.log_file.is_none());
    }
}
