use clap::Parser;
use std::path::PathBuf;

/// An interactive 6x6 grid of shaded spheres, rendered in the terminal.
///
/// Click a sphere to select it, click empty space to clear the selection,
/// press Escape to quit.
#[derive(Parser, Debug, Clone)]
#[command(name = "sphere-grid", version, about)]
pub struct Args {
    /// Frames per second the loop paces itself to.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Show a status line with elapsed time, selection and measured FPS.
    #[arg(short, long)]
    pub debug: bool,

    /// Write logs to this file; the terminal itself is busy rendering.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive (e.g. debug, sphere_grid=trace); needs --log-file.
    #[arg(long, requires = "log_file")]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_plain_demo() {
        let args = Args::try_parse_from(["sphere-grid"]).expect("defaults parse");
        assert_eq!(args.fps, 60);
        assert!(!args.debug);
        assert!(args.log_file.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn options_parse() {
        let args = Args::try_parse_from([
            "sphere-grid",
            "--fps",
            "30",
            "-d",
            "--log-file",
            "grid.log",
            "--log-level",
            "debug",
        ])
        .expect("options parse");
        assert_eq!(args.fps, 30);
        assert!(args.debug);
        assert_eq!(args.log_file, Some(PathBuf::from("grid.log")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn log_level_without_log_file_is_rejected() {
        let err = Args::try_parse_from(["sphere-grid", "--log-level", "debug"])
            .expect_err("--log-level alone must not parse");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(Args::try_parse_from(["sphere-grid", "--fps", "0"]).is_err());
    }
}
