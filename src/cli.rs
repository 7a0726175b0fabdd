//! Command-line interface for plotgfa

use crate::builder::GraphBuilder;
use crate::layout::{LayoutConfig, DEFAULT_ITERATIONS};
use crate::render::RenderConfig;
use crate::visualize::Visualizer;
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Instant;

/// plotgfa - plot a GFA 1 file generated by Canu, writing both a png and a gml file
#[derive(Debug, Parser)]
#[command(name = "plotgfa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// GFA file to plot
    #[arg(value_name = "GFA")]
    pub input: PathBuf,

    /// Spring layout iterations
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Seed for the initial layout positions
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Also print the node/edge counts as JSON
    #[arg(long)]
    pub json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            iterations: self.iterations,
            seed: self.seed,
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            ..RenderConfig::default()
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // a logger may already be installed
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

fn create_spinner(message: &str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    plot(&cli)
}

/// Parse the GFA named by `cli`, report its size and write the outputs
pub fn plot(cli: &Cli) -> Result<()> {
    let spinner = create_spinner("Reading GFA file...", cli.no_progress);
    let start = Instant::now();

    let graph = GraphBuilder::read_all(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let summary = graph.summary();
    spinner.suspend(|| -> Result<()> {
        println!("{}", summary);
        if cli.json {
            println!("{}", summary.to_json()?);
        }
        Ok(())
    })?;

    spinner.set_message("Computing layout and rendering...");
    let visualizer = Visualizer::new(cli.layout_config(), cli.render_config());
    let outputs = visualizer
        .visualize(&graph, &cli.input)
        .with_context(|| format!("failed to plot {}", cli.input.display()))?;
    spinner.finish_with_message(format!("Done in {:.2?}", start.elapsed()));

    log::debug!(
        "outputs: {} {}",
        outputs.image.display(),
        outputs.gml.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parse_positional() {
        let cli = Cli::try_parse_from(["plotgfa", "asm.gfa"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("asm.gfa"));
        assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
        assert_eq!(cli.render_config(), RenderConfig::default());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_options() {
        let cli = Cli::try_parse_from([
            "plotgfa",
            "asm.gfa",
            "--iterations",
            "10",
            "--seed",
            "4",
            "--no-progress",
            "-vv",
        ])
        .unwrap();
        assert_eq!(
            cli.layout_config(),
            LayoutConfig {
                iterations: 10,
                seed: 4
            }
        );
        assert!(cli.no_progress);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["plotgfa"]).is_err());
    }

    #[test]
    fn test_plot_end_to_end() {
        let dir = tempdir().unwrap();
        let gfa = dir.path().join("asm.gfa");
        std::fs::write(&gfa, "S\ttig001\t*\nS\ttig002\t*\nE\ttig001\t+\ttig002\t+\t*\n").unwrap();

        let args: Vec<OsString> = vec![
            "plotgfa".into(),
            gfa.clone().into_os_string(),
            "--iterations".into(),
            "20".into(),
            "--width".into(),
            "240".into(),
            "--height".into(),
            "180".into(),
            "--no-progress".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        plot(&cli).unwrap();

        assert!(dir.path().join("asm.gfa.png").is_file());
        assert!(dir.path().join("asm.gfa.gml").is_file());
    }

    #[test]
    fn test_plot_malformed_input_fails() {
        let dir = tempdir().unwrap();
        let gfa = dir.path().join("bad.gfa");
        std::fs::write(&gfa, "S\n").unwrap();

        let args: Vec<OsString> = vec![
            "plotgfa".into(),
            gfa.clone().into_os_string(),
            "--no-progress".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(plot(&cli).is_err());
        assert!(!dir.path().join("bad.gfa.png").exists());
    }
}
