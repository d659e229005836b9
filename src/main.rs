use clap::Parser;
use log::{error, info};
use showcase::app::{HeadlessRun, run_cli, run_gui};
use showcase::io::config::Config;
use showcase::showcase::Page;
use std::process::ExitCode;

/// Rotating shelf-cabinet and perfume showcase.
#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Normalized 3D product showcase with a rotating cabinet")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Render to an image instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Page shown first
    #[arg(long, value_enum, default_value_t = Page::Cabinet)]
    page: Page,

    /// Frames simulated before the headless capture
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Category selected halfway through a headless run
    #[arg(long, value_name = "INDEX")]
    switch_to: Option<usize>,

    /// Headless output path; defaults to the config value
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            match Config::load(path) {
                Ok(config) => config,
                Err(e) => {
                    error!("{}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            info!("Using default settings");
            Config::default()
        }
    };

    let result = if cli.headless {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| config.window.output.clone());
        run_cli(
            config,
            HeadlessRun {
                page: cli.page,
                frames: cli.frames,
                switch_to: cli.switch_to,
                output,
            },
        )
    } else {
        run_gui(config, cli.config.as_deref(), cli.page)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
