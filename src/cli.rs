use clap::{Parser, ValueEnum};
use log::LevelFilter;
use riw::OutputFormat;
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "riw")]
#[command(about = "Renders the demo scenes with a Monte Carlo path tracer")]
pub struct Args {
    /// Scene to render, 1 to 10; renders all of them when omitted
    #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
    pub scene: Option<u8>,

    /// Render parameters file (key=value lines)
    #[arg(short, long, default_value = "parameters.txt")]
    pub config: PathBuf,

    /// Directory the images are written to
    #[arg(short, long, default_value = "img")]
    pub output_dir: PathBuf,

    #[arg(short, long, value_enum, default_value = "ppm")]
    pub format: OutputFormat,

    /// Overrides image_width from the parameters file
    #[arg(long)]
    pub width: Option<usize>,

    /// Overrides samples_per_pixel from the parameters file
    #[arg(long, short = 's')]
    pub samples: Option<usize>,

    /// Overrides the random seed used for scene layout and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}
