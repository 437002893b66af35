use clap::Parser;
use std::path::PathBuf;

/// Options shared by every runner binary.
#[derive(Debug, Clone, Default, Parser)]
#[command(about = "Predict a cylinder's surface area from its radius and height")]
pub struct CliConfig {
    /// Model artifact to load instead of the runner's default file
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Radius to use instead of prompting for it
    #[arg(long, allow_hyphen_values = true)]
    pub radius: Option<String>,

    /// Height to use instead of prompting for it
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Exit with a non-zero status per error category instead of always 0
    #[arg(long)]
    pub strict_exit: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
