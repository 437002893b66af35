use clap::Parser;
use std::process::ExitCode;
use surface_predict::{app, CliConfig, ModelFamily};

#[derive(Parser)]
#[command(name = "surface-predict")]
#[command(about = "Predict a cylinder's surface area with a trained regression model")]
struct Args {
    /// Model family whose default artifact is loaded
    #[arg(short, long, value_enum, default_value_t = ModelFamily::Knn)]
    family: ModelFamily,

    #[command(flatten)]
    common: CliConfig,
}

fn main() -> ExitCode {
    let args = Args::parse();
    app::execute(args.common, args.family)
}
