use clap::Parser;
use std::process::ExitCode;
use surface_predict::{app, CliConfig, ModelFamily};

fn main() -> ExitCode {
    let cli = CliConfig::parse();
    app::execute(cli, ModelFamily::RandomForest)
}
