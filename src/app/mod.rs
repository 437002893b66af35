// Application layer: wires configuration, logging and the console into a runner.

use crate::config::toml_config::{resolve_model_path, LogFormat, PredictorConfig};
use crate::config::CliConfig;
use crate::core::prompt::{ConsolePrompt, PresetInput};
use crate::core::runner::{PredictorRunner, RunOutcome};
use crate::domain::model::ModelFamily;
use crate::models::ArtifactFile;
use crate::utils::error::Result;
use crate::utils::logger;
use crate::utils::validation::Validate;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

fn load_config(path: &Path) -> Result<PredictorConfig> {
    let config = PredictorConfig::from_file(path)?;
    config.validate()?;
    Ok(config)
}

/// Writes the result line; a closed stdout is logged, never fatal.
fn print_outcome<W: Write>(mut out: W, outcome: &RunOutcome) {
    if let Err(e) = writeln!(out, "{outcome}").and_then(|()| out.flush()) {
        tracing::debug!(error = %e, "could not write result line");
    }
}

/// Runs one prediction on the console and prints exactly one result line.
pub fn execute(cli: CliConfig, family: ModelFamily) -> ExitCode {
    let config = match cli.config.as_deref().map(load_config).transpose() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None, LogFormat::Compact);
            let outcome = RunOutcome::Failed(e);
            print_outcome(io::stdout(), &outcome);
            return outcome.exit_code(cli.strict_exit);
        }
    };

    let (level, format) = config
        .as_ref()
        .map(|c| (c.log_level(), c.logging.format))
        .unwrap_or((None, LogFormat::Compact));
    logger::init_cli_logger(cli.verbose, level, format);

    let model_path = resolve_model_path(cli.model.as_deref(), config.as_ref(), family);
    tracing::info!(
        family = %family,
        model = %model_path.display(),
        "Starting surface area predictor"
    );

    let outcome = {
        let console = ConsolePrompt::new(io::stdin().lock(), io::stdout().lock());
        let input = PresetInput::new(cli.radius, cli.height, console);
        PredictorRunner::new(ArtifactFile::new(model_path), input).run()
    };

    print_outcome(io::stdout(), &outcome);
    outcome.exit_code(cli.strict_exit)
}
