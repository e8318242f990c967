use std::path::{Path, PathBuf};

use anyhow::{self, Context};
use clap::{ArgGroup, Parser};

use crate::drivers::excitation_analysis::ExcitationAnalysisResult;
use crate::io::format::{log_title, spindet_output, SpinDetOutput};
use crate::io::{read_spindet_binary, SpinDetFileType};

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted `spindet` heading to the `spindet-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    spindet_output!("╭──────────────────────────────────────────────────────────────────────────────────────╮");
    spindet_output!("│                                                                                      │");
    spindet_output!("│    ███████ ██████  ██ ███    ██ ██████  ███████ ████████                             │");
    spindet_output!("│    ██      ██   ██ ██ ████   ██ ██   ██ ██         ██                                │");
    spindet_output!("│    ███████ ██████  ██ ██ ██  ██ ██   ██ █████      ██                                │");
    spindet_output!("│         ██ ██      ██ ██  ██ ██ ██   ██ ██         ██                                │");
    spindet_output!("│    ███████ ██      ██ ██   ████ ██████  ███████    ██                                │");
    spindet_output!("│                                                                                      │");
    spindet_output!("│    Spin-determinant algebra for configuration interaction          {version:>17} │");
    spindet_output!("╰──────────────────────────────────────────────────────────────────────────────────────╯");
    spindet_output!("");
}

/// Reads excitation-analysis results saved in a binary file and logs them to the
/// `spindet-output` logger.
///
/// # Arguments
///
/// * `name` - The name of the saved results (without the `spindet.exc` extension).
pub fn log_saved_excitation_analysis<P: AsRef<Path>>(name: P) -> Result<(), anyhow::Error> {
    let name = name.as_ref();
    let result: ExcitationAnalysisResult = read_spindet_binary(name, SpinDetFileType::Exc)
        .with_context(|| {
            format!(
                "Unable to read excitation-analysis results from {}.{}",
                name.display(),
                SpinDetFileType::Exc.ext()
            )
        })?;
    log_title("Saved Excitation-Analysis Results");
    spindet_output!("");
    result.parameters.log_output_display();
    result.log_output_display();
    Ok(())
}

/// Command-line arguments of the `spindet` binary. Exactly one of `--config` and `--result` must
/// be given.
#[derive(Parser)]
#[command(author, version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["config", "result"])))]
pub struct Cli {
    /// Path to the YAML input file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name of a saved excitation-analysis result file (without extensions) to be displayed
    /// instead of running a calculation.
    #[arg(short, long)]
    pub result: Option<PathBuf>,

    /// Name of the output file (without extensions). If not given, output is only written to the
    /// console.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
