use std::path::Path;
use std::process;

use anyhow::{self, format_err};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use spindet::interfaces::cli::{log_heading, log_saved_excitation_analysis, Cli};
use spindet::interfaces::input::Input;
use spindet::interfaces::InputHandle;
use spindet::io::read_spindet_yaml;

/// Sets up `log4rs` so that the `spindet-output` target is written plainly to the console and,
/// if `output` is given, to `<output>.out`. Everything else at `warn` or above goes to the
/// console with its level.
fn setup_logging(output: Option<&Path>) -> Result<(), anyhow::Error> {
    let console_output = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();
    let console_main = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("[{l}] {t} - {m}{n}")))
        .build();

    let mut config = Config::builder()
        .appender(Appender::builder().build("console_output", Box::new(console_output)))
        .appender(Appender::builder().build("console_main", Box::new(console_main)));
    let mut output_appenders = vec!["console_output".to_string()];

    if let Some(name) = output {
        let mut path = name.to_path_buf();
        path.set_extension("out");
        let file_output = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .append(false)
            .build(&path)
            .map_err(|err| format_err!(err))?;
        config = config.appender(Appender::builder().build("file_output", Box::new(file_output)));
        output_appenders.push("file_output".to_string());
    }

    let config = config
        .logger(
            Logger::builder()
                .appenders(output_appenders)
                .additive(false)
                .build("spindet-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("console_main").build(LevelFilter::Warn))
        .map_err(|err| format_err!(err))?;
    log4rs::init_config(config).map_err(|err| format_err!(err))?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    setup_logging(cli.output.as_deref())?;
    log_heading();
    match (cli.config.as_ref(), cli.result.as_ref()) {
        (Some(config), _) => {
            let input = read_spindet_yaml::<Input, _>(config)?;
            input.handle()
        }
        (None, Some(name)) => log_saved_excitation_analysis(name),
        (None, None) => Err(format_err!(
            "Either an input file or a saved result file must be given."
        )),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        log::error!("{err:#}");
        log::error!(target: "spindet-output", "{err:#}");
        process::exit(1);
    }
}
