//! Report store CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use esg_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use esg_cli::commands::{
    open_store, run_answers, run_export, run_import, run_list, run_reset, run_save_answers,
    run_show, run_update,
};
use esg_cli::config::Settings;
use esg_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&config_path)?;
    let store = open_store(&settings, cli.data_dir.as_deref())?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Command::List { orphans } => run_list(&store, *orphans, &mut stdout)?,
        Command::Show { report } => run_show(&store, report, &mut stdout)?,
        Command::Answers {
            report,
            questionnaire,
        } => run_answers(&store, report, questionnaire, &mut stdout)?,
        Command::SaveAnswers {
            report,
            questionnaire,
            input,
        } => run_save_answers(&store, report, questionnaire, input)?,
        Command::Update(args) => run_update(&store, args)?,
        Command::Reset { report } => run_reset(&store, report)?,
        Command::Export { report, output } => {
            run_export(&store, report, output.as_deref(), &mut stdout)?;
        }
        Command::Import { report, input } => {
            if !run_import(&store, report, input)? {
                eprintln!(
                    "error: {} is not a valid backup of report '{report}'",
                    input.display()
                );
                return Ok(1);
            }
        }
    }
    Ok(0)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
