use clap::Parser;
use log::{LevelFilter, SetLoggerError, error};
use physdemos::Funnel::funnel_shapes::FunnelShape;
use physdemos::cli::cli_args::{Args, Command};
use physdemos::cli::cli_main::run_interactive_menu;
use physdemos::cli::cli_runner::{run_funnel, run_oscillator, run_population};
use physdemos::error::DemoError;
use physdemos::settings::{DEFAULT_CONFIG_FILE, DemoConfig};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process::ExitCode;

fn run(args: Args) -> Result<(), DemoError> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = DemoConfig::load(&config_path)?;

    match args.command {
        None => run_interactive_menu(&config),
        Some(Command::Oscillator { output, csv, show }) => {
            run_oscillator(&config.oscillator, &output, csv.as_deref(), show)?
        }
        Some(Command::Population {
            input,
            output,
            show,
        }) => run_population(&config.population, &input, &output, show)?,
        Some(Command::Funnel {
            movie,
            frames_dir,
            shapes,
            show,
        }) => {
            if let Some(list) = shapes {
                config.funnel.shapes = FunnelShape::parse_list(&list)?;
            }
            run_funnel(&config.funnel, &movie, frames_dir.as_deref(), show)?
        }
        Some(Command::Config { write }) => {
            config.pretty_print();
            if let Some(path) = write {
                config.save(path)?;
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.verbose) {
        eprintln!("cannot initialise logging: {}", e);
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_logger_init_is_reported() {
        let _ = init_logging(false);
        assert!(init_logging(true).is_err());
    }
}
