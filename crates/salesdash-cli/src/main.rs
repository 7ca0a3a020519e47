mod cli;
mod dispatch;
mod explore;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use salesdash_client::ClientError;
use stdout_io::write_stdout_text;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "SALESDASH_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

const ROOT_HELP: &str = "Salesdash - sales transactions dashboard

Usage:
  salesdash <command>

Start here:
  salesdash demo
  salesdash dash --data <path>
  salesdash --help
";

const TOP_LEVEL_HELP: &str = "Salesdash - sales transactions dashboard

USAGE: salesdash <command>

Try it:
  salesdash demo                                          Dashboard over bundled sample data
  salesdash demo --country Germany --year 2016            Same, filtered
  salesdash filters --demo                                Filter values in the sample data

Your own data:
  salesdash dash --data <path>                            Dashboard for a sales CSV
  salesdash dash --country \"United States\" --age-min 25   Filter by country, year, category, age
  salesdash filters --data <path>                         List the filter values in the file
  salesdash explore --data <path>                         Change filters interactively, line by line

Machine-readable output:
  Add --json to dash, filters or demo.

Configuration:
  SALESDASH_DATA    Default CSV path when --data is not given
  SALESDASH_LOG     Diagnostics filter written to stderr (default: warn)

Run `salesdash <command> --help` for command usage.
";

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_logging() {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => return Err(report_parse_error(&err, &raw_args)),
    };

    if let cli::Commands::Explore { data } = &cli.command {
        return match explore::run(data.as_deref()) {
            explore::ExploreExit::Finished => Ok(ExitCode::SUCCESS),
            explore::ExploreExit::OpenFailed => Err(ExitCode::from(1)),
            explore::ExploreExit::OutputFailed | explore::ExploreExit::InputFailed => {
                Err(ExitCode::from(2))
            }
        };
    }

    let mode = output::mode_for_command(&cli.command);
    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn report_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        let text = if is_top_level_help_request(raw_args) {
            TOP_LEVEL_HELP.to_string()
        } else {
            err.to_string()
        };
        if write_stdout_text(&text).is_err() {
            return ExitCode::from(2);
        }
        return ExitCode::SUCCESS;
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::UnknownArgument
    ) {
        command_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return ExitCode::from(2);
    }
    ExitCode::from(1)
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    let first = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))?;
    match first.as_str() {
        "dash" => Some("dash"),
        "filters" => Some("filters"),
        "demo" => Some("demo"),
        "explore" => Some("explore"),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_from_args, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn strips_usage_and_more_information_lines() {
        let message = "error: invalid value 'x' for '--age-min <N>'\n\nUsage: salesdash dash\n\nFor more information, try '--help'.\n";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: invalid value 'x' for '--age-min <N>'"
        );
    }

    #[test]
    fn command_hint_comes_from_first_subcommand() {
        assert_eq!(
            command_from_args(&args(&["salesdash", "--json", "dash", "--age-min", "x"])),
            Some("dash")
        );
        assert_eq!(command_from_args(&args(&["salesdash", "report"])), None);
    }
}
