use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use salesdash_client::{ClientError, ClientResult};
use salesdash_client::commands::explore::{ExploreSession, ExploreStep};
use tracing::{debug, warn};

use crate::cli::EXPLORE_AFTER_HELP;
use crate::output::{self, OutputMode};
use crate::stdout_io::{write_prompt, write_stdout_line};

const PROMPT: &str = "salesdash> ";

/// Result of driving an explore session to completion.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExploreExit {
    /// Session ended on `quit` or end of input.
    Finished,
    /// The data file could not be loaded; nothing was rendered.
    OpenFailed,
    /// Writing to stdout failed.
    OutputFailed,
    /// Reading a command from stdin failed, e.g. on invalid UTF-8.
    InputFailed,
}

pub fn run(data_path: Option<&Path>) -> ExploreExit {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let session = ExploreSession::open(data_path);
    drive(session, stdin.lock(), interactive)
}

/// Reads one command per line until `quit` or end of input. Errors from a
/// single line are printed and the session continues with its previous
/// selection.
pub fn drive(
    session: ClientResult<ExploreSession>,
    input: impl BufRead,
    interactive: bool,
) -> ExploreExit {
    let mut session = match session {
        Ok(session) => session,
        Err(error) => {
            if output::print_failure(&error, OutputMode::Text).is_err() {
                return ExploreExit::OutputFailed;
            }
            return ExploreExit::OpenFailed;
        }
    };
    debug!(path = %session.data_path().display(), "explore session opened");

    let first = session.render().map(ExploreStep::Dashboard);
    if print_step(first).is_err() {
        return ExploreExit::OutputFailed;
    }
    if write_stdout_line("\nType `help` for commands, `quit` to leave.").is_err() {
        return ExploreExit::OutputFailed;
    }

    let mut lines = input.lines();
    loop {
        if interactive && write_prompt(PROMPT).is_err() {
            return ExploreExit::OutputFailed;
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(error)) => {
                warn!(%error, "explore input could not be read");
                let failure =
                    ClientError::internal_input(&format!("Could not read explore input: {error}"));
                if print_step(Err(failure)).is_err() {
                    return ExploreExit::OutputFailed;
                }
                return ExploreExit::InputFailed;
            }
            None => break,
        };

        let step = session.handle_line(&line);
        if matches!(step, Ok(ExploreStep::Quit)) {
            break;
        }
        if print_step(step).is_err() {
            return ExploreExit::OutputFailed;
        }
    }

    ExploreExit::Finished
}

fn print_step(step: ClientResult<ExploreStep>) -> io::Result<()> {
    let body = match step {
        Ok(ExploreStep::Dashboard(envelope) | ExploreStep::Filters(envelope)) => {
            output::render_text_success(&envelope)?
        }
        Ok(ExploreStep::Help) => EXPLORE_AFTER_HELP.trim_end().to_string(),
        Ok(ExploreStep::Quit | ExploreStep::Noop) => return Ok(()),
        Err(error) => output::render_text_failure(&error),
    };
    write_stdout_line(&format!("\n{body}"))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use salesdash_client::ClientError;

    use super::{ExploreExit, drive};

    #[test]
    fn failed_open_is_reported_without_reading_input() {
        let session = Err(ClientError::data_load_error("sales.csv", "missing column"));
        let exit = drive(session, Cursor::new("show\n"), false);
        assert_eq!(exit, ExploreExit::OpenFailed);
    }
}
