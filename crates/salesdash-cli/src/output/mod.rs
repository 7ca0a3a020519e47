mod dashboard_text;
mod error_text;
mod filters_text;
mod format;
mod json;
mod mode;

use std::io;

use salesdash_client::{ClientError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

use crate::stdout_io::write_stdout_line;

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

pub fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "dash" | "demo" => dashboard_text::render_dashboard(&success.command, &success.data),
        "filters" => filters_text::render_filters(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

pub fn render_text_failure(error: &ClientError) -> String {
    error_text::render_error(error)
}
