use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const DASH_HELP_COMMAND: &str = "salesdash dash --help";

/// Failure raised while turning a data source into a [`crate::dataset::Dataset`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The file is absent, or present but holds no bytes beyond whitespace.
    #[error("Sales data file `{}` was not found or is empty.", path.display())]
    DataSourceNotFound { path: PathBuf },
    #[error("Could not load sales data from `{source_label}`: {cause}")]
    DataLoad { source_label: String, cause: String },
}

impl LoadError {
    pub fn not_found(path: &Path) -> Self {
        Self::DataSourceNotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn data_load(source_label: &str, cause: impl Into<String>) -> Self {
        Self::DataLoad {
            source_label: source_label.to_string(),
            cause: cause.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `salesdash {cmd} --help` for usage."),
            None => "Run `salesdash --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn data_source_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "data_source_not_found",
            &format!("Sales data file `{location}` was not found or is empty."),
            vec![
                "Check that the CSV file exists at that path and is not empty.".to_string(),
                "Pass the file explicitly with `--data <path>` or set `SALESDASH_DATA`."
                    .to_string(),
                "Run `salesdash demo` to explore the bundled sample data instead.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
            "help_command": DASH_HELP_COMMAND,
        }))
    }

    pub fn data_load_error(source_label: &str, cause: &str) -> Self {
        Self::new(
            "data_load_error",
            &format!("Could not load sales data from `{source_label}`: {cause}"),
            vec![
                "Verify the file is a comma-separated export with a header row.".to_string(),
                "Required columns: Date, Year, Month, Country, Product Category, Sub Category, Customer Age, Revenue, Cost, Quantity.".to_string(),
                "Fix the reported row or column and rerun the command.".to_string(),
            ],
        )
        .with_data(json!({
            "source": source_label,
            "cause": cause,
            "help_command": DASH_HELP_COMMAND,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn internal_input(message: &str) -> Self {
        Self::new(
            "internal_input_error",
            message,
            vec!["Pipe UTF-8 text into `salesdash explore`, one command per line.".to_string()],
        )
    }

    pub fn is_load_failure(&self) -> bool {
        matches!(
            self.code.as_str(),
            "data_source_not_found" | "data_load_error"
        )
    }
}

impl From<LoadError> for ClientError {
    fn from(error: LoadError) -> Self {
        match error {
            LoadError::DataSourceNotFound { path } => Self::data_source_not_found(&path),
            LoadError::DataLoad {
                source_label,
                cause,
            } => Self::data_load_error(&source_label, &cause),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ClientError, LoadError};

    #[test]
    fn missing_source_keeps_its_own_code() {
        let error = ClientError::from(LoadError::not_found(Path::new("/tmp/sales.csv")));
        assert_eq!(error.code, "data_source_not_found");
        assert!(error.message.contains("/tmp/sales.csv"));
        assert!(error.is_load_failure());
    }

    #[test]
    fn load_failure_carries_cause() {
        let error = ClientError::from(LoadError::data_load("sales.csv", "row 3: bad Revenue"));
        assert_eq!(error.code, "data_load_error");
        assert!(error.message.contains("row 3: bad Revenue"));
        let cause = error
            .data
            .as_ref()
            .and_then(|value| value.get("cause"))
            .and_then(|value| value.as_str());
        assert_eq!(cause, Some("row 3: bad Revenue"));
    }

    #[test]
    fn invalid_argument_points_at_command_help() {
        let error = ClientError::invalid_argument_for_command("bad year", Some("dash"));
        assert_eq!(error.code, "invalid_argument");
        assert_eq!(
            error.recovery_steps,
            vec!["Run `salesdash dash --help` for usage.".to_string()]
        );
        assert!(!error.is_load_failure());
    }
}
