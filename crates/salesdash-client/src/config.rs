use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const DATA_PATH_ENV: &str = "SALESDASH_DATA";
pub const DEFAULT_DATA_FILE: &str = "salesforcourse-4fe2kehu.csv";

/// Resolves the sales CSV location: explicit override, then `SALESDASH_DATA`,
/// then the default file name in the working directory.
pub fn resolve_data_path(path_override: Option<&Path>) -> ClientResult<PathBuf> {
    let env_value = std::env::var_os(DATA_PATH_ENV).map(PathBuf::from);
    resolve_data_path_from(path_override, env_value)
}

fn resolve_data_path_from(
    path_override: Option<&Path>,
    env_value: Option<PathBuf>,
) -> ClientResult<PathBuf> {
    let candidate = match path_override {
        Some(path) => path.to_path_buf(),
        None => match env_value {
            Some(value) if !value.as_os_str().is_empty() => value,
            _ => PathBuf::from(DEFAULT_DATA_FILE),
        },
    };

    absolutize(&candidate)
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!(
                    "Could not resolve data path `{}`: {error}",
                    path.display()
                ),
                vec!["Pass an absolute path with `--data <path>`.".to_string()],
            )
        })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{DEFAULT_DATA_FILE, resolve_data_path_from};

    #[test]
    fn explicit_override_wins() {
        let resolved = resolve_data_path_from(
            Some(Path::new("/data/sales.csv")),
            Some(PathBuf::from("/env/sales.csv")),
        );
        assert_eq!(resolved.ok(), Some(PathBuf::from("/data/sales.csv")));
    }

    #[test]
    fn environment_is_used_without_override() {
        let resolved = resolve_data_path_from(None, Some(PathBuf::from("/env/sales.csv")));
        assert_eq!(resolved.ok(), Some(PathBuf::from("/env/sales.csv")));
    }

    #[test]
    fn default_file_is_relative_to_working_directory() {
        let resolved = resolve_data_path_from(None, Some(PathBuf::new()));
        assert!(resolved.is_ok());
        if let (Ok(path), Ok(cwd)) = (resolved, std::env::current_dir()) {
            assert_eq!(path, cwd.join(DEFAULT_DATA_FILE));
        }
    }
}
