use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use salesdash_client::analysis::FilterSelection;

/// Extended help shown after `salesdash dash --help`.
pub const DASH_AFTER_HELP: &str = "\
Data source:
  The CSV is read from --data, else $SALESDASH_DATA, else
  `salesforcourse-4fe2kehu.csv` in the working directory.

  Required columns:
    Date, Year, Month, Customer Age, Country, Product Category,
    Sub Category, Quantity, Cost, Revenue
  Other columns are ignored. Rows with a blank numeric field are skipped.

Filters:
  Every filter is optional and they combine with AND.
  Pass `all` to --country, --year or --category to clear that filter.
  --age-min and --age-max are inclusive; an inverted range matches nothing.

Examples:
  salesdash dash --country \"United States\" --year 2016
  salesdash dash --category Bikes --age-min 25 --age-max 40 --json
";

/// Extended help shown after `salesdash explore --help`.
pub const EXPLORE_AFTER_HELP: &str = "\
Session commands (one per line on stdin):
  country=\"United States\"   Set a filter (country, year, category)
  age=25-40                 Set both age bounds; `age=30-` leaves max open
  age_min=25 age_max=40     Set age bounds individually
  show                      Re-render the dashboard
  filters                   List available filter values
  reset                     Clear every filter
  reload                    Re-read the data file from disk
  help                      Show this list
  quit                      Leave the session

Several assignments may share one line. Use `all` to clear a single filter.
";

#[derive(Debug, Parser)]
#[command(
    name = "salesdash",
    version,
    about = "sales transactions dashboard",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the dashboard for a sales CSV
    #[command(after_help = DASH_AFTER_HELP)]
    Dash {
        /// Path to the sales CSV
        #[arg(long, value_name = "PATH")]
        data: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List the filter values present in a sales CSV
    Filters {
        /// Path to the sales CSV
        #[arg(long, value_name = "PATH")]
        data: Option<PathBuf>,
        /// List the values in the bundled sample data instead
        #[arg(long, conflicts_with = "data")]
        demo: bool,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Render the dashboard over bundled sample data
    Demo {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Explore a sales CSV interactively, one filter change per line
    #[command(after_help = EXPLORE_AFTER_HELP)]
    Explore {
        /// Path to the sales CSV
        #[arg(long, value_name = "PATH")]
        data: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Keep only this country
    #[arg(long)]
    pub country: Option<String>,
    /// Keep only this year (e.g. 2016)
    #[arg(long)]
    pub year: Option<String>,
    /// Keep only this product category
    #[arg(long)]
    pub category: Option<String>,
    /// Minimum customer age, inclusive
    #[arg(long, value_name = "N")]
    pub age_min: Option<i64>,
    /// Maximum customer age, inclusive
    #[arg(long, value_name = "N")]
    pub age_max: Option<i64>,
}

impl FilterArgs {
    pub fn to_selection(&self) -> FilterSelection {
        FilterSelection {
            country: self.country.clone(),
            year: self.year.clone(),
            product_category: self.category.clone(),
            age_min: self.age_min,
            age_max: self.age_max,
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases = vec![
            vec!["salesdash", "dash"],
            vec!["salesdash", "dash", "--data", "sales.csv", "--json"],
            vec!["salesdash", "filters"],
            vec!["salesdash", "filters", "--json"],
            vec!["salesdash", "filters", "--demo", "--json"],
            vec!["salesdash", "demo"],
            vec!["salesdash", "demo", "--year", "2016"],
            vec!["salesdash", "explore", "--data", "sales.csv"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse {case:?}");
        }
    }

    #[test]
    fn dash_filter_flags_become_a_selection() {
        let parsed = parse_from([
            "salesdash",
            "dash",
            "--data",
            "sales.csv",
            "--country",
            "United States",
            "--year",
            "2016",
            "--category",
            "Bikes",
            "--age-min",
            "25",
            "--age-max",
            "40",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Dash { json: false, .. }));
            if let Commands::Dash { data, filters, .. } = cli.command {
                assert_eq!(data, Some(PathBuf::from("sales.csv")));
                let selection = filters.to_selection();
                assert_eq!(selection.country.as_deref(), Some("United States"));
                assert_eq!(selection.year.as_deref(), Some("2016"));
                assert_eq!(selection.product_category.as_deref(), Some("Bikes"));
                assert_eq!(selection.age_min, Some(25));
                assert_eq!(selection.age_max, Some(40));
            }
        }
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let parsed = parse_from(["salesdash", "dash", "--age-min", "young"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn filters_demo_conflicts_with_data() {
        let parsed = parse_from(["salesdash", "filters", "--demo", "--data", "sales.csv"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        }
    }

    #[test]
    fn explore_does_not_take_json() {
        let parsed = parse_from(["salesdash", "explore", "--json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["salesdash", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["salesdash", "dash", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn bare_invocation_requires_a_subcommand() {
        let parsed = parse_from(["salesdash"]);
        assert!(parsed.is_err());
    }
}
