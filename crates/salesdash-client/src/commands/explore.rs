use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::{FilterSelection, build_filter};
use crate::commands::common::dashboard_envelope;
use crate::commands::filters::filters_envelope;
use crate::config::resolve_data_path;
use crate::contracts::envelope::SuccessEnvelope;
use crate::dataset::DatasetCache;
use crate::{ClientError, ClientResult};

const COMMAND: &str = "explore";

/// Outcome of one line typed into an explore session.
#[derive(Debug, Clone)]
pub enum ExploreStep {
    Dashboard(SuccessEnvelope),
    Filters(SuccessEnvelope),
    Help,
    Quit,
    Noop,
}

/// Interactive session: one data source, one cache slot, and the current
/// selection. Every change recomputes the dashboard from the cached records.
#[derive(Debug)]
pub struct ExploreSession {
    data_path: PathBuf,
    cache: DatasetCache,
    selection: FilterSelection,
}

impl ExploreSession {
    /// Resolves the data path and performs the initial load. A failed load is
    /// returned to the caller and no session is created.
    pub fn open(path_override: Option<&Path>) -> ClientResult<Self> {
        let data_path = resolve_data_path(path_override)?;
        let mut cache = DatasetCache::new();
        cache.get_or_load(&data_path)?;
        Ok(Self {
            data_path,
            cache,
            selection: FilterSelection::default(),
        })
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn render(&mut self) -> ClientResult<SuccessEnvelope> {
        let selection = self.selection.clone();
        self.render_with(&selection)
    }

    fn render_with(&mut self, selection: &FilterSelection) -> ClientResult<SuccessEnvelope> {
        let filter = build_filter(selection, COMMAND)?;
        let dataset = self.cache.get_or_load(&self.data_path)?;
        dashboard_envelope("dash", &dataset, selection, &filter, false)
    }

    /// Renders `candidate` and adopts it only when the render succeeds.
    fn commit(&mut self, candidate: FilterSelection) -> ClientResult<ExploreStep> {
        let envelope = self.render_with(&candidate)?;
        debug!(?candidate, "explore selection changed");
        self.selection = candidate;
        Ok(ExploreStep::Dashboard(envelope))
    }

    pub fn handle_line(&mut self, line: &str) -> ClientResult<ExploreStep> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(ExploreStep::Noop);
        }

        let Some(tokens) = shlex::split(trimmed) else {
            return Err(ClientError::invalid_argument_for_command(
                "Unbalanced quotes. Wrap values with spaces in matching quotes, e.g. country=\"United States\".",
                Some(COMMAND),
            ));
        };

        if let [keyword] = tokens.as_slice()
            && !keyword.contains('=')
        {
            return self.handle_keyword(keyword);
        }

        let mut candidate = self.selection.clone();
        for token in &tokens {
            apply_assignment(&mut candidate, token)?;
        }
        self.commit(candidate)
    }

    fn handle_keyword(&mut self, keyword: &str) -> ClientResult<ExploreStep> {
        match keyword.to_ascii_lowercase().as_str() {
            "show" => Ok(ExploreStep::Dashboard(self.render()?)),
            "reset" => self.commit(FilterSelection::default()),
            "reload" => {
                self.cache.reload(&self.data_path)?;
                Ok(ExploreStep::Dashboard(self.render()?))
            }
            "filters" => {
                let dataset = self.cache.get_or_load(&self.data_path)?;
                Ok(ExploreStep::Filters(filters_envelope(&dataset, false)?))
            }
            "help" | "?" => Ok(ExploreStep::Help),
            "quit" | "exit" => Ok(ExploreStep::Quit),
            other => Err(ClientError::invalid_argument_with_recovery(
                &format!("Unknown explore command `{other}`."),
                vec!["Type `help` to list commands and filter assignments.".to_string()],
            )),
        }
    }
}

fn apply_assignment(selection: &mut FilterSelection, token: &str) -> ClientResult<()> {
    let Some((key, value)) = token.split_once('=') else {
        return Err(ClientError::invalid_argument_with_recovery(
            &format!("Expected `key=value`, got `{token}`."),
            vec!["Type `help` to list commands and filter assignments.".to_string()],
        ));
    };
    let value = value.trim();

    match key.trim().to_ascii_lowercase().as_str() {
        "country" => selection.country = Some(value.to_string()),
        "year" => selection.year = Some(value.to_string()),
        "category" | "product_category" => selection.product_category = Some(value.to_string()),
        "age_min" => selection.age_min = parse_age(value)?,
        "age_max" => selection.age_max = parse_age(value)?,
        "age" => {
            let (min, max) = parse_age_range(value)?;
            selection.age_min = min;
            selection.age_max = max;
        }
        other => {
            return Err(ClientError::invalid_argument_with_recovery(
                &format!("Unknown filter `{other}`."),
                vec![
                    "Use one of: country, year, category, age, age_min, age_max.".to_string(),
                ],
            ));
        }
    }
    Ok(())
}

fn parse_age(value: &str) -> ClientResult<Option<i64>> {
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    value.parse::<i64>().map(Some).map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("Age must be a whole number or `all`, got `{value}`."),
            Some(COMMAND),
        )
    })
}

fn parse_age_range(value: &str) -> ClientResult<(Option<i64>, Option<i64>)> {
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok((None, None));
    }
    let Some((min, max)) = value.split_once('-') else {
        return Err(ClientError::invalid_argument_for_command(
            &format!("Age range must look like `MIN-MAX`, got `{value}`."),
            Some(COMMAND),
        ));
    };
    Ok((parse_age(min.trim())?, parse_age(max.trim())?))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{ExploreSession, ExploreStep, apply_assignment, parse_age_range};
    use crate::analysis::FilterSelection;

    const SALES: &str = "Date,Year,Month,Customer Age,Country,Product Category,Sub Category,Quantity,Cost,Revenue
2016-01-01,2016,January,30,Germany,Bikes,Road Bikes,1,40,100
2016-02-01,2016,February,40,France,Clothing,Caps,2,5,12
";

    #[test]
    fn assignments_update_the_selection() {
        let mut selection = FilterSelection::default();
        assert!(apply_assignment(&mut selection, "country=United States").is_ok());
        assert!(apply_assignment(&mut selection, "Year=2016").is_ok());
        assert!(apply_assignment(&mut selection, "category=Bikes").is_ok());
        assert!(apply_assignment(&mut selection, "age=25-40").is_ok());
        assert_eq!(
            selection,
            FilterSelection {
                country: Some("United States".to_string()),
                year: Some("2016".to_string()),
                product_category: Some("Bikes".to_string()),
                age_min: Some(25),
                age_max: Some(40),
            }
        );
    }

    #[test]
    fn open_ended_age_ranges() {
        assert_eq!(parse_age_range("30-").ok(), Some((Some(30), None)));
        assert_eq!(parse_age_range("-30").ok(), Some((None, Some(30))));
        assert_eq!(parse_age_range("all").ok(), Some((None, None)));
        assert!(parse_age_range("30").is_err());
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let mut selection = FilterSelection::default();
        let result = apply_assignment(&mut selection, "colour=red");
        assert!(result.is_err());
        if let Err(error) = result {
            assert!(error.message.contains("colour"));
        }
        assert_eq!(selection, FilterSelection::default());
    }

    #[test]
    fn assignment_changes_the_selection_after_a_successful_render() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let path = dir.path().join("sales.csv");
            assert!(fs::write(&path, SALES).is_ok());
            let session = ExploreSession::open(Some(&path));
            assert!(session.is_ok());
            if let Ok(mut session) = session {
                let step = session.handle_line("country=Germany");
                assert!(matches!(step, Ok(ExploreStep::Dashboard(_))));
                if let Ok(ExploreStep::Dashboard(envelope)) = step {
                    assert_eq!(envelope.data["filtered_records"].as_i64(), Some(1));
                }
                assert_eq!(session.selection().country.as_deref(), Some("Germany"));
            }
        }
    }

    #[test]
    fn failed_render_keeps_the_previous_selection() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let path = dir.path().join("sales.csv");
            assert!(fs::write(&path, SALES).is_ok());
            let session = ExploreSession::open(Some(&path));
            assert!(session.is_ok());
            if let Ok(mut session) = session {
                assert!(session.handle_line("year=2016").is_ok());
                assert!(fs::remove_file(&path).is_ok());

                let step = session.handle_line("country=Germany");
                assert!(step.is_err());
                if let Err(error) = step {
                    assert_eq!(error.code, "data_source_not_found");
                }
                assert_eq!(
                    session.selection(),
                    &FilterSelection {
                        year: Some("2016".to_string()),
                        ..FilterSelection::default()
                    }
                );

                assert!(session.handle_line("reset").is_err());
                assert_eq!(session.selection().year.as_deref(), Some("2016"));
            }
        }
    }
}
