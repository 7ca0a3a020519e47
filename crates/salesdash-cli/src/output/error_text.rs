use salesdash_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        headline(error).to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn headline(error: &ClientError) -> &'static str {
    if error.is_load_failure() {
        "The sales data could not be loaded, so no dashboard was rendered."
    } else {
        "Something went wrong, but it's easy to fix."
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use salesdash_client::ClientError;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_with_recovery(
            "bad input",
            vec!["run salesdash --help".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. run salesdash --help"));
    }

    #[test]
    fn load_failures_use_their_own_headline() {
        let error = ClientError::data_source_not_found(Path::new("/tmp/missing.csv"));
        let rendered = render_error(&error);
        assert!(rendered.starts_with("The sales data could not be loaded"));
        assert!(rendered.contains("data_source_not_found"));
        assert!(rendered.contains("/tmp/missing.csv"));
    }
}
