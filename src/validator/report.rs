use serde::Serialize;
use std::fmt;

/// Validation check result status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }
}

/// Individual validation check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationCheck {
    /// Name of the validation check
    pub name: String,
    /// Result status of the check
    #[serde(flatten)]
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Ok)
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Warning(message.into()))
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Failed(message.into()))
    }

    fn with_status(name: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Text styling hooks, so plain and coloured output share one layout.
trait Paint {
    fn title(&self, text: &str) -> String;
    fn status(&self, status: &CheckStatus, text: &str) -> String;
}

struct Plain;

impl Paint for Plain {
    fn title(&self, text: &str) -> String {
        text.to_string()
    }

    fn status(&self, _status: &CheckStatus, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(feature = "colorized_output")]
struct Colored;

#[cfg(feature = "colorized_output")]
impl Paint for Colored {
    fn title(&self, text: &str) -> String {
        console::style(text).bold().cyan().to_string()
    }

    fn status(&self, status: &CheckStatus, text: &str) -> String {
        let styled = console::style(text);
        match status {
            CheckStatus::Ok => styled.green(),
            CheckStatus::Warning(_) => styled.yellow(),
            CheckStatus::Failed(_) => styled.red().bold(),
        }
        .to_string()
    }
}

/// Complete validation report for one HMxml document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// List of individual validation check results
    pub checks: Vec<ValidationCheck>,
    /// File path or label of the validated document
    pub source: String,
}

impl ValidationReport {
    /// Create an empty report for the given source
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            source: source.into(),
        }
    }

    /// Add a validation check result to the report
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Check if any validation checks failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Check if any validation checks produced warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Count the number of successful checks
    pub fn success_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Ok))
    }

    /// Count the number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Warning(_)))
    }

    /// Count the number of failures
    pub fn failure_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&CheckStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| predicate(&c.status)).count()
    }

    /// Status standing for the whole document: the worst check wins.
    fn overall(&self) -> CheckStatus {
        if self.has_failures() {
            CheckStatus::Failed(String::new())
        } else if self.has_warnings() {
            CheckStatus::Warning(String::new())
        } else {
            CheckStatus::Ok
        }
    }

    /// Format the report with colors (requires the `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.render(&Colored)
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.render(&Plain)
        }
    }

    fn render(&self, paint: &dyn Paint) -> String {
        let mut lines = vec![
            paint.title("HMxml Validation Report"),
            format!("Source: {}", self.source),
            String::new(),
        ];

        for check in &self.checks {
            let mut line = format!(
                "[{}] {}",
                check.status.symbol(),
                paint.status(&check.status, &check.name)
            );
            match &check.status {
                CheckStatus::Ok => {}
                CheckStatus::Warning(message) => line.push_str(&format!(" - WARNING: {}", message)),
                CheckStatus::Failed(message) => line.push_str(&format!(" - FAILED: {}", message)),
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push(format!(
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        ));

        let overall = self.overall();
        let verdict = match overall {
            CheckStatus::Ok => "Validation PASSED",
            CheckStatus::Warning(_) => "Validation PASSED with warnings",
            CheckStatus::Failed(_) => "Validation FAILED",
        };
        lines.push(paint.status(&overall, verdict));

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Plain))
    }
}
