//! Per-region replacement summaries.

use crate::ReplacementSummary;
use tracing::info;

/// Logs what a region scan replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryReporter {
    enabled: bool,
}

impl SummaryReporter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Report lines for `summary`: a header followed by one line per pair.
    ///
    /// Empty when the summary is empty or reporting is disabled.
    pub fn render(&self, region_label: &str, summary: &ReplacementSummary) -> Vec<String> {
        if !self.enabled || summary.is_empty() {
            return Vec::new();
        }

        std::iter::once(format!("Replacement summary for region {region_label}:"))
            .chain(
                summary
                    .iter()
                    .map(|(label, count)| format!("  {label} : {count}")),
            )
            .collect()
    }

    pub fn report(&self, region_label: &str, summary: &ReplacementSummary) {
        for line in self.render(region_label, summary) {
            info!("{}", line);
        }
    }
}
