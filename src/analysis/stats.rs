use serde::Serialize;

use crate::types::{Commit, LogLine};
use crate::utils::group_by_first_seen;

/// Headline numbers shown above the commit scatter plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommitSummary {
    pub total_loc: usize,
    pub total_commits: usize,
    pub total_files: usize,
    pub average_depth: f64,
    pub max_depth: u32,
    /// Mean over files of the highest line number seen in each file
    pub average_file_length: f64,
}

fn mean_of(values: impl IntoIterator<Item = f64>) -> f64 {
    use statrs::statistics::Statistics;

    let values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return 0.0;
    }
    values.mean()
}

pub fn summarize(lines: &[LogLine], commits: &[Commit]) -> CommitSummary {
    let files = group_by_first_seen(lines, |line| line.file.as_str());
    let file_lengths = files
        .iter()
        .map(|(_, file_lines)| file_lines.iter().map(|l| l.line).max().unwrap_or(0) as f64);

    CommitSummary {
        total_loc: lines.len(),
        total_commits: commits.len(),
        total_files: files.len(),
        average_depth: mean_of(lines.iter().map(|l| l.depth as f64)),
        max_depth: lines.iter().map(|l| l.depth).max().unwrap_or(0),
        average_file_length: mean_of(file_lengths),
    }
}

impl CommitSummary {
    /// Label/value pairs in display order, values formatted for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total LOC", self.total_loc.to_string()),
            ("Total commits", self.total_commits.to_string()),
            ("Total files", self.total_files.to_string()),
            ("Average depth", format!("{:.2}", self.average_depth)),
            ("Maximum depth", self.max_depth.to_string()),
            ("Average file length", format!("{:.1}", self.average_file_length)),
        ]
    }
}
