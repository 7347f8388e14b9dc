//! # Common Types
//!
//! This module contains the records shared across the application: the raw
//! per-line commit log, the per-commit aggregates built from it, and the
//! project and GitHub profile data shown on the home and projects views.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One changed source line, as recorded by version control.
///
/// Produced by the commit log loader and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    /// Identifier of the commit that last touched this line
    pub commit: String,
    /// Path of the file containing the line
    pub file: String,
    /// Line number within the file
    pub line: u32,
    /// Indentation depth of the line
    pub depth: u32,
    /// Length of the line in characters
    pub length: u32,
    /// Language tag of the file (e.g. `js`, `css`)
    #[serde(rename = "type")]
    pub language: String,
    /// Author of the commit
    pub author: String,
    /// Calendar date of the commit in the author's timezone
    pub date: NaiveDate,
    /// Wall-clock time of the commit, verbatim from the log
    pub time: String,
    /// UTC offset of the commit, verbatim from the log
    pub timezone: String,
    /// Full commit timestamp, carrying the author's UTC offset
    pub datetime: DateTime<FixedOffset>,
}

/// Aggregate of all [`LogLine`]s that share a commit identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    /// Fractional hour of day in `[0, 24)`
    pub hour_frac: f64,
    /// Number of lines in [`Commit::lines`]
    pub total_lines: usize,
    /// The lines of this commit in first-seen order. Never serialized with
    /// the commit itself.
    #[serde(skip)]
    pub lines: Vec<LogLine>,
}

/// A portfolio project as listed in the projects JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub image: String,
    pub description: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Project {
    /// All field values joined by newlines, in declaration order.
    ///
    /// Free-text search runs against this string.
    pub fn search_text(&self) -> String {
        let mut fields = vec![
            self.title.as_str(),
            self.image.as_str(),
            self.description.as_str(),
            self.year.as_str(),
        ];
        if let Some(link) = &self.link {
            fields.push(link);
        }
        fields.join("\n")
    }
}

/// The subset of a GitHub user profile shown on the home view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubProfile {
    pub avatar_url: String,
    pub login: String,
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
}
