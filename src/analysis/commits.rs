use chrono::{DateTime, FixedOffset, Timelike};

use crate::types::{Commit, LogLine};
use crate::utils::group_by_first_seen;

/// Fractional hour of day on the timestamp's own wall clock.
pub fn hour_fraction(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

/// Group log lines into one [`Commit`] per commit identifier.
///
/// Commits appear in the order their identifiers are first seen. Scalar
/// fields come from each commit's first line; lines of one commit are
/// assumed to agree on author and timestamp.
pub fn process_commits(lines: &[LogLine], url_base: &str) -> Vec<Commit> {
    group_by_first_seen(lines, |line| line.commit.as_str())
        .into_iter()
        .map(|(id, group)| {
            let first = group[0];
            Commit {
                id: id.to_string(),
                url: format!("{url_base}{id}"),
                author: first.author.clone(),
                date: first.date,
                time: first.time.clone(),
                timezone: first.timezone.clone(),
                datetime: first.datetime,
                hour_frac: hour_fraction(&first.datetime),
                total_lines: group.len(),
                lines: group.into_iter().cloned().collect(),
            }
        })
        .collect()
}
