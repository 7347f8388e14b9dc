use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::LogLine;

/// Columns every commit log must carry.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "commit", "author", "date", "time", "timezone", "datetime", "line", "depth", "length", "file",
    "type",
];

#[derive(Debug, Deserialize)]
struct LogRecord {
    commit: String,
    author: String,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
    line: u32,
    depth: u32,
    length: u32,
    file: String,
    #[serde(rename = "type")]
    language: String,
}

impl LogRecord {
    fn into_log_line(self) -> LoadResult<LogLine> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            LoadError::Timestamp {
                value: self.date.clone(),
            }
        })?;
        let datetime = parse_timestamp(&self.datetime)?;

        Ok(LogLine {
            commit: self.commit,
            file: self.file,
            line: self.line,
            depth: self.depth,
            length: self.length,
            language: self.language,
            author: self.author,
            date,
            time: self.time,
            timezone: self.timezone,
            datetime,
        })
    }
}

/// Parse a commit timestamp, accepting RFC 3339 as well as the
/// space-separated form `git log --date=iso` prints.
pub fn parse_timestamp(value: &str) -> LoadResult<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z"))
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|_| LoadError::Timestamp {
            value: value.to_string(),
        })
}

/// Parse a commit log from CSV.
///
/// A missing column fails the whole log; individual malformed rows are
/// skipped with a warning.
pub fn parse_log<R: Read>(reader: R) -> LoadResult<Vec<LogLine>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut lines = Vec::new();
    let mut skipped = 0usize;
    for (row, record) in rdr.deserialize::<LogRecord>().enumerate() {
        match record.map_err(LoadError::from).and_then(LogRecord::into_log_line) {
            Ok(line) => lines.push(line),
            Err(e) => {
                skipped += 1;
                tracing::warn!(row = row + 1, error = %e, "skipping malformed log row");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, kept = lines.len(), "commit log had malformed rows");
    }
    Ok(lines)
}

pub async fn try_load_log_lines(path: &Path) -> LoadResult<Vec<LogLine>> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_log(bytes.as_slice())
}

/// Load the commit log, reporting failures and returning an empty log
/// instead.
pub async fn load_log_lines(path: &Path) -> Vec<LogLine> {
    match try_load_log_lines(path).await {
        Ok(lines) => {
            tracing::info!(path = %path.display(), lines = lines.len(), "loaded commit log");
            lines
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to load commit log");
            Vec::new()
        }
    }
}
