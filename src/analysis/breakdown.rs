use crate::types::Commit;
use crate::utils::count_by_first_seen;
use crate::utils::format::format_percent;

/// Lines of one language within a set of commits.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub language: String,
    pub lines: usize,
    /// `lines` divided by all lines in the set, in `[0, 1]`
    pub share: f64,
}

impl LanguageShare {
    pub fn label(&self) -> String {
        self.language.to_uppercase()
    }

    /// E.g. `12 lines (33.3%)`.
    pub fn summary(&self) -> String {
        format!("{} lines ({})", self.lines, format_percent(self.share))
    }
}

/// Per-language line counts over the given commits, in the order each
/// language is first seen.
pub fn language_breakdown<'a>(commits: impl IntoIterator<Item = &'a Commit>) -> Vec<LanguageShare> {
    let lines: Vec<_> = commits.into_iter().flat_map(|c| c.lines.iter()).collect();
    let total = lines.len();
    if total == 0 {
        return Vec::new();
    }

    count_by_first_seen(lines, |line| line.language.clone())
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language,
            lines: count,
            share: count as f64 / total as f64,
        })
        .collect()
}
