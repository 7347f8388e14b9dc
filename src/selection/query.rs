use super::Filter;
use crate::types::Project;

/// Projects view filter: an optional year bucket AND a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Selected year label, compared against the trimmed project year
    pub year: Option<String>,
    pub query: String,
}

impl ProjectFilter {
    /// Case-insensitive substring match over all of the project's fields.
    pub fn matches_query(&self, project: &Project) -> bool {
        if self.query.is_empty() {
            return true;
        }
        project
            .search_text()
            .to_lowercase()
            .contains(&self.query.to_lowercase())
    }

    pub fn matches_year(&self, project: &Project) -> bool {
        self.year
            .as_deref()
            .map_or(true, |year| project.year.trim() == year)
    }
}

impl Filter<Project> for ProjectFilter {
    fn matches(&self, project: &Project) -> bool {
        self.matches_query(project) && self.matches_year(project)
    }

    fn is_active(&self) -> bool {
        self.year.is_some() || !self.query.is_empty()
    }
}
