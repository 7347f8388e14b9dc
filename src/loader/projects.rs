use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::Project;

pub fn parse_projects(bytes: &[u8]) -> LoadResult<Vec<Project>> {
    Ok(serde_json::from_slice(bytes)?)
}

pub async fn try_load_projects(path: &Path) -> LoadResult<Vec<Project>> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_projects(&bytes)
}

/// Load the project list, reporting failures and returning no projects
/// instead.
pub async fn load_projects(path: &Path) -> Vec<Project> {
    match try_load_projects(path).await {
        Ok(projects) => {
            tracing::info!(path = %path.display(), count = projects.len(), "loaded projects");
            projects
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to load projects");
            Vec::new()
        }
    }
}
