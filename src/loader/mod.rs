//! Loading of the site's external resources.
//!
//! Every `load_*` function reports its own failures and hands back an empty
//! result, so callers only ever deal with "data" or "no data".

pub mod github;
mod log;
mod projects;

#[cfg(test)]
mod tests;

use image::RgbaImage;

use crate::config::Settings;
use crate::types::{GitHubProfile, LogLine, Project};

pub use github::{load_avatar, load_profile, GitHubClient};
pub use log::{load_log_lines, parse_log, parse_timestamp, try_load_log_lines, REQUIRED_COLUMNS};
pub use projects::{load_projects, parse_projects, try_load_projects};

/// Everything the views need, as loaded at startup.
#[derive(Default)]
pub struct SiteData {
    pub lines: Vec<LogLine>,
    pub projects: Vec<Project>,
    pub profile: Option<GitHubProfile>,
    pub avatar: Option<RgbaImage>,
}

async fn load_github(settings: &Settings) -> (Option<GitHubProfile>, Option<RgbaImage>) {
    let client = match GitHubClient::new(settings.github_api.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "could not build HTTP client");
            return (None, None);
        }
    };

    let profile = load_profile(&client, &settings.github_user).await;
    let avatar = match &profile {
        Some(p) => load_avatar(&client, &p.avatar_url).await,
        None => None,
    };
    (profile, avatar)
}

/// Load the commit log, the project list and the GitHub profile
/// concurrently, one request per resource.
pub async fn load_site(settings: &Settings) -> SiteData {
    let loc_path = settings.loc_csv_path();
    let projects_path = settings.projects_json_path();

    let (lines, projects, (profile, avatar)) = futures::join!(
        load_log_lines(&loc_path),
        load_projects(&projects_path),
        load_github(settings),
    );

    SiteData {
        lines,
        projects,
        profile,
        avatar,
    }
}
