use eframe::App as EApp;
use egui::TextureHandle;
use image::RgbaImage;
use std::sync::{Arc, Mutex};

use crate::analysis::{process_commits, summarize, CommitSummary};
use crate::config::{ColorScheme, PreferenceStore, Settings};
use crate::loader::SiteData;
use crate::plotting::{PieChart, ScatterPlot};
use crate::selection::RevisionWatch;
use crate::types::{GitHubProfile, Project};

/// How many projects the home view lists.
pub const LATEST_PROJECT_COUNT: usize = 3;

/// Top-level views reachable from the navigation bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Projects,
    Meta,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Projects, Page::Meta];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Projects => "Projects",
            Page::Meta => "Meta",
        }
    }
}

/// A chart texture plus what it was last rendered from.
#[derive(Default)]
pub struct ChartTexture {
    pub texture: Option<TextureHandle>,
    pub watch: RevisionWatch,
    pub dark_mode: Option<bool>,
}

impl ChartTexture {
    /// Whether the chart must be drawn again for `revision` in the given mode.
    pub fn is_stale(&mut self, revision: u64, dark_mode: bool) -> bool {
        let mode_changed = self.dark_mode != Some(dark_mode);
        self.dark_mode = Some(dark_mode);
        // always poll the watch so it records the revision
        let revision_changed = self.watch.changed(revision);
        mode_changed || revision_changed
    }

    pub fn invalidate(&mut self) {
        self.watch.invalidate();
    }
}

/// Main application state
pub struct App {
    pub settings: Settings,
    pub preferences: PreferenceStore,
    pub color_scheme: ColorScheme,
    pub page: Page,
    pub is_loading: bool,
    pub loaded: bool,
    pub summary: CommitSummary,
    pub scatter: ScatterPlot,
    pub pie: PieChart,
    pub profile: Option<GitHubProfile>,
    /// Decoded avatar waiting to be uploaded as a texture
    pub pending_avatar: Option<RgbaImage>,
    pub avatar_texture: Option<TextureHandle>,
    pub scatter_texture: ChartTexture,
    pub pie_texture: ChartTexture,
    /// Contents of the projects search box
    pub search: String,
}

impl App {
    pub fn new(settings: Settings, preferences: PreferenceStore) -> Self {
        let color_scheme = preferences.load_color_scheme();
        Self {
            settings,
            preferences,
            color_scheme,
            page: Page::default(),
            is_loading: false,
            loaded: false,
            summary: CommitSummary::default(),
            scatter: ScatterPlot::new(Vec::new()),
            pie: PieChart::new(Vec::new()),
            profile: None,
            pending_avatar: None,
            avatar_texture: None,
            scatter_texture: ChartTexture::default(),
            pie_texture: ChartTexture::default(),
            search: String::new(),
        }
    }

    /// Rebuild every view from freshly loaded data.
    pub fn update_with_site_data(&mut self, data: SiteData) {
        let commits = process_commits(&data.lines, &self.settings.commit_url_base);
        self.summary = summarize(&data.lines, &commits);
        tracing::info!(
            lines = data.lines.len(),
            commits = commits.len(),
            projects = data.projects.len(),
            profile = data.profile.is_some(),
            "site data loaded"
        );

        self.scatter = ScatterPlot::new(commits);
        self.pie = PieChart::new(data.projects);
        if !self.search.is_empty() {
            self.pie.set_query(&self.search);
        }
        self.profile = data.profile;
        self.pending_avatar = data.avatar;
        self.avatar_texture = None;

        self.scatter_texture.invalidate();
        self.pie_texture.invalidate();
        self.is_loading = false;
        self.loaded = true;
    }

    /// Switch colour scheme and persist the choice. Returns `true` if the
    /// scheme changed.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) -> bool {
        if self.color_scheme == scheme {
            return false;
        }
        self.color_scheme = scheme;
        tracing::info!(scheme = scheme.label(), "color scheme changed");
        if let Err(e) = self.preferences.save_color_scheme(scheme) {
            tracing::warn!(error = %e, "could not save color scheme");
        }
        true
    }

    /// Apply the search box contents to the projects view.
    pub fn apply_search(&mut self) -> bool {
        self.pie.set_query(&self.search)
    }

    /// Placeholder for the project list when nothing passes the filters.
    pub fn projects_message(&self) -> Option<&'static str> {
        self.pie
            .filtered_projects()
            .is_empty()
            .then_some("No projects available.")
    }

    /// The first few projects in file order.
    pub fn latest_projects(&self) -> &[Project] {
        let projects = self.pie.projects();
        &projects[..projects.len().min(LATEST_PROJECT_COUNT)]
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            tracing::error!("failed to acquire app lock in update");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_timestamp;
    use crate::types::LogLine;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let prefs = PreferenceStore::new(dir.path().join("preferences.json"));
        (App::new(Settings::default(), prefs), dir)
    }

    fn project(title: &str, year: &str) -> Project {
        Project {
            title: title.to_string(),
            image: String::new(),
            description: String::new(),
            year: year.to_string(),
            link: None,
        }
    }

    fn line(commit: &str, file: &str) -> LogLine {
        let datetime = parse_timestamp("2024-05-02T14:15:00+02:00").unwrap();
        LogLine {
            commit: commit.to_string(),
            file: file.to_string(),
            line: 1,
            depth: 0,
            length: 5,
            language: "js".to_string(),
            author: "Iris".to_string(),
            date: datetime.date_naive(),
            time: "14:15:00".to_string(),
            timezone: "+02:00".to_string(),
            datetime,
        }
    }

    #[test]
    fn test_new_app_starts_empty_on_home() {
        let (app, _dir) = test_app();
        assert_eq!(app.page, Page::Home);
        assert_eq!(app.color_scheme, ColorScheme::Automatic);
        assert!(app.scatter.is_empty());
        assert!(app.latest_projects().is_empty());
        assert!(!app.loaded);
    }

    #[test]
    fn test_update_with_site_data_builds_views() {
        let (mut app, _dir) = test_app();
        app.is_loading = true;
        app.update_with_site_data(SiteData {
            lines: vec![line("a", "x.js"), line("a", "y.js"), line("b", "x.js")],
            projects: vec![
                project("One", "2024"),
                project("Two", "2024"),
                project("Three", "2023"),
                project("Four", "2022"),
            ],
            profile: None,
            avatar: None,
        });

        assert!(app.loaded);
        assert!(!app.is_loading);
        assert_eq!(app.summary.total_commits, 2);
        assert_eq!(app.summary.total_files, 2);
        assert_eq!(app.scatter.commits().len(), 2);
        assert_eq!(app.scatter.commits()[0].url, format!("{}a", app.settings.commit_url_base));
        let latest: Vec<&str> = app.latest_projects().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(latest, vec!["One", "Two", "Three"]);
        assert_eq!(app.pie.buckets().len(), 3);
    }

    #[test]
    fn test_search_survives_reload() {
        let (mut app, _dir) = test_app();
        app.search = "two".to_string();
        app.update_with_site_data(SiteData {
            projects: vec![project("One", "2024"), project("Two", "2023")],
            ..SiteData::default()
        });
        assert_eq!(app.pie.filtered_projects().len(), 1);
        assert!(!app.apply_search());
    }

    #[test]
    fn test_projects_message_only_when_nothing_matches() {
        let (mut app, _dir) = test_app();
        assert_eq!(app.projects_message(), Some("No projects available."));

        app.update_with_site_data(SiteData {
            projects: vec![project("One", "2024")],
            ..SiteData::default()
        });
        assert_eq!(app.projects_message(), None);

        app.search = "nothing like this".to_string();
        assert!(app.apply_search());
        assert_eq!(app.projects_message(), Some("No projects available."));
    }

    #[test]
    fn test_color_scheme_is_persisted() {
        let (mut app, dir) = test_app();
        assert!(app.set_color_scheme(ColorScheme::Dark));
        assert!(!app.set_color_scheme(ColorScheme::Dark));

        let reopened = PreferenceStore::new(dir.path().join("preferences.json"));
        assert_eq!(reopened.load_color_scheme(), ColorScheme::Dark);
    }

    #[test]
    fn test_chart_texture_goes_stale_on_revision_or_mode() {
        let mut chart = ChartTexture::default();
        assert!(chart.is_stale(0, true));
        assert!(!chart.is_stale(0, true));
        assert!(chart.is_stale(1, true));
        assert!(chart.is_stale(1, false));
        chart.invalidate();
        assert!(chart.is_stale(1, false));
    }
}
