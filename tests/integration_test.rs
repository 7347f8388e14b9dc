use folio::analysis::{language_breakdown, process_commits, summarize};
use folio::app::App;
use folio::config::{PreferenceStore, Settings};
use folio::loader::{load_log_lines, load_projects, load_site};
use folio::plotting::PieChart;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LOG: &str = "\
commit,author,date,time,timezone,datetime,line,depth,length,file,type
f1,Iris,2024-02-01,09:30:00,-05:00,2024-02-01T09:30:00-05:00,1,0,15,index.html,html
f1,Iris,2024-02-01,09:30:00,-05:00,2024-02-01T09:30:00-05:00,2,1,22,index.html,html
f2,Iris,2024-02-03,21:00:00,-05:00,2024-02-03T21:00:00-05:00,1,0,30,global.js,js
f2,Iris,2024-02-03,21:00:00,-05:00,2024-02-03T21:00:00-05:00,2,2,41,global.js,js
not-a-row
f3,Iris,2024-02-09,13:45:00,-05:00,2024-02-09T13:45:00-05:00,1,1,12,style.css,css
";

const PROJECTS: &str = r#"[
    {"title": "Lab Notebook", "image": "a.png", "description": "Weekly lab write-ups", "year": "2022"},
    {"title": "Weather Map", "image": "b.png", "description": "Choropleth of rainfall", "year": " 2022 "},
    {"title": "Folio", "image": "c.png", "description": "This site", "year": "2023", "link": "https://example.com"}
]"#;

fn setup_site() -> (TempDir, Settings) {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("meta")).unwrap();
    fs::create_dir_all(temp_dir.path().join("lib")).unwrap();
    fs::write(temp_dir.path().join("meta/loc.csv"), LOG).unwrap();
    fs::write(temp_dir.path().join("lib/projects.json"), PROJECTS).unwrap();

    let root = temp_dir.path().to_path_buf();
    let settings = Settings::from_lookup(|key| match key {
        "FOLIO_SITE_ROOT" => Some(root.display().to_string()),
        // nothing listens here, so the profile load fails fast
        "FOLIO_GITHUB_API" => Some("http://127.0.0.1:9".to_string()),
        _ => None,
    });
    (temp_dir, settings)
}

#[tokio::test]
async fn test_commit_log_to_breakdown() {
    let (_temp_dir, settings) = setup_site();
    let lines = load_log_lines(&settings.loc_csv_path()).await;
    assert_eq!(lines.len(), 5);

    let commits = process_commits(&lines, &settings.commit_url_base);
    assert_eq!(commits.len(), 3);
    assert_eq!(commits.iter().map(|c| c.total_lines).sum::<usize>(), lines.len());
    assert_eq!(commits[1].hour_frac, 21.0);

    let summary = summarize(&lines, &commits);
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.max_depth, 2);

    let shares: Vec<String> = language_breakdown(&commits)
        .iter()
        .map(|s| format!("{} {}", s.label(), s.summary()))
        .collect();
    assert_eq!(shares, vec!["HTML 2 lines (40%)", "JS 2 lines (40%)", "CSS 1 lines (20%)"]);
}

#[tokio::test]
async fn test_projects_pie_filters() {
    let (_temp_dir, settings) = setup_site();
    let projects = load_projects(&settings.projects_json_path()).await;
    let mut pie = PieChart::new(projects);

    assert_eq!(pie.title(), "Projects (3)");
    pie.toggle_bucket(0);
    assert_eq!(pie.title(), "Projects (2) in 2022");

    pie.set_query("rainfall");
    assert_eq!(pie.title(), "Projects (1) in 2022");

    pie.toggle_bucket(0);
    pie.set_query("");
    assert_eq!(pie.filtered_projects().len(), 3);
}

#[tokio::test]
async fn test_missing_files_yield_empty_site() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings {
        site_root: temp_dir.path().join("nowhere"),
        github_api: "http://127.0.0.1:9".to_string(),
        ..Settings::default()
    };

    let data = load_site(&settings).await;
    assert!(data.lines.is_empty());
    assert!(data.projects.is_empty());
    assert!(data.profile.is_none());
    assert!(data.avatar.is_none());
}

#[tokio::test]
async fn test_app_builds_views_from_loaded_site() {
    let (temp_dir, settings) = setup_site();
    let prefs = PreferenceStore::new(PathBuf::from(temp_dir.path()).join("prefs.json"));
    let mut app = App::new(settings.clone(), prefs);

    app.update_with_site_data(load_site(&settings).await);

    assert!(app.loaded);
    assert_eq!(app.summary.total_commits, 3);
    assert_eq!(app.latest_projects().len(), 3);
    assert_eq!(app.scatter.selection_count_label(), "No commits selected");
    assert!(app.profile.is_none());
}
