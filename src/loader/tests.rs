use super::*;
use crate::error::LoadError;
use chrono::Timelike;
use pretty_assertions::assert_eq;
use std::io::Cursor;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const HEADER: &str = "commit,author,date,time,timezone,datetime,line,depth,length,file,type";

fn sample_csv() -> String {
    [
        HEADER,
        "a1,Iris,2024-01-15,10:30:00,-08:00,2024-01-15T10:30:00-08:00,1,0,12,index.html,html",
        "a1,Iris,2024-01-15,10:30:00,-08:00,2024-01-15T10:30:00-08:00,2,1,20,style.css,css",
        "b2,Iris,2024-01-16,23:45:00,-08:00,2024-01-16T23:45:00-08:00,1,2,30,global.js,js",
    ]
    .join("\n")
}

/// Answer exactly one HTTP request with the given status and body.
async fn serve_once(status_line: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

fn local_client(base: &str) -> GitHubClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    GitHubClient::with_client(http, base)
}

#[test]
fn test_parse_log() {
    let lines = parse_log(sample_csv().as_bytes()).unwrap();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].commit, "a1");
    assert_eq!(lines[1].language, "css");
    assert_eq!(lines[2].depth, 2);
    assert_eq!(lines[2].datetime.hour(), 23);
    assert_eq!(lines[2].datetime.offset().local_minus_utc(), -8 * 3600);
    assert_eq!(lines[0].date.to_string(), "2024-01-15");
}

#[test]
fn test_missing_column_fails_whole_log() {
    let csv = "commit,author,date\na1,Iris,2024-01-15\n";
    let err = parse_log(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("time")));
}

#[test]
fn test_malformed_rows_are_skipped() {
    let csv = [
        HEADER,
        "a1,Iris,2024-01-15,10:30:00,-08:00,2024-01-15T10:30:00-08:00,1,0,12,index.html,html",
        "a1,Iris,2024-01-15,10:30:00,-08:00,not-a-timestamp,2,0,12,index.html,html",
        "a1,Iris,2024-01-15,10:30:00,-08:00,2024-01-15T10:30:00-08:00,three,0,12,index.html,html",
    ]
    .join("\n");

    let lines = parse_log(csv.as_bytes()).unwrap();
    assert_eq!(lines.len(), 1);
}

#[test]
fn test_empty_log_has_no_lines() {
    let lines = parse_log(HEADER.as_bytes()).unwrap();
    assert!(lines.is_empty());
}

#[test]
fn test_timestamp_formats() {
    let rfc = parse_timestamp("2024-03-01T08:15:00+02:00").unwrap();
    let iso = parse_timestamp("2024-03-01 08:15:00 +0200").unwrap();
    assert_eq!(rfc, iso);
    assert!(parse_timestamp("yesterday").is_err());
}

#[test]
fn test_parse_projects() {
    let json = r#"[
        {"title": "Lab 1", "image": "img/1.png", "description": "First", "year": "2023"},
        {"title": "Lab 2", "image": "img/2.png", "description": "Second", "year": " 2024 ", "link": "https://example.com"}
    ]"#;
    let projects = parse_projects(json.as_bytes()).unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].link, None);
    assert_eq!(projects[1].link.as_deref(), Some("https://example.com"));
    assert_eq!(projects[1].year, " 2024 ");
}

#[tokio::test]
async fn test_load_files_from_disk() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("loc.csv");
    let json_path = dir.path().join("projects.json");
    std::fs::write(&csv_path, sample_csv()).unwrap();
    std::fs::write(&json_path, "[]").unwrap();

    assert_eq!(load_log_lines(&csv_path).await.len(), 3);
    assert!(load_projects(&json_path).await.is_empty());
}

#[tokio::test]
async fn test_failures_surface_as_no_data() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ nope").unwrap();

    assert!(load_log_lines(&missing).await.is_empty());
    assert!(load_projects(&broken).await.is_empty());
    assert!(matches!(
        try_load_log_lines(&missing).await,
        Err(LoadError::Io { .. })
    ));
    assert!(matches!(try_load_projects(&broken).await, Err(LoadError::Json(_))));
}

#[test]
fn test_profile_url_ignores_trailing_slash() {
    let client = local_client("http://localhost:8080/");
    assert_eq!(client.profile_url("octocat"), "http://localhost:8080/users/octocat");
    let client = local_client("https://api.github.com");
    assert_eq!(client.profile_url("IrisC113"), "https://api.github.com/users/IrisC113");
}

#[tokio::test]
async fn test_fetch_profile() {
    let body = br#"{"avatar_url":"http://x/a.png","login":"IrisC113","public_repos":12,
        "public_gists":1,"followers":5,"following":7,"name":"ignored"}"#;
    let base = serve_once("200 OK", "application/json", body.to_vec()).await;

    let profile = load_profile(&local_client(&base), "IrisC113").await.unwrap();
    assert_eq!(profile.login, "IrisC113");
    assert_eq!(profile.public_repos, 12);
    assert_eq!(profile.following, 7);
}

#[tokio::test]
async fn test_fetch_profile_http_error() {
    let base = serve_once("404 Not Found", "application/json", b"{}".to_vec()).await;

    let client = local_client(&base);
    let err = client.fetch_profile("nobody").await.unwrap_err();
    match err {
        LoadError::Status { status, url } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(url, client.profile_url("nobody"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fetch_avatar_decodes_image() {
    let mut png = Vec::new();
    image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let base = serve_once("200 OK", "image/png", png).await;

    let avatar = load_avatar(&local_client(&base), &format!("{base}/avatar.png"))
        .await
        .unwrap();
    assert_eq!(avatar.dimensions(), (3, 2));
}
