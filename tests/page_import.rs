mod common;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::multipart::{MultipartForm, Part};
use peas::domain::entities::QueueName;

#[tokio::test]
async fn test_import_page_smoke() {
    let app = common::create_test_app(Some(common::sample_stats()));
    let cookie = common::sign_in(&app).await;

    let response = app
        .server
        .get("/import")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;

    response.assert_status_ok();

    let html = response.text();
    let title = common::page_title(&html).expect("page has a <title>");
    assert!(!title.is_empty());
    assert!(html.contains("<h1>Import</h1>"));
    assert!(!html.contains("Something went wrong"));
}

#[tokio::test]
async fn test_import_page_shows_stats() {
    let app = common::create_test_app(Some(common::sample_stats()));
    let cookie = common::sign_in(&app).await;

    let response = app
        .server
        .get("/import")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;

    let html = response.text();
    assert!(html.contains(">12<"));
    assert!(html.contains(">87<"));
    assert!(html.contains(">3<"));
    assert!(html.contains(common::TEST_EMAIL));
    assert_eq!(response.header(header::CACHE_CONTROL), "no-store");
}

#[tokio::test]
async fn test_import_page_empty_state_placeholder() {
    let app = common::create_test_app(Some(Default::default()));
    let cookie = common::sign_in(&app).await;

    let response = app
        .server
        .get("/import")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Nothing imported yet"));
}

#[tokio::test]
async fn test_import_page_without_session_redirects_to_login() {
    let app = common::create_test_app(Some(common::sample_stats()));

    let response = app.server.get("/import").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/login");
}

#[tokio::test]
async fn test_import_page_with_unknown_session_redirects_to_login() {
    let app = common::create_test_app(Some(common::sample_stats()));

    let response = app
        .server
        .get("/import")
        .add_header(
            header::COOKIE,
            HeaderValue::from_static("peas_session=not-a-real-token"),
        )
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/login");
}

#[tokio::test]
async fn test_import_page_stats_failure_renders_error_page() {
    let app = common::create_test_app(None);
    let cookie = common::sign_in(&app).await;

    let response = app
        .server
        .get("/import")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let html = response.text();
    assert!(html.contains("Go Home"));
    assert!(html.contains("Reference:"));
    assert!(!html.contains("connection refused"));
}

#[tokio::test]
async fn test_upload_queues_html_notes() {
    let app = common::create_test_app(Some(common::sample_stats()));
    let cookie = common::sign_in(&app).await;

    let form = MultipartForm::new()
        .add_part(
            "files",
            Part::bytes(b"<html><body>Pea soup</body></html>".to_vec())
                .file_name("pea-soup.html")
                .mime_type("text/html"),
        )
        .add_part(
            "files",
            Part::bytes(b"<html><body>Pea salad</body></html>".to_vec())
                .file_name("pea-salad.html")
                .mime_type("text/html"),
        );

    let response = app
        .server
        .post("/import/upload")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/import?queued=2");

    let jobs = app.queue.jobs();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.queue == QueueName::HtmlNote));
    assert_eq!(jobs[0].file_name, "pea-soup.html");
    assert!(app.uploads.path().join(&jobs[0].storage_key).exists());
}

#[tokio::test]
async fn test_upload_rejects_non_html() {
    let app = common::create_test_app(Some(common::sample_stats()));
    let cookie = common::sign_in(&app).await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(b"just text".to_vec())
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );

    let response = app
        .server
        .post("/import/upload")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Only HTML note exports can be imported"));
    assert!(app.queue.jobs().is_empty());
}

#[tokio::test]
async fn test_import_page_shows_queued_notice() {
    let app = common::create_test_app(Some(common::sample_stats()));
    let cookie = common::sign_in(&app).await;

    let response = app
        .server
        .get("/import")
        .add_query_param("queued", 2)
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;

    assert!(response.text().contains("2 file(s) queued for import."));
}

#[tokio::test]
async fn test_upload_rejects_txt_declared_as_html() {
    let app = common::create_test_app(Some(common::sample_stats()));
    let cookie = common::sign_in(&app).await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(b"<html><body>Pea soup</body></html>".to_vec())
            .file_name("notes.txt")
            .mime_type("text/html"),
    );

    let response = app
        .server
        .post("/import/upload")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.queue.jobs().is_empty());
}

#[tokio::test]
async fn test_upload_partially_queued_batch_reports_counts() {
    let app = common::create_test_app_with_queue(
        Some(common::sample_stats()),
        common::RecordingQueue::accepting(1),
    );
    let cookie = common::sign_in(&app).await;

    let form = MultipartForm::new()
        .add_part(
            "files",
            Part::bytes(b"<html><body>Pea soup</body></html>".to_vec())
                .file_name("a.html")
                .mime_type("text/html"),
        )
        .add_part(
            "files",
            Part::bytes(b"<html><body>Pea salad</body></html>".to_vec())
                .file_name("b.html")
                .mime_type("text/html"),
        );

    let response = app
        .server
        .post("/import/upload")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header(header::LOCATION),
        "/import?queued=1&failed=1"
    );

    let jobs = app.queue.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].file_name, "a.html");

    let stored = app.uploads.path().join(&jobs[0].storage_key);
    assert!(stored.exists());
    assert_eq!(std::fs::read_dir(stored.parent().unwrap()).unwrap().count(), 1);

    let page = app
        .server
        .get("/import")
        .add_query_param("queued", 1)
        .add_query_param("failed", 1)
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;
    assert!(page.text().contains("1 file(s) could not be queued."));
}

#[tokio::test]
async fn test_upload_queue_down_stores_nothing() {
    let app = common::create_test_app_with_queue(
        Some(common::sample_stats()),
        common::RecordingQueue::accepting(0),
    );
    let cookie = common::sign_in(&app).await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(b"<html><body>Pea soup</body></html>".to_vec())
            .file_name("a.html")
            .mime_type("text/html"),
    );

    let response = app
        .server
        .post("/import/upload")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .multipart(form)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("Go Home"));

    let notes_dir = app.uploads.path().join("notes");
    let files = walk(&notes_dir);
    assert!(files.is_empty(), "orphaned objects: {files:?}");
}

fn walk(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .flat_map(|entry| {
            let path = entry.path();
            if path.is_dir() { walk(&path) } else { vec![path] }
        })
        .collect()
}
