//! HTTP behaviour of the upload and file-serving routes

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use axum_test::TestServer;
use serde_json::Value;
use tower::ServiceExt;

use common::{docx, multipart_body, multipart_content_type, pdf_with_pages, png, Part, TestApp};

async fn post_upload(app: &TestApp, uri: &str, parts: &[Part<'_>]) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(parts)))
        .unwrap();

    app.router().oneshot(request).await.unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn one_page_pdf_returns_text_and_one_image() {
    let app = TestApp::new();
    let pdf = pdf_with_pages(&["Ini adalah teks test untuk PDF"]);

    let response = post_upload(&app, "/upload", &[Part::file("test.pdf", &pdf)]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["filename"], "test.pdf");
    assert!(body["text"]
        .as_str()
        .unwrap()
        .contains("Ini adalah teks test untuk PDF"));
    assert_eq!(body["images"], serde_json::json!(["/static/images/test_page_1.jpg"]));
    assert!(body.get("degraded").is_none());

    assert_eq!(app.upload_files(), vec!["test.pdf"]);
    assert_eq!(app.image_files(), vec!["test_page_1.jpg"]);
}

#[tokio::test]
async fn api_path_accepts_docx() {
    let app = TestApp::new();
    let document = docx(&["Quarterly report", "Second line"], &[("image1.png", png(4, 4))]);

    let response = post_upload(&app, "/api/upload", &[Part::file("Q3 report.docx", &document)]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["filename"], "Q3_report.docx");
    assert_eq!(body["text"], "Quarterly report\nSecond line");
    assert_eq!(body["text_length"], 28);
    assert_eq!(
        body["images"],
        serde_json::json!(["/static/images/Q3_report_image_1.jpg"])
    );
}

#[tokio::test]
async fn txt_preview_is_truncated_but_length_is_full() {
    let app = TestApp::new();
    let text = "x".repeat(1500);

    let response = post_upload(&app, "/upload", &[Part::file("long.txt", text.as_bytes())]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["text"], format!("{}...", "x".repeat(1000)));
    assert_eq!(body["text_length"], 1500);
    assert_eq!(body["images"], serde_json::json!([]));
}

#[tokio::test]
async fn missing_file_field_is_rejected_and_nothing_written() {
    let app = TestApp::new();

    let response = post_upload(&app, "/upload", &[Part::text("comment", b"hello")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json(response).await["error"].is_string());

    assert!(app.upload_files().is_empty());
    assert!(app.image_files().is_empty());
}

#[tokio::test]
async fn file_field_without_filename_counts_as_missing() {
    let app = TestApp::new();

    let response = post_upload(&app, "/upload", &[Part::text("file", b"not a file")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "No file part");
}

#[tokio::test]
async fn non_multipart_body_is_a_missing_file() {
    let app = TestApp::new();

    for content_type in [None, Some("application/json")] {
        let mut request = Request::builder().method("POST").uri("/upload");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::empty()).unwrap();

        let response = app.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(json(response).await["error"], "No file part");
    }
    assert!(app.upload_files().is_empty());
}

#[tokio::test]
async fn empty_filename_is_rejected() {
    let app = TestApp::new();

    let response = post_upload(&app, "/upload", &[Part::file("", b"data")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "No selected file");
    assert!(app.upload_files().is_empty());
}

#[tokio::test]
async fn disallowed_extension_is_rejected_regardless_of_content() {
    let app = TestApp::new();
    let pdf = pdf_with_pages(&["looks like a pdf"]);

    let response = post_upload(&app, "/upload", &[Part::file("notes.exe", &pdf)]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("not allowed"));
    assert!(app.upload_files().is_empty());
}

#[tokio::test]
async fn oversized_upload_is_rejected_with_413() {
    let app = TestApp::with_config(|config| config.upload.max_bytes = 1024);
    let text = vec![b'a'; 4096];

    let response = post_upload(&app, "/upload", &[Part::file("big.txt", &text)]).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json(response).await["error"].is_string());
    assert!(app.upload_files().is_empty());
}

#[tokio::test]
async fn unreadable_document_still_succeeds_with_degraded_stages() {
    let app = TestApp::new();

    let response = post_upload(&app, "/upload", &[Part::file("fake.docx", b"not a zip")]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["text"], "");
    assert_eq!(body["text_length"], 0);
    assert_eq!(body["images"], serde_json::json!([]));

    let stages: Vec<&str> = body["degraded"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["stage"].as_str().unwrap())
        .collect();
    assert_eq!(stages, vec!["text", "images"]);
}

#[tokio::test]
async fn storage_failure_is_a_500_with_the_message() {
    let app = TestApp::new();
    std::fs::remove_dir_all(&app.state.config().storage.upload_dir).unwrap();

    let response = post_upload(&app, "/upload", &[Part::file("notes.txt", b"hello")]).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error = json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("IO error:"), "unexpected error: {}", error);
}

#[tokio::test]
async fn repeated_upload_gives_same_result() {
    let app = TestApp::new();
    let pdf = pdf_with_pages(&["Same content twice"]);

    let first = json(post_upload(&app, "/upload", &[Part::file("again.pdf", &pdf)]).await).await;
    let second = json(post_upload(&app, "/upload", &[Part::file("again.pdf", &pdf)]).await).await;

    assert_eq!(first, second);
    assert_eq!(app.image_files(), vec!["again_page_1.jpg"]);
}

#[tokio::test]
async fn uploaded_files_and_images_are_served() {
    let app = TestApp::new();
    let pdf = pdf_with_pages(&["Served back"]);
    let response = post_upload(&app, "/upload", &[Part::file("served.pdf", &pdf)]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let server = TestServer::new(app.router()).unwrap();

    let upload = server.get("/uploads/served.pdf").await;
    upload.assert_status_ok();
    assert_eq!(upload.header(header::CONTENT_TYPE), "application/pdf");
    assert_eq!(upload.as_bytes().as_ref(), pdf.as_slice());

    let image = server.get("/static/images/served_page_1.jpg").await;
    image.assert_status_ok();
    assert_eq!(image.header(header::CONTENT_TYPE), "image/jpeg");
}

#[tokio::test]
async fn unknown_files_are_not_found() {
    let app = TestApp::new();
    let server = TestServer::new(app.router()).unwrap();

    let response = server.get("/uploads/missing.pdf").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"].is_string());

    server
        .get("/static/images/..%2Fsecret.jpg")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_version() {
    let app = TestApp::new();
    let server = TestServer::new(app.router()).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
