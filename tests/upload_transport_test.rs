use httpmock::prelude::*;
use fupload::api::ApiClient;
use fupload::commands::UploadController;
use fupload::domain::notification::{Notification, NotificationStyle, NotificationSurface};
use fupload::domain::session::UploadOutcome;
use fupload::domain::validator::{CandidateFile, ValidationPolicy};
use fupload::presentation::input::FileInput;
use std::time::Duration;
use tempfile::TempDir;

/// 通知と進捗を記録するだけの表示先
#[derive(Default)]
struct RecordingSurface {
    notifications: Vec<Notification>,
    progress: Vec<u8>,
}

impl NotificationSurface for RecordingSurface {
    fn show(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn render_progress(&mut self, _file_name: &str, percent: u8) {
        self.progress.push(percent);
    }
}

fn controller(endpoint: String) -> UploadController<ApiClient, RecordingSurface> {
    let client = ApiClient::new(endpoint, Duration::from_secs(5)).unwrap();
    UploadController::new(
        client,
        RecordingSurface::default(),
        ValidationPolicy::default(),
        FileInput::new(),
    )
}

fn json_file(name: &str, size: usize) -> CandidateFile {
    let mut body = b"{\"items\":\"".to_vec();
    body.resize(size.saturating_sub(2), b'a');
    body.extend_from_slice(b"\"}");
    CandidateFile::from_bytes(name, "application/json", body)
}

/// 受理されたファイルが multipart の "file" フィールドで送られる
#[tokio::test]
async fn test_accepted_file_is_posted_as_multipart() {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/fUpload")
            .header_exists("content-type")
            .body_contains("name=\"file\"")
            .body_contains("filename=\"data.json\"");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":"ok"}"#);
    });

    let mut controller = controller(server.url("/fUpload"));
    let outcome = controller.on_file_selected(Some(json_file("data.json", 4096))).await;

    upload_mock.assert();
    assert_eq!(
        outcome,
        Some(UploadOutcome::Succeeded {
            file_name: "data.json".to_string()
        })
    );

    let surface = controller.surface();
    assert_eq!(surface.notifications.len(), 1);
    assert_eq!(surface.notifications[0].message, "File uploaded successfully");
    assert_eq!(surface.notifications[0].style, NotificationStyle::Success);
    assert_eq!(surface.progress.first(), Some(&0));
    assert!(surface.progress.windows(2).all(|w| w[0] < w[1]));
    assert!(controller.session().is_idle());
}

/// 空でない2xxであればJSONでなくても成功扱い
#[tokio::test]
async fn test_non_json_success_body_is_still_success() {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/fUpload");
        then.status(201).body("created");
    });

    let mut controller = controller(server.url("/fUpload"));
    let outcome = controller.on_file_selected(Some(json_file("data.json", 128))).await;

    upload_mock.assert();
    assert!(outcome.is_some_and(|o| o.is_success()));
}

/// 拒否されたファイルはネットワークに出ない
#[tokio::test]
async fn test_rejected_file_makes_no_request() {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/fUpload");
        then.status(200);
    });

    let mut controller = controller(server.url("/fUpload"));
    let oversized = json_file("big.json", 20 * 1024);
    let outcome = controller.on_file_selected(Some(oversized)).await;

    upload_mock.assert_hits(0);
    assert!(outcome.is_some_and(|o| !o.is_success()));
    assert_eq!(
        controller.surface().notifications[0].message,
        "File size exceeds maximum allowed size of 10KB"
    );
}

/// サーバーエラーは「Upload failed: 」に続けて通知される
#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/fUpload");
        then.status(500).body("boom");
    });

    let endpoint = server.url("/fUpload");
    let mut controller = controller(endpoint.clone());
    let outcome = controller.on_file_selected(Some(json_file("data.json", 64))).await;

    upload_mock.assert();
    assert!(outcome.is_some_and(|o| !o.is_success()));

    let notification = &controller.surface().notifications[0];
    assert_eq!(notification.style, NotificationStyle::Error);
    assert_eq!(notification.duration_ms, 5000);
    assert_eq!(
        notification.message,
        format!(
            "Upload failed: Http failure response for {}: 500 Internal Server Error",
            endpoint
        )
    );
    assert!(controller.session().is_idle());
}

/// 接続できない場合もエラー通知とリセットで終わる
#[tokio::test]
async fn test_connection_refused_is_reported() {
    let mut controller = controller("http://127.0.0.1:1/fUpload".to_string());
    let outcome = controller.on_file_selected(Some(json_file("data.json", 64))).await;

    assert!(outcome.is_some_and(|o| !o.is_success()));
    let notification = &controller.surface().notifications[0];
    assert!(notification.message.starts_with("Upload failed: "));
    assert!(controller.session().is_idle());
    assert!(controller.input().value().is_none());
}

/// ディスク上のファイルを選択して送信し、同じファイルを再選択できる
#[tokio::test]
async fn test_file_on_disk_can_be_uploaded_twice() {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/fUpload")
            .body_contains("{\"id\":1}");
        then.status(200).body("{}");
    });

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("record.json");
    std::fs::write(&path, r#"{"id":1}"#).unwrap();
    let path = path.to_str().unwrap().to_string();

    let mut controller = controller(server.url("/fUpload"));
    for _ in 0..2 {
        let selection = controller.input_mut().select(&path).unwrap();
        let outcome = controller.on_file_selected(selection).await;
        assert!(outcome.is_some_and(|o| o.is_success()));
        assert!(controller.input().value().is_none());
    }

    upload_mock.assert_hits(2);
}

/// 選択後に上限を超えて書き換えられたファイルは送信されない
#[tokio::test]
async fn test_file_grown_after_selection_is_not_uploaded() {
    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/fUpload");
        then.status(200).body("{}");
    });

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    std::fs::write(&path, b"{}").unwrap();
    let path_str = path.to_str().unwrap().to_string();

    let mut controller = controller(server.url("/fUpload"));
    let selection = controller.input_mut().select(&path_str).unwrap();
    std::fs::write(&path, vec![b' '; 51200]).unwrap();

    let outcome = controller.on_file_selected(selection).await;

    upload_mock.assert_hits(0);
    assert!(outcome.is_some_and(|o| !o.is_success()));
    let notification = &controller.surface().notifications[0];
    assert_eq!(notification.style, NotificationStyle::Error);
    assert!(notification.message.starts_with("Upload failed: "));
    assert!(notification.message.contains("changed after it was selected"));
    assert!(controller.session().is_idle());
    assert!(controller.input().value().is_none());
}
