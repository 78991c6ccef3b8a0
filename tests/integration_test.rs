use std::sync::{Arc, Mutex};

use assessment_form_creator::api::{BatchUpdateFormRequest, CreateFormRequest};
use assessment_form_creator::config::Config;
use assessment_form_creator::error::{ApiError, CredentialError};
use assessment_form_creator::services::{AuditLog, DriveApi, FormsApi};
use assessment_form_creator::utils::logging;
use assessment_form_creator::web::{router, AppState};
use assessment_form_creator::workflow::FilingStatus;
use assessment_form_creator::{
    AppError, AppResult, AuditRow, FormSubmission, GoogleServices, Question, RemoteForm, SubmissionFlow,
    TestConfig, TrainerInfo,
};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Default)]
struct RecordingForms {
    batches: Mutex<Vec<BatchUpdateFormRequest>>,
}

impl FormsApi for RecordingForms {
    async fn create_form(&self, request: &CreateFormRequest) -> AppResult<RemoteForm> {
        assert_eq!(request.info.title, request.info.document_title);
        Ok(RemoteForm::new("integrationForm1"))
    }

    async fn batch_update(&self, _form_id: &str, request: &BatchUpdateFormRequest) -> AppResult<()> {
        self.batches.lock().unwrap().push(request.clone());
        Ok(())
    }
}

struct FailingDrive;

impl DriveApi for FailingDrive {
    async fn move_to_folder(&self, _file_id: &str, _folder_id: &str) -> AppResult<()> {
        Err(AppError::bad_response("drive.files.update", 404, "File not found: folder"))
    }
}

#[derive(Clone, Default)]
struct SharedAudit {
    rows: Arc<Mutex<Vec<AuditRow>>>,
}

impl AuditLog for SharedAudit {
    async fn append_row(&self, row: &AuditRow) -> AppResult<()> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }
}

/// 在随机端口启动服务，返回基础地址
async fn spawn_app(audit: SharedAudit) -> String {
    let state = AppState::new(RecordingForms::default(), FailingDrive, audit, "folder1");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_generate_with_filing_failure_still_reports() {
    logging::init(false);

    let audit = SharedAudit::default();
    let base = spawn_app(audit.clone()).await;

    let html = reqwest::Client::new()
        .post(format!("{}/", base))
        .form(&[
            ("trainer_name", "Ravi"),
            ("college_name", "ABC College"),
            ("test_title", "Aptitude Test"),
            ("count", "2"),
            ("q0", "2+2?"),
            ("q0opt1", "3"),
            ("q0opt2", "4"),
            ("q0opt3", "5"),
            ("q0opt4", "6"),
            ("q0ans", "1"),
            ("q1", "Largest planet?"),
            ("q1opt1", "Mars"),
            ("q1opt2", "Jupiter"),
            ("q1opt3", "Venus"),
            ("q1opt4", "Earth"),
            ("q1ans", "1"),
            ("action", "generate"),
        ])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("Could not move form to the folder"));
    assert!(html.contains("Google Form created successfully!"));
    assert!(html.contains("https://docs.google.com/forms/d/integrationForm1/viewform"));
    assert!(html.contains("data:image/png;base64,"));

    let rows = audit.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    let values = rows[0].to_values();
    assert_eq!(values[1], "Ravi");
    assert_eq!(values[2], "ABC College");
    assert_eq!(values[3], "Aptitude Test");
    assert_eq!(values[4], "https://docs.google.com/forms/d/integrationForm1/viewform");
}

#[tokio::test]
async fn test_refresh_does_not_create_form() {
    let audit = SharedAudit::default();
    let base = spawn_app(audit.clone()).await;
    let client = reqwest::Client::new();

    let html = client
        .post(format!("{}/", base))
        .form(&[("count", "3"), ("q2", "Kept prompt"), ("action", "refresh")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains(r#"value="Kept prompt""#));
    assert!(html.contains(r#"name="q2opt4""#));
    assert!(!html.contains("created successfully"));
    assert!(audit.rows.lock().unwrap().is_empty());

    let index = client
        .get(format!("{}/?count=60", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(index.contains(r#"name="q49""#));
    assert!(!index.contains(r#"name="q50""#));

    for bad in ["abc", "-1"] {
        let response = client
            .get(format!("{}/?count={}", base, bad))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let page = response.text().await.unwrap();
        assert!(page.contains(r#"name="q0""#));
        assert!(!page.contains(r#"name="q1""#));
    }

    let health = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(health.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_startup_fails_without_credentials() {
    let config = Config {
        secrets_file: "/nonexistent/secrets.toml".to_string(),
        service_account_json: None,
        ..Config::default()
    };
    let err = GoogleServices::connect(&config).await.err().unwrap();
    assert!(format!("{:#}", err).contains("gcp_service_account"));
}

#[tokio::test]
async fn test_startup_rejects_bad_folder_id() {
    let config = Config {
        destination_folder_id: "../root".to_string(),
        ..Config::default()
    };
    assert!(GoogleServices::connect(&config).await.is_err());
}

/// 本地 Google 替身收到的请求
#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    uri: String,
    authorization: Option<String>,
    body: String,
}

type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

fn google_error(status: StatusCode, message: &str, code: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "error": { "code": status.as_u16(), "message": message, "status": code } })),
    )
}

async fn fake_google(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    log.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        uri: uri.to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match (method.as_str(), path.as_str()) {
        ("POST", "/token") => (
            StatusCode::OK,
            Json(json!({ "access_token": "fake-token", "expires_in": 3600, "token_type": "Bearer" })),
        ),
        ("POST", "/token-denied") => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid JWT Signature." })),
        ),
        ("GET", "/drive/files") => (
            StatusCode::OK,
            Json(json!({ "files": [{ "id": "sheetid1", "name": "Pre-Post Test" }] })),
        ),
        ("GET", "/sheets/spreadsheets/sheetid1") => (
            StatusCode::OK,
            Json(json!({ "sheets": [
                { "properties": { "sheetId": 7, "title": "Archive", "index": 1 } },
                { "properties": { "sheetId": 0, "title": "Sheet1", "index": 0 } }
            ] })),
        ),
        ("POST", "/forms/forms") => (
            StatusCode::OK,
            Json(json!({ "formId": "form1", "responderUri": "https://docs.google.com/forms/d/e/form1/viewform" })),
        ),
        ("POST", "/forms/forms/form1:batchUpdate") => (StatusCode::OK, Json(json!({ "replies": [] }))),
        ("PATCH", "/drive/files/form1") => (StatusCode::OK, Json(json!({ "id": "form1", "parents": ["folderX"] }))),
        ("PATCH", "/drive/files/lockedForm") => google_error(
            StatusCode::FORBIDDEN,
            "Insufficient permissions for this file",
            "PERMISSION_DENIED",
        ),
        ("POST", p) if p.starts_with("/sheets/spreadsheets/sheetid1/values/") => {
            (StatusCode::OK, Json(json!({ "updates": { "updatedRows": 1 } })))
        }
        _ => google_error(StatusCode::NOT_FOUND, "Requested entity was not found.", "NOT_FOUND"),
    }
}

/// 启动本地 Google 替身，返回基础地址与请求记录
async fn spawn_fake_google() -> (String, RequestLog) {
    let log = RequestLog::default();
    let app = Router::new().fallback(fake_google).with_state(log.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), log)
}

/// 所有 Google 地址（含令牌地址）都指向本地替身
fn fake_google_config(base: &str, token_path: &str) -> Config {
    let mut key: Value = serde_json::from_str(include_str!("fixtures/service_account.json")).unwrap();
    key["token_uri"] = json!(format!("{}{}", base, token_path));

    Config {
        service_account_json: Some(key.to_string()),
        destination_folder_id: "folderX".to_string(),
        forms_api_base_url: format!("{}/forms", base),
        drive_api_base_url: format!("{}/drive", base),
        sheets_api_base_url: format!("{}/sheets", base),
        ..Config::default()
    }
}

fn aptitude_submission() -> FormSubmission {
    FormSubmission::new(
        TrainerInfo::new("Ravi", "ABC College"),
        TestConfig::new("Aptitude Test", 2),
        vec![
            Question::new("2+2?", ["3".into(), "4".into(), "5".into(), "6".into()], 1),
            Question::new(
                "Largest planet?",
                ["Mars".into(), "Jupiter".into(), "Venus".into(), "Earth".into()],
                1,
            ),
        ],
    )
}

#[tokio::test]
async fn test_google_clients_wire_requests() {
    let (base, log) = spawn_fake_google().await;
    let config = fake_google_config(&base, "/token");

    let services = GoogleServices::connect(&config).await.unwrap();
    assert_eq!(services.sheet.sheet_title(), "Sheet1");

    let flow = SubmissionFlow::new(&services.forms, &services.drive, &services.sheet, "folderX");
    let outcome = flow.run(&aptitude_submission()).await.unwrap();
    assert_eq!(outcome.form.form_id, "form1");
    assert_eq!(outcome.filing, FilingStatus::Filed);

    let requests = log.lock().unwrap().clone();
    let summary: Vec<(String, String)> = requests
        .iter()
        .map(|r| (r.method.to_string(), r.uri.split('?').next().unwrap_or_default().to_string()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("POST".to_string(), "/token".to_string()),
            ("GET".to_string(), "/drive/files".to_string()),
            ("GET".to_string(), "/sheets/spreadsheets/sheetid1".to_string()),
            ("POST".to_string(), "/forms/forms".to_string()),
            ("POST".to_string(), "/forms/forms/form1:batchUpdate".to_string()),
            ("PATCH".to_string(), "/drive/files/form1".to_string()),
            ("POST".to_string(), "/sheets/spreadsheets/sheetid1/values/'Sheet1':append".to_string()),
        ]
    );

    // 令牌只换取一次，之后的请求都带 Bearer
    let token = &requests[0];
    assert!(token.authorization.is_none());
    assert!(token
        .body
        .starts_with("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer&assertion=ey"));
    for request in &requests[1..] {
        assert_eq!(request.authorization.as_deref(), Some("Bearer fake-token"));
    }

    let list = &requests[1];
    assert!(list.uri.contains("q=name+%3D+%27Pre-Post+Test%27"));
    assert!(list.uri.contains("pageSize=1"));
    assert!(list.uri.contains("supportsAllDrives=true"));
    assert!(list.uri.contains("includeItemsFromAllDrives=true"));

    assert_eq!(requests[2].uri, "/sheets/spreadsheets/sheetid1?fields=sheets.properties");

    let create: Value = serde_json::from_str(&requests[3].body).unwrap();
    assert_eq!(create["info"]["title"], "Aptitude Test - ABC College");
    assert_eq!(create["info"]["documentTitle"], "Aptitude Test - ABC College");

    let batch: Value = serde_json::from_str(&requests[4].body).unwrap();
    let items = batch["requests"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["createItem"]["item"]["title"], "Student Full Name");
    assert_eq!(items[3]["createItem"]["location"]["index"], 3);
    assert_eq!(
        items[3]["createItem"]["item"]["questionItem"]["question"]["choiceQuestion"]["type"],
        "RADIO"
    );

    let patch = &requests[5];
    assert!(patch
        .uri
        .starts_with("/drive/files/form1?addParents=folderX&supportsAllDrives=true"));
    assert!(!patch.uri.contains("removeParents"));

    let append = &requests[6];
    assert_eq!(
        append.uri,
        "/sheets/spreadsheets/sheetid1/values/'Sheet1':append?valueInputOption=RAW"
    );
    let body: Value = serde_json::from_str(&append.body).unwrap();
    assert_eq!(body["majorDimension"], "ROWS");
    let row = body["values"][0].as_array().unwrap();
    assert_eq!(row.len(), 5);
    assert_eq!(row[1], "Ravi");
    assert_eq!(row[2], "ABC College");
    assert_eq!(row[3], "Aptitude Test");
    assert_eq!(row[4], "https://docs.google.com/forms/d/form1/viewform");
}

#[tokio::test]
async fn test_google_error_envelope_becomes_bad_response() {
    let (base, _log) = spawn_fake_google().await;
    let services = GoogleServices::connect(&fake_google_config(&base, "/token"))
        .await
        .unwrap();

    let err = services.drive.move_to_folder("lockedForm", "folderX").await.unwrap_err();
    match err {
        AppError::Api(ApiError::BadResponse { endpoint, status, message }) => {
            assert_eq!(endpoint, "drive.files.update");
            assert_eq!(status, 403);
            assert_eq!(message, "Insufficient permissions for this file (PERMISSION_DENIED)");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = services
        .forms
        .batch_update("unknownForm", &BatchUpdateFormRequest { requests: vec![] })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::BadResponse { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_startup_fails_when_token_rejected() {
    let (base, log) = spawn_fake_google().await;
    let err = GoogleServices::connect(&fake_google_config(&base, "/token-denied"))
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Credential(CredentialError::TokenRejected { status: 401, .. }))
    ));
    // 鉴权失败后不再访问其他接口
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
#[ignore] // 默认忽略，需要真实凭据：cargo test -- --ignored
async fn test_connect_real_google() {
    logging::init(true);

    let config = Config::from_env();
    let result = GoogleServices::connect(&config).await;

    assert!(result.is_ok(), "应该能够连接 Google 服务: {:?}", result.err());
}
