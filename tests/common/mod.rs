//! 集成测试共用的桩服务
//!
//! 在 127.0.0.1 随机端口上启动一个 axum 服务，模拟作业平台的 REST 接口。

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration as StdDuration, Instant};

use axum::extract::{Form, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Deserialize;
use serde_json::{Value, json};

use rust_hwportal::client::ApiClient;
use rust_hwportal::session::{AuthSession, MemoryTokenStore};

pub const PASSWORD: &str = "correct horse";

#[derive(Debug, Clone)]
pub struct StubUser {
    pub id: i64,
    pub username: &'static str,
    pub role: &'static str,
}

pub const USERS: &[StubUser] = &[
    StubUser {
        id: 1,
        username: "mrs_lee",
        role: "teacher",
    },
    StubUser {
        id: 10,
        username: "Anna",
        role: "student",
    },
    StubUser {
        id: 11,
        username: "Hannah",
        role: "student",
    },
    StubUser {
        id: 12,
        username: "Bob",
        role: "student",
    },
];

/// 与服务端签发方式一致的令牌（客户端不知道密钥）
pub fn token_for(username: &str) -> String {
    let user = find_user(username).expect("unknown stub user");
    encode(
        &Header::default(),
        &json!({ "sub": user.username, "role": user.role, "exp": 4_102_444_800i64 }),
        &EncodingKey::from_secret(b"stub-server-secret"),
    )
    .unwrap()
}

fn find_user(username: &str) -> Option<&'static StubUser> {
    USERS.iter().find(|u| u.username == username)
}

/// 桩服务记录的一次上传
#[derive(Debug, Clone)]
pub struct Upload {
    pub fields: Vec<(String, String)>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub struct StubState {
    pub assignments: Mutex<Vec<Value>>,
    pub submissions: Mutex<Vec<Value>>,
    pub uploads: Mutex<Vec<Upload>>,
    pub authorization_headers: Mutex<Vec<Option<String>>>,
    /// 列表接口的响应延迟
    pub fetch_delay: Mutex<Option<StdDuration>>,
    /// 列表接口收到请求的时间
    pub fetch_starts: Mutex<Vec<(&'static str, Instant)>>,
}

impl StubState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_assignment(&self, id: i64, title: &str, deadline: &str) {
        self.assignments.lock().unwrap().push(json!({
            "id": id,
            "title": title,
            "description": format!("{title} description"),
            "deadline": deadline,
            "attachment_url": format!("uploads\\assignments\\{id}.pdf"),
            "owner": { "id": 1, "username": "mrs_lee" }
        }));
    }

    pub fn add_submission(&self, id: i64, assignment_id: i64, student: &str, submitted_at: &str) {
        let user = find_user(student).expect("unknown stub user");
        self.submissions.lock().unwrap().push(json!({
            "id": id,
            "assignment_id": assignment_id,
            "submitted_at": submitted_at,
            "student": { "id": user.id, "username": user.username },
            "attachment_url": format!("uploads/submissions/{id}.zip")
        }));
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn delay_fetches(&self, delay: StdDuration) {
        *self.fetch_delay.lock().unwrap() = Some(delay);
    }

    pub fn fetch_starts(&self) -> Vec<(&'static str, Instant)> {
        self.fetch_starts.lock().unwrap().clone()
    }

    async fn begin_fetch(&self, name: &'static str) {
        self.fetch_starts.lock().unwrap().push((name, Instant::now()));
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

pub fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339()
}

/// 不带时区的时间戳，服务端部分接口会这样返回
pub fn naive(instant: DateTime<Utc>) -> String {
    instant.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn authorize(state: &StubState, headers: &HeaderMap) -> Option<&'static StubUser> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.authorization_headers.lock().unwrap().push(raw.clone());

    let token = raw?.strip_prefix("Bearer ")?.to_string();
    USERS.iter().find(|u| token_for(u.username) == token)
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    match find_user(&form.username) {
        Some(user) if form.password == PASSWORD => Json(json!({
            "access_token": token_for(user.username),
            "token_type": "bearer"
        }))
        .into_response(),
        _ => detail(StatusCode::UNAUTHORIZED, "Incorrect username or password"),
    }
}

#[derive(Deserialize)]
struct RegisterBody {
    username: String,
    password: String,
    role: String,
}

async fn register(Json(body): Json<RegisterBody>) -> Response {
    if find_user(&body.username).is_some() {
        return detail(StatusCode::BAD_REQUEST, "Username already registered");
    }
    if body.password.is_empty() {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "Password required");
    }
    Json(json!({ "id": 99, "username": body.username, "role": body.role })).into_response()
}

async fn me(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    match authorize(&state, &headers) {
        Some(user) => {
            Json(json!({ "id": user.id, "username": user.username, "role": user.role }))
                .into_response()
        }
        None => detail(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

async fn list_assignments(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if authorize(&state, &headers).is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    state.begin_fetch("assignments").await;
    Json(Value::Array(state.assignments.lock().unwrap().clone())).into_response()
}

async fn read_upload(mut multipart: Multipart) -> Upload {
    let mut upload = Upload {
        fields: Vec::new(),
        file_name: None,
        bytes: Vec::new(),
    };
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "attachment" {
            upload.file_name = field.file_name().map(str::to_string);
            upload.bytes = field.bytes().await.unwrap().to_vec();
        } else {
            let text = field.text().await.unwrap();
            upload.fields.push((name, text));
        }
    }
    upload
}

async fn create_assignment(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let Some(user) = authorize(&state, &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    if user.role != "teacher" {
        return detail(StatusCode::FORBIDDEN, "Only teachers can create assignments");
    }
    let upload = read_upload(multipart).await;
    let field = |key: &str| {
        upload
            .fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    };

    let id = state.assignments.lock().unwrap().len() as i64 + 100;
    let attachment_url = upload
        .file_name
        .as_ref()
        .map(|name| format!("uploads/assignments/{name}"));
    state.assignments.lock().unwrap().push(json!({
        "id": id,
        "title": field("title"),
        "description": field("description"),
        "deadline": field("deadline"),
        "attachment_url": attachment_url,
        "owner": { "id": user.id, "username": user.username }
    }));
    let created = json!({
        "id": id,
        "title": field("title"),
        "description": field("description"),
        "created_at": naive(Utc::now()),
        "deadline": field("deadline"),
        "attachment_url": attachment_url,
        "teacher_id": user.id
    });
    state.uploads.lock().unwrap().push(upload);
    Json(created).into_response()
}

async fn my_submissions(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    let Some(user) = authorize(&state, &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    state.begin_fetch("my submissions").await;
    let mine: Vec<Value> = state
        .submissions
        .lock()
        .unwrap()
        .iter()
        .filter(|s| s["student"]["id"] == user.id)
        .cloned()
        .collect();
    Json(mine).into_response()
}

async fn assignment_submissions(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if authorize(&state, &headers).is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let for_assignment: Vec<Value> = state
        .submissions
        .lock()
        .unwrap()
        .iter()
        .filter(|s| s["assignment_id"] == id)
        .cloned()
        .collect();
    Json(for_assignment).into_response()
}

async fn my_submission(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let Some(user) = authorize(&state, &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let found = state
        .submissions
        .lock()
        .unwrap()
        .iter()
        .find(|s| s["assignment_id"] == id && s["student"]["id"] == user.id)
        .cloned();
    match found {
        Some(submission) => Json(submission).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Submission not found"),
    }
}

async fn submit(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let Some(user) = authorize(&state, &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let upload = read_upload(multipart).await;
    let submission_id = state.submissions.lock().unwrap().len() as i64 + 500;
    let submission = json!({
        "id": submission_id,
        "assignment_id": id,
        "submitted_at": naive(Utc::now()),
        "student": { "id": user.id, "username": user.username },
        "attachment_url": upload.file_name.as_ref().map(|n| format!("uploads/submissions/{n}"))
    });
    state.submissions.lock().unwrap().push(submission.clone());
    state.uploads.lock().unwrap().push(upload);
    Json(submission).into_response()
}

pub fn router(state: Arc<StubState>) -> Router {
    let api = Router::new()
        .route("/auth/token", post(login))
        .route("/auth/users/", post(register))
        .route("/auth/users/me", get(me))
        .route("/assignments/", get(list_assignments).post(create_assignment))
        .route("/assignments/{id}/submissions", get(assignment_submissions))
        .route("/assignments/{id}/my-submission", get(my_submission))
        .route("/assignments/{id}/submit", post(submit))
        .route("/submissions/me", get(my_submissions));
    Router::new().nest("/api/v1", api).with_state(state)
}

/// 启动桩服务，返回其 origin（如 `http://127.0.0.1:54321`）
pub async fn spawn_stub(state: Arc<StubState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// 指向桩服务的匿名客户端
pub fn anonymous_client(origin: &str) -> Arc<ApiClient> {
    let session = Arc::new(AuthSession::new(
        Arc::new(MemoryTokenStore::new()),
        "accessToken",
    ));
    Arc::new(ApiClient::new(format!("{origin}/api/v1"), origin, session).unwrap())
}

/// 指向桩服务、已以指定用户登录的客户端
pub async fn client_as(origin: &str, username: &str) -> Arc<ApiClient> {
    let client = anonymous_client(origin);
    client.session().establish(&token_for(username)).await.unwrap();
    client
}
