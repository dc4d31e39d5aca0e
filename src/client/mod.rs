//! HTTP 客户端封装
//!
//! 每个请求自动携带 `Authorization: Bearer <token>`（令牌来自会话），
//! 并把非 2xx 响应统一转换为 [`PortalError`]。

pub mod routes;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::errors::{PortalError, Result};
use crate::models::auth::ErrorDetail;
use crate::session::AuthSession;
use crate::utils::attachment::attachment_link;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    origin: String,
    session: Arc<AuthSession>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        origin: impl Into<String>,
        session: Arc<AuthSession>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            origin: origin.into(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接完整请求地址
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 附件下载地址
    pub fn attachment_url(&self, relative_path: &str) -> String {
        attachment_link(&self.origin, relative_path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)).await
    }

    /// GET，404 时返回 `None`
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(PortalError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// 以 application/x-www-form-urlencoded 提交
    pub async fn post_form<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).form(body)).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        self.send(self.request(Method::POST, path).multipart(form))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorDetail>(&body)
        .ok()
        .and_then(|d| d.text());
    warn!("Request failed with status {}: {}", status, detail.as_deref().unwrap_or(&body));
    Err(status_error(status, detail))
}

/// 将 HTTP 状态码映射为错误类型
pub fn status_error(status: StatusCode, detail: Option<String>) -> PortalError {
    let reason = status.canonical_reason().unwrap_or("unexpected status");
    let message = detail.unwrap_or_else(|| reason.to_string());
    match status {
        StatusCode::UNAUTHORIZED => PortalError::authentication(message),
        StatusCode::FORBIDDEN => PortalError::authorization(message),
        StatusCode::NOT_FOUND => PortalError::not_found(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            PortalError::validation(message)
        }
        _ => PortalError::request_rejected(format!("{} {}", status.as_u16(), message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    fn client(base: &str) -> ApiClient {
        let session = Arc::new(AuthSession::new(
            Arc::new(MemoryTokenStore::new()),
            "accessToken",
        ));
        ApiClient::new(base, "http://127.0.0.1:8000", session).unwrap()
    }

    #[test]
    fn test_url_join() {
        let api = client("http://127.0.0.1:8000/api/v1/");
        assert_eq!(
            api.url(routes::ASSIGNMENTS),
            "http://127.0.0.1:8000/api/v1/assignments/"
        );
        assert_eq!(
            api.url(&routes::my_submission(3)),
            "http://127.0.0.1:8000/api/v1/assignments/3/my-submission"
        );
    }

    #[test]
    fn test_attachment_url() {
        let api = client("http://127.0.0.1:8000/api/v1");
        assert_eq!(
            api.attachment_url("uploads/essay.pdf"),
            "http://127.0.0.1:8000/uploads/essay.pdf"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, Some("Incorrect username or password".into())),
            PortalError::authentication("Incorrect username or password")
        );
        assert_eq!(status_error(StatusCode::FORBIDDEN, None).code(), "E006");
        assert_eq!(status_error(StatusCode::NOT_FOUND, None).code(), "E003");
        assert_eq!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY, None).category(),
            crate::errors::FailureCategory::Validation
        );
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.message(), "500 Internal Server Error");
    }
}
