use tracing::info;

use crate::client::routes;
use crate::errors::Result;
use crate::models::auth::{LoginRequest, TokenResponse};
use crate::session::Session;
use crate::utils::validate::validate_credentials;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    username: &str,
    password: &str,
) -> Result<Session> {
    // 1. 必填项检查
    validate_credentials(username, password)?;

    // 2. 以表单方式交换令牌
    let request = LoginRequest {
        username: username.trim().to_string(),
        password: password.to_string(),
    };
    let token: TokenResponse = service
        .client()
        .post_form(routes::AUTH_TOKEN, &request)
        .await?;

    // 3. 解析令牌并持久化，解析失败时会话回到匿名状态
    let session = service.session().establish(&token.access_token).await?;
    info!("User {} logged in successfully", session.claims().sub);
    Ok(session)
}

pub async fn handle_logout(service: &AuthService) -> Result<()> {
    service.session().clear().await?;
    info!("Logged out");
    Ok(())
}
