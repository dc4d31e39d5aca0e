pub mod login;
pub mod profile;
pub mod register;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::errors::Result;
use crate::models::auth::RegisterRequest;
use crate::models::users::UserProfile;
use crate::session::{AuthSession, Session};

pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn session(&self) -> &AuthSession {
        self.client.session()
    }

    // 凭据交换并建立会话
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        login::handle_login(self, username, password).await
    }

    // 注销
    pub async fn logout(&self) -> Result<()> {
        login::handle_logout(self).await
    }

    // 用户注册
    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile> {
        register::handle_register(self, request).await
    }

    // 获取服务端用户资料
    pub async fn profile(&self) -> Result<UserProfile> {
        profile::handle_get_profile(self).await
    }
}
