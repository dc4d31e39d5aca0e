//! 认证会话
//!
//! 会话只有两种状态：匿名与已认证。凭据交换成功后写入令牌并解析声明；
//! 主动注销或令牌无法解析时回到匿名状态。
//!
//! 会话中的角色只用于决定挂载哪个视图，并不构成安全边界。

pub mod claims;
pub mod store;

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::errors::Result;
use crate::models::users::entities::UserRole;

pub use claims::{UnverifiedClaims, decode_unverified};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// 界面展示用的用户信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub role: UserRole,
}

/// 已认证会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: UnverifiedClaims,
}

impl Session {
    /// 从令牌构造会话，令牌无法解析时返回认证错误
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let claims = decode_unverified(&token)?;
        Ok(Self { token, claims })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &UnverifiedClaims {
        &self.claims
    }

    pub fn user(&self) -> SessionUser {
        SessionUser {
            username: self.claims.sub.clone(),
            role: self.claims.role,
        }
    }

    pub fn role(&self) -> UserRole {
        self.claims.role
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

/// 会话上下文，显式注入到 API 客户端与各视图中
pub struct AuthSession {
    store: Arc<dyn TokenStore>,
    token_key: String,
    state: RwLock<AuthState>,
}

impl AuthSession {
    /// 创建匿名会话
    pub fn new(store: Arc<dyn TokenStore>, token_key: impl Into<String>) -> Self {
        Self {
            store,
            token_key: token_key.into(),
            state: RwLock::new(AuthState::Anonymous),
        }
    }

    /// 从持久化存储恢复会话
    ///
    /// 存储的令牌无法解析时视为注销，并清除该令牌。
    pub async fn restore(store: Arc<dyn TokenStore>, token_key: impl Into<String>) -> Self {
        let session = Self::new(store, token_key);

        let stored = match session.store.get(&session.token_key).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read stored token: {}", e);
                None
            }
        };

        if let Some(token) = stored {
            match Session::from_token(token) {
                Ok(restored) => {
                    info!("Restored session for {}", restored.claims.sub);
                    session.replace_state(AuthState::Authenticated(restored));
                }
                Err(e) => {
                    warn!("Stored token is malformed, clearing it: {}", e);
                    if let Err(e) = session.clear().await {
                        warn!("Failed to clear malformed token: {}", e);
                    }
                }
            }
        }

        session
    }

    fn replace_state(&self, next: AuthState) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = next;
    }

    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 当前会话
    pub fn current(&self) -> Option<Session> {
        match self.state() {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// 请求头使用的令牌
    pub fn bearer_token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    /// 写入会话并持久化令牌
    pub async fn set_session(&self, session: Session) -> Result<()> {
        self.store.set(&self.token_key, session.token()).await?;
        info!(
            "Authenticated as {} ({})",
            session.claims.sub, session.claims.role
        );
        self.replace_state(AuthState::Authenticated(session));
        Ok(())
    }

    /// 以新令牌建立会话，令牌无法解析时清空会话并返回错误
    pub async fn establish(&self, token: &str) -> Result<Session> {
        match Session::from_token(token) {
            Ok(session) => {
                self.set_session(session.clone()).await?;
                Ok(session)
            }
            Err(e) => {
                warn!("Received malformed token, treating as logout: {}", e);
                self.clear().await?;
                Err(e)
            }
        }
    }

    /// 注销：清除内存状态与持久化令牌
    pub async fn clear(&self) -> Result<()> {
        self.replace_state(AuthState::Anonymous);
        self.store.remove(&self.token_key).await
    }
}
