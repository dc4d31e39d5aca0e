use serde::Serialize;

use crate::models::users::entities::UserRole;

// 登录请求（以表单方式提交到 /auth/token）
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 注册请求（JSON 提交到 /auth/users/）
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}
