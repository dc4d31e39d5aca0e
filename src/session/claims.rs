//! 访问令牌声明的本地解析
//!
//! 这里只读取令牌载荷用于界面路由（显示用户名、选择教师/学生视图），
//! 不校验签名和过期时间。服务端在每个请求上独立校验令牌并做权限判断。

use jsonwebtoken::dangerous::insecure_decode;
use serde::{Deserialize, Serialize};

use crate::errors::{PortalError, Result};
use crate::models::users::entities::UserRole;

// 未经校验的令牌声明
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnverifiedClaims {
    pub sub: String,            // Subject（用户名）
    pub role: UserRole,         // 用户角色
    #[serde(default)]
    pub exp: Option<i64>,       // 过期时间（仅展示，不参与判断）
}

/// 解析令牌载荷
pub fn decode_unverified(token: &str) -> Result<UnverifiedClaims> {
    let token = token.trim();
    if token.is_empty() {
        return Err(PortalError::authentication("empty access token"));
    }
    // 不校验签名，也不检查 exp/aud
    let data = insecure_decode::<UnverifiedClaims>(token)?;
    if data.claims.sub.is_empty() {
        return Err(PortalError::authentication("access token has no subject"));
    }
    Ok(data.claims)
}
