//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及面向用户的错误分类。

use std::fmt;

/// 面向用户的错误分类
///
/// 所有错误都在触发它的用户操作处被捕获并转换为提示信息，不会自动重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// 请求被拒绝或服务不可达
    Network,
    /// 输入不合法（截止时间已过、缺少必填项等）
    Validation,
    /// 凭据错误或令牌无法解析
    Auth,
    /// 客户端内部错误（本地文件、序列化、数据完整性）
    Internal,
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - category() 方法 - 返回错误分类
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $category:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误分类
            pub fn category(&self) -> FailureCategory {
                match self {
                    $(PortalError::$variant(_) => FailureCategory::$category,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    Network("E001", "Network Error", Network),
    RequestRejected("E002", "Request Rejected", Network),
    NotFound("E003", "Resource Not Found", Network),
    Validation("E004", "Validation Error", Validation),
    Authentication("E005", "Authentication Error", Auth),
    Authorization("E006", "Authorization Error", Auth),
    DataIntegrity("E007", "Data Integrity Error", Internal),
    Serialization("E008", "Serialization Error", Internal),
    FileOperation("E009", "File Operation Error", Internal),
    DateParse("E010", "Date Parse Error", Validation),
    Configuration("E011", "Configuration Error", Internal),
    Cancelled("E012", "Request Cancelled", Internal),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 面向用户的提示文本
    pub fn user_message(&self) -> String {
        match self.category() {
            FailureCategory::Network => format!("Request failed: {}", self.message()),
            FailureCategory::Validation => self.message().to_string(),
            FailureCategory::Auth => format!("Authentication failed: {}", self.message()),
            FailureCategory::Internal => self.format_simple(),
        }
    }

    /// 是否为会话失效类错误（需要重新登录）
    pub fn is_auth_failure(&self) -> bool {
        self.category() == FailureCategory::Auth
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::Serialization(err.to_string())
        } else {
            PortalError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for PortalError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        PortalError::Authentication(format!("malformed access token: {err}"))
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(err: config::ConfigError) -> Self {
        PortalError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
