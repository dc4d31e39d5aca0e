use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
pub const DEFAULT_API_ORIGIN: &str = "http://127.0.0.1:8000";
pub const TOKEN_FILE_NAME: &str = "session.json";
pub const DEFAULT_TOKEN_KEY: &str = "accessToken";

/// 默认令牌文件：用户配置目录下的 `hwportal/session.json`，
/// 取不到配置目录时退回当前目录下的 `.portal_session.json`
pub fn default_token_file() -> String {
    match dirs::config_dir() {
        Some(dir) => dir
            .join("hwportal")
            .join(TOKEN_FILE_NAME)
            .to_string_lossy()
            .into_owned(),
        None => ".portal_session.json".to_string(),
    }
}

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "warn")?
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.origin", DEFAULT_API_ORIGIN)?
            .set_default("session.token_file", default_token_file())?
            .set_default("session.token_key", DEFAULT_TOKEN_KEY)?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("PORTAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("api.base_url", std::env::var("PORTAL_API_URL").ok())?
            .set_override_option("api.origin", std::env::var("PORTAL_API_ORIGIN").ok())?
            .set_override_option(
                "session.token_file",
                std::env::var("PORTAL_TOKEN_FILE").ok(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 统一去掉末尾斜杠，路径拼接时再补
        app_config.api.base_url = app_config.api.base_url.trim_end_matches('/').to_string();
        app_config.api.origin = app_config.api.origin.trim_end_matches('/').to_string();

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}
