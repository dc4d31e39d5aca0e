use clap::Parser;
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use rust_hwportal::cli::{self, Cli, PortalContext};
use rust_hwportal::config::AppConfig;
use rust_hwportal::errors::PortalError;
use rust_hwportal::runtime::lifetime;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("{}", PortalError::from(e).user_message());
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志，输出到 stderr，避免干扰命令结果
    let stderr_log = std::io::stderr();
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(stderr_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    let args = Cli::parse();
    debug!(
        "{} {} using API at {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        args.api_url.as_deref().unwrap_or(&config.api.base_url)
    );

    let result = match PortalContext::from_config(config, args.api_url).await {
        Ok(ctx) => {
            tokio::select! {
                res = cli::execute(args.command, &ctx) => res,
                _ = lifetime::shutdown::listen_for_shutdown(ctx.tracker.clone()) => {
                    warn!("Interrupted");
                    Err(PortalError::cancelled("Interrupted by user"))
                }
            }
        }
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            0
        }
        Err(e) => {
            #[cfg(debug_assertions)]
            debug!("{}", e.format_colored());
            eprintln!("{}", e.user_message());
            1
        }
    };

    // 退出前刷新日志缓冲
    drop(guard);
    std::process::exit(code);
}
