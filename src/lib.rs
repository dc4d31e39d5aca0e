//! HWPortal - 作业提交平台客户端
//!
//! 对接作业提交平台 REST API 的命令行客户端，教师发布作业、查看提交，学生查看作业状态并提交。
//!
//! # 架构
//! - `cli`: 命令行解析与终端输出
//! - `client`: HTTP API 客户端（携带会话令牌）
//! - `config`: 配置管理
//! - `dashboard`: 视图模型（状态推导、时间分组、提交过滤）
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理（在途请求取消）
//! - `services`: 业务操作层
//! - `session`: 认证会话与令牌持久化
//! - `utils`: 工具函数

pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod session;
pub mod utils;
