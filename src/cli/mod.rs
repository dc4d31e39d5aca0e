//! 命令行入口
//!
//! 命令与浏览器端页面一一对应：登录/注册、按角色挂载的作业列表、创建作业、
//! 作业详情（提交过滤）以及学生提交。

pub mod render;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::dashboard::{AssignmentDetail, Dashboard, StudentDashboard, Tab, TeacherDashboard};
use crate::errors::{PortalError, Result};
use crate::models::assignments::CreateAssignmentForm;
use crate::models::auth::RegisterRequest;
use crate::models::common::datetime::parse_user_deadline;
use crate::models::files::AttachmentUpload;
use crate::models::users::UserRole;
use crate::runtime::RequestTracker;
use crate::services::{AuthService, SubmissionService};
use crate::session::{AuthSession, FileTokenStore};

#[derive(Debug, Parser)]
#[command(name = "portal", version, about = "Assignment submission platform client")]
pub struct Cli {
    /// API 根地址，覆盖配置文件
    #[arg(long, global = true, env = "PORTAL_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the access token
    Login {
        username: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Create a new account
    Register {
        username: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "student")]
        role: UserRole,
    },
    /// Show the signed-in user
    Whoami {
        /// Ask the server instead of reading the local token
        #[arg(long)]
        remote: bool,
    },
    /// List assignments (active by default)
    Assignments {
        #[arg(long)]
        past: bool,
    },
    /// Create an assignment (teachers)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// e.g. "2030-05-01 12:00" (local time) or "2030-05-01T12:00:00Z"
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        attachment: Option<PathBuf>,
    },
    /// Show an assignment and its submissions (teachers)
    Submissions {
        assignment_id: i64,
        /// Filter by student name
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        late_only: bool,
    },
    /// Submit work for an assignment (students)
    Submit { assignment_id: i64, file: PathBuf },
    /// Show your submission for an assignment (students)
    MySubmission { assignment_id: i64 },
}

/// 命令执行上下文
pub struct PortalContext {
    pub client: Arc<ApiClient>,
    pub tracker: Arc<RequestTracker>,
}

impl PortalContext {
    pub async fn from_config(config: &AppConfig, api_url: Option<String>) -> Result<Self> {
        let store = Arc::new(FileTokenStore::new(&config.session.token_file));
        let session = Arc::new(AuthSession::restore(store, config.session.token_key.clone()).await);
        let base_url = api_url.unwrap_or_else(|| config.api.base_url.clone());
        let client = Arc::new(ApiClient::new(base_url, config.api.origin.clone(), session)?);
        Ok(Self {
            client,
            tracker: Arc::new(RequestTracker::new()),
        })
    }

    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            tracker: Arc::new(RequestTracker::new()),
        }
    }

    fn require_role(&self, role: UserRole) -> Result<()> {
        let session = self
            .client
            .session()
            .current()
            .ok_or_else(|| PortalError::authentication("Please log in first."))?;
        if session.role() != role {
            return Err(PortalError::authorization(format!(
                "This command is only available to {role}s."
            )));
        }
        Ok(())
    }
}

/// 执行命令，返回要打印的文本
pub async fn execute(command: Command, ctx: &PortalContext) -> Result<String> {
    let auth = AuthService::new(ctx.client.clone());

    match command {
        Command::Login { username, password } => {
            let session = ctx.tracker.run("login", auth.login(&username, &password)).await?;
            let user = session.user();
            Ok(format!("Signed in as {} ({}).", user.username, user.role))
        }
        Command::Logout => {
            auth.logout().await?;
            Ok("Signed out.".to_string())
        }
        Command::Register {
            username,
            password,
            role,
        } => {
            let request = RegisterRequest {
                username,
                password,
                role,
            };
            let profile = ctx.tracker.run("register", auth.register(request)).await?;
            Ok(format!(
                "Registration successful! Please sign in as {}.",
                profile.username
            ))
        }
        Command::Whoami { remote } => {
            let session = ctx
                .client
                .session()
                .current()
                .ok_or_else(|| PortalError::authentication("Please log in first."))?;
            if remote {
                let profile = ctx.tracker.run("profile", auth.profile()).await?;
                Ok(format!("{} ({}), id {}", profile.username, profile.role, profile.id))
            } else {
                let user = session.user();
                Ok(format!("{} ({})", user.username, user.role))
            }
        }
        Command::Assignments { past } => {
            let tab = if past { Tab::Past } else { Tab::Active };
            let mut dashboard = Dashboard::for_session(ctx.client.clone())?;
            dashboard.load().await?;
            let now = Utc::now();
            Ok(match &dashboard {
                Dashboard::Student(view) => render::student_table(&view.tab(tab, now)),
                Dashboard::Teacher(view) => render::teacher_table(&view.tab(tab, now)),
            })
        }
        Command::Create {
            title,
            description,
            deadline,
            attachment,
        } => {
            ctx.require_role(UserRole::Teacher)?;
            let deadline = deadline.as_deref().map(parse_user_deadline).transpose()?;
            let attachment = match attachment {
                Some(path) => Some(AttachmentUpload::from_path(path).await?),
                None => None,
            };
            let form = CreateAssignmentForm {
                title,
                description,
                deadline,
                attachment,
            };
            let mut dashboard = TeacherDashboard::new(ctx.client.clone());
            let created = dashboard.create_assignment(form, Utc::now()).await?;
            Ok(format!(
                "Created assignment {} \"{}\", due {}.",
                created.id,
                created.title,
                render::local_time(&created.deadline)
            ))
        }
        Command::Submissions {
            assignment_id,
            search,
            late_only,
        } => {
            ctx.require_role(UserRole::Teacher)?;
            let mut dashboard = TeacherDashboard::new(ctx.client.clone());
            dashboard.load().await?;
            let mut detail: AssignmentDetail = dashboard.open_detail(assignment_id)?;
            detail.load().await?;

            let assignment = detail.assignment();
            let mut out = format!(
                "{}\n{}\nDeadline: {}\n",
                assignment.title,
                assignment.description,
                render::local_time(&assignment.deadline)
            );
            if let Some(link) = detail.attachment_link() {
                out.push_str(&format!("Attachment: {link}\n"));
            }
            out.push('\n');
            let filtered = detail.filtered(&search, late_only);
            out.push_str(&render::submission_list(
                &filtered,
                |s| detail.is_late(s),
                |s| detail.submission_link(s),
            ));
            Ok(out)
        }
        Command::Submit {
            assignment_id,
            file,
        } => {
            ctx.require_role(UserRole::Student)?;
            let attachment = AttachmentUpload::from_path(file).await?;
            let mut dashboard = StudentDashboard::new(ctx.client.clone());
            dashboard.load().await?;
            let submission = dashboard
                .submit_work(assignment_id, Some(attachment))
                .await?;
            let status = dashboard
                .view(assignment_id)
                .map(|v| v.status.to_string())
                .unwrap_or_default();
            Ok(format!(
                "Submitted at {} ({}).",
                render::local_time(&submission.submitted_at),
                status
            ))
        }
        Command::MySubmission { assignment_id } => {
            ctx.require_role(UserRole::Student)?;
            let submissions = SubmissionService::new(ctx.client.clone());
            let mine = ctx
                .tracker
                .run("my submission", submissions.my_submission(assignment_id))
                .await?;
            Ok(match mine {
                Some(s) => {
                    let mut line = format!("Submitted at {}", render::local_time(&s.submitted_at));
                    if let Some(path) = &s.attachment_url {
                        line.push_str(&format!("  {}", ctx.client.attachment_url(path)));
                    }
                    line
                }
                None => "You have not submitted this assignment yet.".to_string(),
            })
        }
    }
}
