//! 视图模型
//!
//! - `status` / `filter`: 纯函数，负责状态推导与提交过滤
//! - `student` / `teacher` / `detail`: 持有原始数据集合的视图，数据变化时重新推导
//!
//! 视图根据会话角色挂载，这只是界面能力切换，权限由服务端判断。
//!
//! 请求 future 借用视图，视图销毁前必然先丢弃在途 future，请求随之中止且不会写回状态。
//! 需要从外部取消时（例如中断信号），通过 `tracker()` 取得跟踪器调用 `cancel_all`。

pub mod detail;
pub mod filter;
pub mod status;
pub mod student;
pub mod teacher;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::errors::{PortalError, Result};
use crate::models::users::UserRole;

pub use detail::AssignmentDetail;
pub use filter::{filter_submissions, is_late};
pub use status::{TimePartition, derive_statuses, derive_statuses_strict, partition_by_time};
pub use student::StudentDashboard;
pub use teacher::TeacherDashboard;

/// 作业列表标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Active,
    Past,
}

impl Tab {
    pub fn pick<T>(self, partition: TimePartition<T>) -> Vec<T> {
        match self {
            Tab::Active => partition.active,
            Tab::Past => partition.past,
        }
    }
}

/// 按角色挂载的仪表盘
pub enum Dashboard {
    Teacher(TeacherDashboard),
    Student(StudentDashboard),
}

impl Dashboard {
    /// 根据当前会话选择视图，未登录时返回认证错误
    pub fn for_session(client: Arc<ApiClient>) -> Result<Self> {
        let session = client
            .session()
            .current()
            .ok_or_else(|| PortalError::authentication("Please log in first."))?;
        Ok(match session.role() {
            UserRole::Teacher => Dashboard::Teacher(TeacherDashboard::new(client)),
            UserRole::Student => Dashboard::Student(StudentDashboard::new(client)),
        })
    }

    pub async fn load(&mut self) -> Result<()> {
        match self {
            Dashboard::Teacher(view) => view.load().await,
            Dashboard::Student(view) => view.load().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::claims::tests::make_token;
    use crate::session::{AuthSession, MemoryTokenStore};

    async fn client_with(token: Option<String>) -> Arc<ApiClient> {
        let session = Arc::new(AuthSession::new(
            Arc::new(MemoryTokenStore::new()),
            "accessToken",
        ));
        if let Some(token) = token {
            session.establish(&token).await.unwrap();
        }
        Arc::new(ApiClient::new("http://127.0.0.1:9/api/v1", "http://127.0.0.1:9", session).unwrap())
    }

    #[tokio::test]
    async fn test_routes_by_role() {
        let teacher = client_with(Some(make_token("mrs_lee", "teacher"))).await;
        assert!(matches!(
            Dashboard::for_session(teacher),
            Ok(Dashboard::Teacher(_))
        ));

        let student = client_with(Some(make_token("anna", "student"))).await;
        assert!(matches!(
            Dashboard::for_session(student),
            Ok(Dashboard::Student(_))
        ));
    }

    #[tokio::test]
    async fn test_anonymous_is_redirected() {
        let anonymous = client_with(None).await;
        let err = Dashboard::for_session(anonymous).err().unwrap();
        assert!(err.is_auth_failure());
    }
}
