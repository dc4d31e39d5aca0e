//! REST 接口路径（相对于 API 根地址）

pub const AUTH_TOKEN: &str = "/auth/token";
pub const AUTH_USERS: &str = "/auth/users/";
pub const AUTH_ME: &str = "/auth/users/me";
pub const ASSIGNMENTS: &str = "/assignments/";
pub const MY_SUBMISSIONS: &str = "/submissions/me";

pub fn assignment_submissions(assignment_id: i64) -> String {
    format!("/assignments/{assignment_id}/submissions")
}

pub fn my_submission(assignment_id: i64) -> String {
    format!("/assignments/{assignment_id}/my-submission")
}

pub fn submit(assignment_id: i64) -> String {
    format!("/assignments/{assignment_id}/submit")
}
