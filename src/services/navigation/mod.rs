//! 前端路由守卫
//!
//! `/student`、`/tutor`、`/admin` 开头的路径需要对应角色，`/auth` 为登录页，
//! 其余路径公开。

use crate::models::{auth::GuardResponse, users::entities::UserRole};

pub const LOGIN_PATH: &str = "/auth";

/// 路径所需的角色；公开路径返回 None
pub fn required_role(path: &str) -> Option<UserRole> {
    let first = path
        .trim_start_matches('/')
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    match first.to_ascii_lowercase().as_str() {
        "student" => Some(UserRole::Student),
        "tutor" => Some(UserRole::Tutor),
        "admin" => Some(UserRole::Admin),
        _ => None,
    }
}

fn is_login_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    trimmed.eq_ignore_ascii_case(LOGIN_PATH)
        || trimmed
            .to_ascii_lowercase()
            .starts_with(&format!("{LOGIN_PATH}/"))
}

fn allow() -> GuardResponse {
    GuardResponse {
        allowed: true,
        redirect_to: None,
    }
}

fn redirect(to: &str) -> GuardResponse {
    GuardResponse {
        allowed: false,
        redirect_to: Some(to.to_string()),
    }
}

/// 计算当前会话访问 path 的结果
pub fn resolve_route(path: &str, role: Option<UserRole>) -> GuardResponse {
    match (required_role(path), role) {
        (Some(_), None) => redirect(LOGIN_PATH),
        (Some(required), Some(role)) if required != role => redirect(role.dashboard_path()),
        (None, Some(role)) if is_login_path(path) => redirect(role.dashboard_path()),
        _ => allow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_sent_to_login() {
        let r = resolve_route("/tutor/dashboard", None);
        assert!(!r.allowed);
        assert_eq!(r.redirect_to.as_deref(), Some("/auth"));
        assert_eq!(resolve_route("/admin", None).redirect_to.as_deref(), Some("/auth"));
    }

    #[test]
    fn test_wrong_role_goes_to_own_dashboard() {
        let r = resolve_route("/admin/users", Some(UserRole::Student));
        assert!(!r.allowed);
        assert_eq!(r.redirect_to.as_deref(), Some("/student/dashboard"));

        let r = resolve_route("/student/bookings", Some(UserRole::Tutor));
        assert_eq!(r.redirect_to.as_deref(), Some("/tutor/dashboard"));
    }

    #[test]
    fn test_matching_role_is_allowed() {
        assert_eq!(resolve_route("/tutor/courses/3", Some(UserRole::Tutor)), allow());
        assert_eq!(resolve_route("/admin", Some(UserRole::Admin)), allow());
    }

    #[test]
    fn test_public_paths() {
        assert_eq!(resolve_route("/", None), allow());
        assert_eq!(resolve_route("/courses", Some(UserRole::Student)), allow());
        assert_eq!(resolve_route("/auth", None), allow());
        // 前缀必须是完整的路径段
        assert_eq!(resolve_route("/students-corner", None), allow());
    }

    #[test]
    fn test_logged_in_user_skips_login_page() {
        let r = resolve_route("/auth", Some(UserRole::Admin));
        assert_eq!(r.redirect_to.as_deref(), Some("/admin/dashboard"));
        let r = resolve_route("/auth/?next=/x", Some(UserRole::Tutor));
        assert_eq!(r.redirect_to.as_deref(), Some("/tutor/dashboard"));
    }

    #[test]
    fn test_required_role_ignores_case_and_query() {
        assert_eq!(required_role("/Student/Dashboard"), Some(UserRole::Student));
        assert_eq!(required_role("/tutor?tab=1"), Some(UserRole::Tutor));
        assert_eq!(required_role("/about"), None);
    }
}
