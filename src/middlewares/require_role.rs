//! 角色准入
//!
//! 依赖 RequireJWT 预先写入的 `User` 扩展，因此注册顺序上要先 wrap 本中间件：
//!
//! ```rust,ignore
//! web::scope("/api/users")
//!     .wrap(RequireRole::new_any(UserRole::admin_roles()))
//!     .wrap(RequireJWT)
//! ```

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Rc<[UserRole]>,
}

/// 拒绝原因
#[derive(Debug, PartialEq, Eq)]
enum Denial {
    Anonymous,
    RoleNotAllowed { user_id: i64, role: UserRole },
}

impl Denial {
    fn status(&self) -> (StatusCode, ErrorCode, &'static str) {
        match self {
            Denial::Anonymous => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Authentication required",
            ),
            Denial::RoleNotAllowed { .. } => (
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Access denied.",
            ),
        }
    }
}

impl RequireRole {
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| **r).collect(),
        }
    }

    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed_roles.contains(&role)
    }

    fn admit(&self, user: Option<(i64, UserRole)>) -> Result<(), Denial> {
        match user {
            None => Err(Denial::Anonymous),
            Some((_, role)) if self.allows(role) => Ok(()),
            Some((user_id, role)) => Err(Denial::RoleNotAllowed { user_id, role }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    policy: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let verdict = self
            .policy
            .admit(req.extensions().get::<User>().map(|u| (u.id, u.role)));

        Box::pin(async move {
            match verdict {
                Ok(()) => Ok(srv.call(req).await?.map_into_left_body()),
                Err(denial) => {
                    if let Denial::RoleNotAllowed { user_id, role } = &denial {
                        info!("Access denied for user {} with role {}", user_id, role);
                    } else {
                        info!("Role check reached without an authenticated user");
                    }
                    let (status, code, message) = denial.status();
                    Ok(req.into_response(
                        create_error_response(status, code, message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_policies() {
        let admin_only = RequireRole::new_any(UserRole::admin_roles());
        assert!(admin_only.allows(UserRole::Admin));
        assert!(!admin_only.allows(UserRole::Tutor));

        let tutors = RequireRole::new_any(UserRole::tutor_roles());
        assert!(tutors.allows(UserRole::Tutor));
        assert!(tutors.allows(UserRole::Admin));
        assert!(!tutors.allows(UserRole::Student));
    }

    #[test]
    fn test_admit_distinguishes_anonymous_from_forbidden() {
        let tutors = RequireRole::new_any(UserRole::tutor_roles());
        assert_eq!(tutors.admit(None), Err(Denial::Anonymous));
        assert_eq!(tutors.admit(Some((3, UserRole::Tutor))), Ok(()));

        let denial = tutors.admit(Some((4, UserRole::Student))).unwrap_err();
        assert_eq!(
            denial,
            Denial::RoleNotAllowed {
                user_id: 4,
                role: UserRole::Student
            }
        );
        assert_eq!(denial.status().0, StatusCode::FORBIDDEN);
        assert_eq!(Denial::Anonymous.status().0, StatusCode::UNAUTHORIZED);
    }
}
