use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, hash_optional_password, user_write_error};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{UserRole, UserStatus},
        requests::UpdateUserRequest,
        responses::UserResponse,
    },
};
use crate::utils::validate::validate_email;

/// 管理员修改自己时不能降级或停用，避免锁死最后一个管理员
fn demotes_self(update: &UpdateUserRequest) -> bool {
    update.role.is_some_and(|role| role != UserRole::Admin)
        || update.status.is_some_and(|status| status != UserStatus::Active)
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_id(request) == Some(user_id) && demotes_self(&update_data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDemoteCurrentUser,
            "Cannot change the role or status of the current user",
        )));
    }

    if let Some(ref email) = update_data.email
        && let Err(msg) = validate_email(email.trim())
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    update_data.email = update_data.email.map(|e| e.trim().to_string());

    update_data.password = match hash_optional_password(update_data.password.take()) {
        Ok(password) => password,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request)?;

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            RequireJWT::evict_user(request, user.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(user_write_error(e, ErrorCode::UserUpdateFailed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(role: Option<UserRole>, status: Option<UserStatus>) -> UpdateUserRequest {
        UpdateUserRequest {
            email: None,
            password: None,
            role,
            status,
            profile: None,
        }
    }

    #[test]
    fn test_self_update_cannot_demote_or_suspend() {
        assert!(demotes_self(&update(Some(UserRole::Tutor), None)));
        assert!(demotes_self(&update(None, Some(UserStatus::Suspended))));
        assert!(demotes_self(&update(None, Some(UserStatus::Inactive))));
        assert!(!demotes_self(&update(Some(UserRole::Admin), Some(UserStatus::Active))));
        assert!(!demotes_self(&update(None, None)));
    }
}
