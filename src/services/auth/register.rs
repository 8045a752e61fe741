use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    activities::entities::ActivityAction,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::users::{user_write_error, validate_new_user};
use crate::services::{activities, internal_error};
use crate::storage::Storage;
use crate::utils::password::hash_password;

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 1. 自助注册只能选择学生或导师
    if !create_request.role.is_self_registrable() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RoleNotAllowed,
            format!("Role '{}' cannot be self-registered", create_request.role),
        )));
    }

    create_request.username = create_request.username.trim().to_string();
    create_request.email = create_request.email.trim().to_string();

    // 2. 用户名、邮箱、密码合法性
    if let Err(resp) = validate_new_user(&create_request) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;

    // 3. 检查用户名与邮箱是否已存在
    if let Err(response) = check_username_exists(&storage, &create_request.username).await {
        return Ok(response);
    }
    if let Err(response) = check_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    // 4. 哈希密码后创建用户
    create_request.password = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::RegisterFailed,
                format!("Password hashing failed: {e}"),
            ));
        }
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            activities::record(
                &storage,
                user.id,
                ActivityAction::Register,
                format!("Registered as {}", user.role),
            )
            .await;
            tracing::info!("User {} registered as {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Registration successful",
            )))
        }
        // 并发注册时仍可能撞上唯一约束
        Err(e) => Ok(user_write_error(e, ErrorCode::RegisterFailed)),
    }
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(internal_error(
            ErrorCode::RegisterFailed,
            format!("Register failed: {e}"),
        )),
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(internal_error(
            ErrorCode::RegisterFailed,
            format!("Register failed: {e}"),
        )),
    }
}
