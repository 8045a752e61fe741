use crate::cache::{ObjectCache, object_cache::register_builtin_plugins, register};
use crate::config::AppConfig;
use crate::errors::{Result, TutorHubError};
use crate::models::users::entities::{UserProfile, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_CACHE: &str = "moka";
const DEFAULT_ADMIN_USERNAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按配置创建缓存，失败时回退到进程内缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    register_builtin_plugins();
    if cfg!(debug_assertions) {
        register::debug_object_cache_registry();
    }

    let cache_type = &AppConfig::get().cache.cache_type;
    info!("Creating {} cache backend", cache_type);

    match register::build_object_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(Arc::from(cache))
        }
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!(
                "Failed to create {} cache: {}, falling back to {}",
                cache_type, e, FALLBACK_CACHE
            );
            let cache = register::build_object_cache(FALLBACK_CACHE).await?;
            Ok(Arc::from(cache))
        }
        Err(e) => Err(e),
    }
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 空库时创建默认管理员
///
/// 密码取 ADMIN_PASSWORD，未设置时随机生成并打印到日志。
async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("Database already has {} user(s), skipping admin seed", count);
        return Ok(());
    }
    info!("No users found in database, creating default admin account...");

    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let pwd = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN_PASSWORD not set, generated admin password: {}", pwd);
            warn!("  Save it now or set ADMIN_PASSWORD before first start");
            warn!("==========================================================");
            pwd
        });

    let admin = storage
        .create_user(CreateUserRequest {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            email: "admin@localhost".to_string(),
            password: hash_password(&password)?,
            role: UserRole::Admin,
            profile: UserProfile {
                display_name: Some("Administrator".to_string()),
                ..Default::default()
            },
        })
        .await?;

    info!(
        "Default admin account created (ID: {}, username: {})",
        admin.id, admin.username
    );
    Ok(())
}

/// 启动前准备：存储（含迁移）、默认管理员、缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| TutorHubError::cache_connection("Failed to install rustls crypto provider"))?;

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_admin(&storage).await {
        warn!("Failed to seed admin account: {}", e);
    }

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_uses_charset() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert!(pwd.chars().all(|c| c.is_ascii_graphic()));
        assert!(!pwd.contains('0') && !pwd.contains('O'));
    }
}
