use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 示例配置里常见的占位密钥，生产环境一律拒绝
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-in-production",
    "changeme",
    "secret",
    "your-secret-key",
];
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

fn random_secret() -> String {
    use rand::Rng;
    use rand::distr::Alphanumeric;
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// 校验 JWT 密钥
///
/// 生产环境缺失、过短或为占位值时拒绝启动；其他环境缺失时生成进程内随机密钥，
/// 重启后已签发的令牌全部失效。
fn resolve_jwt_secret(config: &mut AppConfig) -> Result<(), ConfigError> {
    let secret = config.jwt.secret.trim();
    let weak = secret.is_empty()
        || PLACEHOLDER_SECRETS
            .iter()
            .any(|p| p.eq_ignore_ascii_case(secret));

    if config.is_production() {
        if weak || secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be set to a random value of at least {MIN_PRODUCTION_SECRET_LEN} characters in production (JWT_SECRET)"
            )));
        }
    } else if secret.is_empty() {
        eprintln!(
            "WARNING: JWT_SECRET is not set, using a random per-process secret. Sessions will not survive a restart."
        );
        config.jwt.secret = random_secret();
    }
    Ok(())
}

/// 内置默认值，保证在没有任何配置文件时也能启动
fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("app.system_name", "TutorHub")?
        .set_default("app.environment", "development")?
        .set_default("app.log_level", "info")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("server.unix_socket_path", "")?
        .set_default("server.workers", 0)?
        .set_default("server.max_workers", 16)?
        .set_default("server.timeouts.client_request", 5000)?
        .set_default("server.timeouts.client_disconnect", 1000)?
        .set_default("server.timeouts.keep_alive", 30)?
        .set_default("server.limits.max_payload_size", 1_048_576)?
        .set_default("server.trust_proxy", false)?
        .set_default("jwt.access_token_expiry", 15)?
        .set_default("jwt.refresh_token_expiry", 7)?
        .set_default("jwt.refresh_token_remember_me_expiry", 30)?
        .set_default("database.url", "tutorhub.db")?
        .set_default("database.pool_size", 10)?
        .set_default("database.timeout", 30)?
        .set_default("cache.type", "moka")?
        .set_default("cache.default_ttl", 300)?
        .set_default("cache.redis.url", "redis://127.0.0.1:6379")?
        .set_default("cache.redis.key_prefix", "tutorhub:")?
        .set_default("cache.redis.pool_size", 10)?
        .set_default("cache.memory.max_capacity", 10_000)?
        .set_default("cors.allowed_origins", Vec::<String>::new())?
        .set_default("cors.allowed_methods", Vec::<String>::new())?
        .set_default("cors.allowed_headers", Vec::<String>::new())?
        .set_default("cors.max_age", 3600)?
        .set_default("argon2.memory_cost", 19_456)?
        .set_default("argon2.time_cost", 2)?
        .set_default("argon2.parallelism", 1)?
        .set_default("booking.min_lead_minutes", 0)?
        .set_default("booking.max_duration_minutes", 240)
}

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = with_defaults(Config::builder())?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("TUTORHUB")
                    .separator("__")
                    .try_parsing(true),
            );

        // 常用环境变量
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("server.trust_proxy", std::env::var("TRUST_PROXY").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("cache.default_ttl", std::env::var("REDIS_TTL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }
        resolve_jwt_secret(&mut app_config)?;

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize_without_files() {
        let config: AppConfig = with_defaults(Config::builder())
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("defaults should form a complete config");

        assert_eq!(config.app.system_name, "TutorHub");
        assert_eq!(config.cache.cache_type, "moka");
        assert_eq!(config.server_bind_address(), "127.0.0.1:8080");
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.booking.max_duration_minutes, 240);
        assert!(config.jwt.secret.is_empty());
        assert!(!config.server.trust_proxy);
    }

    fn defaults_in(environment: &str, secret: &str) -> AppConfig {
        let mut config: AppConfig = with_defaults(Config::builder())
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .unwrap();
        config.app.environment = environment.to_string();
        config.jwt.secret = secret.to_string();
        config
    }

    #[test]
    fn test_production_requires_strong_secret() {
        for secret in ["", "change-me-in-production", "CHANGEME", "short-but-not-placeholder"] {
            let mut config = defaults_in("production", secret);
            assert!(resolve_jwt_secret(&mut config).is_err(), "accepted {secret:?}");
        }

        let strong = "k3J9x2mQ7vR8tL1wZ5nB4cY6hD0fG2sAeP";
        let mut config = defaults_in("production", strong);
        assert!(resolve_jwt_secret(&mut config).is_ok());
        assert_eq!(config.jwt.secret, strong);
    }

    #[test]
    fn test_missing_secret_is_randomised_outside_production() {
        let mut first = defaults_in("development", "");
        let mut second = defaults_in("development", "");
        resolve_jwt_secret(&mut first).unwrap();
        resolve_jwt_secret(&mut second).unwrap();

        assert_eq!(first.jwt.secret.len(), 64);
        assert_ne!(first.jwt.secret, second.jwt.secret);
        assert!(!PLACEHOLDER_SECRETS.contains(&first.jwt.secret.as_str()));
    }
}
