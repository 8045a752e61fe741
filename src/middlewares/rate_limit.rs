//! 固定窗口限流
//!
//! 计数键为 `前缀:客户端:窗口序号`，客户端优先取已认证用户，其次取对端 IP。
//! 超限返回 429 并带 `Retry-After`；放行的响应附带 `X-RateLimit-*` 头。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::{IpAddr, SocketAddr};
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::config::AppConfig;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

const MAX_WINDOW_SECS: u64 = 3600;

// 窗口键过期后自然淘汰，TTL 覆盖最长窗口即可
static WINDOW_COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(MAX_WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    scope: &'static str,
}

/// 一次计数的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quota {
    limit: u32,
    used: u32,
    reset_secs: u64,
}

impl Quota {
    fn exceeded(&self) -> bool {
        self.used > self.limit
    }

    fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}

impl RateLimit {
    /// 窗口长度限制在 1..=3600 秒
    pub fn new(scope: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.clamp(1, MAX_WINDOW_SECS),
            scope,
        }
    }

    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    fn counter_key(&self, client: &str, now_secs: u64) -> String {
        format!("{}:{client}:{}", self.scope, now_secs / self.window_secs)
    }

    fn reset_after(&self, now_secs: u64) -> u64 {
        self.window_secs - now_secs % self.window_secs
    }

    async fn hit(&self, client: &str) -> Quota {
        let now_secs = chrono::Utc::now().timestamp().max(0) as u64;
        let used = WINDOW_COUNTERS
            .entry(self.counter_key(client, now_secs))
            .and_upsert_with(|entry| async move {
                entry.map_or(1, |e| e.into_value().saturating_add(1))
            })
            .await
            .into_value();

        Quota {
            limit: self.max_requests,
            used,
            reset_secs: self.reset_after(now_secs),
        }
    }
}

fn parse_ip(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
        .or_else(|| {
            raw.rsplit_once(':')
                .and_then(|(host, _)| host.trim_matches(['[', ']']).parse().ok())
        })
}

/// 限流主体：已认证用户按 ID，否则按 IP
///
/// 默认只认 TCP 对端地址。`trust_proxy` 打开时才采用 Forwarded / X-Forwarded-For，
/// 此时必须由反向代理覆盖这些头。
fn client_key(req: &ServiceRequest, trust_proxy: bool) -> String {
    if let Some(user) = req.extensions().get::<User>() {
        return format!("user:{}", user.id);
    }

    let ip = if trust_proxy {
        req.connection_info().realip_remote_addr().and_then(parse_ip)
    } else {
        req.peer_addr().map(|addr| addr.ip())
    };

    match ip {
        Some(ip) => format!("ip:{ip}"),
        None => "ip:unknown".to_string(),
    }
}

fn too_many_requests(quota: Quota) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header(("Retry-After", quota.reset_secs.to_string()))
        .insert_header((REMAINING_HEADER, "0"))
        .json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    policy: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let policy = self.policy.clone();

        Box::pin(async move {
            let client = client_key(&req, AppConfig::get().server.trust_proxy);
            let quota = policy.hit(&client).await;

            if quota.exceeded() {
                warn!(
                    "Rate limit exceeded: scope={} client={} ({}/{})",
                    policy.scope, client, quota.used, quota.limit
                );
                return Ok(req.into_response(too_many_requests(quota).map_into_right_body()));
            }

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            for (name, value) in [
                (LIMIT_HEADER, HeaderValue::from(quota.limit)),
                (REMAINING_HEADER, HeaderValue::from(quota.remaining())),
                (RESET_HEADER, HeaderValue::from(quota.reset_secs)),
            ] {
                headers.insert(HeaderName::from_static(name), value);
            }
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!((login.scope, login.max_requests, login.window_secs), ("login", 5, 60));
        let register = RateLimit::register();
        assert_eq!((register.max_requests, register.window_secs), (3, 60));
        let refresh = RateLimit::refresh_token();
        assert_eq!((refresh.scope, refresh.max_requests), ("refresh", 10));
    }

    #[test]
    fn test_counter_key_is_stable_within_window() {
        let limit = RateLimit::login();
        assert_eq!(limit.counter_key("ip:127.0.0.1", 120), "login:ip:127.0.0.1:2");
        assert_eq!(
            limit.counter_key("ip:127.0.0.1", 179),
            limit.counter_key("ip:127.0.0.1", 120)
        );
        assert_ne!(
            limit.counter_key("ip:127.0.0.1", 180),
            limit.counter_key("ip:127.0.0.1", 179)
        );
        assert_eq!(limit.reset_after(120), 60);
        assert_eq!(limit.reset_after(179), 1);
    }

    #[test]
    fn test_window_is_clamped() {
        assert_eq!(RateLimit::new("t", 1, 0).window_secs, 1);
        assert_eq!(RateLimit::new("t", 1, 86_400).window_secs, MAX_WINDOW_SECS);
    }

    #[test]
    fn test_quota_accounting() {
        let quota = Quota { limit: 3, used: 3, reset_secs: 10 };
        assert!(!quota.exceeded());
        assert_eq!(quota.remaining(), 0);
        assert!(Quota { limit: 3, used: 4, reset_secs: 10 }.exceeded());
    }

    #[actix_web::test]
    async fn test_hits_accumulate_per_client() {
        let limit = RateLimit::new("unit-test", 2, MAX_WINDOW_SECS);
        let client = format!("ip:{}", uuid::Uuid::new_v4());
        assert_eq!(limit.hit(&client).await.used, 1);
        assert_eq!(limit.hit(&client).await.used, 2);
        assert!(limit.hit(&client).await.exceeded());
    }

    fn request_from(peer: &str, forwarded_for: &str) -> ServiceRequest {
        TestRequest::default()
            .peer_addr(peer.parse().unwrap())
            .insert_header(("X-Forwarded-For", forwarded_for))
            .to_srv_request()
    }

    #[test]
    fn test_forwarded_header_ignored_without_trusted_proxy() {
        let first = request_from("198.51.100.4:5000", "203.0.113.7");
        let second = request_from("198.51.100.4:5001", "203.0.113.99");
        assert_eq!(client_key(&first, false), "ip:198.51.100.4");
        assert_eq!(client_key(&first, false), client_key(&second, false));
    }

    #[test]
    fn test_forwarded_header_used_behind_trusted_proxy() {
        let first = request_from("10.0.0.1:5000", "203.0.113.7, 10.0.0.1");
        let second = request_from("10.0.0.1:5000", "203.0.113.99");
        assert_eq!(client_key(&first, true), "ip:203.0.113.7");
        assert_ne!(client_key(&first, true), client_key(&second, true));
    }

    #[test]
    fn test_parse_ip_forms() {
        assert!(parse_ip("::1").is_some());
        assert_eq!(parse_ip("127.0.0.1:8080"), "127.0.0.1".parse().ok());
        assert_eq!(parse_ip("[::1]:8080"), "::1".parse().ok());
        assert!(parse_ip("not-an-ip").is_none());
    }
}
