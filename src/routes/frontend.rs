//! 前端单页应用
//!
//! 构建产物（frontend/dist）通过 rust-embed 编译进二进制：
//! - 命中文件直接返回，未命中的页面路由回退到 index.html
//! - `/api/` 下的未知路径返回 JSON 404，不回退
//! - 带 hash 的静态资源长期缓存，HTML 不缓存

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::Path;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX_HTML: &str = "index.html";

fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "webmanifest" => "application/manifest+json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Vite 输出到 assets/ 的文件名带 hash，可以长期缓存
fn is_immutable_asset(path: &str) -> bool {
    path.starts_with("assets/") && !path.ends_with(".html")
}

fn is_api_path(path: &str) -> bool {
    path == "api" || path.starts_with("api/")
}

/// 解析请求路径对应的嵌入文件；返回 (文件名, 内容)
fn resolve_asset(path: &str) -> Option<(Cow<'_, str>, Cow<'static, [u8]>)> {
    let path = path.trim_start_matches('/');

    if !path.is_empty()
        && !path.split('/').any(|seg| seg == "..")
        && let Some(file) = FrontendAssets::get(path)
    {
        return Some((Cow::Borrowed(path), file.data));
    }

    // SPA fallback
    FrontendAssets::get(INDEX_HTML).map(|file| (Cow::Borrowed(INDEX_HTML), file.data))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    if is_api_path(path) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("No API route for /{path}"),
        )));
    }

    match resolve_asset(path) {
        Some((file_path, data)) => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(&file_path));

            if is_immutable_asset(&file_path) {
                response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
            } else {
                response.insert_header(("Cache-Control", "no-cache"));
            }

            Ok(response.body(data.into_owned()))
        }
        None => Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>TutorHub</title>
</head>
<body>
    <h1>Frontend Not Built</h1>
    <p>Run <code>npm run build</code> in <code>frontend/</code> and rebuild the server.</p>
</body>
</html>"#,
            )),
    }
}

/// 所有未被 API 匹配的 GET 请求交给前端
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("assets/app.MJS"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("assets/app.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("manifest.webmanifest"), "application/manifest+json");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_immutable_assets() {
        assert!(is_immutable_asset("assets/index-3f9a1c.js"));
        assert!(!is_immutable_asset("index.html"));
        assert!(!is_immutable_asset("favicon.ico"));
    }

    #[test]
    fn test_api_paths_are_not_spa_routes() {
        assert!(is_api_path("api"));
        assert!(is_api_path("api/unknown"));
        assert!(!is_api_path("apiary"));
        assert!(!is_api_path("student/dashboard"));
    }

    #[test]
    fn test_traversal_falls_back_to_index() {
        if let Some((name, _)) = resolve_asset("../Cargo.toml") {
            assert_eq!(name, INDEX_HTML);
        }
    }
}
