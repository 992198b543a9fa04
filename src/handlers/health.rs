use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/health-check",
    tag = "health",
    responses(
        (status = 200, description = "服务正常")
    )
)]
pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// 路由配置（挂在应用根路径，不在 /api/v1 下）
pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health-check", web::get().to(health_check));
}
