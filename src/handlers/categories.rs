use crate::models::CategoryResponse;
use crate::services::DrawCategoryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "获取启用分类成功", body = [CategoryResponse])
    )
)]
/// 公开分类列表（仅启用的，sort_order 升序）
pub async fn index(service: web::Data<DrawCategoryService>) -> Result<HttpResponse> {
    match service.list_active().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn categories_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/categories").route("", web::get().to(index)));
}
