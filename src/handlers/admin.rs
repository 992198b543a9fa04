use crate::models::*;
use crate::services::{DrawCategoryService, DrawService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

// -----------------------------
// 开奖记录管理
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/draws",
    tag = "admin",
    params(
        ("page" = Option<u64>, Query, description = "页码 (默认1，每页20)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取开奖列表成功"),
        (status = 401, description = "未授权")
    )
)]
/// 后台开奖列表（倒序分页，支持与公开页相同的筛选参数）
pub async fn list_draws(
    service: web::Data<DrawService>,
    query: web::Query<DrawListQuery>,
) -> Result<HttpResponse> {
    match service.list(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/draws",
    tag = "admin",
    request_body = DrawRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "创建成功", body = DrawResponse),
        (status = 401, description = "未授权"),
        (status = 422, description = "校验失败")
    )
)]
/// 创建开奖记录；全部校验通过后才写库
pub async fn create_draw(
    service: web::Data<DrawService>,
    payload: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service.create(&payload.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": draw,
            "message": "Draw created successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/draws/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "开奖记录ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取成功", body = DrawResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "记录不存在")
    )
)]
pub async fn show_draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.find_with_category(path.into_inner()).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": draw }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/draws/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "开奖记录ID")),
    request_body = DrawRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "更新成功", body = DrawResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "记录不存在"),
        (status = 422, description = "校验失败")
    )
)]
/// 更新开奖记录；期号唯一性检查排除自身
pub async fn update_draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
    payload: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service
        .update(path.into_inner(), &payload.into_inner())
        .await
    {
        Ok(draw) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": draw,
            "message": "Draw updated successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/draws/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "开奖记录ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "删除成功"),
        (status = 401, description = "未授权"),
        (status = 404, description = "记录不存在")
    )
)]
pub async fn delete_draw(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Draw deleted successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// -----------------------------
// 分类管理
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/categories",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取分类列表成功", body = [CategoryResponse]),
        (status = 401, description = "未授权")
    )
)]
/// 全部分类（含停用），sort_order 升序
pub async fn list_categories(service: web::Data<DrawCategoryService>) -> Result<HttpResponse> {
    match service.list_all().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = "admin",
    request_body = CategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "创建成功", body = CategoryResponse),
        (status = 401, description = "未授权"),
        (status = 422, description = "校验失败")
    )
)]
pub async fn create_category(
    service: web::Data<DrawCategoryService>,
    payload: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    match service.create(&payload.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": category,
            "message": "Category created successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "分类ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "获取成功", body = CategoryResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "分类不存在")
    )
)]
pub async fn show_category(
    service: web::Data<DrawCategoryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.find(path.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": category }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "分类ID")),
    request_body = CategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "更新成功", body = CategoryResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "分类不存在"),
        (status = 422, description = "校验失败")
    )
)]
pub async fn update_category(
    service: web::Data<DrawCategoryService>,
    path: web::Path<i64>,
    payload: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    match service
        .update(path.into_inner(), &payload.into_inner())
        .await
    {
        Ok(category) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": category,
            "message": "Category updated successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "分类ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "删除成功（所属开奖一并级联删除）"),
        (status = 401, description = "未授权"),
        (status = 404, description = "分类不存在")
    )
)]
/// 删除分类，所属开奖记录级联删除
pub async fn delete_category(
    service: web::Data<DrawCategoryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Category deleted successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/draws", web::get().to(list_draws))
            .route("/draws", web::post().to(create_draw))
            .route("/draws/{id}", web::get().to(show_draw))
            .route("/draws/{id}", web::put().to(update_draw))
            .route("/draws/{id}", web::delete().to(delete_draw))
            .route("/categories", web::get().to(list_categories))
            .route("/categories", web::post().to(create_category))
            .route("/categories/{id}", web::get().to(show_category))
            .route("/categories/{id}", web::put().to(update_category))
            .route("/categories/{id}", web::delete().to(delete_category)),
    );
}
