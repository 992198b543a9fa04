use crate::models::*;
use crate::services::{DrawCategoryService, DrawService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/draws",
    tag = "draws",
    params(
        ("category" = Option<String>, Query, description = "分类 slug，精确匹配"),
        ("status" = Option<String>, Query, description = "pending / live / completed / cancelled"),
        ("draw_number" = Option<String>, Query, description = "期号子串搜索"),
        ("date_from" = Option<String>, Query, description = "开奖日期下界 (YYYY-MM-DD)"),
        ("date_to" = Option<String>, Query, description = "开奖日期上界 (YYYY-MM-DD)"),
        ("page" = Option<u64>, Query, description = "页码 (默认1，每页20)")
    ),
    responses(
        (status = 200, description = "获取开奖列表成功", body = DrawIndexResponse)
    )
)]
/// 公开首页数据：
/// 筛选后的开奖分页 + 分类选择器 + 进行中开奖 + 精选开奖 + 回显筛选值
pub async fn index(
    draw_service: web::Data<DrawService>,
    category_service: web::Data<DrawCategoryService>,
    query: web::Query<DrawListQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();

    let result: crate::error::AppResult<DrawIndexResponse> = async {
        let draws = draw_service.list(&query).await?;
        let categories = category_service.options().await?;
        let live_draws = draw_service.live_draws().await?;
        let featured_draws = draw_service.featured_draws().await?;

        Ok(DrawIndexResponse {
            draws,
            categories,
            live_draws,
            featured_draws,
            filters: query,
        })
    }
    .await;

    match result {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/draws/{id}",
    tag = "draws",
    params(
        ("id" = i64, Path, description = "开奖记录ID")
    ),
    responses(
        (status = 200, description = "获取开奖详情成功", body = DrawDetailResponse),
        (status = 404, description = "记录不存在")
    )
)]
/// 开奖详情 + 同分类已完成的相关开奖（最多5条）
pub async fn show(
    draw_service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let result: crate::error::AppResult<DrawDetailResponse> = async {
        let draw = draw_service.find_with_category(id).await?;
        let related_draws = draw_service.related_draws(&draw).await?;
        Ok(DrawDetailResponse {
            draw,
            related_draws,
        })
    }
    .await;

    match result {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draws_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draws")
            .route("", web::get().to(index))
            .route("/{id}", web::get().to(show)),
    );
}
