use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_category_entity as category_entity;
use crate::entities::draw_entity;
use crate::entities::draws::{DrawStatus, PrizeBreakdown};

use super::{CategoryOption, CategoryResponse, PaginatedResponse};

/// 公开列表筛选参数，全部可选，多个条件取交集。
/// 非法值（未知 status、无法解析的日期）按"无约束"处理。
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DrawListQuery {
    /// 分类 slug，精确匹配
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// pending / live / completed / cancelled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// 期号子串搜索
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_number: Option<String>,
    /// 开奖日期下界 (YYYY-MM-DD，含当天)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// 开奖日期上界 (YYYY-MM-DD，含当天)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    /// 页码 (默认 1)，不回显
    #[serde(skip_serializing)]
    pub page: Option<u64>,
}

/// 开奖记录响应（内嵌分类）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub id: i64,
    pub draw_category_id: i64,
    pub draw_number: String,
    pub draw_type: String,
    pub winning_numbers: Vec<i32>,
    pub special_numbers: Option<Vec<i32>>,
    pub draw_date: DateTime<Utc>,
    pub status: DrawStatus,
    pub prize_pool: Option<Decimal>,
    pub total_winners: i32,
    pub prize_breakdown: Option<PrizeBreakdown>,
    pub notes: Option<String>,
    pub is_featured: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category: Option<CategoryResponse>,
}

impl From<(draw_entity::Model, Option<category_entity::Model>)> for DrawResponse {
    fn from((m, category): (draw_entity::Model, Option<category_entity::Model>)) -> Self {
        DrawResponse {
            id: m.id,
            draw_category_id: m.draw_category_id,
            draw_number: m.draw_number,
            draw_type: m.draw_type,
            winning_numbers: m.winning_numbers.0,
            special_numbers: m.special_numbers.map(|n| n.0),
            draw_date: m.draw_date,
            status: m.status,
            prize_pool: m.prize_pool,
            total_winners: m.total_winners,
            prize_breakdown: m.prize_breakdown,
            notes: m.notes,
            is_featured: m.is_featured,
            created_at: m.created_at,
            updated_at: m.updated_at,
            category: category.map(Into::into),
        }
    }
}

impl From<draw_entity::Model> for DrawResponse {
    fn from(m: draw_entity::Model) -> Self {
        (m, None).into()
    }
}

/// 创建/更新开奖记录请求。status 与 draw_date 以字符串提交，
/// 在写路径中解析并返回字段级错误。
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawRequest {
    pub draw_category_id: i64,
    pub draw_number: String,
    /// 缺省为 "regular"
    pub draw_type: Option<String>,
    #[serde(default)]
    pub winning_numbers: Vec<i32>,
    pub special_numbers: Option<Vec<i32>>,
    /// RFC3339 / "YYYY-MM-DD HH:MM:SS" / "YYYY-MM-DDTHH:MM" / "YYYY-MM-DD"
    pub draw_date: String,
    pub status: String,
    pub prize_pool: Option<Decimal>,
    #[serde(default)]
    pub total_winners: i32,
    pub prize_breakdown: Option<PrizeBreakdown>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

/// 公开首页载荷：当前页 + 分类选择器 + 进行中 / 精选开奖 + 回显的筛选值
#[derive(Debug, Serialize, ToSchema)]
pub struct DrawIndexResponse {
    pub draws: PaginatedResponse<DrawResponse>,
    pub categories: Vec<CategoryOption>,
    pub live_draws: Vec<DrawResponse>,
    pub featured_draws: Vec<DrawResponse>,
    pub filters: DrawListQuery,
}

/// 开奖详情页载荷：记录本身 + 同分类已完成的相关开奖
#[derive(Debug, Serialize, ToSchema)]
pub struct DrawDetailResponse {
    pub draw: DrawResponse,
    pub related_draws: Vec<DrawResponse>,
}
