use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::draw_categories::DrawSchedule;
use crate::entities::draw_category_entity as category_entity;

/// 分类完整响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub draw_schedule: Option<DrawSchedule>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<category_entity::Model> for CategoryResponse {
    fn from(m: category_entity::Model) -> Self {
        CategoryResponse {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            color: m.color,
            draw_schedule: m.draw_schedule,
            is_active: m.is_active,
            sort_order: m.sort_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// 选择器用的精简分类信息（公开筛选栏 / 后台表单）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub color: String,
}

impl From<category_entity::Model> for CategoryOption {
    fn from(m: category_entity::Model) -> Self {
        CategoryOption {
            id: m.id,
            name: m.name,
            slug: m.slug,
            color: m.color,
        }
    }
}

/// 创建/更新分类请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    /// 缺省时由 name 自动生成
    pub slug: Option<String>,
    pub description: Option<String>,
    /// 缺省使用默认主题色
    pub color: Option<String>,
    pub draw_schedule: Option<DrawSchedule>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}
