use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 开奖时间表 (JSON 列)
/// - days: 星期名称集合 (monday..sunday)
/// - time: "HH:MM"
/// - timezone: IANA 时区名，如 "Asia/Hong_Kong"
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct DrawSchedule {
    pub days: Vec<String>,
    pub time: String,
    pub timezone: String,
}

/// 彩票分类实体（如 Mark Six）
/// - slug: URL 安全的唯一标识，用于公开页筛选
/// - is_active: 停用后不再出现在选择器中，已有开奖记录仍然有效
/// - sort_order: 展示排序（升序）
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "draw_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// 展示用十六进制颜色 (#RRGGBB)
    pub color: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub draw_schedule: Option<DrawSchedule>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::draws::Entity")]
    Draws,
}

impl Related<super::draws::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Draws.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
