use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum DrawStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "live")]
    Live,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl DrawStatus {
    /// 宽松解析：未知值返回 None（公开筛选里视为无约束）
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(DrawStatus::Pending),
            "live" => Some(DrawStatus::Live),
            "completed" => Some(DrawStatus::Completed),
            "cancelled" => Some(DrawStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for DrawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawStatus::Pending => write!(f, "pending"),
            DrawStatus::Live => write!(f, "live"),
            DrawStatus::Completed => write!(f, "completed"),
            DrawStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// 号码序列 (JSON 列)，元素范围 [1,49] 由写路径校验
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(transparent)]
pub struct NumberList(pub Vec<i32>);

/// 单个奖级：中奖人数 + 单注/总奖金
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrizeTier {
    pub winners: i32,
    pub amount: Decimal,
}

/// 奖金分配 (JSON 列)：奖级标签 -> 奖级数据
/// 奖级标签不受 schema 限制（first_prize / second_prize / 任意自定义层级）
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(transparent)]
pub struct PrizeBreakdown(pub BTreeMap<String, PrizeTier>);

/// 开奖记录实体
/// - draw_number: 全局唯一的期号（对外标识，支持子串搜索）
/// - winning_numbers: 仅 pending 状态允许为空
/// - status: 不做状态机约束，后台可任意改写
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub draw_category_id: i64,
    #[sea_orm(unique)]
    pub draw_number: String,
    pub draw_type: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub winning_numbers: NumberList,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub special_numbers: Option<NumberList>,
    pub draw_date: DateTime<Utc>,
    pub status: DrawStatus,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub prize_pool: Option<Decimal>,
    pub total_winners: i32,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub prize_breakdown: Option<PrizeBreakdown>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub is_featured: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::draw_categories::Entity",
        from = "Column::DrawCategoryId",
        to = "super::draw_categories::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::draw_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
