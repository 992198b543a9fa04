use crate::entities::draw_category_entity as categories;
use crate::entities::draw_entity as draws;
use crate::entities::draws::{DrawStatus, NumberList};
use crate::error::{AppError, AppResult, ValidationErrors};
use crate::models::{
    DrawListQuery, DrawRequest, DrawResponse, PaginatedResponse, PaginationParams,
};
use crate::utils::datetime;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

/// 公开列表固定每页条数
pub const PAGE_SIZE: u64 = crate::models::pagination::DEFAULT_PAGE_SIZE;

const LIVE_LIMIT: u64 = 5;
const FEATURED_LIMIT: u64 = 3;
const RELATED_LIMIT: u64 = 5;

/// 号码允许范围 [1,49]
const NUMBER_MIN: i32 = 1;
const NUMBER_MAX: i32 = 49;

/// 写路径校验需要的数据库事实，由调用方先行查询
struct WriteContext {
    category_exists: bool,
    draw_number_taken: bool,
}

/// 结构校验通过后解析出的字段
struct ValidatedDraw {
    status: DrawStatus,
    draw_date: DateTime<Utc>,
    draw_type: String,
}

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 过滤 + 排序 + 分页的开奖列表（附带分类）。
    ///
    /// 所有筛选条件可选、取交集；无法解析的值视为无约束。
    /// 按 draw_date 倒序，固定每页 20 条；超出末页返回空数据页。
    pub async fn list(&self, query: &DrawListQuery) -> AppResult<PaginatedResponse<DrawResponse>> {
        let params = PaginationParams::new(query.page, Some(PAGE_SIZE));
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query = draws::Entity::find()
            .find_also_related(categories::Entity)
            .filter(Self::filter_condition(query))
            .order_by_desc(draws::Column::DrawDate);

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .limit(limit)
            .offset(offset)
            .all(&self.pool)
            .await?;

        let data: Vec<DrawResponse> = rows.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(data, params.get_page(), limit, total))
    }

    pub async fn find_with_category(&self, id: i64) -> AppResult<DrawResponse> {
        let row = draws::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw {id} not found")))?;
        Ok(row.into())
    }

    /// 进行中的开奖（公开首页），按开奖时间升序
    pub async fn live_draws(&self) -> AppResult<Vec<DrawResponse>> {
        let rows = draws::Entity::find()
            .find_also_related(categories::Entity)
            .filter(draws::Column::Status.eq(DrawStatus::Live))
            .order_by_asc(draws::Column::DrawDate)
            .limit(LIVE_LIMIT)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 精选开奖：仅已完成且标记 is_featured 的记录，按开奖时间倒序
    pub async fn featured_draws(&self) -> AppResult<Vec<DrawResponse>> {
        let rows = draws::Entity::find()
            .find_also_related(categories::Entity)
            .filter(draws::Column::IsFeatured.eq(true))
            .filter(draws::Column::Status.eq(DrawStatus::Completed))
            .order_by_desc(draws::Column::DrawDate)
            .limit(FEATURED_LIMIT)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 详情页的相关开奖：同分类、排除自身、仅已完成
    pub async fn related_draws(&self, draw: &DrawResponse) -> AppResult<Vec<DrawResponse>> {
        let rows = draws::Entity::find()
            .find_also_related(categories::Entity)
            .filter(draws::Column::DrawCategoryId.eq(draw.draw_category_id))
            .filter(draws::Column::Id.ne(draw.id))
            .filter(draws::Column::Status.eq(DrawStatus::Completed))
            .order_by_desc(draws::Column::DrawDate)
            .limit(RELATED_LIMIT)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, req: &DrawRequest) -> AppResult<DrawResponse> {
        let ctx = WriteContext {
            category_exists: self.category_exists(req.draw_category_id).await?,
            draw_number_taken: self
                .draw_number_exists(req.draw_number.trim(), None)
                .await?,
        };

        let mut errors = ValidationErrors::new();
        let parsed = Self::validate_request(req, &ctx, &mut errors);
        errors.into_result()?;
        let parsed = parsed.ok_or_else(|| AppError::InternalError("draw validation".into()))?;

        let now = Utc::now();
        let model = draws::ActiveModel {
            draw_category_id: Set(req.draw_category_id),
            draw_number: Set(req.draw_number.trim().to_string()),
            draw_type: Set(parsed.draw_type),
            winning_numbers: Set(NumberList(req.winning_numbers.clone())),
            special_numbers: Set(req.special_numbers.clone().map(NumberList)),
            draw_date: Set(parsed.draw_date),
            status: Set(parsed.status),
            prize_pool: Set(req.prize_pool),
            total_winners: Set(req.total_winners),
            prize_breakdown: Set(req.prize_breakdown.clone()),
            notes: Set(req.notes.clone()),
            is_featured: Set(req.is_featured),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        let inserted = model.insert(&self.pool).await.map_err(Self::map_write_err)?;
        self.find_with_category(inserted.id).await
    }

    pub async fn update(&self, id: i64, req: &DrawRequest) -> AppResult<DrawResponse> {
        let existing = draws::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw {id} not found")))?;

        let ctx = WriteContext {
            category_exists: self.category_exists(req.draw_category_id).await?,
            // 唯一性检查排除自身：改回自己的期号是合法的
            draw_number_taken: self
                .draw_number_exists(req.draw_number.trim(), Some(id))
                .await?,
        };

        let mut errors = ValidationErrors::new();
        let parsed = Self::validate_request(req, &ctx, &mut errors);
        errors.into_result()?;
        let parsed = parsed.ok_or_else(|| AppError::InternalError("draw validation".into()))?;

        let mut am = existing.into_active_model();
        am.draw_category_id = Set(req.draw_category_id);
        am.draw_number = Set(req.draw_number.trim().to_string());
        am.draw_type = Set(parsed.draw_type);
        am.winning_numbers = Set(NumberList(req.winning_numbers.clone()));
        am.special_numbers = Set(req.special_numbers.clone().map(NumberList));
        am.draw_date = Set(parsed.draw_date);
        am.status = Set(parsed.status);
        am.prize_pool = Set(req.prize_pool);
        am.total_winners = Set(req.total_winners);
        am.prize_breakdown = Set(req.prize_breakdown.clone());
        am.notes = Set(req.notes.clone());
        am.is_featured = Set(req.is_featured);
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await.map_err(Self::map_write_err)?;
        self.find_with_category(updated.id).await
    }

    /// 删除单条开奖记录，无级联影响
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = draws::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw {id} not found")))?;

        existing.delete(&self.pool).await?;
        Ok(())
    }

    async fn category_exists(&self, id: i64) -> AppResult<bool> {
        Ok(categories::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .is_some())
    }

    async fn draw_number_exists(
        &self,
        draw_number: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let mut query =
            draws::Entity::find().filter(draws::Column::DrawNumber.eq(draw_number));
        if let Some(id) = exclude_id {
            query = query.filter(draws::Column::Id.ne(id));
        }
        Ok(query.one(&self.pool).await?.is_some())
    }

    /// 组合公开列表的筛选条件
    fn filter_condition(query: &DrawListQuery) -> Condition {
        let mut condition = Condition::all();

        if let Some(slug) = query.category.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(categories::Column::Slug.eq(slug));
        }
        if let Some(status) = query.status.as_deref().and_then(DrawStatus::parse) {
            condition = condition.add(draws::Column::Status.eq(status));
        }
        if let Some(number) = query.draw_number.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(draws::Column::DrawNumber.contains(number));
        }
        if let Some(from) = query.date_from.as_deref().and_then(datetime::parse_date) {
            condition = condition.add(draws::Column::DrawDate.gte(datetime::day_start(from)));
        }
        if let Some(to) = query.date_to.as_deref().and_then(datetime::parse_date) {
            condition = condition.add(draws::Column::DrawDate.lte(datetime::day_end(to)));
        }

        condition
    }

    /// 写路径结构校验。所有错误一次性收集，通过后返回解析出的字段。
    fn validate_request(
        req: &DrawRequest,
        ctx: &WriteContext,
        errors: &mut ValidationErrors,
    ) -> Option<ValidatedDraw> {
        if !ctx.category_exists {
            errors.add("draw_category_id", "The selected draw category is invalid.");
        }

        let draw_number = req.draw_number.trim();
        if draw_number.is_empty() {
            errors.add("draw_number", "Draw number is required.");
        } else if draw_number.len() > 50 {
            errors.add(
                "draw_number",
                "Draw number may not be greater than 50 characters.",
            );
        } else if ctx.draw_number_taken {
            errors.add("draw_number", "This draw number already exists.");
        }

        let draw_type = req
            .draw_type
            .clone()
            .unwrap_or_else(|| "regular".to_string());
        if draw_type.trim().is_empty() || draw_type.len() > 50 {
            errors.add("draw_type", "Draw type must be between 1 and 50 characters.");
        }

        let status = DrawStatus::parse(&req.status);
        if status.is_none() {
            errors.add(
                "status",
                "Draw status must be one of pending, live, completed or cancelled.",
            );
        }

        // 仅 pending 状态允许没有号码（尚未开奖）
        if req.winning_numbers.is_empty() && !matches!(status, Some(DrawStatus::Pending)) {
            errors.add("winning_numbers", "At least one winning number is required.");
        }
        if req
            .winning_numbers
            .iter()
            .any(|n| !(NUMBER_MIN..=NUMBER_MAX).contains(n))
        {
            errors.add("winning_numbers", "Winning numbers must be between 1 and 49.");
        }
        if let Some(special) = &req.special_numbers
            && special
                .iter()
                .any(|n| !(NUMBER_MIN..=NUMBER_MAX).contains(n))
        {
            errors.add("special_numbers", "Special numbers must be between 1 and 49.");
        }

        let draw_date = datetime::parse_datetime(req.draw_date.trim());
        if draw_date.is_none() {
            errors.add("draw_date", "Draw date must be a valid date.");
        }

        if req.total_winners < 0 {
            errors.add("total_winners", "Total winners must be at least 0.");
        }
        if let Some(pool) = req.prize_pool
            && pool.is_sign_negative()
        {
            errors.add("prize_pool", "Prize pool must be at least 0.");
        }
        if let Some(breakdown) = &req.prize_breakdown {
            for (tier, prize) in &breakdown.0 {
                if prize.winners < 0 {
                    errors.add(
                        "prize_breakdown",
                        format!("Winner count for tier \"{tier}\" must be at least 0."),
                    );
                }
                if prize.amount.is_sign_negative() {
                    errors.add(
                        "prize_breakdown",
                        format!("Amount for tier \"{tier}\" must be at least 0."),
                    );
                }
            }
        }

        if errors.is_empty() {
            Some(ValidatedDraw {
                status: status?,
                draw_date: draw_date?,
                draw_type,
            })
        } else {
            None
        }
    }

    /// 并发写入撞上唯一键/外键约束时，把存储层错误映射回字段级错误
    fn map_write_err(err: sea_orm::DbErr) -> AppError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::validation("draw_number", "This draw number already exists.")
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::validation("draw_category_id", "The selected draw category is invalid.")
            }
            _ => AppError::DatabaseError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::draws::{PrizeBreakdown, PrizeTier};
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn ok_context() -> WriteContext {
        WriteContext {
            category_exists: true,
            draw_number_taken: false,
        }
    }

    fn base_request() -> DrawRequest {
        DrawRequest {
            draw_category_id: 1,
            draw_number: "0001/25".to_string(),
            draw_type: None,
            winning_numbers: vec![3, 11, 22, 34, 41, 49],
            special_numbers: Some(vec![7]),
            draw_date: "2025-01-01 21:30:00".to_string(),
            status: "completed".to_string(),
            prize_pool: Some(Decimal::new(800_000_000, 2)),
            total_winners: 12,
            prize_breakdown: None,
            notes: None,
            is_featured: false,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let mut errors = ValidationErrors::new();
        let parsed =
            DrawService::validate_request(&base_request(), &ok_context(), &mut errors).unwrap();
        assert!(errors.is_empty());
        assert_eq!(parsed.status, DrawStatus::Completed);
        assert_eq!(parsed.draw_type, "regular");
    }

    #[test]
    fn test_winning_numbers_out_of_range() {
        let mut req = base_request();
        req.winning_numbers = vec![0, 50];
        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&req, &ok_context(), &mut errors).is_none());
        assert!(errors.fields().contains_key("winning_numbers"));
    }

    #[test]
    fn test_special_numbers_out_of_range() {
        let mut req = base_request();
        req.special_numbers = Some(vec![99]);
        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&req, &ok_context(), &mut errors).is_none());
        assert!(errors.fields().contains_key("special_numbers"));
    }

    #[test]
    fn test_empty_winning_numbers_only_allowed_while_pending() {
        let mut req = base_request();
        req.winning_numbers = vec![];
        req.status = "pending".to_string();
        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&req, &ok_context(), &mut errors).is_some());

        req.status = "completed".to_string();
        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&req, &ok_context(), &mut errors).is_none());
        assert!(errors.fields().contains_key("winning_numbers"));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut req = base_request();
        req.status = "archived".to_string();
        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&req, &ok_context(), &mut errors).is_none());
        assert!(errors.fields().contains_key("status"));
    }

    #[test]
    fn test_invalid_draw_date_rejected() {
        let mut req = base_request();
        req.draw_date = "soon".to_string();
        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&req, &ok_context(), &mut errors).is_none());
        assert!(errors.fields().contains_key("draw_date"));
    }

    #[test]
    fn test_draw_number_rules() {
        let mut req = base_request();
        req.draw_number = String::new();
        let mut errors = ValidationErrors::new();
        DrawService::validate_request(&req, &ok_context(), &mut errors);
        assert!(errors.fields().contains_key("draw_number"));

        let mut req = base_request();
        req.draw_number = "x".repeat(51);
        let mut errors = ValidationErrors::new();
        DrawService::validate_request(&req, &ok_context(), &mut errors);
        assert!(errors.fields().contains_key("draw_number"));

        let ctx = WriteContext {
            category_exists: true,
            draw_number_taken: true,
        };
        let mut errors = ValidationErrors::new();
        DrawService::validate_request(&base_request(), &ctx, &mut errors);
        assert_eq!(
            errors.fields().get("draw_number").map(|m| m[0].as_str()),
            Some("This draw number already exists.")
        );
    }

    #[test]
    fn test_missing_category_rejected() {
        let ctx = WriteContext {
            category_exists: false,
            draw_number_taken: false,
        };
        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&base_request(), &ctx, &mut errors).is_none());
        assert!(errors.fields().contains_key("draw_category_id"));
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut req = base_request();
        req.total_winners = -1;
        req.prize_pool = Some(Decimal::new(-100, 2));
        let mut tiers = BTreeMap::new();
        tiers.insert(
            "first_prize".to_string(),
            PrizeTier {
                winners: -2,
                amount: Decimal::new(-1, 0),
            },
        );
        req.prize_breakdown = Some(PrizeBreakdown(tiers));

        let mut errors = ValidationErrors::new();
        assert!(DrawService::validate_request(&req, &ok_context(), &mut errors).is_none());
        assert!(errors.fields().contains_key("total_winners"));
        assert!(errors.fields().contains_key("prize_pool"));
        assert_eq!(errors.fields().get("prize_breakdown").map(Vec::len), Some(2));
    }

    #[test]
    fn test_filter_condition_ignores_unknown_values() {
        // 未知 status 与无法解析的日期按"无约束"处理
        let query = DrawListQuery {
            status: Some("garbage".to_string()),
            date_from: Some("not-a-date".to_string()),
            ..Default::default()
        };
        let condition = DrawService::filter_condition(&query);
        assert_eq!(format!("{condition:?}"), format!("{:?}", Condition::all()));
    }
}
