use crate::entities::draw_categories::DrawSchedule;
use crate::entities::draw_category_entity as categories;
use crate::error::{AppError, AppResult, ValidationErrors};
use crate::models::{CategoryOption, CategoryRequest, CategoryResponse};
use crate::utils::{is_valid_slug, slugify};
use chrono::Utc;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

const DEFAULT_COLOR: &str = "#3B82F6";

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// 结构校验通过后的派生字段
struct ValidatedCategory {
    slug: String,
    color: String,
}

#[derive(Clone)]
pub struct DrawCategoryService {
    pool: DatabaseConnection,
}

impl DrawCategoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 全部分类（后台列表），sort_order 升序
    pub async fn list_all(&self) -> AppResult<Vec<CategoryResponse>> {
        let list = categories::Entity::find()
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 启用中的分类（公开页）
    pub async fn list_active(&self) -> AppResult<Vec<CategoryResponse>> {
        let list = categories::Entity::find()
            .filter(categories::Column::IsActive.eq(true))
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 选择器选项（仅启用分类的精简字段）
    pub async fn options(&self) -> AppResult<Vec<CategoryOption>> {
        let list = categories::Entity::find()
            .filter(categories::Column::IsActive.eq(true))
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn find(&self, id: i64) -> AppResult<CategoryResponse> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw category {id} not found")))?;
        Ok(model.into())
    }

    pub async fn create(&self, req: &CategoryRequest) -> AppResult<CategoryResponse> {
        let mut errors = ValidationErrors::new();
        let parsed = Self::validate_request(req, &mut errors);

        if let Some(parsed) = &parsed
            && self.slug_exists(&parsed.slug, None).await?
        {
            errors.add("slug", "This slug is already in use.");
        }
        errors.into_result()?;
        let parsed = parsed.ok_or_else(|| AppError::InternalError("category validation".into()))?;

        let now = Utc::now();
        let model = categories::ActiveModel {
            name: Set(req.name.trim().to_string()),
            slug: Set(parsed.slug),
            description: Set(req.description.clone()),
            color: Set(parsed.color),
            draw_schedule: Set(req.draw_schedule.clone()),
            is_active: Set(req.is_active),
            sort_order: Set(req.sort_order),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        let inserted = model.insert(&self.pool).await.map_err(Self::map_write_err)?;
        Ok(inserted.into())
    }

    pub async fn update(&self, id: i64, req: &CategoryRequest) -> AppResult<CategoryResponse> {
        let existing = categories::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw category {id} not found")))?;

        let mut errors = ValidationErrors::new();
        let parsed = Self::validate_request(req, &mut errors);

        if let Some(parsed) = &parsed
            && self.slug_exists(&parsed.slug, Some(id)).await?
        {
            errors.add("slug", "This slug is already in use.");
        }
        errors.into_result()?;
        let parsed = parsed.ok_or_else(|| AppError::InternalError("category validation".into()))?;

        let mut am = existing.into_active_model();
        am.name = Set(req.name.trim().to_string());
        am.slug = Set(parsed.slug);
        am.description = Set(req.description.clone());
        am.color = Set(parsed.color);
        am.draw_schedule = Set(req.draw_schedule.clone());
        am.is_active = Set(req.is_active);
        am.sort_order = Set(req.sort_order);
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await.map_err(Self::map_write_err)?;
        Ok(updated.into())
    }

    /// 删除分类，所属开奖记录由外键级联一并删除
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = categories::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draw category {id} not found")))?;

        existing.delete(&self.pool).await.map_err(Self::map_write_err)?;
        Ok(())
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let mut query = categories::Entity::find().filter(categories::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(categories::Column::Id.ne(id));
        }
        Ok(query.one(&self.pool).await?.is_some())
    }

    /// 结构校验；错误写入 errors，通过时返回派生出的 slug 与颜色
    fn validate_request(
        req: &CategoryRequest,
        errors: &mut ValidationErrors,
    ) -> Option<ValidatedCategory> {
        if req.name.trim().is_empty() {
            errors.add("name", "Category name is required.");
        } else if req.name.len() > 255 {
            errors.add("name", "Category name may not be greater than 255 characters.");
        }

        let slug = match req.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => {
                if !is_valid_slug(slug) {
                    errors.add(
                        "slug",
                        "Slug may only contain lowercase letters, numbers and hyphens.",
                    );
                }
                slug.to_string()
            }
            _ => {
                // 未提供 slug 时由名称派生
                let derived = slugify(&req.name);
                if derived.is_empty() && !req.name.trim().is_empty() {
                    errors.add("slug", "A slug could not be derived from the name.");
                }
                derived
            }
        };

        let color = req
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let color_re = Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex");
        if !color_re.is_match(&color) {
            errors.add("color", "Color must be a hex value like #3B82F6.");
        }

        if let Some(schedule) = &req.draw_schedule {
            Self::validate_schedule(schedule, errors);
        }

        if errors.is_empty() {
            Some(ValidatedCategory { slug, color })
        } else {
            None
        }
    }

    fn validate_schedule(schedule: &DrawSchedule, errors: &mut ValidationErrors) {
        if schedule.days.is_empty() {
            errors.add("draw_schedule", "Schedule must include at least one day.");
        }
        for day in &schedule.days {
            if !WEEKDAYS.contains(&day.as_str()) {
                errors.add(
                    "draw_schedule",
                    format!("\"{day}\" is not a valid weekday name."),
                );
            }
        }

        let time_re = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid regex");
        if !time_re.is_match(&schedule.time) {
            errors.add("draw_schedule", "Schedule time must use the HH:MM format.");
        }

        if schedule.timezone.trim().is_empty() {
            errors.add("draw_schedule", "Schedule timezone is required.");
        }
    }

    /// 把落库阶段的唯一键/外键冲突映射回字段级错误（并发写入时兜底）
    fn map_write_err(err: sea_orm::DbErr) -> AppError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::validation("slug", "This slug is already in use.")
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::ConstraintError("Category is still referenced by draws".to_string())
            }
            _ => AppError::DatabaseError(err),
        }
    }
}
