use sea_orm_migration::prelude::*;

/// Draw Categories (彩票分类表)
#[derive(DeriveIden)]
enum DrawCategories {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Color,
    DrawSchedule,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DrawCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DrawCategories::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawCategories::Slug)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DrawCategories::Description).text().null())
                    .col(
                        ColumnDef::new(DrawCategories::Color)
                            .string_len(7)
                            .not_null()
                            .default("#3B82F6"),
                    )
                    .col(
                        ColumnDef::new(DrawCategories::DrawSchedule)
                            .json_binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DrawCategories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DrawCategories::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DrawCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DrawCategories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // slug 唯一（公开页用 slug 查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_categories_slug_unique")
                    .table(DrawCategories::Table)
                    .col(DrawCategories::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_categories_is_active")
                    .table(DrawCategories::Table)
                    .col(DrawCategories::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_categories_sort_order")
                    .table(DrawCategories::Table)
                    .col(DrawCategories::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(DrawCategories::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
