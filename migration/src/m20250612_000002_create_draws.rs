use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum DrawCategories {
    Table,
    Id,
}

/// Draws (开奖记录表)
/// - draw_number: 全局唯一期号
/// - winning_numbers / special_numbers / prize_breakdown: JSON 列
/// - status: pending / live / completed / cancelled
#[derive(DeriveIden)]
enum Draws {
    Table,
    Id,
    DrawCategoryId,
    DrawNumber,
    DrawType,
    WinningNumbers,
    SpecialNumbers,
    DrawDate,
    Status,
    PrizePool,
    TotalWinners,
    PrizeBreakdown,
    Notes,
    IsFeatured,
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
                    .table(Draws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Draws::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Draws::DrawCategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Draws::DrawNumber)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Draws::DrawType)
                            .string_len(50)
                            .not_null()
                            .default("regular"),
                    )
                    .col(ColumnDef::new(Draws::WinningNumbers).json_binary().not_null())
                    .col(ColumnDef::new(Draws::SpecialNumbers).json_binary().null())
                    .col(
                        ColumnDef::new(Draws::DrawDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Draws::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Draws::PrizePool).decimal_len(15, 2).null())
                    .col(
                        ColumnDef::new(Draws::TotalWinners)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Draws::PrizeBreakdown).json_binary().null())
                    .col(ColumnDef::new(Draws::Notes).text().null())
                    .col(
                        ColumnDef::new(Draws::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Draws::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Draws::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // 删除分类时级联删除所属开奖记录
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draws_draw_category_id")
                            .from(Draws::Table, Draws::DrawCategoryId)
                            .to(DrawCategories::Table, DrawCategories::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 期号全局唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_draw_number_unique")
                    .table(Draws::Table)
                    .col(Draws::DrawNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_draw_category_id")
                    .table(Draws::Table)
                    .col(Draws::DrawCategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_draw_date")
                    .table(Draws::Table)
                    .col(Draws::DrawDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_status")
                    .table(Draws::Table)
                    .col(Draws::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_draw_type")
                    .table(Draws::Table)
                    .col(Draws::DrawType)
                    .to_owned(),
            )
            .await?;

        // 列表页 (status, draw_date) 与精选 (is_featured, draw_date) 组合索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_status_draw_date")
                    .table(Draws::Table)
                    .col(Draws::Status)
                    .col(Draws::DrawDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_is_featured_draw_date")
                    .table(Draws::Table)
                    .col(Draws::IsFeatured)
                    .col(Draws::DrawDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Draws::Table).to_owned())
            .await?;

        Ok(())
    }
}
