use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveIden)]
enum DrawCategories {
    Table,
    Slug,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始分类数据（与上线时的四个彩种一致），按 slug 幂等插入
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO draw_categories (name, slug, description, color, draw_schedule, is_active, sort_order)
VALUES
 ('Mark Six', 'mark-six', 'Hong Kong''s premier lottery draw with 6 winning numbers plus 1 special number.', '#EF4444', '{"days":["tuesday","thursday","saturday"],"time":"21:30","timezone":"Asia/Hong_Kong"}', TRUE, 1),
 ('Lucky Numbers', 'lucky-numbers', 'Daily draw featuring 5 lucky numbers with bonus prizes.', '#F59E0B', '{"days":["monday","tuesday","wednesday","thursday","friday","saturday","sunday"],"time":"20:00","timezone":"Asia/Hong_Kong"}', TRUE, 2),
 ('Dragon Draw', 'dragon-draw', 'Special weekly draw with enhanced prize pools and unique number combinations.', '#10B981', '{"days":["sunday"],"time":"22:00","timezone":"Asia/Hong_Kong"}', TRUE, 3),
 ('Golden Balls', 'golden-balls', 'Premium lottery with the highest jackpots and exclusive prizes.', '#8B5CF6', '{"days":["wednesday","saturday"],"time":"21:00","timezone":"Asia/Hong_Kong"}', TRUE, 4)
ON CONFLICT (slug) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 仅移除种子行，已建立的其它分类不受影响
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(DrawCategories::Table)
                    .cond_where(
                        Expr::col(DrawCategories::Slug).is_in([
                            "mark-six",
                            "lucky-numbers",
                            "dragon-draw",
                            "golden-balls",
                        ]),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
